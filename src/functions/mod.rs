pub mod airy;
pub mod bessel;
pub mod column;
pub mod distributions;
pub mod elliptic;
pub mod expint;
pub mod exponential;
pub mod gamma;
pub mod hypergeometric;
pub mod physics;
pub mod polynomials;
mod quadrature;
pub mod random;
pub mod special;
pub mod standard;
pub mod trigonometric;

use crate::symbols::SymbolTable;
use std::fmt;
use std::sync::Arc;

pub use column::ColumnFunction;

pub type DynFunction = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Registers the built-in catalog, group by group.
pub fn register_functions(table: &mut SymbolTable) {
    standard::register(table);
    random::register_standard(table);
    column::register(table);
    airy::register(table);
    bessel::register(table);
    special::register_clausen(table);
    physics::register_coulomb(table);
    special::register_dawson(table);
    physics::register_debye(table);
    special::register_dilogarithm(table);
    elliptic::register(table);
    special::register_error_functions(table);
    exponential::register(table);
    expint::register(table);
    physics::register_fermi_dirac(table);
    gamma::register(table);
    polynomials::register_gegenbauer(table);
    polynomials::register(table);
    hypergeometric::register(table);
    special::register_lambert(table);
    exponential::register_logarithms(table);
    standard::register_power(table);
    gamma::register_psi(table);
    physics::register_synchrotron(table);
    physics::register_transport(table);
    trigonometric::register(table);
    special::register_zeta(table);
    random::register(table);
    distributions::register(table);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FunctionGroup {
    StandardMathematicalFunctions,
    ComparisonFunctions,
    LogicalFunctions,
    MovingStatistics,
    AiryFunctions,
    BesselFunctions,
    ClausenFunctions,
    CoulombFunctions,
    DawsonFunction,
    DebyeFunctions,
    Dilogarithm,
    EllipticIntegrals,
    ErrorFunctions,
    ExponentialFunctions,
    ExponentialIntegrals,
    FermiDiracFunction,
    GammaAndBetaFunctions,
    GegenbauerFunctions,
    HermitePolynomials,
    HypergeometricFunctions,
    LaguerreFunctions,
    LambertWFunctions,
    LegendreFunctions,
    LogarithmAndRelatedFunctions,
    PowerFunction,
    PsiDigammaFunction,
    SynchrotronFunctions,
    TransportFunctions,
    TrigonometricFunctions,
    ZetaFunctions,
    RandomNumberGenerator,
    GaussianDistribution,
    ExponentialDistribution,
    LaplaceDistribution,
    ExponentialPowerDistribution,
    CauchyDistribution,
    RayleighDistribution,
    LandauDistribution,
    GammaDistribution,
    FlatUniformDistribution,
    LognormalDistribution,
    ChisquaredDistribution,
    FDistribution,
    TDistribution,
    BetaDistribution,
    LogisticDistribution,
    ParetoDistribution,
    WeibullDistribution,
    GumbelDistribution,
    PoissonDistribution,
    BernoulliDistribution,
    BinomialDistribution,
    PascalDistribution,
    GeometricDistribution,
    HypergeometricDistribution,
    LogarithmicDistribution,
}

impl FunctionGroup {
    pub const ALL: [FunctionGroup; 56] = [
        FunctionGroup::StandardMathematicalFunctions,
        FunctionGroup::ComparisonFunctions,
        FunctionGroup::LogicalFunctions,
        FunctionGroup::MovingStatistics,
        FunctionGroup::AiryFunctions,
        FunctionGroup::BesselFunctions,
        FunctionGroup::ClausenFunctions,
        FunctionGroup::CoulombFunctions,
        FunctionGroup::DawsonFunction,
        FunctionGroup::DebyeFunctions,
        FunctionGroup::Dilogarithm,
        FunctionGroup::EllipticIntegrals,
        FunctionGroup::ErrorFunctions,
        FunctionGroup::ExponentialFunctions,
        FunctionGroup::ExponentialIntegrals,
        FunctionGroup::FermiDiracFunction,
        FunctionGroup::GammaAndBetaFunctions,
        FunctionGroup::GegenbauerFunctions,
        FunctionGroup::HermitePolynomials,
        FunctionGroup::HypergeometricFunctions,
        FunctionGroup::LaguerreFunctions,
        FunctionGroup::LambertWFunctions,
        FunctionGroup::LegendreFunctions,
        FunctionGroup::LogarithmAndRelatedFunctions,
        FunctionGroup::PowerFunction,
        FunctionGroup::PsiDigammaFunction,
        FunctionGroup::SynchrotronFunctions,
        FunctionGroup::TransportFunctions,
        FunctionGroup::TrigonometricFunctions,
        FunctionGroup::ZetaFunctions,
        FunctionGroup::RandomNumberGenerator,
        FunctionGroup::GaussianDistribution,
        FunctionGroup::ExponentialDistribution,
        FunctionGroup::LaplaceDistribution,
        FunctionGroup::ExponentialPowerDistribution,
        FunctionGroup::CauchyDistribution,
        FunctionGroup::RayleighDistribution,
        FunctionGroup::LandauDistribution,
        FunctionGroup::GammaDistribution,
        FunctionGroup::FlatUniformDistribution,
        FunctionGroup::LognormalDistribution,
        FunctionGroup::ChisquaredDistribution,
        FunctionGroup::FDistribution,
        FunctionGroup::TDistribution,
        FunctionGroup::BetaDistribution,
        FunctionGroup::LogisticDistribution,
        FunctionGroup::ParetoDistribution,
        FunctionGroup::WeibullDistribution,
        FunctionGroup::GumbelDistribution,
        FunctionGroup::PoissonDistribution,
        FunctionGroup::BernoulliDistribution,
        FunctionGroup::BinomialDistribution,
        FunctionGroup::PascalDistribution,
        FunctionGroup::GeometricDistribution,
        FunctionGroup::HypergeometricDistribution,
        FunctionGroup::LogarithmicDistribution,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FunctionGroup::StandardMathematicalFunctions => "Standard Mathematical Functions",
            FunctionGroup::ComparisonFunctions => "Comparison Functions",
            FunctionGroup::LogicalFunctions => "Logical Functions",
            FunctionGroup::MovingStatistics => "Moving Statistics",
            FunctionGroup::AiryFunctions => "Airy Functions and Derivatives",
            FunctionGroup::BesselFunctions => "Bessel Functions",
            FunctionGroup::ClausenFunctions => "Clausen Functions",
            FunctionGroup::CoulombFunctions => "Coulomb Functions",
            FunctionGroup::DawsonFunction => "Dawson Function",
            FunctionGroup::DebyeFunctions => "Debye Functions",
            FunctionGroup::Dilogarithm => "Dilogarithm",
            FunctionGroup::EllipticIntegrals => "Elliptic Integrals",
            FunctionGroup::ErrorFunctions => "Error Functions and Related Functions",
            FunctionGroup::ExponentialFunctions => "Exponential Functions",
            FunctionGroup::ExponentialIntegrals => "Exponential Integrals",
            FunctionGroup::FermiDiracFunction => "Fermi-Dirac Function",
            FunctionGroup::GammaAndBetaFunctions => "Gamma and Beta Functions",
            FunctionGroup::GegenbauerFunctions => "Gegenbauer Functions",
            FunctionGroup::HermitePolynomials => "Hermite Polynomials and Functions",
            FunctionGroup::HypergeometricFunctions => "Hypergeometric Functions",
            FunctionGroup::LaguerreFunctions => "Laguerre Functions",
            FunctionGroup::LambertWFunctions => "Lambert W Functions",
            FunctionGroup::LegendreFunctions => "Legendre Functions and Spherical Harmonics",
            FunctionGroup::LogarithmAndRelatedFunctions => "Logarithm and Related Functions",
            FunctionGroup::PowerFunction => "Power Function",
            FunctionGroup::PsiDigammaFunction => "Psi (Digamma) Function",
            FunctionGroup::SynchrotronFunctions => "Synchrotron Functions",
            FunctionGroup::TransportFunctions => "Transport Functions",
            FunctionGroup::TrigonometricFunctions => "Trigonometric Functions",
            FunctionGroup::ZetaFunctions => "Zeta Functions",
            FunctionGroup::RandomNumberGenerator => "Random number generator",
            FunctionGroup::GaussianDistribution => "Gaussian Distribution",
            FunctionGroup::ExponentialDistribution => "Exponential Distribution",
            FunctionGroup::LaplaceDistribution => "Laplace Distribution",
            FunctionGroup::ExponentialPowerDistribution => "Exponential Power Distribution",
            FunctionGroup::CauchyDistribution => "Cauchy Distribution",
            FunctionGroup::RayleighDistribution => "Rayleigh Distribution",
            FunctionGroup::LandauDistribution => "Landau Distribution",
            FunctionGroup::GammaDistribution => "Gamma Distribution",
            FunctionGroup::FlatUniformDistribution => "Flat (Uniform) Distribution",
            FunctionGroup::LognormalDistribution => "Lognormal Distribution",
            FunctionGroup::ChisquaredDistribution => "Chi-squared Distribution",
            FunctionGroup::FDistribution => "F-distribution",
            FunctionGroup::TDistribution => "t-distribution",
            FunctionGroup::BetaDistribution => "Beta Distribution",
            FunctionGroup::LogisticDistribution => "Logistic Distribution",
            FunctionGroup::ParetoDistribution => "Pareto Distribution",
            FunctionGroup::WeibullDistribution => "Weibull Distribution",
            FunctionGroup::GumbelDistribution => "Gumbel Distribution",
            FunctionGroup::PoissonDistribution => "Poisson Distribution",
            FunctionGroup::BernoulliDistribution => "Bernoulli Distribution",
            FunctionGroup::BinomialDistribution => "Binomial Distribution",
            FunctionGroup::PascalDistribution => "Pascal Distribution",
            FunctionGroup::GeometricDistribution => "Geometric Distribution",
            FunctionGroup::HypergeometricDistribution => "Hypergeometric Distribution",
            FunctionGroup::LogarithmicDistribution => "Logarithmic Distribution",
        }
    }
}

impl fmt::Display for FunctionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Native implementation of a catalog function.
#[derive(Clone)]
pub enum FunctionImpl {
    Nullary(fn() -> f64),
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
    Ternary(fn(f64, f64, f64) -> f64),
    Quaternary(fn(f64, f64, f64, f64) -> f64),
    Quinary(fn(f64, f64, f64, f64, f64) -> f64),
    /// Runtime registered function taking its arguments as a slice.
    Dynamic { arity: usize, function: DynFunction },
    /// Needs the data columns of a multivariate evaluation.
    Column(ColumnFunction),
}

impl FunctionImpl {
    pub fn arity(&self) -> usize {
        match self {
            FunctionImpl::Nullary(_) => 0,
            FunctionImpl::Unary(_) => 1,
            FunctionImpl::Binary(_) => 2,
            FunctionImpl::Ternary(_) => 3,
            FunctionImpl::Quaternary(_) => 4,
            FunctionImpl::Quinary(_) => 5,
            FunctionImpl::Dynamic { arity, .. } => *arity,
            FunctionImpl::Column(column) => column.arity(),
        }
    }

    /// Calls a scalar implementation. `args.len()` must equal the arity;
    /// column functions are dispatched by the evaluator and yield NaN here.
    pub fn call(&self, args: &[f64]) -> f64 {
        match (self, args) {
            (FunctionImpl::Nullary(f), []) => f(),
            (FunctionImpl::Unary(f), [a]) => f(*a),
            (FunctionImpl::Binary(f), [a, b]) => f(*a, *b),
            (FunctionImpl::Ternary(f), [a, b, c]) => f(*a, *b, *c),
            (FunctionImpl::Quaternary(f), [a, b, c, d]) => f(*a, *b, *c, *d),
            (FunctionImpl::Quinary(f), [a, b, c, d, e]) => f(*a, *b, *c, *d, *e),
            (FunctionImpl::Dynamic { function, .. }, args) => function(args),
            _ => f64::NAN,
        }
    }
}

impl fmt::Debug for FunctionImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionImpl::Dynamic { arity, .. } => write!(f, "Dynamic({})", arity),
            FunctionImpl::Column(column) => write!(f, "Column({:?})", column),
            other => write!(f, "Native({})", other.arity()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Function {
    pub symbol: String,
    pub description: String,
    pub group: FunctionGroup,
    pub implementation: FunctionImpl,
    pub parameter_names: Option<&'static [&'static str]>,
}

impl Function {
    pub fn new(
        symbol: &str,
        description: &str,
        group: FunctionGroup,
        implementation: FunctionImpl,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            description: description.to_string(),
            group,
            implementation,
            parameter_names: None,
        }
    }

    pub fn nullary(symbol: &str, description: &str, group: FunctionGroup, f: fn() -> f64) -> Self {
        Self::new(symbol, description, group, FunctionImpl::Nullary(f))
    }

    pub fn unary(symbol: &str, description: &str, group: FunctionGroup, f: fn(f64) -> f64) -> Self {
        Self::new(symbol, description, group, FunctionImpl::Unary(f))
    }

    pub fn binary(
        symbol: &str,
        description: &str,
        group: FunctionGroup,
        f: fn(f64, f64) -> f64,
    ) -> Self {
        Self::new(symbol, description, group, FunctionImpl::Binary(f))
    }

    pub fn ternary(
        symbol: &str,
        description: &str,
        group: FunctionGroup,
        f: fn(f64, f64, f64) -> f64,
    ) -> Self {
        Self::new(symbol, description, group, FunctionImpl::Ternary(f))
    }

    pub fn quaternary(
        symbol: &str,
        description: &str,
        group: FunctionGroup,
        f: fn(f64, f64, f64, f64) -> f64,
    ) -> Self {
        Self::new(symbol, description, group, FunctionImpl::Quaternary(f))
    }

    pub fn quinary(
        symbol: &str,
        description: &str,
        group: FunctionGroup,
        f: fn(f64, f64, f64, f64, f64) -> f64,
    ) -> Self {
        Self::new(symbol, description, group, FunctionImpl::Quinary(f))
    }

    /// A function backed by a closure, for runtime registration.
    pub fn dynamic<F>(symbol: &str, description: &str, arity: usize, function: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self::new(
            symbol,
            description,
            FunctionGroup::StandardMathematicalFunctions,
            FunctionImpl::Dynamic {
                arity,
                function: Arc::new(function),
            },
        )
    }

    pub fn with_parameters(mut self, names: &'static [&'static str]) -> Self {
        self.parameter_names = Some(names);
        self
    }

    pub fn arity(&self) -> usize {
        self.implementation.arity()
    }

    /// Parameter list like `(x; min; max)` when the function names its parameters.
    pub fn parameters(&self) -> Option<String> {
        self.parameter_names
            .map(|names| format!("({})", names.join("; ")))
    }
}

#[inline]
pub(crate) fn to_bool(value: f64) -> bool {
    value != 0.0
}
