//! Probability densities, cumulative distributions and their inverses.
//!
//! Argument order follows the usual `pdf(x; parameters...)` convention:
//! `gaussian(x; sigma)`, `gammapdf(x; a; b)`, `binomial(k; p; n)`. Densities
//! and tails of the standard families come from `statrs`; parameters it
//! rejects evaluate to NaN. Discrete densities round k to the nearest count,
//! the cumulative functions take the floor.

use super::gamma::{gamma, gamma_p, gamma_q};
use super::quadrature::exp_sinh;
use super::{Function, FunctionGroup};
use crate::symbols::SymbolTable;
use num_complex::Complex64;
use statrs::distribution::{
    Bernoulli, Beta, Binomial, Cauchy, ChiSquared, Continuous, ContinuousCDF, Discrete,
    DiscreteCDF, Exp, FisherSnedecor, Gamma, Geometric, Hypergeometric, Laplace, LogNormal,
    NegativeBinomial, Normal, Pareto, Poisson, StudentsT, Uniform, Weibull,
};
use std::f64::consts::PI;

type Unary = fn(f64) -> f64;
type Binary = fn(f64, f64) -> f64;
type Ternary = fn(f64, f64, f64) -> f64;
type Quaternary = fn(f64, f64, f64, f64) -> f64;

/// Newton steps of the numerical quantile functions.
const INVERSE_STEPS: usize = 200;
/// The Landau density switches from the saddle point contour to the real
/// Laplace integral at this argument.
const LANDAU_CONTOUR_LIMIT: f64 = 2.0;

pub fn register(table: &mut SymbolTable) {
    use FunctionGroup::*;
    let unary = |symbol: &str, description: &str, group: FunctionGroup, f: Unary| {
        Function::unary(symbol, description, group, f)
    };
    let binary = |symbol: &str, description: &str, group: FunctionGroup, f: Binary| {
        Function::binary(symbol, description, group, f)
    };
    let ternary = |symbol: &str, description: &str, group: FunctionGroup, f: Ternary| {
        Function::ternary(symbol, description, group, f)
    };
    let quaternary = |symbol: &str, description: &str, group: FunctionGroup, f: Quaternary| {
        Function::quaternary(symbol, description, group, f)
    };
    const P: &str = "Cumulative distribution function P";
    const Q: &str = "Cumulative distribution function Q";
    const P_INV: &str = "Inverse cumulative distribution function P";
    const Q_INV: &str = "Inverse cumulative distribution function Q";

    let entries = [
        binary(
            "gaussian",
            "Probability density for a Gaussian distribution",
            GaussianDistribution,
            gaussian,
        ),
        unary(
            "ugaussian",
            "Probability density for a unit Gaussian distribution",
            GaussianDistribution,
            ugaussian,
        ),
        binary("gaussianP", P, GaussianDistribution, gaussian_p),
        binary("gaussianQ", Q, GaussianDistribution, gaussian_q),
        binary("gaussianPinv", P_INV, GaussianDistribution, gaussian_p_inv),
        binary("gaussianQinv", Q_INV, GaussianDistribution, gaussian_q_inv),
        unary(
            "ugaussianP",
            "Cumulative unit distribution function P",
            GaussianDistribution,
            ugaussian_p,
        ),
        unary(
            "ugaussianQ",
            "Cumulative unit distribution function Q",
            GaussianDistribution,
            ugaussian_q,
        ),
        unary(
            "ugaussianPinv",
            "Inverse cumulative unit distribution function P",
            GaussianDistribution,
            ugaussian_p_inv,
        ),
        unary(
            "ugaussianQinv",
            "Inverse cumulative unit distribution function Q",
            GaussianDistribution,
            ugaussian_q_inv,
        ),
        ternary(
            "gaussiantail",
            "Probability density for Gaussian tail distribution",
            GaussianDistribution,
            gaussian_tail,
        ),
        binary(
            "ugaussiantail",
            "Probability density for unit Gaussian tail distribution",
            GaussianDistribution,
            ugaussian_tail,
        ),
        Function::quinary(
            "gaussianbi",
            "Probability density for a bivariate Gaussian distribution",
            GaussianDistribution,
            gaussian_bivariate,
        )
        .with_parameters(&["x", "y", "sigma_x", "sigma_y", "rho"]),
        binary(
            "exponential",
            "Probability density for an exponential distribution",
            ExponentialDistribution,
            exponential,
        ),
        binary("exponentialP", P, ExponentialDistribution, exponential_p),
        binary("exponentialQ", Q, ExponentialDistribution, exponential_q),
        binary("exponentialPinv", P_INV, ExponentialDistribution, exponential_p_inv),
        binary("exponentialQinv", Q_INV, ExponentialDistribution, exponential_q_inv),
        binary(
            "laplace",
            "Probability density for a Laplace distribution",
            LaplaceDistribution,
            laplace,
        ),
        binary("laplaceP", P, LaplaceDistribution, laplace_p),
        binary("laplaceQ", Q, LaplaceDistribution, laplace_q),
        binary("laplacePinv", P_INV, LaplaceDistribution, laplace_p_inv),
        binary("laplaceQinv", Q_INV, LaplaceDistribution, laplace_q_inv),
        ternary(
            "exppow",
            "Probability density for an exponential power distribution",
            ExponentialPowerDistribution,
            exppow,
        ),
        ternary("exppowP", P, ExponentialPowerDistribution, exppow_p),
        ternary("exppowQ", Q, ExponentialPowerDistribution, exppow_q),
        binary(
            "cauchy",
            "Probability density for a Cauchy distribution",
            CauchyDistribution,
            cauchy,
        ),
        binary("cauchyP", P, CauchyDistribution, cauchy_p),
        binary("cauchyQ", Q, CauchyDistribution, cauchy_q),
        binary("cauchyPinv", P_INV, CauchyDistribution, cauchy_p_inv),
        binary("cauchyQinv", Q_INV, CauchyDistribution, cauchy_q_inv),
        binary(
            "rayleigh",
            "Probability density for a Rayleigh distribution",
            RayleighDistribution,
            rayleigh,
        ),
        binary("rayleighP", P, RayleighDistribution, rayleigh_p),
        binary("rayleighQ", Q, RayleighDistribution, rayleigh_q),
        binary("rayleighPinv", P_INV, RayleighDistribution, rayleigh_p_inv),
        binary("rayleighQinv", Q_INV, RayleighDistribution, rayleigh_q_inv),
        ternary(
            "rayleigh_tail",
            "Probability density for a Rayleigh tail distribution",
            RayleighDistribution,
            rayleigh_tail,
        ),
        unary(
            "landau",
            "Probability density for a Landau distribution",
            LandauDistribution,
            landau,
        ),
        ternary(
            "gammapdf",
            "Probability density for a gamma distribution",
            GammaDistribution,
            gamma_pdf,
        ),
        ternary("gammaP", P, GammaDistribution, gamma_dist_p),
        ternary("gammaQ", Q, GammaDistribution, gamma_dist_q),
        ternary("gammaPinv", P_INV, GammaDistribution, gamma_dist_p_inv),
        ternary("gammaQinv", Q_INV, GammaDistribution, gamma_dist_q_inv),
        ternary(
            "flat",
            "Probability density for a uniform distribution",
            FlatUniformDistribution,
            flat,
        ),
        ternary("flatP", P, FlatUniformDistribution, flat_p),
        ternary("flatQ", Q, FlatUniformDistribution, flat_q),
        ternary("flatPinv", P_INV, FlatUniformDistribution, flat_p_inv),
        ternary("flatQinv", Q_INV, FlatUniformDistribution, flat_q_inv),
        ternary(
            "lognormal",
            "Probability density for a lognormal distribution",
            LognormalDistribution,
            lognormal,
        ),
        ternary("lognormalP", P, LognormalDistribution, lognormal_p),
        ternary("lognormalQ", Q, LognormalDistribution, lognormal_q),
        ternary("lognormalPinv", P_INV, LognormalDistribution, lognormal_p_inv),
        ternary("lognormalQinv", Q_INV, LognormalDistribution, lognormal_q_inv),
        binary(
            "chisq",
            "Probability density for a chi squared distribution",
            ChisquaredDistribution,
            chisq,
        ),
        binary("chisqP", P, ChisquaredDistribution, chisq_p),
        binary("chisqQ", Q, ChisquaredDistribution, chisq_q),
        binary("chisqPinv", P_INV, ChisquaredDistribution, chisq_p_inv),
        binary("chisqQinv", Q_INV, ChisquaredDistribution, chisq_q_inv),
        ternary("fdist", "Probability density for a F-distribution", FDistribution, fdist),
        ternary("fdistP", P, FDistribution, fdist_p),
        ternary("fdistQ", Q, FDistribution, fdist_q),
        ternary("fdistPinv", P_INV, FDistribution, fdist_p_inv),
        ternary("fdistQinv", Q_INV, FDistribution, fdist_q_inv),
        binary("tdist", "Probability density for a t-distribution", TDistribution, tdist),
        binary("tdistP", P, TDistribution, tdist_p),
        binary("tdistQ", Q, TDistribution, tdist_q),
        binary("tdistPinv", P_INV, TDistribution, tdist_p_inv),
        binary("tdistQinv", Q_INV, TDistribution, tdist_q_inv),
        ternary(
            "betapdf",
            "Probability density for a beta distribution",
            BetaDistribution,
            beta_pdf,
        ),
        ternary("betaP", P, BetaDistribution, beta_p),
        ternary("betaQ", Q, BetaDistribution, beta_q),
        ternary("betaPinv", P_INV, BetaDistribution, beta_p_inv),
        ternary("betaQinv", Q_INV, BetaDistribution, beta_q_inv),
        binary(
            "logistic",
            "Probability density for a logistic distribution",
            LogisticDistribution,
            logistic,
        ),
        binary("logisticP", P, LogisticDistribution, logistic_p),
        binary("logisticQ", Q, LogisticDistribution, logistic_q),
        binary("logisticPinv", P_INV, LogisticDistribution, logistic_p_inv),
        binary("logisticQinv", Q_INV, LogisticDistribution, logistic_q_inv),
        ternary(
            "pareto",
            "Probability density for a Pareto distribution",
            ParetoDistribution,
            pareto,
        ),
        ternary("paretoP", P, ParetoDistribution, pareto_p),
        ternary("paretoQ", Q, ParetoDistribution, pareto_q),
        ternary("paretoPinv", P_INV, ParetoDistribution, pareto_p_inv),
        ternary("paretoQinv", Q_INV, ParetoDistribution, pareto_q_inv),
        ternary(
            "weibull",
            "Probability density for a Weibull distribution",
            WeibullDistribution,
            weibull,
        ),
        ternary("weibullP", P, WeibullDistribution, weibull_p),
        ternary("weibullQ", Q, WeibullDistribution, weibull_q),
        ternary("weibullPinv", P_INV, WeibullDistribution, weibull_p_inv),
        ternary("weibullQinv", Q_INV, WeibullDistribution, weibull_q_inv),
        ternary(
            "gumbel1",
            "Probability density for a Type-1 Gumbel distribution",
            GumbelDistribution,
            gumbel1,
        ),
        ternary("gumbel1P", P, GumbelDistribution, gumbel1_p),
        ternary("gumbel1Q", Q, GumbelDistribution, gumbel1_q),
        ternary("gumbel1Pinv", P_INV, GumbelDistribution, gumbel1_p_inv),
        ternary("gumbel1Qinv", Q_INV, GumbelDistribution, gumbel1_q_inv),
        ternary(
            "gumbel2",
            "Probability density for a Type-2 Gumbel distribution",
            GumbelDistribution,
            gumbel2,
        ),
        ternary("gumbel2P", P, GumbelDistribution, gumbel2_p),
        ternary("gumbel2Q", Q, GumbelDistribution, gumbel2_q),
        ternary("gumbel2Pinv", P_INV, GumbelDistribution, gumbel2_p_inv),
        ternary("gumbel2Qinv", Q_INV, GumbelDistribution, gumbel2_q_inv),
        binary(
            "poisson",
            "Probability density for a Poisson distribution",
            PoissonDistribution,
            poisson,
        ),
        binary("poissonP", P, PoissonDistribution, poisson_p),
        binary("poissonQ", Q, PoissonDistribution, poisson_q),
        binary(
            "bernoulli",
            "Probability density for a Bernoulli distribution",
            BernoulliDistribution,
            bernoulli,
        ),
        ternary(
            "binomial",
            "Probability density for a binomial distribution",
            BinomialDistribution,
            binomial,
        ),
        ternary("binomialP", P, BinomialDistribution, binomial_p),
        ternary("binomialQ", Q, BinomialDistribution, binomial_q),
        ternary(
            "negative_binomial",
            "Probability density for a negative binomial distribution",
            BinomialDistribution,
            negative_binomial,
        ),
        ternary("negative_binomialP", P, BinomialDistribution, negative_binomial_p),
        ternary("negative_binomialQ", Q, BinomialDistribution, negative_binomial_q),
        ternary(
            "pascal",
            "Probability density for a Pascal distribution",
            PascalDistribution,
            pascal,
        ),
        ternary("pascalP", P, PascalDistribution, pascal_p),
        ternary("pascalQ", Q, PascalDistribution, pascal_q),
        binary(
            "geometric",
            "Probability density for a geometric distribution",
            GeometricDistribution,
            geometric,
        ),
        binary("geometricP", P, GeometricDistribution, geometric_p),
        binary("geometricQ", Q, GeometricDistribution, geometric_q),
        quaternary(
            "hypergeometric",
            "Probability density for a hypergeometric distribution",
            HypergeometricDistribution,
            hypergeometric,
        ),
        quaternary("hypergeometricP", P, HypergeometricDistribution, hypergeometric_p),
        quaternary("hypergeometricQ", Q, HypergeometricDistribution, hypergeometric_q),
        binary(
            "logarithmic",
            "Probability density for a logarithmic distribution",
            LogarithmicDistribution,
            logarithmic,
        ),
    ];
    for entry in entries {
        table.add_function(entry);
    }
}

/// Applies `f` to a distribution, or NaN when its parameters were rejected.
fn with<D, E>(distribution: Result<D, E>, f: impl FnOnce(&D) -> f64) -> f64 {
    distribution.as_ref().map_or(f64::NAN, f)
}

/// Rounds a count to the nearest integer; negative counts carry no mass.
fn count(k: f64) -> Option<u64> {
    let k = k.round();
    (k >= 0.0 && k.is_finite()).then_some(k as u64)
}

/// Floor of the argument of a discrete cumulative function, None below zero.
fn floor_count(k: f64) -> Option<u64> {
    let k = k.floor();
    (k >= 0.0).then_some(k as u64)
}

/// Parameter n of the binomial, Pascal and hypergeometric families.
fn trials(n: f64) -> Result<u64, ()> {
    count(n).ok_or(())
}

fn bisection_point(lo: f64, hi: f64) -> f64 {
    match (lo.is_finite(), hi.is_finite()) {
        (true, true) => 0.5 * (lo + hi),
        (true, false) if lo > 0.0 => 2.0 * lo,
        (true, false) => lo + 1.0,
        (false, true) if hi < 0.0 => 2.0 * hi,
        (false, true) => hi - 1.0,
        (false, false) => 0.0,
    }
}

/// Quantile of a continuous distribution with the given support. Solves
/// ln T(x) = ln p by Newton steps on the smaller tail T, falling back to
/// bisection whenever a step leaves the bracket.
fn invert<D>(distribution: &D, p: f64, upper: bool, support: (f64, f64), start: f64) -> f64
where
    D: Continuous<f64, f64> + ContinuousCDF<f64, f64>,
{
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    let (mut lo, mut hi) = support;
    let (p, upper) = if p > 0.5 { (1.0 - p, !upper) } else { (p, upper) };
    if p == 0.0 {
        return if upper { hi } else { lo };
    }
    let tail = |x: f64| {
        if upper {
            distribution.sf(x)
        } else {
            distribution.cdf(x)
        }
    };
    let ln_p = p.ln();
    let mut x = if start > lo && start < hi { start } else { bisection_point(lo, hi) };
    for _ in 0..INVERSE_STEPS {
        let t = tail(x);
        if t == p {
            return x;
        }
        if (t > p) != upper {
            hi = x;
        } else {
            lo = x;
        }
        let density = distribution.pdf(x);
        let mut next = f64::NAN;
        if t > 0.0 && density > 0.0 {
            let slope = if upper { -density } else { density };
            next = x - (t.ln() - ln_p) * t / slope;
        }
        if !(next > lo && next < hi) {
            next = bisection_point(lo, hi);
        }
        if (next - x).abs() <= 4.0 * f64::EPSILON * next.abs() {
            return next;
        }
        x = next;
    }
    x
}

pub fn ugaussian(x: f64) -> f64 {
    with(Normal::new(0.0, 1.0), |n| n.pdf(x))
}

pub fn ugaussian_p(x: f64) -> f64 {
    with(Normal::new(0.0, 1.0), |n| n.cdf(x))
}

pub fn ugaussian_q(x: f64) -> f64 {
    with(Normal::new(0.0, 1.0), |n| n.sf(x))
}

pub fn ugaussian_p_inv(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }
    if p > 0.5 {
        return -ugaussian_p_inv(1.0 - p);
    }
    with(Normal::new(0.0, 1.0), |n| n.inverse_cdf(p))
}

pub fn ugaussian_q_inv(q: f64) -> f64 {
    -ugaussian_p_inv(q)
}

pub fn gaussian(x: f64, sigma: f64) -> f64 {
    with(Normal::new(0.0, sigma), |n| n.pdf(x))
}

pub fn gaussian_p(x: f64, sigma: f64) -> f64 {
    with(Normal::new(0.0, sigma), |n| n.cdf(x))
}

pub fn gaussian_q(x: f64, sigma: f64) -> f64 {
    with(Normal::new(0.0, sigma), |n| n.sf(x))
}

pub fn gaussian_p_inv(p: f64, sigma: f64) -> f64 {
    sigma * ugaussian_p_inv(p)
}

pub fn gaussian_q_inv(q: f64, sigma: f64) -> f64 {
    sigma * ugaussian_q_inv(q)
}

/// Gaussian density restricted to x >= a and renormalized.
pub fn gaussian_tail(x: f64, a: f64, sigma: f64) -> f64 {
    if x < a {
        return 0.0;
    }
    gaussian(x, sigma) / gaussian_q(a, sigma)
}

pub fn ugaussian_tail(x: f64, a: f64) -> f64 {
    gaussian_tail(x, a, 1.0)
}

/// Bivariate normal density with zero means and correlation rho.
pub fn gaussian_bivariate(x: f64, y: f64, sigma_x: f64, sigma_y: f64, rho: f64) -> f64 {
    if !(sigma_x > 0.0 && sigma_y > 0.0 && rho.abs() < 1.0) {
        return f64::NAN;
    }
    let (u, v) = (x / sigma_x, y / sigma_y);
    let c = 1.0 - rho * rho;
    let exponent = -(u * u - 2.0 * rho * u * v + v * v) / (2.0 * c);
    exponent.exp() / (2.0 * PI * sigma_x * sigma_y * c.sqrt())
}

/// Exponential density with mean mu.
pub fn exponential(x: f64, mu: f64) -> f64 {
    with(Exp::new(1.0 / mu), |e| e.pdf(x))
}

pub fn exponential_p(x: f64, mu: f64) -> f64 {
    with(Exp::new(1.0 / mu), |e| e.cdf(x))
}

pub fn exponential_q(x: f64, mu: f64) -> f64 {
    with(Exp::new(1.0 / mu), |e| e.sf(x))
}

pub fn exponential_p_inv(p: f64, mu: f64) -> f64 {
    -mu * (-p).ln_1p()
}

pub fn exponential_q_inv(q: f64, mu: f64) -> f64 {
    -mu * q.ln()
}

pub fn laplace(x: f64, a: f64) -> f64 {
    with(Laplace::new(0.0, a), |l| l.pdf(x))
}

pub fn laplace_p(x: f64, a: f64) -> f64 {
    with(Laplace::new(0.0, a), |l| l.cdf(x))
}

pub fn laplace_q(x: f64, a: f64) -> f64 {
    with(Laplace::new(0.0, a), |l| l.sf(x))
}

pub fn laplace_p_inv(p: f64, a: f64) -> f64 {
    if p < 0.5 {
        a * (2.0 * p).ln()
    } else {
        -a * (2.0 * (1.0 - p)).ln()
    }
}

pub fn laplace_q_inv(q: f64, a: f64) -> f64 {
    -laplace_p_inv(q, a)
}

/// Exponential power density exp(-|x/a|^b) / (2a Gamma(1 + 1/b)).
pub fn exppow(x: f64, a: f64, b: f64) -> f64 {
    if !(a > 0.0 && b > 0.0) {
        return f64::NAN;
    }
    (-(x / a).abs().powf(b)).exp() / (2.0 * a * gamma(1.0 + 1.0 / b))
}

pub fn exppow_p(x: f64, a: f64, b: f64) -> f64 {
    if !(a > 0.0 && b > 0.0) {
        return f64::NAN;
    }
    let u = (x / a).abs().powf(b);
    if x < 0.0 {
        0.5 * gamma_q(1.0 / b, u)
    } else {
        0.5 + 0.5 * gamma_p(1.0 / b, u)
    }
}

pub fn exppow_q(x: f64, a: f64, b: f64) -> f64 {
    exppow_p(-x, a, b)
}

pub fn cauchy(x: f64, a: f64) -> f64 {
    with(Cauchy::new(0.0, a), |c| c.pdf(x))
}

pub fn cauchy_p(x: f64, a: f64) -> f64 {
    with(Cauchy::new(0.0, a), |c| c.cdf(x))
}

pub fn cauchy_q(x: f64, a: f64) -> f64 {
    with(Cauchy::new(0.0, a), |c| c.sf(x))
}

pub fn cauchy_p_inv(p: f64, a: f64) -> f64 {
    if p == 0.5 {
        return 0.0;
    }
    a * (PI * (p - 0.5)).tan()
}

pub fn cauchy_q_inv(q: f64, a: f64) -> f64 {
    -cauchy_p_inv(q, a)
}

pub fn rayleigh(x: f64, sigma: f64) -> f64 {
    if x < 0.0 {
        return 0.0;
    }
    let u = x / sigma;
    u / sigma * (-0.5 * u * u).exp()
}

pub fn rayleigh_p(x: f64, sigma: f64) -> f64 {
    if x < 0.0 {
        return 0.0;
    }
    let u = x / sigma;
    -(-0.5 * u * u).exp_m1()
}

pub fn rayleigh_q(x: f64, sigma: f64) -> f64 {
    if x < 0.0 {
        return 1.0;
    }
    let u = x / sigma;
    (-0.5 * u * u).exp()
}

pub fn rayleigh_p_inv(p: f64, sigma: f64) -> f64 {
    sigma * (-2.0 * (-p).ln_1p()).sqrt()
}

pub fn rayleigh_q_inv(q: f64, sigma: f64) -> f64 {
    sigma * (-2.0 * q.ln()).sqrt()
}

pub fn rayleigh_tail(x: f64, a: f64, sigma: f64) -> f64 {
    if x < a {
        return 0.0;
    }
    let u = x / sigma;
    let v = a / sigma;
    u / sigma * ((v + u) * (v - u) / 2.0).exp()
}

/// Landau density, the inverse Laplace transform of s^s.
///
/// For small arguments the Bromwich integral runs up the vertical line
/// through the saddle point s0 = exp(-x-1), where it does not oscillate.
/// Larger arguments use the real integral of exp(-t ln t - xt) sin(pi t).
pub fn landau(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x == f64::INFINITY {
        return 0.0;
    }
    if x >= LANDAU_CONTOUR_LIMIT {
        let integrand = |t: f64| {
            if t == 0.0 {
                return 0.0;
            }
            (-t * t.ln() - x * t).exp() * (PI * t).sin()
        };
        return exp_sinh(integrand, 0.0) / PI;
    }
    let saddle = (-x - 1.0).exp();
    if saddle > 745.0 {
        return 0.0;
    }
    let integrand = |y: f64| {
        let s = Complex64::new(saddle, y);
        (s * s.ln() + x * s).exp().re
    };
    exp_sinh(integrand, 0.0) / PI
}

/// Gamma density with shape a and scale b.
pub fn gamma_pdf(x: f64, a: f64, b: f64) -> f64 {
    if x == 0.0 && a == 1.0 && b > 0.0 {
        return 1.0 / b;
    }
    with(Gamma::new(a, 1.0 / b), |g| g.pdf(x))
}

pub fn gamma_dist_p(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    with(Gamma::new(a, 1.0 / b), |g| g.cdf(x))
}

pub fn gamma_dist_q(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    with(Gamma::new(a, 1.0 / b), |g| g.sf(x))
}

pub fn gamma_dist_p_inv(p: f64, a: f64, b: f64) -> f64 {
    with(Gamma::new(a, 1.0 / b), |g| invert(g, p, false, (0.0, f64::INFINITY), a * b))
}

pub fn gamma_dist_q_inv(q: f64, a: f64, b: f64) -> f64 {
    with(Gamma::new(a, 1.0 / b), |g| invert(g, q, true, (0.0, f64::INFINITY), a * b))
}

pub fn flat(x: f64, a: f64, b: f64) -> f64 {
    if x >= b {
        return 0.0;
    }
    with(Uniform::new(a, b), |u| u.pdf(x))
}

pub fn flat_p(x: f64, a: f64, b: f64) -> f64 {
    with(Uniform::new(a, b), |u| u.cdf(x))
}

pub fn flat_q(x: f64, a: f64, b: f64) -> f64 {
    with(Uniform::new(a, b), |u| u.sf(x))
}

pub fn flat_p_inv(p: f64, a: f64, b: f64) -> f64 {
    p * b + (1.0 - p) * a
}

pub fn flat_q_inv(q: f64, a: f64, b: f64) -> f64 {
    q * a + (1.0 - q) * b
}

pub fn lognormal(x: f64, zeta: f64, sigma: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    with(LogNormal::new(zeta, sigma), |l| l.pdf(x))
}

pub fn lognormal_p(x: f64, zeta: f64, sigma: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    with(LogNormal::new(zeta, sigma), |l| l.cdf(x))
}

pub fn lognormal_q(x: f64, zeta: f64, sigma: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    with(LogNormal::new(zeta, sigma), |l| l.sf(x))
}

pub fn lognormal_p_inv(p: f64, zeta: f64, sigma: f64) -> f64 {
    (zeta + sigma * ugaussian_p_inv(p)).exp()
}

pub fn lognormal_q_inv(q: f64, zeta: f64, sigma: f64) -> f64 {
    (zeta + sigma * ugaussian_q_inv(q)).exp()
}

pub fn chisq(x: f64, nu: f64) -> f64 {
    gamma_pdf(x, nu / 2.0, 2.0)
}

pub fn chisq_p(x: f64, nu: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    with(ChiSquared::new(nu), |c| c.cdf(x))
}

pub fn chisq_q(x: f64, nu: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    with(ChiSquared::new(nu), |c| c.sf(x))
}

pub fn chisq_p_inv(p: f64, nu: f64) -> f64 {
    with(ChiSquared::new(nu), |c| invert(c, p, false, (0.0, f64::INFINITY), nu))
}

pub fn chisq_q_inv(q: f64, nu: f64) -> f64 {
    with(ChiSquared::new(nu), |c| invert(c, q, true, (0.0, f64::INFINITY), nu))
}

pub fn fdist(x: f64, nu1: f64, nu2: f64) -> f64 {
    if x < 0.0 {
        return 0.0;
    }
    with(FisherSnedecor::new(nu1, nu2), |f| f.pdf(x))
}

pub fn fdist_p(x: f64, nu1: f64, nu2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    with(FisherSnedecor::new(nu1, nu2), |f| f.cdf(x))
}

pub fn fdist_q(x: f64, nu1: f64, nu2: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    with(FisherSnedecor::new(nu1, nu2), |f| f.sf(x))
}

pub fn fdist_p_inv(p: f64, nu1: f64, nu2: f64) -> f64 {
    with(FisherSnedecor::new(nu1, nu2), |f| {
        invert(f, p, false, (0.0, f64::INFINITY), 1.0)
    })
}

pub fn fdist_q_inv(q: f64, nu1: f64, nu2: f64) -> f64 {
    with(FisherSnedecor::new(nu1, nu2), |f| {
        invert(f, q, true, (0.0, f64::INFINITY), 1.0)
    })
}

pub fn tdist(x: f64, nu: f64) -> f64 {
    with(StudentsT::new(0.0, 1.0, nu), |t| t.pdf(x))
}

pub fn tdist_p(x: f64, nu: f64) -> f64 {
    with(StudentsT::new(0.0, 1.0, nu), |t| t.cdf(x))
}

pub fn tdist_q(x: f64, nu: f64) -> f64 {
    with(StudentsT::new(0.0, 1.0, nu), |t| t.sf(x))
}

pub fn tdist_p_inv(p: f64, nu: f64) -> f64 {
    let support = (f64::NEG_INFINITY, f64::INFINITY);
    with(StudentsT::new(0.0, 1.0, nu), |t| invert(t, p, false, support, 0.0))
}

pub fn tdist_q_inv(q: f64, nu: f64) -> f64 {
    let support = (f64::NEG_INFINITY, f64::INFINITY);
    with(StudentsT::new(0.0, 1.0, nu), |t| invert(t, q, true, support, 0.0))
}

pub fn beta_pdf(x: f64, a: f64, b: f64) -> f64 {
    if !(0.0..=1.0).contains(&x) {
        return 0.0;
    }
    with(Beta::new(a, b), |d| d.pdf(x))
}

pub fn beta_p(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else if x >= 1.0 {
        1.0
    } else {
        with(Beta::new(a, b), |d| d.cdf(x))
    }
}

pub fn beta_q(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        1.0
    } else if x >= 1.0 {
        0.0
    } else {
        with(Beta::new(a, b), |d| d.sf(x))
    }
}

pub fn beta_p_inv(p: f64, a: f64, b: f64) -> f64 {
    with(Beta::new(a, b), |d| invert(d, p, false, (0.0, 1.0), a / (a + b)))
}

pub fn beta_q_inv(q: f64, a: f64, b: f64) -> f64 {
    with(Beta::new(a, b), |d| invert(d, q, true, (0.0, 1.0), a / (a + b)))
}

pub fn logistic(x: f64, a: f64) -> f64 {
    let u = (-x.abs() / a).exp();
    u / (a.abs() * (1.0 + u) * (1.0 + u))
}

pub fn logistic_p(x: f64, a: f64) -> f64 {
    1.0 / (1.0 + (-x / a).exp())
}

pub fn logistic_q(x: f64, a: f64) -> f64 {
    logistic_p(-x, a)
}

pub fn logistic_p_inv(p: f64, a: f64) -> f64 {
    a * (p / (1.0 - p)).ln()
}

pub fn logistic_q_inv(q: f64, a: f64) -> f64 {
    a * ((1.0 - q) / q).ln()
}

/// Pareto density with exponent a and scale b.
pub fn pareto(x: f64, a: f64, b: f64) -> f64 {
    with(Pareto::new(b, a), |d| d.pdf(x))
}

pub fn pareto_p(x: f64, a: f64, b: f64) -> f64 {
    with(Pareto::new(b, a), |d| d.cdf(x))
}

pub fn pareto_q(x: f64, a: f64, b: f64) -> f64 {
    with(Pareto::new(b, a), |d| d.sf(x))
}

pub fn pareto_p_inv(p: f64, a: f64, b: f64) -> f64 {
    b / (1.0 - p).powf(1.0 / a)
}

pub fn pareto_q_inv(q: f64, a: f64, b: f64) -> f64 {
    b / q.powf(1.0 / a)
}

/// Weibull density with scale `a` and exponent `b`.
pub fn weibull(x: f64, a: f64, b: f64) -> f64 {
    if x == 0.0 && b == 1.0 && a > 0.0 {
        return 1.0 / a;
    }
    with(Weibull::new(b, a), |w| w.pdf(x))
}

pub fn weibull_p(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    with(Weibull::new(b, a), |w| w.cdf(x))
}

pub fn weibull_q(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    with(Weibull::new(b, a), |w| w.sf(x))
}

pub fn weibull_p_inv(p: f64, a: f64, b: f64) -> f64 {
    a * (-(-p).ln_1p()).powf(1.0 / b)
}

pub fn weibull_q_inv(q: f64, a: f64, b: f64) -> f64 {
    a * (-q.ln()).powf(1.0 / b)
}

pub fn gumbel1(x: f64, a: f64, b: f64) -> f64 {
    a * b * (-(b * (-a * x).exp() + a * x)).exp()
}

pub fn gumbel1_p(x: f64, a: f64, b: f64) -> f64 {
    (-b * (-a * x).exp()).exp()
}

pub fn gumbel1_q(x: f64, a: f64, b: f64) -> f64 {
    -(-b * (-a * x).exp()).exp_m1()
}

pub fn gumbel1_p_inv(p: f64, a: f64, b: f64) -> f64 {
    (-b / p.ln()).ln() / a
}

pub fn gumbel1_q_inv(q: f64, a: f64, b: f64) -> f64 {
    (-b / (-q).ln_1p()).ln() / a
}

pub fn gumbel2(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    b * a * x.powf(-a - 1.0) * (-b * x.powf(-a)).exp()
}

pub fn gumbel2_p(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    (-b * x.powf(-a)).exp()
}

pub fn gumbel2_q(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    -(-b * x.powf(-a)).exp_m1()
}

pub fn gumbel2_p_inv(p: f64, a: f64, b: f64) -> f64 {
    (b / -p.ln()).powf(1.0 / a)
}

pub fn gumbel2_q_inv(q: f64, a: f64, b: f64) -> f64 {
    (b / -(-q).ln_1p()).powf(1.0 / a)
}

pub fn poisson(k: f64, mu: f64) -> f64 {
    let Some(k) = count(k) else {
        return 0.0;
    };
    if mu == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    with(Poisson::new(mu), |d| d.pmf(k))
}

pub fn poisson_p(k: f64, mu: f64) -> f64 {
    let Some(k) = floor_count(k) else {
        return 0.0;
    };
    if mu == 0.0 {
        return 1.0;
    }
    with(Poisson::new(mu), |d| d.cdf(k))
}

pub fn poisson_q(k: f64, mu: f64) -> f64 {
    let Some(k) = floor_count(k) else {
        return 1.0;
    };
    if mu == 0.0 {
        return 0.0;
    }
    with(Poisson::new(mu), |d| d.sf(k))
}

pub fn bernoulli(k: f64, p: f64) -> f64 {
    let Some(k) = count(k) else {
        return 0.0;
    };
    with(Bernoulli::new(p), |d| d.pmf(k))
}

pub fn binomial(k: f64, p: f64, n: f64) -> f64 {
    let Some(k) = count(k) else {
        return 0.0;
    };
    with(trials(n), |&n| with(Binomial::new(p, n), |d| d.pmf(k)))
}

pub fn binomial_p(k: f64, p: f64, n: f64) -> f64 {
    let Some(k) = floor_count(k) else {
        return 0.0;
    };
    with(trials(n), |&n| with(Binomial::new(p, n), |d| d.cdf(k)))
}

pub fn binomial_q(k: f64, p: f64, n: f64) -> f64 {
    let Some(k) = floor_count(k) else {
        return 1.0;
    };
    with(trials(n), |&n| with(Binomial::new(p, n), |d| d.sf(k)))
}

/// Probability of k failures before the n-th success; n may be fractional.
pub fn negative_binomial(k: f64, p: f64, n: f64) -> f64 {
    let Some(k) = count(k) else {
        return 0.0;
    };
    with(NegativeBinomial::new(n, p), |d| d.pmf(k))
}

pub fn negative_binomial_p(k: f64, p: f64, n: f64) -> f64 {
    let Some(k) = floor_count(k) else {
        return 0.0;
    };
    with(NegativeBinomial::new(n, p), |d| d.cdf(k))
}

pub fn negative_binomial_q(k: f64, p: f64, n: f64) -> f64 {
    let Some(k) = floor_count(k) else {
        return 1.0;
    };
    with(NegativeBinomial::new(n, p), |d| d.sf(k))
}

/// Negative binomial with an integer number of successes.
pub fn pascal(k: f64, p: f64, n: f64) -> f64 {
    with(trials(n), |&n| negative_binomial(k, p, n as f64))
}

pub fn pascal_p(k: f64, p: f64, n: f64) -> f64 {
    with(trials(n), |&n| negative_binomial_p(k, p, n as f64))
}

pub fn pascal_q(k: f64, p: f64, n: f64) -> f64 {
    with(trials(n), |&n| negative_binomial_q(k, p, n as f64))
}

pub fn geometric(k: f64, p: f64) -> f64 {
    let Some(k) = count(k) else {
        return 0.0;
    };
    if k == 0 {
        return 0.0;
    }
    with(Geometric::new(p), |d| d.pmf(k))
}

pub fn geometric_p(k: f64, p: f64) -> f64 {
    match floor_count(k) {
        Some(k) if k >= 1 => with(Geometric::new(p), |d| d.cdf(k)),
        _ => 0.0,
    }
}

pub fn geometric_q(k: f64, p: f64) -> f64 {
    match floor_count(k) {
        Some(k) if k >= 1 => with(Geometric::new(p), |d| d.sf(k)),
        _ => 1.0,
    }
}

/// Drawing t items without replacement from n1 marked and n2 unmarked ones;
/// probability that k of them are marked.
fn with_hypergeometric(n1: f64, n2: f64, t: f64, f: impl FnOnce(&Hypergeometric) -> f64) -> f64 {
    match (count(n1), count(n2), count(t)) {
        (Some(n1), Some(n2), Some(t)) => with(Hypergeometric::new(n1.saturating_add(n2), n1, t), f),
        _ => f64::NAN,
    }
}

pub fn hypergeometric(k: f64, n1: f64, n2: f64, t: f64) -> f64 {
    let Some(k) = count(k) else {
        return 0.0;
    };
    with_hypergeometric(n1, n2, t, |d| d.pmf(k))
}

pub fn hypergeometric_p(k: f64, n1: f64, n2: f64, t: f64) -> f64 {
    let Some(k) = floor_count(k) else {
        return 0.0;
    };
    with_hypergeometric(n1, n2, t, |d| d.cdf(k))
}

pub fn hypergeometric_q(k: f64, n1: f64, n2: f64, t: f64) -> f64 {
    let Some(k) = floor_count(k) else {
        return 1.0;
    };
    with_hypergeometric(n1, n2, t, |d| d.sf(k))
}

pub fn logarithmic(k: f64, p: f64) -> f64 {
    match count(k) {
        Some(k) if k >= 1 => {
            let k = k as f64;
            -p.powf(k) / (k * (-p).ln_1p())
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance * expected.abs().max(1.0),
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn assert_relative(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance * expected.abs(),
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_unit_gaussian() {
        assert_close(ugaussian(0.0), 0.398_942_280_401_432_7, 1e-15);
        assert_close(ugaussian_p(0.0), 0.5, 1e-15);
        assert_close(ugaussian_p(1.96), 0.975_002_104_851_780_1, 1e-13);
        assert_close(ugaussian_q(1.0), 0.158_655_253_931_457_05, 1e-13);
        assert_close(ugaussian_p_inv(0.975), 1.959_963_984_540_054, 1e-12);
        assert_close(ugaussian_p_inv(0.01), -2.326_347_874_040_841, 1e-12);
        assert_close(ugaussian_q_inv(0.025), 1.959_963_984_540_054, 1e-12);
        assert_eq!(ugaussian_p_inv(1.0), f64::INFINITY);
        assert!(ugaussian_p_inv(1.5).is_nan());
    }

    #[test]
    fn test_scaled_gaussian() {
        assert_close(gaussian(2.0, 2.0), ugaussian(1.0) / 2.0, 1e-15);
        assert_close(gaussian_p_inv(gaussian_p(0.7, 3.0), 3.0), 0.7, 1e-10);
        assert!(gaussian(1.0, 0.0).is_nan());
        assert_relative(
            gaussian_bivariate(0.3, -0.5, 1.2, 0.7, 0.4),
            0.135_027_571_780_781_5,
            1e-14,
        );
        assert_relative(
            gaussian_bivariate(0.3, -0.5, 1.2, 0.7, 0.0),
            gaussian(0.3, 1.2) * gaussian(-0.5, 0.7),
            1e-14,
        );
        assert!(gaussian_bivariate(0.0, 0.0, 1.0, 1.0, 1.0).is_nan());
    }

    #[test]
    fn test_closed_form_inverses() {
        assert_close(exponential_p_inv(exponential_p(1.3, 2.0), 2.0), 1.3, 1e-12);
        assert_close(laplace_p_inv(laplace_p(-0.4, 1.5), 1.5), -0.4, 1e-12);
        assert_close(cauchy_p_inv(cauchy_p(2.0, 0.5), 0.5), 2.0, 1e-12);
        assert_close(rayleigh_q_inv(rayleigh_q(0.8, 1.1), 1.1), 0.8, 1e-12);
        assert_close(logistic_p_inv(logistic_p(0.3, 2.0), 2.0), 0.3, 1e-12);
        assert_close(weibull_p_inv(weibull_p(1.5, 2.0, 3.0), 2.0, 3.0), 1.5, 1e-12);
        assert_close(gumbel1_p_inv(gumbel1_p(0.5, 1.0, 2.0), 1.0, 2.0), 0.5, 1e-12);
        assert_close(gumbel2_q_inv(gumbel2_q(1.7, 2.0, 1.0), 2.0, 1.0), 1.7, 1e-12);
        assert_close(pareto_q_inv(pareto_q(3.0, 2.0, 1.0), 2.0, 1.0), 3.0, 1e-12);
        assert_close(flat_p_inv(flat_p(2.5, 2.0, 4.0), 2.0, 4.0), 2.5, 1e-15);
        assert_close(lognormal_p_inv(lognormal_p(2.0, 0.1, 0.5), 0.1, 0.5), 2.0, 1e-10);
    }

    #[test]
    fn test_exponential_power() {
        assert_relative(exppow(0.8, 1.5, 2.5), 0.305_218_237_354_911_75, 1e-14);
        assert_relative(exppow_p(0.8, 1.5, 2.5), 0.783_741_507_828_406_9, 1e-13);
        assert_relative(exppow_q(0.8, 1.5, 2.5), 0.216_258_492_171_593_14, 1e-13);
        assert_relative(exppow_p(-0.8, 1.5, 2.5), exppow_q(0.8, 1.5, 2.5), 1e-15);
        // b = 2 is a Gaussian with sigma = a / sqrt(2)
        let sigma = 1.5 / 2f64.sqrt();
        assert_relative(exppow(0.8, 1.5, 2.0), gaussian(0.8, sigma), 1e-13);
    }

    #[test]
    fn test_landau_density() {
        assert_relative(landau(0.0), 0.178_854_160_675_249_44, 1e-13);
        assert_relative(landau(-1.0), 0.151_391_911_521_485_58, 1e-13);
        assert_relative(landau(-3.0), 0.000_673_728_613_908_064_4, 1e-12);
        assert_relative(landau(10.0), 0.011_976_487_388_788_529, 1e-13);
        assert_relative(landau(100.0), 0.000_107_611_224_007_837_93, 1e-12);
        assert_eq!(landau(-50.0), 0.0);
    }

    #[test]
    fn test_gamma_family() {
        assert_close(chisq_p(3.841_458_820_694_124, 1.0), 0.95, 1e-12);
        assert_close(chisq(2.0, 2.0), 0.5 * (-1.0f64).exp(), 1e-14);
        assert_close(gamma_pdf(0.0, 1.0, 2.0), 0.5, 1e-15);
        assert_close(gamma_dist_p(1.0, 1.0, 1.0), 1.0 - (-1.0f64).exp(), 1e-14);
    }

    #[test]
    fn test_numerical_quantiles() {
        assert_relative(gamma_dist_p_inv(0.3, 2.5, 1.5), 2.249_931_099_569_929_8, 1e-12);
        assert_relative(gamma_dist_p_inv(1e-10, 0.3, 1.0), 3.236_440_226_603_552e-34, 1e-10);
        let deep = gamma_dist_q_inv(1e-100, 2.5, 1.0);
        assert_relative(gamma_dist_q(deep, 2.5, 1.0), 1e-100, 1e-11);
        assert_relative(chisq_p_inv(0.95, 1.0), 3.841_458_820_694_124, 1e-12);
        assert_relative(chisq_q_inv(0.05, 4.0), 9.487_729_036_781_157, 1e-12);
        assert_relative(fdist_p_inv(0.5, 4.0, 4.0), 1.0, 1e-12);
        assert_relative(fdist_q_inv(0.05, 3.0, 7.0), 4.346_831_399_907_818, 1e-12);
        assert_relative(tdist_p_inv(0.95, 5.0), 2.015_048_372_669_157, 1e-12);
        assert_relative(tdist_q_inv(0.01, 3.0), 4.540_702_858_568_134, 1e-12);
        assert_close(tdist_p_inv(0.5, 3.0), 0.0, 1e-12);
        assert_relative(beta_p_inv(0.2, 2.0, 5.0), 0.139_880_688_269_957_84, 1e-12);
        assert_relative(beta_q_inv(0.8, 2.0, 5.0), 0.139_880_688_269_957_84, 1e-12);
        assert_eq!(gamma_dist_p_inv(0.0, 2.0, 1.0), 0.0);
        assert_eq!(gamma_dist_p_inv(1.0, 2.0, 1.0), f64::INFINITY);
        assert!(beta_p_inv(0.5, -1.0, 2.0).is_nan());
    }

    #[test]
    fn test_t_and_f() {
        assert_close(tdist_p(0.0, 5.0), 0.5, 1e-14);
        assert_close(tdist_p(2.015_048_372_669_157, 5.0), 0.95, 1e-10);
        // t with one degree of freedom is Cauchy
        assert_close(tdist(0.5, 1.0), cauchy(0.5, 1.0), 1e-13);
        assert_close(fdist_p(1.0, 4.0, 4.0), 0.5, 1e-12);
        assert_close(fdist_p(2.0, 3.0, 7.0) + fdist_q(2.0, 3.0, 7.0), 1.0, 1e-13);
    }

    #[test]
    fn test_beta_distribution() {
        assert_close(beta_pdf(0.5, 2.0, 2.0), 1.5, 1e-13);
        assert_close(beta_p(0.5, 2.0, 5.0) + beta_q(0.5, 2.0, 5.0), 1.0, 1e-13);
        assert_eq!(beta_pdf(1.5, 2.0, 2.0), 0.0);
    }

    #[test]
    fn test_discrete_distributions() {
        assert_close(poisson(2.0, 3.0), 4.5 * (-3.0f64).exp(), 1e-13);
        assert_close(poisson_p(0.0, 3.0), (-3.0f64).exp(), 1e-13);
        assert_close(poisson_p(4.0, 2.5) + poisson_q(4.0, 2.5), 1.0, 1e-13);
        assert_eq!(poisson(1.6, 3.0), poisson(2.0, 3.0));
        assert_eq!(poisson(-2.0, 3.0), 0.0);
        assert_close(binomial(2.0, 0.5, 4.0), 0.375, 1e-13);
        assert_close(binomial_p(2.0, 0.5, 4.0), 11.0 / 16.0, 1e-12);
        assert_close(binomial_q(2.0, 0.5, 4.0), 5.0 / 16.0, 1e-12);
        assert_eq!(binomial(2.4, 0.5, 3.6), binomial(2.0, 0.5, 4.0));
        assert_eq!(bernoulli(1.0, 0.3), 0.3);
        assert_close(geometric(3.0, 0.5), 0.125, 1e-15);
        assert_close(geometric_p(3.0, 0.5), 0.875, 1e-15);
        assert_close(logarithmic(1.0, 0.5), 0.5 / 2f64.ln(), 1e-14);
    }

    #[test]
    fn test_negative_binomial_and_pascal() {
        assert_relative(negative_binomial(3.0, 0.4, 2.5), 0.143_440_914_665_237_7, 1e-13);
        assert_relative(negative_binomial_p(3.0, 0.4, 2.5), 0.555_801_921_551_194_4, 1e-13);
        assert_relative(
            negative_binomial_q(3.0, 0.4, 2.5),
            1.0 - 0.555_801_921_551_194_4,
            1e-13,
        );
        assert_relative(pascal(3.0, 0.4, 2.0), 0.138_24, 1e-13);
        assert_eq!(pascal(3.0, 0.4, 2.3), pascal(3.0, 0.4, 2.0));
    }

    #[test]
    fn test_hypergeometric_distribution() {
        // two marked among four drawn from five marked and seven unmarked
        assert_relative(hypergeometric(2.0, 5.0, 7.0, 4.0), 14.0 / 33.0, 1e-14);
        assert_relative(hypergeometric_p(2.0, 5.0, 7.0, 4.0), 28.0 / 33.0, 1e-13);
        assert_relative(hypergeometric_q(2.0, 5.0, 7.0, 4.0), 5.0 / 33.0, 1e-13);
        assert!(hypergeometric(1.0, -5.0, 7.0, 4.0).is_nan());
    }
}
