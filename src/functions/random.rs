//! Random number generators. Every call draws from the thread local generator,
//! so expressions using them are not deterministic.

use super::{Function, FunctionGroup};
use crate::symbols::SymbolTable;
use rand::distr::{Bernoulli, Open01, Uniform};
use rand::Rng;
use rand_distr::{
    Binomial, Cauchy, ChiSquared, Distribution, Exp1, Gamma, LogNormal, Poisson, StandardNormal,
    StudentT,
};
use std::f64::consts::{FRAC_PI_2, PI};

/// Largest value returned by `rand()` and `random()`.
pub const RAND_MAX: u32 = 2_147_483_647;

/// Poisson means above this are drawn from the normal approximation.
const POISSON_NORMAL_LIMIT: f64 = 1e15;

const RANDOM: FunctionGroup = FunctionGroup::RandomNumberGenerator;

const UNARY: &[(&str, &str, fn(f64) -> f64)] = &[
    ("randgaussian", "Gaussian random numbers", gaussian),
    ("randexponential", "Exponential random numbers", exponential),
    ("randlaplace", "Laplacian random numbers", laplace),
    ("randcauchy", "Cauchy/Lorentz random numbers", cauchy),
    ("randrayleigh", "Rayleigh random numbers", rayleigh),
    ("randchisq", "Chi-squared random numbers", chisq),
    ("randtdist", "t-distributed random numbers", tdist),
    ("randlogistic", "Logistic random numbers", logistic),
    ("randpoisson", "Poisson random numbers", poisson),
    ("randbernoulli", "Bernoulli random numbers", bernoulli),
];

const BINARY: &[(&str, &str, fn(f64, f64) -> f64)] = &[
    ("randlevy", "Levy alpha-stable random numbers", levy),
    ("randgamma", "Gamma random numbers", gamma),
    ("randflat", "Uniform random numbers", flat),
    ("randlognormal", "Lognormal random numbers", lognormal),
    ("randbinomial", "Binomial random numbers", binomial),
];

/// `rand`, `random` and `drand` live with the standard functions.
pub fn register_standard(table: &mut SymbolTable) {
    let group = FunctionGroup::StandardMathematicalFunctions;
    table.add_function(Function::nullary("rand", "Random number in [0, RAND_MAX]", group, int));
    table.add_function(Function::nullary("random", "Random number in [0, RAND_MAX]", group, int));
    table.add_function(Function::nullary("drand", "Random number in [0, 1)", group, uniform));
}

pub fn register(table: &mut SymbolTable) {
    table.add_function(Function::nullary("randlandau", "Landau random numbers", RANDOM, landau));
    for (symbol, description, f) in UNARY {
        table.add_function(Function::unary(symbol, description, RANDOM, *f));
    }
    for (symbol, description, f) in BINARY {
        table.add_function(Function::binary(symbol, description, RANDOM, *f));
    }
}

/// One draw, or NaN when the parameters were rejected.
fn draw<D, E>(distribution: Result<D, E>) -> f64
where
    D: Distribution<f64>,
{
    distribution.map_or(f64::NAN, |d| d.sample(&mut rand::rng()))
}

fn exp1() -> f64 {
    rand::rng().sample(Exp1)
}

fn standard_normal() -> f64 {
    rand::rng().sample(StandardNormal)
}

pub fn int() -> f64 {
    rand::rng().random_range(0..=RAND_MAX) as f64
}

pub fn uniform() -> f64 {
    rand::rng().random::<f64>()
}

pub fn gaussian(sigma: f64) -> f64 {
    sigma * standard_normal()
}

/// Exponential with mean `mu`.
pub fn exponential(mu: f64) -> f64 {
    mu * exp1()
}

/// Difference of two unit exponentials is a unit Laplace variate.
pub fn laplace(a: f64) -> f64 {
    a * (exp1() - exp1())
}

pub fn cauchy(a: f64) -> f64 {
    a * draw(Cauchy::new(0.0, 1.0))
}

pub fn rayleigh(sigma: f64) -> f64 {
    sigma * (2.0 * exp1()).sqrt()
}

/// Landau variate by the Chambers-Mallows-Stuck method for a totally skewed
/// stable law with index 1, scale pi/2 and location 0.
pub fn landau() -> f64 {
    let mut rng = rand::rng();
    let v = PI * (rng.sample::<f64, _>(Open01) - 0.5);
    let w: f64 = rng.sample(Exp1);
    let shifted = FRAC_PI_2 + v;
    let standard = (shifted * v.tan() - (FRAC_PI_2 * w * v.cos() / shifted).ln()) / FRAC_PI_2;
    FRAC_PI_2 * standard + FRAC_PI_2.ln()
}

/// Symmetric alpha-stable variate with scale `c`, for 0 < alpha <= 2.
pub fn levy(c: f64, alpha: f64) -> f64 {
    if alpha.is_nan() || alpha <= 0.0 || alpha > 2.0 {
        return f64::NAN;
    }
    let mut rng = rand::rng();
    let u = PI * (rng.sample::<f64, _>(Open01) - 0.5);
    if alpha == 1.0 {
        return c * u.tan();
    }
    let w: f64 = rng.sample(Exp1);
    if alpha == 2.0 {
        return c * 2.0 * u.sin() * w.sqrt();
    }
    let t = (alpha * u).sin() / u.cos().powf(1.0 / alpha);
    let s = (((1.0 - alpha) * u).cos() / w).powf((1.0 - alpha) / alpha);
    c * t * s
}

pub fn flat(a: f64, b: f64) -> f64 {
    if a == b {
        return a;
    }
    draw(Uniform::new(a.min(b), a.max(b)))
}

pub fn lognormal(zeta: f64, sigma: f64) -> f64 {
    draw(LogNormal::new(zeta, sigma))
}

/// Shape `a`, scale `b`.
pub fn gamma(a: f64, b: f64) -> f64 {
    draw(Gamma::new(a, b))
}

pub fn chisq(nu: f64) -> f64 {
    draw(ChiSquared::new(nu))
}

pub fn tdist(nu: f64) -> f64 {
    draw(StudentT::new(nu))
}

pub fn logistic(a: f64) -> f64 {
    let u: f64 = rand::rng().sample(Open01);
    a * (u / (1.0 - u)).ln()
}

pub fn poisson(mu: f64) -> f64 {
    if mu.is_nan() || mu < 0.0 || mu.is_infinite() {
        return f64::NAN;
    }
    if mu == 0.0 {
        return 0.0;
    }
    if mu > POISSON_NORMAL_LIMIT {
        return (mu + mu.sqrt() * standard_normal()).round().max(0.0);
    }
    draw(Poisson::new(mu))
}

pub fn bernoulli(p: f64) -> f64 {
    match Bernoulli::new(p) {
        Ok(d) if d.sample(&mut rand::rng()) => 1.0,
        Ok(_) => 0.0,
        Err(_) => f64::NAN,
    }
}

/// Number of successes in `n` trials of probability `p`.
pub fn binomial(p: f64, n: f64) -> f64 {
    if n.is_nan() || n < 0.0 {
        return f64::NAN;
    }
    match Binomial::new(n.round() as u64, p) {
        Ok(d) => d.sample(&mut rand::rng()) as f64,
        Err(_) => f64::NAN,
    }
}
