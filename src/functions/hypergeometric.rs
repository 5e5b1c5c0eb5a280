//! Hypergeometric functions 0F1, 1F1, U, 2F1 and 2F0.
//!
//! Power series carry most of the work. Kummer's and Pfaff's transformations
//! move arguments into the range where the series converge quickly, the
//! Gauss connection formula covers 2F1 near x = 1, and U comes from its
//! Laplace-type integral by double exponential quadrature.

use super::bessel::cylindrical_jy;
use super::gamma::{gamma, gamma_inv, ln_gamma};
use super::quadrature::{exp_sinh, tanh_sinh};
use super::{Function, FunctionGroup};
use crate::symbols::SymbolTable;
use num_complex::Complex64;
use std::f64::consts::PI;

const HYPERGEOMETRIC: FunctionGroup = FunctionGroup::HypergeometricFunctions;

const SERIES_TERMS: usize = 100_000;
/// Slowly converging 2F1 series near x = 1 get this many terms.
const LONG_SERIES_TERMS: usize = 1_000_000;
/// 0F1 switches to Bessel functions below this argument.
const BESSEL_LIMIT: f64 = -10.0;
/// 2F1 uses the Gauss connection formula above this argument.
const CONNECTION_LIMIT: f64 = 0.75;

pub fn register(table: &mut SymbolTable) {
    let entries = [
        Function::binary("hyperg_0F1", "Hypergeometric function 0F1", HYPERGEOMETRIC, hyp0f1)
            .with_parameters(&["c", "x"]),
        Function::ternary(
            "hyperg_1F1i",
            "Confluent hypergeometric function 1F1 for integer parameters",
            HYPERGEOMETRIC,
            hyp1f1_int,
        )
        .with_parameters(&["m", "n", "x"]),
        Function::ternary(
            "hyperg_1F1",
            "Confluent hypergeometric function 1F1 for general parameters",
            HYPERGEOMETRIC,
            hyp1f1,
        )
        .with_parameters(&["a", "b", "x"]),
        Function::ternary(
            "hyperg_Ui",
            "Confluent hypergeometric function U for integer parameters",
            HYPERGEOMETRIC,
            hyperu_int,
        )
        .with_parameters(&["m", "n", "x"]),
        Function::ternary(
            "hyperg_U",
            "Confluent hypergeometric function U",
            HYPERGEOMETRIC,
            hyperu,
        )
        .with_parameters(&["a", "b", "x"]),
        Function::quaternary(
            "hyperg_2F1",
            "Gauss hypergeometric function 2F1",
            HYPERGEOMETRIC,
            hyp2f1,
        )
        .with_parameters(&["a", "b", "c", "x"]),
        Function::quaternary(
            "hyperg_2F1c",
            "Gauss hypergeometric function 2F1 with complex parameters",
            HYPERGEOMETRIC,
            hyp2f1_conj,
        )
        .with_parameters(&["aR", "aI", "c", "x"]),
        Function::quaternary(
            "hyperg_2F1r",
            "Renormalized Gauss hypergeometric function 2F1",
            HYPERGEOMETRIC,
            hyp2f1_renorm,
        )
        .with_parameters(&["a", "b", "c", "x"]),
        Function::quaternary(
            "hyperg_2F1cr",
            "Renormalized Gauss hypergeometric function 2F1 with complex parameters",
            HYPERGEOMETRIC,
            hyp2f1_conj_renorm,
        )
        .with_parameters(&["aR", "aI", "c", "x"]),
        Function::ternary(
            "hyperg_2F0",
            "Hypergeometric function 2F0",
            HYPERGEOMETRIC,
            hyp2f0,
        )
        .with_parameters(&["a", "b", "x"]),
    ];
    for entry in entries {
        table.add_function(entry);
    }
}

fn is_non_positive_integer(x: f64) -> bool {
    x <= 0.0 && x == x.floor()
}

/// 1 + t1 + t2 + ... with t(k+1) = t(k) ratio(k).
fn series(ratio: impl Fn(f64) -> f64, max_terms: usize) -> f64 {
    let mut sum = 1.0;
    let mut term = 1.0;
    for k in 0..max_terms {
        term *= ratio(k as f64);
        sum += term;
        if term == 0.0 || (k > 3 && term.abs() < f64::EPSILON * sum.abs()) {
            break;
        }
    }
    sum
}

fn complex_series(ratio: impl Fn(f64) -> Complex64, max_terms: usize) -> Complex64 {
    let mut sum = Complex64::new(1.0, 0.0);
    let mut term = sum;
    for k in 0..max_terms {
        term *= ratio(k as f64);
        sum += term;
        if term.norm() == 0.0 || (k > 3 && term.norm() < f64::EPSILON * sum.norm()) {
            break;
        }
    }
    sum
}

pub fn hyp0f1(c: f64, x: f64) -> f64 {
    if c.is_nan() || x.is_nan() || is_non_positive_integer(c) {
        return f64::NAN;
    }
    if x > BESSEL_LIMIT {
        return series(|k| x / ((c + k) * (k + 1.0)), SERIES_TERMS);
    }
    if x.is_infinite() {
        return f64::NAN;
    }
    // Gamma(c) (-x)^((1-c)/2) J_(c-1)(2 sqrt(-x))
    let z = 2.0 * (-x).sqrt();
    let nu = c - 1.0;
    let bessel = if nu >= 0.0 {
        cylindrical_jy(nu, z).0
    } else {
        let (j, y) = cylindrical_jy(-nu, z);
        (-nu * PI).cos() * j - (-nu * PI).sin() * y
    };
    gamma(c) * (-x).powf(0.5 * (1.0 - c)) * bessel
}

pub fn hyp1f1(a: f64, b: f64, x: f64) -> f64 {
    if a.is_nan() || b.is_nan() || x.is_nan() {
        return f64::NAN;
    }
    let polynomial = is_non_positive_integer(a);
    if is_non_positive_integer(b) && !(polynomial && a > b) {
        return f64::NAN;
    }
    if polynomial || x >= 0.0 {
        return series(|k| (a + k) / ((b + k) * (k + 1.0)) * x, SERIES_TERMS);
    }
    // Kummer: 1F1(a; b; x) = exp(x) 1F1(b - a; b; -x)
    x.exp() * series(|k| (b - a + k) / ((b + k) * (k + 1.0)) * -x, SERIES_TERMS)
}

/// Rounds the parameters to integers.
pub fn hyp1f1_int(m: f64, n: f64, x: f64) -> f64 {
    hyp1f1(m.round(), n.round(), x)
}

/// U(a, b, x) for a > 0 from 1/Gamma(a) x^-a integral of exp(-u) u^(a-1)
/// (1 + u/x)^(b-a-1) over [0, inf). The substitution v = u^a on [0, 1]
/// removes the endpoint singularity.
fn hyperu_integral(a: f64, b: f64, x: f64) -> f64 {
    let c = b - a - 1.0;
    let log_gamma = ln_gamma(a);
    let near = tanh_sinh(
        |v, _, _| {
            let u = v.powf(1.0 / a);
            (-u + c * (u / x).ln_1p() - log_gamma).exp() / a
        },
        0.0,
        1.0,
    );
    let far = exp_sinh(
        |u| (-u + (a - 1.0) * u.ln() + c * (u / x).ln_1p() - log_gamma).exp(),
        1.0,
    );
    x.powf(-a) * (near + far)
}

pub fn hyperu(a: f64, b: f64, x: f64) -> f64 {
    if a.is_nan() || b.is_nan() || x.is_nan() || x <= 0.0 {
        return f64::NAN;
    }
    if is_non_positive_integer(a) {
        // (-1)^m sum_k C(m, k) (b + k)_(m-k) (-x)^k
        let m = -a as u32;
        let mut sum = 0.0;
        let mut binomial = 1.0;
        for k in 0..=m {
            let pochhammer: f64 = (0..m - k).map(|j| b + f64::from(k + j)).product();
            sum += binomial * pochhammer * (-x).powi(k as i32);
            binomial *= f64::from(m - k) / f64::from(k + 1);
        }
        return if m % 2 == 1 { -sum } else { sum };
    }
    if a > 0.0 {
        return hyperu_integral(a, b, x);
    }
    let shifted = a - b + 1.0;
    if shifted > 0.0 || is_non_positive_integer(shifted) {
        return x.powf(1.0 - b) * hyperu(shifted, 2.0 - b, x);
    }
    // recur down in a from two positive orders
    let steps = (-a).ceil() as usize + 1;
    let a0 = a + steps as f64;
    let mut upper = hyperu_integral(a0 + 1.0, b, x);
    let mut current = hyperu_integral(a0, b, x);
    let mut order = a0;
    for _ in 0..steps {
        let lower = -(b - 2.0 * order - x) * current - order * (order - b + 1.0) * upper;
        upper = current;
        current = lower;
        order -= 1.0;
    }
    current
}

/// Rounds the parameters to integers.
pub fn hyperu_int(m: f64, n: f64, x: f64) -> f64 {
    hyperu(m.round(), n.round(), x)
}

/// Gamma(p) Gamma(q) / (Gamma(r) Gamma(s)).
fn gamma_ratio(p: f64, q: f64, r: f64, s: f64) -> f64 {
    gamma(p) * gamma(q) * gamma_inv(r) * gamma_inv(s)
}

pub fn hyp2f1(a: f64, b: f64, c: f64, x: f64) -> f64 {
    if a.is_nan() || b.is_nan() || c.is_nan() || x.is_nan() {
        return f64::NAN;
    }
    let a_polynomial = is_non_positive_integer(a);
    let b_polynomial = is_non_positive_integer(b);
    if is_non_positive_integer(c) && !((a_polynomial && a > c) || (b_polynomial && b > c)) {
        return f64::NAN;
    }
    let ratio = |k: f64| (a + k) * (b + k) / ((c + k) * (k + 1.0)) * x;
    if a_polynomial || b_polynomial {
        return series(ratio, SERIES_TERMS);
    }
    if x > 1.0 {
        return f64::NAN;
    }
    let d = c - a - b;
    if x == 1.0 {
        return if d <= 0.0 { f64::INFINITY } else { gamma_ratio(c, d, c - a, c - b) };
    }
    if x < -0.5 {
        // Pfaff: (1 - x)^-a 2F1(a, c - b; c; x / (x - 1))
        return (1.0 - x).powf(-a) * hyp2f1(a, c - b, c, x / (x - 1.0));
    }
    if x <= CONNECTION_LIMIT {
        return series(ratio, SERIES_TERMS);
    }
    if (d - d.round()).abs() < 1e-12 {
        return series(ratio, LONG_SERIES_TERMS);
    }
    let y = 1.0 - x;
    let near = gamma_ratio(c, d, c - a, c - b)
        * series(|k| (a + k) * (b + k) / ((a + b - c + 1.0 + k) * (k + 1.0)) * y, SERIES_TERMS);
    let far = gamma_ratio(c, -d, a, b)
        * y.powf(d)
        * series(|k| (c - a + k) * (c - b + k) / ((d + 1.0 + k) * (k + 1.0)) * y, SERIES_TERMS);
    near + far
}

/// 2F1(a, b; c; x) / Gamma(c), finite at non-positive integer c.
pub fn hyp2f1_renorm(a: f64, b: f64, c: f64, x: f64) -> f64 {
    if !is_non_positive_integer(c) {
        return hyp2f1(a, b, c, x) * gamma_inv(c);
    }
    if (is_non_positive_integer(a) && a > c) || (is_non_positive_integer(b) && b > c) {
        return 0.0;
    }
    // (a)_(n+1) (b)_(n+1) / (n+1)! x^(n+1) 2F1(a+n+1, b+n+1; n+2; x) with n = -c
    let shift = 1.0 - c;
    let prefactor: f64 = (0..shift as u32)
        .map(|j| {
            let j = f64::from(j);
            (a + j) * (b + j) / (j + 1.0) * x
        })
        .product();
    prefactor * hyp2f1(a + shift, b + shift, shift + 1.0, x)
}

/// 2F1(a, conj(a); c; x) with a = aR + i aI, which is real for real c and x.
pub fn hyp2f1_conj(a_re: f64, a_im: f64, c: f64, x: f64) -> f64 {
    if a_re.is_nan() || a_im.is_nan() || c.is_nan() || x.is_nan() {
        return f64::NAN;
    }
    if a_im == 0.0 {
        return hyp2f1(a_re, a_re, c, x);
    }
    if is_non_positive_integer(c) || x >= 1.0 {
        return f64::NAN;
    }
    if x < -0.5 {
        // Pfaff with complex parameters a and c - conj(a)
        let a = Complex64::new(a_re, a_im);
        let b = Complex64::new(c - a_re, a_im);
        let z = x / (x - 1.0);
        let inner = complex_series(|k| (a + k) * (b + k) / ((c + k) * (k + 1.0)) * z, SERIES_TERMS);
        let prefactor = (-a * (1.0 - x).ln()).exp();
        return (prefactor * inner).re;
    }
    let modulus = |k: f64| (a_re + k) * (a_re + k) + a_im * a_im;
    series(|k| modulus(k) / ((c + k) * (k + 1.0)) * x, LONG_SERIES_TERMS)
}

pub fn hyp2f1_conj_renorm(a_re: f64, a_im: f64, c: f64, x: f64) -> f64 {
    if !is_non_positive_integer(c) {
        return hyp2f1_conj(a_re, a_im, c, x) * gamma_inv(c);
    }
    if a_im == 0.0 {
        return hyp2f1_renorm(a_re, a_re, c, x);
    }
    let shift = 1.0 - c;
    let prefactor: f64 = (0..shift as u32)
        .map(|j| {
            let j = f64::from(j);
            ((a_re + j) * (a_re + j) + a_im * a_im) / (j + 1.0) * x
        })
        .product();
    prefactor * hyp2f1_conj(a_re + shift, a_im, shift + 1.0, x)
}

/// 2F0(a, b; x) = (-1/x)^a U(a, 1 + a - b, -1/x), defined for x < 0.
pub fn hyp2f0(a: f64, b: f64, x: f64) -> f64 {
    if a.is_nan() || b.is_nan() || x.is_nan() || x > 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return 1.0;
    }
    let y = -1.0 / x;
    y.powf(a) * hyperu(a, 1.0 + a - b, y)
}
