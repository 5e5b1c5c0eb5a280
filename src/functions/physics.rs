//! Hydrogenic wavefunctions, Debye and transport integrals, synchrotron
//! functions and the Fermi-Dirac integrals.

use super::bessel::knu;
use super::gamma::{factorial, gamma, ln_gamma};
use super::polynomials::laguerre_n;
use super::quadrature::{exp_sinh, tanh_sinh};
use super::special::{bernoulli_ratio, eta, zeta};
use super::{Function, FunctionGroup};
use crate::symbols::SymbolTable;
use std::f64::consts::{LN_2, PI};

const MAX_TERMS: usize = 2000;
/// Debye and transport integrals switch from the Bernoulli series to the
/// exponential sums at this argument.
const SERIES_LIMIT: f64 = 2.0;
const BERNOULLI_TERMS: usize = 40;
/// Terms of the accelerated alternating series for the Fermi-Dirac integrals.
const ALTERNATING_TERMS: i32 = 30;
/// Beyond this argument the half-integer Fermi-Dirac integrals use the
/// Sommerfeld expansion.
const SOMMERFELD_LIMIT: f64 = 30.0;
const SOMMERFELD_TERMS: usize = 50;
/// Eulerian numbers overflow past this order.
const MAX_EULERIAN_ORDER: usize = 170;

pub fn register_coulomb(table: &mut SymbolTable) {
    const GROUP: FunctionGroup = FunctionGroup::CoulombFunctions;
    table.add_function(
        Function::binary(
            "hydrogenicR_1",
            "Lowest-order normalized hydrogenic bound state radial wavefunction",
            GROUP,
            hydrogenic_r1,
        )
        .with_parameters(&["Z", "r"]),
    );
    table.add_function(
        Function::quaternary(
            "hydrogenicR",
            "n-th normalized hydrogenic bound state radial wavefunction",
            GROUP,
            hydrogenic_r,
        )
        .with_parameters(&["n", "l", "Z", "r"]),
    );
}

pub fn register_debye(table: &mut SymbolTable) {
    const GROUP: FunctionGroup = FunctionGroup::DebyeFunctions;
    const UNARY: &[(&str, &str, fn(f64) -> f64)] = &[
        ("D1", "First-order Debye function", debye_1),
        ("D2", "Second-order Debye function", debye_2),
        ("D3", "Third-order Debye function", debye_3),
        ("D4", "Fourth-order Debye function", debye_4),
        ("D5", "Fifth-order Debye function", debye_5),
        ("D6", "Sixth-order Debye function", debye_6),
    ];
    for &(symbol, description, f) in UNARY {
        table.add_function(Function::unary(symbol, description, GROUP, f));
    }
}

pub fn register_fermi_dirac(table: &mut SymbolTable) {
    const GROUP: FunctionGroup = FunctionGroup::FermiDiracFunction;
    let unary = |symbol: &str, description: &str, f: fn(f64) -> f64| {
        Function::unary(symbol, description, GROUP, f)
    };
    let entries = [
        unary("Fm1", "Complete Fermi-Dirac integral with index -1", fermi_dirac_m1),
        unary("F0", "Complete Fermi-Dirac integral with index 0", fermi_dirac_0),
        unary("F1", "Complete Fermi-Dirac integral with index 1", fermi_dirac_1),
        unary("F2", "Complete Fermi-Dirac integral with index 2", fermi_dirac_2),
        Function::binary(
            "Fj",
            "Complete Fermi-Dirac integral with integer index j",
            GROUP,
            fermi_dirac_int,
        )
        .with_parameters(&["j", "x"]),
        unary("Fmhalf", "Complete Fermi-Dirac integral with index -1/2", fermi_dirac_mhalf),
        unary("Fhalf", "Complete Fermi-Dirac integral with index 1/2", fermi_dirac_half),
        unary("F3half", "Complete Fermi-Dirac integral with index 3/2", fermi_dirac_3half),
        Function::binary(
            "Finc0",
            "Incomplete Fermi-Dirac integral with index zero",
            GROUP,
            fermi_dirac_inc_0,
        )
        .with_parameters(&["x", "b"]),
    ];
    for entry in entries {
        table.add_function(entry);
    }
}

pub fn register_synchrotron(table: &mut SymbolTable) {
    const GROUP: FunctionGroup = FunctionGroup::SynchrotronFunctions;
    table.add_function(Function::unary(
        "synchrotron1",
        "First synchrotron function",
        GROUP,
        synchrotron_1,
    ));
    table.add_function(Function::unary(
        "synchrotron2",
        "Second synchrotron function",
        GROUP,
        synchrotron_2,
    ));
}

pub fn register_transport(table: &mut SymbolTable) {
    const GROUP: FunctionGroup = FunctionGroup::TransportFunctions;
    const UNARY: &[(&str, fn(f64) -> f64)] = &[
        ("J2", transport_2),
        ("J3", transport_3),
        ("J4", transport_4),
        ("J5", transport_5),
    ];
    for &(symbol, f) in UNARY {
        table.add_function(Function::unary(symbol, "Transport function", GROUP, f));
    }
}

/// 2 Z^(3/2) exp(-Z r).
pub fn hydrogenic_r1(z: f64, r: f64) -> f64 {
    if z <= 0.0 || r < 0.0 || z.is_nan() || r.is_nan() {
        return f64::NAN;
    }
    2.0 * z * z.sqrt() * (-z * r).exp()
}

/// Normalized radial wavefunction R_nl of a hydrogen-like atom with nuclear
/// charge Z. The quantum numbers n and l are rounded.
pub fn hydrogenic_r(n: f64, l: f64, z: f64, r: f64) -> f64 {
    let (n, l) = (n.round(), l.round());
    if !(n >= 1.0 && l >= 0.0 && l < n && z > 0.0 && r >= 0.0) {
        return f64::NAN;
    }
    if r.is_infinite() {
        return 0.0;
    }
    let rho = 2.0 * z * r / n;
    let scale = 2.0 * z / n;
    let ln_norm = 0.5 * (ln_gamma(n - l) - ln_gamma(n + l + 1.0) - (2.0 * n).ln());
    let envelope = (ln_norm + 1.5 * scale.ln() - 0.5 * rho).exp();
    envelope * rho.powf(l) * laguerre_n(n - l - 1.0, 2.0 * l + 1.0, rho)
}

/// Sum over k >= 1 of k^weight exp(-kx) sum_(m<=n) n!/(n-m)! x^(n-m) / k^(m+1),
/// the tail left over when the Debye and transport integrals run to infinity.
fn exponential_tail(n: i32, x: f64, weight: i32) -> f64 {
    let mut tail = 0.0;
    for k in 1..=MAX_TERMS {
        let k = k as f64;
        let decay = (-k * x).exp();
        if decay == 0.0 {
            break;
        }
        let mut inner = 0.0;
        let mut falling = 1.0;
        for m in 0..=n {
            inner += falling * x.powi(n - m) / k.powi(m + 1);
            falling *= f64::from(n - m);
        }
        let term = k.powi(weight) * decay * inner;
        tail += term;
        if term <= f64::EPSILON * tail {
            break;
        }
    }
    tail
}

/// n/x^n times the integral of t^n/(exp(t)-1) over [0, x].
fn debye(n: i32, x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return 1.0;
    }
    let order = f64::from(n);
    if x < SERIES_LIMIT {
        let mut sum = 1.0 - order * x / (2.0 * (order + 1.0));
        let mut power = 1.0;
        for k in 1..=BERNOULLI_TERMS {
            power *= x * x;
            let term = order * bernoulli_ratio(k) * power / (2.0 * k as f64 + order);
            sum += term;
            if term.abs() <= f64::EPSILON * sum.abs() {
                break;
            }
        }
        return sum;
    }
    let complete = factorial(order) * zeta(order + 1.0);
    order / x.powi(n) * (complete - exponential_tail(n, x, 0))
}

pub fn debye_1(x: f64) -> f64 {
    debye(1, x)
}

pub fn debye_2(x: f64) -> f64 {
    debye(2, x)
}

pub fn debye_3(x: f64) -> f64 {
    debye(3, x)
}

pub fn debye_4(x: f64) -> f64 {
    debye(4, x)
}

pub fn debye_5(x: f64) -> f64 {
    debye(5, x)
}

pub fn debye_6(x: f64) -> f64 {
    debye(6, x)
}

/// Integral of t^n exp(t)/(exp(t)-1)^2 over [0, x].
fn transport(n: i32, x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return 0.0;
    }
    let order = f64::from(n);
    if x < SERIES_LIMIT {
        let mut sum = x.powi(n - 1) / (order - 1.0);
        let mut power = x.powi(n - 1);
        for k in 1..=BERNOULLI_TERMS {
            power *= x * x;
            let exponent = 2.0 * k as f64 + order - 1.0;
            let term = (1.0 - 2.0 * k as f64) * bernoulli_ratio(k) * power / exponent;
            sum += term;
            if term.abs() <= f64::EPSILON * sum.abs() {
                break;
            }
        }
        return sum;
    }
    factorial(order) * zeta(order) - exponential_tail(n, x, 1)
}

pub fn transport_2(x: f64) -> f64 {
    transport(2, x)
}

pub fn transport_3(x: f64) -> f64 {
    transport(3, x)
}

pub fn transport_4(x: f64) -> f64 {
    transport(4, x)
}

pub fn transport_5(x: f64) -> f64 {
    transport(5, x)
}

/// x times the integral of K_(5/3) over [x, inf).
///
/// Written as the integral over t of exp(-x cosh t) cosh(5t/3)/cosh t and
/// summed by the trapezoid rule around the peak of the log integrand.
pub fn synchrotron_1(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 || x.is_infinite() {
        return 0.0;
    }
    let nu = 5.0 / 3.0;
    let ln_cosh = |t: f64| t + (-2.0 * t).exp().ln_1p() - LN_2;
    // log of the integrand relative to exp(-x)
    let g = |t: f64| {
        let half = (0.5 * t).sinh();
        -2.0 * x * half * half + ln_cosh(nu * t) - ln_cosh(t)
    };
    let h = (0.6 / (x * x + nu * nu).sqrt().sqrt()).min(0.2);
    let peak = ((nu - 1.0) / x).asinh();
    let g_max = g(peak);
    let mut sum = 0.5 * (g(0.0) - g_max).exp();
    for k in 1..=MAX_TERMS * 100 {
        let t = k as f64 * h;
        let term = (g(t) - g_max).exp();
        sum += term;
        if t > peak && term < 1e-2 * f64::EPSILON * sum {
            break;
        }
    }
    x * (g_max - x).exp() * sum * h
}

/// x K_(2/3)(x).
pub fn synchrotron_2(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 || x.is_infinite() {
        return 0.0;
    }
    x * knu(2.0 / 3.0, x)
}

/// sum over k >= 1 of (-1)^(k+1) exp(kx) / k^s for x <= 0 and s > 0.
fn alternating_series(s: f64, x: f64) -> f64 {
    if x < -1.0 {
        let mut sum = 0.0;
        let mut sign = 1.0;
        for k in 1..=MAX_TERMS {
            let k = k as f64;
            let term = sign * (k * x).exp() / k.powf(s);
            sum += term;
            if term.abs() <= f64::EPSILON * sum.abs() {
                break;
            }
            sign = -sign;
        }
        return sum;
    }
    // Cohen, Rodriguez Villegas and Zagier acceleration
    let n = f64::from(ALTERNATING_TERMS);
    let d = (3.0 + 8f64.sqrt()).powi(ALTERNATING_TERMS);
    let d = 0.5 * (d + 1.0 / d);
    let mut b = -1.0;
    let mut c = -d;
    let mut sum = 0.0;
    for k in 0..ALTERNATING_TERMS {
        let k = f64::from(k);
        c = b - c;
        sum += c * ((k + 1.0) * x).exp() / (k + 1.0).powf(s);
        b = (k + n) * (k - n) * b / ((k + 0.5) * (k + 1.0));
    }
    sum / d
}

fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

fn softplus(x: f64) -> f64 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

/// x^p / p! for x > 0.
fn power_over_factorial(x: f64, p: i32) -> f64 {
    if p == 0 {
        return 1.0;
    }
    let p = f64::from(p);
    (p * x.ln() - ln_gamma(p + 1.0)).exp()
}

/// Orders below -1 are derivatives of the logistic function, written with
/// the Eulerian numbers of order m = -(j+1).
fn fermi_dirac_negative(m: usize, x: f64) -> f64 {
    if m > MAX_EULERIAN_ORDER {
        return f64::NAN;
    }
    if x > 0.0 {
        let sign = if m % 2 == 0 { -1.0 } else { 1.0 };
        return sign * fermi_dirac_negative(m, -x);
    }
    let mut row = vec![1.0];
    for n in 2..=m {
        let mut next = vec![0.0; n];
        for (k, value) in next.iter_mut().enumerate() {
            let same = row.get(k).copied().unwrap_or(0.0);
            let lower = if k > 0 { row[k - 1] } else { 0.0 };
            *value = (k + 1) as f64 * same + (n - k) as f64 * lower;
        }
        row = next;
    }
    let z = x.exp();
    let mut power = z;
    let mut sum = 0.0;
    for (k, a) in row.iter().enumerate() {
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        sum += sign * a * power;
        power *= z;
    }
    sum / (1.0 + z).powi(m as i32 + 1)
}

/// Complete Fermi-Dirac integral of integer order, including negative ones.
fn fermi_dirac_integer(j: i32, x: f64) -> f64 {
    match j {
        -1 => logistic(x),
        0 => softplus(x),
        j if j < -1 => fermi_dirac_negative((-(j + 1)) as usize, x),
        j if x <= 0.0 => alternating_series(f64::from(j) + 1.0, x),
        j => {
            // reflection through F_j(-x), exact for integer orders
            let mut sum = power_over_factorial(x, j + 1);
            for k in 1..=(j + 1) / 2 {
                let k2 = 2 * k;
                sum += 2.0 * eta(f64::from(k2)) * power_over_factorial(x, j + 1 - k2);
            }
            let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
            sum + sign * alternating_series(f64::from(j) + 1.0, -x)
        }
    }
}

/// Sommerfeld expansion for large positive x.
fn fermi_dirac_sommerfeld(j: f64, x: f64) -> f64 {
    let mut sum = 1.0;
    let mut ratio = 1.0;
    let mut last = f64::INFINITY;
    for k in 1..=SOMMERFELD_TERMS {
        let k = k as f64;
        ratio *= (j + 3.0 - 2.0 * k) * (j + 2.0 - 2.0 * k) / (x * x);
        let term = 2.0 * eta(2.0 * k) * ratio;
        if term == 0.0 || term.abs() > last {
            break;
        }
        sum += term;
        last = term.abs();
        if term.abs() < f64::EPSILON * sum.abs() {
            break;
        }
    }
    let leading = ((j + 1.0) * x.ln() - ln_gamma(j + 2.0)).exp();
    leading * sum + (PI * j).cos() * alternating_series(j + 1.0, -x)
}

/// Complete Fermi-Dirac integral F_j(x) = 1/Gamma(j+1) times the integral of
/// t^j/(exp(t-x)+1) over [0, inf). Non-integer orders must exceed -1.
pub fn fermi_dirac(j: f64, x: f64) -> f64 {
    if j.is_nan() || x.is_nan() {
        return f64::NAN;
    }
    if j == j.round() {
        if j.abs() > f64::from(i32::MAX) {
            return f64::NAN;
        }
        return fermi_dirac_integer(j as i32, x);
    }
    if j < -1.0 {
        return f64::NAN;
    }
    if x <= 0.0 {
        return alternating_series(j + 1.0, x);
    }
    if x > SOMMERFELD_LIMIT {
        return fermi_dirac_sommerfeld(j, x);
    }
    let near = tanh_sinh(|_, t, right| t.powf(j) / (1.0 + (-right).exp()), 0.0, x);
    let far = exp_sinh(
        |t| {
            let e = (x - t).exp();
            t.powf(j) * e / (1.0 + e)
        },
        x,
    );
    (near + far) / gamma(j + 1.0)
}

pub fn fermi_dirac_m1(x: f64) -> f64 {
    fermi_dirac(-1.0, x)
}

pub fn fermi_dirac_0(x: f64) -> f64 {
    fermi_dirac(0.0, x)
}

pub fn fermi_dirac_1(x: f64) -> f64 {
    fermi_dirac(1.0, x)
}

pub fn fermi_dirac_2(x: f64) -> f64 {
    fermi_dirac(2.0, x)
}

/// Integer order j is rounded.
pub fn fermi_dirac_int(j: f64, x: f64) -> f64 {
    fermi_dirac(j.round(), x)
}

pub fn fermi_dirac_mhalf(x: f64) -> f64 {
    fermi_dirac(-0.5, x)
}

pub fn fermi_dirac_half(x: f64) -> f64 {
    fermi_dirac(0.5, x)
}

pub fn fermi_dirac_3half(x: f64) -> f64 {
    fermi_dirac(1.5, x)
}

/// ln(1 + exp(x - b)), the index zero integral over [b, inf).
pub fn fermi_dirac_inc_0(x: f64, b: f64) -> f64 {
    if b < 0.0 || b.is_nan() {
        return f64::NAN;
    }
    softplus(x - b)
}
