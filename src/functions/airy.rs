//! Airy functions Ai and Bi, their derivatives, exponentially scaled forms
//! and zeros. Maclaurin series cover |x| <= 1; outside, the functions are
//! expressed through Bessel functions of order 1/3 and 2/3.

use super::bessel::{cylindrical_jy, inu_scaled, knu_scaled, newton};
use super::{Function, FunctionGroup};
use crate::symbols::SymbolTable;
use std::f64::consts::PI;

const AIRY: FunctionGroup = FunctionGroup::AiryFunctions;

/// Ai(0)
const AI_0: f64 = 0.355_028_053_887_817_24;
/// -Ai'(0)
const AI_PRIME_0: f64 = 0.258_819_403_792_806_8;
const SQRT_3: f64 = 1.732_050_807_568_877_2;
const SERIES_LIMIT: f64 = 1.0;

const AIRY_UNARY: &[(&str, &str, fn(f64) -> f64)] = &[
    ("Ai", "Airy function of the first kind", airy_ai),
    ("Bi", "Airy function of the second kind", airy_bi),
    ("Ais", "Scaled Airy function of the first kind", airy_ai_scaled),
    ("Bis", "Scaled Airy function of the second kind", airy_bi_scaled),
    ("Aid", "Airy function derivative of the first kind", airy_ai_derivative),
    ("Bid", "Airy function derivative of the second kind", airy_bi_derivative),
    ("Aids", "Scaled Airy function derivative of the first kind", airy_ai_derivative_scaled),
    ("Bids", "Scaled Airy function derivative of the second kind", airy_bi_derivative_scaled),
    ("Ai0", "n-th zero of the Airy function of the first kind", zero_ai),
    ("Bi0", "n-th zero of the Airy function of the second kind", zero_bi),
    ("Aid0", "n-th zero of the Airy function derivative of the first kind", zero_ai_derivative),
    ("Bid0", "n-th zero of the Airy function derivative of the second kind", zero_bi_derivative),
];

pub fn register(table: &mut SymbolTable) {
    for (symbol, description, f) in AIRY_UNARY {
        table.add_function(Function::unary(symbol, description, AIRY, *f));
    }
}

fn zeta(x: f64) -> f64 {
    2.0 / 3.0 * x * x.sqrt()
}

/// The two Maclaurin solutions f and g with Ai = c1 f - c2 g, Bi = sqrt(3)(c1 f + c2 g).
fn maclaurin(x: f64) -> (f64, f64) {
    let x3 = x * x * x;
    let (mut f, mut g) = (1.0, x);
    let (mut tf, mut tg) = (1.0, x);
    let mut k = 1.0;
    loop {
        tf *= x3 / ((3.0 * k - 1.0) * (3.0 * k));
        tg *= x3 / ((3.0 * k) * (3.0 * k + 1.0));
        f += tf;
        g += tg;
        if tf.abs() <= f64::EPSILON * f.abs() && tg.abs() <= f64::EPSILON * g.abs() {
            return (f, g);
        }
        k += 1.0;
    }
}

fn maclaurin_derivative(x: f64) -> (f64, f64) {
    let x3 = x * x * x;
    let (mut u, mut v) = (0.5 * x * x, 1.0);
    let (mut fd, mut gd) = (u, v);
    let mut k = 1.0;
    loop {
        u *= x3 / (3.0 * k * (3.0 * k + 2.0));
        v *= x3 / ((3.0 * k - 2.0) * (3.0 * k));
        fd += u;
        gd += v;
        if u.abs() <= f64::EPSILON * fd.abs() && v.abs() <= f64::EPSILON * gd.abs() {
            return (fd, gd);
        }
        k += 1.0;
    }
}

/// Ai(x), or exp(2/3 x^(3/2)) Ai(x) for positive x when scaled.
fn ai(x: f64, scaled: bool) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x.abs() <= SERIES_LIMIT {
        let (f, g) = maclaurin(x);
        let value = AI_0 * f - AI_PRIME_0 * g;
        return if scaled && x > 0.0 { value * zeta(x).exp() } else { value };
    }
    if x.is_infinite() {
        return 0.0;
    }
    if x > 0.0 {
        let z = zeta(x);
        let value = (x / 3.0).sqrt() / PI * knu_scaled(1.0 / 3.0, z);
        return if scaled { value } else { value * (-z).exp() };
    }
    let t = -x;
    let (j, y) = cylindrical_jy(1.0 / 3.0, zeta(t));
    0.5 * t.sqrt() * (j - y / SQRT_3)
}

/// Bi(x), or exp(-2/3 x^(3/2)) Bi(x) for positive x when scaled.
fn bi(x: f64, scaled: bool) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x.abs() <= SERIES_LIMIT {
        let (f, g) = maclaurin(x);
        let value = SQRT_3 * (AI_0 * f + AI_PRIME_0 * g);
        return if scaled && x > 0.0 { value * (-zeta(x)).exp() } else { value };
    }
    if x.is_infinite() {
        return if x > 0.0 && !scaled { f64::INFINITY } else { 0.0 };
    }
    if x > 0.0 {
        let z = zeta(x);
        // I_(-1/3) = I_(1/3) + 2/pi sin(pi/3) K_(1/3)
        let k = knu_scaled(1.0 / 3.0, z) * (-2.0 * z).exp();
        let value = (x / 3.0).sqrt()
            * (2.0 * inu_scaled(1.0 / 3.0, z) + 2.0 / PI * (PI / 3.0).sin() * k);
        return if scaled { value } else { value * z.exp() };
    }
    let t = -x;
    let (j, y) = cylindrical_jy(1.0 / 3.0, zeta(t));
    -0.5 * t.sqrt() * (j / SQRT_3 + y)
}

fn ai_derivative(x: f64, scaled: bool) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x.abs() <= SERIES_LIMIT {
        let (fd, gd) = maclaurin_derivative(x);
        let value = AI_0 * fd - AI_PRIME_0 * gd;
        return if scaled && x > 0.0 { value * zeta(x).exp() } else { value };
    }
    if x.is_infinite() {
        return if x > 0.0 { 0.0 } else { f64::NAN };
    }
    if x > 0.0 {
        let z = zeta(x);
        let value = -x / (PI * SQRT_3) * knu_scaled(2.0 / 3.0, z);
        return if scaled { value } else { value * (-z).exp() };
    }
    let t = -x;
    let (j, y) = cylindrical_jy(2.0 / 3.0, zeta(t));
    0.5 * t * (j + y / SQRT_3)
}

fn bi_derivative(x: f64, scaled: bool) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x.abs() <= SERIES_LIMIT {
        let (fd, gd) = maclaurin_derivative(x);
        let value = SQRT_3 * (AI_0 * fd + AI_PRIME_0 * gd);
        return if scaled && x > 0.0 { value * (-zeta(x)).exp() } else { value };
    }
    if x.is_infinite() {
        return if x > 0.0 && !scaled { f64::INFINITY } else if x > 0.0 { 0.0 } else { f64::NAN };
    }
    if x > 0.0 {
        let z = zeta(x);
        let k = knu_scaled(2.0 / 3.0, z) * (-2.0 * z).exp();
        let value = x / SQRT_3
            * (2.0 * inu_scaled(2.0 / 3.0, z) + 2.0 / PI * (2.0 * PI / 3.0).sin() * k);
        return if scaled { value } else { value * z.exp() };
    }
    let t = -x;
    let (j, y) = cylindrical_jy(2.0 / 3.0, zeta(t));
    0.5 * t * (j / SQRT_3 - y)
}

pub fn airy_ai(x: f64) -> f64 {
    ai(x, false)
}

pub fn airy_bi(x: f64) -> f64 {
    bi(x, false)
}

pub fn airy_ai_scaled(x: f64) -> f64 {
    ai(x, true)
}

pub fn airy_bi_scaled(x: f64) -> f64 {
    bi(x, true)
}

pub fn airy_ai_derivative(x: f64) -> f64 {
    ai_derivative(x, false)
}

pub fn airy_bi_derivative(x: f64) -> f64 {
    bi_derivative(x, false)
}

pub fn airy_ai_derivative_scaled(x: f64) -> f64 {
    ai_derivative(x, true)
}

pub fn airy_bi_derivative_scaled(x: f64) -> f64 {
    bi_derivative(x, true)
}

/// Asymptotic T(t) of the zeros of Ai and Bi.
fn zero_t(t: f64) -> f64 {
    let t2 = t.powi(-2);
    t.powf(2.0 / 3.0)
        * (1.0
            + t2 * (5.0 / 48.0
                + t2 * (-5.0 / 36.0
                    + t2 * (77_125.0 / 82_944.0 + t2 * (-108_056_875.0 / 6_967_296.0)))))
}

/// Asymptotic U(t) of the zeros of Ai' and Bi'.
fn zero_u(t: f64) -> f64 {
    let t2 = t.powi(-2);
    t.powf(2.0 / 3.0)
        * (1.0
            + t2 * (-7.0 / 48.0
                + t2 * (35.0 / 288.0
                    + t2 * (-181_223.0 / 207_360.0 + t2 * (18_683_371.0 / 1_244_160.0)))))
}

/// Rounds the zero index; indices below one have no zero.
fn zero_index(s: f64) -> Option<f64> {
    let s = s.round();
    if s.is_nan() || s < 1.0 {
        None
    } else {
        Some(s)
    }
}

pub fn zero_ai(s: f64) -> f64 {
    zero_index(s).map_or(f64::NAN, |s| {
        let guess = -zero_t(3.0 * PI / 8.0 * (4.0 * s - 1.0));
        newton(|x| (airy_ai(x), airy_ai_derivative(x)), guess)
    })
}

pub fn zero_bi(s: f64) -> f64 {
    zero_index(s).map_or(f64::NAN, |s| {
        let guess = -zero_t(3.0 * PI / 8.0 * (4.0 * s - 3.0));
        newton(|x| (airy_bi(x), airy_bi_derivative(x)), guess)
    })
}

/// Zeros of Ai'; Ai'' = x Ai.
pub fn zero_ai_derivative(s: f64) -> f64 {
    zero_index(s).map_or(f64::NAN, |s| {
        let guess = -zero_u(3.0 * PI / 8.0 * (4.0 * s - 3.0));
        newton(|x| (airy_ai_derivative(x), x * airy_ai(x)), guess)
    })
}

pub fn zero_bi_derivative(s: f64) -> f64 {
    zero_index(s).map_or(f64::NAN, |s| {
        let guess = -zero_u(3.0 * PI / 8.0 * (4.0 * s - 1.0));
        newton(|x| (airy_bi_derivative(x), x * airy_bi(x)), guess)
    })
}
