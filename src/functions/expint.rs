//! Exponential, hyperbolic and trigonometric integrals.

use super::gamma::{gamma, gamma_p};
use super::{Function, FunctionGroup};
use crate::symbols::SymbolTable;
use num_complex::Complex64;
use std::f64::consts::FRAC_PI_2;

const EULER: f64 = 0.577_215_664_901_532_9;
const MAX_ITERATIONS: usize = 1000;
const TINY: f64 = 1e-300;
/// Ei switches from its power series to the asymptotic series above this.
const EI_ASYMPTOTIC: f64 = 40.0;
/// Shi and Chi use the power series up to this argument.
const HYPERBOLIC_SERIES: f64 = 10.0;
/// Si and Ci use the power series up to this argument.
const TRIGONOMETRIC_SERIES: f64 = 2.0;
/// Terms of the accelerated arctangent integral series.
const ATANINT_TERMS: i32 = 30;

pub fn register(table: &mut SymbolTable) {
    const GROUP: FunctionGroup = FunctionGroup::ExponentialIntegrals;
    const UNARY: &[(&str, &str, fn(f64) -> f64)] = &[
        ("E1", "Exponential integral", e1),
        ("E2", "Second order exponential integral", e2),
        ("Ei", "Exponential integral Ei", ei),
        ("Shi", "Hyperbolic integral Shi", shi),
        ("Chi", "Hyperbolic integral Chi", chi),
        ("Ei3", "Third-order exponential integral", ei3),
        ("Si", "Sine integral", si),
        ("Ci", "Cosine integral", ci),
        ("Atanint", "Arctangent integral", atanint),
    ];
    for (symbol, description, f) in UNARY {
        table.add_function(Function::unary(symbol, description, GROUP, *f));
    }
    table.add_function(Function::binary("En", "Exponential integral of order n", GROUP, en));
}

/// Modified Lentz evaluation of 1/(b0 + a1/(b1 + a2/(b2 + ...))) with
/// a_i = a(i) and b_i = b0 + 2i, the shape shared by all the fractions here.
fn lentz<T>(b0: T, a: impl Fn(f64) -> f64) -> T
where
    T: Copy
        + std::ops::Add<Output = T>
        + std::ops::Mul<Output = T>
        + std::ops::Div<Output = T>
        + std::ops::Sub<Output = T>
        + From<f64>
        + Norm,
{
    let one = T::from(1.0);
    let mut b = b0;
    let mut c = T::from(1.0 / TINY);
    let mut d = one / b;
    let mut h = d;
    for i in 1..MAX_ITERATIONS {
        let ai = T::from(a(i as f64));
        b = b + T::from(2.0);
        d = one / (ai * d + b);
        c = b + ai / c;
        let delta = c * d;
        h = h * delta;
        if (delta - one).magnitude() < f64::EPSILON {
            break;
        }
    }
    h
}

trait Norm {
    fn magnitude(self) -> f64;
}

impl Norm for f64 {
    fn magnitude(self) -> f64 {
        self.abs()
    }
}

impl Norm for Complex64 {
    fn magnitude(self) -> f64 {
        self.re.abs() + self.im.abs()
    }
}

pub fn e1(x: f64) -> f64 {
    if x.is_nan() {
        f64::NAN
    } else if x < 0.0 {
        -ei(-x)
    } else if x == 0.0 {
        f64::INFINITY
    } else if x <= 1.0 {
        let mut term = 1.0;
        let mut sum = 0.0;
        for k in 1..MAX_ITERATIONS {
            let k = k as f64;
            term *= -x / k;
            sum -= term / k;
            if (term / k).abs() < f64::EPSILON * sum.abs() {
                break;
            }
        }
        -EULER - x.ln() + sum
    } else if x.is_infinite() {
        0.0
    } else {
        lentz(x + 1.0, |i| -i * i) * (-x).exp()
    }
}

pub fn e2(x: f64) -> f64 {
    en(2.0, x)
}

/// E_n(x); the order is rounded to the nearest integer.
pub fn en(n: f64, x: f64) -> f64 {
    let n = n.round();
    if n.is_nan() || x.is_nan() || n < 0.0 {
        return f64::NAN;
    }
    if n == 0.0 {
        return if x == 0.0 { f64::NAN } else { (-x).exp() / x };
    }
    if n == 1.0 {
        return e1(x);
    }
    if x == 0.0 {
        return 1.0 / (n - 1.0);
    }
    if x < 0.0 {
        // upward recurrence n E_(n+1) = exp(-x) - x E_n
        let mut value = e1(x);
        for k in 1..n as usize {
            value = ((-x).exp() - x * value) / k as f64;
        }
        return value;
    }
    if x.is_infinite() {
        return 0.0;
    }
    if x > 1.0 {
        return lentz(x + n, |i| -i * (n - 1.0 + i)) * (-x).exp();
    }
    let nm1 = n - 1.0;
    let mut sum = 1.0 / nm1;
    let mut factor = 1.0;
    for i in 1..MAX_ITERATIONS {
        let i_f = i as f64;
        factor *= -x / i_f;
        let delta = if i_f != nm1 {
            -factor / (i_f - nm1)
        } else {
            let psi = -EULER + (1..=nm1 as usize).map(|k| 1.0 / k as f64).sum::<f64>();
            factor * (-x.ln() + psi)
        };
        sum += delta;
        if delta.abs() < sum.abs() * f64::EPSILON {
            break;
        }
    }
    sum
}

pub fn ei(x: f64) -> f64 {
    if x.is_nan() {
        f64::NAN
    } else if x < 0.0 {
        -e1(-x)
    } else if x == 0.0 {
        f64::NEG_INFINITY
    } else if x <= EI_ASYMPTOTIC {
        let mut term = 1.0;
        let mut sum = 0.0;
        for k in 1..MAX_ITERATIONS {
            let k = k as f64;
            term *= x / k;
            sum += term / k;
            if term / k < f64::EPSILON * sum {
                break;
            }
        }
        EULER + x.ln() + sum
    } else {
        let mut term = 1.0;
        let mut sum = 1.0;
        for k in 1..MAX_ITERATIONS {
            let previous = term;
            term *= k as f64 / x;
            if term < f64::EPSILON * sum || term > previous {
                break;
            }
            sum += term;
        }
        x.exp() / x * sum
    }
}

pub fn shi(x: f64) -> f64 {
    let ax = x.abs();
    let value = if ax <= HYPERBOLIC_SERIES {
        let mut term = ax;
        let mut sum = ax;
        for k in 1..MAX_ITERATIONS {
            let k = k as f64;
            term *= ax * ax / ((2.0 * k) * (2.0 * k + 1.0));
            let delta = term / (2.0 * k + 1.0);
            sum += delta;
            if delta < f64::EPSILON * sum {
                break;
            }
        }
        sum
    } else {
        0.5 * (ei(ax) + e1(ax))
    };
    value.copysign(x)
}

pub fn chi(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return f64::NEG_INFINITY;
    }
    if x > HYPERBOLIC_SERIES {
        return 0.5 * (ei(x) - e1(x));
    }
    let mut term = 1.0;
    let mut sum = 0.0;
    for k in 1..MAX_ITERATIONS {
        let k = k as f64;
        term *= x * x / ((2.0 * k - 1.0) * (2.0 * k));
        let delta = term / (2.0 * k);
        sum += delta;
        if delta < f64::EPSILON * sum {
            break;
        }
    }
    EULER + x.ln() + sum
}

/// Integral of exp(-t^3) over [0, x], which is Gamma(4/3) P(1/3, x^3).
pub fn ei3(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    gamma(4.0 / 3.0) * gamma_p(1.0 / 3.0, x * x * x)
}

/// Si and Ci of |x| together.
fn sine_cosine_integrals(ax: f64) -> (f64, f64) {
    if ax.is_infinite() {
        return (FRAC_PI_2, 0.0);
    }
    if ax > TRIGONOMETRIC_SERIES {
        // E1(ix) as a complex continued fraction
        let h = lentz(Complex64::new(1.0, ax), |i| -i * i)
            * Complex64::new(ax.cos(), -ax.sin());
        return (FRAC_PI_2 + h.im, -h.re);
    }
    let mut term = ax;
    let mut si = ax;
    for k in 1..MAX_ITERATIONS {
        let k = k as f64;
        term *= -ax * ax / ((2.0 * k) * (2.0 * k + 1.0));
        let delta = term / (2.0 * k + 1.0);
        si += delta;
        if delta.abs() < f64::EPSILON * si.abs() {
            break;
        }
    }
    if ax == 0.0 {
        return (0.0, f64::NEG_INFINITY);
    }
    let mut term = 1.0;
    let mut sum = 0.0;
    for k in 1..MAX_ITERATIONS {
        let k = k as f64;
        term *= -ax * ax / ((2.0 * k - 1.0) * (2.0 * k));
        let delta = term / (2.0 * k);
        sum += delta;
        if delta.abs() < f64::EPSILON * sum.abs() {
            break;
        }
    }
    (si, EULER + ax.ln() + sum)
}

pub fn si(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    sine_cosine_integrals(x.abs()).0.copysign(x)
}

pub fn ci(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    sine_cosine_integrals(x).1
}

/// Integral of atan(t)/t over [0, y] for |y| <= 1, by the Cohen, Rodriguez
/// Villegas and Zagier acceleration of the alternating series.
fn atanint_series(y: f64) -> f64 {
    let n = f64::from(ATANINT_TERMS);
    let d = (3.0 + 8f64.sqrt()).powi(ATANINT_TERMS);
    let d = 0.5 * (d + 1.0 / d);
    let mut b = -1.0;
    let mut c = -d;
    let mut sum = 0.0;
    for k in 0..ATANINT_TERMS {
        let k = f64::from(k);
        c = b - c;
        let odd = 2.0 * k + 1.0;
        sum += c * y.powf(odd) / (odd * odd);
        b = (k + n) * (k - n) * b / ((k + 0.5) * (k + 1.0));
    }
    sum / d
}

pub fn atanint(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let ax = x.abs();
    let value = if ax <= 1.0 {
        atanint_series(ax)
    } else {
        FRAC_PI_2 * ax.ln() + atanint_series(1.0 / ax)
    };
    value.copysign(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_relative(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance * expected.abs(),
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_exponential_integrals() {
        assert_relative(e1(0.5), 0.559_773_594_776_160_8, 1e-14);
        assert_relative(e1(10.0), 4.156_968_929_685_324e-6, 1e-14);
        assert_relative(e1(1e-8), 17.843_465_089_050_833, 1e-14);
        assert_eq!(e1(0.0), f64::INFINITY);
        assert_relative(ei(2.0), 4.954_234_356_001_89, 1e-14);
        assert_relative(ei(-3.0), -0.013_048_381_094_197_037, 1e-14);
        assert_relative(ei(50.0), 1.058_563_689_713_169_1e20, 1e-14);
        assert_eq!(e1(-3.0), -ei(3.0));
    }

    #[test]
    fn test_integer_order_exponential_integrals() {
        assert_relative(e2(1.5), 0.073_100_786_538_480_85, 1e-14);
        assert_relative(e2(-1.0), 0.823_164_012_103_108_5, 1e-14);
        assert_relative(en(5.0, 0.3), 0.168_934_413_352_616_63, 1e-14);
        assert_relative(en(3.0, 20.0), 9.009_116_813_346_401e-11, 1e-14);
        assert_eq!(en(3.0, 0.0), 0.5);
        assert_eq!(en(2.4, 1.5), e2(1.5));
        assert_eq!(en(1.0, 0.5), e1(0.5));
    }

    #[test]
    fn test_hyperbolic_integrals() {
        assert_relative(shi(1.2), 1.300_250_361_022_057, 1e-14);
        assert_relative(shi(15.0), 117_477.926_245_393_74, 1e-14);
        assert_eq!(shi(-1.2), -shi(1.2));
        assert_relative(chi(0.4), -0.298_807_450_123_168_8, 1e-14);
        assert_relative(chi(12.0), 7479.766_332_961_21, 1e-14);
        assert!(chi(-1.0).is_nan());
    }

    #[test]
    fn test_trigonometric_integrals() {
        assert_relative(si(1.0), 0.946_083_070_367_183, 1e-14);
        assert_relative(si(-7.0), -1.454_596_614_248_093_6, 1e-14);
        assert_relative(si(100.0), 1.562_225_466_889_056_3, 1e-14);
        assert_eq!(si(0.0), 0.0);
        assert_relative(ci(0.5), -0.177_784_078_806_612_9, 1e-14);
        assert_relative(ci(30.0), -0.033_032_417_282_071_14, 1e-13);
        assert_eq!(ci(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_third_order_and_arctangent_integrals() {
        assert_relative(ei3(0.8), 0.710_952_621_560_541_4, 1e-14);
        assert_relative(ei3(10.0), 0.892_979_511_569_249_2, 1e-14);
        assert!(ei3(-1.0).is_nan());
        assert_relative(atanint(0.5), 0.487_222_358_294_522_36, 1e-14);
        assert_relative(atanint(3.0), 2.055_070_116_080_589, 1e-14);
        assert_relative(atanint(-3.0), -2.055_070_116_080_589, 1e-14);
    }
}
