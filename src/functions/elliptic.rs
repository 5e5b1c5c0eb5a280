//! Elliptic integrals in Legendre form, reduced to Carlson's symmetric
//! integrals RC, RD, RF and RJ, which are evaluated by duplication.
//!
//! The Legendre forms take the modulus k (not the parameter m = k^2) and the
//! characteristic n enters with a plus sign: Pi(n, k) integrates
//! 1 / ((1 + n sin^2 t) sqrt(1 - k^2 sin^2 t)).

use super::{Function, FunctionGroup};
use crate::symbols::SymbolTable;
use std::f64::consts::PI;

const ELLIPTIC: FunctionGroup = FunctionGroup::EllipticIntegrals;

const MAX_ITERATIONS: usize = 10_000;
const RC_TOLERANCE: f64 = 0.0012;
const RF_TOLERANCE: f64 = 0.0025;
const RD_TOLERANCE: f64 = 0.0015;
const RJ_TOLERANCE: f64 = 0.0015;

pub fn register(table: &mut SymbolTable) {
    let entries = [
        Function::unary("Kc", "Legendre form of complete elliptic integral K", ELLIPTIC, kc),
        Function::unary("Ec", "Legendre form of complete elliptic integral E", ELLIPTIC, ec),
        Function::binary("Pc", "Legendre form of complete elliptic integral Pi", ELLIPTIC, pc)
            .with_parameters(&["k", "n"]),
        Function::binary("F", "Legendre form of incomplete elliptic integral F", ELLIPTIC, f)
            .with_parameters(&["phi", "k"]),
        Function::binary("E", "Legendre form of incomplete elliptic integral E", ELLIPTIC, e)
            .with_parameters(&["phi", "k"]),
        Function::ternary("P", "Legendre form of incomplete elliptic integral P", ELLIPTIC, p)
            .with_parameters(&["phi", "k", "n"]),
        Function::binary("D", "Legendre form of incomplete elliptic integral D", ELLIPTIC, d)
            .with_parameters(&["phi", "k"]),
        Function::binary("RC", "Carlson form of incomplete elliptic integral RC", ELLIPTIC, rc),
        Function::ternary("RD", "Carlson form of incomplete elliptic integral RD", ELLIPTIC, rd),
        Function::ternary("RF", "Carlson form of incomplete elliptic integral RF", ELLIPTIC, rf),
        Function::quaternary(
            "RJ",
            "Carlson form of incomplete elliptic integral RJ",
            ELLIPTIC,
            rj,
        ),
    ];
    for entry in entries {
        table.add_function(entry);
    }
}

/// RC(x, y) for x >= 0, y > 0.
pub fn rc(mut x: f64, mut y: f64) -> f64 {
    if !(x >= 0.0 && y > 0.0) || x.is_infinite() || y.is_infinite() {
        return f64::NAN;
    }
    for _ in 0..MAX_ITERATIONS {
        let mean = (x + 2.0 * y) / 3.0;
        let s = (y - mean) / mean;
        if s.abs() < RC_TOLERANCE {
            let series = 1.0 + s * s * (0.3 + s * (1.0 / 7.0 + s * (0.375 + s * 9.0 / 22.0)));
            return series / mean.sqrt();
        }
        let lambda = 2.0 * x.sqrt() * y.sqrt() + y;
        x = 0.25 * (x + lambda);
        y = 0.25 * (y + lambda);
    }
    f64::NAN
}

fn at_most_one_zero(x: f64, y: f64, z: f64) -> bool {
    [x, y, z].iter().filter(|&&v| v == 0.0).count() <= 1
}

fn valid(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite() && *v >= 0.0)
}

/// RF(x, y, z) for non-negative arguments, at most one of them zero.
pub fn rf(mut x: f64, mut y: f64, mut z: f64) -> f64 {
    if !valid(&[x, y, z]) || !at_most_one_zero(x, y, z) {
        return f64::NAN;
    }
    for _ in 0..MAX_ITERATIONS {
        let mean = (x + y + z) / 3.0;
        let (dx, dy, dz) = ((mean - x) / mean, (mean - y) / mean, (mean - z) / mean);
        if dx.abs().max(dy.abs()).max(dz.abs()) < RF_TOLERANCE {
            let e2 = dx * dy - dz * dz;
            let e3 = dx * dy * dz;
            return (1.0 + (e2 / 24.0 - 0.1 - 3.0 * e3 / 44.0) * e2 + e3 / 14.0) / mean.sqrt();
        }
        let (sx, sy, sz) = (x.sqrt(), y.sqrt(), z.sqrt());
        let lambda = sx * (sy + sz) + sy * sz;
        x = 0.25 * (x + lambda);
        y = 0.25 * (y + lambda);
        z = 0.25 * (z + lambda);
    }
    f64::NAN
}

/// RD(x, y, z) for x, y >= 0 with x + y > 0 and z > 0.
pub fn rd(mut x: f64, mut y: f64, mut z: f64) -> f64 {
    if !valid(&[x, y, z]) || x + y == 0.0 || z == 0.0 {
        return f64::NAN;
    }
    let mut sum = 0.0;
    let mut factor = 1.0;
    for _ in 0..MAX_ITERATIONS {
        let mean = 0.2 * (x + y + 3.0 * z);
        let (dx, dy, dz) = ((mean - x) / mean, (mean - y) / mean, (mean - z) / mean);
        if dx.abs().max(dy.abs()).max(dz.abs()) < RD_TOLERANCE {
            const C1: f64 = 3.0 / 14.0;
            const C2: f64 = 1.0 / 6.0;
            const C3: f64 = 9.0 / 22.0;
            const C4: f64 = 3.0 / 26.0;
            const C5: f64 = 0.25 * C3;
            const C6: f64 = 1.5 * C4;
            let ea = dx * dy;
            let eb = dz * dz;
            let ec = ea - eb;
            let ed = ea - 6.0 * eb;
            let ee = ed + ec + ec;
            let series = 1.0
                + ed * (-C1 + C5 * ed - C6 * dz * ee)
                + dz * (C2 * ee + dz * (-C3 * ec + dz * C4 * ea));
            return 3.0 * sum + factor * series / (mean * mean.sqrt());
        }
        let (sx, sy, sz) = (x.sqrt(), y.sqrt(), z.sqrt());
        let lambda = sx * (sy + sz) + sy * sz;
        sum += factor / (sz * (z + lambda));
        factor *= 0.25;
        x = 0.25 * (x + lambda);
        y = 0.25 * (y + lambda);
        z = 0.25 * (z + lambda);
    }
    f64::NAN
}

/// RJ(x, y, z, p) for non-negative x, y, z (at most one zero) and p > 0.
pub fn rj(mut x: f64, mut y: f64, mut z: f64, mut p: f64) -> f64 {
    if !valid(&[x, y, z, p]) || !at_most_one_zero(x, y, z) || p == 0.0 {
        return f64::NAN;
    }
    let mut sum = 0.0;
    let mut factor = 1.0;
    for _ in 0..MAX_ITERATIONS {
        let mean = 0.2 * (x + y + z + 2.0 * p);
        let (dx, dy, dz) = ((mean - x) / mean, (mean - y) / mean, (mean - z) / mean);
        let dp = (mean - p) / mean;
        if dx.abs().max(dy.abs()).max(dz.abs()).max(dp.abs()) < RJ_TOLERANCE {
            const C1: f64 = 3.0 / 14.0;
            const C2: f64 = 1.0 / 3.0;
            const C3: f64 = 3.0 / 22.0;
            const C4: f64 = 3.0 / 26.0;
            const C5: f64 = 0.75 * C3;
            const C6: f64 = 1.5 * C4;
            const C7: f64 = 0.5 * C2;
            const C8: f64 = C3 + C3;
            let ea = dx * (dy + dz) + dy * dz;
            let eb = dx * dy * dz;
            let ec = dp * dp;
            let ed = ea - 3.0 * ec;
            let ee = eb + 2.0 * dp * (ea - ec);
            let series = 1.0
                + ed * (-C1 + C5 * ed - C6 * ee)
                + eb * (C7 + dp * (-C8 + dp * C4))
                + dp * ea * (C2 - dp * C3)
                - C2 * dp * ec;
            return 3.0 * sum + factor * series / (mean * mean.sqrt());
        }
        let (sx, sy, sz) = (x.sqrt(), y.sqrt(), z.sqrt());
        let lambda = sx * (sy + sz) + sy * sz;
        let alpha = (p * (sx + sy + sz) + sx * sy * sz).powi(2);
        let beta = p * (p + lambda).powi(2);
        sum += factor * rc(alpha, beta);
        factor *= 0.25;
        x = 0.25 * (x + lambda);
        y = 0.25 * (y + lambda);
        z = 0.25 * (z + lambda);
        p = 0.25 * (p + lambda);
    }
    f64::NAN
}

/// 1 - k^2, or None outside the open interval |k| < 1.
fn complementary(k: f64) -> Option<f64> {
    let m = k * k;
    if m < 1.0 {
        Some(1.0 - m)
    } else {
        None
    }
}

pub fn kc(k: f64) -> f64 {
    complementary(k).map_or(f64::NAN, |y| rf(0.0, y, 1.0))
}

pub fn ec(k: f64) -> f64 {
    complementary(k).map_or(f64::NAN, |y| rf(0.0, y, 1.0) - k * k / 3.0 * rd(0.0, y, 1.0))
}

pub fn pc(k: f64, n: f64) -> f64 {
    complementary(k)
        .map_or(f64::NAN, |y| rf(0.0, y, 1.0) - n / 3.0 * rj(0.0, y, 1.0, 1.0 + n))
}

fn dc(k: f64) -> f64 {
    complementary(k).map_or(f64::NAN, |y| rd(0.0, y, 1.0) / 3.0)
}

/// Splits phi into n pi + r with |r| <= pi/2; each full period adds twice
/// the complete integral.
fn reduce(phi: f64) -> (f64, f64) {
    let periods = (phi / PI + 0.5).floor();
    (periods, phi - periods * PI)
}

fn incomplete(
    phi: f64,
    k: f64,
    partial: impl Fn(f64, f64, f64) -> f64,
    complete: impl Fn() -> f64,
) -> f64 {
    if phi.is_nan() || k.is_nan() || phi.is_infinite() {
        return f64::NAN;
    }
    let (periods, reduced) = reduce(phi);
    let (s, c) = reduced.sin_cos();
    let delta = 1.0 - k * k * s * s;
    let value = partial(s, c * c, delta);
    if periods == 0.0 {
        value
    } else {
        2.0 * periods * complete() + value
    }
}

pub fn f(phi: f64, k: f64) -> f64 {
    incomplete(phi, k, |s, c2, delta| s * rf(c2, delta, 1.0), || kc(k))
}

pub fn e(phi: f64, k: f64) -> f64 {
    incomplete(
        phi,
        k,
        |s, c2, delta| s * rf(c2, delta, 1.0) - k * k * s.powi(3) / 3.0 * rd(c2, delta, 1.0),
        || ec(k),
    )
}

pub fn p(phi: f64, k: f64, n: f64) -> f64 {
    incomplete(
        phi,
        k,
        |s, c2, delta| {
            s * rf(c2, delta, 1.0) - n * s.powi(3) / 3.0 * rj(c2, delta, 1.0, 1.0 + n * s * s)
        },
        || pc(k, n),
    )
}

pub fn d(phi: f64, k: f64) -> f64 {
    incomplete(phi, k, |s, c2, delta| s.powi(3) / 3.0 * rd(c2, delta, 1.0), || dc(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-14 * expected.abs(),
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_carlson_integrals() {
        assert_close(rc(1.0, 2.0), std::f64::consts::FRAC_PI_4);
        assert_close(rc(0.0, 0.25), PI);
        assert_close(rd(0.0, 2.0, 1.0), 1.797_210_352_103_388_3);
        assert_close(rf(1.0, 2.0, 0.0), 1.311_028_777_146_06);
        assert_close(rj(2.0, 3.0, 4.0, 5.0), 0.142_975_796_671_567_54);
        assert!(rf(0.0, 0.0, 1.0).is_nan());
        assert!(rd(1.0, 1.0, 0.0).is_nan());
        assert!(rc(-1.0, 1.0).is_nan());
    }

    #[test]
    fn test_complete_integrals() {
        assert_close(kc(0.5), 1.685_750_354_812_596);
        assert_close(kc(0.99), 3.356_600_523_361_191_7);
        assert_close(ec(0.5), 1.467_462_209_339_427_2);
        assert_close(pc(0.5, 0.3), 1.471_568_193_985_963_5);
        assert_close(kc(0.0), std::f64::consts::FRAC_PI_2);
        assert!(kc(1.0).is_nan());
    }

    #[test]
    fn test_incomplete_integrals() {
        assert_close(f(1.0, 0.7), 1.081_169_465_627_511_3);
        assert_close(e(1.0, 0.7), 0.928_886_268_386_169_1);
        assert_close(p(1.0, 0.7, 0.4), 0.975_949_645_561_023_6);
        assert_close(d(1.0, 0.7), 0.310_782_035_186_412_65);
        assert_eq!(f(0.0, 0.7), 0.0);
    }

    #[test]
    fn test_amplitude_beyond_half_period() {
        assert_close(f(4.0, 0.7), 4.601_520_520_826_52);
        assert_close(e(-4.0, 0.7), -3.522_968_385_972_598_6);
        assert_close(p(5.0, 0.7, 0.4), 4.900_904_280_589_050_4);
        assert_close(d(4.0, 0.7), 2.201_126_805_824_329_6);
    }
}
