//! Double exponential quadrature for the integral representations.
//!
//! Both rules halve the step until two successive levels agree to about
//! machine precision.

use std::f64::consts::FRAC_PI_2;

/// Nodes are generated for |t| <= T_MAX.
const T_MAX: f64 = 4.5;
const MAX_LEVELS: usize = 10;
const MIN_LEVELS: usize = 3;
const TOLERANCE: f64 = 1e-15;

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Refines a trapezoid sum over t until it settles. `level_sum(h, first)`
/// returns the contributions of the nodes new at step `h`.
fn refine(mut level_sum: impl FnMut(f64, bool) -> f64) -> f64 {
    let mut h = 1.0;
    let mut sum = level_sum(h, true);
    let mut integral = h * sum;
    for level in 1..MAX_LEVELS {
        h /= 2.0;
        sum += level_sum(h, false);
        let next = h * sum;
        if level >= MIN_LEVELS && (next - integral).abs() <= TOLERANCE * next.abs() {
            return next;
        }
        integral = next;
    }
    integral
}

/// Integral of `f` over [a, b] by the tanh-sinh rule. The integrand gets the
/// abscissa together with its distances to both ends, so that endpoint
/// singularities can be evaluated without cancellation.
pub(crate) fn tanh_sinh(f: impl Fn(f64, f64, f64) -> f64, a: f64, b: f64) -> f64 {
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);
    let node = |t: f64| -> f64 {
        if t == 0.0 {
            return half * FRAC_PI_2 * finite(f(center, half, half));
        }
        let u = FRAC_PI_2 * t.sinh();
        let e = (-2.0 * u).exp();
        let distance = half * 2.0 * e / (1.0 + e);
        let weight = half * FRAC_PI_2 * t.cosh() * 4.0 * e / ((1.0 + e) * (1.0 + e));
        if distance == 0.0 || weight == 0.0 {
            return 0.0;
        }
        let far = 2.0 * half - distance;
        weight * (finite(f(a + distance, distance, far)) + finite(f(b - distance, far, distance)))
    };
    refine(|h, first| {
        if first {
            let n = (T_MAX / h) as usize;
            (0..=n).map(|k| node(k as f64 * h)).sum()
        } else {
            let n = (T_MAX / h / 2.0) as usize;
            (0..=n).map(|k| node((2 * k + 1) as f64 * h)).sum()
        }
    })
}

/// Integral of `f` over [a, inf) by the exp-sinh rule.
pub(crate) fn exp_sinh(f: impl Fn(f64) -> f64, a: f64) -> f64 {
    let node = |t: f64| -> f64 {
        let u = FRAC_PI_2 * t.sinh();
        if u > 700.0 {
            return 0.0;
        }
        let x = u.exp();
        finite(FRAC_PI_2 * t.cosh() * x * f(a + x))
    };
    refine(|h, first| {
        let n = (T_MAX / h) as i64;
        (-n..=n)
            .filter(|k| first || k % 2 != 0)
            .map(|k| node(k as f64 * h))
            .sum()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_and_singular_integrands() {
        let polynomial = tanh_sinh(|x, _, _| x * x, 0.0, 3.0);
        assert!((polynomial - 9.0).abs() < 1e-13);

        // integral of 1/sqrt(x) over [0, 1], singular at the left end
        let singular = tanh_sinh(|_, left, _| 1.0 / left.sqrt(), 0.0, 1.0);
        assert!((singular - 2.0).abs() < 1e-12);

        // log singularity at the right end
        let log = tanh_sinh(|_, _, right| right.ln(), 0.0, 1.0);
        assert!((log + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_half_line() {
        let exponential = exp_sinh(|x| (-x).exp(), 0.0);
        assert!((exponential - 1.0).abs() < 1e-13);

        let shifted = exp_sinh(|x| (-x).exp(), 2.0);
        assert!((shifted - (-2.0f64).exp()).abs() < 1e-14);

        let rational = exp_sinh(|x| 1.0 / (1.0 + x * x), 0.0);
        assert!((rational - FRAC_PI_2).abs() < 1e-10);
    }
}
