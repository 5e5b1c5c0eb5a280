use super::gamma::ln_gamma;
use super::{Function, FunctionGroup};
use crate::symbols::SymbolTable;

const EXPONENTIAL: FunctionGroup = FunctionGroup::ExponentialFunctions;
const LOGARITHM: FunctionGroup = FunctionGroup::LogarithmAndRelatedFunctions;

pub fn register(table: &mut SymbolTable) {
    table.add_function(Function::unary("exp", "Exponential function", EXPONENTIAL, f64::exp));
    table.add_function(Function::binary(
        "exp_mult",
        "exponentiate x and multiply by y",
        EXPONENTIAL,
        exp_mult,
    ));
    table.add_function(Function::unary("expm1", "exp(x) - 1", EXPONENTIAL, f64::exp_m1));
    table.add_function(Function::unary("exprel", "(exp(x)-1)/x", EXPONENTIAL, exprel));
    table.add_function(Function::unary("exprel2", "2(exp(x)-1-x)/x^2", EXPONENTIAL, exprel2));
    table.add_function(Function::binary(
        "expreln",
        "n-relative exponential",
        EXPONENTIAL,
        exprel_n,
    ));
}

pub fn register_logarithms(table: &mut SymbolTable) {
    table.add_function(Function::unary("log", "Logarithm", LOGARITHM, log));
    table.add_function(Function::unary("logabs", "Logarithm of the magnitude", LOGARITHM, log_abs));
    table.add_function(Function::unary("logp", "log(1+x)", LOGARITHM, f64::ln_1p));
    table.add_function(Function::unary("logpm", "log(1+x) - x", LOGARITHM, log_1p_mx));
}

pub fn exp_mult(x: f64, y: f64) -> f64 {
    y * x.exp()
}

pub fn exprel(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        x.exp_m1() / x
    }
}

pub fn exprel2(x: f64) -> f64 {
    if x.abs() < 1e-3 {
        return 1.0 + x / 3.0 * (1.0 + x / 4.0 * (1.0 + x / 5.0));
    }
    2.0 * (x.exp_m1() - x) / (x * x)
}

/// n!/x^n (exp(x) - sum_(k<n) x^k/k!), the confluent 1F1(1, 1+n, x); n is rounded.
pub fn exprel_n(n: f64, x: f64) -> f64 {
    let n = n.round();
    if n.is_nan() || x.is_nan() || n < 0.0 {
        return f64::NAN;
    }
    if n == 0.0 {
        return x.exp();
    }
    if x.abs() <= n {
        let mut term: f64 = 1.0;
        let mut sum: f64 = 1.0;
        let mut k = n;
        while term.abs() > f64::EPSILON * sum.abs() {
            k += 1.0;
            term *= x / k;
            sum += term;
        }
        return sum;
    }
    // leading n! x^-n exp(x) minus the finite tail sum_j n!/(n-j)! x^-j
    let odd = n % 2.0 == 1.0;
    let magnitude = (x + ln_gamma(n + 1.0) - n * x.abs().ln()).exp();
    let leading = if x < 0.0 && odd { -magnitude } else { magnitude };
    let mut term = 1.0;
    let mut tail = 0.0;
    let mut j = 0.0;
    while j < n && term != 0.0 {
        term *= (n - j) / x;
        tail += term;
        j += 1.0;
    }
    leading - tail
}

/// Natural logarithm; NaN outside (0, inf).
pub fn log(x: f64) -> f64 {
    if x <= 0.0 {
        f64::NAN
    } else {
        x.ln()
    }
}

pub fn log_abs(x: f64) -> f64 {
    log(x.abs())
}

pub fn log_1p_mx(x: f64) -> f64 {
    if x.abs() < 1e-4 {
        return x * x * (-0.5 + x * (1.0 / 3.0 - x / 4.0));
    }
    x.ln_1p() - x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-12 * expected.abs().max(1e-300),
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_relative_exponentials() {
        assert_eq!(exprel(0.0), 1.0);
        assert_close(exprel(1.0), std::f64::consts::E - 1.0);
        assert_close(exprel2(1.0), 2.0 * (std::f64::consts::E - 2.0));
        assert_close(exprel2(1e-5), 1.0 + 1e-5 / 3.0);
        assert_close(exp_mult(2.0, 3.0), 3.0 * 2f64.exp());
    }

    #[test]
    fn test_n_relative_exponential() {
        assert_eq!(exprel_n(0.0, 1.5), 1.5f64.exp());
        assert_close(exprel_n(1.0, 2.0), exprel(2.0));
        assert_close(exprel_n(2.0, 0.3), exprel2(0.3));
        assert_close(exprel_n(2.0, 30.0), exprel2(30.0));
        assert_close(exprel_n(3.0, -40.0), 0.071_343_75);
        assert_close(exprel_n(5.0, 4.0), 2.374_783_207_009_090_5);
        assert_eq!(exprel_n(2.4, 7.0), exprel_n(2.0, 7.0));
        assert!(exprel_n(-1.0, 1.0).is_nan());
    }

    #[test]
    fn test_logarithms() {
        assert!(log(0.0).is_nan());
        assert!(log(-1.0).is_nan());
        assert_close(log_abs(-std::f64::consts::E), 1.0);
        assert_close(log_1p_mx(0.5), 1.5f64.ln() - 0.5);
        assert_close(log_1p_mx(1e-6), -0.5e-12 + 1e-18 / 3.0);
    }
}
