use super::gamma::digamma;
use super::{to_bool, Function, FunctionGroup};
use crate::ast::bool_to_f64;
use crate::symbols::SymbolTable;

const STANDARD: FunctionGroup = FunctionGroup::StandardMathematicalFunctions;
const COMPARISON: FunctionGroup = FunctionGroup::ComparisonFunctions;
const LOGICAL: FunctionGroup = FunctionGroup::LogicalFunctions;
const POWER: FunctionGroup = FunctionGroup::PowerFunction;

const EULER: f64 = 0.577_215_664_901_532_9;

const STANDARD_UNARY: &[(&str, &str, fn(f64) -> f64)] = &[
    ("ceil", "Smallest integral value not less", f64::ceil),
    ("floor", "Largest integral value not greater", f64::floor),
    ("fabs", "Absolute value", f64::abs),
    ("abs", "Absolute value", f64::abs),
    ("log10", "Base 10 logarithm", f64::log10),
    ("log2", "Base 2 logarithm", f64::log2),
    ("ln", "Natural logarithm", f64::ln),
    ("sqrt", "Nonnegative square root", f64::sqrt),
    ("sgn", "Sign function", sgn),
    ("theta", "Heavyside theta function", theta),
    ("harmonic", "Harmonic number function", harmonic),
    ("cbrt", "Cube root", f64::cbrt),
    ("logb", "Extract the exponent", logb),
    ("rint", "Round to an integer value", f64::round_ties_even),
    ("round", "Round to the nearest integer", f64::round),
    ("trunc", "Round toward zero", f64::trunc),
    ("log1p", "log(1+x)", f64::ln_1p),
    ("pow2", "x^2", pow2),
    ("pow3", "x^3", pow3),
    ("pow4", "x^4", pow4),
    ("pow5", "x^5", pow5),
    ("pow6", "x^6", pow6),
    ("pow7", "x^7", pow7),
    ("pow8", "x^8", pow8),
    ("pow9", "x^9", pow9),
];

const STANDARD_BINARY: &[(&str, &str, fn(f64, f64) -> f64)] = &[
    ("pow", "Power function [x^y]", f64::powf),
    ("roundn", "Round to n decimal places", roundn),
    ("fmod", "Remainder of x/y", fmod),
    ("powint", "x^y", powint),
];

const COMPARISON_BINARY: &[(&str, &str, fn(f64, f64) -> f64)] = &[
    ("greaterThan", "greaterThan", greater_than),
    ("lessThan", "lessThan", less_than),
    ("greaterEqualThan", "greaterEqualThan", greater_equal_than),
    ("lessEqualThan", "lessEqualThan", less_equal_than),
    ("equal", "equal", equal),
];

const RANGE_CHECKS: &[(&str, &str, fn(f64, f64, f64) -> f64)] = &[
    ("between_inc", "between with boundaries included", between_included),
    ("outside_inc", "outside with boundaries included", outside_included),
    ("between", "between with boundaries excluded", between),
    ("outside", "outside with boundaries excluded", outside),
];

const LOGICAL_BINARY: &[(&str, &str, fn(f64, f64) -> f64)] = &[
    ("and", "and", and),
    ("or", "or", or),
    ("xor", "xor", xor),
];

pub fn register(table: &mut SymbolTable) {
    for (symbol, description, f) in STANDARD_UNARY {
        table.add_function(Function::unary(symbol, description, STANDARD, *f));
    }
    for (symbol, description, f) in STANDARD_BINARY {
        table.add_function(Function::binary(symbol, description, STANDARD, *f));
    }
    table.add_function(
        Function::binary("ldexp", "x * 2^e", STANDARD, ldexp).with_parameters(&["x", "e"]),
    );

    for (symbol, description, f) in COMPARISON_BINARY {
        table.add_function(Function::binary(symbol, description, COMPARISON, *f));
    }
    table.add_function(
        Function::ternary("equalE", "equal with epsilon", COMPARISON, equal_epsilon)
            .with_parameters(&["v1", "v2", "ep"]),
    );
    for (symbol, description, f) in RANGE_CHECKS {
        table.add_function(
            Function::ternary(symbol, description, COMPARISON, *f)
                .with_parameters(&["x", "min", "max"]),
        );
    }

    table.add_function(
        Function::ternary("if", "if(condition; ifTrue; ifFalse)", LOGICAL, if_condition)
            .with_parameters(&["condition", "trueValue", "falseValue"]),
    );
    for (symbol, description, f) in LOGICAL_BINARY {
        table.add_function(Function::binary(symbol, description, LOGICAL, *f));
    }
    table.add_function(Function::unary("not", "not", LOGICAL, not));
}

pub fn register_power(table: &mut SymbolTable) {
    table.add_function(Function::binary(
        "gsl_powint",
        "x^n for integer n with an error estimate",
        POWER,
        powint,
    ));
}

pub fn sgn(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

pub fn theta(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// H(x) = psi(x + 1) + euler; summed directly for small non-negative integers.
pub fn harmonic(x: f64) -> f64 {
    if x == x.trunc() && (0.0..=64.0).contains(&x) {
        return (1..=x as u32).map(|k| 1.0 / f64::from(k)).sum();
    }
    digamma(x + 1.0) + EULER
}

/// Binary exponent of |x|, as `floor(log2(|x|))`.
pub fn logb(x: f64) -> f64 {
    x.abs().log2().floor()
}

/// Rounds half away from zero to `n` decimal places; negative `n` rounds left of the point.
pub fn roundn(value: f64, n: f64) -> f64 {
    let scale = 10f64.powi(n.abs() as i32);
    if n >= 0.0 {
        let scaled = value * scale;
        // values like 1.45 are stored slightly below the tie
        let scaled = scaled + scaled.signum() * scaled.abs().max(1.0) * 4.0 * f64::EPSILON;
        scaled.round() / scale
    } else {
        (value / scale).round() * scale
    }
}

pub fn ldexp(x: f64, e: f64) -> f64 {
    x * 2f64.powi(e.round() as i32)
}

/// x^n with n rounded to the nearest integer.
pub fn powint(x: f64, n: f64) -> f64 {
    let n = n.round();
    if n.is_nan() {
        return f64::NAN;
    }
    if n.abs() > f64::from(i32::MAX) {
        return x.powf(n);
    }
    x.powi(n as i32)
}

pub fn fmod(x: f64, y: f64) -> f64 {
    x % y
}

fn pow2(x: f64) -> f64 {
    x * x
}

fn pow3(x: f64) -> f64 {
    x.powi(3)
}

fn pow4(x: f64) -> f64 {
    x.powi(4)
}

fn pow5(x: f64) -> f64 {
    x.powi(5)
}

fn pow6(x: f64) -> f64 {
    x.powi(6)
}

fn pow7(x: f64) -> f64 {
    x.powi(7)
}

fn pow8(x: f64) -> f64 {
    x.powi(8)
}

fn pow9(x: f64) -> f64 {
    x.powi(9)
}

fn greater_than(a: f64, b: f64) -> f64 {
    bool_to_f64(a > b)
}

fn less_than(a: f64, b: f64) -> f64 {
    bool_to_f64(a < b)
}

fn greater_equal_than(a: f64, b: f64) -> f64 {
    bool_to_f64(a >= b)
}

fn less_equal_than(a: f64, b: f64) -> f64 {
    bool_to_f64(a <= b)
}

fn equal(a: f64, b: f64) -> f64 {
    bool_to_f64(a == b)
}

pub fn equal_epsilon(v1: f64, v2: f64, epsilon: f64) -> f64 {
    bool_to_f64((v2 - v1).abs() <= epsilon)
}

pub fn between_included(x: f64, min: f64, max: f64) -> f64 {
    bool_to_f64(x >= min && x <= max)
}

pub fn outside_included(x: f64, min: f64, max: f64) -> f64 {
    bool_to_f64(x <= min || x >= max)
}

pub fn between(x: f64, min: f64, max: f64) -> f64 {
    bool_to_f64(x > min && x < max)
}

pub fn outside(x: f64, min: f64, max: f64) -> f64 {
    bool_to_f64(x < min || x > max)
}

pub fn if_condition(condition: f64, if_true: f64, if_false: f64) -> f64 {
    if to_bool(condition) {
        if_true
    } else {
        if_false
    }
}

fn and(a: f64, b: f64) -> f64 {
    bool_to_f64(to_bool(a) && to_bool(b))
}

fn or(a: f64, b: f64) -> f64 {
    bool_to_f64(to_bool(a) || to_bool(b))
}

fn xor(a: f64, b: f64) -> f64 {
    bool_to_f64(to_bool(a) != to_bool(b))
}

fn not(a: f64) -> f64 {
    bool_to_f64(!to_bool(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-10 * expected.abs().max(1.0),
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_roundn() {
        assert_close(roundn(3.1415, 2.0), 3.14);
        assert_close(roundn(1.45, 1.0), 1.5);
        assert_close(roundn(-1.45, 1.0), -1.5);
        assert_close(roundn(123.45, -1.0), 120.0);
        assert_close(roundn(-123.45, 1.0), -123.5);
        assert_close(roundn(2.5, 0.0), 3.0);
    }

    #[test]
    fn test_logb() {
        assert_eq!(logb(0.1), -4.0);
        assert_eq!(logb(10.0), 3.0);
        assert_eq!(logb(-8.0), 3.0);
        assert_eq!(logb(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_rounding_modes() {
        assert_eq!(f64::round_ties_even(0.5), 0.0);
        assert_eq!(f64::round_ties_even(-1.5), -2.0);
        assert_eq!(f64::round(0.5), 1.0);
        assert_eq!(f64::round(-0.5), -1.0);
        assert_eq!(f64::trunc(-1.7), -1.0);
    }

    #[test]
    fn test_comparison_boundaries() {
        assert_eq!(between_included(1.0, 1.0, 2.0), 1.0);
        assert_eq!(between(1.0, 1.0, 2.0), 0.0);
        assert_eq!(outside_included(2.0, 1.0, 2.0), 1.0);
        assert_eq!(outside(2.0, 1.0, 2.0), 0.0);
        assert_eq!(equal_epsilon(1.0, 1.05, 0.1), 1.0);
        assert_eq!(equal_epsilon(1.0, 1.5, 0.1), 0.0);
    }

    #[test]
    fn test_if_condition_treats_nonzero_as_true() {
        assert_eq!(if_condition(-0.5, 1.0, 2.0), 1.0);
        assert_eq!(if_condition(0.0, 1.0, 2.0), 2.0);
    }

    #[test]
    fn test_sign_theta_harmonic() {
        assert_eq!(sgn(-3.0), -1.0);
        assert_eq!(sgn(0.0), 0.0);
        assert_eq!(theta(0.0), 1.0);
        assert_eq!(theta(-1e-9), 0.0);
        assert_close(harmonic(3.0), 1.0 + 0.5 + 1.0 / 3.0);
        assert_close(harmonic(0.5), 2.0 - 2.0 * std::f64::consts::LN_2);
    }

    #[test]
    fn test_logical_functions() {
        assert_eq!(xor(1.0, 0.0), 1.0);
        assert_eq!(xor(2.0, 3.0), 0.0);
        assert_eq!(and(1.0, 0.0), 0.0);
        assert_eq!(or(0.0, -1.0), 1.0);
        assert_eq!(not(1.0), 0.0);
        assert_eq!(not(0.0), 1.0);
    }

    #[test]
    fn test_integer_powers() {
        assert_eq!(powint(2.0, 10.0), 1024.0);
        assert_eq!(ldexp(3.0, 2.0), 12.0);
        assert_eq!(powint(2.0, -1.0), 0.5);
        assert_eq!(powint(3.0, 1.6), 9.0);
        assert!(powint(2.0, f64::NAN).is_nan());
    }
}
