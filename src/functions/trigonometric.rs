use super::{Function, FunctionGroup};
use crate::symbols::SymbolTable;
use std::f64::consts::{LN_2, PI, TAU};

const TRIGONOMETRIC: FunctionGroup = FunctionGroup::TrigonometricFunctions;

const UNARY: &[(&str, &str, fn(f64) -> f64)] = &[
    ("sin", "Sine", f64::sin),
    ("cos", "Cosine", f64::cos),
    ("tan", "Tangent", f64::tan),
    ("asin", "Inverse sine", f64::asin),
    ("acos", "Inverse cosine", f64::acos),
    ("atan", "Inverse tangent", f64::atan),
    ("sinh", "Hyperbolic sine", f64::sinh),
    ("cosh", "Hyperbolic cosine", f64::cosh),
    ("tanh", "Hyperbolic tangent", f64::tanh),
    ("acosh", "Inverse hyperbolic cosine", f64::acosh),
    ("asinh", "Inverse hyperbolic sine", f64::asinh),
    ("atanh", "Inverse hyperbolic tangent", f64::atanh),
    ("sec", "Secant", sec),
    ("csc", "Cosecant", csc),
    ("cot", "Cotangent", cot),
    ("asec", "Inverse secant", asec),
    ("acsc", "Inverse cosecant", acsc),
    ("acot", "Inverse cotangent", acot),
    ("sech", "Hyperbolic secant", sech),
    ("csch", "Hyperbolic cosecant", csch),
    ("coth", "Hyperbolic cotangent", coth),
    ("asech", "Inverse hyperbolic secant", asech),
    ("acsch", "Inverse hyperbolic cosecant", acsch),
    ("acoth", "Inverse hyperbolic cotangent", acoth),
    ("sinc", "Normalized sinc function sin(pi x)/(pi x)", sinc),
    ("logsinh", "log(sinh(x))", log_sinh),
    ("logcosh", "log(cosh(x))", log_cosh),
    ("anglesymm", "restrict to [-pi,pi]", angle_symmetric),
    ("anglepos", "restrict to [0,2 pi]", angle_positive),
];

pub fn register(table: &mut SymbolTable) {
    for (symbol, description, f) in UNARY {
        table.add_function(Function::unary(symbol, description, TRIGONOMETRIC, *f));
    }
    table.add_function(Function::binary(
        "atan2",
        "Inverse tangent using sign",
        TRIGONOMETRIC,
        f64::atan2,
    ));
    table.add_function(Function::binary("hypot", "Hypotenuse function", TRIGONOMETRIC, f64::hypot));
    table.add_function(Function::ternary(
        "hypot3",
        "Three component hypotenuse function",
        TRIGONOMETRIC,
        hypot3,
    ));
}

pub fn sec(x: f64) -> f64 {
    1.0 / x.cos()
}

pub fn csc(x: f64) -> f64 {
    1.0 / x.sin()
}

pub fn cot(x: f64) -> f64 {
    1.0 / x.tan()
}

pub fn asec(x: f64) -> f64 {
    (1.0 / x).acos()
}

pub fn acsc(x: f64) -> f64 {
    (1.0 / x).asin()
}

pub fn acot(x: f64) -> f64 {
    (1.0 / x).atan()
}

pub fn sech(x: f64) -> f64 {
    1.0 / x.cosh()
}

pub fn csch(x: f64) -> f64 {
    1.0 / x.sinh()
}

pub fn coth(x: f64) -> f64 {
    1.0 / x.tanh()
}

pub fn asech(x: f64) -> f64 {
    (1.0 / x).acosh()
}

pub fn acsch(x: f64) -> f64 {
    (1.0 / x).asinh()
}

pub fn acoth(x: f64) -> f64 {
    (1.0 / x).atanh()
}

pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let px = PI * x;
    px.sin() / px
}

/// Defined for x > 0 only.
pub fn log_sinh(x: f64) -> f64 {
    if x <= 0.0 {
        return f64::NAN;
    }
    x + (-(-2.0 * x).exp()).ln_1p() - LN_2
}

pub fn log_cosh(x: f64) -> f64 {
    let x = x.abs();
    x + (-2.0 * x).exp().ln_1p() - LN_2
}

/// Restricts an angle to (-pi, pi].
pub fn angle_symmetric(theta: f64) -> f64 {
    let reduced = theta - TAU * (theta / TAU).round();
    if reduced <= -PI {
        reduced + TAU
    } else {
        reduced
    }
}

/// Restricts an angle to [0, 2 pi).
pub fn angle_positive(theta: f64) -> f64 {
    let reduced = theta.rem_euclid(TAU);
    if reduced >= TAU {
        0.0
    } else {
        reduced
    }
}

pub fn hypot3(x: f64, y: f64, z: f64) -> f64 {
    x.hypot(y).hypot(z)
}
