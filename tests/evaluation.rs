use plotexpr_rs::{evaluate_expression, Bindings, EquationType, ExprError, ExpressionParser};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-12 * expected.abs().max(1.0),
        "expected {}, got {}",
        expected,
        actual
    );
}

fn eval(expression: &str) -> f64 {
    ExpressionParser::new()
        .evaluate(expression)
        .unwrap_or_else(|err| panic!("{}: {}", expression, err))
}

#[test]
fn test_operator_precedence() {
    assert_eq!(eval("1 + 2 * 3"), 7.0);
    assert_eq!(eval("(1 + 2) * 3"), 9.0);
    assert_eq!(eval("-2^2"), -4.0);
    assert_eq!(eval("2^3^2"), 512.0);
    assert_eq!(eval("2**3"), 8.0);
    assert_eq!(eval("7 % 4"), 3.0);
    assert_eq!(eval("1 || 0 && 0"), 1.0);
    assert_eq!(eval("(1 || 0) && 0"), 0.0);
    assert_eq!(eval("1 + 1 == 2"), 1.0);
    assert_eq!(eval("!(3 > 2)"), 0.0);
}

#[test]
fn test_literals_and_separators() {
    assert_eq!(eval(".5 + 3."), 3.5);
    assert_eq!(eval("2.5E+4"), 25000.0);
    assert_eq!(eval("1e-3 * 1000"), 1.0);
    assert_eq!(eval("pow(2; 10)"), 1024.0);
    assert_eq!(eval("pow(2, 10)"), 1024.0);
    assert_eq!(eval("  if ( 0.5 ; 1 ; 2 ) "), 1.0);
}

#[test]
fn test_comparison_and_logical_functions() {
    assert_eq!(eval("greaterThan(2; 1)"), 1.0);
    assert_eq!(eval("lessEqualThan(2; 1)"), 0.0);
    assert_eq!(eval("between_inc(1; 1; 2)"), 1.0);
    assert_eq!(eval("outside(1; 1; 2)"), 0.0);
    assert_eq!(eval("equalE(1; 1.05; 0.1)"), 1.0);
    assert_eq!(eval("xor(1; 1)"), 0.0);
    assert_eq!(eval("not(0)"), 1.0);
}

#[test]
fn test_rounding_edge_values() {
    assert_close(eval("roundn(3.1415; 2)"), 3.14);
    assert_close(eval("roundn(123.45; -1)"), 120.0);
    assert_eq!(eval("logb(0.1)"), -4.0);
    assert_eq!(eval("logb(10)"), 3.0);
    assert_eq!(eval("rint(2.5)"), 2.0);
    assert_eq!(eval("rint(3.5)"), 4.0);
    assert_eq!(eval("round(-2.5)"), -3.0);
    assert_eq!(eval("trunc(-1.7)"), -1.0);
    assert_eq!(eval("log2(8)"), 3.0);
}

#[test]
fn test_parse_is_idempotent() {
    let mut parser = ExpressionParser::new();
    parser.assign_variable("a", 1.25);
    let first = parser.parse("a*exp(a) - gamma(a)");
    let second = parser.parse("a*exp(a) - gamma(a)");
    assert_eq!(first.to_bits(), second.to_bits());
    assert_eq!(parser.parse_errors(), 0);
}

#[test]
fn test_constant_round_trip() {
    let mut parser = ExpressionParser::new();
    let symbols = parser.symbols();
    let names: Vec<String> = symbols.constants().iter().map(|s| s.to_string()).collect();
    let values: Vec<f64> = names
        .iter()
        .map(|name| symbols.constant(name).map(|c| c.value).unwrap_or(f64::NAN))
        .collect();
    for (name, expected) in names.iter().zip(values) {
        let value = parser.parse(name);
        if expected.is_nan() {
            assert!(value.is_nan(), "{}", name);
        } else {
            assert_eq!(value, expected, "{}", name);
        }
    }
}

#[test]
fn test_errors_are_recorded() {
    let mut parser = ExpressionParser::new();
    assert!(parser.parse("foo + 1").is_nan());
    assert_eq!(parser.parse_errors(), 1);
    assert!(matches!(
        parser.last_error(),
        Some(ExprError::UnknownIdentifier { name, position: 0 }) if name == "foo"
    ));

    assert!(parser.parse("1 + (2").is_nan());
    assert!(matches!(parser.last_error(), Some(ExprError::Syntax { .. })));

    assert!(parser.parse("sin(1; 2)").is_nan());
    assert!(matches!(
        parser.last_error(),
        Some(ExprError::ArgumentCount {
            expected: 1,
            found: 2,
            ..
        })
    ));

    assert_eq!(parser.parse("1 + 1"), 2.0);
    assert_eq!(parser.parse_errors(), 0);
    assert!(parser.last_error().is_none());
}

#[test]
fn test_ieee_results_are_not_errors() {
    let mut parser = ExpressionParser::new();
    assert_eq!(parser.parse("1/0"), f64::INFINITY);
    assert!(parser.parse("sqrt(-1)").is_nan());
    assert!(parser.parse("nan").is_nan());
    assert_eq!(parser.parse_errors(), 0);
}

#[test]
fn test_contexts_are_independent() {
    let handles: Vec<_> = (0..4)
        .map(|n| {
            std::thread::spawn(move || {
                let mut parser = ExpressionParser::new();
                parser.assign_variable("x", n as f64);
                (0..200)
                    .map(|_| parser.parse("x*10"))
                    .all(|value| value == n as f64 * 10.0)
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap_or(false));
    }
}

#[test]
fn test_one_shot_evaluation() {
    let value = evaluate_expression("a*b + pi", [("a", 2.0), ("b", 3.0)]).unwrap();
    assert_close(value, 6.0 + std::f64::consts::PI);

    let bindings: Bindings = [("x", 4.0)].into_iter().collect();
    assert_eq!(evaluate_expression("sqrt(x)", &bindings).unwrap(), 2.0);
    assert!(evaluate_expression("y", Bindings::new().iter()).is_err());
}

#[test]
fn test_validation_and_parameters() {
    let mut parser = ExpressionParser::new();
    assert!(parser.is_valid("sin(x) + 1", EquationType::Cartesian));
    assert!(parser.is_valid("cos(phi)", EquationType::Polar));
    assert!(!parser.is_valid("sin(t)", EquationType::Cartesian));
    assert!(parser.is_valid_with("cell(i; x) + y", &["x", "y"]));
    assert!(parser.bindings().is_empty());

    assert_eq!(
        parser.get_parameter("a*x^2 + b*x + a + 2*pi", &["x"]),
        vec!["a".to_string(), "b".to_string()]
    );
}

#[test]
fn test_special_function_catalog() {
    assert_close(eval("Ai(0)"), 0.355_028_053_887_817_2);
    assert_close(eval("Jnu(0.5; 1)"), (2.0 / std::f64::consts::PI).sqrt() * 1f64.sin());
    assert_close(eval("hyperg_2F1(1; 1; 2; 0.5)"), -2.0 * 0.5f64.ln());
    assert_close(eval("RF(0; 1; 2)"), 1.311_028_777_146_059_9);
    assert_close(eval("expreln(1; 2)"), 2f64.exp_m1() / 2.0);
    assert_eq!(eval("gsl_powint(3; 4)"), 81.0);
    assert_eq!(eval("D1(0)"), 1.0);
    assert_close(eval("Fm1(0)"), 0.5);
    assert_close(eval("hydrogenicR_1(1; 0)"), 2.0);
    assert_close(eval("landau(0)"), 0.178_854_160_675_249_44);
    assert_close(eval("poisson(1.6; 3)"), eval("poisson(2; 3)"));
    assert_close(eval("hypergeometric(2; 5; 7; 4)"), 14.0 / 33.0);
    assert!(eval("synchrotron1(1)") > 0.0);
}

#[test]
fn test_random_numbers_with_huge_parameters() {
    let value = eval("randpoisson(1e300)");
    assert!(value.is_finite() && value > 0.0);
    assert!(eval("randgamma(2; 1e300)").is_finite());
}
