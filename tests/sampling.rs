use plotexpr_rs::{EquationData, EquationType, ExprError, ExpressionParser, ParserConfig, Range};

fn quiet_parser() -> ExpressionParser {
    let _ = pretty_env_logger::try_init();
    ExpressionParser::with_config(ParserConfig {
        log_nan_samples: false,
        ..Default::default()
    })
}

#[test]
fn test_cartesian_samples_form_a_progression() {
    let mut parser = quiet_parser();
    let count = 101;
    let mut x = vec![0.0; count];
    let mut y = vec![0.0; count];
    assert!(parser.evaluate_cartesian("x", "-1", "1", count, &mut x, &mut y));

    let step = Range::new(-1.0, 1.0).step_size(count);
    for (i, value) in x.iter().enumerate() {
        assert!((value - (-1.0 + i as f64 * step)).abs() < 1e-15);
    }
    assert_eq!(x, y);
}

#[test]
fn test_nan_sanitization() {
    let mut parser = quiet_parser();
    let mut x = [0.0; 3];
    let mut y = [0.0; 3];
    assert!(parser.evaluate_cartesian("1/x", "-1", "1", 3, &mut x, &mut y));
    assert_eq!(x[1], 0.0);
    assert!(y[1].is_nan());
    assert!(y.iter().all(|v| v.is_nan() || v.is_finite()));
}

#[test]
fn test_unknown_identifier_aborts_the_sweep() {
    let mut parser = quiet_parser();
    let mut x = [7.0; 4];
    let mut y = [7.0; 4];
    assert!(!parser.evaluate_cartesian("x + k", "0", "1", 4, &mut x, &mut y));
    assert_eq!(parser.parse_errors(), 1);
    assert_eq!(x, [7.0; 4]);

    assert!(matches!(
        parser.try_evaluate_cartesian("x", "0", "nope", 4, &mut x, &mut y),
        Err(ExprError::InvalidRange { .. })
    ));
}

#[test]
fn test_polar_quarter_turn() {
    let mut parser = quiet_parser();
    let mut x = [0.0; 2];
    let mut y = [0.0; 2];
    assert!(parser.evaluate_polar("1", "0", "pi/2", 2, &mut x, &mut y));
    assert!((x[0] - 1.0).abs() < 1e-15 && y[0].abs() < 1e-15);
    assert!(x[1].abs() < 1e-15 && (y[1] - 1.0).abs() < 1e-15);
}

#[test]
fn test_multivariate_shortest_column() {
    let mut parser = quiet_parser();
    let x = [1.0, 2.0, 3.0];
    let y = [4.0, 5.0, 6.0, 9.0];
    let mut out = [0.0; 10];
    assert!(parser.evaluate_multivariate("x+y", &["x", "y"], &[&x, &y], &mut out));
    assert_eq!(&out[..3], &[5.0, 7.0, 9.0]);
    assert!(out[3..].iter().all(|v| v.is_nan()));
}

#[test]
fn test_multivariate_row_index_and_cells() {
    let mut parser = quiet_parser();
    let x = [10.0, 20.0, 30.0];
    let mut out = [0.0; 3];
    assert!(parser.evaluate_multivariate("i", &["x"], &[&x], &mut out));
    assert_eq!(out, [1.0, 2.0, 3.0]);

    assert!(parser.evaluate_multivariate("cell(i + 1; x)", &["x"], &[&x], &mut out));
    assert_eq!(&out[..2], &[20.0, 30.0]);
    assert!(out[2].is_nan());

    assert!(parser.evaluate_multivariate("sma(2; x)", &["x"], &[&x], &mut out));
    assert_eq!(out, [5.0, 15.0, 25.0]);
}

#[test]
fn test_column_function_outside_columns() {
    let mut parser = quiet_parser();
    assert!(matches!(
        parser.evaluate("ma(1)"),
        Err(ExprError::ColumnFunction { .. })
    ));
}

#[test]
fn test_equation_kinds() {
    let mut parser = quiet_parser();
    let mut x = [0.0; 3];
    let mut y = [0.0; 3];
    let circle = EquationData {
        kind: EquationType::Polar,
        expression1: "2".to_string(),
        max: "pi".to_string(),
        count: 3,
        ..Default::default()
    };
    assert!(parser.evaluate_equation(&circle, &mut x, &mut y));
    assert!((x[2] + 2.0).abs() < 1e-15);

    let line = EquationData {
        kind: EquationType::Neutral,
        expression1: "3*x".to_string(),
        count: 3,
        ..Default::default()
    };
    assert!(parser.evaluate_equation(&line, &mut x, &mut y));
    assert_eq!(y, [0.0, 1.5, 3.0]);
}

#[test]
fn test_parallel_sweep() {
    let mut parser = quiet_parser();
    parser.assign_variable("w", 3.0);
    let (x, y) = parser
        .par_evaluate_cartesian("sin(w*x)", "0", "pi", 1000)
        .unwrap();
    assert_eq!(x.len(), 1000);
    assert_eq!(x[0], 0.0);
    for (x, y) in x.iter().zip(&y) {
        assert_eq!(*y, (3.0 * x).sin());
    }
    assert!(matches!(
        parser.par_evaluate_cartesian("x", "0", "1", 0),
        Err(ExprError::InvalidSampleCount(0))
    ));
}

#[test]
fn test_cartesian_over_public_range() {
    let mut parser = quiet_parser();
    let range = Range::new(0.0, 4.0);
    let mut x = [0.0; 5];
    let mut y = [0.0; 5];
    assert!(parser.evaluate_cartesian_range("sqrt(x)", range, 5, &mut x, &mut y, &[], &[]));
    assert_eq!(x, [0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(y[4], 2.0);

    let mut z = [0.0; 5];
    assert!(parser.evaluate_cartesian("sqrt(x)", "0", "4", 5, &mut x, &mut z));
    assert_eq!(y, z);
}
