use plotexpr_rs::{EquationData, EquationType, ExpressionParser};

fn main() {
    pretty_env_logger::init();

    let mut parser = ExpressionParser::new();
    let equations = [
        EquationData {
            expression1: "exp(-x^2)".to_string(),
            min: "-2".to_string(),
            max: "2".to_string(),
            count: 9,
            ..Default::default()
        },
        EquationData {
            kind: EquationType::Polar,
            expression1: "1 + cos(phi)".to_string(),
            max: "2*pi".to_string(),
            count: 9,
            ..Default::default()
        },
        EquationData {
            kind: EquationType::Parametric,
            expression1: "cos(3*t)".to_string(),
            expression2: "sin(2*t)".to_string(),
            max: "2*pi".to_string(),
            count: 9,
            ..Default::default()
        },
    ];

    for equation in &equations {
        let mut x = vec![0.0; equation.count];
        let mut y = vec![0.0; equation.count];
        match parser.try_evaluate_equation(equation, &mut x, &mut y) {
            Ok(()) => {
                println!("{:?} {}", equation.kind, equation.expression1);
                for (x, y) in x.iter().zip(&y) {
                    println!("  {x:>10.5} {y:>10.5}");
                }
            }
            Err(err) => println!("{:?} {}: {err}", equation.kind, equation.expression1),
        }
    }
}
