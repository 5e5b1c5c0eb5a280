use plotexpr_rs::ExpressionParser;

fn main() {
    pretty_env_logger::init();

    let mut parser = ExpressionParser::new();
    parser.assign_variable("a", 2.0);
    parser.assign_variable("b", 0.5);

    for expression in ["a*sin(pi/2) + b", "gamma(5)", "cL/1000", "a +", "psi(1)", "sin"] {
        match parser.evaluate(expression) {
            Ok(result) => println!("{expression} = {result}"),
            Err(err) => println!("{expression}: {err}"),
        }
    }

    if let Some(description) = parser.constant_description("cL") {
        println!("cL: {description}");
    }
    println!(
        "gaussian{}",
        parser.parameters("gaussian").unwrap_or_default()
    );
}
