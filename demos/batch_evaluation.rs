use plotexpr_rs::ExpressionParser;

fn main() {
    pretty_env_logger::init();

    let time = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let signal = [1.0, 3.0, 2.0, 6.0, 4.0, 8.0];
    let variables = ["t", "s"];
    let columns: [&[f64]; 2] = [&time, &signal];

    let mut parser = ExpressionParser::new();
    for expression in ["s*exp(-t/2)", "sma(3; s)", "smr(2; s)", "cell(i - 1; s)", "42"] {
        let mut out = vec![0.0; time.len()];
        let ok = parser.evaluate_multivariate(expression, &variables, &columns, &mut out);
        println!("{expression:>14}: {out:?}");
        if !ok {
            if let Some(err) = parser.last_error() {
                println!("{:>14}  {err}", "");
            }
        }
    }
}
