pub mod ast;
pub mod bindings;
pub mod error;
pub mod expression;
pub mod functions;
pub mod sampling;
pub mod symbols;

pub use bindings::Bindings;
pub use error::{ExprError, ExprResult};
pub use expression::{EquationType, ExpressionParser, ParserConfig};
pub use sampling::{EquationData, Range};
pub use symbols::SymbolTable;

use ast::{Evaluator, Parser};

/// One-shot evaluation against the built-in symbols and the given variables.
pub fn evaluate_expression<'a, I>(expression: &str, variables: I) -> ExprResult<f64>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let ast = Parser::parse_expression(expression)?;
    let bindings: Bindings = variables.into_iter().collect();
    Evaluator::new(SymbolTable::global(), &bindings).evaluate(&ast)
}
