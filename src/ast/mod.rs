mod evaluator;
mod parser;

pub use evaluator::{Evaluator, RowData};
pub use parser::FormulaParser as Parser;

#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Number(f64),
    Identifier {
        name: String,
        position: usize,
    },
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<ASTNode>,
    },
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
    LogicalOperation {
        left: Box<ASTNode>,
        operator: LogicalOperator,
        right: Box<ASTNode>,
    },
    NotOperation(Box<ASTNode>),
    Group(Box<ASTNode>),
    FunctionCall {
        name: String,
        args: Vec<ASTNode>,
        position: usize,
    },
}

impl ASTNode {
    /// Names used as plain identifiers (not as callees), in order of first appearance.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_identifiers(&mut names);
        names
    }

    fn collect_identifiers<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            ASTNode::Number(_) => {}
            ASTNode::Identifier { name, .. } => {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
            ASTNode::UnaryOperation { operand, .. } => operand.collect_identifiers(names),
            ASTNode::BinaryOperation { left, right, .. }
            | ASTNode::LogicalOperation { left, right, .. } => {
                left.collect_identifiers(names);
                right.collect_identifiers(names);
            }
            ASTNode::NotOperation(inner) | ASTNode::Group(inner) => {
                inner.collect_identifiers(names)
            }
            ASTNode::FunctionCall { args, .. } => {
                for arg in args {
                    arg.collect_identifiers(names);
                }
            }
        }
    }

    /// True if any identifier of the tree is one of `names`.
    pub fn references_any<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.identifiers()
            .iter()
            .any(|ident| names.iter().any(|n| n.as_ref() == *ident))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    Plus,
}

impl UnaryOperator {
    pub fn apply(&self, operand: f64) -> f64 {
        match self {
            UnaryOperator::Negate => -operand,
            UnaryOperator::Plus => operand,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        let result = match self {
            LogicalOperator::And => left != 0.0 && right != 0.0,
            LogicalOperator::Or => left != 0.0 || right != 0.0,
        };
        bool_to_f64(result)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Equal,
    NotEqual,
}

impl Operator {
    /// Applies the operator with IEEE semantics: division by zero gives inf or NaN.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Modulo => left % right,
            Operator::Power => left.powf(right),
            Operator::GreaterThan => bool_to_f64(left > right),
            Operator::LessThan => bool_to_f64(left < right),
            Operator::GreaterThanOrEqual => bool_to_f64(left >= right),
            Operator::LessThanOrEqual => bool_to_f64(left <= right),
            Operator::Equal => bool_to_f64(left == right),
            Operator::NotEqual => bool_to_f64(left != right),
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            "%" => Ok(Operator::Modulo),
            "^" | "**" => Ok(Operator::Power),
            ">" => Ok(Operator::GreaterThan),
            "<" => Ok(Operator::LessThan),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            "<=" => Ok(Operator::LessThanOrEqual),
            "==" => Ok(Operator::Equal),
            "!=" => Ok(Operator::NotEqual),
            _ => Err(format!("Unknown operator: {}", value)),
        }
    }
}

#[inline]
pub(crate) fn bool_to_f64(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str, position: usize) -> ASTNode {
        ASTNode::Identifier {
            name: name.to_string(),
            position,
        }
    }

    #[test]
    fn test_operator_from_str() {
        assert_eq!(Operator::try_from("^"), Ok(Operator::Power));
        assert_eq!(Operator::try_from("**"), Ok(Operator::Power));
        assert_eq!(Operator::try_from("!="), Ok(Operator::NotEqual));
        assert!(Operator::try_from("<>").is_err());
    }

    #[test]
    fn test_division_by_zero_is_not_an_error() {
        assert_eq!(Operator::Divide.apply(1.0, 0.0), f64::INFINITY);
        assert!(Operator::Divide.apply(0.0, 0.0).is_nan());
        assert!(Operator::Modulo.apply(1.0, 0.0).is_nan());
    }

    #[test]
    fn test_comparisons_yield_one_or_zero() {
        assert_eq!(Operator::GreaterThan.apply(2.0, 1.0), 1.0);
        assert_eq!(Operator::LessThanOrEqual.apply(2.0, 1.0), 0.0);
        assert_eq!(Operator::Equal.apply(0.0, -0.0), 1.0);
        assert_eq!(LogicalOperator::And.apply(2.0, 5.0), 1.0);
        assert_eq!(LogicalOperator::Or.apply(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_identifiers_in_order_without_callees() {
        // sin(x) * a + x
        let ast = ASTNode::BinaryOperation {
            left: Box::new(ASTNode::BinaryOperation {
                left: Box::new(ASTNode::FunctionCall {
                    name: "sin".to_string(),
                    args: vec![ident("x", 4)],
                    position: 0,
                }),
                operator: Operator::Multiply,
                right: Box::new(ident("a", 9)),
            }),
            operator: Operator::Add,
            right: Box::new(ident("x", 13)),
        };

        assert_eq!(ast.identifiers(), vec!["x", "a"]);
        assert!(ast.references_any(&["a"]));
        assert!(!ast.references_any(&["sin"]));
    }
}
