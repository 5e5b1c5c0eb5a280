use crate::ast::{ASTNode, LogicalOperator, Operator, UnaryOperator};
use crate::error::{ExprError, ExprResult};
use log::debug;
use pest::error::InputLocation;
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "./expression.pest"]
pub struct FormulaParser;

impl FormulaParser {
    pub fn parse_expression(input: &str) -> ExprResult<ASTNode> {
        debug!("Parsing expression: {}", input);
        check_parentheses(input)?;

        let parse_result = FormulaParser::parse(Rule::expression, input)
            .map_err(|e| syntax_error(input, e))?
            .next()
            .ok_or_else(|| ExprError::syntax("empty expression", 0))?;

        let mut pairs = parse_result.into_inner();
        let ast = Self::build_or_expression(input, next_pair(input, &mut pairs)?)?;
        debug!("Parsed AST: {:?}", ast);
        Ok(ast)
    }

    fn build_or_expression(input: &str, pair: Pair<Rule>) -> ExprResult<ASTNode> {
        let mut pairs = pair.into_inner();
        let mut node = Self::build_and_expression(input, next_pair(input, &mut pairs)?)?;

        while let Some(operator_pair) = pairs.next() {
            let operator = match operator_pair.as_rule() {
                Rule::OR => LogicalOperator::Or,
                _ => return Err(unexpected(input, &operator_pair)),
            };
            let right = Self::build_and_expression(input, next_pair(input, &mut pairs)?)?;
            node = ASTNode::LogicalOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn build_and_expression(input: &str, pair: Pair<Rule>) -> ExprResult<ASTNode> {
        let mut pairs = pair.into_inner();
        let mut node =
            Self::build_comparison_expression(input, next_pair(input, &mut pairs)?)?;

        while let Some(operator_pair) = pairs.next() {
            let operator = match operator_pair.as_rule() {
                Rule::AND => LogicalOperator::And,
                _ => return Err(unexpected(input, &operator_pair)),
            };
            let right =
                Self::build_comparison_expression(input, next_pair(input, &mut pairs)?)?;
            node = ASTNode::LogicalOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn build_comparison_expression(input: &str, pair: Pair<Rule>) -> ExprResult<ASTNode> {
        Self::build_binary_chain(input, pair, Self::build_additive_expression)
    }

    fn build_additive_expression(input: &str, pair: Pair<Rule>) -> ExprResult<ASTNode> {
        Self::build_binary_chain(input, pair, Self::build_multiplicative_expression)
    }

    fn build_multiplicative_expression(input: &str, pair: Pair<Rule>) -> ExprResult<ASTNode> {
        Self::build_binary_chain(input, pair, Self::build_unary_expression)
    }

    /// Left associative `operand (operator operand)*` sequence.
    fn build_binary_chain(
        input: &str,
        pair: Pair<Rule>,
        build_operand: fn(&str, Pair<Rule>) -> ExprResult<ASTNode>,
    ) -> ExprResult<ASTNode> {
        let mut pairs = pair.into_inner();
        let mut node = build_operand(input, next_pair(input, &mut pairs)?)?;

        while let Some(operator_pair) = pairs.next() {
            let operator = Operator::try_from(operator_pair.as_str())
                .map_err(|_| unexpected(input, &operator_pair))?;
            let right = build_operand(input, next_pair(input, &mut pairs)?)?;
            node = ASTNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn build_unary_expression(input: &str, pair: Pair<Rule>) -> ExprResult<ASTNode> {
        let mut operators = Vec::new();
        let mut operand = None;
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::unary_operator => operators.push(inner.as_str().to_string()),
                Rule::power_expression => {
                    operand = Some(Self::build_power_expression(input, inner)?)
                }
                _ => return Err(unexpected(input, &inner)),
            }
        }
        let mut node = operand
            .ok_or_else(|| ExprError::syntax("missing operand", input.chars().count()))?;

        // the operator closest to the operand applies first
        for operator in operators.iter().rev() {
            node = match operator.as_str() {
                "-" => ASTNode::UnaryOperation {
                    operator: UnaryOperator::Negate,
                    operand: Box::new(node),
                },
                "+" => ASTNode::UnaryOperation {
                    operator: UnaryOperator::Plus,
                    operand: Box::new(node),
                },
                _ => ASTNode::NotOperation(Box::new(node)),
            };
        }

        Ok(node)
    }

    fn build_power_expression(input: &str, pair: Pair<Rule>) -> ExprResult<ASTNode> {
        let mut pairs = pair.into_inner();
        let base = Self::build_primary_expression(input, next_pair(input, &mut pairs)?)?;

        match pairs.next() {
            Some(operator_pair) => {
                let operator = Operator::try_from(operator_pair.as_str())
                    .map_err(|_| unexpected(input, &operator_pair))?;
                let exponent =
                    Self::build_unary_expression(input, next_pair(input, &mut pairs)?)?;
                Ok(ASTNode::BinaryOperation {
                    left: Box::new(base),
                    operator,
                    right: Box::new(exponent),
                })
            }
            None => Ok(base),
        }
    }

    fn build_primary_expression(input: &str, pair: Pair<Rule>) -> ExprResult<ASTNode> {
        match pair.as_rule() {
            Rule::number => {
                let value = pair.as_str().parse::<f64>().map_err(|_| {
                    ExprError::syntax(
                        format!("malformed number '{}'", pair.as_str()),
                        char_offset(input, pair.as_span().start()),
                    )
                })?;
                Ok(ASTNode::Number(value))
            }
            Rule::identifier => Ok(ASTNode::Identifier {
                name: pair.as_str().to_string(),
                position: char_offset(input, pair.as_span().start()),
            }),
            Rule::group => {
                let mut pairs = pair.into_inner();
                let inner = Self::build_or_expression(input, next_pair(input, &mut pairs)?)?;
                Ok(ASTNode::Group(Box::new(inner)))
            }
            Rule::function_call => Self::build_function_call(input, pair),
            _ => Err(unexpected(input, &pair)),
        }
    }

    fn build_function_call(input: &str, pair: Pair<Rule>) -> ExprResult<ASTNode> {
        let position = char_offset(input, pair.as_span().start());
        let mut pairs = pair.into_inner();
        let name = next_pair(input, &mut pairs)?.as_str().to_string();
        let args = pairs
            .map(|arg| Self::build_or_expression(input, arg))
            .collect::<ExprResult<Vec<_>>>()?;
        Ok(ASTNode::FunctionCall {
            name,
            args,
            position,
        })
    }
}

fn next_pair<'i>(input: &str, pairs: &mut Pairs<'i, Rule>) -> ExprResult<Pair<'i, Rule>> {
    pairs
        .next()
        .ok_or_else(|| ExprError::syntax("incomplete expression", input.chars().count()))
}

fn unexpected(input: &str, pair: &Pair<Rule>) -> ExprError {
    ExprError::syntax(
        format!("unexpected '{}'", pair.as_str()),
        char_offset(input, pair.as_span().start()),
    )
}

pub(crate) fn char_offset(input: &str, byte_offset: usize) -> usize {
    input
        .get(..byte_offset)
        .map_or(byte_offset, |prefix| prefix.chars().count())
}

fn syntax_error(input: &str, error: pest::error::Error<Rule>) -> ExprError {
    let byte_offset = match error.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };
    let position = char_offset(input, byte_offset);
    let message = match input.get(byte_offset..).and_then(|rest| rest.chars().next()) {
        None if input.trim().is_empty() => "empty expression".to_string(),
        None => "unexpected end of expression".to_string(),
        Some(c) => format!("unexpected '{}'", c),
    };
    debug!("Syntax error in '{}': {} ({:?})", input, message, error.variant);
    ExprError::syntax(message, position)
}

/// Reports unbalanced parentheses before the grammar gets to see the input.
fn check_parentheses(input: &str) -> ExprResult<()> {
    let mut open = Vec::new();
    for (position, c) in input.chars().enumerate() {
        match c {
            '(' => open.push(position),
            ')' => {
                if open.pop().is_none() {
                    return Err(ExprError::syntax(
                        format!("too many closing parentheses until position {}", position),
                        position,
                    ));
                }
            }
            _ => {}
        }
    }
    match open.last() {
        Some(&position) => Err(ExprError::syntax("unclosed parenthesis", position)),
        None => Ok(()),
    }
}
