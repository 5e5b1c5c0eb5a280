use crate::ast::{bool_to_f64, ASTNode};
use crate::bindings::Bindings;
use crate::error::{ExprError, ExprResult};
use crate::functions::{ColumnFunction, Function, FunctionImpl};
use crate::symbols::SymbolTable;
use log::trace;

/// One row of a multivariate evaluation: each variable names a data column.
/// While a row is active, `i` is the 1-based row number unless a column is called `i`.
#[derive(Debug, Copy, Clone)]
pub struct RowData<'a> {
    pub variables: &'a [&'a str],
    pub columns: &'a [&'a [f64]],
    pub row: usize,
}

impl<'a> RowData<'a> {
    pub fn new(variables: &'a [&'a str], columns: &'a [&'a [f64]], row: usize) -> Self {
        Self {
            variables,
            columns,
            row,
        }
    }

    /// Same columns, another row.
    pub fn at(&self, row: usize) -> Self {
        Self { row, ..*self }
    }

    /// Number of rows every column provides.
    pub fn rows(&self) -> usize {
        self.columns.iter().map(|c| c.len()).min().unwrap_or(0)
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        match self.variables.iter().position(|v| *v == name) {
            Some(n) => Some(
                self.columns
                    .get(n)
                    .and_then(|column| column.get(self.row))
                    .copied()
                    .unwrap_or(f64::NAN),
            ),
            None if name == "i" => Some((self.row + 1) as f64),
            None => None,
        }
    }
}

/// Walks an AST against a symbol table and a set of variable bindings.
///
/// Names resolve as row data, then bindings, then constants. A call prefers
/// the function of that name; calling a variable or constant is an error.
pub struct Evaluator<'a> {
    symbols: &'a SymbolTable,
    bindings: &'a Bindings,
}

impl<'a> Evaluator<'a> {
    pub fn new(symbols: &'a SymbolTable, bindings: &'a Bindings) -> Self {
        Self { symbols, bindings }
    }

    pub fn evaluate(&self, ast: &ASTNode) -> ExprResult<f64> {
        self.eval(ast, None)
    }

    /// Evaluates with the column variables of `row` in scope.
    pub fn evaluate_row(&self, ast: &ASTNode, row: &RowData) -> ExprResult<f64> {
        self.eval(ast, Some(row))
    }

    fn eval(&self, ast: &ASTNode, row: Option<&RowData>) -> ExprResult<f64> {
        match ast {
            ASTNode::Number(n) => Ok(*n),

            ASTNode::Identifier { name, position } => self.resolve(name, *position, row),

            ASTNode::UnaryOperation { operator, operand } => {
                Ok(operator.apply(self.eval(operand, row)?))
            }

            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left_value = self.eval(left, row)?;
                let right_value = self.eval(right, row)?;
                Ok(operator.apply(left_value, right_value))
            }

            ASTNode::LogicalOperation {
                left,
                operator,
                right,
            } => {
                let left_value = self.eval(left, row)?;
                let right_value = self.eval(right, row)?;
                Ok(operator.apply(left_value, right_value))
            }

            ASTNode::NotOperation(inner) => Ok(bool_to_f64(self.eval(inner, row)? == 0.0)),

            ASTNode::Group(inner) => self.eval(inner, row),

            ASTNode::FunctionCall {
                name,
                args,
                position,
            } => {
                let function = self.callee(name, *position, row)?;
                if args.len() != function.arity() {
                    return Err(ExprError::ArgumentCount {
                        name: name.clone(),
                        expected: function.arity(),
                        found: args.len(),
                        position: *position,
                    });
                }

                match (&function.implementation, row) {
                    (FunctionImpl::Column(column), Some(row)) => {
                        self.column_function(*column, args, row)
                    }
                    (FunctionImpl::Column(_), None) => Err(ExprError::ColumnFunction {
                        name: name.clone(),
                        position: *position,
                    }),
                    (implementation, _) => {
                        let values = args
                            .iter()
                            .map(|arg| self.eval(arg, row))
                            .collect::<ExprResult<Vec<f64>>>()?;
                        let result = implementation.call(&values);
                        trace!("{}({:?}) = {}", name, values, result);
                        Ok(result)
                    }
                }
            }
        }
    }

    fn resolve(&self, name: &str, position: usize, row: Option<&RowData>) -> ExprResult<f64> {
        if let Some(value) = row.and_then(|row| row.value(name)) {
            return Ok(value);
        }
        if let Some(value) = self.bindings.get(name) {
            return Ok(value);
        }
        if let Some(constant) = self.symbols.constant(name) {
            return Ok(constant.value);
        }
        if self.symbols.function(name).is_some() {
            return Err(ExprError::MissingArguments {
                name: name.to_string(),
                position,
            });
        }
        Err(ExprError::UnknownIdentifier {
            name: name.to_string(),
            position,
        })
    }

    fn callee(
        &self,
        name: &str,
        position: usize,
        row: Option<&RowData>,
    ) -> ExprResult<&'a Function> {
        let is_variable =
            row.is_some_and(|row| row.value(name).is_some()) || self.bindings.contains(name);
        if !is_variable {
            if let Some(function) = self.symbols.function(name) {
                return Ok(function);
            }
        }
        if is_variable || self.symbols.constant(name).is_some() {
            return Err(ExprError::NotAFunction {
                name: name.to_string(),
                position,
            });
        }
        Err(ExprError::UnknownFunction {
            name: name.to_string(),
            position,
        })
    }

    fn column_function(
        &self,
        column: ColumnFunction,
        args: &[ASTNode],
        row: &RowData,
    ) -> ExprResult<f64> {
        if column == ColumnFunction::Cell {
            let index = self.eval(&args[0], Some(row))?.trunc();
            if !(index >= 1.0 && index <= row.rows() as f64) {
                return Ok(f64::NAN);
            }
            return self.eval(&args[1], Some(&row.at(index as usize - 1)));
        }

        let length = if column.takes_length() {
            self.eval(&args[0], Some(row))?
        } else {
            0.0
        };
        let data = &args[args.len() - 1];
        let window = match column.window(row.row, length) {
            Some(window) if window.end <= row.rows() => window,
            _ => return Ok(f64::NAN),
        };
        let values = window
            .map(|r| self.eval(data, Some(&row.at(r))))
            .collect::<ExprResult<Vec<f64>>>()?;
        Ok(column.reduce(&values, length))
    }
}
