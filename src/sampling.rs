//! Sweeps of one free variable over a linear range, plus data driven evaluation.
//!
//! Every sweep comes in two flavours: `try_*` returns the reason of a failure,
//! the plain variant returns `bool`. In both cases the error is also available
//! through [`ExpressionParser::last_error`]. A sweep stops at the first failing
//! sample and leaves the outputs partially written.

use crate::ast::{ASTNode, Evaluator, Parser, RowData};
use crate::bindings::Bindings;
use crate::error::{ExprError, ExprResult};
use crate::expression::{EquationType, ExpressionParser};
use crate::symbols::SymbolTable;
use log::{debug, trace, warn};
use rayon::prelude::*;

/// Bounds of a sweep.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Range {
    pub start: f64,
    pub end: f64,
}

impl Range {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Evaluates both bounds with the built-in symbols and no variables.
    pub fn parse(min: &str, max: &str) -> ExprResult<Self> {
        let bindings = Bindings::new();
        let evaluator = Evaluator::new(SymbolTable::global(), &bindings);
        Ok(Self::new(
            bound(&evaluator, min)?,
            bound(&evaluator, max)?,
        ))
    }

    pub fn size(&self) -> f64 {
        self.end - self.start
    }

    /// Distance between neighbouring samples; 0 for fewer than two samples.
    pub fn step_size(&self, count: usize) -> f64 {
        if count > 1 {
            self.size() / (count - 1) as f64
        } else {
            0.0
        }
    }

    fn check(&self) -> ExprResult<()> {
        match [self.start, self.end].into_iter().find(|bound| !bound.is_finite()) {
            Some(bound) => Err(ExprError::InvalidRange {
                expression: bound.to_string(),
                reason: "bound is not finite".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn sample(&self, step: f64, index: usize) -> f64 {
        self.start + step * index as f64
    }
}

fn bound(evaluator: &Evaluator, expression: &str) -> ExprResult<f64> {
    let invalid = |reason: String| ExprError::InvalidRange {
        expression: expression.to_string(),
        reason,
    };
    let ast = Parser::parse_expression(expression).map_err(|err| invalid(err.to_string()))?;
    let value = evaluator
        .evaluate(&ast)
        .map_err(|err| invalid(err.to_string()))?;
    if !value.is_finite() {
        return Err(invalid(format!("evaluates to {}", value)));
    }
    Ok(value)
}

/// An equation as stored by a curve: what to sample and where.
#[derive(Debug, Clone, PartialEq)]
pub struct EquationData {
    pub kind: EquationType,
    pub expression1: String,
    /// The y expression of a parametric equation.
    pub expression2: String,
    pub min: String,
    pub max: String,
    pub count: usize,
}

impl Default for EquationData {
    fn default() -> Self {
        Self {
            kind: EquationType::Cartesian,
            expression1: String::new(),
            expression2: String::new(),
            min: "0".to_string(),
            max: "1".to_string(),
            count: 1000,
        }
    }
}

fn check_count(count: usize, outputs: &[usize]) -> ExprResult<()> {
    if count == 0 {
        return Err(ExprError::InvalidSampleCount(0));
    }
    match outputs.iter().min() {
        Some(&available) if available < count => Err(ExprError::LengthMismatch {
            required: count,
            available,
        }),
        _ => Ok(()),
    }
}

impl ExpressionParser {
    /// Evaluates the bounds of a sweep with this parser's symbols and bindings.
    pub fn parse_range(&self, min: &str, max: &str) -> ExprResult<Range> {
        let evaluator = Evaluator::new(self.symbols(), self.bindings());
        Ok(Range::new(bound(&evaluator, min)?, bound(&evaluator, max)?))
    }

    /// Samples `y = f(x)` at `count` points from `min` to `max`.
    pub fn evaluate_cartesian(
        &mut self,
        expression: &str,
        min: &str,
        max: &str,
        count: usize,
        x_out: &mut [f64],
        y_out: &mut [f64],
    ) -> bool {
        self.try_evaluate_cartesian(expression, min, max, count, x_out, y_out)
            .is_ok()
    }

    pub fn try_evaluate_cartesian(
        &mut self,
        expression: &str,
        min: &str,
        max: &str,
        count: usize,
        x_out: &mut [f64],
        y_out: &mut [f64],
    ) -> ExprResult<()> {
        self.try_evaluate_cartesian_with_params(
            expression, min, max, count, x_out, y_out, &[], &[],
        )
    }

    /// Like [`ExpressionParser::evaluate_cartesian`], with `names[k]` bound to
    /// `values[k]` first. The parameters stay bound afterwards.
    #[allow(clippy::too_many_arguments)]
    pub fn evaluate_cartesian_with_params(
        &mut self,
        expression: &str,
        min: &str,
        max: &str,
        count: usize,
        x_out: &mut [f64],
        y_out: &mut [f64],
        names: &[&str],
        values: &[f64],
    ) -> bool {
        self.try_evaluate_cartesian_with_params(
            expression, min, max, count, x_out, y_out, names, values,
        )
        .is_ok()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn try_evaluate_cartesian_with_params(
        &mut self,
        expression: &str,
        min: &str,
        max: &str,
        count: usize,
        x_out: &mut [f64],
        y_out: &mut [f64],
        names: &[&str],
        values: &[f64],
    ) -> ExprResult<()> {
        let range = check_count(count, &[x_out.len(), y_out.len()])
            .and_then(|_| self.parse_range(min, max));
        let range = self.record(range)?;
        self.try_evaluate_cartesian_range(
            expression, range, count, x_out, y_out, names, values,
        )
    }

    /// Samples `y = f(x)` over bounds that are already evaluated, binding
    /// `names[k]` to `values[k]` first.
    #[allow(clippy::too_many_arguments)]
    pub fn evaluate_cartesian_range(
        &mut self,
        expression: &str,
        range: Range,
        count: usize,
        x_out: &mut [f64],
        y_out: &mut [f64],
        names: &[&str],
        values: &[f64],
    ) -> bool {
        self.try_evaluate_cartesian_range(expression, range, count, x_out, y_out, names, values)
            .is_ok()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn try_evaluate_cartesian_range(
        &mut self,
        expression: &str,
        range: Range,
        count: usize,
        x_out: &mut [f64],
        y_out: &mut [f64],
        names: &[&str],
        values: &[f64],
    ) -> ExprResult<()> {
        debug!(
            "cartesian sweep of '{}' over [{}, {}], {} samples",
            expression, range.start, range.end, count
        );
        let result = check_count(count, &[x_out.len(), y_out.len()])
            .and_then(|_| range.check())
            .and_then(|_| self.compile(expression));
        let ast = self.record(result)?;
        self.bind_parameters(names, values)?;

        let step = range.step_size(count);
        self.with_variable("x", |parser| {
            for i in 0..count {
                let x = range.sample(step, i);
                parser.bindings_mut().assign("x", x);
                let y = parser.evaluate_ast(&ast)?;
                x_out[i] = x;
                y_out[i] = parser.sanitize(y, expression, x);
            }
            Ok(())
        })
    }

    /// Samples `r = f(phi)` and writes `x = r cos(phi)`, `y = r sin(phi)`.
    pub fn evaluate_polar(
        &mut self,
        expression: &str,
        min: &str,
        max: &str,
        count: usize,
        x_out: &mut [f64],
        y_out: &mut [f64],
    ) -> bool {
        self.try_evaluate_polar(expression, min, max, count, x_out, y_out)
            .is_ok()
    }

    pub fn try_evaluate_polar(
        &mut self,
        expression: &str,
        min: &str,
        max: &str,
        count: usize,
        x_out: &mut [f64],
        y_out: &mut [f64],
    ) -> ExprResult<()> {
        debug!(
            "polar sweep of '{}' over [{}, {}], {} samples",
            expression, min, max, count
        );
        let result = self.prepare(expression, min, max, count, &[x_out.len(), y_out.len()]);
        let (ast, range) = self.record(result)?;

        let step = range.step_size(count);
        self.with_variable("phi", |parser| {
            for i in 0..count {
                let phi = range.sample(step, i);
                parser.bindings_mut().assign("phi", phi);
                let r = parser.evaluate_ast(&ast)?;
                let r = parser.sanitize(r, expression, phi);
                x_out[i] = r * phi.cos();
                y_out[i] = r * phi.sin();
            }
            Ok(())
        })
    }

    /// Samples `x = f(t)` and `y = g(t)`.
    #[allow(clippy::too_many_arguments)]
    pub fn evaluate_parametric(
        &mut self,
        expression_x: &str,
        expression_y: &str,
        min: &str,
        max: &str,
        count: usize,
        x_out: &mut [f64],
        y_out: &mut [f64],
    ) -> bool {
        self.try_evaluate_parametric(expression_x, expression_y, min, max, count, x_out, y_out)
            .is_ok()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn try_evaluate_parametric(
        &mut self,
        expression_x: &str,
        expression_y: &str,
        min: &str,
        max: &str,
        count: usize,
        x_out: &mut [f64],
        y_out: &mut [f64],
    ) -> ExprResult<()> {
        debug!(
            "parametric sweep of ('{}', '{}') over [{}, {}], {} samples",
            expression_x, expression_y, min, max, count
        );
        let result = self
            .prepare(expression_x, min, max, count, &[x_out.len(), y_out.len()])
            .and_then(|(ast_x, range)| Ok((ast_x, self.compile(expression_y)?, range)));
        let (ast_x, ast_y, range) = self.record(result)?;

        let step = range.step_size(count);
        self.with_variable("t", |parser| {
            for i in 0..count {
                let t = range.sample(step, i);
                parser.bindings_mut().assign("t", t);
                let x = parser.evaluate_ast(&ast_x)?;
                let y = parser.evaluate_ast(&ast_y)?;
                x_out[i] = parser.sanitize(x, expression_x, t);
                y_out[i] = parser.sanitize(y, expression_y, t);
            }
            Ok(())
        })
    }

    /// Evaluates `y = f(x)` at the given x values.
    pub fn evaluate_cartesian_at(
        &mut self,
        expression: &str,
        x_in: &[f64],
        y_out: &mut [f64],
    ) -> bool {
        self.try_evaluate_cartesian_at_with_params(expression, x_in, y_out, &[], &[])
            .is_ok()
    }

    pub fn evaluate_cartesian_at_with_params(
        &mut self,
        expression: &str,
        x_in: &[f64],
        y_out: &mut [f64],
        names: &[&str],
        values: &[f64],
    ) -> bool {
        self.try_evaluate_cartesian_at_with_params(expression, x_in, y_out, names, values)
            .is_ok()
    }

    pub fn try_evaluate_cartesian_at_with_params(
        &mut self,
        expression: &str,
        x_in: &[f64],
        y_out: &mut [f64],
        names: &[&str],
        values: &[f64],
    ) -> ExprResult<()> {
        debug!("evaluating '{}' at {} points", expression, x_in.len());
        let result = if y_out.len() < x_in.len() {
            Err(ExprError::LengthMismatch {
                required: x_in.len(),
                available: y_out.len(),
            })
        } else {
            self.compile(expression)
        };
        let ast = self.record(result)?;
        self.bind_parameters(names, values)?;

        self.with_variable("x", |parser| {
            for (i, &x) in x_in.iter().enumerate() {
                parser.bindings_mut().assign("x", x);
                let y = parser.evaluate_ast(&ast)?;
                y_out[i] = parser.sanitize(y, expression, x);
            }
            Ok(())
        })
    }

    /// Evaluates `y = f(x1, x2, ...)` row by row, where `variables[k]` names
    /// `columns[k]`.
    ///
    /// Rows past the shortest column are set to NaN, unless the expression uses
    /// no variable at all, in which case every row of `y_out` is computed. A row
    /// that fails to evaluate is set to NaN; the result is false if any did.
    pub fn evaluate_multivariate(
        &mut self,
        expression: &str,
        variables: &[&str],
        columns: &[&[f64]],
        y_out: &mut [f64],
    ) -> bool {
        self.try_evaluate_multivariate(expression, variables, columns, y_out)
            .is_ok()
    }

    pub fn try_evaluate_multivariate(
        &mut self,
        expression: &str,
        variables: &[&str],
        columns: &[&[f64]],
        y_out: &mut [f64],
    ) -> ExprResult<()> {
        debug!("multivariate evaluation of '{}' over {:?}", expression, variables);
        let result = if variables.len() != columns.len() {
            Err(ExprError::LengthMismatch {
                required: variables.len(),
                available: columns.len(),
            })
        } else {
            self.compile(expression)
        };
        let ast = self.record(result)?;

        let data = RowData::new(variables, columns, 0);
        let constant = !uses_variables(&ast, variables, self.bindings());
        let rows = if constant {
            y_out.len()
        } else {
            data.rows().min(y_out.len())
        };

        let mut failure = None;
        for (row, y) in y_out.iter_mut().enumerate().take(rows) {
            *y = match self.evaluate_row(&ast, &data.at(row)) {
                Ok(value) => self.sanitize(value, expression, (row + 1) as f64),
                Err(err) => {
                    failure.get_or_insert(err);
                    f64::NAN
                }
            };
        }
        for y in y_out.iter_mut().skip(rows) {
            *y = f64::NAN;
        }

        self.record(failure.map_or(Ok(()), Err))
    }

    /// Samples an equation according to its kind.
    pub fn evaluate_equation(
        &mut self,
        equation: &EquationData,
        x_out: &mut [f64],
        y_out: &mut [f64],
    ) -> bool {
        self.try_evaluate_equation(equation, x_out, y_out).is_ok()
    }

    pub fn try_evaluate_equation(
        &mut self,
        equation: &EquationData,
        x_out: &mut [f64],
        y_out: &mut [f64],
    ) -> ExprResult<()> {
        let EquationData {
            kind,
            expression1,
            expression2,
            min,
            max,
            count,
        } = equation;
        match kind {
            EquationType::Polar => {
                self.try_evaluate_polar(expression1, min, max, *count, x_out, y_out)
            }
            EquationType::Parametric => self.try_evaluate_parametric(
                expression1, expression2, min, max, *count, x_out, y_out,
            ),
            EquationType::Cartesian | EquationType::Implicit | EquationType::Neutral => {
                self.try_evaluate_cartesian(expression1, min, max, *count, x_out, y_out)
            }
        }
    }

    /// Cartesian sweep on the rayon pool. Every worker evaluates with its own
    /// copy of the bindings; the samples equal those of the sequential sweep.
    pub fn par_evaluate_cartesian(
        &mut self,
        expression: &str,
        min: &str,
        max: &str,
        count: usize,
    ) -> ExprResult<(Vec<f64>, Vec<f64>)> {
        debug!(
            "parallel cartesian sweep of '{}' over [{}, {}], {} samples",
            expression, min, max, count
        );
        let result = self.prepare(expression, min, max, count, &[]);
        let (ast, range) = self.record(result)?;

        let step = range.step_size(count);
        let symbols = self.symbols();
        let bindings = self.bindings();
        let log_nan = self.config().log_nan_samples;
        let result = (0..count)
            .into_par_iter()
            .map_init(
                || bindings.clone(),
                |local, i| {
                    let x = range.sample(step, i);
                    local.assign("x", x);
                    let y = Evaluator::new(symbols, local).evaluate(&ast)?;
                    Ok((x, sanitize(y, expression, x, log_nan)))
                },
            )
            .collect::<ExprResult<Vec<(f64, f64)>>>();
        let samples = self.record(result)?;
        Ok(samples.into_iter().unzip())
    }

    fn prepare(
        &mut self,
        expression: &str,
        min: &str,
        max: &str,
        count: usize,
        outputs: &[usize],
    ) -> ExprResult<(std::sync::Arc<ASTNode>, Range)> {
        check_count(count, outputs)?;
        let range = self.parse_range(min, max)?;
        let ast = self.compile(expression)?;
        Ok((ast, range))
    }

    fn bind_parameters(&mut self, names: &[&str], values: &[f64]) -> ExprResult<()> {
        if names.len() != values.len() {
            let result = Err(ExprError::LengthMismatch {
                required: names.len(),
                available: values.len(),
            });
            return self.record(result);
        }
        for (name, value) in names.iter().zip(values) {
            self.assign_variable(name, *value);
        }
        Ok(())
    }

    /// Runs `sweep` with `name` free to change, then restores its previous binding.
    fn with_variable<T>(&mut self, name: &str, sweep: impl FnOnce(&mut Self) -> T) -> T {
        let previous = self.bindings().get(name);
        let result = sweep(self);
        match previous {
            Some(value) => self.assign_variable(name, value),
            None => self.remove_variable(name),
        };
        result
    }

    fn sanitize(&self, value: f64, expression: &str, at: f64) -> f64 {
        sanitize(value, expression, at, self.config().log_nan_samples)
    }
}

fn sanitize(value: f64, expression: &str, at: f64, log_nan: bool) -> f64 {
    if value.is_finite() {
        trace!("{} @ {} = {}", expression, at, value);
        return value;
    }
    if log_nan {
        warn!("expression '{}' evaluated @ {} is {}", expression, at, value);
    }
    f64::NAN
}

/// Whether evaluating `ast` reads a column, the row index or a bound variable.
fn uses_variables(ast: &ASTNode, variables: &[&str], bindings: &Bindings) -> bool {
    ast.references_any(variables)
        || ast.references_any(&["i"])
        || ast.identifiers().iter().any(|name| bindings.contains(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-12 * expected.abs().max(1.0),
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_range() {
        let range = Range::parse("pi - pi", "2*pi").expect("range");
        assert_eq!(range.start, 0.0);
        assert_close(range.end, 2.0 * std::f64::consts::PI);
        assert_close(range.step_size(5), std::f64::consts::PI / 2.0);
        assert_eq!(range.step_size(1), 0.0);
        assert!(matches!(
            Range::parse("0", "1/0"),
            Err(ExprError::InvalidRange { .. })
        ));
        assert!(matches!(
            Range::parse("(", "1"),
            Err(ExprError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_cartesian_progression() {
        let mut parser = ExpressionParser::new();
        let mut x = vec![0.0; 5];
        let mut y = vec![0.0; 5];
        assert!(parser.evaluate_cartesian("x^2", "0", "2", 5, &mut x, &mut y));
        for i in 0..5 {
            assert_close(x[i], 0.5 * i as f64);
            assert_close(y[i], x[i] * x[i]);
        }
        assert!(!parser.bindings().contains("x"));
    }

    #[test]
    fn test_single_sample() {
        let mut parser = ExpressionParser::new();
        let mut x = [f64::NAN];
        let mut y = [f64::NAN];
        assert!(parser.evaluate_cartesian("x + 1", "3", "7", 1, &mut x, &mut y));
        assert_eq!((x[0], y[0]), (3.0, 4.0));
    }

    #[test]
    fn test_invalid_count_and_lengths() {
        let mut parser = ExpressionParser::new();
        let mut x = [0.0; 3];
        let mut y = [0.0; 3];
        assert_eq!(
            parser.try_evaluate_cartesian("x", "0", "1", 0, &mut x, &mut y),
            Err(ExprError::InvalidSampleCount(0))
        );
        assert_eq!(
            parser.try_evaluate_cartesian("x", "0", "1", 4, &mut x, &mut y),
            Err(ExprError::LengthMismatch {
                required: 4,
                available: 3
            })
        );
        assert!(matches!(
            parser.last_error(),
            Some(ExprError::LengthMismatch { required: 4, .. })
        ));
    }

    #[test]
    fn test_non_finite_samples_are_nan() {
        let config = crate::expression::ParserConfig {
            log_nan_samples: false,
            ..Default::default()
        };
        let mut parser = ExpressionParser::with_config(config);
        let mut x = [0.0; 3];
        let mut y = [0.0; 3];
        assert!(parser.evaluate_cartesian("1/x", "-1", "1", 3, &mut x, &mut y));
        assert_eq!(y[0], -1.0);
        assert!(y[1].is_nan());
        assert_eq!(y[2], 1.0);
    }

    #[test]
    fn test_sweep_restores_free_variable() {
        let mut parser = ExpressionParser::new();
        parser.assign_variable("x", 42.0);
        let mut x = [0.0; 2];
        let mut y = [0.0; 2];
        assert!(parser.evaluate_cartesian("x", "0", "1", 2, &mut x, &mut y));
        assert_eq!(parser.bindings().get("x"), Some(42.0));
    }

    #[test]
    fn test_parameters_stay_bound() {
        let mut parser = ExpressionParser::new();
        let mut x = [0.0; 3];
        let mut y = [0.0; 3];
        assert!(parser.evaluate_cartesian_with_params(
            "a*x + b",
            "0",
            "2",
            3,
            &mut x,
            &mut y,
            &["a", "b"],
            &[2.0, 1.0]
        ));
        assert_eq!(y, [1.0, 3.0, 5.0]);
        assert_eq!(parser.bindings().get("a"), Some(2.0));
    }

    #[test]
    fn test_cartesian_over_evaluated_range() {
        let mut parser = ExpressionParser::new();
        let mut x = [0.0; 3];
        let mut y = [0.0; 3];
        let range = parser.parse_range("-1", "1").expect("range");
        assert!(parser.evaluate_cartesian_range(
            "k*x",
            range,
            3,
            &mut x,
            &mut y,
            &["k"],
            &[4.0]
        ));
        assert_eq!(x, [-1.0, 0.0, 1.0]);
        assert_eq!(y, [-4.0, 0.0, 4.0]);
        assert!(!parser.bindings().contains("x"));

        assert!(matches!(
            parser.try_evaluate_cartesian_range(
                "x",
                Range::new(0.0, f64::INFINITY),
                3,
                &mut x,
                &mut y,
                &[],
                &[]
            ),
            Err(ExprError::InvalidRange { .. })
        ));
        assert_eq!(
            parser.try_evaluate_cartesian_range("x", range, 0, &mut x, &mut y, &[], &[]),
            Err(ExprError::InvalidSampleCount(0))
        );
        assert_eq!(x, [-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_polar() {
        let mut parser = ExpressionParser::new();
        let mut x = [0.0; 2];
        let mut y = [0.0; 2];
        assert!(parser.evaluate_polar("1", "0", "pi/2", 2, &mut x, &mut y));
        assert_close(x[0], 1.0);
        assert_close(y[0], 0.0);
        assert!(x[1].abs() < 1e-15);
        assert_close(y[1], 1.0);
    }

    #[test]
    fn test_polar_non_finite_radius() {
        let mut parser = ExpressionParser::with_config(crate::expression::ParserConfig {
            log_nan_samples: false,
            ..Default::default()
        });
        let mut x = [0.0; 2];
        let mut y = [0.0; 2];
        assert!(parser.evaluate_polar("1/phi", "0", "1", 2, &mut x, &mut y));
        assert!(x[0].is_nan() && y[0].is_nan());
        assert_close(x[1], 1f64.cos());
    }

    #[test]
    fn test_parametric_failure_leaves_sample_untouched() {
        let mut parser = ExpressionParser::new();
        let mut x = [-1.0; 3];
        let mut y = [-1.0; 3];
        assert!(parser.evaluate_parametric("cos(t)", "sin(t)", "0", "pi", 3, &mut x, &mut y));
        assert_close(x[2], -1.0);
        assert!(y[2].abs() < 1e-15);

        let mut x = [-1.0; 3];
        let mut y = [-1.0; 3];
        assert!(!parser.evaluate_parametric("t", "q", "0", "1", 3, &mut x, &mut y));
        assert_eq!(x, [-1.0; 3]);
        assert_eq!(y, [-1.0; 3]);
        assert!(matches!(
            parser.last_error(),
            Some(ExprError::UnknownIdentifier { .. })
        ));
    }

    #[test]
    fn test_cartesian_at() {
        let mut parser = ExpressionParser::new();
        let x = [1.0, 4.0, 9.0];
        let mut y = [0.0; 3];
        assert!(parser.evaluate_cartesian_at("sqrt(x)", &x, &mut y));
        assert_eq!(y, [1.0, 2.0, 3.0]);

        assert!(parser.evaluate_cartesian_at_with_params("k*x", &x, &mut y, &["k"], &[2.0]));
        assert_eq!(y, [2.0, 8.0, 18.0]);

        let mut short = [0.0; 2];
        assert!(!parser.evaluate_cartesian_at("x", &x, &mut short));
    }

    #[test]
    fn test_multivariate() {
        let mut parser = ExpressionParser::new();
        let x = [1.0, 2.0, 3.0];
        let y = [4.0, 5.0, 6.0, 9.0];
        let mut out = [0.0; 10];
        assert!(parser.evaluate_multivariate("x + y", &["x", "y"], &[&x, &y], &mut out));
        assert_eq!(&out[..3], &[5.0, 7.0, 9.0]);
        assert!(out[3..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_multivariate_constant_fills_all_rows() {
        let mut parser = ExpressionParser::new();
        let x = [1.0, 2.0];
        let mut out = [0.0; 5];
        assert!(parser.evaluate_multivariate("2*pi", &["x"], &[&x], &mut out));
        assert!(out
            .iter()
            .all(|v| (v - 2.0 * std::f64::consts::PI).abs() < 1e-15));
    }

    #[test]
    fn test_multivariate_row_errors() {
        let mut parser = ExpressionParser::new();
        let x = [1.0, 2.0];
        let mut out = [0.0; 2];
        assert!(!parser.evaluate_multivariate("x + q", &["x"], &[&x], &mut out));
        assert!(out.iter().all(|v| v.is_nan()));
        assert!(!parser.evaluate_multivariate("x", &["x", "y"], &[&x], &mut out));
    }

    #[test]
    fn test_equation_dispatch() {
        let mut parser = ExpressionParser::new();
        let equation = EquationData {
            kind: EquationType::Parametric,
            expression1: "t".to_string(),
            expression2: "2*t".to_string(),
            count: 3,
            ..Default::default()
        };
        let mut x = [0.0; 3];
        let mut y = [0.0; 3];
        assert!(parser.evaluate_equation(&equation, &mut x, &mut y));
        assert_eq!(x, [0.0, 0.5, 1.0]);
        assert_eq!(y, [0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut parser = ExpressionParser::new();
        let count = 257;
        let mut x = vec![0.0; count];
        let mut y = vec![0.0; count];
        let expression = "sin(x)*exp(-x/4)";
        assert!(parser.evaluate_cartesian(expression, "-pi", "3*pi", count, &mut x, &mut y));
        let (px, py) = parser
            .par_evaluate_cartesian(expression, "-pi", "3*pi", count)
            .expect("parallel sweep");
        assert_eq!(px, x);
        assert_eq!(py, y);
    }
}
