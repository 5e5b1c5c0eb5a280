//! Functions that look at neighbouring rows of the data columns.
//!
//! They have no scalar implementation: the evaluator resolves the window of
//! rows, evaluates the data argument on every row of it and hands the values
//! to [`ColumnFunction::reduce`].

use super::{Function, FunctionGroup, FunctionImpl};
use crate::symbols::SymbolTable;
use std::ops::Range;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ColumnFunction {
    /// `cell(f(i); x)`: value of `x` at the 1-based row `f(i)`.
    Cell,
    /// `ma(x)`: mean of the previous and the current row.
    MovingAverage,
    /// `mr(x)`: absolute change from the previous row.
    MovingRange,
    /// `smmin(n; x)`
    MovingMinimum,
    /// `smmax(n; x)`
    MovingMaximum,
    /// `sma(n; x)`
    MovingMean,
    /// `smr(n; x)`
    MovingSpread,
}

const ENTRIES: &[(&str, &str, ColumnFunction)] = &[
    ("cell", "Cell (row f(i) of x)", ColumnFunction::Cell),
    ("ma", "Moving Average", ColumnFunction::MovingAverage),
    ("mr", "Moving Range", ColumnFunction::MovingRange),
    ("smmin", "Simple Moving Minimum", ColumnFunction::MovingMinimum),
    ("smmax", "Simple Moving Maximum", ColumnFunction::MovingMaximum),
    ("sma", "Simple Moving Average", ColumnFunction::MovingMean),
    ("smr", "Simple Moving Range", ColumnFunction::MovingSpread),
];

pub fn register(table: &mut SymbolTable) {
    for (symbol, description, column) in ENTRIES {
        let function = Function::new(
            symbol,
            description,
            FunctionGroup::MovingStatistics,
            FunctionImpl::Column(*column),
        );
        let function = match column {
            ColumnFunction::Cell => function.with_parameters(&["f(i)", "x"]),
            ColumnFunction::MovingAverage | ColumnFunction::MovingRange => function,
            _ => function.with_parameters(&["n", "x"]),
        };
        table.add_function(function);
    }
}

impl ColumnFunction {
    pub fn arity(&self) -> usize {
        match self {
            ColumnFunction::MovingAverage | ColumnFunction::MovingRange => 1,
            _ => 2,
        }
    }

    /// Whether the first argument is a window length rather than data.
    pub fn takes_length(&self) -> bool {
        matches!(
            self,
            ColumnFunction::MovingMinimum
                | ColumnFunction::MovingMaximum
                | ColumnFunction::MovingMean
                | ColumnFunction::MovingSpread
        )
    }

    /// Rows feeding the statistic at `row`, or `None` when it is undefined there.
    /// `length` is only read by the `sm*` functions.
    pub fn window(&self, row: usize, length: f64) -> Option<Range<usize>> {
        match self {
            ColumnFunction::Cell => None,
            ColumnFunction::MovingAverage | ColumnFunction::MovingRange => {
                (row > 0).then(|| row - 1..row + 1)
            }
            _ => {
                let length = window_length(length)?;
                Some(row.saturating_sub(length - 1)..row + 1)
            }
        }
    }

    /// Reduces the values of a window returned by [`ColumnFunction::window`].
    pub fn reduce(&self, values: &[f64], length: f64) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        match self {
            ColumnFunction::Cell => f64::NAN,
            ColumnFunction::MovingAverage => values.iter().sum::<f64>() / values.len() as f64,
            ColumnFunction::MovingRange => (values[values.len() - 1] - values[0]).abs(),
            ColumnFunction::MovingMinimum => minimum(values),
            ColumnFunction::MovingMaximum => maximum(values),
            // leading rows are divided by the full window length as well
            ColumnFunction::MovingMean => match window_length(length) {
                Some(n) => values.iter().sum::<f64>() / n as f64,
                None => f64::NAN,
            },
            ColumnFunction::MovingSpread => maximum(values) - minimum(values),
        }
    }
}

fn window_length(length: f64) -> Option<usize> {
    if length.is_nan() || length < 1.0 {
        None
    } else {
        Some(length.floor().min(usize::MAX as f64) as usize)
    }
}

fn minimum(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn maximum(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        assert_eq!(ColumnFunction::Cell.arity(), 2);
        assert_eq!(ColumnFunction::MovingAverage.arity(), 1);
        assert_eq!(ColumnFunction::MovingSpread.arity(), 2);
        assert!(ColumnFunction::MovingMean.takes_length());
        assert!(!ColumnFunction::Cell.takes_length());
    }

    #[test]
    fn test_windows() {
        assert_eq!(ColumnFunction::MovingAverage.window(0, 0.0), None);
        assert_eq!(ColumnFunction::MovingAverage.window(3, 0.0), Some(2..4));
        assert_eq!(ColumnFunction::MovingMinimum.window(1, 4.0), Some(0..2));
        assert_eq!(ColumnFunction::MovingMinimum.window(6, 4.0), Some(3..7));
        assert_eq!(ColumnFunction::MovingMean.window(6, 0.0), None);
        assert_eq!(ColumnFunction::MovingMean.window(6, f64::NAN), None);
    }

    #[test]
    fn test_reductions() {
        let values = [3.0, 1.0, 4.0, 1.5];
        assert_eq!(ColumnFunction::MovingMinimum.reduce(&values, 4.0), 1.0);
        assert_eq!(ColumnFunction::MovingMaximum.reduce(&values, 4.0), 4.0);
        assert_eq!(ColumnFunction::MovingSpread.reduce(&values, 4.0), 3.0);
        assert_eq!(ColumnFunction::MovingMean.reduce(&values, 4.0), 2.375);
        assert_eq!(ColumnFunction::MovingMean.reduce(&[2.0, 4.0], 4.0), 1.5);
        assert_eq!(ColumnFunction::MovingAverage.reduce(&[1.0, 2.0], 0.0), 1.5);
        assert_eq!(ColumnFunction::MovingRange.reduce(&[5.0, 2.0], 0.0), 3.0);
        assert!(ColumnFunction::MovingMinimum.reduce(&[], 4.0).is_nan());
    }
}
