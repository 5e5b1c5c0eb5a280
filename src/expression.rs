use crate::ast::{ASTNode, Evaluator, Parser, RowData};
use crate::bindings::Bindings;
use crate::error::{ExprError, ExprResult};
use crate::symbols::{format_significant, SymbolTable};
use log::debug;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Domain of an equation; decides the free variable and argument hints.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum EquationType {
    #[default]
    Cartesian,
    Polar,
    Parametric,
    Implicit,
    Neutral,
}

impl EquationType {
    pub fn free_variable(&self) -> &'static str {
        match self {
            EquationType::Polar => "phi",
            EquationType::Parametric => "t",
            EquationType::Cartesian | EquationType::Implicit | EquationType::Neutral => "x",
        }
    }

    fn default_arguments(&self, count: usize) -> &'static str {
        match (count, self) {
            (0, _) => "()",
            (1, EquationType::Polar) => "(phi)",
            (1, EquationType::Parametric) => "(t)",
            (1, _) => "(x)",
            (2, EquationType::Polar) => "(phi; theta)",
            (2, EquationType::Parametric) => "(u; v)",
            (2, _) => "(x; y)",
            (3, EquationType::Polar) => "(alpha; beta; gamma)",
            (3, EquationType::Parametric) => "(u; v; w)",
            (3, _) => "(x; y; z)",
            (4, EquationType::Polar) => "(alpha; beta; gamma; delta)",
            (4, _) => "(a; b; c; d)",
            _ => "(...)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Parsed expressions kept per parser; 0 disables the cache.
    pub cache_capacity: usize,
    /// Log a warning for every sample that evaluates to NaN.
    pub log_nan_samples: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 64,
            log_nan_samples: true,
        }
    }
}

/// One evaluation context: owns its variable bindings, error state and
/// cache of parsed expressions, and shares the symbol table.
pub struct ExpressionParser {
    symbols: Arc<SymbolTable>,
    bindings: Bindings,
    cache: Option<LruCache<String, Arc<ASTNode>>>,
    config: ParserConfig,
    parse_errors: usize,
    last_error: Option<ExprError>,
}

impl Default for ExpressionParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionParser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self::with_symbols(SymbolTable::global_shared(), config)
    }

    /// A parser over a custom (for example extended) symbol table.
    pub fn with_symbols(symbols: Arc<SymbolTable>, config: ParserConfig) -> Self {
        let cache = NonZeroUsize::new(config.cache_capacity).map(LruCache::new);
        Self {
            symbols,
            bindings: Bindings::new(),
            cache,
            config,
            parse_errors: 0,
            last_error: None,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Parses `expression`, reusing a cached tree when there is one.
    pub fn compile(&mut self, expression: &str) -> ExprResult<Arc<ASTNode>> {
        if let Some(cache) = self.cache.as_mut() {
            if let Some(ast) = cache.get(expression) {
                return Ok(Arc::clone(ast));
            }
        }

        let ast = Arc::new(Parser::parse_expression(expression)?);
        if let Some(cache) = self.cache.as_mut() {
            cache.put(expression.to_string(), Arc::clone(&ast));
        }
        Ok(ast)
    }

    /// Parses and evaluates `expression`. Returns NaN on failure; see
    /// [`ExpressionParser::parse_errors`] and [`ExpressionParser::last_error`].
    pub fn parse(&mut self, expression: &str) -> f64 {
        self.evaluate(expression).unwrap_or(f64::NAN)
    }

    pub fn evaluate(&mut self, expression: &str) -> ExprResult<f64> {
        let result = self
            .compile(expression)
            .and_then(|ast| self.evaluate_tree(&ast));
        self.record(result)
    }

    /// Evaluates an already parsed expression against the current bindings.
    pub fn evaluate_ast(&mut self, ast: &ASTNode) -> ExprResult<f64> {
        let result = self.evaluate_tree(ast);
        self.record(result)
    }

    /// Evaluates with the column variables of `row` in scope.
    pub fn evaluate_row(&mut self, ast: &ASTNode, row: &RowData) -> ExprResult<f64> {
        let result = Evaluator::new(&self.symbols, &self.bindings).evaluate_row(ast, row);
        self.record(result)
    }

    /// Errors recorded by the last evaluation: 0 on success.
    pub fn parse_errors(&self) -> usize {
        self.parse_errors
    }

    pub fn last_error(&self) -> Option<&ExprError> {
        self.last_error.as_ref()
    }

    pub(crate) fn evaluate_tree(&self, ast: &ASTNode) -> ExprResult<f64> {
        Evaluator::new(&self.symbols, &self.bindings).evaluate(ast)
    }

    pub(crate) fn record<T>(&mut self, result: ExprResult<T>) -> ExprResult<T> {
        match &result {
            Ok(_) => {
                self.parse_errors = 0;
                self.last_error = None;
            }
            Err(err) => {
                debug!("evaluation failed: {}", err);
                self.parse_errors = 1;
                self.last_error = Some(err.clone());
            }
        }
        result
    }

    pub fn assign_variable(&mut self, name: &str, value: f64) -> Option<f64> {
        self.bindings.assign(name, value)
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<f64> {
        self.bindings.remove(name)
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    /// Checks `expression` with the free variable of `kind` set to 0.
    pub fn is_valid(&mut self, expression: &str, kind: EquationType) -> bool {
        self.is_valid_with(expression, &[kind.free_variable()])
    }

    /// Checks `expression` with every variable of `variables` set to 0.
    ///
    /// The variables are evaluated as a single row of data, so column functions
    /// and the row index `i` are accepted. Bindings are left untouched.
    pub fn is_valid_with(&mut self, expression: &str, variables: &[&str]) -> bool {
        let zero = [0.0];
        let columns: Vec<&[f64]> = variables.iter().map(|_| &zero[..]).collect();
        let row = RowData::new(variables, &columns, 0);
        let result = self.compile(expression).and_then(|ast| {
            Evaluator::new(&self.symbols, &self.bindings).evaluate_row(&ast, &row)
        });
        self.record(result).is_ok()
    }

    /// Names in `expression` that are neither constants, functions, numbers nor
    /// one of `variables`, in order of first appearance.
    pub fn get_parameter(&self, expression: &str, variables: &[&str]) -> Vec<String> {
        let mut parameters: Vec<String> = Vec::new();
        let tokens = expression
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| !token.is_empty());
        for token in tokens {
            let is_number = token.starts_with(|c: char| c.is_ascii_digit());
            if is_number
                || self.symbols.constant(token).is_some()
                || self.symbols.function(token).is_some()
                || variables.contains(&token)
                || parameters.iter().any(|p| p == token)
            {
                continue;
            }
            parameters.push(token.to_string());
        }
        parameters
    }

    /// Parameter names of `name` if it declares them, otherwise a placeholder
    /// list that fits the domain: `(x; y)` for a binary Cartesian function.
    pub fn function_argument_string(&self, name: &str, kind: EquationType) -> String {
        if let Some(parameters) = self.parameters(name) {
            return parameters;
        }
        let count = self.symbols.function_argument_count(name);
        count
            .map_or("(...)", |count| kind.default_arguments(count))
            .to_string()
    }

    pub fn function_description(&self, name: &str) -> Option<&str> {
        self.symbols
            .function(name)
            .map(|function| function.description.as_str())
    }

    /// `"description (value unit)"`.
    pub fn constant_description(&self, name: &str) -> Option<String> {
        self.symbols.constant(name).map(|constant| {
            let value = format_significant(constant.value, 15);
            if constant.unit.is_empty() {
                format!("{} ({})", constant.description, value)
            } else {
                format!("{} ({} {})", constant.description, value, constant.unit)
            }
        })
    }

    pub fn parameters(&self, name: &str) -> Option<String> {
        self.symbols.function(name).and_then(|f| f.parameters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::Function;

    #[test]
    fn test_parse_records_errors() {
        let mut parser = ExpressionParser::new();
        assert_eq!(parser.parse("1 + 2"), 3.0);
        assert_eq!(parser.parse_errors(), 0);
        assert!(parser.last_error().is_none());

        assert!(parser.parse("1 + ").is_nan());
        assert_eq!(parser.parse_errors(), 1);
        assert!(matches!(parser.last_error(), Some(ExprError::Syntax { .. })));

        // the counter is reset by the next call
        assert_eq!(parser.parse("2"), 2.0);
        assert_eq!(parser.parse_errors(), 0);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let mut parser = ExpressionParser::new();
        parser.assign_variable("x", 0.5);
        let first = parser.parse("sin(x)+exp(-x^2)");
        let second = parser.parse("sin(x)+exp(-x^2)");
        assert_eq!(first, second);
    }

    #[test]
    fn test_cache_disabled() {
        let config = ParserConfig {
            cache_capacity: 0,
            ..ParserConfig::default()
        };
        let mut parser = ExpressionParser::with_config(config);
        assert_eq!(parser.parse("2*3"), 6.0);
        assert_eq!(parser.parse("2*3"), 6.0);
    }

    #[test]
    fn test_bindings_are_per_parser() {
        let mut first = ExpressionParser::new();
        let mut second = ExpressionParser::new();
        first.assign_variable("a", 1.0);
        assert_eq!(first.parse("a"), 1.0);
        assert!(second.parse("a").is_nan());
        assert!(matches!(
            second.last_error(),
            Some(ExprError::UnknownIdentifier { .. })
        ));
    }

    #[test]
    fn test_is_valid_restores_bindings() {
        let mut parser = ExpressionParser::new();
        parser.assign_variable("x", 7.0);
        assert!(parser.is_valid("sin(x)", EquationType::Cartesian));
        assert!(!parser.is_valid("sin(y)", EquationType::Cartesian));
        assert!(parser.is_valid("cos(phi)", EquationType::Polar));
        assert!(!parser.is_valid("cos(phi)", EquationType::Parametric));
        assert_eq!(parser.bindings().get("x"), Some(7.0));
        assert!(!parser.bindings().contains("phi"));
    }

    #[test]
    fn test_is_valid_with_columns() {
        let mut parser = ExpressionParser::new();
        assert!(parser.is_valid_with("x + y", &["x", "y"]));
        assert!(parser.is_valid_with("cell(i; x)", &["x"]));
        assert!(parser.is_valid_with("sma(4; x)", &["x"]));
        assert!(!parser.is_valid_with("x + z", &["x", "y"]));
        assert!(parser.bindings().is_empty());
    }

    #[test]
    fn test_get_parameter() {
        let parser = ExpressionParser::new();
        assert_eq!(
            parser.get_parameter("a*sin(b*x) + a + 2*pi + c1", &["x"]),
            vec!["a", "b", "c1"]
        );
        assert!(parser.get_parameter("1.5e3*x", &["x"]).is_empty());
    }

    #[test]
    fn test_argument_strings() {
        let parser = ExpressionParser::new();
        assert_eq!(
            parser.function_argument_string("if", EquationType::Cartesian),
            "(condition; trueValue; falseValue)"
        );
        assert_eq!(parser.function_argument_string("sin", EquationType::Polar), "(phi)");
        assert_eq!(parser.function_argument_string("atan2", EquationType::Parametric), "(u; v)");
        assert_eq!(parser.function_argument_string("rand", EquationType::Neutral), "()");
        assert_eq!(parser.function_argument_string("nosuch", EquationType::Cartesian), "(...)");
        assert_eq!(parser.parameters("sma").as_deref(), Some("(n; x)"));
        assert_eq!(parser.parameters("sin"), None);
    }

    #[test]
    fn test_descriptions() {
        let parser = ExpressionParser::new();
        assert_eq!(parser.function_description("sin"), Some("Sine"));
        assert_eq!(
            parser.constant_description("pi").as_deref(),
            Some("Pi (3.14159265358979)")
        );
        assert_eq!(
            parser.constant_description("cL").as_deref(),
            Some("Speed of light (299792458 m / s)")
        );
        assert_eq!(parser.constant_description("nosuch"), None);
    }

    #[test]
    fn test_custom_symbol_table() {
        let mut table = SymbolTable::builtin();
        table.add_function(Function::dynamic("avg3", "Mean of three", 3, |args| {
            args.iter().sum::<f64>() / 3.0
        }));
        let mut parser = ExpressionParser::with_symbols(Arc::new(table), ParserConfig::default());
        assert_eq!(parser.parse("avg3(1; 2; 6)"), 3.0);
    }
}
