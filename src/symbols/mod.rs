//! Catalog of named constants and functions.
//!
//! The built-in catalog is assembled once per process and shared read-only;
//! [`SymbolTable::builtin`] returns an owned copy that can be extended.

mod constants;

pub use constants::EULER;

use crate::functions::{register_functions, Function, FunctionGroup};
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

static GLOBAL: Lazy<Arc<SymbolTable>> = Lazy::new(|| Arc::new(SymbolTable::builtin()));

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstantGroup {
    ProgrammingConstants,
    MathematicalConstants,
    FundamentalConstants,
    AstronomyAndAstrophysics,
    AtomicAndNuclearPhysics,
    MeasurementOfTime,
    ImperialUnits,
    SpeedAndNauticalUnits,
    PrintersUnits,
    VolumeAreaAndLength,
    MassAndWeight,
    ThermalEnergyAndPower,
    Pressure,
    Viscosity,
    LightAndIllumination,
    Radioactivity,
    ForceAndEnergy,
}

impl ConstantGroup {
    pub const ALL: [ConstantGroup; 17] = [
        ConstantGroup::ProgrammingConstants,
        ConstantGroup::MathematicalConstants,
        ConstantGroup::FundamentalConstants,
        ConstantGroup::AstronomyAndAstrophysics,
        ConstantGroup::AtomicAndNuclearPhysics,
        ConstantGroup::MeasurementOfTime,
        ConstantGroup::ImperialUnits,
        ConstantGroup::SpeedAndNauticalUnits,
        ConstantGroup::PrintersUnits,
        ConstantGroup::VolumeAreaAndLength,
        ConstantGroup::MassAndWeight,
        ConstantGroup::ThermalEnergyAndPower,
        ConstantGroup::Pressure,
        ConstantGroup::Viscosity,
        ConstantGroup::LightAndIllumination,
        ConstantGroup::Radioactivity,
        ConstantGroup::ForceAndEnergy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConstantGroup::ProgrammingConstants => "Programming constants",
            ConstantGroup::MathematicalConstants => "Mathematical constants",
            ConstantGroup::FundamentalConstants => "Fundamental constants",
            ConstantGroup::AstronomyAndAstrophysics => "Astronomy and Astrophysics",
            ConstantGroup::AtomicAndNuclearPhysics => "Atomic and Nuclear Physics",
            ConstantGroup::MeasurementOfTime => "Measurement of Time",
            ConstantGroup::ImperialUnits => "Imperial Units",
            ConstantGroup::SpeedAndNauticalUnits => "Speed and Nautical Units",
            ConstantGroup::PrintersUnits => "Printers Units",
            ConstantGroup::VolumeAreaAndLength => "Volume, Area and Length",
            ConstantGroup::MassAndWeight => "Mass and Weight",
            ConstantGroup::ThermalEnergyAndPower => "Thermal Energy and Power",
            ConstantGroup::Pressure => "Pressure",
            ConstantGroup::Viscosity => "Viscosity",
            ConstantGroup::LightAndIllumination => "Light and Illumination",
            ConstantGroup::Radioactivity => "Radioactivity",
            ConstantGroup::ForceAndEnergy => "Force and Energy",
        }
    }
}

impl fmt::Display for ConstantGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub symbol: String,
    pub description: String,
    pub value: f64,
    pub unit: String,
    pub group: ConstantGroup,
}

impl Constant {
    pub fn new(
        symbol: &str,
        description: &str,
        value: f64,
        unit: &str,
        group: ConstantGroup,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            description: description.to_string(),
            value,
            unit: unit.to_string(),
            group,
        }
    }
}

/// Constants and functions in registration order, indexed by symbol.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    constants: Vec<Constant>,
    constant_index: HashMap<String, usize>,
    functions: Vec<Function>,
    function_index: HashMap<String, usize>,
}

impl SymbolTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh copy of the built-in catalog.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        constants::register_constants(&mut table);
        register_functions(&mut table);
        debug!(
            "built symbol table with {} constants and {} functions",
            table.constants.len(),
            table.functions.len()
        );
        table
    }

    /// The process-wide built-in catalog, initialized on first use.
    pub fn global() -> &'static SymbolTable {
        &GLOBAL
    }

    pub fn global_shared() -> Arc<SymbolTable> {
        Arc::clone(&GLOBAL)
    }

    /// Adds a constant; an existing constant with the same symbol is replaced.
    pub fn add_constant(&mut self, constant: Constant) {
        match self.constant_index.get(&constant.symbol) {
            Some(&index) => self.constants[index] = constant,
            None => {
                self.constant_index
                    .insert(constant.symbol.clone(), self.constants.len());
                self.constants.push(constant);
            }
        }
    }

    /// Adds a function; an existing function with the same symbol is replaced.
    pub fn add_function(&mut self, function: Function) {
        match self.function_index.get(&function.symbol) {
            Some(&index) => self.functions[index] = function,
            None => {
                self.function_index
                    .insert(function.symbol.clone(), self.functions.len());
                self.functions.push(function);
            }
        }
    }

    pub fn constant(&self, symbol: &str) -> Option<&Constant> {
        self.constant_index
            .get(symbol)
            .map(|&index| &self.constants[index])
    }

    pub fn function(&self, symbol: &str) -> Option<&Function> {
        self.function_index
            .get(symbol)
            .map(|&index| &self.functions[index])
    }

    pub fn constant_entries(&self) -> &[Constant] {
        &self.constants
    }

    pub fn function_entries(&self) -> &[Function] {
        &self.functions
    }

    pub fn constants(&self) -> Vec<&str> {
        self.constants.iter().map(|c| c.symbol.as_str()).collect()
    }

    pub fn constants_names(&self) -> Vec<&str> {
        self.constants.iter().map(|c| c.description.as_str()).collect()
    }

    /// Values with 15 significant digits, parallel to [`SymbolTable::constants`].
    pub fn constants_values(&self) -> Vec<String> {
        self.constants
            .iter()
            .map(|c| format_significant(c.value, 15))
            .collect()
    }

    pub fn constants_units(&self) -> Vec<&str> {
        self.constants.iter().map(|c| c.unit.as_str()).collect()
    }

    /// Index of each constant's group in [`ConstantGroup::ALL`].
    pub fn constants_group_indices(&self) -> Vec<usize> {
        self.constants.iter().map(|c| c.group as usize).collect()
    }

    pub fn constants_groups() -> Vec<&'static str> {
        ConstantGroup::ALL.iter().map(|g| g.name()).collect()
    }

    pub fn functions(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.symbol.as_str()).collect()
    }

    pub fn functions_names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.description.as_str()).collect()
    }

    /// Index of each function's group in [`FunctionGroup::ALL`].
    pub fn functions_group_indices(&self) -> Vec<usize> {
        self.functions.iter().map(|f| f.group as usize).collect()
    }

    pub fn functions_groups() -> Vec<&'static str> {
        FunctionGroup::ALL.iter().map(|g| g.name()).collect()
    }

    pub fn function_argument_count(&self, symbol: &str) -> Option<usize> {
        self.function(symbol).map(Function::arity)
    }
}

/// Formats `value` with at most `digits` significant digits, dropping trailing zeros.
/// Switches to exponent notation for very small or large magnitudes.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -5 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::FunctionImpl;

    #[test]
    fn test_global_catalog_lookups() {
        let table = SymbolTable::global();
        assert_eq!(table.constant("pi").map(|c| c.value), Some(std::f64::consts::PI));
        assert_eq!(table.function_argument_count("sin"), Some(1));
        assert_eq!(table.function_argument_count("if"), Some(3));
        assert_eq!(table.function_argument_count("rand"), Some(0));
        assert!(table.function("nosuch").is_none());
        assert!(table.functions().len() > 150);
    }

    #[test]
    fn test_parallel_metadata() {
        let table = SymbolTable::global();
        let n = table.constants().len();
        assert_eq!(table.constants_names().len(), n);
        assert_eq!(table.constants_values().len(), n);
        assert_eq!(table.constants_units().len(), n);
        assert_eq!(table.constants_group_indices().len(), n);
        let groups = SymbolTable::constants_groups();
        assert!(table.constants_group_indices().iter().all(|&g| g < groups.len()));

        let m = table.functions().len();
        assert_eq!(table.functions_names().len(), m);
        let groups = SymbolTable::functions_groups();
        assert!(table.functions_group_indices().iter().all(|&g| g < groups.len()));
    }

    #[test]
    fn test_function_symbols_are_unique() {
        let table = SymbolTable::builtin();
        let mut symbols = table.functions();
        let total = symbols.len();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), total);
    }

    #[test]
    fn test_duplicate_registration_replaces() {
        let mut table = SymbolTable::new();
        let group = ConstantGroup::ProgrammingConstants;
        table.add_constant(Constant::new("k", "first", 1.0, "", group));
        table.add_constant(Constant::new("k", "second", 2.0, "", group));
        assert_eq!(table.constants(), vec!["k"]);
        assert_eq!(table.constant("k").map(|c| c.value), Some(2.0));

        table.add_function(Function::dynamic("twice", "", 1, |args| 2.0 * args[0]));
        table.add_function(Function::dynamic("twice", "", 1, |args| 3.0 * args[0]));
        let function = table.function("twice").map(|f| &f.implementation);
        assert!(matches!(function, Some(FunctionImpl::Dynamic { .. })));
        assert_eq!(function.map(|f| f.call(&[1.0])), Some(3.0));
        assert_eq!(table.functions().len(), 1);
    }

    #[test]
    fn test_format_significant() {
        assert_eq!(format_significant(std::f64::consts::PI, 15), "3.14159265358979");
        assert_eq!(format_significant(2_147_483_647.0, 15), "2147483647");
        assert_eq!(format_significant(2.997_924_58e8, 15), "299792458");
        assert_eq!(format_significant(6.626_068_96e-34, 15), "6.62606896e-34");
        assert_eq!(format_significant(1e-4, 15), "0.0001");
        assert_eq!(format_significant(6.022_141_99e23, 15), "6.02214199e+23");
        assert_eq!(format_significant(-0.5, 15), "-0.5");
        assert_eq!(format_significant(0.0, 15), "0");
        assert_eq!(format_significant(f64::NAN, 15), "nan");
    }
}
