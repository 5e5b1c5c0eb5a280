//! Built-in constants. Physical values are in MKSA units.

use super::{Constant, ConstantGroup, SymbolTable};
use std::f64::consts::{E, PI};

/// Euler-Mascheroni constant.
pub const EULER: f64 = 0.577_215_664_901_532_9;

type Entry = (&'static str, &'static str, f64, &'static str);

const PROGRAMMING: &[Entry] = &[("RAND_MAX", "RAND_MAX", 2_147_483_647.0, "")];

const MATHEMATICAL: &[Entry] = &[
    ("e", "Base of exponentials", E, ""),
    ("pi", "Pi", PI, ""),
    ("PI", "Pi", PI, ""),
    ("euler", "Euler's constant", EULER, ""),
    ("nan", "Not a number", f64::NAN, ""),
];

const FUNDAMENTAL: &[Entry] = &[
    ("cL", "Speed of light", 2.997_924_58e8, "m / s"),
    ("mu0", "Vacuum permeability", 1.256_637_061_44e-6, "kg m / A^2 s^2"),
    ("e0", "Vacuum permittivity", 8.854_187_817e-12, "A^2 s^4 / kg m^3"),
    ("hPlanck", "Planck constant", 6.626_068_96e-34, "kg m^2 / s"),
    ("hbar", "Reduced Planck constant", 1.054_571_628_25e-34, "kg m^2 / s"),
    ("NA", "Avogadro constant", 6.022_141_99e23, "1 / mol"),
    ("Faraday", "Faraday", 9.648_534_297_75e4, "A s / mol"),
    ("kB", "Boltzmann constant", 1.380_650_4e-23, "kg m^2 / K s^2"),
    ("r0", "Molar gas", 8.314_472, "kg m^2 / K mol s^2"),
    ("v0", "Standard gas volume", 2.271_098_1e-2, "m^3 / mol"),
    ("sigma", "Stefan-Boltzmann constant", 5.670_400_473_74e-8, "kg / K^4 s^3"),
    ("Gauss", "Gauss", 1e-4, "kg / A s^2"),
];

const ASTRONOMY: &[Entry] = &[
    ("au", "Astronomical unit", 1.495_978_706_91e11, "m"),
    ("G", "Gravitational constant", 6.673e-11, "m^3 / kg s^2"),
    ("ly", "Light year", 9.460_536_207_07e15, "m"),
    ("pc", "Parsec", 3.085_677_581_35e16, "m"),
    ("gg", "Gravitational acceleration", 9.806_65, "m / s^2"),
    ("ms", "Solar mass", 1.988_92e30, "kg"),
];

const ATOMIC: &[Entry] = &[
    ("ee", "Charge of the electron", 1.602_176_487e-19, "A s"),
    ("ev", "Energy of 1 electron volt", 1.602_176_487e-19, "kg m^2 / s^2"),
    ("amu", "Unified atomic mass", 1.660_538_782e-27, "kg"),
    ("me", "Mass of the electron", 9.109_381_88e-31, "kg"),
    ("mmu", "Mass of the muon", 1.883_531_09e-28, "kg"),
    ("mp", "Mass of the proton", 1.672_621_58e-27, "kg"),
    ("mn", "Mass of the neutron", 1.674_927_16e-27, "kg"),
    ("alpha", "Electromagnetic fine structure constant", 7.297_352_533e-3, ""),
    ("Ry", "Rydberg constant", 2.179_871_969_68e-18, "kg m^2 / s^2"),
    ("aB", "Bohr radius", 5.291_772_083e-11, "m"),
    ("ao", "Length of 1 angstrom", 1e-10, "m"),
    ("barn", "Area of 1 barn", 1e-28, "m^2"),
    ("muB", "Bohr Magneton", 9.274_008_99e-24, "A m^2"),
    ("mun", "Nuclear Magneton", 5.050_783_17e-27, "A m^2"),
    ("mue", "Magnetic moment of the electron [absolute value]", 9.284_763_62e-24, "A m^2"),
    ("mup", "Magnetic moment of the proton", 1.410_606_633e-26, "A m^2"),
    ("sigmaT", "Thomson cross section", 6.652_458_936_99e-29, "m^2"),
    ("pD", "Electric dipole moment of 1 Debye", 3.335_640_951_98e-30, "A s^2 / m^2"),
];

const TIME: &[Entry] = &[
    ("minute", "Number of seconds in 1 minute", 60.0, "s"),
    ("hour", "Number of seconds in 1 hour", 3600.0, "s"),
    ("day", "Number of seconds in 1 day", 86400.0, "s"),
    ("week", "Number of seconds in 1 week", 604_800.0, "s"),
];

const IMPERIAL: &[Entry] = &[
    ("in", "Length of 1 inch", 2.54e-2, "m"),
    ("ft", "Length of 1 foot", 0.3048, "m"),
    ("yard", "Length of 1 yard", 0.9144, "m"),
    ("mile", "Length of 1 mile", 1609.344, "m"),
    ("mil", "Length of 1/1000th of an inch", 2.54e-5, "m"),
];

const NAUTICAL: &[Entry] = &[
    ("v_km_per_h", "Speed of 1 kilometer per hour", 0.277_777_777_778, "m / s"),
    ("v_mile_per_h", "Speed of 1 mile per hour", 0.447_04, "m / s"),
    ("nmile", "Length of 1 nautical mile", 1852.0, "m"),
    ("fathom", "Length of 1 fathom", 1.8288, "m"),
    ("knot", "Speed of 1 knot", 0.514_444_444_444, "m / s"),
];

const PRINTERS: &[Entry] = &[
    ("pt", "length of 1 printer's point [1/72 inch]", 3.527_777_777_78e-4, "m"),
    ("texpt", "length of 1 TeX point [1/72.27 inch]", 3.514_598_035_15e-4, "m"),
];

const VOLUME_AREA_LENGTH: &[Entry] = &[
    ("micron", "Length of 1 micron", 1e-6, "m"),
    ("hectare", "Area of 1 hectare", 1e4, "m^2"),
    ("acre", "Area of 1 acre", 4.046_856_422_41e3, "m^2"),
    ("liter", "Volume of 1 liter", 1e-3, "m^3"),
    ("us_gallon", "Volume of 1 US gallon", 3.785_411_784_02e-3, "m^3"),
    ("can_gallon", "Volume of 1 Canadian gallon", 4.546_09e-3, "m^3"),
    ("uk_gallon", "Volume of 1 UK gallon", 4.546_092e-3, "m^3"),
    ("quart", "Volume of 1 quart", 9.463_529_460_04e-4, "m^3"),
    ("pint", "Volume of 1 pint", 4.731_764_730_02e-4, "m^3"),
];

const MASS_WEIGHT: &[Entry] = &[
    ("pound", "Mass of 1 pound", 0.453_592_37, "kg"),
    ("ounce", "Mass of 1 ounce", 2.834_952_312_5e-2, "kg"),
    ("ton", "Mass of 1 ton", 907.184_74, "kg"),
    ("mton", "Mass of 1 metric ton [1000 kg]", 1000.0, "kg"),
    ("uk_ton", "Mass of 1 UK ton", 1016.046_908_8, "kg"),
    ("troy_ounce", "Mass of 1 troy ounce", 3.110_347_5e-2, "kg"),
    ("carat", "Mass of 1 carat", 2e-4, "kg"),
    ("gram_force", "Force of 1 gram weight", 9.806_65e-3, "kg m / s^2"),
    ("pound_force", "Force of 1 pound weight", 4.448_221_615_26, "kg m / s^2"),
    ("kilopound_force", "Force of 1 kilopound weight", 4448.221_615_26, "kg m / s^2"),
    ("poundal", "Force of 1 poundal", 0.138_255, "kg m / s^2"),
];

const THERMAL: &[Entry] = &[
    ("cal", "Energy of 1 calorie", 4.1868, "kg m^2 / s^2"),
    ("btu", "Energy of 1 British Thermal Unit", 1055.055_852_62, "kg m^2 / s^2"),
    ("therm", "Energy of 1 Therm", 1.055_06e8, "kg m^2 / s^2"),
    ("hp", "Power of 1 horsepower", 745.7, "kg m^2 / s^3"),
];

const PRESSURE: &[Entry] = &[
    ("bar", "Pressure of 1 bar", 1e5, "kg / m s^2"),
    ("atm", "Pressure of 1 standard atmosphere", 1.013_25e5, "kg / m s^2"),
    ("torr", "Pressure of 1 torr", 133.322_368_421, "kg / m s^2"),
    ("mhg", "Pressure of 1 meter of mercury", 1.333_223_684_21e5, "kg / m s^2"),
    ("inhg", "Pressure of 1 inch of mercury", 3386.388_157_89, "kg / m s^2"),
    ("inh2o", "Pressure of 1 inch of water", 249.088_9, "kg / m s^2"),
    ("psi", "Pressure of 1 pound per square inch", 6894.757_293_17, "kg / m s^2"),
];

const VISCOSITY: &[Entry] = &[
    ("poise", "Dynamic viscosity of 1 poise", 0.1, "kg / m s"),
    ("stokes", "Kinematic viscosity of 1 stokes", 1e-4, "m^2 / s"),
];

const LIGHT: &[Entry] = &[
    ("stilb", "Luminance of 1 stilb", 1e4, "cd / m^2"),
    ("lumen", "Luminous flux of 1 lumen", 1.0, "cd sr"),
    ("lux", "Illuminance of 1 lux", 1.0, "cd sr / m^2"),
    ("phot", "Illuminance of 1 phot", 1e4, "cd sr / m^2"),
    ("ftcandle", "Illuminance of 1 footcandle", 10.76, "cd sr / m^2"),
    ("lambert", "Luminance of 1 lambert", 1e4, "cd sr / m^2"),
    ("ftlambert", "Luminance of 1 footlambert", 10.763_910_4, "cd sr / m^2"),
];

const RADIOACTIVITY: &[Entry] = &[
    ("Curie", "Activity of 1 curie", 3.7e10, "1 / s"),
    ("Roentgen", "Exposure of 1 roentgen", 2.58e-4, "A s / kg"),
    ("rad", "Absorbed dose of 1 rad", 1e-2, "m^2 / s^2"),
];

const FORCE_ENERGY: &[Entry] = &[
    ("Newton", "SI unit of force", 1.0, "kg m / s^2"),
    ("dyne", "Force of 1 Dyne", 1e-5, "kg m / s^2"),
    ("Joule", "SI unit of energy", 1.0, "kg m^2 / s^2"),
    ("erg", "Energy 1 erg", 1e-7, "kg m^2 / s^2"),
];

const GROUPS: &[(ConstantGroup, &[Entry])] = &[
    (ConstantGroup::ProgrammingConstants, PROGRAMMING),
    (ConstantGroup::MathematicalConstants, MATHEMATICAL),
    (ConstantGroup::FundamentalConstants, FUNDAMENTAL),
    (ConstantGroup::AstronomyAndAstrophysics, ASTRONOMY),
    (ConstantGroup::AtomicAndNuclearPhysics, ATOMIC),
    (ConstantGroup::MeasurementOfTime, TIME),
    (ConstantGroup::ImperialUnits, IMPERIAL),
    (ConstantGroup::SpeedAndNauticalUnits, NAUTICAL),
    (ConstantGroup::PrintersUnits, PRINTERS),
    (ConstantGroup::VolumeAreaAndLength, VOLUME_AREA_LENGTH),
    (ConstantGroup::MassAndWeight, MASS_WEIGHT),
    (ConstantGroup::ThermalEnergyAndPower, THERMAL),
    (ConstantGroup::Pressure, PRESSURE),
    (ConstantGroup::Viscosity, VISCOSITY),
    (ConstantGroup::LightAndIllumination, LIGHT),
    (ConstantGroup::Radioactivity, RADIOACTIVITY),
    (ConstantGroup::ForceAndEnergy, FORCE_ENERGY),
];

pub fn register_constants(table: &mut SymbolTable) {
    for (group, entries) in GROUPS {
        for (symbol, description, value, unit) in *entries {
            table.add_constant(Constant::new(symbol, description, *value, unit, *group));
        }
    }
}
