#![warn(missing_docs)]
//! Matbasis Units
//!
//! Conversions between the metric and US-customary units material
//! properties are recorded in. Each dimension converts linearly through a
//! metric canonical unit; temperature is the one affine case.
//!
//! Conversion factors are the exact published definitions (25.4 mm per
//! inch, 6.894757 MPa per ksi) and are applied in one step per direction,
//! so converting a value out and back reproduces it to within rounding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Megapascals per kilopound-force per square inch.
pub const MPA_PER_KSI: f64 = 6.894757;
/// Gigapascals per megapound-force per square inch.
pub const GPA_PER_MSI: f64 = 6.894757;
/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;
/// Grams per cubic centimeter per pound per cubic inch.
pub const GCM3_PER_LBIN3: f64 = 27.679905;
/// Grams per square meter per ounce per square yard.
pub const GSM_PER_OZYD2: f64 = 33.905748;

/// Physical dimension a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Strength values (MPa, ksi).
    Stress,
    /// Stiffness values (GPa, Msi).
    Modulus,
    /// Thickness and geometry (mm, in).
    Length,
    /// Test and service temperatures.
    Temperature,
    /// Bulk density (g/cm3, lb/in3).
    Density,
    /// Fabric areal weight (g/m2, oz/yd2).
    ArealWeight,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dimension::Stress => "stress",
            Dimension::Modulus => "modulus",
            Dimension::Length => "length",
            Dimension::Temperature => "temperature",
            Dimension::Density => "density",
            Dimension::ArealWeight => "areal weight",
        };
        write!(f, "{name}")
    }
}

/// Display preference for rendering property values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// SI-derived units (MPa, GPa, mm, degC, g/cm3, g/m2).
    Metric,
    /// US-customary units (ksi, Msi, in, degF, lb/in3, oz/yd2).
    Imperial,
}

impl std::str::FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "us" => Ok(UnitSystem::Imperial),
            other => Err(format!(
                "unknown unit system '{other}' (expected 'metric' or 'imperial')"
            )),
        }
    }
}

/// Measurement units for material property values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Megapascals.
    #[serde(rename = "MPa")]
    Megapascal,
    /// Kilopounds-force per square inch.
    #[serde(rename = "ksi")]
    Ksi,
    /// Gigapascals.
    #[serde(rename = "GPa")]
    Gigapascal,
    /// Megapounds-force per square inch.
    #[serde(rename = "Msi")]
    Msi,
    /// Millimeters.
    #[serde(rename = "mm")]
    Millimeter,
    /// Inches.
    #[serde(rename = "in")]
    Inch,
    /// Degrees Celsius.
    #[serde(rename = "degC")]
    Celsius,
    /// Degrees Fahrenheit.
    #[serde(rename = "degF")]
    Fahrenheit,
    /// Grams per cubic centimeter.
    #[serde(rename = "g/cm3")]
    GramPerCubicCentimeter,
    /// Pounds per cubic inch.
    #[serde(rename = "lb/in3")]
    PoundPerCubicInch,
    /// Grams per square meter.
    #[serde(rename = "g/m2")]
    GramPerSquareMeter,
    /// Ounces per square yard.
    #[serde(rename = "oz/yd2")]
    OuncePerSquareYard,
}

impl Unit {
    /// The dimension this unit measures.
    pub fn dimension(self) -> Dimension {
        match self {
            Unit::Megapascal | Unit::Ksi => Dimension::Stress,
            Unit::Gigapascal | Unit::Msi => Dimension::Modulus,
            Unit::Millimeter | Unit::Inch => Dimension::Length,
            Unit::Celsius | Unit::Fahrenheit => Dimension::Temperature,
            Unit::GramPerCubicCentimeter | Unit::PoundPerCubicInch => Dimension::Density,
            Unit::GramPerSquareMeter | Unit::OuncePerSquareYard => Dimension::ArealWeight,
        }
    }

    /// The unit's display symbol, matching its serialized form.
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Megapascal => "MPa",
            Unit::Ksi => "ksi",
            Unit::Gigapascal => "GPa",
            Unit::Msi => "Msi",
            Unit::Millimeter => "mm",
            Unit::Inch => "in",
            Unit::Celsius => "degC",
            Unit::Fahrenheit => "degF",
            Unit::GramPerCubicCentimeter => "g/cm3",
            Unit::PoundPerCubicInch => "lb/in3",
            Unit::GramPerSquareMeter => "g/m2",
            Unit::OuncePerSquareYard => "oz/yd2",
        }
    }

    /// The same-dimension unit belonging to `system`.
    pub fn in_system(self, system: UnitSystem) -> Unit {
        match system {
            UnitSystem::Metric => match self {
                Unit::Ksi => Unit::Megapascal,
                Unit::Msi => Unit::Gigapascal,
                Unit::Inch => Unit::Millimeter,
                Unit::Fahrenheit => Unit::Celsius,
                Unit::PoundPerCubicInch => Unit::GramPerCubicCentimeter,
                Unit::OuncePerSquareYard => Unit::GramPerSquareMeter,
                metric => metric,
            },
            UnitSystem::Imperial => match self {
                Unit::Megapascal => Unit::Ksi,
                Unit::Gigapascal => Unit::Msi,
                Unit::Millimeter => Unit::Inch,
                Unit::Celsius => Unit::Fahrenheit,
                Unit::GramPerCubicCentimeter => Unit::PoundPerCubicInch,
                Unit::GramPerSquareMeter => Unit::OuncePerSquareYard,
                imperial => imperial,
            },
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::str::FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // symbols first, then the aliases datasets show up with
        match s {
            "MPa" | "mpa" => Ok(Unit::Megapascal),
            "ksi" | "KSI" => Ok(Unit::Ksi),
            "GPa" | "gpa" => Ok(Unit::Gigapascal),
            "Msi" | "msi" => Ok(Unit::Msi),
            "mm" => Ok(Unit::Millimeter),
            "in" | "inch" => Ok(Unit::Inch),
            "degC" | "C" | "°C" => Ok(Unit::Celsius),
            "degF" | "F" | "°F" => Ok(Unit::Fahrenheit),
            "g/cm3" | "g/cc" => Ok(Unit::GramPerCubicCentimeter),
            "lb/in3" | "pci" => Ok(Unit::PoundPerCubicInch),
            "g/m2" | "gsm" => Ok(Unit::GramPerSquareMeter),
            "oz/yd2" | "osy" => Ok(Unit::OuncePerSquareYard),
            other => Err(UnitError::UnknownUnit(other.to_string())),
        }
    }
}

/// Unit lookup and conversion failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// A unit symbol no table knows.
    #[error("unknown unit symbol '{0}'")]
    UnknownUnit(String),
    /// The two units measure different dimensions.
    #[error("cannot convert {from} to {to}: {from_dimension} vs {to_dimension}")]
    IncompatibleDimensions {
        /// Source unit.
        from: Unit,
        /// Destination unit.
        to: Unit,
        /// Source unit's dimension.
        from_dimension: Dimension,
        /// Destination unit's dimension.
        to_dimension: Dimension,
    },
}

/// Convert `value` from one unit to another of the same dimension.
pub fn convert(value: f64, from: Unit, to: Unit) -> Result<f64, UnitError> {
    if from.dimension() != to.dimension() {
        return Err(UnitError::IncompatibleDimensions {
            from,
            to,
            from_dimension: from.dimension(),
            to_dimension: to.dimension(),
        });
    }
    if from == to {
        return Ok(value);
    }
    Ok(from_canonical(to_canonical(value, from), to))
}

/// Into the dimension's metric canonical unit.
fn to_canonical(value: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Megapascal
        | Unit::Gigapascal
        | Unit::Millimeter
        | Unit::Celsius
        | Unit::GramPerCubicCentimeter
        | Unit::GramPerSquareMeter => value,
        Unit::Ksi => value * MPA_PER_KSI,
        Unit::Msi => value * GPA_PER_MSI,
        Unit::Inch => value * MM_PER_INCH,
        Unit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        Unit::PoundPerCubicInch => value * GCM3_PER_LBIN3,
        Unit::OuncePerSquareYard => value * GSM_PER_OZYD2,
    }
}

/// Out of the dimension's metric canonical unit.
fn from_canonical(value: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Megapascal
        | Unit::Gigapascal
        | Unit::Millimeter
        | Unit::Celsius
        | Unit::GramPerCubicCentimeter
        | Unit::GramPerSquareMeter => value,
        Unit::Ksi => value / MPA_PER_KSI,
        Unit::Msi => value / GPA_PER_MSI,
        Unit::Inch => value / MM_PER_INCH,
        Unit::Fahrenheit => value * 9.0 / 5.0 + 32.0,
        Unit::PoundPerCubicInch => value / GCM3_PER_LBIN3,
        Unit::OuncePerSquareYard => value / GSM_PER_OZYD2,
    }
}
