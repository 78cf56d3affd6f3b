//! Unit identifiers and weight conversions.
//!
//! Recorded gross weights arrive in kilograms; tables may be authored in
//! kilograms, pounds or tonnes. The remaining variants name units that
//! appear elsewhere in flight data (airspeed in knots, Mach number,
//! altitude in feet) so that a misconfigured `weight_unit` is expressible
//! and rejected at query time rather than silently converted.

use std::fmt;

use thiserror::Error;

/// Units understood by the velocity speed tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Kilogram,
    Pound,
    Tonne,
    Knot,
    Mach,
    Foot,
}

impl Unit {
    /// Kilograms per one of this unit, for mass units only.
    pub fn kg_per_unit(self) -> Option<f64> {
        match self {
            Unit::Kilogram => Some(1.0),
            Unit::Pound => Some(0.453_592_37),
            Unit::Tonne => Some(1_000.0),
            Unit::Knot | Unit::Mach | Unit::Foot => None,
        }
    }

    /// Whether this unit measures mass and can take part in weight
    /// conversions.
    pub fn is_mass(self) -> bool {
        self.kg_per_unit().is_some()
    }

    /// Canonical short name, as written in authoring files.
    pub fn name(self) -> &'static str {
        match self {
            Unit::Kilogram => "kg",
            Unit::Pound => "lb",
            Unit::Tonne => "t",
            Unit::Knot => "kt",
            Unit::Mach => "mach",
            Unit::Foot => "ft",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors surfaced by unit conversions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UnitError {
    #[error("unsupported unit conversion from '{from}' to '{to}'")]
    UnsupportedConversion { from: Unit, to: Unit },
}

/// Convert `value` between weight units.
///
/// Identity for equal units; defined between any two mass units; any other
/// pairing fails. Unit validity is checked before the value is touched, so
/// callers may probe with a dummy value to validate a configured unit.
pub fn convert(value: f64, from: Unit, to: Unit) -> Result<f64, UnitError> {
    if from == to {
        return Ok(value);
    }
    match (from.kg_per_unit(), to.kg_per_unit()) {
        (Some(from_kg), Some(to_kg)) => Ok(value * from_kg / to_kg),
        _ => Err(UnitError::UnsupportedConversion { from, to }),
    }
}
