//! Velocity speed lookups over static performance tables.
//!
//! A [`VelocitySpeedTableSet`] holds the per-aircraft-type tables: takeoff
//! safety speed (V2) and landing/approach reference speeds (Vref, Vapp) as
//! functions of gross weight and flap/slat detent, and the maximum
//! operating speed/Mach (VMO/MMO) as functions of altitude. Which table set
//! applies to a given flight is decided upstream; queries here are pure
//! functions over an immutable, pre-validated set and may run concurrently
//! without coordination.

use std::collections::BTreeMap;

use vspeed_core::units::{self, Unit, UnitError};
use vspeed_core::Samples;
use vspeed_interp::Breakpoints;

/// Weight-banded table for one speed kind (v2, vref or vapp): per-detent
/// weight→speed breakpoints, plus per-detent fallback constants used when
/// no weight-resolved value is available.
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    pub detents: BTreeMap<String, Breakpoints>,
    pub fallback: BTreeMap<String, f64>,
}

impl WeightTable {
    /// Whether any weight-banded rows exist (as opposed to fallback only).
    pub fn is_banded(&self) -> bool {
        !self.detents.is_empty()
    }
}

/// Altitude-banded operating limit: absent, a fixed value, or a breakpoint
/// table over altitude. There is no fallback tier and no minimum-speed
/// floor for limits; absent or out-of-range data yields missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LimitTable {
    #[default]
    Undefined,
    Fixed(f64),
    Banded(Breakpoints),
}

impl LimitTable {
    /// Evaluate the limit at the supplied altitude(s).
    ///
    /// A fixed limit still respects positional missingness: slots with no
    /// recorded altitude stay missing.
    pub fn evaluate(&self, altitude: &Samples) -> Samples {
        match self {
            LimitTable::Undefined => altitude.to_missing(),
            LimitTable::Fixed(value) => altitude.map(|_| Some(*value)),
            LimitTable::Banded(table) => table.eval_samples(altitude),
        }
    }
}

/// Immutable velocity speed tables for one aircraft type.
///
/// `weight_unit` declares the unit of the weight axes in the reference
/// tables and must be a mass unit whenever any such table is present;
/// `weight_scale` is the magnitude of those axes (e.g. 1000 for tables
/// authored in thousands). Recorded weights are supplied in kilograms.
#[derive(Debug, Clone)]
pub struct VelocitySpeedTableSet {
    pub weight_unit: Option<Unit>,
    pub weight_scale: f64,
    /// Floor in knots applied to every resolved reference speed.
    pub minimum_speed: Option<f64>,
    /// Provenance of the table data, informational only.
    pub source: Option<String>,
    pub v2: WeightTable,
    pub vref: WeightTable,
    pub vapp: WeightTable,
    pub vmo: LimitTable,
    pub mmo: LimitTable,
}

impl Default for VelocitySpeedTableSet {
    fn default() -> Self {
        VelocitySpeedTableSet {
            weight_unit: None,
            weight_scale: 1.0,
            minimum_speed: None,
            source: None,
            v2: WeightTable::default(),
            vref: WeightTable::default(),
            vapp: WeightTable::default(),
            vmo: LimitTable::default(),
            mmo: LimitTable::default(),
        }
    }
}

impl VelocitySpeedTableSet {
    /// Takeoff safety speed for a flap/slat detent at the given gross
    /// weight(s) in kilograms.
    pub fn v2(&self, detent: &str, weight: Option<&Samples>) -> Result<Samples, UnitError> {
        self.reference_speed(&self.v2, detent, weight)
    }

    /// Landing reference speed.
    pub fn vref(&self, detent: &str, weight: Option<&Samples>) -> Result<Samples, UnitError> {
        self.reference_speed(&self.vref, detent, weight)
    }

    /// Approach reference speed.
    pub fn vapp(&self, detent: &str, weight: Option<&Samples>) -> Result<Samples, UnitError> {
        self.reference_speed(&self.vapp, detent, weight)
    }

    /// Maximum operating speed (knots) at the given altitude(s) in feet.
    pub fn vmo(&self, altitude: &Samples) -> Samples {
        self.vmo.evaluate(altitude)
    }

    /// Maximum operating Mach number at the given altitude(s) in feet.
    pub fn mmo(&self, altitude: &Samples) -> Samples {
        self.mmo.evaluate(altitude)
    }

    /// Shared weight-banded lookup.
    ///
    /// Resolution order: validate the declared weight unit (a precondition
    /// of accepting a weight argument, even when the call ends up resolved
    /// by a fallback constant), normalize the weight into the table's unit
    /// and scale, interpolate where possible, substitute the fallback
    /// constant per element where not, and apply the minimum-speed floor.
    fn reference_speed(
        &self,
        table: &WeightTable,
        detent: &str,
        weight: Option<&Samples>,
    ) -> Result<Samples, UnitError> {
        let supplied = match weight {
            Some(samples) => samples.clone(),
            // Weight not recorded: a fully-missing scalar, so a fallback
            // resolves to a scalar result.
            None => Samples::missing(),
        };
        let normalized = match (weight, self.weight_unit) {
            (Some(_), Some(unit)) => {
                // Fails for a non-mass unit before any table or fallback
                // logic runs.
                let per_kg = units::convert(1.0, Unit::Kilogram, unit)?;
                let scale = self.weight_scale;
                supplied.map(|value| Some(value * per_kg / scale))
            }
            // No declared unit (legal for fallback-only sets) or no weight
            // argument: nothing to interpolate against.
            _ => supplied.to_missing(),
        };

        let fallback = table.fallback.get(detent).copied();
        let mut result = match table.detents.get(detent) {
            Some(breakpoints) if !normalized.is_all_missing() => {
                let mut speeds = breakpoints.eval_samples(&normalized);
                // Per-element fallback: masked or out-of-range slots take
                // the configuration constant within the same call.
                if let Some(constant) = fallback {
                    speeds.fill_missing(constant);
                }
                speeds
            }
            // No weight-banded data for this detent, or the weight is
            // entirely missing: the fallback constant is broadcast over the
            // input shape, not marked missing.
            _ => match fallback {
                Some(constant) => supplied.broadcast(constant),
                None => supplied.to_missing(),
            },
        };

        if let Some(floor) = self.minimum_speed {
            result.clamp_min(floor);
        }
        // Reference speeds are reported in whole knots.
        Ok(result.map(|value| Some(value.round_ties_even())))
    }
}
