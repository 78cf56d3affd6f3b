//! Loading and validation of velocity speed table sets from authoring files.
//!
//! Table data is authored as YAML or TOML documents. Loading validates the
//! structural invariants once so queries never re-check them: breakpoint
//! series must be equal-length, ascending and non-negative; speeds must lie
//! in sensible ranges; a weight unit must be declared whenever weight-banded
//! tables exist. Authoring smells that are legal but suspect are returned as
//! warnings alongside the table set.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use vspeed_core::units::Unit;
use vspeed_interp::{BreakpointError, Breakpoints};
use vspeed_lookup::{LimitTable, VelocitySpeedTableSet, WeightTable};

/// Reference speeds stay within [80, 500) knots.
const SPEED_RANGE_KT: (f64, f64) = (80.0, 500.0);
/// Mach limits stay within [0, 1) until supersonic types are monitored.
const MACH_RANGE: (f64, f64) = (0.0, 1.0);

/// Raw weight-banded table as authored: one weight axis, one speed row per
/// flap/slat detent.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceTableConfig {
    pub weight: Vec<f64>,
    pub detents: BTreeMap<String, Vec<f64>>,
}

/// Raw operating limit: a bare number for a fixed limit, or parallel
/// altitude/speed series for a banded one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LimitTableConfig {
    Fixed(f64),
    Banded { altitude: Vec<f64>, speed: Vec<f64> },
}

/// Fallback constants per speed kind and detent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FallbackConfig {
    #[serde(default)]
    pub v2: BTreeMap<String, f64>,
    #[serde(default)]
    pub vref: BTreeMap<String, f64>,
    #[serde(default)]
    pub vapp: BTreeMap<String, f64>,
}

/// A velocity speed table set as authored, prior to validation.
#[derive(Debug, Clone, Deserialize)]
pub struct TableSetConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub weight_unit: Option<String>,
    #[serde(default = "default_weight_scale")]
    pub weight_scale: f64,
    #[serde(default)]
    pub minimum_speed: Option<f64>,
    #[serde(default)]
    pub v2: Option<ReferenceTableConfig>,
    #[serde(default)]
    pub vref: Option<ReferenceTableConfig>,
    #[serde(default)]
    pub vapp: Option<ReferenceTableConfig>,
    #[serde(default)]
    pub vmo: Option<LimitTableConfig>,
    #[serde(default)]
    pub mmo: Option<LimitTableConfig>,
    #[serde(default)]
    pub fallback: FallbackConfig,
}

fn default_weight_scale() -> f64 {
    1.0
}

/// Data errors in an authored table set.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("unknown unit name '{0}'")]
    UnknownUnit(String),
    #[error("weight unit '{0}' is not a mass unit")]
    NonMassWeightUnit(Unit),
    #[error("weight-banded tables present but no weight unit declared")]
    MissingWeightUnit,
    #[error("weight scale must be positive, got {0}")]
    InvalidWeightScale(f64),
    #[error("minimum speed must be at least 80 kt, got {0}")]
    InvalidMinimumSpeed(f64),
    #[error("no tables or fallback constants defined")]
    NoTables,
    #[error("{table} table has no detent rows")]
    NoDetents { table: &'static str },
    #[error("{table} table axis contains a negative value")]
    NegativeAxis { table: &'static str },
    #[error("{table} value {value} for detent '{detent}' outside [{}, {})", .range.0, .range.1)]
    SpeedOutOfRange {
        table: &'static str,
        detent: String,
        value: f64,
        range: (f64, f64),
    },
    #[error("{table} limit value {value} outside [{}, {})", .range.0, .range.1)]
    LimitOutOfRange {
        table: &'static str,
        value: f64,
        range: (f64, f64),
    },
    #[error("{table} table malformed: {source}")]
    Breakpoints {
        table: &'static str,
        #[source]
        source: BreakpointError,
    },
}

/// Errors that can occur while loading a table set file.
#[derive(Debug, Error)]
pub enum TableSetError {
    #[error("failed to read table set: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported table set extension '{0}'")]
    UnsupportedExtension(String),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Legal-but-suspect authoring patterns, surfaced for the author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableWarning {
    /// No provenance recorded for the table data.
    MissingSource,
    /// Authored in thousands of kilograms; should use tonnes.
    ThousandsOfKilograms,
}

impl fmt::Display for TableWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableWarning::MissingSource => {
                f.write_str("no source defined for velocity speed table data")
            }
            TableWarning::ThousandsOfKilograms => {
                f.write_str("weight axis in thousands of kilograms; use tonnes instead")
            }
        }
    }
}

/// A validated table set together with its authoring metadata.
#[derive(Debug, Clone)]
pub struct LoadedTableSet {
    pub name: Option<String>,
    pub table_set: VelocitySpeedTableSet,
    pub warnings: Vec<TableWarning>,
}

/// Load and validate a table set from a YAML or TOML file, dispatching on
/// the file extension.
pub fn load_table_set<P: AsRef<Path>>(path: P) -> Result<LoadedTableSet, TableSetError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let config: TableSetConfig = match extension.as_str() {
        "yaml" | "yml" => serde_yaml::from_reader(File::open(path)?)?,
        "toml" => toml::from_str(&std::fs::read_to_string(path)?)?,
        other => return Err(TableSetError::UnsupportedExtension(other.to_string())),
    };
    let loaded = build_table_set(config)?;
    Ok(loaded)
}

/// Validate an authored table set and construct the immutable runtime form.
pub fn build_table_set(config: TableSetConfig) -> Result<LoadedTableSet, TableError> {
    // NaN fails every range check here; validated tables must never carry
    // values that poison unchecked queries.
    if !config.weight_scale.is_finite() || config.weight_scale <= 0.0 {
        return Err(TableError::InvalidWeightScale(config.weight_scale));
    }
    if let Some(minimum) = config.minimum_speed {
        if minimum.is_nan() || minimum < SPEED_RANGE_KT.0 {
            return Err(TableError::InvalidMinimumSpeed(minimum));
        }
    }

    let weight_unit = config
        .weight_unit
        .as_deref()
        .map(parse_unit)
        .transpose()?;
    if let Some(unit) = weight_unit {
        if !unit.is_mass() {
            return Err(TableError::NonMassWeightUnit(unit));
        }
    }

    let v2 = build_weight_table("v2", config.v2.as_ref(), &config.fallback.v2)?;
    let vref = build_weight_table("vref", config.vref.as_ref(), &config.fallback.vref)?;
    let vapp = build_weight_table("vapp", config.vapp.as_ref(), &config.fallback.vapp)?;
    let vmo = build_limit_table("vmo", config.vmo.as_ref(), SPEED_RANGE_KT)?;
    let mmo = build_limit_table("mmo", config.mmo.as_ref(), MACH_RANGE)?;

    let banded = v2.is_banded() || vref.is_banded() || vapp.is_banded();
    if banded && weight_unit.is_none() {
        return Err(TableError::MissingWeightUnit);
    }
    let any_fallback = !v2.fallback.is_empty() || !vref.fallback.is_empty()
        || !vapp.fallback.is_empty();
    if !banded && !any_fallback && vmo == LimitTable::Undefined && mmo == LimitTable::Undefined {
        return Err(TableError::NoTables);
    }

    let mut warnings = Vec::new();
    if config
        .source
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .is_none()
    {
        warnings.push(TableWarning::MissingSource);
    }
    if weight_unit == Some(Unit::Kilogram) && config.weight_scale == 1_000.0 {
        warnings.push(TableWarning::ThousandsOfKilograms);
    }

    Ok(LoadedTableSet {
        name: config.name,
        table_set: VelocitySpeedTableSet {
            weight_unit,
            weight_scale: config.weight_scale,
            minimum_speed: config.minimum_speed,
            source: config.source,
            v2,
            vref,
            vapp,
            vmo,
            mmo,
        },
        warnings,
    })
}

/// Parse a unit name as written in authoring files.
pub fn parse_unit(name: &str) -> Result<Unit, TableError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "kg" | "kilogram" | "kilograms" => Ok(Unit::Kilogram),
        "lb" | "lbs" | "pound" | "pounds" => Ok(Unit::Pound),
        "t" | "tonne" | "tonnes" => Ok(Unit::Tonne),
        "kt" | "knot" | "knots" => Ok(Unit::Knot),
        "mach" => Ok(Unit::Mach),
        "ft" | "foot" | "feet" => Ok(Unit::Foot),
        other => Err(TableError::UnknownUnit(other.to_string())),
    }
}

fn build_weight_table(
    table: &'static str,
    config: Option<&ReferenceTableConfig>,
    fallback: &BTreeMap<String, f64>,
) -> Result<WeightTable, TableError> {
    for (detent, &value) in fallback {
        check_speed(table, detent, value)?;
    }
    let Some(config) = config else {
        return Ok(WeightTable {
            detents: BTreeMap::new(),
            fallback: fallback.clone(),
        });
    };

    if config.detents.is_empty() {
        return Err(TableError::NoDetents { table });
    }
    if config.weight.iter().any(|&w| w.is_nan() || w < 0.0) {
        return Err(TableError::NegativeAxis { table });
    }
    let mut detents = BTreeMap::new();
    for (detent, speeds) in &config.detents {
        for &value in speeds {
            check_speed(table, detent, value)?;
        }
        let breakpoints = Breakpoints::new(config.weight.clone(), speeds.clone())
            .map_err(|source| TableError::Breakpoints { table, source })?;
        detents.insert(detent.clone(), breakpoints);
    }
    Ok(WeightTable {
        detents,
        fallback: fallback.clone(),
    })
}

fn build_limit_table(
    table: &'static str,
    config: Option<&LimitTableConfig>,
    range: (f64, f64),
) -> Result<LimitTable, TableError> {
    let check = |value: f64| {
        if (range.0..range.1).contains(&value) {
            Ok(())
        } else {
            Err(TableError::LimitOutOfRange {
                table,
                value,
                range,
            })
        }
    };
    match config {
        None => Ok(LimitTable::Undefined),
        Some(LimitTableConfig::Fixed(value)) => {
            check(*value)?;
            Ok(LimitTable::Fixed(*value))
        }
        Some(LimitTableConfig::Banded { altitude, speed }) => {
            if altitude.iter().any(|&a| a.is_nan() || a < 0.0) {
                return Err(TableError::NegativeAxis { table });
            }
            for &value in speed {
                check(value)?;
            }
            let breakpoints = Breakpoints::new(altitude.clone(), speed.clone())
                .map_err(|source| TableError::Breakpoints { table, source })?;
            Ok(LimitTable::Banded(breakpoints))
        }
    }
}

fn check_speed(table: &'static str, detent: &str, value: f64) -> Result<(), TableError> {
    if !(SPEED_RANGE_KT.0..SPEED_RANGE_KT.1).contains(&value) {
        return Err(TableError::SpeedOutOfRange {
            table,
            detent: detent.to_string(),
            value,
            range: SPEED_RANGE_KT,
        });
    }
    Ok(())
}
