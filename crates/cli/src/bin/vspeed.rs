//! Query a velocity speed table set from the command line.
//!
//! Scalar queries take `--weight`/`--altitude`; flight-length queries read a
//! named column from a CSV export with `--csv`/`--column`, where blank cells
//! mean the sample is missing. Missing results print as `--`.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use velocity_speed_tables::config::load_table_set;
use velocity_speed_tables::lookup::VelocitySpeedTableSet;
use velocity_speed_tables::samples::Samples;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Velocity speed table queries (V2/Vref/Vapp, VMO/MMO)"
)]
struct Cli {
    /// Table set authoring file (.yaml, .yml or .toml)
    #[arg(long)]
    tables: PathBuf,

    /// Emit JSON instead of one value per line
    #[arg(long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Takeoff safety speed for a flap/slat detent
    V2(ReferenceArgs),
    /// Landing reference speed for a flap/slat detent
    Vref(ReferenceArgs),
    /// Approach reference speed for a flap/slat detent
    Vapp(ReferenceArgs),
    /// Maximum operating speed (knots)
    Vmo(LimitArgs),
    /// Maximum operating Mach number
    Mmo(LimitArgs),
}

#[derive(Args)]
struct ReferenceArgs {
    /// Flap/slat configuration detent, e.g. 15
    #[arg(long)]
    detent: String,

    /// Gross weight in kilograms; omit to resolve from fallback constants
    #[arg(long, conflicts_with = "csv")]
    weight: Option<f64>,

    /// CSV export containing a gross weight column in kilograms
    #[arg(long, requires = "column")]
    csv: Option<PathBuf>,

    /// Column name within the CSV file
    #[arg(long, requires = "csv")]
    column: Option<String>,
}

#[derive(Args)]
struct LimitArgs {
    /// Pressure altitude in feet
    #[arg(long, conflicts_with = "csv")]
    altitude: Option<f64>,

    /// CSV export containing an altitude column in feet
    #[arg(long, requires = "column")]
    csv: Option<PathBuf>,

    /// Column name within the CSV file
    #[arg(long, requires = "csv")]
    column: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let loaded = load_table_set(&cli.tables)
        .with_context(|| format!("loading table set {}", cli.tables.display()))?;
    for warning in &loaded.warnings {
        eprintln!("[warn] {warning}");
    }
    let tables = &loaded.table_set;

    let result = match &cli.command {
        Command::V2(args) => reference_query(tables, args, VelocitySpeedTableSet::v2)?,
        Command::Vref(args) => reference_query(tables, args, VelocitySpeedTableSet::vref)?,
        Command::Vapp(args) => reference_query(tables, args, VelocitySpeedTableSet::vapp)?,
        Command::Vmo(args) => tables.vmo(&limit_input(args)?),
        Command::Mmo(args) => tables.mmo(&limit_input(args)?),
    };

    print_samples(&result, cli.json)
}

fn reference_query(
    tables: &VelocitySpeedTableSet,
    args: &ReferenceArgs,
    lookup: impl Fn(
        &VelocitySpeedTableSet,
        &str,
        Option<&Samples>,
    ) -> Result<Samples, velocity_speed_tables::units::UnitError>,
) -> anyhow::Result<Samples> {
    let weight = match (&args.weight, &args.csv) {
        (Some(value), _) => Some(Samples::from(*value)),
        (None, Some(path)) => Some(read_csv_column(path, args.column.as_deref().unwrap_or(""))?),
        (None, None) => None,
    };
    let result = lookup(tables, &args.detent, weight.as_ref())
        .with_context(|| format!("looking up detent '{}'", args.detent))?;
    Ok(result)
}

fn limit_input(args: &LimitArgs) -> anyhow::Result<Samples> {
    match (&args.altitude, &args.csv) {
        (Some(value), _) => Ok(Samples::from(*value)),
        (None, Some(path)) => read_csv_column(path, args.column.as_deref().unwrap_or("")),
        (None, None) => bail!("supply --altitude or --csv/--column"),
    }
}

/// Read one named column from a CSV export; blank cells become missing
/// samples.
fn read_csv_column(path: &Path, column: &str) -> anyhow::Result<Samples> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    let headers = reader.headers().context("reading CSV headers")?;
    let index = headers
        .iter()
        .position(|h| h == column)
        .with_context(|| format!("column '{column}' not found in {}", path.display()))?;

    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading CSV row {}", row + 1))?;
        let cell = record.get(index).unwrap_or("").trim();
        if cell.is_empty() {
            values.push(None);
        } else {
            let value: f64 = cell
                .parse()
                .with_context(|| format!("parsing '{cell}' at CSV row {}", row + 1))?;
            values.push(Some(value));
        }
    }
    Ok(Samples::Series(values))
}

fn print_samples(samples: &Samples, json: bool) -> anyhow::Result<()> {
    if json {
        let rendered = match samples {
            Samples::Scalar(value) => serde_json::to_string(value)?,
            Samples::Series(values) => serde_json::to_string(values)?,
        };
        println!("{rendered}");
        return Ok(());
    }
    for slot in samples.iter() {
        match slot {
            Some(value) => println!("{value}"),
            None => println!("--"),
        }
    }
    Ok(())
}
