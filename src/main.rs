use clap::{Args, Parser, Subcommand};
use coverage_cost::boundary::region_from_feature;
use coverage_cost::io::{GeometryFormat, write_matrix, write_points, write_scenarios};
use coverage_cost::{
    Bounds, CoverageError, CoverageMatrix, EngineConfig, GridSubmission, PropertyType,
    QueryFrequency, Region, RegionEstimate, SamplingStrategy, Strategy, Usage, parse_geometry,
    sample_regions, standard_scenarios,
};
use geojson::GeoJson;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "coverage-cost")]
#[command(about = "Estimate sampling circles and API cost to cover an area")]
struct Cli {
    /// JSON engine config; built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct UsageArgs {
    /// Property types queried per point.
    #[arg(long, default_value_t = 1)]
    property_types: u32,

    /// Query every month instead of once a year.
    #[arg(long)]
    monthly: bool,
}

impl UsageArgs {
    fn usage(&self) -> Result<Usage, CoverageError> {
        let frequency = if self.monthly {
            QueryFrequency::Monthly
        } else {
            QueryFrequency::Annual
        };
        Usage::new(self.property_types, frequency)
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Built-in sample areas × radius presets.
    Matrix {
        #[command(flatten)]
        usage: UsageArgs,

        /// Write CSV to stdout instead of a table.
        #[arg(long)]
        csv: bool,
    },
    /// The standard two-area combinations at every radius preset.
    Scenarios {
        #[command(flatten)]
        usage: UsageArgs,

        #[arg(long)]
        csv: bool,
    },
    /// Sample and price one area.
    Estimate {
        #[arg(long, required_unless_present = "geojson", allow_hyphen_values = true)]
        north: Option<f64>,
        #[arg(long, required_unless_present = "geojson", allow_hyphen_values = true)]
        south: Option<f64>,
        #[arg(long, required_unless_present = "geojson", allow_hyphen_values = true)]
        east: Option<f64>,
        #[arg(long, required_unless_present = "geojson", allow_hyphen_values = true)]
        west: Option<f64>,

        /// GeoJSON Feature/Geometry or WKT file with the area outline.
        #[arg(long)]
        geojson: Option<PathBuf>,

        /// Search radius in meters.
        #[arg(long)]
        radius: f64,

        #[arg(long, default_value = "bbox")]
        strategy: Strategy,

        /// Authoritative area, overriding the computed one.
        #[arg(long)]
        area_km2: Option<f64>,

        #[command(flatten)]
        usage: UsageArgs,

        /// Write the sample points (with WKT circles) to this CSV file.
        #[arg(long)]
        points: Option<PathBuf>,

        /// Print the grid persistence body for this property type.
        #[arg(long)]
        submission: Option<PropertyType>,
    },
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, CoverageError> {
    match path {
        Some(path) => EngineConfig::load(path),
        None => Ok(EngineConfig::default()),
    }
}

fn load_region(path: &Path) -> Result<Region, CoverageError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CoverageError::Io(format!("{}: {e}", path.display())))?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    // features carry the published surface in their properties
    if let Ok(GeoJson::Feature(feature)) = text.parse::<GeoJson>() {
        return region_from_feature(name, feature);
    }
    Region::from_geometry(name, parse_geometry(&text)?)
}

fn print_estimate(e: &RegionEstimate) {
    let coverage = e
        .coverage_pct
        .map(|p| format!("{p:.1}%"))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{:<22} {:>8} m  {:>7} pts  {:>9} calls  {:>5}  €{:>12}  {:>7}",
        e.region,
        e.radius_m,
        e.points,
        e.total_calls,
        e.pricing.tier_label,
        e.pricing.display_total(),
        coverage
    );
}

fn main() -> Result<(), CoverageError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Matrix { usage, csv } => {
            let matrix = CoverageMatrix::compute(
                &sample_regions(),
                Strategy::BoundingBox,
                usage.usage()?,
                &config,
            )?;
            if csv {
                write_matrix(std::io::stdout().lock(), &matrix)?;
            } else {
                for row in &matrix.rows {
                    for estimate in &row.estimates {
                        print_estimate(estimate);
                    }
                    println!();
                }
            }
        }
        Commands::Scenarios { usage, csv } => {
            let usage = usage.usage()?;
            let mut results = Vec::new();
            for scenario in standard_scenarios() {
                results.extend(scenario.evaluate_presets(&usage, &config)?);
            }
            if csv {
                write_scenarios(std::io::stdout().lock(), &results)?;
            } else {
                for r in &results {
                    println!(
                        "{:<30} {:>8} m  {:>9} calls  {:>5}  €{:>12}  (separate €{}, saving €{})",
                        r.name,
                        r.radius_m,
                        r.total_calls,
                        r.pricing.tier_label,
                        r.pricing.display_total(),
                        r.separate_cost().round_dp(2),
                        r.volume_saving().round_dp(2)
                    );
                }
            }
        }
        Commands::Estimate {
            north,
            south,
            east,
            west,
            geojson,
            radius,
            strategy,
            area_km2,
            usage,
            points,
            submission,
        } => {
            let region = match geojson {
                Some(path) => load_region(&path)?,
                None => {
                    let bounds = Bounds::new(
                        north.unwrap_or_default(),
                        south.unwrap_or_default(),
                        east.unwrap_or_default(),
                        west.unwrap_or_default(),
                    );
                    Region::from_bounds("area", bounds, None)
                }
            };
            let region = match area_km2 {
                Some(km2) => region.with_area_km2(km2),
                None => region,
            };

            let sampling = config.sampling(radius)?;
            let coverage = strategy.generate(&region, &sampling);
            let estimate = RegionEstimate::from_coverage(
                &region,
                strategy,
                &sampling,
                &coverage,
                &usage.usage()?,
                &config.tiers,
                config.coverage_cap_pct,
            );
            print_estimate(&estimate);

            if let Some(path) = points {
                let file = File::create(&path).map_err(|e| CoverageError::Io(e.to_string()))?;
                write_points(file, &coverage, &sampling, &region.frame(), Some(GeometryFormat::Wkt))?;
            }
            if let Some(property_type) = submission {
                let body = GridSubmission::from_coverage(
                    &coverage,
                    radius,
                    property_type,
                    &config.radius_limits,
                )?
                .with_area(region.name());
                println!("{}", body.to_json()?);
            }
        }
    }

    Ok(())
}
