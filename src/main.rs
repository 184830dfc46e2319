use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use sea_level_analyzer::{
    analysis::{project_all, project_country, project_from_request, projected_rise, ProjectionRequest},
    config::AnalyzerConfig,
    io,
    models::TimeSeries,
    visualization::{
        print_national_table, print_projection_summary, print_trajectory_chart,
        print_trajectory_table,
    },
};

#[derive(Parser)]
#[command(
    name = "sea-level-analyzer",
    about = "Sea Level Analyzer - CO2-driven sea-level rise and national impact projections",
    version,
    author
)]
struct Cli {
    /// Path to a TOML config file with dataset locations and fit degrees
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project future sea level for a target year and emission rate
    SeaLevel {
        /// Year to project to (must be after 2013)
        #[arg(short, long)]
        year: i32,

        /// Annual CO2 emission rate in metric tonnes (must be at least 1)
        #[arg(short, long)]
        rate: f64,

        /// Override the sea-level dataset path
        #[arg(long)]
        sea_level: Option<PathBuf>,

        /// Override the CO2 emissions dataset path
        #[arg(long)]
        co2: Option<PathBuf>,

        /// Override the fit degree
        #[arg(short, long)]
        degree: Option<usize>,

        /// Emit the trajectory as JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Show a text bar chart of the trajectory
        #[arg(long)]
        chart: bool,
    },

    /// Projected impact for a single country
    Impact {
        /// Year to project to (must be after 2013)
        #[arg(short, long)]
        year: i32,

        /// Annual CO2 emission rate in metric tonnes (must be at least 1)
        #[arg(short, long)]
        rate: f64,

        /// Country code to look up (e.g. BGD)
        #[arg(long)]
        country: String,

        /// Scenario dataset to project from (defaults to the land-loss table)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Projected impact for every country in a scenario dataset
    National {
        /// Year to project to (must be after 2013)
        #[arg(short, long)]
        year: i32,

        /// Annual CO2 emission rate in metric tonnes (must be at least 1)
        #[arg(short, long)]
        rate: f64,

        /// Scenario dataset to project from (defaults to the land-loss table)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Override the country-code reference list path
        #[arg(long)]
        codes: Option<PathBuf>,

        /// Emit the per-country impacts as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Display a quick summary of the configured datasets
    Summary {
        /// Scenario dataset to summarize (defaults to the land-loss table)
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

fn load_config(path: &Option<PathBuf>) -> Result<AnalyzerConfig> {
    match path {
        Some(p) => Ok(AnalyzerConfig::from_path(p)?),
        None => Ok(AnalyzerConfig::default()),
    }
}

/// Load both historical series and run the sea-level projection.
fn run_projection(
    config: &AnalyzerConfig,
    sea_level: Option<PathBuf>,
    co2: Option<PathBuf>,
    year: i32,
    rate: f64,
    degree: Option<usize>,
) -> Result<(ProjectionRequest, Vec<f64>)> {
    let sea_path = sea_level.unwrap_or_else(|| config.datasets.sea_level.clone());
    let co2_path = co2.unwrap_or_else(|| config.datasets.co2.clone());

    let sea_series = io::read_sea_level(&sea_path)?;
    let co2_series = io::read_co2(&co2_path)?;

    let request = ProjectionRequest {
        target_year: year,
        annual_emission_rate: rate,
    };
    let degree = degree.unwrap_or(config.regression.sea_level_degree);
    let points = project_from_request(&sea_series, &co2_series, &request, degree)?;
    Ok((request, points))
}

fn series_span(series: &TimeSeries) -> String {
    let years = series.years();
    match (years.first(), years.last()) {
        (Some(first), Some(last)) => format!("{first}-{last}"),
        _ => "empty".to_string(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::SeaLevel {
            year,
            rate,
            sea_level,
            co2,
            degree,
            json,
            chart,
        } => {
            let (request, points) =
                run_projection(&config, sea_level, co2, year, rate, degree)?;

            if json {
                let payload = serde_json::json!({
                    "target_year": request.target_year,
                    "annual_emission_rate": request.annual_emission_rate,
                    "trajectory_mm": points,
                    "projected_rise_mm": projected_rise(&points),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "\n{}",
                    format!("Sea-Level Projection to {year}").bold().cyan()
                );
                print_projection_summary(&request, &points);
                print_trajectory_table(&points);
                if chart {
                    print_trajectory_chart(&points);
                }
            }
        }

        Commands::Impact {
            year,
            rate,
            country,
            data,
        } => {
            let (_, points) = run_projection(&config, None, None, year, rate, None)?;
            let rise = projected_rise(&points);

            let data_path = data.unwrap_or_else(|| config.datasets.land_loss.clone());
            let table = io::read_country_table(&data_path)?;
            let impact =
                project_country(&table, &country, rise, config.regression.impact_degree)?;

            println!(
                "\n{}",
                format!("Impact Projection: {} to {year}", table.name)
                    .bold()
                    .cyan()
            );
            println!("{}", "=".repeat(50));
            println!("  Country:          {country}");
            println!("  Sea-Level Rise:   {rise:.1} mm");
            println!("  Projected Impact: {impact:.2}%");
        }

        Commands::National {
            year,
            rate,
            data,
            codes,
            json,
        } => {
            let (_, points) = run_projection(&config, None, None, year, rate, None)?;
            let rise = projected_rise(&points);

            let data_path = data.unwrap_or_else(|| config.datasets.land_loss.clone());
            let table = io::read_country_table(&data_path)?;
            let impacts = project_all(&table, rise, config.regression.impact_degree)?;

            if json {
                let entries: Vec<_> = table
                    .codes()
                    .iter()
                    .zip(&impacts)
                    .map(|(code, impact)| {
                        serde_json::json!({ "code": code, "impact_percent": impact })
                    })
                    .collect();
                let payload = serde_json::json!({
                    "dataset": table.name,
                    "target_year": year,
                    "projected_rise_mm": rise,
                    "countries": entries,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                let codes_path = codes.unwrap_or_else(|| config.datasets.country_codes.clone());
                let countries = io::read_country_codes(&codes_path)?;
                println!(
                    "\n{}",
                    format!("National Impact Projection to {year}").bold().cyan()
                );
                println!("  Projected rise: {rise:.1} mm over {} years", points.len());
                print_national_table(&table.name, &countries, &impacts);
            }
        }

        Commands::Summary { data } => {
            let sea_series = io::read_sea_level(&config.datasets.sea_level)?;
            let co2_series = io::read_co2(&config.datasets.co2)?;
            let data_path = data.unwrap_or_else(|| config.datasets.land_loss.clone());
            let table = io::read_country_table(&data_path)?;

            println!("\n{}", "Quick Summary".bold().cyan());
            println!("{}", "=".repeat(40));
            println!("  Sea-Level Years:  {}", sea_series.len());
            println!("  Sea-Level Span:   {}", series_span(&sea_series));
            println!(
                "  Last Level:       {:.1} mm",
                sea_series.last_value().unwrap_or(0.0)
            );
            println!("  CO2 Years:        {}", co2_series.len());
            println!("  CO2 Span:         {}", series_span(&co2_series));
            println!("  Scenario Dataset: {}", table.name);
            println!("  Countries:        {}", table.len());
        }
    }

    Ok(())
}
