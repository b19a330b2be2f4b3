use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tank_mass_calculator::{
    io,
    models::{CalculationInput, PressureCorrection, TableSet},
    visualization::{
        print_batch_table, print_height_table, print_pcf_table, print_result_card,
        print_scf_table, print_tank_gauge, print_vcf_table, GaugeReading,
    },
    Settings, TankCalculator,
};

#[derive(Parser)]
#[command(
    name = "tank-mass",
    about = "Tank Mass Calculator - corrected volume and mass from manual tank readings",
    version,
    author
)]
struct Cli {
    /// Directory holding the reference table CSV files
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute corrected volume and mass for one set of readings
    Calculate {
        /// Read the readings from a JSON file instead of flags
        #[arg(short, long, conflicts_with_all = ["density", "product_temperature", "shell_temperature", "height"])]
        input: Option<PathBuf>,

        /// Product density in kg/L
        #[arg(short, long, required_unless_present = "input")]
        density: Option<f64>,

        /// Product temperature in °C
        #[arg(short = 't', long, allow_negative_numbers = true, required_unless_present = "input")]
        product_temperature: Option<f64>,

        /// Shell temperature in °C (must be listed in the SCF table)
        #[arg(short, long, allow_negative_numbers = true, required_unless_present = "input")]
        shell_temperature: Option<f64>,

        /// Liquid height in mm
        #[arg(long, allow_negative_numbers = true, required_unless_present = "input")]
        height: Option<f64>,

        /// Tank pressure in bar (defaults to the nominal pressure)
        #[arg(short, long, allow_negative_numbers = true)]
        pressure: Option<f64>,

        /// Leave the pressure correction factor out of the volume
        #[arg(long)]
        no_pressure_correction: bool,

        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Export the result to a .csv or .json file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Look up a single correction factor or reference volume
    Lookup {
        #[command(subcommand)]
        factor: LookupCommand,
    },

    /// Display a reference table
    Tables {
        #[arg(value_enum)]
        table: TableKind,
    },

    /// Show a text tank gauge for a liquid height
    Gauge {
        /// Liquid height in mm
        #[arg(long, allow_negative_numbers = true)]
        height: f64,
    },

    /// Run independent calculations for every row of an inputs CSV
    Batch {
        /// Inputs CSV path
        #[arg(short, long)]
        input: PathBuf,

        /// Write per-row results to this CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum LookupCommand {
    /// Volume correction factor at a product temperature and density
    Vcf {
        #[arg(short, long, allow_negative_numbers = true)]
        temperature: f64,
        #[arg(short, long)]
        density: f64,
    },
    /// Pressure correction factor
    Pcf {
        #[arg(short, long, allow_negative_numbers = true)]
        pressure: f64,
    },
    /// Shell correction factor for a listed shell temperature
    Scf {
        #[arg(short, long, allow_negative_numbers = true)]
        temperature: f64,
    },
    /// Reference volume at a liquid height
    Volume {
        #[arg(long, allow_negative_numbers = true)]
        height: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TableKind {
    Vcf,
    Pcf,
    Scf,
    Height,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_reference_tables(dir: &Path, settings: &Settings) -> Result<TableSet> {
    let tables = io::load_tables(dir)
        .with_context(|| format!("Failed to load reference tables from {}", dir.display()))?;
    io::check_coverage(&tables, &settings.ranges);
    Ok(tables)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load_or_default(cli.config.as_deref())?;
    let tables_dir = cli.tables.unwrap_or_else(|| settings.tables_dir.clone());
    let tables = load_reference_tables(&tables_dir, &settings)?;
    let calculator = TankCalculator::new(&tables).with_settings(settings.clone());

    match cli.command {
        Commands::Calculate {
            input,
            density,
            product_temperature,
            shell_temperature,
            height,
            pressure,
            no_pressure_correction,
            json,
            export,
        } => {
            let mut input = match (input, density, product_temperature, shell_temperature, height) {
                (Some(path), ..) => io::read_input_json(&path)
                    .with_context(|| format!("Failed to read input from {}", path.display()))?,
                (None, Some(d), Some(t), Some(s), Some(h)) => CalculationInput::new(d, t, s, h),
                _ => anyhow::bail!(
                    "Provide --density, --product-temperature, --shell-temperature and --height, or --input"
                ),
            };
            if pressure.is_some() {
                input.pressure = pressure;
            }
            if no_pressure_correction {
                input = input.with_pressure_correction(PressureCorrection::Disabled);
            }

            let result = calculator.calculate(&input)?;

            if json {
                println!("{}", io::result_to_json_string(&result, true)?);
            } else {
                print_result_card(&result);
            }

            if let Some(path) = export {
                let writer = io::writer_for_path(&path)?;
                writer.write(&result, &path)?;
                println!(
                    "{} Exported results -> {}",
                    "Success:".green().bold(),
                    path.display()
                );
            }
        }

        Commands::Lookup { factor } => match factor {
            LookupCommand::Vcf {
                temperature,
                density,
            } => {
                let vcf = calculator.lookup_vcf(temperature, density);
                println!("VCF at {temperature} °C, {density} kg/L: {vcf:.6}");
            }
            LookupCommand::Pcf { pressure } => {
                let pcf = calculator.lookup_pcf(pressure);
                println!("PCF at {pressure} bar: {pcf:.6}");
            }
            LookupCommand::Scf { temperature } => {
                let scf = calculator.lookup_scf(temperature)?;
                println!("SCF at {temperature} °C: {scf:.6}");
            }
            LookupCommand::Volume { height } => {
                let volume = calculator.reference_volume(height);
                println!("Reference volume at {height} mm: {volume:.3} L");
            }
        },

        Commands::Tables { table } => match table {
            TableKind::Vcf => print_vcf_table(&tables.vcf),
            TableKind::Pcf => print_pcf_table(&tables.pcf),
            TableKind::Scf => print_scf_table(&tables.scf),
            TableKind::Height => print_height_table(&tables.height_capacity),
        },

        Commands::Gauge { height } => {
            let reading =
                GaugeReading::from_height(height, &tables.height_capacity, settings.total_capacity_l);
            let marks = io::load_percent_height(&tables_dir, &settings)?;
            print_tank_gauge(&reading, marks.as_ref());
        }

        Commands::Batch { input, output } => {
            let rows = io::read_input_rows_csv(&input)
                .with_context(|| format!("Failed to read inputs from {}", input.display()))?;
            println!(
                "\n{}",
                format!("Batch Calculation: {}", input.display()).bold().cyan()
            );

            let outcomes = calculator.calculate_batch_rows(rows);
            print_batch_table(&outcomes);

            if let Some(path) = output {
                io::write_batch_csv(&outcomes, &path)?;
                println!(
                    "{} Wrote {} rows -> {}",
                    "Success:".green().bold(),
                    outcomes.len(),
                    path.display()
                );
            }
        }
    }

    Ok(())
}
