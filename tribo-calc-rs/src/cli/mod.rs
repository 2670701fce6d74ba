//! Command-line interface for the tribology calculators.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};

use crate::core::loaders::load_report;
use crate::processors::contact::{hertz_contact, ContactInputs};
use crate::processors::friction::{
    default_output_path, run_friction_analysis, FrictionAnalysis, PartitionStrategy,
};
use crate::visualization::plot_report;
use crate::CalculatorConfig;

#[derive(Parser)]
#[command(name = "tribo-calc")]
#[command(about = "Contact pressure and coefficient-of-friction calculators", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hertzian contact pressure of a ball on a flat (missing values are prompted for)
    Contact {
        /// Applied force in mN
        #[arg(long)]
        force_mn: Option<f64>,
        /// Elastic modulus of the counterface in GPa
        #[arg(long)]
        counter_modulus_gpa: Option<f64>,
        /// Poisson's ratio of the counterface
        #[arg(long)]
        counter_poisson: Option<f64>,
        /// Radius of the counterface in microns
        #[arg(long)]
        radius_um: Option<f64>,
        /// Elastic modulus of the plane in GPa
        #[arg(long)]
        plane_modulus_gpa: Option<f64>,
        /// Poisson's ratio of the plane
        #[arg(long)]
        plane_poisson: Option<f64>,
    },

    /// Max friction force and coefficient of friction per cycle
    FrictionMax {
        /// Whitespace-delimited time/friction file
        input: PathBuf,
        /// Normal force in mN
        #[arg(short, long, allow_negative_numbers = true)]
        normal_force: f64,
        /// Number of friction cycles (defaults to config value)
        #[arg(long)]
        cycles: Option<usize>,
        /// Output report path (defaults to <input>_max_cof.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also plot the coefficient of friction to this PNG
        #[arg(long)]
        plot: Option<PathBuf>,
    },

    /// Averaged time, friction force and coefficient of friction per group of points
    FrictionAverage {
        /// Whitespace-delimited time/friction file
        input: PathBuf,
        /// Normal force in mN
        #[arg(short, long, allow_negative_numbers = true)]
        normal_force: f64,
        /// Number of points per friction cycle (defaults to config value)
        #[arg(long)]
        points_per_cycle: Option<usize>,
        /// Output report path (defaults to <input>_avg_cof.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also plot the coefficient of friction to this PNG
        #[arg(long)]
        plot: Option<PathBuf>,
    },

    /// Plot the coefficient of friction from an exported report (PNG)
    Visualize {
        /// Report produced by friction-max or friction-average
        report: PathBuf,
        /// Output PNG file path (defaults to same name as the report with .png extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the default configuration to a YAML file
    InitConfig {
        /// Destination YAML file
        path: PathBuf,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<62} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.chars().count() > 40 {
            let head: String = value.chars().take(37).collect();
            format!("{}...", head)
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<40} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    let config = match &cli.config {
        Some(path) => match CalculatorConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!("Failed to load config from {}: {}, using defaults", path.display(), e);
                CalculatorConfig::default()
            }
        },
        None => CalculatorConfig::default(),
    };

    let result = match cli.command {
        Commands::Contact {
            force_mn,
            counter_modulus_gpa,
            counter_poisson,
            radius_um,
            plane_modulus_gpa,
            plane_poisson,
        } => cmd_contact(
            force_mn,
            counter_modulus_gpa,
            counter_poisson,
            radius_um,
            plane_modulus_gpa,
            plane_poisson,
        ),
        Commands::FrictionMax { input, normal_force, cycles, output, plot } => {
            let num_cycles = cycles.unwrap_or(config.friction.default_cycles);
            let output =
                output.unwrap_or_else(|| default_output_path(&input, &config.friction.max_suffix));
            cmd_friction(
                &input,
                &output,
                PartitionStrategy::FixedCount { num_cycles },
                normal_force,
                plot.as_deref(),
                &config,
            )
        }
        Commands::FrictionAverage { input, normal_force, points_per_cycle, output, plot } => {
            let cycle_size = points_per_cycle.unwrap_or(config.friction.default_points_per_cycle);
            let output = output
                .unwrap_or_else(|| default_output_path(&input, &config.friction.average_suffix));
            cmd_friction(
                &input,
                &output,
                PartitionStrategy::FixedSize { cycle_size },
                normal_force,
                plot.as_deref(),
                &config,
            )
        }
        Commands::Visualize { report, output } => cmd_visualize(&report, output, &config),
        Commands::InitConfig { path } => cmd_init_config(&path, &config),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Read one floating-point value from `input` after printing `message` to `output`.
fn prompt_f64(input: &mut impl BufRead, output: &mut impl Write, message: &str) -> Result<f64> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Err(anyhow!("no input for \"{}\"", message.trim()));
    }
    line.trim()
        .parse()
        .with_context(|| format!("invalid number entered: {:?}", line.trim()))
}

fn value_or_prompt(value: Option<f64>, message: &str) -> Result<f64> {
    match value {
        Some(v) => Ok(v),
        None => prompt_f64(&mut io::stdin().lock(), &mut io::stdout(), message),
    }
}

fn cmd_contact(
    force_mn: Option<f64>,
    counter_modulus_gpa: Option<f64>,
    counter_poisson: Option<f64>,
    radius_um: Option<f64>,
    plane_modulus_gpa: Option<f64>,
    plane_poisson: Option<f64>,
) -> Result<()> {
    // Prompt order matches the bench worksheet.
    let inputs = ContactInputs {
        force_mn: value_or_prompt(force_mn, "Enter the force applied (in mN): ")?,
        counter_modulus_gpa: value_or_prompt(
            counter_modulus_gpa,
            "Enter the elastic modulus of the material (in GPa): ",
        )?,
        counter_poisson: value_or_prompt(
            counter_poisson,
            "Enter the Poisson's ratio of the counterface: ",
        )?,
        radius_um: value_or_prompt(radius_um, "Enter the radius of the counterface (in microns): ")?,
        plane_modulus_gpa: value_or_prompt(
            plane_modulus_gpa,
            "Enter the elastic modulus of the plane (in GPa): ",
        )?,
        plane_poisson: value_or_prompt(plane_poisson, "Enter the Poisson's ratio of the plane: ")?,
    };

    let result = hertz_contact(&inputs).context("Contact calculation failed")?;
    println!("{}", result);
    Ok(())
}

fn cmd_friction(
    input: &Path,
    output: &Path,
    strategy: PartitionStrategy,
    normal_force: f64,
    plot: Option<&Path>,
    config: &CalculatorConfig,
) -> Result<()> {
    let start = Instant::now();

    println!("Processing friction data...");
    println!("Input: {}", input.display());
    println!("Output: {}", output.display());
    println!("Normal force: {} mN", normal_force);

    let spinner = create_spinner("Computing coefficient of friction per cycle...");
    let analysis = run_friction_analysis(input, output, strategy, normal_force);
    spinner.finish_and_clear();

    let analysis = analysis.with_context(|| format!("Processing {} failed", input.display()))?;

    if let Some(png) = plot {
        let table = load_report(output)
            .with_context(|| format!("Failed to read back report {}", output.display()))?;
        plot_report(png, &table, &config.plot).context("Plotting failed")?;
    }

    print_summary(&summary_title(&analysis), &summary_items(&analysis, input, output, plot, start));
    Ok(())
}

fn summary_title(analysis: &FrictionAnalysis) -> String {
    match analysis.strategy {
        PartitionStrategy::FixedCount { .. } => "Max Friction per Cycle Complete".to_string(),
        PartitionStrategy::FixedSize { .. } => "Averaged Friction per Cycle Complete".to_string(),
    }
}

fn summary_items(
    analysis: &FrictionAnalysis,
    input: &Path,
    output: &Path,
    plot: Option<&Path>,
    start: Instant,
) -> Vec<(&'static str, String)> {
    let parameter = match analysis.strategy {
        PartitionStrategy::FixedCount { num_cycles } => ("Cycles requested", num_cycles.to_string()),
        PartitionStrategy::FixedSize { cycle_size } => ("Points per cycle", cycle_size.to_string()),
    };
    let fmt_opt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.6}", v));

    let mut items = vec![
        ("Input file", input.display().to_string()),
        ("Report", output.display().to_string()),
        ("Samples", analysis.sample_count.to_string()),
        parameter,
        ("Cycles reported", analysis.cycles.len().to_string()),
        ("Mean CoF", fmt_opt(analysis.mean_coefficient())),
        ("Max CoF", fmt_opt(analysis.max_coefficient())),
    ];
    if let Some(png) = plot {
        items.push(("Plot", png.display().to_string()));
    }
    items.push(("Duration", format!("{:.2?}", start.elapsed())));
    items
}

fn cmd_visualize(report: &Path, output: Option<PathBuf>, config: &CalculatorConfig) -> Result<()> {
    let start = Instant::now();

    // Determine output path (default to same name as input with .png extension)
    let output_path = output.unwrap_or_else(|| report.with_extension("png"));

    println!("Plotting coefficient of friction...");
    println!("Input: {}", report.display());
    println!("Output: {}", output_path.display());

    let spinner = create_spinner("Loading report...");

    let table = match load_report(report) {
        Ok(t) => t,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e).with_context(|| format!("Failed to load report {}", report.display()));
        }
    };

    spinner.set_message("Generating plot...");
    let plotted = plot_report(&output_path, &table, &config.plot);
    spinner.finish_and_clear();
    plotted.context("Plotting failed")?;

    print_summary(
        "Visualization Complete",
        &[
            ("Input report", report.display().to_string()),
            ("Output PNG", output_path.display().to_string()),
            ("Rows", table.len().to_string()),
            ("Duration", format!("{:.2?}", start.elapsed())),
        ],
    );
    Ok(())
}

fn cmd_init_config(path: &Path, config: &CalculatorConfig) -> Result<()> {
    config
        .to_yaml(path)
        .map_err(|e| anyhow!("Failed to write config to {}: {}", path.display(), e))?;
    println!("Wrote configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_friction_max() {
        let cli = Cli::try_parse_from([
            "tribo-calc",
            "friction-max",
            "data.txt",
            "--normal-force",
            "2.5",
            "--cycles",
            "10",
        ])
        .unwrap();

        match cli.command {
            Commands::FrictionMax { input, normal_force, cycles, output, plot } => {
                assert_eq!(input, PathBuf::from("data.txt"));
                assert_eq!(normal_force, 2.5);
                assert_eq!(cycles, Some(10));
                assert!(output.is_none());
                assert!(plot.is_none());
            }
            _ => panic!("expected friction-max"),
        }
    }

    #[test]
    fn test_parse_friction_average_requires_normal_force() {
        assert!(Cli::try_parse_from(["tribo-calc", "friction-average", "data.txt"]).is_err());
        assert!(Cli::try_parse_from([
            "tribo-calc",
            "friction-average",
            "data.txt",
            "-n",
            "abc"
        ])
        .is_err());
    }

    #[test]
    fn test_parse_contact_all_flags() {
        let cli = Cli::try_parse_from([
            "tribo-calc",
            "contact",
            "--force-mn",
            "10",
            "--counter-modulus-gpa",
            "70",
            "--counter-poisson",
            "0.33",
            "--radius-um",
            "50",
            "--plane-modulus-gpa",
            "200",
            "--plane-poisson",
            "0.3",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Contact { force_mn: Some(f), plane_poisson: Some(p), .. } if f == 10.0 && p == 0.3
        ));
    }

    #[test]
    fn test_value_or_prompt_uses_given_value() {
        assert_eq!(value_or_prompt(Some(1.25), "unused").unwrap(), 1.25);
    }

    #[test]
    fn test_prompt_f64_reads_value() {
        let mut input = io::Cursor::new("  70.5  \nignored\n");
        let mut output = Vec::new();

        let value = prompt_f64(&mut input, &mut output, "Enter the force applied (in mN): ").unwrap();

        assert_eq!(value, 70.5);
        assert_eq!(output, b"Enter the force applied (in mN): ");
    }

    #[test]
    fn test_prompt_f64_rejects_non_numeric() {
        let mut input = io::Cursor::new("seventy\n");
        let mut output = Vec::new();

        let err = prompt_f64(&mut input, &mut output, "Enter the force applied (in mN): ")
            .unwrap_err();
        assert!(err.to_string().contains("seventy"));
    }

    #[test]
    fn test_prompt_f64_end_of_input() {
        let mut input = io::Cursor::new("");
        let mut output = Vec::new();

        let err = prompt_f64(&mut input, &mut output, "Enter the Poisson's ratio of the plane: ")
            .unwrap_err();
        assert!(err.to_string().contains("no input"));
    }
}
