// src/main.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use blackbox_pid_tuner::config::AnalyzerConfig;
use blackbox_pid_tuner::data_analysis::pipeline::{analyze_flight_log, LogObserver};
use blackbox_pid_tuner::data_input::log_parser::parse_log_file;
use blackbox_pid_tuner::pid_context::PidContext;
use blackbox_pid_tuner::plot_functions::plot_segments::plot_segments;
use blackbox_pid_tuner::report::{render_text, TuningReport};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Analyze a Betaflight blackbox CSV export and recommend PID changes"
)]
struct Args {
    /// Blackbox log exported to CSV (blackbox_decode output)
    log: PathBuf,
    /// Load analyzer thresholds from a TOML file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the report as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Also write the stacked RC command vs gyro plot
    #[arg(long, default_value_t = false)]
    plot: bool,
    /// Directory for plot output (defaults to the log's directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Debug-level logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn root_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "blackbox".to_string())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match &args.config {
        Some(path) => AnalyzerConfig::load(path)
            .with_context(|| format!("loading analyzer config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    let flight_log = parse_log_file(&args.log)
        .with_context(|| format!("parsing blackbox log {}", args.log.display()))?;

    let result = analyze_flight_log(&flight_log, &config, &mut LogObserver)
        .context("analyzing flight log")?;

    if args.plot {
        let output_dir = match &args.output_dir {
            Some(dir) => dir.clone(),
            None => args
                .log
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("creating output directory {}", output_dir.display()))?;

        let ctx = PidContext::new(flight_log.config.clone(), root_name(&args.log));
        match plot_segments(&flight_log.samples, &result.analyses, &ctx, &output_dir) {
            Ok(path) => info!("Plot written to {}", path.display()),
            Err(e) => warn!("Plot could not be written: {}", e),
        }
    }

    let report = TuningReport::new(&flight_log, result);
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        println!("{}", json);
    } else {
        print!("{}", render_text(&report));
    }

    Ok(())
}

// src/main.rs
