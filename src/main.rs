mod config;
mod position;
mod report;
mod sampler;
mod speed;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{ConfigError, SamplingConfig};
use crate::position::OpenNotifyClient;
use crate::sampler::{Sampler, SystemClock};
use crate::speed::{SpeedReport, MAX_PLAUSIBLE_SPEED_KMH};

#[derive(Parser)]
#[command(name = "iss-speed")]
#[command(about = "Measure the speed of the ISS from open-notify position fixes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the endpoint, compute speeds and write the CSV table
    Run(SamplingArgs),
    /// Validate sampling parameters without polling
    Check(SamplingArgs),
    /// Recompute speeds from a previously written CSV table
    Analyze {
        file: PathBuf,
        /// Seconds between the samples in the file
        #[arg(short, long)]
        interval: u64,
    },
}

#[derive(Args, Default)]
struct SamplingArgs {
    /// YAML file with sampling parameters
    #[arg(short, long)]
    config: Option<String>,
    /// Total polling time in seconds
    #[arg(short, long)]
    duration: Option<u64>,
    /// Seconds between polls
    #[arg(short, long)]
    interval: Option<u64>,
    #[arg(long)]
    endpoint: Option<String>,
    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
    /// Directory for the CSV table
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl SamplingArgs {
    fn resolve(self) -> Result<SamplingConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SamplingConfig::from_file(path)?,
            None => SamplingConfig::default(),
        };
        if let Some(duration) = self.duration {
            config.duration_s = duration;
        }
        if let Some(interval) = self.interval {
            config.interval_s = interval;
        }
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_s = timeout;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Check(args) => check(args),
        Commands::Analyze { file, interval } => analyze(&file, interval),
    }
}

fn check(args: SamplingArgs) -> ExitCode {
    match args.resolve() {
        Ok(config) => {
            println!("Configuration is valid");
            println!("  duration: {}s", config.duration_s);
            println!("  interval: {}s", config.interval_s);
            println!("  endpoint: {}", config.endpoint);
            println!("  timeout:  {}s", config.request_timeout_s);
            println!("  output:   {}", config.output_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: SamplingArgs) -> ExitCode {
    let config = match args.resolve() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match OpenNotifyClient::new(&config.endpoint, config.request_timeout()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error creating HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Polling {} every {}s for {}s",
        config.endpoint,
        config.interval_s,
        config.duration_s
    );
    let mut sampler = Sampler::new(client, SystemClock, config.duration(), config.interval());
    let samples = sampler.collect();

    let report = speed::calculate(&samples, config.interval());
    warn_implausible(&report);

    if let Err(e) = report::save_csv(&config.output_dir, &report) {
        eprintln!("Error writing CSV: {}", e);
        return ExitCode::FAILURE;
    }

    report::print_summary(&report);
    ExitCode::SUCCESS
}

fn analyze(file: &Path, interval: u64) -> ExitCode {
    if interval == 0 {
        eprintln!("Configuration error: {}", ConfigError::NotPositive("interval"));
        return ExitCode::FAILURE;
    }

    let samples = match report::read_samples_from_path(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let report = speed::calculate(&samples, std::time::Duration::from_secs(interval));
    warn_implausible(&report);
    report::print_summary(&report);
    ExitCode::SUCCESS
}

fn warn_implausible(report: &SpeedReport) {
    for row in report.out_of_range_positions() {
        log::warn!(
            "Position out of range at {}: lat={} lon={}",
            row.timestamp,
            row.latitude,
            row.longitude
        );
    }
    for row in report.invalid_speeds() {
        log::warn!(
            "Speed outside (0, {}] km/hr at {}: {:?}",
            MAX_PLAUSIBLE_SPEED_KMH,
            row.timestamp,
            row.speed_kmh
        );
    }
}
