#![warn(missing_docs)]
//! Fillbench CLI Library
//!
//! Ties the pieces together: argument parsing, configuration discovery,
//! strategy filtering, the driver run, and output. With no arguments the
//! binary reproduces the reference configuration (50 trials of a
//! 10,000,000-element buffer, full strategy list).

mod config;
mod executor;
mod sysinfo;

pub use config::{FillConfig, OutputConfig, RunnerConfig};
pub use executor::{build_report, ExecutionConfig, Executor, RunError, StrategyRunResult};
pub use sysinfo::build_report_meta;

use clap::{Parser, Subcommand};
use fillbench_core::{registry, FillStrategy};
use fillbench_report::{format_human_output, generate_json_report, OutputFormat};
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;

/// fillbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "fillbench")]
#[command(author, version, about = "fillbench - sequential-fill strategy benchmark")]
pub struct Cli {
    /// Optional subcommand; defaults to running the benchmark
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter strategies by regex over id and name
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Timed trials per strategy
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Buffer length in elements
    #[arg(long)]
    pub size: Option<usize>,

    /// Output format: human, json
    #[arg(long, default_value = "human")]
    pub format: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pin the driver thread to this CPU before running
    #[arg(long)]
    pub pin_cpu: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered strategies without running them
    List,
    /// Run the benchmark (default)
    Run,
}

/// Run the fillbench CLI. Main entry point for the binary.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(Cli::parse())
}

/// Run the fillbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let filter = if cli.verbose {
        "fillbench_cli=debug,fillbench_core=debug"
    } else {
        "fillbench_cli=info,fillbench_core=info"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = FillConfig::discover().unwrap_or_default();
    // clap's default is "human"; any other CLI value was set explicitly
    // and wins over the config file.
    let format: OutputFormat = if cli.format != "human" {
        cli.format.parse().unwrap_or(OutputFormat::Human)
    } else {
        config.output.format.parse().unwrap_or(OutputFormat::Human)
    };

    match cli.command {
        Some(Commands::List) => list_strategies(&cli),
        Some(Commands::Run) | None => run_benchmark(&cli, &config, format),
    }
}

/// Keep only strategies whose id or name matches the filter regex.
/// Registry order is preserved; an invalid pattern keeps everything.
fn filter_strategies(cli: &Cli, strategies: Vec<FillStrategy>) -> Vec<FillStrategy> {
    match Regex::new(&cli.filter) {
        Ok(re) => strategies
            .into_iter()
            .filter(|s| re.is_match(s.id) || re.is_match(s.name))
            .collect(),
        Err(_) => {
            eprintln!("Warning: invalid filter pattern '{}', ignoring", cli.filter);
            strategies
        }
    }
}

fn list_strategies(cli: &Cli) -> anyhow::Result<()> {
    let strategies = filter_strategies(cli, registry());

    println!("Registered strategies:");
    for strategy in &strategies {
        match (strategy.availability)() {
            fillbench_core::Availability::Ready => {
                println!("  {:<18} {}", strategy.id, strategy.name);
            }
            fillbench_core::Availability::Unavailable { reason } => {
                println!(
                    "  {:<18} {} (unavailable: {})",
                    strategy.id, strategy.name, reason
                );
            }
        }
    }
    println!("{} strategies.", strategies.len());

    Ok(())
}

/// Layer configuration: file values under CLI overrides; N and the trial
/// count are clamped to at least 1.
fn build_execution_config(cli: &Cli, config: &FillConfig) -> ExecutionConfig {
    ExecutionConfig {
        iterations: cli.iterations.unwrap_or(config.runner.iterations).max(1),
        buffer_len: cli.size.unwrap_or(config.runner.buffer_len).max(1),
    }
}

fn run_benchmark(cli: &Cli, config: &FillConfig, format: OutputFormat) -> anyhow::Result<()> {
    let exec_config = build_execution_config(cli, config);

    if let Some(cpu) = cli.pin_cpu.or(config.runner.pin_cpu) {
        if let Err(e) = fillbench_core::pin_to_cpu(cpu) {
            eprintln!("Warning: failed to pin driver thread to cpu {}: {}", cpu, e);
        }
    }

    let strategies = filter_strategies(cli, registry());
    if strategies.is_empty() {
        println!("No strategies matched.");
        return Ok(());
    }

    tracing::info!(
        strategies = strategies.len(),
        iterations = exec_config.iterations,
        buffer_len = exec_config.buffer_len,
        "starting run"
    );

    let mut executor = Executor::new(exec_config.clone());
    let run_err = executor.execute(&strategies).err();
    let meta = build_report_meta(&exec_config);
    let report = build_report(meta, executor.completed());

    if let Some(err) = run_err {
        // Fatal: print what completed, then the failure, and stop here
        // without attempting the remaining strategies.
        if format == OutputFormat::Human {
            print!("{}", format_human_output(&report));
        }
        match &err {
            RunError::Verification { .. } => println!("{}", err),
            RunError::Allocation(cause) => println!("Allocation failure: {}", cause),
        }
        std::process::exit(1);
    }

    let output = match format {
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Human => format_human_output(&report),
    };

    if let Some(ref path) = cli.output {
        let mut file = std::fs::File::create(path)?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with_filter(filter: &str) -> Cli {
        Cli {
            command: None,
            filter: filter.to_string(),
            iterations: None,
            size: None,
            format: "human".to_string(),
            output: None,
            pin_cpu: None,
            verbose: false,
        }
    }

    #[test]
    fn filter_matches_id_and_name() {
        let cli = cli_with_filter("four");
        let matched = filter_strategies(&cli, registry());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "four_way_split");

        let cli = cli_with_filter("parallel");
        let matched = filter_strategies(&cli, registry());
        assert!(matched.iter().any(|s| s.id == "static_partition"));
        assert!(matched.iter().any(|s| s.id == "par_index_loop"));
    }

    #[test]
    fn default_filter_keeps_everything_in_order() {
        let cli = cli_with_filter(".*");
        let matched = filter_strategies(&cli, registry());
        assert_eq!(matched.len(), registry().len());
        assert_eq!(matched[0].id, "seq_loop");
    }

    #[test]
    fn cli_overrides_file_config() {
        let mut cli = cli_with_filter(".*");
        cli.iterations = Some(3);
        cli.size = Some(4096);
        let config = FillConfig::default();
        let exec = build_execution_config(&cli, &config);
        assert_eq!(exec.iterations, 3);
        assert_eq!(exec.buffer_len, 4096);
    }

    #[test]
    fn file_config_applies_when_cli_silent() {
        let cli = cli_with_filter(".*");
        let mut config = FillConfig::default();
        config.runner.iterations = 12;
        config.runner.buffer_len = 2048;
        let exec = build_execution_config(&cli, &config);
        assert_eq!(exec.iterations, 12);
        assert_eq!(exec.buffer_len, 2048);
    }

    #[test]
    fn zero_sized_requests_are_clamped() {
        let mut cli = cli_with_filter(".*");
        cli.iterations = Some(0);
        cli.size = Some(0);
        let exec = build_execution_config(&cli, &FillConfig::default());
        assert_eq!(exec.iterations, 1);
        assert_eq!(exec.buffer_len, 1);
    }
}
