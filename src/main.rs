//! ipfs-add-bench CLI entry point

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ipfs_add_bench::cli::usage;
use ipfs_add_bench::{BenchConfig, BenchError, Cli, DryRunner, Harness, SystemRunner};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(path) = cli.path.clone() else {
        let program = std::env::args()
            .next()
            .unwrap_or_else(|| "ipfs-add-bench".to_string());
        print!("{}", usage(&program));
        return ExitCode::SUCCESS;
    };

    match run(&cli, &path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            e.exit_code()
        }
    }
}

/// Initialize logging to stderr; stdout carries the transcript
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ipfs_add_bench={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: &Cli, path: &Path) -> ipfs_add_bench::Result<()> {
    let config = BenchConfig::resolve(cli)?;
    init_logging(&config.logging.level);

    let stdout = io::stdout();
    let report = if cli.dry_run {
        Harness::new(DryRunner, stdout.lock(), &config).run(path)?
    } else {
        which::which(&config.ipfs_bin).map_err(|_| BenchError::MissingBinary {
            name: config.ipfs_bin.clone(),
        })?;
        Harness::new(SystemRunner, stdout.lock(), &config).run(path)?
    };

    if let Some(json_path) = &cli.json {
        report.write_json(json_path)?;
        info!("wrote summary to {}", json_path.display());
    }

    Ok(())
}
