//! CLI argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Benchmark `ipfs add` across datastore, chunker and layout options
#[derive(Parser, Debug)]
#[command(name = "ipfs-add-bench")]
#[command(about = "benchmark ipfs with directory")]
#[command(version)]
pub struct Cli {
    /// Directory of test files to add
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Storage binary to benchmark [default: ipfs]
    #[arg(long, env = "IPFS_BIN", value_name = "BIN")]
    pub ipfs_bin: Option<String>,

    /// Directory to create the per-run repositories in [default: .]
    #[arg(long, env = "IPFS_BENCH_REPO_ROOT", value_name = "DIR")]
    pub repo_root: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write the summary as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Print the commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Usage text printed when no path is given
pub fn usage(program: &str) -> String {
    format!("{} <path-to-test-files>\nbenchmark ipfs with directory\n", program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_is_optional() {
        let cli = Cli::parse_from(["ipfs-add-bench"]);
        assert!(cli.path.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::parse_from([
            "ipfs-add-bench",
            "--repo-root",
            "/scratch",
            "--json",
            "out.json",
            "--dry-run",
            "testfiles",
        ]);
        assert_eq!(cli.path, Some(PathBuf::from("testfiles")));
        assert_eq!(cli.repo_root, Some(PathBuf::from("/scratch")));
        assert_eq!(cli.json, Some(PathBuf::from("out.json")));
        assert!(cli.dry_run);
    }

    #[test]
    fn test_usage_text() {
        assert_eq!(
            usage("bench"),
            "bench <path-to-test-files>\nbenchmark ipfs with directory\n"
        );
    }
}
