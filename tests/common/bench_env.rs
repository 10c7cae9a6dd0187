//! Scratch environment for running the benchmark binary end to end.
//!
//! The fake `ipfs` is a shell script that appends `<IPFS_PATH> <args>` to a
//! log file for every invocation, creates the repository directory on `init`,
//! and can be told to fail `add` for one repository or every `repo stat`.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Builder for a benchmark scratch directory
pub struct BenchEnv {
    dir: TempDir,
    fail_add_for: Option<String>,
    fail_stat: bool,
}

impl BenchEnv {
    /// Create a scratch directory with a small `testfiles/` input
    pub fn new() -> Self {
        let env = Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            fail_add_for: None,
            fail_stat: false,
        };
        env.add_file("testfiles/a.txt", "hello\n");
        env.add_file("testfiles/nested/b.txt", "world\n");
        env
    }

    /// Make `ipfs add` fail for repositories whose path contains `repo`
    pub fn fail_add_for(mut self, repo: &str) -> Self {
        self.fail_add_for = Some(repo.to_string());
        self
    }

    /// Make every `ipfs repo stat` fail
    pub fn fail_stat(mut self) -> Self {
        self.fail_stat = true;
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn add_file(&self, relative_path: &str, content: &str) -> &Self {
        let full_path = self.dir.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        self
    }

    pub fn log_path(&self) -> PathBuf {
        self.path().join("ipfs-calls.log")
    }

    /// Lines logged by the fake binary, one per invocation
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Write the fake `ipfs` script and return its path
    pub fn install_fake_ipfs(&self) -> PathBuf {
        let bin = self.path().join("bin/ipfs");
        fs::create_dir_all(bin.parent().unwrap()).expect("Failed to create bin dir");

        let fail_add = match &self.fail_add_for {
            Some(repo) => format!(
                "case \"$IPFS_PATH\" in *{}*) echo 'Error: add failed' >&2; exit 1;; esac",
                repo
            ),
            None => String::new(),
        };
        let fail_stat = if self.fail_stat {
            "echo 'Error: stat failed' >&2; exit 1"
        } else {
            ""
        };

        let script = format!(
            r#"#!/bin/sh
echo "$IPFS_PATH $*" >> '{log}'
case "$1" in
  init)
    mkdir -p "$IPFS_PATH"
    echo "initializing IPFS node at $IPFS_PATH"
    ;;
  add)
    {fail_add}
    echo QmFakeRootHash
    ;;
  repo)
    {fail_stat}
    echo "NumObjects: 3"
    ;;
esac
"#,
            log = self.log_path().display(),
            fail_add = fail_add,
            fail_stat = fail_stat,
        );

        fs::write(&bin, script).expect("Failed to write fake ipfs");
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod fake ipfs");
        bin
    }

    /// Run the benchmark binary in the scratch directory
    pub fn run_cli(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_ipfs-add-bench"))
            .current_dir(self.path())
            .env_remove("IPFS_BIN")
            .env_remove("IPFS_BENCH_REPO_ROOT")
            .env_remove("RUST_LOG")
            .args(args)
            .output()
            .expect("Failed to run ipfs-add-bench")
    }

    /// Run against the fake binary with `testfiles/` as input
    pub fn run_bench(&self, extra_args: &[&str]) -> Output {
        let bin = self.install_fake_ipfs();
        let bin = bin.to_str().expect("temp path is not UTF-8").to_string();
        let mut args = vec!["--ipfs-bin", bin.as_str()];
        args.extend_from_slice(extra_args);
        args.push("testfiles");
        self.run_cli(&args)
    }
}
