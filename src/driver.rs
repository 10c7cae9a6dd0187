//! Benchmark driver.
//!
//! Sweeps every [`Combination`] against one input directory. Each combination
//! gets a fresh repository and goes through `repo_init`, `add` and `stats` in
//! order. Failures of `du` on the input, `ipfs init` or `ipfs add` abort the
//! whole sweep; failures of the statistics commands are logged and ignored.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::command::{write_block, CommandRunner, Invocation};
use crate::config::BenchConfig;
use crate::error::{BenchError, Result};
use crate::matrix::{sweep, Combination};
use crate::report::{RunRecord, SweepReport};

/// Environment variable selecting the repository of the storage binary
pub const REPO_ENV: &str = "IPFS_PATH";

/// Runs commands and writes the Markdown transcript
pub struct Harness<R, W> {
    runner: R,
    out: W,
    ipfs_bin: String,
    repo_root: PathBuf,
}

impl<R: CommandRunner, W: Write> Harness<R, W> {
    pub fn new(runner: R, out: W, config: &BenchConfig) -> Self {
        Self {
            runner,
            out,
            ipfs_bin: config.ipfs_bin.clone(),
            repo_root: config.repo_root.clone(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Run every combination against `input`, stopping at the first failure
    pub fn run(&mut self, input: &Path) -> Result<SweepReport> {
        let mut report = SweepReport::new(input);

        writeln!(self.out, "---")?;
        writeln!(
            self.out,
            "## {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(
            self.out,
            "benchmarking ipfs with directory: `{}`",
            input.display()
        )?;

        self.exec(&Invocation::new("du").arg("-sh").arg(input))?;

        let combos = sweep();
        for (i, combo) in combos.iter().enumerate() {
            info!(
                "[{}/{}] {} {} {}",
                i + 1,
                combos.len(),
                combo.datastore,
                combo.chunker,
                combo.layout
            );

            let mut test = TestRun::new(*combo, &self.repo_root, input);
            test.run(self)?;
            report.runs.push(RunRecord::new(
                *combo,
                test.repo_path.clone(),
                test.add_duration.unwrap_or_default(),
            ));
        }

        writeln!(self.out)?;
        self.out.write_all(report.to_markdown().as_bytes())?;
        self.out.flush()?;

        Ok(report)
    }

    /// Run a command whose failure is fatal
    pub fn exec(&mut self, invocation: &Invocation) -> Result<()> {
        let captured = match self.runner.run(invocation) {
            Ok(captured) => captured,
            Err(source) => {
                write_block(&mut self.out, invocation, b"")?;
                return Err(BenchError::Launch {
                    command: invocation.display_line(),
                    source,
                });
            }
        };

        write_block(&mut self.out, invocation, &captured.output)?;

        if captured.success {
            Ok(())
        } else {
            Err(BenchError::CommandFailed {
                command: invocation.display_line(),
                code: captured.code,
            })
        }
    }

    /// Run an informational command; failures only show up in the transcript
    pub fn probe(&mut self, invocation: &Invocation) {
        if let Err(e) = self.exec(invocation) {
            warn!("ignoring failed statistics command: {}", e);
        }
    }
}

/// One point of the sweep and its measurements
#[derive(Debug, Clone)]
pub struct TestRun {
    pub combo: Combination,
    pub repo_path: PathBuf,
    pub input: PathBuf,

    /// Set once `add` has run, whether or not it succeeded
    pub add_duration: Option<Duration>,
}

impl TestRun {
    pub fn new(combo: Combination, repo_root: &Path, input: &Path) -> Self {
        Self {
            combo,
            repo_path: combo.repo_path(repo_root),
            input: input.to_path_buf(),
            add_duration: None,
        }
    }

    fn ipfs(&self, bin: &str) -> Invocation {
        Invocation::new(bin).env(REPO_ENV, &self.repo_path)
    }

    pub fn init_invocation(&self, bin: &str) -> Invocation {
        self.ipfs(bin)
            .arg("init")
            .arg_opt(self.combo.datastore.init_flag())
    }

    pub fn add_invocation(&self, bin: &str) -> Invocation {
        self.ipfs(bin)
            .arg("add")
            .arg("-Q")
            .arg(format!("--chunker={}", self.combo.chunker.spec()))
            .arg_opt(self.combo.layout.add_flag())
            .arg("-r")
            .arg(&self.input)
    }

    pub fn repo_init<R: CommandRunner, W: Write>(&self, h: &mut Harness<R, W>) -> Result<()> {
        let inv = self.init_invocation(&h.ipfs_bin);
        h.exec(&inv)
    }

    pub fn add<R: CommandRunner, W: Write>(&mut self, h: &mut Harness<R, W>) -> Result<()> {
        let inv = self.add_invocation(&h.ipfs_bin);

        let start = Instant::now();
        let result = h.exec(&inv);
        self.add_duration = Some(start.elapsed());

        result
    }

    pub fn stats<R: CommandRunner, W: Write>(&self, h: &mut Harness<R, W>) -> Result<()> {
        writeln!(
            h.out,
            "add took: {:?}",
            self.add_duration.unwrap_or_default()
        )?;

        let du = Invocation::new("du")
            .env(REPO_ENV, &self.repo_path)
            .arg("-sh")
            .arg(&self.repo_path);
        h.probe(&du);

        let stat = self.ipfs(&h.ipfs_bin).arg("repo").arg("stat");
        h.probe(&stat);

        Ok(())
    }

    pub fn run<R: CommandRunner, W: Write>(&mut self, h: &mut Harness<R, W>) -> Result<()> {
        writeln!(h.out, "### {}", self.combo)?;
        writeln!(h.out, "Options:")?;
        writeln!(h.out, "- Datastore: {}", self.combo.datastore)?;
        writeln!(h.out, "- Chunker: {}", self.combo.chunker)?;
        writeln!(h.out, "- Layout: {}", self.combo.layout)?;

        self.repo_init(h)?;
        self.add(h)?;
        self.stats(h)
    }
}
