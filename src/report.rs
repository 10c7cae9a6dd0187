//! End-of-sweep summary: a Markdown table for the transcript and an optional
//! JSON document for further processing.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::error::{BenchError, Result};
use crate::matrix::{Chunker, Combination, Datastore, Layout};

/// Timing for one completed combination
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub datastore: Datastore,
    pub chunker: Chunker,
    pub layout: Layout,
    pub repo_path: PathBuf,

    /// Wall-clock time of `ipfs add`, in seconds
    #[serde(rename = "add_secs", serialize_with = "serialize_secs")]
    pub add_duration: Duration,
}

impl RunRecord {
    pub fn new(combo: Combination, repo_path: PathBuf, add_duration: Duration) -> Self {
        Self {
            datastore: combo.datastore,
            chunker: combo.chunker,
            layout: combo.layout,
            repo_path,
            add_duration,
        }
    }
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Results of a complete sweep over one input directory
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub input: PathBuf,

    /// RFC 3339 timestamp taken when the sweep started
    pub started_at: String,

    pub runs: Vec<RunRecord>,
}

impl SweepReport {
    pub fn new(input: &Path) -> Self {
        Self {
            input: input.to_path_buf(),
            started_at: chrono::Local::now().to_rfc3339(),
            runs: Vec::new(),
        }
    }

    /// Fastest add across all runs
    pub fn fastest(&self) -> Option<&RunRecord> {
        self.runs.iter().min_by_key(|r| r.add_duration)
    }

    pub fn to_markdown(&self) -> String {
        let mut md = String::from("### Summary\n\n");
        md.push_str("| Datastore | Chunker | Layout | Add | Repo |\n");
        md.push_str("|---|---|---|---|---|\n");
        for run in &self.runs {
            md.push_str(&format!(
                "| {} | {} | {} | {:.3?} | `{}` |\n",
                run.datastore,
                run.chunker,
                run.layout,
                run.add_duration,
                run.repo_path.display()
            ));
        }
        if let Some(best) = self.fastest() {
            md.push_str(&format!(
                "\nFastest: {{{}, {}, {}}} in {:.3?}\n",
                best.datastore, best.chunker, best.layout, best.add_duration
            ));
        }
        md
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            BenchError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;
        fs::write(path, json + "\n")?;
        Ok(())
    }
}
