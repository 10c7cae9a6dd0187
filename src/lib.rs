//! ipfs-add-bench: benchmark `ipfs add` across repository options
//!
//! Sweeps the cross product of datastore backend, chunker and DAG layout.
//! Each combination gets its own repository (selected through `IPFS_PATH`),
//! is initialised, timed while adding a directory of test files, and then
//! inspected with `du` and `ipfs repo stat`. Everything is written to stdout
//! as a Markdown transcript.
//!
//! # Example
//!
//! ```ignore
//! use ipfs_add_bench::{BenchConfig, Harness, SystemRunner};
//! use std::path::Path;
//!
//! let config = BenchConfig::default();
//! let mut harness = Harness::new(SystemRunner, std::io::stdout(), &config);
//! let report = harness.run(Path::new("testfiles"))?;
//! println!("fastest: {:?}", report.fastest());
//! ```

pub mod cli;
pub mod command;
pub mod config;
pub mod driver;
pub mod error;
pub mod matrix;
pub mod report;

// Re-export commonly used types
pub use cli::Cli;
pub use command::{Captured, CommandRunner, DryRunner, Invocation, SystemRunner};
pub use config::BenchConfig;
pub use driver::{Harness, TestRun};
pub use error::{BenchError, Result};
pub use matrix::{sweep, Chunker, Combination, Datastore, Layout};
pub use report::{RunRecord, SweepReport};
