//! Common test utilities for ipfs-add-bench integration tests
//!
//! This module provides:
//! - `BenchEnv` builder: a scratch directory with test files and a fake `ipfs`
//! - Assertions over the Markdown transcript

#![allow(dead_code)]

pub mod assertions;
pub mod bench_env;

pub use assertions::*;
pub use bench_env::BenchEnv;
