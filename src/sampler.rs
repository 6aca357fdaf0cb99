//! Benchmark sampler backed by git checkouts and a shell command
//!
//! For each requested revision: check it out, then run the benchmark command
//! `n` times back to back, timing each run with a monotonic clock.

use crate::git::{self, GitError};
use crate::hunt::{Revision, Sampler};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;
use thiserror::Error;

/// Errors from checking out or benchmarking a revision
#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("checkout failed: {0}")]
    Checkout(#[from] GitError),

    #[error("failed to spawn benchmark: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("benchmark failed on run {run} ({status})")]
    BenchmarkFailed { run: usize, status: String },
}

/// Runs `sh -c <command>` in the repository for every sampled revision
#[derive(Debug, Clone)]
pub struct CommandSampler {
    repo: PathBuf,
    command: String,
}

impl CommandSampler {
    pub fn new(repo: impl Into<PathBuf>, command: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Time one benchmark run, in seconds
    fn run_once(&self, run: usize) -> Result<f64, SamplerError> {
        let start = Instant::now();
        let status = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .current_dir(&self.repo)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(SamplerError::Spawn)?;
        let elapsed = start.elapsed().as_secs_f64();

        if !status.success() {
            return Err(SamplerError::BenchmarkFailed {
                run,
                status: status.to_string(),
            });
        }

        Ok(elapsed)
    }
}

impl Sampler for CommandSampler {
    type Error = SamplerError;

    fn sample(&mut self, revision: &Revision, iterations: usize) -> Result<Vec<f64>, SamplerError> {
        git::checkout(&self.repo, &revision.id)?;
        tracing::debug!(revision = %revision.id, iterations, "benchmarking");

        (1..=iterations).map(|run| self.run_once(run)).collect()
    }
}
