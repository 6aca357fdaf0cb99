// Configuration for a regression hunt
//
// Two knobs drive the core: how many times each revision is benchmarked and
// the significance level used to call a revision "slower". Both can come from
// the command line, a perfhunt.toml file, or the defaults below.

use crate::error::HuntError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default file name looked up in the repository root
pub const CONFIG_FILE_NAME: &str = "perfhunt.toml";

/// Parameters consumed by the bisector
///
/// # Example
/// ```
/// use perfhunt::config::HuntConfig;
///
/// let config = HuntConfig::default();
/// assert_eq!(config.iterations, 10);
/// assert_eq!(config.significance_level, 0.05); // 95% confidence
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuntConfig {
    /// Benchmark runs per revision (sample set size)
    pub iterations: usize,

    /// Significance level (alpha) for the rank-sum test
    ///
    /// - 0.05 (default): 95% confidence
    /// - 0.01: stricter, fewer false culprits on noisy machines
    /// - 0.10: looser, catches smaller slowdowns at the cost of false positives
    pub significance_level: f64,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            significance_level: 0.05,
        }
    }
}

impl HuntConfig {
    /// Fewer false positives, twice the benchmark runs
    pub fn strict() -> Self {
        Self {
            iterations: 20,
            significance_level: 0.01,
        }
    }

    /// Quick hunts on stable machines
    pub fn permissive() -> Self {
        Self {
            iterations: 5,
            significance_level: 0.10,
        }
    }

    /// Range checks only: `iterations >= 1`, `0 < alpha < 1`
    pub fn validate(&self) -> Result<(), HuntError> {
        if self.iterations < 1 {
            return Err(HuntError::InvalidConfig(format!(
                "iterations must be >= 1, got {}",
                self.iterations
            )));
        }

        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(HuntError::InvalidConfig(format!(
                "significance level must be in (0, 1), got {}",
                self.significance_level
            )));
        }

        Ok(())
    }
}

/// Contents of a perfhunt.toml file
///
/// # Example perfhunt.toml
///
/// ```toml
/// command = "cargo run --release --bin bench"
/// iterations = 15
/// alpha = 0.01
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Benchmark shell command
    pub command: Option<String>,
    pub iterations: Option<usize>,
    pub alpha: Option<f64>,
}

impl FileConfig {
    /// Load and parse a config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Explicit path if given, otherwise perfhunt.toml in `repo` when present
    pub fn discover(explicit: Option<&Path>, repo: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidate = repo.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!("Loading {}", candidate.display());
            Self::from_file(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the hunt config: CLI value, then file value, then default
    pub fn resolve(&self, iterations: Option<usize>, alpha: Option<f64>) -> HuntConfig {
        let defaults = HuntConfig::default();
        HuntConfig {
            iterations: iterations
                .or(self.iterations)
                .unwrap_or(defaults.iterations),
            significance_level: alpha.or(self.alpha).unwrap_or(defaults.significance_level),
        }
    }
}
