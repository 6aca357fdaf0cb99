//! Data model for a regression hunt: revisions, sample sets, per-revision
//! results and the final outcome.

use crate::error::{HuntError, Result};
use serde::{Deserialize, Serialize};

/// A revision identified by an opaque id, positioned in an externally ordered list
///
/// Index 0 is the baseline, the last index the newest suspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub id: String,
    pub index: usize,
}

impl Revision {
    pub fn new(id: impl Into<String>, index: usize) -> Self {
        Self {
            id: id.into(),
            index,
        }
    }

    /// First 8 characters of the id, for display
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((end, _)) => &self.id[..end],
            None => &self.id,
        }
    }
}

/// Benchmark durations (seconds) for one revision, one per run
///
/// Immutable once built. Never empty, every value finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SampleSet(Vec<f64>);

impl SampleSet {
    /// Validate raw durations into a sample set
    pub fn new(revision: &Revision, samples: Vec<f64>) -> Result<Self> {
        if samples.is_empty() {
            return Err(HuntError::InvalidSamples {
                revision: revision.id.clone(),
                reason: "no samples".to_string(),
            });
        }

        if let Some(bad) = samples.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(HuntError::InvalidSamples {
                revision: revision.id.clone(),
                reason: format!("duration {} is not a finite non-negative number", bad),
            });
        }

        Ok(Self(samples))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Arithmetic mean
    pub fn mean(&self) -> f64 {
        self.0.iter().sum::<f64>() / self.0.len() as f64
    }
}

/// Samples and derived mean for one benchmarked revision
///
/// The mean is computed from the samples at construction and cannot be set
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitResult {
    revision: Revision,
    samples: SampleSet,
    mean: f64,
}

impl CommitResult {
    pub fn new(revision: Revision, samples: SampleSet) -> Self {
        let mean = samples.mean();
        Self {
            revision,
            samples,
            mean,
        }
    }

    pub fn revision(&self) -> &Revision {
        &self.revision
    }

    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }
}

/// Outcome of a hunt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HuntResult {
    /// No revision regressed significantly
    NotFound { baseline: CommitResult },

    /// Earliest revision found to be significantly slower than the baseline
    Found {
        baseline: CommitResult,
        culprit: CommitResult,
        p_value: f64,
        /// `(culprit.mean - baseline.mean) / baseline.mean * 100`
        slowdown_percent: f64,
    },
}

impl HuntResult {
    /// Build a `Found` outcome, deriving the slowdown from the two means
    pub fn found(baseline: CommitResult, culprit: CommitResult, p_value: f64) -> Self {
        let slowdown_percent = slowdown_percent(baseline.mean(), culprit.mean());
        HuntResult::Found {
            baseline,
            culprit,
            p_value,
            slowdown_percent,
        }
    }

    pub fn baseline(&self) -> &CommitResult {
        match self {
            HuntResult::NotFound { baseline } | HuntResult::Found { baseline, .. } => baseline,
        }
    }

    pub fn culprit(&self) -> Option<&CommitResult> {
        match self {
            HuntResult::NotFound { .. } => None,
            HuntResult::Found { culprit, .. } => Some(culprit),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, HuntResult::Found { .. })
    }
}

/// Relative slowdown in percent; infinite for a zero-duration baseline
fn slowdown_percent(baseline_mean: f64, culprit_mean: f64) -> f64 {
    if baseline_mean == 0.0 {
        return f64::INFINITY;
    }
    (culprit_mean - baseline_mean) / baseline_mean * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(id: &str, index: usize, samples: &[f64]) -> CommitResult {
        let revision = Revision::new(id, index);
        let samples = SampleSet::new(&revision, samples.to_vec()).unwrap();
        CommitResult::new(revision, samples)
    }

    #[test]
    fn test_mean() {
        let result = commit("abc", 0, &[2.0, 4.0, 6.0]);
        assert!((result.mean() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_id() {
        assert_eq!(Revision::new("0123456789abcdef", 0).short_id(), "01234567");
        assert_eq!(Revision::new("abc", 0).short_id(), "abc");
    }

    #[test]
    fn test_sample_set_rejects_empty() {
        let revision = Revision::new("abc", 1);
        let err = SampleSet::new(&revision, vec![]).unwrap_err();
        assert!(matches!(err, HuntError::InvalidSamples { .. }));
    }

    #[test]
    fn test_sample_set_rejects_negative_and_nan() {
        let revision = Revision::new("abc", 1);
        assert!(SampleSet::new(&revision, vec![0.1, -0.2]).is_err());
        assert!(SampleSet::new(&revision, vec![0.1, f64::NAN]).is_err());
        assert!(SampleSet::new(&revision, vec![0.0, 0.0]).is_ok());
    }

    #[test]
    fn test_found_slowdown() {
        let baseline = commit("good", 0, &[0.1, 0.1]);
        let culprit = commit("bad", 1, &[0.3, 0.3]);

        let result = HuntResult::found(baseline, culprit, 0.001);

        match result {
            HuntResult::Found {
                slowdown_percent, ..
            } => assert!((slowdown_percent - 200.0).abs() < 1e-9),
            _ => panic!("Expected Found"),
        }
    }

    #[test]
    fn test_not_found_accessors() {
        let result = HuntResult::NotFound {
            baseline: commit("good", 0, &[0.1]),
        };
        assert!(!result.is_found());
        assert!(result.culprit().is_none());
        assert_eq!(result.baseline().revision().id, "good");
    }

    #[test]
    fn test_json_tagging() {
        let result = HuntResult::NotFound {
            baseline: commit("good", 0, &[0.5, 1.5]),
        };
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["outcome"], "not_found");
        assert_eq!(json["baseline"]["revision"]["id"], "good");
        assert_eq!(json["baseline"]["mean"], 1.0);
        assert_eq!(json["baseline"]["samples"][1], 1.5);
    }
}
