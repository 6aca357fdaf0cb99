// Bisection over an ordered revision list
//
// The baseline (index 0) is sampled once and reused for every comparison.
// Each step samples the midpoint of [lo, hi] and calls it regressed iff the
// rank-sum test is significant AND its mean is above the baseline mean, so a
// significant speed-up never counts.
//
// Precondition: the regressed/not-regressed predicate is monotonic over the
// list. If a slowdown is fixed and reintroduced inside the range, the search
// still terminates but reports whichever transition the midpoints land on,
// not necessarily the earliest one.
//
// Revisions are sampled strictly one at a time; concurrent benchmark runs
// would distort the wall-clock measurements.

use crate::config::HuntConfig;
use crate::error::{HuntError, Result};
use crate::hunt::model::{CommitResult, HuntResult, Revision, SampleSet};
use crate::hunt::significance::{mann_whitney_u, RankSumTest};

/// Capability that benchmarks one revision `iterations` times
///
/// Implementations own every side effect (checkout, process spawning,
/// timing). Closures of the right shape implement it directly:
///
/// ```
/// use perfhunt::hunt::{Revision, Sampler};
///
/// let mut fake = |_rev: &Revision, n: usize| -> Result<Vec<f64>, std::io::Error> {
///     Ok(vec![0.1; n])
/// };
/// let samples = fake.sample(&Revision::new("abc", 0), 3).unwrap();
/// assert_eq!(samples.len(), 3);
/// ```
pub trait Sampler {
    type Error: std::error::Error + Send + Sync + 'static;

    fn sample(
        &mut self,
        revision: &Revision,
        iterations: usize,
    ) -> std::result::Result<Vec<f64>, Self::Error>;
}

impl<F, E> Sampler for F
where
    F: FnMut(&Revision, usize) -> std::result::Result<Vec<f64>, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn sample(
        &mut self,
        revision: &Revision,
        iterations: usize,
    ) -> std::result::Result<Vec<f64>, E> {
        self(revision, iterations)
    }
}

/// One comparison against the baseline
#[derive(Debug, Clone, Copy)]
pub struct BisectStep<'a> {
    pub result: &'a CommitResult,
    pub test: RankSumTest,
    pub regressed: bool,
}

/// Progress hooks, called synchronously as the hunt advances
pub trait HuntObserver {
    fn on_baseline(&mut self, _baseline: &CommitResult) {}

    fn on_step(&mut self, _step: &BisectStep<'_>) {}
}

impl HuntObserver for () {}

/// Binary search for the first revision significantly slower than the baseline
#[derive(Debug, Clone)]
pub struct Bisector {
    config: HuntConfig,
}

impl Bisector {
    pub fn new(config: HuntConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HuntConfig {
        &self.config
    }

    /// Run a hunt over `revisions`, oldest (baseline) first
    ///
    /// Any sampler failure aborts the hunt; nothing measured so far is kept.
    pub fn hunt<S, O>(
        &self,
        revisions: &[String],
        sampler: &mut S,
        observer: &mut O,
    ) -> Result<HuntResult>
    where
        S: Sampler + ?Sized,
        O: HuntObserver + ?Sized,
    {
        if revisions.len() < 2 {
            return Err(HuntError::InsufficientInput {
                count: revisions.len(),
            });
        }

        let revisions: Vec<Revision> = revisions
            .iter()
            .enumerate()
            .map(|(index, id)| Revision::new(id.as_str(), index))
            .collect();

        let baseline = self.bench(sampler, &revisions[0])?;
        observer.on_baseline(&baseline);

        let mut lo = 0;
        let mut hi = revisions.len() - 1;
        let mut culprit: Option<(CommitResult, f64)> = None;

        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            let result = self.bench(sampler, &revisions[mid])?;
            let (test, regressed) = self.compare(&baseline, &result);

            tracing::debug!(
                lo,
                hi,
                mid,
                p_value = test.p_value,
                regressed,
                "bisect step"
            );
            observer.on_step(&BisectStep {
                result: &result,
                test,
                regressed,
            });

            if regressed {
                hi = mid;
                culprit = Some((result, test.p_value));
            } else {
                lo = mid;
            }
        }

        // hi never moved: the newest revision was never compared
        if culprit.is_none() && hi > lo {
            let result = self.bench(sampler, &revisions[hi])?;
            let (test, regressed) = self.compare(&baseline, &result);

            tracing::debug!(hi, p_value = test.p_value, regressed, "final check");
            observer.on_step(&BisectStep {
                result: &result,
                test,
                regressed,
            });

            if regressed {
                culprit = Some((result, test.p_value));
            }
        }

        let outcome = match culprit {
            Some((culprit, p_value)) => {
                tracing::info!(culprit = %culprit.revision().id, p_value, "regression found");
                HuntResult::found(baseline, culprit, p_value)
            }
            None => {
                tracing::info!("no significant regression");
                HuntResult::NotFound { baseline }
            }
        };

        Ok(outcome)
    }

    /// Rank-sum test of `candidate` against `baseline` plus the regression verdict
    pub fn compare(
        &self,
        baseline: &CommitResult,
        candidate: &CommitResult,
    ) -> (RankSumTest, bool) {
        let test = mann_whitney_u(baseline.samples().as_slice(), candidate.samples().as_slice());
        let regressed = test.is_significant(self.config.significance_level)
            && candidate.mean() > baseline.mean();
        (test, regressed)
    }

    fn bench<S>(&self, sampler: &mut S, revision: &Revision) -> Result<CommitResult>
    where
        S: Sampler + ?Sized,
    {
        let raw = sampler
            .sample(revision, self.config.iterations)
            .map_err(|e| HuntError::SamplerFailure {
                revision: revision.id.clone(),
                source: Box::new(e),
            })?;

        if raw.len() != self.config.iterations {
            return Err(HuntError::InvalidSamples {
                revision: revision.id.clone(),
                reason: format!(
                    "expected {} samples, got {}",
                    self.config.iterations,
                    raw.len()
                ),
            });
        }

        let samples = SampleSet::new(revision, raw)?;
        let result = CommitResult::new(revision.clone(), samples);
        tracing::debug!(
            revision = %revision.id,
            index = revision.index,
            mean = result.mean(),
            "sampled"
        );
        Ok(result)
    }
}

/// Run a hunt with no progress reporting
pub fn hunt<S>(revisions: &[String], sampler: &mut S, config: &HuntConfig) -> Result<HuntResult>
where
    S: Sampler + ?Sized,
{
    Bisector::new(config.clone())?.hunt(revisions, sampler, &mut ())
}
