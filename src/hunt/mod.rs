// Regression hunting core
//
// Finds the earliest revision in an ordered list whose benchmark timings are
// significantly slower than the baseline, using O(log N) benchmark runs.
//
// - significance: Mann-Whitney U test with midrank ties, normal approximation
// - model: revisions, sample sets, per-revision results, tagged outcome
// - bisect: the search itself, over an injected Sampler capability
//
// The core performs no I/O of its own. Checkout, process spawning and timing
// live behind `Sampler`, so the search runs unchanged against fake samplers.

mod bisect;
mod model;
mod significance;

pub use bisect::{hunt, BisectStep, Bisector, HuntObserver, Sampler};
pub use model::{CommitResult, HuntResult, Revision, SampleSet};
pub use significance::{mann_whitney_u, RankSumTest};
