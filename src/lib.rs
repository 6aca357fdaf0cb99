//! PerfHunt - find the commit that made your benchmark slower
//!
//! Given a known-good baseline revision, a suspect revision and a benchmark
//! command, perfhunt bisects the revisions in between and uses a Mann-Whitney
//! U test on repeated timings to decide which revisions are significantly
//! slower than the baseline.
//!
//! The search and the statistics live in [`hunt`] and never touch the outside
//! world; [`git`] and [`sampler`] provide the real checkout-and-run sampler.

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod hunt;
pub mod report;
pub mod sampler;

pub use error::HuntError;
