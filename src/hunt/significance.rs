// Mann-Whitney U rank-sum test with normal approximation
//
// Decides whether two independent sets of timing samples differ in location
// without assuming a distribution. Benchmark durations are skewed and often
// repeat exactly on coarse timers, so ties receive midranks.
//
// Formulas:
// - U  = n1*n2 + n1*(n1+1)/2 - R1   (R1 = rank sum of the first group)
// - mu = n1*n2/2
// - sd = sqrt(n1*n2*(n1+n2+1)/12)
// - p  = 2 * (1 - Phi(|U - mu| / sd)), Phi via the error function
//
// A zero standard deviation (an empty group) yields p = 1.0.

use serde::{Deserialize, Serialize};

/// Result of a rank-sum comparison between two sample sets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankSumTest {
    /// U statistic for the first group
    pub u: f64,

    /// Two-tailed p-value in [0, 1]
    /// - p < alpha: the groups differ in location
    /// - p >= alpha: no evidence of a difference
    pub p_value: f64,
}

impl RankSumTest {
    /// Whether the difference is significant at `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

#[derive(Debug, Clone, Copy)]
enum Group {
    First,
    Second,
}

/// Compare two independent sample sets with the Mann-Whitney U test
///
/// Pure and deterministic: the same inputs always produce the same `u` and
/// `p_value`. Group sizes may differ.
///
/// # Example
/// ```
/// use perfhunt::hunt::mann_whitney_u;
///
/// let baseline = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let current = [10.0, 11.0, 12.0, 13.0, 14.0];
///
/// let test = mann_whitney_u(&baseline, &current);
/// assert!(test.p_value < 0.05);
/// ```
pub fn mann_whitney_u(x: &[f64], y: &[f64]) -> RankSumTest {
    let n1 = x.len() as f64;
    let n2 = y.len() as f64;

    let mut pooled: Vec<(f64, Group)> = x
        .iter()
        .map(|&v| (v, Group::First))
        .chain(y.iter().map(|&v| (v, Group::Second)))
        .collect();
    pooled.sort_by(|a, b| a.0.total_cmp(&b.0));

    let ranks = midranks(&pooled);
    let r1: f64 = pooled
        .iter()
        .zip(&ranks)
        .filter(|((_, group), _)| matches!(group, Group::First))
        .map(|(_, rank)| rank)
        .sum();

    let u = n1 * n2 + n1 * (n1 + 1.0) / 2.0 - r1;
    let mu = n1 * n2 / 2.0;
    let sigma = (n1 * n2 * (n1 + n2 + 1.0) / 12.0).sqrt();

    if sigma == 0.0 {
        return RankSumTest { u, p_value: 1.0 };
    }

    let z = (u - mu).abs() / sigma;
    let p_value = (2.0 * (1.0 - normal_cdf(z))).clamp(0.0, 1.0);

    RankSumTest { u, p_value }
}

/// Ranks 1..=n for sorted observations, ties sharing the average of their positions
fn midranks(sorted: &[(f64, Group)]) -> Vec<f64> {
    let mut ranks = vec![0.0; sorted.len()];
    let mut start = 0;

    while start < sorted.len() {
        let mut end = start + 1;
        while end < sorted.len() && sorted[end].0 == sorted[start].0 {
            end += 1;
        }

        // positions start+1 ..= end
        let rank = (start + end + 1) as f64 / 2.0;
        ranks[start..end].fill(rank);
        start = end;
    }

    ranks
}

/// Standard normal CDF
fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + libm::erf(z / std::f64::consts::SQRT_2))
}
