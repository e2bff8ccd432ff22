use super::model::PerformanceResult;
use serde::{Deserialize, Serialize};

/// Aggregate over a user's saved results.
///
/// The all-zero value doubles as the neutral record shown when statistics
/// cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStats {
    pub total_tests: u32,
    pub average_score: f64,
    pub average_time: f64,
    /// Percent change between the first three and the last three results
    pub improvement: f64,
}

impl PerformanceStats {
    /// Results needed before an improvement figure is reported.
    pub const IMPROVEMENT_MIN_RESULTS: usize = 6;
    const IMPROVEMENT_WINDOW: usize = 3;

    /// Summarizes `results`, which must be ordered oldest first.
    ///
    /// Averages and improvement are rounded to two decimals. Improvement stays
    /// 0 below six results or when the early average is 0.
    pub fn summarize(results: &[PerformanceResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let total = results.len() as f64;
        let average_score = results.iter().map(|r| f64::from(r.score)).sum::<f64>() / total;
        let average_time = results.iter().map(|r| f64::from(r.elapsed_seconds)).sum::<f64>() / total;

        let improvement = if results.len() >= Self::IMPROVEMENT_MIN_RESULTS {
            let window = Self::IMPROVEMENT_WINDOW;
            let first = mean_score(&results[..window]);
            let last = mean_score(&results[results.len() - window..]);
            if first > 0.0 {
                (last - first) / first * 100.0
            } else {
                0.0
            }
        } else {
            0.0
        };

        Self {
            total_tests: results.len() as u32,
            average_score: round2(average_score),
            average_time: round2(average_time),
            improvement: round2(improvement),
        }
    }
}

fn mean_score(results: &[PerformanceResult]) -> f64 {
    results.iter().map(|r| f64::from(r.score)).sum::<f64>() / results.len() as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
