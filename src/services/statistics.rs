use serde::Serialize;

/// Shape of one outcome distribution.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct MetricSummary {
    pub mean: f64,
    pub min: f64,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
    pub max: f64,
}

impl MetricSummary {
    /// All zeros for an empty input.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Self {
            mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
            min: sorted[0],
            p10: percentile_sorted(&sorted, 10.0),
            p50: percentile_sorted(&sorted, 50.0),
            p90: percentile_sorted(&sorted, 90.0),
            max: sorted[sorted.len() - 1],
        }
    }
}

/// Summary of a milestone that some trials never reach; `never_reached`
/// entries are left out of the summary and counted instead.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct MilestoneSummary {
    pub reached: usize,
    pub not_reached: usize,
    pub years: MetricSummary,
}

impl MilestoneSummary {
    pub fn from_values(values: &[f64], never_reached: f64) -> Self {
        let reached: Vec<f64> = values
            .iter()
            .copied()
            .filter(|value| *value != never_reached)
            .collect();
        Self {
            reached: reached.len(),
            not_reached: values.len() - reached.len(),
            years: MetricSummary::from_values(&reached),
        }
    }
}

/// Nearest-rank percentile of an ascending slice; `percentile` is clamped
/// to `[0, 100]`.
pub fn percentile_sorted(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }
    let fraction = percentile.clamp(0.0, 100.0) / 100.0;
    let index = (fraction * (sorted_values.len() - 1) as f64).round() as usize;
    sorted_values[index]
}
