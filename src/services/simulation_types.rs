use serde::Serialize;

use crate::services::monte_carlo::MonteCarloResults;
use crate::services::npv_result::MonthlySeries;
use crate::services::simulation_tracker::{NEVER_REACHED_YEARS, SimulationTracker, TornadoTracker};
use crate::services::statistics::{MetricSummary, MilestoneSummary};

#[derive(Serialize, Debug, Clone)]
pub struct MetricSummaries {
    pub npv_millions: MetricSummary,
    pub development_cost_millions: MetricSummary,
    pub sales_millions: MetricSummary,
    pub consumable_sales_millions: MetricSummary,
    pub unit_sales: MetricSummary,
    pub ros_percent: MetricSummary,
    pub roi_percent: MetricSummary,
    pub annualized_roi_percent: MetricSummary,
    pub years_to_break_even: MilestoneSummary,
    pub years_to_target_ros: MilestoneSummary,
}

impl MetricSummaries {
    pub fn from_tracker(tracker: &SimulationTracker) -> Self {
        Self {
            npv_millions: MetricSummary::from_values(&tracker.npvs_millions),
            development_cost_millions: MetricSummary::from_values(
                &tracker.development_costs_millions,
            ),
            sales_millions: MetricSummary::from_values(&tracker.sales_millions),
            consumable_sales_millions: MetricSummary::from_values(
                &tracker.consumable_sales_millions,
            ),
            unit_sales: MetricSummary::from_values(&tracker.unit_sales),
            ros_percent: MetricSummary::from_values(&tracker.ros_percent),
            roi_percent: MetricSummary::from_values(&tracker.roi_percent),
            annualized_roi_percent: MetricSummary::from_values(&tracker.annualized_roi_percent),
            years_to_break_even: MilestoneSummary::from_values(
                &tracker.years_to_break_even,
                NEVER_REACHED_YEARS,
            ),
            years_to_target_ros: MilestoneSummary::from_values(
                &tracker.years_to_target_ros,
                NEVER_REACHED_YEARS,
            ),
        }
    }
}

/// One bar of the tornado chart, NPV in millions.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SensitivityEntry {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

impl From<&TornadoTracker> for SensitivityEntry {
    fn from(tracker: &TornadoTracker) -> Self {
        Self {
            name: tracker.name.clone(),
            min: tracker.min_value,
            max: tracker.max_value,
            range: tracker.range(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct SimulationReport {
    pub data_source: String,
    pub products: Vec<String>,
    pub simulations: usize,
    pub sensitivity_simulations: usize,
    pub seed: u64,
    pub summary: MetricSummaries,
    /// Ascending by range; the widest bar is last.
    pub sensitivity: Vec<SensitivityEntry>,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct Distributions {
    pub npv_millions: Vec<f64>,
    pub development_cost_millions: Vec<f64>,
    pub sales_millions: Vec<f64>,
    pub consumable_sales_millions: Vec<f64>,
    pub unit_sales: Vec<f64>,
    pub ros_percent: Vec<f64>,
    pub roi_percent: Vec<f64>,
    pub annualized_roi_percent: Vec<f64>,
    pub years_to_break_even: Vec<f64>,
    pub years_to_target_ros: Vec<f64>,
}

/// Average per trial, indexed by month from the start of the mix.
#[derive(Serialize, Debug, Clone, Default)]
pub struct MonthlyCurves {
    pub ftes: MonthlySeries,
    pub sales: MonthlySeries,
    pub consumable_sales: MonthlySeries,
}

#[derive(Serialize, Debug, Clone)]
pub struct SimulationOutput {
    pub report: SimulationReport,
    pub distributions: Distributions,
    pub monthly: MonthlyCurves,
}

impl SimulationOutput {
    pub fn from_results(
        data_source: &str,
        products: Vec<String>,
        sensitivity_simulations: usize,
        results: MonteCarloResults,
    ) -> Self {
        let tracker = results.simulation_tracker;
        let report = SimulationReport {
            data_source: data_source.to_string(),
            products,
            simulations: tracker.simulations,
            sensitivity_simulations,
            seed: results.seed,
            summary: MetricSummaries::from_tracker(&tracker),
            sensitivity: results
                .tornado_trackers
                .iter()
                .map(SensitivityEntry::from)
                .collect(),
        };

        Self {
            report,
            distributions: Distributions {
                npv_millions: tracker.npvs_millions,
                development_cost_millions: tracker.development_costs_millions,
                sales_millions: tracker.sales_millions,
                consumable_sales_millions: tracker.consumable_sales_millions,
                unit_sales: tracker.unit_sales,
                ros_percent: tracker.ros_percent,
                roi_percent: tracker.roi_percent,
                annualized_roi_percent: tracker.annualized_roi_percent,
                years_to_break_even: tracker.years_to_break_even,
                years_to_target_ros: tracker.years_to_target_ros,
            },
            monthly: MonthlyCurves {
                ftes: tracker.ftes_by_month,
                sales: tracker.sales_by_month,
                consumable_sales: tracker.consumable_sales_by_month,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sensitivity::SensitivityVariable;
    use crate::services::npv_result::NpvResult;

    #[test]
    fn from_results_moves_tracker_data_into_the_output() {
        let mut tracker = SimulationTracker::new();
        for sales in [1_000_000.0, 3_000_000.0] {
            let mut result = NpvResult {
                sales,
                unit_sales: 10.0,
                ..NpvResult::default()
            };
            result.ftes_by_month.add(0, 2.0);
            tracker.add(&result);
        }
        tracker.normalize();

        let mut margin = TornadoTracker::new(SensitivityVariable::Margin);
        margin.add(-1.0);
        margin.add(2.0);
        let results = MonteCarloResults {
            simulation_tracker: tracker,
            tornado_trackers: vec![margin],
            seed: 9,
        };

        let output =
            SimulationOutput::from_results("mix.yaml", vec!["Analyzer".to_string()], 5, results);

        assert_eq!(output.report.data_source, "mix.yaml");
        assert_eq!(output.report.simulations, 2);
        assert_eq!(output.report.sensitivity_simulations, 5);
        assert_eq!(output.report.seed, 9);
        assert_eq!(output.report.summary.sales_millions.mean, 2.0);
        assert_eq!(output.report.summary.sales_millions.max, 3.0);
        assert_eq!(
            output.report.sensitivity,
            vec![SensitivityEntry {
                name: "Margin".to_string(),
                min: -1.0,
                max: 2.0,
                range: 3.0,
            }]
        );
        assert_eq!(output.distributions.sales_millions, vec![1.0, 3.0]);
        assert_eq!(output.monthly.ftes.values(), &[2.0]);
    }

    #[test]
    fn milestone_summaries_ignore_trials_that_never_get_there() {
        let tracker = SimulationTracker {
            simulations: 3,
            years_to_break_even: vec![NEVER_REACHED_YEARS, 1.5, 2.5],
            years_to_target_ros: vec![NEVER_REACHED_YEARS; 3],
            ..SimulationTracker::default()
        };

        let summary = MetricSummaries::from_tracker(&tracker);

        assert_eq!(summary.years_to_break_even.reached, 2);
        assert_eq!(summary.years_to_break_even.years.mean, 2.0);
        assert_eq!(summary.years_to_target_ros.reached, 0);
        assert_eq!(summary.years_to_target_ros.not_reached, 3);
    }
}
