use crate::domain::sensitivity::SensitivityVariable;
use crate::services::npv_result::{MonthlySeries, NpvResult};

const MILLION: f64 = 1_000_000.0;
/// Return on sales a mix has to reach for `years_to_target_ros`.
pub const TARGET_ROS: f64 = 0.10;
/// Recorded when a threshold is never reached within the horizon.
pub const NEVER_REACHED_YEARS: f64 = -1.0;

/// Per-trial outcome distributions plus running totals of the monthly curves.
#[derive(Debug, Clone, Default)]
pub struct SimulationTracker {
    pub simulations: usize,
    pub npvs_millions: Vec<f64>,
    pub development_costs_millions: Vec<f64>,
    pub unit_sales: Vec<f64>,
    pub sales_millions: Vec<f64>,
    pub consumable_sales_millions: Vec<f64>,
    pub ros_percent: Vec<f64>,
    pub roi_percent: Vec<f64>,
    pub annualized_roi_percent: Vec<f64>,
    pub years_to_break_even: Vec<f64>,
    pub years_to_target_ros: Vec<f64>,
    pub ftes_by_month: MonthlySeries,
    pub sales_by_month: MonthlySeries,
    pub consumable_sales_by_month: MonthlySeries,
}

impl SimulationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: &NpvResult) {
        self.simulations += 1;
        self.npvs_millions.push(result.net() / MILLION);
        self.development_costs_millions
            .push(result.development_cost / MILLION);
        self.unit_sales.push(result.unit_sales);
        self.sales_millions.push(result.sales / MILLION);
        self.consumable_sales_millions
            .push(result.consumable_sales / MILLION);
        self.ros_percent.push(result.ros() * 100.0);
        self.roi_percent.push(result.roi() * 100.0);
        // Losing more than the development spend floors at -100%.
        let years = result.cumulative_net_by_month.len() as f64 / 12.0;
        self.annualized_roi_percent
            .push(result.annualized_roi(years).max(-1.0) * 100.0);
        self.ftes_by_month.merge(&result.ftes_by_month);
        self.sales_by_month.merge(&result.sales_by_month);
        self.consumable_sales_by_month
            .merge(&result.consumable_sales_by_month);

        let milestones = scan_milestones(result);
        self.years_to_break_even
            .push(years_or_never(milestones.break_even_month));
        self.years_to_target_ros
            .push(years_or_never(milestones.target_ros_month));
    }

    /// Turns the accumulated monthly totals into per-trial averages.
    pub fn normalize(&mut self) {
        if self.simulations == 0 {
            return;
        }
        let factor = 1.0 / self.simulations as f64;
        self.ftes_by_month.scale(factor);
        self.sales_by_month.scale(factor);
        self.consumable_sales_by_month.scale(factor);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Milestones {
    break_even_month: Option<usize>,
    target_ros_month: Option<usize>,
}

/// Walks cumulative net and monthly sales together, looking for the break-even
/// month and the first month where cumulative net over cumulative sales
/// reaches the target ROS. Break-even is the first month with positive
/// cumulative net, or with zero cumulative net after a loss.
fn scan_milestones(result: &NpvResult) -> Milestones {
    let mut milestones = Milestones {
        break_even_month: None,
        target_ros_month: None,
    };
    let mut cumulative_sales = 0.0;
    let mut in_loss = false;

    for (month, cumulative_net) in result.cumulative_net_by_month.values().iter().enumerate() {
        cumulative_sales += result.sales_by_month.get(month);
        if milestones.break_even_month.is_none()
            && (*cumulative_net > 0.0 || (in_loss && *cumulative_net >= 0.0))
        {
            milestones.break_even_month = Some(month);
        }
        in_loss |= *cumulative_net < 0.0;
        if milestones.target_ros_month.is_none()
            && cumulative_sales > 0.0
            && cumulative_net / cumulative_sales >= TARGET_ROS
        {
            milestones.target_ros_month = Some(month);
        }
        if milestones.break_even_month.is_some() && milestones.target_ros_month.is_some() {
            break;
        }
    }

    milestones
}

fn years_or_never(month: Option<usize>) -> f64 {
    month.map_or(NEVER_REACHED_YEARS, |month| month as f64 / 12.0)
}

/// Spread of mix NPV, in millions, while only `variable` is left random.
#[derive(Debug, Clone)]
pub struct TornadoTracker {
    pub name: String,
    pub min_value: f64,
    pub max_value: f64,
}

impl TornadoTracker {
    pub fn new(variable: SensitivityVariable) -> Self {
        Self {
            name: variable.label().to_string(),
            min_value: f64::INFINITY,
            max_value: f64::NEG_INFINITY,
        }
    }

    pub fn add(&mut self, value: f64) {
        self.min_value = self.min_value.min(value);
        self.max_value = self.max_value.max(value);
    }

    pub fn range(&self) -> f64 {
        self.max_value - self.min_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_cumulative_net(values: Vec<f64>, monthly_sales: f64) -> NpvResult {
        let months = values.len();
        let mut result = NpvResult {
            cumulative_net_by_month: MonthlySeries::from_values(values),
            ..NpvResult::default()
        };
        for month in 0..months {
            result.sales_by_month.add(month, monthly_sales);
        }
        result
    }

    #[test]
    fn break_even_is_the_first_positive_month() {
        let mut values = vec![-1000.0; 12];
        values.extend(vec![50.0; 12]);
        let mut tracker = SimulationTracker::new();

        tracker.add(&result_with_cumulative_net(values, 100.0));

        assert_eq!(tracker.years_to_break_even, vec![1.0]);
    }

    #[test]
    fn break_even_counts_recovering_to_exactly_zero() {
        let mut values = vec![-1000.0; 12];
        values.extend(vec![0.0; 12]);
        let mut tracker = SimulationTracker::new();

        tracker.add(&result_with_cumulative_net(values, 100.0));

        assert_eq!(tracker.years_to_break_even, vec![1.0]);
    }

    #[test]
    fn zero_before_any_loss_is_not_break_even() {
        let mut values = vec![0.0; 3];
        values.extend(vec![-10.0; 9]);
        values.extend(vec![5.0; 12]);
        let mut tracker = SimulationTracker::new();

        tracker.add(&result_with_cumulative_net(values, 100.0));

        assert_eq!(tracker.years_to_break_even, vec![1.0]);
    }

    #[test]
    fn never_breaking_even_records_the_sentinel() {
        let mut tracker = SimulationTracker::new();
        tracker.add(&result_with_cumulative_net(vec![-5.0; 36], 10.0));

        assert_eq!(tracker.years_to_break_even, vec![NEVER_REACHED_YEARS]);
        assert_eq!(tracker.years_to_target_ros, vec![NEVER_REACHED_YEARS]);
    }

    #[test]
    fn target_ros_uses_cumulative_sales_to_date() {
        // 100 of sales a month; cumulative net reaches 10% of cumulative sales
        // at month 24 (net 250 against sales 2500).
        let values: Vec<f64> = (0..36).map(|month| -2150.0 + 100.0 * month as f64).collect();
        let mut tracker = SimulationTracker::new();

        tracker.add(&result_with_cumulative_net(values, 100.0));

        assert_eq!(tracker.years_to_break_even, vec![22.0 / 12.0]);
        assert_eq!(tracker.years_to_target_ros, vec![2.0]);
    }

    #[test]
    fn add_scales_scalar_metrics() {
        let result = NpvResult {
            development_cost: 1_000_000.0,
            sales: 5_000_000.0,
            consumable_sales: 500_000.0,
            cost_of_goods: 2_000_000.0,
            sga: 500_000.0,
            unit_sales: 250.0,
            ..NpvResult::default()
        };
        let mut tracker = SimulationTracker::new();

        tracker.add(&result);

        assert_eq!(tracker.simulations, 1);
        assert_eq!(tracker.npvs_millions, vec![1.5]);
        assert_eq!(tracker.development_costs_millions, vec![1.0]);
        assert_eq!(tracker.sales_millions, vec![5.0]);
        assert_eq!(tracker.consumable_sales_millions, vec![0.5]);
        assert_eq!(tracker.unit_sales, vec![250.0]);
        assert_eq!(tracker.ros_percent, vec![30.0]);
        assert_eq!(tracker.roi_percent, vec![150.0]);
        assert_eq!(tracker.annualized_roi_percent, vec![0.0]);
    }

    #[test]
    fn annualized_roi_spans_the_result_horizon() {
        let mut result = NpvResult {
            development_cost: 1_000_000.0,
            sales: 4_000_000.0,
            cost_of_goods: 2_000_000.0,
            ..NpvResult::default()
        };
        result.cumulative_net_by_month.add(23, 0.0);
        let mut tracker = SimulationTracker::new();

        tracker.add(&result);

        assert!((tracker.annualized_roi_percent[0] - 41.421356).abs() < 1e-4);
    }

    #[test]
    fn annualized_roi_of_a_wipeout_floors_at_minus_one_hundred() {
        let mut result = NpvResult {
            development_cost: 1_000_000.0,
            sales: 1_000_000.0,
            cost_of_goods: 3_000_000.0,
            ..NpvResult::default()
        };
        result.cumulative_net_by_month.add(11, 0.0);
        let mut tracker = SimulationTracker::new();

        tracker.add(&result);

        assert_eq!(tracker.annualized_roi_percent, vec![-100.0]);
    }

    #[test]
    fn normalize_averages_the_monthly_curves() {
        let mut first = NpvResult::new();
        first.ftes_by_month.add(0, 2.0);
        first.sales_by_month.add(1, 10.0);
        let mut second = NpvResult::new();
        second.ftes_by_month.add(0, 4.0);
        second.ftes_by_month.add(2, 6.0);
        second.consumable_sales_by_month.add(0, 8.0);

        let mut tracker = SimulationTracker::new();
        tracker.add(&first);
        tracker.add(&second);
        tracker.normalize();

        assert_eq!(tracker.ftes_by_month.values(), &[3.0, 0.0, 3.0]);
        assert_eq!(tracker.sales_by_month.values(), &[0.0, 5.0]);
        assert_eq!(tracker.consumable_sales_by_month.values(), &[4.0]);
    }

    #[test]
    fn normalize_without_trials_is_a_no_op() {
        let mut tracker = SimulationTracker::new();
        tracker.normalize();
        assert!(tracker.ftes_by_month.is_empty());
    }

    #[test]
    fn tornado_tracker_keeps_min_and_max() {
        let mut tracker = TornadoTracker::new(SensitivityVariable::Margin);
        for value in [1.5, -0.5, 3.0, 2.0] {
            tracker.add(value);
        }
        assert_eq!(tracker.name, "Margin");
        assert_eq!(tracker.min_value, -0.5);
        assert_eq!(tracker.max_value, 3.0);
        assert_eq!(tracker.range(), 3.5);
    }
}
