use crate::services::simulation_types::SimulationReport;
use crate::services::statistics::{MetricSummary, MilestoneSummary};

pub fn format_simulation_report(report: &SimulationReport) -> String {
    let summary = &report.summary;

    let mut lines = Vec::new();
    lines.push("Simulation Report".to_string());
    lines.push(format!("Data source: {}", report.data_source));
    lines.push(format!("Products: {}", report.products.join(", ")));
    lines.push(format!("Simulations: {}", report.simulations));
    lines.push(format!(
        "Sensitivity simulations: {}",
        report.sensitivity_simulations
    ));
    lines.push(format!("Seed: {}", report.seed));
    lines.push(String::new());
    lines.push("Metric | Mean | P10 | P50 | P90".to_string());
    lines.push("-------|------|-----|-----|----".to_string());
    lines.push(format_metric_row("NPV (M)", &summary.npv_millions));
    lines.push(format_metric_row(
        "Development cost (M)",
        &summary.development_cost_millions,
    ));
    lines.push(format_metric_row("Sales (M)", &summary.sales_millions));
    lines.push(format_metric_row(
        "Consumables (M)",
        &summary.consumable_sales_millions,
    ));
    lines.push(format_metric_row("Unit sales", &summary.unit_sales));
    lines.push(format_metric_row("ROS (%)", &summary.ros_percent));
    lines.push(format_metric_row("ROI (%)", &summary.roi_percent));
    lines.push(format_metric_row(
        "Annualized ROI (%)",
        &summary.annualized_roi_percent,
    ));
    lines.push(format_milestone_row(
        "Years to break even",
        &summary.years_to_break_even,
    ));
    lines.push(format_milestone_row(
        "Years to 10% ROS",
        &summary.years_to_target_ros,
    ));
    lines.push(String::new());
    lines.push("Sensitivity (NPV M):".to_string());
    lines.push("Variable | Min | Max | Range".to_string());
    lines.push("---------|-----|-----|------".to_string());
    for entry in report.sensitivity.iter().rev() {
        lines.push(format!(
            "{} | {:.2} | {:.2} | {:.2}",
            entry.name, entry.min, entry.max, entry.range
        ));
    }

    lines.join("\n")
}

fn format_metric_row(label: &str, metric: &MetricSummary) -> String {
    format!(
        "{label} | {:.2} | {:.2} | {:.2} | {:.2}",
        metric.mean, metric.p10, metric.p50, metric.p90
    )
}

fn format_milestone_row(label: &str, milestone: &MilestoneSummary) -> String {
    if milestone.reached == 0 {
        return format!("{label} | never | never | never | never");
    }
    format!(
        "{} (reached {}/{})",
        format_metric_row(label, &milestone.years),
        milestone.reached,
        milestone.reached + milestone.not_reached
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::simulation_types::{MetricSummaries, SensitivityEntry};

    fn metric(mean: f64) -> MetricSummary {
        MetricSummary {
            mean,
            min: mean - 2.0,
            p10: mean - 1.0,
            p50: mean,
            p90: mean + 1.0,
            max: mean + 2.0,
        }
    }

    fn build_report() -> SimulationReport {
        SimulationReport {
            data_source: "mix.yaml".to_string(),
            products: vec!["Analyzer".to_string(), "Analyzer EU".to_string()],
            simulations: 4000,
            sensitivity_simulations: 100,
            seed: 42,
            summary: MetricSummaries {
                npv_millions: metric(12.5),
                development_cost_millions: metric(3.0),
                sales_millions: metric(40.0),
                consumable_sales_millions: metric(2.0),
                unit_sales: metric(900.0),
                ros_percent: metric(31.25),
                roi_percent: metric(410.0),
                annualized_roi_percent: metric(48.5),
                years_to_break_even: MilestoneSummary {
                    reached: 3900,
                    not_reached: 100,
                    years: metric(3.5),
                },
                years_to_target_ros: MilestoneSummary {
                    reached: 0,
                    not_reached: 4000,
                    years: MetricSummary::default(),
                },
            },
            sensitivity: vec![
                SensitivityEntry {
                    name: "Dev FTEs".to_string(),
                    min: 11.0,
                    max: 12.0,
                    range: 1.0,
                },
                SensitivityEntry {
                    name: "Margin".to_string(),
                    min: 8.0,
                    max: 16.5,
                    range: 8.5,
                },
            ],
        }
    }

    #[test]
    fn format_simulation_report_includes_header_and_table() {
        let output = format_simulation_report(&build_report());

        assert!(output.contains("Simulation Report"));
        assert!(output.contains("Data source: mix.yaml"));
        assert!(output.contains("Products: Analyzer, Analyzer EU"));
        assert!(output.contains("Simulations: 4000"));
        assert!(output.contains("Sensitivity simulations: 100"));
        assert!(output.contains("Seed: 42"));
        assert!(output.contains("NPV (M) | 12.50 | 11.50 | 12.50 | 13.50"));
        assert!(output.contains("ROS (%) | 31.25 | 30.25 | 31.25 | 32.25"));
        assert!(output.contains("Annualized ROI (%) | 48.50 | 47.50 | 48.50 | 49.50"));
        assert!(output.contains("Years to break even | 3.50 | 2.50 | 3.50 | 4.50 (reached 3900/4000)"));
    }

    #[test]
    fn format_simulation_report_marks_unreached_milestones() {
        let output = format_simulation_report(&build_report());
        assert!(output.contains("Years to 10% ROS | never | never | never | never"));
    }

    #[test]
    fn format_simulation_report_lists_widest_sensitivity_first() {
        let output = format_simulation_report(&build_report());

        let margin = output.find("Margin | 8.00 | 16.50 | 8.50").unwrap();
        let ftes = output.find("Dev FTEs | 11.00 | 12.00 | 1.00").unwrap();
        assert!(margin < ftes);
    }
}
