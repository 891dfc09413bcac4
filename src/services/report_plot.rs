use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::services::npv_result::MonthlySeries;
use crate::services::simulation_tracker::NEVER_REACHED_YEARS;
use crate::services::simulation_types::{SensitivityEntry, SimulationOutput};

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("failed to render report plot: {0}")]
    Render(String),
}

const BAR_COLOR: RGBColor = RGBColor(30, 122, 204);
const LINE_COLOR: RGBColor = RGBColor(204, 85, 30);

/// Renders the dashboard: eight outcome histograms, the tornado and the
/// three average monthly curves on a 4 x 3 grid.
pub fn write_report_png(output_path: &str, output: &SimulationOutput) -> Result<(), PlotError> {
    let root = BitMapBackend::new(output_path, (1800, 1600)).into_drawing_area();
    draw_dashboard(&root, output)?;
    root.present().map_err(render_error)?;
    debug!(path = output_path, "report plot written");
    Ok(())
}

fn draw_dashboard<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    output: &SimulationOutput,
) -> Result<(), PlotError> {
    root.fill(&WHITE).map_err(render_error)?;
    let cells = root.split_evenly((4, 3));
    let distributions = &output.distributions;

    let years_to_target_ros = reached(&distributions.years_to_target_ros);
    let years_to_break_even = reached(&distributions.years_to_break_even);

    let histograms: [(&str, &str, &[f64]); 8] = [
        ("Unit Sales", "Units", &distributions.unit_sales),
        ("Sales", "Millions", &distributions.sales_millions),
        (
            "Development Cost",
            "Millions",
            &distributions.development_cost_millions,
        ),
        ("NPV", "Millions", &distributions.npv_millions),
        ("ROS", "Percent", &distributions.ros_percent),
        ("Years to 10% ROS", "Years", &years_to_target_ros),
        ("Years to Break Even", "Years", &years_to_break_even),
        (
            "Consumables",
            "Millions",
            &distributions.consumable_sales_millions,
        ),
    ];
    for (cell, (title, x_desc, values)) in cells.iter().zip(histograms.iter()) {
        draw_histogram(cell, title, x_desc, values)?;
    }

    draw_tornado(&cells[8], &output.report.sensitivity)?;
    draw_monthly_curve(&cells[9], "Average FTEs", "FTEs", &output.monthly.ftes)?;
    draw_monthly_curve(&cells[10], "Average Sales", "Sales", &output.monthly.sales)?;
    draw_monthly_curve(
        &cells[11],
        "Average Consumables",
        "Sales",
        &output.monthly.consumable_sales,
    )?;
    Ok(())
}

fn reached(years: &[f64]) -> Vec<f64> {
    years
        .iter()
        .copied()
        .filter(|value| *value != NEVER_REACHED_YEARS)
        .collect()
}

fn draw_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    x_desc: &str,
    values: &[f64],
) -> Result<(), PlotError> {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        area.titled(title, ("sans-serif", 22)).map_err(render_error)?;
        return Ok(());
    }

    let min_value = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bins = ((values.len() as f64).sqrt().ceil() as usize).max(1);
    let bin_width = if max_value - min_value < f64::EPSILON {
        1.0
    } else {
        (max_value - min_value) / bins as f64
    };

    let mut counts = vec![0usize; bins];
    for value in &values {
        let bucket = ((value - min_value) / bin_width).floor() as usize;
        counts[bucket.min(bins - 1)] += 1;
    }
    let max_count = counts.iter().copied().max().unwrap_or(0);

    let x_start = if max_value - min_value < f64::EPSILON {
        min_value - 0.5
    } else {
        min_value
    };
    let x_end = x_start + bin_width * bins as f64;
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption(title, ("sans-serif", 22))
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_start..x_end, 0.0..(max_count + 1) as f64)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_desc)
        .y_desc("Frequency")
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .x_label_formatter(&|value| format!("{value:.2}"))
        .draw()
        .map_err(render_error)?;

    let bar_style = ShapeStyle::from(&BAR_COLOR).filled();
    chart
        .draw_series(counts.iter().enumerate().map(|(index, count)| {
            let left = x_start + bin_width * index as f64;
            Rectangle::new([(left, 0.0), (left + bin_width, *count as f64)], bar_style)
        }))
        .map_err(render_error)?;
    Ok(())
}

/// Horizontal bars from min to max NPV, widest range on top.
fn draw_tornado<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    entries: &[SensitivityEntry],
) -> Result<(), PlotError> {
    let entries: Vec<&SensitivityEntry> = entries
        .iter()
        .filter(|entry| entry.min.is_finite() && entry.max.is_finite())
        .collect();
    if entries.is_empty() {
        area.titled("Sensitivity", ("sans-serif", 22))
            .map_err(render_error)?;
        return Ok(());
    }

    let mut x_start = entries.iter().map(|e| e.min).fold(f64::INFINITY, f64::min);
    let mut x_end = entries
        .iter()
        .map(|e| e.max)
        .fold(f64::NEG_INFINITY, f64::max);
    if x_end - x_start < f64::EPSILON {
        x_start -= 0.5;
        x_end += 0.5;
    }
    let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
    let rows = entries.len() as i32;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption("Sensitivity", ("sans-serif", 22))
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(x_start..x_end, (0..rows).into_segmented())
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("NPV (millions)")
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .y_labels(names.len())
        .y_label_formatter(&|value| match value {
            SegmentValue::CenterOf(index) => names
                .get(*index as usize)
                .map(|name| name.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()
        .map_err(render_error)?;

    let bar_style = ShapeStyle::from(&BAR_COLOR).filled();
    chart
        .draw_series(entries.iter().enumerate().map(|(index, entry)| {
            let row = index as i32;
            Rectangle::new(
                [
                    (entry.min, SegmentValue::Exact(row)),
                    (entry.max, SegmentValue::Exact(row + 1)),
                ],
                bar_style,
            )
        }))
        .map_err(render_error)?;
    Ok(())
}

fn draw_monthly_curve<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    y_desc: &str,
    series: &MonthlySeries,
) -> Result<(), PlotError> {
    if series.is_empty() {
        area.titled(title, ("sans-serif", 22)).map_err(render_error)?;
        return Ok(());
    }

    let values = series.values();
    let y_min = values.iter().copied().fold(0.0, f64::min);
    let y_max = values.iter().copied().fold(0.0, f64::max);
    let y_end = if y_max - y_min < f64::EPSILON {
        y_min + 1.0
    } else {
        y_max * 1.05
    };
    let x_end = (values.len().max(2) - 1) as f64 / 12.0;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption(title, ("sans-serif", 22))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_end, y_min..y_end)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Years")
        .y_desc(y_desc)
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(LineSeries::new(
            values
                .iter()
                .enumerate()
                .map(|(month, value)| (month as f64 / 12.0, *value)),
            LINE_COLOR.stroke_width(2),
        ))
        .map_err(render_error)?;
    Ok(())
}

fn render_error<E: std::fmt::Display>(error: E) -> PlotError {
    PlotError::Render(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::monte_carlo::{MonteCarloSettings, analyze};
    use crate::test_support::{build_company_constants, build_uncertain_product_ranges};
    use assert_fs::prelude::*;
    use predicates::prelude::*;

    fn build_output() -> SimulationOutput {
        let rows = vec![build_uncertain_product_ranges("Analyzer")];
        let settings = MonteCarloSettings {
            simulations: 50,
            sensitivity_simulations: 5,
            seed: Some(3),
        };
        let results = analyze(&build_company_constants(), &rows, &settings).unwrap();
        SimulationOutput::from_results("mix.yaml", vec!["Analyzer".to_string()], 5, results)
    }

    #[test]
    fn write_report_png_writes_a_file() {
        let output_file = assert_fs::NamedTempFile::new("report.png").unwrap();

        write_report_png(output_file.path().to_str().unwrap(), &build_output()).unwrap();

        output_file.assert(predicate::path::exists());
        let metadata = std::fs::metadata(output_file.path()).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn dashboard_tolerates_degenerate_data() {
        let mut output = build_output();
        output.distributions.npv_millions = vec![2.0; 10];
        output.distributions.years_to_break_even = vec![NEVER_REACHED_YEARS; 10];
        output.report.sensitivity.clear();
        output.monthly.consumable_sales = MonthlySeries::default();

        let mut buffer = vec![0u8; 600 * 400 * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (600, 400)).into_drawing_area();
            draw_dashboard(&root, &output).unwrap();
            root.present().unwrap();
        }
        assert!(buffer.iter().any(|byte| *byte != 0));
    }
}
