use thiserror::Error;
use tracing::info;

use crate::services::input_yaml::{InputYamlError, load_mix_input_from_yaml_file};
use crate::services::monte_carlo::{MonteCarloError, MonteCarloSettings, analyze};
use crate::services::report_plot::{PlotError, write_report_png};
use crate::services::simulation_types::SimulationOutput;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("failed to load product mix: {0}")]
    Input(#[from] InputYamlError),
    #[error("failed to run Monte Carlo analysis: {0}")]
    MonteCarlo(#[from] MonteCarloError),
    #[error("failed to render report plot: {0}")]
    Plot(#[from] PlotError),
}

/// Loads the mix, runs the full analysis and renders the dashboard when a
/// plot path is given.
pub fn simulate_mix_from_yaml_file(
    input_path: &str,
    settings: &MonteCarloSettings,
    plot_path: Option<&str>,
) -> Result<SimulationOutput, SimulationError> {
    let input = load_mix_input_from_yaml_file(input_path)?;
    let products: Vec<String> = input.mix.iter().map(|row| row.name.clone()).collect();
    info!(
        source = input_path,
        rows = products.len(),
        "product mix loaded"
    );

    let results = analyze(&input.company, &input.mix, settings)?;
    let output = SimulationOutput::from_results(
        &data_source_name(input_path),
        products,
        settings.sensitivity_simulations,
        results,
    );

    if let Some(plot_path) = plot_path {
        write_report_png(plot_path, &output)?;
    }
    Ok(output)
}

fn data_source_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}
