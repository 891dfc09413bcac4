use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_simulation_report;
use crate::services::monte_carlo::MonteCarloSettings;
use crate::services::simulation::simulate_mix_from_yaml_file;
use crate::services::simulation_types::SimulationOutput;

pub fn simulate_command(cmd: Commands) -> ExitCode {
    let Commands::Simulate {
        input,
        output,
        iterations,
        sensitivity_iterations,
        seed,
        plot,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let settings = MonteCarloSettings {
        simulations: iterations,
        sensitivity_simulations: sensitivity_iterations,
        seed,
    };
    let plot_path = plot.unwrap_or_else(|| format!("{output}.png"));

    let simulation = match simulate_mix_from_yaml_file(&input, &settings, Some(&plot_path)) {
        Ok(simulation) => simulation,
        Err(e) => {
            eprintln!("Failed to simulate product mix: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    let contents = match serialize_output(&output, &simulation) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Failed to serialize simulation output: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::write(&output, contents) {
        eprintln!("Failed to write simulation output: {e:?}");
        return ExitCode::FAILURE;
    }

    println!("{}", format_simulation_report(&simulation.report));
    println!();
    println!("Simulation result written to {output}");
    println!("Simulation plot written to {plot_path}");
    ExitCode::SUCCESS
}

fn serialize_output(path: &str, simulation: &SimulationOutput) -> Result<String, String> {
    if path.to_ascii_lowercase().ends_with(".json") {
        serde_json::to_string_pretty(simulation).map_err(|e| e.to_string())
    } else {
        serde_yaml::to_string(simulation).map_err(|e| e.to_string())
    }
}
