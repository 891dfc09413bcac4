use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate the NPV of a product mix with Monte Carlo and a sensitivity sweep
    Simulate {
        /// Product mix YAML file
        #[arg(short, long)]
        input: String,
        /// Output report file (YAML, or JSON when it ends in .json)
        #[arg(short, long)]
        output: String,
        /// Number of Monte Carlo trials
        #[arg(short = 'n', long, default_value_t = 4000)]
        iterations: usize,
        /// Number of trials per sensitivity variable
        #[arg(short = 't', long, default_value_t = 100)]
        sensitivity_iterations: usize,
        /// Seed for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,
        /// Output PNG dashboard, defaults to `<output>.png`
        #[arg(short, long)]
        plot: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate_uses_default_trial_counts() {
        let args = CliArgs::parse_from([
            "npv-forecasts",
            "simulate",
            "-i",
            "mix.yaml",
            "-o",
            "report.yaml",
        ]);

        if let Commands::Simulate {
            iterations,
            sensitivity_iterations,
            seed,
            plot,
            ..
        } = args.command
        {
            assert_eq!(iterations, 4000);
            assert_eq!(sensitivity_iterations, 100);
            assert_eq!(seed, None);
            assert_eq!(plot, None);
        } else {
            panic!("expected simulate command");
        }
    }

    #[test]
    fn simulate_accepts_overrides() {
        let args = CliArgs::parse_from([
            "npv-forecasts",
            "simulate",
            "-i",
            "mix.yaml",
            "-o",
            "report.json",
            "-n",
            "50",
            "-t",
            "5",
            "--seed",
            "42",
            "--plot",
            "dashboard.png",
        ]);

        if let Commands::Simulate {
            input,
            output,
            iterations,
            sensitivity_iterations,
            seed,
            plot,
        } = args.command
        {
            assert_eq!(input, "mix.yaml");
            assert_eq!(output, "report.json");
            assert_eq!(iterations, 50);
            assert_eq!(sensitivity_iterations, 5);
            assert_eq!(seed, Some(42));
            assert_eq!(plot.as_deref(), Some("dashboard.png"));
        } else {
            panic!("expected simulate command");
        }
    }
}
