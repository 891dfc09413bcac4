pub mod financial;
pub mod input_yaml;
pub mod mix_scheduler;
pub mod mix_snapshot;
pub mod monte_carlo;
pub mod npv_calculator;
pub mod npv_result;
pub mod product_snapshot;
pub mod report_plot;
pub mod simulation;
pub mod simulation_tracker;
pub mod simulation_types;
pub mod statistics;
pub mod triangular_sampler;
