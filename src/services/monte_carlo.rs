use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::company::CompanyConstants;
use crate::domain::product::ProductVariableRanges;
use crate::domain::sensitivity::{Isolation, SensitivityVariable};
use crate::services::mix_scheduler::calculate_mix_npv;
use crate::services::mix_snapshot::MixSnapshot;
use crate::services::npv_result::NpvResult;
use crate::services::simulation_tracker::{SimulationTracker, TornadoTracker};
use crate::services::triangular_sampler::TriangularSampler;

/// Trials evaluated in parallel before being folded into the trackers.
const BATCH_SIZE: usize = 512;

#[derive(Error, Debug)]
pub enum MonteCarloError {
    #[error("iterations must be greater than zero")]
    InvalidIterations,
    #[error("product mix is empty")]
    EmptyMix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonteCarloSettings {
    pub simulations: usize,
    pub sensitivity_simulations: usize,
    /// Master seed; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            simulations: 4000,
            sensitivity_simulations: 100,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MonteCarloResults {
    pub simulation_tracker: SimulationTracker,
    /// Sorted by ascending NPV range.
    pub tornado_trackers: Vec<TornadoTracker>,
    pub seed: u64,
}

pub fn analyze(
    company_constants: &CompanyConstants,
    mix_ranges: &[ProductVariableRanges],
    settings: &MonteCarloSettings,
) -> Result<MonteCarloResults, MonteCarloError> {
    let seed = settings
        .seed
        .unwrap_or_else(|| StdRng::from_entropy().next_u64());
    let mut rng = StdRng::seed_from_u64(seed);
    let (simulation_tracker, tornado_trackers) = analyze_with_rng(
        company_constants,
        mix_ranges,
        settings.simulations,
        settings.sensitivity_simulations,
        &mut rng,
    )?;
    Ok(MonteCarloResults {
        simulation_tracker,
        tornado_trackers,
        seed,
    })
}

/// Every trial gets its own generator seeded from `rng`, so the outcome only
/// depends on `rng` and not on how rayon schedules the work.
pub(crate) fn analyze_with_rng<R: RngCore + ?Sized>(
    company_constants: &CompanyConstants,
    mix_ranges: &[ProductVariableRanges],
    simulations: usize,
    sensitivity_simulations: usize,
    rng: &mut R,
) -> Result<(SimulationTracker, Vec<TornadoTracker>), MonteCarloError> {
    if simulations == 0 || sensitivity_simulations == 0 {
        return Err(MonteCarloError::InvalidIterations);
    }
    if mix_ranges.is_empty() {
        return Err(MonteCarloError::EmptyMix);
    }

    info!(
        products = mix_ranges.len(),
        simulations, sensitivity_simulations, "starting Monte Carlo analysis"
    );

    let mut simulation_tracker = SimulationTracker::new();
    for_each_trial(
        company_constants,
        mix_ranges,
        Isolation::Off,
        simulations,
        rng,
        |result| simulation_tracker.add(result),
    );
    simulation_tracker.normalize();

    let mut tornado_trackers = Vec::with_capacity(SensitivityVariable::ALL.len());
    for variable in SensitivityVariable::ALL {
        let mut tracker = TornadoTracker::new(variable);
        for_each_trial(
            company_constants,
            mix_ranges,
            Isolation::Only(variable),
            sensitivity_simulations,
            rng,
            |result| tracker.add(result.net() / 1_000_000.0),
        );
        debug!(
            variable = tracker.name.as_str(),
            min = tracker.min_value,
            max = tracker.max_value,
            "sensitivity sweep done"
        );
        tornado_trackers.push(tracker);
    }
    tornado_trackers.sort_by(|a, b| a.range().total_cmp(&b.range()));

    info!(
        simulations = simulation_tracker.simulations,
        "Monte Carlo analysis finished"
    );
    Ok((simulation_tracker, tornado_trackers))
}

fn for_each_trial<R, F>(
    company_constants: &CompanyConstants,
    mix_ranges: &[ProductVariableRanges],
    isolation: Isolation,
    trials: usize,
    rng: &mut R,
    mut record: F,
) where
    R: RngCore + ?Sized,
    F: FnMut(&NpvResult),
{
    let seeds: Vec<u64> = (0..trials).map(|_| rng.next_u64()).collect();
    for batch in seeds.chunks(BATCH_SIZE) {
        let results: Vec<NpvResult> = batch
            .par_iter()
            .map(|seed| run_trial(company_constants, mix_ranges, isolation, *seed))
            .collect();
        results.iter().for_each(&mut record);
    }
}

fn run_trial(
    company_constants: &CompanyConstants,
    mix_ranges: &[ProductVariableRanges],
    isolation: Isolation,
    seed: u64,
) -> NpvResult {
    let mut sampler = TriangularSampler::new(StdRng::seed_from_u64(seed));
    let mut mix = MixSnapshot::build(mix_ranges, isolation, &mut sampler);
    calculate_mix_npv(&mut mix, company_constants)
}
