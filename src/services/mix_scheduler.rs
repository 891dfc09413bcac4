use tracing::trace;

use crate::domain::company::CompanyConstants;
use crate::services::mix_snapshot::MixSnapshot;
use crate::services::npv_calculator::calculate_product_npv;
use crate::services::npv_result::NpvResult;

/// Smallest delay, in months, from `min_delay_months` on, at which `incoming`
/// fits on top of `committed` without exceeding `cap`. The cap is raised to
/// the incoming peak so a product is never blocked by its own demand; past
/// the end of `committed` nothing is allocated, so the search always ends.
pub fn resolve_delay(cap: f64, min_delay_months: usize, committed: &[f64], incoming: &[f64]) -> usize {
    let cap = incoming.iter().copied().fold(cap, f64::max);
    let mut delay = min_delay_months;
    loop {
        let overallocated = incoming.iter().enumerate().any(|(month, ftes)| {
            committed.get(month + delay).copied().unwrap_or(0.0) + ftes > cap
        });
        if !overallocated {
            return delay;
        }
        delay += 1;
    }
}

/// Schedules every row in order against the shared development headcount and
/// sums their results. Market rows never start before their parent's sales.
pub fn calculate_mix_npv(mix: &mut MixSnapshot, company_constants: &CompanyConstants) -> NpvResult {
    let mut mix_result = NpvResult::new();
    let mut minimum_years_mix_delay = 0.0;

    for snapshot in mix.products.iter_mut() {
        if snapshot.kind.is_product() {
            minimum_years_mix_delay = 0.0;
        }
        let min_delay_months = (minimum_years_mix_delay * 12.0_f64).round().max(0.0) as usize;
        let delay_months = resolve_delay(
            company_constants.maximum_development_ftes,
            min_delay_months,
            mix_result.ftes_by_month.values(),
            &snapshot.ftes_by_month,
        );
        snapshot.years_mix_delay = delay_months as f64 / 12.0;
        trace!(
            product = %snapshot.name,
            delay_months,
            peak_ftes = snapshot.peak_ftes(),
            "resolved mix delay"
        );

        let product_result = calculate_product_npv(snapshot, company_constants);
        mix_result.add(&product_result);
        minimum_years_mix_delay = snapshot.years_before_sales();
    }

    mix_result
}
