//! Discounting helpers. Rates are periodic, `periods` counts those periods.

pub fn present_value(future_value: f64, periodic_rate: f64, periods: i64) -> f64 {
    future_value / (1.0 + periodic_rate).powf(periods as f64)
}

pub fn future_value(present_value: f64, periodic_rate: f64, periods: i64) -> f64 {
    present_value * (1.0 + periodic_rate).powf(periods as f64)
}

/// Multiplier turning a unit cost into a price with the given margin.
/// A margin of 1 or more has no finite price and yields infinity.
pub fn cost_factor(margin: f64) -> f64 {
    if margin >= 1.0 {
        return f64::INFINITY;
    }
    1.0 / (1.0 - margin)
}

/// Annual rate to monthly periodic rate.
pub fn monthly_rate(annual_rate: f64) -> f64 {
    annual_rate / 12.0
}
