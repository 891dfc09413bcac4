use crate::domain::product::{ProductVariableRanges, RowKind};
use crate::domain::sensitivity::{Isolation, SensitivityVariable};
use crate::domain::variable_range::VariableRange;
use crate::services::financial::cost_factor;
use crate::services::triangular_sampler::RangeSampler;

/// One realized trial of a product row. Everything is fixed at construction
/// except `years_mix_delay`, which the mix scheduler assigns afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    pub name: String,
    pub kind: RowKind,
    pub years_mix_delay: f64,
    pub development_ftes: f64,
    pub years_of_development_growth: f64,
    pub years_of_development_maturity: f64,
    pub years_of_development_decline: f64,
    pub maintenance_ftes: f64,
    pub years_of_maintenance: f64,
    pub years_of_pilot: f64,
    pub years_of_sales_growth: f64,
    pub years_of_sales_maturity: f64,
    pub years_of_sales_decline: f64,
    pub unit_cost: f64,
    pub unit_margin: f64,
    pub unit_price: f64,
    pub sga_factor: f64,
    pub yearly_unit_sales: f64,
    pub yearly_unit_consumable_sales: f64,
    pub years_of_consumable_sales: f64,
    pub consumable_margin: f64,
    /// Development then maintenance headcount, indexed from development start.
    pub ftes_by_month: Vec<f64>,
    /// Units sold per month, indexed from the first month of sales.
    pub unit_sales_by_month: Vec<f64>,
}

impl ProductSnapshot {
    pub fn build<S: RangeSampler + ?Sized>(
        ranges: &ProductVariableRanges,
        isolation: Isolation,
        sampler: &mut S,
    ) -> Self {
        let mut draw = |range: &VariableRange, variable: Option<SensitivityVariable>| {
            sampler.sample(range, isolation.pins(variable))
        };

        let development_ftes = draw(
            &ranges.development_ftes,
            Some(SensitivityVariable::DevelopmentFtes),
        );
        let years_of_development_growth = draw(&ranges.years_of_development_growth, None);
        let years_of_development_maturity = draw(
            &ranges.years_of_development_maturity,
            Some(SensitivityVariable::DevelopmentYears),
        );
        let years_of_development_decline = draw(&ranges.years_of_development_decline, None);
        let maintenance_ftes = draw(
            &ranges.maintenance_ftes,
            Some(SensitivityVariable::MaintenanceFtes),
        );
        let years_of_maintenance = draw(&ranges.years_of_maintenance, None);
        let years_of_pilot = draw(&ranges.years_of_pilot, None);
        let years_of_sales_growth = draw(&ranges.years_of_sales_growth, None);
        let years_of_sales_maturity = draw(
            &ranges.years_of_sales_maturity,
            Some(SensitivityVariable::SalesYears),
        );
        let years_of_sales_decline = draw(&ranges.years_of_sales_decline, None);
        let unit_cost = draw(&ranges.unit_cost, Some(SensitivityVariable::UnitCost));
        let unit_margin = draw(&ranges.unit_margin, Some(SensitivityVariable::Margin));
        let sga_factor = draw(&ranges.sga_factor, None);
        let yearly_unit_consumable_sales = draw(&ranges.yearly_unit_consumable_sales, None);
        let years_of_consumable_sales = draw(&ranges.years_of_consumable_sales, None);
        let consumable_margin = draw(&ranges.consumable_margin, None);

        let unit_price = unit_cost * cost_factor(unit_margin);
        let yearly_unit_sales = draw(
            &yearly_unit_sales_at_price(ranges, unit_price),
            Some(SensitivityVariable::YearlySales),
        );

        let mut ftes_by_month = phase_profile(
            development_ftes,
            years_of_development_growth,
            years_of_development_maturity,
            years_of_development_decline,
        );
        ftes_by_month.extend(std::iter::repeat_n(
            maintenance_ftes,
            months(years_of_maintenance),
        ));
        if ftes_by_month.is_empty() {
            ftes_by_month.push(0.0);
        }

        let mut unit_sales_by_month = phase_profile(
            yearly_unit_sales / 12.0,
            years_of_sales_growth,
            years_of_sales_maturity,
            years_of_sales_decline,
        );
        if unit_sales_by_month.is_empty() {
            unit_sales_by_month.push(0.0);
        }

        Self {
            name: ranges.name.clone(),
            kind: ranges.kind.clone(),
            years_mix_delay: 0.0,
            development_ftes,
            years_of_development_growth,
            years_of_development_maturity,
            years_of_development_decline,
            maintenance_ftes,
            years_of_maintenance,
            years_of_pilot,
            years_of_sales_growth,
            years_of_sales_maturity,
            years_of_sales_decline,
            unit_cost,
            unit_margin,
            unit_price,
            sga_factor,
            yearly_unit_sales,
            yearly_unit_consumable_sales,
            years_of_consumable_sales,
            consumable_margin,
            ftes_by_month,
            unit_sales_by_month,
        }
    }

    pub fn years_before_sales(&self) -> f64 {
        self.years_mix_delay
            + self.years_of_development_growth
            + self.years_of_development_maturity
            + self.years_of_development_decline
            + self.years_of_pilot
    }

    pub fn total_years(&self) -> f64 {
        self.years_before_sales()
            + self.years_of_sales_growth
            + self.years_of_sales_maturity
            + self.years_of_sales_decline
            + self.years_of_consumable_sales
    }

    pub fn months_mix_delay(&self) -> i64 {
        (self.years_mix_delay * 12.0).round() as i64
    }

    pub fn peak_ftes(&self) -> f64 {
        self.ftes_by_month.iter().copied().fold(0.0, f64::max)
    }

    pub fn development_ftes_at_mix_month(&self, mix_month: i64) -> f64 {
        value_at(&self.ftes_by_month, mix_month as f64 - self.years_mix_delay * 12.0)
    }

    pub fn unit_sales_at_mix_month(&self, mix_month: i64) -> f64 {
        value_at(
            &self.unit_sales_by_month,
            mix_month as f64 - self.years_before_sales() * 12.0,
        )
    }
}

pub(crate) fn months(years: f64) -> usize {
    (years * 12.0).round().max(0.0) as usize
}

fn value_at(values: &[f64], month: f64) -> f64 {
    let month = month.round();
    if month < 0.0 {
        return 0.0;
    }
    values.get(month as usize).copied().unwrap_or(0.0)
}

/// Linear 0 -> peak ramp, flat peak, then linear peak -> 0 ramp.
fn phase_profile(peak: f64, growth_years: f64, maturity_years: f64, decline_years: f64) -> Vec<f64> {
    let growth_months = months(growth_years);
    let maturity_months = months(maturity_years);
    let decline_months = months(decline_years);

    let mut profile = Vec::with_capacity(growth_months + maturity_months + decline_months);
    for month in 0..growth_months {
        profile.push(peak * month as f64 / (growth_years * 12.0));
    }
    profile.extend(std::iter::repeat_n(peak, maturity_months));
    for month in 0..decline_months {
        profile.push(peak * (1.0 - month as f64 / (decline_years * 12.0)));
    }
    profile
}

/// Interpolates, at `unit_price`, between the volume expected at the cheapest
/// and at the most expensive price the row allows. Prices outside that span
/// clamp to the nearer end.
fn yearly_unit_sales_at_price(ranges: &ProductVariableRanges, unit_price: f64) -> VariableRange {
    let at_lowest = ranges.yearly_unit_sales;
    let at_highest = ranges.yearly_unit_sales_at_highest_price;
    if at_lowest == at_highest {
        return at_lowest;
    }

    let lowest_price = ranges.unit_cost.low() * cost_factor(ranges.unit_margin.low());
    let highest_price = ranges.unit_cost.high() * cost_factor(ranges.unit_margin.high());
    let at_price = |low_volume: f64, high_volume: f64| {
        interpolate(unit_price, lowest_price, highest_price, low_volume, high_volume)
    };

    VariableRange::triangle(
        at_price(at_lowest.low(), at_highest.low()),
        at_price(at_lowest.mode(), at_highest.mode()),
        at_price(at_lowest.high(), at_highest.high()),
    )
}

fn interpolate(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    if !(x1 > x0) || x <= x0 {
        return y0;
    }
    if x >= x1 {
        return y1;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}
