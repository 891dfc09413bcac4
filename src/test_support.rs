use crate::domain::company::CompanyConstants;
use crate::domain::product::{ProductVariableRanges, RowKind};
use crate::domain::variable_range::VariableRange;
use crate::services::triangular_sampler::RangeSampler;

// A mock RangeSampler that always returns the most likely value
pub struct MockSampler;
impl RangeSampler for MockSampler {
    fn sample(&mut self, range: &VariableRange, _isolate: bool) -> f64 {
        range.mode()
    }
}

/// A product with no uncertainty: one year of 2 FTEs developing, then two
/// years selling 120 units a year at 200 (cost 100).
pub fn build_product_ranges(name: &str) -> ProductVariableRanges {
    let mut ranges = ProductVariableRanges::new(name, RowKind::Product);
    ranges.years_of_development_maturity = VariableRange::Scalar(1.0);
    ranges.development_ftes = VariableRange::Scalar(2.0);
    ranges.years_of_sales_maturity = VariableRange::Scalar(2.0);
    ranges.unit_cost = VariableRange::Scalar(100.0);
    ranges.unit_margin = VariableRange::Scalar(0.5);
    ranges.sga_factor = VariableRange::Scalar(0.1);
    ranges.yearly_unit_sales = VariableRange::Scalar(120.0);
    ranges.yearly_unit_sales_at_highest_price = VariableRange::Scalar(120.0);
    ranges
}

/// The same product with every input spread around the scalar values.
pub fn build_uncertain_product_ranges(name: &str) -> ProductVariableRanges {
    let mut ranges = ProductVariableRanges::new(name, RowKind::Product);
    ranges.years_of_development_growth = VariableRange::triangle(0.1, 0.25, 0.5);
    ranges.years_of_development_maturity = VariableRange::triangle(0.75, 1.0, 1.5);
    ranges.years_of_development_decline = VariableRange::triangle(0.1, 0.25, 0.5);
    ranges.development_ftes = VariableRange::triangle(1.0, 2.0, 3.0);
    ranges.maintenance_ftes = VariableRange::triangle(0.0, 0.25, 0.5);
    ranges.years_of_maintenance = VariableRange::Scalar(1.0);
    ranges.years_of_sales_growth = VariableRange::triangle(0.25, 0.5, 1.0);
    ranges.years_of_sales_maturity = VariableRange::triangle(1.0, 2.0, 3.0);
    ranges.years_of_sales_decline = VariableRange::triangle(0.25, 0.5, 1.0);
    ranges.unit_cost = VariableRange::triangle(80.0, 100.0, 120.0);
    ranges.unit_margin = VariableRange::triangle(0.45, 0.5, 0.55);
    ranges.sga_factor = VariableRange::Scalar(0.1);
    ranges.yearly_unit_sales = VariableRange::triangle(1100.0, 1200.0, 1300.0);
    ranges.yearly_unit_sales_at_highest_price = VariableRange::triangle(700.0, 800.0, 900.0);
    ranges.yearly_unit_consumable_sales = VariableRange::triangle(10.0, 12.0, 14.0);
    ranges.years_of_consumable_sales = VariableRange::Scalar(1.0);
    ranges.consumable_margin = VariableRange::Scalar(0.6);
    ranges
}

pub fn build_company_constants() -> CompanyConstants {
    CompanyConstants {
        market_return: 0.08,
        yearly_development_fte_cost: 17_000.0,
        maximum_development_ftes: 3.0,
        development_cost_trend: 0.03,
        product_cost_trend: 0.02,
        product_price_trend: 0.02,
    }
}
