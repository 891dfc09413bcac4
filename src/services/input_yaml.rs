use std::io;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::company::CompanyConstants;
use crate::domain::product::{ProductVariableRanges, RowKind};
use crate::domain::variable_range::VariableRange;

#[derive(Error, Debug)]
pub enum InputYamlError {
    #[error("failed to read input yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse input yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("mix row {0} has no name")]
    MissingName(usize),
    #[error("market row {0} has no preceding product row")]
    MissingParentProduct(String),
    #[error("unit margin of {0} must stay below 1")]
    InvalidMargin(String),
    #[error("maximum development FTEs must not be negative")]
    InvalidMaximumFtes,
    #[error("product mix is empty")]
    EmptyMix,
}

/// Everything a run needs, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct MixInput {
    pub company: CompanyConstants,
    pub mix: Vec<ProductVariableRanges>,
}

#[derive(Deserialize)]
struct InputRecord {
    #[serde(default)]
    company: CompanyRecord,
    mix: Vec<RowRecord>,
}

#[derive(Deserialize)]
#[serde(default)]
struct CompanyRecord {
    market_return: f64,
    yearly_development_fte_cost: f64,
    maximum_development_ftes: f64,
    development_cost_trend: f64,
    product_cost_trend: f64,
    product_price_trend: f64,
}

impl Default for CompanyRecord {
    fn default() -> Self {
        let defaults = CompanyConstants::default();
        Self {
            market_return: defaults.market_return,
            yearly_development_fte_cost: defaults.yearly_development_fte_cost,
            maximum_development_ftes: defaults.maximum_development_ftes,
            development_cost_trend: defaults.development_cost_trend,
            product_cost_trend: defaults.product_cost_trend,
            product_price_trend: defaults.product_price_trend,
        }
    }
}

#[derive(Deserialize, Clone, Copy)]
#[serde(untagged)]
enum RangeRecord {
    Scalar(f64),
    Triple([f64; 3]),
}

#[derive(Deserialize)]
struct RowRecord {
    name: String,
    #[serde(rename = "type", default = "default_row_type")]
    row_type: String,
    #[serde(default)]
    exclude: bool,
    years_of_development_growth: Option<RangeRecord>,
    years_of_development_maturity: Option<RangeRecord>,
    years_of_development_decline: Option<RangeRecord>,
    years_of_pilot: Option<RangeRecord>,
    years_of_sales_growth: Option<RangeRecord>,
    years_of_sales_maturity: Option<RangeRecord>,
    years_of_sales_decline: Option<RangeRecord>,
    development_ftes: Option<RangeRecord>,
    maintenance_ftes: Option<RangeRecord>,
    years_of_maintenance: Option<RangeRecord>,
    unit_cost: Option<RangeRecord>,
    unit_margin: Option<RangeRecord>,
    sga_factor: Option<RangeRecord>,
    yearly_unit_sales: Option<RangeRecord>,
    yearly_unit_sales_at_highest_price: Option<RangeRecord>,
    yearly_unit_consumable_sales: Option<RangeRecord>,
    years_of_consumable_sales: Option<RangeRecord>,
    consumable_margin: Option<RangeRecord>,
}

fn default_row_type() -> String {
    "Product".to_string()
}

pub fn load_mix_input_from_yaml_file(path: &str) -> Result<MixInput, InputYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_mix_input_from_yaml_str(&contents)
}

pub fn deserialize_mix_input_from_yaml_str(input: &str) -> Result<MixInput, InputYamlError> {
    let record: InputRecord = serde_yaml::from_str(input)?;
    let company = company_from_record(&record.company)?;

    let mut mix = Vec::with_capacity(record.mix.len());
    let mut parent: Option<ProductVariableRanges> = None;

    for (index, row) in record.mix.iter().enumerate() {
        if row.name.trim().is_empty() {
            return Err(InputYamlError::MissingName(index + 1));
        }

        let ranges = match RowKind::from_type_name(&row.row_type) {
            RowKind::Product => {
                let ranges = product_from_record(row);
                parent = Some(ranges.clone());
                ranges
            }
            RowKind::Market(_) => {
                let parent = parent
                    .as_ref()
                    .ok_or_else(|| InputYamlError::MissingParentProduct(row.name.clone()))?;
                debug!(
                    market = %row.name,
                    parent = %parent.name,
                    "market row inherits product timeline"
                );
                market_from_record(row, parent)
            }
        };
        validate_margin(&ranges)?;

        if !row.exclude {
            mix.push(ranges);
        }
    }

    if mix.is_empty() {
        return Err(InputYamlError::EmptyMix);
    }
    debug!(rows = mix.len(), "loaded product mix");
    Ok(MixInput { company, mix })
}

fn company_from_record(record: &CompanyRecord) -> Result<CompanyConstants, InputYamlError> {
    if record.maximum_development_ftes < 0.0 {
        return Err(InputYamlError::InvalidMaximumFtes);
    }
    Ok(CompanyConstants {
        market_return: record.market_return,
        yearly_development_fte_cost: record.yearly_development_fte_cost,
        maximum_development_ftes: record.maximum_development_ftes,
        development_cost_trend: record.development_cost_trend,
        product_cost_trend: record.product_cost_trend,
        product_price_trend: record.product_price_trend,
    })
}

fn product_from_record(row: &RowRecord) -> ProductVariableRanges {
    let mut ranges = ProductVariableRanges::new(&row.name, RowKind::Product);
    let or_zero = |record: Option<RangeRecord>| record.map(range_from_record).unwrap_or_default();

    ranges.years_of_development_growth = or_zero(row.years_of_development_growth);
    ranges.years_of_development_maturity = or_zero(row.years_of_development_maturity);
    ranges.years_of_development_decline = or_zero(row.years_of_development_decline);
    ranges.years_of_pilot = or_zero(row.years_of_pilot);
    ranges.years_of_sales_growth = or_zero(row.years_of_sales_growth);
    ranges.years_of_sales_maturity = or_zero(row.years_of_sales_maturity);
    ranges.years_of_sales_decline = or_zero(row.years_of_sales_decline);
    ranges.development_ftes = or_zero(row.development_ftes);
    ranges.maintenance_ftes = or_zero(row.maintenance_ftes);
    ranges.years_of_maintenance = or_zero(row.years_of_maintenance);
    ranges.unit_cost = or_zero(row.unit_cost);
    ranges.unit_margin = or_zero(row.unit_margin);
    ranges.sga_factor = or_zero(row.sga_factor);
    ranges.yearly_unit_sales = or_zero(row.yearly_unit_sales);
    ranges.yearly_unit_sales_at_highest_price = row
        .yearly_unit_sales_at_highest_price
        .map(range_from_record)
        .unwrap_or(ranges.yearly_unit_sales);
    ranges.yearly_unit_consumable_sales = or_zero(row.yearly_unit_consumable_sales);
    ranges.years_of_consumable_sales = or_zero(row.years_of_consumable_sales);
    ranges.consumable_margin = or_zero(row.consumable_margin);
    ranges
}

fn market_from_record(row: &RowRecord, parent: &ProductVariableRanges) -> ProductVariableRanges {
    let mut ranges = ProductVariableRanges::market_of(&row.name, &row.row_type, parent);
    let override_with = |target: &mut VariableRange, record: Option<RangeRecord>| {
        if let Some(record) = record {
            *target = range_from_record(record);
        }
    };

    override_with(&mut ranges.unit_cost, row.unit_cost);
    override_with(&mut ranges.unit_margin, row.unit_margin);
    override_with(&mut ranges.sga_factor, row.sga_factor);
    override_with(&mut ranges.yearly_unit_sales, row.yearly_unit_sales);
    // A market that only states its own volume gets a flat price response.
    ranges.yearly_unit_sales_at_highest_price = match (
        row.yearly_unit_sales_at_highest_price,
        row.yearly_unit_sales,
    ) {
        (Some(record), _) => range_from_record(record),
        (None, Some(_)) => ranges.yearly_unit_sales,
        (None, None) => parent.yearly_unit_sales_at_highest_price,
    };
    override_with(
        &mut ranges.yearly_unit_consumable_sales,
        row.yearly_unit_consumable_sales,
    );
    override_with(
        &mut ranges.years_of_consumable_sales,
        row.years_of_consumable_sales,
    );
    override_with(&mut ranges.consumable_margin, row.consumable_margin);
    ranges
}

fn range_from_record(record: RangeRecord) -> VariableRange {
    match record {
        RangeRecord::Scalar(value) => VariableRange::Scalar(value),
        RangeRecord::Triple([low, mode, high]) => VariableRange::triangle(low, mode, high),
    }
}

fn validate_margin(ranges: &ProductVariableRanges) -> Result<(), InputYamlError> {
    let margin = ranges.unit_margin;
    if [margin.low(), margin.mode(), margin.high()]
        .iter()
        .any(|value| *value >= 1.0)
    {
        return Err(InputYamlError::InvalidMargin(ranges.name.clone()));
    }
    Ok(())
}
