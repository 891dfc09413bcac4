use crate::domain::variable_range::VariableRange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Starts a fresh development timeline.
    Product,
    /// Rides on the preceding product's timeline with its own pricing and volume.
    Market(String),
}

impl RowKind {
    pub fn from_type_name(type_name: &str) -> Self {
        if type_name == "Product" {
            RowKind::Product
        } else {
            RowKind::Market(type_name.to_string())
        }
    }

    pub fn is_product(&self) -> bool {
        matches!(self, RowKind::Product)
    }
}

/// One row of the mix: the uncertain lifecycle inputs of a product or of a
/// market segment of a product. Durations are in years.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductVariableRanges {
    pub name: String,
    pub kind: RowKind,
    pub years_of_development_growth: VariableRange,
    pub years_of_development_maturity: VariableRange,
    pub years_of_development_decline: VariableRange,
    pub years_of_pilot: VariableRange,
    pub years_of_sales_growth: VariableRange,
    pub years_of_sales_maturity: VariableRange,
    pub years_of_sales_decline: VariableRange,
    pub development_ftes: VariableRange,
    pub maintenance_ftes: VariableRange,
    pub years_of_maintenance: VariableRange,
    /// Manufacturing cost of one unit, in present dollars.
    pub unit_cost: VariableRange,
    pub unit_margin: VariableRange,
    pub sga_factor: VariableRange,
    /// Yearly volume at the cheapest price (low cost, low margin).
    pub yearly_unit_sales: VariableRange,
    /// Yearly volume at the most expensive price (high cost, high margin).
    pub yearly_unit_sales_at_highest_price: VariableRange,
    /// Consumable revenue per sold unit per year.
    pub yearly_unit_consumable_sales: VariableRange,
    pub years_of_consumable_sales: VariableRange,
    pub consumable_margin: VariableRange,
}

impl ProductVariableRanges {
    pub fn new(name: &str, kind: RowKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            years_of_development_growth: VariableRange::default(),
            years_of_development_maturity: VariableRange::default(),
            years_of_development_decline: VariableRange::default(),
            years_of_pilot: VariableRange::default(),
            years_of_sales_growth: VariableRange::default(),
            years_of_sales_maturity: VariableRange::default(),
            years_of_sales_decline: VariableRange::default(),
            development_ftes: VariableRange::default(),
            maintenance_ftes: VariableRange::default(),
            years_of_maintenance: VariableRange::default(),
            unit_cost: VariableRange::default(),
            unit_margin: VariableRange::default(),
            sga_factor: VariableRange::default(),
            yearly_unit_sales: VariableRange::default(),
            yearly_unit_sales_at_highest_price: VariableRange::default(),
            yearly_unit_consumable_sales: VariableRange::default(),
            years_of_consumable_sales: VariableRange::default(),
            consumable_margin: VariableRange::default(),
        }
    }

    /// A market segment of `parent`: no development work of its own, the
    /// parent's sales timing, and the parent's commercial terms as a starting
    /// point for the caller to override.
    pub fn market_of(name: &str, type_name: &str, parent: &ProductVariableRanges) -> Self {
        let mut market = Self::new(name, RowKind::from_type_name(type_name));
        market.years_of_sales_growth = parent.years_of_sales_growth;
        market.years_of_sales_maturity = parent.years_of_sales_maturity;
        market.years_of_sales_decline = parent.years_of_sales_decline;
        market.unit_cost = parent.unit_cost;
        market.unit_margin = parent.unit_margin;
        market.sga_factor = parent.sga_factor;
        market.yearly_unit_sales = parent.yearly_unit_sales;
        market.yearly_unit_sales_at_highest_price = parent.yearly_unit_sales_at_highest_price;
        market.yearly_unit_consumable_sales = parent.yearly_unit_consumable_sales;
        market.years_of_consumable_sales = parent.years_of_consumable_sales;
        market.consumable_margin = parent.consumable_margin;
        market
    }
}
