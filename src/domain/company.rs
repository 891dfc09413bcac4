/// Company-wide figures shared by every product in a mix. All rates are
/// annual; the calculators convert them to monthly periodic rates.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyConstants {
    /// Return expected from a financial investment of similar risk.
    pub market_return: f64,
    /// Cost of one development FTE for a year, in present dollars.
    pub yearly_development_fte_cost: f64,
    /// Developers available to staff projects at the same time.
    pub maximum_development_ftes: f64,
    pub development_cost_trend: f64,
    pub product_cost_trend: f64,
    pub product_price_trend: f64,
}

impl Default for CompanyConstants {
    fn default() -> Self {
        Self {
            market_return: 0.0,
            yearly_development_fte_cost: 17000.0,
            maximum_development_ftes: 6.0,
            development_cost_trend: 0.0,
            product_cost_trend: 0.0,
            product_price_trend: 0.0,
        }
    }
}
