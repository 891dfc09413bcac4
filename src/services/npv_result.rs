use serde::Serialize;

/// Values keyed by absolute mix month. Reads past the end are zero; writes
/// past the end extend the series with zeros first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MonthlySeries {
    values: Vec<f64>,
}

impl MonthlySeries {
    pub fn with_horizon(months: usize) -> Self {
        Self {
            values: Vec::with_capacity(months),
        }
    }

    #[cfg(test)]
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, month: usize) -> f64 {
        self.values.get(month).copied().unwrap_or(0.0)
    }

    pub fn add(&mut self, month: usize, value: f64) {
        if month >= self.values.len() {
            self.values.resize(month + 1, 0.0);
        }
        self.values[month] += value;
    }

    pub fn merge(&mut self, other: &MonthlySeries) {
        if other.values.len() > self.values.len() {
            self.values.resize(other.values.len(), 0.0);
        }
        for (total, value) in self.values.iter_mut().zip(&other.values) {
            *total += value;
        }
    }

    pub fn scale(&mut self, factor: f64) {
        for value in &mut self.values {
            *value *= factor;
        }
    }
}

/// Present-value totals of a product or of a whole mix. Product results and
/// mix results share this shape; a mix is the field-wise sum of its products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NpvResult {
    pub development_cost: f64,
    /// Includes consumable sales.
    pub sales: f64,
    pub consumable_sales: f64,
    /// Includes consumable cost of goods.
    pub cost_of_goods: f64,
    pub sga: f64,
    pub unit_sales: f64,
    pub ftes_by_month: MonthlySeries,
    /// Includes consumable sales.
    pub sales_by_month: MonthlySeries,
    pub consumable_sales_by_month: MonthlySeries,
    pub cumulative_net_by_month: MonthlySeries,
}

impl NpvResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn net(&self) -> f64 {
        self.sales - self.cost_of_goods - self.sga - self.development_cost
    }

    pub fn ros(&self) -> f64 {
        if self.sales == 0.0 {
            return 0.0;
        }
        self.net() / self.sales
    }

    pub fn roi(&self) -> f64 {
        if self.development_cost == 0.0 {
            return 0.0;
        }
        self.net() / self.development_cost
    }

    pub fn annualized_roi(&self, years: f64) -> f64 {
        if years == 0.0 {
            return 0.0;
        }
        (1.0 + self.roi()).powf(1.0 / years) - 1.0
    }

    pub fn add(&mut self, other: &NpvResult) {
        self.development_cost += other.development_cost;
        self.sales += other.sales;
        self.consumable_sales += other.consumable_sales;
        self.cost_of_goods += other.cost_of_goods;
        self.sga += other.sga;
        self.unit_sales += other.unit_sales;
        self.ftes_by_month.merge(&other.ftes_by_month);
        self.sales_by_month.merge(&other.sales_by_month);
        self.consumable_sales_by_month
            .merge(&other.consumable_sales_by_month);
        self.cumulative_net_by_month
            .merge(&other.cumulative_net_by_month);
    }
}
