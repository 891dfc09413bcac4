use crate::domain::company::CompanyConstants;
use crate::services::financial::{future_value, monthly_rate, present_value};
use crate::services::npv_result::{MonthlySeries, NpvResult};
use crate::services::product_snapshot::{ProductSnapshot, months};

/// Walks the snapshot month by month, escalating every dollar figure at its
/// trend and discounting it back at the market return, both evaluated at the
/// absolute mix month.
pub fn calculate_product_npv(
    snapshot: &ProductSnapshot,
    company_constants: &CompanyConstants,
) -> NpvResult {
    let last_month = (snapshot.total_years() * 12.0).round().max(0.0) as i64;
    let months_mix_delay = snapshot.months_mix_delay();
    let consumable_window = months(snapshot.years_of_consumable_sales);

    let market_rate = monthly_rate(company_constants.market_return);
    let development_cost_rate = monthly_rate(company_constants.development_cost_trend);
    let product_cost_rate = monthly_rate(company_constants.product_cost_trend);
    let product_price_rate = monthly_rate(company_constants.product_price_trend);
    let monthly_fte_cost = company_constants.yearly_development_fte_cost / 12.0;
    let monthly_consumable_sales = snapshot.yearly_unit_consumable_sales / 12.0;

    let horizon = (last_month + months_mix_delay + 1).max(0) as usize;
    let mut result = NpvResult {
        ftes_by_month: MonthlySeries::with_horizon(horizon),
        sales_by_month: MonthlySeries::with_horizon(horizon),
        consumable_sales_by_month: MonthlySeries::with_horizon(horizon),
        cumulative_net_by_month: MonthlySeries::with_horizon(horizon),
        ..NpvResult::default()
    };
    let mut unit_sales_history: Vec<f64> = Vec::with_capacity(last_month as usize + 1);

    for month in 0..=last_month {
        let mix_month = month + months_mix_delay;

        let development_ftes = snapshot.development_ftes_at_mix_month(mix_month);
        let unit_sales = snapshot.unit_sales_at_mix_month(mix_month);
        unit_sales_history.push(unit_sales);

        let window_start = unit_sales_history.len().saturating_sub(consumable_window);
        let units_needing_consumables: f64 = unit_sales_history[window_start..].iter().sum();

        let monthly_fte_cost_fv = future_value(monthly_fte_cost, development_cost_rate, mix_month);
        let unit_cost_fv = future_value(snapshot.unit_cost, product_cost_rate, mix_month);
        let unit_price_fv = future_value(snapshot.unit_price, product_price_rate, mix_month);
        let consumable_sales_fv =
            future_value(monthly_consumable_sales, product_price_rate, mix_month);

        let development_cost_pv =
            present_value(development_ftes * monthly_fte_cost_fv, market_rate, mix_month);
        let sales_pv = present_value(unit_sales * unit_price_fv, market_rate, mix_month);
        let cost_of_goods_pv = present_value(unit_sales * unit_cost_fv, market_rate, mix_month);
        // Taken on the already discounted sales figure.
        let sga_pv = sales_pv * snapshot.sga_factor;
        let consumable_sales_pv = present_value(
            units_needing_consumables * consumable_sales_fv,
            market_rate,
            mix_month,
        );
        let consumable_cost_of_goods_pv = consumable_sales_pv * (1.0 - snapshot.consumable_margin);

        result.development_cost += development_cost_pv;
        result.sales += sales_pv + consumable_sales_pv;
        result.consumable_sales += consumable_sales_pv;
        result.cost_of_goods += cost_of_goods_pv + consumable_cost_of_goods_pv;
        result.sga += sga_pv;
        result.unit_sales += unit_sales;

        let index = mix_month.max(0) as usize;
        result.ftes_by_month.add(index, development_ftes);
        result
            .sales_by_month
            .add(index, sales_pv + consumable_sales_pv);
        result
            .consumable_sales_by_month
            .add(index, consumable_sales_pv);
        let net_to_date = result.net();
        result.cumulative_net_by_month.add(index, net_to_date);
    }

    result
}
