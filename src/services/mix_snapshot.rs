use crate::domain::product::ProductVariableRanges;
use crate::domain::sensitivity::Isolation;
use crate::services::product_snapshot::ProductSnapshot;
use crate::services::triangular_sampler::RangeSampler;

/// One trial of the whole mix, rows kept in configuration order.
#[derive(Debug, Clone, PartialEq)]
pub struct MixSnapshot {
    pub products: Vec<ProductSnapshot>,
}

impl MixSnapshot {
    pub fn build<S: RangeSampler + ?Sized>(
        mix_ranges: &[ProductVariableRanges],
        isolation: Isolation,
        sampler: &mut S,
    ) -> Self {
        let products = mix_ranges
            .iter()
            .map(|ranges| ProductSnapshot::build(ranges, isolation, sampler))
            .collect();
        Self { products }
    }
}
