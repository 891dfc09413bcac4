use rand::Rng;
use rand_distr::{Distribution, Triangular};

use crate::domain::variable_range::VariableRange;

pub trait RangeSampler {
    /// Realizes one value from `range`. Scalars come back unchanged; badly
    /// ordered triangles and isolated draws come back as the mode.
    fn sample(&mut self, range: &VariableRange, isolate: bool) -> f64;
}

pub struct TriangularSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> TriangularSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RangeSampler for TriangularSampler<R> {
    fn sample(&mut self, range: &VariableRange, isolate: bool) -> f64 {
        let (low, mode, high) = match *range {
            VariableRange::Scalar(value) => return value,
            VariableRange::Triangle { low, mode, high } => (low, mode, high),
        };
        if !range.is_well_ordered() || isolate {
            return mode;
        }

        match Triangular::new(low, high, mode) {
            Ok(distribution) => distribution.sample(&mut self.rng),
            Err(_) => mode,
        }
    }
}
