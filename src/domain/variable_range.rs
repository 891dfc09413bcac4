/// An uncertain input: either a fixed value or a low / most likely / high
/// triple describing a triangular distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariableRange {
    Scalar(f64),
    Triangle { low: f64, mode: f64, high: f64 },
}

impl VariableRange {
    pub fn triangle(low: f64, mode: f64, high: f64) -> Self {
        VariableRange::Triangle { low, mode, high }
    }

    pub fn low(&self) -> f64 {
        match *self {
            VariableRange::Scalar(value) => value,
            VariableRange::Triangle { low, .. } => low,
        }
    }

    pub fn mode(&self) -> f64 {
        match *self {
            VariableRange::Scalar(value) => value,
            VariableRange::Triangle { mode, .. } => mode,
        }
    }

    pub fn high(&self) -> f64 {
        match *self {
            VariableRange::Scalar(value) => value,
            VariableRange::Triangle { high, .. } => high,
        }
    }

    /// A triangle is only sampled when `low <= mode <= high` and `low < high`.
    pub fn is_well_ordered(&self) -> bool {
        match *self {
            VariableRange::Scalar(_) => true,
            VariableRange::Triangle { low, mode, high } => low <= mode && mode <= high && low < high,
        }
    }
}

impl Default for VariableRange {
    fn default() -> Self {
        VariableRange::Scalar(0.0)
    }
}
