use serde::{Deserialize, Serialize};

use crate::grid::Grid;

// Output domain of a normalization pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeRange {
    // continuous [0, 1]
    Unit,
    // whole numbers in [0, 255], truncated
    Byte,
}

impl NormalizeRange {
    pub fn bounds(self) -> (f64, f64) {
        match self {
            NormalizeRange::Unit => (0.0, 1.0),
            NormalizeRange::Byte => (0.0, 255.0),
        }
    }
}

// What the pass saw before rescaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeStats {
    pub min: f32,
    pub max: f32,
    // every cell held the same value; the range was widened by epsilon
    pub degenerate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    range: NormalizeRange,
    epsilon: f64,
}

impl Normalizer {
    pub fn new(range: NormalizeRange) -> Self {
        Self { range, epsilon: 1.0 }
    }

    pub fn unit() -> Self {
        Self::new(NormalizeRange::Unit)
    }

    pub fn byte() -> Self {
        Self::new(NormalizeRange::Byte)
    }

    // Amount added to max when the grid is flat. Must be positive.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = if epsilon > 0.0 { epsilon } else { 1.0 };
        self
    }

    pub fn range(&self) -> NormalizeRange {
        self.range
    }

    // Rescale every cell with the affine map sending global min to the low
    // bound and global max to the high bound, clamped to the bounds.
    pub fn apply(&self, grid: &mut Grid) -> NormalizeStats {
        let (min, max) = grid.min_max();
        let (lo, hi) = (min as f64, max as f64);
        let degenerate = hi <= lo;
        let range = if degenerate { self.epsilon } else { hi - lo };

        let (low, high) = self.range.bounds();
        let span = high - low;
        let truncate = self.range == NormalizeRange::Byte;

        for val in grid.points_mut() {
            // multiply before dividing so whole-number inputs stay exact
            let mut out = low + (*val as f64 - lo) * span / range;
            out = out.clamp(low, high);
            if truncate {
                out = out.trunc();
            }
            *val = out as f32;
        }

        tracing::debug!(
            target: "worldgen::normalize",
            min,
            max,
            degenerate,
            range = ?self.range,
            "normalize.range"
        );
        NormalizeStats {
            min,
            max,
            degenerate,
        }
    }
}
