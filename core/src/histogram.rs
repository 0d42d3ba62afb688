use crate::grid::Grid;

pub const BUCKETS: usize = 256;

// Lowest sea level handed out for tiny targets
pub const MIN_LEVEL: usize = 1;
// Highest level handed out; 255 stays free for the band above it
pub const MAX_LEVEL: usize = 254;

// Occurrence counts of byte-normalized values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [usize; BUCKETS],
    total: usize,
}

impl Histogram {
    // Expects values in [0, 255]; anything outside is pinned to the nearest
    // bucket so the counts always add up to the cell count.
    pub fn of(grid: &Grid) -> Self {
        let mut counts = [0usize; BUCKETS];
        for &val in grid.points() {
            counts[bucket(val)] += 1;
        }
        Self {
            counts,
            total: grid.len(),
        }
    }

    pub fn counts(&self) -> &[usize; BUCKETS] {
        &self.counts
    }

    pub fn count(&self, bucket: usize) -> usize {
        self.counts[bucket]
    }

    pub fn total(&self) -> usize {
        self.total
    }

    // Bucket below which roughly `pct` percent of the cells lie.
    // Walks the buckets upwards and returns the first one where the running
    // count exceeds the target, capped at 254. A target of at most one cell
    // gives 1 unless the lowest bucket alone already covers it, and a target
    // spanning the whole map gives 254. The result never decreases as `pct`
    // grows.
    // Exception to the [1, 254] clamp: when bucket 0 alone covers a target
    // of at most one cell the result is 0, which keeps the level monotonic.
    pub fn sea_level(&self, pct: u32) -> usize {
        let threshold = pct as usize * self.total / 100;
        if threshold >= self.total {
            return MAX_LEVEL;
        }
        let level = self.integrate(threshold);
        if threshold <= 1 {
            level.min(MIN_LEVEL)
        } else {
            level
        }
    }

    fn integrate(&self, threshold: usize) -> usize {
        let mut pixels = 0;
        for (n, &count) in self.counts.iter().enumerate() {
            pixels += count;
            if pixels > threshold {
                return n.min(MAX_LEVEL);
            }
        }
        MAX_LEVEL
    }

    // Mirror of `sea_level` from the top of the distribution: the bucket at
    // and above which roughly `pct` percent of the cells lie, kept in [1, 254].
    pub fn ice_level(&self, pct: u32) -> usize {
        let threshold = pct as usize * self.total / 100;
        if threshold <= 1 {
            return MAX_LEVEL;
        } else if threshold >= self.total {
            return MIN_LEVEL;
        }

        let mut pixels = 0;
        for (n, &count) in self.counts.iter().enumerate().rev() {
            pixels += count;
            if pixels > threshold {
                return n.clamp(MIN_LEVEL, MAX_LEVEL);
            }
        }
        MIN_LEVEL
    }
}

#[inline]
pub(crate) fn bucket(val: f32) -> usize {
    if val.is_nan() {
        return 0;
    }
    (val.max(0.0) as usize).min(BUCKETS - 1)
}
