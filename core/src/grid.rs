use crate::error::{Axis, GridError};

// Height map of `height` rows by `width` columns.
// Backed by one row-major buffer, so row `r` is the slice
// `points[r * width..(r + 1) * width]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    height: usize,
    width: usize,
    points: Vec<f32>,
}

impl Grid {
    // Zero-filled grid. Both dimensions must be at least 1.
    pub fn new(height: usize, width: usize) -> Result<Self, GridError> {
        let len = Self::cell_count(height, width)?;
        Ok(Self {
            height,
            width,
            points: vec![0.0; len],
        })
    }

    // Number of cells for the given dimensions; zero sides and products
    // that do not fit in a usize are both invalid.
    pub fn cell_count(height: usize, width: usize) -> Result<usize, GridError> {
        if height == 0 || width == 0 {
            return Err(GridError::InvalidDimension { height, width });
        }
        height
            .checked_mul(width)
            .ok_or(GridError::InvalidDimension { height, width })
    }

    // Rebuild a grid from its flattened row-major points.
    // A point count that does not match the dimensions is rejected outright.
    pub fn from_points(height: usize, width: usize, points: Vec<f32>) -> Result<Self, GridError> {
        let expected = Self::cell_count(height, width)?;
        if points.len() != expected {
            return Err(GridError::MalformedPersistedState {
                height,
                width,
                points: points.len(),
                expected,
            });
        }
        Ok(Self {
            height,
            width,
            points,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn diagonal(&self) -> f64 {
        ((self.height * self.height + self.width * self.width) as f64).sqrt()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "({row}, {col}) outside {}x{} grid",
            self.height,
            self.width
        );
        row * self.width + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.points[self.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        let i = self.index(row, col);
        self.points[i] = value;
    }

    #[inline]
    pub fn bump(&mut self, row: usize, col: usize, delta: f32) {
        let i = self.index(row, col);
        self.points[i] += delta;
    }

    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.width;
        &self.points[start..start + self.width]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [f32] {
        let start = row * self.width;
        &mut self.points[start..start + self.width]
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, f32> {
        self.points.chunks_exact(self.width)
    }

    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, f32> {
        self.points.chunks_exact_mut(self.width)
    }

    pub fn points(&self) -> &[f32] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [f32] {
        &mut self.points
    }

    pub fn into_points(self) -> Vec<f32> {
        self.points
    }

    // Global (min, max) over every cell
    pub fn min_max(&self) -> (f32, f32) {
        self.points
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    // Rotate every row right by `dx` columns. `dx == width` is a no-op,
    // anything past it is rejected and the grid is left alone.
    pub fn shift_x(&mut self, dx: usize) -> Result<(), GridError> {
        if dx > self.width {
            return Err(GridError::InvalidShift {
                axis: Axis::X,
                offset: dx,
                limit: self.width,
            });
        }
        let dx = dx % self.width;
        if dx != 0 {
            for row in self.rows_mut() {
                row.rotate_right(dx);
            }
            tracing::debug!(target: "worldgen::grid", dx, "grid.shift_x");
        }
        Ok(())
    }

    // Rotate the rows down by `dy`. Same bounds policy as `shift_x`.
    pub fn shift_y(&mut self, dy: usize) -> Result<(), GridError> {
        if dy > self.height {
            return Err(GridError::InvalidShift {
                axis: Axis::Y,
                offset: dy,
                limit: self.height,
            });
        }
        let dy = dy % self.height;
        if dy != 0 {
            self.points.rotate_right(dy * self.width);
            tracing::debug!(target: "worldgen::grid", dy, "grid.shift_y");
        }
        Ok(())
    }

    // Recentre the map by a signed percentage of each dimension.
    // Positive `pct_x` scrolls the map west, positive `pct_y` scrolls it south.
    pub fn shift_percent(&mut self, pct_x: i32, pct_y: i32) -> Result<(), GridError> {
        let dx = -(self.width as i64 * pct_x as i64 / 100);
        let dy = self.height as i64 * pct_y as i64 / 100;
        self.shift_x(dx.rem_euclid(self.width as i64) as usize)?;
        self.shift_y(dy.rem_euclid(self.height as i64) as usize)
    }
}
