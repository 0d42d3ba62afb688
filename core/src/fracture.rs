use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::random::RandomSource;

// Which cells a tile fracture touches relative to its disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    Inside,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractureKind {
    Circle,
    Slice,
    TileOutside,
    TileInside,
}

// Disk picked by a circle or tile fracture, in (col, row) = (x, y) terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disk {
    pub cx: i64,
    pub cy: i64,
    pub radius: i64,
}

// Line `y = slope * x + intercept` picked by a slice fracture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultLine {
    pub slope: f64,
    pub intercept: f64,
}

// Relative weights for the operator picked on each driver step.
// The default reproduces the plain circle generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractureMix {
    pub circle: u32,
    pub slice: u32,
    pub tile_outside: u32,
    pub tile_inside: u32,
}

impl Default for FractureMix {
    fn default() -> Self {
        Self {
            circle: 1,
            slice: 0,
            tile_outside: 0,
            tile_inside: 0,
        }
    }
}

impl FractureMix {
    // Widened so any four u32 weights add up without overflow
    pub fn total(&self) -> u64 {
        [self.circle, self.slice, self.tile_outside, self.tile_inside]
            .into_iter()
            .map(u64::from)
            .sum()
    }

    // Draws one integer in [0, total) and maps it onto the weights in
    // declaration order. A zero total falls back to circle without drawing.
    pub fn pick<R: RandomSource + ?Sized>(&self, rng: &mut R) -> FractureKind {
        let total = self.total();
        if total == 0 {
            return FractureKind::Circle;
        }
        let bound = usize::try_from(total).unwrap_or(usize::MAX);
        let mut n = rng.intn(bound) as u64;
        for (weight, kind) in [
            (self.circle, FractureKind::Circle),
            (self.slice, FractureKind::Slice),
            (self.tile_outside, FractureKind::TileOutside),
        ] {
            let weight = u64::from(weight);
            if n < weight {
                return kind;
            }
            n -= weight;
        }
        FractureKind::TileInside
    }
}

// r = floor(u^2 * diagonal / 2), redrawn until r >= 1.
// On grids too small for that to ever happen the radius is pinned to 1.
fn draw_radius<R: RandomSource + ?Sized>(diagonal: f64, rng: &mut R) -> i64 {
    let half = diagonal / 2.0;
    if half <= 1.0 {
        return 1;
    }
    loop {
        let u = rng.float64();
        let radius = (u * u * half) as i64;
        if radius >= 1 {
            return radius;
        }
    }
}

// Radius draws first, then the centre column, then the centre row
fn draw_disk<R: RandomSource + ?Sized>(grid: &Grid, rng: &mut R) -> Disk {
    let radius = draw_radius(grid.diagonal(), rng);
    let cx = rng.intn(grid.width()) as i64;
    let cy = rng.intn(grid.height()) as i64;
    Disk { cx, cy, radius }
}

// Bump every cell strictly inside a random disk. The map is a torus, so the
// disk wraps around both edges.
pub fn circle<R: RandomSource + ?Sized>(grid: &mut Grid, rng: &mut R, bump: f32) -> Disk {
    let disk = draw_disk(grid, rng);
    let (height, width) = (grid.height() as i64, grid.width() as i64);
    let Disk { cx, cy, radius } = disk;
    let r_squared = radius * radius;

    // bounding box of side 2r + 2 around the centre
    for y in (cy - radius - 1)..(cy + radius + 1) {
        let dy = y - cy;
        let row = y.rem_euclid(height) as usize;
        for x in (cx - radius - 1)..(cx + radius + 1) {
            let dx = x - cx;
            if dx * dx + dy * dy < r_squared {
                grid.bump(row, x.rem_euclid(width) as usize, bump);
            }
        }
    }
    tracing::trace!(target: "worldgen::fracture", cx, cy, radius, bump, "fracture.circle");
    disk
}

// Bump every cell below a random line crossing the whole map.
// Returns None on single-row grids, where no non-horizontal pair of points exists.
pub fn slice<R: RandomSource + ?Sized>(grid: &mut Grid, rng: &mut R, bump: f32) -> Option<FaultLine> {
    let (height, width) = (grid.height(), grid.width());
    if height < 2 {
        return None;
    }

    let line = loop {
        let (x1, y1) = (rng.intn(width) as i64, rng.intn(height) as i64);
        let (x2, y2) = (rng.intn(width) as i64, rng.intn(height) as i64);
        // equal rows also rules out picking the same point twice
        if y1 == y2 {
            continue;
        }
        break FaultLine {
            slope: (x1 - x2) as f64 / (y1 - y2) as f64,
            intercept: rng.float64() * height as f64,
        };
    };

    for x in 0..width {
        let mxb = (line.slope * x as f64 + line.intercept) as i64;
        let first = (mxb + 1).clamp(0, height as i64) as usize;
        for y in first..height {
            grid.bump(y, x, bump);
        }
    }
    tracing::trace!(
        target: "worldgen::fracture",
        slope = line.slope,
        intercept = line.intercept,
        bump,
        "fracture.slice"
    );
    Some(line)
}

// Same disk as `circle` but without wrapping: cells off the map are never
// visited, and `coverage` picks the inside or the outside of the disk.
pub fn tile<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    bump: f32,
    coverage: Coverage,
) -> Disk {
    let disk = draw_disk(grid, rng);
    let Disk { cx, cy, radius } = disk;
    let r_squared = radius * radius;
    let want_inside = coverage == Coverage::Inside;

    for (y, row) in grid.rows_mut().enumerate() {
        let dy = y as i64 - cy;
        for (x, cell) in row.iter_mut().enumerate() {
            let dx = x as i64 - cx;
            if (dx * dx + dy * dy < r_squared) == want_inside {
                *cell += bump;
            }
        }
    }
    tracing::trace!(
        target: "worldgen::fracture",
        cx,
        cy,
        radius,
        bump,
        ?coverage,
        "fracture.tile"
    );
    disk
}

// Apply one fracture of the given kind
pub fn fracture<R: RandomSource + ?Sized>(grid: &mut Grid, rng: &mut R, kind: FractureKind, bump: f32) {
    match kind {
        FractureKind::Circle => {
            circle(grid, rng, bump);
        }
        FractureKind::Slice => {
            slice(grid, rng, bump);
        }
        FractureKind::TileOutside => {
            tile(grid, rng, bump, Coverage::Outside);
        }
        FractureKind::TileInside => {
            tile(grid, rng, bump, Coverage::Inside);
        }
    }
}

// Run `n` independent fractures. Each step draws the operator from `mix`,
// then the sign of the bump (coin flip: raise or lower), then hands the
// source to the operator.
pub fn random_fractures<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    n: usize,
    mix: &FractureMix,
) {
    let mut raised = 0usize;
    for _ in 0..n {
        let kind = mix.pick(rng);
        let bump = if rng.coin() {
            raised += 1;
            1.0
        } else {
            -1.0
        };
        fracture(grid, rng, kind, bump);
    }
    tracing::debug!(
        target: "worldgen::fracture",
        iterations = n,
        raised,
        lowered = n - raised,
        "fracture.random"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;
    use crate::random::tests::Scripted;

    #[test]
    fn circle_wraps_around_origin() {
        let mut g = Grid::new(10, 10).unwrap();
        // u = 0.9 -> r = floor(0.81 * 14.142 / 2) = 5, centre (0, 0)
        let mut rng = Scripted::new(&[0.9], &[0, 0]);
        let disk = circle(&mut g, &mut rng, 1.0);
        assert_eq!(disk, Disk { cx: 0, cy: 0, radius: 5 });
        assert_eq!(g.get(0, 0), 1.0);
        assert_eq!(g.get(9, 9), 1.0);
        assert_eq!(g.get(0, 9), 1.0);
        assert_eq!(g.get(9, 0), 1.0);
        assert_eq!(g.get(5, 5), 0.0);

        let expected = (-5i64..=5)
            .flat_map(|dy| (-5i64..=5).map(move |dx| dx * dx + dy * dy))
            .filter(|&d| d < 25)
            .count();
        let total: f32 = g.points().iter().sum();
        assert_eq!(total as usize, expected);
    }

    #[test]
    fn circle_radius_retries_until_positive() {
        let mut g = Grid::new(10, 10).unwrap();
        // 0.1 and 0.2 both floor to 0, 0.5 gives floor(0.25 * 7.07) = 1
        let mut rng = Scripted::new(&[0.1, 0.2, 0.5], &[4, 6]);
        let disk = circle(&mut g, &mut rng, -1.0);
        assert_eq!(disk.radius, 1);
        // radius 1 with a strict comparison covers only the centre
        assert_eq!(g.get(6, 4), -1.0);
        assert_eq!(g.points().iter().filter(|&&v| v != 0.0).count(), 1);
    }

    #[test]
    fn tiny_grid_pins_radius() {
        let mut g = Grid::new(1, 1).unwrap();
        let mut rng = Scripted::new(&[], &[0, 0]);
        let disk = circle(&mut g, &mut rng, 1.0);
        assert_eq!(disk.radius, 1);
        assert_eq!(g.get(0, 0), 1.0);
    }

    #[test]
    fn slice_bumps_below_line() {
        let mut g = Grid::new(6, 4).unwrap();
        // (x1, y1) = (1, 1), (x2, y2) = (1, 2): rows differ, slope 0; b = 0.5 * 6 = 3
        let mut rng = Scripted::new(&[0.5], &[1, 1, 1, 2]);
        let line = slice(&mut g, &mut rng, 1.0).unwrap();
        assert_eq!(line.slope, 0.0);
        assert_eq!(line.intercept, 3.0);
        for x in 0..4 {
            for y in 0..6 {
                let expected = if y > 3 { 1.0 } else { 0.0 };
                assert_eq!(g.get(y, x), expected, "({y}, {x})");
            }
        }
    }

    #[test]
    fn slice_rejects_horizontal_pairs() {
        let mut g = Grid::new(4, 4).unwrap();
        // first pair shares a row and is redrawn
        let mut rng = Scripted::new(&[0.0], &[0, 2, 3, 2, 2, 0, 0, 2]);
        let line = slice(&mut g, &mut rng, 1.0).unwrap();
        assert_eq!(line.slope, -1.0);
        // y > -x: every row but the first cell of the first row
        assert_eq!(g.get(0, 0), 0.0);
        assert_eq!(g.get(0, 1), 1.0);
        assert_eq!(g.get(3, 3), 1.0);
    }

    #[test]
    fn slice_skips_single_row() {
        let mut g = Grid::new(1, 8).unwrap();
        let mut rng = Scripted::new(&[], &[]);
        assert!(slice(&mut g, &mut rng, 1.0).is_none());
    }

    #[test]
    fn tile_outside_does_not_wrap() {
        let mut g = Grid::new(10, 10).unwrap();
        let mut rng = Scripted::new(&[0.9], &[0, 0]);
        tile(&mut g, &mut rng, 1.0, Coverage::Outside);
        assert_eq!(g.get(0, 0), 0.0);
        // inside the disk only when wrapping, so bumped here
        assert_eq!(g.get(9, 9), 1.0);
        assert_eq!(g.get(4, 4), 1.0);
        assert_eq!(g.get(3, 3), 0.0);
    }

    #[test]
    fn tile_inside_and_outside_partition_grid() {
        let mut inside = Grid::new(12, 20).unwrap();
        let mut outside = Grid::new(12, 20).unwrap();
        tile(&mut inside, &mut Scripted::new(&[0.8], &[7, 3]), 1.0, Coverage::Inside);
        tile(&mut outside, &mut Scripted::new(&[0.8], &[7, 3]), 1.0, Coverage::Outside);
        for (a, b) in inside.points().iter().zip(outside.points()) {
            assert_eq!(a + b, 1.0);
        }
    }

    #[test]
    fn mix_pick_follows_weights() {
        let mix = FractureMix {
            circle: 1,
            slice: 2,
            tile_outside: 0,
            tile_inside: 1,
        };
        let mut rng = Scripted::new(&[], &[0, 1, 2, 3]);
        assert_eq!(mix.pick(&mut rng), FractureKind::Circle);
        assert_eq!(mix.pick(&mut rng), FractureKind::Slice);
        assert_eq!(mix.pick(&mut rng), FractureKind::Slice);
        assert_eq!(mix.pick(&mut rng), FractureKind::TileInside);
    }

    #[test]
    fn mix_total_does_not_overflow() {
        let mix = FractureMix {
            circle: u32::MAX,
            slice: u32::MAX,
            tile_outside: u32::MAX,
            tile_inside: u32::MAX,
        };
        assert_eq!(mix.total(), 4 * u64::from(u32::MAX));
        // the last weight still picks past the first three
        let mut rng = Scripted::new(&[], &[3 * u32::MAX as usize]);
        assert_eq!(mix.pick(&mut rng), FractureKind::TileInside);
    }

    #[test]
    fn random_fractures_reproducible() {
        let mix = FractureMix {
            circle: 2,
            slice: 1,
            tile_outside: 1,
            tile_inside: 1,
        };
        let mut a = Grid::new(24, 48).unwrap();
        let mut b = Grid::new(24, 48).unwrap();
        random_fractures(&mut a, &mut SeededRandom::new(42), 200, &mix);
        random_fractures(&mut b, &mut SeededRandom::new(42), 200, &mix);
        assert_eq!(a, b);
        let (lo, hi) = a.min_max();
        assert!(lo < hi);
    }

    #[test]
    fn zero_iterations_leave_grid_flat() {
        let mut g = Grid::new(4, 4).unwrap();
        random_fractures(&mut g, &mut SeededRandom::new(1), 0, &FractureMix::default());
        assert!(g.points().iter().all(|&v| v == 0.0));
    }
}
