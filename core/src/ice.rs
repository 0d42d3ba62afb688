use crate::bands::{FIRST_LAND_BAND, ICE_BAND};
use crate::grid::Grid;

// Added to a land band when ice covers it
pub const ACCRETION: f32 = 17.0;

// Filled-cell counts of one polar ice pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IceReport {
    // cells a pass may claim before the scan stops
    pub budget: usize,
    pub north: usize,
    pub south: usize,
}

impl IceReport {
    pub fn filled(&self) -> usize {
        self.north + self.south
    }
}

// Grows polar ice caps over a band-classified grid.
//
// Each pole is scanned row by row from its edge inward. Every cell below the
// ice band seeds a 4-connected fill over the cells sharing its exact band:
// water turns into plain ice, land keeps its relief shifted up by
// `ACCRETION`. The fill wraps east-west but stops at the top and bottom
// rows. The budget is only checked between seeds, so the last fill of a pass
// may overshoot it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IceCaps {
    percent: u32,
}

impl IceCaps {
    pub fn new(percent: u32) -> Self {
        Self { percent }
    }

    pub fn apply(&self, grid: &mut Grid) -> IceReport {
        let total = grid.len();
        let budget = self.percent as usize * total / 100;
        let mut report = IceReport {
            budget,
            ..IceReport::default()
        };
        if budget == 0 || budget > total {
            return report;
        }

        let mut stack = Vec::new();
        let height = grid.height();
        report.north = scan(grid, 0..height, budget, &mut stack);
        report.south = scan(grid, (0..height).rev(), budget, &mut stack);

        tracing::debug!(
            target: "worldgen::ice",
            budget,
            north = report.north,
            south = report.south,
            "ice.caps"
        );
        report
    }
}

// One pole: its own running counter, stopping once the budget is exceeded
fn scan(
    grid: &mut Grid,
    rows: impl Iterator<Item = usize>,
    budget: usize,
    stack: &mut Vec<(usize, usize)>,
) -> usize {
    let width = grid.width();
    let mut filled = 0;
    for y in rows {
        for x in 0..width {
            let color = grid.get(y, x);
            if color < ICE_BAND {
                filled += flood_fill4(grid, y, x, color, stack);
            }
            if filled > budget {
                return filled;
            }
        }
    }
    filled
}

// Reclassify the region of cells equal to `old` connected to (row, col).
// Uses `stack` as the work list instead of recursing, so region size is
// bounded by memory rather than call depth. Returns the number of cells
// changed; zero when the start cell does not hold `old` or `old` is already
// ice.
pub fn flood_fill4(
    grid: &mut Grid,
    row: usize,
    col: usize,
    old: f32,
    stack: &mut Vec<(usize, usize)>,
) -> usize {
    if old >= ICE_BAND {
        return 0;
    }
    let (height, width) = (grid.height(), grid.width());
    let iced = if old < FIRST_LAND_BAND {
        ICE_BAND
    } else {
        old + ACCRETION
    };

    let mut filled = 0;
    stack.clear();
    stack.push((row, col));
    while let Some((y, x)) = stack.pop() {
        if grid.get(y, x) != old {
            continue;
        }
        grid.set(y, x, iced);
        filled += 1;

        let west = if x == 0 { width - 1 } else { x - 1 };
        let east = if x + 1 == width { 0 } else { x + 1 };
        let mut visit = |ny: usize, nx: usize| {
            if grid.get(ny, nx) == old {
                stack.push((ny, nx));
            }
        };
        if y > 0 {
            visit(y - 1, x);
        }
        if y + 1 < height {
            visit(y + 1, x);
        }
        visit(y, west);
        visit(y, east);
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_wraps_east_west() {
        let mut g = Grid::from_points(1, 4, vec![5.0, 40.0, 40.0, 5.0]).unwrap();
        let n = flood_fill4(&mut g, 0, 0, 5.0, &mut Vec::new());
        assert_eq!(n, 2);
        assert_eq!(g.points(), &[ICE_BAND, 40.0, 40.0, ICE_BAND]);
    }

    #[test]
    fn fill_does_not_wrap_north_south() {
        let mut g = Grid::from_points(3, 1, vec![5.0, 40.0, 5.0]).unwrap();
        let n = flood_fill4(&mut g, 0, 0, 5.0, &mut Vec::new());
        assert_eq!(n, 1);
        assert_eq!(g.get(2, 0), 5.0);
    }

    #[test]
    fn fill_matches_exact_band_only() {
        let mut g = Grid::from_points(1, 4, vec![20.0, 20.0, 21.0, 20.0]).unwrap();
        let n = flood_fill4(&mut g, 0, 1, 20.0, &mut Vec::new());
        // (0, 3) joins through the wrap from (0, 0)
        assert_eq!(n, 3);
        assert_eq!(g.points(), &[37.0, 37.0, 21.0, 37.0]);
    }

    #[test]
    fn fill_ignores_ice_seed() {
        let mut g = Grid::from_points(1, 2, vec![33.0, 33.0]).unwrap();
        assert_eq!(flood_fill4(&mut g, 0, 0, 33.0, &mut Vec::new()), 0);
        assert_eq!(g.points(), &[33.0, 33.0]);
    }

    #[test]
    fn large_region_fills_without_recursion() {
        let mut g = Grid::from_points(500, 500, vec![7.0; 250_000]).unwrap();
        let n = flood_fill4(&mut g, 250, 250, 7.0, &mut Vec::new());
        assert_eq!(n, 250_000);
        assert!(g.points().iter().all(|&v| v == ICE_BAND));
    }

    #[test]
    fn caps_stop_after_budget() {
        // each row its own band, so every seed fills exactly one row
        let points = (0..6).flat_map(|r| vec![(r + 1) as f32; 10]).collect();
        let mut g = Grid::from_points(6, 10, points).unwrap();
        // budget 10% of 60 = 6 cells; the first row overshoots it
        let report = IceCaps::new(10).apply(&mut g);
        assert_eq!(report.budget, 6);
        assert_eq!(report.north, 10);
        assert_eq!(report.south, 10);
        assert!(g.row(0).iter().all(|&v| v == ICE_BAND));
        assert!(g.row(5).iter().all(|&v| v == ICE_BAND));
        assert!(g.row(1).iter().all(|&v| v == 2.0));
        assert!(g.row(4).iter().all(|&v| v == 5.0));
    }

    #[test]
    fn already_iced_grid_is_left_alone() {
        let mut g = Grid::from_points(4, 4, vec![32.0; 16]).unwrap();
        g.set(1, 1, 45.0);
        let before = g.clone();
        let report = IceCaps::new(50).apply(&mut g);
        assert_eq!(report.filled(), 0);
        assert_eq!(g, before);
    }

    #[test]
    fn zero_budget_skips() {
        let mut g = Grid::from_points(2, 2, vec![1.0; 4]).unwrap();
        let report = IceCaps::new(0).apply(&mut g);
        assert_eq!(report, IceReport::default());
        assert_eq!(g.points(), &[1.0; 4]);
    }
}
