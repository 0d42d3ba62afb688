use std::f64::consts::PI;

use crate::grid::Grid;
use crate::random::RandomSource;

// Great-circle fault generator.
// Each fault is a random great circle drawn across the western half of an
// equirectangular map; the cells it crosses record a +1/-1 step. The eastern
// half is the point mirror of the western one, and integrating each column
// from the north pole turns the steps into raised or lowered hemispheres.
pub struct GreatCircleFaults {
    faults: usize,
}

impl GreatCircleFaults {
    pub fn new(faults: usize) -> Self {
        Self { faults }
    }

    // Overwrites `grid` with the integrated fault field
    pub fn apply<R: RandomSource + ?Sized>(&self, grid: &mut Grid, rng: &mut R) {
        let (height, width) = (grid.height(), grid.width());
        grid.points_mut().fill(0.0);

        // sin table over one full turn, doubled so xsi - phi + width never
        // needs a modulo
        let sin_iter: Vec<f64> = (0..2 * width)
            .map(|i| ((i % width) as f64 * 2.0 * PI / width as f64).sin())
            .collect();

        for _ in 0..self.faults {
            let lower = rng.coin();
            self.fault(grid, rng, &sin_iter, if lower { -1.0 } else { 1.0 });
        }

        // mirror the western half into the eastern half
        let half = width / 2;
        for x in 0..half {
            for i in 1..height {
                let v = grid.get(i, x);
                grid.set(height - i, x + half, v);
            }
        }

        // integrate each column top-down
        for y in 1..height {
            for x in 0..width {
                let above = grid.get(y - 1, x);
                grid.bump(y, x, above);
            }
        }

        let (min, max) = grid.min_max();
        tracing::debug!(
            target: "worldgen::globe",
            faults = self.faults,
            min,
            max,
            "globe.faults"
        );
    }

    fn fault<R: RandomSource + ?Sized>(&self, grid: &mut Grid, rng: &mut R, sin_iter: &[f64], bump: f32) {
        let (height, width) = (grid.height(), grid.width());
        let (w, h) = (width as f64, height as f64);

        // start from the equator and tilt it around both horizontal axes
        let alpha = (rng.float64() - 0.5) * PI;
        let beta = (rng.float64() - 0.5) * PI;
        let tan_b = (alpha.cos() * beta.cos()).acos().tan();
        let xsi = ((w / 2.0 - w / PI) * beta) as i64;

        for phi in 0..width / 2 {
            let idx = (xsi - phi as i64 + width as i64).clamp(0, 2 * width as i64 - 1) as usize;
            let theta = ((h / PI) * (sin_iter[idx] * tan_b).atan() + h / 2.0) as i64;
            let row = theta.clamp(0, height as i64 - 1) as usize;
            grid.bump(row, phi, bump);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GreatCircleFaults;
    use crate::grid::Grid;
    use crate::random::SeededRandom;
    use crate::random::tests::Scripted;

    #[test]
    fn equator_fault_lifts_southern_hemisphere() {
        let mut g = Grid::new(8, 16).unwrap();
        // raise (coin -> 1), alpha = beta = 0: the circle is the equator
        let mut rng = Scripted::new(&[0.5, 0.5], &[1]);
        GreatCircleFaults::new(1).apply(&mut g, &mut rng);
        // west half: rows from the equator down carry the +1 step
        for x in 0..8 {
            assert_eq!(g.get(0, x), 0.0);
            assert_eq!(g.get(3, x), 0.0);
            assert_eq!(g.get(4, x), 1.0);
            assert_eq!(g.get(7, x), 1.0);
        }
    }

    #[test]
    fn faults_are_reproducible() {
        let mut a = Grid::new(32, 64).unwrap();
        let mut b = Grid::new(32, 64).unwrap();
        GreatCircleFaults::new(300).apply(&mut a, &mut SeededRandom::new(9));
        GreatCircleFaults::new(300).apply(&mut b, &mut SeededRandom::new(9));
        assert_eq!(a, b);
        let (lo, hi) = a.min_max();
        assert!(lo < hi);
    }

    #[test]
    fn no_faults_leave_map_flat() {
        let mut g = Grid::from_points(4, 4, vec![3.0; 16]).unwrap();
        GreatCircleFaults::new(0).apply(&mut g, &mut SeededRandom::new(3));
        assert!(g.points().iter().all(|&v| v == 0.0));
    }
}
