use crate::grid::Grid;

// Cartographic band space shared by the ice fill and the band colour table:
// 1..=15 water (deep to shallow), 16..=31 land (low to high),
// 32 and up ice (see `ice`).
pub const WATER_BANDS: f32 = 15.0;
pub const FIRST_LAND_BAND: f32 = 16.0;
pub const LAST_LAND_BAND: f32 = 31.0;
pub const ICE_BAND: f32 = 32.0;

pub const TWO_COLOR_WATER: f32 = 3.0;
pub const TWO_COLOR_LAND: f32 = 20.0;

// Rescale a byte-normalized grid into bands so that cells below `sea_level`
// become water and the rest land, each side spread over its own 15 steps.
pub fn classify_bands(grid: &mut Grid, sea_level: usize) {
    let (min, max) = grid.min_max();
    let (min, max) = (min as f64, max as f64);
    let sea = sea_level as f64;

    for val in grid.points_mut() {
        let v = *val as f64;
        let band = if v < sea {
            // v < sea implies sea > min, so the span is positive
            ((v - min) / (sea - min) * WATER_BANDS as f64).trunc() + 1.0
        } else if max > sea {
            ((v - sea) / (max - sea) * WATER_BANDS as f64).trunc() + FIRST_LAND_BAND as f64
        } else {
            FIRST_LAND_BAND as f64
        };
        *val = band.clamp(1.0, LAST_LAND_BAND as f64) as f32;
    }
    tracing::debug!(target: "worldgen::bands", sea_level, min, max, "bands.classify");
}

// Flat water/land split, no relief
pub fn two_color(grid: &mut Grid, sea_level: usize) {
    let sea = sea_level as f32;
    for val in grid.points_mut() {
        *val = if *val < sea {
            TWO_COLOR_WATER
        } else {
            TWO_COLOR_LAND
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Grid {
        let points = (0..256).map(|v| v as f32).collect();
        Grid::from_points(16, 16, points).unwrap()
    }

    #[test]
    fn ramp_splits_at_sea_level() {
        let mut g = ramp();
        classify_bands(&mut g, 100);
        assert_eq!(g.points()[0], 1.0);
        assert_eq!(g.points()[99], 15.0);
        assert_eq!(g.points()[100], FIRST_LAND_BAND);
        assert_eq!(g.points()[255], LAST_LAND_BAND);
        assert!(g.points()[..100].iter().all(|&v| v < FIRST_LAND_BAND));
        assert!(g.points()[100..].iter().all(|&v| v >= FIRST_LAND_BAND));
    }

    #[test]
    fn bands_stay_in_range() {
        let mut g = ramp();
        classify_bands(&mut g, 1);
        assert!(g.points().iter().all(|&v| (1.0..=LAST_LAND_BAND).contains(&v)));
    }

    #[test]
    fn sea_above_everything_is_all_water() {
        let mut g = Grid::from_points(1, 3, vec![0.0, 10.0, 20.0]).unwrap();
        classify_bands(&mut g, 254);
        assert!(g.points().iter().all(|&v| v < FIRST_LAND_BAND));
    }

    #[test]
    fn flat_land_gets_lowest_land_band() {
        let mut g = Grid::from_points(1, 3, vec![50.0; 3]).unwrap();
        classify_bands(&mut g, 10);
        assert!(g.points().iter().all(|&v| v == FIRST_LAND_BAND));
    }

    #[test]
    fn two_color_split() {
        let mut g = ramp();
        two_color(&mut g, 128);
        assert_eq!(g.points()[127], TWO_COLOR_WATER);
        assert_eq!(g.points()[128], TWO_COLOR_LAND);
    }
}
