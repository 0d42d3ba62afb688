use palette::{Gradient, LinSrgb, Srgb};

use crate::histogram::Histogram;

// Maps a grid value onto an RGB triple for rendering
pub trait ColorTable {
    fn color(&self, value: f32) -> [u8; 3];
}

// Cartographic table: 0..=15 water, 16..=31 land, 32..=49 ice
const RED: [u8; 50] = [
    0, 0, 0, 0, 0, 0, 0, 0, 34, 68, 102, 119, 136, 153, 170, 187, //
    0, 34, 34, 119, 187, 255, 238, 221, 204, 187, 170, 153, 136, 119, 85, 68, //
    255, 250, 245, 240, 235, 230, 225, 220, 215, 210, 205, 200, 195, 190, 185, 180, 175, 175,
];
const GREEN: [u8; 50] = [
    0, 0, 17, 51, 85, 119, 153, 204, 221, 238, 255, 255, 255, 255, 255, 255, //
    68, 102, 136, 170, 221, 187, 170, 136, 136, 102, 85, 85, 68, 51, 51, 34, //
    255, 250, 245, 240, 235, 230, 225, 220, 215, 210, 205, 200, 195, 190, 185, 180, 175, 175,
];
const BLUE: [u8; 50] = [
    0, 68, 102, 136, 170, 187, 221, 255, 255, 255, 255, 255, 255, 255, 255, 255, //
    0, 0, 0, 0, 0, 34, 34, 34, 34, 34, 34, 34, 34, 34, 17, 0, //
    255, 250, 245, 240, 235, 230, 225, 220, 215, 210, 205, 200, 195, 190, 185, 180, 175, 175,
];

const LAST_BAND: usize = RED.len() - 1;

// Fixed 50-entry table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandTable {
    scaled: bool,
}

impl BandTable {
    // Indexed directly by band value (see `bands`)
    pub fn direct() -> Self {
        Self { scaled: false }
    }

    // Spreads a 0..=255 grid over the 50 entries
    pub fn scaled() -> Self {
        Self { scaled: true }
    }
}

impl ColorTable for BandTable {
    fn color(&self, value: f32) -> [u8; 3] {
        let v = value.max(0.0) as usize;
        let i = if self.scaled { v.min(255) * LAST_BAND / 255 } else { v };
        let i = i.min(LAST_BAND);
        [RED[i], GREEN[i], BLUE[i]]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Greyscale;

impl ColorTable for Greyscale {
    fn color(&self, value: f32) -> [u8; 3] {
        let v = value.clamp(0.0, 255.0) as u8;
        [v, v, v]
    }
}

// 256-entry table fitted to a map's own distribution: buckets below the sea
// level run through the water gradient, buckets up to the ice level through
// the terrain gradient and the rest through the ice gradient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramTable {
    sea_level: usize,
    ice_level: usize,
    entries: Vec<[u8; 3]>,
}

impl HistogramTable {
    pub fn new(histogram: &Histogram, pct_water: u32, pct_ice: u32) -> Self {
        let sea_level = histogram.sea_level(pct_water);
        let ice_level = histogram.ice_level(pct_ice).max(sea_level);
        Self::from_levels(sea_level, ice_level)
    }

    pub fn from_levels(sea_level: usize, ice_level: usize) -> Self {
        // stops are sRGB; gradients blend in linear light
        let water = Gradient::new(vec![stop(0.0, 0.0, 0.27), stop(0.0, 0.47, 1.0)]);
        let terrain = Gradient::with_domain(vec![
            (0.00, stop(0.0, 0.27, 0.0)),
            (0.25, stop(0.47, 0.73, 0.0)),
            (0.50, stop(1.0, 0.87, 0.0)),
            (0.75, stop(0.73, 0.4, 0.13)),
            (1.00, stop(0.27, 0.13, 0.0)),
        ]);
        let ice = Gradient::new(vec![stop(0.86, 0.86, 0.86), stop(1.0, 1.0, 1.0)]);

        let entries = (0..256)
            .map(|n| {
                let col = if n < sea_level {
                    water.get(fraction(n, 0, sea_level))
                } else if n < ice_level {
                    terrain.get(fraction(n, sea_level, ice_level))
                } else {
                    ice.get(fraction(n, ice_level, 256))
                };
                let rgb = Srgb::from_linear(col).into_format::<u8>();
                [rgb.red, rgb.green, rgb.blue]
            })
            .collect();

        Self {
            sea_level,
            ice_level,
            entries,
        }
    }

    pub fn sea_level(&self) -> usize {
        self.sea_level
    }

    pub fn ice_level(&self) -> usize {
        self.ice_level
    }
}

fn stop(red: f32, green: f32, blue: f32) -> LinSrgb {
    Srgb::new(red, green, blue).into_linear()
}

// Position of `n` inside [start, end), 0 at start
fn fraction(n: usize, start: usize, end: usize) -> f32 {
    if end <= start + 1 {
        return 0.0;
    }
    (n - start) as f32 / (end - start - 1) as f32
}

impl ColorTable for HistogramTable {
    fn color(&self, value: f32) -> [u8; 3] {
        self.entries[crate::histogram::bucket(value)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn band_table_direct_lookup() {
        let t = BandTable::direct();
        assert_eq!(t.color(0.0), [0, 0, 0]);
        assert_eq!(t.color(7.0), [0, 204, 255]);
        assert_eq!(t.color(16.0), [0, 68, 0]);
        assert_eq!(t.color(32.0), [255, 255, 255]);
        // past the table clamps to the last entry
        assert_eq!(t.color(200.0), [175, 175, 175]);
    }

    #[test]
    fn band_table_scaled_lookup() {
        let t = BandTable::scaled();
        assert_eq!(t.color(0.0), t.color(1.0));
        assert_eq!(t.color(255.0), [175, 175, 175]);
    }

    #[test]
    fn greyscale_passthrough() {
        assert_eq!(Greyscale.color(128.0), [128, 128, 128]);
        assert_eq!(Greyscale.color(-3.0), [0, 0, 0]);
    }

    #[test]
    fn histogram_table_bands() {
        let t = HistogramTable::from_levels(100, 200);
        // water is blue dominated, ice is near white
        let [r, g, b] = t.color(10.0);
        assert!(b > r && b >= g);
        let [r, g, b] = t.color(250.0);
        assert!(r > 200 && g > 200 && b > 200);
        let [_, g, b] = t.color(150.0);
        assert!(g > b);
    }

    #[test]
    fn histogram_table_blends_in_linear_light() {
        let t = HistogramTable::from_levels(101, 200);
        // endpoints keep their sRGB stop values
        let [_, _, deep] = t.color(0.0);
        assert!(deep.abs_diff(69) <= 1, "deep water blue {deep}");
        let [_, _, shallow] = t.color(100.0);
        assert!(shallow >= 254);
        // halfway sits above the plain sRGB average of 162
        let [_, _, mid] = t.color(50.0);
        assert!(mid > 180, "mid water blue {mid}");
    }

    #[test]
    fn histogram_table_from_ramp() {
        let points = (0..256).map(|v| v as f32).collect();
        let g = Grid::from_points(16, 16, points).unwrap();
        let t = HistogramTable::new(&Histogram::of(&g), 25, 10);
        assert_eq!(t.sea_level(), 64);
        assert!(t.ice_level() > t.sea_level());
    }
}
