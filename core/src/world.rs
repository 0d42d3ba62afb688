use std::time::Instant;

use crate::bands::classify_bands;
use crate::colors::HistogramTable;
use crate::config::{GenerationConfig, GeneratorKind};
use crate::error::WorldError;
use crate::fracture::random_fractures;
use crate::globe::GreatCircleFaults;
use crate::grid::Grid;
use crate::histogram::Histogram;
use crate::ice::{IceCaps, IceReport};
use crate::normalize::Normalizer;
use crate::random::{RandomSource, SeededRandom};

// Build a fresh byte-normalized map from `config`, seeded by `config.seed`
pub fn generate(config: &GenerationConfig) -> Result<Grid, WorldError> {
    generate_with(config, &mut SeededRandom::new(config.seed))
}

// Same as `generate` with a caller-supplied random source
pub fn generate_with<R: RandomSource + ?Sized>(
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Grid, WorldError> {
    config.validate()?;
    let started = Instant::now();
    let mut grid = Grid::new(config.height, config.width)?;

    match config.generator {
        GeneratorKind::Fracture => random_fractures(&mut grid, rng, config.iterations, &config.mix),
        GeneratorKind::GreatCircle => GreatCircleFaults::new(config.iterations).apply(&mut grid, rng),
    }
    let stats = Normalizer::byte().apply(&mut grid);

    tracing::info!(
        target: "worldgen::world",
        seed = format_args!("{:x}", config.seed),
        height = config.height,
        width = config.width,
        iterations = config.iterations,
        generator = ?config.generator,
        raw_min = stats.min,
        raw_max = stats.max,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "world.generate"
    );
    Ok(grid)
}

// Statistics a renderer needs from a byte-normalized map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cartography {
    pub histogram: Histogram,
    pub sea_level: usize,
    pub ice_level: usize,
}

impl Cartography {
    pub fn survey(grid: &Grid, pct_water: u32, pct_ice: u32) -> Self {
        let histogram = Histogram::of(grid);
        let sea_level = histogram.sea_level(pct_water);
        let ice_level = histogram.ice_level(pct_ice);
        tracing::debug!(
            target: "worldgen::world",
            pct_water,
            pct_ice,
            sea_level,
            ice_level,
            "world.survey"
        );
        Self {
            histogram,
            sea_level,
            ice_level,
        }
    }

    pub fn table(&self) -> HistogramTable {
        HistogramTable::from_levels(self.sea_level, self.ice_level.max(self.sea_level))
    }
}

// Classic band map: split land and water at the sea level for `pct_water`,
// then grow both polar ice caps up to `pct_ice` of the area each.
// Leaves `grid` in band space (render with `BandTable::direct`).
pub fn olson(grid: &mut Grid, pct_water: u32, pct_ice: u32) -> IceReport {
    let sea_level = Histogram::of(grid).sea_level(pct_water);
    classify_bands(grid, sea_level);
    IceCaps::new(pct_ice).apply(grid)
}

// Recentre a generated map; percentages wrap, so -25 and 75 agree
pub fn apply_shift_percent(grid: &mut Grid, pct_x: i32, pct_y: i32) -> Result<(), WorldError> {
    grid.shift_percent(pct_x, pct_y)?;
    tracing::info!(target: "worldgen::world", pct_x, pct_y, "world.shift");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bands::{FIRST_LAND_BAND, ICE_BAND};
    use crate::config::ConfigError;
    use crate::error::GridError;

    fn small(seed: u64) -> GenerationConfig {
        GenerationConfig {
            height: 40,
            width: 80,
            seed,
            iterations: 200,
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn generate_is_reproducible() {
        let a = generate(&small(5)).unwrap();
        let b = generate(&small(5)).unwrap();
        let c = generate(&small(6)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.min_max(), (0.0, 255.0));
    }

    #[test]
    fn great_circle_generator_normalizes() {
        let config = GenerationConfig {
            generator: GeneratorKind::GreatCircle,
            ..small(8)
        };
        let g = generate(&config).unwrap();
        assert_eq!(g.min_max(), (0.0, 255.0));
    }

    #[test]
    fn zero_iterations_give_flat_map() {
        let config = GenerationConfig {
            height: 4,
            width: 4,
            iterations: 0,
            ..GenerationConfig::default()
        };
        let g = generate(&config).unwrap();
        assert!(g.points().iter().all(|&v| v == 0.0));
        assert_eq!(Histogram::of(&g).count(0), 16);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GenerationConfig {
            height: 0,
            ..GenerationConfig::default()
        };
        assert!(matches!(
            generate(&config),
            Err(WorldError::Config(ConfigError::Invalid(_)))
        ));
        // dimension check also guards the grid itself
        assert_eq!(
            Grid::new(0, 3).unwrap_err(),
            GridError::InvalidDimension { height: 0, width: 3 }
        );
    }

    #[test]
    fn survey_orders_levels() {
        let g = generate(&small(3)).unwrap();
        let survey = Cartography::survey(&g, 30, 5);
        assert!(survey.sea_level <= survey.ice_level);
        let table = survey.table();
        assert_eq!(table.sea_level(), survey.sea_level);
    }

    #[test]
    fn shift_percent_wraps_negative() {
        let mut a = generate(&small(9)).unwrap();
        let mut b = a.clone();
        apply_shift_percent(&mut a, -25, 0).unwrap();
        apply_shift_percent(&mut b, 75, 0).unwrap();
        assert_eq!(a, b);
        // a full turn is the identity
        let before = a.clone();
        apply_shift_percent(&mut a, 100, 100).unwrap();
        assert_eq!(a, before);
    }

    #[test]
    fn olson_classifies_and_ices() {
        let mut g = generate(&small(4)).unwrap();
        let report = olson(&mut g, 40, 5);
        assert!(report.north > 0);
        assert!(g.points().iter().any(|&v| v < FIRST_LAND_BAND));
        assert!(g.points().iter().any(|&v| v >= ICE_BAND));
        // the first seed always starts at the north-west corner
        assert!(g.get(0, 0) >= ICE_BAND);
    }
}
