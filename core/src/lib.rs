// core holds the grid, the fracture generators and the map statistics
pub mod bands;
pub mod colors;
pub mod config;
pub mod error;
pub mod fracture;
pub mod globe;
pub mod grid;
pub mod histogram;
pub mod ice;
pub mod normalize;
pub mod random;
pub mod render;
pub mod world;

pub use colors::{BandTable, ColorTable, Greyscale, HistogramTable};
pub use config::{ConfigError, GenerationConfig, GeneratorKind};
pub use error::{GridError, WorldError};
pub use fracture::FractureMix;
pub use globe::GreatCircleFaults;
pub use grid::Grid;
pub use histogram::Histogram;
pub use ice::{IceCaps, IceReport};
pub use normalize::{NormalizeRange, Normalizer};
pub use random::{RandomSource, SeededRandom};
pub use world::{Cartography, apply_shift_percent, generate, olson};
