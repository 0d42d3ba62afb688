use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fracture::FractureMix;
use crate::grid::Grid;

pub const DEFAULT_SEED: u64 = 0x638b_b317_ac47_a6ba;

// Which generator builds the raw height field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    // circle / slice / tile fractures, mixed per `FractureMix`
    #[default]
    Fracture,
    // great-circle faults over a mirrored globe
    GreatCircle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub height: usize,
    pub width: usize,
    pub seed: u64,
    pub iterations: usize,
    pub generator: GeneratorKind,
    pub mix: FractureMix,
    pub percent_water: u32,
    pub percent_ice: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            height: 600,
            width: 1200,
            seed: DEFAULT_SEED,
            iterations: 10_000,
            generator: GeneratorKind::Fracture,
            mix: FractureMix::default(),
            percent_water: 15,
            percent_ice: 2,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse generation config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read generation config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid generation config: {0}")]
    Invalid(String),
}

impl GenerationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GenerationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::Invalid(format!(
                "dimensions {}x{} must both be positive",
                self.height, self.width
            )));
        }
        if Grid::cell_count(self.height, self.width).is_err() {
            return Err(ConfigError::Invalid(format!(
                "dimensions {}x{} overflow the cell count",
                self.height, self.width
            )));
        }
        let weight = self.mix.total();
        if self.generator == GeneratorKind::Fracture && weight == 0 {
            return Err(ConfigError::Invalid("fracture mix has no weight".into()));
        }
        if weight > u64::from(u32::MAX) {
            return Err(ConfigError::Invalid(format!(
                "fracture mix weights sum to {weight}, above {}",
                u32::MAX
            )));
        }
        for (name, pct) in [
            ("percent_water", self.percent_water),
            ("percent_ice", self.percent_ice),
        ] {
            if pct > 100 {
                return Err(ConfigError::Invalid(format!("{name} {pct} exceeds 100")));
            }
        }
        Ok(())
    }
}
