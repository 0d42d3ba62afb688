use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use worldgen_core::{FractureMix, GenerationConfig, GeneratorKind, Grid, GridError};

// Persisted map: dimensions plus the row-major points.
// Files written by older tools hold integer points, which read back fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDoc {
    pub height: usize,
    pub width: usize,
    pub points: Vec<f32>,
}

impl From<&Grid> for MapDoc {
    fn from(grid: &Grid) -> Self {
        Self {
            height: grid.height(),
            width: grid.width(),
            points: grid.points().to_vec(),
        }
    }
}

impl TryFrom<MapDoc> for Grid {
    type Error = GridError;

    fn try_from(doc: MapDoc) -> Result<Self, Self::Error> {
        Grid::from_points(doc.height, doc.width, doc.points)
    }
}

// Everything needed to regenerate a map except the seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldParams {
    pub generator: GeneratorKind,
    pub iterations: usize,
    pub mix: FractureMix,
    pub percent_water: u32,
    pub percent_ice: u32,
}

impl From<&GenerationConfig> for WorldParams {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            generator: config.generator,
            iterations: config.iterations,
            mix: config.mix,
            percent_water: config.percent_water,
            percent_ice: config.percent_ice,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<ObjectId>,
    pub name: String,
    // seed bits reinterpreted as i64; BSON has no unsigned 64-bit integer
    pub seed: i64,
    pub params: WorldParams,
    pub map: MapDoc,
}

impl TerrainDoc {
    pub fn new(name: impl Into<String>, config: &GenerationConfig, grid: &Grid) -> Self {
        Self {
            id: None,
            name: name.into(),
            seed: config.seed as i64,
            params: WorldParams::from(config),
            map: MapDoc::from(grid),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed as u64
    }

    // Rebuild the config this document was generated from
    pub fn config(&self) -> GenerationConfig {
        GenerationConfig {
            height: self.map.height,
            width: self.map.width,
            seed: self.seed(),
            iterations: self.params.iterations,
            generator: self.params.generator,
            mix: self.params.mix,
            percent_water: self.params.percent_water,
            percent_ice: self.params.percent_ice,
        }
    }
}
