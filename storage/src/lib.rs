// storage persists generated maps: JSON files, MongoDB documents and PNG names

pub mod error;
pub mod json;
pub mod models;
pub mod mongo;
pub mod names;

pub use error::StorageError;
pub use json::JsonStore;
pub use models::{MapDoc, TerrainDoc, WorldParams};
pub use mongo::MapStore;
pub use names::unique_name;
