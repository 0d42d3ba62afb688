use bson::doc;
use futures_util::stream::TryStreamExt;
use mongodb::{Client, Collection, IndexModel, options::ClientOptions};

use crate::error::StorageError;
use crate::models::TerrainDoc;

// Generated maps in a MongoDB collection, one document per (name, seed)
pub struct MapStore {
    col: Collection<TerrainDoc>,
}

impl MapStore {
    // Connect and make sure the (name, seed) index exists
    pub async fn init(uri: &str, db_name: &str, col_name: &str) -> Result<Self, StorageError> {
        let mut opts = ClientOptions::parse(uri).await?;
        opts.app_name = Some("worldgen".to_string());
        let client = Client::with_options(opts)?;
        let col = client.database(db_name).collection(col_name);

        let index_model = IndexModel::builder()
            .keys(doc! { "name": 1, "seed": 1 })
            .build();
        col.create_index(index_model).await?;

        tracing::info!(target: "worldgen::storage", db = db_name, collection = col_name, "mongo.init");
        Ok(Self { col })
    }

    pub async fn list_names(&self) -> Result<Vec<String>, StorageError> {
        let mut cursor = self.col.find(doc! {}).await?;
        let mut names = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            names.push(doc.name);
        }
        Ok(names)
    }

    pub async fn read_by_name(&self, name: &str) -> Result<Option<TerrainDoc>, StorageError> {
        Ok(self.col.find_one(doc! { "name": name }).await?)
    }

    // Insert a map, replacing any earlier one with the same name and seed
    pub async fn create(&self, terrain: TerrainDoc) -> Result<(), StorageError> {
        let filter = doc! {
            "name": &terrain.name,
            "seed": terrain.seed,
        };
        self.col.delete_one(filter).await?;

        tracing::info!(
            target: "worldgen::storage",
            name = %terrain.name,
            seed = format_args!("{:x}", terrain.seed()),
            "mongo.create"
        );
        self.col.insert_one(terrain).await?;
        Ok(())
    }

    pub async fn read_by_seed(&self, seed: u64) -> Result<Option<TerrainDoc>, StorageError> {
        Ok(self.col.find_one(doc! { "seed": seed as i64 }).await?)
    }

    pub async fn delete_by_seed(&self, seed: u64) -> Result<(), StorageError> {
        self.col.delete_many(doc! { "seed": seed as i64 }).await?;
        Ok(())
    }
}
