use crate::{error::AppError, models::paste::Paste};
use sled::Db;
use std::sync::Arc;

/// Paste tree keyed by id, bincode-encoded.
pub struct PasteDb {
    tree: sled::Tree,
}

impl PasteDb {
    pub fn new(db: Arc<Db>) -> Result<Self, AppError> {
        let tree = db.open_tree("pastes")?;
        Ok(Self { tree })
    }

    pub fn create(&self, paste: &Paste) -> Result<(), AppError> {
        let value = bincode::serialize(paste)?;
        self.tree.insert(paste.id.as_bytes(), value)?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<Paste>, AppError> {
        Ok(self
            .tree
            .get(id.as_bytes())?
            .map(|v| bincode::deserialize(&v))
            .transpose()?)
    }

    pub fn exists(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.tree.contains_key(id.as_bytes())?)
    }

    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.tree.remove(id.as_bytes())?.is_some())
    }
}
