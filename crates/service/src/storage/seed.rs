use std::path::Path;

use serde_json::{Map, Value};
use tokio::fs;
use tracing::info;

use crate::errors::ServiceError;

/// Static seed records keyed by collection name, loaded from a JSON file.
#[derive(Clone, Debug, Default)]
pub struct SeedData {
    sections: Map<String, Value>,
}

impl SeedData {
    /// Load the seed file. A missing file or malformed JSON is an error so that
    /// startup fails loudly instead of serving an empty catalog.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .await
            .map_err(|e| ServiceError::Seed(format!("seed file {} not readable: {e}", path.display())))?;
        let seed = Self::from_slice(&bytes)
            .map_err(|e| ServiceError::Seed(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), sections = seed.sections.len(), "seed data loaded");
        Ok(seed)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ServiceError> {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(sections)) => Ok(Self { sections }),
            Ok(_) => Err(ServiceError::Seed("top-level value must be a JSON object".into())),
            Err(e) => Err(ServiceError::Seed(format!("invalid JSON: {e}"))),
        }
    }

    pub fn from_map(sections: Map<String, Value>) -> Self {
        Self { sections }
    }

    /// Records for `collection`, only when the section is a JSON object.
    pub fn section(&self, collection: &str) -> Option<&Map<String, Value>> {
        self.sections.get(collection).and_then(Value::as_object)
    }
}
