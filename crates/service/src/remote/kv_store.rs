use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// Trait abstraction for a hierarchical JSON store addressed by `/`-separated paths.
/// Implementations can be the Firebase REST API, an in-memory tree, or a test double.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Value stored at `path`; `Value::Null` when nothing is there.
    async fn get(&self, path: &str) -> Result<Value, ServiceError>;
    /// Replace the value at `path`.
    async fn set(&self, path: &str, value: Value) -> Result<(), ServiceError>;
    /// Shallow-merge `fields` into the object at `path`.
    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), ServiceError>;
}

pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
