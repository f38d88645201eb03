use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use common::observability::REMOTE_STORE_ERRORS_TOTAL;

use crate::remote::RemoteStore;
use crate::storage::seed::SeedData;

pub const ADVERTISEMENTS: &str = "advertisements";
pub const IDEAS: &str = "ideas";
pub const STUDENTS: &str = "students";
pub const CONTACT_MESSAGES: &str = "contact_messages";

/// Read side of the backend: seed records overlaid with live records.
#[derive(Clone)]
pub struct CatalogService {
    seed: Arc<SeedData>,
    remote: Arc<dyn RemoteStore>,
}

impl CatalogService {
    pub fn new(seed: Arc<SeedData>, remote: Arc<dyn RemoteStore>) -> Self {
        Self { seed, remote }
    }

    /// Seed section for `collection`, with live entries from `/{collection}` winning on key
    /// conflicts. A failing remote store degrades to the seed records only.
    pub async fn merged(&self, collection: &str) -> Map<String, Value> {
        let mut merged = match self.seed.section(collection) {
            Some(section) => section.clone(),
            None => {
                debug!(%collection, "no seed section for collection");
                Map::new()
            }
        };

        match self.remote.get(collection).await {
            Ok(Value::Object(live)) => merged.extend(live),
            Ok(Value::Null) => info!(%collection, "no live data in remote store"),
            Ok(other) => warn!(%collection, kind = json_kind(&other), "remote store returned non-object data"),
            Err(e) => {
                REMOTE_STORE_ERRORS_TOTAL.inc();
                error!(%collection, error = %e, "failed to read live data; serving seed data only");
            }
        }
        merged
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ServiceError;
    use crate::remote::memory::MemoryStore;
    use async_trait::async_trait;
    use serde_json::json;

    struct DownStore;

    #[async_trait]
    impl RemoteStore for DownStore {
        async fn get(&self, _: &str) -> Result<Value, ServiceError> { Err(ServiceError::Remote("down".into())) }
        async fn set(&self, _: &str, _: Value) -> Result<(), ServiceError> { Err(ServiceError::Remote("down".into())) }
        async fn update(&self, _: &str, _: Map<String, Value>) -> Result<(), ServiceError> { Err(ServiceError::Remote("down".into())) }
    }

    fn seed() -> Arc<SeedData> {
        let v = json!({
            "ideas": {"i1": {"title": "seed one"}, "i2": {"title": "seed two"}},
            "students": ["not", "an", "object"]
        });
        Arc::new(SeedData::from_map(v.as_object().cloned().unwrap_or_default()))
    }

    #[tokio::test]
    async fn live_records_override_seed_on_key_conflict() {
        let remote = MemoryStore::with_data(json!({
            "ideas": {"i2": {"title": "live two"}, "i3": {"title": "live three"}}
        }));
        let svc = CatalogService::new(seed(), Arc::new(remote));
        let ideas = svc.merged(IDEAS).await;
        assert_eq!(ideas.len(), 3);
        assert_eq!(ideas["i1"]["title"], "seed one");
        assert_eq!(ideas["i2"]["title"], "live two");
        assert_eq!(ideas["i3"]["title"], "live three");
    }

    #[tokio::test]
    async fn non_object_sections_and_live_values_are_ignored() {
        let remote = MemoryStore::with_data(json!({"students": "oops"}));
        let svc = CatalogService::new(seed(), Arc::new(remote));
        assert!(svc.merged(STUDENTS).await.is_empty());
        assert!(svc.merged(ADVERTISEMENTS).await.is_empty());
    }

    #[tokio::test]
    async fn remote_failure_degrades_to_seed() {
        let svc = CatalogService::new(seed(), Arc::new(DownStore));
        let ideas = svc.merged(IDEAS).await;
        assert_eq!(ideas.len(), 2);
    }
}
