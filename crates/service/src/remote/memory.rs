use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::remote::kv_store::{segments, RemoteStore};

/// In-process JSON tree with the same path semantics as the Realtime Database.
/// Writing `null` removes the key.
#[derive(Default)]
pub struct MemoryStore {
    root: RwLock<Value>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_data(root: Value) -> Self {
        Self { root: RwLock::new(root) }
    }

    /// Full tree snapshot.
    pub async fn snapshot(&self) -> Value {
        self.root.read().await.clone()
    }
}

fn node_mut<'a>(root: &'a mut Value, path: &str) -> &'a mut Value {
    segments(path).fold(root, |node, seg| {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        match node {
            Value::Object(map) => map.entry(seg.to_string()).or_insert(Value::Null),
            _ => unreachable!("node was just made an object"),
        }
    })
}

fn prune(root: &mut Value, path: &str) {
    let segs: Vec<&str> = segments(path).collect();
    let Some((last, parents)) = segs.split_last() else {
        *root = Value::Null;
        return;
    };
    let mut node = root;
    for seg in parents {
        match node.get_mut(*seg) {
            Some(next) => node = next,
            None => return,
        }
    }
    if let Value::Object(map) = node {
        map.remove(*last);
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Value, ServiceError> {
        let root = self.root.read().await;
        let found = segments(path).try_fold(&*root, |node, seg| node.get(seg));
        Ok(found.cloned().unwrap_or(Value::Null))
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), ServiceError> {
        let mut root = self.root.write().await;
        if value.is_null() {
            prune(&mut root, path);
        } else {
            *node_mut(&mut root, path) = value;
        }
        Ok(())
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), ServiceError> {
        let mut root = self.root.write().await;
        let node = node_mut(&mut root, path);
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        if let Value::Object(map) = node {
            for (k, v) in fields {
                if v.is_null() {
                    map.remove(&k);
                } else {
                    map.insert(k, v);
                }
            }
        }
        Ok(())
    }
}
