use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::ServiceError;
use crate::remote::kv_store::{segments, RemoteStore};

/// Firebase Realtime Database over its REST API (`{db}/{path}.json`).
#[derive(Clone)]
pub struct FirebaseStore {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl FirebaseStore {
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let base_url = base_url.into();
        let base_url = Url::parse(&base_url)
            .map_err(|e| ServiceError::Remote(format!("invalid database url {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::Remote(format!("database url {base_url} cannot be a base")));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ServiceError::remote)?;
        Ok(Self { client, base_url, auth_token })
    }

    pub fn from_config(cfg: &configs::FirebaseConfig) -> Result<Self, ServiceError> {
        Self::new(
            cfg.database_url.clone(),
            cfg.auth_token.clone(),
            Duration::from_secs(cfg.request_timeout_secs),
        )
    }

    /// `{db}/{path}.json` with every segment percent-encoded. Relative segments are refused.
    pub fn url_for(&self, path: &str) -> Result<Url, ServiceError> {
        let parts: Vec<&str> = segments(path).collect();
        if let Some(seg) = parts.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(ServiceError::Remote(format!("relative segment {seg:?} in path {path:?}")));
        }

        let mut url = self.base_url.clone();
        {
            let mut out = url
                .path_segments_mut()
                .map_err(|_| ServiceError::Remote(format!("database url {} cannot be a base", self.base_url)))?;
            out.pop_if_empty();
            match parts.split_last() {
                Some((last, rest)) => {
                    out.extend(rest);
                    out.push(&format!("{last}.json"));
                }
                None => {
                    out.push(".json");
                }
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ServiceError> {
        let req = self.client.request(method, self.url_for(path)?);
        Ok(match &self.auth_token {
            Some(token) => req.query(&[("auth", token)]),
            None => req,
        })
    }

    async fn send(&self, req: RequestBuilder, path: &str) -> Result<Value, ServiceError> {
        let resp = req.send().await.map_err(ServiceError::remote)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Remote(format!("/{path} returned {status}: {body}")));
        }
        debug!(%path, %status, "firebase call ok");
        resp.json::<Value>().await.map_err(ServiceError::remote)
    }
}

#[async_trait]
impl RemoteStore for FirebaseStore {
    async fn get(&self, path: &str) -> Result<Value, ServiceError> {
        self.send(self.request(Method::GET, path)?, path).await
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), ServiceError> {
        self.send(self.request(Method::PUT, path)?.json(&value), path).await?;
        Ok(())
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), ServiceError> {
        self.send(self.request(Method::PATCH, path)?.json(&fields), path).await?;
        Ok(())
    }
}
