use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub predictor: PredictorConfig,
    #[serde(default)]
    pub training: TrainingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirebaseConfig {
    #[serde(default)]
    pub database_url: String,
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Client config JSON exported from the Firebase console; its `databaseURL` is used when `database_url` is empty.
    #[serde(default)]
    pub config_path: Option<PathBuf>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            auth_token: None,
            config_path: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_seed_path")]
    pub seed_path: PathBuf,
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { seed_path: default_seed_path(), backup_dir: default_backup_dir() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { allowed_origins: default_allowed_origins() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
            model_path: default_model_path(),
            worker_threads: Some(2),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,
    #[serde(default = "default_n_estimators")]
    pub n_estimators: usize,
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default = "default_min_samples_split")]
    pub min_samples_split: usize,
    #[serde(default = "default_test_size")]
    pub test_size: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            n_estimators: default_n_estimators(),
            max_depth: None,
            min_samples_split: default_min_samples_split(),
            test_size: default_test_size(),
            seed: default_seed(),
        }
    }
}

fn default_request_timeout() -> u64 { 10 }
fn default_seed_path() -> PathBuf { PathBuf::from("data/dummy-data.json") }
fn default_backup_dir() -> PathBuf { PathBuf::from("data/backups") }
fn default_allowed_origins() -> Vec<String> { vec!["http://localhost:5173".to_string()] }
fn default_model_path() -> PathBuf { PathBuf::from("data/startup_success_model.json") }
fn default_dataset_path() -> PathBuf { PathBuf::from("data/startup_data.csv") }
fn default_n_estimators() -> usize { 100 }
fn default_min_samples_split() -> usize { 2 }
fn default_test_size() -> f64 { 0.2 }
fn default_seed() -> u64 { 42 }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(config_path())
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults when the
    /// file is absent, then apply env overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if Path::new(&path).exists() {
            load_from_file(&path).with_context(|| format!("failed to parse {path}"))?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.predictor.normalize()?;
        self.firebase.normalize_from_env()?;
        self.training.validate()?;
        if self.cors.allowed_origins.iter().any(|o| o.trim().is_empty()) {
            return Err(anyhow!("cors.allowed_origins must not contain empty entries"));
        }
        Ok(())
    }
}

fn env_port(name: &str) -> Option<u16> {
    std::env::var(name).ok().and_then(|p| p.parse::<u16>().ok())
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = env_port("SERVER_PORT") {
            self.port = port;
        }
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) || self.worker_threads.is_none() {
            self.worker_threads = Some(4);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl PredictorConfig {
    fn normalize(&mut self) -> Result<()> {
        if let Some(port) = env_port("PREDICTOR_PORT") {
            self.port = port;
        }
        if let Ok(path) = std::env::var("MODEL_PATH") {
            self.model_path = PathBuf::from(path);
        }
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("predictor.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = Some(2);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Deserialize)]
struct FirebaseClientConfig {
    #[serde(rename = "databaseURL")]
    database_url: Option<String>,
}

impl FirebaseConfig {
    /// Fill missing fields from the env and the optional client config file.
    pub fn normalize_from_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("FIREBASE_DATABASE_URL") {
            self.database_url = url;
        }
        if let Ok(token) = std::env::var("FIREBASE_AUTH_TOKEN") {
            self.auth_token = Some(token);
        }
        self.resolve_from_files()
    }

    /// Read `databaseURL` from `config_path` when no URL is set, then trim both fields.
    /// Does not consult the environment.
    pub fn resolve_from_files(&mut self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            if let Some(path) = &self.config_path {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("firebase config not found: {}", path.display()))?;
                let client: FirebaseClientConfig = serde_json::from_str(&content)
                    .with_context(|| format!("invalid firebase config JSON: {}", path.display()))?;
                self.database_url = client.database_url.unwrap_or_default();
            }
        }
        self.database_url = self.database_url.trim().trim_end_matches('/').to_string();
        if self.auth_token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            self.auth_token = None;
        }
        Ok(())
    }

    /// Required by the backend only; the predictor never talks to Firebase.
    pub fn validate(&self) -> Result<()> {
        if self.database_url.is_empty() {
            return Err(anyhow!(
                "firebase.database_url is empty; set it in config.toml, firebase.config_path or FIREBASE_DATABASE_URL"
            ));
        }
        let lower = self.database_url.to_lowercase();
        if !(lower.starts_with("https://") || lower.starts_with("http://")) {
            return Err(anyhow!("firebase.database_url must start with http:// or https://"));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("firebase.request_timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(anyhow!("training.n_estimators must be >= 1"));
        }
        if self.min_samples_split < 2 {
            return Err(anyhow!("training.min_samples_split must be >= 2"));
        }
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(anyhow!("training.test_size must be in (0, 1)"));
        }
        Ok(())
    }
}
