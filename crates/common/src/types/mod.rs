use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Health payload for services that depend on a loaded artifact.
#[derive(Serialize, Deserialize, Debug)]
pub struct ServiceHealth {
    pub status: &'static str,
    pub model_loaded: bool,
}
