use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use models::prediction::PredictionRequest;

use crate::encoder::LabelEncoder;
use crate::errors::PredictorError;
use crate::forest::RandomForest;

pub const FORMAT_VERSION: u32 = 1;
pub const FEATURE_NAMES: [&str; 4] = ["founded_year", "funding_usd", "industry_encoded", "country_encoded"];

/// Trained model artifact: the forest plus the encoders needed to build its input rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub format_version: u32,
    pub trained_at: DateTime<Utc>,
    pub feature_names: Vec<String>,
    pub test_accuracy: f64,
    pub industry_encoder: LabelEncoder,
    pub country_encoder: LabelEncoder,
    pub forest: RandomForest,
}

impl ModelBundle {
    /// Feature row in training column order.
    pub fn encode(&self, founded_year: f64, funding_usd: f64, industry: &str, country: &str) -> Result<Vec<f64>, PredictorError> {
        Ok(vec![
            founded_year,
            funding_usd,
            self.industry_encoder.transform(industry)? as f64,
            self.country_encoder.transform(country)? as f64,
        ])
    }

    /// Probability that the described startup succeeds.
    pub fn success_probability(&self, req: &PredictionRequest) -> Result<f64, PredictorError> {
        let row = self.encode(
            req.founded_year.0 as f64,
            req.funding_usd.0 as f64,
            &req.industry,
            &req.country,
        )?;
        self.forest.predict_proba(&row)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, PredictorError> {
        let bundle: Self = serde_json::from_slice(bytes)?;
        if bundle.format_version != FORMAT_VERSION {
            return Err(PredictorError::InvalidModel(format!(
                "unsupported format version {}",
                bundle.format_version
            )));
        }
        if bundle.forest.n_features() != FEATURE_NAMES.len() {
            return Err(PredictorError::InvalidModel(format!(
                "forest expects {} features",
                bundle.forest.n_features()
            )));
        }
        bundle.industry_encoder.validate()?;
        bundle.country_encoder.validate()?;
        bundle.forest.validate()?;
        Ok(bundle)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PredictorError> {
        Self::from_slice(&std::fs::read(path)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PredictorError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_vec(self)?)?;
        Ok(())
    }
}
