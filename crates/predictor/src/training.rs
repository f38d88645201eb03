use chrono::Utc;
use tracing::info;

use crate::bundle::{ModelBundle, FEATURE_NAMES, FORMAT_VERSION};
use crate::dataset::{train_test_split, StartupRecord};
use crate::encoder::LabelEncoder;
use crate::errors::PredictorError;
use crate::forest::{ForestParams, RandomForest};

#[derive(Clone, Debug)]
pub struct TrainingReport {
    pub bundle: ModelBundle,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Fit encoders on all records, split, train the forest and score it on the held-out rows.
pub fn train(records: &[StartupRecord], params: &ForestParams, test_size: f64) -> Result<TrainingReport, PredictorError> {
    let industry_encoder = LabelEncoder::fit("industry", records.iter().map(|r| r.industry.clone()));
    let country_encoder = LabelEncoder::fit("country", records.iter().map(|r| r.country.clone()));

    let mut rows = Vec::with_capacity(records.len());
    let mut labels = Vec::with_capacity(records.len());
    for r in records {
        rows.push(vec![
            r.founded_year,
            r.funding_usd,
            industry_encoder.transform(&r.industry)? as f64,
            country_encoder.transform(&r.country)? as f64,
        ]);
        labels.push(r.succeeded());
    }
    info!(rows = rows.len(), industries = industry_encoder.classes().len(), countries = country_encoder.classes().len(), "data preprocessing complete");

    let pairs: Vec<(Vec<f64>, bool)> = rows.into_iter().zip(labels).collect();
    let (train, test) = train_test_split(&pairs, test_size, params.seed)?;
    let (train_x, train_y): (Vec<_>, Vec<_>) = train.into_iter().unzip();
    let (test_x, test_y): (Vec<_>, Vec<_>) = test.into_iter().unzip();

    info!(train_rows = train_x.len(), n_estimators = params.n_estimators, "training random forest");
    let forest = RandomForest::fit(&train_x, &train_y, params)?;
    let test_accuracy = forest.score(&test_x, &test_y)?;
    info!(accuracy_pct = %format!("{:.2}", test_accuracy * 100.0), "model accuracy on test data");

    Ok(TrainingReport {
        bundle: ModelBundle {
            format_version: FORMAT_VERSION,
            trained_at: Utc::now(),
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            test_accuracy,
            industry_encoder,
            country_encoder,
            forest,
        },
        train_rows: train_x.len(),
        test_rows: test_x.len(),
    })
}
