//! Train the startup-success model from a CSV dataset.
//!
//! Usage: `train-model [DATASET_CSV] [OUTPUT_JSON]`; defaults come from the
//! `[training]` and `[predictor]` config sections.

use std::path::PathBuf;

use dotenvy::dotenv;
use tracing::{error, info};

use predictor::dataset::load_csv;
use predictor::forest::ForestParams;
use predictor::training::train;

fn run() -> anyhow::Result<()> {
    let cfg = configs::AppConfig::load_and_validate()?;
    let mut args = std::env::args().skip(1);
    let dataset = args.next().map(PathBuf::from).unwrap_or_else(|| cfg.training.dataset_path.clone());
    let output = args.next().map(PathBuf::from).unwrap_or_else(|| cfg.predictor.model_path.clone());

    let records = load_csv(&dataset)?;
    info!(service = "train-model", event = "dataset_loaded", path = %dataset.display(), rows = records.len(), "dataset loaded");

    let params = ForestParams::from(&cfg.training);
    let report = train(&records, &params, cfg.training.test_size)?;
    report.bundle.save(&output)?;

    info!(
        service = "train-model",
        event = "saved",
        path = %output.display(),
        train_rows = report.train_rows,
        test_rows = report.test_rows,
        accuracy_pct = %format!("{:.2}", report.bundle.test_accuracy * 100.0),
        "model and encoders saved"
    );
    Ok(())
}

fn main() -> std::process::ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    match run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "train-model", event = "failed", error = %e, "training failed");
            std::process::ExitCode::FAILURE
        }
    }
}
