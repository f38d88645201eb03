use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use configs::AppConfig;
use tracing::{error, info};

use common::cors::frontend_cors;

use crate::bundle::ModelBundle;
use crate::routes::{self, PredictorState, ALLOW_CREDENTIALS, CORS_METHODS};

/// Load the model artifact; failures are logged and the service starts without a model.
pub fn load_model(path: &Path) -> Option<Arc<ModelBundle>> {
    match ModelBundle::load(path) {
        Ok(bundle) => {
            info!(
                path = %path.display(),
                trees = bundle.forest.trees().len(),
                test_accuracy = bundle.test_accuracy,
                trained_at = %bundle.trained_at,
                "AI model and encoders loaded"
            );
            Some(Arc::new(bundle))
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "AI model files not found or invalid; run train-model first");
            None
        }
    }
}

/// Public entry: load the model and serve the prediction API
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = PredictorState { model: load_model(&cfg.predictor.model_path) };
    let cors = frontend_cors(&cfg.cors.allowed_origins, &CORS_METHODS, ALLOW_CREDENTIALS)?;
    let app = routes::build_router(state, cors);

    let addr: SocketAddr = cfg.predictor.bind_addr().parse()?;
    info!(%addr, "prediction service is ready");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
