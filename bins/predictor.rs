use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = "predictor", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "predictor",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "predictor", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    let worker_threads = cfg.predictor.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "predictor", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "predictor",
        event = "start",
        %service_id,
        pid,
        version,
        model_path = %cfg.predictor.model_path.display(),
        "prediction service starting"
    );

    rt.block_on(async move {
        tokio::select! {
            res = predictor::run(cfg) => {
                match res {
                    Ok(()) => {
                        info!(service = "predictor", event = "stop", %service_id, pid, "predictor stopped normally");
                        std::process::ExitCode::SUCCESS
                    }
                    Err(e) => {
                        error!(service = "predictor", event = "run_failed", error = %e, "predictor::run returned error");
                        std::process::ExitCode::FAILURE
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!(service = "predictor", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
                std::process::ExitCode::SUCCESS
            }
        }
    })
}
