use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset. Prediction handlers log inputs at debug.
pub const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info,predictor::routes=debug";

/// Output format of the stdout subscriber.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON lines; anything else, or nothing, is compact.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Compact,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = fmt().with_env_filter(filter).with_target(false).with_writer(io::stdout);
    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    };
}

pub fn init_logging_from_env() {
    init_logging(LogFormat::from_env());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_env_value() {
        assert_eq!(LogFormat::parse(None), LogFormat::Compact);
        assert_eq!(LogFormat::parse(Some("JSON ")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("pretty")), LogFormat::Compact);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging(LogFormat::Compact);
        init_logging(LogFormat::Json);
        tracing::info!("still logging");
    }
}
