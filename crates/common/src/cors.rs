//! CORS policy shared by the HTTP services.

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Allow only the configured frontend origins. `allow_credentials` controls whether
/// cookies and auth headers may be sent cross-origin.
pub fn frontend_cors(origins: &[String], methods: &[Method], allow_credentials: bool) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o.trim()).map_err(|e| anyhow::anyhow!("invalid CORS origin {o:?}: {e}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(allow_credentials)
        .allow_methods(methods.to_vec())
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_origins() {
        let bad = vec!["http://ok.example".to_string(), "bad\norigin".to_string()];
        assert!(frontend_cors(&bad, &[Method::GET], true).is_err());
        let good = vec!["http://localhost:5173".to_string()];
        assert!(frontend_cors(&good, &[Method::GET, Method::POST], false).is_ok());
    }
}
