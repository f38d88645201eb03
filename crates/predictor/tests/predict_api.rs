use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::cors::frontend_cors;
use predictor::dataset::read_records;
use predictor::forest::ForestParams;
use predictor::routes::{build_router, PredictorState, ALLOW_CREDENTIALS, CORS_METHODS};
use predictor::training::train;

fn dataset_csv() -> String {
    let mut csv = String::from("name,founded_year,funding_usd,industry,country,status\n");
    for i in 0..40 {
        let (industry, status, funding) = if i % 2 == 0 {
            ("IT", "Succeeded", 4_000_000 + i * 10_000)
        } else {
            ("Retail", "Failed", 20_000 + i * 100)
        };
        let country = if i % 3 == 0 { "USA" } else { "India" };
        csv.push_str(&format!("s{i},{},{funding},{industry},{country},{status}\n", 2008 + i % 12));
    }
    csv
}

fn app(model_loaded: bool) -> anyhow::Result<Router> {
    let model = if model_loaded {
        let records = read_records(dataset_csv().as_bytes())?;
        let params = ForestParams { n_estimators: 10, ..ForestParams::default() };
        Some(Arc::new(train(&records, &params, 0.2)?.bundle))
    } else {
        None
    };
    let cors = frontend_cors(&["http://localhost:5173".to_string()], &CORS_METHODS, ALLOW_CREDENTIALS)?;
    Ok(build_router(PredictorState { model }, cors))
}

async fn post_predict(app: &Router, body: Body) -> anyhow::Result<(StatusCode, Value)> {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/predict-success")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)?;
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

fn json_body(v: Value) -> anyhow::Result<Body> {
    Ok(Body::from(serde_json::to_vec(&v)?))
}

#[tokio::test]
async fn predicts_probability_for_known_categories() -> anyhow::Result<()> {
    let app = app(true)?;
    let (status, body) = post_predict(
        &app,
        json_body(json!({"founded_year": 2016, "funding_usd": "5000000", "industry": "IT", "country": "USA"}))?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let p = body["success_probability"].as_f64().unwrap_or(-1.0);
    assert!(p > 0.5 && p <= 1.0, "unexpected probability {p}");

    let (_, body) = post_predict(
        &app,
        json_body(json!({"founded_year": 2016, "funding_usd": 30000, "industry": "Retail", "country": "India"}))?,
    )
    .await?;
    assert!(body["success_probability"].as_f64().unwrap_or(1.0) < 0.5);
    Ok(())
}

#[tokio::test]
async fn invalid_inputs_return_400() -> anyhow::Result<()> {
    let app = app(true)?;
    let expected = json!({"error": "Invalid input data for prediction. Please check the values."});

    let unknown = json_body(json!({"founded_year": 2016, "funding_usd": 1, "industry": "Space", "country": "USA"}))?;
    assert_eq!(post_predict(&app, unknown).await?, (StatusCode::BAD_REQUEST, expected.clone()));

    let missing = json_body(json!({"industry": "IT"}))?;
    assert_eq!(post_predict(&app, missing).await?, (StatusCode::BAD_REQUEST, expected.clone()));

    let not_int = json_body(json!({"founded_year": "last year", "funding_usd": 1, "industry": "IT", "country": "USA"}))?;
    assert_eq!(post_predict(&app, not_int).await?, (StatusCode::BAD_REQUEST, expected.clone()));

    assert_eq!(post_predict(&app, Body::from("{not json")).await?, (StatusCode::BAD_REQUEST, expected));
    Ok(())
}

#[tokio::test]
async fn missing_model_returns_500() -> anyhow::Result<()> {
    let app = app(false)?;
    let body = json_body(json!({"founded_year": 2016, "funding_usd": 1, "industry": "IT", "country": "USA"}))?;
    let (status, body) = post_predict(&app, body).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "AI model is not loaded on the server.");
    Ok(())
}

#[tokio::test]
async fn health_reports_model_state() -> anyhow::Result<()> {
    for loaded in [true, false] {
        let resp = app(loaded)?
            .oneshot(Request::builder().uri("/health").body(Body::empty())?)
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        assert_eq!(body["model_loaded"], loaded);
    }
    Ok(())
}

#[tokio::test]
async fn cors_is_scoped_to_api_routes() -> anyhow::Result<()> {
    let app = app(true)?;
    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/predict-success")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())?;
    let resp = app.clone().oneshot(preflight).await?;
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());

    let health = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())?;
    let resp = app.oneshot(health).await?;
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    Ok(())
}
