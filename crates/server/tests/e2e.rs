use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use uuid::Uuid;

use configs::AppConfig;

type Tree = Arc<Mutex<Value>>;

/// Realtime Database stand-in: GET returns the stored subtree, PUT stores under `contact_messages`.
async fn start_fake_firebase(initial: Value) -> anyhow::Result<(String, Tree)> {
    let tree: Tree = Arc::new(Mutex::new(initial));
    let app = Router::new()
        .route(
            "/*path",
            get(|State(t): State<Tree>, Path(p): Path<String>| async move {
                let key = p.trim_end_matches(".json").to_string();
                let tree = t.lock().await;
                Json(tree.get(&key).cloned().unwrap_or(Value::Null))
            })
            .put(|State(t): State<Tree>, Path(p): Path<String>, Json(body): Json<Value>| async move {
                let key = p.trim_end_matches(".json").to_string();
                let mut tree = t.lock().await;
                if let Some((collection, id)) = key.split_once('/') {
                    tree[collection][id] = body.clone();
                }
                Json(body)
            }),
        )
        .with_state(tree.clone());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("fake firebase error: {}", e); }
    });
    Ok((format!("http://{}", addr), tree))
}

struct TestApp {
    base_url: String,
    tree: Tree,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let (firebase_url, tree) = start_fake_firebase(json!({
        "ideas": {"live": {"title": "Solar kiosk"}}
    }))
    .await?;

    let temp_id = Uuid::new_v4();
    let data_dir = std::env::temp_dir().join(format!("backend_e2e_{}", temp_id));
    tokio::fs::create_dir_all(&data_dir).await?;
    let seed_path = data_dir.join("dummy-data.json");
    tokio::fs::write(&seed_path, serde_json::to_vec(&json!({
        "ideas": {"seed": {"title": "Book swap"}},
        "students": {}
    }))?)
    .await?;

    let mut cfg = AppConfig::default();
    cfg.firebase.database_url = firebase_url;
    cfg.data.seed_path = seed_path;
    cfg.data.backup_dir = data_dir.join("backups");

    let app = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Ok(TestApp { base_url: format!("http://{}:{}", addr.ip(), addr.port()), tree })
}

#[tokio::test]
async fn e2e_ideas_merge_seed_with_remote() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/ideas", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["seed"]["title"], "Book swap");
    assert_eq!(body["live"]["title"], "Solar kiosk");
    Ok(())
}

#[tokio::test]
async fn e2e_contact_submission_reaches_remote_store() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new()
        .post(format!("{}/api/contact", app.base_url))
        .json(&json!({"name": "Lin", "email": "lin@example.com", "subject": "Hi", "message": "Hello"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    let id = body["messageId"].as_str().unwrap_or_default().to_string();

    let tree = app.tree.lock().await;
    assert_eq!(tree["contact_messages"][&id]["email"], "lin@example.com");
    assert_eq!(tree["contact_messages"][&id]["status"], "new");
    Ok(())
}

#[tokio::test]
async fn e2e_startup_fails_without_seed_file() -> anyhow::Result<()> {
    let mut cfg = AppConfig::default();
    cfg.firebase.database_url = "http://127.0.0.1:9".into();
    cfg.data.seed_path = std::env::temp_dir().join(format!("missing_{}.json", Uuid::new_v4()));
    cfg.data.backup_dir = std::env::temp_dir().join(format!("backups_{}", Uuid::new_v4()));
    assert!(server::startup::build_app(&cfg).await.is_err());
    Ok(())
}

#[tokio::test]
async fn e2e_startup_requires_database_url() -> anyhow::Result<()> {
    let cfg = AppConfig::default();
    assert!(server::startup::build_app(&cfg).await.is_err());
    Ok(())
}
