use axum::{
    extract::{State, WebSocketUpgrade},
    http::Method,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use dashmap::DashMap;
use serde::Serialize;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod game;
mod protocol;
mod score;
mod transport;

use game::session::GameSession;
use score::HighScoreStore;

struct AppState {
    sessions: DashMap<Uuid, Arc<GameSession>>,
    scores: HighScoreStore,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    ok: bool,
    sessions: usize,
}

#[derive(Debug, Serialize)]
struct HighScoreResponse {
    #[serde(rename = "highScore")]
    high_score: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
        let base = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let default_path = base.join("data").join("highscore.db");
        format!("sqlite://{}", default_path.display())
    });

    let db = match open_database(&database_url).await {
        Ok(pool) => Some(pool),
        Err(error) => {
            tracing::warn!(%error, "high score database unavailable, scores are in-memory only");
            None
        }
    };
    let scores = HighScoreStore::open(db).await;

    let state = Arc::new(AppState {
        sessions: DashMap::new(),
        scores,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let app: Router = Router::new()
        .route("/api/health", get(health))
        .route("/api/highscore", get(high_score))
        .route("/api/game", get(ws_handler))
        .layer(cors)
        .with_state(state);

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(8787);

    let address = format!("0.0.0.0:{port}");
    tracing::info!("listening on {address}");

    let listener = tokio::net::TcpListener::bind(&address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn open_database(database_url: &str) -> anyhow::Result<SqlitePool> {
    ensure_db_dir(database_url)?;
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

fn ensure_db_dir(database_url: &str) -> anyhow::Result<()> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"));
    let Some(path) = path else { return Ok(()) };
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }
    let db_path = PathBuf::from(path);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !db_path.exists() {
        std::fs::File::create(&db_path)?;
    }
    Ok(())
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        sessions: state.sessions.len(),
    })
}

async fn high_score(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HighScoreResponse {
        high_score: state.scores.current(),
    })
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        let session_id = Uuid::new_v4();
        let session = Arc::new(GameSession::new(state.scores.clone()));
        state.sessions.insert(session_id, Arc::clone(&session));
        transport::ws_session::handle_socket(socket, session).await;
        state.sessions.remove(&session_id);
    })
}
