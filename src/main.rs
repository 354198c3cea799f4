use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod config;
mod database;
mod error;
mod handlers;
mod sanitize;
mod validate;

use handlers::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    let config = config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Noteful API in {:?} mode", config.environment);

    let pool = database::connect().await.expect("database pool");
    let app = app(AppState::new(pool));

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Noteful API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(folder_routes())
        .merge(note_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn folder_routes() -> Router<AppState> {
    use handlers::folders;

    Router::new()
        .route("/folders", get(folders::list).post(folders::create))
        .route(
            "/folders/:folder_id",
            get(folders::get)
                .patch(folders::update)
                .delete(folders::delete),
        )
}

fn note_routes() -> Router<AppState> {
    use handlers::notes;

    Router::new()
        .route("/notes", get(notes::list).post(notes::create))
        .route(
            "/notes/:note_id",
            get(notes::get).patch(notes::update).delete(notes::delete),
        )
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Noteful API",
        "version": version,
        "description": "Folders and notes REST backend built with Rust (Axum)",
        "endpoints": {
            "health": "/health",
            "folders": "/folders[/:folder_id]",
            "notes": "/notes[/:note_id]",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
