use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod routes;

/// Server state
///
/// Only the database location is shared; every request opens its own store.
pub struct AppState {
    pub database_path: PathBuf,
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(database_path: PathBuf) -> Self {
        Self { database_path, static_dir: None }
    }

    pub fn with_static_dir(mut self, dir: PathBuf) -> Self {
        self.static_dir = Some(dir);
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    let static_dir = state.static_dir.clone();

    let router = Router::new()
        .route("/health", get(routes::health))
        .route("/match", get(routes::get_page).post(routes::post_page))
        .route("/leagues", get(routes::get_leagues))
        .route("/league-pairs", get(routes::get_league_pairs))
        .route("/unmatched", get(routes::get_unmatched))
        .route("/stats", get(routes::get_stats));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

pub async fn start_server(port: u16, state: AppState) -> anyhow::Result<()> {
    let database_path = state.database_path.clone();
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {} (database {:?})", addr, database_path);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
