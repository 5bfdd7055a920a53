use axum::{
    extract::{Form, Query, State},
    Json,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use crate::server::AppState;
use crate::matching::{MatchDesk, PageRequest, PageView, RawPageParams, UnmatchedSetResolver};
use crate::model::{LeagueListing, LeaguePairView, Source, UnmatchedTeams};
use crate::storage::{DbStats, SqliteStore};
use std::sync::Arc;
use std::str::FromStr;

#[derive(Deserialize)]
pub struct SourceParams {
    pub source: String,
}

#[derive(Deserialize)]
pub struct PairParams {
    pub league_pair: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn error_response(status: StatusCode, message: impl std::fmt::Display) -> ApiError {
    (status, Json(ErrorResponse { error: message.to_string() }))
}

/// Run a store operation on the blocking pool against a fresh connection
async fn with_store<T, F>(state: &Arc<AppState>, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&SqliteStore) -> crate::Result<T> + Send + 'static,
{
    let path = state.database_path.clone();
    tokio::task::spawn_blocking(move || {
        let store = SqliteStore::open(&path)?;
        f(&store)
    })
    .await
    .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, e))?
    .map_err(|e| {
        tracing::error!("Request failed: {}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e)
    })
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn render_page(state: Arc<AppState>, params: RawPageParams) -> ApiResult<PageView> {
    let request = PageRequest::from_raw(&params);
    let view = with_store(&state, move |store| MatchDesk::new(store).handle(&request)).await?;
    Ok(Json(view))
}

pub async fn get_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RawPageParams>,
) -> ApiResult<PageView> {
    render_page(state, params).await
}

pub async fn post_page(
    State(state): State<Arc<AppState>>,
    Form(params): Form<RawPageParams>,
) -> ApiResult<PageView> {
    render_page(state, params).await
}

pub async fn get_leagues(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SourceParams>,
) -> ApiResult<Vec<LeagueListing>> {
    let source = Source::from_str(&params.source)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?;

    let leagues = with_store(&state, move |store| store.list_leagues(source)).await?;
    Ok(Json(leagues))
}

pub async fn get_league_pairs(State(state): State<Arc<AppState>>) -> ApiResult<Vec<LeaguePairView>> {
    let pairs = with_store(&state, |store| store.list_league_associations()).await?;
    Ok(Json(pairs))
}

pub async fn get_unmatched(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PairParams>,
) -> ApiResult<UnmatchedTeams> {
    let selection = params.league_pair.unwrap_or_default();
    let unmatched = with_store(&state, move |store| {
        UnmatchedSetResolver::new(store).unmatched_for_selection(&selection)
    })
    .await?;
    Ok(Json(unmatched))
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<DbStats> {
    let stats = with_store(&state, |store| store.stats()).await?;
    Ok(Json(stats))
}
