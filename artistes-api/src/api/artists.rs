//! Artist CRUD and search endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use artistes_common::{Artist, ArtistInput};

use crate::error::ApiResult;
use crate::AppState;

/// Query parameters for name search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Name fragment; omitted means match everything
    #[serde(default)]
    pub name: String,
}

/// GET /api/artistes
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<Vec<Artist>>> {
    let artists = state.service.list_all().await?;
    Ok(Json(artists))
}

/// GET /api/artistes/:id
pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Artist>> {
    let artist = state.service.get_by_id(&id).await?;
    Ok(Json(artist))
}

/// POST /api/artistes
///
/// Returns 201 with a `Location` header pointing at the new record.
pub async fn create_artist(
    State(state): State<AppState>,
    Json(input): Json<ArtistInput>,
) -> ApiResult<Response> {
    let artist = state.service.add(input).await?;
    let location = format!("/api/artistes/{}", artist.id);

    info!("Created artist {} at {}", artist.name, location);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(artist),
    )
        .into_response())
}

/// PUT /api/artistes/:id
pub async fn update_artist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ArtistInput>,
) -> ApiResult<StatusCode> {
    state.service.update(&id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/artistes/:id
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/artistes/search?name=
pub async fn search_artists(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Artist>>> {
    let artists = state.service.search(&query.name).await?;
    Ok(Json(artists))
}

/// Build artist routes
///
/// `/search` is a static segment and takes priority over `/:id`.
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/api/artistes", get(list_artists).post(create_artist))
        .route("/api/artistes/search", get(search_artists))
        .route(
            "/api/artistes/:id",
            get(get_artist).put(update_artist).delete(delete_artist),
        )
}
