use axum::{
    extract::{Path, Query, State},
    Json,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::movie::{self, MovieStatus};
use crate::error::{AppError, AppResult};
use crate::utils::response::{self, ApiResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub items: Vec<movie::Model>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
}

fn page_bounds(params: &Pagination) -> (u64, u64) {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(20).clamp(1, 50);
    (page, limit)
}

/// List all movies, most popular first
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<Pagination>,
) -> AppResult<Json<ApiResponse<MovieListResponse>>> {
    let (page, limit) = page_bounds(&params);

    let paginator = movie::Entity::find()
        .order_by_desc(movie::Column::Popularity)
        .paginate(state.db.as_ref(), limit);

    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page - 1).await?;

    Ok(response::ok(
        "Movies retrieved successfully",
        MovieListResponse {
            items,
            page,
            limit,
            total,
        },
    ))
}

/// List movies currently playing
pub async fn now_playing(
    State(state): State<AppState>,
    Query(params): Query<Pagination>,
) -> AppResult<Json<ApiResponse<MovieListResponse>>> {
    let (page, limit) = page_bounds(&params);

    let paginator = movie::Entity::find()
        .filter(movie::Column::Status.eq(MovieStatus::NowPlaying))
        .order_by_desc(movie::Column::Popularity)
        .paginate(state.db.as_ref(), limit);

    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page - 1).await?;

    Ok(response::ok(
        "Movies retrieved successfully",
        MovieListResponse {
            items,
            page,
            limit,
            total,
        },
    ))
}

/// Get movie details
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<movie::Model>>> {
    let movie = movie::Entity::find_by_id(id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    Ok(response::ok("Movie retrieved successfully", movie))
}
