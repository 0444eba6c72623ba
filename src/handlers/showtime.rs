use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{movie, seat_pricing, showtime, studio, theater};
use crate::error::{AppError, AppResult};
use crate::utils::response::{self, ApiResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ShowtimeQuery {
    /// Restrict to showtimes on this calendar date (UTC).
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct MovieBrief {
    pub id: Uuid,
    pub title: String,
    pub poster_url: String,
    pub duration: i32,
}

#[derive(Debug, Serialize)]
pub struct StudioInfo {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TheaterInfo {
    pub id: Uuid,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct ShowtimeResponse {
    pub id: Uuid,
    pub time: chrono::DateTime<chrono::FixedOffset>,
    pub price: i64,
    pub studio: StudioInfo,
    pub theater: TheaterInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<MovieBrief>,
}

fn upcoming(query: sea_orm::Select<showtime::Entity>, date: Option<NaiveDate>) -> sea_orm::Select<showtime::Entity> {
    let mut query = query
        .filter(showtime::Column::Status.eq(true))
        .filter(showtime::Column::Time.gt(Utc::now()));

    if let Some(date) = date {
        let start = date.and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::days(1);
        query = query
            .filter(showtime::Column::Time.gte(start))
            .filter(showtime::Column::Time.lt(end));
    }

    query.order_by_asc(showtime::Column::Time)
}

/// Showtimes for a movie, optionally on one date
pub async fn showtimes_by_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<Uuid>,
    Query(params): Query<ShowtimeQuery>,
) -> AppResult<Json<ApiResponse<Vec<ShowtimeResponse>>>> {
    let showtimes = upcoming(
        showtime::Entity::find().filter(showtime::Column::MovieId.eq(movie_id)),
        params.date,
    )
    .all(state.db.as_ref())
    .await?;

    let responses = assemble(state.db.as_ref(), showtimes, false).await?;
    Ok(response::ok("Showtimes retrieved successfully", responses))
}

/// Showtimes at a theater, optionally on one date
pub async fn showtimes_by_theater(
    State(state): State<AppState>,
    Path(theater_id): Path<Uuid>,
    Query(params): Query<ShowtimeQuery>,
) -> AppResult<Json<ApiResponse<Vec<ShowtimeResponse>>>> {
    let showtimes = upcoming(
        showtime::Entity::find().filter(showtime::Column::TheaterId.eq(theater_id)),
        params.date,
    )
    .all(state.db.as_ref())
    .await?;

    let responses = assemble(state.db.as_ref(), showtimes, true).await?;
    Ok(response::ok("Showtimes retrieved successfully", responses))
}

/// Get a single showtime
pub async fn get_showtime(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ShowtimeResponse>>> {
    let showtime = showtime::Entity::find_by_id(id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Showtime not found".to_string()))?;

    let mut responses = assemble(state.db.as_ref(), vec![showtime], true).await?;
    let response_body = responses
        .pop()
        .ok_or_else(|| AppError::Internal(format!("Showtime {} has dangling references", id)))?;

    Ok(response::ok("Showtime retrieved successfully", response_body))
}

/// Join studios, theaters, pricing (and optionally movies) onto showtimes
/// with batched lookups, the same stitching the booking list view uses.
async fn assemble(
    db: &DatabaseConnection,
    showtimes: Vec<showtime::Model>,
    with_movie: bool,
) -> AppResult<Vec<ShowtimeResponse>> {
    let studio_ids: Vec<Uuid> = showtimes.iter().map(|s| s.studio_id).collect();
    let theater_ids: Vec<Uuid> = showtimes.iter().map(|s| s.theater_id).collect();
    let pricing_ids: Vec<Uuid> = showtimes.iter().map(|s| s.seat_pricing_id).collect();

    let studios: HashMap<Uuid, studio::Model> = studio::Entity::find()
        .filter(studio::Column::Id.is_in(studio_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let theaters: HashMap<Uuid, theater::Model> = theater::Entity::find()
        .filter(theater::Column::Id.is_in(theater_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    let pricings: HashMap<Uuid, seat_pricing::Model> = seat_pricing::Entity::find()
        .filter(seat_pricing::Column::Id.is_in(pricing_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let movies: HashMap<Uuid, movie::Model> = if with_movie {
        let movie_ids: Vec<Uuid> = showtimes.iter().map(|s| s.movie_id).collect();
        movie::Entity::find()
            .filter(movie::Column::Id.is_in(movie_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect()
    } else {
        HashMap::new()
    };

    let responses = showtimes
        .into_iter()
        .filter_map(|s| {
            let studio = studios.get(&s.studio_id)?;
            let theater = theaters.get(&s.theater_id)?;
            let pricing = pricings.get(&s.seat_pricing_id)?;
            let movie = if with_movie {
                let m = movies.get(&s.movie_id)?;
                Some(MovieBrief {
                    id: m.id,
                    title: m.title.clone(),
                    poster_url: m.poster_url.clone(),
                    duration: m.duration,
                })
            } else {
                None
            };

            Some(ShowtimeResponse {
                id: s.id,
                time: s.time,
                price: pricing.price,
                studio: StudioInfo {
                    id: studio.id,
                    name: studio.name.clone(),
                },
                theater: TheaterInfo {
                    id: theater.id,
                    name: theater.name.clone(),
                    address: theater.address.clone(),
                },
                movie,
            })
        })
        .collect();

    Ok(responses)
}
