use std::collections::{HashMap, HashSet};

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{seat, seat_type, showtime};
use crate::error::{AppError, AppResult};
use crate::utils::booking::booked_seat_ids;
use crate::utils::response::{self, ApiResponse};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SeatResponse {
    pub id: Uuid,
    pub row: String,
    pub number: i32,
    pub seat_type: String,
    pub is_booked: bool,
}

/// Seat map for a showtime. Availability is derived from active occupancy
/// at the time of the call, never stored on the seat itself.
pub async fn seats_for_showtime(
    State(state): State<AppState>,
    Path(showtime_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<SeatResponse>>>> {
    let showtime = showtime::Entity::find_by_id(showtime_id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Showtime not found".to_string()))?;

    let seats = seat::Entity::find()
        .filter(seat::Column::StudioId.eq(showtime.studio_id))
        .filter(seat::Column::Active.eq(true))
        .order_by_asc(seat::Column::Row)
        .order_by_asc(seat::Column::Number)
        .all(state.db.as_ref())
        .await?;

    let type_ids: Vec<Uuid> = seats.iter().map(|s| s.seat_type_id).collect();
    let type_names: HashMap<Uuid, String> = seat_type::Entity::find()
        .filter(seat_type::Column::Id.is_in(type_ids))
        .all(state.db.as_ref())
        .await?
        .into_iter()
        .map(|t| (t.id, t.name))
        .collect();

    let booked: HashSet<Uuid> = booked_seat_ids(state.db.as_ref(), showtime_id, Utc::now())
        .await?
        .into_iter()
        .collect();

    let responses: Vec<SeatResponse> = seats
        .into_iter()
        .map(|s| SeatResponse {
            is_booked: booked.contains(&s.id),
            seat_type: type_names.get(&s.seat_type_id).cloned().unwrap_or_default(),
            id: s.id,
            row: s.row,
            number: s.number,
        })
        .collect();

    Ok(response::ok("Seats retrieved successfully", responses))
}
