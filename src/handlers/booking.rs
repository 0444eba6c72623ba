use std::collections::{HashMap, HashSet};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Duration, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::transaction::{self, BookingStatus};
use crate::entities::{movie, seat, seat_pricing, seat_type, showtime, theater, transaction_item};
use crate::error::{AppError, AppResult};
use crate::utils::booking::{build_line_items, invoice_number, seats_available};
use crate::utils::jwt::Claims;
use crate::utils::response::{self, ApiResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub showtime_id: Uuid,
    pub seat_ids: Vec<Uuid>,
    pub payment_method_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct MovieBrief {
    pub id: Uuid,
    pub title: String,
    pub poster_url: String,
}

#[derive(Debug, Serialize)]
pub struct BookingShowtime {
    pub id: Uuid,
    pub time: chrono::DateTime<chrono::FixedOffset>,
    pub movie: MovieBrief,
}

#[derive(Debug, Serialize)]
pub struct BookingTheater {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct BookingSeatItem {
    pub id: Uuid,
    pub row: String,
    pub number: i32,
    pub seat_type: String,
    pub price: i64,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub status: BookingStatus,
    pub invoice_number: String,
    pub amount: i64,
    pub expired_at: chrono::DateTime<chrono::FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub showtime: BookingShowtime,
    pub theater: BookingTheater,
    pub seats: Vec<BookingSeatItem>,
}

#[derive(Debug, Serialize)]
pub struct BookingListItem {
    pub id: Uuid,
    pub status: BookingStatus,
    pub amount: i64,
    pub expired_at: chrono::DateTime<chrono::FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub showtime: BookingShowtime,
    pub theater: BookingTheater,
}

/// Create a booking: reserve seats for a showtime under a pending hold
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookingResponse>>)> {
    let booking = reserve_seats(
        state.db.as_ref(),
        state.config.booking_hold_minutes,
        claims.sub,
        &payload,
    )
    .await?;

    tracing::info!(
        booking_id = %booking.id,
        user_id = %claims.sub,
        seats = payload.seat_ids.len(),
        amount = booking.amount,
        "booking created"
    );

    let response = load_booking_response(state.db.as_ref(), booking).await?;
    Ok(response::created("Booking created successfully", response))
}

/// Get one booking, only if it belongs to the caller
pub async fn get_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BookingResponse>>> {
    let booking = find_owned_booking(state.db.as_ref(), id, claims.sub).await?;
    let response = load_booking_response(state.db.as_ref(), booking).await?;
    Ok(response::ok("Booking retrieved successfully", response))
}

/// List the caller's bookings, most recently expiring first
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<ApiResponse<Vec<BookingListItem>>>> {
    let bookings = transaction::Entity::find()
        .filter(transaction::Column::UserId.eq(claims.sub))
        .order_by_desc(transaction::Column::ExpiredAt)
        .all(state.db.as_ref())
        .await?;

    let showtime_ids: Vec<Uuid> = bookings.iter().map(|b| b.showtime_id).collect();
    let theater_ids: Vec<Uuid> = bookings.iter().map(|b| b.theater_id).collect();

    let showtimes: HashMap<Uuid, (showtime::Model, movie::Model)> = showtime::Entity::find()
        .filter(showtime::Column::Id.is_in(showtime_ids))
        .find_also_related(movie::Entity)
        .all(state.db.as_ref())
        .await?
        .into_iter()
        .filter_map(|(s, m)| m.map(|m| (s.id, (s, m))))
        .collect();

    let theaters: HashMap<Uuid, theater::Model> = theater::Entity::find()
        .filter(theater::Column::Id.is_in(theater_ids))
        .all(state.db.as_ref())
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    let responses: Vec<BookingListItem> = bookings
        .into_iter()
        .filter_map(|b| {
            let (showtime, movie) = showtimes.get(&b.showtime_id)?;
            let theater = theaters.get(&b.theater_id)?;

            Some(BookingListItem {
                id: b.id,
                status: b.status,
                amount: b.amount,
                expired_at: b.expired_at,
                paid_at: b.paid_at,
                showtime: BookingShowtime {
                    id: showtime.id,
                    time: showtime.time,
                    movie: MovieBrief {
                        id: movie.id,
                        title: movie.title.clone(),
                        poster_url: movie.poster_url.clone(),
                    },
                },
                theater: BookingTheater {
                    id: theater.id,
                    name: theater.name.clone(),
                },
            })
        })
        .collect();

    Ok(response::ok("Bookings retrieved successfully", responses))
}

/// Reservation writer. The availability check and the booking insert run on
/// one transaction that holds a row lock on the showtime, so two concurrent
/// attempts on overlapping seats serialize: the loser re-checks after the
/// winner commits and gets a Conflict instead of a double write.
async fn reserve_seats(
    db: &DatabaseConnection,
    hold_minutes: i64,
    user_id: Uuid,
    req: &CreateBookingRequest,
) -> AppResult<transaction::Model> {
    if req.seat_ids.is_empty() {
        return Err(AppError::BadRequest(
            "At least one seat is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    if !req.seat_ids.iter().all(|id| seen.insert(id)) {
        return Err(AppError::BadRequest(
            "Duplicate seat in request".to_string(),
        ));
    }

    let txn = db.begin().await?;
    let now = Utc::now();

    let showtime = showtime::Entity::find_by_id(req.showtime_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Showtime not found".to_string()))?;

    if !showtime.status || showtime.expired_at <= now {
        return Err(AppError::BadRequest(
            "Showtime is no longer open for booking".to_string(),
        ));
    }

    let pricing = seat_pricing::Entity::find_by_id(showtime.seat_pricing_id)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            AppError::Internal(format!("Showtime {} has no pricing", showtime.id))
        })?;

    if !seats_available(&txn, req.showtime_id, &req.seat_ids, now).await? {
        return Err(AppError::Conflict(
            "One or more seats are already booked".to_string(),
        ));
    }

    let studio_seats = seat::Entity::find()
        .filter(seat::Column::StudioId.eq(showtime.studio_id))
        .filter(seat::Column::Active.eq(true))
        .all(&txn)
        .await?;

    let booking_id = Uuid::new_v4();
    let (items, amount) =
        build_line_items(booking_id, &req.seat_ids, &studio_seats, pricing.price)?;

    let booking = transaction::Model {
        id: booking_id,
        status: BookingStatus::Pending,
        external_ref: String::new(),
        invoice_number: invoice_number(booking_id),
        amount,
        expired_at: (now + Duration::minutes(hold_minutes)).fixed_offset(),
        paid_at: None,
        payment_method_id: req.payment_method_id,
        showtime_id: showtime.id,
        theater_id: showtime.theater_id,
        user_id,
        created_at: now.fixed_offset(),
    };

    // Header and line items commit together or not at all; an early return
    // above drops the transaction and rolls everything back.
    transaction::Entity::insert(booking.clone().into_active_model())
        .exec_without_returning(&txn)
        .await?;
    transaction_item::Entity::insert_many(items)
        .exec_without_returning(&txn)
        .await?;

    txn.commit().await?;

    Ok(booking)
}

/// Absent and not-owned collapse into the same NotFound so a booking's
/// existence never leaks to other users.
async fn find_owned_booking(
    db: &DatabaseConnection,
    id: Uuid,
    user_id: Uuid,
) -> AppResult<transaction::Model> {
    transaction::Entity::find_by_id(id)
        .one(db)
        .await?
        .filter(|b| b.user_id == user_id)
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
}

async fn load_booking_response(
    db: &DatabaseConnection,
    booking: transaction::Model,
) -> AppResult<BookingResponse> {
    let (showtime, movie) = showtime::Entity::find_by_id(booking.showtime_id)
        .find_also_related(movie::Entity)
        .one(db)
        .await?
        .ok_or_else(|| {
            AppError::Internal(format!(
                "Booking {} references missing showtime {}",
                booking.id, booking.showtime_id
            ))
        })?;
    let movie = movie.ok_or_else(|| {
        AppError::Internal(format!("Showtime {} references missing movie", showtime.id))
    })?;

    let theater = theater::Entity::find_by_id(booking.theater_id)
        .one(db)
        .await?
        .ok_or_else(|| {
            AppError::Internal(format!(
                "Booking {} references missing theater {}",
                booking.id, booking.theater_id
            ))
        })?;

    let items = transaction_item::Entity::find()
        .filter(transaction_item::Column::TransactionId.eq(booking.id))
        .find_also_related(seat::Entity)
        .all(db)
        .await?;

    let type_ids: Vec<Uuid> = items.iter().map(|(i, _)| i.seat_type_id).collect();
    let type_names: HashMap<Uuid, String> = seat_type::Entity::find()
        .filter(seat_type::Column::Id.is_in(type_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.id, t.name))
        .collect();

    let mut seats: Vec<BookingSeatItem> = items
        .into_iter()
        .filter_map(|(item, seat)| {
            let seat = seat?;
            Some(BookingSeatItem {
                id: seat.id,
                row: seat.row,
                number: seat.number,
                seat_type: type_names.get(&item.seat_type_id).cloned().unwrap_or_default(),
                price: item.price,
            })
        })
        .collect();
    seats.sort_by(|a, b| a.row.cmp(&b.row).then(a.number.cmp(&b.number)));

    Ok(BookingResponse {
        id: booking.id,
        status: booking.status,
        invoice_number: booking.invoice_number,
        amount: booking.amount,
        expired_at: booking.expired_at,
        paid_at: booking.paid_at,
        showtime: BookingShowtime {
            id: showtime.id,
            time: showtime.time,
            movie: MovieBrief {
                id: movie.id,
                title: movie.title,
                poster_url: movie.poster_url,
            },
        },
        theater: BookingTheater {
            id: theater.id,
            name: theater.name,
        },
        seats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

    const PRICE: i64 = 50_000;
    const HOLD_MINUTES: i64 = 15;

    fn showtime_fixture() -> showtime::Model {
        showtime::Model {
            id: Uuid::new_v4(),
            status: true,
            time: (Utc::now() + Duration::hours(3)).fixed_offset(),
            expired_at: (Utc::now() + Duration::hours(2)).fixed_offset(),
            movie_id: Uuid::new_v4(),
            studio_id: Uuid::new_v4(),
            theater_id: Uuid::new_v4(),
            seat_pricing_id: Uuid::new_v4(),
        }
    }

    fn pricing_fixture(showtime: &showtime::Model) -> seat_pricing::Model {
        seat_pricing::Model {
            id: showtime.seat_pricing_id,
            price: PRICE,
            day_type: "weekday".to_string(),
            seat_type_id: Uuid::new_v4(),
            theater_id: showtime.theater_id,
        }
    }

    fn seat_fixture(showtime: &showtime::Model, row: &str, number: i32) -> seat::Model {
        seat::Model {
            id: Uuid::new_v4(),
            row: row.to_string(),
            number,
            active: true,
            studio_id: showtime.studio_id,
            seat_type_id: Uuid::new_v4(),
        }
    }

    fn count_row(count: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(count)))])
    }

    fn request(showtime: &showtime::Model, seat_ids: Vec<Uuid>) -> CreateBookingRequest {
        CreateBookingRequest {
            showtime_id: showtime.id,
            seat_ids,
            payment_method_id: Uuid::new_v4(),
        }
    }

    fn booking_fixture(user_id: Uuid) -> transaction::Model {
        let id = Uuid::new_v4();
        transaction::Model {
            id,
            status: BookingStatus::Pending,
            external_ref: String::new(),
            invoice_number: invoice_number(id),
            amount: PRICE,
            expired_at: (Utc::now() + Duration::minutes(HOLD_MINUTES)).fixed_offset(),
            paid_at: None,
            payment_method_id: Uuid::new_v4(),
            showtime_id: Uuid::new_v4(),
            theater_id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now().fixed_offset(),
        }
    }

    #[tokio::test]
    async fn test_empty_seat_list_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let showtime = showtime_fixture();

        let result = reserve_seats(
            &db,
            HOLD_MINUTES,
            Uuid::new_v4(),
            &request(&showtime, vec![]),
        )
        .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_duplicate_seats_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let showtime = showtime_fixture();
        let seat_id = Uuid::new_v4();

        let result = reserve_seats(
            &db,
            HOLD_MINUTES,
            Uuid::new_v4(),
            &request(&showtime, vec![seat_id, seat_id]),
        )
        .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_unknown_showtime_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<showtime::Model>::new()])
            .into_connection();
        let showtime = showtime_fixture();

        let result = reserve_seats(
            &db,
            HOLD_MINUTES,
            Uuid::new_v4(),
            &request(&showtime, vec![Uuid::new_v4()]),
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_occupied_seats_conflict() {
        let showtime = showtime_fixture();
        let pricing = pricing_fixture(&showtime);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![showtime.clone()]])
            .append_query_results([vec![pricing]])
            .append_query_results([vec![count_row(1)]])
            .into_connection();

        let result = reserve_seats(
            &db,
            HOLD_MINUTES,
            Uuid::new_v4(),
            &request(&showtime, vec![Uuid::new_v4()]),
        )
        .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_seat_outside_studio_rejected() {
        let showtime = showtime_fixture();
        let pricing = pricing_fixture(&showtime);
        let studio_seats = vec![seat_fixture(&showtime, "A", 1)];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![showtime.clone()]])
            .append_query_results([vec![pricing]])
            .append_query_results([vec![count_row(0)]])
            .append_query_results([studio_seats])
            .into_connection();

        let result = reserve_seats(
            &db,
            HOLD_MINUTES,
            Uuid::new_v4(),
            &request(&showtime, vec![Uuid::new_v4()]),
        )
        .await;

        assert!(matches!(result, Err(AppError::Unprocessable(_))));
    }

    #[tokio::test]
    async fn test_closed_showtime_rejected() {
        let mut showtime = showtime_fixture();
        showtime.expired_at = (Utc::now() - Duration::hours(1)).fixed_offset();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![showtime.clone()]])
            .into_connection();

        let result = reserve_seats(
            &db,
            HOLD_MINUTES,
            Uuid::new_v4(),
            &request(&showtime, vec![Uuid::new_v4()]),
        )
        .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_reserve_success() {
        let showtime = showtime_fixture();
        let pricing = pricing_fixture(&showtime);
        let seat_a1 = seat_fixture(&showtime, "A", 1);
        let seat_a2 = seat_fixture(&showtime, "A", 2);
        let requested = vec![seat_a1.id, seat_a2.id];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![showtime.clone()]])
            .append_query_results([vec![pricing]])
            .append_query_results([vec![count_row(0)]])
            .append_query_results([vec![seat_a1, seat_a2]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
            ])
            .into_connection();

        let user_id = Uuid::new_v4();
        let before = Utc::now();
        let booking = reserve_seats(
            &db,
            HOLD_MINUTES,
            user_id,
            &request(&showtime, requested),
        )
        .await
        .unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.amount, 2 * PRICE);
        assert_eq!(booking.user_id, user_id);
        assert_eq!(booking.showtime_id, showtime.id);
        assert_eq!(booking.theater_id, showtime.theater_id);
        assert_eq!(booking.invoice_number, invoice_number(booking.id));
        assert!(booking.paid_at.is_none());
        assert!(booking.expired_at >= before + Duration::minutes(HOLD_MINUTES));
    }

    #[tokio::test]
    async fn test_foreign_booking_reads_as_not_found() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let booking = booking_fixture(owner);
        let booking_id = booking.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![booking]])
            .append_query_results([Vec::<transaction::Model>::new()])
            .into_connection();

        let foreign = find_owned_booking(&db, booking_id, stranger).await;
        let absent = find_owned_booking(&db, Uuid::new_v4(), stranger).await;

        // Identical error for "exists but not yours" and "does not exist".
        let foreign = foreign.unwrap_err().to_string();
        let absent = absent.unwrap_err().to_string();
        assert_eq!(foreign, absent);
        assert_eq!(foreign, "Booking not found");
    }
}
