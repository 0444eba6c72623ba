use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::transaction::{self, BookingStatus};
use crate::entities::{seat, transaction_item};
use crate::error::{AppError, AppResult};

/// Condition under which a booking counts its seats as taken: `paid` always,
/// `pending` only while the hold has not lapsed. Expired pending rows are
/// treated as released without ever being rewritten.
pub fn active_occupancy(now: DateTime<Utc>) -> Condition {
    Condition::any()
        .add(transaction::Column::Status.eq(BookingStatus::Paid))
        .add(
            Condition::all()
                .add(transaction::Column::Status.eq(BookingStatus::Pending))
                .add(transaction::Column::ExpiredAt.gt(now)),
        )
}

/// Availability oracle: true iff none of the requested seats are held by an
/// actively occupying booking for this showtime at `now`.
///
/// On its own this check is advisory — the reservation writer runs it again
/// on the same transaction that holds the showtime row lock, so the answer
/// cannot go stale between check and write.
pub async fn seats_available<C: ConnectionTrait>(
    conn: &C,
    showtime_id: Uuid,
    seat_ids: &[Uuid],
    now: DateTime<Utc>,
) -> AppResult<bool> {
    if seat_ids.is_empty() {
        return Err(AppError::BadRequest(
            "At least one seat is required".to_string(),
        ));
    }

    let taken = transaction_item::Entity::find()
        .inner_join(transaction::Entity)
        .filter(transaction::Column::ShowtimeId.eq(showtime_id))
        .filter(active_occupancy(now))
        .filter(transaction_item::Column::SeatId.is_in(seat_ids.iter().copied()))
        .count(conn)
        .await?;

    Ok(taken == 0)
}

/// Seat ids currently occupied for a showtime, for rendering seat maps.
pub async fn booked_seat_ids<C: ConnectionTrait>(
    conn: &C,
    showtime_id: Uuid,
    now: DateTime<Utc>,
) -> AppResult<Vec<Uuid>> {
    transaction_item::Entity::find()
        .select_only()
        .column(transaction_item::Column::SeatId)
        .inner_join(transaction::Entity)
        .filter(transaction::Column::ShowtimeId.eq(showtime_id))
        .filter(active_occupancy(now))
        .into_tuple::<Uuid>()
        .all(conn)
        .await
        .map_err(Into::into)
}

/// Human-readable invoice number derived from the booking id.
pub fn invoice_number(transaction_id: Uuid) -> String {
    format!("INV-{}", &transaction_id.to_string()[..8])
}

/// Build the line items for a booking, charging the showtime's flat price per
/// seat, and return them with the summed amount. Every requested seat must be
/// one of the studio's active seats; a miss is a data-integrity rejection, not
/// something the normal UI flow can produce.
pub fn build_line_items(
    transaction_id: Uuid,
    seat_ids: &[Uuid],
    studio_seats: &[seat::Model],
    price: i64,
) -> AppResult<(Vec<transaction_item::ActiveModel>, i64)> {
    let by_id: HashMap<Uuid, &seat::Model> =
        studio_seats.iter().map(|s| (s.id, s)).collect();

    let mut items = Vec::with_capacity(seat_ids.len());
    let mut amount: i64 = 0;

    for seat_id in seat_ids {
        let seat = by_id.get(seat_id).ok_or_else(|| {
            AppError::Unprocessable(format!(
                "Seat {} does not belong to this showtime's studio",
                seat_id
            ))
        })?;

        items.push(transaction_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            price: Set(price),
            transaction_id: Set(transaction_id),
            seat_id: Set(*seat_id),
            seat_type_id: Set(seat.seat_type_id),
        });
        amount += price;
    }

    Ok((items, amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn studio_seat(studio_id: Uuid, row: &str, number: i32) -> seat::Model {
        seat::Model {
            id: Uuid::new_v4(),
            row: row.to_string(),
            number,
            active: true,
            studio_id,
            seat_type_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_invoice_number_format() {
        let id = Uuid::new_v4();
        let invoice = invoice_number(id);

        assert!(invoice.starts_with("INV-"));
        assert_eq!(invoice.len(), 12);
        assert_eq!(&invoice[4..], &id.to_string()[..8]);
    }

    #[test]
    fn test_active_occupancy_sql() {
        let sql = transaction::Entity::find()
            .filter(active_occupancy(Utc::now()))
            .build(DbBackend::Postgres)
            .to_string();

        // Paid occupies unconditionally; pending only until the hold lapses.
        assert!(sql.contains("'paid'"));
        assert!(sql.contains("'pending'"));
        assert!(sql.contains("expired_at"));
    }

    #[test]
    fn test_line_items_capture_flat_price() {
        let studio_id = Uuid::new_v4();
        let seats = vec![
            studio_seat(studio_id, "A", 1),
            studio_seat(studio_id, "A", 2),
            studio_seat(studio_id, "A", 3),
        ];
        let tx_id = Uuid::new_v4();
        let requested = vec![seats[0].id, seats[2].id];

        let (items, amount) =
            build_line_items(tx_id, &requested, &seats, 50_000).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(amount, 100_000);
        for (item, seat_id) in items.iter().zip(&requested) {
            assert_eq!(item.price.clone().unwrap(), 50_000);
            assert_eq!(item.transaction_id.clone().unwrap(), tx_id);
            assert_eq!(item.seat_id.clone().unwrap(), *seat_id);
        }
    }

    #[test]
    fn test_unknown_seat_rejected() {
        let studio_id = Uuid::new_v4();
        let seats = vec![studio_seat(studio_id, "A", 1)];
        let stranger = Uuid::new_v4();

        let result = build_line_items(Uuid::new_v4(), &[stranger], &seats, 50_000);
        assert!(matches!(result, Err(AppError::Unprocessable(_))));
    }

    #[tokio::test]
    async fn test_empty_seat_set_is_invalid() {
        let db = sea_orm::MockDatabase::new(DbBackend::Postgres).into_connection();

        let result = seats_available(&db, Uuid::new_v4(), &[], Utc::now()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
