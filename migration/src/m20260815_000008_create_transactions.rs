use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20260815_000001_create_users::User;
use super::m20260815_000003_create_theaters::Theater;
use super::m20260815_000004_create_seats::{Seat, SeatType};
use super::m20260815_000006_create_showtimes::Showtime;
use super::m20260815_000007_create_payment_methods::PaymentMethod;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create booking status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(BookingStatus::Enum)
                    .values([
                        BookingStatus::Pending,
                        BookingStatus::Paid,
                        BookingStatus::Expired,
                        BookingStatus::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transaction::Table)
                    .if_not_exists()
                    .col(uuid(Transaction::Id).primary_key())
                    .col(
                        ColumnDef::new(Transaction::Status)
                            .custom(BookingStatus::Enum)
                            .not_null(),
                    )
                    .col(string_len(Transaction::ExternalRef, 100).not_null())
                    .col(
                        string_len(Transaction::InvoiceNumber, 32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(big_integer(Transaction::Amount).not_null())
                    .col(timestamp_with_time_zone(Transaction::ExpiredAt).not_null())
                    .col(timestamp_with_time_zone_null(Transaction::PaidAt))
                    .col(uuid(Transaction::PaymentMethodId).not_null())
                    .col(uuid(Transaction::ShowtimeId).not_null())
                    .col(uuid(Transaction::TheaterId).not_null())
                    .col(uuid(Transaction::UserId).not_null())
                    .col(
                        timestamp_with_time_zone(Transaction::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_payment_method")
                            .from(Transaction::Table, Transaction::PaymentMethodId)
                            .to(PaymentMethod::Table, PaymentMethod::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_showtime")
                            .from(Transaction::Table, Transaction::ShowtimeId)
                            .to(Showtime::Table, Showtime::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_theater")
                            .from(Transaction::Table, Transaction::TheaterId)
                            .to(Theater::Table, Theater::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_user")
                            .from(Transaction::Table, Transaction::UserId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransactionItem::Table)
                    .if_not_exists()
                    .col(uuid(TransactionItem::Id).primary_key())
                    .col(big_integer(TransactionItem::Price).not_null())
                    .col(uuid(TransactionItem::TransactionId).not_null())
                    .col(uuid(TransactionItem::SeatId).not_null())
                    .col(uuid(TransactionItem::SeatTypeId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_item_transaction")
                            .from(TransactionItem::Table, TransactionItem::TransactionId)
                            .to(Transaction::Table, Transaction::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_item_seat")
                            .from(TransactionItem::Table, TransactionItem::SeatId)
                            .to(Seat::Table, Seat::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_item_seat_type")
                            .from(TransactionItem::Table, TransactionItem::SeatTypeId)
                            .to(SeatType::Table, SeatType::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Availability checks scan a showtime's items through their transactions
        manager
            .create_index(
                Index::create()
                    .name("idx_transaction_showtime")
                    .table(Transaction::Table)
                    .col(Transaction::ShowtimeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transaction_user")
                    .table(Transaction::Table)
                    .col(Transaction::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transaction_item_transaction")
                    .table(TransactionItem::Table)
                    .col(TransactionItem::TransactionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transaction_item_seat")
                    .table(TransactionItem::Table)
                    .col(TransactionItem::SeatId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TransactionItem::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Transaction::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(BookingStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Transaction {
    #[sea_orm(iden = "transactions")]
    Table,
    Id,
    Status,
    ExternalRef,
    InvoiceNumber,
    Amount,
    ExpiredAt,
    PaidAt,
    PaymentMethodId,
    ShowtimeId,
    TheaterId,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum TransactionItem {
    #[sea_orm(iden = "transaction_items")]
    Table,
    Id,
    Price,
    TransactionId,
    SeatId,
    SeatTypeId,
}

#[derive(DeriveIden)]
pub enum BookingStatus {
    #[sea_orm(iden = "booking_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "paid")]
    Paid,
    #[sea_orm(iden = "expired")]
    Expired,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
}
