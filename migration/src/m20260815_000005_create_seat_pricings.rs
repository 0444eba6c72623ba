use sea_orm_migration::{prelude::*, schema::*};

use super::m20260815_000003_create_theaters::Theater;
use super::m20260815_000004_create_seats::SeatType;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SeatPricing::Table)
                    .if_not_exists()
                    .col(uuid(SeatPricing::Id).primary_key())
                    .col(big_integer(SeatPricing::Price).not_null())
                    .col(string_len(SeatPricing::DayType, 32).not_null())
                    .col(uuid(SeatPricing::SeatTypeId).not_null())
                    .col(uuid(SeatPricing::TheaterId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seat_pricing_seat_type")
                            .from(SeatPricing::Table, SeatPricing::SeatTypeId)
                            .to(SeatType::Table, SeatType::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seat_pricing_theater")
                            .from(SeatPricing::Table, SeatPricing::TheaterId)
                            .to(Theater::Table, Theater::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SeatPricing::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SeatPricing {
    #[sea_orm(iden = "seat_pricings")]
    Table,
    Id,
    Price,
    DayType,
    SeatTypeId,
    TheaterId,
}
