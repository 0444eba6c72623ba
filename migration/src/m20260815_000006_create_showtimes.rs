use sea_orm_migration::{prelude::*, schema::*};

use super::m20260815_000002_create_movies::Movie;
use super::m20260815_000003_create_theaters::{Studio, Theater};
use super::m20260815_000005_create_seat_pricings::SeatPricing;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Showtime::Table)
                    .if_not_exists()
                    .col(uuid(Showtime::Id).primary_key())
                    .col(boolean(Showtime::Status).not_null().default(true))
                    .col(timestamp_with_time_zone(Showtime::Time).not_null())
                    .col(timestamp_with_time_zone(Showtime::ExpiredAt).not_null())
                    .col(uuid(Showtime::MovieId).not_null())
                    .col(uuid(Showtime::StudioId).not_null())
                    .col(uuid(Showtime::TheaterId).not_null())
                    .col(uuid(Showtime::SeatPricingId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_showtime_movie")
                            .from(Showtime::Table, Showtime::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_showtime_studio")
                            .from(Showtime::Table, Showtime::StudioId)
                            .to(Studio::Table, Studio::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_showtime_theater")
                            .from(Showtime::Table, Showtime::TheaterId)
                            .to(Theater::Table, Theater::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_showtime_seat_pricing")
                            .from(Showtime::Table, Showtime::SeatPricingId)
                            .to(SeatPricing::Table, SeatPricing::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_showtime_movie_time")
                    .table(Showtime::Table)
                    .col(Showtime::MovieId)
                    .col(Showtime::Time)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_showtime_theater_time")
                    .table(Showtime::Table)
                    .col(Showtime::TheaterId)
                    .col(Showtime::Time)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Showtime::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Showtime {
    #[sea_orm(iden = "showtimes")]
    Table,
    Id,
    Status,
    Time,
    ExpiredAt,
    MovieId,
    StudioId,
    TheaterId,
    SeatPricingId,
}
