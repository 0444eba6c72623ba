use sea_orm_migration::{prelude::*, schema::*};

use super::m20260815_000003_create_theaters::Studio;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SeatType::Table)
                    .if_not_exists()
                    .col(uuid(SeatType::Id).primary_key())
                    .col(string_len(SeatType::Name, 100).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Seat::Table)
                    .if_not_exists()
                    .col(uuid(Seat::Id).primary_key())
                    .col(string_len(Seat::Row, 8).not_null())
                    .col(integer(Seat::Number).not_null())
                    .col(boolean(Seat::Active).not_null().default(true))
                    .col(uuid(Seat::StudioId).not_null())
                    .col(uuid(Seat::SeatTypeId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seat_studio")
                            .from(Seat::Table, Seat::StudioId)
                            .to(Studio::Table, Studio::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seat_seat_type")
                            .from(Seat::Table, Seat::SeatTypeId)
                            .to(SeatType::Table, SeatType::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One physical seat per studio/row/number
        manager
            .create_index(
                Index::create()
                    .name("uq_seat_studio_row_number")
                    .table(Seat::Table)
                    .col(Seat::StudioId)
                    .col(Seat::Row)
                    .col(Seat::Number)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Seat::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SeatType::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SeatType {
    #[sea_orm(iden = "seat_types")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum Seat {
    #[sea_orm(iden = "seats")]
    Table,
    Id,
    Row,
    Number,
    Active,
    StudioId,
    SeatTypeId,
}
