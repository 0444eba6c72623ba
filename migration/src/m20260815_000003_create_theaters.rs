use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Theater::Table)
                    .if_not_exists()
                    .col(uuid(Theater::Id).primary_key())
                    .col(string_len(Theater::Name, 255).not_null())
                    .col(string_len(Theater::Address, 500).not_null())
                    .col(double(Theater::Latitude).not_null())
                    .col(double(Theater::Longitude).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Studio::Table)
                    .if_not_exists()
                    .col(uuid(Studio::Id).primary_key())
                    .col(string_len(Studio::Name, 100).not_null())
                    .col(uuid(Studio::TheaterId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_studio_theater")
                            .from(Studio::Table, Studio::TheaterId)
                            .to(Theater::Table, Theater::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Studio::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Theater::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Theater {
    #[sea_orm(iden = "theaters")]
    Table,
    Id,
    Name,
    Address,
    Latitude,
    Longitude,
}

#[derive(DeriveIden)]
pub enum Studio {
    #[sea_orm(iden = "studios")]
    Table,
    Id,
    Name,
    TheaterId,
}
