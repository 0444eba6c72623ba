use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create movie status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(MovieStatus::Enum)
                    .values([
                        MovieStatus::NowPlaying,
                        MovieStatus::Upcoming,
                        MovieStatus::Ended,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(uuid(Movie::Id).primary_key())
                    .col(string_len(Movie::Title, 255).not_null())
                    .col(string_len(Movie::Tagline, 255).not_null())
                    .col(text(Movie::Overview).not_null())
                    .col(string_len(Movie::PosterUrl, 500).not_null())
                    .col(string_len(Movie::BackdropUrl, 500).not_null())
                    .col(string_len(Movie::TrailerUrl, 500).not_null())
                    .col(integer(Movie::Duration).not_null())
                    .col(integer(Movie::Popularity).not_null())
                    .col(
                        ColumnDef::new(Movie::Status)
                            .custom(MovieStatus::Enum)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movie::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(MovieStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Movie {
    #[sea_orm(iden = "movies")]
    Table,
    Id,
    Title,
    Tagline,
    Overview,
    PosterUrl,
    BackdropUrl,
    TrailerUrl,
    Duration,
    Popularity,
    Status,
}

#[derive(DeriveIden)]
pub enum MovieStatus {
    #[sea_orm(iden = "movie_status")]
    Enum,
    #[sea_orm(iden = "now_playing")]
    NowPlaying,
    #[sea_orm(iden = "upcoming")]
    Upcoming,
    #[sea_orm(iden = "ended")]
    Ended,
}
