use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentMethod::Table)
                    .if_not_exists()
                    .col(uuid(PaymentMethod::Id).primary_key())
                    .col(string_len(PaymentMethod::Code, 64).not_null().unique_key())
                    .col(string_len(PaymentMethod::Name, 100).not_null())
                    .col(string_len(PaymentMethod::LogoUrl, 500).not_null())
                    .col(boolean(PaymentMethod::Active).not_null().default(true))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentMethod::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PaymentMethod {
    #[sea_orm(iden = "payment_methods")]
    Table,
    Id,
    Code,
    Name,
    LogoUrl,
    Active,
}
