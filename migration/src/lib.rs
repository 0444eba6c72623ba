pub use sea_orm_migration::prelude::*;

mod m20260815_000001_create_users;
mod m20260815_000002_create_movies;
mod m20260815_000003_create_theaters;
mod m20260815_000004_create_seats;
mod m20260815_000005_create_seat_pricings;
mod m20260815_000006_create_showtimes;
mod m20260815_000007_create_payment_methods;
mod m20260815_000008_create_transactions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_create_users::Migration),
            Box::new(m20260815_000002_create_movies::Migration),
            Box::new(m20260815_000003_create_theaters::Migration),
            Box::new(m20260815_000004_create_seats::Migration),
            Box::new(m20260815_000005_create_seat_pricings::Migration),
            Box::new(m20260815_000006_create_showtimes::Migration),
            Box::new(m20260815_000007_create_payment_methods::Migration),
            Box::new(m20260815_000008_create_transactions::Migration),
        ]
    }
}
