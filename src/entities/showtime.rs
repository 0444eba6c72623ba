use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "showtimes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Whether the showtime is open for booking at all.
    pub status: bool,
    pub time: DateTimeWithTimeZone,
    /// Hard cutoff after which the showtime can no longer be booked against.
    pub expired_at: DateTimeWithTimeZone,
    pub movie_id: Uuid,
    pub studio_id: Uuid,
    pub theater_id: Uuid,
    pub seat_pricing_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movie::Entity",
        from = "Column::MovieId",
        to = "super::movie::Column::Id"
    )]
    Movie,
    #[sea_orm(
        belongs_to = "super::studio::Entity",
        from = "Column::StudioId",
        to = "super::studio::Column::Id"
    )]
    Studio,
    #[sea_orm(
        belongs_to = "super::theater::Entity",
        from = "Column::TheaterId",
        to = "super::theater::Column::Id"
    )]
    Theater,
    #[sea_orm(
        belongs_to = "super::seat_pricing::Entity",
        from = "Column::SeatPricingId",
        to = "super::seat_pricing::Column::Id"
    )]
    SeatPricing,
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl Related<super::studio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Studio.def()
    }
}

impl Related<super::theater::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Theater.def()
    }
}

impl Related<super::seat_pricing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeatPricing.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
