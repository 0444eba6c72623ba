use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seat_pricings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Price per seat in minor currency units.
    pub price: i64,
    pub day_type: String,
    pub seat_type_id: Uuid,
    pub theater_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seat_type::Entity",
        from = "Column::SeatTypeId",
        to = "super::seat_type::Column::Id"
    )]
    SeatType,
    #[sea_orm(
        belongs_to = "super::theater::Entity",
        from = "Column::TheaterId",
        to = "super::theater::Column::Id"
    )]
    Theater,
    #[sea_orm(has_many = "super::showtime::Entity")]
    Showtimes,
}

impl Related<super::showtime::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Showtimes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
