use axum::{extract::State, Json};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::payment_method;
use crate::error::AppResult;
use crate::utils::response::{self, ApiResponse};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PaymentMethodResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub logo_url: String,
}

/// List payment methods available for checkout
pub async fn list_payment_methods(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<PaymentMethodResponse>>>> {
    let methods = payment_method::Entity::find()
        .filter(payment_method::Column::Active.eq(true))
        .order_by_asc(payment_method::Column::Name)
        .all(state.db.as_ref())
        .await?;

    let responses: Vec<PaymentMethodResponse> = methods
        .into_iter()
        .map(|m| PaymentMethodResponse {
            id: m.id,
            code: m.code,
            name: m.name,
            logo_url: m.logo_url,
        })
        .collect();

    Ok(response::ok(
        "Payment methods retrieved successfully",
        responses,
    ))
}
