use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Uniform response envelope; errors produce the same shape with `data: null`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub message: String,
    pub data: T,
}

pub fn ok<T: Serialize>(message: &str, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code: StatusCode::OK.as_u16(),
        message: message.to_string(),
        data,
    })
}

pub fn created<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::CREATED,
        Json(ApiResponse {
            code: StatusCode::CREATED.as_u16(),
            message: message.to_string(),
            data,
        }),
    )
}
