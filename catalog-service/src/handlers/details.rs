//! `/details` endpoints. Each one is a direct call into the catalog store.

use crate::dtos::{ProductDetailsResponse, SaveProductRequest};
use crate::models::ProductDetails;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::Uri,
    Json,
};
use service_core::error::AppError;

pub async fn find_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductDetailsResponse>>, AppError> {
    let records = state.store.find_all().await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

pub async fn find_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<ProductDetailsResponse>>, AppError> {
    let records = state.store.find_by_category(&category).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

pub async fn save(
    State(state): State<AppState>,
    payload: Result<Json<SaveProductRequest>, JsonRejection>,
) -> Result<Json<ProductDetailsResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected product details body");
        AppError::from(rejection)
    })?;

    let saved = state.store.save(ProductDetails::from(payload)).await?;
    Ok(Json(saved.into()))
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}
