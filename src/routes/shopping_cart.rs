use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use foodgram_shopping::ExportFormat;
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use crate::{auth::AuthUser, error::AppError};

#[derive(Deserialize)]
pub struct DownloadParams {
    pub format: Option<String>,
}

/// GET /api/recipes/download_shopping_cart?format=txt|csv|pdf
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<DownloadParams>,
) -> Result<impl IntoResponse, AppError> {
    let format = ExportFormat::resolve(params.format.as_deref());
    let file = state.export.export(&user.id, format).await?;

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_owned()),
            (header::CONTENT_DISPOSITION, file.content_disposition()),
        ],
        file.bytes,
    ))
}

/// POST /api/recipes/{id}/shopping_cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    foodgram_shopping::Command::new(state.state.clone())
        .add_to_cart(&user.id, &id)
        .await?;

    let Some(recipe) = foodgram_recipe::Query(state.read_db.clone())
        .find(&id)
        .await?
    else {
        return Err(foodgram_shared::Error::NotFound("recipe".to_owned()).into());
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": recipe.id,
            "name": recipe.name,
            "cooking_time": recipe.cooking_time,
        })),
    ))
}

/// DELETE /api/recipes/{id}/shopping_cart
pub async fn remove_from_cart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    foodgram_shopping::Command::new(state.state.clone())
        .remove_from_cart(&user.id, &id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
