use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::business::{
        BusinessProfile, BusinessProfileDetail, CreateBusinessPayload, ProfileStatusResponse,
        UpdateBusinessPayload,
    },
};

// POST /api/business
#[utoipa::path(
    post,
    path = "/api/business",
    tag = "Business",
    request_body = CreateBusinessPayload,
    responses(
        (status = 201, description = "Perfil criado", body = BusinessProfile),
        (status = 400, description = "Perfil já existe ou payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_business(
    State(app_state): State<AppState>,
    AuthenticatedUser(current_user): AuthenticatedUser,
    Json(payload): Json<CreateBusinessPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let profile = app_state
        .business_service
        .create(current_user.user.id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

// GET /api/business
#[utoipa::path(
    get,
    path = "/api/business",
    tag = "Business",
    responses(
        (status = 200, description = "Perfil com produtos e fornecedores aninhados", body = BusinessProfileDetail),
        (status = 404, description = "Perfil ainda não criado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_business(
    State(app_state): State<AppState>,
    AuthenticatedUser(current_user): AuthenticatedUser,
) -> Result<Json<BusinessProfileDetail>, AppError> {
    let detail = app_state
        .business_service
        .get_detail(current_user.user.id)
        .await?;

    Ok(Json(detail))
}

// PUT /api/business
#[utoipa::path(
    put,
    path = "/api/business",
    tag = "Business",
    request_body = UpdateBusinessPayload,
    responses(
        (status = 200, description = "Perfil atualizado", body = BusinessProfile),
        (status = 404, description = "Perfil ainda não criado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_business(
    State(app_state): State<AppState>,
    AuthenticatedUser(current_user): AuthenticatedUser,
    Json(payload): Json<UpdateBusinessPayload>,
) -> Result<Json<BusinessProfile>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let profile = app_state
        .business_service
        .update(current_user.user.id, &payload)
        .await?;

    Ok(Json(profile))
}

// GET /api/business/status: o gate de setup do cliente (sempre 200)
#[utoipa::path(
    get,
    path = "/api/business/status",
    tag = "Business",
    responses(
        (status = 200, description = "Estado de setup do perfil", body = ProfileStatusResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_business_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(current_user): AuthenticatedUser,
) -> Result<Json<ProfileStatusResponse>, AppError> {
    let status = app_state
        .business_service
        .status(current_user.user.id)
        .await?;

    Ok(Json(status))
}
