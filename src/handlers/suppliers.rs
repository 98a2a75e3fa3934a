use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::BusinessContext,
    models::supplier::{
        CreateSupplierPayload, Supplier, SupplierListResponse, SupplierWithProducts,
        UpdateSupplierPayload,
    },
};

// GET /api/suppliers
#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "Suppliers",
    responses(
        (status = 200, description = "Fornecedores do negócio, com produtos aninhados", body = SupplierListResponse),
        (status = 400, description = "Perfil de negócio ainda não criado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
) -> Result<Json<SupplierListResponse>, AppError> {
    let suppliers = app_state.supplier_service.list(business_id).await?;

    Ok(Json(SupplierListResponse {
        total: suppliers.len(),
        current_page: 1,
        total_pages: 1,
        suppliers,
    }))
}

// GET /api/suppliers/{id}
#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor com seus produtos", body = SupplierWithProducts),
        (status = 404, description = "Fornecedor não encontrado neste negócio")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_supplier(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
    Path(id): Path<Uuid>,
) -> Result<Json<SupplierWithProducts>, AppError> {
    let supplier = app_state.supplier_service.get(business_id, id).await?;
    Ok(Json(supplier))
}

// POST /api/suppliers
#[utoipa::path(
    post,
    path = "/api/suppliers",
    tag = "Suppliers",
    request_body = CreateSupplierPayload,
    responses(
        (status = 201, description = "Fornecedor criado", body = Supplier),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
    Json(payload): Json<CreateSupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let supplier = app_state
        .supplier_service
        .create(business_id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(supplier)))
}

// PUT /api/suppliers/{id}
#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    request_body = UpdateSupplierPayload,
    responses(
        (status = 200, description = "Fornecedor atualizado", body = Supplier),
        (status = 404, description = "Fornecedor não encontrado neste negócio")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_supplier(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSupplierPayload>,
) -> Result<Json<Supplier>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let supplier = app_state
        .supplier_service
        .update(business_id, id, &payload)
        .await?;

    Ok(Json(supplier))
}

// DELETE /api/suppliers/{id}
#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor removido"),
        (status = 400, description = "Fornecedor ainda tem produtos associados"),
        (status = 404, description = "Fornecedor não encontrado neste negócio")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.supplier_service.delete(business_id, id).await?;
    Ok(Json(json!({ "message": "Supplier deleted" })))
}
