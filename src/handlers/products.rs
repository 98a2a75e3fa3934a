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
    models::product::{
        CreateProductPayload, Product, ProductListResponse, ProductWithSupplier,
        UpdateProductPayload, UpdateStockPayload,
    },
};

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "Produtos do negócio, com fornecedor aninhado", body = ProductListResponse),
        (status = 400, description = "Perfil de negócio ainda não criado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
) -> Result<Json<ProductListResponse>, AppError> {
    let products = app_state.product_service.list(business_id).await?;

    // Sem paginação real: o dataset por tenant cabe numa página só
    Ok(Json(ProductListResponse {
        total: products.len(),
        current_page: 1,
        total_pages: 1,
        products,
    }))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto com fornecedor", body = ProductWithSupplier),
        (status = 404, description = "Produto não encontrado neste negócio")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductWithSupplier>, AppError> {
    let product = app_state.product_service.get(business_id, id).await?;
    Ok(Json(product))
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 404, description = "Fornecedor não pertence a este negócio")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .product_service
        .create(business_id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado neste negócio")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<Json<Product>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .product_service
        .update(business_id, id, &payload)
        .await?;

    Ok(Json(product))
}

// PATCH /api/products/{id}/stock (define a quantidade absoluta)
#[utoipa::path(
    patch,
    path = "/api/products/{id}/stock",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = UpdateStockPayload,
    responses(
        (status = 200, description = "Estoque atualizado", body = Product),
        (status = 404, description = "Produto não encontrado neste negócio")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product_stock(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStockPayload>,
) -> Result<Json<Product>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .product_service
        .update_stock(business_id, id, payload.quantity)
        .await?;

    Ok(Json(product))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado neste negócio")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.product_service.delete(business_id, id).await?;
    Ok(Json(json!({ "message": "Product deleted" })))
}

// GET /api/products/low-stock
#[utoipa::path(
    get,
    path = "/api/products/low-stock",
    tag = "Products",
    responses(
        (status = 200, description = "Produtos com quantidade <= estoque mínimo", body = [ProductWithSupplier])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_low_stock_products(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
) -> Result<Json<Vec<ProductWithSupplier>>, AppError> {
    let products = app_state.product_service.low_stock(business_id).await?;
    Ok(Json(products))
}
