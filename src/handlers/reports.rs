use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::BusinessContext,
    models::{
        activity::Activity,
        product::{ExpiringProduct, ProductWithSupplier},
        report::InventoryStatus,
    },
};

// GET /api/reports/low-stock
#[utoipa::path(
    get,
    path = "/api/reports/low-stock",
    tag = "Reports",
    responses(
        (status = 200, description = "Produtos com quantidade <= estoque mínimo", body = [ProductWithSupplier]),
        (status = 400, description = "Perfil de negócio ainda não criado")
    ),
    security(("api_jwt" = []))
)]
pub async fn low_stock_report(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
) -> Result<Json<Vec<ProductWithSupplier>>, AppError> {
    let products = app_state.report_service.low_stock(business_id).await?;
    Ok(Json(products))
}

// GET /api/reports/expiring-soon
#[utoipa::path(
    get,
    path = "/api/reports/expiring-soon",
    tag = "Reports",
    responses(
        (status = 200, description = "Produtos vencendo em menos de 30 dias", body = [ExpiringProduct]),
        (status = 400, description = "Perfil de negócio ainda não criado")
    ),
    security(("api_jwt" = []))
)]
pub async fn expiring_soon_report(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
) -> Result<Json<Vec<ExpiringProduct>>, AppError> {
    let products = app_state.report_service.expiring_soon(business_id).await?;
    Ok(Json(products))
}

// GET /api/reports/inventory-status
#[utoipa::path(
    get,
    path = "/api/reports/inventory-status",
    tag = "Reports",
    responses(
        (status = 200, description = "Visão agregada do estoque", body = InventoryStatus),
        (status = 400, description = "Perfil de negócio ainda não criado")
    ),
    security(("api_jwt" = []))
)]
pub async fn inventory_status_report(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
) -> Result<Json<InventoryStatus>, AppError> {
    let status = app_state
        .report_service
        .inventory_status(business_id)
        .await?;
    Ok(Json(status))
}

// GET /api/reports/recent-activities (as 5 mais recentes)
#[utoipa::path(
    get,
    path = "/api/reports/recent-activities",
    tag = "Reports",
    responses(
        (status = 200, description = "Atividades mais recentes do negócio", body = [Activity]),
        (status = 400, description = "Perfil de negócio ainda não criado")
    ),
    security(("api_jwt" = []))
)]
pub async fn recent_activities_report(
    State(app_state): State<AppState>,
    BusinessContext(business_id): BusinessContext,
) -> Result<Json<Vec<Activity>>, AppError> {
    let activities = app_state
        .report_service
        .recent_activities(business_id)
        .await?;
    Ok(Json(activities))
}
