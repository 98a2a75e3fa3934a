// src/models/report.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::product::ProductWithSupplier;

// Agregado do dashboard: recalculado a cada chamada, sem cache.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStatus {
    pub total_products: usize,
    pub total_value: Decimal, // Σ preço × quantidade
    pub low_stock_count: usize,
    pub expiring_count: usize,
    pub total_suppliers: i64,
    pub products: Vec<ProductWithSupplier>,
}
