// src/models/product.rs

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::supplier::Supplier;

// Janela de "vencendo em breve": menos de 30 dias
const EXPIRY_WINDOW_DAYS: i64 = 30;

// ---
// 1. Categoria do produto
// ---
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "product_category", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum ProductCategory {
    Otc,          // Vira "OTC"
    Prescription, // Vira "PRESCRIPTION"
}

// ---
// 2. Produto
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub category: ProductCategory,
    pub quantity: i32,
    pub min_stock_level: i32,
    pub price: Decimal,
    pub expiry_date: NaiveDate,
    pub description: Option<String>,
    pub supplier_id: Uuid,
    pub business_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    // "Estoque baixo": quantidade <= nível mínimo (inclusive no limite)
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock_level
    }

    fn expiry_instant(&self) -> DateTime<Utc> {
        // A validade é um DATE; tratamos como meia-noite UTC daquele dia.
        self.expiry_date.and_time(NaiveTime::MIN).and_utc()
    }

    pub fn is_expiring_soon(&self, now: DateTime<Utc>) -> bool {
        self.expiry_instant() - now < Duration::days(EXPIRY_WINDOW_DAYS)
    }

    // Dias até vencer, arredondando para cima (10,2 dias -> 11)
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        let seconds = (self.expiry_instant() - now).num_seconds();
        (seconds + 86_399).div_euclid(86_400)
    }
}

// Produto com o fornecedor aninhado, como o cliente espera
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithSupplier {
    #[serde(flatten)]
    pub product: Product,
    pub supplier: Option<Supplier>,
}

// Linha do relatório de vencimentos (com daysUntilExpiry calculado)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpiringProduct {
    #[serde(flatten)]
    pub product: ProductWithSupplier,
    pub days_until_expiry: i64,
}

// ---
// Validação customizada: Decimal não-negativo
// ---
pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("Price cannot be negative".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "SKU is required"))]
    pub sku: String,

    pub category: ProductCategory,

    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,

    #[validate(range(min = 0, message = "Minimum stock level cannot be negative"))]
    pub min_stock_level: i32,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    pub expiry_date: NaiveDate,

    pub description: Option<String>,

    pub supplier_id: Uuid,
}

// Atualização parcial: só os campos presentes são aplicados
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "SKU is required"))]
    pub sku: Option<String>,

    pub category: Option<ProductCategory>,

    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,

    #[validate(range(min = 0, message = "Minimum stock level cannot be negative"))]
    pub min_stock_level: Option<i32>,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Option<Decimal>,

    pub expiry_date: Option<NaiveDate>,

    pub description: Option<String>,

    pub supplier_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStockPayload {
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
}

// Resposta de listagem (o cliente lê a chave 'products'; lista vazia é 200, não erro)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductWithSupplier>,
    pub total: usize,
    pub current_page: u32,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(quantity: i32, min_stock_level: i32, expiry_date: NaiveDate) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Paracetamol 500mg".to_string(),
            sku: "PARA-500".to_string(),
            category: ProductCategory::Otc,
            quantity,
            min_stock_level,
            price: Decimal::new(1299, 2),
            expiry_date,
            description: None,
            supplier_id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn low_stock_is_inclusive_at_the_boundary() {
        let date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(product(5, 5, date).is_low_stock());
        assert!(product(0, 5, date).is_low_stock());
        assert!(!product(6, 5, date).is_low_stock());
    }

    #[test]
    fn product_ten_days_out_is_expiring_soon() {
        let now = fixed_now();
        let p = product(10, 1, NaiveDate::from_ymd_opt(2025, 6, 11).unwrap());
        assert!(p.is_expiring_soon(now));
        // meia-noite de 11/06 está a 9,5 dias de 01/06 12:00 -> arredonda para 10
        assert_eq!(p.days_until_expiry(now), 10);
    }

    #[test]
    fn product_forty_days_out_is_not_expiring_soon() {
        let now = fixed_now();
        let p = product(10, 1, NaiveDate::from_ymd_opt(2025, 7, 11).unwrap());
        assert!(!p.is_expiring_soon(now));
    }

    #[test]
    fn already_expired_product_counts_as_expiring() {
        let now = fixed_now();
        let p = product(10, 1, NaiveDate::from_ymd_opt(2025, 5, 20).unwrap());
        assert!(p.is_expiring_soon(now));
        assert!(p.days_until_expiry(now) < 0);
    }

    #[test]
    fn negative_quantity_fails_validation() {
        let payload = CreateProductPayload {
            name: "Ibuprofeno".to_string(),
            sku: "IBU-200".to_string(),
            category: ProductCategory::Otc,
            quantity: -1,
            min_stock_level: 0,
            price: Decimal::ONE,
            expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            description: None,
            supplier_id: Uuid::new_v4(),
        };

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("quantity"));
    }

    #[test]
    fn negative_price_fails_validation() {
        let payload = CreateProductPayload {
            name: "Ibuprofeno".to_string(),
            sku: "IBU-200".to_string(),
            category: ProductCategory::Prescription,
            quantity: 1,
            min_stock_level: 0,
            price: Decimal::NEGATIVE_ONE,
            expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            description: None,
            supplier_id: Uuid::new_v4(),
        };

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn negative_stock_update_fails_validation() {
        let payload = UpdateStockPayload { quantity: -1 };
        assert!(payload.validate().is_err());
        assert!(UpdateStockPayload { quantity: 0 }.validate().is_ok());
    }

    #[test]
    fn category_serializes_as_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&ProductCategory::Otc).unwrap(),
            "\"OTC\""
        );
        assert_eq!(
            serde_json::to_string(&ProductCategory::Prescription).unwrap(),
            "\"PRESCRIPTION\""
        );
    }
}
