// src/models/business.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::product::ProductWithSupplier;
use crate::models::supplier::SupplierWithProducts;

// ---
// 1. BusinessProfile (O "Tenant")
// ---
// Todo fornecedor, produto e atividade pertence a exatamente um perfil.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// Validação de telefone
// ---
// Aceita um '+' opcional seguido de pelo menos 8 dígitos/espaços/hífens.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    let valid_chars = rest
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-');

    if rest.len() < 8 || !valid_chars {
        let mut err = ValidationError::new("phone");
        err.message = Some("Invalid phone number format".into());
        return Err(err);
    }
    Ok(())
}

// Payload de criação do perfil
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessPayload {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Business name must be between 2 and 100 characters"
    ))]
    pub name: String,

    pub address: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

// Payload de atualização (parcial): só valida os campos enviados
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBusinessPayload {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Business name must be between 2 and 100 characters"
    ))]
    pub name: Option<String>,

    pub address: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

// Contadores exibidos no gate de setup do cliente
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessStats {
    pub total_products: i64,
    pub total_suppliers: i64,
}

// Resposta do GET /business/status (nunca falha: sempre 200)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStatusResponse {
    pub is_setup: bool,
    pub profile: Option<BusinessProfile>,
    pub stats: Option<BusinessStats>,
}

// Perfil com as coleções aninhadas (GET /business)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfileDetail {
    #[serde(flatten)]
    pub profile: BusinessProfile,
    pub products: Vec<ProductWithSupplier>,
    pub suppliers: Vec<SupplierWithProducts>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_payload() -> CreateBusinessPayload {
        CreateBusinessPayload {
            name: "Farmácia Central".to_string(),
            address: "Rua A, 123".to_string(),
            phone: None,
            email: "contact@central.com".to_string(),
        }
    }

    #[test]
    fn name_with_one_char_is_rejected_with_exact_message() {
        let mut payload = base_payload();
        payload.name = "F".to_string();

        let errors = payload.validate().unwrap_err();
        let messages: Vec<String> = errors
            .field_errors()
            .get("name")
            .unwrap()
            .iter()
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect();

        assert_eq!(
            messages,
            vec!["Business name must be between 2 and 100 characters"]
        );
    }

    #[test]
    fn all_invalid_fields_are_reported_at_once() {
        let payload = CreateBusinessPayload {
            name: "X".to_string(),
            address: "Rua A".to_string(),
            phone: Some("abc".to_string()),
            email: "not-an-email".to_string(),
        };

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone"));
    }

    #[test]
    fn phone_formats() {
        assert!(validate_phone("+55 11 99999-0000").is_ok());
        assert!(validate_phone("11999990000").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("abcdefgh").is_err());
    }

    #[test]
    fn valid_payload_passes() {
        assert!(base_payload().validate().is_ok());
    }
}
