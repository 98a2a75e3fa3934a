// src/models/activity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// O que aconteceu com a entidade
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "activity_action", rename_all = "lowercase")] // Banco
#[serde(rename_all = "lowercase")] // JSON
pub enum ActivityAction {
    Added,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "activity_entity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActivityEntity {
    Product,
    Supplier,
}

// Registro de auditoria: append-only, nunca atualizado nem removido.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub business_id: Uuid,
    pub action: ActivityAction,
    pub entity_type: ActivityEntity,
    pub entity_id: Uuid,
    pub details: String,
    pub created_at: DateTime<Utc>,
}
