// src/db/activity_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::activity::{Activity, ActivityAction, ActivityEntity},
};

// Trilha de auditoria: só INSERT e SELECT, nunca UPDATE/DELETE.
#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        business_id: Uuid,
        action: ActivityAction,
        entity_type: ActivityEntity,
        entity_id: Uuid,
        details: &str,
    ) -> Result<Activity, AppError> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (business_id, action, entity_type, entity_id, details)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(business_id)
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .bind(details)
        .fetch_one(&self.pool)
        .await?;

        Ok(activity)
    }

    // Mais recentes primeiro, limitadas (o dashboard mostra 5)
    pub async fn recent(&self, business_id: Uuid, limit: i64) -> Result<Vec<Activity>, AppError> {
        let activities = sqlx::query_as::<_, Activity>(
            r#"
            SELECT * FROM activities
            WHERE business_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(business_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(activities)
    }
}
