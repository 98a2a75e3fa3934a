// src/db/business_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::business::{BusinessProfile, UpdateBusinessPayload},
};

#[derive(Clone)]
pub struct BusinessRepository {
    pool: PgPool,
}

impl BusinessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca o perfil pelo dono (a relação é 1-para-1 via UNIQUE em user_id)
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<BusinessProfile>, AppError> {
        let maybe_profile = sqlx::query_as::<_, BusinessProfile>(
            "SELECT * FROM business_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_profile)
    }

    // Cria o perfil do usuário. O índice único em user_id garante o
    // invariante "um perfil por usuário" mesmo sob criações concorrentes.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        name: &str,
        address: &str,
        phone: Option<&str>,
        email: &str,
    ) -> Result<BusinessProfile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, BusinessProfile>(
            r#"
            INSERT INTO business_profiles (name, address, phone, email, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(email)
        .bind(user_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::BusinessProfileAlreadyExists;
                }
            }
            e.into()
        })
    }

    // Atualização parcial: campos ausentes mantêm o valor atual (COALESCE)
    pub async fn update<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        payload: &UpdateBusinessPayload,
    ) -> Result<BusinessProfile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile = sqlx::query_as::<_, BusinessProfile>(
            r#"
            UPDATE business_profiles
            SET name = COALESCE($2, name),
                address = COALESCE($3, address),
                phone = COALESCE($4, phone),
                email = COALESCE($5, email),
                updated_at = now()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(payload.name.as_deref())
        .bind(payload.address.as_deref())
        .bind(payload.phone.as_deref())
        .bind(payload.email.as_deref())
        .fetch_one(executor)
        .await?;

        Ok(profile)
    }
}
