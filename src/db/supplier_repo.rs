// src/db/supplier_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::supplier::{CreateSupplierPayload, Supplier, UpdateSupplierPayload},
};

#[derive(Clone)]
pub struct SupplierRepository {
    pool: PgPool,
}

impl SupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self, business_id: Uuid) -> Result<Vec<Supplier>, AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            "SELECT * FROM suppliers WHERE business_id = $1 ORDER BY name ASC",
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(suppliers)
    }

    // Também é a checagem de posse usada antes de vincular um produto:
    // fornecedor de outro tenant retorna None, nunca a linha alheia.
    pub async fn find_by_id(
        &self,
        business_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Supplier>, AppError> {
        let maybe_supplier = sqlx::query_as::<_, Supplier>(
            "SELECT * FROM suppliers WHERE id = $1 AND business_id = $2",
        )
        .bind(id)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_supplier)
    }

    pub async fn count(&self, business_id: Uuid) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM suppliers WHERE business_id = $1")
                .bind(business_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        business_id: Uuid,
        payload: &CreateSupplierPayload,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, contact_person, email, phone, business_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(payload.contact_person.as_deref())
        .bind(payload.email.as_deref())
        .bind(payload.phone.as_deref())
        .bind(business_id)
        .fetch_one(executor)
        .await?;

        Ok(supplier)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        business_id: Uuid,
        id: Uuid,
        payload: &UpdateSupplierPayload,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET name = COALESCE($3, name),
                contact_person = COALESCE($4, contact_person),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                updated_at = now()
            WHERE id = $1 AND business_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(business_id)
        .bind(payload.name.as_deref())
        .bind(payload.contact_person.as_deref())
        .bind(payload.email.as_deref())
        .bind(payload.phone.as_deref())
        .fetch_one(executor)
        .await?;

        Ok(supplier)
    }

    // A FK de products.supplier_id cobre a corrida entre a pré-checagem de
    // produtos do serviço e o DELETE: um produto criado no meio do caminho
    // produz a mesma resposta 400 da pré-checagem.
    pub async fn delete<'e, E>(
        &self,
        executor: E,
        business_id: Uuid,
        id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM suppliers WHERE id = $1 AND business_id = $2")
            .bind(id)
            .bind(business_id)
            .execute(executor)
            .await
            .map_err(map_delete_error)?;
        Ok(())
    }
}

fn map_delete_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return AppError::SupplierHasProducts;
        }
    }
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};

    #[derive(Debug)]
    struct FkViolation;

    impl std::fmt::Display for FkViolation {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "violates foreign key constraint")
        }
    }

    impl std::error::Error for FkViolation {}

    impl DatabaseError for FkViolation {
        fn message(&self) -> &str {
            "violates foreign key constraint"
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::ForeignKeyViolation
        }

        fn constraint(&self) -> Option<&str> {
            Some("products_supplier_id_fkey")
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn fk_violation_on_delete_becomes_the_products_conflict() {
        // Produto criado entre a contagem do serviço e o DELETE: mesma
        // resposta que a pré-checagem teria dado.
        let err = map_delete_error(sqlx::Error::Database(Box::new(FkViolation)));
        assert!(matches!(err, AppError::SupplierHasProducts));
    }

    #[test]
    fn other_delete_errors_pass_through() {
        let err = map_delete_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::DatabaseError(_)));
    }
}
