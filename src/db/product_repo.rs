// src/db/product_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::product::{CreateProductPayload, Product, UpdateProductPayload},
};

// Todas as consultas recebem o business_id e filtram por ele.
// Esse filtro é o único mecanismo de isolamento entre tenants:
// uma linha de outro negócio simplesmente "não existe" para a consulta.
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self, business_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE business_id = $1 ORDER BY name ASC",
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // Ordenado por validade: alimenta o relatório de "vencendo em breve"
    pub async fn get_all_by_expiry(&self, business_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE business_id = $1 ORDER BY expiry_date ASC",
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // Estoque baixo: quantidade <= nível mínimo (mesmo predicado de Product::is_low_stock)
    pub async fn get_low_stock(&self, business_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE business_id = $1 AND quantity <= min_stock_level
            ORDER BY name ASC
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn find_by_id(
        &self,
        business_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Product>, AppError> {
        let maybe_product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $1 AND business_id = $2",
        )
        .bind(id)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_product)
    }

    pub async fn get_by_supplier(
        &self,
        business_id: Uuid,
        supplier_id: Uuid,
    ) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE business_id = $1 AND supplier_id = $2
            ORDER BY name ASC
            "#,
        )
        .bind(business_id)
        .bind(supplier_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn count_by_supplier(
        &self,
        business_id: Uuid,
        supplier_id: Uuid,
    ) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE business_id = $1 AND supplier_id = $2",
        )
        .bind(business_id)
        .bind(supplier_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn count(&self, business_id: Uuid) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE business_id = $1")
                .bind(business_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        business_id: Uuid,
        payload: &CreateProductPayload,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (name, sku, category, quantity, min_stock_level, price,
                 expiry_date, description, supplier_id, business_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.sku)
        .bind(payload.category)
        .bind(payload.quantity)
        .bind(payload.min_stock_level)
        .bind(payload.price)
        .bind(payload.expiry_date)
        .bind(payload.description.as_deref())
        .bind(payload.supplier_id)
        .bind(business_id)
        .fetch_one(executor)
        .await?;

        Ok(product)
    }

    // Atualização parcial: campos ausentes mantêm o valor atual
    pub async fn update<'e, E>(
        &self,
        executor: E,
        business_id: Uuid,
        id: Uuid,
        payload: &UpdateProductPayload,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = COALESCE($3, name),
                sku = COALESCE($4, sku),
                category = COALESCE($5, category),
                quantity = COALESCE($6, quantity),
                min_stock_level = COALESCE($7, min_stock_level),
                price = COALESCE($8, price),
                expiry_date = COALESCE($9, expiry_date),
                description = COALESCE($10, description),
                supplier_id = COALESCE($11, supplier_id),
                updated_at = now()
            WHERE id = $1 AND business_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(business_id)
        .bind(payload.name.as_deref())
        .bind(payload.sku.as_deref())
        .bind(payload.category)
        .bind(payload.quantity)
        .bind(payload.min_stock_level)
        .bind(payload.price)
        .bind(payload.expiry_date)
        .bind(payload.description.as_deref())
        .bind(payload.supplier_id)
        .fetch_one(executor)
        .await?;

        Ok(product)
    }

    // Define a quantidade absoluta (PATCH /products/{id}/stock)
    pub async fn update_quantity<'e, E>(
        &self,
        executor: E,
        business_id: Uuid,
        id: Uuid,
        quantity: i32,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET quantity = $3, updated_at = now()
            WHERE id = $1 AND business_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(business_id)
        .bind(quantity)
        .fetch_one(executor)
        .await?;

        Ok(product)
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        business_id: Uuid,
        id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM products WHERE id = $1 AND business_id = $2")
            .bind(id)
            .bind(business_id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
