// src/services/product_service.rs

use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProductRepository, SupplierRepository},
    models::{
        activity::{ActivityAction, ActivityEntity},
        product::{
            CreateProductPayload, ExpiringProduct, Product, ProductWithSupplier,
            UpdateProductPayload,
        },
        supplier::Supplier,
    },
    services::activity_logger::ActivityLogger,
};

// Junta cada produto ao seu fornecedor (join em memória; os volumes por
// tenant são pequenos e as duas listas já vêm filtradas pelo business_id).
pub(crate) fn attach_suppliers(
    products: Vec<Product>,
    suppliers: &[Supplier],
) -> Vec<ProductWithSupplier> {
    let by_id: HashMap<Uuid, &Supplier> = suppliers.iter().map(|s| (s.id, s)).collect();
    products
        .into_iter()
        .map(|product| {
            let supplier = by_id.get(&product.supplier_id).map(|s| (*s).clone());
            ProductWithSupplier { product, supplier }
        })
        .collect()
}

#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
    supplier_repo: SupplierRepository,
    activity_logger: ActivityLogger,
    pool: PgPool,
}

impl ProductService {
    pub fn new(
        product_repo: ProductRepository,
        supplier_repo: SupplierRepository,
        activity_logger: ActivityLogger,
        pool: PgPool,
    ) -> Self {
        Self {
            product_repo,
            supplier_repo,
            activity_logger,
            pool,
        }
    }

    pub async fn list(&self, business_id: Uuid) -> Result<Vec<ProductWithSupplier>, AppError> {
        let products = self.product_repo.get_all(business_id).await?;
        let suppliers = self.supplier_repo.get_all(business_id).await?;
        Ok(attach_suppliers(products, &suppliers))
    }

    pub async fn get(&self, business_id: Uuid, id: Uuid) -> Result<ProductWithSupplier, AppError> {
        let product = self
            .product_repo
            .find_by_id(business_id, id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        let supplier = self
            .supplier_repo
            .find_by_id(business_id, product.supplier_id)
            .await?;

        Ok(ProductWithSupplier { product, supplier })
    }

    pub async fn create(
        &self,
        business_id: Uuid,
        payload: &CreateProductPayload,
    ) -> Result<Product, AppError> {
        // O fornecedor precisa existir E pertencer ao mesmo negócio;
        // referência cruzada entre tenants é proibida.
        self.supplier_repo
            .find_by_id(business_id, payload.supplier_id)
            .await?
            .ok_or(AppError::SupplierNotOwned)?;

        let product = self
            .product_repo
            .create(&self.pool, business_id, payload)
            .await?;

        self.activity_logger
            .log(
                business_id,
                ActivityAction::Added,
                ActivityEntity::Product,
                product.id,
                &format!("Added new product: {}", product.name),
            )
            .await;

        Ok(product)
    }

    pub async fn update(
        &self,
        business_id: Uuid,
        id: Uuid,
        payload: &UpdateProductPayload,
    ) -> Result<Product, AppError> {
        self.product_repo
            .find_by_id(business_id, id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        // Se o fornecedor está sendo trocado, revalida a posse
        if let Some(supplier_id) = payload.supplier_id {
            self.supplier_repo
                .find_by_id(business_id, supplier_id)
                .await?
                .ok_or(AppError::SupplierNotOwned)?;
        }

        let product = self
            .product_repo
            .update(&self.pool, business_id, id, payload)
            .await?;

        self.activity_logger
            .log(
                business_id,
                ActivityAction::Updated,
                ActivityEntity::Product,
                product.id,
                &format!("Updated product: {}", product.name),
            )
            .await;

        Ok(product)
    }

    // Define a quantidade absoluta. Chamadas repetidas com o mesmo valor são
    // idempotentes no estado, mas cada uma gera sua própria atividade.
    pub async fn update_stock(
        &self,
        business_id: Uuid,
        id: Uuid,
        quantity: i32,
    ) -> Result<Product, AppError> {
        self.product_repo
            .find_by_id(business_id, id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        let product = self
            .product_repo
            .update_quantity(&self.pool, business_id, id, quantity)
            .await?;

        self.activity_logger
            .log(
                business_id,
                ActivityAction::Updated,
                ActivityEntity::Product,
                product.id,
                &format!("Updated stock level for {} to {}", product.name, quantity),
            )
            .await;

        Ok(product)
    }

    pub async fn delete(&self, business_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let product = self
            .product_repo
            .find_by_id(business_id, id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        self.product_repo.delete(&self.pool, business_id, id).await?;

        self.activity_logger
            .log(
                business_id,
                ActivityAction::Deleted,
                ActivityEntity::Product,
                product.id,
                &format!("Deleted product: {}", product.name),
            )
            .await;

        Ok(())
    }

    pub async fn low_stock(&self, business_id: Uuid) -> Result<Vec<ProductWithSupplier>, AppError> {
        let products = self.product_repo.get_low_stock(business_id).await?;
        let suppliers = self.supplier_repo.get_all(business_id).await?;
        Ok(attach_suppliers(products, &suppliers))
    }

    // Produtos vencendo em menos de 30 dias, do mais próximo ao mais
    // distante, cada um com daysUntilExpiry calculado.
    pub async fn expiring_soon(&self, business_id: Uuid) -> Result<Vec<ExpiringProduct>, AppError> {
        let now = Utc::now();
        let products = self.product_repo.get_all_by_expiry(business_id).await?;
        let suppliers = self.supplier_repo.get_all(business_id).await?;

        let expiring = products
            .into_iter()
            .filter(|p| p.is_expiring_soon(now))
            .collect();

        Ok(attach_suppliers(expiring, &suppliers)
            .into_iter()
            .map(|p| {
                let days_until_expiry = p.product.days_until_expiry(now);
                ExpiringProduct {
                    product: p,
                    days_until_expiry,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::ProductCategory;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn supplier(id: Uuid, business_id: Uuid) -> Supplier {
        Supplier {
            id,
            name: "Distribuidora Alfa".to_string(),
            contact_person: None,
            email: None,
            phone: None,
            business_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn product(supplier_id: Uuid, business_id: Uuid) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Dipirona 1g".to_string(),
            sku: "DIP-1000".to_string(),
            category: ProductCategory::Otc,
            quantity: 10,
            min_stock_level: 2,
            price: Decimal::new(990, 2),
            expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            description: None,
            supplier_id,
            business_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn attach_suppliers_matches_by_id() {
        let business_id = Uuid::new_v4();
        let s = supplier(Uuid::new_v4(), business_id);
        let p = product(s.id, business_id);
        let orphan = product(Uuid::new_v4(), business_id);

        let joined = attach_suppliers(vec![p.clone(), orphan], &[s.clone()]);

        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].supplier.as_ref().unwrap().id, s.id);
        assert!(joined[1].supplier.is_none());
    }
}
