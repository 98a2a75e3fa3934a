// src/services/supplier_service.rs

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProductRepository, SupplierRepository},
    models::{
        activity::{ActivityAction, ActivityEntity},
        product::Product,
        supplier::{CreateSupplierPayload, Supplier, SupplierWithProducts, UpdateSupplierPayload},
    },
    services::activity_logger::ActivityLogger,
};

// Agrupa os produtos de cada fornecedor (join em memória, tenant pequeno)
pub(crate) fn attach_products(
    suppliers: Vec<Supplier>,
    products: Vec<Product>,
) -> Vec<SupplierWithProducts> {
    let mut by_supplier: HashMap<Uuid, Vec<Product>> = HashMap::new();
    for product in products {
        by_supplier.entry(product.supplier_id).or_default().push(product);
    }

    suppliers
        .into_iter()
        .map(|supplier| {
            let products = by_supplier.remove(&supplier.id).unwrap_or_default();
            SupplierWithProducts { supplier, products }
        })
        .collect()
}

#[derive(Clone)]
pub struct SupplierService {
    supplier_repo: SupplierRepository,
    product_repo: ProductRepository,
    activity_logger: ActivityLogger,
    pool: PgPool,
}

impl SupplierService {
    pub fn new(
        supplier_repo: SupplierRepository,
        product_repo: ProductRepository,
        activity_logger: ActivityLogger,
        pool: PgPool,
    ) -> Self {
        Self {
            supplier_repo,
            product_repo,
            activity_logger,
            pool,
        }
    }

    pub async fn list(&self, business_id: Uuid) -> Result<Vec<SupplierWithProducts>, AppError> {
        let suppliers = self.supplier_repo.get_all(business_id).await?;
        let products = self.product_repo.get_all(business_id).await?;
        Ok(attach_products(suppliers, products))
    }

    pub async fn get(&self, business_id: Uuid, id: Uuid) -> Result<SupplierWithProducts, AppError> {
        let supplier = self
            .supplier_repo
            .find_by_id(business_id, id)
            .await?
            .ok_or(AppError::SupplierNotFound)?;

        let products = self.product_repo.get_by_supplier(business_id, id).await?;
        Ok(SupplierWithProducts { supplier, products })
    }

    pub async fn create(
        &self,
        business_id: Uuid,
        payload: &CreateSupplierPayload,
    ) -> Result<Supplier, AppError> {
        let supplier = self
            .supplier_repo
            .create(&self.pool, business_id, payload)
            .await?;

        self.activity_logger
            .log(
                business_id,
                ActivityAction::Added,
                ActivityEntity::Supplier,
                supplier.id,
                &format!("Added new supplier: {}", supplier.name),
            )
            .await;

        Ok(supplier)
    }

    pub async fn update(
        &self,
        business_id: Uuid,
        id: Uuid,
        payload: &UpdateSupplierPayload,
    ) -> Result<Supplier, AppError> {
        self.supplier_repo
            .find_by_id(business_id, id)
            .await?
            .ok_or(AppError::SupplierNotFound)?;

        let supplier = self
            .supplier_repo
            .update(&self.pool, business_id, id, payload)
            .await?;

        self.activity_logger
            .log(
                business_id,
                ActivityAction::Updated,
                ActivityEntity::Supplier,
                supplier.id,
                &format!("Updated supplier: {}", supplier.name),
            )
            .await;

        Ok(supplier)
    }

    // Deletar é bloqueado enquanto houver produtos apontando para o
    // fornecedor; o chamador precisa realocar ou remover os produtos antes.
    pub async fn delete(&self, business_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let supplier = self
            .supplier_repo
            .find_by_id(business_id, id)
            .await?
            .ok_or(AppError::SupplierNotFound)?;

        let product_count = self.product_repo.count_by_supplier(business_id, id).await?;
        if product_count > 0 {
            return Err(AppError::SupplierHasProducts);
        }

        self.supplier_repo.delete(&self.pool, business_id, id).await?;

        self.activity_logger
            .log(
                business_id,
                ActivityAction::Deleted,
                ActivityEntity::Supplier,
                supplier.id,
                &format!("Deleted supplier: {}", supplier.name),
            )
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::ProductCategory;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn supplier(business_id: Uuid) -> Supplier {
        Supplier {
            id: Uuid::new_v4(),
            name: "Distribuidora Beta".to_string(),
            contact_person: Some("Ana".to_string()),
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
            name: "Amoxicilina 500mg".to_string(),
            sku: "AMOX-500".to_string(),
            category: ProductCategory::Prescription,
            quantity: 3,
            min_stock_level: 1,
            price: Decimal::new(2550, 2),
            expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            description: None,
            supplier_id,
            business_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn attach_products_groups_by_supplier() {
        let business_id = Uuid::new_v4();
        let s1 = supplier(business_id);
        let s2 = supplier(business_id);
        let products = vec![
            product(s1.id, business_id),
            product(s1.id, business_id),
            product(s2.id, business_id),
        ];

        let joined = attach_products(vec![s1.clone(), s2.clone()], products);

        assert_eq!(joined[0].products.len(), 2);
        assert_eq!(joined[1].products.len(), 1);
    }

    #[test]
    fn supplier_without_products_gets_an_empty_list() {
        let business_id = Uuid::new_v4();
        let s = supplier(business_id);
        let joined = attach_products(vec![s], vec![]);
        assert!(joined[0].products.is_empty());
    }
}
