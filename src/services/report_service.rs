// src/services/report_service.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ActivityRepository, SupplierRepository},
    models::{
        activity::Activity,
        product::{ExpiringProduct, ProductWithSupplier},
        report::InventoryStatus,
    },
    services::product_service::ProductService,
};

// O dashboard mostra as 5 atividades mais recentes
const RECENT_ACTIVITIES_LIMIT: i64 = 5;

// Uma passada só sobre os produtos do tenant: contagens, valor total
// (Σ preço × quantidade) e os alertas derivados. Recalculado a cada
// chamada; com o volume de dados por tenant, cache não compensa.
pub(crate) fn build_inventory_status(
    products: Vec<ProductWithSupplier>,
    total_suppliers: i64,
    now: DateTime<Utc>,
) -> InventoryStatus {
    let mut total_value = Decimal::ZERO;
    let mut low_stock_count = 0;
    let mut expiring_count = 0;

    for p in &products {
        total_value += p.product.price * Decimal::from(p.product.quantity);
        if p.product.is_low_stock() {
            low_stock_count += 1;
        }
        if p.product.is_expiring_soon(now) {
            expiring_count += 1;
        }
    }

    InventoryStatus {
        total_products: products.len(),
        total_value,
        low_stock_count,
        expiring_count,
        total_suppliers,
        products,
    }
}

#[derive(Clone)]
pub struct ReportService {
    product_service: ProductService,
    supplier_repo: SupplierRepository,
    activity_repo: ActivityRepository,
}

impl ReportService {
    pub fn new(
        product_service: ProductService,
        supplier_repo: SupplierRepository,
        activity_repo: ActivityRepository,
    ) -> Self {
        Self {
            product_service,
            supplier_repo,
            activity_repo,
        }
    }

    // Mesmo predicado da listagem de produtos e do dashboard; o relatório
    // não pode divergir das outras telas.
    pub async fn low_stock(&self, business_id: Uuid) -> Result<Vec<ProductWithSupplier>, AppError> {
        self.product_service.low_stock(business_id).await
    }

    pub async fn expiring_soon(&self, business_id: Uuid) -> Result<Vec<ExpiringProduct>, AppError> {
        self.product_service.expiring_soon(business_id).await
    }

    pub async fn inventory_status(&self, business_id: Uuid) -> Result<InventoryStatus, AppError> {
        let products = self.product_service.list(business_id).await?;
        let total_suppliers = self.supplier_repo.count(business_id).await?;
        Ok(build_inventory_status(products, total_suppliers, Utc::now()))
    }

    pub async fn recent_activities(&self, business_id: Uuid) -> Result<Vec<Activity>, AppError> {
        self.activity_repo
            .recent(business_id, RECENT_ACTIVITIES_LIMIT)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::{Product, ProductCategory};
    use chrono::{NaiveDate, TimeZone};

    fn product(
        quantity: i32,
        min_stock_level: i32,
        price: Decimal,
        expiry_date: NaiveDate,
    ) -> ProductWithSupplier {
        ProductWithSupplier {
            product: Product {
                id: Uuid::new_v4(),
                name: "Vitamina C".to_string(),
                sku: "VITC-1".to_string(),
                category: ProductCategory::Otc,
                quantity,
                min_stock_level,
                price,
                expiry_date,
                description: None,
                supplier_id: Uuid::new_v4(),
                business_id: Uuid::new_v4(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            supplier: None,
        }
    }

    #[test]
    fn aggregates_counts_and_total_value_in_one_pass() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let far = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let near = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        let products = vec![
            // 10 × 2.50 = 25.00, estoque ok, validade longe
            product(10, 2, Decimal::new(250, 2), far),
            // 1 × 10.00 = 10.00, estoque baixo (1 <= 5), vencendo
            product(1, 5, Decimal::new(1000, 2), near),
            // 0 × 3.00 = 0.00, estoque baixo
            product(0, 0, Decimal::new(300, 2), far),
        ];

        let status = build_inventory_status(products, 2, now);

        assert_eq!(status.total_products, 3);
        assert_eq!(status.total_value, Decimal::new(3500, 2));
        assert_eq!(status.low_stock_count, 2);
        assert_eq!(status.expiring_count, 1);
        assert_eq!(status.total_suppliers, 2);
        assert_eq!(status.products.len(), 3);
    }

    #[test]
    fn empty_tenant_yields_zeroed_status() {
        let status = build_inventory_status(vec![], 0, Utc::now());
        assert_eq!(status.total_products, 0);
        assert_eq!(status.total_value, Decimal::ZERO);
        assert_eq!(status.low_stock_count, 0);
        assert_eq!(status.expiring_count, 0);
        assert!(status.products.is_empty());
    }

    #[test]
    fn dashboard_low_stock_count_matches_the_product_predicate() {
        // A contagem do dashboard deriva do MESMO is_low_stock usado
        // na listagem; no limite (qtd == mínimo) ambos contam.
        let now = Utc::now();
        let far = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let boundary = product(5, 5, Decimal::ONE, far);
        assert!(boundary.product.is_low_stock());

        let status = build_inventory_status(vec![boundary], 0, now);
        assert_eq!(status.low_stock_count, 1);
    }
}
