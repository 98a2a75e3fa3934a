// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::db::{
    ActivityRepository, BusinessRepository, ProductRepository, SupplierRepository, UserRepository,
};
use crate::services::{
    activity_logger::ActivityLogger, auth::AuthService, business_service::BusinessService,
    product_service::ProductService, report_service::ReportService,
    supplier_service::SupplierService,
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub business_service: BusinessService,
    pub product_service: ProductService,
    pub supplier_service: SupplierService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let business_repo = BusinessRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let supplier_repo = SupplierRepository::new(db_pool.clone());
        let activity_repo = ActivityRepository::new(db_pool.clone());

        let activity_logger = ActivityLogger::new(activity_repo.clone());

        let auth_service = AuthService::new(
            user_repo,
            business_repo.clone(),
            jwt_secret,
            db_pool.clone(),
        );
        let business_service = BusinessService::new(
            business_repo,
            product_repo.clone(),
            supplier_repo.clone(),
            db_pool.clone(),
        );
        let product_service = ProductService::new(
            product_repo.clone(),
            supplier_repo.clone(),
            activity_logger.clone(),
            db_pool.clone(),
        );
        let supplier_service = SupplierService::new(
            supplier_repo.clone(),
            product_repo,
            activity_logger,
            db_pool.clone(),
        );
        let report_service =
            ReportService::new(product_service.clone(), supplier_repo, activity_repo);

        Ok(Self {
            db_pool,
            auth_service,
            business_service,
            product_service,
            supplier_service,
            report_service,
        })
    }
}
