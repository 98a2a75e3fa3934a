// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Json, Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de conta (token obrigatório)
    let account_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/change-password", put(handlers::auth::change_password))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Perfil do negócio: o guard só exige o token; criar o perfil é
    // justamente o que essas rotas fazem.
    let business_routes = Router::new()
        .route(
            "/",
            post(handlers::business::create_business)
                .get(handlers::business::get_business)
                .put(handlers::business::update_business),
        )
        .route("/status", get(handlers::business::get_business_status))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Daqui para baixo, os handlers extraem o BusinessContext: sem perfil
    // criado, a rota responde 400 antes de tocar no banco.
    let product_routes = Router::new()
        .route(
            "/",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/low-stock",
            get(handlers::products::list_low_stock_products),
        )
        .route(
            "/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route(
            "/{id}/stock",
            patch(handlers::products::update_product_stock),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let supplier_routes = Router::new()
        .route(
            "/",
            get(handlers::suppliers::list_suppliers).post(handlers::suppliers::create_supplier),
        )
        .route(
            "/{id}",
            get(handlers::suppliers::get_supplier)
                .put(handlers::suppliers::update_supplier)
                .delete(handlers::suppliers::delete_supplier),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let report_routes = Router::new()
        .route("/low-stock", get(handlers::reports::low_stock_report))
        .route(
            "/expiring-soon",
            get(handlers::reports::expiring_soon_report),
        )
        .route(
            "/inventory-status",
            get(handlers::reports::inventory_status_report),
        )
        .route(
            "/recent-activities",
            get(handlers::reports::recent_activities_report),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .nest("/api/auth", auth_routes.merge(account_routes))
        .nest("/api/business", business_routes)
        .nest("/api/products", product_routes)
        .nest("/api/suppliers", supplier_routes)
        .nest("/api/reports", report_routes)
        .with_state(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
