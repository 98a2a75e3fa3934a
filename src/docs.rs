// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,
        handlers::auth::change_password,

        // --- Business ---
        handlers::business::create_business,
        handlers::business::get_business,
        handlers::business::update_business,
        handlers::business::get_business_status,

        // --- Products ---
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::update_product_stock,
        handlers::products::delete_product,
        handlers::products::list_low_stock_products,

        // --- Suppliers ---
        handlers::suppliers::list_suppliers,
        handlers::suppliers::get_supplier,
        handlers::suppliers::create_supplier,
        handlers::suppliers::update_supplier,
        handlers::suppliers::delete_supplier,

        // --- Reports ---
        handlers::reports::low_stock_report,
        handlers::reports::expiring_soon_report,
        handlers::reports::inventory_status_report,
        handlers::reports::recent_activities_report,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::CurrentUser,
            models::auth::RegisterPayload,
            models::auth::LoginPayload,
            models::auth::ChangePasswordPayload,
            models::auth::AuthResponse,
            models::auth::MeResponse,

            // --- Business ---
            models::business::BusinessProfile,
            models::business::BusinessProfileDetail,
            models::business::BusinessStats,
            models::business::ProfileStatusResponse,
            models::business::CreateBusinessPayload,
            models::business::UpdateBusinessPayload,

            // --- Products ---
            models::product::ProductCategory,
            models::product::Product,
            models::product::ProductWithSupplier,
            models::product::ExpiringProduct,
            models::product::CreateProductPayload,
            models::product::UpdateProductPayload,
            models::product::UpdateStockPayload,
            models::product::ProductListResponse,

            // --- Suppliers ---
            models::supplier::Supplier,
            models::supplier::SupplierWithProducts,
            models::supplier::CreateSupplierPayload,
            models::supplier::UpdateSupplierPayload,
            models::supplier::SupplierListResponse,

            // --- Activity / Reports ---
            models::activity::ActivityAction,
            models::activity::ActivityEntity,
            models::activity::Activity,
            models::report::InventoryStatus,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Business", description = "Perfil do Negócio (um por usuário)"),
        (name = "Products", description = "Gestão de Produtos e Estoque"),
        (name = "Suppliers", description = "Gestão de Fornecedores"),
        (name = "Reports", description = "Relatórios e Indicadores do Estoque")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
