pub mod auth;
pub mod activity_logger;
pub mod business_service;
pub mod product_service;
pub mod report_service;
pub mod supplier_service;
