pub mod user_repo;
pub use user_repo::UserRepository;
pub mod business_repo;
pub use business_repo::BusinessRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod supplier_repo;
pub use supplier_repo::SupplierRepository;
pub mod activity_repo;
pub use activity_repo::ActivityRepository;
