pub mod auth;
pub mod business;
pub mod products;
pub mod reports;
pub mod suppliers;
