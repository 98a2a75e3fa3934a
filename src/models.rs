pub mod activity;
pub mod auth;
pub mod business;
pub mod product;
pub mod report;
pub mod supplier;
