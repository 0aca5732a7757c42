pub mod error;
pub mod repository;
pub mod user;
pub mod validation;
