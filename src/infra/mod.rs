pub mod cache;
pub mod email;
pub mod factory;
pub mod repositories;
