pub mod dragon;
pub mod loader;
pub mod models;
