pub mod consent_store;
pub mod cookie;
pub mod error;
pub mod style;
pub mod theme_bus;
