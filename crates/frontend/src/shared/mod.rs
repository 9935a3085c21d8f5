pub mod components;
pub mod cookie_store;
pub mod dom;
pub mod events;
pub mod modal;
pub mod theme;
