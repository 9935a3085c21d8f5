//! Cookie consent widget UI
//!
//! MVVM split:
//! - view_model.rs: signals around the consent state machine, commands
//! - view.rs: Leptos components walking the projected widget tree

mod view;
mod view_model;

pub use view::CookieConsent;
pub use view_model::{ConsentServices, CookieConsentViewModel};
