pub mod app;
pub mod domain;
pub mod shared;

use contracts::domain::a001_cookie_consent::WidgetConfig;
use contracts::shared::theme_bus::{
    self, global_bus, register_global_bus, resolve_bus, LocalThemeBus, PublishedThemes,
    ThemeAction,
};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

pub use app::CookieConsentHandle;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Mount a cookie consent widget into `host`.
///
/// `config` is an optional object with the `WidgetConfig` fields
/// (`headline`, `mainButtonPrimary`, `inline`, ...).
#[wasm_bindgen(js_name = mountCookieConsent)]
pub fn mount_cookie_consent(host: HtmlElement, config: JsValue) -> Result<CookieConsentHandle, JsValue> {
    let config: WidgetConfig = if config.is_undefined() || config.is_null() {
        WidgetConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    app::mount_widget(host, config, None, None)
}

/// Register a theme: `{ [name]: { components: { default: {...}, ie: {...} } } }`.
#[wasm_bindgen(js_name = addTheme)]
pub fn add_theme(theme: JsValue) -> Result<(), JsValue> {
    let published: PublishedThemes = serde_wasm_bindgen::from_value(theme)?;
    let supports_shadow = shared::dom::supports_shadow();
    for package in published.into_packages() {
        theme_bus::add_theme(package, supports_shadow);
    }
    Ok(())
}

/// Switch the page-wide current theme.
#[wasm_bindgen(js_name = setTheme)]
pub fn set_theme(name: String) -> Result<(), JsValue> {
    let bus = resolve_bus(None).map_err(to_js)?;
    bus.dispatch(ThemeAction::SetCurrent(name));
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    if global_bus().is_none() {
        register_global_bus(Rc::new(LocalThemeBus::new()));
    }
}
