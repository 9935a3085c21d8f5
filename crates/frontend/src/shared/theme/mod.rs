//! Theme styling of mounted widgets.
//!
//! Themes live on a [`ThemeBus`]; every widget follows the bus through a
//! [`ThemeStyleApplier`] that is dropped, and thereby unsubscribed, together
//! with the widget.

pub mod style_injector;

use contracts::shared::error::ConsentResult;
use contracts::shared::style::ThemeStyleApplier;
use contracts::shared::theme_bus::{resolve_bus, ThemeBus};
use std::rc::Rc;
use web_sys::{HtmlElement, ShadowRoot};

pub use style_injector::select_injector;

/// Resolve the bus (injected first, page registry second) and start applying
/// the theme fragment registered under `tag`.
pub fn mount_theme_style(
    host: &HtmlElement,
    shadow: Option<&ShadowRoot>,
    bus: Option<Rc<dyn ThemeBus>>,
    tag: &str,
    theme: Option<String>,
) -> ConsentResult<ThemeStyleApplier> {
    let bus = resolve_bus(bus)?;
    let injector = select_injector(host, shadow);
    ThemeStyleApplier::mount(bus, injector, tag, theme)
}
