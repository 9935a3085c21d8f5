use crate::domain::a001_cookie_consent::ui::{ConsentServices, CookieConsent};
use crate::shared::cookie_store::DocumentCookieStore;
use crate::shared::dom::{host_context, supports_shadow};
use contracts::domain::a001_cookie_consent::WidgetConfig;
use contracts::shared::consent_store::{ConsentStore, MemoryConsentStore};
use contracts::shared::theme_bus::ThemeBus;
use leptos::prelude::*;
use std::any::Any;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ShadowRoot, ShadowRootInit, ShadowRootMode};

const ROOT_CLASS: &str = "cookie-consent-root";

/// A mounted widget. Dropping it (or calling `destroy` from JS) unmounts the
/// view and unsubscribes it from the theme bus.
#[wasm_bindgen]
pub struct CookieConsentHandle {
    mounted: Box<dyn Any>,
    container: HtmlElement,
}

#[wasm_bindgen]
impl CookieConsentHandle {
    /// Unmount the view and remove its container from the host.
    pub fn destroy(self) {
        log::debug!("destroying cookie consent widget");
        let Self { mounted, container } = self;
        drop(mounted);
        container.remove();
    }
}

/// Mount the widget into `host`.
///
/// `bus` and `store` are injected collaborators; without them the page-wide
/// theme bus and `document.cookie` are used.
pub fn mount_widget(
    host: HtmlElement,
    config: WidgetConfig,
    bus: Option<Rc<dyn ThemeBus>>,
    store: Option<Rc<dyn ConsentStore>>,
) -> Result<CookieConsentHandle, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document not available"))?;

    let shadow = if supports_shadow() {
        Some(shadow_root(&host)?)
    } else {
        None
    };

    let container = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str("widget container is not an HtmlElement"))?;
    container.set_class_name(ROOT_CLASS);
    match &shadow {
        Some(root) => root.append_child(&container)?,
        None => host.append_child(&container)?,
    };

    let store = store.unwrap_or_else(default_store);
    let services = ConsentServices {
        context: host_context(&host),
        host,
        shadow,
        store,
        bus,
    };

    let handle = leptos::mount::mount_to(container.clone(), move || {
        view! { <CookieConsent services=services config=config /> }
    });

    Ok(CookieConsentHandle {
        mounted: Box::new(handle),
        container,
    })
}

fn shadow_root(host: &HtmlElement) -> Result<ShadowRoot, JsValue> {
    match host.shadow_root() {
        Some(root) => Ok(root),
        None => host.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open)),
    }
}

fn default_store() -> Rc<dyn ConsentStore> {
    match DocumentCookieStore::from_window() {
        Ok(store) => Rc::new(store),
        Err(err) => {
            log::warn!("{}; consent kept in memory only", err);
            Rc::new(MemoryConsentStore::new())
        }
    }
}
