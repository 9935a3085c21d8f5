use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::JsValue;
use web_sys::{CustomEvent, CustomEventInit, EventTarget};

pub const COOKIE_SAVED_EVENT: &str = "cookieSaved";
pub const COOKIE_ERROR_EVENT: &str = "cookieError";

/// Dispatch a bubbling `CustomEvent` whose `detail` is `detail` as plain JSON.
pub fn dispatch_detail<T: Serialize>(
    target: &EventTarget,
    name: &str,
    detail: &T,
) -> Result<bool, JsValue> {
    let detail = detail
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(name, &init)?;
    target.dispatch_event(&event)
}
