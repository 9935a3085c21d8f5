use contracts::shared::consent_store::ConsentStore;
use contracts::shared::cookie::{
    confirm_written, find_cookie, format_remove_cookie, format_set_cookie, CookieOptions,
};
use contracts::shared::error::{ConsentError, ConsentResult};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlDocument;

/// [`ConsentStore`] on top of `document.cookie`.
pub struct DocumentCookieStore {
    document: HtmlDocument,
}

impl DocumentCookieStore {
    pub fn from_window() -> ConsentResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ConsentError::Store("document not available".to_string()))?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| ConsentError::Store("document has no cookie jar".to_string()))?;
        Ok(Self { document })
    }
}

pub(crate) fn store_error(err: JsValue) -> ConsentError {
    ConsentError::Store(format!("{:?}", err))
}

impl ConsentStore for DocumentCookieStore {
    fn get(&self, name: &str) -> ConsentResult<Option<String>> {
        let header = self.document.cookie().map_err(store_error)?;
        Ok(find_cookie(&header, name))
    }

    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> ConsentResult<()> {
        self.document
            .set_cookie(&format_set_cookie(name, value, options))
            .map_err(store_error)?;
        let header = self.document.cookie().map_err(store_error)?;
        confirm_written(&header, name, value)
    }

    fn remove(&self, name: &str) -> ConsentResult<()> {
        self.document
            .set_cookie(&format_remove_cookie(name, &CookieOptions::default()))
            .map_err(store_error)
    }
}
