//! The two ways of installing theme CSS into the widget's scope.

use crate::shared::dom::supports_adopted_sheets;
use contracts::shared::error::{ConsentError, ConsentResult};
use contracts::shared::style::{swap_sheets, StyleInjector};
use js_sys::{Array, Reflect};
use std::cell::RefCell;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleSheet, Element, HtmlElement, Node, ShadowRoot};

pub const THEME_STYLE_ID: &str = "themeStyle";
const THEME_STYLE_SELECTOR: &str = "#themeStyle";
const ADOPTED_SHEETS: &str = "adoptedStyleSheets";

fn style_error(err: JsValue) -> ConsentError {
    ConsentError::Style(format!("{:?}", err))
}

/// Constructable style sheet appended to `shadowRoot.adoptedStyleSheets`.
pub struct AdoptedSheetInjector {
    root: ShadowRoot,
    own: RefCell<Option<JsValue>>,
}

impl AdoptedSheetInjector {
    pub fn new(root: ShadowRoot) -> Self {
        Self {
            root,
            own: RefCell::new(None),
        }
    }

    fn sheets(&self) -> ConsentResult<Vec<JsValue>> {
        let current = Reflect::get(&self.root, &JsValue::from_str(ADOPTED_SHEETS)).map_err(style_error)?;
        Ok(current
            .dyn_into::<Array>()
            .map(|array| array.iter().collect())
            .unwrap_or_default())
    }

    fn set_sheets(&self, sheets: Vec<JsValue>) -> ConsentResult<()> {
        let array: Array = sheets.into_iter().collect();
        Reflect::set(&self.root, &JsValue::from_str(ADOPTED_SHEETS), &array).map_err(style_error)?;
        Ok(())
    }
}

impl StyleInjector for AdoptedSheetInjector {
    fn apply(&self, css: &str) -> ConsentResult<()> {
        let sheet = CssStyleSheet::new().map_err(style_error)?;
        sheet.replace_sync(css).map_err(style_error)?;
        let sheet: JsValue = sheet.into();

        let current = self.sheets()?;
        let next = swap_sheets(&current, self.own.borrow().as_ref(), sheet.clone());
        self.set_sheets(next)?;
        self.own.replace(Some(sheet));
        Ok(())
    }

    fn clear(&self) -> ConsentResult<()> {
        let Some(own) = self.own.take() else {
            return Ok(());
        };
        let remaining = self.sheets()?.into_iter().filter(|sheet| *sheet != own).collect();
        self.set_sheets(remaining)
    }

    fn strategy(&self) -> &'static str {
        "adopted-stylesheet"
    }
}

/// `<style id="themeStyle">` node at the top of the scope.
pub struct StyleNodeInjector {
    scope: Node,
}

impl StyleNodeInjector {
    pub fn new(scope: Node) -> Self {
        Self { scope }
    }

    fn existing(&self) -> Option<Element> {
        if let Some(root) = self.scope.dyn_ref::<ShadowRoot>() {
            return root.query_selector(THEME_STYLE_SELECTOR).ok().flatten();
        }
        self.scope
            .dyn_ref::<Element>()?
            .query_selector(THEME_STYLE_SELECTOR)
            .ok()
            .flatten()
    }
}

impl StyleInjector for StyleNodeInjector {
    fn apply(&self, css: &str) -> ConsentResult<()> {
        if let Some(style) = self.existing() {
            style.set_text_content(Some(css));
            return Ok(());
        }

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ConsentError::Style("document not available".to_string()))?;
        let style = document.create_element("style").map_err(style_error)?;
        style.set_id(THEME_STYLE_ID);
        style.set_text_content(Some(css));
        self.scope
            .insert_before(&style, self.scope.first_child().as_ref())
            .map_err(style_error)?;
        Ok(())
    }

    fn clear(&self) -> ConsentResult<()> {
        if let Some(style) = self.existing() {
            style.remove();
        }
        Ok(())
    }

    fn strategy(&self) -> &'static str {
        "style-node"
    }
}

/// Pick the injector for this host once, at mount.
pub fn select_injector(host: &HtmlElement, shadow: Option<&ShadowRoot>) -> Box<dyn StyleInjector> {
    match shadow {
        Some(root) if supports_adopted_sheets(root) => Box::new(AdoptedSheetInjector::new(root.clone())),
        Some(root) => Box::new(StyleNodeInjector::new(root.clone().into())),
        None => Box::new(StyleNodeInjector::new(host.clone().into())),
    }
}
