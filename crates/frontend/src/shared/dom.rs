//! DOM helpers: host capabilities and category declaration lookup.

use contracts::domain::a001_cookie_consent::{CategoryDeclaration, HostContext, MarkupNode, SlotStrategy};
use js_sys::{Array, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlSlotElement, Node, ShadowRoot};

pub const CONFIG_SLOT_SELECTOR: &str = r#"slot[name="config"]"#;
pub const CONFIG_ITEM_SELECTOR: &str = r#"[slot="config"]"#;

/// `web_sys::Node` seen as a category declaration candidate.
pub struct DomNode(pub Node);

impl MarkupNode for DomNode {
    fn is_element(&self) -> bool {
        self.0.node_type() == Node::ELEMENT_NODE
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.dyn_ref::<Element>()?.get_attribute(name)
    }

    fn outer_html(&self) -> String {
        self.0
            .dyn_ref::<Element>()
            .map(Element::outer_html)
            .unwrap_or_default()
    }
}

/// Whether the browser can attach shadow roots (`document.head.attachShadow`).
pub fn supports_shadow() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.head())
        .map(|head| Reflect::has(&head, &JsValue::from_str("attachShadow")).unwrap_or(false))
        .unwrap_or(false)
}

/// Whether `root` accepts constructable style sheets.
pub fn supports_adopted_sheets(root: &ShadowRoot) -> bool {
    Reflect::has(root, &JsValue::from_str("adoptedStyleSheets")).unwrap_or(false)
}

pub fn host_context(host: &HtmlElement) -> HostContext {
    let parent = host.parent_node().map(|parent| parent.node_name());
    HostContext::from_parent_tag(parent.as_deref())
}

/// Category declarations of `host`, read with `strategy`.
///
/// Both strategies return the same declarations; text nodes assigned to the
/// slot are skipped.
pub fn read_declarations(host: &HtmlElement, strategy: SlotStrategy) -> Vec<CategoryDeclaration> {
    let nodes = match strategy {
        SlotStrategy::AssignedNodes => assigned_nodes(host),
        SlotStrategy::DescendantQuery => queried_nodes(host),
    };
    CategoryDeclaration::from_nodes(nodes)
}

fn assigned_nodes(host: &HtmlElement) -> Vec<DomNode> {
    let slot = host
        .shadow_root()
        .and_then(|root| root.query_selector(CONFIG_SLOT_SELECTOR).ok().flatten())
        .and_then(|slot| slot.dyn_into::<HtmlSlotElement>().ok());

    match slot {
        Some(slot) => array_nodes(&slot.assigned_nodes()),
        None => {
            log::warn!("config slot not rendered yet, falling back to descendant query");
            queried_nodes(host)
        }
    }
}

fn queried_nodes(host: &HtmlElement) -> Vec<DomNode> {
    let Ok(list) = host.query_selector_all(CONFIG_ITEM_SELECTOR) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.item(index))
        .map(DomNode)
        .collect()
}

fn array_nodes(array: &Array) -> Vec<DomNode> {
    array
        .iter()
        .filter_map(|value| value.dyn_into::<Node>().ok())
        .map(DomNode)
        .collect()
}
