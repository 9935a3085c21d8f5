use serde::{Deserialize, Serialize};

/// One consent topic shown as a navigation entry and a content panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Derived from `title`, see [`derive_id`].
    pub id: String,
    /// Explicit machine key; wins over `id` when present.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: String,
    /// Overview text.
    pub description: Option<String>,
    /// Raw declaration markup rendered inside the panel.
    pub content: String,
    pub toggable: bool,
    pub mandatory: bool,
    pub checked: bool,
}

impl Category {
    /// Key used in the consent record.
    pub fn key(&self) -> &str {
        self.kind
            .as_deref()
            .filter(|kind| !kind.is_empty())
            .unwrap_or(&self.id)
    }

    /// Locked categories cannot be toggled by the user.
    pub fn is_locked(&self) -> bool {
        !self.toggable || self.mandatory
    }
}

/// Stable identifier for a human readable label.
///
/// ASCII letter runs are title-cased and concatenated:
/// `"Statistics & analytics"` -> `"StatisticsAnalytics"`. A label without
/// letters yields an empty id.
pub fn derive_id(text: &str) -> String {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_ascii_lowercase();
            let (first, rest) = lower.split_at(1);
            format!("{}{}", first.to_ascii_uppercase(), rest)
        })
        .collect()
}

/// A node assigned to (or queried for) the `config` slot.
pub trait MarkupNode {
    /// `false` for text and comment nodes.
    fn is_element(&self) -> bool;

    fn attribute(&self, name: &str) -> Option<String>;

    fn outer_html(&self) -> String;
}

/// How the host exposes the category declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStrategy {
    /// `slot.assignedNodes()` under a shadow root.
    AssignedNodes,
    /// `querySelectorAll('[slot="config"]')` on the host.
    DescendantQuery,
}

impl SlotStrategy {
    pub fn for_host(supports_shadow: bool) -> Self {
        if supports_shadow {
            SlotStrategy::AssignedNodes
        } else {
            SlotStrategy::DescendantQuery
        }
    }
}

/// Attributes of one declared category, as written by the host page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryDeclaration {
    pub text: String,
    pub kind: Option<String>,
    pub intro: Option<String>,
    pub toggable: bool,
    pub mandatory: bool,
    pub checked: bool,
    pub content: String,
}

impl CategoryDeclaration {
    /// Read a declaration off an element node. Text nodes yield `None`.
    pub fn from_node<N: MarkupNode + ?Sized>(node: &N) -> Option<Self> {
        if !node.is_element() {
            return None;
        }
        Some(Self {
            text: node.attribute("text").unwrap_or_default(),
            kind: node.attribute("type"),
            intro: node.attribute("intro"),
            toggable: node.attribute("toggable").as_deref() != Some("false"),
            mandatory: node.attribute("mandatory").as_deref() == Some("true"),
            checked: node.attribute("checked").as_deref() == Some("true"),
            content: node.outer_html(),
        })
    }

    pub fn from_nodes<N, I>(nodes: I) -> Vec<Self>
    where
        N: MarkupNode,
        I: IntoIterator<Item = N>,
    {
        nodes
            .into_iter()
            .filter_map(|node| Self::from_node(&node))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Markup node double: `None` attributes means a text node.
    #[derive(Clone, Default)]
    struct FakeNode {
        attributes: Option<HashMap<String, String>>,
    }

    impl FakeNode {
        fn element(attributes: &[(&str, &str)]) -> Self {
            Self {
                attributes: Some(
                    attributes
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                ),
            }
        }

        fn text() -> Self {
            Self { attributes: None }
        }
    }

    impl MarkupNode for FakeNode {
        fn is_element(&self) -> bool {
            self.attributes.is_some()
        }

        fn attribute(&self, name: &str) -> Option<String> {
            self.attributes.as_ref()?.get(name).cloned()
        }

        fn outer_html(&self) -> String {
            let text = self.attribute("text").unwrap_or_default();
            format!(r#"<c-cookie-item slot="config" text="{text}"></c-cookie-item>"#)
        }
    }

    #[test]
    fn test_derive_id() {
        assert_eq!(derive_id("Necessary"), "Necessary");
        assert_eq!(derive_id("statistics & ANALYTICS"), "StatisticsAnalytics");
        assert_eq!(derive_id("  3rd-party cookies!"), "RdPartyCookies");
        assert_eq!(derive_id("123 / 456"), "");
        assert_eq!(derive_id(""), "");
    }

    #[test]
    fn test_derive_id_is_case_insensitive() {
        assert_eq!(derive_id("marketing tools"), derive_id("MARKETING Tools"));
    }

    #[test]
    fn test_declaration_defaults() {
        let node = FakeNode::element(&[("text", "Analytics")]);
        let decl = CategoryDeclaration::from_node(&node).unwrap();
        assert_eq!(decl.text, "Analytics");
        assert!(decl.toggable);
        assert!(!decl.mandatory);
        assert!(!decl.checked);
        assert_eq!(decl.kind, None);
    }

    #[test]
    fn test_declaration_explicit_flags() {
        let node = FakeNode::element(&[
            ("text", "Necessary"),
            ("toggable", "false"),
            ("mandatory", "true"),
            ("checked", "true"),
            ("type", "necessary"),
        ]);
        let decl = CategoryDeclaration::from_node(&node).unwrap();
        assert!(!decl.toggable);
        assert!(decl.mandatory);
        assert!(decl.checked);
        assert_eq!(decl.kind.as_deref(), Some("necessary"));
    }

    #[test]
    fn test_strategies_yield_same_declarations() {
        let a = FakeNode::element(&[("text", "Necessary")]);
        let b = FakeNode::element(&[("text", "Analytics"), ("type", "analytics")]);

        let assigned = vec![FakeNode::text(), a.clone(), FakeNode::text(), b.clone(), FakeNode::text()];
        let queried = vec![a, b];

        assert_eq!(
            CategoryDeclaration::from_nodes(assigned),
            CategoryDeclaration::from_nodes(queried)
        );
    }

    #[test]
    fn test_key_prefers_type() {
        let mut category = Category {
            id: "Analytics".into(),
            kind: Some("analytics".into()),
            title: "Analytics".into(),
            description: None,
            content: String::new(),
            toggable: true,
            mandatory: false,
            checked: false,
        };
        assert_eq!(category.key(), "analytics");
        category.kind = Some(String::new());
        assert_eq!(category.key(), "Analytics");
        category.kind = None;
        assert_eq!(category.key(), "Analytics");
    }
}
