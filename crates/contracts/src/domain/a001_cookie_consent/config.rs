use super::record::{PersistPolicy, CONSENT_COOKIE_NAME};
use crate::shared::error::ConsentResult;
use serde::{Deserialize, Serialize};

/// Tag the widget registers its theme fragment under.
pub const COOKIE_TAG: &str = "c-cookie";

/// Backdrop behaviour of the settings modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backdrop {
    /// Backdrop shown, clicks on it are ignored.
    Static,
    /// Backdrop shown, a click closes the modal.
    Shown,
    /// No backdrop at all.
    Hidden,
}

impl Backdrop {
    pub fn closes_on_click(&self) -> bool {
        matches!(self, Backdrop::Shown)
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Backdrop::Hidden)
    }
}

/// Host supplied widget settings. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    pub headline: String,
    pub modal_button_primary: String,
    pub modal_button_secondary: String,
    pub main_button_primary: String,
    pub main_button_secondary: String,
    pub back_label: String,
    /// Initial visibility of the settings modal.
    pub open: bool,
    pub inline: bool,
    /// Pinned theme name; the bus' current theme when absent.
    pub theme: Option<String>,
    pub cookie_name: String,
    pub close_delay_ms: u32,
    pub persist_policy: PersistPolicy,
    /// Explicit backdrop; derived from `inline` when absent.
    pub backdrop: Option<Backdrop>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            headline: "Confidentiality agreement".to_string(),
            modal_button_primary: "Save preferences".to_string(),
            modal_button_secondary: "Cancel".to_string(),
            main_button_primary: "Accept".to_string(),
            main_button_secondary: "Cookie settings".to_string(),
            back_label: "< Cookie policy".to_string(),
            open: false,
            inline: false,
            theme: None,
            cookie_name: CONSENT_COOKIE_NAME.to_string(),
            close_delay_ms: 200,
            persist_policy: PersistPolicy::default(),
            backdrop: None,
        }
    }
}

impl WidgetConfig {
    /// Parse a JSON config; blank input gives the defaults.
    pub fn from_json(raw: &str) -> ConsentResult<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// Inline widgets render without a backdrop; overlays keep a static one
    /// unless the host asks for another mode.
    pub fn backdrop(&self) -> Backdrop {
        if let Some(backdrop) = self.backdrop {
            backdrop
        } else if self.inline {
            Backdrop::Hidden
        } else {
            Backdrop::Static
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_config_is_default() {
        assert_eq!(WidgetConfig::from_json("  ").unwrap(), WidgetConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = WidgetConfig::from_json(
            r#"{"headline":"Cookies","inline":true,"persistPolicy":"include-locked","closeDelayMs":0}"#,
        )
        .unwrap();
        assert_eq!(config.headline, "Cookies");
        assert_eq!(config.main_button_primary, "Accept");
        assert_eq!(config.persist_policy, PersistPolicy::IncludeLocked);
        assert_eq!(config.close_delay_ms, 0);
        assert_eq!(config.backdrop(), Backdrop::Hidden);
        assert_eq!(WidgetConfig::default().backdrop(), Backdrop::Static);
    }

    #[test]
    fn test_explicit_backdrop() {
        let config = WidgetConfig::from_json(r#"{"inline":true,"backdrop":"shown"}"#).unwrap();
        assert_eq!(config.backdrop(), Backdrop::Shown);
        assert!(config.backdrop().closes_on_click());
        assert!(!Backdrop::Static.closes_on_click());
        assert!(!Backdrop::Hidden.is_visible());
    }

    #[test]
    fn test_invalid_config() {
        assert!(WidgetConfig::from_json(r#"{"open":"maybe"}"#).is_err());
    }
}
