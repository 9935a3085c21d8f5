use super::category::Category;
use crate::shared::error::ConsentResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Name of the record shared by every widget on a page.
pub const CONSENT_COOKIE_NAME: &str = "ConfidentialityAgreement";

/// Which categories end up in the persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersistPolicy {
    /// Only categories the user can toggle.
    #[default]
    ToggableOnly,
    /// Every category, locked ones included.
    IncludeLocked,
}

impl PersistPolicy {
    fn persists(&self, category: &Category) -> bool {
        match self {
            PersistPolicy::ToggableOnly => category.toggable,
            PersistPolicy::IncludeLocked => true,
        }
    }
}

/// Persisted decision map: category key -> accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsentRecord(BTreeMap<String, bool>);

impl ConsentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_categories(items: &[Arc<Category>], policy: PersistPolicy) -> Self {
        let mut record = Self::new();
        for item in items.iter().filter(|item| policy.persists(item)) {
            record.insert(item.key(), item.checked);
        }
        record
    }

    /// Parse a stored record. Entries that are not booleans are dropped.
    pub fn from_json(raw: &str) -> ConsentResult<Self> {
        let object: Map<String, Value> = serde_json::from_str(raw)?;
        Ok(Self(
            object
                .into_iter()
                .filter_map(|(key, value)| value.as_bool().map(|flag| (key, flag)))
                .collect(),
        ))
    }

    pub fn to_json(&self) -> ConsentResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.0.get(key).copied()
    }

    pub fn insert(&mut self, key: impl Into<String>, accepted: bool) {
        self.0.insert(key.into(), accepted);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(key, accepted)| (key.as_str(), *accepted))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ConsentError;

    #[test]
    fn test_parse_record() {
        let record =
            ConsentRecord::from_json(r#"{"analytics":true,"Marketing":false,"odd":"yes"}"#).unwrap();
        assert_eq!(record.get("analytics"), Some(true));
        assert_eq!(record.get("Marketing"), Some(false));
        assert_eq!(record.get("odd"), None);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(matches!(
            ConsentRecord::from_json("[true]"),
            Err(ConsentError::MalformedRecord(_))
        ));
        assert!(ConsentRecord::from_json("{not json").is_err());
    }

    #[test]
    fn test_serialize_record() {
        let mut record = ConsentRecord::new();
        record.insert("analytics", true);
        record.insert("Necessary", false);
        assert_eq!(
            record.to_json().unwrap(),
            r#"{"Necessary":false,"analytics":true}"#
        );
        assert_eq!(ConsentRecord::new().to_json().unwrap(), "{}");
    }
}
