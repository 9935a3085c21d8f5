use super::category::{derive_id, Category, CategoryDeclaration};
use super::record::ConsentRecord;
use crate::shared::error::{ConsentError, ConsentResult};
use std::collections::HashSet;

/// Build categories from their declarations, seeding `checked` from `record`.
///
/// `checked` resolves to the stored value under the explicit type, then the
/// stored value under the derived id, then the declared attribute.
pub fn extract_categories(
    declarations: &[CategoryDeclaration],
    record: Option<&ConsentRecord>,
) -> Vec<Category> {
    let categories: Vec<Category> = declarations
        .iter()
        .map(|declaration| {
            let id = derive_id(&declaration.text);
            let kind = declaration.kind.clone().filter(|kind| !kind.is_empty());
            let stored = record.and_then(|record| {
                kind.as_deref()
                    .and_then(|kind| record.get(kind))
                    .or_else(|| record.get(&id))
            });

            Category {
                checked: stored.unwrap_or(declaration.checked),
                id,
                kind,
                title: declaration.text.clone(),
                description: declaration.intro.clone(),
                content: declaration.content.clone(),
                toggable: declaration.toggable,
                mandatory: declaration.mandatory,
            }
        })
        .collect();

    if let Err(err) = validate_unique_keys(&categories) {
        log::warn!("{}; later declarations shadow earlier ones in the stored record", err);
    }
    categories
}

/// Keys used by more than one category, in first-seen order.
pub fn duplicate_keys(categories: &[Category]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for category in categories {
        let key = category.key();
        if !seen.insert(key) && !duplicates.iter().any(|dup: &String| dup == key) {
            duplicates.push(key.to_string());
        }
    }
    duplicates
}

/// First key used by more than one category, as an error.
pub fn validate_unique_keys(categories: &[Category]) -> ConsentResult<()> {
    match duplicate_keys(categories).into_iter().next() {
        Some(key) => Err(ConsentError::DuplicateKey(key)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(text: &str, kind: Option<&str>, checked: bool) -> CategoryDeclaration {
        CategoryDeclaration {
            text: text.to_string(),
            kind: kind.map(str::to_string),
            toggable: true,
            checked,
            ..Default::default()
        }
    }

    #[test]
    fn test_seed_without_record_uses_markup() {
        let items = extract_categories(
            &[
                declaration("Necessary", None, true),
                declaration("Analytics", Some("analytics"), false),
            ],
            None,
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "Necessary");
        assert_eq!(items[0].kind, None);
        assert!(items[0].checked);
        assert_eq!(items[1].key(), "analytics");
        assert!(!items[1].checked);
    }

    #[test]
    fn test_stored_type_overrides_markup() {
        let mut record = ConsentRecord::new();
        record.insert("analytics", true);
        let items = extract_categories(&[declaration("Analytics", Some("analytics"), false)], Some(&record));
        assert!(items[0].checked);
    }

    #[test]
    fn test_stored_false_overrides_declared_true() {
        let mut record = ConsentRecord::new();
        record.insert("Marketing", false);
        let items = extract_categories(&[declaration("Marketing", None, true)], Some(&record));
        assert!(!items[0].checked);
    }

    #[test]
    fn test_type_lookup_falls_back_to_id() {
        let mut record = ConsentRecord::new();
        record.insert("Analytics", true);
        let items = extract_categories(&[declaration("Analytics", Some("analytics"), false)], Some(&record));
        assert!(items[0].checked);
    }

    #[test]
    fn test_empty_type_is_ignored() {
        let items = extract_categories(&[declaration("Analytics", Some(""), false)], None);
        assert_eq!(items[0].kind, None);
        assert_eq!(items[0].key(), "Analytics");
    }

    #[test]
    fn test_duplicates_reported() {
        let items = extract_categories(
            &[
                declaration("Analytics", None, false),
                declaration("analytics!", None, false),
                declaration("Other", Some("Analytics"), false),
                declaration("Ads", None, false),
            ],
            None,
        );
        assert_eq!(duplicate_keys(&items), vec!["Analytics".to_string()]);
        assert!(matches!(
            validate_unique_keys(&items),
            Err(ConsentError::DuplicateKey(key)) if key == "Analytics"
        ));
        assert!(validate_unique_keys(&items[3..]).is_ok());
    }

    #[test]
    fn test_no_declarations() {
        assert!(extract_categories(&[], None).is_empty());
    }
}
