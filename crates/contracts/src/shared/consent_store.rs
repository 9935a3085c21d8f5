use super::cookie::CookieOptions;
use super::error::ConsentResult;
use std::cell::RefCell;
use std::collections::HashMap;

/// Durable key/value record store backing the consent decision.
///
/// In the browser this is `document.cookie`; tests use [`MemoryConsentStore`].
pub trait ConsentStore {
    fn get(&self, name: &str) -> ConsentResult<Option<String>>;

    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> ConsentResult<()>;

    fn remove(&self, name: &str) -> ConsentResult<()>;
}

/// In-memory store, also used when no browser storage is available.
#[derive(Debug, Default)]
pub struct MemoryConsentStore {
    records: RefCell<HashMap<String, (String, CookieOptions)>>,
}

impl MemoryConsentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options the record `name` was last written with.
    pub fn options_of(&self, name: &str) -> Option<CookieOptions> {
        self.records
            .borrow()
            .get(name)
            .map(|(_, options)| options.clone())
    }
}

impl ConsentStore for MemoryConsentStore {
    fn get(&self, name: &str) -> ConsentResult<Option<String>> {
        Ok(self
            .records
            .borrow()
            .get(name)
            .map(|(value, _)| value.clone()))
    }

    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> ConsentResult<()> {
        self.records
            .borrow_mut()
            .insert(name.to_string(), (value.to_string(), options.clone()));
        Ok(())
    }

    fn remove(&self, name: &str) -> ConsentResult<()> {
        self.records.borrow_mut().remove(name);
        Ok(())
    }
}
