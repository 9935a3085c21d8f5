//! Consent state machine.
//!
//! Reconciles the declared categories, the stored record and user edits into
//! one [`ViewModel`]:
//!
//! ```text
//! Uninitialized --seed--> Seeded --toggle/accept_all--> Editing --save--> Saved
//!                                                          ^                |
//!                                                          +--toggle--------+
//! ```
//!
//! Item lists are never mutated in place: an edit produces a new list in
//! which only the edited slots hold new `Arc`s.

use super::category::{Category, CategoryDeclaration};
use super::config::WidgetConfig;
use super::extractor::extract_categories;
use super::record::{ConsentRecord, PersistPolicy};
use crate::shared::consent_store::ConsentStore;
use crate::shared::cookie::CookieOptions;
use crate::shared::error::ConsentResult;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Seeded,
    Editing,
    Saved,
}

/// Everything the widget renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub open: bool,
    pub items: Vec<Arc<Category>>,
    pub all_requested: bool,
    pub active_pane: usize,
    /// Narrow layouts: content pane shown instead of the navigation.
    pub nav_active: bool,
    /// A record exists, not necessarily accepting everything.
    pub consent_given: bool,
}

/// Detail of the `cookieSaved` event: `{ "cookie": { key: bool } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsentSaved {
    pub cookie: ConsentRecord,
}

#[derive(Debug, Clone)]
pub struct ConsentMachine {
    phase: Phase,
    cookie_name: String,
    policy: PersistPolicy,
    close_delay: Duration,
    seeded_from: Option<(Vec<CategoryDeclaration>, Option<ConsentRecord>)>,
    record: Option<ConsentRecord>,
    items: Vec<Arc<Category>>,
    open: bool,
    all_requested: bool,
    active_pane: usize,
    nav_active: bool,
    pending_closes: u32,
}

impl ConsentMachine {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            phase: Phase::Uninitialized,
            cookie_name: config.cookie_name.clone(),
            policy: config.persist_policy,
            close_delay: Duration::from_millis(u64::from(config.close_delay_ms)),
            seeded_from: None,
            record: None,
            items: Vec::new(),
            open: config.open,
            all_requested: false,
            active_pane: 0,
            nav_active: false,
            pending_closes: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn items(&self) -> &[Arc<Category>] {
        &self.items
    }

    pub fn record(&self) -> Option<&ConsentRecord> {
        self.record.as_ref()
    }

    pub fn consent_given(&self) -> bool {
        self.record.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Delay between a successful save and the modal closing.
    pub fn close_delay(&self) -> Duration {
        self.close_delay
    }

    pub fn view_model(&self) -> ViewModel {
        ViewModel {
            open: self.open,
            items: self.items.clone(),
            all_requested: self.all_requested,
            active_pane: self.active_pane,
            nav_active: self.nav_active,
            consent_given: self.consent_given(),
        }
    }

    /// Build the item list from declarations and the stored record.
    ///
    /// Seeding again with identical inputs while still `Seeded` is a no-op;
    /// any other call resets edits and pane selection.
    pub fn seed(&mut self, declarations: &[CategoryDeclaration], record: Option<ConsentRecord>) {
        if self.phase == Phase::Seeded {
            if let Some((previous, previous_record)) = &self.seeded_from {
                if previous.as_slice() == declarations && *previous_record == record {
                    return;
                }
            }
        }

        self.items = extract_categories(declarations, record.as_ref())
            .into_iter()
            .map(Arc::new)
            .collect();
        log::debug!(
            "seeded {} cookie categories (stored record: {})",
            self.items.len(),
            record.is_some()
        );
        self.record = record.clone();
        self.seeded_from = Some((declarations.to_vec(), record));
        self.all_requested = false;
        self.active_pane = 0;
        self.nav_active = false;
        self.phase = Phase::Seeded;
    }

    /// Read the stored record and seed from it.
    ///
    /// An unreadable or malformed record still seeds the categories from
    /// their declarations; the read error is returned for reporting.
    pub fn seed_from_store(
        &mut self,
        store: &dyn ConsentStore,
        declarations: &[CategoryDeclaration],
    ) -> ConsentResult<()> {
        match self.read_record(store) {
            Ok(record) => {
                self.seed(declarations, record);
                Ok(())
            }
            Err(err) => {
                self.seed(declarations, None);
                Err(err)
            }
        }
    }

    /// Load the stored record before the declarations are available, so
    /// `consent_given` is known at first render. No-op once seeded.
    pub fn restore_record(&mut self, store: &dyn ConsentStore) -> ConsentResult<()> {
        if self.phase == Phase::Uninitialized {
            self.record = self.read_record(store)?;
        }
        Ok(())
    }

    fn read_record(&self, store: &dyn ConsentStore) -> ConsentResult<Option<ConsentRecord>> {
        store
            .get(&self.cookie_name)?
            .map(|raw| ConsentRecord::from_json(&raw))
            .transpose()
    }

    /// Flip the decision of item `index`. Locked or unknown items are ignored.
    pub fn toggle(&mut self, index: usize) -> bool {
        let Some(item) = self.items.get(index) else {
            return false;
        };
        if item.is_locked() {
            log::debug!("ignoring toggle of locked category {:?}", item.key());
            return false;
        }

        let mut toggled = Category::clone(item);
        toggled.checked = !toggled.checked;

        let mut items = self.items.clone();
        items[index] = Arc::new(toggled);
        self.items = items;
        self.phase = Phase::Editing;
        true
    }

    /// Accept every category, locked ones included. Nothing is persisted.
    pub fn accept_all(&mut self) {
        self.items = self
            .items
            .iter()
            .map(|item| {
                if item.checked {
                    item.clone()
                } else {
                    let mut accepted = Category::clone(item);
                    accepted.checked = true;
                    Arc::new(accepted)
                }
            })
            .collect();
        self.all_requested = true;
        if self.phase != Phase::Uninitialized {
            self.phase = Phase::Editing;
        }
    }

    /// Persist the current decisions.
    ///
    /// On failure nothing changes: the modal stays open and the decisions
    /// stay in memory for a retry. On success the record is current right
    /// away and one delayed [`complete_close`](Self::complete_close) is due.
    pub fn save(&mut self, store: &dyn ConsentStore) -> ConsentResult<ConsentSaved> {
        let record = ConsentRecord::from_categories(&self.items, self.policy);
        let content = record.to_json()?;
        store.set(&self.cookie_name, &content, &CookieOptions::lax())?;
        log::info!("saved cookie consent {}", content);

        self.record = Some(record.clone());
        self.all_requested = false;
        self.pending_closes += 1;
        self.phase = Phase::Saved;
        Ok(ConsentSaved { cookie: record })
    }

    /// Banner shortcut: accept everything and save.
    pub fn accept_now(&mut self, store: &dyn ConsentStore) -> ConsentResult<ConsentSaved> {
        self.accept_all();
        self.save(store)
    }

    /// Delayed close scheduled by a save. Each save closes exactly once,
    /// even if the modal was reopened in between.
    pub fn complete_close(&mut self) {
        if self.pending_closes > 0 {
            self.pending_closes -= 1;
            self.open = false;
        }
    }

    /// Close without saving.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    pub fn open_settings(&mut self) {
        self.open = true;
    }

    pub fn select_pane(&mut self, index: usize) {
        if index < self.items.len() {
            self.active_pane = index;
            self.nav_active = true;
        }
    }

    pub fn back_to_navigation(&mut self) {
        self.nav_active = false;
    }
}
