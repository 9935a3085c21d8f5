//! Process-wide theme store contract.
//!
//! The widget only reads the state and subscribes to changes. Themes are
//! registered by the bootstrap through [`add_theme`], which waits for a bus to
//! be registered when called early.

use super::error::{ConsentError, ConsentResult};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::{Rc, Weak};

/// Style fragments of one theme, keyed by component tag name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDefinition {
    #[serde(default)]
    pub components: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSlice {
    pub current: String,
    #[serde(default)]
    pub items: HashMap<String, ThemeDefinition>,
}

/// Snapshot returned by [`ThemeBus::state`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeState {
    pub theme: ThemeSlice,
}

impl ThemeState {
    /// CSS registered for `tag` under `theme` (or the current theme).
    /// Unknown themes and tags resolve to an empty fragment.
    pub fn fragment(&self, theme: Option<&str>, tag: &str) -> String {
        let name = theme.unwrap_or(&self.theme.current);
        self.theme
            .items
            .get(name)
            .and_then(|definition| definition.components.get(tag))
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeAction {
    /// Register a theme; it becomes current when no theme is current yet.
    AddTheme {
        name: String,
        definition: ThemeDefinition,
    },
    SetCurrent(String),
}

pub type Listener = Rc<dyn Fn()>;

pub trait ThemeBus {
    fn state(&self) -> ThemeState;

    fn subscribe(&self, listener: Listener) -> Subscription;

    fn dispatch(&self, action: ThemeAction);
}

/// Unsubscribes its listener when dropped.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription with nothing to tear down.
    pub fn empty() -> Self {
        Self { unsubscribe: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

#[derive(Default)]
struct BusInner {
    state: ThemeState,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
}

/// Single-threaded in-process [`ThemeBus`]. Clones share the same state.
#[derive(Clone, Default)]
pub struct LocalThemeBus {
    inner: Rc<RefCell<BusInner>>,
}

impl LocalThemeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: ThemeState) -> Self {
        let bus = Self::new();
        bus.inner.borrow_mut().state = state;
        bus
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn reduce(state: &mut ThemeState, action: ThemeAction) {
        match action {
            ThemeAction::AddTheme { name, definition } => {
                if state.theme.current.is_empty() {
                    state.theme.current = name.clone();
                }
                state.theme.items.insert(name, definition);
            }
            ThemeAction::SetCurrent(name) => state.theme.current = name,
        }
    }
}

impl ThemeBus for LocalThemeBus {
    fn state(&self) -> ThemeState {
        self.inner.borrow().state.clone()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, listener));
            id
        };
        let weak: Weak<RefCell<BusInner>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(other, _)| *other != id);
            }
        })
    }

    fn dispatch(&self, action: ThemeAction) {
        Self::reduce(&mut self.inner.borrow_mut().state, action);
        // Listeners may read the state or subscribe again, so no borrow is held.
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

/// Both component variants shipped with a theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentVariants {
    #[serde(default)]
    pub default: HashMap<String, String>,
    /// Reduced fragments for hosts without shadow root support.
    #[serde(default)]
    pub ie: HashMap<String, String>,
}

/// Theme as published by a theme package: `{ name, components: { default, ie } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePackage {
    pub name: String,
    pub components: ComponentVariants,
}

impl ThemePackage {
    pub fn into_action(self, supports_shadow: bool) -> ThemeAction {
        let components = if supports_shadow {
            self.components.default
        } else {
            self.components.ie
        };
        ThemeAction::AddTheme {
            name: self.name,
            definition: ThemeDefinition { components },
        }
    }
}

/// Themes as published by theme packages: `{ [name]: { components } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublishedThemes(BTreeMap<String, PublishedTheme>);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedTheme {
    #[serde(default)]
    pub components: ComponentVariants,
}

impl PublishedThemes {
    pub fn into_packages(self) -> Vec<ThemePackage> {
        self.0
            .into_iter()
            .map(|(name, theme)| ThemePackage {
                name,
                components: theme.components,
            })
            .collect()
    }
}

thread_local! {
    static GLOBAL_BUS: RefCell<Option<Rc<dyn ThemeBus>>> = RefCell::new(None);
    static PENDING_THEMES: RefCell<Vec<(ThemePackage, bool)>> = const { RefCell::new(Vec::new()) };
}

/// Register the page-wide bus and flush themes added before it existed.
pub fn register_global_bus(bus: Rc<dyn ThemeBus>) {
    GLOBAL_BUS.with(|slot| *slot.borrow_mut() = Some(bus.clone()));
    let pending = PENDING_THEMES.with(|queue| std::mem::take(&mut *queue.borrow_mut()));
    if !pending.is_empty() {
        log::debug!("flushing {} queued theme(s)", pending.len());
    }
    for (package, supports_shadow) in pending {
        bus.dispatch(package.into_action(supports_shadow));
    }
}

pub fn clear_global_bus() {
    GLOBAL_BUS.with(|slot| slot.borrow_mut().take());
}

pub fn global_bus() -> Option<Rc<dyn ThemeBus>> {
    GLOBAL_BUS.with(|slot| slot.borrow().clone())
}

/// The injected bus if any, else the registered one.
pub fn resolve_bus(injected: Option<Rc<dyn ThemeBus>>) -> ConsentResult<Rc<dyn ThemeBus>> {
    injected.or_else(global_bus).ok_or(ConsentError::NoThemeBus)
}

/// Register a theme package, picking the component variant for the host.
pub fn add_theme(package: ThemePackage, supports_shadow: bool) {
    match global_bus() {
        Some(bus) => bus.dispatch(package.into_action(supports_shadow)),
        None => {
            log::debug!("theme {:?} queued until a bus is registered", package.name);
            PENDING_THEMES.with(|queue| queue.borrow_mut().push((package, supports_shadow)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn package(name: &str, css: &str) -> ThemePackage {
        ThemePackage {
            name: name.to_string(),
            components: ComponentVariants {
                default: HashMap::from([("c-cookie".to_string(), css.to_string())]),
                ie: HashMap::from([("c-cookie".to_string(), format!("/* ie */{css}"))]),
            },
        }
    }

    #[test]
    fn test_fragment_lookup() {
        let bus = LocalThemeBus::new();
        bus.dispatch(package("light", "a{}").into_action(true));
        bus.dispatch(package("dark", "b{}").into_action(true));

        let state = bus.state();
        assert_eq!(state.theme.current, "light");
        assert_eq!(state.fragment(None, "c-cookie"), "a{}");
        assert_eq!(state.fragment(Some("dark"), "c-cookie"), "b{}");
        assert_eq!(state.fragment(Some("missing"), "c-cookie"), "");
        assert_eq!(state.fragment(None, "c-other"), "");
    }

    #[test]
    fn test_subscription_drop_unsubscribes() {
        let bus = LocalThemeBus::new();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let subscription = bus.subscribe(Rc::new(move || counter.set(counter.get() + 1)));

        bus.dispatch(ThemeAction::SetCurrent("x".into()));
        assert_eq!(calls.get(), 1);
        assert_eq!(bus.listener_count(), 1);

        drop(subscription);
        bus.dispatch(ThemeAction::SetCurrent("y".into()));
        assert_eq!(calls.get(), 1);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_add_theme_variant_selection() {
        let action = package("t", "x{}").into_action(false);
        match action {
            ThemeAction::AddTheme { definition, .. } => {
                assert_eq!(definition.components["c-cookie"], "/* ie */x{}");
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_add_theme_waits_for_bus() {
        clear_global_bus();
        assert!(matches!(resolve_bus(None), Err(ConsentError::NoThemeBus)));

        add_theme(package("late", "z{}"), true);
        let bus = LocalThemeBus::new();
        register_global_bus(Rc::new(bus.clone()));

        assert_eq!(bus.state().fragment(None, "c-cookie"), "z{}");
        assert!(resolve_bus(None).is_ok());
        clear_global_bus();
    }

    #[test]
    fn test_published_themes_parse() {
        let published: PublishedThemes = serde_json::from_str(
            r#"{"corporate":{"components":{"default":{"c-cookie":"a{}"},"ie":{"c-cookie":"b{}"}}}}"#,
        )
        .unwrap();
        let packages = published.into_packages();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "corporate");
        assert_eq!(packages[0].components.ie["c-cookie"], "b{}");
    }

    #[test]
    fn test_injected_bus_wins() {
        clear_global_bus();
        let injected: Rc<dyn ThemeBus> = Rc::new(LocalThemeBus::with_state(ThemeState {
            theme: ThemeSlice {
                current: "mine".into(),
                items: HashMap::new(),
            },
        }));
        let bus = resolve_bus(Some(injected)).unwrap();
        assert_eq!(bus.state().theme.current, "mine");
    }
}
