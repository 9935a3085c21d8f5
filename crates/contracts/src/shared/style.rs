//! Theme-driven styling of the widget's isolated scope.
//!
//! The host environment decides once, at mount, which [`StyleInjector`] to
//! use (constructable style sheets or an injected `<style>` node). The
//! [`ThemeStyleApplier`] resolves the fragment for the widget's tag and hands
//! it to that injector on mount and on every theme bus notification.

use super::error::ConsentResult;
use super::theme_bus::{Subscription, ThemeBus};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// One way of installing a CSS fragment into an isolated scope.
///
/// Implementations own at most one sheet/node at a time and must leave
/// unrelated sheets of the scope in place.
pub trait StyleInjector {
    fn apply(&self, css: &str) -> ConsentResult<()>;

    /// Remove the sheet/node installed by this injector, if any.
    fn clear(&self) -> ConsentResult<()>;

    fn strategy(&self) -> &'static str;
}

/// Replace `previous` with `next` in a list of adopted sheets.
///
/// Every other sheet keeps its position; `next` goes last.
pub fn swap_sheets<T: PartialEq + Clone>(current: &[T], previous: Option<&T>, next: T) -> Vec<T> {
    let mut sheets: Vec<T> = current
        .iter()
        .filter(|sheet| Some(*sheet) != previous)
        .cloned()
        .collect();
    sheets.push(next);
    sheets
}

struct ApplierInner {
    bus: Rc<dyn ThemeBus>,
    injector: Box<dyn StyleInjector>,
    tag: String,
    theme: RefCell<Option<String>>,
}

impl ApplierInner {
    fn apply(&self) -> ConsentResult<()> {
        let state = self.bus.state();
        let css = state.fragment(self.theme.borrow().as_deref(), &self.tag);
        log::debug!(
            "applying {} bytes of theme css to <{}> via {}",
            css.len(),
            self.tag,
            self.injector.strategy()
        );
        self.injector.apply(&css)
    }
}

/// Keeps the widget's theme style in sync with the bus until dropped.
pub struct ThemeStyleApplier {
    inner: Rc<ApplierInner>,
    _subscription: Subscription,
}

impl ThemeStyleApplier {
    /// Apply the current fragment and subscribe for later theme changes.
    ///
    /// `theme` pins a named theme until the bus notifies a change, after
    /// which the bus' current theme is followed.
    pub fn mount(
        bus: Rc<dyn ThemeBus>,
        injector: Box<dyn StyleInjector>,
        tag: impl Into<String>,
        theme: Option<String>,
    ) -> ConsentResult<Self> {
        let inner = Rc::new(ApplierInner {
            bus: bus.clone(),
            injector,
            tag: tag.into(),
            theme: RefCell::new(theme),
        });
        inner.apply()?;

        let weak: Weak<ApplierInner> = Rc::downgrade(&inner);
        let subscription = bus.subscribe(Rc::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.theme.replace(None);
            if let Err(err) = inner.apply() {
                log::error!("failed to re-apply theme style: {}", err);
            }
        }));

        Ok(Self {
            inner,
            _subscription: subscription,
        })
    }
}

impl Drop for ThemeStyleApplier {
    fn drop(&mut self) {
        if let Err(err) = self.inner.injector.clear() {
            log::warn!("failed to remove theme style: {}", err);
        }
    }
}
