use crate::shared::dom::{read_declarations, supports_shadow};
use crate::shared::events::{dispatch_detail, COOKIE_ERROR_EVENT, COOKIE_SAVED_EVENT};
use crate::shared::theme::mount_theme_style;
use contracts::domain::a001_cookie_consent::{
    project, ConsentMachine, ConsentSaved, HostContext, SlotStrategy, TabCoordinator, WidgetConfig, WidgetTree,
    COOKIE_TAG,
};
use contracts::shared::consent_store::ConsentStore;
use contracts::shared::error::{ConsentError, ConsentResult};
use contracts::shared::style::ThemeStyleApplier;
use contracts::shared::theme_bus::ThemeBus;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::Serialize;
use std::rc::Rc;
use web_sys::{HtmlElement, ShadowRoot};

/// Collaborators of one widget instance, injected at mount.
pub struct ConsentServices {
    pub host: HtmlElement,
    pub shadow: Option<ShadowRoot>,
    pub store: Rc<dyn ConsentStore>,
    /// Falls back to the page-wide registry when `None`.
    pub bus: Option<Rc<dyn ThemeBus>>,
    pub context: HostContext,
}

#[derive(Serialize)]
struct ErrorDetail {
    message: String,
}

/// ViewModel of the cookie consent widget.
#[derive(Clone, Copy)]
pub struct CookieConsentViewModel {
    pub machine: RwSignal<ConsentMachine>,
    pub tabs: RwSignal<TabCoordinator>,
    pub error: RwSignal<Option<String>>,
    pub config: StoredValue<WidgetConfig>,
    services: StoredValue<ConsentServices, LocalStorage>,
    theme_style: StoredValue<Option<ThemeStyleApplier>, LocalStorage>,
}

impl CookieConsentViewModel {
    pub fn new(services: ConsentServices, config: WidgetConfig) -> Self {
        // Returning visitors must not see the banner before the slots are read.
        let mut machine = ConsentMachine::new(&config);
        if let Err(err) = machine.restore_record(services.store.as_ref()) {
            log::warn!("stored cookie consent not readable yet: {}", err);
        }
        Self {
            machine: RwSignal::new(machine),
            tabs: RwSignal::new(TabCoordinator::new()),
            error: RwSignal::new(None),
            config: StoredValue::new(config),
            services: StoredValue::new_local(services),
            theme_style: StoredValue::new_local(None),
        }
    }

    pub fn tree(&self) -> WidgetTree {
        let config = self.config.get_value();
        self.machine.with(|machine| project(&machine.view_model(), &config))
    }

    pub fn context(&self) -> HostContext {
        self.services.with_value(|services| services.context)
    }

    /// Start following the theme bus. Skipped for documentation samples.
    pub fn mount_theme(&self) {
        if !self.context().wires_tabs() {
            log::debug!("cookie widget inside a code sample, theme styling skipped");
            return;
        }
        let theme = self.config.with_value(|config| config.theme.clone());
        let applier = self.services.with_value(|services| {
            mount_theme_style(
                &services.host,
                services.shadow.as_ref(),
                services.bus.clone(),
                COOKIE_TAG,
                theme,
            )
        });
        match applier {
            Ok(applier) => self.theme_style.set_value(Some(applier)),
            Err(err) => log::warn!("cookie widget theme not applied: {}", err),
        }
    }

    /// Read the declared categories and the stored record into the machine.
    pub fn seed_from_slots(&self) {
        let strategy = SlotStrategy::for_host(supports_shadow());
        let declarations = self
            .services
            .with_value(|services| read_declarations(&services.host, strategy));
        let store = self.store();

        let result = self
            .machine
            .try_update(|machine| machine.seed_from_store(store.as_ref(), &declarations));
        if let Some(Err(err)) = result {
            self.report(err);
        }
    }

    pub fn toggle(&self, index: usize) {
        self.machine.update(|machine| {
            machine.toggle(index);
        });
    }

    pub fn open_settings(&self) {
        self.machine.update(|machine| machine.open_settings());
    }

    pub fn dismiss(&self) {
        self.machine.update(|machine| machine.dismiss());
    }

    pub fn back_to_navigation(&self) {
        self.machine.update(|machine| machine.back_to_navigation());
    }

    /// Navigation entry clicked. Waits for the panels when they are not
    /// attached yet.
    pub fn request_pane(&self, index: usize) {
        if !self.context().wires_tabs() {
            return;
        }
        if let Some(Some(index)) = self.tabs.try_update(|tabs| tabs.request(index)) {
            self.machine.update(|machine| machine.select_pane(index));
        }
    }

    /// Panels are attached: release a buffered pane activation.
    pub fn panels_ready(&self) {
        if let Some(Some(index)) = self.tabs.try_update(|tabs| tabs.mark_ready()) {
            self.machine.update(|machine| machine.select_pane(index));
        }
    }

    /// "Save preferences".
    pub fn save_command(&self) {
        let store = self.store();
        let result = self.machine.try_update(|machine| machine.save(store.as_ref()));
        self.finish_save(result);
    }

    /// Banner "accept" shortcut.
    pub fn accept_now_command(&self) {
        let store = self.store();
        let result = self
            .machine
            .try_update(|machine| machine.accept_now(store.as_ref()));
        self.finish_save(result);
    }

    fn finish_save(&self, result: Option<ConsentResult<ConsentSaved>>) {
        match result {
            Some(Ok(saved)) => {
                self.error.set(None);
                self.services.with_value(|services| {
                    if let Err(err) = dispatch_detail(&services.host, COOKIE_SAVED_EVENT, &saved) {
                        log::error!("failed to dispatch {}: {:?}", COOKIE_SAVED_EVENT, err);
                    }
                });
                self.schedule_close();
            }
            Some(Err(err)) => self.report(err),
            None => log::warn!("cookie widget disposed before save finished"),
        }
    }

    fn schedule_close(&self) {
        let machine = self.machine;
        let delay = machine.with_untracked(|machine| machine.close_delay());
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        spawn_local(async move {
            TimeoutFuture::new(millis).await;
            machine.try_update(|machine| machine.complete_close());
        });
    }

    fn store(&self) -> Rc<dyn ConsentStore> {
        self.services.with_value(|services| services.store.clone())
    }

    /// Keep the failure visible in the modal and hand it to the host page.
    fn report(&self, err: ConsentError) {
        log::error!("cookie consent: {}", err);
        let message = err.to_string();
        self.services.with_value(|services| {
            let detail = ErrorDetail {
                message: message.clone(),
            };
            if let Err(js) = dispatch_detail(&services.host, COOKIE_ERROR_EVENT, &detail) {
                log::error!("failed to dispatch {}: {:?}", COOKIE_ERROR_EVENT, js);
            }
        });
        self.error.set(Some(message));
    }
}
