use super::view_model::{ConsentServices, CookieConsentViewModel};
use crate::shared::components::ui::{Badge, Button, Switch};
use crate::shared::modal::Modal;
use contracts::domain::a001_cookie_consent::projection::{
    FooterNode, NavControl, NavEntry, PanelControl, PanelNode,
};
use contracts::domain::a001_cookie_consent::WidgetConfig;
use leptos::ev;
use leptos::logging::log;
use leptos::prelude::*;

/// Cookie consent widget: settings modal plus the consent banner.
#[component]
pub fn CookieConsent(services: ConsentServices, config: WidgetConfig) -> impl IntoView {
    let backdrop = config.backdrop();
    let inline = config.inline;
    let headline = config.headline.clone();
    let back_label = config.back_label.clone();
    let cancel_label = config.modal_button_secondary.clone();
    let save_label = config.modal_button_primary.clone();

    let vm = CookieConsentViewModel::new(services, config);
    vm.mount_theme();

    log!("🍪 CookieConsent mounted");
    on_cleanup(|| log!("🍪 CookieConsent unmounted"));

    // Slotted declarations are assigned once the shadow tree is attached.
    Effect::new(move |_| vm.seed_from_slots());

    let tree = Memo::new(move |_| vm.tree());

    // Pane activations wait until the panels are in the DOM.
    let panels_ref = NodeRef::<leptos::html::Div>::new();
    Effect::new(move |_| {
        let count = tree.with(|tree| tree.modal.panels.len());
        if panels_ref.get().is_some() {
            log::debug!("{} consent panels attached", count);
            vm.panels_ready();
        }
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        vm.save_command();
    };

    let row_class = move || {
        if tree.with(|tree| tree.modal.nav_active) {
            "row h-100 flex-sm-fill active"
        } else {
            "row h-100 flex-sm-fill"
        }
    };

    view! {
        <form class="cookie-consent" on:submit=on_submit>
            <slot name="config"></slot>

            <Modal
                open=Signal::derive(move || tree.with(|tree| tree.modal.open))
                backdrop=backdrop
                inline=inline
                headline=headline
                on_close=Callback::new(move |_| vm.dismiss())
            >
                <main class="modal-body">
                    <div class=row_class>
                        <div class="col-6 col-lg-3 h-100 navigation">
                            {move || {
                                tree.with(|tree| tree.modal.intro.clone())
                                    .map(|intro| {
                                        view! {
                                            <div class="d-lg-none mb-5 pl-4 pr-4">
                                                <h3>{intro.title}</h3>
                                                <article inner_html=intro.html></article>
                                            </div>
                                        }
                                    })
                            }}

                            <nav class="list-group" role="tablist" aria-orientation="vertical">
                                {move || {
                                    tree.with(|tree| tree.modal.nav.clone())
                                        .into_iter()
                                        .map(|entry| view! { <NavLink entry=entry vm=vm /> })
                                        .collect_view()
                                }}
                                <slot name="link"></slot>
                            </nav>
                        </div>

                        <div class="col-6 col-lg-9 content">
                            <div class="tab-content" node_ref=panels_ref>
                                <a
                                    href=""
                                    class="btn btn-link btn-block d-lg-none btn-back"
                                    on:click=move |ev: ev::MouseEvent| {
                                        ev.prevent_default();
                                        vm.back_to_navigation();
                                    }
                                >
                                    {back_label}
                                </a>
                                {move || {
                                    tree.with(|tree| tree.modal.panels.clone())
                                        .into_iter()
                                        .map(|panel| view! { <Panel panel=panel vm=vm /> })
                                        .collect_view()
                                }}
                            </div>
                        </div>
                    </div>

                    {move || {
                        vm.error
                            .get()
                            .map(|message| view! { <div class="alert alert-danger" role="alert">{message}</div> })
                    }}
                </main>

                <footer class="modal-footer">
                    <Button variant="secondary" on_click=Callback::new(move |_| vm.dismiss())>
                        {cancel_label}
                    </Button>
                    <Button button_type="submit">{save_label}</Button>
                </footer>
            </Modal>
        </form>

        {move || match tree.with(|tree| tree.footer.clone()) {
            FooterNode::Banner { inline, settings_label, accept_label } => {
                view! {
                    <Banner
                        vm=vm
                        inline=inline
                        settings_label=settings_label
                        accept_label=accept_label
                    />
                }
                    .into_any()
            }
            // Host call-to-action stays mounted, just out of sight.
            FooterNode::Hidden => {
                view! {
                    <div class="d-none">
                        <slot name="main"></slot>
                    </div>
                }
                    .into_any()
            }
        }}
    }
}

#[component]
fn NavLink(entry: NavEntry, vm: CookieConsentViewModel) -> impl IntoView {
    let index = entry.index;
    let mut class = String::from("list-group-item list-group-item-action");
    if entry.wide_only {
        class.push_str(" d-none d-lg-block");
    }
    if entry.active {
        class.push_str(" active");
    }

    let control = match entry.control {
        NavControl::None => view! { <></> }.into_any(),
        NavControl::HiddenInput { name, checked } => {
            view! { <input type="checkbox" name=name value="true" prop:checked=checked hidden=true /> }
                .into_any()
        }
        NavControl::Switch { name, checked } => {
            view! {
                <Switch
                    id=name.clone()
                    name=name
                    checked=checked
                    on_toggle=Callback::new(move |_| vm.toggle(index))
                />
            }
                .into_any()
        }
    };

    view! {
        <a
            href=entry.href
            id=entry.tab_id
            class=class
            role="tab"
            aria-selected={if entry.active { "true" } else { "false" }}
            on:click=move |ev: ev::MouseEvent| {
                ev.prevent_default();
                vm.request_pane(index);
            }
        >
            {entry.label}
            {control}
        </a>
    }
}

#[component]
fn Panel(panel: PanelNode, vm: CookieConsentViewModel) -> impl IntoView {
    let index = panel.index;
    let class = if panel.active {
        "tab-pane fade show active"
    } else {
        "tab-pane fade"
    };

    // Locked panels have no switch in the navigation either, only a marker.
    let control = match panel.control {
        PanelControl::Switch { name, checked } => {
            view! {
                <Switch
                    id=format!("{name}-panel")
                    name=name
                    checked=checked
                    class="d-lg-none"
                    on_toggle=Callback::new(move |_| vm.toggle(index))
                />
            }
                .into_any()
        }
        PanelControl::Badge(text) => view! { <Badge>{text}</Badge> }.into_any(),
    };

    view! {
        <div class=class id=panel.id role="tabpanel" aria-labelledby=panel.labelled_by>
            <h3>{panel.title}</h3>
            <article inner_html=panel.content_html></article>
            {control}
        </div>
    }
}

#[component]
fn Banner(
    vm: CookieConsentViewModel,
    inline: bool,
    settings_label: String,
    accept_label: String,
) -> impl IntoView {
    view! {
        <footer class={if inline { "banner inline" } else { "banner" }}>
            <div class="container">
                <div class="row">
                    <div class="col main">
                        <slot name="main"></slot>
                    </div>
                    <div class="col-sm-12 col-lg-auto mt-4 mb-4 btn-container">
                        <div class="row">
                            <div class="col col-lg-auto">
                                <Button
                                    variant="outline-light"
                                    block=true
                                    on_click=Callback::new(move |_| vm.open_settings())
                                >
                                    {settings_label}
                                </Button>
                            </div>
                            <div class="col col-lg-auto">
                                <Button
                                    variant="outline-light"
                                    block=true
                                    on_click=Callback::new(move |_| vm.accept_now_command())
                                >
                                    {accept_label}
                                </Button>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </footer>
    }
}
