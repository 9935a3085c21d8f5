use contracts::domain::a001_cookie_consent::Backdrop;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Dialog with a headline; body and footer come from `children`.
///
/// The dialog stays mounted while closed so its content (tab panels) keeps
/// its DOM; visibility is driven by `open`.
#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    backdrop: Backdrop,
    /// Rendered in place instead of as an overlay.
    #[prop(optional)]
    inline: bool,
    #[prop(into)] headline: String,
    /// Called on backdrop click (when the backdrop allows it) and on Escape.
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Close only if both press and release happened on the overlay itself.
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close =
            backdrop.closes_on_click() && overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            // Defer to the next tick so the click dispatch finishes first.
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let handle_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Escape" && backdrop != Backdrop::Static {
            on_close.run(());
        }
    };

    let overlay_class = move || {
        let mut class = String::from("modal");
        if inline {
            class.push_str(" inline");
        }
        if backdrop.is_visible() {
            class.push_str(" modal--backdrop");
        }
        if open.get() {
            class.push_str(" show");
        }
        class
    };

    view! {
        <div
            class=overlay_class
            role="dialog"
            aria-modal="true"
            aria-hidden=move || if open.get() { "false" } else { "true" }
            tabindex="-1"
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
            on:keydown=handle_keydown
        >
            <div class="modal-dialog" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-content">
                    <header class="modal-header">
                        <h2>{headline}</h2>
                    </header>
                    {children()}
                </div>
            </div>
        </div>
    }
}
