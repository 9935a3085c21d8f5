use leptos::prelude::*;

/// Custom switch bound to one consent category.
///
/// Clicks do not bubble, so a switch inside a navigation link does not
/// activate the link.
#[component]
pub fn Switch(
    /// Input id, also the label's `for`.
    #[prop(into)]
    id: String,
    #[prop(into)] name: String,
    checked: bool,
    on_toggle: Callback<()>,
    #[prop(optional, into)] class: MaybeProp<String>,
) -> impl IntoView {
    let wrapper_class = move || {
        format!(
            "custom-control custom-switch {}",
            class.get().unwrap_or_default()
        )
    };

    view! {
        <div class=wrapper_class on:click=|ev| ev.stop_propagation()>
            <input
                type="checkbox"
                id=id.clone()
                name=name
                value="true"
                class="custom-control-input"
                prop:checked=checked
                on:change=move |_| on_toggle.run(())
            />
            <label class="custom-control-label" for=id></label>
        </div>
    }
}
