use leptos::prelude::*;

/// Pill badge, e.g. the static "Active" marker of locked categories.
#[component]
pub fn Badge(children: Children) -> impl IntoView {
    view! {
        <span class="badge badge-pill badge-primary">
            {children()}
        </span>
    }
}
