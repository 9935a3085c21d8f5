use leptos::prelude::*;

/// Bootstrap-style button: `variant` is "primary" (default), "secondary",
/// "outline-light" or "link".
#[component]
pub fn Button(
    #[prop(optional, into)] variant: MaybeProp<String>,
    /// Stretch to the container width.
    #[prop(optional)]
    block: bool,
    #[prop(optional, into)] class: MaybeProp<String>,
    /// "button" (default), "submit" or "reset"
    #[prop(optional, into)]
    button_type: MaybeProp<String>,
    #[prop(optional)] on_click: Option<Callback<leptos::ev::MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("primary") {
        "secondary" => "btn-secondary",
        "outline-light" => "btn-outline-light",
        "link" => "btn-link",
        _ => "btn-primary",
    };

    let block_class = if block { "btn-block" } else { "" };
    let additional_class = move || class.get().unwrap_or_default();
    let btn_type = move || button_type.get().unwrap_or_else(|| "button".to_string());

    view! {
        <button
            type=btn_type
            class=move || format!("btn {} {} {}", variant_class(), block_class, additional_class())
            on:click=move |ev| {
                if let Some(handler) = on_click {
                    handler.run(ev);
                }
            }
        >
            {children()}
        </button>
    }
}
