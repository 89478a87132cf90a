use dioxus::prelude::*;

use crate::app::ReloadRequest;
use crate::domain::{AppState, LoadState};
use crate::ui::components::value_table::ValueTable;

pub const FORMULA_NOTE: &str = "Value Score Formula: (ABV% × Size in oz / 100) ÷ Price";
pub const HIGHER_IS_BETTER: &str = "Higher score = more alcohol per dollar = better value";

#[component]
pub fn BeersPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let ReloadRequest(mut reload) = use_context::<ReloadRequest>();
    let (load, has_rows, skipped) =
        state.with(|st| (st.load.clone(), !st.dataset.is_empty(), st.skipped));

    // Before the first rows arrive there is nothing to draw but the spinner text.
    if matches!(load, LoadState::Idle | LoadState::Pending) && !has_rows {
        return rsx! {
            p { class: "loading", "Loading beer data..." }
        };
    }

    let error = match &load {
        LoadState::Failed(message) => Some(message.clone()),
        _ => None,
    };

    rsx! {
        h2 { class: "title", "Beer Value Comparison" }
        if let Some(message) = error {
            div { class: "error-banner", "Could not refresh beers: {message}" }
        }
        div { class: "toolbar",
            span {
                if skipped > 0 {
                    "{skipped} beer(s) hidden because of invalid data"
                }
            }
            button {
                disabled: load.is_pending(),
                onclick: move |_| reload += 1,
                if load.is_pending() { "Refreshing..." } else { "Reload" }
            }
        }
        ValueTable {}
        div { class: "footer",
            p { "{FORMULA_NOTE}" }
            p { "{HIGHER_IS_BETTER}" }
        }
    }
}
