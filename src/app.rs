use dioxus::{prelude::*, signals::Signal};
use tracing::info;

use crate::{
    domain::{AppState, FetchOutcome},
    infra::{
        provider::{settle_fetch, FetchedItems, ItemProvider, ProviderError},
        supabase::SupabaseClient,
    },
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::BeersPage,
        shell::Shell,
    },
    util::assets,
};

/// Bumped by the reload button; the beer resource re-runs whenever it changes.
#[derive(Clone, Copy)]
pub struct ReloadRequest(pub Signal<u32>);

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Beers {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let reload = use_signal(|| 0_u32);
    use_context_provider(|| ReloadRequest(reload));

    let _beers = use_resource(move || async move {
        // Subscribe to reload requests.
        let attempt = reload();
        info!(attempt, "loading beer list");
        fetch_beers(state, toasts).await
    });

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

async fn fetch_beers(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
) -> Option<FetchOutcome> {
    let ticket = state.with_mut(|st| st.begin_fetch());

    let result = match SupabaseClient::from_env() {
        Ok(client) => fetch_from(&client).await,
        Err(err) => Err(err),
    };
    let outcome = state.with_mut(|st| settle_fetch(st, ticket, result));

    match &outcome {
        FetchOutcome::Applied { skipped, .. } if *skipped > 0 => push_toast(
            toasts,
            ToastKind::Warning,
            format!("Skipped {skipped} beer(s) with missing or invalid price, size or ABV."),
        ),
        FetchOutcome::Failed(message) => push_toast(
            toasts,
            ToastKind::Error,
            format!("Error fetching beers: {message}"),
        ),
        _ => {}
    }

    Some(outcome)
}

async fn fetch_from(provider: &dyn ItemProvider) -> Result<FetchedItems, ProviderError> {
    provider.fetch_items().await
}

#[component]
pub fn Beers() -> Element {
    rsx! { Shell { BeersPage {} } }
}
