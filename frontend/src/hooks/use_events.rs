use shared::Event;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct EventsState {
    pub events: Vec<Event>,
    pub loading: bool,
}

pub struct UseEventsResult {
    pub state: EventsState,
    pub actions: UseEventsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseEventsActions {
    pub refresh: Callback<()>,
}

/// Event list for selectors and tables, fetched fresh on mount.
#[hook]
pub fn use_events(api_client: &ApiClient) -> UseEventsResult {
    let events = use_state(Vec::<Event>::new);
    let loading = use_state(|| true);

    let refresh = {
        let api_client = api_client.clone();
        let events = events.clone();
        let loading = loading.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let events = events.clone();
            let loading = loading.clone();

            spawn_local(async move {
                loading.set(true);
                match api_client.get_events().await {
                    Ok(data) => events.set(data),
                    Err(e) => {
                        Logger::error("use_events", &format!("failed to fetch events: {}", e));
                    }
                }
                loading.set(false);
            });
        })
    };

    use_effect_with((), {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    let state = EventsState {
        events: (*events).clone(),
        loading: *loading,
    };

    UseEventsResult {
        state,
        actions: UseEventsActions { refresh },
    }
}
