use shared::PersonRef;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::checkin::resolver::{self, Person};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct RosterState {
    pub roster: Vec<Person>,
    pub loading: bool,
}

pub struct UseRosterResult {
    pub state: RosterState,
    pub actions: UseRosterActions,
}

#[derive(Clone, PartialEq)]
pub struct UseRosterActions {
    pub refresh: Callback<()>,
    pub set_checked: Callback<(PersonRef, bool)>,
    pub set_many_checked: Callback<(Vec<PersonRef>, bool)>,
    pub clear_selection: Callback<()>,
}

/// Owns the full roster for a check-in session, including selection flags.
/// Fetched fresh on mount and on demand; selection mutations re-derive the
/// vector so dependent views re-render.
#[hook]
pub fn use_roster(api_client: &ApiClient) -> UseRosterResult {
    let roster = use_state(Vec::<Person>::new);
    let loading = use_state(|| true);

    let refresh = {
        let api_client = api_client.clone();
        let roster = roster.clone();
        let loading = loading.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let roster = roster.clone();
            let loading = loading.clone();

            spawn_local(async move {
                loading.set(true);
                match api_client.get_users().await {
                    Ok(entries) => {
                        Logger::info("use_roster", &format!("loaded {} people", entries.len()));
                        roster.set(entries.iter().map(Person::from_entry).collect());
                    }
                    Err(e) => {
                        Logger::error("use_roster", &format!("failed to fetch roster: {}", e));
                    }
                }
                loading.set(false);
            });
        })
    };

    let set_checked = {
        let roster = roster.clone();
        use_callback((), move |(person, checked): (PersonRef, bool), _| {
            let mut next = (*roster).clone();
            resolver::set_checked(&mut next, &person, checked);
            roster.set(next);
        })
    };

    let set_many_checked = {
        let roster = roster.clone();
        use_callback((), move |(targets, checked): (Vec<PersonRef>, bool), _| {
            let mut next = (*roster).clone();
            resolver::set_many_checked(&mut next, &targets, checked);
            roster.set(next);
        })
    };

    let clear_selection = {
        let roster = roster.clone();
        use_callback((), move |_, _| {
            let mut next = (*roster).clone();
            resolver::clear_selection(&mut next);
            roster.set(next);
        })
    };

    // Load the roster once on mount.
    use_effect_with((), {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    let state = RosterState {
        roster: (*roster).clone(),
        loading: *loading,
    };

    let actions = UseRosterActions {
        refresh,
        set_checked,
        set_many_checked,
        clear_selection,
    };

    UseRosterResult { state, actions }
}
