use shared::CheckInDetail;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::checkin::resolver::{self, Person, SearchResult};
use crate::checkin::submit;
use crate::hooks::use_events::use_events;
use crate::hooks::use_roster::use_roster;
use crate::services::api::ApiClient;
use crate::services::date_utils::format_time_12h;
use crate::services::logging::Logger;

use super::status_banner::{StatusBanner, StatusMessage};

#[derive(Properties, PartialEq)]
pub struct CheckInPageProps {
    pub api_client: ApiClient,
}

/// Express check-in: pick an event, search by name or phone, check in a
/// whole household (or any selection) in one pass.
#[function_component(CheckInPage)]
pub fn checkin_page(props: &CheckInPageProps) -> Html {
    let roster = use_roster(&props.api_client);
    let events = use_events(&props.api_client);

    let search_term = use_state(String::new);
    let search_result = use_state(SearchResult::default);
    let selected_event_id = use_state(|| Option::<i64>::None);
    let event_check_ins = use_state(Vec::<CheckInDetail>::new);
    let messages = use_state(Vec::<StatusMessage>::new);
    let submitting = use_state(|| false);

    // Refetch the event's existing check-ins whenever the event changes.
    use_effect_with(*selected_event_id, {
        let api_client = props.api_client.clone();
        let event_check_ins = event_check_ins.clone();
        move |event_id: &Option<i64>| {
            match *event_id {
                Some(event_id) => {
                    let api_client = api_client.clone();
                    let event_check_ins = event_check_ins.clone();
                    spawn_local(async move {
                        match api_client.get_event_check_ins(event_id).await {
                            Ok(data) => event_check_ins.set(data),
                            Err(e) => {
                                Logger::warn(
                                    "checkin_page",
                                    &format!("failed to fetch event check-ins: {}", e),
                                );
                                event_check_ins.set(Vec::new());
                            }
                        }
                    });
                }
                None => event_check_ins.set(Vec::new()),
            }
            || ()
        }
    });

    let on_event_change = {
        let selected_event_id = selected_event_id.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            selected_event_id.set(select.value().parse::<i64>().ok());
        })
    };

    // Typing invalidates the previous candidate list and any selection made
    // from it; nothing selectable may outlive the query that displayed it.
    let on_search_change = {
        let search_term = search_term.clone();
        let search_result = search_result.clone();
        let clear_selection = roster.actions.clear_selection.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search_term.set(input.value());
            search_result.set(SearchResult::default());
            clear_selection.emit(());
        })
    };

    // Search runs on Enter, not on every keystroke.
    let on_search_keydown = {
        let search_term = search_term.clone();
        let search_result = search_result.clone();
        let messages = messages.clone();
        let roster_state = roster.state.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() != "Enter" {
                return;
            }
            e.prevent_default();
            let result = resolver::resolve_candidates(&search_term, &roster_state.roster);
            Logger::debug(
                "checkin_page",
                &format!("search '{}' matched {} candidates", *search_term, result.candidates.len()),
            );
            if result.is_empty() && !search_term.trim().is_empty() {
                messages.set(vec![StatusMessage::info("No match found.")]);
            } else {
                messages.set(Vec::new());
            }
            search_result.set(result);
        })
    };

    // The displayed candidates mirror the roster's current selection flags.
    let candidates: Vec<Person> = search_result
        .candidates
        .iter()
        .map(|candidate| {
            let checked = roster
                .state
                .roster
                .iter()
                .find(|p| p.person == candidate.person)
                .map(|p| p.checked)
                .unwrap_or(false);
            Person { checked, ..candidate.clone() }
        })
        .collect();

    let all_checked = !candidates.is_empty() && candidates.iter().all(|p| p.checked);
    let any_checked = candidates.iter().any(|p| p.checked);

    let on_select_all = {
        let set_many_checked = roster.actions.set_many_checked.clone();
        let targets: Vec<_> = candidates.iter().map(|p| p.person).collect();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_many_checked.emit((targets.clone(), input.checked()));
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let selected_event_id = selected_event_id.clone();
        let event_check_ins = event_check_ins.clone();
        let messages = messages.clone();
        let submitting = submitting.clone();
        let roster_state = roster.state.clone();
        let clear_selection = roster.actions.clear_selection.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(event_id) = *selected_event_id else {
                messages.set(vec![StatusMessage::info("Please select an event.")]);
                return;
            };
            let selection = resolver::selected(&roster_state.roster);
            if selection.is_empty() {
                messages.set(vec![StatusMessage::info("No one selected for check-in.")]);
                return;
            }

            let api_client = api_client.clone();
            let event_check_ins = event_check_ins.clone();
            let messages = messages.clone();
            let submitting = submitting.clone();
            let clear_selection = clear_selection.clone();

            spawn_local(async move {
                submitting.set(true);

                let summary = submit::submit_check_ins(&api_client, event_id, selection).await;

                let mut lines = Vec::new();
                if let Some(text) = summary.success_message() {
                    lines.push(StatusMessage::success(text));
                }
                if let Some(text) = summary.duplicate_message() {
                    lines.push(StatusMessage::info(text));
                }
                for text in summary.failure_messages() {
                    lines.push(StatusMessage::error(text));
                }
                messages.set(lines);

                // Selection never survives a submission batch.
                clear_selection.emit(());

                match api_client.get_event_check_ins(event_id).await {
                    Ok(data) => event_check_ins.set(data),
                    Err(_) => event_check_ins.set(Vec::new()),
                }

                submitting.set(false);
            });
        })
    };

    let dismiss_messages = {
        let messages = messages.clone();
        Callback::from(move |_| messages.set(Vec::new()))
    };

    html! {
        <div class="form-container checkin-container">
            <h2 class="page-title">{"Express Check-In"}</h2>

            <StatusBanner messages={(*messages).clone()} on_dismiss={dismiss_messages} />

            <div class="form-group">
                <label for="event-select">{"Select Event:"}</label>
                <select id="event-select" class="form-input" onchange={on_event_change}>
                    <option value="" selected={selected_event_id.is_none()}>
                        {"-- Choose an Event --"}
                    </option>
                    {for events.state.events.iter().map(|event| {
                        html! {
                            <option
                                value={event.id.to_string()}
                                selected={*selected_event_id == Some(event.id)}
                            >
                                {format!("{} ({})", event.title, event.event_date)}
                            </option>
                        }
                    })}
                </select>
            </div>

            <div class="form-group">
                <input
                    type="text"
                    class="form-input"
                    placeholder="Search by name or phone"
                    value={(*search_term).clone()}
                    oninput={on_search_change}
                    onkeydown={on_search_keydown}
                    disabled={roster.state.loading}
                />
            </div>

            {if !candidates.is_empty() {
                html! {
                    <div class="user-list-section">
                        {if let Some(label) = search_result.household_label.as_ref().filter(|l| !l.is_empty()) {
                            html! { <div class="household-header">{format!("{} Household", label)}</div> }
                        } else {
                            html! {}
                        }}

                        <label class="select-all">
                            <input type="checkbox" checked={all_checked} onchange={on_select_all} />
                            {" Select All"}
                        </label>

                        <ul class="user-checkbox-list">
                            {for candidates.iter().map(|candidate| {
                                let person = candidate.person;
                                let set_checked = roster.actions.set_checked.clone();
                                let on_toggle = Callback::from(move |e: Event| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    set_checked.emit((person, input.checked()));
                                });
                                let existing = event_check_ins
                                    .iter()
                                    .find(|ci| candidate.person.matches_check_in(ci));

                                html! {
                                    <li key={candidate.person.to_string()} class="user-entry user-card">
                                        <label class="user-card-label">
                                            <input
                                                type="checkbox"
                                                checked={candidate.checked}
                                                onchange={on_toggle}
                                            />
                                            <div class="user-info">
                                                <strong>{candidate.full_name()}</strong>
                                                <div class="user-meta">
                                                    <span class="role-badge">{&candidate.role}</span>
                                                    <span class="user-phone">
                                                        {candidate.phone.clone().unwrap_or_else(|| "No phone".to_string())}
                                                    </span>
                                                </div>
                                                {if let Some(ci) = existing {
                                                    html! {
                                                        <div class="checked-in-info">
                                                            <span class="checkin-time">
                                                                {format_time_12h(&ci.checkin_time)}
                                                            </span>
                                                            {if let Some(location) = ci.event_location.as_ref() {
                                                                html! { <span class="checkin-location">{location}</span> }
                                                            } else {
                                                                html! {}
                                                            }}
                                                        </div>
                                                    }
                                                } else {
                                                    html! {}
                                                }}
                                            </div>
                                        </label>
                                    </li>
                                }
                            })}
                        </ul>

                        <button
                            type="button"
                            class="btn btn-primary"
                            onclick={on_submit}
                            disabled={selected_event_id.is_none() || !any_checked || *submitting}
                        >
                            {if *submitting { "Checking In..." } else { "Check In Selected" }}
                        </button>
                    </div>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
