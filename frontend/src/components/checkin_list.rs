use shared::{BulkCheckOutRequest, CheckInDetail};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::format_time_12h;
use crate::services::logging::Logger;

use super::confirm_modal::ConfirmModal;
use super::status_banner::{StatusBanner, StatusMessage};

#[derive(Properties, PartialEq)]
pub struct CheckInListProps {
    pub api_client: ApiClient,
}

#[derive(Clone, Copy, PartialEq)]
enum CheckOutAction {
    Single(i64),
    Bulk,
}

fn matches_filter(check_in: &CheckInDetail, term: &str) -> bool {
    check_in.first_name.to_lowercase().contains(term)
        || check_in.last_name.to_lowercase().contains(term)
        || check_in.role.to_lowercase().contains(term)
        || check_in.event_title.to_lowercase().contains(term)
}

/// All recent check-ins, with single and bulk check-out.
#[function_component(CheckInList)]
pub fn checkin_list(props: &CheckInListProps) -> Html {
    let check_ins = use_state(Vec::<CheckInDetail>::new);
    let loading = use_state(|| true);
    let search = use_state(String::new);
    let selected = use_state(Vec::<i64>::new);
    let pending_action = use_state(|| Option::<CheckOutAction>::None);
    let messages = use_state(Vec::<StatusMessage>::new);

    let fetch_check_ins = {
        let api_client = props.api_client.clone();
        let check_ins = check_ins.clone();
        let loading = loading.clone();
        let selected = selected.clone();
        let messages = messages.clone();

        Callback::from(move |_: ()| {
            let api_client = api_client.clone();
            let check_ins = check_ins.clone();
            let loading = loading.clone();
            let selected = selected.clone();
            let messages = messages.clone();

            spawn_local(async move {
                loading.set(true);
                match api_client.get_all_check_ins().await {
                    Ok(data) => check_ins.set(data),
                    Err(e) => {
                        Logger::error("checkin_list", &format!("failed to load check-ins: {}", e));
                        messages.set(vec![StatusMessage::error("Failed to load check-ins.")]);
                    }
                }
                loading.set(false);
                selected.set(Vec::new());
            });
        })
    };

    use_effect_with((), {
        let fetch_check_ins = fetch_check_ins.clone();
        move |_| {
            fetch_check_ins.emit(());
            || ()
        }
    });

    let term = search.to_lowercase();
    let filtered: Vec<CheckInDetail> = check_ins
        .iter()
        .filter(|ci| matches_filter(ci, &term))
        .cloned()
        .collect();

    // The selection is always a subset of the filtered view: whenever the
    // filter or the data changes, drop selections that fell out of view.
    use_effect_with(((*search).clone(), (*check_ins).clone()), {
        let selected = selected.clone();
        move |(search, check_ins): &(String, Vec<CheckInDetail>)| {
            let term = search.to_lowercase();
            let still_visible: Vec<i64> = selected
                .iter()
                .copied()
                .filter(|id| {
                    check_ins
                        .iter()
                        .any(|ci| ci.id == *id && matches_filter(ci, &term))
                })
                .collect();
            if still_visible.len() != selected.len() {
                selected.set(still_visible);
            }
            || ()
        }
    });

    let select_all = !filtered.is_empty() && filtered.iter().all(|ci| selected.contains(&ci.id));

    let on_search_change = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    let on_toggle_select_all = {
        let selected = selected.clone();
        let visible_ids: Vec<i64> = filtered.iter().map(|ci| ci.id).collect();
        Callback::from(move |_: Event| {
            if select_all {
                selected.set(Vec::new());
            } else {
                selected.set(visible_ids.clone());
            }
        })
    };

    let confirm_message = match *pending_action {
        Some(CheckOutAction::Bulk) => format!("Check out {} selected people?", selected.len()),
        Some(CheckOutAction::Single(_)) => "Check out this person?".to_string(),
        None => String::new(),
    };

    let on_confirm = {
        let api_client = props.api_client.clone();
        let pending_action = pending_action.clone();
        let selected = selected.clone();
        let messages = messages.clone();
        let fetch_check_ins = fetch_check_ins.clone();

        Callback::from(move |_: ()| {
            let Some(action) = *pending_action else { return };
            pending_action.set(None);

            let api_client = api_client.clone();
            let ids = (*selected).clone();
            let messages = messages.clone();
            let fetch_check_ins = fetch_check_ins.clone();

            spawn_local(async move {
                let outcome = match action {
                    CheckOutAction::Single(id) => api_client.check_out(id).await,
                    CheckOutAction::Bulk => {
                        api_client
                            .bulk_check_out(&BulkCheckOutRequest { ids })
                            .await
                    }
                };
                match outcome {
                    Ok(()) => {
                        messages.set(vec![StatusMessage::success("Checked out.")]);
                        fetch_check_ins.emit(());
                    }
                    Err(e) => {
                        Logger::error("checkin_list", &format!("check-out failed: {}", e));
                        messages.set(vec![StatusMessage::error("Failed to check out.")]);
                    }
                }
            });
        })
    };

    let on_cancel = {
        let pending_action = pending_action.clone();
        Callback::from(move |_: ()| pending_action.set(None))
    };

    let dismiss_messages = {
        let messages = messages.clone();
        Callback::from(move |_| messages.set(Vec::new()))
    };

    html! {
        <div class="page-container">
            <ConfirmModal
                open={pending_action.is_some()}
                message={confirm_message}
                on_confirm={on_confirm}
                on_cancel={on_cancel}
            />

            <h2 class="page-title">{"All Check-Ins"}</h2>
            <p>{"List of all recent check-ins."}</p>

            <StatusBanner messages={(*messages).clone()} on_dismiss={dismiss_messages} />

            <div class="search-bar-wrapper">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search by name, event, or role..."
                    value={(*search).clone()}
                    oninput={on_search_change}
                />
            </div>

            {if !filtered.is_empty() {
                let pending_action = pending_action.clone();
                html! {
                    <div class="bulk-actions">
                        <button
                            type="button"
                            class="btn btn-danger"
                            disabled={selected.is_empty()}
                            onclick={Callback::from(move |_| pending_action.set(Some(CheckOutAction::Bulk)))}
                        >
                            {format!("Bulk Check-Out ({})", selected.len())}
                        </button>
                    </div>
                }
            } else {
                html! {}
            }}

            {if *loading {
                html! { <div class="loading">{"Loading..."}</div> }
            } else if filtered.is_empty() {
                html! { <div class="empty-list-box">{"No check-ins found."}</div> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="styled-table">
                            <thead>
                                <tr>
                                    <th>
                                        <input
                                            type="checkbox"
                                            checked={select_all}
                                            onchange={on_toggle_select_all}
                                        />
                                    </th>
                                    <th>{"Name"}</th>
                                    <th>{"Role"}</th>
                                    <th>{"Event"}</th>
                                    <th>{"Time"}</th>
                                    <th>{"Check-Out"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for filtered.iter().map(|ci| {
                                    let id = ci.id;
                                    let is_selected = selected.contains(&id);
                                    let on_toggle = {
                                        let selected = selected.clone();
                                        Callback::from(move |_: Event| {
                                            let mut next = (*selected).clone();
                                            if let Some(pos) = next.iter().position(|sel| *sel == id) {
                                                next.remove(pos);
                                            } else {
                                                next.push(id);
                                            }
                                            selected.set(next);
                                        })
                                    };
                                    let on_check_out = {
                                        let pending_action = pending_action.clone();
                                        Callback::from(move |_: MouseEvent| {
                                            pending_action.set(Some(CheckOutAction::Single(id)));
                                        })
                                    };

                                    html! {
                                        <tr key={id}>
                                            <td>
                                                <input type="checkbox" checked={is_selected} onchange={on_toggle} />
                                            </td>
                                            <td>{format!("{} {}", ci.first_name, ci.last_name)}</td>
                                            <td><span class="role-badge">{&ci.role}</span></td>
                                            <td>{&ci.event_title}</td>
                                            <td>{format_time_12h(&ci.checkin_time)}</td>
                                            <td>
                                                <button type="button" class="btn btn-danger" onclick={on_check_out}>
                                                    {"Check-Out"}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            }}
        </div>
    }
}
