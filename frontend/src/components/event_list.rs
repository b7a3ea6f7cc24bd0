use shared::{Event as ChurchEvent, UpdateEventRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::{format_date_display, format_event_time};
use crate::services::logging::Logger;

use super::confirm_modal::ConfirmModal;
use super::status_banner::{StatusBanner, StatusMessage};

const EVENTS_PER_PAGE: usize = 5;

#[derive(Properties, PartialEq)]
pub struct EventListProps {
    pub api_client: ApiClient,
    pub on_add_event: Callback<()>,
}

#[derive(Clone, PartialEq)]
struct EditForm {
    id: i64,
    title: String,
    event_date: String,
    event_time: String,
    location: String,
    description: String,
}

impl EditForm {
    fn from_event(event: &ChurchEvent) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            // Dates may arrive as timestamps; the date input needs YYYY-MM-DD.
            event_date: event
                .event_date
                .split('T')
                .next()
                .unwrap_or(&event.event_date)
                .to_string(),
            event_time: event.event_time.clone().unwrap_or_default(),
            location: event.location.clone().unwrap_or_default(),
            description: event.description.clone().unwrap_or_default(),
        }
    }

    fn to_request(&self) -> UpdateEventRequest {
        UpdateEventRequest {
            title: self.title.trim().to_string(),
            event_date: self.event_date.clone(),
            event_time: Some(self.event_time.clone()).filter(|s| !s.is_empty()),
            location: Some(self.location.trim().to_string()).filter(|s| !s.is_empty()),
            description: Some(self.description.trim().to_string()).filter(|s| !s.is_empty()),
        }
    }
}

/// Event list with search, pagination, inline edit modal, and delete.
#[function_component(EventList)]
pub fn event_list(props: &EventListProps) -> Html {
    let events = use_state(Vec::<ChurchEvent>::new);
    let search = use_state(String::new);
    let current_page = use_state(|| 1usize);
    let editing = use_state(|| Option::<EditForm>::None);
    let pending_delete = use_state(|| Option::<i64>::None);
    let messages = use_state(Vec::<StatusMessage>::new);

    let fetch_events = {
        let api_client = props.api_client.clone();
        let events = events.clone();
        let messages = messages.clone();

        Callback::from(move |_: ()| {
            let api_client = api_client.clone();
            let events = events.clone();
            let messages = messages.clone();

            spawn_local(async move {
                match api_client.get_events().await {
                    Ok(data) => events.set(data),
                    Err(e) => {
                        Logger::error("event_list", &format!("failed to fetch events: {}", e));
                        messages.set(vec![StatusMessage::error("Failed to load events.")]);
                    }
                }
            });
        })
    };

    use_effect_with((), {
        let fetch_events = fetch_events.clone();
        move |_| {
            fetch_events.emit(());
            || ()
        }
    });

    let on_search_change = {
        let search = search.clone();
        let current_page = current_page.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
            current_page.set(1);
        })
    };

    let term = search.to_lowercase();
    let filtered: Vec<ChurchEvent> = events
        .iter()
        .filter(|event| event.title.to_lowercase().contains(&term))
        .cloned()
        .collect();

    let total_pages = filtered.len().div_ceil(EVENTS_PER_PAGE).max(1);
    let page = (*current_page).min(total_pages);
    let paginated: Vec<ChurchEvent> = filtered
        .iter()
        .skip((page - 1) * EVENTS_PER_PAGE)
        .take(EVENTS_PER_PAGE)
        .cloned()
        .collect();

    let on_confirm_delete = {
        let api_client = props.api_client.clone();
        let pending_delete = pending_delete.clone();
        let fetch_events = fetch_events.clone();
        let messages = messages.clone();

        Callback::from(move |_: ()| {
            let Some(id) = *pending_delete else { return };
            pending_delete.set(None);

            let api_client = api_client.clone();
            let fetch_events = fetch_events.clone();
            let messages = messages.clone();

            spawn_local(async move {
                match api_client.delete_event(id).await {
                    Ok(()) => {
                        messages.set(vec![StatusMessage::success("Event deleted.")]);
                        fetch_events.emit(());
                    }
                    Err(e) => {
                        Logger::error("event_list", &format!("delete failed: {}", e));
                        messages.set(vec![StatusMessage::error("Failed to delete event.")]);
                    }
                }
            });
        })
    };

    let on_cancel_delete = {
        let pending_delete = pending_delete.clone();
        Callback::from(move |_: ()| pending_delete.set(None))
    };

    let on_edit_submit = {
        let api_client = props.api_client.clone();
        let editing = editing.clone();
        let fetch_events = fetch_events.clone();
        let messages = messages.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(form) = (*editing).clone() else { return };

            let api_client = api_client.clone();
            let editing = editing.clone();
            let fetch_events = fetch_events.clone();
            let messages = messages.clone();

            spawn_local(async move {
                match api_client.update_event(form.id, &form.to_request()).await {
                    Ok(()) => {
                        editing.set(None);
                        messages.set(vec![StatusMessage::success("Event updated.")]);
                        fetch_events.emit(());
                    }
                    Err(e) => {
                        Logger::error("event_list", &format!("update failed: {}", e));
                        messages.set(vec![StatusMessage::error("Failed to update event.")]);
                    }
                }
            });
        })
    };

    let on_add = {
        let on_add_event = props.on_add_event.clone();
        Callback::from(move |_: MouseEvent| on_add_event.emit(()))
    };

    let dismiss_messages = {
        let messages = messages.clone();
        Callback::from(move |_| messages.set(Vec::new()))
    };

    let edit_field = |apply: fn(&mut EditForm, String)| {
        let editing = editing.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(mut form) = (*editing).clone() {
                apply(&mut form, input.value());
                editing.set(Some(form));
            }
        })
    };

    html! {
        <div class="event-list-wrapper">
            <ConfirmModal
                open={pending_delete.is_some()}
                message={"Are you sure you want to delete this event?".to_string()}
                on_confirm={on_confirm_delete}
                on_cancel={on_cancel_delete}
            />

            <h2 class="page-title">{"Event List"}</h2>

            <StatusBanner messages={(*messages).clone()} on_dismiss={dismiss_messages} />

            <div class="top-bar">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search by title..."
                    value={(*search).clone()}
                    oninput={on_search_change}
                />
                <button type="button" class="btn btn-primary add-event-btn" onclick={on_add}>
                    {"Add Event"}
                </button>
            </div>

            {if paginated.is_empty() {
                html! { <div class="empty-list-box">{"No events found."}</div> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="styled-table">
                            <thead>
                                <tr>
                                    <th>{"Title"}</th>
                                    <th>{"Date"}</th>
                                    <th>{"Time"}</th>
                                    <th>{"Location"}</th>
                                    <th>{"Actions"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for paginated.iter().map(|event| {
                                    let id = event.id;
                                    let on_edit = {
                                        let editing = editing.clone();
                                        let event = event.clone();
                                        Callback::from(move |_: MouseEvent| {
                                            editing.set(Some(EditForm::from_event(&event)));
                                        })
                                    };
                                    let on_delete = {
                                        let pending_delete = pending_delete.clone();
                                        Callback::from(move |_: MouseEvent| pending_delete.set(Some(id)))
                                    };
                                    html! {
                                        <tr key={id}>
                                            <td>{&event.title}</td>
                                            <td>{format_date_display(&event.event_date)}</td>
                                            <td>{event.event_time.as_deref().map(format_event_time).unwrap_or_else(|| "--".to_string())}</td>
                                            <td>{event.location.clone().unwrap_or_else(|| "--".to_string())}</td>
                                            <td>
                                                <button type="button" class="edit-btn" onclick={on_edit}>{"Edit"}</button>
                                                <button type="button" class="delete-btn" onclick={on_delete}>{"Delete"}</button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            }}

            {if total_pages > 1 {
                html! {
                    <div class="pagination">
                        {for (1..=total_pages).map(|number| {
                            let current_page = current_page.clone();
                            html! {
                                <button
                                    type="button"
                                    key={format!("page-{}", number)}
                                    class={if page == number { "active" } else { "" }}
                                    onclick={Callback::from(move |_| current_page.set(number))}
                                >
                                    {number}
                                </button>
                            }
                        })}
                    </div>
                }
            } else {
                html! {}
            }}

            {if let Some(form) = (*editing).clone() {
                let on_cancel_edit = {
                    let editing = editing.clone();
                    Callback::from(move |_: MouseEvent| editing.set(None))
                };
                let on_description_change = {
                    let editing = editing.clone();
                    Callback::from(move |e: Event| {
                        let input: HtmlTextAreaElement = e.target_unchecked_into();
                        if let Some(mut form) = (*editing).clone() {
                            form.description = input.value();
                            editing.set(Some(form));
                        }
                    })
                };
                html! {
                    <div class="modal-backdrop">
                        <div class="modal-content">
                            <h3>{"Edit Event"}</h3>
                            <form onsubmit={on_edit_submit.clone()}>
                                <input
                                    type="text"
                                    value={form.title.clone()}
                                    onchange={edit_field(|f, v| f.title = v)}
                                    required=true
                                />
                                <input
                                    type="date"
                                    value={form.event_date.clone()}
                                    onchange={edit_field(|f, v| f.event_date = v)}
                                    required=true
                                />
                                <input
                                    type="time"
                                    value={form.event_time.clone()}
                                    onchange={edit_field(|f, v| f.event_time = v)}
                                />
                                <input
                                    type="text"
                                    value={form.location.clone()}
                                    onchange={edit_field(|f, v| f.location = v)}
                                />
                                <textarea
                                    value={form.description.clone()}
                                    onchange={on_description_change}
                                />
                                <div class="modal-actions">
                                    <button type="submit" class="btn btn-primary">{"Save"}</button>
                                    <button type="button" class="btn btn-secondary" onclick={on_cancel_edit}>
                                        {"Cancel"}
                                    </button>
                                </div>
                            </form>
                        </div>
                    </div>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
