use shared::CreateEventRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

use super::status_banner::{StatusBanner, StatusMessage};

#[derive(Properties, PartialEq)]
pub struct AddEventProps {
    pub api_client: ApiClient,
    /// Fired after a successful create (and on cancel) to return to the
    /// event list.
    pub on_done: Callback<()>,
}

#[function_component(AddEvent)]
pub fn add_event(props: &AddEventProps) -> Html {
    let title = use_state(String::new);
    let event_date = use_state(String::new);
    let event_time = use_state(String::new);
    let location = use_state(String::new);
    let description = use_state(String::new);
    let submitting = use_state(|| false);
    let messages = use_state(Vec::<StatusMessage>::new);

    let text_setter = |state: UseStateHandle<String>| {
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_title_change = text_setter(title.clone());
    let on_date_change = text_setter(event_date.clone());
    let on_time_change = text_setter(event_time.clone());
    let on_location_change = text_setter(location.clone());

    let on_description_change = {
        let description = description.clone();
        Callback::from(move |e: Event| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            description.set(input.value());
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let title = title.clone();
        let event_date = event_date.clone();
        let event_time = event_time.clone();
        let location = location.clone();
        let description = description.clone();
        let submitting = submitting.clone();
        let messages = messages.clone();
        let on_done = props.on_done.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let api_client = api_client.clone();
            let title = title.clone();
            let event_date = event_date.clone();
            let event_time = event_time.clone();
            let location = location.clone();
            let description = description.clone();
            let submitting = submitting.clone();
            let messages = messages.clone();
            let on_done = on_done.clone();

            spawn_local(async move {
                submitting.set(true);

                let request = CreateEventRequest {
                    title: title.trim().to_string(),
                    event_date: (*event_date).clone(),
                    event_time: (*event_time).clone(),
                    location: location.trim().to_string(),
                    description: Some(description.trim().to_string()).filter(|s| !s.is_empty()),
                };

                match api_client.create_event(&request).await {
                    Ok(()) => on_done.emit(()),
                    Err(e) => {
                        Logger::error("add_event", &format!("create failed: {}", e));
                        messages.set(vec![StatusMessage::error("Failed to create event.")]);
                    }
                }

                submitting.set(false);
            });
        })
    };

    let on_cancel = {
        let on_done = props.on_done.clone();
        Callback::from(move |_: MouseEvent| on_done.emit(()))
    };

    let dismiss_messages = {
        let messages = messages.clone();
        Callback::from(move |_| messages.set(Vec::new()))
    };

    html! {
        <div class="form-container event-form-card">
            <h2 class="page-title">{"Add New Event"}</h2>

            <StatusBanner messages={(*messages).clone()} on_dismiss={dismiss_messages} />

            <form onsubmit={on_submit} class="event-form">
                <div class="form-group">
                    <label for="title">{"Event Title"}</label>
                    <input
                        type="text"
                        id="title"
                        placeholder="e.g. Sunday Worship, Volunteer Meetup"
                        value={(*title).clone()}
                        onchange={on_title_change}
                        required=true
                        disabled={*submitting}
                    />
                </div>

                <div class="form-group">
                    <label for="event_date">{"Event Date"}</label>
                    <input
                        type="date"
                        id="event_date"
                        value={(*event_date).clone()}
                        onchange={on_date_change}
                        required=true
                        disabled={*submitting}
                    />
                </div>

                <div class="form-group">
                    <label for="event_time">{"Event Time"}</label>
                    <input
                        type="time"
                        id="event_time"
                        value={(*event_time).clone()}
                        onchange={on_time_change}
                        required=true
                        disabled={*submitting}
                    />
                </div>

                <div class="form-group">
                    <label for="location">{"Location"}</label>
                    <input
                        type="text"
                        id="location"
                        placeholder="e.g. Fellowship Hall, Room 201"
                        value={(*location).clone()}
                        onchange={on_location_change}
                        required=true
                        disabled={*submitting}
                    />
                </div>

                <div class="form-group">
                    <label for="description">{"Description"}</label>
                    <textarea
                        id="description"
                        rows="4"
                        placeholder="Brief description (optional)"
                        value={(*description).clone()}
                        onchange={on_description_change}
                        disabled={*submitting}
                    />
                </div>

                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled={*submitting}>
                        {if *submitting { "Creating..." } else { "Create Event" }}
                    </button>
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={*submitting}>
                        {"Cancel"}
                    </button>
                </div>
            </form>
        </div>
    }
}
