use shared::{CheckInDetail, DashboardStats, Event};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::{format_date_display, format_event_time, format_time_12h};
use crate::services::logging::Logger;

use super::confirm_modal::ConfirmModal;
use super::status_banner::{StatusBanner, StatusMessage};

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub api_client: ApiClient,
    pub admin_name: String,
}

/// A check-in stays on the dashboard until an hour past its event's start.
fn is_still_active(check_in: &CheckInDetail) -> bool {
    let (Some(date), Some(time)) = (&check_in.event_date, &check_in.event_time) else {
        return true;
    };
    let event_start = js_sys::Date::new(&JsValue::from_str(&format!("{}T{}", date, time)));
    let start_ms = event_start.get_time();
    if start_ms.is_nan() {
        return true;
    }
    start_ms + 60.0 * 60.0 * 1000.0 > js_sys::Date::now()
}

#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let stats = use_state(|| Option::<DashboardStats>::None);
    let upcoming_events = use_state(Vec::<Event>::new);
    let check_ins = use_state(Vec::<CheckInDetail>::new);
    let messages = use_state(Vec::<StatusMessage>::new);
    let pending_delete = use_state(|| Option::<i64>::None);

    let fetch_dashboard = {
        let api_client = props.api_client.clone();
        let stats = stats.clone();
        let upcoming_events = upcoming_events.clone();
        let check_ins = check_ins.clone();
        let messages = messages.clone();

        Callback::from(move |_: ()| {
            let api_client = api_client.clone();
            let stats = stats.clone();
            let upcoming_events = upcoming_events.clone();
            let check_ins = check_ins.clone();
            let messages = messages.clone();

            spawn_local(async move {
                match api_client.get_dashboard().await {
                    Ok(data) => {
                        stats.set(Some(data.stats));
                        upcoming_events.set(data.upcoming_events);
                        check_ins.set(data.recent_check_ins);
                    }
                    Err(e) => {
                        Logger::error("dashboard", &format!("failed to load dashboard: {}", e));
                        messages.set(vec![StatusMessage::error("Failed to load dashboard data.")]);
                    }
                }
            });
        })
    };

    use_effect_with((), {
        let fetch_dashboard = fetch_dashboard.clone();
        move |_| {
            fetch_dashboard.emit(());
            || ()
        }
    });

    let on_confirm_delete = {
        let api_client = props.api_client.clone();
        let pending_delete = pending_delete.clone();
        let check_ins = check_ins.clone();
        let messages = messages.clone();

        Callback::from(move |_: ()| {
            let Some(id) = *pending_delete else { return };
            pending_delete.set(None);

            let api_client = api_client.clone();
            let check_ins = check_ins.clone();
            let messages = messages.clone();

            spawn_local(async move {
                match api_client.check_out(id).await {
                    Ok(()) => {
                        let remaining: Vec<CheckInDetail> = check_ins
                            .iter()
                            .filter(|ci| ci.id != id)
                            .cloned()
                            .collect();
                        check_ins.set(remaining);
                        messages.set(vec![StatusMessage::success("Check-in deleted.")]);
                    }
                    Err(e) => {
                        Logger::error("dashboard", &format!("failed to delete check-in: {}", e));
                        messages.set(vec![StatusMessage::error("Failed to delete check-in.")]);
                    }
                }
            });
        })
    };

    let on_cancel_delete = {
        let pending_delete = pending_delete.clone();
        Callback::from(move |_: ()| pending_delete.set(None))
    };

    let dismiss_messages = {
        let messages = messages.clone();
        Callback::from(move |_| messages.set(Vec::new()))
    };

    let total_people = stats
        .as_ref()
        .map(|s| s.total_users + s.total_elders)
        .unwrap_or(0);
    let check_ins_today = stats.as_ref().map(|s| s.check_ins_today).unwrap_or(0);

    let active_check_ins: Vec<CheckInDetail> = check_ins
        .iter()
        .filter(|ci| is_still_active(ci))
        .cloned()
        .collect();

    html! {
        <div class="dashboard-container">
            <ConfirmModal
                open={pending_delete.is_some()}
                message={"Are you sure you want to delete this check-in?".to_string()}
                on_confirm={on_confirm_delete}
                on_cancel={on_cancel_delete}
            />

            <div class="dashboard-header">
                <h2>{format!("Welcome, {}", props.admin_name)}</h2>
                <p class="dashboard-sub">{"Here is your overview dashboard"}</p>
            </div>

            <StatusBanner messages={(*messages).clone()} on_dismiss={dismiss_messages} />

            <div class="dashboard-stats-grid">
                <div class="dashboard-stat-card">
                    <div class="stat-title">{"Check-Ins Today"}</div>
                    <div class="stat-value">{check_ins_today}</div>
                </div>
                <div class="dashboard-stat-card">
                    <div class="stat-title">{"Total People"}</div>
                    <div class="stat-value">{total_people}</div>
                </div>
            </div>

            <div class="dashboard-section">
                <h3>{"Upcoming Events"}</h3>
                {if upcoming_events.is_empty() {
                    html! { <p class="empty">{"No upcoming events."}</p> }
                } else {
                    html! {
                        <div class="table-container">
                            <table class="dashboard-table">
                                <thead>
                                    <tr>
                                        <th>{"Title"}</th>
                                        <th>{"Date"}</th>
                                        <th>{"Time"}</th>
                                        <th>{"Location"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {for upcoming_events.iter().map(|event| {
                                        html! {
                                            <tr key={event.id}>
                                                <td>{&event.title}</td>
                                                <td>{format_date_display(&event.event_date)}</td>
                                                <td>{event.event_time.as_deref().map(format_event_time).unwrap_or_else(|| "--".to_string())}</td>
                                                <td>{event.location.clone().unwrap_or_else(|| "--".to_string())}</td>
                                            </tr>
                                        }
                                    })}
                                </tbody>
                            </table>
                        </div>
                    }
                }}
            </div>

            <div class="dashboard-section">
                <h3>{"Active Check-Ins"}</h3>
                {if active_check_ins.is_empty() {
                    html! { <p class="empty">{"No active check-ins."}</p> }
                } else {
                    html! {
                        <div class="table-container">
                            <table class="dashboard-table">
                                <thead>
                                    <tr>
                                        <th>{"Name"}</th>
                                        <th>{"Ministry"}</th>
                                        <th>{"Event"}</th>
                                        <th>{"Time"}</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {for active_check_ins.iter().map(|ci| {
                                        let id = ci.id;
                                        let pending_delete = pending_delete.clone();
                                        html! {
                                            <tr key={id}>
                                                <td>{format!("{} {}", ci.first_name, ci.last_name)}</td>
                                                <td>{ci.ministry.clone().unwrap_or_else(|| "N/A".to_string())}</td>
                                                <td>{&ci.event_title}</td>
                                                <td>{format_time_12h(&ci.checkin_time)}</td>
                                                <td>
                                                    <button
                                                        type="button"
                                                        class="btn btn-danger"
                                                        onclick={Callback::from(move |_| pending_delete.set(Some(id)))}
                                                    >
                                                        {"Delete"}
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
        </div>
    }
}
