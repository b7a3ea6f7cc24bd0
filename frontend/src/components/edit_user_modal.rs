use shared::{Family, MasterlistEntry, Ministry, UpdateUserRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct EditUserModalProps {
    pub api_client: ApiClient,
    pub entry: MasterlistEntry,
    /// Emits the user id and the update payload.
    pub on_save: Callback<(i64, UpdateUserRequest)>,
    pub on_close: Callback<()>,
}

const ROLE_OPTIONS: [&str; 4] = ["member", "volunteer", "elder", "staff"];
const GENDER_OPTIONS: [&str; 2] = ["female", "male"];

/// Masterlist edit dialog: role, gender, ministries, active flag, household.
#[function_component(EditUserModal)]
pub fn edit_user_modal(props: &EditUserModalProps) -> Html {
    let first_name = use_state(|| props.entry.first_name.clone());
    let last_name = use_state(|| props.entry.last_name.clone());
    let email = use_state(|| props.entry.email.clone().unwrap_or_default());
    let role = use_state(|| props.entry.role.clone());
    let gender = use_state(|| props.entry.gender.clone().unwrap_or_default());
    let active = use_state(|| props.entry.active);
    let family_id = use_state(|| props.entry.family_id);
    let ministry_ids = use_state(|| {
        props
            .entry
            .ministries
            .iter()
            .map(|m| m.id)
            .collect::<Vec<i64>>()
    });

    let ministries = use_state(Vec::<Ministry>::new);
    let families = use_state(Vec::<Family>::new);

    // Options for the ministry checkboxes and household select.
    use_effect_with((), {
        let api_client = props.api_client.clone();
        let ministries = ministries.clone();
        let families = families.clone();
        move |_| {
            let api_client = api_client.clone();
            let ministries = ministries.clone();
            let families = families.clone();
            spawn_local(async move {
                match api_client.get_ministries().await {
                    Ok(data) => ministries.set(data),
                    Err(e) => Logger::warn("edit_user", &format!("ministries unavailable: {}", e)),
                }
                match api_client.get_families().await {
                    Ok(data) => families.set(data),
                    Err(e) => Logger::warn("edit_user", &format!("families unavailable: {}", e)),
                }
            });
            || ()
        }
    });

    let text_setter = |state: UseStateHandle<String>| {
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_first_name_change = text_setter(first_name.clone());
    let on_last_name_change = text_setter(last_name.clone());
    let on_email_change = text_setter(email.clone());

    let on_role_change = {
        let role = role.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            role.set(select.value());
        })
    };

    let on_gender_change = {
        let gender = gender.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            gender.set(select.value());
        })
    };

    let on_family_change = {
        let family_id = family_id.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            family_id.set(select.value().parse::<i64>().ok());
        })
    };

    let on_active_change = {
        let active = active.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            active.set(input.checked());
        })
    };

    let on_submit = {
        let entry_id = props.entry.id;
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let email = email.clone();
        let role = role.clone();
        let gender = gender.clone();
        let active = active.clone();
        let family_id = family_id.clone();
        let ministry_ids = ministry_ids.clone();
        let on_save = props.on_save.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = UpdateUserRequest {
                first_name: (*first_name).trim().to_string(),
                last_name: (*last_name).trim().to_string(),
                email: Some((*email).trim().to_string()).filter(|s| !s.is_empty()),
                role: (*role).clone(),
                gender: Some((*gender).clone()).filter(|s| !s.is_empty()),
                ministry_ids: (*ministry_ids).clone(),
                active: *active,
                family_id: *family_id,
            };
            on_save.emit((entry_id, request));
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| e.stop_propagation());

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal-content" onclick={on_modal_click}>
                <h3>{format!("Edit {} {}", props.entry.first_name, props.entry.last_name)}</h3>
                <form onsubmit={on_submit}>
                    <div class="input-group">
                        <label>{"First Name"}</label>
                        <input value={(*first_name).clone()} onchange={on_first_name_change} required=true />
                    </div>
                    <div class="input-group">
                        <label>{"Last Name"}</label>
                        <input value={(*last_name).clone()} onchange={on_last_name_change} required=true />
                    </div>
                    <div class="input-group">
                        <label>{"Email"}</label>
                        <input type="email" value={(*email).clone()} onchange={on_email_change} />
                    </div>
                    <div class="input-group">
                        <label>{"Role"}</label>
                        <select onchange={on_role_change}>
                            {for ROLE_OPTIONS.iter().map(|option| {
                                html! {
                                    <option value={*option} selected={*role == *option}>{*option}</option>
                                }
                            })}
                        </select>
                    </div>
                    <div class="input-group">
                        <label>{"Gender"}</label>
                        <select onchange={on_gender_change}>
                            <option value="" selected={gender.is_empty()}>{"-"}</option>
                            {for GENDER_OPTIONS.iter().map(|option| {
                                html! {
                                    <option value={*option} selected={*gender == *option}>{*option}</option>
                                }
                            })}
                        </select>
                    </div>
                    <div class="input-group">
                        <label>{"Household / Family"}</label>
                        <select onchange={on_family_change}>
                            <option value="" selected={family_id.is_none()}>{"None"}</option>
                            {for families.iter().map(|family| {
                                html! {
                                    <option
                                        value={family.id.to_string()}
                                        selected={*family_id == Some(family.id)}
                                    >
                                        {&family.family_name}
                                    </option>
                                }
                            })}
                        </select>
                    </div>
                    <div class="input-group">
                        <label>{"Ministries"}</label>
                        <div class="ministry-checkboxes">
                            {for ministries.iter().map(|ministry| {
                                let id = ministry.id;
                                let checked = ministry_ids.contains(&id);
                                let ministry_ids = ministry_ids.clone();
                                let on_toggle = Callback::from(move |e: Event| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    let mut next = (*ministry_ids).clone();
                                    if input.checked() {
                                        if !next.contains(&id) {
                                            next.push(id);
                                        }
                                    } else {
                                        next.retain(|m| *m != id);
                                    }
                                    ministry_ids.set(next);
                                });
                                html! {
                                    <label key={id} class="ministry-option">
                                        <input type="checkbox" checked={checked} onchange={on_toggle} />
                                        {&ministry.name}
                                    </label>
                                }
                            })}
                        </div>
                    </div>
                    <div class="input-group">
                        <label class="checkbox-label">
                            <input type="checkbox" checked={*active} onchange={on_active_change} />
                            {" Active"}
                        </label>
                    </div>
                    <div class="modal-actions">
                        <button type="submit" class="btn btn-primary">{"Save"}</button>
                        <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                            {"Cancel"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
