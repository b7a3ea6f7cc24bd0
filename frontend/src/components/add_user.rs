use shared::{CreateAdminRequest, CreateUserRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

use super::family_picker::FamilyPicker;
use super::status_banner::{StatusBanner, StatusMessage};

#[derive(Properties, PartialEq)]
pub struct AddUserProps {
    pub api_client: ApiClient,
}

const ROLE_OPTIONS: [&str; 5] = ["member", "volunteer", "elder", "staff", "admin"];

/// Add a person. Admins additionally need credentials and go to their own
/// endpoint; everyone else is an ordinary roster entry.
#[function_component(AddUser)]
pub fn add_user(props: &AddUserProps) -> Html {
    let first_name = use_state(String::new);
    let last_name = use_state(String::new);
    let email = use_state(String::new);
    let phone = use_state(String::new);
    let role = use_state(|| "member".to_string());
    let username = use_state(String::new);
    let password = use_state(String::new);
    let family_id = use_state(|| Option::<i64>::None);
    let submitting = use_state(|| false);
    let messages = use_state(Vec::<StatusMessage>::new);
    // Remounts the family picker when the form resets after a save.
    let form_generation = use_state(|| 0u32);

    let text_setter = |state: UseStateHandle<String>| {
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_first_name_change = text_setter(first_name.clone());
    let on_last_name_change = text_setter(last_name.clone());
    let on_email_change = text_setter(email.clone());
    let on_phone_change = text_setter(phone.clone());
    let on_username_change = text_setter(username.clone());
    let on_password_change = text_setter(password.clone());

    let on_role_change = {
        let role = role.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            role.set(select.value());
        })
    };

    let on_family_change = {
        let family_id = family_id.clone();
        Callback::from(move |value: Option<i64>| family_id.set(value))
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let email = email.clone();
        let phone = phone.clone();
        let role = role.clone();
        let username = username.clone();
        let password = password.clone();
        let family_id = family_id.clone();
        let submitting = submitting.clone();
        let messages = messages.clone();
        let form_generation = form_generation.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let is_admin = *role == "admin";
            if is_admin && (username.trim().is_empty() || password.is_empty()) {
                messages.set(vec![StatusMessage::error(
                    "Username and password required for Admin.",
                )]);
                return;
            }

            let api_client = api_client.clone();
            let first_name = first_name.clone();
            let last_name = last_name.clone();
            let email = email.clone();
            let phone = phone.clone();
            let role = role.clone();
            let username = username.clone();
            let password = password.clone();
            let family_id = family_id.clone();
            let submitting = submitting.clone();
            let messages = messages.clone();
            let form_generation = form_generation.clone();

            spawn_local(async move {
                submitting.set(true);

                let email_value = Some(email.trim().to_string()).filter(|s| !s.is_empty());
                let phone_value = Some(phone.trim().to_string()).filter(|s| !s.is_empty());

                let outcome = if is_admin {
                    let request = CreateAdminRequest {
                        username: username.trim().to_string(),
                        password: (*password).clone(),
                        first_name: first_name.trim().to_string(),
                        last_name: last_name.trim().to_string(),
                        email: email_value,
                        phone: phone_value,
                        family_id: *family_id,
                    };
                    api_client.create_admin(&request).await
                } else {
                    let request = CreateUserRequest {
                        first_name: first_name.trim().to_string(),
                        last_name: last_name.trim().to_string(),
                        email: email_value,
                        phone: phone_value,
                        role: (*role).clone(),
                        family_id: *family_id,
                    };
                    api_client.create_user(&request).await
                };

                match outcome {
                    Ok(()) => {
                        messages.set(vec![StatusMessage::success(if is_admin {
                            "Admin added!"
                        } else {
                            "User added!"
                        })]);
                        first_name.set(String::new());
                        last_name.set(String::new());
                        email.set(String::new());
                        phone.set(String::new());
                        role.set("member".to_string());
                        username.set(String::new());
                        password.set(String::new());
                        family_id.set(None);
                        form_generation.set(*form_generation + 1);
                    }
                    Err(e) => {
                        Logger::error("add_user", &format!("create failed: {}", e));
                        messages.set(vec![StatusMessage::error("Failed to add user/admin.")]);
                    }
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
        <div class="form-container">
            <h2 class="page-title">{"Add New User"}</h2>

            <StatusBanner messages={(*messages).clone()} on_dismiss={dismiss_messages} />

            <form onsubmit={on_submit} autocomplete="off">
                <div class="input-group">
                    <label>{"First Name"}</label>
                    <input
                        value={(*first_name).clone()}
                        onchange={on_first_name_change}
                        required=true
                        disabled={*submitting}
                    />
                </div>
                <div class="input-group">
                    <label>{"Last Name"}</label>
                    <input
                        value={(*last_name).clone()}
                        onchange={on_last_name_change}
                        required=true
                        disabled={*submitting}
                    />
                </div>
                <div class="input-group">
                    <label>{"Email"}</label>
                    <input
                        type="email"
                        value={(*email).clone()}
                        onchange={on_email_change}
                        disabled={*submitting}
                    />
                </div>
                <div class="input-group">
                    <label>{"Phone"}</label>
                    <input
                        value={(*phone).clone()}
                        onchange={on_phone_change}
                        disabled={*submitting}
                    />
                </div>
                <div class="input-group">
                    <label>{"User Role"}</label>
                    <select onchange={on_role_change} required=true disabled={*submitting}>
                        {for ROLE_OPTIONS.iter().map(|option| {
                            html! {
                                <option value={*option} selected={*role == *option}>{*option}</option>
                            }
                        })}
                    </select>
                </div>

                {if *role == "admin" {
                    html! {
                        <>
                            <div class="input-group">
                                <label>{"Username"}</label>
                                <input
                                    value={(*username).clone()}
                                    onchange={on_username_change}
                                    autocomplete="username"
                                    disabled={*submitting}
                                />
                            </div>
                            <div class="input-group">
                                <label>{"Password"}</label>
                                <input
                                    type="password"
                                    value={(*password).clone()}
                                    onchange={on_password_change}
                                    autocomplete="new-password"
                                    disabled={*submitting}
                                />
                            </div>
                        </>
                    }
                } else {
                    html! {}
                }}

                <FamilyPicker
                    key={*form_generation}
                    api_client={props.api_client.clone()}
                    value={*family_id}
                    on_change={on_family_change}
                />

                <button type="submit" class="btn btn-primary" disabled={*submitting}>
                    {if *submitting { "Adding..." } else { "Add User" }}
                </button>
            </form>
        </div>
    }
}
