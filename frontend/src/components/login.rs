use shared::LoginRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::session::{Session, SessionStore};

#[derive(Properties, PartialEq)]
pub struct LoginProps {
    pub api_client: ApiClient,
    pub on_login: Callback<Session>,
}

#[function_component(Login)]
pub fn login(props: &LoginProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let show_password = use_state(|| false);
    let error = use_state(|| Option::<String>::None);
    let submitting = use_state(|| false);

    let on_username_change = {
        let username = username.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_: MouseEvent| {
            show_password.set(!*show_password);
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        let on_login = props.on_login.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let api_client = api_client.clone();
            let username = username.clone();
            let password = password.clone();
            let error = error.clone();
            let submitting = submitting.clone();
            let on_login = on_login.clone();

            spawn_local(async move {
                submitting.set(true);
                error.set(None);

                let request = LoginRequest {
                    username: (*username).clone(),
                    password: (*password).clone(),
                };

                match api_client.login(&request).await {
                    Ok(response) => {
                        let session = Session {
                            token: response.token,
                            first_name: response.first_name,
                            role: response.role,
                        };
                        SessionStore::save(&session);
                        on_login.emit(session);
                    }
                    Err(_) => {
                        // Stale auth state must not outlive a failed login.
                        SessionStore::clear();
                        error.set(Some("Invalid credentials".to_string()));
                    }
                }

                submitting.set(false);
            });
        })
    };

    html! {
        <div class="login-container">
            <div class="login-box">
                <h2>{"Login"}</h2>
                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <input
                            type="text"
                            class="form-input"
                            placeholder="Username"
                            value={(*username).clone()}
                            onchange={on_username_change}
                            disabled={*submitting}
                        />
                    </div>
                    <div class="form-group password-wrapper">
                        <input
                            type={if *show_password { "text" } else { "password" }}
                            class="form-input"
                            placeholder="Password"
                            value={(*password).clone()}
                            onchange={on_password_change}
                            disabled={*submitting}
                        />
                        <button type="button" class="toggle-password" onclick={toggle_password}>
                            {if *show_password { "Hide" } else { "Show" }}
                        </button>
                    </div>
                    <button type="submit" class="btn btn-primary" disabled={*submitting}>
                        {if *submitting { "Signing in..." } else { "Login" }}
                    </button>
                </form>
                {if let Some(error) = (*error).as_ref() {
                    html! { <p class="error">{error}</p> }
                } else {
                    html! {}
                }}
            </div>
        </div>
    }
}
