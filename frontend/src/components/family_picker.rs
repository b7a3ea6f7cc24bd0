use shared::{CreateFamilyRequest, Family, FamilyMember};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct FamilyPickerProps {
    pub api_client: ApiClient,
    /// Currently linked household, if any.
    pub value: Option<i64>,
    pub on_change: Callback<Option<i64>>,
}

/// Household autocomplete: type to filter existing families, pick one to
/// link it (and preview its members), or create a new family inline when
/// the name is not taken.
#[function_component(FamilyPicker)]
pub fn family_picker(props: &FamilyPickerProps) -> Html {
    let families = use_state(Vec::<Family>::new);
    let query = use_state(String::new);
    let show_dropdown = use_state(|| false);
    let adding_new = use_state(|| false);
    let new_family_name = use_state(String::new);
    let members = use_state(Vec::<FamilyMember>::new);
    let error = use_state(|| Option::<String>::None);

    let fetch_families = {
        let api_client = props.api_client.clone();
        let families = families.clone();
        Callback::from(move |_: ()| {
            let api_client = api_client.clone();
            let families = families.clone();
            spawn_local(async move {
                match api_client.get_families().await {
                    Ok(data) => families.set(data),
                    Err(e) => {
                        Logger::warn("family_picker", &format!("failed to fetch families: {}", e));
                        families.set(Vec::new());
                    }
                }
            });
        })
    };

    use_effect_with((), {
        let fetch_families = fetch_families.clone();
        move |_| {
            fetch_families.emit(());
            || ()
        }
    });

    // Preview the selected household's members.
    use_effect_with(props.value, {
        let api_client = props.api_client.clone();
        let members = members.clone();
        move |family_id: &Option<i64>| {
            match *family_id {
                Some(family_id) => {
                    let api_client = api_client.clone();
                    let members = members.clone();
                    spawn_local(async move {
                        match api_client.get_family_members(family_id).await {
                            Ok(data) => members.set(data),
                            Err(_) => members.set(Vec::new()),
                        }
                    });
                }
                None => members.set(Vec::new()),
            }
            || ()
        }
    });

    let on_query_change = {
        let query = query.clone();
        let show_dropdown = show_dropdown.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            query.set(input.value());
            show_dropdown.set(true);
            on_change.emit(None);
        })
    };

    let on_focus = {
        let show_dropdown = show_dropdown.clone();
        Callback::from(move |_: FocusEvent| show_dropdown.set(true))
    };

    let clear_selection = {
        let query = query.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            query.set(String::new());
            on_change.emit(None);
        })
    };

    let on_add_family = {
        let api_client = props.api_client.clone();
        let new_family_name = new_family_name.clone();
        let adding_new = adding_new.clone();
        let query = query.clone();
        let error = error.clone();
        let on_change = props.on_change.clone();
        let fetch_families = fetch_families.clone();

        Callback::from(move |_: MouseEvent| {
            let name = new_family_name.trim().to_string();
            if name.is_empty() {
                error.set(Some("Please enter a family name.".to_string()));
                return;
            }

            let api_client = api_client.clone();
            let new_family_name = new_family_name.clone();
            let adding_new = adding_new.clone();
            let query = query.clone();
            let error = error.clone();
            let on_change = on_change.clone();
            let fetch_families = fetch_families.clone();

            spawn_local(async move {
                match api_client
                    .create_family(&CreateFamilyRequest { family_name: name })
                    .await
                {
                    Ok(family) => {
                        query.set(family.family_name.clone());
                        on_change.emit(Some(family.id));
                        adding_new.set(false);
                        new_family_name.set(String::new());
                        error.set(None);
                        fetch_families.emit(());
                    }
                    Err(e) => {
                        Logger::error("family_picker", &format!("failed to add family: {}", e));
                        error.set(Some("Failed to add family.".to_string()));
                    }
                }
            });
        })
    };

    let filtered: Vec<Family> = families
        .iter()
        .filter(|family| {
            family
                .family_name
                .to_lowercase()
                .contains(&query.to_lowercase())
        })
        .cloned()
        .collect();

    let exact_exists = families
        .iter()
        .any(|family| family.family_name.eq_ignore_ascii_case(query.trim()));

    html! {
        <div class="input-group">
            <label>{"Household / Family"}</label>
            {if let Some(error) = (*error).as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else {
                html! {}
            }}
            {if !*adding_new {
                html! {
                    <div class="family-autocomplete">
                        <input
                            type="text"
                            placeholder="Type household name"
                            value={(*query).clone()}
                            readonly={props.value.is_some()}
                            oninput={on_query_change}
                            onfocus={on_focus}
                        />
                        {if props.value.is_some() {
                            html! {
                                <button
                                    type="button"
                                    class="btn-clear-family"
                                    title="Clear selection"
                                    onclick={clear_selection}
                                >
                                    {"x"}
                                </button>
                            }
                        } else {
                            html! {}
                        }}
                        {if *show_dropdown && props.value.is_none() && !query.trim().is_empty() {
                            html! {
                                <div class="family-dropdown">
                                    {for filtered.iter().map(|family| {
                                        let family = family.clone();
                                        let query = query.clone();
                                        let show_dropdown = show_dropdown.clone();
                                        let on_change = props.on_change.clone();
                                        let display_name = family.family_name.clone();
                                        html! {
                                            <div
                                                key={family.id}
                                                class="family-option"
                                                onmousedown={Callback::from(move |_: MouseEvent| {
                                                    query.set(family.family_name.clone());
                                                    on_change.emit(Some(family.id));
                                                    show_dropdown.set(false);
                                                })}
                                            >
                                                {display_name}
                                            </div>
                                        }
                                    })}
                                    {if !exact_exists {
                                        let query_value = query.trim().to_string();
                                        let new_family_name = new_family_name.clone();
                                        let adding_new = adding_new.clone();
                                        let show_dropdown = show_dropdown.clone();
                                        html! {
                                            <div
                                                class="family-option add-new"
                                                onmousedown={Callback::from(move |_: MouseEvent| {
                                                    new_family_name.set(query_value.clone());
                                                    adding_new.set(true);
                                                    show_dropdown.set(false);
                                                })}
                                            >
                                                {format!("+ Add New Family: \"{}\"", query.trim())}
                                            </div>
                                        }
                                    } else {
                                        html! {}
                                    }}
                                </div>
                            }
                        } else {
                            html! {}
                        }}
                    </div>
                }
            } else {
                let on_name_change = {
                    let new_family_name = new_family_name.clone();
                    Callback::from(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        new_family_name.set(input.value());
                    })
                };
                let cancel_new = {
                    let adding_new = adding_new.clone();
                    Callback::from(move |_: MouseEvent| adding_new.set(false))
                };
                html! {
                    <div class="family-create-row">
                        <input
                            placeholder="Family Name"
                            value={(*new_family_name).clone()}
                            onchange={on_name_change}
                        />
                        <button type="button" class="btn btn-primary" onclick={on_add_family}>
                            {"Save"}
                        </button>
                        <button type="button" class="btn btn-secondary" onclick={cancel_new}>
                            {"Cancel"}
                        </button>
                    </div>
                }
            }}

            {if props.value.is_some() && !members.is_empty() {
                html! {
                    <div class="family-members-preview">
                        <strong>{"Current Household Members:"}</strong>
                        <ul>
                            {for members.iter().map(|member| {
                                html! {
                                    <li key={member.id}>
                                        {format!("{} {} ({})", member.first_name, member.last_name, member.role)}
                                    </li>
                                }
                            })}
                        </ul>
                    </div>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
