use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

use super::status_banner::{StatusBanner, StatusMessage};

#[derive(Properties, PartialEq)]
pub struct ImportDataProps {
    pub api_client: ApiClient,
}

/// Roster import: pick a CSV/XLSX file and hand it to the backend, which
/// does all the parsing.
#[function_component(ImportData)]
pub fn import_data(props: &ImportDataProps) -> Html {
    let file = use_state(|| Option::<web_sys::File>::None);
    let importing = use_state(|| false);
    let messages = use_state(Vec::<StatusMessage>::new);
    let file_input = use_node_ref();

    let on_file_change = {
        let file = file.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            file.set(input.files().and_then(|files| files.get(0)));
        })
    };

    let on_import = {
        let api_client = props.api_client.clone();
        let file = file.clone();
        let importing = importing.clone();
        let messages = messages.clone();
        let file_input = file_input.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(selected) = (*file).clone() else {
                messages.set(vec![StatusMessage::error("Please select a file.")]);
                return;
            };

            let api_client = api_client.clone();
            let file = file.clone();
            let importing = importing.clone();
            let messages = messages.clone();
            let file_input = file_input.clone();

            spawn_local(async move {
                importing.set(true);

                let form = match web_sys::FormData::new() {
                    Ok(form) => form,
                    Err(e) => {
                        Logger::error("import_data", &format!("form setup failed: {:?}", e));
                        importing.set(false);
                        return;
                    }
                };
                if let Err(e) = form.append_with_blob("file", &selected) {
                    Logger::error("import_data", &format!("form append failed: {:?}", e));
                    importing.set(false);
                    return;
                }

                match api_client.import_users(form).await {
                    Ok(response) => {
                        messages.set(vec![StatusMessage::success(format!(
                            "Import successful: {} people imported.",
                            response.imported
                        ))]);
                        file.set(None);
                        if let Some(input) = file_input.cast::<HtmlInputElement>() {
                            input.set_value("");
                        }
                    }
                    Err(e) => {
                        Logger::error("import_data", &format!("import failed: {}", e));
                        messages.set(vec![StatusMessage::error(format!("Import failed: {}", e))]);
                    }
                }

                importing.set(false);
            });
        })
    };

    let dismiss_messages = {
        let messages = messages.clone();
        Callback::from(move |_| messages.set(Vec::new()))
    };

    html! {
        <div class="form-container import-card">
            <h2 class="page-title">{"Import Users"}</h2>

            <StatusBanner messages={(*messages).clone()} on_dismiss={dismiss_messages} />

            <input
                ref={file_input}
                type="file"
                accept=".csv, .xlsx"
                onchange={on_file_change}
                disabled={*importing}
            />
            <button
                type="button"
                class="btn btn-primary"
                onclick={on_import}
                disabled={*importing}
            >
                {if *importing { "Importing..." } else { "Import" }}
            </button>
        </div>
    }
}
