use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusKind {
    Success,
    Info,
    Error,
}

/// One user-facing message line. Pages collect these instead of raising
/// toasts; a batch check-in can produce several at once.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Info, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, text: text.into() }
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusBannerProps {
    pub messages: Vec<StatusMessage>,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

#[function_component(StatusBanner)]
pub fn status_banner(props: &StatusBannerProps) -> Html {
    if props.messages.is_empty() {
        return html! {};
    }

    html! {
        <div class="status-banner">
            {for props.messages.iter().map(|message| {
                let class = match message.kind {
                    StatusKind::Success => "form-message success",
                    StatusKind::Info => "form-message info",
                    StatusKind::Error => "form-message error",
                };
                html! { <div class={class}>{&message.text}</div> }
            })}
            {if let Some(on_dismiss) = props.on_dismiss.clone() {
                html! {
                    <button
                        type="button"
                        class="status-dismiss"
                        onclick={Callback::from(move |_| on_dismiss.emit(()))}
                    >
                        {"Dismiss"}
                    </button>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
