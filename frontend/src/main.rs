use yew::prelude::*;

mod checkin;
mod components;
mod hooks;
mod services;

use components::{
    AddEvent, AddUser, CheckInList, CheckInPage, Dashboard, EventList, ImportData, Login,
    Masterlist, Reports, SidebarLayout,
};
use services::api::ApiClient;
use services::session::{Session, SessionStore};

/// The navigable views. Page switching is plain state, no URL routing; a
/// reload lands back on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    CheckIn,
    CheckInList,
    Masterlist,
    EventList,
    AddEvent,
    AddUser,
    Reports,
    ImportData,
}

impl Page {
    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::CheckIn => "Check-In",
            Page::CheckInList => "Check-In List",
            Page::Masterlist => "Masterlist",
            Page::EventList => "Event List",
            Page::AddEvent => "Add Event",
            Page::AddUser => "Add User",
            Page::Reports => "Reports",
            Page::ImportData => "Import Data",
        }
    }
}

#[function_component(App)]
fn app() -> Html {
    let session = use_state(SessionStore::load);
    let page = use_state(|| Page::Dashboard);
    let api_client = use_memo((), |_| ApiClient::new());

    let on_login = {
        let session = session.clone();
        let page = page.clone();
        Callback::from(move |new_session: Session| {
            session.set(Some(new_session));
            page.set(Page::Dashboard);
        })
    };

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_| {
            SessionStore::clear();
            session.set(None);
        })
    };

    let on_navigate = {
        let page = page.clone();
        Callback::from(move |next: Page| page.set(next))
    };

    let Some(current_session) = (*session).clone() else {
        return html! {
            <Login api_client={(*api_client).clone()} on_login={on_login} />
        };
    };

    let to_event_list = {
        let page = page.clone();
        Callback::from(move |_| page.set(Page::EventList))
    };

    let to_add_event = {
        let page = page.clone();
        Callback::from(move |_| page.set(Page::AddEvent))
    };

    let content = match *page {
        Page::Dashboard => html! {
            <Dashboard
                api_client={(*api_client).clone()}
                admin_name={current_session.first_name.clone()}
            />
        },
        Page::CheckIn => html! {
            <CheckInPage api_client={(*api_client).clone()} />
        },
        Page::CheckInList => html! {
            <CheckInList api_client={(*api_client).clone()} />
        },
        Page::Masterlist => html! {
            <Masterlist api_client={(*api_client).clone()} />
        },
        Page::EventList => html! {
            <EventList api_client={(*api_client).clone()} on_add_event={to_add_event} />
        },
        Page::AddEvent => html! {
            <AddEvent api_client={(*api_client).clone()} on_done={to_event_list} />
        },
        Page::AddUser => html! {
            <AddUser api_client={(*api_client).clone()} />
        },
        Page::Reports => html! {
            <Reports
                api_client={(*api_client).clone()}
                session={current_session.clone()}
            />
        },
        Page::ImportData => html! {
            <ImportData api_client={(*api_client).clone()} />
        },
    };

    html! {
        <SidebarLayout
            session={current_session}
            active={*page}
            on_navigate={on_navigate}
            on_logout={on_logout}
        >
            {content}
        </SidebarLayout>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
