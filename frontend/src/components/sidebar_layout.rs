use yew::prelude::*;

use crate::services::session::Session;
use crate::Page;

#[derive(Properties, PartialEq)]
pub struct SidebarLayoutProps {
    pub session: Session,
    pub active: Page,
    pub on_navigate: Callback<Page>,
    pub on_logout: Callback<()>,
    pub children: Html,
}

const NAV_ITEMS: [Page; 8] = [
    Page::Dashboard,
    Page::CheckIn,
    Page::CheckInList,
    Page::Reports,
    Page::Masterlist,
    Page::EventList,
    Page::AddUser,
    Page::ImportData,
];

#[function_component(SidebarLayout)]
pub fn sidebar_layout(props: &SidebarLayoutProps) -> Html {
    let sidebar_open = use_state(|| true);

    let toggle_sidebar = {
        let sidebar_open = sidebar_open.clone();
        Callback::from(move |_: MouseEvent| sidebar_open.set(!*sidebar_open))
    };

    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    html! {
        <div class={if *sidebar_open { "layout-container sidebar-visible" } else { "layout-container sidebar-hidden" }}>
            <aside class="sidebar">
                <button type="button" class="toggle-sidebar-btn" onclick={toggle_sidebar.clone()}>
                    {if *sidebar_open { "Close" } else { "Menu" }}
                </button>
                <h2 class="logo">{"Check-In Admin"}</h2>
                <nav>
                    {for NAV_ITEMS.iter().map(|page| {
                        let on_navigate = props.on_navigate.clone();
                        let page = *page;
                        let class = if props.active == page { "nav-link active" } else { "nav-link" };
                        html! {
                            <button
                                type="button"
                                class={class}
                                onclick={Callback::from(move |_| on_navigate.emit(page))}
                            >
                                {page.label()}
                            </button>
                        }
                    })}
                </nav>
            </aside>

            <main class="main-content">
                <div class="topbar">
                    <span class="admin-name">{format!("Welcome, {}", props.session.first_name)}</span>
                    <button type="button" class="btn btn-secondary logout-btn" onclick={on_logout}>
                        {"Logout"}
                    </button>
                </div>
                {props.children.clone()}
            </main>
        </div>
    }
}
