use shared::{MasterlistEntry, PersonRef, UpdateUserRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

use super::confirm_modal::ConfirmModal;
use super::edit_user_modal::EditUserModal;
use super::status_banner::{StatusBanner, StatusMessage};

const ITEMS_PER_PAGE: usize = 10;

#[derive(Properties, PartialEq)]
pub struct MasterlistProps {
    pub api_client: ApiClient,
}

/// Condensed pagination: first and last page always, a window of two around
/// the current page, ellipses for the gaps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

pub fn page_items(current: usize, total: usize) -> Vec<PageItem> {
    if total <= 1 {
        return Vec::new();
    }
    let mut items = vec![PageItem::Page(1)];
    if current > 4 {
        items.push(PageItem::Ellipsis);
    }
    let low = current.saturating_sub(2).max(2);
    let high = (current + 2).min(total - 1);
    for page in low..=high {
        items.push(PageItem::Page(page));
    }
    if current + 3 < total {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total));
    items
}

fn matches_search(entry: &MasterlistEntry, term: &str) -> bool {
    let haystack = format!(
        "{} {} {} {}",
        entry.first_name,
        entry.last_name,
        entry.email.as_deref().unwrap_or_default(),
        entry.phone.as_deref().unwrap_or_default()
    )
    .to_lowercase();
    haystack.contains(term)
}

fn ministry_labels(entry: &MasterlistEntry) -> String {
    if entry.ministries.is_empty() {
        "-".to_string()
    } else {
        entry
            .ministries
            .iter()
            .map(|m| m.name.clone())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Administrative view of all people with search, pagination, edit, delete.
#[function_component(Masterlist)]
pub fn masterlist(props: &MasterlistProps) -> Html {
    let entries = use_state(Vec::<MasterlistEntry>::new);
    let search = use_state(String::new);
    let current_page = use_state(|| 1usize);
    let editing = use_state(|| Option::<MasterlistEntry>::None);
    let pending_delete = use_state(|| Option::<PersonRef>::None);
    let messages = use_state(Vec::<StatusMessage>::new);

    let fetch_entries = {
        let api_client = props.api_client.clone();
        let entries = entries.clone();
        let messages = messages.clone();

        Callback::from(move |_: ()| {
            let api_client = api_client.clone();
            let entries = entries.clone();
            let messages = messages.clone();

            spawn_local(async move {
                match api_client.get_masterlist().await {
                    Ok(data) => entries.set(data),
                    Err(e) => {
                        Logger::error("masterlist", &format!("failed to fetch users: {}", e));
                        messages.set(vec![StatusMessage::error("Failed to load the masterlist.")]);
                    }
                }
            });
        })
    };

    use_effect_with((), {
        let fetch_entries = fetch_entries.clone();
        move |_| {
            fetch_entries.emit(());
            || ()
        }
    });

    // New search resets to the first page.
    let on_search_change = {
        let search = search.clone();
        let current_page = current_page.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
            current_page.set(1);
        })
    };

    let clear_search = {
        let search = search.clone();
        let current_page = current_page.clone();
        Callback::from(move |_: MouseEvent| {
            search.set(String::new());
            current_page.set(1);
        })
    };

    let term = search.to_lowercase();
    let filtered: Vec<MasterlistEntry> = entries
        .iter()
        .filter(|entry| matches_search(entry, &term))
        .cloned()
        .collect();

    let total_pages = filtered.len().div_ceil(ITEMS_PER_PAGE).max(1);
    let page = (*current_page).min(total_pages);
    let paginated: Vec<MasterlistEntry> = filtered
        .iter()
        .skip((page - 1) * ITEMS_PER_PAGE)
        .take(ITEMS_PER_PAGE)
        .cloned()
        .collect();

    let on_save = {
        let api_client = props.api_client.clone();
        let editing = editing.clone();
        let fetch_entries = fetch_entries.clone();
        let messages = messages.clone();

        Callback::from(move |(id, request): (i64, UpdateUserRequest)| {
            let api_client = api_client.clone();
            let editing = editing.clone();
            let fetch_entries = fetch_entries.clone();
            let messages = messages.clone();

            spawn_local(async move {
                match api_client.update_user(id, &request).await {
                    Ok(()) => {
                        editing.set(None);
                        messages.set(vec![StatusMessage::success("User updated.")]);
                        fetch_entries.emit(());
                    }
                    Err(e) => {
                        Logger::error("masterlist", &format!("update failed: {}", e));
                        messages.set(vec![StatusMessage::error("Error updating user.")]);
                    }
                }
            });
        })
    };

    let on_close_edit = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(None))
    };

    let on_confirm_delete = {
        let api_client = props.api_client.clone();
        let pending_delete = pending_delete.clone();
        let fetch_entries = fetch_entries.clone();
        let messages = messages.clone();

        Callback::from(move |_: ()| {
            let Some(person) = *pending_delete else { return };
            pending_delete.set(None);

            let api_client = api_client.clone();
            let fetch_entries = fetch_entries.clone();
            let messages = messages.clone();

            spawn_local(async move {
                match api_client.delete_user(&person).await {
                    Ok(()) => {
                        messages.set(vec![StatusMessage::success("User deleted.")]);
                        fetch_entries.emit(());
                    }
                    Err(e) => {
                        Logger::error("masterlist", &format!("delete failed: {}", e));
                        messages.set(vec![StatusMessage::error("Failed to delete user.")]);
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

    html! {
        <div class="masterlist-container">
            <ConfirmModal
                open={pending_delete.is_some()}
                message={"Are you sure you want to delete this user?".to_string()}
                on_confirm={on_confirm_delete}
                on_cancel={on_cancel_delete}
            />

            <div class="top-bar">
                <h2>{"Master List"}</h2>
            </div>

            <StatusBanner messages={(*messages).clone()} on_dismiss={dismiss_messages} />

            <div class="search-bar-wrapper">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search by name, email or phone..."
                    value={(*search).clone()}
                    oninput={on_search_change}
                />
                {if !search.is_empty() {
                    html! {
                        <button type="button" class="clear-btn" onclick={clear_search}>
                            {"Clear"}
                        </button>
                    }
                } else {
                    html! {}
                }}
            </div>

            <div class="table-container">
                <table class="styled-table">
                    <thead>
                        <tr>
                            <th>{"Name"}</th>
                            <th>{"Gender"}</th>
                            <th>{"Email"}</th>
                            <th>{"Role"}</th>
                            <th>{"Ministry"}</th>
                            <th>{"Status"}</th>
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {for paginated.iter().map(|entry| {
                            let person = PersonRef::from_role(&entry.role, entry.id);
                            let on_edit = {
                                let editing = editing.clone();
                                let entry = entry.clone();
                                Callback::from(move |_: MouseEvent| editing.set(Some(entry.clone())))
                            };
                            let on_delete = {
                                let pending_delete = pending_delete.clone();
                                Callback::from(move |_: MouseEvent| pending_delete.set(Some(person)))
                            };
                            html! {
                                <tr key={person.to_string()}>
                                    <td>{format!("{} {}", entry.first_name, entry.last_name)}</td>
                                    <td>{entry.gender.clone().unwrap_or_else(|| "-".to_string())}</td>
                                    <td>{entry.email.clone().unwrap_or_else(|| "-".to_string())}</td>
                                    <td class="role">{&entry.role}</td>
                                    <td>{ministry_labels(entry)}</td>
                                    <td>
                                        <span class={if entry.active { "status-pill active" } else { "status-pill inactive" }}>
                                            {if entry.active { "Active" } else { "Inactive" }}
                                        </span>
                                    </td>
                                    <td>
                                        <button type="button" class="edit-btn" onclick={on_edit}>{"Edit"}</button>
                                        <button type="button" class="delete-btn" onclick={on_delete}>{"Delete"}</button>
                                    </td>
                                </tr>
                            }
                        })}
                        {if paginated.is_empty() {
                            html! {
                                <tr>
                                    <td colspan="7" class="empty">{"No users found."}</td>
                                </tr>
                            }
                        } else {
                            html! {}
                        }}
                    </tbody>
                </table>
            </div>

            <div class="pagination">
                {if total_pages > 1 {
                    let prev = {
                        let current_page = current_page.clone();
                        Callback::from(move |_: MouseEvent| {
                            current_page.set((*current_page).saturating_sub(1).max(1));
                        })
                    };
                    let next = {
                        let current_page = current_page.clone();
                        Callback::from(move |_: MouseEvent| {
                            current_page.set((*current_page + 1).min(total_pages));
                        })
                    };
                    html! {
                        <>
                            <button type="button" onclick={prev} disabled={page == 1}>{"Prev"}</button>
                            {for page_items(page, total_pages).into_iter().enumerate().map(|(idx, item)| {
                                match item {
                                    PageItem::Page(number) => {
                                        let current_page = current_page.clone();
                                        html! {
                                            <button
                                                type="button"
                                                key={format!("page-{}", number)}
                                                class={if page == number { "active" } else { "" }}
                                                onclick={Callback::from(move |_| current_page.set(number))}
                                            >
                                                {number}
                                            </button>
                                        }
                                    }
                                    PageItem::Ellipsis => html! {
                                        <span key={format!("ellipsis-{}", idx)} class="ellipsis">{"..."}</span>
                                    },
                                }
                            })}
                            <button type="button" onclick={next} disabled={page == total_pages}>{"Next"}</button>
                        </>
                    }
                } else {
                    html! {}
                }}
            </div>

            {if let Some(entry) = (*editing).clone() {
                html! {
                    <EditUserModal
                        api_client={props.api_client.clone()}
                        entry={entry}
                        on_save={on_save}
                        on_close={on_close_edit}
                    />
                }
            } else {
                html! {}
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(items: &[PageItem]) -> Vec<Option<usize>> {
        items
            .iter()
            .map(|i| match i {
                PageItem::Page(n) => Some(*n),
                PageItem::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn single_page_renders_nothing() {
        assert!(page_items(1, 1).is_empty());
        assert!(page_items(1, 0).is_empty());
    }

    #[test]
    fn few_pages_are_all_listed() {
        assert_eq!(
            pages(&page_items(2, 4)),
            vec![Some(1), Some(2), Some(3), Some(4)]
        );
    }

    #[test]
    fn middle_of_many_pages_gets_both_ellipses() {
        assert_eq!(
            pages(&page_items(10, 20)),
            vec![
                Some(1),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                None,
                Some(20)
            ]
        );
    }

    #[test]
    fn edges_skip_the_adjacent_ellipsis() {
        assert_eq!(
            pages(&page_items(1, 10)),
            vec![Some(1), Some(2), Some(3), None, Some(10)]
        );
        assert_eq!(
            pages(&page_items(10, 10)),
            vec![Some(1), None, Some(8), Some(9), Some(10)]
        );
    }
}
