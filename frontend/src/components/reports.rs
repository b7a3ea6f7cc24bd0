use serde_json::Value;
use shared::{Event as ChurchEvent, Ministry, ReportRow, RosterEntry};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use crate::services::api::{ApiClient, ApiError};
use crate::services::csv;
use crate::services::date_utils::format_date_display;
use crate::services::logging::Logger;
use crate::services::session::Session;

use super::status_banner::{StatusBanner, StatusMessage};

/// Ministries resolved by name for the preset report types.
const OVERSEER_MINISTRY_NAME: &str = "overseers";
const STAFF_MINISTRY_NAME: &str = "staff";

/// Keys that never become table columns: raw foreign keys and the name parts
/// that are folded into a single `name` column.
const HIDDEN_KEYS: [&str; 9] = [
    "user_id",
    "ministry_id",
    "id",
    "type",
    "elder_id",
    "event_id",
    "checkin_id",
    "first_name",
    "last_name",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Attendees,
    OverseerAttendance,
    StaffAttendance,
    MinistryAttendance,
    MinistryAbsent,
    Elder,
    ElderAbsent,
}

impl ReportKind {
    const ALL: [ReportKind; 7] = [
        ReportKind::Attendees,
        ReportKind::OverseerAttendance,
        ReportKind::StaffAttendance,
        ReportKind::MinistryAttendance,
        ReportKind::MinistryAbsent,
        ReportKind::Elder,
        ReportKind::ElderAbsent,
    ];

    fn value(&self) -> &'static str {
        match self {
            ReportKind::Attendees => "attendees",
            ReportKind::OverseerAttendance => "overseer-attendance",
            ReportKind::StaffAttendance => "staff-attendance",
            ReportKind::MinistryAttendance => "ministry-attendance",
            ReportKind::MinistryAbsent => "ministry-absent",
            ReportKind::Elder => "elder",
            ReportKind::ElderAbsent => "elder-absent",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ReportKind::Attendees => "Full Attendee Report",
            ReportKind::OverseerAttendance => "Overseer Attendance Report",
            ReportKind::StaffAttendance => "Staff Attendance Report",
            ReportKind::MinistryAttendance => "Ministry Attendance Report",
            ReportKind::MinistryAbsent => "Ministry Absent Report",
            ReportKind::Elder => "Elder Report",
            ReportKind::ElderAbsent => "Elder Absent Report",
        }
    }

    fn from_value(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.value() == value)
            .unwrap_or(ReportKind::Attendees)
    }

    fn wants_event_filter(&self) -> bool {
        matches!(
            self,
            ReportKind::OverseerAttendance
                | ReportKind::StaffAttendance
                | ReportKind::MinistryAttendance
                | ReportKind::MinistryAbsent
                | ReportKind::ElderAbsent
        )
    }

    fn wants_ministry_filter(&self) -> bool {
        matches!(self, ReportKind::MinistryAttendance | ReportKind::MinistryAbsent)
    }

    fn wants_elder_filter(&self) -> bool {
        matches!(self, ReportKind::Elder | ReportKind::ElderAbsent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Toggle behavior: first selection of a column sorts ascending, selecting
/// it again flips to descending.
pub fn next_sort(
    current: Option<(&str, SortDirection)>,
    column: &str,
) -> (String, SortDirection) {
    match current {
        Some((key, SortDirection::Ascending)) if key == column => {
            (column.to_string(), SortDirection::Descending)
        }
        _ => (column.to_string(), SortDirection::Ascending),
    }
}

/// Fold first/last name into one cell.
pub fn combine_name(row: &ReportRow) -> String {
    let first = row
        .get("first_name")
        .map(csv::value_to_cell)
        .unwrap_or_default();
    let last = row
        .get("last_name")
        .map(csv::value_to_cell)
        .unwrap_or_default();
    let name = format!("{} {}", first, last).trim().to_string();
    if name.is_empty() {
        "-".to_string()
    } else {
        name
    }
}

/// Visible columns: `name` first, then every key of the first row that is
/// not id-ish plumbing.
pub fn visible_columns(rows: &[ReportRow]) -> Vec<String> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let mut columns = vec!["name".to_string()];
    columns.extend(
        first
            .keys()
            .filter(|key| !HIDDEN_KEYS.contains(&key.as_str()))
            .cloned(),
    );
    columns
}

fn sort_value(row: &ReportRow, key: &str) -> Value {
    if key == "name" {
        Value::String(combine_name(row))
    } else {
        row.get(key).cloned().unwrap_or(Value::Null)
    }
}

/// Client-side sort. Numbers compare numerically, everything else falls back
/// to its textual rendering.
pub fn sort_rows(rows: &mut [ReportRow], key: &str, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let va = sort_value(a, key);
        let vb = sort_value(b, key);
        let ordering = match (va.as_f64(), vb.as_f64()) {
            (Some(na), Some(nb)) => na.partial_cmp(&nb).unwrap_or(std::cmp::Ordering::Equal),
            _ => csv::value_to_cell(&va).cmp(&csv::value_to_cell(&vb)),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn display_cell(row: &ReportRow, column: &str) -> String {
    if column == "name" {
        return combine_name(row);
    }
    let raw = row.get(column).map(csv::value_to_cell).unwrap_or_default();
    if column.contains("date") && !raw.is_empty() {
        format_date_display(&raw)
    } else {
        raw
    }
}

fn header_label(column: &str) -> String {
    column.replace('_', " ").to_uppercase()
}

#[derive(Properties, PartialEq)]
pub struct ReportsProps {
    pub api_client: ApiClient,
    pub session: Session,
}

/// Reports center: pick a report type and filters, sort in place, export the
/// visible table as CSV.
#[function_component(Reports)]
pub fn reports(props: &ReportsProps) -> Html {
    // Role gate before any hook runs; the session is fixed for the lifetime
    // of a mounted instance.
    if !props.session.is_admin() {
        return html! { <p class="access-denied">{"Access denied. Admins only."}</p> };
    }

    let kind = use_state(|| ReportKind::Attendees);
    let rows = use_state(Vec::<ReportRow>::new);
    let events = use_state(Vec::<ChurchEvent>::new);
    let elders = use_state(Vec::<RosterEntry>::new);
    let ministries = use_state(Vec::<Ministry>::new);
    let event_id = use_state(|| Option::<i64>::None);
    let elder_id = use_state(|| Option::<i64>::None);
    let ministry_id = use_state(|| Option::<i64>::None);
    let sort = use_state(|| Option::<(String, SortDirection)>::None);
    let messages = use_state(Vec::<StatusMessage>::new);

    // Filter options, fetched once.
    use_effect_with((), {
        let api_client = props.api_client.clone();
        let events = events.clone();
        let elders = elders.clone();
        let ministries = ministries.clone();
        move |_| {
            let api_client = api_client.clone();
            let events = events.clone();
            let elders = elders.clone();
            let ministries = ministries.clone();
            spawn_local(async move {
                match api_client.get_events().await {
                    Ok(data) => events.set(data),
                    Err(e) => Logger::warn("reports", &format!("events unavailable: {}", e)),
                }
                match api_client.get_elders().await {
                    Ok(data) => elders.set(data),
                    Err(e) => Logger::warn("reports", &format!("elders unavailable: {}", e)),
                }
                match api_client.get_ministries().await {
                    Ok(data) => ministries.set(data),
                    Err(e) => Logger::warn("reports", &format!("ministries unavailable: {}", e)),
                }
            });
            || ()
        }
    });

    let find_ministry_by_name = {
        let ministries = ministries.clone();
        move |name: &str| -> Option<i64> {
            ministries
                .iter()
                .find(|m| m.name.to_lowercase().contains(name))
                .map(|m| m.id)
        }
    };
    let overseer_ministry_id = find_ministry_by_name(OVERSEER_MINISTRY_NAME);
    let staff_ministry_id = find_ministry_by_name(STAFF_MINISTRY_NAME);

    // Refetch whenever the report type or a relevant filter changes.
    use_effect_with(
        (
            *kind,
            *event_id,
            *elder_id,
            *ministry_id,
            overseer_ministry_id,
            staff_ministry_id,
        ),
        {
            let api_client = props.api_client.clone();
            let rows = rows.clone();
            let sort = sort.clone();
            let messages = messages.clone();
            move |deps: &(
                ReportKind,
                Option<i64>,
                Option<i64>,
                Option<i64>,
                Option<i64>,
                Option<i64>,
            )| {
                let (kind, event_id, elder_id, ministry_id, overseer_id, staff_id) = *deps;
                let api_client = api_client.clone();
                let rows = rows.clone();
                let sort = sort.clone();
                let messages = messages.clone();

                spawn_local(async move {
                    let fetched: Option<Result<Vec<ReportRow>, ApiError>> = match kind {
                        ReportKind::Attendees => Some(api_client.report_attendees().await),
                        ReportKind::OverseerAttendance => match overseer_id {
                            Some(id) => {
                                Some(api_client.report_ministry_attendance(id, event_id).await)
                            }
                            None => None,
                        },
                        ReportKind::StaffAttendance => match staff_id {
                            Some(id) => {
                                Some(api_client.report_ministry_attendance(id, event_id).await)
                            }
                            None => None,
                        },
                        ReportKind::MinistryAttendance => match ministry_id {
                            Some(id) => {
                                Some(api_client.report_ministry_attendance(id, event_id).await)
                            }
                            None => None,
                        },
                        ReportKind::MinistryAbsent => match event_id {
                            Some(event_id) => {
                                Some(api_client.report_ministry_absent(event_id, ministry_id).await)
                            }
                            None => None,
                        },
                        ReportKind::Elder => match elder_id {
                            Some(id) => Some(api_client.report_elder(id, event_id).await),
                            None => None,
                        },
                        ReportKind::ElderAbsent => match (elder_id, event_id) {
                            (Some(elder_id), Some(event_id)) => {
                                Some(api_client.report_elder_absent(elder_id, event_id).await)
                            }
                            _ => None,
                        },
                    };

                    match fetched {
                        Some(Ok(data)) => {
                            rows.set(data);
                            sort.set(None);
                        }
                        Some(Err(e)) => {
                            Logger::error("reports", &format!("report fetch failed: {}", e));
                            rows.set(Vec::new());
                            messages.set(vec![StatusMessage::error("Failed to load the report.")]);
                        }
                        // Required filter not chosen yet.
                        None => rows.set(Vec::new()),
                    }
                });
                || ()
            }
        },
    );

    let on_kind_change = {
        let kind = kind.clone();
        let event_id = event_id.clone();
        let elder_id = elder_id.clone();
        let ministry_id = ministry_id.clone();
        let rows = rows.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            kind.set(ReportKind::from_value(&select.value()));
            event_id.set(None);
            elder_id.set(None);
            ministry_id.set(None);
            rows.set(Vec::new());
        })
    };

    let id_select = |state: UseStateHandle<Option<i64>>| {
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            state.set(select.value().parse::<i64>().ok());
        })
    };

    let on_event_change = id_select(event_id.clone());
    let on_elder_change = id_select(elder_id.clone());
    let on_ministry_change = id_select(ministry_id.clone());

    let mut sorted_rows = (*rows).clone();
    if let Some((key, direction)) = (*sort).clone() {
        sort_rows(&mut sorted_rows, &key, direction);
    }
    let columns = visible_columns(&sorted_rows);

    let on_export = {
        let columns = columns.clone();
        let sorted_rows = sorted_rows.clone();
        let kind = kind.clone();
        let messages = messages.clone();
        Callback::from(move |_: MouseEvent| {
            // Export exactly what is on screen: visible columns, current order.
            let mut export_rows = Vec::with_capacity(sorted_rows.len());
            for row in &sorted_rows {
                let mut export_row = ReportRow::new();
                for column in &columns {
                    export_row.insert(
                        column.clone(),
                        Value::String(display_cell(row, column)),
                    );
                }
                export_rows.push(export_row);
            }
            let contents = csv::build_csv(&columns, &export_rows);
            let filename = format!("{}-report.csv", kind.value());
            if let Err(e) = csv::download(&filename, &contents) {
                Logger::error("reports", &format!("CSV download failed: {}", e));
                messages.set(vec![StatusMessage::error("CSV export failed.")]);
            }
        })
    };

    let dismiss_messages = {
        let messages = messages.clone();
        Callback::from(move |_| messages.set(Vec::new()))
    };

    html! {
        <div class="reports-master">
            <h2 class="page-title">{"Reports Center"}</h2>

            <StatusBanner messages={(*messages).clone()} on_dismiss={dismiss_messages} />

            <div class="report-filters">
                <select onchange={on_kind_change}>
                    {for ReportKind::ALL.iter().map(|option| {
                        html! {
                            <option value={option.value()} selected={*kind == *option}>
                                {option.label()}
                            </option>
                        }
                    })}
                </select>

                {if kind.wants_event_filter() {
                    html! {
                        <select onchange={on_event_change}>
                            <option value="" selected={event_id.is_none()}>
                                {if matches!(*kind, ReportKind::MinistryAbsent | ReportKind::ElderAbsent) {
                                    "Select Event"
                                } else {
                                    "All Events"
                                }}
                            </option>
                            {for events.iter().map(|event| {
                                html! {
                                    <option
                                        value={event.id.to_string()}
                                        selected={*event_id == Some(event.id)}
                                    >
                                        {format!("{} ({})", event.title, format_date_display(&event.event_date))}
                                    </option>
                                }
                            })}
                        </select>
                    }
                } else {
                    html! {}
                }}

                {if kind.wants_ministry_filter() {
                    html! {
                        <select onchange={on_ministry_change}>
                            <option value="" selected={ministry_id.is_none()}>{"Select Ministry"}</option>
                            {for ministries.iter().map(|ministry| {
                                html! {
                                    <option
                                        value={ministry.id.to_string()}
                                        selected={*ministry_id == Some(ministry.id)}
                                    >
                                        {&ministry.name}
                                    </option>
                                }
                            })}
                        </select>
                    }
                } else {
                    html! {}
                }}

                {if kind.wants_elder_filter() {
                    html! {
                        <select onchange={on_elder_change}>
                            <option value="" selected={elder_id.is_none()}>{"Select Elder"}</option>
                            {for elders.iter().map(|elder| {
                                html! {
                                    <option
                                        value={elder.id.to_string()}
                                        selected={*elder_id == Some(elder.id)}
                                    >
                                        {format!("{} {}", elder.first_name, elder.last_name)}
                                    </option>
                                }
                            })}
                        </select>
                    }
                } else {
                    html! {}
                }}
            </div>

            <div class="report-table-container">
                {if sorted_rows.is_empty() {
                    html! { <p class="empty">{"No data available"}</p> }
                } else {
                    html! {
                        <>
                            <button type="button" class="export-btn" onclick={on_export}>
                                {"Export CSV"}
                            </button>
                            <div class="table-container">
                                <table class="responsive-table">
                                    <thead>
                                        <tr>
                                            {for columns.iter().map(|column| {
                                                let column_name = column.clone();
                                                let sort = sort.clone();
                                                let indicator = match (*sort).as_ref() {
                                                    Some((key, SortDirection::Ascending)) if key == column => " ^",
                                                    Some((key, SortDirection::Descending)) if key == column => " v",
                                                    _ => "",
                                                };
                                                let on_sort = Callback::from(move |_: MouseEvent| {
                                                    let current = (*sort)
                                                        .as_ref()
                                                        .map(|(key, dir)| (key.as_str(), *dir));
                                                    sort.set(Some(next_sort(current, &column_name)));
                                                });
                                                html! {
                                                    <th key={column.clone()} class="sortable" onclick={on_sort}>
                                                        {format!("{}{}", header_label(column), indicator)}
                                                    </th>
                                                }
                                            })}
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {for sorted_rows.iter().enumerate().map(|(idx, row)| {
                                            html! {
                                                <tr key={idx}>
                                                    {for columns.iter().map(|column| {
                                                        html! { <td key={column.clone()}>{display_cell(row, column)}</td> }
                                                    })}
                                                </tr>
                                            }
                                        })}
                                    </tbody>
                                </table>
                            </div>
                        </>
                    }
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> ReportRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn attendee(first: &str, last: &str, ministry: &str, count: i64) -> ReportRow {
        row(&[
            ("id", json!(1)),
            ("user_id", json!(10)),
            ("first_name", json!(first)),
            ("last_name", json!(last)),
            ("ministry", json!(ministry)),
            ("attendance_count", json!(count)),
        ])
    }

    #[test]
    fn visible_columns_hide_ids_and_prepend_name() {
        let rows = vec![attendee("Ann", "Lee", "Choir", 3)];
        let columns = visible_columns(&rows);
        assert_eq!(columns[0], "name");
        assert!(columns.contains(&"ministry".to_string()));
        assert!(columns.contains(&"attendance_count".to_string()));
        assert!(!columns.contains(&"id".to_string()));
        assert!(!columns.contains(&"user_id".to_string()));
        assert!(!columns.contains(&"first_name".to_string()));
    }

    #[test]
    fn no_rows_means_no_columns() {
        assert!(visible_columns(&[]).is_empty());
    }

    #[test]
    fn combine_name_handles_missing_parts() {
        assert_eq!(combine_name(&attendee("Ann", "Lee", "Choir", 1)), "Ann Lee");
        assert_eq!(combine_name(&row(&[("first_name", json!("Ann"))])), "Ann");
        assert_eq!(combine_name(&row(&[])), "-");
    }

    #[test]
    fn sort_toggles_direction_on_repeated_column() {
        let first = next_sort(None, "ministry");
        assert_eq!(first, ("ministry".to_string(), SortDirection::Ascending));

        let second = next_sort(Some(("ministry", SortDirection::Ascending)), "ministry");
        assert_eq!(second, ("ministry".to_string(), SortDirection::Descending));

        // A different column restarts at ascending.
        let third = next_sort(Some(("ministry", SortDirection::Descending)), "name");
        assert_eq!(third, ("name".to_string(), SortDirection::Ascending));
    }

    #[test]
    fn rows_sort_numerically_when_both_sides_are_numbers() {
        let mut rows = vec![
            attendee("Ann", "Lee", "Choir", 12),
            attendee("Bo", "Lee", "Youth", 2),
        ];
        sort_rows(&mut rows, "attendance_count", SortDirection::Ascending);
        assert_eq!(combine_name(&rows[0]), "Bo Lee");

        sort_rows(&mut rows, "attendance_count", SortDirection::Descending);
        assert_eq!(combine_name(&rows[0]), "Ann Lee");
    }

    #[test]
    fn rows_sort_by_combined_name() {
        let mut rows = vec![
            attendee("Cy", "Lee", "Choir", 1),
            attendee("Ann", "Lee", "Choir", 1),
        ];
        sort_rows(&mut rows, "name", SortDirection::Ascending);
        assert_eq!(combine_name(&rows[0]), "Ann Lee");
    }
}
