use chrono::{DateTime, NaiveDate, NaiveTime, Timelike};

/// Format an RFC 3339 timestamp as a 12-hour clock time, e.g. "9:05 AM".
/// Falls back to the raw string when it doesn't parse.
pub fn format_time_12h(rfc3339: &str) -> String {
    match DateTime::parse_from_rfc3339(rfc3339) {
        Ok(dt) => {
            let (is_pm, hour) = dt.hour12();
            format!("{}:{:02} {}", hour, dt.minute(), if is_pm { "PM" } else { "AM" })
        }
        Err(_) => rfc3339.to_string(),
    }
}

/// Format a wall-clock event time (HH:MM or HH:MM:SS) as 12-hour.
pub fn format_event_time(time: &str) -> String {
    let parsed = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"));
    match parsed {
        Ok(t) => {
            let (is_pm, hour) = t.hour12();
            format!("{}:{:02} {}", hour, t.minute(), if is_pm { "PM" } else { "AM" })
        }
        Err(_) => time.to_string(),
    }
}

/// Format a YYYY-MM-DD date for display, e.g. "June 1, 2025".
pub fn format_date_display(date: &str) -> String {
    // Event dates sometimes arrive as full timestamps; keep the date part.
    let date_part = date.split('T').next().unwrap_or(date);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(d) => d.format("%B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_12h_morning_and_evening() {
        assert_eq!(format_time_12h("2025-06-01T09:05:00-05:00"), "9:05 AM");
        assert_eq!(format_time_12h("2025-06-01T18:30:00-05:00"), "6:30 PM");
        assert_eq!(format_time_12h("2025-06-01T00:15:00Z"), "12:15 AM");
        assert_eq!(format_time_12h("2025-06-01T12:00:00Z"), "12:00 PM");
    }

    #[test]
    fn format_time_12h_passes_through_garbage() {
        assert_eq!(format_time_12h("not a time"), "not a time");
    }

    #[test]
    fn format_event_time_handles_both_precisions() {
        assert_eq!(format_event_time("10:30"), "10:30 AM");
        assert_eq!(format_event_time("19:00:00"), "7:00 PM");
        assert_eq!(format_event_time("--"), "--");
    }

    #[test]
    fn format_date_display_strips_time_component() {
        assert_eq!(format_date_display("2025-06-01"), "June 1, 2025");
        assert_eq!(format_date_display("2025-12-25T00:00:00Z"), "December 25, 2025");
        assert_eq!(format_date_display("junk"), "junk");
    }
}
