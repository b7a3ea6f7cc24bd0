use serde::{Deserialize, Serialize};
use std::fmt;

/// Which backend identity namespace a person belongs to. Elders live in a
/// separate sub-resource and are checked in with `elder_id` instead of
/// `user_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonKind {
    Member,
    Elder,
}

/// Tagged person identity. Replaces the legacy "user-N" / "elder-N" string
/// encoding so the check-in foreign key is derived by construction rather
/// than by string parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonRef {
    pub kind: PersonKind,
    pub id: i64,
}

impl PersonRef {
    pub fn member(id: i64) -> Self {
        Self { kind: PersonKind::Member, id }
    }

    pub fn elder(id: i64) -> Self {
        Self { kind: PersonKind::Elder, id }
    }

    /// Derive the identity namespace from a role string as returned by the
    /// roster endpoint.
    pub fn from_role(role: &str, id: i64) -> Self {
        if role.eq_ignore_ascii_case("elder") {
            Self::elder(id)
        } else {
            Self::member(id)
        }
    }

    /// Build the check-in payload for this person. Exactly one of `user_id`
    /// and `elder_id` is populated.
    pub fn check_in_request(&self, event_id: i64) -> CreateCheckInRequest {
        match self.kind {
            PersonKind::Member => CreateCheckInRequest {
                event_id,
                user_id: Some(self.id),
                elder_id: None,
            },
            PersonKind::Elder => CreateCheckInRequest {
                event_id,
                user_id: None,
                elder_id: Some(self.id),
            },
        }
    }

    /// Whether `check_in` belongs to this person, honoring the namespace
    /// split between `user_id` and `elder_id`.
    pub fn matches_check_in(&self, check_in: &CheckInDetail) -> bool {
        match self.kind {
            PersonKind::Member => check_in.user_id == Some(self.id),
            PersonKind::Elder => check_in.elder_id == Some(self.id),
        }
    }

    /// Role query parameter expected by the user delete endpoint.
    pub fn role_param(&self) -> &'static str {
        match self.kind {
            PersonKind::Member => "user",
            PersonKind::Elder => "elder",
        }
    }
}

impl fmt::Display for PersonRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PersonKind::Member => write!(f, "user-{}", self.id),
            PersonKind::Elder => write!(f, "elder-{}", self.id),
        }
    }
}

/// Roster row as returned by `GET /users` (ordinary members and elders,
/// role-tagged). The check-in screen maps these into its own view model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub family_id: Option<i64>,
    pub family_name: Option<String>,
}

/// Administrative view of a person, as returned by `GET /users/masterlist`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterlistEntry {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub gender: Option<String>,
    pub active: bool,
    pub family_id: Option<i64>,
    #[serde(default)]
    pub ministries: Vec<Ministry>,
}

/// Request for creating an ordinary person (member, volunteer, elder, staff).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub family_id: Option<i64>,
}

/// Request for creating an admin account. Admins additionally carry login
/// credentials and are created through their own endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub family_id: Option<i64>,
}

/// Request for updating a person from the masterlist edit dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub role: String,
    pub gender: Option<String>,
    pub ministry_ids: Vec<i64>,
    pub active: bool,
    pub family_id: Option<i64>,
}

/// A scheduled gathering people check in to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    /// ISO 8601 date (YYYY-MM-DD)
    pub event_date: String,
    /// Wall-clock time (HH:MM or HH:MM:SS)
    pub event_time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub event_date: String,
    pub event_time: String,
    pub location: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: String,
    pub event_date: String,
    pub event_time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Bare check-in record: one per (event, person), person keyed through
/// exactly one of `user_id` / `elder_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: i64,
    pub event_id: i64,
    pub user_id: Option<i64>,
    pub elder_id: Option<i64>,
    /// RFC 3339 timestamp
    pub checkin_time: String,
}

/// Check-in joined with person and event details, as returned by
/// `GET /checkins/event/{id}/detailed` and `GET /checkins/all`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInDetail {
    pub id: i64,
    pub event_id: i64,
    pub user_id: Option<i64>,
    pub elder_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub checkin_time: String,
    pub event_title: String,
    pub event_location: Option<String>,
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub ministry: Option<String>,
}

/// Create a check-in. The backend answers 409 when the (event, person) pair
/// already exists; the unused foreign key is omitted from the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCheckInRequest {
    pub event_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elder_id: Option<i64>,
}

/// Batch check-out by check-in record ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkCheckOutRequest {
    pub ids: Vec<i64>,
}

/// Named household grouping; people sharing a `family_id` are household
/// members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub id: i64,
    pub family_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFamilyRequest {
    pub family_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

/// Reporting tag assignable to a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ministry {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login result. The display name and role ride along so the client never
/// has to look inside the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub first_name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub check_ins_today: u32,
    pub total_users: u32,
    pub total_elders: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub upcoming_events: Vec<Event>,
    pub recent_check_ins: Vec<CheckInDetail>,
}

/// Result of a CSV/XLSX roster import; parsing happens server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResponse {
    pub imported: u32,
    pub message: String,
}

/// Report rows have report-type-specific columns; the client derives the
/// table shape from the keys of the first row.
pub type ReportRow = serde_json::Map<String, serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_check_in_payload_carries_only_user_id() {
        let request = PersonRef::member(7).check_in_request(42);
        assert_eq!(request.user_id, Some(7));
        assert_eq!(request.elder_id, None);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["event_id"], 42);
        assert_eq!(json["user_id"], 7);
        assert!(json.get("elder_id").is_none());
    }

    #[test]
    fn elder_check_in_payload_carries_only_elder_id() {
        let request = PersonRef::elder(3).check_in_request(42);
        assert_eq!(request.user_id, None);
        assert_eq!(request.elder_id, Some(3));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["elder_id"], 3);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn person_ref_from_role_maps_elders() {
        assert_eq!(PersonRef::from_role("elder", 1).kind, PersonKind::Elder);
        assert_eq!(PersonRef::from_role("Elder", 1).kind, PersonKind::Elder);
        assert_eq!(PersonRef::from_role("member", 1).kind, PersonKind::Member);
        assert_eq!(PersonRef::from_role("volunteer", 1).kind, PersonKind::Member);
    }

    #[test]
    fn person_ref_display_matches_legacy_prefixes() {
        assert_eq!(PersonRef::member(12).to_string(), "user-12");
        assert_eq!(PersonRef::elder(4).to_string(), "elder-4");
    }

    #[test]
    fn matches_check_in_respects_namespace() {
        let check_in = CheckInDetail {
            id: 1,
            event_id: 9,
            user_id: Some(5),
            elder_id: None,
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            role: "member".into(),
            checkin_time: "2025-06-01T09:00:00Z".into(),
            event_title: "Sunday Worship".into(),
            event_location: None,
            event_date: None,
            event_time: None,
            ministry: None,
        };
        assert!(PersonRef::member(5).matches_check_in(&check_in));
        // An elder with the same numeric id is a different person.
        assert!(!PersonRef::elder(5).matches_check_in(&check_in));
    }
}
