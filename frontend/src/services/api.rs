use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    BulkCheckOutRequest, CheckInDetail, CreateAdminRequest, CreateCheckInRequest,
    CreateEventRequest, CreateFamilyRequest, CreateUserRequest, DashboardResponse, Event, Family,
    FamilyMember, ImportResponse, LoginRequest, LoginResponse, MasterlistEntry, Ministry,
    PersonRef, ReportRow, RosterEntry, UpdateEventRequest, UpdateUserRequest,
};
use thiserror::Error;

use crate::services::session::SessionStore;

/// Failure taxonomy for backend calls. `Conflict` is its own variant because
/// a duplicate check-in is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("server error {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Conflict(_))
    }
}

/// API client for the check-in backend. Attaches the persisted bearer token
/// to every request; a 401 response clears that token.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3001/api".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    fn authorize(builder: RequestBuilder) -> RequestBuilder {
        match SessionStore::token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        Self::authorize(Request::get(&format!("{}{}", self.base_url, path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        Self::authorize(Request::post(&format!("{}{}", self.base_url, path)))
    }

    fn put(&self, path: &str) -> RequestBuilder {
        Self::authorize(Request::put(&format!("{}{}", self.base_url, path)))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        Self::authorize(Request::delete(&format!("{}{}", self.base_url, path)))
    }

    async fn fetch_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        builder: RequestBuilder,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = builder
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn send_expect_ok<B: Serialize>(
        builder: RequestBuilder,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = builder
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::ensure_ok(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if response.ok() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            Err(Self::classify(response).await)
        }
    }

    async fn ensure_ok(response: Response) -> Result<(), ApiError> {
        if response.ok() {
            Ok(())
        } else {
            Err(Self::classify(response).await)
        }
    }

    async fn classify(response: Response) -> ApiError {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        match status {
            401 => {
                // Expired or invalid token: forget it, but stay on the page.
                SessionStore::clear_token();
                ApiError::Unauthorized(message)
            }
            409 => ApiError::Conflict(message),
            _ => ApiError::Status { status, message },
        }
    }

    // --- auth ---

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let builder = Request::post(&format!("{}/auth/login", self.base_url));
        Self::send_json(builder, request).await
    }

    // --- people ---

    pub async fn get_users(&self) -> Result<Vec<RosterEntry>, ApiError> {
        Self::fetch_json(self.get("/users")).await
    }

    pub async fn get_elders(&self) -> Result<Vec<RosterEntry>, ApiError> {
        Self::fetch_json(self.get("/users/elders")).await
    }

    pub async fn get_masterlist(&self) -> Result<Vec<MasterlistEntry>, ApiError> {
        Self::fetch_json(self.get("/users/masterlist")).await
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<(), ApiError> {
        Self::send_expect_ok(self.post("/users"), request).await
    }

    pub async fn create_admin(&self, request: &CreateAdminRequest) -> Result<(), ApiError> {
        Self::send_expect_ok(self.post("/admins"), request).await
    }

    pub async fn update_user(&self, id: i64, request: &UpdateUserRequest) -> Result<(), ApiError> {
        Self::send_expect_ok(self.put(&format!("/users/{}", id)), request).await
    }

    pub async fn delete_user(&self, person: &PersonRef) -> Result<(), ApiError> {
        let path = format!("/users/{}?role={}", person.id, person.role_param());
        let response = self
            .delete(&path)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::ensure_ok(response).await
    }

    // --- events ---

    pub async fn get_events(&self) -> Result<Vec<Event>, ApiError> {
        Self::fetch_json(self.get("/events")).await
    }

    pub async fn create_event(&self, request: &CreateEventRequest) -> Result<(), ApiError> {
        Self::send_expect_ok(self.post("/events"), request).await
    }

    pub async fn update_event(
        &self,
        id: i64,
        request: &UpdateEventRequest,
    ) -> Result<(), ApiError> {
        Self::send_expect_ok(self.put(&format!("/events/{}", id)), request).await
    }

    pub async fn delete_event(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .delete(&format!("/events/{}", id))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::ensure_ok(response).await
    }

    // --- check-ins ---

    /// Existing check-ins for an event, with person and event details, used
    /// to annotate already-checked-in people.
    pub async fn get_event_check_ins(&self, event_id: i64) -> Result<Vec<CheckInDetail>, ApiError> {
        Self::fetch_json(self.get(&format!("/checkins/event/{}/detailed", event_id))).await
    }

    pub async fn get_all_check_ins(&self) -> Result<Vec<CheckInDetail>, ApiError> {
        Self::fetch_json(self.get("/checkins/all")).await
    }

    /// Create one check-in. Answers `ApiError::Conflict` when this person is
    /// already checked in to the event.
    pub async fn create_check_in(&self, request: &CreateCheckInRequest) -> Result<(), ApiError> {
        Self::send_expect_ok(self.post("/checkins"), request).await
    }

    /// Check-out: revoke a single check-in record.
    pub async fn check_out(&self, check_in_id: i64) -> Result<(), ApiError> {
        let response = self
            .delete(&format!("/checkins/{}", check_in_id))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::ensure_ok(response).await
    }

    pub async fn bulk_check_out(&self, request: &BulkCheckOutRequest) -> Result<(), ApiError> {
        Self::send_expect_ok(self.post("/checkins/bulk-checkout"), request).await
    }

    // --- families ---

    pub async fn get_families(&self) -> Result<Vec<Family>, ApiError> {
        Self::fetch_json(self.get("/families")).await
    }

    pub async fn get_family_members(&self, family_id: i64) -> Result<Vec<FamilyMember>, ApiError> {
        Self::fetch_json(self.get(&format!("/families/{}/members", family_id))).await
    }

    pub async fn create_family(&self, request: &CreateFamilyRequest) -> Result<Family, ApiError> {
        Self::send_json(self.post("/families"), request).await
    }

    // --- reports & dashboard ---

    pub async fn get_ministries(&self) -> Result<Vec<Ministry>, ApiError> {
        Self::fetch_json(self.get("/reports/ministries")).await
    }

    pub async fn get_dashboard(&self) -> Result<DashboardResponse, ApiError> {
        Self::fetch_json(self.get("/dashboard")).await
    }

    pub async fn report_attendees(&self) -> Result<Vec<ReportRow>, ApiError> {
        Self::fetch_json(self.get("/reports/attendees")).await
    }

    pub async fn report_ministry_attendance(
        &self,
        ministry_id: i64,
        event_id: Option<i64>,
    ) -> Result<Vec<ReportRow>, ApiError> {
        let mut path = format!("/reports/ministry-attendance/{}", ministry_id);
        if let Some(event_id) = event_id {
            path.push_str(&format!("?event_id={}", event_id));
        }
        Self::fetch_json(self.get(&path)).await
    }

    pub async fn report_ministry_absent(
        &self,
        event_id: i64,
        ministry_id: Option<i64>,
    ) -> Result<Vec<ReportRow>, ApiError> {
        let mut path = format!("/reports/ministry-absent/{}", event_id);
        if let Some(ministry_id) = ministry_id {
            path.push_str(&format!("?ministry_id={}", ministry_id));
        }
        Self::fetch_json(self.get(&path)).await
    }

    pub async fn report_elder(
        &self,
        elder_id: i64,
        event_id: Option<i64>,
    ) -> Result<Vec<ReportRow>, ApiError> {
        let mut path = format!("/reports/elder/{}", elder_id);
        if let Some(event_id) = event_id {
            path.push_str(&format!("?event_id={}", event_id));
        }
        Self::fetch_json(self.get(&path)).await
    }

    pub async fn report_elder_absent(
        &self,
        elder_id: i64,
        event_id: i64,
    ) -> Result<Vec<ReportRow>, ApiError> {
        Self::fetch_json(self.get(&format!("/reports/elder-absent/{}/{}", elder_id, event_id)))
            .await
    }

    // --- import ---

    /// Upload a roster file as multipart form data; the backend parses it.
    pub async fn import_users(&self, form: web_sys::FormData) -> Result<ImportResponse, ApiError> {
        let response = self
            .post("/import/users")
            .body(form)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
