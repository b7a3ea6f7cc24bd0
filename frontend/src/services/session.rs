use gloo::storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

const TOKEN_KEY: &str = "checkin.token";
const PROFILE_KEY: &str = "checkin.profile";

/// The authenticated operator. Persisted across reloads so an open kiosk
/// tab survives a refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub first_name: String,
    pub role: String,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        matches!(self.role.as_str(), "admin" | "super_admin")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    first_name: String,
    role: String,
}

/// Single place that reads and writes browser-persisted auth state. Nothing
/// else touches local storage directly.
pub struct SessionStore;

impl SessionStore {
    pub fn load() -> Option<Session> {
        let token: String = LocalStorage::get(TOKEN_KEY).ok()?;
        let profile: Profile = LocalStorage::get(PROFILE_KEY).ok().unwrap_or(Profile {
            first_name: "Admin".to_string(),
            role: "staff".to_string(),
        });
        Some(Session {
            token,
            first_name: profile.first_name,
            role: profile.role,
        })
    }

    pub fn save(session: &Session) {
        let _ = LocalStorage::set(TOKEN_KEY, &session.token);
        let _ = LocalStorage::set(
            PROFILE_KEY,
            &Profile {
                first_name: session.first_name.clone(),
                role: session.role.clone(),
            },
        );
    }

    pub fn token() -> Option<String> {
        LocalStorage::get(TOKEN_KEY).ok()
    }

    /// Invalidate the token only. Called on 401 responses; the operator is
    /// left to re-authenticate on their next protected action, no redirect.
    pub fn clear_token() {
        LocalStorage::delete(TOKEN_KEY);
    }

    /// Full logout.
    pub fn clear() {
        LocalStorage::delete(TOKEN_KEY);
        LocalStorage::delete(PROFILE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn session() -> Session {
        Session {
            token: "tok-123".to_string(),
            first_name: "Grace".to_string(),
            role: "admin".to_string(),
        }
    }

    #[wasm_bindgen_test]
    fn save_then_load_round_trips() {
        SessionStore::clear();
        SessionStore::save(&session());
        assert_eq!(SessionStore::load(), Some(session()));
        SessionStore::clear();
    }

    #[wasm_bindgen_test]
    fn clear_token_keeps_profile_but_ends_session() {
        SessionStore::clear();
        SessionStore::save(&session());
        SessionStore::clear_token();
        assert_eq!(SessionStore::token(), None);
        assert_eq!(SessionStore::load(), None);
        SessionStore::clear();
    }

    #[wasm_bindgen_test]
    fn admin_roles_are_recognized() {
        let mut s = session();
        assert!(s.is_admin());
        s.role = "super_admin".to_string();
        assert!(s.is_admin());
        s.role = "staff".to_string();
        assert!(!s.is_admin());
    }
}
