use crate::services::api::{ApiClient, ApiError};

use super::resolver::Person;

/// A person whose check-in failed outright, kept with the error so the
/// operator can retry them individually.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedCheckIn {
    pub person: Person,
    pub error: ApiError,
}

/// Outcome of one bulk check-in pass: who went through, who was already
/// checked in (server conflict, expected), and who failed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchSummary {
    pub succeeded: Vec<Person>,
    pub duplicates: Vec<Person>,
    pub failed: Vec<FailedCheckIn>,
}

impl BatchSummary {
    /// Classify one person's outcome. A conflict means the (event, person)
    /// pair already exists server-side; that is informational, not a failure.
    pub fn record(&mut self, person: Person, outcome: Result<(), ApiError>) {
        match outcome {
            Ok(()) => self.succeeded.push(person),
            Err(error) if error.is_conflict() => self.duplicates.push(person),
            Err(error) => self.failed.push(FailedCheckIn { person, error }),
        }
    }

    pub fn success_message(&self) -> Option<String> {
        if self.succeeded.is_empty() {
            None
        } else {
            Some(format!("Checked in: {}", name_list(&self.succeeded)))
        }
    }

    pub fn duplicate_message(&self) -> Option<String> {
        if self.duplicates.is_empty() {
            None
        } else {
            Some(format!("Already checked in: {}", name_list(&self.duplicates)))
        }
    }

    /// One message per failed person, named so the operator can retry them.
    pub fn failure_messages(&self) -> Vec<String> {
        self.failed
            .iter()
            .map(|f| format!("Check-in failed for {}", f.person.full_name()))
            .collect()
    }
}

fn name_list(people: &[Person]) -> String {
    people
        .iter()
        .map(Person::full_name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check in every selected person against `event_id`, one request at a time.
///
/// Sequential on purpose: it keeps the summary grouping in selection order
/// and never races the server's duplicate detection with itself. Partial
/// failure does not roll back earlier successes; each check-in is an
/// independent operation.
pub async fn submit_check_ins(
    api: &ApiClient,
    event_id: i64,
    selected: Vec<Person>,
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for person in selected {
        let request = person.person.check_in_request(event_id);
        let outcome = api.create_check_in(&request).await;
        summary.record(person, outcome);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PersonRef;

    fn person(id: i64, first: &str, last: &str) -> Person {
        Person {
            person: PersonRef::member(id),
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone: None,
            role: "member".to_string(),
            family_id: None,
            family_name: None,
            checked: true,
        }
    }

    #[test]
    fn conflict_lands_in_duplicates_not_failed() {
        let mut summary = BatchSummary::default();
        summary.record(
            person(1, "Ann", "Lee"),
            Err(ApiError::Conflict("already checked in".to_string())),
        );
        assert_eq!(summary.duplicates.len(), 1);
        assert!(summary.failed.is_empty());
        assert!(summary.succeeded.is_empty());
        // And it is surfaced as an informational grouping, not an error.
        assert!(summary.failure_messages().is_empty());
        assert_eq!(
            summary.duplicate_message().as_deref(),
            Some("Already checked in: Ann Lee")
        );
    }

    #[test]
    fn mixed_outcomes_are_classified_independently() {
        let mut summary = BatchSummary::default();
        summary.record(person(1, "Ann", "Lee"), Ok(()));
        summary.record(
            person(2, "Bo", "Lee"),
            Err(ApiError::Conflict(String::new())),
        );
        summary.record(
            person(3, "Cy", "Lee"),
            Err(ApiError::Status {
                status: 500,
                message: "boom".to_string(),
            }),
        );
        summary.record(person(4, "Dee", "Lee"), Ok(()));

        assert_eq!(
            summary.success_message().as_deref(),
            Some("Checked in: Ann Lee, Dee Lee")
        );
        assert_eq!(
            summary.duplicate_message().as_deref(),
            Some("Already checked in: Bo Lee")
        );
        assert_eq!(
            summary.failure_messages(),
            vec!["Check-in failed for Cy Lee".to_string()]
        );
    }

    #[test]
    fn network_and_auth_failures_are_failures() {
        let mut summary = BatchSummary::default();
        summary.record(
            person(1, "Ann", "Lee"),
            Err(ApiError::Network("connection refused".to_string())),
        );
        summary.record(
            person(2, "Bo", "Lee"),
            Err(ApiError::Unauthorized(String::new())),
        );
        assert_eq!(summary.failed.len(), 2);
        assert!(summary.duplicates.is_empty());
    }

    #[test]
    fn empty_batch_has_no_messages() {
        let summary = BatchSummary::default();
        assert_eq!(summary.success_message(), None);
        assert_eq!(summary.duplicate_message(), None);
        assert!(summary.failure_messages().is_empty());
    }
}
