use shared::{PersonRef, RosterEntry};

/// A roster member as seen by the check-in screen: identity, the fields the
/// search runs over, and the mutable selection flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub person: PersonRef,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub family_id: Option<i64>,
    pub family_name: Option<String>,
    pub checked: bool,
}

impl Person {
    pub fn from_entry(entry: &RosterEntry) -> Self {
        Self {
            person: PersonRef::from_role(&entry.role, entry.id),
            first_name: entry.first_name.clone(),
            last_name: entry.last_name.clone(),
            phone: entry.phone.clone(),
            role: entry.role.clone(),
            family_id: entry.family_id,
            family_name: entry.family_name.clone(),
            checked: false,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Candidate set produced by one search, plus the household header to show
/// when a whole family was resolved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResult {
    pub candidates: Vec<Person>,
    pub household_label: Option<String>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Resolve a free-text query against the roster.
///
/// Three tiers, strict priority, first non-empty tier wins:
/// 1. exact full name (needs >= 2 tokens) resolves the matched person's
///    entire household when they have one;
/// 2. an exact last-name hit on more than one person returns the collision
///    set;
/// 3. substring match over first name, last name, or phone.
///
/// A later tier is never consulted once an earlier tier produced candidates,
/// so a common last name cannot re-broaden a household already resolved by
/// full name.
pub fn resolve_candidates(query: &str, roster: &[Person]) -> SearchResult {
    let term = query.trim();
    if term.is_empty() {
        return SearchResult::default();
    }
    let lower = term.to_lowercase();

    // Tier 1: full name + household.
    if term.split_whitespace().nth(1).is_some() {
        if let Some(found) = roster
            .iter()
            .find(|p| p.full_name().to_lowercase() == lower)
        {
            if let Some(family_id) = found.family_id {
                let candidates = roster
                    .iter()
                    .filter(|p| p.family_id == Some(family_id))
                    .cloned()
                    .collect();
                return SearchResult {
                    candidates,
                    household_label: found.family_name.clone(),
                };
            }
        }
    }

    // Tier 2: last-name collision (only when ambiguous, i.e. more than one).
    let by_last_name: Vec<Person> = roster
        .iter()
        .filter(|p| p.last_name.to_lowercase() == lower)
        .cloned()
        .collect();
    if by_last_name.len() > 1 {
        let household_label = by_last_name[0].family_name.clone();
        return SearchResult {
            candidates: by_last_name,
            household_label,
        };
    }

    // Tier 3: fuzzy fallback over names and phone, raw substring.
    let fuzzy: Vec<Person> = roster
        .iter()
        .filter(|p| {
            p.first_name.to_lowercase().contains(&lower)
                || p.last_name.to_lowercase().contains(&lower)
                || p.phone.as_deref().is_some_and(|phone| phone.contains(&lower))
        })
        .cloned()
        .collect();
    SearchResult {
        candidates: fuzzy,
        household_label: None,
    }
}

/// Set one person's selection flag.
pub fn set_checked(roster: &mut [Person], person: &PersonRef, checked: bool) {
    if let Some(entry) = roster.iter_mut().find(|p| p.person == *person) {
        entry.checked = checked;
    }
}

/// Set the selection flag for every listed person at once (select all).
pub fn set_many_checked(roster: &mut [Person], targets: &[PersonRef], checked: bool) {
    for entry in roster.iter_mut() {
        if targets.contains(&entry.person) {
            entry.checked = checked;
        }
    }
}

/// Drop every selection. Runs after each submission batch and whenever the
/// search term changes, so no selection can reference a person who is no
/// longer displayed.
pub fn clear_selection(roster: &mut [Person]) {
    for entry in roster.iter_mut() {
        entry.checked = false;
    }
}

/// The currently selected people, in roster order.
pub fn selected(roster: &[Person]) -> Vec<Person> {
    roster.iter().filter(|p| p.checked).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(
        person: PersonRef,
        first: &str,
        last: &str,
        family: Option<(i64, &str)>,
    ) -> Person {
        Person {
            person,
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone: None,
            role: "member".to_string(),
            family_id: family.map(|(id, _)| id),
            family_name: family.map(|(_, name)| name.to_string()),
            checked: false,
        }
    }

    fn lee_roster() -> Vec<Person> {
        vec![
            person(PersonRef::member(1), "Ann", "Lee", Some((5, "Lee Family"))),
            person(PersonRef::member(2), "Bo", "Lee", Some((5, "Lee Family"))),
            person(PersonRef::member(3), "Cy", "Lee", None),
        ]
    }

    fn refs(result: &SearchResult) -> Vec<PersonRef> {
        result.candidates.iter().map(|p| p.person).collect()
    }

    #[test]
    fn empty_query_yields_nothing() {
        assert!(resolve_candidates("", &lee_roster()).is_empty());
        assert!(resolve_candidates("   ", &lee_roster()).is_empty());
    }

    #[test]
    fn full_name_resolves_whole_household() {
        let result = resolve_candidates("Ann Lee", &lee_roster());
        assert_eq!(refs(&result), vec![PersonRef::member(1), PersonRef::member(2)]);
        assert_eq!(result.household_label.as_deref(), Some("Lee Family"));
    }

    #[test]
    fn full_name_match_is_case_insensitive() {
        let result = resolve_candidates("ann lee", &lee_roster());
        assert_eq!(refs(&result), vec![PersonRef::member(1), PersonRef::member(2)]);
    }

    #[test]
    fn household_tier_excludes_same_last_name_outside_family() {
        // Cy Lee shares the last name but not the family; tier 1 must not
        // include them, and tiers 2/3 must not run at all.
        let result = resolve_candidates("Ann Lee", &lee_roster());
        assert!(!refs(&result).contains(&PersonRef::member(3)));
    }

    #[test]
    fn full_name_without_household_falls_through() {
        let roster = vec![
            person(PersonRef::member(1), "Ann", "Lee", None),
            person(PersonRef::member(2), "Bo", "Lee", Some((5, "Lee Family"))),
        ];
        // Ann has no family_id, so tier 1 cannot resolve a household; the
        // query falls through (tier 2 needs an exact last-name match on the
        // whole term, which "Ann Lee" is not) to the fuzzy tier, which
        // matches nobody because no single field contains the full string.
        let result = resolve_candidates("Ann Lee", &roster);
        assert!(result.is_empty());
        assert_eq!(result.household_label, None);
    }

    #[test]
    fn last_name_collision_returns_all_holders() {
        let result = resolve_candidates("Lee", &lee_roster());
        assert_eq!(
            refs(&result),
            vec![PersonRef::member(1), PersonRef::member(2), PersonRef::member(3)]
        );
        // Label comes from the first collision member.
        assert_eq!(result.household_label.as_deref(), Some("Lee Family"));
    }

    #[test]
    fn unique_last_name_skips_collision_tier() {
        let roster = vec![
            person(PersonRef::member(1), "Ann", "Lee", None),
            person(PersonRef::member(2), "Bo", "Park", None),
        ];
        // Only one "Park": tier 2 requires ambiguity, so the fuzzy tier
        // answers instead (still matching Bo, but with no household label).
        let result = resolve_candidates("Park", &roster);
        assert_eq!(refs(&result), vec![PersonRef::member(2)]);
        assert_eq!(result.household_label, None);
    }

    #[test]
    fn phone_substring_matches_without_name_hit() {
        let mut roster = lee_roster();
        roster.push(Person {
            phone: Some("555-0142".to_string()),
            ..person(PersonRef::elder(9), "Dora", "Park", None)
        });
        let result = resolve_candidates("0142", &roster);
        assert_eq!(refs(&result), vec![PersonRef::elder(9)]);
        assert_eq!(result.household_label, None);
    }

    #[test]
    fn household_tier_short_circuits_broader_matches() {
        let mut roster = lee_roster();
        // "Ann Leeson" would match "Ann Lee" as a substring in the fuzzy
        // tier, but tier 1 wins and never consults it.
        roster.push(person(PersonRef::member(8), "Ann", "Leeson", None));
        let result = resolve_candidates("Ann Lee", &roster);
        assert_eq!(refs(&result), vec![PersonRef::member(1), PersonRef::member(2)]);
    }

    #[test]
    fn no_tier_matching_yields_empty_result() {
        let result = resolve_candidates("Zu", &lee_roster());
        assert!(result.is_empty());
        assert_eq!(result.household_label, None);
    }

    #[test]
    fn elder_and_member_ids_do_not_collide_in_selection() {
        let mut roster = vec![
            person(PersonRef::member(1), "Ann", "Lee", None),
            person(PersonRef::elder(1), "Eli", "Gray", None),
        ];
        set_checked(&mut roster, &PersonRef::elder(1), true);
        assert!(!roster[0].checked);
        assert!(roster[1].checked);
    }

    #[test]
    fn select_all_and_clear_selection() {
        let mut roster = lee_roster();
        let targets = vec![PersonRef::member(1), PersonRef::member(3)];
        set_many_checked(&mut roster, &targets, true);
        assert_eq!(
            selected(&roster).iter().map(|p| p.person).collect::<Vec<_>>(),
            targets
        );

        clear_selection(&mut roster);
        assert!(roster.iter().all(|p| !p.checked));
        assert!(selected(&roster).is_empty());
    }
}
