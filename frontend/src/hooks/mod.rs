pub mod use_events;
pub mod use_roster;
