//! Check-in resolution: turn an operator's free-text query into a candidate
//! list (household-first), then bulk check-in with per-person outcome
//! classification. Pure logic lives in `resolver`; `submit` is the thin I/O
//! adapter over the API client.

pub mod resolver;
pub mod submit;

pub use resolver::{resolve_candidates, Person, SearchResult};
pub use submit::{submit_check_ins, BatchSummary};
