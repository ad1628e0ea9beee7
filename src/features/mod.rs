//! Feature extraction
//!
//! Per-match team perspectives and rolling form aggregates.

pub mod form;
pub mod perspective;

pub use form::{FormAggregator, FormVector};
pub use perspective::{Outcome, TeamMatchPerspective};
