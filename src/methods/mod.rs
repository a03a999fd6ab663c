//! Detection method implementations.
//!
//! One module per method, all with the same shape: take the gazetteer (and
//! whatever collaborators the method needs), the raw input field(s), and
//! the requested granularity; return `Some(place_name)` on a confident
//! resolution and `None` otherwise. Low confidence is the normal outcome
//! here, not an error — the orchestrator in [`crate::detector`] maps `None`
//! to the default `"unknown"` place and falls through to the next method.

pub mod demonym;
pub mod flag;
pub mod language;
pub mod location;
