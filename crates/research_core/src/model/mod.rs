//! Record model for the research tracker.
//!
//! # Responsibility
//! - Define the three persisted record shapes and their form inputs.
//! - Provide derived display values (progress, days until, date labels).
//!
//! # Invariants
//! - `id` and `created_at` are assigned once at creation and never rewritten.
//! - Serialized field names are camelCase to stay compatible with data
//!   written by the browser edition.

pub mod conference;
pub mod date;
pub mod journal;
pub mod paper;
pub mod record;
