//! Local key-value storage and the collection persistence built on it.
//!
//! # Responsibility
//! - Resolve per-user storage keys (`keys`).
//! - Provide a local-storage style key-value contract (`kv`).
//! - Mirror the three record collections into storage (`collections`).
//!
//! # Invariants
//! - Every record collection is stored as one JSON array under its own key.
//! - Loading never fails; saving propagates storage errors.

pub mod collections;
pub mod keys;
pub mod kv;
