//! Use-case services.
//!
//! # Responsibility
//! - Own the active-user session and its in-memory collections.
//! - Keep front ends decoupled from storage keys and serialization.

pub mod session;
