//! Audit logging module
//!
//! Provides append-only audit records for anonymization runs. Original data
//! only ever reaches the log as a SHA-256 hash.

pub mod logger;

pub use logger::{hash_value, AuditLogger};
