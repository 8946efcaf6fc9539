//! # triage-store
//!
//! Append-only flat-file log of incident exchanges.
//!
//! Each successful generation becomes one human-readable block appended to a
//! single text file. Nothing in triage parses the file back; reading it is
//! for display only.

mod record;
mod store;

pub use record::{IncidentRecord, SEPARATOR, TIMESTAMP_FORMAT};
pub use store::{IncidentLogStore, StoreError, DEFAULT_LOG_FILE};
