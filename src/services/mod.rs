//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `storage.rs` — local state persistence + audit log.
//! - `policy.rs` — policy.toml gates and coded error envelopes.
//! - `profile.rs` — local account registry, validation, PAN masking.
//! - `receipts.rs` — receipt assembly, lookup, and share links.
//! - `utilization.rs` — published spending entries and the audit view.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod output;
pub mod policy;
pub mod profile;
pub mod receipts;
pub mod storage;
pub mod utilization;
