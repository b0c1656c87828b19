//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `calc.rs` — tax estimation under both regimes.
//! - `allocation.rs` — session mix editing, locks, templates, checks.
//! - `payment.rs` — simulated payment and receipt history.
//! - `admin.rs` — caps, utilization, audit, and profile trees.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*` and `engine/*`.
//! - Keep behavior and output schema stable.

pub mod admin;
pub mod allocation;
pub mod calc;
pub mod payment;

pub use admin::{
    handle_audit_command, handle_caps_commands, handle_profile_commands,
    handle_utilization_commands,
};
pub use allocation::{handle_allocation_commands, handle_template_commands};
pub use calc::handle_calc_command;
pub use payment::{handle_pay_command, handle_receipt_commands};
