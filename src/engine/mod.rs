//! Pure allocation and tax arithmetic.
//!
//! ## Module map
//! - `catalog.rs` — sector catalog, load-time validation, caps normalization.
//! - `allocate.rs` — constrained percentage normalizer (preset + single-edit).
//! - `guardrails.rs` — policy bound and total checks over a mix.
//! - `presets.rs` — named target mixes with rationales.
//! - `tax.rs` — old/new regime slab math and regime suggestion.
//!
//! ## Conventions
//! - Every function here is a pure function of its arguments; session state,
//!   locks, and the contribution amount are owned by the command layer.
//! - Percentages are carried to one decimal place across all paths.

pub mod allocate;
pub mod catalog;
pub mod guardrails;
pub mod presets;
pub mod tax;

pub use allocate::{apply_preset, edit_sector, Mix};
pub use catalog::{normalize_caps, Catalog, Sector};
pub use guardrails::{evaluate_guardrails, Violation, ViolationKind};
pub use presets::{preset_by_key, presets, Preset};
pub use tax::{compute_tax, Deductions, Regime, TaxComparison};
