use crate::engine::{Mix, Regime, TaxComparison, Violation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// The per-user working state: contribution amount, current mix, locks, and
/// the last tax estimate. Mutated by every allocation command and persisted
/// between invocations.
#[derive(Debug, Serialize, Deserialize)]
pub struct Session {
    pub amount: u64,
    pub preset: Option<String>,
    pub mix: Mix,
    #[serde(default)]
    pub locks: BTreeMap<String, bool>,
    #[serde(default)]
    pub tax: Option<TaxComparison>,
}

impl Default for Session {
    fn default() -> Self {
        let mix = [
            ("education", 28.0),
            ("healthcare", 25.0),
            ("infrastructure", 25.0),
            ("defense", 15.0),
            ("other", 7.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Session {
            amount: 100_000,
            preset: Some("recommended".to_string()),
            mix,
            locks: BTreeMap::new(),
            tax: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub mix: Mix,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub pan: Option<String>,
    pub created_at: String,
}

/// Summary embedded in receipts; carries only a masked PAN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub name: String,
    pub email: String,
    pub pan_masked: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Users {
    #[serde(default)]
    pub accounts: BTreeMap<String, UserAccount>,
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub created_at: String,
    pub user: Option<UserSummary>,
    pub regime: Option<Regime>,
    pub amount: u64,
    pub mix: Mix,
    pub breakdown: BTreeMap<String, u64>,
    pub status: String,
    pub note: String,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationEntry {
    pub id: Uuid,
    pub sector: String,
    pub amount: u64,
    pub description: String,
    pub date: String,
}

/// Audit-trail row derived from utilization entries.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRow {
    pub id: String,
    pub actor: String,
    pub action: String,
    pub sector: String,
    pub amount: u64,
    pub description: String,
    pub at: String,
}

#[derive(Serialize)]
pub struct AuditReport {
    pub rows: Vec<AuditRow>,
    pub sector_totals: BTreeMap<String, u64>,
}

#[derive(Serialize)]
pub struct AllocationRow {
    pub key: String,
    pub label: String,
    pub min: u32,
    pub max: u32,
    pub locked: bool,
    pub percent: f64,
    pub rupees: u64,
}

#[derive(Serialize)]
pub struct AllocationView {
    pub amount: u64,
    pub preset: Option<String>,
    pub total: f64,
    pub rows: Vec<AllocationRow>,
    pub violations: Vec<Violation>,
}

#[derive(Serialize)]
pub struct CheckReport {
    pub compliant: bool,
    pub violations: Vec<Violation>,
}
