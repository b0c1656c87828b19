use crate::engine::Violation;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Error with a stable machine-readable code for the JSON error envelope.
#[derive(Debug)]
pub struct CodedError {
    pub code: &'static str,
    pub message: String,
}

impl fmt::Display for CodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CodedError {}

pub fn policy_deny(message: impl Into<String>) -> anyhow::Error {
    anyhow::Error::new(CodedError {
        code: "POLICY_DENY",
        message: message.into(),
    })
}

pub fn guardrail_block(message: impl Into<String>) -> anyhow::Error {
    anyhow::Error::new(CodedError {
        code: "GUARDRAIL_BLOCK",
        message: message.into(),
    })
}

#[derive(Debug, Deserialize)]
pub struct PolicyFile {
    #[serde(default)]
    pub general: PolicyGeneral,
}

#[derive(Debug, Deserialize)]
pub struct PolicyGeneral {
    #[serde(default = "default_true")]
    pub block_unbalanced_pay: bool,
    #[serde(default = "default_true")]
    pub block_unbalanced_template: bool,
    #[serde(default)]
    pub require_profile_for_pay: bool,
    /// 0 keeps the full receipt history.
    #[serde(default)]
    pub max_receipt_history: usize,
}

fn default_true() -> bool {
    true
}

impl Default for PolicyGeneral {
    fn default() -> Self {
        PolicyGeneral {
            block_unbalanced_pay: true,
            block_unbalanced_template: true,
            require_profile_for_pay: false,
            max_receipt_history: 0,
        }
    }
}

pub fn load_policy() -> anyhow::Result<PolicyFile> {
    let home = std::env::var("HOME")?;
    let path = PathBuf::from(home).join(".config/taxflow/policy.toml");
    if !path.exists() {
        return Ok(PolicyFile {
            general: PolicyGeneral::default(),
        });
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// Gate for `pay`: guardrail violations and a missing profile are surfaced as
/// policy refusals; `--force` overrides the guardrail gate only.
pub fn enforce_pay(
    policy: &PolicyFile,
    violations: &[Violation],
    signed_in: bool,
    force: bool,
) -> anyhow::Result<()> {
    if policy.general.require_profile_for_pay && !signed_in {
        return Err(policy_deny("policy requires a signed-in profile to pay"));
    }
    if policy.general.block_unbalanced_pay && !violations.is_empty() && !force {
        return Err(guardrail_block(format!(
            "allocation violates guardrails ({}); fix the mix or pass --force",
            violations
                .iter()
                .map(|v| v.detail.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        )));
    }
    Ok(())
}

/// Gate for `template save`.
pub fn enforce_template_save(policy: &PolicyFile, violations: &[Violation]) -> anyhow::Result<()> {
    if policy.general.block_unbalanced_template && !violations.is_empty() {
        return Err(guardrail_block(
            "cannot save a template while guardrails report violations",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Violation, ViolationKind};

    fn mismatch() -> Violation {
        Violation {
            kind: ViolationKind::TotalMismatch,
            sector: None,
            detail: "Total is 90%. Adjust sectors to make it 100%.".to_string(),
        }
    }

    #[test]
    fn pay_blocked_on_violations_by_default() {
        let policy = PolicyFile {
            general: PolicyGeneral::default(),
        };
        let err = enforce_pay(&policy, &[mismatch()], true, false).unwrap_err();
        let coded = err.downcast_ref::<CodedError>().expect("coded error");
        assert_eq!(coded.code, "GUARDRAIL_BLOCK");
    }

    #[test]
    fn force_overrides_guardrail_gate() {
        let policy = PolicyFile {
            general: PolicyGeneral::default(),
        };
        assert!(enforce_pay(&policy, &[mismatch()], true, true).is_ok());
    }

    #[test]
    fn profile_requirement_is_not_forceable() {
        let general = PolicyGeneral {
            require_profile_for_pay: true,
            ..PolicyGeneral::default()
        };
        let policy = PolicyFile { general };
        let err = enforce_pay(&policy, &[], false, true).unwrap_err();
        let coded = err.downcast_ref::<CodedError>().expect("coded error");
        assert_eq!(coded.code, "POLICY_DENY");
    }

    #[test]
    fn compliant_mix_passes_all_gates() {
        let policy = PolicyFile {
            general: PolicyGeneral::default(),
        };
        assert!(enforce_pay(&policy, &[], false, false).is_ok());
        assert!(enforce_template_save(&policy, &[]).is_ok());
    }
}
