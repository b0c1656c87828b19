use super::allocate::{tenths, Mix};
use super::catalog::Catalog;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    BelowMinimum,
    AboveMaximum,
    TotalMismatch,
}

#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub sector: Option<String>,
    pub detail: String,
}

/// Check a mix against the catalog bounds and the 100% total.
///
/// Read-only and independent of how the mix was produced; a caller that
/// bypassed the normalizer (or hit one of its accepted drift cases) gets the
/// damage reported here instead of silently corrected. Per-sector violations
/// come first in catalog order, then the total mismatch if any, so output
/// order is stable for display and assertions.
pub fn evaluate_guardrails(catalog: &Catalog, mix: &Mix) -> Vec<Violation> {
    let mut out = Vec::new();
    for s in &catalog.sectors {
        let v = mix.get(&s.key).copied().unwrap_or(0.0);
        let t = tenths(v);
        if t < s.min as i64 * 10 {
            out.push(Violation {
                kind: ViolationKind::BelowMinimum,
                sector: Some(s.key.clone()),
                detail: format!("{} is below policy minimum ({}%).", s.label, s.min),
            });
        } else if t > s.max as i64 * 10 {
            out.push(Violation {
                kind: ViolationKind::AboveMaximum,
                sector: Some(s.key.clone()),
                detail: format!("{} exceeds policy maximum ({}%).", s.label, s.max),
            });
        }
    }
    let total_t: i64 = catalog
        .sectors
        .iter()
        .map(|s| tenths(mix.get(&s.key).copied().unwrap_or(0.0)))
        .sum();
    if total_t != 1000 {
        out.push(Violation {
            kind: ViolationKind::TotalMismatch,
            sector: None,
            detail: format!(
                "Total is {}%. Adjust sectors to make it 100%.",
                format_tenths(total_t)
            ),
        });
    }
    out
}

fn format_tenths(t: i64) -> String {
    if t % 10 == 0 {
        format!("{}", t / 10)
    } else {
        format!("{}.{}", t / 10, (t % 10).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::default_catalog()
    }

    fn mix_of(pairs: &[(&str, f64)]) -> Mix {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn compliant_mix_has_no_violations() {
        let mix = mix_of(&[
            ("education", 45.0),
            ("healthcare", 20.0),
            ("infrastructure", 20.0),
            ("defense", 10.0),
            ("other", 5.0),
        ]);
        assert!(evaluate_guardrails(&catalog(), &mix).is_empty());
    }

    #[test]
    fn above_maximum_is_reported_per_sector() {
        let mix = mix_of(&[
            ("education", 55.0),
            ("healthcare", 15.0),
            ("infrastructure", 15.0),
            ("defense", 10.0),
            ("other", 5.0),
        ]);
        let v = evaluate_guardrails(&catalog(), &mix);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].kind, ViolationKind::AboveMaximum);
        assert_eq!(v[0].sector.as_deref(), Some("education"));
    }

    #[test]
    fn floors_only_mix_reports_total_mismatch() {
        let mix = mix_of(&[
            ("education", 10.0),
            ("healthcare", 10.0),
            ("infrastructure", 10.0),
            ("defense", 5.0),
            ("other", 0.0),
        ]);
        let v = evaluate_guardrails(&catalog(), &mix);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].kind, ViolationKind::TotalMismatch);
        assert!(v[0].detail.contains("35%"));
    }

    #[test]
    fn sector_violations_precede_total_mismatch() {
        let mix = mix_of(&[
            ("education", 5.0),
            ("healthcare", 20.0),
            ("infrastructure", 20.0),
            ("defense", 10.0),
            ("other", 5.0),
        ]);
        let v = evaluate_guardrails(&catalog(), &mix);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].kind, ViolationKind::BelowMinimum);
        assert_eq!(v[0].sector.as_deref(), Some("education"));
        assert_eq!(v[1].kind, ViolationKind::TotalMismatch);
    }

    #[test]
    fn fractional_totals_are_printed_with_one_decimal() {
        assert_eq!(format_tenths(995), "99.5");
        assert_eq!(format_tenths(1000), "100");
        assert_eq!(format_tenths(350), "35");
    }
}
