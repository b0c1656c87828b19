use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Old,
    New,
}

/// Old-regime deductions in rupees; statutory caps are applied here, not by
/// the caller.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Deductions {
    pub sec80c: u64,
    pub sec80d: u64,
    pub nps: u64,
    pub hra: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxComparison {
    pub income: u64,
    pub deductions: Deductions,
    pub tax_old: u64,
    pub tax_new: u64,
    pub suggested: Regime,
}

const CAP_80C: u64 = 150_000;
const CAP_80D: u64 = 50_000;
const CAP_NPS: u64 = 50_000;
const CAP_HRA: u64 = 200_000;

fn slab_tax(taxable: u64, bands: &[(u64, f64)], top_rate: f64) -> u64 {
    let mut remaining = taxable as f64;
    let mut tax = 0.0;
    for (width, rate) in bands {
        let take = remaining.min(*width as f64);
        tax += take * rate;
        remaining -= take;
    }
    if remaining > 0.0 {
        tax += remaining * top_rate;
    }
    tax.round() as u64
}

fn old_regime_tax(income: u64, d: &Deductions) -> u64 {
    let deducted = d.sec80c.min(CAP_80C)
        + d.sec80d.min(CAP_80D)
        + d.nps.min(CAP_NPS)
        + d.hra.min(CAP_HRA);
    let taxable = income.saturating_sub(deducted);
    slab_tax(
        taxable,
        &[(250_000, 0.0), (250_000, 0.05), (500_000, 0.2)],
        0.3,
    )
}

fn new_regime_tax(income: u64) -> u64 {
    slab_tax(
        income,
        &[
            (300_000, 0.0),
            (300_000, 0.05),
            (300_000, 0.1),
            (300_000, 0.15),
            (300_000, 0.2),
        ],
        0.3,
    )
}

/// Compute both regimes and suggest the cheaper one. Ties go to the old
/// regime, matching the comparison users see side by side.
pub fn compute_tax(income: u64, deductions: Deductions) -> TaxComparison {
    let tax_old = old_regime_tax(income, &deductions);
    let tax_new = new_regime_tax(income);
    let suggested = if tax_old <= tax_new {
        Regime::Old
    } else {
        Regime::New
    };
    TaxComparison {
        income,
        deductions,
        tax_old,
        tax_new,
        suggested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn old_regime_slabs() {
        assert_eq!(old_regime_tax(1_000_000, &Deductions::default()), 112_500);
        assert_eq!(old_regime_tax(250_000, &Deductions::default()), 0);
        assert_eq!(old_regime_tax(0, &Deductions::default()), 0);
    }

    #[test]
    fn old_regime_caps_deductions() {
        let d = Deductions {
            sec80c: 200_000,
            sec80d: 60_000,
            nps: 0,
            hra: 0,
        };
        // 80C capped at 1.5L and 80D at 50k: taxable 1,000,000.
        assert_eq!(old_regime_tax(1_200_000, &d), 112_500);
    }

    #[test]
    fn deductions_cannot_push_taxable_negative() {
        let d = Deductions {
            sec80c: 150_000,
            sec80d: 50_000,
            nps: 50_000,
            hra: 200_000,
        };
        assert_eq!(old_regime_tax(100_000, &d), 0);
    }

    #[test]
    fn new_regime_slabs() {
        assert_eq!(new_regime_tax(1_000_000), 60_000);
        assert_eq!(new_regime_tax(1_600_000), 180_000);
        assert_eq!(new_regime_tax(300_000), 0);
    }

    #[test]
    fn suggests_cheaper_regime() {
        let cmp = compute_tax(500_000, Deductions::default());
        assert_eq!(cmp.tax_old, 12_500);
        assert_eq!(cmp.tax_new, 10_000);
        assert_eq!(cmp.suggested, Regime::New);
    }

    #[test]
    fn ties_go_to_old_regime() {
        let cmp = compute_tax(0, Deductions::default());
        assert_eq!(cmp.suggested, Regime::Old);
    }
}
