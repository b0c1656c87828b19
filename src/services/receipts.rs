use crate::domain::models::{Receipt, Session, UserSummary};
use crate::engine::Catalog;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Multiply the session amount by each sector share, rounded to whole rupees.
pub fn rupee_breakdown(catalog: &Catalog, session: &Session) -> BTreeMap<String, u64> {
    catalog
        .sectors
        .iter()
        .map(|s| {
            let pct = session.mix.get(&s.key).copied().unwrap_or(0.0);
            let rupees = (session.amount as f64 * pct / 100.0).round().max(0.0) as u64;
            (s.key.clone(), rupees)
        })
        .collect()
}

pub fn build_receipt(
    catalog: &Catalog,
    session: &Session,
    user: Option<UserSummary>,
) -> Receipt {
    Receipt {
        id: Uuid::new_v4(),
        created_at: chrono::Utc::now().to_rfc3339(),
        user,
        regime: session.tax.as_ref().map(|t| t.suggested),
        amount: session.amount,
        mix: session.mix.clone(),
        breakdown: rupee_breakdown(catalog, session),
        status: "PAID (demo)".to_string(),
        note: "Payment simulated (test mode)".to_string(),
        source: "local-demo".to_string(),
    }
}

/// Trim the history from the back when policy sets a cap; newest entries sit
/// at the front.
pub fn trim_history(receipts: &mut Vec<Receipt>, max: usize) {
    if max > 0 && receipts.len() > max {
        receipts.truncate(max);
    }
}

/// Find a receipt by full id or unambiguous prefix.
pub fn find_receipt<'a>(receipts: &'a [Receipt], id: &str) -> anyhow::Result<&'a Receipt> {
    let matches: Vec<&Receipt> = receipts
        .iter()
        .filter(|r| r.id.to_string().starts_with(id))
        .collect();
    match matches.as_slice() {
        [one] => Ok(one),
        [] => anyhow::bail!("receipt not found: {}", id),
        _ => anyhow::bail!("receipt id is ambiguous: {}", id),
    }
}

pub fn share_link(receipt: &Receipt) -> anyhow::Result<String> {
    let payload = STANDARD.encode(serde_json::to_vec(receipt)?);
    Ok(format!("taxflow://receipt#{}", payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Session;

    fn session() -> Session {
        Session::default()
    }

    #[test]
    fn breakdown_multiplies_amount_by_share() {
        let catalog = Catalog::default_catalog();
        let s = session();
        let breakdown = rupee_breakdown(&catalog, &s);
        assert_eq!(breakdown["education"], 28_000);
        assert_eq!(breakdown["other"], 7_000);
        let total: u64 = breakdown.values().sum();
        assert_eq!(total, 100_000);
    }

    #[test]
    fn receipt_carries_mix_and_status() {
        let catalog = Catalog::default_catalog();
        let r = build_receipt(&catalog, &session(), None);
        assert_eq!(r.status, "PAID (demo)");
        assert_eq!(r.amount, 100_000);
        assert!(r.user.is_none());
    }

    #[test]
    fn find_receipt_by_prefix() {
        let catalog = Catalog::default_catalog();
        let receipts = vec![build_receipt(&catalog, &session(), None)];
        let full = receipts[0].id.to_string();
        assert!(find_receipt(&receipts, &full[..8]).is_ok());
        assert!(find_receipt(&receipts, "zzzz").is_err());
    }

    #[test]
    fn share_link_encodes_receipt() {
        let catalog = Catalog::default_catalog();
        let r = build_receipt(&catalog, &session(), None);
        let link = share_link(&r).expect("share link");
        assert!(link.starts_with("taxflow://receipt#"));
    }

    #[test]
    fn trim_history_respects_cap() {
        let catalog = Catalog::default_catalog();
        let mut receipts: Vec<Receipt> = (0..5)
            .map(|_| build_receipt(&catalog, &session(), None))
            .collect();
        trim_history(&mut receipts, 3);
        assert_eq!(receipts.len(), 3);
        trim_history(&mut receipts, 0);
        assert_eq!(receipts.len(), 3);
    }
}
