use crate::domain::models::{AuditReport, AuditRow, UtilizationEntry};
use crate::engine::Catalog;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

pub fn add_entry(
    catalog: &Catalog,
    entries: &mut Vec<UtilizationEntry>,
    sector: &str,
    amount: u64,
    description: &str,
    date: Option<&str>,
) -> anyhow::Result<UtilizationEntry> {
    if catalog.get(sector).is_none() {
        anyhow::bail!("unknown sector: {}", sector);
    }
    if description.trim().is_empty() {
        anyhow::bail!("description cannot be empty");
    }
    let date = match date {
        Some(d) => {
            DateTime::parse_from_rfc3339(d)
                .map_err(|_| anyhow::anyhow!("date must be RFC 3339: {}", d))?;
            d.to_string()
        }
        None => Utc::now().to_rfc3339(),
    };
    let entry = UtilizationEntry {
        id: Uuid::new_v4(),
        sector: sector.to_string(),
        amount,
        description: description.to_string(),
        date,
    };
    entries.insert(0, entry.clone());
    Ok(entry)
}

/// Build the audit view over published entries: optional case-insensitive
/// substring match on sector or description, optional recency window in days.
pub fn audit_view(
    catalog: &Catalog,
    entries: &[UtilizationEntry],
    query: Option<&str>,
    days: Option<u32>,
) -> AuditReport {
    let cutoff = days.map(|d| Utc::now() - Duration::days(d as i64));
    let needle = query.map(|q| q.to_lowercase());

    let mut rows = Vec::new();
    let mut sector_totals: BTreeMap<String, u64> = BTreeMap::new();
    for e in entries {
        if let Some(cutoff) = cutoff {
            match DateTime::parse_from_rfc3339(&e.date) {
                Ok(at) if at.with_timezone(&Utc) >= cutoff => {}
                _ => continue,
            }
        }
        let label = catalog.label_for(&e.sector);
        if let Some(needle) = &needle {
            let hit = e.sector.to_lowercase().contains(needle)
                || label.to_lowercase().contains(needle)
                || e.description.to_lowercase().contains(needle);
            if !hit {
                continue;
            }
        }
        *sector_totals.entry(e.sector.clone()).or_insert(0) += e.amount;
        rows.push(AuditRow {
            id: e.id.to_string(),
            actor: "govt-portal".to_string(),
            action: "utilization.publish".to_string(),
            sector: label,
            amount: e.amount,
            description: e.description.clone(),
            at: e.date.clone(),
        });
    }
    AuditReport {
        rows,
        sector_totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(entries: &mut Vec<UtilizationEntry>, catalog: &Catalog) {
        add_entry(catalog, entries, "education", 5_000, "new school labs", None)
            .expect("education entry");
        add_entry(catalog, entries, "healthcare", 3_000, "rural clinics", None)
            .expect("healthcare entry");
        add_entry(
            catalog,
            entries,
            "education",
            2_000,
            "digital classrooms",
            Some("2020-01-15T00:00:00+00:00"),
        )
        .expect("dated entry");
    }

    #[test]
    fn add_rejects_unknown_sector_and_blank_description() {
        let catalog = Catalog::default_catalog();
        let mut entries = Vec::new();
        assert!(add_entry(&catalog, &mut entries, "space", 1, "x", None).is_err());
        assert!(add_entry(&catalog, &mut entries, "education", 1, "  ", None).is_err());
        assert!(add_entry(&catalog, &mut entries, "education", 1, "x", Some("not-a-date")).is_err());
        assert!(entries.is_empty());
    }

    #[test]
    fn newest_entries_come_first() {
        let catalog = Catalog::default_catalog();
        let mut entries = Vec::new();
        seed(&mut entries, &catalog);
        assert_eq!(entries[0].description, "digital classrooms");
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn audit_totals_group_by_sector() {
        let catalog = Catalog::default_catalog();
        let mut entries = Vec::new();
        seed(&mut entries, &catalog);
        let report = audit_view(&catalog, &entries, None, None);
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.sector_totals["education"], 7_000);
        assert_eq!(report.sector_totals["healthcare"], 3_000);
    }

    #[test]
    fn query_matches_sector_label_and_description() {
        let catalog = Catalog::default_catalog();
        let mut entries = Vec::new();
        seed(&mut entries, &catalog);
        let by_label = audit_view(&catalog, &entries, Some("Health"), None);
        assert_eq!(by_label.rows.len(), 1);
        let by_text = audit_view(&catalog, &entries, Some("labs"), None);
        assert_eq!(by_text.rows.len(), 1);
        let none = audit_view(&catalog, &entries, Some("railways"), None);
        assert!(none.rows.is_empty());
    }

    #[test]
    fn days_window_drops_old_entries() {
        let catalog = Catalog::default_catalog();
        let mut entries = Vec::new();
        seed(&mut entries, &catalog);
        let recent = audit_view(&catalog, &entries, None, Some(30));
        assert_eq!(recent.rows.len(), 2);
        assert_eq!(recent.sector_totals["education"], 5_000);
        assert_eq!(recent.sector_totals["healthcare"], 3_000);
    }
}
