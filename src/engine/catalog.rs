use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A budget sector with policy-defined share bounds in whole percent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sector {
    pub key: String,
    pub label: String,
    pub min: u32,
    pub max: u32,
}

/// Ordered sector catalog. Order is significant: guardrail violations are
/// reported in catalog order and the rounding correction in the preset path
/// targets the first sector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub sectors: Vec<Sector>,
}

impl Catalog {
    /// Built-in sector set used when no `--catalog` file is given.
    pub fn default_catalog() -> Self {
        let sectors = [
            ("education", "Education", 10, 50),
            ("healthcare", "Healthcare", 10, 50),
            ("infrastructure", "Infrastructure", 10, 40),
            ("defense", "Defense", 5, 30),
            ("other", "Other", 0, 30),
        ]
        .into_iter()
        .map(|(key, label, min, max)| Sector {
            key: key.to_string(),
            label: label.to_string(),
            min,
            max,
        })
        .collect();
        Catalog { sectors }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validated once at load; the engine assumes these invariants afterwards.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sectors.is_empty() {
            anyhow::bail!("catalog has no sectors");
        }
        let mut seen = std::collections::HashSet::new();
        for s in &self.sectors {
            if !seen.insert(s.key.clone()) {
                anyhow::bail!("duplicate sector key: {}", s.key);
            }
            if s.min > s.max || s.max > 100 {
                anyhow::bail!(
                    "sector {} has invalid bounds: min {} max {}",
                    s.key,
                    s.min,
                    s.max
                );
            }
        }
        let min_sum: u32 = self.sectors.iter().map(|s| s.min).sum();
        if min_sum > 100 {
            anyhow::bail!("sector minimums sum to {} (must be <= 100)", min_sum);
        }
        let max_sum: u32 = self.sectors.iter().map(|s| s.max).sum();
        if max_sum < 100 {
            anyhow::bail!("sector maximums sum to {} (must be >= 100)", max_sum);
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.key == key)
    }

    pub fn label_for(&self, key: &str) -> String {
        self.get(key)
            .map(|s| s.label.clone())
            .unwrap_or_else(|| key.to_string())
    }

    pub fn min_sum(&self) -> u32 {
        self.sectors.iter().map(|s| s.min).sum()
    }
}

/// Simple factor normalization for admin contribution caps: scale every cap by
/// `100 / total`, rounding to whole percent. Distinct from the constrained
/// normalizer in `allocate.rs` — caps have no per-sector bounds of their own.
pub fn normalize_caps(caps: &BTreeMap<String, u32>) -> BTreeMap<String, u32> {
    let total: u32 = caps.values().sum();
    if total == 0 {
        return caps.clone();
    }
    caps.iter()
        .map(|(k, v)| {
            let scaled = (*v as f64) * 100.0 / (total as f64);
            (k.clone(), scaled.round() as u32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sector(key: &str, min: u32, max: u32) -> Sector {
        Sector {
            key: key.to_string(),
            label: key.to_string(),
            min,
            max,
        }
    }

    #[test]
    fn default_catalog_is_valid() {
        Catalog::default_catalog().validate().expect("valid");
    }

    #[test]
    fn validate_rejects_min_above_max() {
        let c = Catalog {
            sectors: vec![sector("a", 40, 20), sector("b", 0, 100)],
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn validate_rejects_minimums_over_100() {
        let c = Catalog {
            sectors: vec![sector("a", 60, 80), sector("b", 50, 80)],
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn validate_rejects_maximums_under_100() {
        let c = Catalog {
            sectors: vec![sector("a", 0, 40), sector("b", 0, 40)],
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_keys() {
        let c = Catalog {
            sectors: vec![sector("a", 0, 60), sector("a", 0, 60)],
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn normalize_caps_scales_to_100() {
        let caps: BTreeMap<String, u32> = [("a", 30), ("b", 30), ("c", 60)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let n = normalize_caps(&caps);
        assert_eq!(n["a"], 25);
        assert_eq!(n["b"], 25);
        assert_eq!(n["c"], 50);
    }

    #[test]
    fn normalize_caps_leaves_zero_total_alone() {
        let caps: BTreeMap<String, u32> =
            [("a".to_string(), 0), ("b".to_string(), 0)].into_iter().collect();
        assert_eq!(normalize_caps(&caps), caps);
    }
}
