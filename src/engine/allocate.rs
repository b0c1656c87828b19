use super::catalog::Catalog;
use std::collections::BTreeMap;

/// Percentage shares keyed by sector, carried to one decimal place.
pub type Mix = BTreeMap<String, f64>;

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Display values are tenths of a percent; summing in integer tenths keeps
/// the total comparison exact.
pub(crate) fn tenths(v: f64) -> i64 {
    (v * 10.0).round() as i64
}

/// Normalize a full proposed mix against the catalog bounds so it sums to 100.
///
/// Values are clamped up to each sector's minimum, then down to its maximum.
/// The weight above the floor sum is rescaled so the total reaches 100, and a
/// final signed rounding correction lands on the first sector in catalog
/// order, clamped to that sector's bounds. When the clamped values carry no
/// weight above the floors, the floor-clamped mix is returned as-is even
/// though it sums below 100; the guardrail evaluator reports the shortfall.
pub fn apply_preset(catalog: &Catalog, values: &Mix) -> Mix {
    let clamped: Vec<(&str, f64, f64)> = catalog
        .sectors
        .iter()
        .map(|s| {
            let raw = values.get(&s.key).copied().unwrap_or(0.0);
            let v = raw.max(s.min as f64).min(s.max as f64);
            (s.key.as_str(), v, s.min as f64)
        })
        .collect();

    let min_sum = catalog.min_sum() as f64;
    let extra_target = 100.0 - min_sum;
    let current: f64 = clamped.iter().map(|(_, v, _)| v).sum();
    let current_extra = current - min_sum;

    if current_extra <= 0.0 {
        return clamped
            .iter()
            .map(|(k, v, _)| (k.to_string(), round1(*v)))
            .collect();
    }

    let scale = extra_target / current_extra;
    let mut out: Mix = clamped
        .iter()
        .map(|(k, v, min)| (k.to_string(), round1(min + (v - min) * scale)))
        .collect();

    let sum_t: i64 = out.values().map(|v| tenths(*v)).sum();
    let diff_t = 1000 - sum_t;
    if diff_t != 0 {
        let first = &catalog.sectors[0];
        let current_t = tenths(out[&first.key]);
        // The correction may move the value toward a bound but never past
        // one it was not already past; scaling itself can leave a sector
        // outside its cap, and the correction must not mask that.
        let lo = (first.min as i64 * 10).min(current_t);
        let hi = (first.max as i64 * 10).max(current_t);
        let corrected_t = (current_t + diff_t).clamp(lo, hi);
        out.insert(first.key.clone(), corrected_t as f64 / 10.0);
    }
    out
}

/// Apply a single-sector edit, rescaling the unlocked remainder.
///
/// A locked sector cannot be the edit target; unlock it first. The edited
/// value is clamped into its sector's bounds. Locked sectors and
/// the edited key keep their exact values; the remaining free sectors are
/// scaled proportionally into whatever budget is left, clamped at zero when
/// the edit plus locked shares already exceed 100. Per-sector rounding drift
/// in the total is accepted and surfaced by the guardrail evaluator rather
/// than silently corrected.
pub fn edit_sector(
    catalog: &Catalog,
    mix: &Mix,
    locks: &BTreeMap<String, bool>,
    edited: &str,
    value: f64,
) -> anyhow::Result<Mix> {
    let sector = catalog
        .get(edited)
        .ok_or_else(|| anyhow::anyhow!("unknown sector: {}", edited))?;
    if locks.get(edited).copied().unwrap_or(false) {
        anyhow::bail!("sector is locked: {}; unlock it first", edited);
    }
    let new_value = round1(value.max(sector.min as f64).min(sector.max as f64));

    let is_locked = |key: &str| locks.get(key).copied().unwrap_or(false);
    let current = |key: &str| mix.get(key).copied().unwrap_or(0.0);

    let locked_sum: f64 = catalog
        .sectors
        .iter()
        .filter(|s| s.key != edited && is_locked(&s.key))
        .map(|s| current(&s.key))
        .sum();
    let free_total: f64 = catalog
        .sectors
        .iter()
        .filter(|s| s.key != edited && !is_locked(&s.key))
        .map(|s| current(&s.key))
        .sum();

    let remaining = 100.0 - new_value - locked_sum;
    let factor = if free_total > 0.0 {
        remaining / free_total
    } else {
        0.0
    };

    let out = catalog
        .sectors
        .iter()
        .map(|s| {
            let v = if s.key == edited {
                new_value
            } else if is_locked(&s.key) {
                current(&s.key)
            } else {
                round1((current(&s.key) * factor).max(0.0))
            };
            (s.key.clone(), v)
        })
        .collect();
    Ok(out)
}
