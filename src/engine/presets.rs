use super::allocate::Mix;

/// A named target mix a user can start from. Values go through
/// `apply_preset`, so a preset that disrespects a custom catalog's caps still
/// lands on a normalized mix.
pub struct Preset {
    pub key: &'static str,
    pub label: &'static str,
    pub rationale: &'static str,
    values: &'static [(&'static str, f64)],
}

impl Preset {
    pub fn mix(&self) -> Mix {
        self.values
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }
}

const PRESETS: &[Preset] = &[
    Preset {
        key: "recommended",
        label: "Govt Recommended",
        rationale: "A diversified allocation aligned with typical Union Budget priorities.",
        values: &[
            ("education", 28.0),
            ("healthcare", 25.0),
            ("infrastructure", 25.0),
            ("defense", 15.0),
            ("other", 7.0),
        ],
    },
    Preset {
        key: "balanced",
        label: "Balanced",
        rationale: "Equal emphasis across socio-economic development areas.",
        values: &[
            ("education", 25.0),
            ("healthcare", 25.0),
            ("infrastructure", 25.0),
            ("defense", 15.0),
            ("other", 10.0),
        ],
    },
    Preset {
        key: "education",
        label: "Education Focus",
        rationale: "Boost human capital development through higher education spend.",
        values: &[
            ("education", 45.0),
            ("healthcare", 20.0),
            ("infrastructure", 20.0),
            ("defense", 10.0),
            ("other", 5.0),
        ],
    },
    Preset {
        key: "healthcare",
        label: "Healthcare Focus",
        rationale: "Stronger public health outcomes via increased healthcare allocation.",
        values: &[
            ("education", 20.0),
            ("healthcare", 45.0),
            ("infrastructure", 20.0),
            ("defense", 10.0),
            ("other", 5.0),
        ],
    },
];

pub fn presets() -> &'static [Preset] {
    PRESETS
}

pub fn preset_by_key(key: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_sums_to_100() {
        for p in presets() {
            let total: f64 = p.mix().values().sum();
            assert_eq!(total, 100.0, "preset {} sums to {}", p.key, total);
        }
    }

    #[test]
    fn lookup_by_key() {
        assert!(preset_by_key("recommended").is_some());
        assert!(preset_by_key("austerity").is_none());
    }
}
