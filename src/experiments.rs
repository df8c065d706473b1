use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantConfig {
    pub name: String,
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub variants: Vec<VariantConfig>,
}

fn default_enabled() -> bool {
    true
}

pub fn find_experiment<'a>(
    experiments: &'a [ExperimentConfig],
    key: &str,
) -> Option<&'a ExperimentConfig> {
    experiments.iter().find(|e| e.key == key)
}

// Deterministic bucket for one visitor in one experiment: the experiment
// key salts the digest, so the same visitor sticks to one variant per
// experiment while different experiments hash independently. Disabled or
// weightless experiments assign nothing and the caller falls back to the
// default experience.
pub fn assign_variant<'a>(experiment: &'a ExperimentConfig, visitor_id: &str) -> Option<&'a str> {
    if !experiment.enabled {
        return None;
    }

    let total_weight: u64 = experiment
        .variants
        .iter()
        .map(|v| u64::from(v.weight))
        .sum();
    if total_weight == 0 {
        return None;
    }

    let mut hasher = Sha256::new();
    hasher.update(experiment.key.as_bytes());
    hasher.update(b":");
    hasher.update(visitor_id.as_bytes());
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let mut bucket = u64::from_be_bytes(prefix) % total_weight;

    for variant in &experiment.variants {
        let weight = u64::from(variant.weight);
        if bucket < weight {
            return Some(&variant.name);
        }
        bucket -= weight;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn fifty_fifty(key: &str) -> ExperimentConfig {
        ExperimentConfig {
            key: key.to_string(),
            enabled: true,
            variants: vec![
                VariantConfig {
                    name: "control".to_string(),
                    weight: 50,
                },
                VariantConfig {
                    name: "treatment".to_string(),
                    weight: 50,
                },
            ],
        }
    }

    #[test]
    fn assignment_is_sticky_per_visitor() {
        let experiment = fifty_fifty("roi_headline");
        for i in 0..50 {
            let visitor = format!("visitor-{}", i);
            let first = assign_variant(&experiment, &visitor);
            let second = assign_variant(&experiment, &visitor);
            assert_eq!(first, second);
            assert!(first.is_some());
        }
    }

    #[test]
    fn both_variants_of_an_even_split_get_traffic() {
        let experiment = fifty_fifty("roi_headline");
        let assigned: HashSet<&str> = (0..200)
            .filter_map(|i| assign_variant(&experiment, &format!("visitor-{}", i)))
            .collect();
        assert_eq!(assigned.len(), 2);
    }

    #[test]
    fn zero_weight_variant_never_wins() {
        let experiment = ExperimentConfig {
            key: "pricing_banner".to_string(),
            enabled: true,
            variants: vec![
                VariantConfig {
                    name: "retired".to_string(),
                    weight: 0,
                },
                VariantConfig {
                    name: "live".to_string(),
                    weight: 10,
                },
            ],
        };

        for i in 0..100 {
            let variant = assign_variant(&experiment, &format!("visitor-{}", i));
            assert_eq!(variant, Some("live"));
        }
    }

    #[test]
    fn disabled_experiment_assigns_nothing() {
        let mut experiment = fifty_fifty("roi_headline");
        experiment.enabled = false;
        assert_eq!(assign_variant(&experiment, "visitor-1"), None);
    }

    #[test]
    fn weightless_experiment_assigns_nothing() {
        let experiment = ExperimentConfig {
            key: "empty".to_string(),
            enabled: true,
            variants: Vec::new(),
        };
        assert_eq!(assign_variant(&experiment, "visitor-1"), None);
    }

    #[test]
    fn experiments_hash_independently() {
        let headline = fifty_fifty("roi_headline");
        let cta = fifty_fifty("cta_copy");

        let differs = (0..100).any(|i| {
            let visitor = format!("visitor-{}", i);
            assign_variant(&headline, &visitor) != assign_variant(&cta, &visitor)
        });
        assert!(differs, "two experiments should not mirror each other");
    }

    #[test]
    fn find_experiment_matches_on_key() {
        let experiments = vec![fifty_fifty("roi_headline"), fifty_fifty("cta_copy")];
        assert!(find_experiment(&experiments, "cta_copy").is_some());
        assert!(find_experiment(&experiments, "unknown").is_none());
    }
}
