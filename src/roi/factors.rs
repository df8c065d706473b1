use serde::{Deserialize, Serialize};

// Closed catalog of service industries shared by every form on the site.
// Adding an industry means adding a variant here plus its factor row below;
// anything the wire sends that we don't recognize resolves to Other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    Hvac,
    Solar,
    Telecom,
    Security,
    Appliance,
    Electrical,
    Plumbing,
    Roofing,
    Internet,
    Other,
}

// Assumed gains per industry: fraction of travel cost removed and fraction
// of per-tech throughput gained. Both stay inside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndustryFactor {
    pub time_reduction: f64,
    pub efficiency: f64,
}

impl Industry {
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "hvac" => Industry::Hvac,
            "solar" => Industry::Solar,
            "telecom" => Industry::Telecom,
            "security" => Industry::Security,
            "appliance" => Industry::Appliance,
            "electrical" => Industry::Electrical,
            "plumbing" => Industry::Plumbing,
            "roofing" => Industry::Roofing,
            "internet" => Industry::Internet,
            _ => Industry::Other,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Industry::Hvac => "hvac",
            Industry::Solar => "solar",
            Industry::Telecom => "telecom",
            Industry::Security => "security",
            Industry::Appliance => "appliance",
            Industry::Electrical => "electrical",
            Industry::Plumbing => "plumbing",
            Industry::Roofing => "roofing",
            Industry::Internet => "internet",
            Industry::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Industry::Hvac => "HVAC",
            Industry::Solar => "Solar",
            Industry::Telecom => "Telecom",
            Industry::Security => "Security Systems",
            Industry::Appliance => "Appliance Repair",
            Industry::Electrical => "Electrical",
            Industry::Plumbing => "Plumbing",
            Industry::Roofing => "Roofing",
            Industry::Internet => "Internet / ISP",
            Industry::Other => "Other Field Service",
        }
    }

    pub fn factor(&self) -> IndustryFactor {
        match self {
            Industry::Hvac => IndustryFactor {
                time_reduction: 0.35,
                efficiency: 0.28,
            },
            Industry::Solar => IndustryFactor {
                time_reduction: 0.40,
                efficiency: 0.35,
            },
            Industry::Telecom => IndustryFactor {
                time_reduction: 0.30,
                efficiency: 0.25,
            },
            Industry::Security => IndustryFactor {
                time_reduction: 0.32,
                efficiency: 0.27,
            },
            Industry::Appliance => IndustryFactor {
                time_reduction: 0.28,
                efficiency: 0.22,
            },
            Industry::Electrical => IndustryFactor {
                time_reduction: 0.33,
                efficiency: 0.26,
            },
            Industry::Plumbing => IndustryFactor {
                time_reduction: 0.31,
                efficiency: 0.24,
            },
            Industry::Roofing => IndustryFactor {
                time_reduction: 0.36,
                efficiency: 0.30,
            },
            Industry::Internet => IndustryFactor {
                time_reduction: 0.29,
                efficiency: 0.23,
            },
            // Most conservative row, also the fallback for unknown keys
            Industry::Other => IndustryFactor {
                time_reduction: 0.25,
                efficiency: 0.20,
            },
        }
    }

    pub fn all() -> [Industry; 10] {
        [
            Industry::Hvac,
            Industry::Solar,
            Industry::Telecom,
            Industry::Security,
            Industry::Appliance,
            Industry::Electrical,
            Industry::Plumbing,
            Industry::Roofing,
            Industry::Internet,
            Industry::Other,
        ]
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_key_round_trips() {
        for industry in Industry::all() {
            assert_eq!(Industry::from_key(industry.key()), industry);
        }
    }

    #[test]
    fn from_key_ignores_case_and_whitespace() {
        assert_eq!(Industry::from_key("HVAC"), Industry::Hvac);
        assert_eq!(Industry::from_key("  Solar \n"), Industry::Solar);
        assert_eq!(Industry::from_key("ROOFING"), Industry::Roofing);
    }

    #[test]
    fn unknown_keys_fall_back_to_other() {
        assert_eq!(Industry::from_key("landscaping"), Industry::Other);
        assert_eq!(Industry::from_key(""), Industry::Other);
        assert_eq!(Industry::from_key("hvac2"), Industry::Other);
    }

    #[test]
    fn catalog_is_complete_and_ends_with_other() {
        let all = Industry::all();
        assert_eq!(all.len(), 10);
        assert_eq!(all[0], Industry::Hvac);
        assert_eq!(all[9], Industry::Other);
    }

    #[test]
    fn factors_are_fractions() {
        for industry in Industry::all() {
            let factor = industry.factor();
            assert!(
                factor.time_reduction > 0.0 && factor.time_reduction < 1.0,
                "{} time_reduction out of range",
                industry.key()
            );
            assert!(
                factor.efficiency > 0.0 && factor.efficiency < 1.0,
                "{} efficiency out of range",
                industry.key()
            );
        }
    }

    #[test]
    fn hvac_row_matches_published_rates() {
        let factor = Industry::Hvac.factor();
        assert_eq!(factor.time_reduction, 0.35);
        assert_eq!(factor.efficiency, 0.28);
    }

    #[test]
    fn serializes_as_lowercase_key() {
        let json = serde_json::to_string(&Industry::Appliance).unwrap();
        assert_eq!(json, "\"appliance\"");
        let back: Industry = serde_json::from_str("\"roofing\"").unwrap();
        assert_eq!(back, Industry::Roofing);
    }
}
