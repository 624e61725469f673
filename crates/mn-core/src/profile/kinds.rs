//! Closed value sets offered by the setup screens.
//!
//! Wire values are the snake_case strings stored in the profile row.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    NonBinary,
    PreferNotToSay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HairType {
    Straight,
    Wavy,
    Curly,
    Coily,
    /// "Not sure" answer on the hair type screen.
    #[serde(rename = "not_sure")]
    NotSpecified,
}

/// Chemical history entries. `None` is an answer, not an absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChemicalTreatment {
    Color,
    Relaxer,
    Perm,
    Bleach,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HairGoal {
    Hydration,
    Growth,
    ReduceBreakage,
    CurlDefinition,
    RepairDamage,
    Volume,
    ScalpHealth,
    ReduceFrizz,
    ColorProtection,
    Shine,
}

/// Daily time budget for a routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutineIntensity {
    Quick,
    Balanced,
    Thorough,
    Intensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductPreference {
    Natural,
    Mixed,
    Professional,
    Budget,
    Diy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_match_stored_strings() {
        assert_eq!(
            serde_json::to_string(&HairType::NotSpecified).unwrap(),
            "\"not_sure\""
        );
        assert_eq!(
            serde_json::to_string(&HairGoal::ReduceBreakage).unwrap(),
            "\"reduce_breakage\""
        );
        assert_eq!(
            serde_json::to_string(&Gender::PreferNotToSay).unwrap(),
            "\"prefer_not_to_say\""
        );
        assert_eq!(serde_json::to_string(&ProductPreference::Diy).unwrap(), "\"diy\"");
    }

    #[test]
    fn unknown_wire_value_is_rejected() {
        assert!(serde_json::from_str::<HairType>("\"mixed\"").is_err());
    }
}
