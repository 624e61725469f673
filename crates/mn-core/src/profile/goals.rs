use serde::{Deserialize, Serialize};

use super::kinds::HairGoal;

/// Maximum number of goals a profile may carry.
pub const MAX_HAIR_GOALS: usize = 3;

/// Ordered, de-duplicated goal selection capped at [`MAX_HAIR_GOALS`].
///
/// Selections past the cap are ignored rather than reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<HairGoal>", into = "Vec<HairGoal>")]
pub struct HairGoals(Vec<HairGoal>);

impl HairGoals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove `goal`. Returns whether the selection changed.
    pub fn toggle(&mut self, goal: HairGoal) -> bool {
        if let Some(pos) = self.0.iter().position(|g| *g == goal) {
            self.0.remove(pos);
            return true;
        }
        if self.is_full() {
            return false;
        }
        self.0.push(goal);
        true
    }

    pub fn contains(&self, goal: HairGoal) -> bool {
        self.0.contains(&goal)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_HAIR_GOALS
    }

    pub fn as_slice(&self) -> &[HairGoal] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &HairGoal> {
        self.0.iter()
    }
}

impl FromIterator<HairGoal> for HairGoals {
    /// Keeps the first three distinct goals.
    fn from_iter<I: IntoIterator<Item = HairGoal>>(iter: I) -> Self {
        let mut goals = Vec::with_capacity(MAX_HAIR_GOALS);
        for goal in iter {
            if goals.len() == MAX_HAIR_GOALS {
                break;
            }
            if !goals.contains(&goal) {
                goals.push(goal);
            }
        }
        Self(goals)
    }
}

impl From<Vec<HairGoal>> for HairGoals {
    fn from(goals: Vec<HairGoal>) -> Self {
        goals.into_iter().collect()
    }
}

impl From<HairGoals> for Vec<HairGoal> {
    fn from(goals: HairGoals) -> Self {
        goals.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_past_capacity_is_ignored() {
        let mut goals = HairGoals::new();
        assert!(goals.toggle(HairGoal::Growth));
        assert!(goals.toggle(HairGoal::Shine));
        assert!(goals.toggle(HairGoal::Volume));
        assert!(!goals.toggle(HairGoal::Hydration));
        assert_eq!(
            goals.as_slice(),
            &[HairGoal::Growth, HairGoal::Shine, HairGoal::Volume]
        );
    }

    #[test]
    fn toggle_removes_selected_goal_and_frees_a_slot() {
        let mut goals: HairGoals = vec![HairGoal::Growth, HairGoal::Shine, HairGoal::Volume].into();
        assert!(goals.toggle(HairGoal::Shine));
        assert!(goals.toggle(HairGoal::Hydration));
        assert_eq!(
            goals.as_slice(),
            &[HairGoal::Growth, HairGoal::Volume, HairGoal::Hydration]
        );
    }

    #[test]
    fn replacing_list_keeps_first_three_distinct() {
        let goals: HairGoals = vec![
            HairGoal::Growth,
            HairGoal::Growth,
            HairGoal::Shine,
            HairGoal::Volume,
            HairGoal::RepairDamage,
        ]
        .into();
        assert_eq!(
            goals.as_slice(),
            &[HairGoal::Growth, HairGoal::Shine, HairGoal::Volume]
        );
    }

    #[test]
    fn deserializing_oversized_list_applies_cap() {
        let goals: HairGoals =
            serde_json::from_str(r#"["growth","shine","volume","hydration"]"#).unwrap();
        assert_eq!(goals.len(), MAX_HAIR_GOALS);
    }
}
