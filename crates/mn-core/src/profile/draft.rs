use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::age::Age;
use super::completed::{CompletedProfile, HairProfileRow, MissingProfileField};
use super::goals::HairGoals;
use super::kinds::{
    ChemicalTreatment, Gender, HairGoal, HairType, ProductPreference, RoutineIntensity,
};
use crate::ids::SubjectId;

/// A single answer recorded by a setup screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProfileField {
    Gender(Gender),
    Age(Age),
    HairType(HairType),
    ChemicalTreatments(BTreeSet<ChemicalTreatment>),
    HairGoals(HairGoals),
    RoutinePreference(RoutineIntensity),
    ProductPreference(ProductPreference),
}

/// Partially filled hair profile held while the wizard runs.
///
/// 设置向导进行中的草稿档案。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftProfile {
    pub gender: Option<Gender>,
    pub age: Option<Age>,
    pub hair_type: Option<HairType>,
    pub chemical_treatments: BTreeSet<ChemicalTreatment>,
    pub hair_goals: HairGoals,
    pub routine_preference: Option<RoutineIntensity>,
    pub product_preference: Option<ProductPreference>,
}

impl DraftProfile {
    /// Merge one answer into the draft. Later answers replace earlier ones.
    pub fn apply(&mut self, field: ProfileField) {
        match field {
            ProfileField::Gender(value) => self.gender = Some(value),
            ProfileField::Age(value) => self.age = Some(value),
            ProfileField::HairType(value) => self.hair_type = Some(value),
            ProfileField::ChemicalTreatments(value) => self.chemical_treatments = value,
            ProfileField::HairGoals(value) => self.hair_goals = value,
            ProfileField::RoutinePreference(value) => self.routine_preference = Some(value),
            ProfileField::ProductPreference(value) => self.product_preference = Some(value),
        }
    }

    pub fn toggle_goal(&mut self, goal: HairGoal) -> bool {
        self.hair_goals.toggle(goal)
    }

    pub fn toggle_treatment(&mut self, treatment: ChemicalTreatment) {
        if !self.chemical_treatments.remove(&treatment) {
            self.chemical_treatments.insert(treatment);
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fields the finalize payload cannot be built without.
    pub fn missing_fields(&self) -> Vec<MissingProfileField> {
        let mut missing = Vec::new();
        if self.hair_type.is_none() {
            missing.push(MissingProfileField::HairType);
        }
        if self.hair_goals.is_empty() {
            missing.push(MissingProfileField::HairGoals);
        }
        missing
    }

    /// Build the upsert payload for `user_id`.
    pub fn complete(
        &self,
        user_id: SubjectId,
        updated_at: DateTime<Utc>,
    ) -> Result<CompletedProfile, MissingProfileField> {
        let hair_type = self.hair_type.ok_or(MissingProfileField::HairType)?;
        if self.hair_goals.is_empty() {
            return Err(MissingProfileField::HairGoals);
        }
        Ok(CompletedProfile {
            user_id,
            hair_type,
            hair_goals: self.hair_goals.clone(),
            hair_concerns: self.chemical_treatments.iter().copied().collect(),
            gender: self.gender,
            age: self.age,
            routine_preference: self.routine_preference,
            product_preference: self.product_preference,
            updated_at,
        })
    }
}

impl From<&HairProfileRow> for DraftProfile {
    fn from(row: &HairProfileRow) -> Self {
        Self {
            gender: row.gender,
            age: row.age,
            hair_type: row.hair_type,
            chemical_treatments: row
                .hair_concerns
                .iter()
                .flatten()
                .copied()
                .collect(),
            hair_goals: row.hair_goals.clone().unwrap_or_default(),
            routine_preference: row.routine_preference,
            product_preference: row.product_preference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    #[test]
    fn apply_last_write_wins() {
        let mut draft = DraftProfile::default();
        draft.apply(ProfileField::HairType(HairType::Wavy));
        draft.apply(ProfileField::HairType(HairType::Coily));
        assert_eq!(draft.hair_type, Some(HairType::Coily));
    }

    #[test]
    fn toggle_treatment_adds_then_removes() {
        let mut draft = DraftProfile::default();
        draft.toggle_treatment(ChemicalTreatment::Bleach);
        assert!(draft.chemical_treatments.contains(&ChemicalTreatment::Bleach));
        draft.toggle_treatment(ChemicalTreatment::Bleach);
        assert!(draft.chemical_treatments.is_empty());
    }

    #[test]
    fn complete_requires_hair_type_and_goals() {
        let mut draft = DraftProfile::default();
        assert_eq!(
            draft.missing_fields(),
            vec![MissingProfileField::HairType, MissingProfileField::HairGoals]
        );
        assert_eq!(
            draft.complete(SubjectId::from("u1"), ts()),
            Err(MissingProfileField::HairType)
        );

        draft.apply(ProfileField::HairType(HairType::Curly));
        assert_eq!(
            draft.complete(SubjectId::from("u1"), ts()),
            Err(MissingProfileField::HairGoals)
        );

        draft.toggle_goal(HairGoal::Growth);
        let profile = draft.complete(SubjectId::from("u1"), ts()).unwrap();
        assert_eq!(profile.user_id().as_str(), "u1");
        assert_eq!(profile.hair_type(), HairType::Curly);
        assert_eq!(profile.hair_goals().as_slice(), &[HairGoal::Growth]);
    }

    #[test]
    fn hydrates_from_partial_row() {
        let row = HairProfileRow {
            hair_type: Some(HairType::Wavy),
            hair_goals: Some(vec![HairGoal::Shine].into()),
            hair_concerns: None,
            ..HairProfileRow::empty(SubjectId::from("u1"))
        };
        let draft = DraftProfile::from(&row);
        assert_eq!(draft.hair_type, Some(HairType::Wavy));
        assert_eq!(draft.hair_goals.as_slice(), &[HairGoal::Shine]);
        assert!(draft.chemical_treatments.is_empty());
        assert!(draft.gender.is_none());
    }
}
