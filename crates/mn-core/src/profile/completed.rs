use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::age::Age;
use super::goals::HairGoals;
use super::kinds::{ChemicalTreatment, Gender, HairType, ProductPreference, RoutineIntensity};
use crate::ids::SubjectId;

/// Required field absent from a draft at finalize time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingProfileField {
    #[error("hair type is required")]
    HairType,
    #[error("at least one hair goal is required")]
    HairGoals,
}

/// Finalize payload written as a single upsert keyed by `user_id`.
///
/// Only [`DraftProfile::complete`](super::DraftProfile::complete) builds one,
/// so the required fields are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedProfile {
    pub(super) user_id: SubjectId,
    pub(super) hair_type: HairType,
    pub(super) hair_goals: HairGoals,
    pub(super) hair_concerns: Vec<ChemicalTreatment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) age: Option<Age>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) routine_preference: Option<RoutineIntensity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) product_preference: Option<ProductPreference>,
    pub(super) updated_at: DateTime<Utc>,
}

impl CompletedProfile {
    pub fn user_id(&self) -> &SubjectId {
        &self.user_id
    }

    pub fn hair_type(&self) -> HairType {
        self.hair_type
    }

    pub fn hair_goals(&self) -> &HairGoals {
        &self.hair_goals
    }

    pub fn hair_concerns(&self) -> &[ChemicalTreatment] {
        &self.hair_concerns
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Merge this payload over an existing row, the way the backend upsert
    /// resolves a conflict on `user_id`.
    pub fn merge_into(&self, existing: Option<HairProfileRow>) -> HairProfileRow {
        let mut row = existing.unwrap_or_else(|| HairProfileRow::empty(self.user_id.clone()));
        row.user_id = self.user_id.clone();
        row.hair_type = Some(self.hair_type);
        row.hair_goals = Some(self.hair_goals.clone());
        row.hair_concerns = Some(self.hair_concerns.clone());
        row.gender = self.gender.or(row.gender);
        row.age = self.age.or(row.age);
        row.routine_preference = self.routine_preference.or(row.routine_preference);
        row.product_preference = self.product_preference.or(row.product_preference);
        row.created_at = row.created_at.or(Some(self.updated_at));
        row.updated_at = Some(self.updated_at);
        row
    }
}

/// Stored profile row as read back from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HairProfileRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: SubjectId,
    #[serde(default)]
    pub hair_type: Option<HairType>,
    #[serde(default)]
    pub hair_goals: Option<HairGoals>,
    #[serde(default)]
    pub hair_concerns: Option<Vec<ChemicalTreatment>>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub age: Option<Age>,
    #[serde(default)]
    pub routine_preference: Option<RoutineIntensity>,
    #[serde(default)]
    pub product_preference: Option<ProductPreference>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl HairProfileRow {
    pub fn empty(user_id: SubjectId) -> Self {
        Self {
            id: None,
            user_id,
            hair_type: None,
            hair_goals: None,
            hair_concerns: None,
            gender: None,
            age: None,
            routine_preference: None,
            product_preference: None,
            created_at: None,
            updated_at: None,
        }
    }
}
