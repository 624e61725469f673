use serde::{Deserialize, Serialize};

/// Setup screens in the order the wizard visits them.
///
/// 设置向导页面（按顺序）。
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SetupStep {
    /// Setup entry screen.
    #[default]
    Intro,
    Gender,
    Age,
    HairType,
    ChemicalHistory,
    Goals,
    RoutinePreferences,
    /// Summary review and finalize.
    Summary,
}

impl SetupStep {
    pub const ALL: [SetupStep; 8] = [
        SetupStep::Intro,
        SetupStep::Gender,
        SetupStep::Age,
        SetupStep::HairType,
        SetupStep::ChemicalHistory,
        SetupStep::Goals,
        SetupStep::RoutinePreferences,
        SetupStep::Summary,
    ];

    /// Number of steps after the intro screen.
    pub const TOTAL: usize = Self::ALL.len() - 1;

    pub fn position(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<SetupStep> {
        Self::ALL.get(self.position() + 1).copied()
    }

    pub fn previous(self) -> Option<SetupStep> {
        self.position()
            .checked_sub(1)
            .and_then(|pos| Self::ALL.get(pos).copied())
    }

    /// Progress percentage for the indicator, rounded to the nearest integer.
    pub fn progress_percent(self) -> u8 {
        ((self.position() * 100 + Self::TOTAL / 2) / Self::TOTAL) as u8
    }

    /// Screens that advance as soon as an answer is picked.
    pub fn advances_on_select(self) -> bool {
        matches!(self, SetupStep::Gender | SetupStep::Age | SetupStep::HairType)
    }

    /// Route segment under `/setup`. The intro screen is the bare prefix.
    pub fn slug(self) -> &'static str {
        match self {
            SetupStep::Intro => "",
            SetupStep::Gender => "gender",
            SetupStep::Age => "age",
            SetupStep::HairType => "hair-type",
            SetupStep::ChemicalHistory => "hair-concerns",
            SetupStep::Goals => "hair-goals",
            SetupStep::RoutinePreferences => "routine-preferences",
            SetupStep::Summary => "complete",
        }
    }

    pub fn from_slug(slug: &str) -> Option<SetupStep> {
        Self::ALL.iter().copied().find(|step| step.slug() == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_monotonic_and_bounded() {
        let values: Vec<u8> = SetupStep::ALL.iter().map(|s| s.progress_percent()).collect();
        assert_eq!(values.first(), Some(&0));
        assert_eq!(values.last(), Some(&100));
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn next_and_previous_walk_the_sequence() {
        assert_eq!(SetupStep::Intro.next(), Some(SetupStep::Gender));
        assert_eq!(SetupStep::Goals.next(), Some(SetupStep::RoutinePreferences));
        assert_eq!(SetupStep::Summary.next(), None);
        assert_eq!(SetupStep::Intro.previous(), None);
        assert_eq!(SetupStep::Gender.previous(), Some(SetupStep::Intro));
    }

    #[test]
    fn slugs_round_trip() {
        for step in SetupStep::ALL {
            assert_eq!(SetupStep::from_slug(step.slug()), Some(step));
        }
        assert_eq!(SetupStep::from_slug("image-assessment"), None);
    }
}
