//! Setup wizard state machine.
//!
//! Defines a pure state transition function for the hair profile wizard.

use serde::{Deserialize, Serialize};

use super::step::SetupStep;
use crate::errors::BackendError;
use crate::ids::SubjectId;
use crate::profile::{ChemicalTreatment, DraftProfile, HairGoal, MissingProfileField, ProfileField};

/// Save lifecycle of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardPhase {
    #[default]
    Editing,
    /// Upsert in flight. Edits and further finalize requests are ignored.
    Saving,
    Saved,
}

/// Wizard state.
///
/// 设置向导状态。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WizardState {
    /// Subject the draft belongs to. A draft never outlives its owner.
    pub owner: Option<SubjectId>,
    pub step: SetupStep,
    pub draft: DraftProfile,
    pub phase: WizardPhase,
    pub error: Option<WizardError>,
}

impl WizardState {
    pub fn progress_percent(&self) -> u8 {
        self.step.progress_percent()
    }

    pub fn is_saving(&self) -> bool {
        self.phase == WizardPhase::Saving
    }

    /// Continue is disabled on the goals screen until a goal is picked.
    pub fn can_continue(&self) -> bool {
        match self.step {
            SetupStep::Goals => !self.draft.hair_goals.is_empty(),
            SetupStep::Summary => false,
            _ => true,
        }
    }
}

/// Events that drive the wizard.
///
/// 驱动设置向导的事件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardEvent {
    /// Claim the wizard for a subject. A different subject, or a finished
    /// wizard, starts over from an empty draft.
    Bind { subject: Option<SubjectId> },
    /// Leave the intro screen.
    Start,
    /// Replace the draft with a stored row's answers.
    Hydrate { draft: DraftProfile },
    /// Record a single answer.
    Select(ProfileField),
    ToggleGoal(HairGoal),
    ToggleTreatment(ChemicalTreatment),
    Continue,
    Back,
    GoTo(SetupStep),
    Finalize,
    PersistSucceeded,
    PersistFailed { error: BackendError },
    Reset,
}

/// Side-effects produced by wizard transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardAction {
    /// Upsert the draft as the subject's profile.
    PersistProfile {
        owner: Option<SubjectId>,
        draft: DraftProfile,
    },
    /// Promote the session to complete and leave the setup zone.
    CompleteSession,
}

/// Wizard error types.
///
/// 设置向导错误类型。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum WizardError {
    #[error("select at least one hair goal to continue")]
    GoalsRequired,
    #[error("{0}")]
    MissingField(MissingProfileField),
    #[error("failed to save profile: {0}")]
    Persist(BackendError),
}

/// Pure wizard state machine.
///
/// 纯状态机：不包含副作用。
pub struct WizardStateMachine;

impl WizardStateMachine {
    pub fn transition(state: WizardState, event: WizardEvent) -> (WizardState, Vec<WizardAction>) {
        match (state.phase, event) {
            (_, WizardEvent::Reset) => (
                WizardState {
                    owner: state.owner,
                    ..WizardState::default()
                },
                Vec::new(),
            ),
            (WizardPhase::Saving, event @ WizardEvent::Bind { .. }) => Self::ignored(state, &event),
            (_, WizardEvent::Bind { subject }) => (Self::bind(state, subject), Vec::new()),
            (WizardPhase::Saving, WizardEvent::PersistSucceeded) => (
                WizardState {
                    draft: DraftProfile::default(),
                    phase: WizardPhase::Saved,
                    error: None,
                    ..state
                },
                vec![WizardAction::CompleteSession],
            ),
            (WizardPhase::Saving, WizardEvent::PersistFailed { error }) => (
                WizardState {
                    phase: WizardPhase::Editing,
                    error: Some(WizardError::Persist(error)),
                    ..state
                },
                Vec::new(),
            ),
            (WizardPhase::Editing, event) => Self::editing(state, event),
            (_, event) => Self::ignored(state, &event),
        }
    }

    fn bind(state: WizardState, subject: Option<SubjectId>) -> WizardState {
        if state.phase == WizardPhase::Editing && state.owner == subject {
            return state;
        }
        WizardState {
            owner: subject,
            ..WizardState::default()
        }
    }

    fn ignored(state: WizardState, event: &WizardEvent) -> (WizardState, Vec<WizardAction>) {
        #[cfg(feature = "tracing")]
        tracing::debug!(phase = ?state.phase, step = ?state.step, ?event, "wizard event ignored");
        #[cfg(not(feature = "tracing"))]
        let _ = event;
        (state, Vec::new())
    }

    fn editing(mut state: WizardState, event: WizardEvent) -> (WizardState, Vec<WizardAction>) {
        match event {
            WizardEvent::Start if state.step == SetupStep::Intro => {
                state.step = SetupStep::Gender;
                state.error = None;
            }
            WizardEvent::Hydrate { draft } => {
                state.draft = draft;
            }
            WizardEvent::Select(field) => {
                state.draft.apply(field);
                state.error = None;
                if state.step.advances_on_select() {
                    if let Some(next) = state.step.next() {
                        state.step = next;
                    }
                }
            }
            WizardEvent::ToggleGoal(goal) => {
                state.draft.toggle_goal(goal);
                if state.error == Some(WizardError::GoalsRequired) {
                    state.error = None;
                }
            }
            WizardEvent::ToggleTreatment(treatment) => {
                state.draft.toggle_treatment(treatment);
            }
            WizardEvent::Continue => {
                if state.step == SetupStep::Goals && state.draft.hair_goals.is_empty() {
                    state.error = Some(WizardError::GoalsRequired);
                } else if let Some(next) = state.step.next() {
                    state.step = next;
                    state.error = None;
                }
            }
            WizardEvent::Back => {
                if let Some(previous) = state.step.previous() {
                    state.step = previous;
                    state.error = None;
                }
            }
            WizardEvent::GoTo(target) => {
                if target > SetupStep::Goals && state.draft.hair_goals.is_empty() {
                    state.error = Some(WizardError::GoalsRequired);
                } else {
                    state.step = target;
                    state.error = None;
                }
            }
            WizardEvent::Finalize => {
                if let Some(missing) = state.draft.missing_fields().into_iter().next() {
                    state.error = Some(WizardError::MissingField(missing));
                    return (state, Vec::new());
                }
                state.phase = WizardPhase::Saving;
                state.error = None;
                let action = WizardAction::PersistProfile {
                    owner: state.owner.clone(),
                    draft: state.draft.clone(),
                };
                return (state, vec![action]);
            }
            WizardEvent::Start
            | WizardEvent::Bind { .. }
            | WizardEvent::PersistSucceeded
            | WizardEvent::PersistFailed { .. }
            | WizardEvent::Reset => {}
        }
        (state, Vec::new())
    }
}
