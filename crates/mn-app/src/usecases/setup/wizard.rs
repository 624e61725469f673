//! Setup wizard orchestrator.
//!
//! Drives the wizard state machine and its side effects: the profile upsert,
//! the session promotion and step navigation.

use std::sync::Arc;

use tracing::{debug, error, info, info_span, warn, Instrument};

use mn_core::{
    ports::{ClockPort, NavigationPort, ProfileRepositoryPort},
    profile::{ChemicalTreatment, DraftProfile, HairGoal, MissingProfileField, ProfileField},
    BackendError, Route, SubjectId, SetupStep, WizardAction, WizardError, WizardEvent, WizardPhase,
    WizardState, WizardStateMachine,
};

use super::context::SetupContext;
use crate::usecases::session::SessionRouter;

/// Errors produced by the setup wizard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupWizardError {
    #[error("profile is incomplete: {0}")]
    Incomplete(MissingProfileField),
    #[error("failed to save profile: {0}")]
    Persist(#[from] BackendError),
}

/// Orchestrator that drives wizard state and side effects.
pub struct SetupWizard {
    context: Arc<SetupContext>,
    router: Arc<SessionRouter>,
    profiles: Arc<dyn ProfileRepositoryPort>,
    navigation: Arc<dyn NavigationPort>,
    clock: Arc<dyn ClockPort>,
}

impl SetupWizard {
    pub fn new(
        router: Arc<SessionRouter>,
        profiles: Arc<dyn ProfileRepositoryPort>,
        navigation: Arc<dyn NavigationPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            context: SetupContext::default().arc(),
            router,
            profiles,
            navigation,
            clock,
        }
    }

    pub async fn state(&self) -> WizardState {
        self.context.get_state().await
    }

    pub async fn progress_percent(&self) -> u8 {
        self.context.get_state().await.progress_percent()
    }

    /// Claim the wizard for the current subject, then hydrate the draft from
    /// the subject's stored row if one exists.
    ///
    /// A draft left by another subject, or by a finished setup, is discarded.
    /// A failed read keeps the empty draft.
    pub async fn load(&self) -> WizardState {
        let Some(subject) = self.router.subject().await else {
            return self.context.get_state().await;
        };
        let state = self
            .dispatch(WizardEvent::Bind {
                subject: Some(subject.clone()),
            })
            .await;

        match self.profiles.find_by_subject(&subject).await {
            Ok(Some(row)) => {
                debug!(subject = %subject, "hydrating setup draft from stored profile");
                self.dispatch(WizardEvent::Hydrate {
                    draft: DraftProfile::from(&row),
                })
                .await
            }
            Ok(None) => state,
            Err(err) => {
                warn!(error = %err, subject = %subject, "failed to load stored profile for setup");
                state
            }
        }
    }

    pub async fn start(&self) -> WizardState {
        self.dispatch(WizardEvent::Start).await
    }

    /// Merge one answer into the draft.
    pub async fn update_field(&self, field: ProfileField) -> WizardState {
        self.dispatch(WizardEvent::Select(field)).await
    }

    pub async fn toggle_goal(&self, goal: HairGoal) -> WizardState {
        self.dispatch(WizardEvent::ToggleGoal(goal)).await
    }

    pub async fn toggle_treatment(&self, treatment: ChemicalTreatment) -> WizardState {
        self.dispatch(WizardEvent::ToggleTreatment(treatment)).await
    }

    pub async fn next(&self) -> WizardState {
        self.dispatch(WizardEvent::Continue).await
    }

    pub async fn back(&self) -> WizardState {
        self.dispatch(WizardEvent::Back).await
    }

    pub async fn go_to(&self, step: SetupStep) -> WizardState {
        self.dispatch(WizardEvent::GoTo(step)).await
    }

    /// Start setup fresh.
    pub async fn reset_draft(&self) -> WizardState {
        self.dispatch(WizardEvent::Reset).await
    }

    /// Persist the draft as one upsert and promote the session.
    ///
    /// On failure the draft is left intact and the backend error returned.
    pub async fn finalize(&self) -> Result<WizardState, SetupWizardError> {
        let state = self.dispatch(WizardEvent::Finalize).await;
        if state.phase != WizardPhase::Editing {
            return Ok(state);
        }
        match &state.error {
            Some(WizardError::MissingField(field)) => Err(SetupWizardError::Incomplete(*field)),
            Some(WizardError::Persist(err)) => Err(SetupWizardError::Persist(err.clone())),
            _ => Ok(state),
        }
    }

    async fn dispatch(&self, event: WizardEvent) -> WizardState {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!("usecase.setup_wizard.dispatch", event = ?event);
        async {
            let mut current = self.context.get_state().await;
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let from_step = current.step;
                let from_phase = current.phase;
                let event_name = format!("{:?}", event);
                let (next, actions) = WizardStateMachine::transition(current, event);
                info!(
                    from_step = ?from_step,
                    to_step = ?next.step,
                    from_phase = ?from_phase,
                    to_phase = ?next.phase,
                    event = %event_name,
                    "setup wizard transition"
                );
                self.context.set_state(next.clone()).await;
                if next.step != from_step {
                    self.navigate_to_step(from_step, next.step).await;
                }
                let follow_up_events = self.execute_actions(actions).await;
                current = next;
                pending_events.extend(follow_up_events);
            }

            current
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(&self, actions: Vec<WizardAction>) -> Vec<WizardEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "setup wizard executing action");
            match action {
                WizardAction::PersistProfile { owner, draft } => {
                    let event = match self.persist(owner.as_ref(), &draft).await {
                        Ok(()) => WizardEvent::PersistSucceeded,
                        Err(error) => {
                            error!(error = %error, "setup wizard failed to persist profile");
                            WizardEvent::PersistFailed { error }
                        }
                    };
                    follow_up_events.push(event);
                }
                WizardAction::CompleteSession => {
                    let state = self.router.complete_setup().await;
                    debug!(state = state.as_str(), "setup wizard action CompleteSession completed");
                }
            }
        }
        follow_up_events
    }

    async fn persist(
        &self,
        owner: Option<&SubjectId>,
        draft: &DraftProfile,
    ) -> Result<(), BackendError> {
        let subject = self
            .router
            .subject()
            .await
            .ok_or_else(|| BackendError::auth("No active session"))?;
        if owner.is_some_and(|owner| *owner != subject) {
            return Err(BackendError::auth("Setup draft belongs to another session"));
        }
        let updated_at = self.clock.now();
        let profile = draft.complete(subject, updated_at).map_err(|missing| {
            BackendError::Unexpected(format!("draft lost a required field: {missing}"))
        })?;

        let row = self.profiles.upsert(&profile).await?;
        info!(subject = %row.user_id, "hair profile saved");
        Ok(())
    }

    async fn navigate_to_step(&self, from: SetupStep, to: SetupStep) {
        let route = Route::Setup(to);
        if to > from {
            self.navigation.push(&route);
        } else {
            self.navigation.replace(&route);
        }
        self.router.route_changed(route).await;
    }
}
