//! Setup wizard domain module.
//!
//! Step sequence and the pure wizard state machine.

pub mod state_machine;
mod step;

pub use state_machine::{WizardAction, WizardError, WizardEvent, WizardPhase, WizardState, WizardStateMachine};
pub use step::SetupStep;
