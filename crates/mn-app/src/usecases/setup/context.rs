use mn_core::WizardState;

use crate::usecases::dispatch::DispatchContext;

/// Wizard state cell. Starts at the intro step with an empty draft.
pub type SetupContext = DispatchContext<WizardState>;
