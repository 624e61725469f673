pub mod context;
pub mod wizard;

pub use context::SetupContext;
pub use wizard::{SetupWizard, SetupWizardError};
