mod dispatch;
pub mod forms;
pub mod launch;
pub mod session;
pub mod setup;

pub use dispatch::DispatchContext;
pub use forms::{AuthForms, FormFailure};
pub use launch::{CompleteOnboarding, ResolveLaunchRoute};
pub use session::{SessionContext, SessionRouter};
pub use setup::{SetupContext, SetupWizard, SetupWizardError};
