//! Mena application layer
//!
//! Use cases and orchestrators on top of the `mn-core` ports: the session
//! router, the setup wizard, the launch gate and auth form submission.

pub mod app;
pub mod deps;
pub mod usecases;

pub use app::App;
pub use deps::AppDeps;
pub use usecases::{
    AuthForms, CompleteOnboarding, FormFailure, ResolveLaunchRoute, SessionRouter, SetupWizard,
    SetupWizardError,
};
