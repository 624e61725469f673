//! # mn-core
//!
//! Core domain models and business logic for Mena.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the session and setup state machines, the redirect policy, the hair profile
//! model, and the ports that adapters implement.

// Public module exports
pub mod auth;
pub mod config;
pub mod errors;
pub mod ids;
pub mod launch;
pub mod ports;
pub mod profile;
pub mod routing;
pub mod security;
pub mod session;
pub mod setup;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use errors::BackendError;
pub use ids::SubjectId;
pub use profile::{CompletedProfile, DraftProfile, HairGoals, HairProfileRow};
pub use routing::{RedirectPolicy, Route, RouteZone};
pub use session::{Session, SessionEvent, SessionState, SessionStateMachine};
pub use launch::LaunchState;
pub use setup::{
    SetupStep, WizardAction, WizardError, WizardEvent, WizardPhase, WizardState, WizardStateMachine,
};
