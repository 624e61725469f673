//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `mn-app` and the
//! adapters in `mn-infra`. The backend collaborator is split into an auth
//! port and a profile row port; local storage, navigation and time each get
//! their own.

mod auth;
mod clock;
mod launch_flag;
mod navigation;
mod profile_repository;

pub use auth::AuthPort;
pub use clock::*;
pub use launch_flag::LaunchFlagPort;
pub use navigation::NavigationPort;
pub use profile_repository::ProfileRepositoryPort;

#[cfg(test)]
pub use profile_repository::MockProfileRepository;
