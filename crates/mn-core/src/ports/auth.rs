//! Auth port
//!
//! Session operations of the hosted auth service. Errors are returned
//! unmodified so callers can map them to alert text.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::auth::{AuthChange, Email, SignUpMetadata, SignUpOutcome};
use crate::errors::BackendError;
use crate::security::SecretString;
use crate::session::Session;

#[async_trait]
pub trait AuthPort: Send + Sync {
    async fn sign_up(
        &self,
        email: &Email,
        password: &SecretString,
        metadata: &SignUpMetadata,
    ) -> Result<SignUpOutcome, BackendError>;

    async fn sign_in(&self, email: &Email, password: &SecretString) -> Result<Session, BackendError>;

    async fn sign_out(&self) -> Result<(), BackendError>;

    /// Session currently held by the client, if any.
    async fn current_session(&self) -> Result<Option<Session>, BackendError>;

    /// Send a password recovery email.
    async fn reset_password_for_email(&self, email: &Email) -> Result<(), BackendError>;

    /// Change the password of the signed-in user.
    async fn update_password(&self, password: &SecretString) -> Result<(), BackendError>;

    /// Push notifications for session changes made by the backend.
    fn subscribe(&self) -> broadcast::Receiver<AuthChange>;
}
