use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Session change pushed by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChange {
    /// A session was issued (sign-in, or sign-up with immediate session).
    SignedIn(Session),
    /// The session was renewed for the same subject.
    Refreshed(Session),
    /// The user signed out.
    SignedOut,
    /// The session expired and could not be renewed.
    Expired,
}

/// Extra user metadata sent with a sign-up request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpMetadata {
    pub username: String,
}

/// Result of a successful sign-up call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The backend issued a session right away.
    SessionIssued(Session),
    /// The account exists but the email must be confirmed before a session is issued.
    ConfirmationRequired,
}
