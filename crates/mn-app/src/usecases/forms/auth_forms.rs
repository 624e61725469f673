//! Auth form submission.
//!
//! Validates form input before any backend call, then goes through the
//! session router. Backend failures come back as alert text.

use std::sync::Arc;

use mn_core::auth::{
    FieldError, ForgotPasswordForm, SignInForm, SignUpForm, SignUpOutcome, UpdatePasswordForm,
};
use mn_core::errors::user_facing_message;
use mn_core::{BackendError, SessionState};
use tracing::info;

use crate::usecases::session::SessionRouter;

const SIGN_UP_FAILED: &str = "Sign Up Failed";
const SIGN_IN_FAILED: &str = "Sign In Failed";
const RESET_FAILED: &str = "Password Reset Failed";
const UPDATE_FAILED: &str = "Password Update Failed";
const SIGN_OUT_FAILED: &str = "Sign Out Failed";

/// Why a form submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormFailure {
    /// Inline errors, one per failing field. The backend was not called.
    Invalid(Vec<FieldError>),
    /// Backend rejected the request.
    Alert { title: String, message: String },
}

impl FormFailure {
    fn alert(title: &str, err: &BackendError) -> Self {
        Self::Alert {
            title: title.to_string(),
            message: user_facing_message(err),
        }
    }
}

pub struct AuthForms {
    router: Arc<SessionRouter>,
}

impl AuthForms {
    pub fn new(router: Arc<SessionRouter>) -> Self {
        Self { router }
    }

    pub async fn sign_up(&self, form: SignUpForm) -> Result<SignUpOutcome, FormFailure> {
        let input = form.validate().map_err(FormFailure::Invalid)?;
        let outcome = self
            .router
            .sign_up(&input.email, &input.password, &input.username)
            .await
            .map_err(|err| FormFailure::alert(SIGN_UP_FAILED, &err))?;
        if outcome == SignUpOutcome::ConfirmationRequired {
            info!("verification email sent");
        }
        Ok(outcome)
    }

    pub async fn sign_in(&self, form: SignInForm) -> Result<SessionState, FormFailure> {
        let input = form.validate().map_err(FormFailure::Invalid)?;
        self.router
            .sign_in(&input.email, &input.password)
            .await
            .map_err(|err| FormFailure::alert(SIGN_IN_FAILED, &err))
    }

    pub async fn forgot_password(&self, form: ForgotPasswordForm) -> Result<(), FormFailure> {
        let email = form.validate().map_err(FormFailure::Invalid)?;
        self.router
            .reset_password(&email)
            .await
            .map_err(|err| FormFailure::alert(RESET_FAILED, &err))
    }

    pub async fn update_password(&self, form: UpdatePasswordForm) -> Result<(), FormFailure> {
        let password = form.validate().map_err(FormFailure::Invalid)?;
        self.router
            .update_password(&password)
            .await
            .map_err(|err| FormFailure::alert(UPDATE_FAILED, &err))
    }

    pub async fn sign_out(&self) -> Result<(), FormFailure> {
        self.router
            .sign_out()
            .await
            .map_err(|err| FormFailure::alert(SIGN_OUT_FAILED, &err))
    }
}
