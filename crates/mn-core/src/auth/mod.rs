//! Authentication domain: credentials, form validation and backend auth events.

mod change;
mod email;
mod forms;

pub use change::{AuthChange, SignUpMetadata, SignUpOutcome};
pub use email::{Email, EmailError};
pub use forms::{
    FieldError, FormField, ForgotPasswordForm, SignInForm, SignUpForm, UpdatePasswordForm,
    ValidatedSignIn, ValidatedSignUp, MAX_PASSWORD_LEN, MAX_USERNAME_LEN, MIN_PASSWORD_LEN,
};
