//! Auth form validation.
//!
//! Every rule runs before the backend is called, and every failing field is
//! reported together so a screen can show inline errors in one pass.

use serde::Serialize;

use super::email::Email;
use crate::security::SecretString;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 64;
pub const MAX_USERNAME_LEN: usize = 32;

/// Form input a validation error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Email,
    Password,
    ConfirmPassword,
    Username,
}

/// Inline validation error for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    fn new(field: FormField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Raw sign-up form input.
#[derive(Debug)]
pub struct SignUpForm {
    pub email: String,
    pub username: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

/// Sign-up input that passed validation.
#[derive(Debug)]
pub struct ValidatedSignUp {
    pub email: Email,
    pub username: String,
    pub password: SecretString,
}

impl SignUpForm {
    pub fn validate(self) -> Result<ValidatedSignUp, Vec<FieldError>> {
        let mut errors = Vec::new();

        let email = match Email::parse(&self.email) {
            Ok(email) => Some(email),
            Err(_) => {
                errors.push(FieldError::new(
                    FormField::Email,
                    "Please enter a valid email address",
                ));
                None
            }
        };

        let username = self.username.trim().to_string();
        if username.is_empty() {
            errors.push(FieldError::new(FormField::Username, "Username is required"));
        } else if username.chars().count() > MAX_USERNAME_LEN {
            errors.push(FieldError::new(
                FormField::Username,
                "Username must be at most 32 characters",
            ));
        }

        if let Some(message) = password_policy_violation(self.password.expose()) {
            errors.push(FieldError::new(FormField::Password, message));
        }

        if self.confirm_password.is_empty() {
            errors.push(FieldError::new(
                FormField::ConfirmPassword,
                "Please confirm your password",
            ));
        } else if self.confirm_password.expose() != self.password.expose() {
            errors.push(FieldError::new(
                FormField::ConfirmPassword,
                "Passwords do not match",
            ));
        }

        match email {
            Some(email) if errors.is_empty() => Ok(ValidatedSignUp {
                email,
                username,
                password: self.password,
            }),
            _ => Err(errors),
        }
    }
}

/// Raw sign-in form input.
#[derive(Debug)]
pub struct SignInForm {
    pub email: String,
    pub password: SecretString,
}

/// Sign-in input that passed validation.
#[derive(Debug)]
pub struct ValidatedSignIn {
    pub email: Email,
    pub password: SecretString,
}

impl SignInForm {
    pub fn validate(self) -> Result<ValidatedSignIn, Vec<FieldError>> {
        let mut errors = Vec::new();

        let email = Email::parse(&self.email).ok();
        if email.is_none() {
            errors.push(FieldError::new(
                FormField::Email,
                "Please enter a valid email address",
            ));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new(FormField::Password, "Password is required"));
        }

        match email {
            Some(email) if errors.is_empty() => Ok(ValidatedSignIn {
                email,
                password: self.password,
            }),
            _ => Err(errors),
        }
    }
}

/// Forgot-password form input.
#[derive(Debug, Clone)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn validate(self) -> Result<Email, Vec<FieldError>> {
        Email::parse(&self.email).map_err(|_| {
            vec![FieldError::new(
                FormField::Email,
                "Please enter a valid email address",
            )]
        })
    }
}

/// New-password form input (signed-in password change).
#[derive(Debug)]
pub struct UpdatePasswordForm {
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl UpdatePasswordForm {
    pub fn validate(self) -> Result<SecretString, Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Some(message) = password_policy_violation(self.password.expose()) {
            errors.push(FieldError::new(FormField::Password, message));
        }
        if self.confirm_password.expose() != self.password.expose() {
            errors.push(FieldError::new(
                FormField::ConfirmPassword,
                "Passwords do not match",
            ));
        }
        if errors.is_empty() {
            Ok(self.password)
        } else {
            Err(errors)
        }
    }
}

/// First password rule the candidate breaks, if any.
fn password_policy_violation(password: &str) -> Option<&'static str> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Some("Password must be at least 8 characters");
    }
    if len > MAX_PASSWORD_LEN {
        return Some("Password must be less than 64 characters");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Some("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some("Password must contain at least one number");
    }
    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some("Password must contain at least one special character");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up(email: &str, username: &str, password: &str, confirm: &str) -> SignUpForm {
        SignUpForm {
            email: email.to_string(),
            username: username.to_string(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<FormField> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn valid_sign_up_passes() {
        let validated = sign_up("test@example.com", "curlgirl", "ValidPass1!", "ValidPass1!")
            .validate()
            .unwrap();
        assert_eq!(validated.email.as_str(), "test@example.com");
        assert_eq!(validated.username, "curlgirl");
        assert_eq!(validated.password.expose(), "ValidPass1!");
    }

    #[test]
    fn sign_up_reports_every_failing_field() {
        let errors = sign_up("nope", "  ", "short", "different")
            .validate()
            .unwrap_err();
        assert_eq!(
            fields(&errors),
            vec![
                FormField::Email,
                FormField::Username,
                FormField::Password,
                FormField::ConfirmPassword
            ]
        );
    }

    #[test]
    fn password_policy_rules_in_order() {
        assert_eq!(
            password_policy_violation("Ab1!"),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(
            password_policy_violation("ABCDEFG1!"),
            Some("Password must contain at least one lowercase letter")
        );
        assert_eq!(
            password_policy_violation("abcdefg1!"),
            Some("Password must contain at least one uppercase letter")
        );
        assert_eq!(
            password_policy_violation("Abcdefgh!"),
            Some("Password must contain at least one number")
        );
        assert_eq!(
            password_policy_violation("Abcdefgh1"),
            Some("Password must contain at least one special character")
        );
        assert_eq!(password_policy_violation("ValidPass1!"), None);
        let long = format!("Aa1!{}", "x".repeat(61));
        assert_eq!(
            password_policy_violation(&long),
            Some("Password must be less than 64 characters")
        );
    }

    #[test]
    fn empty_confirmation_asks_for_confirmation() {
        let errors = sign_up("test@example.com", "user", "ValidPass1!", "")
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, FormField::ConfirmPassword);
        assert_eq!(errors[0].message, "Please confirm your password");
    }

    #[test]
    fn sign_in_requires_email_and_password() {
        let errors = SignInForm {
            email: "bad".into(),
            password: "".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(fields(&errors), vec![FormField::Email, FormField::Password]);

        let ok = SignInForm {
            email: "test@example.com".into(),
            password: "anything".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(ok.email.as_str(), "test@example.com");
    }

    #[test]
    fn forgot_password_validates_email_only() {
        assert!(ForgotPasswordForm {
            email: "test@example.com".into()
        }
        .validate()
        .is_ok());
        let errors = ForgotPasswordForm {
            email: "test@".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors[0].field, FormField::Email);
    }

    #[test]
    fn update_password_applies_policy_and_confirmation() {
        let errors = UpdatePasswordForm {
            password: "ValidPass1!".into(),
            confirm_password: "ValidPass2!".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(fields(&errors), vec![FormField::ConfirmPassword]);

        let password = UpdatePasswordForm {
            password: "ValidPass1!".into(),
            confirm_password: "ValidPass1!".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(password.expose(), "ValidPass1!");
    }
}
