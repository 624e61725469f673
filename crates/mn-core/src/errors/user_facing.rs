use super::BackendError;

/// Fallback alert text for errors without a usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Map a backend error to the text shown in an alert.
///
/// Raw backend strings are only shown when no rule below matches.
pub fn user_facing_message(error: &BackendError) -> String {
    let message = error.message();

    match error.code() {
        Some("23505") => return "This item already exists.".to_string(),
        Some("P0001") => {
            return "Unable to perform this action due to a policy restriction.".to_string()
        }
        _ => {}
    }

    if message.contains("duplicate key") || message.contains("already exists") {
        return "This email is already in use. Please try another one.".to_string();
    }

    if message.to_lowercase().contains("invalid login") {
        return "Invalid email or password. Please try again.".to_string();
    }

    if message.contains("password") {
        return "Password must be at least 6 characters.".to_string();
    }

    if message.trim().is_empty() {
        return GENERIC_FAILURE_MESSAGE.to_string();
    }

    message.to_string()
}
