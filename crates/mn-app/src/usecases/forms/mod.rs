mod auth_forms;

pub use auth_forms::{AuthForms, FormFailure};
