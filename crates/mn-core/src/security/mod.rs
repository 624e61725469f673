//! Secret handling.

mod secret;

pub use secret::SecretString;
