//! Supabase-compatible backend adapter.
//!
//! Auth goes through the GoTrue endpoints under `/auth/v1`, profile rows
//! through PostgREST under `/rest/v1`. Both adapters share one
//! [`SupabaseClient`], which holds the HTTP client and the current session
//! tokens.

mod auth;
mod client;
mod error;
mod profiles;

pub use auth::SupabaseAuth;
pub use client::{SupabaseClient, SupabaseConfig};
pub use profiles::SupabaseProfileRepository;
