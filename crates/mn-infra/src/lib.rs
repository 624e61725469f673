//! Infrastructure adapters for the `mn-core` ports.
//!
//! - `supabase`: hosted auth service and profile rows over HTTP
//! - `memory`: in-process backend for tests and offline runs
//! - `launch_flag`: first-launch flag stored as a JSON file
//! - `navigation`: navigation port that records and logs routes
//! - `time`: system clock

pub mod launch_flag;
pub mod memory;
pub mod navigation;
pub mod supabase;
pub mod time;

pub use launch_flag::FileLaunchFlagRepository;
pub use memory::InMemoryBackend;
pub use navigation::RecordingNavigator;
pub use supabase::{SupabaseAuth, SupabaseClient, SupabaseConfig, SupabaseProfileRepository};
pub use time::SystemClock;
