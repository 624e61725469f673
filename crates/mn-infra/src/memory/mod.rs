//! In-process backend.
//!
//! Implements both backend ports over plain maps so the use cases can run
//! without a hosted project: offline runs of the binary and the
//! end-to-end tests in `mn-app`.

mod backend;

pub use backend::InMemoryBackend;
