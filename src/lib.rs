//! Mena composition root.
//!
//! Loads configuration, initializes tracing and wires the `mn-infra`
//! adapters into the `mn-app` use cases.

pub mod bootstrap;
