pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{apply_env_overrides, load_config, resolve_config_path};
pub use run::{run_app, RunSummary};
pub use wiring::{resolve_data_dir, wire_dependencies, BackendKind, WiredDependencies};
