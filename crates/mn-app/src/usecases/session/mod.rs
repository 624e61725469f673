pub mod context;
mod loading;
pub mod router;

pub use context::SessionContext;
pub use loading::{LoadingFlag, LoadingGuard};
pub use router::SessionRouter;
