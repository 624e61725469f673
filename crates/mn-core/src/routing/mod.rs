//! Route model and the redirect policy between route zones.

mod policy;
mod route;

pub use policy::RedirectPolicy;
pub use route::{Route, RouteZone};
