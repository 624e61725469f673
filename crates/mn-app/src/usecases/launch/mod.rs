mod complete_onboarding;
mod resolve_route;

pub use complete_onboarding::CompleteOnboarding;
pub use resolve_route::ResolveLaunchRoute;
