//! Application facade wiring use cases from [`AppDeps`].

use std::sync::Arc;

use crate::deps::AppDeps;
use crate::usecases::{
    AuthForms, CompleteOnboarding, ResolveLaunchRoute, SessionRouter, SetupWizard,
};

/// Owns the long-lived orchestrators. Screens hold an `Arc<App>` and call
/// into it; nothing here is global.
pub struct App {
    pub router: Arc<SessionRouter>,
    pub wizard: Arc<SetupWizard>,
    pub forms: AuthForms,
    pub resolve_launch_route: ResolveLaunchRoute,
    pub complete_onboarding: CompleteOnboarding,
}

impl App {
    pub fn new(deps: AppDeps) -> Self {
        let router = Arc::new(SessionRouter::new(
            deps.auth.clone(),
            deps.profiles.clone(),
            deps.navigation.clone(),
            deps.clock.clone(),
        ));
        let wizard = Arc::new(SetupWizard::new(
            router.clone(),
            deps.profiles.clone(),
            deps.navigation.clone(),
            deps.clock.clone(),
        ));

        Self {
            forms: AuthForms::new(router.clone()),
            resolve_launch_route: ResolveLaunchRoute::from_ports(deps.launch_flag.clone()),
            complete_onboarding: CompleteOnboarding::from_ports(deps.launch_flag),
            router,
            wizard,
        }
    }
}
