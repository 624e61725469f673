use std::fmt;

use serde::{Deserialize, Serialize};

use crate::setup::SetupStep;

/// Route zone. Exactly one is active at a time.
///
/// 路由区域。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteZone {
    Auth,
    Setup,
    Protected,
}

impl RouteZone {
    /// Route a redirect into this zone lands on.
    pub fn entry_route(self) -> Route {
        match self {
            RouteZone::Auth => Route::Launch,
            RouteZone::Setup => Route::Setup(SetupStep::Intro),
            RouteZone::Protected => Route::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "route", content = "step")]
pub enum Route {
    Launch,
    Onboarding,
    Welcome,
    SignIn,
    SignUp,
    ForgotPassword,
    Setup(SetupStep),
    Home,
    Routine,
    Community,
    Profile,
    Advisor,
}

const SETUP_PREFIX: &str = "/setup";
const PROTECTED_PREFIX: &str = "/(protected)";
const APP_GROUP_PREFIX: &str = "/(app)";

impl Route {
    pub fn zone(&self) -> RouteZone {
        match self {
            Route::Launch
            | Route::Onboarding
            | Route::Welcome
            | Route::SignIn
            | Route::SignUp
            | Route::ForgotPassword => RouteZone::Auth,
            Route::Setup(_) => RouteZone::Setup,
            Route::Home | Route::Routine | Route::Community | Route::Profile | Route::Advisor => {
                RouteZone::Protected
            }
        }
    }

    /// Splash routes are never force-redirected.
    pub fn is_redirect_exempt(&self) -> bool {
        matches!(self, Route::Launch | Route::Onboarding)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Launch => "/launch".to_string(),
            Route::Onboarding => "/onboarding".to_string(),
            Route::Welcome => "/welcome".to_string(),
            Route::SignIn => "/sign-in".to_string(),
            Route::SignUp => "/sign-up".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::Setup(SetupStep::Intro) => SETUP_PREFIX.to_string(),
            Route::Setup(step) => format!("{SETUP_PREFIX}/{}", step.slug()),
            Route::Home => PROTECTED_PREFIX.to_string(),
            Route::Routine => format!("{PROTECTED_PREFIX}/routine"),
            Route::Community => format!("{PROTECTED_PREFIX}/community"),
            Route::Profile => format!("{PROTECTED_PREFIX}/profile"),
            Route::Advisor => format!("{PROTECTED_PREFIX}/advisor"),
        }
    }

    /// Parse a route path. Accepts an optional `/(app)` group prefix and a
    /// trailing slash.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.trim();
        let path = path.strip_prefix(APP_GROUP_PREFIX).unwrap_or(path);
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        if let Some(rest) = path.strip_prefix(SETUP_PREFIX) {
            return match rest {
                "" => Some(Route::Setup(SetupStep::Intro)),
                _ => rest
                    .strip_prefix('/')
                    .filter(|slug| !slug.is_empty())
                    .and_then(SetupStep::from_slug)
                    .map(Route::Setup),
            };
        }

        if let Some(rest) = path.strip_prefix(PROTECTED_PREFIX) {
            return match rest {
                "" | "/index" | "/home" => Some(Route::Home),
                "/routine" => Some(Route::Routine),
                "/community" => Some(Route::Community),
                "/profile" => Some(Route::Profile),
                "/advisor" => Some(Route::Advisor),
                _ => None,
            };
        }

        match path {
            "/launch" => Some(Route::Launch),
            "/onboarding" => Some(Route::Onboarding),
            "/welcome" => Some(Route::Welcome),
            "/sign-in" => Some(Route::SignIn),
            "/sign-up" => Some(Route::SignUp),
            "/forgot-password" => Some(Route::ForgotPassword),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
