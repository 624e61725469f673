use super::route::{Route, RouteZone};
use crate::session::SessionState;

/// Redirect policy between the auth, setup and protected zones.
///
/// Evaluated after every state transition and every route change. A
/// redirect always lands on a zone entry route, and evaluating again from
/// that route yields `None`.
pub struct RedirectPolicy;

impl RedirectPolicy {
    /// Zone the state belongs in.
    pub fn target_zone(state: &SessionState) -> RouteZone {
        match state {
            SessionState::Unauthenticated => RouteZone::Auth,
            SessionState::AuthenticatedNewUser { .. } => RouteZone::Setup,
            SessionState::AuthenticatedComplete { .. } => RouteZone::Protected,
        }
    }

    /// Route to replace `current` with, if any.
    pub fn evaluate(state: &SessionState, current: &Route) -> Option<Route> {
        if current.is_redirect_exempt() {
            return None;
        }
        let zone = current.zone();
        let redirect = match state {
            SessionState::Unauthenticated => zone != RouteZone::Auth,
            // Authenticated users are left alone in either setup or
            // protected; only the auth zone pushes them on.
            SessionState::AuthenticatedNewUser { .. }
            | SessionState::AuthenticatedComplete { .. } => zone == RouteZone::Auth,
        };
        redirect.then(|| Self::target_zone(state).entry_route())
    }
}
