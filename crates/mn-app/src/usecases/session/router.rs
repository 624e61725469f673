//! Session router.
//!
//! Owns the session state, runs the pure reducer for every auth change, and
//! applies the redirect policy against the route the shell is showing.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use mn_core::{
    auth::{AuthChange, Email, SignUpMetadata, SignUpOutcome},
    ports::{AuthPort, ClockPort, NavigationPort, ProfileRepositoryPort},
    security::SecretString,
    BackendError, RedirectPolicy, Route, RouteZone, Session, SessionEvent, SessionState,
    SessionStateMachine, SubjectId,
};

use super::context::SessionContext;
use super::loading::LoadingFlag;

pub struct SessionRouter {
    context: Arc<SessionContext>,
    loading: LoadingFlag,
    auth: Arc<dyn AuthPort>,
    profiles: Arc<dyn ProfileRepositoryPort>,
    navigation: Arc<dyn NavigationPort>,
    clock: Arc<dyn ClockPort>,
}

impl SessionRouter {
    pub fn new(
        auth: Arc<dyn AuthPort>,
        profiles: Arc<dyn ProfileRepositoryPort>,
        navigation: Arc<dyn NavigationPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            context: SessionContext::default().arc(),
            loading: LoadingFlag::default(),
            auth,
            profiles,
            navigation,
            clock,
        }
    }

    pub async fn state(&self) -> SessionState {
        self.context.get_state().await
    }

    pub async fn current_route(&self) -> Option<Route> {
        self.context.current_route().await
    }

    pub async fn subject(&self) -> Option<SubjectId> {
        self.context.get_state().await.subject().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Read the stored session and profile at app start.
    ///
    /// Any failure ends in `Unauthenticated`.
    pub async fn boot(&self) -> SessionState {
        let _loading = self.loading.begin();

        let event = match self.auth.current_session().await {
            Ok(Some(session)) if session.is_expired(self.clock.now()) => {
                info!(subject = %session.subject, "stored session expired");
                SessionEvent::SessionExpired
            }
            Ok(Some(session)) => match self.profiles.exists(&session.subject).await {
                Ok(profile_exists) => SessionEvent::Authenticated {
                    session,
                    profile_exists,
                },
                Err(err) => {
                    warn!(error = %err, subject = %session.subject, "profile check failed during boot");
                    SessionEvent::BootFailed
                }
            },
            Ok(None) => SessionEvent::SignedOut,
            Err(err) => {
                warn!(error = %err, "session check failed during boot");
                SessionEvent::BootFailed
            }
        };

        self.dispatch(event).await
    }

    /// Create an account. When the backend issues no session (email
    /// confirmation pending) the state stays `Unauthenticated`.
    pub async fn sign_up(
        &self,
        email: &Email,
        password: &SecretString,
        username: &str,
    ) -> Result<SignUpOutcome, BackendError> {
        let _loading = self.loading.begin();
        let metadata = SignUpMetadata {
            username: username.to_string(),
        };

        let outcome = self.auth.sign_up(email, password, &metadata).await?;
        match &outcome {
            SignUpOutcome::SessionIssued(session) => {
                self.dispatch(SessionEvent::SignedUp {
                    session: session.clone(),
                })
                .await;
            }
            SignUpOutcome::ConfirmationRequired => {
                info!("sign-up accepted, email confirmation required");
            }
        }
        Ok(outcome)
    }

    pub async fn sign_in(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<SessionState, BackendError> {
        let _loading = self.loading.begin();

        let session = self.auth.sign_in(email, password).await?;
        let profile_exists = self.lookup_profile(&session).await;
        Ok(self
            .dispatch(SessionEvent::Authenticated {
                session,
                profile_exists,
            })
            .await)
    }

    pub async fn sign_out(&self) -> Result<(), BackendError> {
        let _loading = self.loading.begin();

        self.auth.sign_out().await?;
        self.dispatch(SessionEvent::SignedOut).await;
        Ok(())
    }

    pub async fn reset_password(&self, email: &Email) -> Result<(), BackendError> {
        let _loading = self.loading.begin();
        self.auth.reset_password_for_email(email).await
    }

    pub async fn update_password(&self, password: &SecretString) -> Result<(), BackendError> {
        let _loading = self.loading.begin();
        self.auth.update_password(password).await
    }

    /// Promote a new user after the wizard persisted the profile and move
    /// to the protected entry route.
    pub async fn complete_setup(&self) -> SessionState {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let state = self.apply(SessionEvent::SetupFinalized).await;
        if matches!(state, SessionState::AuthenticatedComplete { .. }) {
            self.navigate(RouteZone::Protected.entry_route()).await;
        }
        state
    }

    /// Record a route change from the shell and apply the redirect policy.
    ///
    /// Returns the route redirected to, if any.
    pub async fn route_changed(&self, route: Route) -> Option<Route> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        self.context.set_route(route).await;
        let state = self.context.get_state().await;
        self.redirect_if_needed(&state).await
    }

    /// Forward backend session pushes into the reducer until the channel
    /// closes.
    pub fn start_auth_listener(self: &Arc<Self>) -> JoinHandle<()> {
        let mut changes = self.auth.subscribe();
        let router = Arc::clone(self);

        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(change) => router.handle_auth_change(change).await,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "auth change listener lagged");
                    }
                    Err(RecvError::Closed) => {
                        debug!("auth change channel closed");
                        break;
                    }
                }
            }
        })
    }

    async fn handle_auth_change(&self, change: AuthChange) {
        let event = match change {
            // The router already dispatched for its own sign-in; a push for the
            // current subject only replaces the session.
            AuthChange::SignedIn(session) | AuthChange::Refreshed(session) => {
                let same_subject = self
                    .context
                    .get_state()
                    .await
                    .subject()
                    .is_some_and(|subject| *subject == session.subject);
                if same_subject {
                    SessionEvent::SessionRefreshed { session }
                } else {
                    let profile_exists = self.lookup_profile(&session).await;
                    SessionEvent::Authenticated {
                        session,
                        profile_exists,
                    }
                }
            }
            AuthChange::SignedOut => SessionEvent::SignedOut,
            AuthChange::Expired => SessionEvent::SessionExpired,
        };
        self.dispatch(event).await;
    }

    /// A failed lookup counts as "no profile" so the user lands in setup,
    /// never in the protected zone.
    async fn lookup_profile(&self, session: &Session) -> bool {
        match self.profiles.exists(&session.subject).await {
            Ok(exists) => exists,
            Err(err) => {
                warn!(error = %err, subject = %session.subject, "profile lookup failed, treating as new user");
                false
            }
        }
    }

    async fn dispatch(&self, event: SessionEvent) -> SessionState {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!("usecase.session_router.dispatch", event = ?event);
        async {
            let state = self.apply(event).await;
            self.redirect_if_needed(&state).await;
            state
        }
        .instrument(span)
        .await
    }

    /// Must be called with the dispatch lock held.
    async fn apply(&self, event: SessionEvent) -> SessionState {
        let from = self.context.get_state().await;
        let event_name = format!("{event:?}");
        let next = SessionStateMachine::transition(from.clone(), event);
        info!(from = from.as_str(), to = next.as_str(), event = %event_name, "session state transition");
        self.context.set_state(next.clone()).await;
        next
    }

    /// Must be called with the dispatch lock held.
    async fn redirect_if_needed(&self, state: &SessionState) -> Option<Route> {
        let current = self.context.current_route().await?;
        let target = RedirectPolicy::evaluate(state, &current)?;
        info!(from = %current, to = %target, state = state.as_str(), "redirect");
        self.navigate(target).await;
        Some(target)
    }

    async fn navigate(&self, route: Route) {
        self.navigation.replace(&route);
        self.context.set_route(route).await;
    }
}
