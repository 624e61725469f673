//! Session router state machine.
//!
//! Pure transition function. Profile lookups and navigation happen in the
//! router use case; this only decides the next state.

use serde::{Deserialize, Serialize};

use super::Session;
use crate::ids::SubjectId;

/// Session router state.
///
/// 会话路由状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No session.
    ///
    /// 未登录。
    Unauthenticated,
    /// Signed in, no profile row yet.
    ///
    /// 已登录，尚无档案。
    AuthenticatedNewUser { session: Session },
    /// Signed in with a profile row.
    ///
    /// 已登录，档案已存在。
    AuthenticatedComplete { session: Session },
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Unauthenticated => None,
            SessionState::AuthenticatedNewUser { session }
            | SessionState::AuthenticatedComplete { session } => Some(session),
        }
    }

    pub fn subject(&self) -> Option<&SubjectId> {
        self.session().map(|s| &s.subject)
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, SessionState::Unauthenticated)
    }

    pub fn is_new_user(&self) -> bool {
        matches!(self, SessionState::AuthenticatedNewUser { .. })
    }

    /// Short label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Unauthenticated => "unauthenticated",
            SessionState::AuthenticatedNewUser { .. } => "authenticated_new_user",
            SessionState::AuthenticatedComplete { .. } => "authenticated_complete",
        }
    }
}

/// Events that drive the session router.
///
/// 驱动会话路由的事件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Sign-up issued a session. A fresh account never has a profile.
    SignedUp { session: Session },
    /// Sign-in, boot or a backend push produced a session; profile existence
    /// was looked up for its subject.
    Authenticated {
        session: Session,
        profile_exists: bool,
    },
    /// Setup wizard persisted the profile.
    SetupFinalized,
    /// Backend refreshed the session for the same subject.
    SessionRefreshed { session: Session },
    SignedOut,
    SessionExpired,
    /// Boot could not read the session or profile.
    BootFailed,
}

/// Pure session state machine.
///
/// 纯状态机：不包含副作用。
pub struct SessionStateMachine;

impl SessionStateMachine {
    pub fn transition(state: SessionState, event: SessionEvent) -> SessionState {
        match (state, event) {
            (_, SessionEvent::SignedUp { session }) => {
                SessionState::AuthenticatedNewUser { session }
            }
            (
                _,
                SessionEvent::Authenticated {
                    session,
                    profile_exists: true,
                },
            ) => SessionState::AuthenticatedComplete { session },
            (
                _,
                SessionEvent::Authenticated {
                    session,
                    profile_exists: false,
                },
            ) => SessionState::AuthenticatedNewUser { session },
            (SessionState::AuthenticatedNewUser { session }, SessionEvent::SetupFinalized)
            | (SessionState::AuthenticatedComplete { session }, SessionEvent::SetupFinalized) => {
                SessionState::AuthenticatedComplete { session }
            }
            (
                SessionState::AuthenticatedNewUser { session: current },
                SessionEvent::SessionRefreshed { session },
            ) if current.subject == session.subject => {
                SessionState::AuthenticatedNewUser { session }
            }
            (
                SessionState::AuthenticatedComplete { session: current },
                SessionEvent::SessionRefreshed { session },
            ) if current.subject == session.subject => {
                SessionState::AuthenticatedComplete { session }
            }
            (
                _,
                SessionEvent::SignedOut | SessionEvent::SessionExpired | SessionEvent::BootFailed,
            ) => SessionState::Unauthenticated,
            (state, _event) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(subject: &str) -> Session {
        Session::new(subject)
    }

    #[test]
    fn sign_in_without_profile_is_new_user() {
        let next = SessionStateMachine::transition(
            SessionState::Unauthenticated,
            SessionEvent::Authenticated {
                session: session("u1"),
                profile_exists: false,
            },
        );
        assert!(next.is_new_user());
    }

    #[test]
    fn sign_in_with_profile_is_complete() {
        let next = SessionStateMachine::transition(
            SessionState::Unauthenticated,
            SessionEvent::Authenticated {
                session: session("u1"),
                profile_exists: true,
            },
        );
        assert_eq!(
            next,
            SessionState::AuthenticatedComplete {
                session: session("u1")
            }
        );
    }

    #[test]
    fn setup_finalized_promotes_new_user_only() {
        let new_user = SessionState::AuthenticatedNewUser {
            session: session("u1"),
        };
        let next = SessionStateMachine::transition(new_user, SessionEvent::SetupFinalized);
        assert_eq!(next.as_str(), "authenticated_complete");

        let next = SessionStateMachine::transition(
            SessionState::Unauthenticated,
            SessionEvent::SetupFinalized,
        );
        assert_eq!(next, SessionState::Unauthenticated);
    }

    #[test]
    fn sign_out_and_expiry_from_any_state() {
        let states = [
            SessionState::Unauthenticated,
            SessionState::AuthenticatedNewUser {
                session: session("u1"),
            },
            SessionState::AuthenticatedComplete {
                session: session("u1"),
            },
        ];
        for state in states {
            for event in [
                SessionEvent::SignedOut,
                SessionEvent::SessionExpired,
                SessionEvent::BootFailed,
            ] {
                assert_eq!(
                    SessionStateMachine::transition(state.clone(), event),
                    SessionState::Unauthenticated
                );
            }
        }
    }

    #[test]
    fn refresh_keeps_kind_for_same_subject() {
        let refreshed = session("u1").with_email("a@b.co");
        let next = SessionStateMachine::transition(
            SessionState::AuthenticatedComplete {
                session: session("u1"),
            },
            SessionEvent::SessionRefreshed {
                session: refreshed.clone(),
            },
        );
        assert_eq!(next, SessionState::AuthenticatedComplete { session: refreshed });
    }

    #[test]
    fn refresh_for_other_subject_is_ignored() {
        let state = SessionState::AuthenticatedNewUser {
            session: session("u1"),
        };
        let next = SessionStateMachine::transition(
            state.clone(),
            SessionEvent::SessionRefreshed {
                session: session("u2"),
            },
        );
        assert_eq!(next, state);

        let next = SessionStateMachine::transition(
            SessionState::Unauthenticated,
            SessionEvent::SessionRefreshed {
                session: session("u2"),
            },
        );
        assert_eq!(next, SessionState::Unauthenticated);
    }
}
