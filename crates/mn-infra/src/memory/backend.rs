use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mn_core::auth::{AuthChange, Email, SignUpMetadata, SignUpOutcome};
use mn_core::ports::{AuthPort, ProfileRepositoryPort};
use mn_core::security::SecretString;
use mn_core::{BackendError, CompletedProfile, HairProfileRow, Session, SubjectId};
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, info};

const AUTH_CHANGE_CAPACITY: usize = 16;

struct Account {
    subject: SubjectId,
    password: SecretString,
    username: String,
}

#[derive(Default)]
struct Failures {
    session_read: Option<BackendError>,
    lookup: Option<BackendError>,
    upsert: Option<BackendError>,
}

#[derive(Default)]
struct BackendState {
    accounts: HashMap<String, Account>,
    session: Option<Session>,
    rows: HashMap<SubjectId, HairProfileRow>,
    upserts: Vec<Value>,
    next_row_id: u64,
    require_confirmation: bool,
    failures: Failures,
}

/// Auth service and profile table held in memory.
///
/// 内存后端：账号、会话与资料行都保存在进程内。
pub struct InMemoryBackend {
    state: Mutex<BackendState>,
    changes: broadcast::Sender<AuthChange>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(AUTH_CHANGE_CAPACITY);
        Self {
            state: Mutex::new(BackendState::default()),
            changes,
        }
    }

    /// Sign-up no longer issues a session; the account waits for email
    /// confirmation.
    pub fn with_email_confirmation(self) -> Self {
        self.lock().require_confirmation = true;
        self
    }

    /// Register an account directly, bypassing sign-up.
    pub fn seed_account(&self, email: &str, password: &str) -> SubjectId {
        let subject = SubjectId::generate();
        self.lock().accounts.insert(
            email.to_ascii_lowercase(),
            Account {
                subject: subject.clone(),
                password: SecretString::from(password),
                username: String::new(),
            },
        );
        subject
    }

    pub fn seed_row(&self, row: HairProfileRow) {
        self.lock().rows.insert(row.user_id.clone(), row);
    }

    /// Replace the held session without emitting a change, as a restored
    /// session would appear at startup.
    pub fn restore_session(&self, session: Option<Session>) {
        self.lock().session = session;
    }

    /// Push a change as if the backend had emitted it.
    pub fn emit(&self, change: AuthChange) {
        {
            let mut state = self.lock();
            match &change {
                AuthChange::SignedIn(session) | AuthChange::Refreshed(session) => {
                    state.session = Some(session.clone());
                }
                AuthChange::SignedOut | AuthChange::Expired => state.session = None,
            }
        }
        let _ = self.changes.send(change);
    }

    pub fn fail_session_reads(&self, error: BackendError) {
        self.lock().failures.session_read = Some(error);
    }

    pub fn fail_lookups(&self, error: BackendError) {
        self.lock().failures.lookup = Some(error);
    }

    pub fn fail_upserts(&self, error: BackendError) {
        self.lock().failures.upsert = Some(error);
    }

    pub fn clear_failures(&self) {
        self.lock().failures = Failures::default();
    }

    /// Every upsert payload received, as sent over the wire.
    pub fn upsert_payloads(&self) -> Vec<Value> {
        self.lock().upserts.clone()
    }

    pub fn row(&self, subject: &SubjectId) -> Option<HairProfileRow> {
        self.lock().rows.get(subject).cloned()
    }

    pub fn username(&self, email: &str) -> Option<String> {
        self.lock()
            .accounts
            .get(&email.to_ascii_lowercase())
            .map(|account| account.username.clone())
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn notify(&self, change: AuthChange) {
        let _ = self.changes.send(change);
    }
}

#[async_trait]
impl AuthPort for InMemoryBackend {
    async fn sign_up(
        &self,
        email: &Email,
        password: &SecretString,
        metadata: &SignUpMetadata,
    ) -> Result<SignUpOutcome, BackendError> {
        let session = {
            let mut state = self.lock();
            let key = email.as_str().to_ascii_lowercase();
            if state.accounts.contains_key(&key) {
                return Err(BackendError::Auth {
                    code: Some("user_already_exists".into()),
                    message: "User already registered".into(),
                });
            }

            let subject = SubjectId::generate();
            state.accounts.insert(
                key,
                Account {
                    subject: subject.clone(),
                    password: SecretString::from(password.expose()),
                    username: metadata.username.clone(),
                },
            );
            debug!(subject = %subject, "account created");

            if state.require_confirmation {
                return Ok(SignUpOutcome::ConfirmationRequired);
            }
            let session = Session::new(subject).with_email(email.as_str());
            state.session = Some(session.clone());
            session
        };

        self.notify(AuthChange::SignedIn(session.clone()));
        Ok(SignUpOutcome::SessionIssued(session))
    }

    async fn sign_in(&self, email: &Email, password: &SecretString) -> Result<Session, BackendError> {
        let session = {
            let mut state = self.lock();
            let subject = state
                .accounts
                .get(&email.as_str().to_ascii_lowercase())
                .filter(|account| account.password.expose() == password.expose())
                .map(|account| account.subject.clone())
                .ok_or_else(|| BackendError::Auth {
                    code: Some("invalid_credentials".into()),
                    message: "Invalid login credentials".into(),
                })?;
            let session = Session::new(subject).with_email(email.as_str());
            state.session = Some(session.clone());
            session
        };

        info!(subject = %session.subject, "signed in");
        self.notify(AuthChange::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.lock().session = None;
        self.notify(AuthChange::SignedOut);
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>, BackendError> {
        let state = self.lock();
        match &state.failures.session_read {
            Some(error) => Err(error.clone()),
            None => Ok(state.session.clone()),
        }
    }

    async fn reset_password_for_email(&self, email: &Email) -> Result<(), BackendError> {
        // Unknown addresses succeed too; the reset screen never reveals accounts.
        debug!(email = %email, "password reset requested");
        Ok(())
    }

    async fn update_password(&self, password: &SecretString) -> Result<(), BackendError> {
        let mut state = self.lock();
        let subject = state
            .session
            .as_ref()
            .map(|session| session.subject.clone())
            .ok_or_else(|| BackendError::auth("Auth session missing!"))?;
        if let Some(account) = state
            .accounts
            .values_mut()
            .find(|account| account.subject == subject)
        {
            account.password = SecretString::from(password.expose());
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthChange> {
        self.changes.subscribe()
    }
}

#[async_trait]
impl ProfileRepositoryPort for InMemoryBackend {
    async fn find_by_subject(
        &self,
        subject: &SubjectId,
    ) -> Result<Option<HairProfileRow>, BackendError> {
        let state = self.lock();
        if let Some(error) = &state.failures.lookup {
            return Err(error.clone());
        }
        Ok(state.rows.get(subject).cloned())
    }

    async fn upsert(&self, profile: &CompletedProfile) -> Result<HairProfileRow, BackendError> {
        let payload = serde_json::to_value(profile)
            .map_err(|e| BackendError::Unexpected(format!("failed to encode profile: {e}")))?;

        let mut state = self.lock();
        if let Some(error) = &state.failures.upsert {
            return Err(error.clone());
        }
        state.upserts.push(payload);

        let existing = state.rows.remove(profile.user_id());
        let mut row = profile.merge_into(existing);
        if row.id.is_none() {
            state.next_row_id += 1;
            row.id = Some(format!("row-{}", state.next_row_id));
        }
        state.rows.insert(row.user_id.clone(), row.clone());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use mn_core::profile::{HairGoal, HairType, ProfileField};
    use mn_core::DraftProfile;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    fn metadata() -> SignUpMetadata {
        SignUpMetadata {
            username: "curly".into(),
        }
    }

    fn completed(subject: &SubjectId, hair_type: HairType) -> CompletedProfile {
        let mut draft = DraftProfile::default();
        draft.apply(ProfileField::HairType(hair_type));
        draft.toggle_goal(HairGoal::Hydration);
        draft
            .complete(
                subject.clone(),
                DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
            )
            .unwrap()
    }

    #[tokio::test]
    async fn sign_up_issues_session_and_rejects_duplicates() {
        let backend = InMemoryBackend::new();
        let mut changes = backend.subscribe();

        let outcome = backend
            .sign_up(&email("test@example.com"), &SecretString::from("ValidPass1!"), &metadata())
            .await
            .unwrap();
        let SignUpOutcome::SessionIssued(session) = outcome else {
            panic!("expected a session");
        };
        assert_eq!(backend.current_session().await.unwrap(), Some(session.clone()));
        assert_eq!(changes.recv().await.unwrap(), AuthChange::SignedIn(session));
        assert_eq!(backend.username("TEST@example.com").as_deref(), Some("curly"));

        let err = backend
            .sign_up(&email("test@example.com"), &SecretString::from("ValidPass1!"), &metadata())
            .await
            .unwrap_err();
        assert_eq!(err.message(), "User already registered");
    }

    #[tokio::test]
    async fn confirmation_mode_withholds_session() {
        let backend = InMemoryBackend::new().with_email_confirmation();
        let outcome = backend
            .sign_up(&email("test@example.com"), &SecretString::from("ValidPass1!"), &metadata())
            .await
            .unwrap();
        assert_eq!(outcome, SignUpOutcome::ConfirmationRequired);
        assert_eq!(backend.current_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn sign_in_checks_password() {
        let backend = InMemoryBackend::new();
        let subject = backend.seed_account("test@example.com", "ValidPass1!");

        let err = backend
            .sign_in(&email("test@example.com"), &SecretString::from("wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some("invalid_credentials"));

        let session = backend
            .sign_in(&email("test@example.com"), &SecretString::from("ValidPass1!"))
            .await
            .unwrap();
        assert_eq!(session.subject, subject);
    }

    #[tokio::test]
    async fn update_password_requires_session_and_takes_effect() {
        let backend = InMemoryBackend::new();
        backend.seed_account("test@example.com", "ValidPass1!");
        assert!(backend
            .update_password(&SecretString::from("NewPass1!"))
            .await
            .is_err());

        backend
            .sign_in(&email("test@example.com"), &SecretString::from("ValidPass1!"))
            .await
            .unwrap();
        backend
            .update_password(&SecretString::from("NewPass1!"))
            .await
            .unwrap();
        backend.sign_out().await.unwrap();

        assert!(backend
            .sign_in(&email("test@example.com"), &SecretString::from("NewPass1!"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn upsert_merges_rows_and_records_payloads() {
        let backend = InMemoryBackend::new();
        let subject = SubjectId::from("user-1");

        let first = backend
            .upsert(&completed(&subject, HairType::Wavy))
            .await
            .unwrap();
        let second = backend
            .upsert(&completed(&subject, HairType::Curly))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.hair_type, Some(HairType::Curly));
        assert_eq!(backend.upsert_payloads().len(), 2);
        assert_eq!(backend.upsert_payloads()[1]["hair_type"], "curly");
        assert_eq!(
            backend.find_by_subject(&subject).await.unwrap(),
            Some(second)
        );
    }

    #[tokio::test]
    async fn injected_failures_surface_until_cleared() {
        let backend = InMemoryBackend::new();
        let subject = SubjectId::from("user-1");
        backend.fail_lookups(BackendError::Network("offline".into()));
        backend.fail_upserts(BackendError::query(Some("42501".into()), "denied"));

        assert!(backend.find_by_subject(&subject).await.is_err());
        assert!(backend
            .upsert(&completed(&subject, HairType::Curly))
            .await
            .is_err());
        assert!(backend.upsert_payloads().is_empty());

        backend.clear_failures();
        assert_eq!(backend.find_by_subject(&subject).await.unwrap(), None);
    }
}
