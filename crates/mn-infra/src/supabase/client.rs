use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use mn_core::auth::AuthChange;
use mn_core::security::SecretString;
use mn_core::Session;
use reqwest::{header, Method, RequestBuilder};
use tokio::sync::broadcast;
use tracing::debug;

const AUTH_CHANGE_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Public anon key, sent as `apikey` on every request.
    pub anon_key: String,
    pub timeout: Option<Duration>,
}

/// Session plus the access token needed to act on its behalf. Refresh is
/// left to the backend; an expired session is reported, not renewed.
pub(super) struct StoredSession {
    pub session: Session,
    pub access_token: SecretString,
}

/// Shared HTTP client and session holder for the Supabase adapters.
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    session: Mutex<Option<StoredSession>>,
    changes: broadcast::Sender<AuthChange>,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        let (changes, _) = broadcast::channel(AUTH_CHANGE_CAPACITY);
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key,
            session: Mutex::new(None),
            changes,
        })
    }

    /// Request with the `apikey` header and a bearer token: the session's
    /// access token when signed in, otherwise the anon key.
    pub(super) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let bearer = self
            .lock_session()
            .as_ref()
            .map(|stored| stored.access_token.expose().to_string())
            .unwrap_or_else(|| self.anon_key.clone());

        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
    }

    pub(super) fn has_session(&self) -> bool {
        self.lock_session().is_some()
    }

    /// The stored session, unless it is past `expires_at`. An expired
    /// session is dropped and reported once as `AuthChange::Expired`.
    pub(super) fn current_session(&self) -> Option<Session> {
        let mut guard = self.lock_session();
        let expired = guard
            .as_ref()
            .is_some_and(|stored| stored.session.is_expired(Utc::now()));
        if !expired {
            return guard.as_ref().map(|stored| stored.session.clone());
        }

        *guard = None;
        drop(guard);
        debug!("stored session expired");
        self.notify(AuthChange::Expired);
        None
    }

    pub(super) fn store_session(&self, stored: StoredSession) {
        *self.lock_session() = Some(stored);
    }

    pub(super) fn clear_session(&self) {
        *self.lock_session() = None;
    }

    pub(super) fn notify(&self, change: AuthChange) {
        // No subscribers is fine.
        let _ = self.changes.send(change);
    }

    pub(super) fn subscribe(&self) -> broadcast::Receiver<AuthChange> {
        self.changes.subscribe()
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<StoredSession>> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
