//! GoTrue auth adapter.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use mn_core::auth::{AuthChange, Email, SignUpMetadata, SignUpOutcome};
use mn_core::ports::AuthPort;
use mn_core::security::SecretString;
use mn_core::{BackendError, Session};
use reqwest::{Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, instrument};

use super::client::{StoredSession, SupabaseClient};
use super::error::{auth_error, transport_error};

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: &'a SignUpMetadata,
}

#[derive(Serialize)]
struct RecoverRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct UpdateUserRequest<'a> {
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
    user: UserResponse,
}

/// Sign-up returns a full session when auto-confirm is on, otherwise only
/// the pending user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(UserResponse),
}

impl TokenResponse {
    fn into_stored(self) -> StoredSession {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .or_else(|| {
                self.expires_in
                    .map(|secs| Utc::now() + Duration::seconds(secs))
            });
        StoredSession {
            session: Session {
                subject: self.user.id.into(),
                email: self.user.email,
                expires_at,
            },
            access_token: SecretString::new(self.access_token),
        }
    }
}

/// `AuthPort` over the GoTrue REST API.
pub struct SupabaseAuth {
    client: Arc<SupabaseClient>,
}

impl SupabaseAuth {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, BackendError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(auth_error(status, &body))
    }

    fn adopt(&self, token: TokenResponse) -> Session {
        let stored = token.into_stored();
        let session = stored.session.clone();
        self.client.store_session(stored);
        self.client.notify(AuthChange::SignedIn(session.clone()));
        session
    }
}

#[async_trait]
impl AuthPort for SupabaseAuth {
    #[instrument(skip(self, password, metadata), fields(email = %email))]
    async fn sign_up(
        &self,
        email: &Email,
        password: &SecretString,
        metadata: &SignUpMetadata,
    ) -> Result<SignUpOutcome, BackendError> {
        let request = self
            .client
            .request(Method::POST, "/auth/v1/signup")
            .json(&SignUpRequest {
                email: email.as_str(),
                password: password.expose(),
                data: metadata,
            });
        let response: SignUpResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(transport_error)?;

        match response {
            SignUpResponse::Session(token) => {
                info!("sign-up issued a session");
                Ok(SignUpOutcome::SessionIssued(self.adopt(token)))
            }
            SignUpResponse::User(user) => {
                debug!(user_id = %user.id, "sign-up pending email confirmation");
                Ok(SignUpOutcome::ConfirmationRequired)
            }
        }
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn sign_in(&self, email: &Email, password: &SecretString) -> Result<Session, BackendError> {
        let request = self
            .client
            .request(Method::POST, "/auth/v1/token")
            .query(&[("grant_type", "password")])
            .json(&PasswordCredentials {
                email: email.as_str(),
                password: password.expose(),
            });
        let token: TokenResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(transport_error)?;

        let session = self.adopt(token);
        info!(subject = %session.subject, "signed in");
        Ok(session)
    }

    /// A token the server no longer accepts still signs out locally.
    #[instrument(skip(self))]
    async fn sign_out(&self) -> Result<(), BackendError> {
        if self.client.has_session() {
            let response = self
                .client
                .request(Method::POST, "/auth/v1/logout")
                .send()
                .await
                .map_err(transport_error)?;
            let status = response.status();
            if matches!(
                status,
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
            ) {
                debug!(%status, "logout rejected the token, clearing local session");
            } else if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(auth_error(status, &body));
            }
        }
        self.client.clear_session();
        self.client.notify(AuthChange::SignedOut);
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>, BackendError> {
        Ok(self.client.current_session())
    }

    #[instrument(skip(self), fields(email = %email))]
    async fn reset_password_for_email(&self, email: &Email) -> Result<(), BackendError> {
        let request = self
            .client
            .request(Method::POST, "/auth/v1/recover")
            .json(&RecoverRequest {
                email: email.as_str(),
            });
        self.send(request).await?;
        Ok(())
    }

    #[instrument(skip(self, password))]
    async fn update_password(&self, password: &SecretString) -> Result<(), BackendError> {
        if !self.client.has_session() {
            return Err(BackendError::auth("Auth session missing!"));
        }
        let request = self
            .client
            .request(Method::PUT, "/auth/v1/user")
            .json(&UpdateUserRequest {
                password: password.expose(),
            });
        self.send(request).await?;
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthChange> {
        self.client.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supabase::SupabaseConfig;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn auth_for(url: String) -> SupabaseAuth {
        let client = SupabaseClient::new(SupabaseConfig {
            url,
            anon_key: "anon-key".into(),
            timeout: None,
        })
        .unwrap();
        SupabaseAuth::new(Arc::new(client))
    }

    fn token_body() -> String {
        json!({
            "access_token": "access-123",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 4_102_444_800i64,
            "refresh_token": "refresh-456",
            "user": { "id": "user-1", "email": "test@example.com" }
        })
        .to_string()
    }

    fn email() -> Email {
        Email::parse("test@example.com").unwrap()
    }

    #[tokio::test]
    async fn sign_in_posts_password_grant_and_stores_session() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::UrlEncoded("grant_type".into(), "password".into()))
            .match_header("apikey", "anon-key")
            .match_body(Matcher::Json(json!({
                "email": "test@example.com",
                "password": "ValidPass1!"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(token_body())
            .create_async()
            .await;

        let auth = auth_for(server.url());
        let mut changes = auth.subscribe();
        let session = auth
            .sign_in(&email(), &SecretString::from("ValidPass1!"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(session.subject.as_str(), "user-1");
        assert_eq!(session.email.as_deref(), Some("test@example.com"));
        assert_eq!(
            session.expires_at,
            DateTime::<Utc>::from_timestamp(4_102_444_800, 0)
        );
        assert_eq!(auth.current_session().await.unwrap(), Some(session.clone()));
        assert_eq!(changes.recv().await.unwrap(), AuthChange::SignedIn(session));
    }

    #[tokio::test]
    async fn sign_in_failure_maps_gotrue_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#)
            .create_async()
            .await;

        let auth = auth_for(server.url());
        let err = auth
            .sign_in(&email(), &SecretString::from("nope"))
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Invalid login credentials");
        assert_eq!(auth.current_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn sign_up_sends_username_metadata_and_detects_pending_confirmation() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/v1/signup")
            .match_body(Matcher::Json(json!({
                "email": "test@example.com",
                "password": "ValidPass1!",
                "data": { "username": "curly" }
            })))
            .with_status(200)
            .with_body(json!({ "id": "user-1", "email": "test@example.com" }).to_string())
            .create_async()
            .await;

        let auth = auth_for(server.url());
        let outcome = auth
            .sign_up(
                &email(),
                &SecretString::from("ValidPass1!"),
                &SignUpMetadata {
                    username: "curly".into(),
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(outcome, SignUpOutcome::ConfirmationRequired);
        assert_eq!(auth.current_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn sign_up_with_autoconfirm_issues_session() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/v1/signup")
            .with_status(200)
            .with_body(token_body())
            .create_async()
            .await;

        let auth = auth_for(server.url());
        let outcome = auth
            .sign_up(
                &email(),
                &SecretString::from("ValidPass1!"),
                &SignUpMetadata {
                    username: "curly".into(),
                },
            )
            .await
            .unwrap();

        assert!(matches!(outcome, SignUpOutcome::SessionIssued(ref s) if s.subject.as_str() == "user-1"));
    }

    #[tokio::test]
    async fn sign_out_sends_bearer_token_and_clears_session() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(token_body())
            .create_async()
            .await;
        let logout = server
            .mock("POST", "/auth/v1/logout")
            .match_header("authorization", "Bearer access-123")
            .with_status(204)
            .create_async()
            .await;

        let auth = auth_for(server.url());
        auth.sign_in(&email(), &SecretString::from("ValidPass1!"))
            .await
            .unwrap();
        auth.sign_out().await.unwrap();

        logout.assert_async().await;
        assert_eq!(auth.current_session().await.unwrap(), None);
    }

    async fn signed_in(server: &mut Server, body: String) -> SupabaseAuth {
        server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;
        let auth = auth_for(server.url());
        auth.sign_in(&email(), &SecretString::from("ValidPass1!"))
            .await
            .unwrap();
        auth
    }

    #[tokio::test]
    async fn sign_out_with_rejected_token_still_clears_session() {
        let mut server = Server::new_async().await;
        let auth = signed_in(&mut server, token_body()).await;
        let logout = server
            .mock("POST", "/auth/v1/logout")
            .with_status(401)
            .with_body(r#"{"code":401,"error_code":"bad_jwt","msg":"invalid JWT: token is expired"}"#)
            .create_async()
            .await;
        let mut changes = auth.subscribe();

        auth.sign_out().await.unwrap();

        logout.assert_async().await;
        assert_eq!(auth.current_session().await.unwrap(), None);
        assert_eq!(changes.recv().await.unwrap(), AuthChange::SignedOut);
    }

    #[tokio::test]
    async fn sign_out_server_failure_keeps_session() {
        let mut server = Server::new_async().await;
        let auth = signed_in(&mut server, token_body()).await;
        server
            .mock("POST", "/auth/v1/logout")
            .with_status(500)
            .with_body(r#"{"msg":"database unavailable"}"#)
            .create_async()
            .await;

        let err = auth.sign_out().await.unwrap_err();

        assert_eq!(err.message(), "database unavailable");
        assert!(auth.current_session().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn expired_session_is_dropped_and_reported_once() {
        let mut server = Server::new_async().await;
        let body = json!({
            "access_token": "access-123",
            "expires_at": 1_000_000_000i64,
            "user": { "id": "user-1", "email": "test@example.com" }
        })
        .to_string();
        let auth = signed_in(&mut server, body).await;
        let mut changes = auth.subscribe();

        assert_eq!(auth.current_session().await.unwrap(), None);
        assert_eq!(changes.recv().await.unwrap(), AuthChange::Expired);

        assert_eq!(auth.current_session().await.unwrap(), None);
        assert!(changes.try_recv().is_err());
    }

    #[tokio::test]
    async fn update_password_requires_session() {
        let auth = auth_for("http://127.0.0.1:9".into());
        let err = auth
            .update_password(&SecretString::from("NewPass1!"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Auth session missing!");
    }

    #[tokio::test]
    async fn recover_posts_email() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/v1/recover")
            .match_header("apikey", "anon-key")
            .match_body(Matcher::Json(json!({ "email": "test@example.com" })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let auth = auth_for(server.url());
        auth.reset_password_for_email(&email()).await.unwrap();

        mock.assert_async().await;
    }
}
