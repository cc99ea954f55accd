//! Authentication use case.
//!
//! `AuthClient` validates credentials locally, performs the auth exchange and
//! persists the resulting session. Failed attempts never touch stored state.

use std::sync::{Arc, RwLock};

use serde::Deserialize;
use serde_json::{Value, json};

use resumate_core::api::{ApiReply, ApiRequest, ApiTransport, Endpoint, RequestBody};
use resumate_core::error::{ResumateError, Result};
use resumate_core::session::{Session, SessionRepository, UserProfile, timestamp};

use crate::single_flight::SingleFlight;

pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const REFRESH_FAILED: &str = "Session refresh failed. Please log in again.";
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Payload shared by the login, register and refresh endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user_id: Option<i64>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    roles: Option<Vec<String>>,
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for the authentication endpoints.
pub struct AuthClient {
    transport: Arc<dyn ApiTransport>,
    sessions: Arc<dyn SessionRepository>,
    flight: SingleFlight,
    current: RwLock<Session>,
}

impl AuthClient {
    pub fn new(transport: Arc<dyn ApiTransport>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self {
            transport,
            sessions,
            flight: SingleFlight::new("Authentication"),
            current: RwLock::new(Session::anonymous()),
        }
    }

    /// Loads the persisted session, discarding it if it is incomplete or expired.
    pub fn restore(&self) -> Result<Session> {
        let session = self.sessions.restore()?;
        if session.is_authenticated() {
            tracing::debug!("Restored persisted session");
        }
        self.set_current(session.clone());
        Ok(session)
    }

    pub fn current_session(&self) -> Session {
        self.current
            .read()
            .map(|session| session.clone())
            .unwrap_or_default()
    }

    /// True when the current session is authenticated and unexpired.
    pub fn is_signed_in(&self) -> bool {
        let session = self.current_session();
        self.sessions.is_authenticated(&session) && !self.sessions.is_expired(&session)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ResumateError::validation(
                "Please enter both email and password",
            ));
        }

        let _guard = self.flight.begin()?;
        let request = ApiRequest::json(
            Endpoint::Login,
            json!({ "email": email, "password": password }),
        );
        let session = self.exchange(&request, LOGIN_FAILED).await?;
        tracing::info!("Logged in as user {}", user_id(&session));
        Ok(session)
    }

    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Session> {
        let full_name = full_name.trim();
        let email = email.trim();
        let password = password.trim();
        let confirm_password = confirm_password.trim();

        if full_name.is_empty() || email.is_empty() || password.is_empty() || confirm_password.is_empty() {
            return Err(ResumateError::validation("Please fill in all fields"));
        }
        if password != confirm_password {
            return Err(ResumateError::validation("Passwords do not match"));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ResumateError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let _guard = self.flight.begin()?;
        let request = ApiRequest::json(
            Endpoint::Register,
            json!({ "email": email, "password": password, "fullName": full_name }),
        );
        let session = self.exchange(&request, REGISTRATION_FAILED).await?;
        tracing::info!("Registered user {}", user_id(&session));
        Ok(session)
    }

    /// Exchanges the stored refresh token for a new session.
    pub async fn refresh(&self) -> Result<Session> {
        let refresh_token = self
            .sessions
            .load()
            .refresh_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ResumateError::validation("No refresh token available. Please log in again.")
            })?;

        let _guard = self.flight.begin()?;
        let request = ApiRequest::new(Endpoint::RefreshToken, RequestBody::Empty)
            .with_query("refreshToken", refresh_token);
        let session = self.exchange(&request, REFRESH_FAILED).await?;
        tracing::info!("Refreshed session for user {}", user_id(&session));
        Ok(session)
    }

    /// Clears the session locally. Idempotent; no network call.
    pub fn logout(&self) -> Result<()> {
        self.sessions.clear()?;
        self.set_current(Session::anonymous());
        tracing::info!("Logged out");
        Ok(())
    }

    /// Performs one auth call and persists the resulting session.
    async fn exchange(&self, request: &ApiRequest, fallback: &str) -> Result<Session> {
        let reply = self.transport.execute(request, None).await?;
        if !reply.is_success() {
            tracing::debug!(
                "{} rejected with status {}",
                request.endpoint.path(),
                reply.status
            );
        }
        let session = self.session_from_reply(&reply, fallback)?;

        self.sessions.save(&session)?;
        self.set_current(session.clone());
        Ok(session)
    }

    fn session_from_reply(&self, reply: &ApiReply, fallback: &str) -> Result<Session> {
        if !reply.is_success() {
            let message = reply.error_message().unwrap_or_else(|| fallback.to_string());
            return Err(ResumateError::auth(message));
        }

        let response: AuthResponse = reply.json().map_err(|e| {
            tracing::warn!("Unreadable auth response: {}", e);
            ResumateError::auth(fallback)
        })?;

        let message = response
            .message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        if response.success != Some(true) {
            return Err(ResumateError::auth(message));
        }

        let Some(access_token) = response.access_token.filter(|t| !t.is_empty()) else {
            tracing::warn!("Auth response reported success without an access token");
            return Err(ResumateError::auth(message));
        };

        let created_at = response
            .created_at
            .as_ref()
            .and_then(timestamp::parse_millis)
            .unwrap_or_else(|| {
                tracing::debug!("No usable createdAt in auth response, using local time");
                self.sessions.clock().now_millis()
            });

        Ok(Session {
            access_token: Some(access_token),
            refresh_token: response.refresh_token.filter(|t| !t.is_empty()),
            user: Some(UserProfile {
                id: response.user_id.unwrap_or_default(),
                email: response.email.unwrap_or_default(),
                full_name: response.full_name.unwrap_or_default(),
                roles: response.roles.unwrap_or_default(),
                created_at: Some(created_at),
                expires_in: response.expires_in,
            }),
        })
    }

    fn set_current(&self, session: Session) {
        if let Ok(mut current) = self.current.write() {
            *current = session;
        }
    }
}

fn user_id(session: &Session) -> i64 {
    session.user.as_ref().map(|user| user.id).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeTransport, session_store};
    use resumate_core::clock::ManualClock;
    use resumate_core::kv::{InMemoryStore, KeyValueStore, keys};

    const NOW: i64 = 1_700_000_000_000;

    fn ok_body(extra: Value) -> String {
        let mut body = json!({
            "success": true,
            "accessToken": "access-1",
            "refreshToken": "refresh-1",
            "userId": 42,
            "email": "ada@example.com",
            "fullName": "Ada Lovelace",
            "roles": ["ROLE_USER"],
            "createdAt": "2023-11-14T22:13:20",
            "expiresIn": 3600
        });
        if let (Some(base), Value::Object(extra)) = (body.as_object_mut(), extra) {
            base.extend(extra);
        }
        body.to_string()
    }

    struct Fixture {
        kv: Arc<InMemoryStore>,
        clock: ManualClock,
        transport: Arc<FakeTransport>,
        client: Arc<AuthClient>,
    }

    fn fixture(replies: Vec<Result<ApiReply>>) -> Fixture {
        let kv = Arc::new(InMemoryStore::new());
        let clock = ManualClock::at(NOW);
        let transport = Arc::new(FakeTransport::with_replies(replies));
        let sessions = session_store(kv.clone(), clock.clone());
        let client = Arc::new(AuthClient::new(transport.clone(), sessions));
        Fixture {
            kv,
            clock,
            transport,
            client,
        }
    }

    #[tokio::test]
    async fn test_login_rejects_blank_input_without_network() {
        let f = fixture(Vec::new());

        assert!(f.client.login("", "pw").await.unwrap_err().is_validation());
        assert!(f.client.login("a@b.com", "   ").await.unwrap_err().is_validation());
        assert_eq!(f.transport.call_count(), 0);
        assert_eq!(f.kv.write_count(), 0);
    }

    #[tokio::test]
    async fn test_login_success_persists_once() {
        let f = fixture(vec![Ok(ApiReply::new(200, ok_body(json!({}))))]);

        let session = f.client.login("  ada@example.com ", "secret1").await.unwrap();

        assert_eq!(f.transport.call_count(), 1);
        assert_eq!(f.kv.write_count(), 1);
        assert!(session.is_authenticated());
        assert_eq!(session.user.as_ref().unwrap().created_at, Some(NOW));
        assert_eq!(f.client.current_session(), session);
        assert!(f.client.is_signed_in());

        let (request, bearer) = f.transport.request(0);
        assert_eq!(request.endpoint, Endpoint::Login);
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"email": "ada@example.com", "password": "secret1"}))
        );
        assert_eq!(bearer, None);
    }

    #[tokio::test]
    async fn test_login_unsuccessful_payload_is_auth_error() {
        let f = fixture(vec![Ok(ApiReply::new(
            200,
            r#"{"success":false,"message":"bad creds"}"#,
        ))]);

        let err = f.client.login("a@b.com", "pw").await.unwrap_err();

        assert!(err.is_auth());
        assert_eq!(err.user_message(), "bad creds");
        assert_eq!(f.kv.write_count(), 0);
        assert!(f.kv.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_login_error_status_uses_fallback_message() {
        let f = fixture(vec![Ok(ApiReply::new(401, ""))]);

        let err = f.client.login("a@b.com", "pw").await.unwrap_err();

        assert_eq!(err.user_message(), LOGIN_FAILED);
        assert_eq!(f.kv.write_count(), 0);
    }

    #[tokio::test]
    async fn test_login_missing_success_flag_is_rejected() {
        let body = ok_body(json!({ "success": null }));
        let f = fixture(vec![Ok(ApiReply::new(200, body))]);

        assert!(f.client.login("a@b.com", "pw").await.unwrap_err().is_auth());
        assert_eq!(f.kv.write_count(), 0);
    }

    #[tokio::test]
    async fn test_network_failure_is_distinct() {
        let f = fixture(vec![Err(ResumateError::network("connection reset"))]);

        let err = f.client.login("a@b.com", "pw").await.unwrap_err();

        assert!(err.is_network());
        assert_eq!(err.user_message(), "Network error. Please try again.");
        assert_eq!(f.kv.write_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_created_at_uses_receipt_time() {
        let body = ok_body(json!({ "createdAt": null }));
        let f = fixture(vec![Ok(ApiReply::new(200, body))]);
        f.clock.set(NOW + 5_000);

        let session = f.client.login("a@b.com", "pw").await.unwrap();
        assert_eq!(session.user.unwrap().created_at, Some(NOW + 5_000));
    }

    #[tokio::test]
    async fn test_register_validation_order() {
        let f = fixture(Vec::new());

        let err = f.client.register("Ada", "a@b.com", "", "").await.unwrap_err();
        assert_eq!(err.user_message(), "Please fill in all fields");

        let err = f
            .client
            .register("Ada", "a@b.com", "abcdef", "xyzxyz")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Passwords do not match");

        let err = f.client.register("Ada", "a@b.com", "abc", "abc").await.unwrap_err();
        assert_eq!(err.user_message(), "Password must be at least 6 characters");

        assert_eq!(f.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_register_success_and_failure_message() {
        let f = fixture(vec![
            Ok(ApiReply::new(400, r#"{"success":false}"#)),
            Ok(ApiReply::new(200, ok_body(json!({})))),
        ]);

        let err = f
            .client
            .register("Ada Lovelace", "ada@example.com", "secret1", "secret1")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), REGISTRATION_FAILED);

        f.client
            .register("Ada Lovelace", "ada@example.com", "secret1", "secret1")
            .await
            .unwrap();
        let (request, _) = f.transport.request(1);
        assert_eq!(request.endpoint, Endpoint::Register);
        assert_eq!(
            request.body,
            RequestBody::Json(json!({
                "email": "ada@example.com",
                "password": "secret1",
                "fullName": "Ada Lovelace"
            }))
        );
        assert_eq!(f.kv.write_count(), 1);
    }

    #[tokio::test]
    async fn test_second_login_while_in_flight_is_busy() {
        let f = fixture(vec![Ok(ApiReply::new(200, ok_body(json!({}))))]);
        let gate = f.transport.hold();

        let client = f.client.clone();
        let first = tokio::spawn(async move { client.login("a@b.com", "pw").await });
        while f.transport.call_count() == 0 {
            tokio::task::yield_now().await;
        }

        let err = f.client.login("a@b.com", "pw").await.unwrap_err();
        assert!(err.is_busy());
        assert_eq!(f.transport.call_count(), 1);

        gate.notify_one();
        assert!(first.await.unwrap().is_ok());
        assert!(f.client.login("a@b.com", "pw").await.is_err());
        assert_eq!(f.transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let f = fixture(vec![Ok(ApiReply::new(200, ok_body(json!({}))))]);
        f.client.login("a@b.com", "pw").await.unwrap();

        f.client.logout().unwrap();
        f.client.logout().unwrap();

        assert_eq!(f.transport.call_count(), 1);
        assert_eq!(f.client.current_session(), Session::anonymous());
        assert_eq!(f.kv.get(keys::ACCESS_TOKEN).unwrap(), None);
    }

    #[tokio::test]
    async fn test_refresh_uses_stored_token() {
        let f = fixture(vec![
            Ok(ApiReply::new(200, ok_body(json!({})))),
            Ok(ApiReply::new(200, ok_body(json!({ "accessToken": "access-2" })))),
        ]);
        f.client.login("a@b.com", "pw").await.unwrap();

        let session = f.client.refresh().await.unwrap();

        assert_eq!(session.access_token.as_deref(), Some("access-2"));
        let (request, _) = f.transport.request(1);
        assert_eq!(request.endpoint, Endpoint::RefreshToken);
        assert_eq!(
            request.query,
            vec![("refreshToken".to_string(), "refresh-1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_refresh_without_token_is_validation_error() {
        let f = fixture(Vec::new());
        assert!(f.client.refresh().await.unwrap_err().is_validation());
        assert_eq!(f.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_restore_drops_expired_session() {
        let f = fixture(vec![Ok(ApiReply::new(200, ok_body(json!({}))))]);
        f.client.login("a@b.com", "pw").await.unwrap();

        f.clock.advance_secs(3601);
        let restored = f.client.restore().unwrap();

        assert!(!restored.is_authenticated());
        assert!(!f.client.is_signed_in());
        assert_eq!(f.kv.get(keys::ACCESS_TOKEN).unwrap(), None);
        assert_eq!(f.kv.get(keys::USER).unwrap(), None);
        assert_eq!(
            f.kv.get(keys::REFRESH_TOKEN).unwrap().as_deref(),
            Some("refresh-1")
        );
    }
}
