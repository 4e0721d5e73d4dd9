//! Client for the external identity service.
//!
//! Thin wrappers over the provider's REST surface: password sign-in,
//! sign-up, sign-out, and current-user lookup. The provider owns account
//! persistence; this module only holds the session for the page's
//! lifetime.

use gloo_net::http::{Request, Response};
use serde::Deserialize;
use thiserror::Error;

use crate::config;

/// Errors from identity-service calls.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Transport failure or unreadable response.
    #[error("network error: {0}")]
    Network(String),
    /// The service rejected the call.
    #[error("{0}")]
    Service(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;

/// User record returned by the identity service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

/// Authenticated identity held for the page's lifetime.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: AuthUser,
}

/// Signup either opens a session immediately or returns an unconfirmed
/// user, depending on whether the provider requires email verification.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(Session),
    User(AuthUser),
}

#[derive(Debug, Default, Deserialize)]
struct ServiceError {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ServiceError {
    fn into_message(self, status: u16) -> String {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .unwrap_or_else(|| format!("HTTP {status}"))
    }
}

fn endpoint(path: &str) -> String {
    format!("{}{}", config::AUTH_BASE_URL, path)
}

fn network(err: gloo_net::Error) -> AuthError {
    AuthError::Network(err.to_string())
}

async fn service_error(response: Response) -> AuthError {
    let status = response.status();
    let body = response.json::<ServiceError>().await.unwrap_or_default();
    AuthError::Service(body.into_message(status))
}

/// Authenticate with email and password.
pub async fn sign_in(email: &str, password: &str) -> Result<Session> {
    let response = Request::post(&endpoint("/token?grant_type=password"))
        .header("apikey", config::AUTH_API_KEY)
        .json(&serde_json::json!({ "email": email, "password": password }))
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;

    if !response.ok() {
        return Err(service_error(response).await);
    }

    response.json::<Session>().await.map_err(network)
}

/// Create an identity account.
pub async fn sign_up(email: &str, password: &str) -> Result<AuthUser> {
    let response = Request::post(&endpoint("/signup"))
        .header("apikey", config::AUTH_API_KEY)
        .json(&serde_json::json!({ "email": email, "password": password }))
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;

    if !response.ok() {
        return Err(service_error(response).await);
    }

    match response.json::<SignUpResponse>().await.map_err(network)? {
        SignUpResponse::Session(session) => Ok(session.user),
        SignUpResponse::User(user) => Ok(user),
    }
}

/// Invalidate the session server-side. The caller clears local state
/// regardless of the outcome.
pub async fn sign_out(access_token: &str) -> Result<()> {
    let response = Request::post(&endpoint("/logout"))
        .header("apikey", config::AUTH_API_KEY)
        .header("Authorization", &format!("Bearer {access_token}"))
        .send()
        .await
        .map_err(network)?;

    if !response.ok() {
        return Err(service_error(response).await);
    }

    Ok(())
}

/// Fetch the user behind an access token, verifying it is still live.
pub async fn current_user(access_token: &str) -> Result<AuthUser> {
    let response = Request::get(&endpoint("/user"))
        .header("apikey", config::AUTH_API_KEY)
        .header("Authorization", &format!("Bearer {access_token}"))
        .send()
        .await
        .map_err(network)?;

    if !response.ok() {
        return Err(service_error(response).await);
    }

    response.json::<AuthUser>().await.map_err(network)
}

/// Map raw provider error text onto friendlier signup messages.
pub fn classify_signup_error(message: &str) -> String {
    if message.contains("For security purposes") {
        "Please wait a moment before trying again (rate limit)".to_string()
    } else if message.contains("already registered") {
        "This email is already registered. Please try logging in instead.".to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_rate_limit() {
        let friendly =
            classify_signup_error("For security purposes, you can only request this after 56s");
        assert_eq!(friendly, "Please wait a moment before trying again (rate limit)");
    }

    #[test]
    fn test_classify_duplicate_email() {
        let friendly = classify_signup_error("User already registered");
        assert_eq!(
            friendly,
            "This email is already registered. Please try logging in instead."
        );
    }

    #[test]
    fn test_classify_passes_through_other_messages() {
        let friendly = classify_signup_error("Password should be at least 6 characters");
        assert_eq!(friendly, "Password should be at least 6 characters");
    }

    #[test]
    fn test_service_error_message_priority() {
        let body: ServiceError = serde_json::from_str(
            r#"{"error_description": "Invalid login credentials", "msg": "other"}"#,
        )
        .unwrap();
        assert_eq!(body.into_message(400), "Invalid login credentials");

        let body: ServiceError = serde_json::from_str(r#"{"msg": "Token expired"}"#).unwrap();
        assert_eq!(body.into_message(401), "Token expired");

        let body: ServiceError = serde_json::from_str("{}").unwrap();
        assert_eq!(body.into_message(500), "HTTP 500");
    }

    #[test]
    fn test_signup_response_shapes() {
        let with_session: SignUpResponse = serde_json::from_str(
            r#"{"access_token": "tok", "user": {"id": "u-1", "email": "a@b.co"}}"#,
        )
        .unwrap();
        assert!(matches!(with_session, SignUpResponse::Session(_)));

        let bare_user: SignUpResponse =
            serde_json::from_str(r#"{"id": "u-2", "email": "c@d.co"}"#).unwrap();
        assert!(matches!(bare_user, SignUpResponse::User(_)));
    }
}
