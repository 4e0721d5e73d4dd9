//! Request client for the marketplace backend.
//!
//! Wraps fetch calls in the backend's JSON envelope, appends the signed-in
//! user's id as a query parameter, and keeps the global loading flag in
//! step with the number of requests in flight.

use gloo_net::http::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use web_sys::console;
use web_types::Envelope;
use yew::Callback;

use crate::config;
use crate::state::{AppAction, AppStateContext};

/// Errors from backend calls.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Transport failure: the request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The response body was not the expected JSON envelope.
    #[error("Server returned invalid response")]
    InvalidBody,
    /// The backend reported a failure.
    #[error("{0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, RequestError>;

/// Backend client bound to a session identity.
///
/// Constructed per call site so it always carries the id the handler is
/// acting for, even before the shared state has caught up (the sign-in
/// role probe, signup profile creation).
#[derive(Clone)]
pub struct Api {
    user_id: Option<String>,
    dispatch: Callback<AppAction>,
}

impl Api {
    /// Client for the session recorded in the app state.
    pub fn from_state(state: &AppStateContext) -> Self {
        let user_id = state.user_id().map(str::to_string);
        Self::bound(state, user_id)
    }

    /// Client for an explicit user id.
    pub fn for_user(state: &AppStateContext, user_id: impl Into<String>) -> Self {
        Self::bound(state, Some(user_id.into()))
    }

    fn bound(state: &AppStateContext, user_id: Option<String>) -> Self {
        let state = state.clone();
        Self {
            user_id,
            dispatch: Callback::from(move |action| state.dispatch(action)),
        }
    }

    /// GET `path`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        self.request(Method::GET, path, None::<&()>).await
    }

    /// POST `body` to `path`.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// POST to `path` with no body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        self.request(Method::POST, path, None::<&()>).await
    }

    /// PUT to `path` with no body.
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        self.request(Method::PUT, path, None::<&()>).await
    }

    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        // Raised for the whole call; drops on every exit path below.
        let _loading = LoadingGuard::hold(&self.dispatch);

        let url = self.url(path);
        let builder = RequestBuilder::new(&url)
            .method(method)
            .header("Content-Type", "application/json");
        let request = match body {
            Some(body) => builder
                .json(body)
                .map_err(|e| RequestError::Network(e.to_string()))?,
            None => builder
                .build()
                .map_err(|e| RequestError::Network(e.to_string()))?,
        };

        let response = request.send().await.map_err(|e| {
            console::error_1(&format!("request to {url} failed: {e}").into());
            RequestError::Network(e.to_string())
        })?;

        unwrap_envelope(response).await
    }

    /// Full URL for `path`, with the bound user's id appended as a query
    /// parameter unless the caller already supplied one.
    fn url(&self, path: &str) -> String {
        let mut url = format!("{}{}", config::API_BASE_URL, path);
        if let Some(user_id) = &self.user_id
            && !path.contains("user_id=")
        {
            url.push(if path.contains('?') { '&' } else { '?' });
            url.push_str("user_id=");
            url.push_str(user_id);
        }
        url
    }
}

async fn unwrap_envelope<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
    let ok = response.ok();
    let status = response.status();

    let envelope = response.json::<Envelope<T>>().await.map_err(|e| {
        console::error_1(&format!("unparseable response body: {e}").into());
        RequestError::InvalidBody
    })?;

    if !ok {
        let message = envelope
            .error_message()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(RequestError::Backend(message));
    }

    envelope.into_result().map_err(RequestError::Backend)
}

/// Keeps the loading flag raised while a request is in flight. The flag
/// drops with the guard, so early returns and failures clear it too.
struct LoadingGuard {
    dispatch: Callback<AppAction>,
}

impl LoadingGuard {
    fn hold(dispatch: &Callback<AppAction>) -> Self {
        dispatch.emit(AppAction::RequestStarted);
        Self {
            dispatch: dispatch.clone(),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.dispatch.emit(AppAction::RequestFinished);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn api_for(user_id: Option<&str>) -> Api {
        Api {
            user_id: user_id.map(str::to_string),
            dispatch: Callback::noop(),
        }
    }

    #[test]
    fn test_url_appends_user_id() {
        let api = api_for(Some("u-1"));
        assert_eq!(
            api.url("/listings"),
            format!("{}/listings?user_id=u-1", config::API_BASE_URL)
        );
    }

    #[test]
    fn test_url_extends_existing_query() {
        let api = api_for(Some("u-1"));
        assert_eq!(
            api.url("/listings?status=pending"),
            format!("{}/listings?status=pending&user_id=u-1", config::API_BASE_URL)
        );
    }

    #[test]
    fn test_url_respects_caller_supplied_user_id() {
        let api = api_for(Some("u-1"));
        assert_eq!(
            api.url("/users?user_id=u-9"),
            format!("{}/users?user_id=u-9", config::API_BASE_URL)
        );
    }

    #[test]
    fn test_url_without_session_is_untouched() {
        let api = api_for(None);
        assert_eq!(
            api.url("/dashboard/farmer/u-1"),
            format!("{}/dashboard/farmer/u-1", config::API_BASE_URL)
        );
    }

    fn recording_dispatch(log: &Rc<RefCell<Vec<AppAction>>>) -> Callback<AppAction> {
        let log = log.clone();
        Callback::from(move |action| log.borrow_mut().push(action))
    }

    fn counter(log: &Rc<RefCell<Vec<AppAction>>>) -> i32 {
        log.borrow()
            .iter()
            .map(|action| match action {
                AppAction::RequestStarted => 1,
                AppAction::RequestFinished => -1,
                _ => 0,
            })
            .sum()
    }

    #[test]
    fn test_loading_guard_clears_on_normal_drop() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let _guard = LoadingGuard::hold(&recording_dispatch(&log));
            assert_eq!(counter(&log), 1);
        }
        assert_eq!(counter(&log), 0);
    }

    #[test]
    fn test_loading_guard_clears_on_early_return() {
        fn fails_midway(dispatch: &Callback<AppAction>) -> Result<()> {
            let _guard = LoadingGuard::hold(dispatch);
            Err(RequestError::InvalidBody)?;
            Ok(())
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let result = fails_midway(&recording_dispatch(&log));

        assert!(result.is_err());
        assert_eq!(counter(&log), 0);
    }
}
