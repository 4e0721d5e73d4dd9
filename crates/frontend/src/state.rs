//! Application state shared across pages.
//!
//! One reducer-backed state object carries the signed-in session, the
//! number of backend requests in flight, and the visible alerts. It is
//! provided as a context from the app shell and passed explicitly to
//! whatever needs it; session and snapshot values are replaced wholesale,
//! never mutated in place.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::auth::Session;

/// How long an alert stays on screen.
const ALERT_DISMISS_MS: u32 = 5_000;

/// Styling family of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

impl AlertKind {
    pub fn class(&self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Error => "error",
        }
    }
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: u32,
    pub kind: AlertKind,
    pub text: String,
}

/// Page-wide state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub session: Option<Session>,
    pub pending_requests: u32,
    pub alerts: Vec<Alert>,
}

impl AppState {
    /// Identifier of the signed-in user, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user.id.as_str())
    }

    /// Whether any backend request is in flight.
    pub fn loading(&self) -> bool {
        self.pending_requests > 0
    }
}

/// State transitions dispatched through the reducer context.
#[derive(Debug, Clone)]
pub enum AppAction {
    SignedIn(Session),
    SignedOut,
    RequestStarted,
    RequestFinished,
    AlertShown(Alert),
    AlertDismissed(u32),
}

impl Reducible for AppState {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: AppAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            AppAction::SignedIn(session) => next.session = Some(session),
            AppAction::SignedOut => next.session = None,
            AppAction::RequestStarted => next.pending_requests += 1,
            AppAction::RequestFinished => {
                next.pending_requests = next.pending_requests.saturating_sub(1);
            }
            AppAction::AlertShown(alert) => next.alerts.push(alert),
            AppAction::AlertDismissed(id) => next.alerts.retain(|a| a.id != id),
        }
        next.into()
    }
}

pub type AppStateContext = UseReducerHandle<AppState>;

/// The app-wide state context.
#[hook]
pub fn use_app_state() -> AppStateContext {
    use_context::<AppStateContext>().expect("AppState context not provided")
}

thread_local! {
    static NEXT_ALERT_ID: Cell<u32> = const { Cell::new(0) };
}

fn next_alert_id() -> u32 {
    NEXT_ALERT_ID.with(|cell| {
        let id = cell.get();
        cell.set(id.wrapping_add(1));
        id
    })
}

/// Show a transient alert; it auto-dismisses after a few seconds.
pub fn show_alert(state: &AppStateContext, kind: AlertKind, text: impl Into<String>) {
    let alert = Alert {
        id: next_alert_id(),
        kind,
        text: text.into(),
    };
    let id = alert.id;
    state.dispatch(AppAction::AlertShown(alert));

    let state = state.clone();
    Timeout::new(ALERT_DISMISS_MS, move || {
        state.dispatch(AppAction::AlertDismissed(id));
    })
    .forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(state: AppState, action: AppAction) -> AppState {
        (*Rc::new(state).reduce(action)).clone()
    }

    #[test]
    fn test_request_counter_pairs_back_to_zero() {
        let state = reduce(AppState::default(), AppAction::RequestStarted);
        assert!(state.loading());

        let state = reduce(state, AppAction::RequestStarted);
        assert_eq!(state.pending_requests, 2);

        let state = reduce(state, AppAction::RequestFinished);
        let state = reduce(state, AppAction::RequestFinished);
        assert!(!state.loading());
    }

    #[test]
    fn test_request_finished_never_underflows() {
        let state = reduce(AppState::default(), AppAction::RequestFinished);
        assert_eq!(state.pending_requests, 0);
    }

    #[test]
    fn test_alerts_push_and_dismiss() {
        let alert = Alert {
            id: 7,
            kind: AlertKind::Error,
            text: "quantity required".to_string(),
        };

        let state = reduce(AppState::default(), AppAction::AlertShown(alert));
        assert_eq!(state.alerts.len(), 1);
        assert!(state.alerts[0].text.contains("quantity required"));

        let state = reduce(state, AppAction::AlertDismissed(7));
        assert!(state.alerts.is_empty());
    }

    #[test]
    fn test_dismissing_unknown_alert_is_a_noop() {
        let alert = Alert {
            id: 1,
            kind: AlertKind::Success,
            text: "hello".to_string(),
        };

        let state = reduce(AppState::default(), AppAction::AlertShown(alert));
        let state = reduce(state, AppAction::AlertDismissed(99));
        assert_eq!(state.alerts.len(), 1);
    }

    #[test]
    fn test_signed_out_clears_session() {
        let session = Session {
            access_token: "tok".to_string(),
            user: crate::auth::AuthUser {
                id: "u-1".to_string(),
                email: "ravi@example.com".to_string(),
            },
        };

        let state = reduce(AppState::default(), AppAction::SignedIn(session));
        assert_eq!(state.user_id(), Some("u-1"));

        let state = reduce(state, AppAction::SignedOut);
        assert_eq!(state.user_id(), None);
    }
}
