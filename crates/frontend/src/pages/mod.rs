//! Page components.

mod buyer;
mod farmer;
mod landing;
mod login;
mod signup;

pub use buyer::BuyerPage;
pub use farmer::FarmerPage;
pub use landing::LandingPage;
pub use login::LoginPage;
pub use signup::SignupPage;

use yew::prelude::*;
use yew_router::prelude::Navigator;

use crate::app::Route;
use crate::auth;
use crate::state::{AppAction, AppStateContext};

/// Require a live session, re-validated against the identity service;
/// bounce to the landing page otherwise.
pub(crate) async fn ensure_session(state: &AppStateContext, navigator: &Navigator) -> bool {
    let Some(session) = state.session.clone() else {
        navigator.push(&Route::Landing);
        return false;
    };

    if auth::current_user(&session.access_token).await.is_err() {
        state.dispatch(AppAction::SignedOut);
        navigator.push(&Route::Landing);
        return false;
    }

    true
}

/// Controlled-input handler writing the field's value into `handle`.
pub(crate) fn text_setter(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        handle.set(input.value());
    })
}

/// Sign-out control handler: clears local session state and returns to
/// the landing page whatever the identity service says.
pub(crate) fn sign_out_callback(
    state: &AppStateContext,
    navigator: &Navigator,
) -> Callback<MouseEvent> {
    let state = state.clone();
    let navigator = navigator.clone();
    Callback::from(move |_: MouseEvent| {
        let state = state.clone();
        let navigator = navigator.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Some(session) = state.session.clone()
                && let Err(e) = auth::sign_out(&session.access_token).await
            {
                web_sys::console::error_1(&format!("sign-out failed: {e}").into());
            }
            state.dispatch(AppAction::SignedOut);
            navigator.push(&Route::Landing);
        });
    })
}
