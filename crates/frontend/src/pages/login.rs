//! Login page: sign in, then route by marketplace role.

use web_types::{BuyerDashboard, FarmerDashboard, Role};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::Api;
use crate::app::Route;
use crate::auth;
use crate::state::{AlertKind, AppAction, show_alert, use_app_state};

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let state = use_app_state();
    let navigator = use_navigator().expect("navigator");
    let email = use_state(String::new);
    let password = use_state(String::new);

    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let onsubmit = {
        let state = state.clone();
        let navigator = navigator.clone();
        let email = email.clone();
        let password = password.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let state = state.clone();
            let navigator = navigator.clone();
            let email = (*email).clone();
            let password = (*password).clone();
            wasm_bindgen_futures::spawn_local(async move {
                let session = match auth::sign_in(&email, &password).await {
                    Ok(session) => session,
                    Err(e) => {
                        show_alert(&state, AlertKind::Error, format!("Login failed: {e}"));
                        return;
                    }
                };

                let user_id = session.user.id.clone();
                state.dispatch(AppAction::SignedIn(session));

                let api = Api::for_user(&state, user_id.clone());
                match probe_role(&api, &user_id).await {
                    Some(Role::Farmer) => navigator.push(&Route::Farmer),
                    Some(Role::Buyer) => navigator.push(&Route::Buyer),
                    None => show_alert(
                        &state,
                        AlertKind::Error,
                        "Failed to load user profile. Please try again.",
                    ),
                }
            });
        })
    };

    html! {
        <div class="auth-page">
            <h1>{ "Log In" }</h1>
            <form {onsubmit}>
                <label>
                    { "Email" }
                    <input
                        type="email"
                        value={(*email).clone()}
                        oninput={on_email}
                        required={true}
                    />
                </label>
                <label>
                    { "Password" }
                    <input
                        type="password"
                        value={(*password).clone()}
                        oninput={on_password}
                        required={true}
                    />
                </label>
                <button type="submit" class="btn btn-primary">{ "Log In" }</button>
            </form>
            <p>
                <Link<Route> to={Route::Signup}>{ "Need an account? Sign up" }</Link<Route>>
            </p>
        </div>
    }
}

/// Determine which dashboard an account belongs to: farmer first, then
/// buyer. An account with both profiles lands on the farmer dashboard;
/// one with neither yields `None` and no navigation.
async fn probe_role(api: &Api, user_id: &str) -> Option<Role> {
    if let Ok(Some(dashboard)) = api
        .get::<FarmerDashboard>(&format!("/dashboard/farmer/{user_id}"))
        .await
        && dashboard.user.role == Role::Farmer
    {
        return Some(Role::Farmer);
    }

    match api
        .get::<BuyerDashboard>(&format!("/dashboard/buyer/{user_id}"))
        .await
    {
        Ok(Some(_)) => Some(Role::Buyer),
        _ => None,
    }
}
