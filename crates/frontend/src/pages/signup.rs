//! Signup page: identity account plus backend profile.
//!
//! If the backend profile creation fails after the identity account was
//! created, the account is left orphaned; the error is surfaced but not
//! rolled back.

use gloo_timers::callback::Timeout;
use web_types::{NewUser, Role, UserProfile};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::Api;
use crate::app::Route;
use crate::auth;
use crate::pages::text_setter;
use crate::state::{AlertKind, AppStateContext, show_alert, use_app_state};

const REDIRECT_DELAY_MS: u32 = 2_000;

#[function_component(SignupPage)]
pub fn signup_page() -> Html {
    let state = use_app_state();
    let navigator = use_navigator().expect("navigator");
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let role = use_state(|| Role::Farmer);
    let submitting = use_state(|| false);

    let on_name = text_setter(&name);
    let on_email = text_setter(&email);
    let on_password = text_setter(&password);

    let on_role = {
        let role = role.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            role.set(match select.value().as_str() {
                "buyer" => Role::Buyer,
                _ => Role::Farmer,
            });
        })
    };

    let onsubmit = {
        let state = state.clone();
        let navigator = navigator.clone();
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let role = role.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            submitting.set(true);

            let state = state.clone();
            let navigator = navigator.clone();
            let name = name.clone();
            let email = email.clone();
            let password = password.clone();
            let role = *role;
            let submitting = submitting.clone();
            wasm_bindgen_futures::spawn_local(async move {
                run_signup(&state, &navigator, &name, &email, &password, role).await;
                submitting.set(false);
            });
        })
    };

    html! {
        <div class="auth-page">
            <h1>{ "Sign Up" }</h1>
            <form {onsubmit}>
                <label>
                    { "Name" }
                    <input value={(*name).clone()} oninput={on_name} required={true} />
                </label>
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
                <label>
                    { "I am a" }
                    <select onchange={on_role}>
                        <option value="farmer" selected={*role == Role::Farmer}>
                            { "Farmer" }
                        </option>
                        <option value="buyer" selected={*role == Role::Buyer}>
                            { "Buyer" }
                        </option>
                    </select>
                </label>
                <button type="submit" class="btn btn-primary" disabled={*submitting}>
                    { if *submitting { "Creating Account..." } else { "Sign Up" } }
                </button>
            </form>
            <p>
                <Link<Route> to={Route::Login}>{ "Already registered? Log in" }</Link<Route>>
            </p>
        </div>
    }
}

async fn run_signup(
    state: &AppStateContext,
    navigator: &Navigator,
    name: &UseStateHandle<String>,
    email: &UseStateHandle<String>,
    password: &UseStateHandle<String>,
    role: Role,
) {
    let user = match auth::sign_up(email, password).await {
        Ok(user) => user,
        Err(e) => {
            let friendly = auth::classify_signup_error(&e.to_string());
            show_alert(state, AlertKind::Error, format!("Signup failed: {friendly}"));
            return;
        }
    };

    let api = Api::for_user(state, user.id);
    let profile = NewUser {
        name: (**name).clone(),
        role,
    };
    match api.post::<UserProfile, _>("/users", &profile).await {
        Ok(_) => {
            show_alert(
                state,
                AlertKind::Success,
                "Account created successfully! Please check your email for verification.",
            );
            name.set(String::new());
            email.set(String::new());
            password.set(String::new());

            let navigator = navigator.clone();
            Timeout::new(REDIRECT_DELAY_MS, move || {
                navigator.push(&Route::Login);
            })
            .forget();
        }
        Err(e) => {
            web_sys::console::error_1(&format!("profile creation failed: {e}").into());
            show_alert(
                state,
                AlertKind::Error,
                "Account created but profile setup failed. Please contact support.",
            );
        }
    }
}
