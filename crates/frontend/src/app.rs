//! Application shell: routing and shared state.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::{AlertStack, LoadingOverlay};
use crate::pages::{BuyerPage, FarmerPage, LandingPage, LoginPage, SignupPage};
use crate::state::{AppState, AppStateContext};

/// Application routes.
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Landing,
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    #[at("/farmer")]
    Farmer,
    #[at("/buyer")]
    Buyer,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Route switch function.
fn switch(route: Route) -> Html {
    match route {
        Route::Landing => html! { <LandingPage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Signup => html! { <SignupPage /> },
        Route::Farmer => html! { <FarmerPage /> },
        Route::Buyer => html! { <BuyerPage /> },
        Route::NotFound => html! {
            <div class="card">
                <h1>{"404 - Page Not Found"}</h1>
                <p>{"The page you're looking for doesn't exist."}</p>
            </div>
        },
    }
}

/// Main application component.
#[function_component(App)]
pub fn app() -> Html {
    let state = use_reducer(AppState::default);

    html! {
        <ContextProvider<AppStateContext> context={state}>
            <BrowserRouter>
                <LoadingOverlay />
                <AlertStack />
                <main class="app-container">
                    <Switch<Route> render={switch} />
                </main>
            </BrowserRouter>
        </ContextProvider<AppStateContext>>
    }
}
