//! Landing page.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;

#[function_component(LandingPage)]
pub fn landing_page() -> Html {
    html! {
        <div class="landing">
            <h1>{ "CropDeal" }</h1>
            <p class="tagline">{ "Contract farming, without the paperwork." }</p>
            <p>
                { "Farmers list their harvest, buyers propose a price, and \
                   signed contracts settle through the platform wallet." }
            </p>
            <div class="landing-actions">
                <Link<Route> to={Route::Login} classes="btn btn-primary">
                    { "Log In" }
                </Link<Route>>
                <Link<Route> to={Route::Signup} classes="btn btn-secondary">
                    { "Sign Up" }
                </Link<Route>>
            </div>
        </div>
    }
}
