//! Loading indicators.

use yew::prelude::*;

use crate::state::use_app_state;

/// Inline spinner.
#[function_component(Spinner)]
pub fn spinner() -> Html {
    html! {
        <div class="loading">
            <div class="spinner"></div>
        </div>
    }
}

/// Full-page overlay shown while any backend request is in flight.
#[function_component(LoadingOverlay)]
pub fn loading_overlay() -> Html {
    let state = use_app_state();

    if !state.loading() {
        return Html::default();
    }

    html! {
        <div class="loading-overlay">
            <Spinner />
        </div>
    }
}
