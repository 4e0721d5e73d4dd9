//! Transient notification stack.
//!
//! Alerts arrive through the app state and auto-dismiss on a timer; the
//! close button dismisses them early.

use yew::prelude::*;

use crate::state::{AppAction, use_app_state};

#[function_component(AlertStack)]
pub fn alert_stack() -> Html {
    let state = use_app_state();

    html! {
        <div class="alert-container">
            { for state.alerts.iter().map(|alert| {
                let onclick = {
                    let state = state.clone();
                    let id = alert.id;
                    Callback::from(move |_: MouseEvent| {
                        state.dispatch(AppAction::AlertDismissed(id));
                    })
                };

                html! {
                    <div key={alert.id.to_string()} class={classes!("alert", alert.kind.class())}>
                        <span>{ &alert.text }</span>
                        <button class="alert-close" {onclick}>{ "\u{00d7}" }</button>
                    </div>
                }
            })}
        </div>
    }
}
