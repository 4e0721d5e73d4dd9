//! Wallet top-up modal, shared by both dashboards.

use web_types::AddFunds;
use yew::prelude::*;

use crate::api::Api;
use crate::components::Modal;
use crate::format::parse_amount;
use crate::state::{AlertKind, show_alert, use_app_state};

#[derive(Properties, PartialEq)]
pub struct AddFundsModalProps {
    pub open: bool,
    pub on_close: Callback<()>,
    /// Fired after a successful top-up so the owning dashboard refreshes.
    pub on_added: Callback<()>,
}

#[function_component(AddFundsModal)]
pub fn add_funds_modal(props: &AddFundsModalProps) -> Html {
    let state = use_app_state();
    let amount = use_state(String::new);

    let on_amount = {
        let amount = amount.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            amount.set(input.value());
        })
    };

    let onsubmit = {
        let state = state.clone();
        let amount = amount.clone();
        let on_close = props.on_close.clone();
        let on_added = props.on_added.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let parsed = match parse_amount(amount.as_str(), "amount") {
                Ok(value) => value,
                Err(message) => {
                    show_alert(&state, AlertKind::Error, message);
                    return;
                }
            };

            let state = state.clone();
            let amount = amount.clone();
            let on_close = on_close.clone();
            let on_added = on_added.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let api = Api::from_state(&state);
                match api
                    .post::<serde_json::Value, _>("/wallet/add-funds", &AddFunds { amount: parsed })
                    .await
                {
                    Ok(_) => {
                        show_alert(&state, AlertKind::Success, "Funds added successfully!");
                        amount.set(String::new());
                        on_close.emit(());
                        on_added.emit(());
                    }
                    Err(e) => show_alert(&state, AlertKind::Error, format!("Error: {e}")),
                }
            });
        })
    };

    html! {
        <Modal
            title="Add Funds"
            open={props.open}
            on_close={props.on_close.reform(|_: MouseEvent| ())}
        >
            <form {onsubmit}>
                <label>
                    { "Amount (₹)" }
                    <input
                        type="number"
                        min="1"
                        step="0.01"
                        value={(*amount).clone()}
                        oninput={on_amount}
                        required={true}
                    />
                </label>
                <button type="submit" class="btn btn-primary">{ "Add Funds" }</button>
            </form>
        </Modal>
    }
}
