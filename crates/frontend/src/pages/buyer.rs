//! Buyer dashboard: marketplace, own proposals, contracts.

use serde_json::Value;
use web_types::{
    BuyerDashboard, Contract, ContractStatus, Listing, NewProposal, Proposal,
};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::Api;
use crate::components::{
    AddFundsModal, Column, DataTable, Modal, RowAction, Spinner, StatCard, status_badge,
};
use crate::format;
use crate::pages::{ensure_session, sign_out_callback, text_setter};
use crate::state::{AlertKind, AppStateContext, show_alert, use_app_state};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Marketplace,
    Proposals,
    Contracts,
}

#[function_component(BuyerPage)]
pub fn buyer_page() -> Html {
    let state = use_app_state();
    let navigator = use_navigator().expect("navigator");
    let snapshot = use_state(|| None::<BuyerDashboard>);
    let section = use_state(|| Section::Marketplace);
    let funds_open = use_state(|| false);
    let contract_view = use_state(|| None::<Contract>);

    // Listing currently targeted by the proposal modal.
    let proposal_target = use_state(|| None::<Listing>);
    let proposal_price = use_state(String::new);
    let payment_terms = use_state(String::new);

    // Guard the session and pull the first snapshot on mount.
    {
        let state = state.clone();
        let navigator = navigator.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                if ensure_session(&state, &navigator).await {
                    load_dashboard(state, snapshot).await;
                }
            });
        });
    }

    let refresh = {
        let state = state.clone();
        let snapshot = snapshot.clone();
        Callback::from(move |_: ()| {
            let state = state.clone();
            let snapshot = snapshot.clone();
            wasm_bindgen_futures::spawn_local(async move {
                load_dashboard(state, snapshot).await;
            });
        })
    };

    let on_make_proposal = {
        let snapshot = snapshot.clone();
        let proposal_target = proposal_target.clone();
        Callback::from(move |id: String| {
            if let Some(dashboard) = snapshot.as_ref()
                && let Some(listing) = dashboard.all_listings.iter().find(|l| l.id == id)
            {
                proposal_target.set(Some(listing.clone()));
            }
        })
    };

    let on_submit_proposal = {
        let state = state.clone();
        let refresh = refresh.clone();
        let proposal_target = proposal_target.clone();
        let proposal_price = proposal_price.clone();
        let payment_terms = payment_terms.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(listing) = (*proposal_target).clone() else {
                return;
            };
            let price = match format::parse_amount(proposal_price.as_str(), "price") {
                Ok(price) => price,
                Err(message) => {
                    show_alert(&state, AlertKind::Error, message);
                    return;
                }
            };

            let payload = NewProposal {
                listing_id: listing.id,
                price,
                payment_terms: (*payment_terms).clone(),
            };

            let state = state.clone();
            let refresh = refresh.clone();
            let proposal_target = proposal_target.clone();
            let proposal_price = proposal_price.clone();
            let payment_terms = payment_terms.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let api = Api::from_state(&state);
                match api.post::<Proposal, _>("/proposals", &payload).await {
                    Ok(_) => {
                        show_alert(&state, AlertKind::Success, "Proposal sent successfully!");
                        proposal_target.set(None);
                        proposal_price.set(String::new());
                        payment_terms.set(String::new());
                        refresh.emit(());
                    }
                    // The modal stays open so the offer can be corrected.
                    Err(e) => show_alert(&state, AlertKind::Error, format!("Error: {e}")),
                }
            });
        })
    };

    let on_sign = {
        let state = state.clone();
        let refresh = refresh.clone();
        Callback::from(move |id: String| {
            let state = state.clone();
            let refresh = refresh.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let api = Api::from_state(&state);
                match api.post_empty::<Value>(&format!("/contracts/{id}/sign")).await {
                    Ok(_) => {
                        show_alert(&state, AlertKind::Success, "Contract signed successfully!");
                        refresh.emit(());
                    }
                    Err(e) => show_alert(&state, AlertKind::Error, format!("Error: {e}")),
                }
            });
        })
    };

    let on_view_contract = {
        let snapshot = snapshot.clone();
        let contract_view = contract_view.clone();
        Callback::from(move |id: String| {
            if let Some(dashboard) = snapshot.as_ref()
                && let Some(contract) = dashboard.contracts.iter().find(|c| c.id == id)
            {
                contract_view.set(Some(contract.clone()));
            }
        })
    };

    let Some(dashboard) = snapshot.as_ref() else {
        return html! { <Spinner /> };
    };

    let marketplace_columns = vec![
        Column::new("Farmer", |l: &Listing| {
            l.farmer_name.clone().unwrap_or_default()
        }),
        Column::new("Crop Type", |l: &Listing| l.crop_type.clone()),
        Column::new("Quantity", |l: &Listing| l.quantity.to_string()),
        Column::new("Delivery Date", |l: &Listing| l.delivery_date.clone()),
        Column::new("Expected Price", |l: &Listing| format::amount(l.expected_price)).prefix("₹"),
    ];
    let marketplace_actions = vec![RowAction::new(
        "Make Proposal",
        "btn-primary",
        on_make_proposal,
    )];

    let proposal_columns = vec![
        Column::new("Crop Type", |p: &Proposal| p.crop_type.clone()),
        Column::new("Farmer", |p: &Proposal| p.counterpart_name.clone()),
        Column::new("My Price", |p: &Proposal| format::amount(p.price)).prefix("₹"),
        Column::new("Payment Terms", |p: &Proposal| p.payment_terms.clone()),
        Column::new("Status", |p: &Proposal| p.status.to_string()).render(status_badge),
        Column::new("Date", |p: &Proposal| format::short_date(&p.created_at)),
    ];

    let contract_columns = vec![
        Column::new("Crop Type", |c: &Contract| c.crop_type.clone()),
        Column::new("Farmer", |c: &Contract| c.counterpart_name.clone()),
        Column::new("Amount", |c: &Contract| format::amount(c.amount)).prefix("₹"),
        Column::new("Status", |c: &Contract| c.status.to_string()).render(status_badge),
    ];
    let contract_actions = vec![
        RowAction::new("View", "btn-primary", on_view_contract),
        RowAction::new("Sign", "btn-success", on_sign)
            .when(|c: &Contract| c.status == ContractStatus::Drafted),
    ];

    let open_funds = {
        let funds_open = funds_open.clone();
        Callback::from(move |_: MouseEvent| funds_open.set(true))
    };
    let close_funds = {
        let funds_open = funds_open.clone();
        Callback::from(move |_: ()| funds_open.set(false))
    };
    let close_proposal = {
        let proposal_target = proposal_target.clone();
        Callback::from(move |_: MouseEvent| proposal_target.set(None))
    };
    let close_contract_view = {
        let contract_view = contract_view.clone();
        Callback::from(move |_: MouseEvent| contract_view.set(None))
    };

    let on_price = text_setter(&proposal_price);
    let on_terms = {
        let payment_terms = payment_terms.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            payment_terms.set(input.value());
        })
    };

    html! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>{ "Buyer Dashboard" }</h1>
                <div class="stats-grid">
                    <StatCard label="Signed in as" value={dashboard.user.name.clone()} />
                    <StatCard
                        label="Wallet Balance"
                        value={format!("₹{}", format::balance(dashboard.wallet.as_ref().map(|w| w.balance)))}
                        action_label="Add Funds"
                        on_action={open_funds}
                    />
                </div>
                <button
                    class="btn btn-secondary"
                    onclick={sign_out_callback(&state, &navigator)}
                >
                    { "Log Out" }
                </button>
            </header>

            <nav class="section-nav">
                { section_button(&section, Section::Marketplace, "Marketplace") }
                { section_button(&section, Section::Proposals, "My Proposals") }
                { section_button(&section, Section::Contracts, "Contracts") }
            </nav>

            {
                match *section {
                    Section::Marketplace => html! {
                        <DataTable<Listing>
                            records={dashboard.all_listings.clone()}
                            columns={marketplace_columns}
                            actions={marketplace_actions}
                            empty_text="No crops on the market right now."
                        />
                    },
                    Section::Proposals => html! {
                        <DataTable<Proposal>
                            records={dashboard.my_proposals.clone()}
                            columns={proposal_columns}
                            empty_text="You have not made any proposals yet."
                        />
                    },
                    Section::Contracts => html! {
                        <DataTable<Contract>
                            records={dashboard.contracts.clone()}
                            columns={contract_columns}
                            actions={contract_actions}
                            empty_text="No contracts yet."
                        />
                    },
                }
            }

            <Modal
                title="Make Proposal"
                open={proposal_target.is_some()}
                on_close={close_proposal}
            >
                if let Some(listing) = proposal_target.as_ref() {
                    <>
                    <div class="crop-details">
                        <h4>{ listing.crop_type.clone() }</h4>
                        <p>{ format!("Quantity: {} units", listing.quantity) }</p>
                        <p>{ format!("Expected Price: ₹{}", format::amount(listing.expected_price)) }</p>
                        <p>{ format!("Delivery Date: {}", listing.delivery_date) }</p>
                    </div>
                    <form onsubmit={on_submit_proposal}>
                        <label>
                            { "Your Price (₹)" }
                            <input
                                type="number"
                                min="1"
                                step="0.01"
                                value={(*proposal_price).clone()}
                                oninput={on_price}
                                required={true}
                            />
                        </label>
                        <label>
                            { "Payment Terms" }
                            <textarea
                                value={(*payment_terms).clone()}
                                oninput={on_terms}
                                required={true}
                            />
                        </label>
                        <button type="submit" class="btn btn-primary">
                            { "Send Proposal" }
                        </button>
                    </form>
                    </>
                }
            </Modal>

            <AddFundsModal
                open={*funds_open}
                on_close={close_funds}
                on_added={refresh.clone()}
            />

            <Modal
                title="Contract"
                open={contract_view.is_some()}
                on_close={close_contract_view}
            >
                if let Some(contract) = contract_view.as_ref() {
                    <dl class="contract-detail">
                        <dt>{ "Crop" }</dt>
                        <dd>{ contract.crop_type.clone() }</dd>
                        <dt>{ "Farmer" }</dt>
                        <dd>{ contract.counterpart_name.clone() }</dd>
                        <dt>{ "Amount" }</dt>
                        <dd>{ format!("₹{}", format::amount(contract.amount)) }</dd>
                        <dt>{ "Status" }</dt>
                        <dd>{ status_badge(contract.status.as_str()) }</dd>
                    </dl>
                }
            </Modal>
        </div>
    }
}

async fn load_dashboard(state: AppStateContext, snapshot: UseStateHandle<Option<BuyerDashboard>>) {
    let Some(user_id) = state.user_id().map(str::to_string) else {
        return;
    };

    let api = Api::from_state(&state);
    match api
        .get::<BuyerDashboard>(&format!("/dashboard/buyer/{user_id}"))
        .await
    {
        Ok(Some(dashboard)) => snapshot.set(Some(dashboard)),
        Ok(None) | Err(_) => show_alert(&state, AlertKind::Error, "Failed to load dashboard"),
    }
}

fn section_button(section: &UseStateHandle<Section>, target: Section, label: &'static str) -> Html {
    let class = if **section == target {
        "nav-btn active"
    } else {
        "nav-btn"
    };
    let onclick = {
        let section = section.clone();
        Callback::from(move |_: MouseEvent| section.set(target))
    };

    html! {
        <button key={label} {class} {onclick}>{ label }</button>
    }
}
