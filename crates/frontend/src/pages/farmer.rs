//! Farmer dashboard: own listings, incoming proposals, contracts.

use serde_json::Value;
use web_types::{
    Contract, ContractStatus, FarmerDashboard, GenerateContract, Listing, NewListing, Proposal,
    ProposalStatus,
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
    Listings,
    Proposals,
    Contracts,
    NewListing,
}

#[function_component(FarmerPage)]
pub fn farmer_page() -> Html {
    let state = use_app_state();
    let navigator = use_navigator().expect("navigator");
    let snapshot = use_state(|| None::<FarmerDashboard>);
    let section = use_state(|| Section::Listings);
    let funds_open = use_state(|| false);
    let contract_view = use_state(|| None::<Contract>);

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

    let on_accept = {
        let state = state.clone();
        let refresh = refresh.clone();
        Callback::from(move |id: String| {
            let state = state.clone();
            let refresh = refresh.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let api = Api::from_state(&state);
                match api.put_empty::<Value>(&format!("/proposals/{id}/accept")).await {
                    Ok(_) => {
                        show_alert(&state, AlertKind::Success, "Proposal accepted!");
                        refresh.emit(());
                    }
                    Err(e) => show_alert(&state, AlertKind::Error, format!("Error: {e}")),
                }
            });
        })
    };

    let on_generate = {
        let state = state.clone();
        let refresh = refresh.clone();
        Callback::from(move |id: String| {
            let state = state.clone();
            let refresh = refresh.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let api = Api::from_state(&state);
                let payload = GenerateContract { proposal_id: id };
                match api.post::<Value, _>("/contracts/generate", &payload).await {
                    Ok(_) => {
                        show_alert(&state, AlertKind::Success, "Contract generated successfully!");
                        refresh.emit(());
                    }
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

    let on_view_proposals = {
        let section = section.clone();
        Callback::from(move |_: String| section.set(Section::Proposals))
    };

    // New-listing form fields.
    let crop_type = use_state(String::new);
    let quantity = use_state(String::new);
    let delivery_date = use_state(String::new);
    let expected_price = use_state(String::new);

    let on_create_listing = {
        let state = state.clone();
        let refresh = refresh.clone();
        let section = section.clone();
        let crop_type = crop_type.clone();
        let quantity = quantity.clone();
        let delivery_date = delivery_date.clone();
        let expected_price = expected_price.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let payload = match listing_payload(
                &crop_type,
                &quantity,
                &delivery_date,
                &expected_price,
            ) {
                Ok(payload) => payload,
                Err(message) => {
                    show_alert(&state, AlertKind::Error, message);
                    return;
                }
            };

            let state = state.clone();
            let refresh = refresh.clone();
            let section = section.clone();
            let crop_type = crop_type.clone();
            let quantity = quantity.clone();
            let delivery_date = delivery_date.clone();
            let expected_price = expected_price.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let api = Api::from_state(&state);
                match api.post::<Listing, _>("/listings", &payload).await {
                    Ok(_) => {
                        show_alert(&state, AlertKind::Success, "Listing created successfully!");
                        crop_type.set(String::new());
                        quantity.set(String::new());
                        delivery_date.set(String::new());
                        expected_price.set(String::new());
                        section.set(Section::Listings);
                        refresh.emit(());
                    }
                    // The form keeps its values so the input can be fixed.
                    Err(e) => show_alert(&state, AlertKind::Error, format!("Error: {e}")),
                }
            });
        })
    };

    let Some(dashboard) = snapshot.as_ref() else {
        return html! { <Spinner /> };
    };

    let listing_columns = vec![
        Column::new("Crop Type", |l: &Listing| l.crop_type.clone()),
        Column::new("Quantity", |l: &Listing| l.quantity.to_string()),
        Column::new("Delivery Date", |l: &Listing| l.delivery_date.clone()),
        Column::new("Expected Price", |l: &Listing| format::amount(l.expected_price)).prefix("₹"),
        Column::new("Status", |l: &Listing| l.status.to_string()).render(status_badge),
    ];
    let listing_actions = vec![RowAction::new(
        "View Proposals",
        "btn-primary",
        on_view_proposals,
    )];

    let proposal_columns = vec![
        Column::new("Crop Type", |p: &Proposal| p.crop_type.clone()),
        Column::new("Buyer", |p: &Proposal| p.counterpart_name.clone()),
        Column::new("Proposed Price", |p: &Proposal| format::amount(p.price)).prefix("₹"),
        Column::new("Payment Terms", |p: &Proposal| p.payment_terms.clone()),
        Column::new("Status", |p: &Proposal| p.status.to_string()).render(status_badge),
    ];
    let proposal_actions = vec![
        RowAction::new("Accept", "btn-success", on_accept)
            .when(|p: &Proposal| p.status == ProposalStatus::Pending),
        RowAction::new("Generate Contract", "btn-primary", on_generate)
            .when(|p: &Proposal| p.status == ProposalStatus::Accepted),
    ];

    let contract_columns = vec![
        Column::new("Crop Type", |c: &Contract| c.crop_type.clone()),
        Column::new("Buyer", |c: &Contract| c.counterpart_name.clone()),
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
    let close_contract_view = {
        let contract_view = contract_view.clone();
        Callback::from(move |_: MouseEvent| contract_view.set(None))
    };

    html! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>{ "Farmer Dashboard" }</h1>
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
                { section_button(&section, Section::Listings, "My Listings") }
                { section_button(&section, Section::Proposals, "Proposals") }
                { section_button(&section, Section::Contracts, "Contracts") }
                { section_button(&section, Section::NewListing, "New Listing") }
            </nav>

            {
                match *section {
                    Section::Listings => html! {
                        <DataTable<Listing>
                            records={dashboard.listings.clone()}
                            columns={listing_columns}
                            actions={listing_actions}
                            empty_text="No listings yet. Create one to get started."
                        />
                    },
                    Section::Proposals => html! {
                        <DataTable<Proposal>
                            records={dashboard.proposals.clone()}
                            columns={proposal_columns}
                            actions={proposal_actions}
                            empty_text="No proposals on your listings yet."
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
                    Section::NewListing => html! {
                        <form class="card" onsubmit={on_create_listing}>
                            <label>
                                { "Crop Type" }
                                <input
                                    value={(*crop_type).clone()}
                                    oninput={text_setter(&crop_type)}
                                    required={true}
                                />
                            </label>
                            <label>
                                { "Quantity (units)" }
                                <input
                                    type="number"
                                    min="1"
                                    value={(*quantity).clone()}
                                    oninput={text_setter(&quantity)}
                                    required={true}
                                />
                            </label>
                            <label>
                                { "Delivery Date" }
                                <input
                                    type="date"
                                    value={(*delivery_date).clone()}
                                    oninput={text_setter(&delivery_date)}
                                    required={true}
                                />
                            </label>
                            <label>
                                { "Expected Price (₹)" }
                                <input
                                    type="number"
                                    min="1"
                                    step="0.01"
                                    value={(*expected_price).clone()}
                                    oninput={text_setter(&expected_price)}
                                    required={true}
                                />
                            </label>
                            <button type="submit" class="btn btn-primary">
                                { "Create Listing" }
                            </button>
                        </form>
                    },
                }
            }

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
                        <dt>{ "Buyer" }</dt>
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

async fn load_dashboard(state: AppStateContext, snapshot: UseStateHandle<Option<FarmerDashboard>>) {
    let Some(user_id) = state.user_id().map(str::to_string) else {
        return;
    };

    let api = Api::from_state(&state);
    match api
        .get::<FarmerDashboard>(&format!("/dashboard/farmer/{user_id}"))
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

fn listing_payload(
    crop_type: &str,
    quantity: &str,
    delivery_date: &str,
    expected_price: &str,
) -> Result<NewListing, String> {
    let quantity = format::parse_quantity(quantity, "quantity")?;
    let expected_price = format::parse_amount(expected_price, "expected price")?;

    Ok(NewListing {
        crop_type: crop_type.trim().to_string(),
        quantity,
        delivery_date: delivery_date.to_string(),
        expected_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_payload_coerces_fields() {
        let payload = listing_payload("Rice", "100", "2024-06-01", "500").unwrap();

        assert_eq!(payload.crop_type, "Rice");
        assert_eq!(payload.quantity, 100);
        assert_eq!(payload.expected_price, 500.0);
    }

    #[test]
    fn test_listing_payload_rejects_bad_numbers() {
        assert_eq!(
            listing_payload("Rice", "lots", "2024-06-01", "500"),
            Err("Enter a valid quantity".to_string())
        );
        assert_eq!(
            listing_payload("Rice", "100", "2024-06-01", "cheap"),
            Err("Enter a valid expected price".to_string())
        );
    }
}
