//! Dashboard header card.

use yew::prelude::*;

/// Properties for StatCard.
#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub label: &'static str,
    pub value: String,
    /// Optional control rendered under the value (e.g. "Add Funds").
    #[prop_or_default]
    pub action_label: Option<&'static str>,
    #[prop_or_default]
    pub on_action: Callback<MouseEvent>,
}

/// Value-plus-label card used in the dashboard headers.
#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="card stat-card">
            <div class="stat-value">{ &props.value }</div>
            <div class="stat-label">{ props.label }</div>
            if let Some(label) = props.action_label {
                <button class="btn btn-secondary" onclick={props.on_action.clone()}>
                    { label }
                </button>
            }
        </div>
    }
}
