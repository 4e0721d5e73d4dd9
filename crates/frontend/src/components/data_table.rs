//! Generic data table: records in, rows out.
//!
//! Columns project one field of a record into a cell; actions become
//! buttons in a trailing cell, gated by an optional per-record predicate.
//! Rendering is a pure projection of the input order: no sorting,
//! filtering, pagination, or diffing against prior content.

use std::rc::Rc;

use web_types::Identified;
use yew::prelude::*;

/// Projects one field of a record into displayable cell content.
pub struct Column<T> {
    label: &'static str,
    prefix: Option<&'static str>,
    value: Rc<dyn Fn(&T) -> String>,
    render: Option<Rc<dyn Fn(&str) -> Html>>,
}

impl<T> Column<T> {
    pub fn new(label: &'static str, value: impl Fn(&T) -> String + 'static) -> Self {
        Self {
            label,
            prefix: None,
            value: Rc::new(value),
            render: None,
        }
    }

    /// Prepend `prefix` to the cell content.
    pub fn prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Replace the plain-text cell body with rendered markup. The prefix,
    /// if any, still goes in front of the rendered body.
    pub fn render(mut self, render: impl Fn(&str) -> Html + 'static) -> Self {
        self.render = Some(Rc::new(render));
        self
    }

    /// Cell text for columns without a render transform.
    fn text(&self, record: &T) -> String {
        match self.prefix {
            Some(prefix) => format!("{prefix}{}", (self.value)(record)),
            None => (self.value)(record),
        }
    }

    fn cell(&self, record: &T) -> Html {
        match &self.render {
            Some(render) => html! {
                <td>{ self.prefix.unwrap_or("") }{ render(&(self.value)(record)) }</td>
            },
            None => html! { <td>{ self.text(record) }</td> },
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            prefix: self.prefix,
            value: Rc::clone(&self.value),
            render: self.render.clone(),
        }
    }
}

impl<T> PartialEq for Column<T> {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.prefix == other.prefix
            && Rc::ptr_eq(&self.value, &other.value)
            && match (&self.render, &other.render) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

/// A per-row control dispatching the record's id when clicked.
pub struct RowAction<T> {
    label: &'static str,
    class: &'static str,
    onclick: Callback<String>,
    when: Option<Rc<dyn Fn(&T) -> bool>>,
}

impl<T> RowAction<T> {
    pub fn new(label: &'static str, class: &'static str, onclick: Callback<String>) -> Self {
        Self {
            label,
            class,
            onclick,
            when: None,
        }
    }

    /// Only render the control when `predicate` holds for the record.
    pub fn when(mut self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.when = Some(Rc::new(predicate));
        self
    }

    fn applies(&self, record: &T) -> bool {
        self.when.as_ref().is_none_or(|predicate| predicate(record))
    }

    fn button(&self, id: &str) -> Html {
        let id = id.to_string();
        let onclick = self.onclick.reform(move |_: MouseEvent| id.clone());
        html! {
            <button class={classes!("btn", self.class)} {onclick}>{ self.label }</button>
        }
    }
}

impl<T> Clone for RowAction<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            class: self.class,
            onclick: self.onclick.clone(),
            when: self.when.clone(),
        }
    }
}

impl<T> PartialEq for RowAction<T> {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.class == other.class
            && self.onclick == other.onclick
            && match (&self.when, &other.when) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

fn visible_actions<'a, T>(actions: &'a [RowAction<T>], record: &T) -> Vec<&'a RowAction<T>> {
    actions
        .iter()
        .filter(|action| action.applies(record))
        .collect()
}

fn table_body<T: Identified>(
    records: &[T],
    columns: &[Column<T>],
    actions: &[RowAction<T>],
) -> Html {
    html! {
        <tbody>
            { for records.iter().map(|record| html! {
                <tr key={record.id().to_string()}>
                    { for columns.iter().map(|column| column.cell(record)) }
                    if !actions.is_empty() {
                        <td class="actions">
                            { for visible_actions(actions, record)
                                .into_iter()
                                .map(|action| action.button(record.id())) }
                        </td>
                    }
                </tr>
            })}
        </tbody>
    }
}

#[derive(Properties, PartialEq)]
pub struct DataTableProps<T: PartialEq> {
    pub records: Vec<T>,
    pub columns: Vec<Column<T>>,
    #[prop_or_default]
    pub actions: Vec<RowAction<T>>,
    #[prop_or("Nothing here yet.")]
    pub empty_text: &'static str,
}

/// Table of `records`, one row per record in input order. An empty
/// record sequence renders an empty body and reveals the empty-state
/// element instead.
#[function_component(DataTable)]
pub fn data_table<T>(props: &DataTableProps<T>) -> Html
where
    T: Identified + PartialEq + 'static,
{
    html! {
        <div class="data-table">
            <table>
                <thead>
                    <tr>
                        { for props.columns.iter().map(|column| html! { <th>{ column.label }</th> }) }
                        if !props.actions.is_empty() {
                            <th>{ "Actions" }</th>
                        }
                    </tr>
                </thead>
                { table_body(&props.records, &props.columns, &props.actions) }
            </table>
            if props.records.is_empty() {
                <p class="empty-state">{ props.empty_text }</p>
            }
        </div>
    }
}

/// Render transform wrapping a status value in a classed badge.
pub fn status_badge(raw: &str) -> Html {
    html! {
        <span class={classes!("status", raw.to_string())}>{ raw.to_string() }</span>
    }
}

#[cfg(test)]
mod tests {
    use web_types::{Listing, ListingStatus, Proposal, ProposalStatus};

    use super::*;
    use crate::format;

    fn listing() -> Listing {
        Listing {
            id: "1".to_string(),
            crop_type: "Wheat".to_string(),
            quantity: 10,
            delivery_date: "2024-06-01".to_string(),
            expected_price: 500.0,
            status: ListingStatus::Pending,
            farmer_name: None,
        }
    }

    fn proposal(status: ProposalStatus) -> Proposal {
        Proposal {
            id: "p-1".to_string(),
            crop_type: "Wheat".to_string(),
            price: 450.0,
            payment_terms: "on delivery".to_string(),
            status,
            counterpart_name: "Asha".to_string(),
            created_at: chrono::DateTime::parse_from_rfc3339("2024-05-01T08:30:00Z")
                .unwrap()
                .into(),
        }
    }

    #[test]
    fn test_prefix_is_prepended_to_cell_text() {
        let column =
            Column::new("Expected Price", |l: &Listing| format::amount(l.expected_price))
                .prefix("₹");

        assert_eq!(column.text(&listing()), "₹500");
    }

    #[test]
    fn test_render_transform_keeps_the_prefix_in_front() {
        let column = Column::new("Status", |l: &Listing| l.status.to_string())
            .prefix("* ")
            .render(status_badge);

        let expected = html! {
            <td>{ "* " }{ status_badge("pending") }</td>
        };
        assert_eq!(column.cell(&listing()), expected);
    }

    #[test]
    fn test_action_hidden_when_predicate_fails() {
        let accept = RowAction::new("Accept", "btn-success", Callback::noop())
            .when(|p: &Proposal| p.status == ProposalStatus::Pending);
        let actions = vec![accept];

        assert_eq!(visible_actions(&actions, &proposal(ProposalStatus::Pending)).len(), 1);
        assert!(visible_actions(&actions, &proposal(ProposalStatus::Accepted)).is_empty());
    }

    #[test]
    fn test_action_without_predicate_is_always_visible() {
        let view = RowAction::new("View", "btn-primary", Callback::noop());
        let actions = vec![view];

        assert_eq!(visible_actions(&actions, &proposal(ProposalStatus::Rejected)).len(), 1);
    }

    #[test]
    fn test_rendering_twice_is_identical() {
        let columns = vec![
            Column::new("Crop Type", |l: &Listing| l.crop_type.clone()),
            Column::new("Expected Price", |l: &Listing| format::amount(l.expected_price))
                .prefix("₹"),
        ];
        let actions = vec![RowAction::new("View", "btn-primary", Callback::noop())];
        let records = vec![listing()];

        let first = table_body(&records, &columns, &actions);
        let second = table_body(&records, &columns, &actions);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_records_render_an_empty_body() {
        let columns = vec![Column::new("Crop Type", |l: &Listing| l.crop_type.clone())];

        let body = table_body(&[] as &[Listing], &columns, &[]);
        assert_eq!(body, html! { <tbody>{ for Vec::<Html>::new() }</tbody> });
    }
}
