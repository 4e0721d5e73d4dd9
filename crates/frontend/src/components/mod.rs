//! Reusable UI components.

mod add_funds;
mod alerts;
mod data_table;
mod loading;
mod modal;
mod stat_card;

pub use add_funds::AddFundsModal;
pub use alerts::AlertStack;
pub use data_table::{Column, DataTable, RowAction, status_badge};
pub use loading::{LoadingOverlay, Spinner};
pub use modal::Modal;
pub use stat_card::StatCard;
