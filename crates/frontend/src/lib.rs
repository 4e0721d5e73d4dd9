//! CropDeal Dashboard - Yew WASM Frontend
//!
//! Browser client for the crop contract marketplace: identity sign-in,
//! role-scoped dashboards, and the listing/proposal/contract/wallet forms.

mod api;
mod app;
mod auth;
mod components;
mod config;
mod format;
mod pages;
mod state;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn main() {
    yew::Renderer::<App>::new().render();
}
