//! LMS Portal - learning management front end
//!
//! Session handling, authenticated API access and role-based route guarding
//! for the LMS REST API, with a Leptos UI on top.

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
