//! Fintrack Frontend Entry Point

mod alerts;
mod api;
mod app;
mod components;
mod config;
mod context;
mod error;
mod models;
mod notifications;
mod recurrence;
mod schedule;
mod store;
mod tasks;
mod transactions;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load();
    if let Err(e) = ring_logger::init(config.log_level, ring_logger::DEFAULT_CAPACITY) {
        web_sys::console::warn_1(&format!("logger already set: {}", e).into());
    }

    mount_to_body(move || view! { <App config=config /> });
}
