//! Kanban Board Frontend Entry Point

mod actions;
mod api;
mod app;
mod board;
mod components;
mod config;
mod context;
mod gesture;
mod models;
mod reconciler;
mod store;
mod sync;

use app::App;
use config::BoardConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match BoardConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (BoardConfig::default(), Some(e)),
    };
    let _ = console_logger::init_logger("Kanban", console_logger::parse_level(&config.log_level));
    if let Some(e) = config_error {
        log::warn!("[CONFIG] Ignoring malformed #kanban-config block: {}", e);
    }
    log::info!("[APP] Starting, api={} timeout={}ms", config.api_base_url, config.request_timeout_ms);

    mount_to_body(move || view! { <App config=config /> });
}
