//! Task Board Frontend Entry Point

mod app;
mod board;
mod components;
mod config;
mod logging;
mod models;
mod reorder;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AppConfig::from_document() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    logging::init(config.log_level);
    if let Some(e) = config_error {
        log::warn!("[APP] {}; using defaults", e);
    }

    mount_to_body(move || view! { <App config=config /> });
}
