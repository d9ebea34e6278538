//! MES Dashboard Frontend Entry Point

mod api;
mod app;
mod board;
mod components;
mod config;
mod dropzone;
mod events;
mod gesture;
mod models;
mod notify;
mod store;
mod transition;

#[cfg(test)]
mod testing;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = config::load_config();
    if let Err(e) = rolling_logger::init_logger(config.log_level_filter(), config.log_capacity) {
        web_sys::console::error_1(&format!("logger init failed: {}", e).into());
    }
    if let Some(e) = config_error {
        log::warn!("{}; using defaults", e);
    }
    log::info!("dashboard starting, backend at {:?}", config.base_url);

    mount_to_body(move || view! { <App config=config.clone()/> });
}
