mod animate;
mod api;
mod app;
mod chart;
mod components;
mod config;
mod cookie;
mod dom;
mod error;
mod format;
mod insights;
mod logging;
mod model;
mod pages;
mod plan;
mod results;
mod scroll;
mod submit;
mod transfer;

#[cfg(test)]
mod testing;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, problem) = AppConfig::from_document();
    logging::init(&config.log_filter);
    AppConfig::report(problem);
    tracing::info!("CarbonLens starting");

    leptos::mount::mount_to_body(move || view! { <App config=config.clone() /> });
}
