//! # brushline-app
//!
//! Leptos front-end rendering a main chart and its brush into SVG.
//!
//! ## Modules
//!
//! - `app` - root component, theme context and chart configurations
//! - `dom` - `SceneHost` backed by browser SVG elements
//! - `surface` - pointer, frame and legend wiring for a mounted chart pair

mod app;
mod dom;
mod surface;

use app::App;

fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();

    #[cfg(not(target_arch = "wasm32"))]
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
}

fn main() {
    console_error_panic_hook::set_once();
    init_logging();

    tracing::info!("starting brushline");
    leptos::mount::mount_to_body(App);
}
