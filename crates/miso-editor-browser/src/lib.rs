//! Browser DOM layer for the miso blog pages.
//!
//! Thin shim between page events and `miso-editor-core` / `miso-common`. It
//! assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `dom`: `EditableRegion` / `ArticleForm` over DOM elements
//! - `editor`: article editor status line, placeholder and submit gate
//! - `toolbar`: formatting commands exported to the toolbar buttons
//! - `like`, `reply`, `signup`: per-page behaviour
//! - `chrome`: navbar, dark mode, loader
//!
//! Every part mounts only when its elements are on the page, so one module
//! serves all pages.

// Re-export core crate
pub use miso_editor_core;
pub use miso_editor_core::*;

pub mod chrome;
pub mod dom;
pub mod editor;
pub mod like;
pub mod reply;
pub mod signup;
pub mod toolbar;

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use miso_common::{ApiConfig, BlogClient};

pub use dom::{DomArticleForm, DomRegion};
pub use editor::EditorPage;

fn init_tracing() {
    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    let _ = set_global_default(Registry::default().with(wasm_layer));
}

/// Page API config: same origin as the page, browser-managed cookies.
fn page_api_config() -> ApiConfig {
    match gloo_utils::window().location().origin() {
        Ok(origin) => ApiConfig {
            base_url: origin,
            ..Default::default()
        },
        Err(e) => {
            tracing::warn!(error = ?e, "no window origin, using default api config");
            ApiConfig::default()
        }
    }
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    init_tracing();

    let document = gloo_utils::document();
    let client = Rc::new(BlogClient::new(page_api_config()));

    chrome::mount(&document);
    editor::mount(&document, editor::page_config(&document));
    like::mount(&document, client.clone());
    reply::mount(&document, client);
    signup::mount(&document);
}
