//! Page chrome shared by every page: navbar toggle, dark mode and the
//! loading screen.

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Document;

const LOADER_MILLIS: u32 = 3_000;

/// Toggle the `dark` class on `<body>`. Returns whether dark mode is on.
#[wasm_bindgen(js_name = toggleDarkMode)]
pub fn toggle_dark_mode() -> bool {
    let Some(body) = gloo_utils::document().body() else {
        return false;
    };
    body.class_list().toggle("dark").unwrap_or(false)
}

fn mount_navbar(document: &Document) {
    let (Ok(Some(button)), Ok(Some(links))) = (
        document.query_selector(".toggle-button"),
        document.query_selector(".navbar-links"),
    ) else {
        return;
    };
    EventListener::new(&button, "click", move |_| {
        let _ = links.class_list().toggle("active");
    })
    .forget();
}

/// Body gets `animating` while the fullscreen loader shows, then the loader
/// is removed.
fn start_loader(document: &Document) {
    let Some(body) = document.body() else {
        return;
    };
    let _ = body.class_list().add_1("animating");
    let doc = document.clone();
    Timeout::new(LOADER_MILLIS, move || {
        let _ = body.class_list().remove_1("animating");
        if let Ok(Some(loader)) = doc.query_selector(".fullscreen-loader") {
            loader.remove();
        }
    })
    .forget();
}

pub fn mount(document: &Document) {
    mount_navbar(document);
    start_loader(document);
}
