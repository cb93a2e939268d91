//! Signup page: required field check and profile picture preview.

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement, HtmlInputElement};

use miso_common::{missing_required, missing_required_indices};

use crate::dom::{element_value, first_file, read_as_data_url, query_all};

const INPUT_FIELD: &str = ".input-field";
const ERROR_CLASS: &str = "error";

fn field_name(el: &Element, index: usize) -> String {
    el.get_attribute("name")
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| format!("field-{index}"))
}

/// Mark blank required fields. Returns whether the form may be submitted.
fn validate(document: &Document) -> bool {
    let fields: Vec<(Element, String, String)> = query_all(document, INPUT_FIELD)
        .into_iter()
        .enumerate()
        .map(|(i, el)| {
            let name = field_name(&el, i);
            let value = element_value(&el).unwrap_or_default();
            (el, name, value)
        })
        .collect();

    let pairs = || {
        fields
            .iter()
            .map(|(_, name, value)| (name.as_str(), value.as_str()))
    };
    let missing = missing_required_indices(pairs());
    for (i, (el, _, _)) in fields.iter().enumerate() {
        let _ = el
            .class_list()
            .toggle_with_force(ERROR_CLASS, missing.contains(&i));
    }
    if !missing.is_empty() {
        tracing::debug!(missing = ?missing_required(pairs()), "signup blocked");
    }
    missing.is_empty()
}

async fn preview(input: HtmlInputElement, image: HtmlImageElement) {
    let Some(file) = first_file(&input) else {
        return;
    };
    match read_as_data_url(&file).await {
        Ok(url) => image.set_src(&url),
        Err(e) => tracing::warn!(error = %e, "profile picture preview failed"),
    }
}

pub fn mount(document: &Document) {
    // The form holding the required fields.
    let form = document
        .query_selector(INPUT_FIELD)
        .ok()
        .flatten()
        .and_then(|field| field.closest("form").ok().flatten());
    if let Some(form) = form {
        let doc = document.clone();
        EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if !validate(&doc) {
                    event.prevent_default();
                }
            },
        )
        .forget();
    }

    let input = document
        .get_element_by_id("profile_pic")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    let image = document
        .get_element_by_id("profile-pic-preview")
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
    if let (Some(input), Some(image)) = (input, image) {
        let target = input.clone();
        EventListener::new(&target, "change", move |_| {
            wasm_bindgen_futures::spawn_local(preview(input.clone(), image.clone()));
        })
        .forget();
    }
}
