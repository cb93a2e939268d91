//! Discussion reply forms (`.reply-form form`), posted without leaving the
//! page.

use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, FormData, HtmlFormElement};

use miso_common::{BlogClient, discussion_id_from_action, reply_alert};
use miso_editor_core::PlatformError;

use crate::dom::{alert, js_error, query_all};

/// Text fields of a form. File fields are skipped.
fn form_fields(form: &HtmlFormElement) -> Result<Vec<(String, String)>, PlatformError> {
    let data = FormData::new_with_form(form).map_err(js_error)?;
    let Some(entries) = js_sys::try_iter(&data).map_err(js_error)? else {
        return Ok(Vec::new());
    };
    let mut fields = Vec::new();
    for entry in entries {
        let pair = js_sys::Array::from(&entry.map_err(js_error)?);
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            fields.push((name, value));
        }
    }
    Ok(fields)
}

async fn submit(client: Rc<BlogClient>, discussion_id: u64, fields: Vec<(String, String)>) {
    match client.post_reply(discussion_id, fields).await {
        Ok(_) => {
            if let Err(e) = gloo_utils::window().location().reload() {
                tracing::warn!(error = ?e, "reload failed");
            }
        }
        Err(e) => {
            tracing::error!(%discussion_id, error = %e, "reply failed");
            alert(&reply_alert(&e));
        }
    }
}

pub fn mount(document: &Document, client: Rc<BlogClient>) {
    for el in query_all(document, ".reply-form form") {
        let Ok(form) = el.dyn_into::<HtmlFormElement>() else {
            continue;
        };
        let client = client.clone();
        let target = form.clone();
        EventListener::new_with_options(
            &target,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let Some(discussion_id) = form
                    .get_attribute("action")
                    .as_deref()
                    .and_then(discussion_id_from_action)
                else {
                    tracing::warn!("reply form without a discussion action");
                    return;
                };
                match form_fields(&form) {
                    Ok(fields) => wasm_bindgen_futures::spawn_local(submit(
                        client.clone(),
                        discussion_id,
                        fields,
                    )),
                    Err(e) => {
                        tracing::error!(error = %e, "could not read reply form");
                        alert(miso_common::REPLY_ERROR_ALERT);
                    }
                }
            },
        )
        .forget();
    }
}
