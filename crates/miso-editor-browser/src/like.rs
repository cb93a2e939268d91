//! Like buttons (`.like-btn[data-article-id]`), handled by delegation so
//! buttons added later work too.

use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlMetaElement};

use miso_common::{BlogClient, LikeState, MisoError, like_alert};

use crate::dom::alert;

const LIKE_BUTTON: &str = ".like-btn";

fn csrf_token(document: &Document) -> Option<String> {
    document
        .query_selector(r#"meta[name="csrf-token"]"#)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlMetaElement>().ok())
        .map(|meta| meta.content())
}

fn render(button: &Element, state: &LikeState) {
    if let Ok(Some(count)) = button.query_selector(".like-count") {
        count.set_text_content(Some(&state.likes.to_string()));
    }
    if let Ok(Some(text)) = button.query_selector(".like-text") {
        text.set_text_content(Some(state.label()));
    }
    let _ = button
        .class_list()
        .toggle_with_force("liked", state.liked);
}

async fn toggle(client: Rc<BlogClient>, button: Element, article_id: u64, csrf: String) {
    match client.toggle_like(article_id, &csrf).await {
        Ok(state) => render(&button, &state),
        Err(MisoError::AuthRequired) => {
            let login = &client.config().login_path;
            if let Err(e) = gloo_utils::window().location().set_href(login) {
                tracing::warn!(error = ?e, "login redirect failed");
            }
        }
        Err(e) => {
            tracing::error!(article_id, error = %e, "like failed");
            if let Some(message) = like_alert(&e) {
                alert(message);
            }
        }
    }
}

pub fn mount(document: &Document, client: Rc<BlogClient>) {
    let doc = document.clone();
    EventListener::new(document, "click", move |event| {
        let Some(button) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(LIKE_BUTTON).ok().flatten())
        else {
            return;
        };
        let Some(article_id) = button
            .get_attribute("data-article-id")
            .and_then(|id| id.trim().parse::<u64>().ok())
        else {
            tracing::warn!("like button without a valid data-article-id");
            return;
        };
        let csrf = csrf_token(&doc).unwrap_or_default();
        wasm_bindgen_futures::spawn_local(toggle(client.clone(), button, article_id, csrf));
    })
    .forget();
}
