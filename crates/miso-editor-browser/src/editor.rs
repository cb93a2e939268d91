//! Article editor page wiring.
//!
//! Binds the tracker to the editor element: placeholder on load, focus and
//! blur, the status line on every input, and the submission gate on the
//! article form.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use web_sys::{Document, HtmlElement};

use miso_editor_core::{EditorConfig, EditorStatusTracker};

use crate::dom::{DomArticleForm, DomRegion, alert, html_element_by_id};

const CONFIG_ELEMENT_ID: &str = "miso-config";

thread_local! {
    static ACTIVE: RefCell<Option<Rc<EditorPage>>> = const { RefCell::new(None) };
}

/// Run `f` against the mounted editor, if the page has one.
pub fn with_active<R>(f: impl FnOnce(&EditorPage) -> R) -> Option<R> {
    ACTIVE.with(|active| active.borrow().as_deref().map(f))
}

/// Editor config from the page's `<script type="application/json"
/// id="miso-config">` block, or defaults.
pub fn page_config(document: &Document) -> EditorConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return EditorConfig::default();
    };
    match EditorConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "invalid editor config, using defaults");
            EditorConfig::default()
        }
    }
}

pub struct EditorPage {
    document: Document,
    tracker: EditorStatusTracker,
    region: RefCell<DomRegion>,
    word_count: Option<HtmlElement>,
    last_modified: Option<HtmlElement>,
}

impl EditorPage {
    pub fn tracker(&self) -> &EditorStatusTracker {
        &self.tracker
    }

    pub fn region(&self) -> DomRegion {
        self.region.borrow().clone()
    }

    /// Recompute and display the status line.
    pub fn update_status(&self) {
        let snapshot = self.tracker.compute_status(&*self.region.borrow());
        let labels = &self.tracker.config().labels;
        if let Some(el) = &self.word_count {
            el.set_inner_text(&labels.word_count_line(&snapshot));
        }
        if let (Some(el), Some(line)) = (&self.last_modified, labels.last_modified_line(&snapshot)) {
            el.set_inner_text(&line);
        }
    }

    fn on_focus(&self) {
        self.tracker.clear_placeholder(&mut *self.region.borrow_mut());
    }

    fn on_blur(&self) {
        self.tracker
            .restore_placeholder_if_empty(&mut *self.region.borrow_mut());
    }

    /// Gate the article form. Returns whether submission may go ahead.
    fn on_submit(&self) -> bool {
        let ids = &self.tracker.config().ids;
        let mut form = DomArticleForm::from_ids(&self.document, &ids.category, &ids.content);
        match self.tracker.on_submit(&*self.region.borrow(), &mut form) {
            Ok(outcome) => {
                tracing::debug!(
                    category = %outcome.category,
                    bytes = outcome.content.len(),
                    "article submitted"
                );
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "article submission blocked");
                alert(&e.user_message());
                false
            }
        }
    }
}

/// Mount the editor if the page has one.
///
/// Listeners live as long as the page.
pub fn mount(document: &Document, config: EditorConfig) -> Option<Rc<EditorPage>> {
    let ids = config.ids.clone();
    let editor = html_element_by_id(document, &ids.editor)?;

    let page = Rc::new(EditorPage {
        document: document.clone(),
        tracker: EditorStatusTracker::new(config),
        region: RefCell::new(DomRegion::new(editor.clone())),
        word_count: html_element_by_id(document, &ids.word_count),
        last_modified: html_element_by_id(document, &ids.last_modified),
    });

    page.on_blur();
    page.update_status();

    let p = page.clone();
    EventListener::new(&editor, "input", move |_| p.update_status()).forget();

    let p = page.clone();
    EventListener::new(&editor, "focus", move |_| p.on_focus()).forget();

    let p = page.clone();
    EventListener::new(&editor, "blur", move |_| p.on_blur()).forget();

    match document.get_element_by_id(&ids.article_form) {
        Some(form) => {
            let p = page.clone();
            EventListener::new_with_options(
                &form,
                "submit",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    if !p.on_submit() {
                        event.prevent_default();
                    }
                },
            )
            .forget();
        }
        None => tracing::debug!(id = %ids.article_form, "no article form on page"),
    }

    ACTIVE.with(|active| *active.borrow_mut() = Some(page.clone()));
    tracing::debug!("editor mounted");
    Some(page)
}
