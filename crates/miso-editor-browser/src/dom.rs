//! DOM-backed implementations of the core platform traits, plus small
//! element helpers shared by the page modules.

use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, File, FileReader, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

use miso_editor_core::{ArticleForm, EditableRegion, PlatformError};

pub(crate) fn js_error(e: JsValue) -> PlatformError {
    match e.as_string() {
        Some(s) => PlatformError(s),
        None => PlatformError(format!("{e:?}")),
    }
}

pub fn html_element_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// All elements matching a selector, in document order.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        tracing::warn!(selector, "invalid selector");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// `value` of an input, select or textarea.
pub fn element_value(el: &Element) -> Option<String> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        Some(select.value())
    } else {
        el.dyn_ref::<HtmlTextAreaElement>().map(|t| t.value())
    }
}

fn set_element_value(el: &Element, value: &str) -> Result<(), PlatformError> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(textarea) = el.dyn_ref::<HtmlTextAreaElement>() {
        textarea.set_value(value);
    } else {
        return Err(PlatformError(format!(
            "<{}> has no value to set",
            el.tag_name().to_lowercase()
        )));
    }
    Ok(())
}

pub fn alert(message: &str) {
    if let Err(e) = gloo_utils::window().alert_with_message(message) {
        tracing::warn!(error = ?e, "alert failed");
    }
}

/// The content-editable editor element.
#[derive(Clone, Debug)]
pub struct DomRegion {
    element: HtmlElement,
}

impl DomRegion {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl EditableRegion for DomRegion {
    fn text(&self) -> String {
        self.element.inner_text()
    }

    fn html(&self) -> String {
        self.element.inner_html()
    }

    fn set_text(&mut self, text: &str) {
        self.element.set_inner_text(text);
    }
}

/// The article form: category selector and hidden content field.
#[derive(Clone, Debug)]
pub struct DomArticleForm {
    category: Option<Element>,
    content: Option<Element>,
}

impl DomArticleForm {
    pub fn new(category: Option<Element>, content: Option<Element>) -> Self {
        Self { category, content }
    }

    pub fn from_ids(document: &Document, category_id: &str, content_id: &str) -> Self {
        Self::new(
            document.get_element_by_id(category_id),
            document.get_element_by_id(content_id),
        )
    }
}

impl ArticleForm for DomArticleForm {
    fn category(&self) -> Option<String> {
        self.category.as_ref().and_then(element_value)
    }

    fn set_content(&mut self, html: &str) -> Result<(), PlatformError> {
        let field = self
            .content
            .as_ref()
            .ok_or_else(|| PlatformError::from("content field not found"))?;
        set_element_value(field, html)
    }
}

/// Read a file into a `data:` URL.
pub async fn read_as_data_url(file: &File) -> Result<String, PlatformError> {
    let reader = FileReader::new().map_err(js_error)?;

    // Only one of the two handlers ever fires. Both stay alive until the read
    // settles and are dropped afterwards.
    let mut handlers: Option<(Closure<dyn FnMut()>, Closure<dyn FnMut()>)> = None;
    let loaded = Promise::new(&mut |resolve, reject| {
        let onload = Closure::once(move || {
            resolve.call0(&JsValue::NULL).ok();
        });
        let onerror = Closure::once(move || {
            reject.call0(&JsValue::NULL).ok();
        });
        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        handlers = Some((onload, onerror));
    });

    let read = match reader.read_as_data_url(file) {
        Ok(()) => JsFuture::from(loaded)
            .await
            .map_err(|_| PlatformError::from("could not read file")),
        Err(e) => Err(js_error(e)),
    };
    reader.set_onload(None);
    reader.set_onerror(None);
    drop(handlers);
    read?;

    reader
        .result()
        .map_err(js_error)?
        .as_string()
        .ok_or_else(|| PlatformError::from("file reader returned no data url"))
}

/// First file selected in a file input.
pub fn first_file(input: &HtmlInputElement) -> Option<File> {
    input.files().and_then(|files| files.get(0))
}
