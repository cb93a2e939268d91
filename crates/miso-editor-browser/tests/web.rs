//! WASM browser tests for miso-editor-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

use miso_editor_browser::dom::read_as_data_url;
use miso_editor_browser::{
    ArticleForm, DEFAULT_PLACEHOLDER, DomArticleForm, DomRegion, EditableRegion,
    EditorStatusTracker, SubmitError,
};

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn fixture(html: &str) -> HtmlElement {
    let doc = document();
    let root = doc
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    root.set_inner_html(html);
    doc.body().unwrap().append_child(&root).unwrap();
    root
}

fn editor_in(root: &HtmlElement) -> DomRegion {
    let el = root
        .query_selector("[contenteditable]")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    DomRegion::new(el)
}

#[wasm_bindgen_test]
fn test_region_reads_markup() {
    let root = fixture(r#"<div contenteditable="true"><p>Hello <strong>world</strong></p></div>"#);
    let region = editor_in(&root);
    assert_eq!(region.html(), "<p>Hello <strong>world</strong></p>");
    let status = EditorStatusTracker::default().compute_status(&region);
    assert_eq!((status.word_count, status.char_count), (2, 10));
    root.remove();
}

#[wasm_bindgen_test]
fn test_placeholder_cycle() {
    let root = fixture(r#"<div contenteditable="true"></div>"#);
    let mut region = editor_in(&root);
    let tracker = EditorStatusTracker::default();

    assert!(tracker.restore_placeholder_if_empty(&mut region));
    assert_eq!(region.text(), DEFAULT_PLACEHOLDER);
    assert!(tracker.clear_placeholder(&mut region));
    assert_eq!(region.text().trim(), "");
    root.remove();
}

#[wasm_bindgen_test]
fn test_submit_writes_hidden_field() {
    let root = fixture(
        r#"<div contenteditable="true"><div><p>ten chars!</p><script>x</script></div></div>
        <select id="t-category"><option value="">--</option><option value="tech" selected>Tech</option></select>
        <input type="hidden" id="t-content">"#,
    );
    let region = editor_in(&root);
    let mut form = DomArticleForm::from_ids(&document(), "t-category", "t-content");
    assert_eq!(form.category().as_deref(), Some("tech"));

    let outcome = EditorStatusTracker::default()
        .on_submit(&region, &mut form)
        .unwrap();
    assert_eq!(outcome.content, "<p>ten chars!</p>x");

    let hidden = document()
        .get_element_by_id("t-content")
        .unwrap()
        .dyn_into::<web_sys::HtmlInputElement>()
        .unwrap();
    assert_eq!(hidden.value(), "<p>ten chars!</p>x");
    root.remove();
}

#[wasm_bindgen_test]
fn test_submit_without_category() {
    let root = fixture(
        r#"<div contenteditable="true">long enough content</div>
        <select id="n-category"><option value="" selected>--</option></select>
        <input type="hidden" id="n-content">"#,
    );
    let region = editor_in(&root);
    let mut form = DomArticleForm::from_ids(&document(), "n-category", "n-content");
    assert_eq!(
        EditorStatusTracker::default().on_submit(&region, &mut form),
        Err(SubmitError::MissingCategory)
    );
    root.remove();
}

#[wasm_bindgen_test]
async fn test_read_file_as_data_url() {
    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str("hi"));
    let file = web_sys::File::new_with_str_sequence(&parts, "note.txt").unwrap();
    // Repeated reads each settle with their own handlers.
    for _ in 0..3 {
        let url = read_as_data_url(&file).await.unwrap();
        assert!(url.starts_with("data:"), "url: {url}");
        assert!(url.ends_with("base64,aGk="), "url: {url}");
    }
}
