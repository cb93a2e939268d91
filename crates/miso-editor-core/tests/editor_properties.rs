use chrono::NaiveTime;
use miso_editor_core::{
    AllowList, DEFAULT_PLACEHOLDER, EditableRegion, EditorConfig, EditorStatusTracker,
    EditorCommand, Fragment, MAX_DEPTH, Sanitizer, StaticForm, StripMode, SubmitError,
    parse_fragment, sanitize,
};

fn at() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).unwrap()
}

#[test]
fn hello_world_status() {
    let tracker = EditorStatusTracker::default();
    let snap = tracker.compute_status_at(&Fragment::from_text("Hello world"), at());
    assert_eq!(snap.word_count, 2);
    assert_eq!(snap.char_count, 10);

    let labels = &tracker.config().labels;
    assert_eq!(labels.word_count_line(&snap), "2 mots, 10 caractères");
}

#[test]
fn placeholder_status_is_zero() {
    let tracker = EditorStatusTracker::default();
    let snap = tracker.compute_status_at(&Fragment::from_text(DEFAULT_PLACEHOLDER), at());
    assert_eq!((snap.word_count, snap.char_count), (0, 0));
    assert_eq!(tracker.config().labels.last_modified_line(&snap), None);
}

#[test]
fn nested_disallowed_markup() {
    let out = sanitize(
        "<div><p>ok</p><script>bad</script></div>",
        &AllowList::default(),
    );
    assert!(out.contains("<p>ok</p>"));
    assert!(!out.contains("<div"));
    assert!(!out.contains("<script"));
    assert!(out.contains("bad"));
}

#[test]
fn sanitize_is_idempotent() {
    let inputs = [
        "<div><p>ok</p><script>bad</script></div>",
        "<p>a &amp; b <b>bold</b> &lt;tag&gt;</p>",
        r#"<ul><li><a href="https://x.org" onclick="y()">l</a></li></ul><br/>"#,
        "<img src=x alt='a \"q\"'>trailing <em>open",
        "text < 3 and > 2",
        "<table><tr><td>cell</td></tr></table>",
    ];
    let allow = AllowList::default();
    for input in inputs {
        let once = sanitize(input, &allow);
        assert_eq!(sanitize(&once, &allow), once, "input: {input}");
    }
}

#[test]
fn submit_gate_order() {
    let tracker = EditorStatusTracker::default();

    let mut form = StaticForm::with_category("tech");
    let err = tracker
        .on_submit(&Fragment::from_text("123456789"), &mut form)
        .unwrap_err();
    assert!(matches!(err, SubmitError::TooShort { len: 9, min: 10 }));
    assert_eq!(form.content, None);

    let mut form = StaticForm::default();
    let err = tracker
        .on_submit(&Fragment::from_text("0123456789"), &mut form)
        .unwrap_err();
    assert_eq!(err, SubmitError::MissingCategory);
    assert_eq!(form.content, None);

    let region = parse_fragment("<p>0123456789</p><div>x</div>");
    let mut form = StaticForm::with_category("tech");
    let outcome = tracker.on_submit(&region, &mut form).unwrap();
    assert_eq!(outcome.content, "<p>0123456789</p>x");
    assert_eq!(form.content.as_deref(), Some("<p>0123456789</p>x"));
}

#[test]
fn placeholder_round_trip() {
    let tracker = EditorStatusTracker::default();
    let mut region = Fragment::default();
    tracker.restore_placeholder_if_empty(&mut region);
    assert_eq!(EditableRegion::text(&region), DEFAULT_PLACEHOLDER);

    tracker.clear_placeholder(&mut region);
    tracker.restore_placeholder_if_empty(&mut region);
    assert_eq!(EditableRegion::text(&region), DEFAULT_PLACEHOLDER);
}

#[test]
fn unsafe_attributes_removed() {
    let out = sanitize(
        r#"<a href=" JavaScript:alert(1)" onmouseover="x()">a</a><img src="vbscript:x" onerror="y()">"#,
        &AllowList::default(),
    );
    assert_eq!(out, "<a>a</a><img>");
}

#[test]
fn configured_tracker() {
    let config = EditorConfig::from_json(
        r#"{
            "placeholder": "Write here",
            "min_content_chars": 3,
            "allowed_tags": ["p", "h2"],
            "strip_mode": "flatten"
        }"#,
    )
    .unwrap();
    let tracker = EditorStatusTracker::new(config);

    let snap = tracker.compute_status_at(&Fragment::from_text("Write here"), at());
    assert!(snap.placeholder);

    assert_eq!(
        tracker.sanitize("<h2>T</h2><div><p>a</p>b</div>"),
        "<h2>T</h2>ab"
    );
    assert_eq!(tracker.config().strip_mode, StripMode::Flatten);

    let mut form = StaticForm::with_category("c");
    assert!(tracker.on_submit(&Fragment::from_text("abc"), &mut form).is_ok());
}

#[test]
fn toolbar_link_prompt() {
    assert_eq!(EditorCommand::from_name("createLink", Some("https://")), None);
    let cmd = EditorCommand::from_name("createLink", Some("https://blog.example/a")).unwrap();
    assert_eq!(cmd.command_name(), "createLink");
    assert_eq!(cmd.value().as_deref(), Some("https://blog.example/a"));
}

const DEEP: usize = 100_000;

#[test]
fn deeply_nested_paste_sanitizes() {
    let input = format!("{}x", "<span>".repeat(DEEP));
    assert_eq!(sanitize(&input, &AllowList::default()), "x");
    let flat = Sanitizer::default().with_strip_mode(StripMode::Flatten);
    assert_eq!(flat.sanitize(&input), "x");
}

#[test]
fn deeply_nested_allowed_markup_is_capped() {
    let input = format!("{}deep", "<em>".repeat(DEEP));
    let once = sanitize(&input, &AllowList::default());
    assert_eq!(
        once,
        format!("{}deep{}", "<em>".repeat(MAX_DEPTH), "</em>".repeat(MAX_DEPTH))
    );
    assert_eq!(sanitize(&once, &AllowList::default()), once);
}

#[test]
fn deeply_nested_region_status_and_submit() {
    let region = parse_fragment(&format!("{}deep words", "<div>".repeat(DEEP)));
    assert_eq!(region.text(), "deep words");
    assert_eq!(region.text_content(), "deep words");

    let tracker = EditorStatusTracker::default();
    let snap = tracker.compute_status_at(&region, at());
    assert_eq!((snap.word_count, snap.char_count), (2, 9));

    let mut form = StaticForm::with_category("tech");
    let outcome = tracker.on_submit(&region, &mut form).unwrap();
    assert_eq!(outcome.content, "deep words");
}
