//! Tests for inline runs: normalization, typed list markers, and the legacy
//! marker encoding.

use folio_document::{InlineRun, Marks, Span};

fn run(spans: &[(&str, Marks)]) -> InlineRun {
    spans
        .iter()
        .map(|(text, marks)| Span::new(text, marks.clone()))
        .collect()
}

fn normalized(spans: &[(&str, Marks)]) -> InlineRun {
    let mut run = run(spans);
    run.normalize();
    run
}

fn bold() -> Marks {
    Marks::plain().with_bold()
}

#[test]
fn test_normalize_collapses_and_trims() {
    let run = normalized(&[("  Pool \t  and\r spa  ", Marks::plain())]);
    assert_eq!(run.spans, vec![Span::plain("Pool and spa")]);
}

#[test]
fn test_normalize_merges_equal_marks_and_drops_empty_spans() {
    let run = normalized(&[
        ("a", bold()),
        ("", Marks::plain()),
        ("b", bold()),
        ("c", Marks::plain()),
    ]);
    assert_eq!(run.spans, vec![Span::new("ab", bold()), Span::plain("c")]);
}

#[test]
fn test_space_between_spans_keeps_first_marks() {
    let run = normalized(&[("a ", bold()), (" b", Marks::plain())]);
    assert_eq!(run.spans, vec![Span::new("a ", bold()), Span::plain("b")]);
}

#[test]
fn test_spaces_around_breaks_are_removed() {
    let run = normalized(&[("\n one  \n  two \n\n", Marks::plain())]);
    assert_eq!(run.plain_text(), "one\ntwo");
}

#[test]
fn test_consecutive_breaks_survive() {
    let run = normalized(&[("one\n\ntwo", Marks::plain())]);
    assert_eq!(run.plain_text(), "one\n\ntwo");
}

#[test]
fn test_normalize_is_idempotent() {
    let mut once = normalized(&[
        ("  x ", bold()),
        (" \n y", Marks::plain().with_link("/a")),
        (" z\n", Marks::plain()),
    ]);
    let snapshot = once.clone();
    once.normalize();
    assert_eq!(once, snapshot);
}

#[test]
fn test_no_break_space_is_kept_but_blank() {
    let run = InlineRun::plain("\u{a0}");
    assert_eq!(run.plain_text(), "\u{a0}");
    assert!(run.is_blank());
    assert!(!InlineRun::plain("\u{a0}x").is_blank());
}

#[test]
fn test_strip_bullet_marker() {
    let mut item = InlineRun::plain("\u{2022} Pool");
    assert!(item.strip_list_marker(false));
    assert_eq!(item.plain_text(), "Pool");
}

#[test]
fn test_strip_number_marker() {
    let mut item = InlineRun::plain("12. Twelfth");
    assert!(item.strip_list_marker(true));
    assert_eq!(item.plain_text(), "Twelfth");
}

#[test]
fn test_marker_needs_following_space() {
    let mut item = InlineRun::plain("3.5 stars");
    assert!(!item.strip_list_marker(true));
    let mut item = InlineRun::plain("\u{2022}bullet");
    assert!(!item.strip_list_marker(false));
    assert_eq!(item.plain_text(), "\u{2022}bullet");
}

#[test]
fn test_marker_kind_must_match_list() {
    let mut item = InlineRun::plain("1. first");
    assert!(!item.strip_list_marker(false));
    let mut item = InlineRun::plain("\u{2022} first");
    assert!(!item.strip_list_marker(true));
}

#[test]
fn test_strip_marker_before_formatted_text() {
    let mut item = run(&[("\u{2022} ", Marks::plain()), ("Pool", bold())]);
    assert!(item.strip_list_marker(false));
    assert_eq!(item.spans, vec![Span::new("Pool", bold())]);
}

#[test]
fn test_to_markers() {
    let inline = run(&[
        ("Stay ", Marks::plain()),
        ("three", bold()),
        (" nights, ", Marks::plain()),
        ("save", Marks::plain().with_italic()),
        (" with ", Marks::plain()),
        ("CODE10", Marks::plain().with_code()),
        (" at ", Marks::plain()),
        ("our site", Marks::plain().with_link("https://example.com")),
    ]);
    assert_eq!(
        inline.to_markers(),
        "Stay **three** nights, *save* with `CODE10` at [our site](https://example.com)"
    );
}

#[test]
fn test_from_markers() {
    let inline = InlineRun::from_markers("Stay **three** nights, *save* with `CODE10`");
    assert_eq!(
        inline.spans,
        vec![
            Span::plain("Stay "),
            Span::new("three", bold()),
            Span::plain(" nights, "),
            Span::new("save", Marks::plain().with_italic()),
            Span::plain(" with "),
            Span::new("CODE10", Marks::plain().with_code()),
        ]
    );
}

#[test]
fn test_from_markers_nested_link() {
    let inline = InlineRun::from_markers("[**Book**](/book)");
    assert_eq!(
        inline.spans,
        vec![Span::new("Book", Marks::plain().with_link("/book").with_bold())]
    );
}

#[test]
fn test_unmatched_markers_stay_literal() {
    for text in ["a * b", "**open", "`tick", "[label](", "[](x)", "2 ** 3"] {
        let inline = InlineRun::from_markers(text);
        assert_eq!(inline.plain_text(), text, "{text}");
        assert!(inline.spans.iter().all(|s| s.marks.is_plain()), "{text}");
    }
}

#[test]
fn test_markers_round_trip() {
    let text = "Stay **three** nights at [our site](https://example.com)";
    assert_eq!(InlineRun::from_markers(text).to_markers(), text);
}

#[test]
fn test_marker_characters_in_text_are_escaped() {
    let inline = run(&[("2 * 3 [x] `y` a\\b", Marks::plain())]);
    let encoded = inline.to_markers();
    assert_eq!(encoded, "2 \\* 3 \\[x\\] \\`y\\` a\\\\b");
    assert_eq!(InlineRun::from_markers(&encoded), inline);
}

#[test]
fn test_adjacent_emphasis_decodes_to_what_was_encoded() {
    let italic = Marks::plain().with_italic();
    let inline = run(&[
        ("a", italic.clone()),
        ("b", bold().with_italic()),
        ("c", bold()),
        ("d*", bold().with_code()),
        ("e", italic),
    ]);
    let encoded = inline.to_markers();
    assert_eq!(encoded, "*a****b*****c****`d\\*`***e*");
    assert_eq!(InlineRun::from_markers(&encoded), inline);
}

#[test]
fn test_link_href_escapes_and_unwritable_links() {
    let inline = run(&[
        ("menu", Marks::plain().with_link("/m(1)")),
        (" ", Marks::plain()),
        ("spa", Marks::plain().with_link("/spa and gym")),
    ]);
    let encoded = inline.to_markers();
    assert_eq!(encoded, "[menu](/m(1\\)) spa");
    assert_eq!(InlineRun::from_markers(&encoded).spans, vec![
        Span::new("menu", Marks::plain().with_link("/m(1)")),
        Span::plain(" spa"),
    ]);
}

#[test]
fn test_each_line_of_a_span_is_wrapped() {
    let inline = run(&[("a\nb", bold())]);
    let encoded = inline.to_markers();
    assert_eq!(encoded, "**a**\n**b**");
    let back = InlineRun::from_markers(&encoded);
    assert_eq!(back.plain_text(), "a\nb");
    assert_eq!(back.to_markers(), encoded);
}

#[test]
fn test_span_json_omits_plain_marks() {
    let inline = run(&[("a", Marks::plain()), ("b", bold())]);
    let json = serde_json::to_string(&inline).unwrap();
    assert_eq!(json, r#"[{"text":"a"},{"text":"b","marks":{"bold":true}}]"#);
    let back: InlineRun = serde_json::from_str(&json).unwrap();
    assert_eq!(back, inline);
}
