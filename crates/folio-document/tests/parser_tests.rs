//! Integration tests for HTML to document parsing and its normalizations.

use folio_document::{
    Block, BlockKind, Document, ImageBlock, InlineRun, LOG_TARGET, Marks, ParseOptions, Span,
    parse, parse_into, parse_with,
};

/// Helper to list the kinds of a parsed document
fn kinds(html: &str) -> Vec<BlockKind> {
    parse(html).iter().map(Block::kind).collect()
}

/// Helper to get the plain text of every block
fn texts(doc: &Document) -> Vec<String> {
    doc.iter().map(Block::plain_text).collect()
}

fn items(block: &Block) -> Vec<String> {
    match block {
        Block::List { items, .. } => items.iter().map(InlineRun::plain_text).collect(),
        other => panic!("expected a list, got {other:?}"),
    }
}

#[test]
fn test_empty_input_is_empty_document() {
    assert!(parse("").is_empty());
    assert!(parse("   \n\t").is_empty());
}

#[test]
fn test_plain_text_becomes_paragraph() {
    let doc = parse("plain text");
    assert_eq!(doc.blocks(), &[Block::paragraph("plain text")]);
}

#[test]
fn test_heading_and_paragraph() {
    let doc = parse("<h2>Pool Hours</h2><p>9am to 6pm</p>");
    assert_eq!(
        doc.blocks(),
        &[
            Block::heading(2, "Pool Hours").unwrap(),
            Block::paragraph("9am to 6pm"),
        ]
    );
}

#[test]
fn test_all_heading_levels() {
    for level in 1..=6u8 {
        let doc = parse(&format!("<h{level}>Title</h{level}>"));
        match &doc[0] {
            Block::Heading { level: parsed, .. } => assert_eq!(parsed.get(), level),
            other => panic!("expected heading, got {other:?}"),
        }
    }
}

#[test]
fn test_empty_paragraph_is_empty_block() {
    assert_eq!(parse("<p></p>").blocks(), &[Block::Empty]);
    assert_eq!(parse("<p><br></p>").blocks(), &[Block::Empty]);
    assert_eq!(parse("<p>&nbsp;</p>").blocks(), &[Block::Empty]);
    assert_eq!(parse("<p>  </p>").blocks(), &[Block::Empty]);
}

#[test]
fn test_empty_heading_and_quote_are_kept_as_empty_blocks() {
    assert_eq!(kinds("<h3></h3><blockquote> </blockquote>"), vec![
        BlockKind::Empty,
        BlockKind::Empty
    ]);
}

#[test]
fn test_inline_marks_inside_paragraph() {
    let doc = parse(r#"<p>Book <b>now</b>, <em>today</em> at <a href="/rooms">rooms</a></p>"#);
    let Block::Paragraph { inline } = &doc[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(inline.plain_text(), "Book now, today at rooms");
    assert_eq!(inline.spans[1], Span::new("now", Marks::plain().with_bold()));
    assert_eq!(inline.spans[3], Span::new("today", Marks::plain().with_italic()));
    assert_eq!(
        inline.spans[5],
        Span::new("rooms", Marks::plain().with_link("/rooms"))
    );
}

#[test]
fn test_nested_marks_combine() {
    let doc = parse("<p><strong><i>both</i></strong></p>");
    let Block::Paragraph { inline } = &doc[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(inline.spans.len(), 1);
    assert!(inline.spans[0].marks.bold);
    assert!(inline.spans[0].marks.italic);
}

#[test]
fn test_whitespace_collapses_and_br_is_a_line_break() {
    let doc = parse("<p>  Check-in\n   from   3pm <br>\n Check-out by 11am  </p>");
    assert_eq!(texts(&doc), vec!["Check-in from 3pm\nCheck-out by 11am"]);
}

#[test]
fn test_list_items() {
    let doc = parse("<ul><li>Pool</li><li>Spa</li></ul><ol><li>One</li></ol>");
    assert_eq!(doc.len(), 2);
    assert_eq!(items(&doc[0]), vec!["Pool", "Spa"]);
    assert!(matches!(doc[1], Block::List { ordered: true, .. }));
}

#[test]
fn test_list_without_items_is_split_on_newlines() {
    let doc = parse("<ul>a\nb</ul>");
    assert_eq!(doc.blocks(), &[Block::list(false, &["a", "b"])]);
}

#[test]
fn test_list_without_items_skips_blank_lines() {
    let doc = parse("<ol>\n  first\n\n  second\n</ol>");
    assert_eq!(doc.blocks(), &[Block::list(true, &["first", "second"])]);
}

#[test]
fn test_list_of_paragraphs_strips_typed_markers() {
    let doc = parse("<ul><p>\u{2022} Pool</p><p>\u{2022} Spa</p></ul><ol><p>1. First</p><p>2. Second</p></ol>");
    assert_eq!(items(&doc[0]), vec!["Pool", "Spa"]);
    assert_eq!(items(&doc[1]), vec!["First", "Second"]);
}

#[test]
fn test_only_one_typed_marker_is_stripped() {
    let doc = parse("<ul><p>\u{2022} \u{2022} nested</p></ul>");
    assert_eq!(items(&doc[0]), vec!["\u{2022} nested"]);
}

#[test]
fn test_list_items_keep_their_text() {
    let doc = parse("<ol><li>1. already numbered</li></ol>");
    assert_eq!(items(&doc[0]), vec!["1. already numbered"]);
}

#[test]
fn test_nested_lists_flatten() {
    let doc = parse("<ul><li>Rooms<ul><li>Single</li><li>Double</li></ul></li><li>Suites</li></ul>");
    assert_eq!(doc.len(), 1);
    assert_eq!(items(&doc[0]), vec!["Rooms", "Single", "Double", "Suites"]);
}

#[test]
fn test_list_with_formatting_and_breaks() {
    let doc = parse("<ul><b>Bold</b> item<br>second</ul>");
    assert_eq!(items(&doc[0]), vec!["Bold item", "second"]);
}

#[test]
fn test_empty_list_is_empty_block() {
    assert_eq!(parse("<ul></ul>").blocks(), &[Block::Empty]);
    assert_eq!(parse("<ul><li> </li></ul>").blocks(), &[Block::Empty]);
}

#[test]
fn test_image_inside_list_splits_it() {
    let doc = parse(r#"<ul><li>a</li><li><img src="x.png"></li><li>b</li></ul>"#);
    assert_eq!(
        doc.iter().map(Block::kind).collect::<Vec<_>>(),
        vec![BlockKind::List, BlockKind::Image, BlockKind::List]
    );
}

#[test]
fn test_blockquote_and_code() {
    let doc = parse("<blockquote>Best stay ever</blockquote><code>wifi: guest</code>");
    assert_eq!(doc[0], Block::Quote {
        inline: InlineRun::plain("Best stay ever")
    });
    assert_eq!(doc[1], Block::CodeSpan {
        text: "wifi: guest".to_string()
    });
}

#[test]
fn test_pre_keeps_lines() {
    let doc = parse("<pre>\n  line one\n    line two\n</pre>");
    assert_eq!(doc[0], Block::CodeSpan {
        text: "line one\nline two".to_string()
    });
}

#[test]
fn test_image_attributes() {
    let doc = parse(r#"<img src="pool.jpg" alt="Pool" width="300" height="200">"#);
    assert_eq!(
        doc.blocks(),
        &[Block::Image(ImageBlock {
            src: "pool.jpg".to_string(),
            alt: "Pool".to_string(),
            width: Some("300".to_string()),
            height: Some("200".to_string()),
            link_href: None,
        })]
    );
}

#[test]
fn test_image_in_link_is_folded() {
    let doc = parse(r#"<a href="X"><img src="Y"></a>"#);
    assert_eq!(doc.len(), 1);
    let Block::Image(image) = &doc[0] else {
        panic!("expected image");
    };
    assert_eq!(image.src, "Y");
    assert_eq!(image.link_href.as_deref(), Some("X"));
}

#[test]
fn test_linked_image_with_caption_text() {
    let doc = parse(r#"<a href="/gallery"><img src="a.jpg"> Gallery</a>"#);
    assert_eq!(kinds_of(&doc), vec![BlockKind::Image, BlockKind::Link]);
    assert_eq!(doc[1], Block::Link {
        href: "/gallery".to_string(),
        text: "Gallery".to_string()
    });
}

fn kinds_of(doc: &Document) -> Vec<BlockKind> {
    doc.iter().map(Block::kind).collect()
}

#[test]
fn test_image_in_paragraph_is_hoisted() {
    let doc = parse(r#"<p>Before <a href="/l"><img src="i.png"></a> after</p>"#);
    assert_eq!(kinds_of(&doc), vec![
        BlockKind::Paragraph,
        BlockKind::Image,
        BlockKind::Paragraph
    ]);
    assert_eq!(texts(&doc)[0], "Before");
    assert_eq!(texts(&doc)[2], "after");
    let Block::Image(image) = &doc[1] else {
        panic!("expected image");
    };
    assert_eq!(image.link_href.as_deref(), Some("/l"));
}

#[test]
fn test_paragraph_with_only_an_image_has_no_empty_block() {
    assert_eq!(kinds(r#"<p><img src="a.png"></p>"#), vec![BlockKind::Image]);
}

#[test]
fn test_image_without_src_is_skipped() {
    assert_eq!(kinds(r#"<img alt="nothing"><p>text</p>"#), vec![BlockKind::Paragraph]);
}

#[test]
fn test_link_block() {
    let doc = parse(r#"<a href="https://example.com/book">Book now</a>"#);
    assert_eq!(doc.blocks(), &[Block::Link {
        href: "https://example.com/book".to_string(),
        text: "Book now".to_string()
    }]);
}

#[test]
fn test_link_without_text_uses_href() {
    let doc = parse(r#"<a href="https://example.com"></a>"#);
    assert_eq!(doc.blocks(), &[Block::Link {
        href: "https://example.com".to_string(),
        text: "https://example.com".to_string()
    }]);
}

#[test]
fn test_link_text_from_href_is_collapsed() {
    let doc = parse("<a href=\"/a \n b\"></a>");
    assert_eq!(doc.blocks(), &[Block::Link {
        href: "/a \n b".to_string(),
        text: "/a b".to_string()
    }]);
}

#[test]
fn test_anchor_without_href_is_transparent() {
    assert_eq!(parse("<a name=\"top\">Top</a>").blocks(), &[Block::paragraph("Top")]);
}

#[test]
fn test_top_level_bold_is_its_own_paragraph() {
    let doc = parse("intro <b>bold</b> outro");
    assert_eq!(texts(&doc), vec!["intro", "bold", "outro"]);
    let Block::Paragraph { inline } = &doc[1] else {
        panic!("expected paragraph");
    };
    assert!(inline.spans[0].marks.bold);
}

#[test]
fn test_br_and_hr_are_empty_blocks() {
    assert_eq!(kinds("<p>a</p><br><hr><p>b</p>"), vec![
        BlockKind::Paragraph,
        BlockKind::Empty,
        BlockKind::Empty,
        BlockKind::Paragraph
    ]);
}

#[test]
fn test_div_without_blocks_splits_text_from_elements() {
    let doc = parse("<div>Hello <b>world</b></div>");
    let mut bold = InlineRun::new();
    bold.push_str("world", &Marks::plain().with_bold());
    assert_eq!(doc.blocks(), &[Block::paragraph("Hello"), Block::Paragraph {
        inline: bold
    }]);
}

#[test]
fn test_div_direct_text_comes_before_child_elements() {
    let doc = parse("<div><span>Late</span> checkout <img src=\"/bell.png\"></div>");
    assert_eq!(kinds_of(&doc), vec![
        BlockKind::Paragraph,
        BlockKind::Paragraph,
        BlockKind::Image
    ]);
    assert_eq!(texts(&doc)[..2], ["checkout", "Late"]);
}

#[test]
fn test_div_with_only_whitespace_is_empty_block() {
    assert_eq!(parse("<div> <!-- note --> </div>").blocks(), &[Block::Empty]);
}

#[test]
fn test_div_with_blocks_is_walked() {
    let doc = parse("<div>Intro<p>One</p><p>Two</p></div>");
    assert_eq!(texts(&doc), vec!["Intro", "One", "Two"]);
}

#[test]
fn test_empty_div_is_empty_block() {
    assert_eq!(parse("<div></div>").blocks(), &[Block::Empty]);
}

#[test]
fn test_scripts_and_styles_are_stripped() {
    let doc = parse("<style>p { color: red }</style><script>alert(1)</script><p>Visible</p>");
    assert_eq!(texts(&doc), vec!["Visible"]);
}

#[test]
fn test_full_document_is_unwrapped() {
    let doc = parse(
        "<!DOCTYPE html><html><head><title>Page</title></head><body><h1>Welcome</h1></body></html>",
    );
    assert_eq!(kinds_of(&doc), vec![BlockKind::Heading]);
}

#[test]
fn test_word_processor_paste() {
    let html = "<!--[if gte mso 9]><xml></xml><![endif]--><p class=\"MsoNormal\"><span style=\"font-size:11pt\">Late&nbsp;checkout</span></p><p class=\"MsoNormal\"><o:p>&nbsp;</o:p></p>";
    let doc = parse(html);
    assert_eq!(doc.len(), 2);
    assert_eq!(texts(&doc)[0], "Late\u{a0}checkout");
    assert_eq!(doc[1], Block::Empty);
}

#[test]
fn test_unknown_elements_are_transparent() {
    assert_eq!(texts(&parse("<custom-card><span>Inside</span></custom-card>")), vec![
        "Inside"
    ]);
}

#[test]
fn test_unclosed_tags_still_parse() {
    let doc = parse("<p>one<p>two<ul><li>three");
    assert_eq!(texts(&doc), vec!["one", "two", "three"]);
}

#[test]
fn test_broken_markup_falls_back_to_raw_text() {
    let doc = parse("<p class=\"unterminated");
    assert_eq!(doc.blocks(), &[Block::paragraph("<p class=\"unterminated")]);
}

#[test]
fn test_text_only_in_stripped_elements_is_kept() {
    let doc = parse("<title>Rooms</title>");
    assert_eq!(doc.blocks(), &[Block::paragraph("Rooms")]);
}

#[test]
fn test_comment_only_input_is_empty() {
    assert!(parse("<!-- nothing here -->").is_empty());
}

#[test]
fn test_markers_are_literal_by_default() {
    let doc = parse("<p>**not bold**</p>");
    let Block::Paragraph { inline } = &doc[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(inline.spans, vec![Span::plain("**not bold**")]);
}

#[test]
fn test_markers_are_decoded_when_enabled() {
    let options = ParseOptions {
        recognize_markers: true,
        ..ParseOptions::default()
    };
    let doc = parse_with("<p>**bold** and [site](https://example.com)</p>", &options);
    let Block::Paragraph { inline } = &doc[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(inline.plain_text(), "bold and site");
    assert!(inline.spans[0].marks.bold);
    assert_eq!(
        inline.spans[2].marks.link.as_deref(),
        Some("https://example.com")
    );
}

#[test]
fn test_deep_nesting_degrades_to_text() {
    let depth = 2_000;
    let html = format!("{}deep{}", "<div>".repeat(depth), "</div>".repeat(depth));
    let doc = parse(&html);
    assert_eq!(texts(&doc), vec!["deep"]);
}

#[test]
fn test_small_max_depth() {
    let options = ParseOptions {
        max_depth: 2,
        ..ParseOptions::default()
    };
    let doc = parse_with("<section><section><section><p>a</p><p>b</p></section></section></section>", &options);
    assert_eq!(texts(&doc), vec!["ab"]);
}

#[test]
fn test_table_cells_become_paragraphs() {
    let doc = parse("<table><tr><td>Mon</td><td>9-5</td></tr></table>");
    assert_eq!(texts(&doc), vec!["Mon", "9-5"]);
}

#[test]
fn test_root_never_holds_bare_text() {
    for html in ["a<b>b</b>c", "<span>x</span> y", "text<div>block</div>tail"] {
        for block in &parse(html) {
            assert_ne!(block.kind(), BlockKind::Empty, "{html}");
            assert!(!block.plain_text().is_empty(), "{html}");
        }
    }
}

#[test]
fn test_parse_reports_its_own_warnings_once() {
    let mut doc = Document::new();
    let html = "<img alt=\"a\"><img alt=\"b\"><p>a</span></p>";
    let warnings = parse_into(html, &ParseOptions::default(), &mut doc);
    assert_eq!(texts(&doc), vec!["a"]);
    assert_eq!(warnings.len(), 2);
    assert!(warnings.was_warned(LOG_TARGET, "img without src skipped"));
    assert!(warnings.was_warned("folio::html::parser", "unexpected-end-tag"));

    let clean = parse_into("<p>b</p>", &ParseOptions::default(), &mut doc);
    assert!(clean.is_empty());
}
