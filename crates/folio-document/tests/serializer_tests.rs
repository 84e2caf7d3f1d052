//! Integration tests for document to HTML serialization.

use folio_document::{
    Block, BlockOutput, Document, HeadingOutput, ImageBlock, InlineOutput, InlineRun, Marks,
    SerializeOptions, Span, parse, serialize, serialize_blocks, serialize_with,
};

/// Helper to serialize blocks with default options
fn html(blocks: Vec<Block>) -> String {
    serialize(&Document::from(blocks))
}

/// Helper to serialize blocks with the semantic options
fn semantic(blocks: Vec<Block>) -> String {
    serialize_blocks(&blocks, &SerializeOptions::semantic())
}

fn bold_run(text: &str) -> InlineRun {
    InlineRun {
        spans: vec![Span::new(text, Marks::plain().with_bold())],
    }
}

#[test]
fn test_empty_document() {
    assert_eq!(html(vec![]), "");
}

#[test]
fn test_pool_hours_scenario() {
    let doc = parse("<h2>Pool Hours</h2><p>9am to 6pm</p>");
    assert_eq!(serialize(&doc), "<p>Pool Hours</p><p>9am to 6pm</p>");
}

#[test]
fn test_heading_levels_can_be_preserved() {
    let doc = parse("<h2>Pool Hours</h2><p>9am to 6pm</p>");
    let options = SerializeOptions {
        headings: HeadingOutput::Preserve,
        ..SerializeOptions::default()
    };
    assert_eq!(
        serialize_with(&doc, &options),
        "<h2>Pool Hours</h2><p>9am to 6pm</p>"
    );
}

#[test]
fn test_empty_block_is_empty_paragraph() {
    assert_eq!(serialize(&parse("<p></p>")), "<p></p>");
}

#[test]
fn test_text_is_escaped() {
    assert_eq!(
        html(vec![Block::paragraph("Fish & Chips <3 \u{a0}ok")]),
        "<p>Fish &amp; Chips &lt;3 &nbsp;ok</p>"
    );
}

#[test]
fn test_line_breaks_become_br() {
    assert_eq!(
        html(vec![Block::Paragraph {
            inline: InlineRun {
                spans: vec![Span::plain("one\ntwo")]
            }
        }]),
        "<p>one<br>two</p>"
    );
}

#[test]
fn test_inline_marks_as_html() {
    let inline = InlineRun {
        spans: vec![
            Span::plain("Book "),
            Span::new("now", Marks::plain().with_bold().with_italic()),
            Span::plain(" at "),
            Span::new("our site", Marks::plain().with_link("https://example.com/?a=1&b=2")),
            Span::plain(" "),
            Span::new("WIFI", Marks::plain().with_code()),
        ],
    };
    assert_eq!(
        html(vec![Block::Paragraph { inline }]),
        "<p>Book <strong><em>now</em></strong> at <a href=\"https://example.com/?a=1&amp;b=2\">our site</a> <code>WIFI</code></p>"
    );
}

#[test]
fn test_inline_marks_as_markers() {
    let options = SerializeOptions {
        inline: InlineOutput::Markers,
        ..SerializeOptions::default()
    };
    let blocks = vec![
        Block::Paragraph {
            inline: bold_run("Bold"),
        },
        Block::Link {
            href: "/spa".to_string(),
            text: "Spa".to_string(),
        },
    ];
    assert_eq!(
        serialize_blocks(&blocks, &options),
        "<p>**Bold**</p><p>[Spa](/spa)</p>"
    );
}

#[test]
fn test_unordered_list_textual() {
    assert_eq!(
        html(vec![Block::list(false, &["Pool", "Spa"])]),
        "<ul><p>\u{2022} Pool</p><p>\u{2022} Spa</p></ul>"
    );
}

#[test]
fn test_ordered_list_textual() {
    assert_eq!(
        html(vec![Block::list(true, &["First", "Second"])]),
        "<ol><p>1. First</p><p>2. Second</p></ol>"
    );
}

#[test]
fn test_list_semantic() {
    assert_eq!(
        semantic(vec![Block::list(true, &["First", "Second"])]),
        "<ol><li>First</li><li>Second</li></ol>"
    );
}

#[test]
fn test_quote_textual_and_semantic() {
    let quote = Block::Quote {
        inline: InlineRun::plain("Lovely"),
    };
    assert_eq!(html(vec![quote.clone()]), "<p>&gt; Lovely</p>");
    assert_eq!(semantic(vec![quote]), "<blockquote>Lovely</blockquote>");
}

#[test]
fn test_code_textual_and_semantic() {
    let code = Block::CodeSpan {
        text: "a < b\nc".to_string(),
    };
    assert_eq!(html(vec![code.clone()]), "<p>`a &lt; b<br>c`</p>");
    assert_eq!(semantic(vec![code]), "<pre><code>a &lt; b\nc</code></pre>");
}

#[test]
fn test_image() {
    let image = ImageBlock {
        src: "pool.jpg".to_string(),
        alt: "Pool \"view\"".to_string(),
        width: Some("300".to_string()),
        height: None,
        link_href: None,
    };
    assert_eq!(
        html(vec![Block::Image(image)]),
        "<img src=\"pool.jpg\" alt=\"Pool &quot;view&quot;\" width=\"300\">"
    );
}

#[test]
fn test_linked_image() {
    let image = ImageBlock {
        link_href: Some("X".to_string()),
        ..ImageBlock::new("Y")
    };
    assert_eq!(
        html(vec![Block::Image(image)]),
        "<a href=\"X\" target=\"_blank\" rel=\"noopener noreferrer\"><img src=\"Y\" alt=\"\"></a>"
    );
}

#[test]
fn test_link_block_is_a_link_in_a_paragraph() {
    assert_eq!(
        html(vec![Block::Link {
            href: "/rooms".to_string(),
            text: "Rooms".to_string()
        }]),
        "<p><a href=\"/rooms\">Rooms</a></p>"
    );
}

#[test]
fn test_blocks_are_not_merged() {
    assert_eq!(
        html(vec![
            Block::paragraph("a"),
            Block::paragraph("b"),
            Block::Empty,
            Block::Empty
        ]),
        "<p>a</p><p>b</p><p></p><p></p>"
    );
}

#[test]
fn test_semantic_round_trip_keeps_structure() {
    let source = "<h3>Spa</h3><ul><li>Sauna</li><li>Pool</li></ul><blockquote>Relaxing</blockquote><pre>open 9\nclose 5</pre>";
    let doc = parse(source);
    let once = serialize_with(&doc, &SerializeOptions::semantic());
    let again = parse(&once);
    assert_eq!(doc, again);
    assert_eq!(
        once,
        "<h3>Spa</h3><ul><li>Sauna</li><li>Pool</li></ul><blockquote>Relaxing</blockquote><pre><code>open 9\nclose 5</code></pre>"
    );
}

#[test]
fn test_textual_output_reads_back_as_same_list() {
    let doc = parse("<ol><li>Check in</li><li>Relax</li></ol>");
    let text = serialize(&doc);
    assert_eq!(parse(&text), doc);
}

#[test]
fn test_serialize_block_output_option_names() {
    assert_eq!(BlockOutput::Semantic.to_string(), "semantic");
    assert_eq!(
        "markers".parse::<InlineOutput>().ok(),
        Some(InlineOutput::Markers)
    );
}
