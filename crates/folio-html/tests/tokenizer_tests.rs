//! Integration tests for the HTML tokenizer.

use folio_html::tokenizer::named_character_references::lookup_entity;
use folio_html::{Attribute, HtmlTokenizer, ParseIssue, Token};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = HtmlTokenizer::new(input);
    tokenizer.run();
    tokenizer.into_tokens()
}

/// Helper to tokenize and keep the parse issues
fn tokenize_with_issues(input: &str) -> (Vec<Token>, Vec<ParseIssue>) {
    let mut tokenizer = HtmlTokenizer::new(input);
    tokenizer.run();
    tokenizer.into_parts()
}

/// Concatenate all character tokens.
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Character { data } => Some(*data),
            _ => None,
        })
        .collect()
}

fn start_tag(name: &str, attrs: &[(&str, &str)]) -> Token {
    Token::StartTag {
        name: name.to_string(),
        self_closing: false,
        attributes: attrs
            .iter()
            .map(|(n, v)| Attribute::new((*n).to_string(), (*v).to_string()))
            .collect(),
    }
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 6); // 5 chars + EOF
    assert!(matches!(tokens[0], Token::Character { data: 'H' }));
    assert!(matches!(tokens[4], Token::Character { data: 'o' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_empty_input_is_just_eof() {
    assert_eq!(tokenize(""), vec![Token::EndOfFile]);
}

#[test]
fn test_simple_start_and_end_tag() {
    let tokens = tokenize("<p>Hi</p>");
    assert_eq!(tokens[0], start_tag("p", &[]));
    assert_eq!(text_of(&tokens), "Hi");
    assert_eq!(
        tokens[3],
        Token::EndTag {
            name: "p".to_string()
        }
    );
}

#[test]
fn test_tag_names_are_lowercased() {
    let tokens = tokenize("<DIV CLASS=Intro></DIV>");
    assert_eq!(tokens[0], start_tag("div", &[("class", "Intro")]));
    assert_eq!(
        tokens[1],
        Token::EndTag {
            name: "div".to_string()
        }
    );
}

#[test]
fn test_attribute_quoting_styles() {
    let tokens = tokenize(r#"<img src="a.png" alt='Pool view' width=300 hidden>"#);
    assert_eq!(
        tokens[0],
        start_tag(
            "img",
            &[
                ("src", "a.png"),
                ("alt", "Pool view"),
                ("width", "300"),
                ("hidden", "")
            ]
        )
    );
}

#[test]
fn test_self_closing_flag() {
    let tokens = tokenize("<br/>");
    assert!(matches!(
        &tokens[0],
        Token::StartTag { name, self_closing: true, .. } if name == "br"
    ));
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let (tokens, issues) = tokenize_with_issues(r#"<a href="/one" href="/two">x</a>"#);
    assert_eq!(tokens[0], start_tag("a", &[("href", "/one")]));
    assert!(issues.iter().any(|i| i.message == "duplicate-attribute"));
}

#[test]
fn test_duplicate_attribute_before_another() {
    let tokens = tokenize(r#"<img src="a" src="b" alt="c">"#);
    assert_eq!(tokens[0], start_tag("img", &[("src", "a"), ("alt", "c")]));
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- note -->after");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: " note ".to_string()
        }
    );
    assert_eq!(text_of(&tokens), "after");
}

#[test]
fn test_word_processor_conditional_comment() {
    let tokens = tokenize("<!--[if gte mso 9]><xml></xml><![endif]-->Text");
    assert!(matches!(&tokens[0], Token::Comment { data } if data.starts_with("[if gte mso 9]")));
    assert_eq!(text_of(&tokens), "Text");
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html><p>");
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: "html".to_string()
        }
    );
    assert_eq!(tokens[1], start_tag("p", &[]));
}

#[test]
fn test_bogus_comment_from_processing_instruction() {
    let (tokens, issues) = tokenize_with_issues("<?xml version=\"1.0\"?>x");
    assert!(matches!(&tokens[0], Token::Comment { data } if data.starts_with("?xml")));
    assert_eq!(text_of(&tokens), "x");
    assert!(!issues.is_empty());
}

#[test]
fn test_cdata_becomes_comment() {
    let tokens = tokenize("<![CDATA[x]]>y");
    assert!(matches!(&tokens[0], Token::Comment { data } if data.starts_with("[CDATA[")));
    assert_eq!(text_of(&tokens), "y");
}

#[test]
fn test_named_character_references() {
    let tokens = tokenize("Fish &amp; Chips&nbsp;&copy; caf&eacute;");
    assert_eq!(text_of(&tokens), "Fish & Chips\u{00A0}\u{00A9} caf\u{00E9}");
}

#[test]
fn test_legacy_reference_without_semicolon() {
    let (tokens, issues) = tokenize_with_issues("a &amp b");
    assert_eq!(text_of(&tokens), "a & b");
    assert!(
        issues
            .iter()
            .any(|i| i.message == "missing-semicolon-after-character-reference")
    );
}

#[test]
fn test_unknown_reference_is_literal() {
    assert_eq!(text_of(&tokenize("&bogus; & &")), "&bogus; & &");
}

#[test]
fn test_numeric_references() {
    assert_eq!(text_of(&tokenize("&#65;&#x42;&#X43;")), "ABC");
}

#[test]
fn test_numeric_reference_without_semicolon() {
    assert_eq!(text_of(&tokenize("&#65 x")), "A x");
}

#[test]
fn test_c1_references_use_windows_1252() {
    assert_eq!(
        text_of(&tokenize("&#147;quoted&#148; &#150; &#128;")),
        "\u{201C}quoted\u{201D} \u{2013} \u{20AC}"
    );
}

#[test]
fn test_invalid_numeric_references_become_replacement() {
    assert_eq!(
        text_of(&tokenize("&#0;&#xD800;&#x110000;&#99999999999;")),
        "\u{FFFD}\u{FFFD}\u{FFFD}\u{FFFD}"
    );
}

#[test]
fn test_numeric_reference_without_digits_is_literal() {
    assert_eq!(text_of(&tokenize("&#;&#x;")), "&#;&#x;");
}

#[test]
fn test_reference_in_attribute() {
    let tokens = tokenize(r#"<a href="/rooms?a=1&amp;b=2">"#);
    assert_eq!(tokens[0], start_tag("a", &[("href", "/rooms?a=1&b=2")]));
}

#[test]
fn test_legacy_reference_in_attribute_followed_by_equals() {
    let tokens = tokenize(r#"<a href="?x=1&copy=2">"#);
    assert_eq!(tokens[0], start_tag("a", &[("href", "?x=1&copy=2")]));
}

#[test]
fn test_crlf_is_normalized() {
    assert_eq!(text_of(&tokenize("a\r\nb\rc")), "a\nb\nc");
}

#[test]
fn test_style_content_is_raw_text() {
    let tokens = tokenize("<style>p > b { color: red }</style>after");
    assert_eq!(tokens[0], start_tag("style", &[]));
    assert_eq!(text_of(&tokens), "p > b { color: red }after");
    assert!(tokens.contains(&Token::EndTag {
        name: "style".to_string()
    }));
}

#[test]
fn test_script_content_does_not_produce_tags() {
    let tokens = tokenize("<script>if (a < b) { x = '<p>'; }</script>");
    let start_tags = tokens
        .iter()
        .filter(|t| matches!(t, Token::StartTag { .. }))
        .count();
    assert_eq!(start_tags, 1);
    assert_eq!(text_of(&tokens), "if (a < b) { x = '<p>'; }");
}

#[test]
fn test_raw_text_ignores_other_end_tags() {
    let tokens = tokenize("<style></div></style>");
    assert_eq!(text_of(&tokens), "</div>");
}

#[test]
fn test_title_decodes_references() {
    let tokens = tokenize("<title>Rooms &amp; Suites</title>");
    assert_eq!(text_of(&tokens), "Rooms & Suites");
}

#[test]
fn test_stray_less_than_is_text() {
    let (tokens, issues) = tokenize_with_issues("1 < 2");
    assert_eq!(text_of(&tokens), "1 < 2");
    assert_eq!(issues.len(), 1);
}

#[test]
fn test_eof_in_tag_drops_the_tag() {
    let tokens = tokenize("text<p class=\"x");
    assert_eq!(text_of(&tokens), "text");
    assert_eq!(tokens.last(), Some(&Token::EndOfFile));
    assert!(!tokens.iter().any(|t| matches!(t, Token::StartTag { .. })));
}

#[test]
fn test_always_ends_with_single_eof() {
    for input in ["<", "</", "<!", "<!-", "<!--", "&", "&#", "&#x", "<a b='", "<![CDATA["] {
        let tokens = tokenize(input);
        let eofs = tokens.iter().filter(|t| t.is_eof()).count();
        assert_eq!(eofs, 1, "input {input:?}");
        assert_eq!(tokens.last(), Some(&Token::EndOfFile), "input {input:?}");
    }
}

#[test]
fn test_entity_table_lookup() {
    assert_eq!(lookup_entity("amp;"), Some("&"));
    assert_eq!(lookup_entity("nbsp"), Some("\u{00A0}"));
    assert_eq!(lookup_entity("rsquo;"), Some("\u{2019}"));
    assert_eq!(lookup_entity("rsquo"), None);
    assert_eq!(lookup_entity(""), None);
}
