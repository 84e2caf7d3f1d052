//! Tests for editing sessions.

use folio_document::{Block, EditorConfig, InlineRun, LOG_TARGET, Session};

/// Helper to start a session with default configuration
fn session(html: &str) -> Session {
    Session::load(html, EditorConfig::default())
}

#[test]
fn test_load_normalizes_without_pending_output() {
    let mut session = session("<h2>Pool Hours</h2><p>9am to 6pm</p>");
    assert_eq!(session.document().len(), 2);
    assert_eq!(session.html(), "<p>Pool Hours</p><p>9am to 6pm</p>");
    assert!(!session.has_pending());
    assert_eq!(session.take_pending(), None);
}

#[test]
fn test_edit_produces_pending_html_once() {
    let mut session = session("<p>9am to 6pm</p>");
    session.edit(|doc| doc.push(Block::paragraph("Towels at the desk")));
    assert_eq!(
        session.take_pending().as_deref(),
        Some("<p>9am to 6pm</p><p>Towels at the desk</p>")
    );
    assert_eq!(session.take_pending(), None);
}

#[test]
fn test_edit_without_change_is_not_pending() {
    let mut session = session("<p>same</p>");
    let len = session.edit(|doc| doc.len());
    assert_eq!(len, 1);
    assert!(!session.has_pending());
}

#[test]
fn test_rapid_edits_keep_only_latest_html() {
    let mut session = session("");
    for n in 1..=3 {
        session.edit(|doc| doc.push(Block::paragraph(&n.to_string())));
    }
    assert_eq!(
        session.take_pending().as_deref(),
        Some("<p>1</p><p>2</p><p>3</p>")
    );
}

#[test]
fn test_edit_result_is_returned() {
    let mut session = session("<p>a</p>");
    let result = session.edit(|doc| doc.remove(5));
    assert!(result.is_err());
    assert!(!session.has_pending());
}

#[test]
fn test_in_place_edit_is_detected() {
    let mut session = session("<p>Pool</p>");
    session.edit(|doc| {
        if let Some(Block::Paragraph { inline }) = doc.get_mut(0) {
            *inline = InlineRun::plain("Pool and spa");
        }
    });
    assert_eq!(session.html(), "<p>Pool and spa</p>");
    assert!(session.has_pending());
}

#[test]
fn test_reload_discards_tree_and_pending() {
    let mut session = session("<p>old</p>");
    session.edit(|doc| doc.push(Block::Empty));
    session.reload("<p>new</p>");
    assert!(!session.has_pending());
    assert_eq!(session.into_document().into_blocks(), vec![Block::paragraph("new")]);
}

#[test]
fn test_config_shapes_output() {
    let config = EditorConfig::from_json(r#"{"serialize": {"headings": "preserve"}}"#).unwrap();
    let session = Session::load("<h1>Welcome</h1>", config);
    assert_eq!(session.html(), "<h1>Welcome</h1>");
    assert!(matches!(session.document()[0], Block::Heading { .. }));
}

#[test]
fn test_sessions_keep_their_own_warnings() {
    let broken = session("<p>Spa</p><img alt=\"no source\">");
    assert!(broken.warnings().was_warned(LOG_TARGET, "img without src skipped"));

    let mut clean = session("<p>Spa</p><img alt=\"no source\">");
    clean.reload("<p>Gym</p>");
    assert!(clean.warnings().is_empty());
    assert!(broken.warnings().was_warned(LOG_TARGET, "img without src skipped"));
}
