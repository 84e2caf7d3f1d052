//! HTML to document tree.
//!
//! The HTML is first built into a [`DomTree`] by `folio-html`, then walked
//! from the root. Each element kind has one rule; the rules, with the
//! normalizations they carry, are:
//!
//! | source                         | blocks                                                       |
//! |--------------------------------|--------------------------------------------------------------|
//! | text with visible characters   | `Paragraph`                                                  |
//! | `<p>`, stray `<li>`            | `Paragraph`, or `Empty` if nothing visible                   |
//! | `<h1>`..`<h6>`                 | `Heading` with its level, or `Empty`                         |
//! | `<ul>`, `<ol>`                 | `List`, or `Empty` if no item has text                        |
//! | `<blockquote>`                 | `Quote`, or `Empty`                                          |
//! | `<pre>`, `<code>`              | `CodeSpan`, or `Empty`                                       |
//! | `<img src>`                    | `Image`                                                      |
//! | `<a href>`                     | linked `Image` per image inside, `Link` for its text         |
//! | `<strong>`, `<b>`, `<em>`, `<i>` | `Paragraph` whose text carries the mark                   |
//! | `<br>`, `<hr>`                 | `Empty`                                                      |
//! | `<div>` and other containers   | children one by one if any is a block, else see below          |
//! | `<script>`, `<style>`, `<head>`, ... | nothing                                                |
//! | anything else                  | its children                                                 |
//!
//! A container with no block inside it becomes one `Paragraph` from its
//! direct text, then a block for each child element in turn; an empty one
//! becomes `Empty`.
//!
//! Images inside text are hoisted out as `Image` blocks and split the text
//! around them into blocks of the same kind.
//!
//! If the walk produces no block at all, the visible text becomes one
//! paragraph; if there is none but the markup was broken, the raw input
//! does. Content is never silently dropped.
//!
//! Every degradation is reported once per parse into the [`Warnings`] that
//! [`parse_into`] returns.

mod inline;
mod list;

use folio_common::text::{collapse_whitespace, is_blank, normalize_lines};
use std::cell::RefCell;

use folio_common::warning::Warnings;
use folio_dom::{DomTree, ElementData, NodeId, NodeType};
use folio_html::ParsedFragment;

use crate::block::Block;
use crate::document::BlockSink;
use crate::element::ElementKind;
use crate::inline::{InlineRun, Marks};
use crate::options::ParseOptions;

use inline::{InlineCollector, Segment, image_block};

/// Log target for parser degradations.
pub const LOG_TARGET: &str = "folio::document";

/// Parse `html` and push the resulting blocks into `sink`, in order.
///
/// Total: any input produces blocks or nothing, never a panic. Returns the
/// degradations met on the way, for this parse only.
pub fn parse_into(html: &str, options: &ParseOptions, sink: &mut dyn BlockSink) -> Warnings {
    let fragment = folio_html::parse_fragment(html);
    let mut warnings = Warnings::new();
    fragment.report(&mut warnings);
    let warnings = RefCell::new(warnings);
    let walker = Walker {
        tree: &fragment.dom,
        options,
        warnings: &warnings,
    };
    let mut out = Emitter { sink, emitted: 0 };
    walker.children(NodeId::ROOT, 0, &mut out);
    if out.emitted == 0 {
        fallback(html, &fragment, &mut out);
    }
    log::debug!(target: LOG_TARGET, "parsed {} bytes into {} blocks", html.len(), out.emitted);
    warnings.into_inner()
}

/// Last resort when the walk found nothing to keep.
fn fallback(html: &str, fragment: &ParsedFragment, out: &mut Emitter<'_>) {
    let visible = collapse_whitespace(&fragment.dom.text_content(NodeId::ROOT));
    if !is_blank(&visible) {
        log::debug!(target: LOG_TARGET, "no blocks recognized, keeping visible text");
        out.push(Block::paragraph(&visible));
    } else if fragment.has_tokenizer_issues() && !is_blank(html) {
        log::debug!(target: LOG_TARGET, "no blocks recognized in malformed input, keeping raw text");
        out.push(Block::paragraph(html));
    }
}

/// A sink that counts what passes through it.
struct Emitter<'s> {
    sink: &'s mut dyn BlockSink,
    emitted: usize,
}

impl Emitter<'_> {
    fn push(&mut self, block: Block) {
        self.emitted += 1;
        self.sink.push_block(block);
    }
}

/// Read-only context for one parse.
struct Walker<'t> {
    tree: &'t DomTree,
    options: &'t ParseOptions,
    warnings: &'t RefCell<Warnings>,
}

impl<'t> Walker<'t> {
    fn children(&self, node: NodeId, depth: usize, out: &mut Emitter<'_>) {
        for &child in self.tree.children(node) {
            self.node(child, depth + 1, out);
        }
    }

    fn node(&self, node: NodeId, depth: usize, out: &mut Emitter<'_>) {
        match self.tree.get(node).map(|n| &n.node_type) {
            Some(NodeType::Text(_)) => {
                let mut collector = self.collector();
                collector.collect(node, &Marks::plain(), depth);
                let _ = emit_segments(collector.finish(), out, |inline| Block::Paragraph { inline });
            }
            Some(NodeType::Element(data)) => self.element(node, data, depth, out),
            Some(NodeType::Document | NodeType::Comment(_)) | None => {}
        }
    }

    fn element(&self, node: NodeId, data: &ElementData, depth: usize, out: &mut Emitter<'_>) {
        if depth > self.options.max_depth {
            self.too_deep(node, out);
            return;
        }
        let kind = ElementKind::from_tag(&data.tag_name);
        match kind {
            ElementKind::P | ElementKind::Li => {
                self.inline_block(node, depth, out, |inline| Block::Paragraph { inline });
            }
            ElementKind::H1
            | ElementKind::H2
            | ElementKind::H3
            | ElementKind::H4
            | ElementKind::H5
            | ElementKind::H6 => {
                if let Some(level) = kind.heading_level() {
                    self.inline_block(node, depth, out, |inline| Block::Heading { level, inline });
                }
            }
            ElementKind::Ul => list::walk_list(self, node, false, depth, out),
            ElementKind::Ol => list::walk_list(self, node, true, depth, out),
            ElementKind::Blockquote => {
                self.inline_block(node, depth, out, |inline| Block::Quote { inline });
            }
            ElementKind::Pre | ElementKind::Code => {
                let text = normalize_lines(&self.tree.text_content(node));
                if is_blank(&text) {
                    out.push(Block::Empty);
                } else {
                    out.push(Block::CodeSpan { text });
                }
            }
            ElementKind::Img => {
                if let Some(image) = image_block(data, None, self.warnings) {
                    out.push(Block::Image(image));
                }
            }
            ElementKind::A => self.anchor(node, data, depth, out),
            ElementKind::Strong | ElementKind::Em => {
                let mut collector = self.collector();
                collector.collect(node, &Marks::plain(), depth);
                let _ = emit_segments(collector.finish(), out, |inline| Block::Paragraph { inline });
            }
            ElementKind::Br | ElementKind::Hr => out.push(Block::Empty),
            ElementKind::Container => self.container(node, depth, out),
            ElementKind::Stripped => {}
            ElementKind::Other => self.children(node, depth, out),
        }
    }

    /// Read `node`'s content as one block of text, split around images.
    fn inline_block<F>(&self, node: NodeId, depth: usize, out: &mut Emitter<'_>, make: F)
    where
        F: Fn(InlineRun) -> Block,
    {
        let mut collector = self.collector();
        collector.collect_children(node, &Marks::plain(), depth);
        if !emit_segments(collector.finish(), out, make) {
            out.push(Block::Empty);
        }
    }

    fn container(&self, node: NodeId, depth: usize, out: &mut Emitter<'_>) {
        let tree = self.tree;
        if tree.children(node).is_empty() {
            out.push(Block::Empty);
            return;
        }
        let has_block =
            tree.has_descendant_element(node, |e| ElementKind::from_tag(&e.tag_name).is_block());
        if has_block {
            self.children(node, depth, out);
            return;
        }
        let before = out.emitted;
        let mut text = self.collector();
        for &child in tree.children(node) {
            if let Some(NodeType::Text(data)) = tree.get(child).map(|n| &n.node_type) {
                text.push_text(data, &Marks::plain());
            }
        }
        let _ = emit_segments(text.finish(), out, |inline| Block::Paragraph { inline });
        for &child in tree.children(node) {
            if tree.as_element(child).is_some() {
                self.node(child, depth + 1, out);
            }
        }
        if out.emitted == before {
            out.push(Block::Empty);
        }
    }

    /// `<a>` at block level: its images become linked image blocks and its
    /// text a link block. Without an `href` it is just a wrapper.
    fn anchor(&self, node: NodeId, data: &ElementData, depth: usize, out: &mut Emitter<'_>) {
        let Some(href) = data.attr("href") else {
            self.children(node, depth, out);
            return;
        };
        let mut images = 0;
        for descendant in self.tree.descendants(node) {
            let Some(img) = self
                .tree
                .as_element(descendant)
                .filter(|e| ElementKind::from_tag(&e.tag_name) == ElementKind::Img)
            else {
                continue;
            };
            if let Some(image) = image_block(img, Some(href), self.warnings) {
                out.push(Block::Image(image));
                images += 1;
            }
        }
        let text = collapse_whitespace(&self.tree.text_content(node));
        if !is_blank(&text) {
            out.push(Block::Link {
                href: href.to_string(),
                text,
            });
        } else if images == 0 {
            let shown = collapse_whitespace(href);
            if is_blank(&shown) {
                out.push(Block::Empty);
            } else {
                out.push(Block::Link {
                    href: href.to_string(),
                    text: shown,
                });
            }
        }
    }

    fn too_deep(&self, node: NodeId, out: &mut Emitter<'_>) {
        let _ = self
            .warnings
            .borrow_mut()
            .warn(LOG_TARGET, "nesting deeper than max_depth read as text");
        let text = collapse_whitespace(&self.tree.text_content(node));
        if !is_blank(&text) {
            out.push(Block::paragraph(&text));
        }
    }

    const fn collector(&self) -> InlineCollector<'t> {
        InlineCollector::new(self)
    }
}

/// Push text segments as blocks built by `make` and images as image blocks.
/// Returns false if there was nothing to push.
fn emit_segments<F>(segments: Vec<Segment>, out: &mut Emitter<'_>, make: F) -> bool
where
    F: Fn(InlineRun) -> Block,
{
    let any = !segments.is_empty();
    for segment in segments {
        match segment {
            Segment::Run(run) => out.push(make(run)),
            Segment::Image(image) => out.push(Block::Image(image)),
        }
    }
    any
}
