//! Reading the inline content of a block element.
//!
//! Formatting elements become [`Marks`]. Images cannot live inside a run,
//! so each one ends the current run and is returned as its own segment; the
//! caller turns the segments back into blocks in document order.

use std::cell::RefCell;

use folio_common::warning::Warnings;
use folio_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::block::ImageBlock;
use crate::element::ElementKind;
use crate::inline::{InlineRun, Marks};
use crate::options::ParseOptions;

use super::{LOG_TARGET, Walker};

/// A piece of an inline container, in document order.
#[derive(Debug)]
pub(super) enum Segment {
    /// Normalized, non-blank text.
    Run(InlineRun),
    /// An image hoisted out of the text around it.
    Image(ImageBlock),
}

pub(super) struct InlineCollector<'t> {
    tree: &'t DomTree,
    options: &'t ParseOptions,
    warnings: &'t RefCell<Warnings>,
    segments: Vec<Segment>,
    current: InlineRun,
}

impl<'t> InlineCollector<'t> {
    pub(super) const fn new(walker: &Walker<'t>) -> Self {
        Self {
            tree: walker.tree,
            options: walker.options,
            warnings: walker.warnings,
            segments: Vec::new(),
            current: InlineRun::new(),
        }
    }

    /// True until something has been collected.
    pub(super) fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.current.is_empty()
    }

    pub(super) fn collect_children(&mut self, node: NodeId, marks: &Marks, depth: usize) {
        let tree = self.tree;
        for &child in tree.children(node) {
            self.collect(child, marks, depth + 1);
        }
    }

    pub(super) fn collect(&mut self, node: NodeId, marks: &Marks, depth: usize) {
        let tree = self.tree;
        match tree.get(node).map(|n| &n.node_type) {
            Some(NodeType::Text(text)) => self.push_text(text, marks),
            Some(NodeType::Element(data)) => self.collect_element(node, data, marks, depth),
            Some(NodeType::Document | NodeType::Comment(_)) | None => {}
        }
    }

    /// Append source text. Newlines in source text are layout, not breaks.
    pub(super) fn push_text(&mut self, text: &str, marks: &Marks) {
        let text = text.replace('\n', " ");
        if self.options.recognize_markers {
            self.current.push_markers(&text, marks);
        } else {
            self.current.push_str(&text, marks);
        }
    }

    fn collect_element(&mut self, node: NodeId, data: &ElementData, marks: &Marks, depth: usize) {
        if depth > self.options.max_depth {
            let _ = self
                .warnings
                .borrow_mut()
                .warn(LOG_TARGET, "inline nesting deeper than max_depth read as text");
            let text = self.tree.text_content(node);
            self.push_text(&text, marks);
            return;
        }
        match ElementKind::from_tag(&data.tag_name) {
            ElementKind::Strong => self.collect_children(node, &marks.with_bold(), depth),
            ElementKind::Em => self.collect_children(node, &marks.with_italic(), depth),
            ElementKind::Code => self.collect_children(node, &marks.with_code(), depth),
            ElementKind::A => match data.attr("href") {
                Some(href) => self.collect_children(node, &marks.with_link(href), depth),
                None => self.collect_children(node, marks, depth),
            },
            ElementKind::Br => self.current.push_char('\n', marks),
            ElementKind::Img => {
                if let Some(image) = image_block(data, marks.link.as_deref(), self.warnings) {
                    self.end_run();
                    self.segments.push(Segment::Image(image));
                }
            }
            ElementKind::Hr => self.current.push_soft_break(),
            ElementKind::P
            | ElementKind::H1
            | ElementKind::H2
            | ElementKind::H3
            | ElementKind::H4
            | ElementKind::H5
            | ElementKind::H6
            | ElementKind::Ul
            | ElementKind::Ol
            | ElementKind::Li
            | ElementKind::Blockquote
            | ElementKind::Pre
            | ElementKind::Container => {
                self.current.push_soft_break();
                self.collect_children(node, marks, depth);
                self.current.push_soft_break();
            }
            ElementKind::Stripped => {}
            ElementKind::Other => self.collect_children(node, marks, depth),
        }
    }

    fn end_run(&mut self) {
        let run = std::mem::take(&mut self.current);
        if !run.is_empty() {
            self.segments.push(Segment::Run(run));
        }
    }

    /// Normalize every run and drop the blank ones.
    pub(super) fn finish(mut self) -> Vec<Segment> {
        self.end_run();
        self.segments
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Run(mut run) => {
                    run.normalize();
                    (!run.is_blank()).then_some(Segment::Run(run))
                }
                Segment::Image(image) => Some(Segment::Image(image)),
            })
            .collect()
    }
}

/// Build an image block from an `<img>`, linked to `link_href` if given.
///
/// An image without a `src` shows nothing and is skipped.
pub(super) fn image_block(
    data: &ElementData,
    link_href: Option<&str>,
    warnings: &RefCell<Warnings>,
) -> Option<ImageBlock> {
    let Some(src) = data.attr("src") else {
        let _ = warnings.borrow_mut().warn(LOG_TARGET, "img without src skipped");
        return None;
    };
    Some(ImageBlock {
        src: src.to_string(),
        alt: data.attr("alt").unwrap_or_default().to_string(),
        width: data.attr("width").map(str::to_string),
        height: data.attr("height").map(str::to_string),
        link_href: link_href.map(str::to_string),
    })
}
