//! Lists.
//!
//! `<li>` children are items. Content outside `<li>` is read line by line:
//! each `<p>`, each `<br>`-separated line and each newline in direct text is
//! an item, with one typed list marker (`•` or `N.`) removed so that lists
//! written as marker text read back as the same items. Nested lists flatten
//! into the same item sequence.

use folio_dom::{ElementData, NodeId, NodeType};

use crate::block::Block;
use crate::element::ElementKind;
use crate::inline::{InlineRun, Marks};

use super::inline::{InlineCollector, Segment};
use super::{Emitter, Walker};

/// Walk one `<ul>` or `<ol>`, emitting its list block.
///
/// Images inside items split the list: the items before an image form one
/// list block, the image follows, and later items start a new list. A list
/// with no item text becomes an empty block.
pub(super) fn walk_list(
    walker: &Walker<'_>,
    list: NodeId,
    ordered: bool,
    depth: usize,
    out: &mut Emitter<'_>,
) {
    let mut state = ListState {
        walker,
        ordered,
        items: Vec::new(),
        line: InlineCollector::new(walker),
        strip_marker: None,
        emitted_any: false,
    };
    state.children(list, ordered, depth, out);
    state.flush_line(out);
    state.flush_list(out);
    if !state.emitted_any {
        out.push(Block::Empty);
    }
}

struct ListState<'w, 't> {
    walker: &'w Walker<'t>,
    ordered: bool,
    items: Vec<InlineRun>,
    line: InlineCollector<'t>,
    /// `Some(ordered)` when the current line came from outside an `<li>`.
    strip_marker: Option<bool>,
    emitted_any: bool,
}

impl ListState<'_, '_> {
    fn children(&mut self, list: NodeId, list_ordered: bool, depth: usize, out: &mut Emitter<'_>) {
        let tree = self.walker.tree;
        if depth > self.walker.options.max_depth {
            self.flush_line(out);
            self.begin_line(None);
            self.line.push_text(&tree.text_content(list), &Marks::plain());
            self.flush_line(out);
            return;
        }
        for &child in tree.children(list) {
            match tree.get(child).map(|n| &n.node_type) {
                Some(NodeType::Text(text)) => {
                    for (i, piece) in text.split('\n').enumerate() {
                        if i > 0 {
                            self.flush_line(out);
                        }
                        self.begin_line(Some(list_ordered));
                        self.line.push_text(piece, &Marks::plain());
                    }
                }
                Some(NodeType::Element(data)) => {
                    self.element(child, data, list_ordered, depth + 1, out);
                }
                Some(NodeType::Document | NodeType::Comment(_)) | None => {}
            }
        }
    }

    fn element(
        &mut self,
        node: NodeId,
        data: &ElementData,
        list_ordered: bool,
        depth: usize,
        out: &mut Emitter<'_>,
    ) {
        match ElementKind::from_tag(&data.tag_name) {
            ElementKind::Li => {
                self.flush_line(out);
                self.list_item(node, depth, out);
                self.flush_line(out);
            }
            ElementKind::Ul => {
                self.flush_line(out);
                self.children(node, false, depth, out);
                self.flush_line(out);
            }
            ElementKind::Ol => {
                self.flush_line(out);
                self.children(node, true, depth, out);
                self.flush_line(out);
            }
            ElementKind::Br => self.flush_line(out),
            ElementKind::P
            | ElementKind::H1
            | ElementKind::H2
            | ElementKind::H3
            | ElementKind::H4
            | ElementKind::H5
            | ElementKind::H6
            | ElementKind::Blockquote
            | ElementKind::Pre
            | ElementKind::Hr
            | ElementKind::Container => {
                self.flush_line(out);
                self.begin_line(Some(list_ordered));
                self.line.collect_children(node, &Marks::plain(), depth);
                self.flush_line(out);
            }
            ElementKind::Stripped => {}
            ElementKind::Strong
            | ElementKind::Em
            | ElementKind::Code
            | ElementKind::A
            | ElementKind::Img
            | ElementKind::Other => {
                self.begin_line(Some(list_ordered));
                self.line.collect(node, &Marks::plain(), depth);
            }
        }
    }

    /// One `<li>`: its inline content is an item, nested lists add more.
    fn list_item(&mut self, item: NodeId, depth: usize, out: &mut Emitter<'_>) {
        let tree = self.walker.tree;
        for &child in tree.children(item) {
            let nested = tree
                .tag_name(child)
                .map(ElementKind::from_tag)
                .filter(|kind| matches!(kind, ElementKind::Ul | ElementKind::Ol));
            if let Some(kind) = nested {
                self.flush_line(out);
                self.children(child, kind == ElementKind::Ol, depth + 1, out);
            } else {
                self.begin_line(None);
                self.line.collect(child, &Marks::plain(), depth + 1);
            }
        }
    }

    /// The first content of a line decides whether a typed marker is removed.
    fn begin_line(&mut self, strip_marker: Option<bool>) {
        if self.line.is_empty() {
            self.strip_marker = strip_marker;
        }
    }

    fn flush_line(&mut self, out: &mut Emitter<'_>) {
        let fresh = InlineCollector::new(self.walker);
        let line = std::mem::replace(&mut self.line, fresh);
        for segment in line.finish() {
            match segment {
                Segment::Run(mut run) => {
                    if let Some(ordered) = self.strip_marker {
                        let _ = run.strip_list_marker(ordered);
                    }
                    if !run.is_blank() {
                        self.items.push(run);
                    }
                }
                Segment::Image(image) => {
                    self.flush_list(out);
                    out.push(Block::Image(image));
                    self.emitted_any = true;
                }
            }
        }
        self.strip_marker = None;
    }

    fn flush_list(&mut self, out: &mut Emitter<'_>) {
        if self.items.is_empty() {
            return;
        }
        out.push(Block::List {
            ordered: self.ordered,
            items: std::mem::take(&mut self.items),
        });
        self.emitted_any = true;
    }
}
