use core::fmt::Write as _;

use folio_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::issue::{ParseIssue, ParseStage};
use crate::tokenizer::{Attribute, Token};

const LOG_TARGET: &str = ParseStage::TreeBuilder.log_target();

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr". `param` is obsolete but still pasted.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Start tags that close an open `p` element in button scope.
///
/// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody):
/// "A start tag whose tag name is one of: address, article, aside,
/// blockquote, center, details, dialog, dir, div, dl, fieldset, figcaption,
/// figure, footer, header, hgroup, main, menu, nav, ol, p, search, section,
/// summary, ul ... If the stack of open elements has a p element in button
/// scope, then close a p element."
const CLOSES_P: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "details", "dialog", "dir", "div",
    "dl", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "main", "menu", "nav", "ol", "p", "pre", "search",
    "section", "summary", "table", "ul",
];

/// [§ 13.2.4.2 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// The subset of special elements that stop the "any other end tag" walk:
/// a stray `</b>` never closes a paragraph it is not inside of.
const SPECIAL: &[&str] = &[
    "address", "article", "aside", "blockquote", "caption", "center", "dd", "details", "dialog",
    "dir", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "li", "main", "menu", "nav", "ol", "p",
    "pre", "search", "section", "summary", "table", "tbody", "td", "tfoot", "th", "thead", "tr",
    "ul",
];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
/// Markers for "has an element in scope".
const DEFAULT_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template",
];

/// "has an element in button scope": the default scope plus `button`.
const BUTTON_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template", "button",
];

/// "has an element in list item scope": the default scope plus `ol`, `ul`.
const LIST_ITEM_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template", "ol",
    "ul",
];

/// "has an element in table scope"
const TABLE_SCOPE: &[&str] = &["html", "table", "template"];

/// Builds a [`DomTree`] from a token stream.
///
/// A lenient fragment builder rather than the full insertion-mode machine:
/// a pasted fragment has no `<head>` or `<body>` to reconstruct, so the
/// stack of open elements and a handful of implied-end-tag rules from
/// [§ 13.2.6.4.7 "in body"](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
/// are enough. `html` and `body` tags are transparent; their content is
/// inserted where it stands.
pub struct HtmlParser {
    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    stack_of_open_elements: Vec<NodeId>,

    /// DOM tree; `NodeId::ROOT` is the fragment root.
    tree: DomTree,

    /// Input tokens from the tokenizer.
    tokens: Vec<Token>,

    /// Current position in token stream.
    token_index: usize,

    /// Parse issues encountered during tree construction.
    issues: Vec<ParseIssue>,
}

impl HtmlParser {
    /// Create a new parser from a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            stack_of_open_elements: Vec::new(),
            tree: DomTree::new(),
            tokens,
            token_index: 0,
            issues: Vec::new(),
        }
    }

    /// Run the parser and return the DOM tree.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Run the parser and return both the `DomTree` and any parse issues.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        let tokens = std::mem::take(&mut self.tokens);
        for (index, token) in tokens.into_iter().enumerate() {
            self.token_index = index;
            if token.is_eof() {
                break;
            }
            self.process_token(token);
        }
        self.stack_of_open_elements.clear();
        (self.tree, self.issues)
    }

    fn parse_error(&mut self, message: &str) {
        log::debug!(target: LOG_TARGET, "{message} at token {}", self.token_index);
        self.issues.push(ParseIssue {
            stage: ParseStage::TreeBuilder,
            message: message.to_string(),
            position: self.token_index,
        });
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    ///
    /// "The current node is the bottommost node in this stack of open elements."
    /// With nothing open, content goes to the fragment root.
    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    fn current_tag_name(&self) -> Option<&str> {
        self.stack_of_open_elements
            .last()
            .and_then(|&id| self.tree.tag_name(id))
    }

    fn process_token(&mut self, token: Token) {
        match token {
            // A DOCTYPE in a fragment has nothing to configure.
            Token::Doctype { .. } | Token::EndOfFile => {}
            Token::Comment { data } => {
                let parent = self.current_node();
                let comment = self.tree.alloc(NodeType::Comment(data));
                self.tree.append_child(parent, comment);
            }
            Token::Character { data } => self.insert_character(data),
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => self.handle_start_tag(&name, self_closing, attributes),
            Token::EndTag { name } => self.handle_end_tag(&name),
        }
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "If there is a Text node immediately before the adjusted insertion
    /// location, then append data to that Text node's data."
    fn insert_character(&mut self, c: char) {
        let mut buf = [0; 4];
        let parent = self.current_node();
        self.tree.append_text(parent, c.encode_utf8(&mut buf));
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// Void elements are appended but never pushed onto the stack.
    fn insert_html_element(&mut self, name: &str, attributes: Vec<Attribute>) -> NodeId {
        let mut data = ElementData::new(name);
        for attr in attributes {
            let _ = data.attrs.entry(attr.name).or_insert(attr.value);
        }
        let parent = self.current_node();
        let element = self.tree.alloc(NodeType::Element(data));
        self.tree.append_child(parent, element);
        if !VOID_ELEMENTS.contains(&name) {
            self.stack_of_open_elements.push(element);
        }
        element
    }

    fn handle_start_tag(&mut self, name: &str, self_closing: bool, attributes: Vec<Attribute>) {
        match name {
            // Full documents pasted whole: the wrappers are transparent.
            "html" | "body" => return,
            // "A start tag whose tag name is "li"": close an open li unless
            // a list boundary comes first.
            "li" => {
                self.close_list_item(&["li"], &["ol", "ul"]);
                self.close_p_in_button_scope();
            }
            "dd" | "dt" => {
                self.close_list_item(&["dd", "dt"], &["dl"]);
                self.close_p_in_button_scope();
            }
            // "If the current node is an HTML element whose tag name is one of
            // h1, h2, h3, h4, h5, or h6, then this is a parse error; pop the
            // current node off the stack of open elements."
            _ if HEADINGS.contains(&name) => {
                self.close_p_in_button_scope();
                if self
                    .current_tag_name()
                    .is_some_and(|current| HEADINGS.contains(&current))
                {
                    self.parse_error("heading-nested-in-heading");
                    let _ = self.stack_of_open_elements.pop();
                }
            }
            _ if CLOSES_P.contains(&name) => self.close_p_in_button_scope(),
            // "A start tag whose tag name is "a": If the list of active
            // formatting elements contains an a element ... this is a parse
            // error; run the adoption agency algorithm for the token."
            // Closing the open `a` is the effect that matters for a fragment.
            "a" => {
                if self.has_element_in_scope(&["a"], DEFAULT_SCOPE) {
                    self.parse_error("nested-anchor");
                    self.pop_until_one_of(&["a"]);
                }
            }
            "td" | "th" => {
                if self.has_element_in_scope(&["td", "th"], TABLE_SCOPE) {
                    self.pop_until_one_of(&["td", "th"]);
                }
            }
            "tr" => {
                if self.has_element_in_scope(&["tr"], TABLE_SCOPE) {
                    self.pop_until_one_of(&["tr"]);
                }
            }
            _ => {}
        }

        // "Acknowledge the token's self-closing flag" only for void elements.
        if self_closing && !VOID_ELEMENTS.contains(&name) {
            self.parse_error("non-void-html-element-start-tag-with-trailing-solidus");
        }
        let _ = self.insert_html_element(name, attributes);
    }

    fn handle_end_tag(&mut self, name: &str) {
        match name {
            "html" | "body" => {}
            // "An end tag whose tag name is "br": Parse error. Drop the
            // attributes from the token, and act as described in the next
            // entry; i.e. act as if this was a "br" start tag token."
            "br" => {
                self.parse_error("end-tag-br");
                let _ = self.insert_html_element("br", Vec::new());
            }
            // "If the stack of open elements does not have a p element in
            // button scope, then this is a parse error; insert an HTML element
            // for a "p" start tag token with no attributes. Close a p element."
            "p" => {
                if !self.has_element_in_scope(&["p"], BUTTON_SCOPE) {
                    self.parse_error("end-tag-p-without-open-p");
                    let _ = self.insert_html_element("p", Vec::new());
                }
                self.pop_until_one_of(&["p"]);
            }
            "li" => self.close_in_scope(&["li"], LIST_ITEM_SCOPE),
            // "If the stack of open elements does not have an element in scope
            // that is an HTML element and whose tag name is one of h1 ... h6,
            // then this is a parse error; ignore the token."
            _ if HEADINGS.contains(&name) => self.close_in_scope(HEADINGS, DEFAULT_SCOPE),
            "table" | "caption" | "tbody" | "thead" | "tfoot" | "tr" | "td" | "th" => {
                self.close_in_scope(&[name], TABLE_SCOPE);
            }
            // "An end tag whose tag name is one of: address, article, aside,
            // blockquote, ... ul: If the stack of open elements does not have
            // an element in scope that is an HTML element with the same tag
            // name as that of the token, then this is a parse error; ignore
            // the token. Otherwise ... pop elements from the stack of open
            // elements until an HTML element with the same tag name as the
            // token has been popped from the stack."
            _ if SPECIAL.contains(&name) => self.close_in_scope(&[name], DEFAULT_SCOPE),
            _ => self.any_other_end_tag(name),
        }
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// "Any other end tag"
    fn any_other_end_tag(&mut self, name: &str) {
        // STEP 1: "Initialize node to be the current node."
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node = self.stack_of_open_elements[index];
            let node_name = self.tree.tag_name(node).unwrap_or_default();
            // STEP 2: "If node is an HTML element with the same tag name as
            // the token, then pop all the nodes from the current node up to
            // node, including node."
            if node_name == name {
                self.stack_of_open_elements.truncate(index);
                return;
            }
            // STEP 3: "Otherwise, if node is in the special category, then
            // this is a parse error; ignore the token, and return."
            if SPECIAL.contains(&node_name) {
                break;
            }
        }
        self.parse_error("unexpected-end-tag");
    }

    /// Pop to the nearest element named in `names` if one is in scope;
    /// otherwise record a parse error and ignore the token.
    fn close_in_scope(&mut self, names: &[&str], scope: &[&str]) {
        if self.has_element_in_scope(names, scope) {
            self.pop_until_one_of(names);
        } else {
            self.parse_error("unexpected-end-tag");
        }
    }

    /// The `li`/`dd`/`dt` start tag loop: walk down the stack, closing the
    /// first item found, stopping at a list container or other special
    /// element that is not `address`, `div`, or `p`.
    fn close_list_item(&mut self, items: &[&str], containers: &[&str]) {
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node = self.stack_of_open_elements[index];
            let node_name = self.tree.tag_name(node).unwrap_or_default();
            if items.contains(&node_name) {
                self.stack_of_open_elements.truncate(index);
                return;
            }
            if containers.contains(&node_name)
                || (SPECIAL.contains(&node_name) && !matches!(node_name, "address" | "div" | "p"))
            {
                return;
            }
        }
    }

    /// "If the stack of open elements has a p element in button scope, then
    /// close a p element."
    fn close_p_in_button_scope(&mut self) {
        if self.has_element_in_scope(&["p"], BUTTON_SCOPE) {
            self.pop_until_one_of(&["p"]);
        }
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// STEP 1: "Initialize node to be the current node."
    /// STEP 2: "If node is the target node, terminate in a match state."
    /// STEP 3: "Otherwise, if node is one of the element types in list,
    ///          terminate in a failure state."
    /// STEP 4: "Otherwise, set node to the previous entry in the stack of
    ///          open elements and return to step 2."
    fn has_element_in_scope(&self, targets: &[&str], scope: &[&str]) -> bool {
        for &node in self.stack_of_open_elements.iter().rev() {
            let Some(node_name) = self.tree.tag_name(node) else {
                continue;
            };
            if targets.contains(&node_name) {
                return true;
            }
            if scope.contains(&node_name) {
                return false;
            }
        }
        false
    }

    /// Pop elements until one named in `names` has been popped.
    fn pop_until_one_of(&mut self, names: &[&str]) {
        while let Some(node) = self.stack_of_open_elements.pop() {
            if self
                .tree
                .tag_name(node)
                .is_some_and(|name| names.contains(&name))
            {
                break;
            }
        }
    }
}

/// Render a tree as an indented outline, one node per line.
///
/// Attributes are sorted by name so the output is stable for tests and logs.
#[must_use]
pub fn format_tree(tree: &DomTree) -> String {
    let mut out = String::new();
    let mut stack: Vec<(NodeId, usize)> = vec![(NodeId::ROOT, 0)];
    while let Some((id, depth)) = stack.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        let prefix = "  ".repeat(depth);
        let _ = match &node.node_type {
            NodeType::Document => writeln!(out, "{prefix}#fragment"),
            NodeType::Element(data) => {
                let mut attrs: Vec<_> = data.attrs.iter().collect();
                attrs.sort();
                let _ = write!(out, "{prefix}<{}", data.tag_name);
                for (name, value) in attrs {
                    let _ = write!(out, " {name}=\"{value}\"");
                }
                writeln!(out, ">")
            }
            NodeType::Text(data) => writeln!(out, "{prefix}\"{}\"", data.replace('\n', "\\n")),
            NodeType::Comment(data) => writeln!(out, "{prefix}<!--{data}-->"),
        };
        stack.extend(tree.children(id).iter().rev().map(|&child| (child, depth + 1)));
    }
    out
}
