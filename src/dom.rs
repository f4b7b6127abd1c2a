// src/dom.rs
// Minimal HTML tree for hero pages. Deliberately naive but tailored to
// the wiki's markup: lowercased ASCII tag names, no implicit closes, no
// error recovery beyond ignoring stray close tags. Whitespace-only text
// nodes are kept: the changelog heuristics skip siblings by position
// and the separator nodes between a paragraph and its list matter.
//
// Extractors never touch tags or classes directly; they query by Role.
// The Role → matcher table below is the only place markup vocabulary
// appears.

use crate::core::sanitize::normalize_entities;

pub type NodeId = usize;

/// Logical roles the extractors query for. One wiki redesign away from
/// needing new matchers, but the extractor code stays put.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Hero page title (`<h1>`).
    PageTitle,
    /// One ability's detail box.
    AbilityBlock,
    /// The name/keybind header inside an ability box.
    AbilityHeader,
    /// Summary-and-image node; stats live in its following sibling.
    AbilitySummary,
    /// Any plain block container (`<div>`): the stats box after an
    /// ability summary, or a nested dev-comment container.
    Block,
    /// Key/value stat row: a div holding exactly two divs.
    StatPair,
    /// Tooltip span carrying a `title` attribute.
    Tooltip,
    /// The active changelog tab content.
    ChangelogCurrent,
    /// Patch-date cell (the wiki reuses `id="patch"` per row).
    PatchMarker,
    /// Patch-description cell (`id="description"`).
    PatchDescription,
    Paragraph,
    BulletList,
    BulletItem,
    Link,
}

enum NodeKind {
    Element { tag: String, attrs: Vec<(String, String)> },
    Text(String),
}

struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

pub struct Document {
    nodes: Vec<Node>,
}

const ROOT: NodeId = 0;

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link",
    "meta", "param", "source", "track", "wbr",
];

impl Document {
    /* ---------------- parsing ---------------- */

    pub fn parse(html: &str) -> Document {
        let mut doc = Document {
            nodes: vec![Node {
                kind: NodeKind::Element { tag: s!(), attrs: Vec::new() },
                parent: None,
                children: Vec::new(),
            }],
        };
        let mut stack: Vec<NodeId> = vec![ROOT];
        let b = html.as_bytes();
        let n = b.len();
        let mut i = 0usize;

        while i < n {
            if b[i] == b'<' {
                let rest = &html[i..];
                if rest.starts_with("<!--") {
                    i += rest.find("-->").map(|p| p + 3).unwrap_or(rest.len());
                } else if rest.starts_with("</") {
                    let (name, adv) = read_tag_name(&rest[2..]);
                    i += 2 + adv;
                    i += html[i..].find('>').map(|p| p + 1).unwrap_or(html.len() - i);
                    close_tag(&mut stack, &doc, &name);
                } else if rest.starts_with("<!") || rest.starts_with("<?") {
                    i += rest.find('>').map(|p| p + 1).unwrap_or(rest.len());
                } else if rest.len() > 1 && rest.as_bytes()[1].is_ascii_alphabetic() {
                    let (name, attrs, self_closing, adv) = read_open_tag(&rest[1..]);
                    i += 1 + adv;
                    let parent = stack.last().copied().unwrap_or(ROOT);
                    let id = doc.push_element(parent, &name, attrs);
                    if name == "script" || name == "style" {
                        // raw text elements: skip straight to the close tag
                        let close = format!("</{}", name);
                        let lc = html[i..].to_ascii_lowercase();
                        match lc.find(&close) {
                            Some(p) => {
                                let after = i + p;
                                i = after
                                    + html[after..].find('>').map(|q| q + 1).unwrap_or(html.len() - after);
                            }
                            None => i = html.len(),
                        }
                    } else if !self_closing && !VOID_TAGS.contains(&name.as_str()) {
                        stack.push(id);
                    }
                } else {
                    // lone '<' in text
                    doc.push_text(stack.last().copied().unwrap_or(ROOT), "<");
                    i += 1;
                }
            } else {
                let end = html[i..].find('<').map(|p| i + p).unwrap_or(n);
                doc.push_text(stack.last().copied().unwrap_or(ROOT), &html[i..end]);
                i = end;
            }
        }
        doc
    }

    fn push_element(&mut self, parent: NodeId, tag: &str, attrs: Vec<(String, String)>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind: NodeKind::Element { tag: tag.to_string(), attrs },
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    fn push_text(&mut self, parent: NodeId, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind: NodeKind::Text(normalize_entities(raw)),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
    }

    /* ---------------- capability queries ---------------- */

    /// First node with the role, in document order.
    pub fn find(&self, role: Role) -> Option<NodeId> {
        self.find_in(ROOT, role)
    }

    /// All nodes with the role, in document order.
    pub fn find_all(&self, role: Role) -> Vec<NodeId> {
        self.find_all_in(ROOT, role)
    }

    /// First descendant of `scope` with the role (scope itself excluded).
    pub fn find_in(&self, scope: NodeId, role: Role) -> Option<NodeId> {
        self.descendants(scope).into_iter().find(|&id| self.matches(id, role))
    }

    /// All descendants of `scope` with the role, in document order.
    pub fn find_all_in(&self, scope: NodeId, role: Role) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| self.matches(id, role))
            .collect()
    }

    /// Raw next sibling, text nodes included. Positional heuristics rely
    /// on separator text nodes being present.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id].parent?;
        let siblings = &self.nodes[parent].children;
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// The skip-one heuristic: the node after the node after `id`.
    /// On wiki markup a change-header paragraph is separated from its
    /// bullet list by exactly one whitespace text node.
    pub fn next_next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.next_sibling(id).and_then(|s| self.next_sibling(s))
    }

    /// First *element* sibling after `id` matching the role; text nodes
    /// and non-matching elements are skipped.
    pub fn next_sibling_with_role(&self, id: NodeId, role: Role) -> Option<NodeId> {
        let mut cur = self.next_sibling(id);
        while let Some(c) = cur {
            if self.matches(c, role) {
                return Some(c);
            }
            cur = self.next_sibling(c);
        }
        None
    }

    /// Concatenated text of the node and its descendants, in order.
    /// Entities were decoded at parse time; whitespace is untouched.
    pub fn text(&self, id: NodeId) -> String {
        let mut out = s!();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].kind {
            NodeKind::Text(t) => out.push_str(t),
            NodeKind::Element { .. } => {
                for &c in &self.nodes[id].children {
                    self.collect_text(c, out);
                }
            }
        }
    }

    /// Attribute lookup, case-insensitive on the key.
    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id].kind, NodeKind::Element { .. })
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    /// Element children only, in order.
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id]
            .children
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .collect()
    }

    /* ---------------- role matching ---------------- */

    pub fn matches(&self, id: NodeId, role: Role) -> bool {
        let NodeKind::Element { tag, .. } = &self.nodes[id].kind else {
            return false;
        };
        match role {
            Role::PageTitle => tag == "h1",
            Role::AbilityBlock => self.has_class(id, "ability_details_main"),
            Role::AbilityHeader => self.has_class(id, "abilityHeader"),
            Role::AbilitySummary => self.has_class(id, "summaryInfoAndImage"),
            Role::Block => tag == "div",
            Role::StatPair => {
                if tag != "div" {
                    return false;
                }
                let kids = self.element_children(id);
                kids.len() == 2 && kids.iter().all(|&k| self.tag(k) == Some("div"))
            }
            Role::Tooltip => tag == "span",
            Role::ChangelogCurrent => {
                self.has_class(id, "wds-tab__content") && self.has_class(id, "wds-is-current")
            }
            Role::PatchMarker => self.attr(id, "id") == Some("patch"),
            Role::PatchDescription => self.attr(id, "id") == Some("description"),
            Role::Paragraph => tag == "p",
            Role::BulletList => tag == "ul",
            Role::BulletItem => tag == "li",
            Role::Link => tag == "a",
        }
    }

    fn has_class(&self, id: NodeId, token: &str) -> bool {
        self.attr(id, "class")
            .map(|c| c.split_whitespace().any(|t| t == token))
            .unwrap_or(false)
    }

    /// Descendants of `scope` in document order, excluding `scope`.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut pending: Vec<NodeId> = self.nodes[scope].children.iter().rev().copied().collect();
        while let Some(id) = pending.pop() {
            out.push(id);
            for &c in self.nodes[id].children.iter().rev() {
                pending.push(c);
            }
        }
        out
    }
}

/* ---------------- tag tokenizing ---------------- */

/// Tag name: ASCII letters/digits, lowercased. Returns (name, consumed).
fn read_tag_name(s: &str) -> (String, usize) {
    let mut name = s!();
    let mut adv = 0usize;
    for ch in s.chars() {
        if ch.is_ascii_alphanumeric() {
            name.push(ch.to_ascii_lowercase());
            adv += 1;
        } else {
            break;
        }
    }
    (name, adv)
}

/// Parse `name attr=val …>` after the '<'. Returns
/// (name, attrs, self_closing, consumed incl. '>').
fn read_open_tag(s: &str) -> (String, Vec<(String, String)>, bool, usize) {
    let (name, mut i) = read_tag_name(s);
    let b = s.as_bytes();
    let n = b.len();
    let mut attrs = Vec::new();
    let mut self_closing = false;

    while i < n {
        while i < n && b[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= n {
            break;
        }
        if b[i] == b'>' {
            i += 1;
            break;
        }
        if b[i] == b'/' {
            self_closing = true;
            i += 1;
            continue;
        }
        // attribute name
        let ks = i;
        while i < n && !b[i].is_ascii_whitespace() && b[i] != b'=' && b[i] != b'>' && b[i] != b'/' {
            i += 1;
        }
        let key = s[ks..i].to_ascii_lowercase();
        let mut val = s!();
        if i < n && b[i] == b'=' {
            i += 1;
            if i < n && (b[i] == b'"' || b[i] == b'\'') {
                let quote = b[i];
                i += 1;
                let vs = i;
                while i < n && b[i] != quote {
                    i += 1;
                }
                val = s[vs..i].to_string();
                if i < n {
                    i += 1; // closing quote
                }
            } else {
                let vs = i;
                while i < n && !b[i].is_ascii_whitespace() && b[i] != b'>' {
                    i += 1;
                }
                val = s[vs..i].to_string();
            }
        }
        if !key.is_empty() {
            attrs.push((key, normalize_entities(&val)));
        }
    }
    (name, attrs, self_closing, i)
}

/// Pop the open stack down to (and including) the nearest matching tag.
/// A close tag with no open partner is ignored.
fn close_tag(stack: &mut Vec<NodeId>, doc: &Document, name: &str) {
    let pos = stack
        .iter()
        .rposition(|&id| doc.tag(id) == Some(name));
    if let Some(p) = pos {
        if p > 0 {
            stack.truncate(p);
        }
    }
}
