//! Arena-allocated DOM that html5ever parses into.
//!
//! Nodes live in one contiguous vector and link to each other by index, so
//! the parser can walk children in order without reference counting.

use html5ever::{LocalName, QualName};

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomNodeId(pub u32);

impl DomNodeId {
    /// Sentinel value for no node.
    pub const NONE: DomNodeId = DomNodeId(u32::MAX);

    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Payload of a DOM node.
#[derive(Debug, Clone)]
pub enum DomData {
    /// Document root.
    Document,
    /// Element with name and attributes.
    Element { name: QualName, attrs: Vec<Attribute> },
    /// Text content (adjacent runs are merged).
    Text(String),
    /// Comment; kept so the tree sink can hand out handles, ignored by the parser.
    Comment(String),
    /// Document type declaration.
    Doctype(String),
}

/// HTML attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node in the arena DOM.
#[derive(Debug)]
pub struct DomNode {
    pub data: DomData,
    pub parent: DomNodeId,
    pub first_child: DomNodeId,
    pub last_child: DomNodeId,
    pub prev_sibling: DomNodeId,
    pub next_sibling: DomNodeId,
}

impl DomNode {
    fn new(data: DomData) -> Self {
        Self {
            data,
            parent: DomNodeId::NONE,
            first_child: DomNodeId::NONE,
            last_child: DomNodeId::NONE,
            prev_sibling: DomNodeId::NONE,
            next_sibling: DomNodeId::NONE,
        }
    }
}

/// Arena-based DOM tree.
pub struct HtmlDom {
    nodes: Vec<DomNode>,
    document: DomNodeId,
}

impl HtmlDom {
    /// Create an empty DOM holding only the document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: DomNodeId::NONE,
        };
        dom.document = dom.alloc(DomNode::new(DomData::Document));
        dom
    }

    fn alloc(&mut self, node: DomNode) -> DomNodeId {
        let id = DomNodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn document(&self) -> DomNodeId {
        self.document
    }

    pub fn get(&self, id: DomNodeId) -> Option<&DomNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: DomNodeId) -> Option<&mut DomNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> DomNodeId {
        self.alloc(DomNode::new(DomData::Element { name, attrs }))
    }

    pub fn create_text(&mut self, text: String) -> DomNodeId {
        self.alloc(DomNode::new(DomData::Text(text)))
    }

    pub fn create_comment(&mut self, text: String) -> DomNodeId {
        self.alloc(DomNode::new(DomData::Comment(text)))
    }

    pub fn create_doctype(&mut self, name: String) -> DomNodeId {
        self.alloc(DomNode::new(DomData::Doctype(name)))
    }

    /// Append `child` as the last child of `parent`.
    pub fn append(&mut self, parent: DomNodeId, child: DomNodeId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(DomNodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
            child_node.next_sibling = DomNodeId::NONE;
        }

        if let Some(last_node) = self.get_mut(last_child) {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert `new_node` right before `sibling`.
    pub fn insert_before(&mut self, sibling: DomNodeId, new_node: DomNodeId) {
        let (parent, prev) = match self.get(sibling) {
            Some(n) => (n.parent, n.prev_sibling),
            None => return,
        };

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Append text to `parent`, merging into a trailing text node.
    pub fn append_text(&mut self, parent: DomNodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(DomNodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let DomData::Text(existing) = &mut last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Unlink a node from its parent and siblings.
    pub fn detach(&mut self, id: DomNodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = DomNodeId::NONE;
            node.prev_sibling = DomNodeId::NONE;
            node.next_sibling = DomNodeId::NONE;
        }
    }

    /// Number of nodes, including the document root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the DOM holds only the document root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over the children of a node in order.
    pub fn children(&self, parent: DomNodeId) -> Children<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(DomNodeId::NONE);
        Children {
            dom: self,
            current: first,
        }
    }

    /// Find the first element with the given tag name, depth-first.
    pub fn find_by_tag(&self, tag: &str) -> Option<DomNodeId> {
        let mut stack = vec![self.document];
        while let Some(id) = stack.pop() {
            if self.element_name(id).is_some_and(|name| name.as_ref() == tag) {
                return Some(id);
            }
            let mut children: Vec<_> = self.children(id).collect();
            children.reverse();
            stack.extend(children);
        }
        None
    }

    /// Element's local (tag) name.
    pub fn element_name(&self, id: DomNodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            DomData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    /// Attribute value of an element.
    pub fn attr(&self, id: DomNodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            DomData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    /// Content of a text node.
    pub fn text(&self, id: DomNodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            DomData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

impl Default for HtmlDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node.
pub struct Children<'a> {
    dom: &'a HtmlDom,
    current: DomNodeId,
}

impl Iterator for Children<'_> {
    type Item = DomNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(DomNodeId::NONE);
        Some(id)
    }
}
