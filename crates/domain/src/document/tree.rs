//! Arena-backed document tree

/// Stable identifier of a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(super) usize);

/// A single attribute, kept in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified attribute name as written (e.g. `xmlns:xsi`).
    pub name: String,
    /// Unescaped attribute value.
    pub value: String,
}

impl Attribute {
    /// Creates a new attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified element name as written.
    pub name: String,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    /// Written as `<name/>` rather than `<name></name>` when childless.
    pub self_closing: bool,
    pub(super) children: Vec<NodeId>,
}

impl Element {
    /// Returns the child node identifiers in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// The XML declaration of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declared XML version.
    pub version: String,
    /// Declared encoding, if any.
    pub encoding: Option<String>,
    /// Declared standalone flag, if any.
    pub standalone: Option<String>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: None,
        }
    }
}

/// Content of a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An element with attributes and children.
    Element(Element),
    /// Unescaped character data.
    Text(String),
    /// A CDATA section, kept verbatim.
    CData(String),
    /// A comment, kept verbatim.
    Comment(String),
    /// A processing instruction (target and content), kept verbatim.
    ProcessingInstruction(String),
    /// A document type declaration, kept verbatim.
    DocType(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
}

/// A parsed document: declaration, prolog, root element and epilog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
    declaration: Option<Declaration>,
    prolog: Vec<NodeId>,
    root: NodeId,
    epilog: Vec<NodeId>,
}

impl Document {
    /// Creates a document holding a single empty root element.
    #[must_use]
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = Node {
            kind: NodeKind::Element(Element {
                name: root_name.into(),
                attributes: Vec::new(),
                self_closing: false,
                children: Vec::new(),
            }),
            parent: None,
        };
        Self {
            nodes: vec![root],
            declaration: None,
            prolog: Vec::new(),
            root: NodeId(0),
            epilog: Vec::new(),
        }
    }

    pub(super) fn from_parts(
        nodes: Vec<(NodeKind, Option<NodeId>)>,
        declaration: Option<Declaration>,
        prolog: Vec<NodeId>,
        root: NodeId,
        epilog: Vec<NodeId>,
    ) -> Self {
        Self {
            nodes: nodes
                .into_iter()
                .map(|(kind, parent)| Node { kind, parent })
                .collect(),
            declaration,
            prolog,
            root,
            epilog,
        }
    }

    /// Returns the root element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the XML declaration, if the source had one.
    #[must_use]
    pub const fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }

    /// Returns the nodes preceding the root element.
    #[must_use]
    pub fn prolog(&self) -> &[NodeId] {
        &self.prolog
    }

    /// Returns the nodes following the root element.
    #[must_use]
    pub fn epilog(&self) -> &[NodeId] {
        &self.epilog
    }

    /// Returns the content of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Returns the element stored at `id`, if it is an element.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.kind(id) {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the element name at `id`, if it is an element.
    #[must_use]
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    /// Returns the parent of a node. Detached nodes and the root have none.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Returns the children of a node (empty for non-elements).
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.kind(id) {
            NodeKind::Element(element) => &element.children,
            _ => &[],
        }
    }

    /// Iterates over the element children of `id`.
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| self.element(*child).is_some())
    }

    /// Iterates over the element children of `id` with the given name.
    pub fn child_elements_named<'a>(
        &'a self,
        id: NodeId,
        name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.child_elements(id)
            .filter(move |child| self.name(*child) == Some(name))
    }

    /// Returns the first element child of `id` with the given name.
    #[must_use]
    pub fn first_child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.child_elements_named(id, name).next()
    }

    /// Returns every element below `id` with the given name, in document order.
    #[must_use]
    pub fn descendants_named(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();

        while let Some(current) = stack.pop() {
            if self.name(current) == Some(name) {
                found.push(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }

        found
    }

    /// Concatenates all text and CDATA below `id`.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        match self.kind(id) {
            NodeKind::Text(text) | NodeKind::CData(text) => text.clone(),
            NodeKind::Element(element) => element
                .children
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
            NodeKind::Comment(_) | NodeKind::ProcessingInstruction(_) | NodeKind::DocType(_) => {
                String::new()
            }
        }
    }

    /// Replaces all children of an element with a single text node.
    ///
    /// An empty `text` leaves the element without children.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        let old_children = match &mut self.nodes[id.0].kind {
            NodeKind::Element(element) => std::mem::take(&mut element.children),
            _ => return,
        };
        for child in old_children {
            self.nodes[child.0].parent = None;
        }
        if !text.is_empty() {
            let text_node = self.push(NodeKind::Text(text.to_string()), Some(id));
            self.attach(id, text_node);
        }
    }

    /// Detaches `child` from `parent`. Returns false if it was not a child.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let NodeKind::Element(element) = &mut self.nodes[parent.0].kind else {
            return false;
        };
        let Some(position) = element.children.iter().position(|c| *c == child) else {
            return false;
        };
        element.children.remove(position);
        self.nodes[child.0].parent = None;
        true
    }

    /// Detaches every element child of `parent` with the given name.
    /// Returns how many were removed.
    pub fn remove_children_named(&mut self, parent: NodeId, name: &str) -> usize {
        let doomed: Vec<NodeId> = self.child_elements_named(parent, name).collect();
        doomed
            .into_iter()
            .filter(|child| self.remove_child(parent, *child))
            .count()
    }

    /// Appends a new element with text content as the last child of `parent`.
    pub fn append_element(&mut self, parent: NodeId, name: &str, text: &str) -> NodeId {
        let element = self.push(
            NodeKind::Element(Element {
                name: name.to_string(),
                attributes: Vec::new(),
                self_closing: true,
                children: Vec::new(),
            }),
            Some(parent),
        );
        self.attach(parent, element);
        self.set_text_content(element, text);
        element
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        self.nodes.push(Node { kind, parent });
        NodeId(self.nodes.len() - 1)
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let NodeKind::Element(element) = &mut self.nodes[parent.0].kind {
            element.children.push(child);
        }
    }
}
