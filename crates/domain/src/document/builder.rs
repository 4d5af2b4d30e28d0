//! Incremental document construction for parsers.

use super::tree::{Attribute, Declaration, Document, Element, NodeId, NodeKind};
use crate::error::{DomainError, DomainResult};

/// Builds a [`Document`] from a stream of parse events and enforces
/// well-formedness: a single root, matching end tags, no stray text.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    nodes: Vec<(NodeKind, Option<NodeId>)>,
    declaration: Option<Declaration>,
    prolog: Vec<NodeId>,
    root: Option<NodeId>,
    epilog: Vec<NodeId>,
    open: Vec<NodeId>,
}

impl DocumentBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the XML declaration. It must precede every other node.
    ///
    /// # Errors
    ///
    /// Returns a parse error if nodes were already added.
    pub fn declaration(&mut self, declaration: Declaration) -> DomainResult<()> {
        if self.declaration.is_some() || !self.nodes.is_empty() {
            return Err(DomainError::parse(
                "XML declaration is only allowed at the start of the document",
            ));
        }
        self.declaration = Some(declaration);
        Ok(())
    }

    /// Records a document type declaration.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the root element was already opened.
    pub fn doctype(&mut self, raw: impl Into<String>) -> DomainResult<()> {
        if self.root.is_some() {
            return Err(DomainError::parse(
                "DOCTYPE must appear before the root element",
            ));
        }
        self.add_misc(NodeKind::DocType(raw.into()));
        Ok(())
    }

    /// Opens an element.
    ///
    /// # Errors
    ///
    /// Returns a parse error when a second root element is opened.
    pub fn start_element(
        &mut self,
        name: impl Into<String>,
        attributes: Vec<Attribute>,
    ) -> DomainResult<()> {
        let name = name.into();
        let parent = self.open.last().copied();
        if parent.is_none() && self.root.is_some() {
            return Err(DomainError::parse(format!(
                "unexpected second root element <{name}>"
            )));
        }

        let id = self.push(
            NodeKind::Element(Element {
                name,
                attributes,
                self_closing: false,
                children: Vec::new(),
            }),
            parent,
        );
        match parent {
            Some(parent) => self.attach(parent, id),
            None => self.root = Some(id),
        }
        self.open.push(id);
        Ok(())
    }

    /// Closes the innermost open element.
    ///
    /// # Errors
    ///
    /// Returns a parse error if nothing is open or the name does not match.
    pub fn end_element(&mut self, name: &str) -> DomainResult<()> {
        let Some(id) = self.open.pop() else {
            return Err(DomainError::parse(format!(
                "unexpected closing tag </{name}>"
            )));
        };
        match &self.nodes[id.0].0 {
            NodeKind::Element(element) if element.name == name => Ok(()),
            NodeKind::Element(element) => Err(DomainError::parse(format!(
                "expected </{}>, found </{name}>",
                element.name
            ))),
            _ => Err(DomainError::parse(format!(
                "unexpected closing tag </{name}>"
            ))),
        }
    }

    /// Adds a self-closing element.
    ///
    /// # Errors
    ///
    /// Same as [`Self::start_element`].
    pub fn empty_element(
        &mut self,
        name: impl Into<String>,
        attributes: Vec<Attribute>,
    ) -> DomainResult<()> {
        let name = name.into();
        self.start_element(name.clone(), attributes)?;
        if let Some(&id) = self.open.last()
            && let NodeKind::Element(element) = &mut self.nodes[id.0].0
        {
            element.self_closing = true;
        }
        self.end_element(&name)
    }

    /// Adds character data. Adjacent text is merged into one node.
    ///
    /// # Errors
    ///
    /// Returns a parse error for non-whitespace text outside the root element.
    pub fn text(&mut self, text: &str) -> DomainResult<()> {
        let Some(parent) = self.open.last().copied() else {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(DomainError::parse(
                "text content is not allowed outside the root element",
            ));
        };

        let last_child = match &self.nodes[parent.0].0 {
            NodeKind::Element(element) => element.children.last().copied(),
            _ => None,
        };
        if let Some(last) = last_child
            && let NodeKind::Text(existing) = &mut self.nodes[last.0].0
        {
            existing.push_str(text);
            return Ok(());
        }

        let id = self.push(NodeKind::Text(text.to_string()), Some(parent));
        self.attach(parent, id);
        Ok(())
    }

    /// Adds a CDATA section.
    ///
    /// # Errors
    ///
    /// Returns a parse error outside the root element.
    pub fn cdata(&mut self, text: impl Into<String>) -> DomainResult<()> {
        let Some(parent) = self.open.last().copied() else {
            return Err(DomainError::parse(
                "CDATA is not allowed outside the root element",
            ));
        };
        let id = self.push(NodeKind::CData(text.into()), Some(parent));
        self.attach(parent, id);
        Ok(())
    }

    /// Adds a comment.
    pub fn comment(&mut self, text: impl Into<String>) {
        self.add_misc(NodeKind::Comment(text.into()));
    }

    /// Adds a processing instruction.
    pub fn processing_instruction(&mut self, raw: impl Into<String>) {
        self.add_misc(NodeKind::ProcessingInstruction(raw.into()));
    }

    /// Finishes the document.
    ///
    /// Whitespace-only text next to child elements is formatting and is
    /// dropped; writers regenerate indentation.
    ///
    /// # Errors
    ///
    /// Returns a parse error if an element is still open or there is no root.
    pub fn finish(mut self) -> DomainResult<Document> {
        if let Some(open) = self.open.last() {
            let name = match &self.nodes[open.0].0 {
                NodeKind::Element(element) => element.name.clone(),
                _ => String::new(),
            };
            return Err(DomainError::parse(format!("unclosed element <{name}>")));
        }
        let root = self
            .root
            .ok_or_else(|| DomainError::parse("root element not found"))?;

        self.strip_formatting_whitespace();

        Ok(Document::from_parts(
            self.nodes,
            self.declaration,
            self.prolog,
            root,
            self.epilog,
        ))
    }

    fn strip_formatting_whitespace(&mut self) {
        for index in 0..self.nodes.len() {
            let NodeKind::Element(element) = &self.nodes[index].0 else {
                continue;
            };
            let structured = element.children.iter().any(|child| {
                !matches!(self.nodes[child.0].0, NodeKind::Text(_) | NodeKind::CData(_))
            });
            if !structured {
                continue;
            }

            let (keep, dropped): (Vec<NodeId>, Vec<NodeId>) =
                element.children.iter().copied().partition(|child| {
                    !matches!(&self.nodes[child.0].0, NodeKind::Text(text) if text.trim().is_empty())
                });
            for child in dropped {
                self.nodes[child.0].1 = None;
            }
            if let NodeKind::Element(element) = &mut self.nodes[index].0 {
                element.children = keep;
            }
        }
    }

    fn add_misc(&mut self, kind: NodeKind) {
        let parent = self.open.last().copied();
        let id = self.push(kind, parent);
        match parent {
            Some(parent) => self.attach(parent, id),
            None if self.root.is_none() => self.prolog.push(id),
            None => self.epilog.push(id),
        }
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        self.nodes.push((kind, parent));
        NodeId(self.nodes.len() - 1)
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let NodeKind::Element(element) = &mut self.nodes[parent.0].0 {
            element.children.push(child);
        }
    }
}
