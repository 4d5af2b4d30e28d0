//! XML codec for `.substvar` profiles.
//!
//! Parsing streams `quick-xml` events into a [`DocumentBuilder`]. Writing walks
//! the tree back out with 2-space indentation:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <repository>
//!   <globalVariables>
//!     <globalVariable>
//!       <name>dbHost</name>
//!       <value>localhost</value>
//!     </globalVariable>
//!   </globalVariables>
//! </repository>
//! ```
//!
//! Whitespace-only text between elements is treated as formatting. An element
//! holding any other text or CDATA is written on one line with its content
//! verbatim, so mixed content keeps its exact value. Childless elements keep
//! the form they were parsed with (`<a/>` or `<a></a>`).

use quick_xml::Reader;
use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesDecl, BytesStart, Event};
use substvar_domain::document::{Attribute, Declaration, Document, DocumentBuilder, Element, NodeId, NodeKind};
use substvar_domain::{DomainError, DomainResult};

/// Parses profile bytes into a document tree.
///
/// # Errors
///
/// Returns a parse error for invalid UTF-8, malformed markup, or a missing
/// root element.
pub fn parse_document(bytes: &[u8]) -> DomainResult<Document> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| DomainError::parse(format!("invalid UTF-8: {e}")))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = Reader::from_str(text);
    let mut builder = DocumentBuilder::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            DomainError::parse(format!("at byte {}: {e}", reader.error_position()))
        })?;

        match event {
            Event::Decl(decl) => builder.declaration(declaration(&decl)?)?,
            Event::DocType(doctype) => builder.doctype(utf8(&doctype)?.trim())?,
            Event::Start(start) => {
                let (name, attributes) = element_parts(&start)?;
                builder.start_element(name, attributes)?;
            }
            Event::Empty(start) => {
                let (name, attributes) = element_parts(&start)?;
                builder.empty_element(name, attributes)?;
            }
            Event::End(end) => builder.end_element(&utf8(end.name().as_ref())?)?,
            Event::Text(text) => builder.text(&text.unescape().map_err(DomainError::parse)?)?,
            Event::CData(data) => builder.cdata(utf8(&data)?)?,
            Event::Comment(comment) => builder.comment(utf8(&comment)?),
            Event::PI(pi) => builder.processing_instruction(utf8(&pi)?),
            Event::Eof => break,
        }
    }

    builder.finish()
}

fn utf8(bytes: &[u8]) -> DomainResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| DomainError::parse(format!("invalid UTF-8: {e}")))
}

fn declaration(decl: &BytesDecl<'_>) -> DomainResult<Declaration> {
    let version = utf8(&decl.version().map_err(DomainError::parse)?)?;
    let encoding = decl
        .encoding()
        .transpose()
        .map_err(DomainError::parse)?
        .map(|value| utf8(&value))
        .transpose()?;
    let standalone = decl
        .standalone()
        .transpose()
        .map_err(DomainError::parse)?
        .map(|value| utf8(&value))
        .transpose()?;

    Ok(Declaration {
        version,
        encoding,
        standalone,
    })
}

fn element_parts(start: &BytesStart<'_>) -> DomainResult<(String, Vec<Attribute>)> {
    let name = utf8(start.name().as_ref())?;
    let attributes = start
        .attributes()
        .map(|attribute| {
            let attribute = attribute.map_err(DomainError::parse)?;
            let value = attribute.unescape_value().map_err(DomainError::parse)?;
            Ok(Attribute::new(utf8(attribute.key.as_ref())?, value))
        })
        .collect::<DomainResult<Vec<_>>>()?;
    Ok((name, attributes))
}

/// Serializes a document tree with 2-space indentation and a trailing newline.
///
/// A default declaration is written when the document has none.
#[must_use]
pub fn write_document(document: &Document) -> String {
    let mut writer = XmlWriter::new(document);

    let default_declaration = Declaration::default();
    writer.write_declaration(document.declaration().unwrap_or(&default_declaration));
    for &id in document.prolog() {
        writer.write_node(id);
    }
    writer.write_node(document.root());
    for &id in document.epilog() {
        writer.write_node(id);
    }

    writer.output
}

struct XmlWriter<'a> {
    document: &'a Document,
    output: String,
    indent_level: usize,
}

impl<'a> XmlWriter<'a> {
    const fn new(document: &'a Document) -> Self {
        Self {
            document,
            output: String::new(),
            indent_level: 0,
        }
    }

    fn push_line(&mut self, line: &str) {
        for _ in 0..self.indent_level {
            self.output.push_str("  ");
        }
        self.output.push_str(line);
        self.output.push('\n');
    }

    fn write_declaration(&mut self, declaration: &Declaration) {
        let mut line = format!("<?xml version=\"{}\"", declaration.version);
        if let Some(encoding) = &declaration.encoding {
            line.push_str(&format!(" encoding=\"{encoding}\""));
        }
        if let Some(standalone) = &declaration.standalone {
            line.push_str(&format!(" standalone=\"{standalone}\""));
        }
        line.push_str("?>");
        self.push_line(&line);
    }

    fn write_node(&mut self, id: NodeId) {
        let document = self.document;
        match document.kind(id) {
            NodeKind::Element(element) => self.write_element(element),
            // Whitespace between elements is regenerated as indentation.
            NodeKind::Text(_) => {}
            NodeKind::CData(data) => self.push_line(&format!("<![CDATA[{data}]]>")),
            NodeKind::Comment(comment) => self.push_line(&format!("<!--{comment}-->")),
            NodeKind::ProcessingInstruction(raw) => self.push_line(&format!("<?{raw}?>")),
            NodeKind::DocType(raw) => self.push_line(&format!("<!DOCTYPE {raw}>")),
        }
    }

    fn write_element(&mut self, element: &Element) {
        let document = self.document;
        let has_content = element.children().iter().any(|&child| match document.kind(child) {
            NodeKind::Text(text) => !text.trim().is_empty(),
            NodeKind::CData(_) => true,
            _ => false,
        });
        let text_only = element
            .children()
            .iter()
            .all(|&child| matches!(document.kind(child), NodeKind::Text(_) | NodeKind::CData(_)));

        if has_content || text_only {
            let mut line = String::new();
            inline_element(document, element, &mut line);
            self.push_line(&line);
            return;
        }

        self.push_line(&format!("<{}>", open_tag(element)));
        self.indent_level += 1;
        for &child in element.children() {
            self.write_node(child);
        }
        self.indent_level -= 1;
        self.push_line(&format!("</{}>", element.name));
    }
}

/// Writes an element and everything below it on one line, text verbatim.
fn inline_element(document: &Document, element: &Element, out: &mut String) {
    let open = open_tag(element);
    if element.children().is_empty() {
        if element.self_closing {
            out.push_str(&format!("<{open}/>"));
        } else {
            out.push_str(&format!("<{open}></{}>", element.name));
        }
        return;
    }

    out.push_str(&format!("<{open}>"));
    for &child in element.children() {
        match document.kind(child) {
            NodeKind::Element(child) => inline_element(document, child, out),
            NodeKind::Text(text) => out.push_str(&partial_escape(text.as_str())),
            NodeKind::CData(data) => out.push_str(&format!("<![CDATA[{data}]]>")),
            NodeKind::Comment(comment) => out.push_str(&format!("<!--{comment}-->")),
            NodeKind::ProcessingInstruction(raw) => out.push_str(&format!("<?{raw}?>")),
            NodeKind::DocType(raw) => out.push_str(&format!("<!DOCTYPE {raw}>")),
        }
    }
    out.push_str(&format!("</{}>", element.name));
}

fn open_tag(element: &Element) -> String {
    let mut tag = element.name.clone();
    for attribute in &element.attributes {
        tag.push_str(&format!(" {}=\"{}\"", attribute.name, escape(attribute.value.as_str())));
    }
    tag
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use substvar_domain::variable::parse_variables;

    const PROFILE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!-- generated -->
<repository xmlns="http://www.tibco.com/xmlns/repo/types/2002" version="1">
    <globalVariables>
        <globalVariable>
            <name>dbHost</name>
            <value>a &amp; b</value>
            <deploymentSettable>true</deploymentSettable>
            <type>String</type>
            <isOverride>false</isOverride>
        </globalVariable>
        <globalVariable>
            <name>emptyVar</name>
            <value></value>
            <type>String</type>
        </globalVariable>
        <globalVariable>
            <name>script</name>
            <value><![CDATA[if a < b]]></value>
            <type>String</type>
        </globalVariable>
    </globalVariables>
</repository>
"#;

    const EXPECTED: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!-- generated -->
<repository xmlns="http://www.tibco.com/xmlns/repo/types/2002" version="1">
  <globalVariables>
    <globalVariable>
      <name>dbHost</name>
      <value>a &amp; b</value>
      <deploymentSettable>true</deploymentSettable>
      <type>String</type>
      <isOverride>false</isOverride>
    </globalVariable>
    <globalVariable>
      <name>emptyVar</name>
      <value></value>
      <type>String</type>
    </globalVariable>
    <globalVariable>
      <name>script</name>
      <value><![CDATA[if a < b]]></value>
      <type>String</type>
    </globalVariable>
  </globalVariables>
</repository>
"#;

    #[test]
    fn test_parse_variables_from_profile() {
        let document = parse_document(PROFILE.as_bytes()).unwrap();
        let variables = parse_variables(&document).unwrap();

        assert_eq!(variables.len(), 3);
        assert_eq!(variables[0].name, "dbHost");
        assert_eq!(variables[0].value.as_deref(), Some("a & b"));
        assert!(!variables[0].is_override);
        assert_eq!(variables[1].value.as_deref(), Some(""));
        assert_eq!(variables[2].value.as_deref(), Some("if a < b"));
    }

    #[test]
    fn test_write_reindents_with_two_spaces() {
        let document = parse_document(PROFILE.as_bytes()).unwrap();
        assert_eq!(write_document(&document), EXPECTED);
    }

    #[test]
    fn test_write_is_stable() {
        let once = write_document(&parse_document(PROFILE.as_bytes()).unwrap());
        let twice = write_document(&parse_document(once.as_bytes()).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_default_declaration_added() {
        let document = parse_document(b"<repository><a>1</a></repository>").unwrap();
        assert_eq!(
            write_document(&document),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<repository>\n  <a>1</a>\n</repository>\n"
        );
    }

    #[test]
    fn test_empty_elements_keep_their_form() {
        let document = parse_document(b"<repository><a></a><b/></repository>").unwrap();
        assert_eq!(
            write_document(&document),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<repository>\n  <a></a>\n  <b/>\n</repository>\n"
        );
    }

    #[test]
    fn test_text_next_to_comment_is_kept_verbatim() {
        let source = "<repository>\n  <globalVariable>\n    <name>dbHost</name>\n    \
                      <value> abc <!-- c --> def</value>\n    <type>String</type>\n  \
                      </globalVariable>\n</repository>";
        let before = parse_variables(&parse_document(source.as_bytes()).unwrap()).unwrap();

        let written = write_document(&parse_document(source.as_bytes()).unwrap());
        let after = parse_variables(&parse_document(written.as_bytes()).unwrap()).unwrap();

        assert_eq!(before[0].value.as_deref(), Some(" abc  def"));
        assert_eq!(after[0].value, before[0].value);
        assert!(written.contains("    <value> abc <!-- c --> def</value>\n"));
    }

    #[test]
    fn test_mixed_content_with_child_elements_is_kept_inline() {
        let document = parse_document(b"<repository><p>a <b>bold</b> c</p></repository>").unwrap();
        assert!(write_document(&document).contains("\n  <p>a <b>bold</b> c</p>\n"));
    }

    #[test]
    fn test_attribute_values_escaped() {
        let document = parse_document(br#"<r note="a &quot;b&quot; &lt;c&gt;"/>"#).unwrap();
        let root = document.element(document.root()).unwrap();
        assert_eq!(root.attributes[0].value, "a \"b\" <c>");
        assert!(write_document(&document).contains(r#"<r note="a &quot;b&quot; &lt;c&gt;"/>"#));
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let document = parse_document("\u{feff}<repository/>".as_bytes()).unwrap();
        assert_eq!(document.name(document.root()), Some("repository"));
    }

    #[test]
    fn test_mismatched_tags_fail() {
        let err = parse_document(b"<repository><a></b></repository>").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_unclosed_root_fails() {
        let err = parse_document(b"<repository><a>1</a>").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_missing_root_fails() {
        let err = parse_document(b"<?xml version=\"1.0\"?>\n<!-- nothing -->\n").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let err = parse_document(&[b'<', b'r', b'>', 0xff, b'<', b'/', b'r', b'>']).unwrap_err();
        assert!(err.to_string().contains("invalid UTF-8"));
    }

    #[test]
    fn test_text_outside_root_fails() {
        let err = parse_document(b"<repository/>trailing").unwrap_err();
        assert!(err.is_parse());
    }
}
