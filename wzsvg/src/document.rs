use crate::element::{Descendants, Element};
use crate::entity::Entities;
use crate::error::SvgError;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Character data, stored unescaped.
    Text(String),
    CData(String),
    Comment(String),
    /// The `<?xml ...?>` prolog.
    Declaration(Declaration),
    ProcessingInstruction(String),
    DocType(String),
}

/// Contents of an XML declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Declaration {
    fn from_event(decl: &BytesDecl) -> Result<Self, SvgError> {
        let version = lossy(&decl.version()?);
        let encoding = match decl.encoding() {
            Some(value) => Some(lossy(&value?)),
            None => None,
        };
        let standalone = match decl.standalone() {
            Some(value) => Some(lossy(&value?)),
            None => None,
        };
        Ok(Self {
            version,
            encoding,
            standalone,
        })
    }
}

/// A fully owned SVG/XML document.
///
/// Everything around the root element (declaration, comments, whitespace)
/// is kept so that a parse/serialize cycle leaves untouched parts of the
/// file recognisable.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    prolog: Vec<Node>,
    root: Element,
    epilog: Vec<Node>,
}

impl Document {
    /// Parses a complete document from a string.
    ///
    /// Entity references resolve against the XML built-ins and any entities
    /// declared in the DOCTYPE's internal subset.
    pub fn parse(content: &str) -> Result<Self, SvgError> {
        let mut reader = Reader::from_str(content);
        let mut nodes = Vec::new();
        let mut open: Vec<Element> = Vec::new();
        let mut entities = Entities::default();

        loop {
            let node = match reader.read_event()? {
                Event::Start(e) => {
                    open.push(Element::from_start(&e, &entities)?);
                    continue;
                }
                Event::End(e) => match open.pop() {
                    Some(element) => Node::Element(element),
                    None => {
                        return Err(SvgError::UnexpectedClose {
                            found: lossy(e.name().as_ref()),
                        });
                    }
                },
                Event::Empty(e) => Node::Element(Element::from_start(&e, &entities)?),
                Event::Text(e) => {
                    Node::Text(e.unescape_with(|name| entities.resolve(name))?.into_owned())
                }
                Event::CData(e) => Node::CData(lossy(&e)),
                Event::Comment(e) => Node::Comment(lossy(&e)),
                Event::Decl(e) => Node::Declaration(Declaration::from_event(&e)?),
                Event::PI(e) => Node::ProcessingInstruction(lossy(&e)),
                Event::DocType(e) => {
                    let body = lossy(&e);
                    entities = Entities::from_doctype(&body);
                    Node::DocType(body)
                }
                Event::Eof => break,
            };
            match open.last_mut() {
                Some(parent) => parent.children.push(node),
                None => nodes.push(node),
            }
        }

        if let Some(element) = open.pop() {
            return Err(SvgError::Unclosed { name: element.name });
        }

        let split = nodes
            .iter()
            .position(|node| matches!(node, Node::Element(_)))
            .ok_or(SvgError::MissingRoot)?;
        let epilog = nodes.split_off(split + 1);
        let root = match nodes.pop() {
            Some(Node::Element(root)) => root,
            _ => return Err(SvgError::MissingRoot),
        };

        log::debug!(
            "Parsed <{}> document with {} elements",
            root.name,
            root.descendants().count() + 1
        );
        Ok(Self {
            prolog: nodes,
            root,
            epilog,
        })
    }

    /// Reads and parses the file at `path`.
    pub fn open(path: &Path) -> Result<Self, SvgError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Builds a document around an existing root element.
    pub fn from_root(root: Element) -> Self {
        Self {
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }

    /// The document element (normally `<svg>`).
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Every element in document order, the root included.
    pub fn elements(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![&self.root],
        }
    }

    /// Elements whose `id` attribute contains `marker` as a substring.
    pub fn elements_with_id_containing<'a>(
        &'a self,
        marker: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements()
            .filter(move |element| element.id().contains(marker))
    }

    /// Elements with the given tag name, e.g. every `g` group.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |element| element.name == name)
    }

    /// Visits every element in document order with mutable access.
    pub fn for_each_element_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Element),
    {
        self.root.for_each_mut(&mut visit);
    }

    /// Removes every element below the root that matches `remove`.
    pub fn remove_elements<F>(&mut self, remove: F) -> usize
    where
        F: Fn(&Element) -> bool,
    {
        self.root.remove_descendants(&remove)
    }

    /// Serializes the document back to XML text.
    pub fn to_xml(&self) -> Result<String, SvgError> {
        let mut writer = Writer::new(Vec::new());
        for node in &self.prolog {
            write_node(&mut writer, node)?;
        }
        write_element(&mut writer, &self.root)?;
        for node in &self.epilog {
            write_node(&mut writer, node)?;
        }
        Ok(String::from_utf8(writer.into_inner())?)
    }

    /// Serializes the document and writes it to `path`.
    ///
    /// Returns the number of bytes written.
    pub fn save(&self, path: &Path) -> Result<usize, SvgError> {
        let xml = self.to_xml()?;
        fs::write(path, &xml)?;
        Ok(xml.len())
    }
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<(), SvgError> {
    match node {
        Node::Element(element) => write_element(writer, element)?,
        Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        Node::CData(text) => writer.write_event(Event::CData(BytesCData::new(text.as_str())))?,
        Node::Comment(text) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?
        }
        Node::Declaration(decl) => writer.write_event(Event::Decl(BytesDecl::new(
            &decl.version,
            decl.encoding.as_deref(),
            decl.standalone.as_deref(),
        )))?,
        Node::ProcessingInstruction(text) => {
            writer.write_event(Event::PI(BytesPI::new(text.as_str())))?
        }
        Node::DocType(text) => {
            writer.write_event(Event::DocType(BytesText::from_escaped(text.as_str())))?
        }
    }
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), SvgError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        let escaped = escape_attr_value(value);
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Borrowed(escaped.as_bytes()),
        });
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

/// Markup escaping plus character references for tab, CR and LF, which a
/// reader would otherwise normalize to spaces.
fn escape_attr_value(value: &str) -> String {
    let escaped = escape(value);
    let mut out = String::with_capacity(escaped.len());
    for c in escaped.chars() {
        match c {
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
    out
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape" width="10">
  <!-- a comment -->
  <g id="layer1" inkscape:label="Bonuses">
    <path id="Territory_1" d="M 0 0 L 1 1" style="fill:#ff0000"><title>Alpha &amp; Omega</title></path>
  </g>
</svg>
"##;

    #[test]
    fn test_parse_builds_tree() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.root().name, "svg");
        assert_eq!(doc.root().attr("width"), Some("10"));

        let group = doc.elements_named("g").next().unwrap();
        assert_eq!(group.label(), "Bonuses");

        let path = doc.elements_with_id_containing("Territory_").next().unwrap();
        let title = path.find_descendant("title").unwrap();
        assert_eq!(title.text(), "Alpha & Omega");
    }

    #[test]
    fn test_elements_include_root_in_document_order() {
        let doc = Document::parse(SAMPLE).unwrap();
        let names: Vec<_> = doc.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["svg", "g", "path", "title"]);
    }

    #[test]
    fn test_serialize_then_parse_preserves_tree() {
        let doc = Document::parse(SAMPLE).unwrap();
        let xml = doc.to_xml().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<!-- a comment -->"));
        assert!(xml.contains("Alpha &amp; Omega"));
        assert_eq!(Document::parse(&xml).unwrap(), doc);
    }

    #[test]
    fn test_doctype_entities_resolve() {
        let doc = Document::parse(
            r#"<?xml version="1.0"?><!DOCTYPE svg [<!ENTITY ns_svg "http://www.w3.org/2000/svg"><!ENTITY place "Cape &amp; Coast">]><svg xmlns="&ns_svg;"><path id="Territory_1" inkscape:label="A"><title>&place;</title></path></svg>"#,
        )
        .unwrap();
        assert_eq!(doc.root().attr("xmlns"), Some("http://www.w3.org/2000/svg"));
        let title = doc.root().find_descendant("title").unwrap();
        assert_eq!(title.text(), "Cape & Coast");

        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("<!DOCTYPE svg [<!ENTITY ns_svg"));
        assert_eq!(Document::parse(&xml).unwrap(), doc);
    }

    #[test]
    fn test_undeclared_entity_is_an_error() {
        let err = Document::parse(r#"<svg xmlns="&ns_svg;"/>"#).unwrap_err();
        assert!(matches!(err, SvgError::Xml(_)));
    }

    #[test]
    fn test_attribute_whitespace_references_round_trip() {
        let doc = Document::parse("<svg><text id=\"t\" data-lines=\"a&#10;b&#9;c&#13;\"/></svg>").unwrap();
        let text = doc.root().find_descendant("text").unwrap();
        assert_eq!(text.attr("data-lines"), Some("a\nb\tc\r"));

        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("data-lines=\"a&#10;b&#9;c&#13;\""), "{}", xml);
        assert_eq!(Document::parse(&xml).unwrap(), doc);
    }

    #[test]
    fn test_childless_elements_are_written_empty() {
        let doc = Document::parse(r#"<svg><path id="a"></path></svg>"#).unwrap();
        assert_eq!(doc.to_xml().unwrap(), r#"<svg><path id="a"/></svg>"#);
    }

    #[test]
    fn test_unclosed_element_is_an_error() {
        let err = Document::parse("<svg><g>").unwrap_err();
        assert!(matches!(err, SvgError::Unclosed { .. } | SvgError::Xml(_)));
    }

    #[test]
    fn test_text_only_input_has_no_root() {
        let err = Document::parse("just text").unwrap_err();
        assert!(matches!(err, SvgError::MissingRoot));
    }

    #[test]
    fn test_remove_elements_anywhere() {
        let mut doc = Document::parse(
            r#"<svg><defs id="d1"/><g><defs id="d2"><x/></defs><path/></g></svg>"#,
        )
        .unwrap();
        let removed = doc.remove_elements(|e| e.name == "defs");
        assert_eq!(removed, 2);
        assert_eq!(doc.to_xml().unwrap(), "<svg><g><path/></g></svg>");
    }
}
