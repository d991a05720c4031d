use crate::entity::Entities;
use crate::error::SvgError;
use crate::Node;
use quick_xml::events::BytesStart;

/// Attribute carrying Inkscape's human-readable layer/object name.
pub const LABEL_ATTR: &str = "inkscape:label";

/// An element node with its attributes in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Qualified tag name as written in the source (e.g. `g`, `sodipodi:namedview`).
    pub name: String,
    /// Qualified attribute names and their unescaped values.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an element with no attributes or children.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn from_start(start: &BytesStart, entities: &Entities) -> Result<Self, SvgError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value_with(|name| entities.resolve(name))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    /// Builder-style attribute setter, mostly useful in tests.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child appender.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// The `id` attribute, or `""` when absent.
    pub fn id(&self) -> &str {
        self.attr("id").unwrap_or("")
    }

    /// The `inkscape:label` attribute, or `""` when absent.
    pub fn label(&self) -> &str {
        self.attr(LABEL_ATTR).unwrap_or("")
    }

    /// Sets an attribute, replacing the value in place if it already exists.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Keeps only the attributes whose name passes `keep`.
    ///
    /// Returns the number of attributes dropped.
    pub fn retain_attributes<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let before = self.attributes.len();
        self.attributes.retain(|(key, _)| keep(key));
        before - self.attributes.len()
    }

    /// Direct child elements, skipping text and other node kinds.
    pub fn child_elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// All elements below this one in document (pre-)order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.child_elements().rev().collect(),
        }
    }

    /// First descendant with the given tag name.
    pub fn find_descendant(&self, name: &str) -> Option<&Element> {
        self.descendants().find(|element| element.name == name)
    }

    /// Concatenated text and CDATA content of the direct children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) | Node::CData(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Drops every child node. Returns how many were removed.
    pub fn clear_children(&mut self) -> usize {
        let removed = self.children.len();
        self.children.clear();
        removed
    }

    /// Removes, at any depth, every element matching `remove` together with
    /// its subtree. Returns the number of elements removed.
    pub fn remove_descendants<F>(&mut self, remove: &F) -> usize
    where
        F: Fn(&Element) -> bool,
    {
        let before = self.children.len();
        self.children.retain(|node| match node {
            Node::Element(element) => !remove(element),
            _ => true,
        });
        let mut removed = before - self.children.len();
        for node in &mut self.children {
            if let Node::Element(child) = node {
                removed += child.remove_descendants(remove);
            }
        }
        removed
    }

    /// Visits this element and then every descendant, in document order.
    ///
    /// Children are read after the callback returns, so the callback may
    /// freely rewrite `children` of the element it is given.
    pub fn for_each_mut<F>(&mut self, visit: &mut F)
    where
        F: FnMut(&mut Element),
    {
        visit(self);
        for node in &mut self.children {
            if let Node::Element(child) = node {
                child.for_each_mut(visit);
            }
        }
    }
}

/// Pre-order iterator over an element subtree.
pub struct Descendants<'a> {
    pub(crate) stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<&'a Element> {
        let element = self.stack.pop()?;
        self.stack.extend(element.child_elements().rev());
        Some(element)
    }
}
