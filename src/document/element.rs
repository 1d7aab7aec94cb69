//! Element: one node of the parsed document tree

/// A single element of a parsed registry export.
///
/// Tags and child lookups use local names (namespace prefixes stripped),
/// since the export mixes prefixed and unprefixed spellings of the same
/// vocabulary. Attribute names keep their full qualified form.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Local tag name (prefix stripped)
    pub tag: String,
    /// Attributes in document order, fully qualified names
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order
    pub children: Vec<Element>,
    /// Concatenated text content, trimmed; `None` when empty
    pub text: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Look up an attribute by its local name (prefix ignored)
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| local_name(k) == name)
            .map(|(_, v)| v.as_str())
    }

    /// The `xlink:href`-style reference attribute, if present
    pub fn href(&self) -> Option<&str> {
        self.attr("href")
    }

    /// First direct child with the given local tag name
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All direct children with the given local tag name, in document order
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Text content of the first child with the given tag name
    pub fn child_text(&self, tag: &str) -> Option<&str> {
        self.child(tag).and_then(|c| c.text.as_deref())
    }

    /// Reference attribute of the first child with the given tag name
    pub fn child_href(&self, tag: &str) -> Option<&str> {
        self.child(tag).and_then(|c| c.href())
    }

    /// First descendant with the given local tag name, depth-first in
    /// document order
    pub fn descendant(&self, tag: &str) -> Option<&Element> {
        for child in &self.children {
            if child.tag == tag {
                return Some(child);
            }
            if let Some(found) = child.descendant(tag) {
                return Some(found);
            }
        }
        None
    }

    /// Text content of the first descendant with the given tag name
    pub fn descendant_text(&self, tag: &str) -> Option<&str> {
        self.descendant(tag).and_then(|e| e.text.as_deref())
    }
}

/// Strip a namespace prefix from a qualified name
pub(crate) fn local_name(qname: &str) -> &str {
    match qname.rsplit_once(':') {
        Some((_, local)) => local,
        None => qname,
    }
}
