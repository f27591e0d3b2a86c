//! ordered element tree used as the intermediate representation for every command
//!
//! EPP schemas mandate element and attribute order, so the tree keeps both in
//! plain vectors: insertion order is schema order, and the renderer walks the
//! tree without reordering anything.

/// A single XML element: tag name, ordered attributes, ordered child
/// elements and an optional text value.
///
/// Construction is done through the chained builder methods; every command
/// and extension builder in this crate produces one of these as its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    pub fn new<S: Into<String>>(name: S) -> Element {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Append an attribute. Attributes render in the order they were added.
    pub fn attr<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Element {
        self.attributes.push((key.into(), value.to_string()));
        self
    }

    /// Append an attribute only when a value is present.
    pub fn maybe_attr<K: Into<String>, V: ToString>(self, key: K, value: Option<V>) -> Element {
        match value {
            Some(value) => self.attr(key, value),
            None => self,
        }
    }

    /// Set the text value of this element.
    pub fn text<V: ToString>(mut self, value: V) -> Element {
        self.text = Some(value.to_string());
        self
    }

    /// Append a child element.
    pub fn child(mut self, child: Element) -> Element {
        self.children.push(child);
        self
    }

    /// Append a child element only when one is present.
    pub fn maybe_child(self, child: Option<Element>) -> Element {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    /// Append a sequence of child elements, preserving their order.
    pub fn append<I: IntoIterator<Item = Element>>(mut self, children: I) -> Element {
        self.children.extend(children);
        self
    }

    pub fn tag(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn value(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn elements(&self) -> &[Element] {
        &self.children
    }

    /// First child with the given tag name.
    pub fn first(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == tag)
    }

    /// All children with the given tag name, in document order.
    pub fn all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == tag)
    }

    /// Descend a dot separated path of tag names, e.g.
    /// `"secDNS:create.secDNS:dsData.secDNS:digest"`, following the first
    /// match at each step.
    pub fn locate(&self, path: &str) -> Option<&Element> {
        let mut cursor = self;
        for step in path.split('.') {
            cursor = cursor.first(step)?;
        }
        Some(cursor)
    }

    /// True when the element carries no children and no text value, which
    /// the renderer emits in self-closing form.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_none()
    }
}

/// Join a namespace prefix and a local name into a qualified tag name.
pub fn qname(prefix: &str, local: &str) -> String {
    format!("{}:{}", prefix, local)
}
