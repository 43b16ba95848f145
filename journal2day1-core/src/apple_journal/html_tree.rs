//! A small owned document tree built from the tolerant HTML5 parse `scraper` performs.
//!
//! Only elements and text survive the conversion; comments, doctypes and processing
//! instructions are dropped.

use scraper::{ElementRef, Html};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Depth-first, document-order visitor over a [`Element`] tree.
pub trait Visitor {
    fn visit_element(&mut self, element: &Element);

    fn visit_text(&mut self, _text: &str) {}
}

/// Parses a whole HTML document and returns its root `<html>` element.
///
/// Malformed markup is recovered the way browsers do, so this never fails.
pub fn parse_document(source: &str) -> Element {
    let document = Html::parse_document(source);
    from_element_ref(document.root_element())
}

fn from_element_ref(element: ElementRef<'_>) -> Element {
    let value = element.value();
    let children = element
        .children()
        .filter_map(|child| {
            if let Some(child_element) = ElementRef::wrap(child) {
                return Some(Node::Element(from_element_ref(child_element)));
            }
            child.value().as_text().map(|text| {
                let text: &str = text;
                Node::Text(text.to_owned())
            })
        })
        .collect();

    Element {
        name: value.name().to_string(),
        attrs: value
            .attrs()
            .map(|(key, val)| (key.to_string(), val.to_string()))
            .collect(),
        children,
    }
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// The `class` attribute, or `""`.
    pub fn class(&self) -> &str {
        self.attr("class").unwrap_or_default()
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Visits this element and then every descendant, in document order.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_element(self);
        for child in &self.children {
            match child {
                Node::Element(element) => element.accept(visitor),
                Node::Text(text) => visitor.visit_text(text),
            }
        }
    }

    /// First `Some` produced by `f` over this element and its descendants, in document order.
    pub fn find_map<T>(&self, f: &mut impl FnMut(&Element) -> Option<T>) -> Option<T> {
        if let Some(found) = f(self) {
            return Some(found);
        }
        self.child_elements().find_map(|child| child.find_map(f))
    }

    /// Every descendant text node, untouched and in order.
    pub fn text_nodes(&self) -> Vec<&str> {
        let mut texts = Vec::new();
        self.collect_text(&mut texts);
        texts
    }

    fn collect_text<'a>(&'a self, texts: &mut Vec<&'a str>) {
        for child in &self.children {
            match child {
                Node::Element(element) => element.collect_text(texts),
                Node::Text(text) => texts.push(text),
            }
        }
    }

    /// All descendant text concatenated.
    pub fn text_content(&self) -> String {
        self.text_nodes().concat()
    }
}
