//! Minimal element tree for building page markup.
//!
//! Renderers build [`Element`] values instead of concatenating strings so the
//! composer can post-process the tree (expand the first section, mark buttons
//! collapsed) and tests can query it by class name. Serialisation escapes all
//! text and attribute values.

use crate::util::{escape_attr, escape_text};

/// Elements serialised without a closing tag.
const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "meta", "link", "input"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Serialised verbatim. Only compile-time constants (inline style and
    /// script bodies) can be raw.
    Raw(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds one or more space-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        for c in classes.split_whitespace() {
            self.add_class(c);
        }
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn child(mut self, element: Element) -> Self {
        self.children.push(Node::Element(element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Appends unescaped static content, for `<style>` and `<script>` bodies.
    pub fn raw(mut self, content: &'static str) -> Self {
        self.children.push(Node::Raw(content));
        self
    }

    pub fn push(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Direct element children, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) | Node::Raw(_) => None,
        })
    }

    /// All descendants (including `self`) matching `pred`, in document order.
    pub fn find_all<'a, F>(&'a self, pred: F) -> Vec<&'a Element>
    where
        F: Fn(&Element) -> bool,
    {
        let mut out = Vec::new();
        self.collect(&pred, &mut out);
        out
    }

    fn collect<'a, F>(&'a self, pred: &F, out: &mut Vec<&'a Element>)
    where
        F: Fn(&Element) -> bool,
    {
        if pred(self) {
            out.push(self);
        }
        for child in self.child_elements() {
            child.collect(pred, out);
        }
    }

    /// Descendants (including `self`) carrying `class`, in document order.
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.find_all(|e| e.has_class(class))
    }

    /// Applies `f` to every descendant (including `self`) matching `pred`, in
    /// document order. `f` receives the zero-based match index.
    pub fn for_each_mut<P, F>(&mut self, pred: &P, f: &mut F)
    where
        P: Fn(&Element) -> bool,
        F: FnMut(usize, &mut Element),
    {
        let mut index = 0;
        self.visit_mut(pred, f, &mut index);
    }

    fn visit_mut<P, F>(&mut self, pred: &P, f: &mut F, index: &mut usize)
    where
        P: Fn(&Element) -> bool,
        F: FnMut(usize, &mut Element),
    {
        if pred(self) {
            f(*index, self);
            *index += 1;
        }
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                e.visit_mut(pred, f, index);
            }
        }
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Raw(_) => {}
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape_attr(&self.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }

        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&escape_text(t)),
                Node::Raw(r) => out.push_str(r),
                Node::Element(e) => e.write_html(out),
            }
        }

        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}
