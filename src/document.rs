//! The host UI the animation writes into.
//!
//! A [`Document`] is whatever can look up two elements and mutate them: a
//! browser DOM, a terminal line, or the in-memory [`MemoryDocument`] used for
//! tests and traces.

use std::fmt;

/// How an element is located.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// First element carrying this class.
    Class(String),
    /// Element with this id.
    Id(String),
}

impl Selector {
    pub fn class(name: impl Into<String>) -> Self {
        Selector::Class(name.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Selector::Id(id.into())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Class(name) => write!(f, ".{name}"),
            Selector::Id(id) => write!(f, "#{id}"),
        }
    }
}

pub trait Document {
    /// Rendered text of the element, or `None` if it does not exist.
    fn text_content(&self, selector: &Selector) -> Option<String>;

    fn contains(&self, selector: &Selector) -> bool {
        self.text_content(selector).is_some()
    }

    fn set_text_content(&mut self, selector: &Selector, text: &str);

    fn set_class_name(&mut self, selector: &Selector, class_name: &str);
}

/// A single element of a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub id: Option<String>,
    pub class_name: String,
    pub text: String,
}

impl Element {
    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Class(name) => self.class_name.split_whitespace().any(|c| c == name),
            Selector::Id(id) => self.id.as_deref() == Some(id.as_str()),
        }
    }
}

/// Flat list of elements in document order.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Vec<Element>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element and return `self` for chaining.
    pub fn with(mut self, id: Option<&str>, class_name: &str, text: &str) -> Self {
        self.elements.push(Element {
            id: id.map(str::to_string),
            class_name: class_name.to_string(),
            text: text.to_string(),
        });
        self
    }

    /// The two-element header the site renders: title and cursor.
    pub fn header(title_class: &str, title: &str, cursor_id: &str, cursor_class: &str) -> Self {
        Self::new()
            .with(None, title_class, title)
            .with(Some(cursor_id), cursor_class, "_")
    }

    pub fn find(&self, selector: &Selector) -> Option<&Element> {
        self.elements.iter().find(|e| e.matches(selector))
    }

    fn find_mut(&mut self, selector: &Selector) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.matches(selector))
    }
}

impl Document for MemoryDocument {
    fn text_content(&self, selector: &Selector) -> Option<String> {
        self.find(selector).map(|e| e.text.clone())
    }

    fn set_text_content(&mut self, selector: &Selector, text: &str) {
        if let Some(element) = self.find_mut(selector) {
            element.text = text.to_string();
        }
    }

    fn set_class_name(&mut self, selector: &Selector, class_name: &str) {
        if let Some(element) = self.find_mut(selector) {
            element.class_name = class_name.to_string();
        }
    }
}
