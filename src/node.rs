//! A host-independent element tree.
//!
//! Component functions produce these, [`Mount`](`crate::render::Mount`) implementations turn them into something visible.
//! No node is ever reused between render passes.

use crate::action::Action;
use core::fmt::{self, Display, Formatter};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	Element(Element),
	Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
	/// Tag name. Parsed templates produce lowercase names.
	pub name: String,
	pub attributes: Vec<Attribute>,
	pub children: Vec<Node>,
	pub event_bindings: Vec<EventBinding>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
	pub name: String,
	/// Empty for bare (boolean) attributes.
	pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventBinding {
	/// DOM event type, e.g. `"click"`.
	pub event: &'static str,
	pub action: Action,
}

/// Escapes text for HTML output, as text or as quoted attribute value.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
	if !text.contains(|c| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
		return Cow::Borrowed(text);
	}

	let mut escaped = String::with_capacity(text.len() + 8);
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			c => escaped.push(c),
		}
	}
	Cow::Owned(escaped)
}

/// HTML elements that never have content or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &["area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr"];

#[must_use]
pub fn is_void(name: &str) -> bool {
	VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(name))
}

impl Element {
	#[must_use]
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			attributes: Vec::new(),
			children: Vec::new(),
			event_bindings: Vec::new(),
		}
	}

	#[must_use]
	pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.push(Attribute { name: name.into(), value: value.into() });
		self
	}

	#[must_use]
	pub fn child(mut self, child: impl Into<Node>) -> Self {
		self.children.push(child.into());
		self
	}

	#[must_use]
	pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
		self.children.extend(children);
		self
	}

	#[must_use]
	pub fn on(mut self, event: &'static str, action: Action) -> Self {
		self.event_bindings.push(EventBinding { event, action });
		self
	}

	#[must_use]
	pub fn get_attribute(&self, name: &str) -> Option<&str> {
		self.attributes.iter().find(|attribute| attribute.name == name).map(|attribute| attribute.value.as_str())
	}

	/// Whether the whitespace-separated `class` attribute contains `class`.
	#[must_use]
	pub fn has_class(&self, class: &str) -> bool {
		self.get_attribute("class").map_or(false, |classes| classes.split_ascii_whitespace().any(|c| c == class))
	}

	/// Finds the first descendant element (in document order) matching `predicate`.
	pub fn find(&self, predicate: &mut impl FnMut(&Element) -> bool) -> Option<&Element> {
		self.children.iter().find_map(|child| child.find(&mut *predicate))
	}

	/// Like [`Element::find`], but mutably.
	pub fn find_mut(&mut self, predicate: &mut impl FnMut(&Element) -> bool) -> Option<&mut Element> {
		self.children.iter_mut().find_map(|child| child.find_mut(&mut *predicate))
	}

	#[must_use]
	pub fn text_content(&self) -> String {
		let mut text = String::new();
		for child in &self.children {
			child.write_text_content(&mut text);
		}
		text
	}
}

impl Node {
	#[must_use]
	pub fn text(text: impl Into<String>) -> Self {
		Self::Text(text.into())
	}

	#[must_use]
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Node::Element(element) => Some(element),
			Node::Text(_) => None,
		}
	}

	/// Finds this node or its first descendant element (in document order) matching `predicate`.
	pub fn find(&self, predicate: &mut impl FnMut(&Element) -> bool) -> Option<&Element> {
		match self {
			Node::Element(element) if predicate(element) => Some(element),
			Node::Element(element) => element.find(predicate),
			Node::Text(_) => None,
		}
	}

	pub fn find_mut(&mut self, predicate: &mut impl FnMut(&Element) -> bool) -> Option<&mut Element> {
		match self {
			Node::Element(element) => {
				if predicate(&*element) {
					Some(element)
				} else {
					element.find_mut(predicate)
				}
			}
			Node::Text(_) => None,
		}
	}

	/// Collects this node and all descendant elements matching `predicate`, in document order.
	pub fn find_all<'a>(&'a self, predicate: &mut impl FnMut(&Element) -> bool, found: &mut Vec<&'a Element>) {
		if let Node::Element(element) = self {
			if predicate(element) {
				found.push(element);
			}
			for child in &element.children {
				child.find_all(predicate, found);
			}
		}
	}

	#[must_use]
	pub fn text_content(&self) -> String {
		let mut text = String::new();
		self.write_text_content(&mut text);
		text
	}

	fn write_text_content(&self, text: &mut String) {
		match self {
			Node::Text(t) => text.push_str(t),
			Node::Element(element) => {
				for child in &element.children {
					child.write_text_content(text);
				}
			}
		}
	}
}

impl From<Element> for Node {
	fn from(element: Element) -> Self {
		Self::Element(element)
	}
}

/// Serialises as HTML markup. Event bindings are not representable and are omitted.
impl Display for Node {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Node::Text(text) => f.write_str(&escape(text)),
			Node::Element(element) => element.fmt(f),
		}
	}
}

impl Display for Element {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "<{}", self.name)?;
		for Attribute { name, value } in &self.attributes {
			if value.is_empty() {
				write!(f, " {}", name)?;
			} else {
				write!(f, " {}=\"{}\"", name, escape(value))?;
			}
		}
		f.write_str(">")?;
		if is_void(&self.name) {
			return Ok(());
		}
		for child in &self.children {
			child.fmt(f)?;
		}
		write!(f, "</{}>", self.name)
	}
}

/// Serialises a sibling list as HTML markup.
pub struct Markup<'a>(pub &'a [Node]);
impl Display for Markup<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		self.0.iter().try_for_each(|node| node.fmt(f))
	}
}
