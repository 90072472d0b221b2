//! Markup templates with named placeholder elements.
//!
//! A parent component writes its children as stand-in elements, e.g. `<GuestList></GuestList>`,
//! and [`Template::fill`] splices the real subtrees in before anything is mounted.
//! Dynamic text goes in the same way, as [`Node::Text`] slots, so it is never parsed as markup.
//!
//! Parsing is done by [`html5ever`] in `<body>` fragment context, like assigning ***innerHTML***.
//! Tag and attribute names come out lowercase, so placeholder names are matched ASCII-case-insensitively.
//! Whitespace runs in template text collapse into a single space, and text that is only whitespace is dropped.

use crate::node::{Attribute, Element, Node};
use hashbrown::HashMap;
use html5ever::{local_name, namespace_url, ns, parse_fragment, tendril::TendrilSink, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use thiserror::Error;
use tracing::{instrument, trace, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
	#[error("expected exactly one root node but found {count}")]
	NotSingleRoot { count: usize },

	#[error("no <{0}> placeholder to substitute")]
	MissingPlaceholder(String),
}

/// A parsed, not yet mounted, sibling list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
	nodes: Vec<Node>,
}

impl Template {
	/// Parses `markup` the way a browser parses ***innerHTML*** of a `<body>`.
	///
	/// Malformed markup is recovered from, never rejected.
	#[must_use]
	#[instrument(skip(markup), fields(markup.len = markup.len()))]
	pub fn parse(markup: &str) -> Self {
		let dom = parse_fragment(RcDom::default(), ParseOpts::default(), QualName::new(None, ns!(html), local_name!("body")), Vec::new())
			.one(markup);

		// The fragment's nodes are the children of the synthetic `<html>` root.
		let root = dom.document.children.borrow().first().cloned();
		let nodes = match root {
			Some(root) => convert_children(&root),
			None => {
				warn!("Parsed template has no root.");
				Vec::new()
			}
		};
		Self { nodes }
	}

	#[must_use]
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	#[must_use]
	pub fn into_nodes(self) -> Vec<Node> {
		self.nodes
	}

	/// Replaces the first placeholder element (in document order) named like each slot with that slot's node.
	///
	/// Names match ASCII-case-insensitively. Substituted subtrees are not searched for further placeholders.
	///
	/// # Errors
	///
	/// [`TemplateError::MissingPlaceholder`] iff a slot's placeholder does not appear in the template.
	pub fn fill(self, slots: impl IntoIterator<Item = (&'static str, Node)>) -> Result<Vec<Node>, TemplateError> {
		let mut slots: HashMap<String, (&'static str, Node)> = slots.into_iter().map(|(name, node)| (name.to_ascii_lowercase(), (name, node))).collect();
		let mut nodes = self.nodes;
		substitute(&mut nodes, &mut slots);
		match slots.into_values().map(|(name, _)| name).min() {
			Some(missing) => Err(TemplateError::MissingPlaceholder(missing.to_owned())),
			None => Ok(nodes),
		}
	}

	/// Like [`Template::fill`], for templates with exactly one root node.
	///
	/// # Errors
	///
	/// As [`Template::fill`], or [`TemplateError::NotSingleRoot`].
	pub fn fill_single(self, slots: impl IntoIterator<Item = (&'static str, Node)>) -> Result<Node, TemplateError> {
		let mut nodes = self.fill(slots)?;
		match nodes.len() {
			1 => Ok(nodes.remove(0)),
			count => Err(TemplateError::NotSingleRoot { count }),
		}
	}
}

fn substitute(nodes: &mut [Node], slots: &mut HashMap<String, (&'static str, Node)>) {
	for node in nodes {
		if slots.is_empty() {
			return;
		}

		if let Node::Element(element) = node {
			if let Some((name, replacement)) = slots.remove(&element.name.to_ascii_lowercase()) {
				trace!("Substituted <{}> placeholder.", name);
				*node = replacement;
			} else {
				substitute(&mut element.children, slots);
			}
		}
	}
}

fn convert_children(handle: &Handle) -> Vec<Node> {
	handle.children.borrow().iter().filter_map(convert).collect()
}

fn convert(handle: &Handle) -> Option<Node> {
	match &handle.data {
		NodeData::Element { name, attrs, .. } => {
			let mut element = Element::new(&*name.local);
			element.attributes = attrs
				.borrow()
				.iter()
				.map(|attribute| Attribute {
					name: attribute.name.local.to_string(),
					value: attribute.value.to_string(),
				})
				.collect();
			element.children = convert_children(handle);
			Some(Node::Element(element))
		}
		NodeData::Text { contents } => {
			let text = collapse_whitespace(&contents.borrow());
			(!text.is_empty()).then(|| Node::Text(text))
		}
		NodeData::Comment { .. } => None,
		_ => {
			warn!("Skipping unexpected template node.");
			None
		}
	}
}

fn collapse_whitespace(text: &str) -> String {
	text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}
