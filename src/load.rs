//! Reads live DOM content back into [`Node`] trees.
//!
//! Event listeners can't be read back, so loaded elements have no [`Element::event_bindings`]. Comments are skipped.

use crate::node::{Attribute, Element, Node};
use tracing::{trace, warn};
use wasm_bindgen::JsCast;
use web_sys::{Attr, NamedNodeMap, Node as wNode, NodeList, Text};

#[must_use]
pub fn load_child_nodes(child_nodes: &NodeList) -> Vec<Node> {
	(0..child_nodes.length()).filter_map(|i| child_nodes.item(i)).filter_map(|child| load_node(&child)).collect()
}

#[must_use]
pub fn load_node(node: &wNode) -> Option<Node> {
	if let Some(element) = node.dyn_ref::<web_sys::Element>() {
		Some(Node::Element(load_element(element)))
	} else if let Some(text) = node.dyn_ref::<Text>() {
		Some(Node::Text(text.data()))
	} else if node.dyn_ref::<web_sys::Comment>().is_some() {
		trace!("Skipping comment.");
		None
	} else {
		warn!("Unrecognised child node: {:?}", node);
		None
	}
}

#[must_use]
pub fn load_element(element: &web_sys::Element) -> Element {
	let node: &wNode = element.as_ref();
	Element {
		name: element.local_name(),
		attributes: load_attributes(&element.attributes()),
		children: load_child_nodes(&node.child_nodes()),
		event_bindings: Vec::new(),
	}
}

#[must_use]
pub fn load_attributes(attributes: &NamedNodeMap) -> Vec<Attribute> {
	(0..attributes.length()).filter_map(|i| attributes.item(i)).map(|attribute| load_attribute(&attribute)).collect()
}

#[must_use]
pub fn load_attribute(attribute: &Attr) -> Attribute {
	Attribute {
		name: attribute.local_name(),
		value: attribute.value(),
	}
}
