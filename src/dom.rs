use crate::{
	model::PartyDraft,
	node::{Attribute, EventBinding, Node},
	render::{Dispatcher, Mount},
};
use tracing::{error, info, instrument, trace, trace_span, warn};
use wasm_bindgen::{closure::Closure, JsCast};

type Listener = Closure<dyn FnMut(web_sys::Event)>;

/// Attached to a specific [`web_sys::Element`] during instantiation, this `struct` replaces its [***childNodes***](https://developer.mozilla.org/en-US/docs/Web/API/Node/childNodes) once per render pass.
///
/// Note that this does not include the [***Element***](https://developer.mozilla.org/en-US/docs/Web/API/element)
/// it is attached to itself, and also does not include the [***Attr***](https://developer.mozilla.org/en-US/docs/Web/API/Attr)ibutes of that element.
///
/// Each pass is built completely inside a detached [***DocumentFragment***](https://developer.mozilla.org/en-US/docs/Web/API/DocumentFragment)
/// and then swapped in with a single [***replaceChildren***](https://developer.mozilla.org/en-US/docs/Web/API/Element/replaceChildren) call.
/// No DOM node survives into the next pass.
///
/// # Event Listeners
///
/// Listeners of a pass are kept alive until the next pass was swapped in, and dropped then.
/// Listeners only ever dispatch, so a pass is never dropped while one of its listeners runs.
///
/// Associated event listeners will start throwing errors into [***JavaScript***](https://developer.mozilla.org/en-US/docs/Web/JavaScript)
/// if the instance is dropped while its content is still in the document.
#[derive(Debug)]
pub struct DomMount {
	element: web_sys::Element,
	listeners: Vec<Listener>,
}

impl DomMount {
	#[must_use]
	#[instrument]
	pub fn new_for_element_child_nodes(element: web_sys::Element) -> Self {
		Self { element, listeners: Vec::new() }
	}

	/// Event listeners held for the current pass.
	#[must_use]
	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}
}

impl Mount for DomMount {
	#[instrument(skip(self, children, dispatcher))]
	fn replace_children(&mut self, children: &[Node], dispatcher: &Dispatcher) {
		let document = match self.element.owner_document() {
			Some(document) => document,
			None => return error!("No owner document found for root element."),
		};

		let fragment = document.create_document_fragment();
		let mut listeners = Vec::new();
		for child in children {
			create_node(&document, child, &fragment, dispatcher, &mut listeners);
		}

		if let Err(error) = self.element.replace_children_with_node_1(&fragment) {
			return error!("Failed to swap in render pass, keeping the previous one: {:?}", error);
		}

		let freed = core::mem::replace(&mut self.listeners, listeners).len();
		trace!("Freed {} event listener(s).", freed);
		info!("Event listener count: {}", self.listeners.len());
	}
}

fn create_node(document: &web_sys::Document, node: &Node, parent: &web_sys::Node, dispatcher: &Dispatcher, listeners: &mut Vec<Listener>) {
	match node {
		Node::Text(text) => {
			let span = trace_span!("Creating text node", text.len = text.len());
			let _enter = span.enter();
			let dom_text = document.create_text_node(text);
			if let Err(error) = parent.append_child(&dom_text) {
				error!("Failed to insert text: {:?}", error);
			}
		}

		Node::Element(element) => {
			let span = trace_span!("Creating HTML element", name = %element.name);
			let _enter = span.enter();

			let dom_element = match document.create_element(&element.name) {
				Ok(dom_element) => dom_element,
				Err(error) => return error!("Failed to create HTML element <{}>: {:?}", element.name, error),
			};

			if !element.attributes.is_empty() {
				let attributes = dom_element.attributes();
				for attribute in &element.attributes {
					add_attribute(document, &attributes, attribute);
				}
			}

			for &binding in &element.event_bindings {
				add_event_listener(&dom_element, binding, dispatcher, listeners);
			}

			for child in &element.children {
				create_node(document, child, &dom_element, dispatcher, listeners);
			}

			if let Err(error) = parent.append_child(&dom_element) {
				error!("Failed to insert HTML element <{}>: {:?}", element.name, error);
			}
		}
	}
}

#[instrument(skip(document, attributes))]
fn add_attribute(document: &web_sys::Document, attributes: &web_sys::NamedNodeMap, Attribute { name, value }: &Attribute) {
	let attribute = match document.create_attribute(name) {
		Ok(attribute) => attribute,
		Err(error) => return error!("Could not create attribute {:?}: {:?}", name, error),
	};
	if !value.is_empty() {
		attribute.set_value(value);
	}
	match attributes.set_named_item(&attribute) {
		Ok(None) => (),
		Err(error) => error!("Could not add attribute {:?}={:?}: {:?}", name, value, error),
		Ok(Some(replaced)) => error!("Attribute collision. Added attribute {:?}={:?} was {:?} before", name, value, replaced.value()),
	}
}

#[instrument(skip(element, dispatcher, listeners))]
fn add_event_listener(element: &web_sys::Element, EventBinding { event: name, action }: EventBinding, dispatcher: &Dispatcher, listeners: &mut Vec<Listener>) {
	let dispatcher = dispatcher.clone();
	let listener = Closure::wrap(Box::new(move |event: web_sys::Event| {
		let span = trace_span!("listener", ?action, event = %event.type_());
		let _enter = span.enter();

		let intent = action.into_intent(|| {
			event.prevent_default();
			read_party_form(&event)
		});
		match intent {
			Some(intent) => dispatcher.dispatch(intent),
			None => warn!("Could not read the submitted form. Ignoring {:?}.", action),
		}
	}) as Box<dyn FnMut(web_sys::Event)>);

	if let Err(error) = element.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref()) {
		return error!("Failed to add event listener {:?}: {:?}", name, error);
	}
	listeners.push(listener);
}

fn read_party_form(event: &web_sys::Event) -> Option<PartyDraft> {
	let form = event.current_target()?.dyn_into::<web_sys::HtmlFormElement>().ok()?;
	let data = web_sys::FormData::new_with_form(&form).ok()?;
	let field = |name: &str| data.get(name).as_string().unwrap_or_default();
	Some(PartyDraft {
		name: field("name"),
		description: field("description"),
		date: field("date"),
		location: field("location"),
	})
}
