#![cfg(target_arch = "wasm32")]

use party_planner::{
	action::Intent,
	components,
	dom::DomMount,
	load::load_child_nodes,
	model::{Party, PartyDraft},
	node::Node,
	render::{Dispatcher, Mount},
	state::State,
};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, HtmlElement, HtmlFormElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

static mut LOG_INITIALIZED: bool = false;

fn init_log() {
	unsafe {
		if !LOG_INITIALIZED {
			tracing_wasm::set_as_global_default();
			LOG_INITIALIZED = true;
		}
	}
}

fn party(id: u64, name: &str) -> Party {
	Party {
		id,
		name: name.to_owned(),
		description: format!("All about {}", name),
		date: "2025-03-14T18:30:00.000Z".to_owned(),
		location: "HQ".to_owned(),
	}
}

/// A fresh root below `<body>`, so tests don't see each other's content.
fn root() -> web_sys::Element {
	let document = window().unwrap().document().unwrap();
	let root = document.create_element("div").unwrap();
	document.body().unwrap().append_child(&root).unwrap();
	root
}

fn recording_dispatcher() -> (Dispatcher, Rc<RefCell<Vec<Intent>>>) {
	let intents = Rc::new(RefCell::new(Vec::new()));
	let dispatcher = Dispatcher::new({
		let intents = Rc::clone(&intents);
		move |intent| intents.borrow_mut().push(intent)
	});
	(dispatcher, intents)
}

fn without_bindings(nodes: &[Node]) -> Vec<Node> {
	nodes
		.iter()
		.map(|node| match node {
			Node::Element(element) => {
				let mut element = element.clone();
				element.event_bindings.clear();
				element.children = without_bindings(&element.children);
				Node::Element(element)
			}
			Node::Text(_) => node.clone(),
		})
		.collect()
}

fn planner() -> State {
	State::with_collections(vec![party(3, "Gala"), party(5, "Picnic")], Vec::new(), Vec::new()).with_selected_party(Some(party(5, "Picnic")))
}

#[wasm_bindgen_test]
fn rendered_content_loads_back_identically() {
	init_log();

	let root = root();
	let mut mount = DomMount::new_for_element_child_nodes(root.clone());
	let (dispatcher, _) = recording_dispatcher();

	let children = components::app(&planner()).unwrap();
	mount.replace_children(&children, &dispatcher);
	assert_eq!(load_child_nodes(&root.child_nodes()), without_bindings(&children));

	// Two party items, the form and the delete button.
	assert_eq!(mount.listener_count(), 4);

	let children = components::app(&State::default()).unwrap();
	mount.replace_children(&children, &dispatcher);
	assert_eq!(load_child_nodes(&root.child_nodes()), without_bindings(&children));
	assert_eq!(mount.listener_count(), 1);
}

#[wasm_bindgen_test]
fn clicks_dispatch_their_intent() {
	init_log();

	let root = root();
	let mut mount = DomMount::new_for_element_child_nodes(root.clone());
	let (dispatcher, intents) = recording_dispatcher();
	mount.replace_children(&components::app(&planner()).unwrap(), &dispatcher);

	let selected: HtmlElement = root.query_selector("li.selected").unwrap().unwrap().dyn_into().unwrap();
	selected.click();
	let delete: HtmlElement = root.query_selector("#selected button").unwrap().unwrap().dyn_into().unwrap();
	delete.click();

	assert_eq!(*intents.borrow(), vec![Intent::Select(5), Intent::Delete(5)]);
}

#[wasm_bindgen_test]
fn submitting_reads_the_form() {
	init_log();

	let root = root();
	let mut mount = DomMount::new_for_element_child_nodes(root.clone());
	let (dispatcher, intents) = recording_dispatcher();
	mount.replace_children(&components::app(&State::default()).unwrap(), &dispatcher);

	for (name, value) in [("name", "Launch"), ("description", "Kickoff"), ("date", "2025-06-01"), ("location", "HQ")] {
		let input: HtmlInputElement = root.query_selector(&format!("input[name={}]", name)).unwrap().unwrap().dyn_into().unwrap();
		input.set_value(value);
	}

	let form: HtmlFormElement = root.query_selector("form").unwrap().unwrap().dyn_into().unwrap();
	let submit = web_sys::Event::new("submit").unwrap();
	form.dispatch_event(&submit).unwrap();

	assert_eq!(
		*intents.borrow(),
		vec![Intent::Create(PartyDraft {
			name: "Launch".to_owned(),
			description: "Kickoff".to_owned(),
			date: "2025-06-01".to_owned(),
			location: "HQ".to_owned(),
		})]
	);
}

#[wasm_bindgen_test]
fn stale_listeners_are_released() {
	init_log();

	let root = root();
	let mut mount = DomMount::new_for_element_child_nodes(root.clone());
	let (dispatcher, intents) = recording_dispatcher();

	mount.replace_children(&components::app(&planner()).unwrap(), &dispatcher);
	let stale: HtmlElement = root.query_selector("li.selected").unwrap().unwrap().dyn_into().unwrap();
	mount.replace_children(&components::app(&planner()).unwrap(), &dispatcher);

	assert!(!root.contains(Some(&stale)));
	let fresh: HtmlElement = root.query_selector("li.selected").unwrap().unwrap().dyn_into().unwrap();
	fresh.click();
	assert_eq!(*intents.borrow(), vec![Intent::Select(5)]);
}
