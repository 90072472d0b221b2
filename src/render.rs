//! Where render passes end up.

use crate::{
	action::{Action, Intent},
	model::PartyDraft,
	node::{Element, Markup, Node},
};
use core::{
	cell::RefCell,
	fmt::{self, Debug, Formatter},
};
use std::rc::Rc;
use tracing::{instrument, trace, warn};

/// Routes [`Intent`]s from mounted event bindings back to whoever schedules them.
#[derive(Clone)]
pub struct Dispatcher(Rc<dyn Fn(Intent)>);

impl Dispatcher {
	pub fn new(dispatch: impl Fn(Intent) + 'static) -> Self {
		Self(Rc::new(dispatch))
	}

	#[instrument]
	pub fn dispatch(&self, intent: Intent) {
		(self.0)(intent);
	}
}

impl Debug for Dispatcher {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Dispatcher").finish_non_exhaustive()
	}
}

/// A render target.
///
/// Each call performs one complete, atomic swap: the previous children are discarded wholesale, nothing is reused.
pub trait Mount {
	fn replace_children(&mut self, children: &[Node], dispatcher: &Dispatcher);
}

/// Keeps the latest render pass in memory instead of a document.
///
/// Clones share the same slot, so a handle kept outside the [`App`](`crate::app::App`) observes every pass.
#[derive(Debug, Clone, Default)]
pub struct HeadlessMount(Rc<RefCell<Headless>>);

#[derive(Debug, Default)]
struct Headless {
	children: Vec<Node>,
	dispatcher: Option<Dispatcher>,
	passes: usize,
}

impl HeadlessMount {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// The children from the latest pass.
	#[must_use]
	pub fn children(&self) -> Vec<Node> {
		self.0.borrow().children.clone()
	}

	#[must_use]
	pub fn markup(&self) -> String {
		Markup(&self.0.borrow().children).to_string()
	}

	/// How many render passes have been mounted.
	#[must_use]
	pub fn passes(&self) -> usize {
		self.0.borrow().passes
	}

	/// Fires `click` on an element bound to `action`, if the current tree has one.
	#[must_use = "`false` means nothing was bound to `action`"]
	pub fn click(&self, action: Action) -> bool {
		self.fire("click", action, || None)
	}

	/// Fires `submit` on the element bound to [`Action::SubmitNewParty`], if the current tree has one.
	#[must_use = "`false` means no form was bound"]
	pub fn submit(&self, draft: PartyDraft) -> bool {
		self.fire("submit", Action::SubmitNewParty, move || Some(draft))
	}

	fn fire(&self, event: &str, action: Action, form: impl FnOnce() -> Option<PartyDraft>) -> bool {
		let (bound, dispatcher) = {
			let headless = self.0.borrow();
			let bound = headless.children.iter().any(|node| {
				node.find(&mut |element: &Element| element.event_bindings.iter().any(|binding| binding.event == event && binding.action == action))
					.is_some()
			});
			(bound, headless.dispatcher.clone())
		};

		match (bound, dispatcher, action.into_intent(form)) {
			(true, Some(dispatcher), Some(intent)) => {
				dispatcher.dispatch(intent);
				true
			}
			_ => {
				warn!("No {:?} binding for {:?} is mounted.", event, action);
				false
			}
		}
	}
}

impl Mount for HeadlessMount {
	fn replace_children(&mut self, children: &[Node], dispatcher: &Dispatcher) {
		let mut headless = self.0.borrow_mut();
		headless.children = children.to_vec();
		headless.dispatcher = Some(dispatcher.clone());
		headless.passes += 1;
		trace!("Headless render pass {} mounted.", headless.passes);
	}
}
