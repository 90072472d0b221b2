//! One function per UI region, each a pure function of [`State`].
//!
//! Templates are static markup. Children and dynamic text are spliced in through placeholder elements
//! after parsing, before the parent is handed to a [`Mount`](`crate::render::Mount`),
//! so record values are displayed exactly as stored.

use core::iter;
use crate::{
	action::Action,
	model::Party,
	node::{Attribute, Element, EventBinding, Node},
	state::State,
	template::{Template, TemplateError},
};

pub const SELECT_PROMPT: &str = "Please select a party to learn more.";

const APP: &str = r#"
	<h1>Party Planner</h1>
	<main>
		<section>
			<h2>Upcoming Parties</h2>
			<PartyList></PartyList>
			<h3>Add a new party</h3>
			<NewPartyForm></NewPartyForm>
		</section>
		<section id="selected">
			<h2>Party Details</h2>
			<SelectedParty></SelectedParty>
		</section>
	</main>
"#;

const PARTY_LABEL: &str = r##"<a href="#selected"><PartyName></PartyName></a>"##;

const PARTY_DETAILS: &str = r#"
	<section>
		<h3><PartyHeading></PartyHeading></h3>
		<time>
			<PartyDay></PartyDay>
		</time>
		<address><PartyLocation></PartyLocation></address>
		<p><PartyDescription></PartyDescription></p>
		<GuestList></GuestList>
		<button>Delete party</button>
	</section>
"#;

const NEW_PARTY_FORM: &str = r#"
	<form>
		<label>
			Name
			<input name="name" required />
		</label>
		<label>
			Description
			<input name="description" required />
		</label>
		<label>
			Date
			<input name="date" type="date" required />
		</label>
		<label>
			Location
			<input name="location" required />
		</label>
		<button>Add party</button>
	</form>
"#;

/// Clickable party name. Marked `selected` if it's the selected party.
///
/// # Errors
///
/// Only if the template is broken.
pub fn party_list_item(state: &State, party: &Party) -> Result<Node, TemplateError> {
	let mut item = Element::new("li");
	if state.is_selected(party.id) {
		item = item.attribute("class", "selected");
	}

	let label = Template::parse(PARTY_LABEL).fill_single([("PartyName", Node::text(party.name.clone()))])?;
	Ok(item.child(label).on("click", Action::SelectParty(party.id)).into())
}

/// All parties, in server order.
///
/// # Errors
///
/// Only if a template is broken.
pub fn party_list(state: &State) -> Result<Node, TemplateError> {
	let items = state.parties().iter().map(|party| party_list_item(state, party)).collect::<Result<Vec<_>, _>>()?;
	Ok(Element::new("ul").attribute("class", "parties").children(items).into())
}

/// Details of the selected party with its guest list and a delete button, or a prompt without selection.
///
/// # Errors
///
/// Only if a template is broken.
pub fn selected_party(state: &State) -> Result<Node, TemplateError> {
	let party = match state.selected_party() {
		Some(party) => party,
		None => return Ok(Element::new("p").child(Node::text(SELECT_PROMPT)).into()),
	};

	let mut section = Template::parse(PARTY_DETAILS).fill_single([
		("PartyHeading", Node::text(format!("{} #{}", party.name, party.id))),
		("PartyDay", Node::text(party.day())),
		("PartyLocation", Node::text(party.location.clone())),
		("PartyDescription", Node::text(party.description.clone())),
		("GuestList", guest_list(state)),
	])?;

	if let Some(time) = section.find_mut(&mut |element: &Element| element.name == "time") {
		time.attributes.push(Attribute {
			name: "datetime".to_owned(),
			value: party.date.clone(),
		});
	}
	if let Some(delete) = section.find_mut(&mut |element: &Element| element.name == "button") {
		delete.event_bindings.push(EventBinding {
			event: "click",
			action: Action::DeleteParty(party.id),
		});
	}
	Ok(section)
}

/// Guests attending the selected party, in guest collection order.
#[must_use]
pub fn guest_list(state: &State) -> Node {
	Element::new("ul")
		.children(state.attendees().map(|guest| Element::new("li").child(Node::text(guest.name.clone())).into()))
		.into()
}

/// Form for a new party. Submitting it creates the party.
///
/// # Errors
///
/// Only if the template is broken.
pub fn new_party_form(_state: &State) -> Result<Node, TemplateError> {
	let mut form = Template::parse(NEW_PARTY_FORM).fill_single(iter::empty())?;
	if let Node::Element(form) = &mut form {
		form.event_bindings.push(EventBinding {
			event: "submit",
			action: Action::SubmitNewParty,
		});
	}
	Ok(form)
}

/// The root container's complete content.
///
/// # Errors
///
/// Only if a template is broken.
pub fn app(state: &State) -> Result<Vec<Node>, TemplateError> {
	Template::parse(APP).fill([
		("PartyList", party_list(state)?),
		("NewPartyForm", new_party_form(state)?),
		("SelectedParty", selected_party(state)?),
	])
}
