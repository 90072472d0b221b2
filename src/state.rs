//! The planner's single source of truth.

use crate::model::{Guest, Party, PartyId, Rsvp};
use core::cell::{Ref, RefCell};

/// Snapshot of the last-fetched collections and the current selection.
///
/// Component functions only ever see `&State`.
/// Mutation happens exclusively through [`Store`], from the completion handlers of [`App`](`crate::app::App`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
	parties: Vec<Party>,
	selected_party: Option<Party>,
	rsvps: Vec<Rsvp>,
	guests: Vec<Guest>,
}

impl State {
	/// A detached snapshot, e.g. for previews. This does not affect any [`Store`].
	#[must_use]
	pub fn with_collections(parties: Vec<Party>, rsvps: Vec<Rsvp>, guests: Vec<Guest>) -> Self {
		Self {
			parties,
			selected_party: None,
			rsvps,
			guests,
		}
	}

	#[must_use]
	pub fn with_selected_party(mut self, selected_party: Option<Party>) -> Self {
		self.selected_party = selected_party;
		self
	}

	/// In server collection order.
	#[must_use]
	pub fn parties(&self) -> &[Party] {
		&self.parties
	}

	#[must_use]
	pub fn selected_party(&self) -> Option<&Party> {
		self.selected_party.as_ref()
	}

	#[must_use]
	pub fn rsvps(&self) -> &[Rsvp] {
		&self.rsvps
	}

	#[must_use]
	pub fn guests(&self) -> &[Guest] {
		&self.guests
	}

	#[must_use]
	pub fn is_selected(&self, id: PartyId) -> bool {
		self.selected_party.as_ref().map_or(false, |selected| selected.id == id)
	}

	/// Guests with an RSVP for the selected party, in [`State::guests`] order.
	///
	/// Computed on each call. Empty without selection.
	pub fn attendees(&self) -> impl Iterator<Item = &Guest> + '_ {
		let selected = self.selected_party.as_ref().map(|party| party.id);
		self.guests.iter().filter(move |guest| {
			selected.map_or(false, |party_id| self.rsvps.iter().any(|rsvp| rsvp.guest_id == guest.id && rsvp.event_id == party_id))
		})
	}

	pub(crate) fn replace_parties(&mut self, parties: Vec<Party>) {
		self.parties = parties;
	}

	pub(crate) fn select(&mut self, party: Party) {
		self.selected_party = Some(party);
	}

	pub(crate) fn clear_selection(&mut self) {
		self.selected_party = None;
	}

	pub(crate) fn replace_rsvps(&mut self, rsvps: Vec<Rsvp>) {
		self.rsvps = rsvps;
	}

	pub(crate) fn replace_guests(&mut self, guests: Vec<Guest>) {
		self.guests = guests;
	}
}

/// Owns the live [`State`].
///
/// There is no locking: everything runs on one thread, and no borrow is held across a suspension point.
#[derive(Debug, Default)]
pub struct Store {
	state: RefCell<State>,
}

impl Store {
	/// Borrows the current snapshot. Drop the guard before awaiting.
	#[must_use]
	pub fn snapshot(&self) -> Ref<'_, State> {
		self.state.borrow()
	}

	pub(crate) fn update<R>(&self, mutation: impl FnOnce(&mut State) -> R) -> R {
		mutation(&mut self.state.borrow_mut())
	}
}
