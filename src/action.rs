use crate::model::{PartyDraft, PartyId};

/// What an element's event binding does once the event fires.
///
/// Bindings carry data instead of closures, so rendered trees stay comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
	SelectParty(PartyId),
	DeleteParty(PartyId),
	/// Read the submitted form's fields into a [`PartyDraft`].
	SubmitNewParty,
}

/// A user request, scheduled as one asynchronous task on the [`App`](`crate::app::App`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
	Select(PartyId),
	Delete(PartyId),
	Create(PartyDraft),
}

impl Action {
	/// Resolves the binding into an [`Intent`].
	///
	/// `form` is consulted only for [`Action::SubmitNewParty`], which yields [`None`] without it.
	#[must_use]
	pub fn into_intent(self, form: impl FnOnce() -> Option<PartyDraft>) -> Option<Intent> {
		match self {
			Action::SelectParty(id) => Some(Intent::Select(id)),
			Action::DeleteParty(id) => Some(Intent::Delete(id)),
			Action::SubmitNewParty => form().map(Intent::Create),
		}
	}
}
