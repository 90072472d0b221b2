//! Records exchanged with the collection API.
//!
//! The client never mutates these in place. Each fetch replaces the previous snapshot wholesale.

use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub type PartyId = u64;
pub type GuestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
	pub id: PartyId,
	pub name: String,
	pub description: String,
	/// ISO-8601 instant, e.g. `2025-03-14T18:30:00.000Z`.
	pub date: String,
	pub location: String,
}

impl Party {
	/// The date portion of [`Party::date`], i.e. its first ten characters.
	#[must_use]
	pub fn day(&self) -> &str {
		match self.date.char_indices().nth(10) {
			Some((end, _)) => &self.date[..end],
			None => &self.date,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
	pub id: GuestId,
	pub name: String,
}

/// Links a guest to a party they plan to attend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
	pub guest_id: GuestId,
	pub event_id: PartyId,
}

/// Body of a party creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParty {
	pub name: String,
	pub description: String,
	pub date: String,
	pub location: String,
}

/// Raw values of the new party form, with `date` as entered into a `type="date"` input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartyDraft {
	pub name: String,
	pub description: String,
	/// `YYYY-MM-DD`
	pub date: String,
	pub location: String,
}

impl PartyDraft {
	/// Converts the draft into a creation request, with the date expanded to midnight UTC.
	///
	/// # Errors
	///
	/// Iff [`PartyDraft::date`] is not a `YYYY-MM-DD` calendar date.
	pub fn into_new_party(self) -> Result<NewParty> {
		let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|source| Error::InvalidDate { input: self.date.clone(), source })?;
		let instant = date.and_time(NaiveTime::default()).and_utc();
		Ok(NewParty {
			name: self.name,
			description: self.description,
			date: instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
			location: self.location,
		})
	}
}

/// The `{ "data": … }` envelope every read endpoint answers with.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
	pub data: T,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn draft(date: &str) -> PartyDraft {
		PartyDraft {
			name: "Launch".to_owned(),
			description: "Kickoff".to_owned(),
			date: date.to_owned(),
			location: "HQ".to_owned(),
		}
	}

	#[test]
	fn draft_date_becomes_utc_midnight() {
		let new_party = draft("2025-06-01").into_new_party().unwrap();
		assert_eq!(new_party.date, "2025-06-01T00:00:00.000Z");
		assert_eq!(new_party.name, "Launch");
		assert_eq!(new_party.location, "HQ");
	}

	#[test]
	fn draft_rejects_non_dates() {
		assert!(matches!(draft("").into_new_party(), Err(Error::InvalidDate { .. })));
		assert!(matches!(draft("2025-02-30").into_new_party(), Err(Error::InvalidDate { .. })));
	}

	#[test]
	fn day_truncates_to_date_portion() {
		let mut party = Party {
			id: 1,
			name: String::new(),
			description: String::new(),
			date: "2025-03-14T18:30:00.000Z".to_owned(),
			location: String::new(),
		};
		assert_eq!(party.day(), "2025-03-14");
		party.date = "soon".to_owned();
		assert_eq!(party.day(), "soon");
	}

	#[test]
	fn rsvp_uses_camel_case() {
		let rsvp: Rsvp = serde_json::from_str(r#"{"id":9,"guestId":3,"eventId":5}"#).unwrap();
		assert_eq!(rsvp, Rsvp { guest_id: 3, event_id: 5 });
	}
}
