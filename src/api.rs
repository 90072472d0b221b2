//! Requests against the collection API.
//!
//! [`Client`] reports every failure to its caller.
//! Swallowing them, as the dashboard does, is up to [`App`](`crate::app::App`).

use crate::{
	config::Config,
	error::{Error, Result},
	model::{Envelope, Guest, NewParty, Party, PartyId, Rsvp},
};
use core::fmt::{self, Display, Formatter};
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use tracing::{instrument, trace, warn};

const EVENTS: &str = "events";
const RSVPS: &str = "rsvps";
const GUESTS: &str = "guests";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
	Get,
	Post,
	Delete,
}

impl Method {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Delete => "DELETE",
		}
	}
}

impl Display for Method {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
	pub method: Method,
	pub url: String,
	/// JSON, sent as `application/json`.
	pub body: Option<String>,
}

/// What the server answered, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
	pub status: u16,
	pub body: String,
}

impl Response {
	#[must_use]
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Moves [`Request`]s over the wire.
///
/// Implementations resolve to the [`Response`] whenever the server answered, with any status,
/// and to [`Error::Network`] only if the request couldn't be completed.
///
/// Futures are not `Send`: the planner runs on a single thread.
pub trait Transport {
	fn send(&self, request: Request) -> LocalBoxFuture<'_, Result<Response>>;
}

#[derive(Debug)]
pub struct Client<T> {
	transport: T,
	config: Config,
}

impl<T: Transport> Client<T> {
	pub fn new(transport: T, config: Config) -> Self {
		Self { transport, config }
	}


	/// # Errors
	///
	/// [`Error::Network`] or [`Error::ResponseParse`].
	#[instrument(skip(self))]
	pub async fn list_parties(&self) -> Result<Vec<Party>> {
		self.read(self.config.collection_url(EVENTS)).await
	}

	/// # Errors
	///
	/// [`Error::Network`] or [`Error::ResponseParse`].
	#[instrument(skip(self))]
	pub async fn get_party(&self, id: PartyId) -> Result<Party> {
		self.read(self.config.item_url(EVENTS, id)).await
	}

	/// # Errors
	///
	/// [`Error::Network`] or [`Error::ResponseParse`].
	#[instrument(skip(self))]
	pub async fn list_rsvps(&self) -> Result<Vec<Rsvp>> {
		self.read(self.config.collection_url(RSVPS)).await
	}

	/// # Errors
	///
	/// [`Error::Network`] or [`Error::ResponseParse`].
	#[instrument(skip(self))]
	pub async fn list_guests(&self) -> Result<Vec<Guest>> {
		self.read(self.config.collection_url(GUESTS)).await
	}

	/// Any answer from the server counts as done, whatever its status. The response body is ignored.
	///
	/// # Errors
	///
	/// [`Error::Network`], or [`Error::RequestEncode`] if `party` can't be serialised.
	#[instrument(skip(self, party))]
	pub async fn create_party(&self, party: &NewParty) -> Result<()> {
		let url = self.config.collection_url(EVENTS);
		let body = serde_json::to_string(party).map_err(|source| Error::RequestEncode { url: url.clone(), source })?;
		if cfg!(feature = "dangerous-logging") {
			trace!("POST body: {}", body);
		}
		self.write(Request {
			method: Method::Post,
			url,
			body: Some(body),
		})
		.await
	}

	/// Any answer from the server counts as done, whatever its status. The response body is ignored.
	///
	/// # Errors
	///
	/// [`Error::Network`].
	#[instrument(skip(self))]
	pub async fn delete_party(&self, id: PartyId) -> Result<()> {
		self.write(Request {
			method: Method::Delete,
			url: self.config.item_url(EVENTS, id),
			body: None,
		})
		.await
	}

	async fn write(&self, request: Request) -> Result<()> {
		let (method, url) = (request.method, request.url.clone());
		let response = self.transport.send(request).await?;
		if !response.is_success() {
			warn!("{} {} answered with HTTP {}. Carrying on.", method, url, response.status);
		}
		Ok(())
	}

	/// The status is only logged: a failed read shows up as a body without `{ "data": … }` envelope.
	async fn read<D: DeserializeOwned>(&self, url: String) -> Result<D> {
		let response = self
			.transport
			.send(Request {
				method: Method::Get,
				url: url.clone(),
				body: None,
			})
			.await?;
		if !response.is_success() {
			warn!("GET {} answered with HTTP {}.", url, response.status);
		}
		trace!("Received {} byte(s) from {}.", response.body.len(), url);
		serde_json::from_str::<Envelope<D>>(&response.body)
			.map(|envelope| envelope.data)
			.map_err(|source| Error::ResponseParse { url, source })
	}
}
