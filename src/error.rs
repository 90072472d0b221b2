use crate::template::TemplateError;
use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Everything that can make a planner operation fail.
///
/// Remote operations produce [`Error::Network`] and [`Error::ResponseParse`],
/// and in theory [`Error::RequestEncode`].
/// [`App`](`crate::app::App`) collapses them into a logged no-op.
#[derive(Debug, Error)]
pub enum Error {
	/// The request could not be completed. Any HTTP answer, whatever its status, counts as completed.
	#[error("request to {url} could not be completed: {reason}")]
	Network { url: String, reason: String },

	/// The response body was not a well-formed `{ "data": … }` envelope of the expected shape.
	#[error("response from {url} was not well-formed: {source}")]
	ResponseParse {
		url: String,
		#[source]
		source: serde_json::Error,
	},

	#[error("request body for {url} could not be encoded: {source}")]
	RequestEncode {
		url: String,
		#[source]
		source: serde_json::Error,
	},

	#[error("{input:?} is not a calendar date: {source}")]
	InvalidDate {
		input: String,
		#[source]
		source: chrono::ParseError,
	},

	#[error(transparent)]
	Template(#[from] TemplateError),
}
