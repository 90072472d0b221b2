//! Compile-time configuration of the collection API.
//!
//! Both constants can be overridden while building through the `PARTY_PLANNER_API_BASE`
//! and `PARTY_PLANNER_COHORT` environment variables.

/// Base path of the collection API, without trailing slash.
pub const API_BASE: &str = match option_env!("PARTY_PLANNER_API_BASE") {
	Some(api_base) => api_base,
	None => "https://fsa-crud-2aa9294fe819.herokuapp.com/api",
};

/// Cohort segment that namespaces all collections on the server.
pub const COHORT: &str = match option_env!("PARTY_PLANNER_COHORT") {
	Some(cohort) => cohort,
	None => "2508",
};

/// Selector of the element the planner replaces the children of.
pub const MOUNT_SELECTOR: &str = "#app";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub api_base: String,
	pub cohort: String,
	pub mount_selector: String,
}

impl Default for Config {
	fn default() -> Self {
		Self::new(API_BASE, COHORT)
	}
}

impl Config {
	#[must_use]
	pub fn new(api_base: impl Into<String>, cohort: impl Into<String>) -> Self {
		Self {
			api_base: api_base.into().trim_end_matches('/').to_owned(),
			cohort: cohort.into().trim_matches('/').to_owned(),
			mount_selector: MOUNT_SELECTOR.to_owned(),
		}
	}

	/// `{api_base}/{cohort}/{collection}`
	#[must_use]
	pub fn collection_url(&self, collection: &str) -> String {
		format!("{}/{}/{}", self.api_base, self.cohort, collection)
	}

	/// `{api_base}/{cohort}/{collection}/{id}`
	#[must_use]
	pub fn item_url(&self, collection: &str, id: impl std::fmt::Display) -> String {
		format!("{}/{}", self.collection_url(collection), id)
	}
}
