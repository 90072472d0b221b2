#![doc(html_root_url = "https://docs.rs/party-planner/0.0.3")]
#![warn(clippy::pedantic)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod action;
pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod model;
pub mod node;
pub mod render;
pub mod state;
pub mod template;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod fetch;
#[cfg(target_arch = "wasm32")]
pub mod load;

#[cfg(all(target_arch = "wasm32", feature = "app"))]
mod web;

pub use app::App;
pub use error::{Error, Result};
