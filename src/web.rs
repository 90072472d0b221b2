use crate::{api::Client, app::App, config::Config, dom::DomMount, fetch::FetchTransport};
use tracing::error;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;

/// Mounts the planner onto the [`Config::mount_selector`] element and starts the initial load.
///
/// Since this is marked `#[wasm_bindgen(start)]` it is automatically invoked once the wasm module is instantiated on the Web page.
#[wasm_bindgen(start)]
pub fn start() {
	tracing_wasm::set_as_global_default();

	let config = Config::default();
	let root = web_sys::window()
		.and_then(|window| window.document())
		.and_then(|document| document.query_selector(&config.mount_selector).ok().flatten());
	let root = match root {
		Some(root) => root,
		None => return error!("No element matches {:?}. Nothing to mount onto.", config.mount_selector),
	};

	let app = App::new(Client::new(FetchTransport, config), DomMount::new_for_element_child_nodes(root), |task| spawn_local(task));
	spawn_local(async move { app.init().await });
}
