use crate::{
	api::{Request, Response, Transport},
	error::{Error, Result},
};
use futures::future::LocalBoxFuture;
use tracing::{instrument, trace};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// [`Transport`] over the browser's [***fetch***](https://developer.mozilla.org/en-US/docs/Web/API/fetch).
///
/// Like ***fetch*** itself, this only fails if no response arrives. HTTP error statuses are passed on.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

impl Transport for FetchTransport {
	fn send(&self, request: Request) -> LocalBoxFuture<'_, Result<Response>> {
		Box::pin(fetch(request))
	}
}

#[instrument(skip(request), fields(method = %request.method, url = %request.url))]
async fn fetch(request: Request) -> Result<Response> {
	let Request { method, url, body } = request;
	let network = |reason: String| Error::Network { url: url.clone(), reason };

	let window = web_sys::window().ok_or_else(|| network("no `window` in this context".to_owned()))?;

	let init = web_sys::RequestInit::new();
	init.set_method(method.as_str());
	if let Some(body) = &body {
		let headers = web_sys::Headers::new().map_err(|error| network(describe(&error)))?;
		headers.set("Content-Type", "application/json").map_err(|error| network(describe(&error)))?;
		init.set_headers(&headers);
		init.set_body(&JsValue::from_str(body));
	}

	let js_request = web_sys::Request::new_with_str_and_init(&url, &init).map_err(|error| network(describe(&error)))?;
	let response = JsFuture::from(window.fetch_with_request(&js_request)).await.map_err(|error| network(describe(&error)))?;
	let response = response.dyn_into::<web_sys::Response>().map_err(|value| network(format!("fetch resolved to a non-`Response`: {:?}", value)))?;
	let status = response.status();
	trace!("{} {} → {}", method, url, status);

	let text = response.text().map_err(|error| network(describe(&error)))?;
	let text = JsFuture::from(text).await.map_err(|error| network(describe(&error)))?;
	let body = text.as_string().ok_or_else(|| network("response body is not text".to_owned()))?;
	Ok(Response { status, body })
}

fn describe(error: &JsValue) -> String {
	error.dyn_ref::<js_sys::Error>().map_or_else(|| format!("{:?}", error), |error| String::from(error.message()))
}
