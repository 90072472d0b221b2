#![allow(dead_code)]

use futures::{
	channel::oneshot,
	executor::LocalPool,
	future::{ready, LocalBoxFuture},
	task::LocalSpawnExt,
	FutureExt,
};
use party_planner::{
	api::{Client, Method, Request, Response, Transport},
	config::Config,
	model::{Guest, Party, PartyId, Rsvp},
	node::{Element, Node},
	render::HeadlessMount,
	App, Error, Result,
};
use serde::Serialize;
use std::{
	cell::RefCell,
	collections::{HashMap, VecDeque},
	rc::Rc,
};

pub const BASE: &str = "http://planner.test/api";
pub const COHORT: &str = "2508";

pub fn config() -> Config {
	Config::new(BASE, COHORT)
}

/// `path` starts with `/`, e.g. `/events/5`.
pub fn url(path: &str) -> String {
	format!("{}/{}{}", BASE, COHORT, path)
}

pub fn party(id: PartyId, name: &str) -> Party {
	Party {
		id,
		name: name.to_owned(),
		description: format!("All about {}", name),
		date: "2025-03-14T18:30:00.000Z".to_owned(),
		location: "HQ".to_owned(),
	}
}

pub fn guest(id: u64, name: &str) -> Guest {
	Guest { id, name: name.to_owned() }
}

pub fn rsvp(guest_id: u64, event_id: PartyId) -> Rsvp {
	Rsvp { guest_id, event_id }
}

pub fn envelope<T: Serialize>(data: T) -> String {
	serde_json::json!({ "data": data }).to_string()
}

pub enum Reply {
	Answer(u16, String),
	Fail,
	Pending(oneshot::Receiver<String>),
}

/// Answers requests from per-route queues of scripted replies. Unscripted requests fail to complete.
#[derive(Clone, Default)]
pub struct FakeTransport(Rc<RefCell<Scripted>>);

#[derive(Default)]
struct Scripted {
	replies: HashMap<(Method, String), VecDeque<Reply>>,
	requests: Vec<Request>,
}

impl FakeTransport {
	pub fn script(&self, method: Method, path: &str, reply: Reply) -> &Self {
		self.0.borrow_mut().replies.entry((method, url(path))).or_default().push_back(reply);
		self
	}

	/// Answers with `200 OK`.
	pub fn reply(&self, method: Method, path: &str, body: impl Into<String>) -> &Self {
		self.status(method, path, 200, body)
	}

	pub fn status(&self, method: Method, path: &str, status: u16, body: impl Into<String>) -> &Self {
		self.script(method, path, Reply::Answer(status, body.into()))
	}

	pub fn fail(&self, method: Method, path: &str) -> &Self {
		self.script(method, path, Reply::Fail)
	}

	/// The returned sender completes the request with `200 OK`.
	pub fn pending(&self, method: Method, path: &str) -> oneshot::Sender<String> {
		let (sender, receiver) = oneshot::channel();
		self.script(method, path, Reply::Pending(receiver));
		sender
	}

	pub fn requests(&self) -> Vec<Request> {
		self.0.borrow().requests.clone()
	}

	/// Method and path (below the cohort) of each request so far.
	pub fn requested(&self) -> Vec<(Method, String)> {
		let prefix = url("");
		self.requests()
			.into_iter()
			.map(|request| (request.method, request.url.trim_start_matches(prefix.as_str()).to_owned()))
			.collect()
	}
}

impl Transport for FakeTransport {
	fn send(&self, request: Request) -> LocalBoxFuture<'_, Result<Response>> {
		let url = request.url.clone();
		let reply = {
			let mut scripted = self.0.borrow_mut();
			scripted.requests.push(request.clone());
			scripted.replies.get_mut(&(request.method, url.clone())).and_then(VecDeque::pop_front)
		};
		let network = move |reason: &str| Error::Network { url, reason: reason.to_owned() };

		match reply {
			Some(Reply::Answer(status, body)) => ready(Ok(Response { status, body })).boxed_local(),
			Some(Reply::Fail) => ready(Err(network("connection refused"))).boxed_local(),
			Some(Reply::Pending(receiver)) => async move {
				let body = receiver.await.map_err(|_| network("cancelled"))?;
				Ok::<_, Error>(Response { status: 200, body })
			}
			.boxed_local(),
			None => ready(Err(network("no reply scripted"))).boxed_local(),
		}
	}
}

pub struct Harness {
	pub pool: LocalPool,
	pub transport: FakeTransport,
	pub mount: HeadlessMount,
	pub app: Rc<App<FakeTransport, HeadlessMount>>,
}

impl Harness {
	pub fn new() -> Self {
		let _ = tracing_subscriber::fmt().with_test_writer().with_max_level(tracing::Level::TRACE).try_init();

		let pool = LocalPool::new();
		let spawner = pool.spawner();
		let transport = FakeTransport::default();
		let mount = HeadlessMount::new();
		let app = App::new(Client::new(transport.clone(), config()), mount.clone(), move |task| {
			spawner.spawn_local(task).expect("Failed to spawn task.");
		});
		Self { pool, transport, mount, app }
	}

	/// Scripts the three initial reads with immediate replies and runs [`App::init`] to completion.
	pub fn loaded(parties: &[Party], rsvps: &[Rsvp], guests: &[Guest]) -> Self {
		let mut harness = Self::new();
		harness
			.transport
			.reply(Method::Get, "/events", envelope(parties))
			.reply(Method::Get, "/rsvps", envelope(rsvps))
			.reply(Method::Get, "/guests", envelope(guests));
		harness.init();
		harness
	}

	pub fn init(&mut self) {
		let app = Rc::clone(&self.app);
		self.pool.run_until(async move { app.init().await });
	}

	/// Starts [`App::init`] as a task without waiting for it.
	pub fn spawn_init(&mut self) {
		let app = Rc::clone(&self.app);
		self.pool.spawner().spawn_local(async move { app.init().await }).expect("Failed to spawn init.");
	}

	/// Runs all tasks until none can make progress.
	pub fn settle(&mut self) {
		self.pool.run_until_stalled();
	}

	/// Visible party names with their `selected` marker, in list order.
	pub fn party_items(&self) -> Vec<(String, bool)> {
		let children = self.mount.children();
		let list = find(&children, |element| element.name == "ul" && element.has_class("parties")).expect("No party list mounted.");
		list.children
			.iter()
			.filter_map(Node::as_element)
			.map(|item| (item.text_content(), item.has_class("selected")))
			.collect()
	}

	/// Whatever the details section currently shows below its heading.
	pub fn details(&self) -> Element {
		let children = self.mount.children();
		let section = find(&children, |element| element.get_attribute("id") == Some("selected")).expect("No details section mounted.");
		section.children.iter().filter_map(Node::as_element).nth(1).cloned().expect("Details section is empty.")
	}
}

pub fn find(nodes: &[Node], mut predicate: impl FnMut(&Element) -> bool) -> Option<Element> {
	nodes.iter().find_map(|node| node.find(&mut predicate).cloned())
}

pub fn find_all(nodes: &[Node], mut predicate: impl FnMut(&Element) -> bool) -> Vec<Element> {
	let mut found = Vec::new();
	for node in nodes {
		node.find_all(&mut predicate, &mut found);
	}
	found.into_iter().cloned().collect()
}
