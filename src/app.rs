//! Event wiring: each user interaction becomes an asynchronous chain of
//! remote call → state mutation → render pass.
//!
//! Remote failures are logged and otherwise swallowed. State and document then stay as they were.

use crate::{
	action::Intent,
	api::{Client, Transport},
	components,
	model::{PartyDraft, PartyId},
	node::Markup,
	render::{Dispatcher, Mount},
	state::{State, Store},
};
use core::cell::{Ref, RefCell};
use futures::future::LocalBoxFuture;
use std::rc::{Rc, Weak};
use tracing::{error, info, instrument, trace, trace_span, warn};

/// Schedules a task on the single-threaded event loop.
pub type Spawner = Box<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// The planner: owns the [`Store`], the [`Client`] and the [`Mount`] and runs every render pass.
pub struct App<T, M> {
	this: Weak<Self>,
	client: Client<T>,
	store: Store,
	mount: RefCell<M>,
	spawner: Spawner,
}

impl<T: Transport + 'static, M: Mount + 'static> App<T, M> {
	/// `spawner` runs tasks for dispatched [`Intent`]s; in the browser, that's [`wasm_bindgen_futures::spawn_local`].
	pub fn new(client: Client<T>, mount: M, spawner: impl Fn(LocalBoxFuture<'static, ()>) + 'static) -> Rc<Self> {
		Rc::new_cyclic(|this| Self {
			this: this.clone(),
			client,
			store: Store::default(),
			mount: RefCell::new(mount),
			spawner: Box::new(spawner),
		})
	}

	/// The current snapshot. Don't hold on to it across an `.await`.
	pub fn state(&self) -> Ref<'_, State> {
		self.store.snapshot()
	}

	/// A handle that schedules each dispatched [`Intent`] as its own task.
	///
	/// Dispatching after the [`App`] was dropped does nothing.
	pub fn dispatcher(&self) -> Dispatcher {
		let this = self.this.clone();
		Dispatcher::new(move |intent| match this.upgrade() {
			Some(app) => {
				let task = Rc::clone(&app).handle(intent);
				(app.spawner)(task);
			}
			None => warn!("Dropped {:?} dispatched after the planner was torn down.", intent),
		})
	}

	/// Runs the chain for one [`Intent`] to completion.
	pub fn handle(self: Rc<Self>, intent: Intent) -> LocalBoxFuture<'static, ()> {
		Box::pin(async move {
			match intent {
				Intent::Select(id) => self.select_party(id).await,
				Intent::Delete(id) => self.delete_party(id).await,
				Intent::Create(draft) => self.create_party(draft).await,
			}
		})
	}

	/// Fetches parties, RSVPs and guests one after the other, then renders once more.
	///
	/// Each successful fetch renders on its own, so the first passes may show partial data.
	#[instrument(skip(self))]
	pub async fn init(&self) {
		self.load_parties().await;
		self.load_rsvps().await;
		self.load_guests().await;
		self.render();
	}

	#[instrument(skip(self))]
	pub async fn load_parties(&self) {
		match self.client.list_parties().await {
			Ok(parties) => {
				info!("Fetched {} parties.", parties.len());
				self.store.update(|state| state.replace_parties(parties));
				self.render();
			}
			Err(error) => error!("Failed to fetch parties: {}", error),
		}
	}

	/// Selects the party with `id`, as currently known to the server.
	#[instrument(skip(self))]
	pub async fn select_party(&self, id: PartyId) {
		match self.client.get_party(id).await {
			Ok(party) => {
				if cfg!(feature = "dangerous-logging") {
					trace!("Selected {:?}.", party);
				}
				self.store.update(|state| state.select(party));
				self.render();
			}
			Err(error) => error!("Failed to fetch party {}: {}", id, error),
		}
	}

	#[instrument(skip(self))]
	pub async fn load_rsvps(&self) {
		match self.client.list_rsvps().await {
			Ok(rsvps) => {
				info!("Fetched {} RSVPs.", rsvps.len());
				self.store.update(|state| state.replace_rsvps(rsvps));
				self.render();
			}
			Err(error) => error!("Failed to fetch RSVPs: {}", error),
		}
	}

	#[instrument(skip(self))]
	pub async fn load_guests(&self) {
		match self.client.list_guests().await {
			Ok(guests) => {
				info!("Fetched {} guests.", guests.len());
				self.store.update(|state| state.replace_guests(guests));
				self.render();
			}
			Err(error) => error!("Failed to fetch guests: {}", error),
		}
	}

	/// Creates a party and refetches the party list. The new party is never inserted locally.
	#[instrument(skip(self, draft))]
	pub async fn create_party(&self, draft: PartyDraft) {
		let new_party = match draft.into_new_party() {
			Ok(new_party) => new_party,
			Err(error) => return error!("Not creating party: {}", error),
		};

		match self.client.create_party(&new_party).await {
			Ok(()) => self.load_parties().await,
			Err(error) => error!("Failed to create party: {}", error),
		}
	}

	/// Deletes a party, clears the selection (whichever party it was), renders and refetches the party list.
	#[instrument(skip(self))]
	pub async fn delete_party(&self, id: PartyId) {
		match self.client.delete_party(id).await {
			Ok(()) => {
				self.store.update(State::clear_selection);
				self.render();
				self.load_parties().await;
			}
			Err(error) => error!("Failed to delete party {}: {}", id, error),
		}
	}

	/// Rebuilds the whole tree from the current state and swaps it into the mount.
	///
	/// If building fails, the previous tree stays in place.
	pub fn render(&self) {
		let span = trace_span!("render");
		let _enter = span.enter();

		let children = {
			let state = self.store.snapshot();
			components::app(&state)
		};
		let children = match children {
			Ok(children) => children,
			Err(error) => return error!("Failed to build the component tree, keeping the previous one: {}", error),
		};
		if cfg!(feature = "dangerous-logging") {
			trace!("Rendering {}", Markup(&children));
		}

		match self.mount.try_borrow_mut() {
			Ok(mut mount) => mount.replace_children(&children, &self.dispatcher()),
			Err(_) => error!("Render pass requested while mounting another. Skipping."),
		}
	}
}
