//! Event subscription with per-type fan-out, one-shot wrappers and delegation.
//!
//! Every attached [`Listener`] is recorded in a thread-local registry together with the `(node, type)` pairs it's
//! subscribed to. This keeps its JavaScript closure alive while attached, even if the caller drops its handle, and
//! releases it once the last subscription is removed, either through [`Collection::off`] or because the node was
//! removed with [`Collection::remove`] or [`Collection::empty`].

use crate::collection::Collection;
use core::{
	cell::{Cell, RefCell},
	fmt::{self, Debug, Formatter},
};
use hashbrown::HashMap;
use js_sys::Function;
use std::rc::Rc;
use tracing::{error, instrument, trace, trace_span, warn};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Event, Node};

type ListenerId = u64;

struct Subscriptions {
	listener: Listener,
	targets: Vec<(Node, String)>,
}

thread_local! {
	static NEXT_ID: Cell<ListenerId> = Cell::new(0);
	static DISPATCH_DEPTH: Cell<usize> = Cell::new(0);
	static SUBSCRIPTIONS: RefCell<HashMap<ListenerId, Subscriptions>> = RefCell::new(HashMap::new());
}

fn next_id() -> ListenerId {
	NEXT_ID.with(|next| {
		let id = next.get();
		next.set(id + 1);
		id
	})
}

/// Marks a listener invocation in progress, so that closures aren't freed while they run.
struct Dispatching;

impl Dispatching {
	fn enter() -> Self {
		DISPATCH_DEPTH.with(|depth| depth.set(depth.get() + 1));
		Self
	}
}

impl Drop for Dispatching {
	fn drop(&mut self) {
		DISPATCH_DEPTH.with(|depth| depth.set(depth.get() - 1));
	}
}

/// An event handler that can be attached to and detached from any number of nodes.
///
/// Clones share the same underlying closure, so any clone can be used with [`Collection::off`].
#[derive(Clone)]
pub struct Listener(Rc<ListenerInner>);

struct ListenerInner {
	id: ListenerId,
	capture: bool,
	closure: Closure<dyn Fn(Event)>,
}

impl Debug for Listener {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Listener").field("id", &self.0.id).field("capture", &self.0.capture).finish()
	}
}

/// Same underlying closure.
impl PartialEq for Listener {
	fn eq(&self, other: &Self) -> bool {
		self.0.id == other.0.id
	}
}

impl Eq for Listener {}

impl Listener {
	/// A bubbling-phase listener.
	pub fn new(handler: impl 'static + FnMut(Event)) -> Self {
		Self::with_id(next_id(), false, handler)
	}

	/// A capture-phase listener.
	pub fn capturing(handler: impl 'static + FnMut(Event)) -> Self {
		Self::with_id(next_id(), true, handler)
	}

	fn with_id(id: ListenerId, capture: bool, handler: impl 'static + FnMut(Event)) -> Self {
		let handler = RefCell::new(handler);
		let closure = Closure::wrap(Box::new(move |event: Event| {
			let _dispatching = Dispatching::enter();
			let span = trace_span!("Listener", id, event_type = %event.type_());
			let _enter = span.enter();

			match handler.try_borrow_mut() {
				Ok(mut handler) => (&mut *handler)(event),
				Err(_) => error!("Listener {} was invoked re-entrantly. Skipping this call.", id),
			}
		}) as Box<dyn Fn(Event)>);
		Self(Rc::new(ListenerInner { id, capture, closure }))
	}

	#[must_use]
	pub fn id(&self) -> u64 {
		self.0.id
	}

	#[must_use]
	pub fn is_capturing(&self) -> bool {
		self.0.capture
	}

	/// How many `(node, type)` pairs this listener is currently attached to.
	#[must_use]
	pub fn subscriptions(&self) -> usize {
		SUBSCRIPTIONS.with(|subscriptions| subscriptions.borrow().get(&self.0.id).map_or(0, |entry| entry.targets.len()))
	}

	fn function(&self) -> &Function {
		self.0.closure.as_ref().unchecked_ref()
	}
}

fn subscribe(listener: &Listener, node: &Node, event_type: &str) {
	SUBSCRIPTIONS.with(|subscriptions| {
		let mut subscriptions = subscriptions.borrow_mut();
		let entry = subscriptions.entry(listener.id()).or_insert_with(|| Subscriptions {
			listener: listener.clone(),
			targets: Vec::new(),
		});
		if !entry.targets.iter().any(|(target, target_type)| target == node && target_type == event_type) {
			entry.targets.push((node.clone(), event_type.to_owned()))
		}
	})
}

fn unsubscribe(id: ListenerId, node: &Node, event_type: &str) {
	let released = SUBSCRIPTIONS.with(|subscriptions| {
		let mut subscriptions = subscriptions.borrow_mut();
		let entry = subscriptions.get_mut(&id)?;
		entry.targets.retain(|(target, target_type)| !(target == node && target_type == event_type));
		if entry.targets.is_empty() {
			subscriptions.remove(&id).map(|entry| entry.listener)
		} else {
			None
		}
	});

	// Dropped outside the registry borrow.
	if let Some(listener) = released {
		release(listener)
	}
}

/// How many listeners are currently attached anywhere.
#[must_use]
pub fn attached_listeners() -> usize {
	SUBSCRIPTIONS.with(|subscriptions| subscriptions.borrow().len())
}

fn detach(listener: &Listener, node: &Node, event_type: &str) {
	if let Err(error) = node.remove_event_listener_with_callback_and_bool(event_type, listener.function(), listener.is_capturing()) {
		error!("Failed to remove {:?} listener: {:?}", event_type, error)
	}
	unsubscribe(listener.id(), node, event_type)
}

/// Detaches every listener from `removed` and their descendants.
pub(crate) fn release_subtrees(removed: &Collection) {
	if removed.is_empty() || attached_listeners() == 0 {
		return;
	}

	let detached: Vec<(Listener, Node, String)> = SUBSCRIPTIONS.with(|subscriptions| {
		subscriptions
			.borrow()
			.values()
			.flat_map(|entry| {
				entry
					.targets
					.iter()
					.filter(|(target, _)| removed.iter().any(|root| root.contains(Some(target))))
					.map(move |(target, event_type)| (entry.listener.clone(), target.clone(), event_type.clone()))
			})
			.collect()
	});

	if !detached.is_empty() {
		trace!("Detaching {} subscription(s) from removed nodes.", detached.len());
	}
	for (listener, node, event_type) in detached {
		detach(&listener, &node, &event_type)
	}
}

fn registered(id: ListenerId) -> Option<Listener> {
	SUBSCRIPTIONS.with(|subscriptions| subscriptions.borrow().get(&id).map(|entry| entry.listener.clone()))
}

/// Drops the registry's handle, deferring to a fresh task if any listener is running right now.
fn release(listener: Listener) {
	if DISPATCH_DEPTH.with(Cell::get) == 0 {
		return drop(listener);
	}

	trace!("Deferring release of listener {} until dispatch completes.", listener.id());
	let deferred = Closure::once_into_js(move || drop(listener));
	match web_sys::window() {
		Some(window) => {
			if let Err(error) = window.set_timeout_with_callback(deferred.unchecked_ref()) {
				error!("Failed to schedule listener release, leaking it: {:?}", error)
			}
		}
		None => warn!("No window to schedule listener release on, leaking it."),
	}
}

fn call_shared<H: FnMut(&Collection, Event)>(handler: &RefCell<H>, collection: &Collection, event: Event) {
	match handler.try_borrow_mut() {
		Ok(mut handler) => (&mut *handler)(collection, event),
		Err(_) => error!("One-shot handler was invoked re-entrantly. Skipping this call."),
	}
}

/// The nodes from the event's target up to, but excluding, the node that is listening. Nearest first.
fn delegation_path(template: &Collection, event: &Event) -> Collection {
	let current: Option<Node> = event.current_target().and_then(|target| target.dyn_into().ok());
	let mut path = Vec::new();
	let mut next: Option<Node> = event.target().and_then(|target| target.dyn_into().ok());
	while let Some(node) = next {
		if Some(&node) == current.as_ref() {
			break;
		}
		next = node.parent_node();
		path.push(node);
	}
	Collection::from_unique(Rc::clone(template.host()), path)
}

impl Collection {
	/// Attaches `listener` to every node, once for each whitespace-separated event type in `types`.
	#[instrument]
	pub fn on(&self, types: &str, listener: &Listener) -> &Self {
		for node in self {
			for event_type in types.split_whitespace() {
				match node.add_event_listener_with_callback_and_bool(event_type, listener.function(), listener.is_capturing()) {
					Ok(()) => subscribe(listener, node, event_type),
					Err(error) => error!("Failed to add {:?} listener: {:?}", event_type, error),
				}
			}
		}
		self
	}

	/// Detaches `listener` from every node, for each whitespace-separated event type in `types`.
	#[instrument]
	pub fn off(&self, types: &str, listener: &Listener) -> &Self {
		for node in self {
			for event_type in types.split_whitespace() {
				detach(listener, node, event_type)
			}
		}
		self
	}

	/// Calls `handler` at most once per event type, whichever node the event fires on.
	///
	/// The first event of a type detaches that type's wrapper from every node of this collection before `handler`
	/// runs, and `handler` receives this whole collection.
	pub fn one<H: 'static + FnMut(&Collection, Event)>(&self, types: &str, handler: H) -> &Self {
		self.one_in_phase(types, false, handler)
	}

	/// [`Collection::one`] in the capture phase.
	pub fn one_capturing<H: 'static + FnMut(&Collection, Event)>(&self, types: &str, handler: H) -> &Self {
		self.one_in_phase(types, true, handler)
	}

	#[instrument(skip(handler))]
	fn one_in_phase<H: 'static + FnMut(&Collection, Event)>(&self, types: &str, capture: bool, handler: H) -> &Self {
		let handler = Rc::new(RefCell::new(handler));
		for event_type in types.split_whitespace() {
			let id = next_id();
			let listening = self.clone();
			let handler = Rc::clone(&handler);
			let own_type = event_type.to_owned();
			let listener = Listener::with_id(id, capture, move |event| {
				if let Some(listener) = registered(id) {
					listening.off(&own_type, &listener);
				}
				call_shared(&handler, &listening, event)
			});
			self.on(event_type, &listener);
		}
		self
	}

	/// Like [`Collection::one`], but once per node: each node's first event of a type calls `handler` with just that node.
	pub fn one_each<H: 'static + FnMut(&Collection, Event)>(&self, types: &str, handler: H) -> &Self {
		self.one_each_in_phase(types, false, handler)
	}

	/// [`Collection::one_each`] in the capture phase.
	pub fn one_each_capturing<H: 'static + FnMut(&Collection, Event)>(&self, types: &str, handler: H) -> &Self {
		self.one_each_in_phase(types, true, handler)
	}

	#[instrument(skip(handler))]
	fn one_each_in_phase<H: 'static + FnMut(&Collection, Event)>(&self, types: &str, capture: bool, handler: H) -> &Self {
		let handler = Rc::new(RefCell::new(handler));
		for node in self {
			let handler = Rc::clone(&handler);
			self.single(node.clone()).one_in_phase(types, capture, move |node, event| call_shared(&handler, node, event));
		}
		self
	}

	/// Handles events on behalf of descendants matching `selector`.
	///
	/// `handler` receives the matching node nearest to the event's target. Events without a match in the path up to
	/// the listening node are ignored. The returned [`Listener`] can be passed to [`Collection::off`].
	#[instrument(skip(handler))]
	pub fn delegate<H: 'static + FnMut(&Collection, Event)>(&self, types: &str, selector: &str, mut handler: H) -> Listener {
		let template = self.empty_like();
		let selector = selector.to_owned();
		let listener = Listener::new(move |event| match delegation_path(&template, &event).filter(&selector) {
			Ok(matched) => {
				let nearest = matched.first();
				if !nearest.is_empty() {
					handler(&nearest, event)
				}
			}
			Err(error) => error!("Delegation selector {:?} failed: {:?}", selector, error),
		});
		self.on(types, &listener);
		listener
	}
}
