//! Selector matching that also works on detached nodes.
//!
//! Host selector queries only run under a queryable root, so each node is matched by querying its topmost ancestor
//! and checking membership in the result. Queries are cached per ancestor for the duration of one call.
//! A node without any ancestor is deep-cloned into a throwaway container and matched there instead.

use crate::{collection::Collection, host::query_nodes};
use std::rc::Rc;
use tracing::{error, instrument, trace};
use wasm_bindgen::JsValue;
use web_sys::Node;

/// How a batch of nodes is matched against a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
	/// `true` on the first match.
	Any,
	/// `false` on the first node that doesn't match.
	All,
	/// Collects every matching node, in source order.
	Filter,
}

/// The outcome of [`match_selector`], shaped by the [`Behavior`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matched {
	Bool(bool),
	Filtered(Collection),
}

/// `(ancestor → query result)` pairs, keyed by ancestor identity. Lives for exactly one matching call.
#[derive(Debug, Default)]
pub struct MatchCache {
	entries: Vec<(Node, Collection)>,
	misses: usize,
}

impl MatchCache {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// The query result for `selector` under `ancestor`, running the query only on the first request for `ancestor`.
	///
	/// # Errors
	///
	/// Errors from the host's selector query are returned as-is.
	pub fn resolve(&mut self, source: &Collection, ancestor: &Node, selector: &str) -> Result<&Collection, JsValue> {
		let index = match self.entries.iter().position(|(cached, _)| cached == ancestor) {
			Some(index) => index,
			None => {
				self.misses += 1;
				let found = query_nodes(ancestor, selector)?;
				self.entries.push((ancestor.clone(), Collection::from_unique(Rc::clone(source.host()), found)));
				self.entries.len() - 1
			}
		};
		Ok(&self.entries[index].1)
	}

	/// How many queries were actually run.
	#[must_use]
	pub fn misses(&self) -> usize {
		self.misses
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// The topmost ancestor of `node`, which is the document for attached nodes.
fn topmost_ancestor(node: &Node) -> Option<Node> {
	let mut ancestor = node.parent_node()?;
	while let Some(parent) = ancestor.parent_node() {
		ancestor = parent;
	}
	Some(ancestor)
}

/// Matches a detached node by grafting a deep clone of it under a throwaway `<g>`.
fn matches_detached(collection: &Collection, node: &Node, selector: &str) -> Result<bool, JsValue> {
	let clone = match node.clone_node_with_deep(true) {
		Ok(clone) => clone,
		Err(error) => {
			error!("Could not clone detached node for matching: {:?}", error);
			return Ok(false);
		}
	};
	let container = match collection.host().make("g") {
		Some(container) => container,
		None => return Ok(false),
	};
	if let Err(error) = container.append_child(&clone) {
		error!("Could not graft detached node for matching: {:?}", error);
		return Ok(false);
	}
	Ok(query_nodes(container.as_ref(), selector)?.contains(&clone))
}

/// Matches every node of `collection` against `selector` with one call-scoped [`MatchCache`].
///
/// # Errors
///
/// Errors from the host's selector query are returned as-is.
#[instrument]
pub fn match_selector(collection: &Collection, selector: &str, behavior: Behavior) -> Result<Matched, JsValue> {
	let mut cache = MatchCache::new();
	let mut filtered = Vec::new();

	for node in collection {
		let is_match = match topmost_ancestor(node) {
			Some(ancestor) => cache.resolve(collection, &ancestor, selector)?.contains(node),
			None => matches_detached(collection, node, selector)?,
		};

		match (behavior, is_match) {
			(Behavior::Any, true) => return Ok(Matched::Bool(true)),
			(Behavior::All, false) => return Ok(Matched::Bool(false)),
			(Behavior::Filter, true) => filtered.push(node.clone()),
			_ => (),
		}
	}

	trace!("Ran {} queries for {} node(s).", cache.misses(), collection.len());
	Ok(match behavior {
		Behavior::Any => Matched::Bool(false),
		Behavior::All => Matched::Bool(true),
		Behavior::Filter => Matched::Filtered(Collection::from_unique(Rc::clone(collection.host()), filtered)),
	})
}

impl Collection {
	/// Whether any node matches `selector`.
	///
	/// # Errors
	///
	/// Errors from the host's selector query are returned as-is.
	pub fn is(&self, selector: &str) -> Result<bool, JsValue> {
		self.some_match(selector)
	}

	/// Whether any node matches `selector`.
	///
	/// # Errors
	///
	/// Errors from the host's selector query are returned as-is.
	pub fn some_match(&self, selector: &str) -> Result<bool, JsValue> {
		match match_selector(self, selector, Behavior::Any)? {
			Matched::Bool(any) => Ok(any),
			Matched::Filtered(filtered) => Ok(!filtered.is_empty()),
		}
	}

	/// Whether every node matches `selector`. `true` for an empty collection.
	///
	/// # Errors
	///
	/// Errors from the host's selector query are returned as-is.
	pub fn every_match(&self, selector: &str) -> Result<bool, JsValue> {
		match match_selector(self, selector, Behavior::All)? {
			Matched::Bool(all) => Ok(all),
			Matched::Filtered(filtered) => Ok(filtered.len() == self.len()),
		}
	}

	/// The nodes matching `selector`, in their current order.
	///
	/// # Errors
	///
	/// Errors from the host's selector query are returned as-is.
	pub fn filter(&self, selector: &str) -> Result<Collection, JsValue> {
		match match_selector(self, selector, Behavior::Filter)? {
			Matched::Filtered(filtered) => Ok(filtered),
			Matched::Bool(_) => Ok(self.empty_like()),
		}
	}
}
