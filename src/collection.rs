//! The ordered, identity-deduplicated node container every operation works on.

use crate::{
	content::{self, Content, Placement},
	host::Host,
};
use core::{
	cmp::Ordering,
	fmt::{self, Debug, Formatter},
	ops::{Bound, RangeBounds},
	slice,
};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, Node};

/// An ordered set of [`Node`] handles with chainable operations.
///
/// No two entries are the same node (by JS identity). Operations that produce nodes return a new [`Collection`],
/// never a view into another one's storage. Cloning a [`Collection`] clones handles, not DOM nodes.
///
/// Every operation on an empty collection is a no-op, so calls can be chained without checks.
#[derive(Clone)]
pub struct Collection {
	host: Rc<Host>,
	nodes: Vec<Node>,
}

impl Debug for Collection {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Collection").field("len", &self.nodes.len()).finish()
	}
}

/// Same nodes, same order.
impl PartialEq for Collection {
	fn eq(&self, other: &Self) -> bool {
		self.nodes == other.nodes
	}
}

impl Eq for Collection {}

impl Collection {
	#[must_use]
	pub fn new(host: Rc<Host>) -> Self {
		Self { host, nodes: Vec::new() }
	}

	/// Normalizes `content` into a new collection.
	#[must_use]
	pub fn from_content(host: Rc<Host>, content: impl Into<Content>) -> Self {
		let mut collection = Self::new(host);
		collection.push(content);
		collection
	}

	/// A collection over `nodes`, which must already be free of duplicates.
	pub(crate) fn from_unique(host: Rc<Host>, nodes: Vec<Node>) -> Self {
		debug_assert!(nodes.iter().enumerate().all(|(i, node)| !nodes[..i].contains(node)));
		Self { host, nodes }
	}

	/// A new, empty collection on the same host.
	#[must_use]
	pub fn empty_like(&self) -> Self {
		Self::new(Rc::clone(&self.host))
	}

	pub(crate) fn single(&self, node: Node) -> Self {
		Self::from_unique(Rc::clone(&self.host), vec![node])
	}

	#[must_use]
	pub fn host(&self) -> &Rc<Host> {
		&self.host
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	#[must_use]
	pub fn get(&self, index: usize) -> Option<&Node> {
		self.nodes.get(index)
	}

	pub fn iter(&self) -> slice::Iter<'_, Node> {
		self.nodes.iter()
	}

	#[must_use]
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	#[must_use]
	pub fn to_vec(&self) -> Vec<Node> {
		self.nodes.clone()
	}

	#[must_use]
	pub fn into_nodes(self) -> Vec<Node> {
		self.nodes
	}

	/// The element entries together with their index in the collection.
	///
	/// Other node kinds (documents, text) are skipped but still count towards the index.
	pub fn elements(&self) -> impl Iterator<Item = (usize, &Element)> {
		self.nodes.iter().enumerate().filter_map(|(i, node)| node.dyn_ref::<Element>().map(|element| (i, element)))
	}

	/// The node at `index` as a collection. Negative indices count back from the end.
	#[must_use]
	pub fn at(&self, index: isize) -> Self {
		let index = if index < 0 { self.nodes.len().checked_sub(index.unsigned_abs()) } else { Some(index.unsigned_abs()) };
		match index.and_then(|index| self.nodes.get(index)) {
			Some(node) => self.single(node.clone()),
			None => self.empty_like(),
		}
	}

	#[must_use]
	pub fn first(&self) -> Self {
		self.at(0)
	}

	#[must_use]
	pub fn last(&self) -> Self {
		self.at(-1)
	}

	/// Adds content at the end, skipping nodes that are already present.
	pub fn push(&mut self, content: impl Into<Content>) -> &mut Self {
		content::normalize(&self.host, content.into(), &mut self.nodes, Placement::Push);
		self
	}

	/// Adds content at the front, skipping nodes that are already present.
	pub fn unshift(&mut self, content: impl Into<Content>) -> &mut Self {
		content::normalize(&self.host, content.into(), &mut self.nodes, Placement::Unshift);
		self
	}

	/// Removes the last node, returning it as a collection.
	pub fn pop(&mut self) -> Self {
		let popped = self.nodes.pop();
		Self::from_unique(Rc::clone(&self.host), popped.into_iter().collect())
	}

	/// Removes the first node, returning it as a collection.
	pub fn shift(&mut self) -> Self {
		if self.nodes.is_empty() {
			self.empty_like()
		} else {
			let shifted = self.nodes.remove(0);
			self.single(shifted)
		}
	}

	/// The nodes in `range` as a new collection. Out-of-bounds ranges are clamped.
	#[must_use]
	pub fn slice(&self, range: impl RangeBounds<usize>) -> Self {
		let len = self.nodes.len();
		let start = match range.start_bound() {
			Bound::Included(&start) => start,
			Bound::Excluded(&start) => start.saturating_add(1),
			Bound::Unbounded => 0,
		}
		.min(len);
		let end = match range.end_bound() {
			Bound::Included(&end) => end.saturating_add(1),
			Bound::Excluded(&end) => end,
			Bound::Unbounded => len,
		}
		.min(len)
		.max(start);
		Self::from_unique(Rc::clone(&self.host), self.nodes[start..end].to_vec())
	}

	pub fn reverse(&mut self) -> &mut Self {
		self.nodes.reverse();
		self
	}

	pub fn sort_by(&mut self, compare: impl FnMut(&Node, &Node) -> Ordering) -> &mut Self {
		self.nodes.sort_by(compare);
		self
	}

	/// Calls `f` with each node and its index.
	pub fn each(&self, mut f: impl FnMut(&Node, usize)) -> &Self {
		for (i, node) in self.nodes.iter().enumerate() {
			f(node, i)
		}
		self
	}

	/// Collects the content returned for each node into a new collection.
	#[must_use]
	pub fn map<C: Into<Content>>(&self, mut f: impl FnMut(&Node, usize) -> C) -> Self {
		let mut mapped = self.empty_like();
		for (i, node) in self.nodes.iter().enumerate() {
			mapped.push(f(node, i));
		}
		mapped
	}

	pub fn some(&self, mut predicate: impl FnMut(&Node, usize) -> bool) -> bool {
		self.nodes.iter().enumerate().any(|(i, node)| predicate(node, i))
	}

	pub fn every(&self, mut predicate: impl FnMut(&Node, usize) -> bool) -> bool {
		self.nodes.iter().enumerate().all(|(i, node)| predicate(node, i))
	}

	/// The nodes for which `predicate` holds, as a new collection.
	///
	/// See [`Collection::filter`] for filtering by selector.
	#[must_use]
	pub fn select(&self, mut predicate: impl FnMut(&Node, usize) -> bool) -> Self {
		let selected = self.nodes.iter().enumerate().filter(|(i, node)| predicate(node, *i)).map(|(_, node)| node.clone()).collect();
		Self::from_unique(Rc::clone(&self.host), selected)
	}

	#[must_use]
	pub fn index_of(&self, node: &Node) -> Option<usize> {
		self.nodes.iter().position(|candidate| candidate == node)
	}

	#[must_use]
	pub fn contains(&self, node: &Node) -> bool {
		self.index_of(node).is_some()
	}
}

impl<'a> IntoIterator for &'a Collection {
	type Item = &'a Node;
	type IntoIter = slice::Iter<'a, Node>;

	fn into_iter(self) -> Self::IntoIter {
		self.nodes.iter()
	}
}

impl IntoIterator for Collection {
	type Item = Node;
	type IntoIter = std::vec::IntoIter<Node>;

	fn into_iter(self) -> Self::IntoIter {
		self.nodes.into_iter()
	}
}
