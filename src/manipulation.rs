//! Insertion, removal, cloning and duplication.
//!
//! Content to insert is resolved once per call. Inserting the same nodes into several targets therefore moves them,
//! and only the last target keeps them. Newly created elements behave the same way.

use crate::{collection::Collection, content::Content, events};
use tracing::{error, instrument, trace, trace_span};
use web_sys::Node;

impl Collection {
	/// Detaches every node from its parent. Detached nodes stay where they are.
	///
	/// Listeners attached through [`Collection::on`] and its relatives to these nodes or their descendants are
	/// detached as well, so removed subtrees aren't kept alive by the event registry.
	#[instrument]
	pub fn remove(&self) -> &Self {
		events::release_subtrees(self);
		for node in self {
			if let Some(parent) = node.parent_node() {
				if let Err(error) = parent.remove_child(node) {
					error!("Failed to remove node: {:?}", error)
				}
			}
		}
		self
	}

	/// Removes all child nodes of every node.
	#[instrument]
	pub fn empty(&self) -> &Self {
		self.children().remove();
		self
	}

	/// Appends `content` as last children of every node.
	#[instrument(skip(content))]
	pub fn append(&self, content: impl Into<Content>) -> &Self {
		let children = self.host().create(content);
		for target in self {
			let span = trace_span!("Appending", count = children.len());
			let _enter = span.enter();
			for child in &children {
				if let Err(error) = target.append_child(child) {
					error!("Failed to append node: {:?}", error)
				}
			}
		}
		self
	}

	/// Appends every node to `target`.
	pub fn append_to(&self, target: impl Into<Content>) -> &Self {
		self.host().create(target).append(self);
		self
	}

	/// Resolves `content`, appends it to every node and returns it.
	pub fn child(&self, content: impl Into<Content>) -> Collection {
		let children = self.host().create(content);
		self.append(&children);
		children
	}

	/// Inserts `content` before the first child of every node, keeping its order.
	#[instrument(skip(content))]
	pub fn prepend(&self, content: impl Into<Content>) -> &Self {
		let children = self.host().create(content);
		for target in self {
			let first = target.first_child();
			for child in &children {
				if let Err(error) = target.insert_before(child, first.as_ref()) {
					error!("Failed to prepend node: {:?}", error)
				}
			}
		}
		self
	}

	/// Prepends every node to `target`.
	pub fn prepend_to(&self, target: impl Into<Content>) -> &Self {
		self.host().create(target).prepend(self);
		self
	}

	/// Inserts `content` as previous siblings of every node. Nodes without a parent are skipped.
	#[instrument(skip(content))]
	pub fn before(&self, content: impl Into<Content>) -> &Self {
		let siblings = self.host().create(content);
		for target in self {
			insert_siblings(target, &siblings, Some(target));
		}
		self
	}

	/// Inserts `content` as next siblings of every node, keeping its order. Nodes without a parent are skipped.
	#[instrument(skip(content))]
	pub fn after(&self, content: impl Into<Content>) -> &Self {
		let siblings = self.host().create(content);
		for target in self {
			let next = target.next_sibling();
			insert_siblings(target, &siblings, next.as_ref());
		}
		self
	}

	/// Inserts every node before `target`.
	pub fn insert_before(&self, target: impl Into<Content>) -> &Self {
		self.host().create(target).before(self);
		self
	}

	/// Inserts every node after `target`.
	pub fn insert_after(&self, target: impl Into<Content>) -> &Self {
		self.host().create(target).after(self);
		self
	}

	/// Detached copies of every node, with their subtrees if `deep`.
	#[must_use]
	pub fn clone_nodes(&self, deep: bool) -> Collection {
		let mut clones = self.empty_like();
		for node in self {
			match node.clone_node_with_deep(deep) {
				Ok(clone) => {
					clones.push(clone);
				}
				Err(error) => error!("Failed to clone node: {:?}", error),
			}
		}
		clones
	}

	/// Inserts `repeats` deep copies of every node right after it and adds them to this collection.
	///
	/// A collection of `k` nodes grows to `k * (repeats + 1)`. Copies of detached nodes stay detached.
	#[instrument]
	pub fn duplicate(&mut self, repeats: usize) -> &mut Self {
		if repeats == 0 {
			return self;
		}
		let mut duplicates = self.empty_like();
		for node in self.iter() {
			let source = self.single(node.clone());
			let mut copies = self.empty_like();
			for _ in 0..repeats {
				copies.push(source.clone_nodes(true));
			}
			source.after(&copies);
			duplicates.push(copies);
		}
		self.push(duplicates)
	}
}

fn insert_siblings(target: &Node, siblings: &Collection, reference: Option<&Node>) {
	let parent = match target.parent_node() {
		Some(parent) => parent,
		None => return trace!("Target has no parent; nothing to insert next to."),
	};
	for sibling in siblings {
		if let Err(error) = parent.insert_before(sibling, reference) {
			error!("Failed to insert sibling: {:?}", error)
		}
	}
}
