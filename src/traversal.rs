//! A generic relation walker and the named shortcuts built on it.

use crate::{collection::Collection, host::query_nodes};
use std::rc::Rc;
use tracing::{instrument, trace_span};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Node, NodeList, SvgElement};

/// A tree relation that can be followed from a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
	/// All child nodes. Multi-valued, so it never chains.
	ChildNodes,
	FirstChild,
	LastChild,
	PreviousElementSibling,
	NextElementSibling,
	ViewportElement,
	OwnerSvgElement,
	ParentNode,
}

/// What a single hop along a [`Relation`] reached.
enum Hop {
	None,
	One(Node),
	Many(NodeList),
}

impl Relation {
	fn hop(self, node: &Node) -> Hop {
		let one = |node: Option<Node>| node.map_or(Hop::None, Hop::One);
		match self {
			Self::ChildNodes => Hop::Many(node.child_nodes()),
			Self::FirstChild => one(node.first_child()),
			Self::LastChild => one(node.last_child()),
			Self::PreviousElementSibling => one(node.dyn_ref::<Element>().and_then(Element::previous_element_sibling).map(Into::into)),
			Self::NextElementSibling => one(node.dyn_ref::<Element>().and_then(Element::next_element_sibling).map(Into::into)),
			Self::ViewportElement => one(node.dyn_ref::<SvgElement>().and_then(SvgElement::viewport_element).map(Into::into)),
			Self::OwnerSvgElement => one(node.dyn_ref::<SvgElement>().and_then(SvgElement::owner_svg_element).map(Into::into)),
			Self::ParentNode => one(node.parent_node()),
		}
	}
}

/// Whether (and how long) a walk repeats its hop.
#[derive(Debug, Clone, Copy)]
pub enum Continuation {
	/// Exactly one hop per source node.
	Once,
	/// Hop until the relation is absent.
	Exhaust,
	/// Hop while the predicate holds for the node just reached, including the first one.
	While(fn(&Node) -> bool),
}

#[must_use]
pub fn is_element(node: &Node) -> bool {
	node.is_instance_of::<Element>()
}

#[must_use]
pub fn is_svg_element(node: &Node) -> bool {
	node.is_instance_of::<SvgElement>()
}

impl Collection {
	/// Follows `relation` from every node under `continuation`, then narrows the result with `selector` if given.
	///
	/// The result is deduplicated across all sources.
	///
	/// # Errors
	///
	/// Only from the `selector` filter, see [`Collection::filter`].
	pub fn relations(&self, relation: Relation, selector: Option<&str>, continuation: Continuation) -> Result<Collection, JsValue> {
		let walked = self.walk(relation, continuation);
		match selector {
			Some(selector) => walked.filter(selector),
			None => Ok(walked),
		}
	}

	#[instrument]
	fn walk(&self, relation: Relation, continuation: Continuation) -> Collection {
		let mut reached = self.empty_like();
		for source in self {
			let span = trace_span!("Walking from node", ?relation);
			let _enter = span.enter();

			let mut hop = relation.hop(source);
			loop {
				let node = match hop {
					Hop::None => break,
					Hop::Many(node_list) => {
						reached.push(node_list);
						break;
					}
					Hop::One(node) => node,
				};

				match continuation {
					Continuation::Once => {
						reached.push(node);
						break;
					}
					Continuation::Exhaust => (),
					Continuation::While(predicate) => {
						if !predicate(&node) {
							break;
						}
					}
				}
				hop = relation.hop(&node);
				reached.push(node);
			}
		}
		reached
	}

	/// All child nodes, including text.
	#[must_use]
	pub fn children(&self) -> Collection {
		self.walk(Relation::ChildNodes, Continuation::Once)
	}

	#[must_use]
	pub fn first_child(&self) -> Collection {
		self.walk(Relation::FirstChild, Continuation::Once)
	}

	#[must_use]
	pub fn last_child(&self) -> Collection {
		self.walk(Relation::LastChild, Continuation::Once)
	}

	/// The previous element sibling of each node.
	#[must_use]
	pub fn prev(&self) -> Collection {
		self.walk(Relation::PreviousElementSibling, Continuation::Once)
	}

	/// All previous element siblings, nearest first.
	#[must_use]
	pub fn prev_siblings(&self) -> Collection {
		self.walk(Relation::PreviousElementSibling, Continuation::Exhaust)
	}

	/// The next element sibling of each node.
	#[must_use]
	pub fn next(&self) -> Collection {
		self.walk(Relation::NextElementSibling, Continuation::Once)
	}

	#[must_use]
	pub fn next_siblings(&self) -> Collection {
		self.walk(Relation::NextElementSibling, Continuation::Exhaust)
	}

	#[must_use]
	pub fn viewport(&self) -> Collection {
		self.walk(Relation::ViewportElement, Continuation::Once)
	}

	#[must_use]
	pub fn viewports(&self) -> Collection {
		self.walk(Relation::ViewportElement, Continuation::Exhaust)
	}

	/// The nearest `<svg>` ancestor of each node.
	#[must_use]
	pub fn owner(&self) -> Collection {
		self.walk(Relation::OwnerSvgElement, Continuation::Once)
	}

	#[must_use]
	pub fn owners(&self) -> Collection {
		self.walk(Relation::OwnerSvgElement, Continuation::Exhaust)
	}

	#[must_use]
	pub fn parent(&self) -> Collection {
		self.walk(Relation::ParentNode, Continuation::Once)
	}

	/// Ancestor elements, nearest first. Stops before the document.
	#[must_use]
	pub fn parents(&self) -> Collection {
		self.walk(Relation::ParentNode, Continuation::While(is_element))
	}

	/// Ancestor SVG elements, nearest first. Stops at the first non-SVG ancestor.
	#[must_use]
	pub fn parents_svg(&self) -> Collection {
		self.walk(Relation::ParentNode, Continuation::While(is_svg_element))
	}

	/// Previous siblings (nearest first), then next siblings.
	#[must_use]
	pub fn siblings(&self) -> Collection {
		let mut siblings = self.prev_siblings();
		siblings.push(self.next_siblings());
		siblings
	}

	/// The outermost `<svg>` element of each node.
	#[must_use]
	pub fn root(&self) -> Collection {
		self.owners().last()
	}

	/// Runs `selector` under every node and merges the results.
	///
	/// Nodes nested inside another node of this collection are skipped, since their matches are already covered.
	/// The remaining subtrees are disjoint, so their results are concatenated without identity checks.
	///
	/// # Errors
	///
	/// Malformed selectors are reported by the host; its error is returned as-is.
	#[instrument]
	pub fn find(&self, selector: &str) -> Result<Collection, JsValue> {
		let mut found = Vec::new();
		for (i, node) in self.iter().enumerate() {
			if self.iter().enumerate().any(|(j, other)| j != i && other.contains(Some(node))) {
				continue;
			}
			found.extend(query_nodes(node, selector)?);
		}
		Ok(Collection::from_unique(Rc::clone(self.host()), found))
	}
}
