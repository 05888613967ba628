//! Heterogeneous inputs and the normalization that folds them into a [`Collection`].

use crate::{attributes::Attributes, collection::Collection, host::Host, redact};
use js_sys::{Array, Reflect};
use std::rc::Rc;
use tracing::{error, level_filters::STATIC_MAX_LEVEL, trace, warn, Level};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlCollection, HtmlElement, Node, NodeList, SvgElement};

/// Anything that can be added to a [`Collection`].
///
/// A [`Content::Tag`] is a tag name and creates a new SVG element wherever content is normalized.
/// Only [`Host::wrap`] reads a bare string as a selector instead.
#[derive(Debug, Clone)]
pub enum Content {
	Empty,
	Tag(String),
	Node(Node),
	Nodes(Vec<Node>),
	NodeList(NodeList),
	HtmlCollection(HtmlCollection),
	Collection(Collection),
	/// A value straight from JavaScript: a string, a node, an array or any other list-like object.
	Js(JsValue),
	Many(Vec<Content>),
	/// Content whose resolved nodes receive these attributes before they are used.
	Attributed(Box<Content>, Attributes),
}

/// Where normalized nodes are inserted into the receiving collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
	Push,
	/// Insert at the front. A list keeps its own order there.
	Unshift,
}

impl Content {
	/// Pairs this content with an attribute map.
	#[must_use]
	pub fn with_attributes(self, attributes: Attributes) -> Self {
		Self::Attributed(Box::new(self), attributes)
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Empty => true,
			Self::Nodes(nodes) => nodes.is_empty(),
			Self::Many(many) => many.iter().all(Self::is_empty),
			Self::Collection(collection) => collection.is_empty(),
			_ => false,
		}
	}
}

impl Default for Content {
	fn default() -> Self {
		Self::Empty
	}
}

impl From<()> for Content {
	fn from((): ()) -> Self {
		Self::Empty
	}
}

impl From<&str> for Content {
	fn from(tag: &str) -> Self {
		Self::Tag(tag.to_owned())
	}
}

impl From<String> for Content {
	fn from(tag: String) -> Self {
		Self::Tag(tag)
	}
}

macro_rules! node_content {
	($($type:ty),*$(,)?) => {$(
		impl From<$type> for Content {
			fn from(node: $type) -> Self {
				Self::Node(node.into())
			}
		}

		impl From<&$type> for Content {
			fn from(node: &$type) -> Self {
				let node: &Node = node.as_ref();
				Self::Node(node.clone())
			}
		}
	)*};
}
node_content!(Element, HtmlElement, SvgElement, Document);

impl From<Node> for Content {
	fn from(node: Node) -> Self {
		Self::Node(node)
	}
}

impl From<&Node> for Content {
	fn from(node: &Node) -> Self {
		Self::Node(node.clone())
	}
}

impl From<Vec<Node>> for Content {
	fn from(nodes: Vec<Node>) -> Self {
		Self::Nodes(nodes)
	}
}

impl From<&[Node]> for Content {
	fn from(nodes: &[Node]) -> Self {
		Self::Nodes(nodes.to_vec())
	}
}

impl From<NodeList> for Content {
	fn from(node_list: NodeList) -> Self {
		Self::NodeList(node_list)
	}
}

impl From<HtmlCollection> for Content {
	fn from(html_collection: HtmlCollection) -> Self {
		Self::HtmlCollection(html_collection)
	}
}

impl From<Collection> for Content {
	fn from(collection: Collection) -> Self {
		Self::Collection(collection)
	}
}

impl From<&Collection> for Content {
	fn from(collection: &Collection) -> Self {
		Self::Collection(collection.clone())
	}
}

impl From<JsValue> for Content {
	fn from(value: JsValue) -> Self {
		Self::Js(value)
	}
}

impl From<Vec<Content>> for Content {
	fn from(many: Vec<Content>) -> Self {
		Self::Many(many)
	}
}

impl<C: Into<Content>> From<Option<C>> for Content {
	fn from(content: Option<C>) -> Self {
		content.map_or(Self::Empty, Into::into)
	}
}

/// Receives normalized nodes, skipping any that are already present by identity.
struct Sink<'a> {
	nodes: &'a mut Vec<Node>,
	cursor: Option<usize>,
}

impl Sink<'_> {
	fn add(&mut self, node: Node) {
		// `PartialEq` on `web_sys` handles is JS `===`, i.e. identity.
		if self.nodes.contains(&node) {
			return trace!("Skipping node already in the collection.");
		}
		match &mut self.cursor {
			None => self.nodes.push(node),
			Some(cursor) => {
				self.nodes.insert(*cursor, node);
				*cursor += 1;
			}
		}
	}
}

/// Folds `content` into `nodes`, creating elements for tag names and applying paired attributes.
pub(crate) fn normalize(host: &Rc<Host>, content: Content, nodes: &mut Vec<Node>, placement: Placement) {
	let mut sink = Sink {
		nodes,
		cursor: match placement {
			Placement::Push => None,
			Placement::Unshift => Some(0),
		},
	};
	normalize_into(host, content, &mut sink);
}

fn normalize_into(host: &Rc<Host>, content: Content, sink: &mut Sink) {
	match content {
		Content::Empty => (),
		Content::Tag(tag) => match host.make(&tag) {
			Some(element) => sink.add(element.into()),
			None => error!("Could not create element <{}>.", tag),
		},
		Content::Node(node) => sink.add(node),
		Content::Nodes(nodes) => {
			for node in nodes {
				sink.add(node)
			}
		}
		Content::NodeList(node_list) => {
			for i in 0..node_list.length() {
				if let Some(node) = node_list.get(i) {
					sink.add(node)
				}
			}
		}
		Content::HtmlCollection(html_collection) => {
			for i in 0..html_collection.length() {
				if let Some(element) = html_collection.item(i) {
					sink.add(element.into())
				}
			}
		}
		Content::Collection(collection) => {
			for node in collection.into_nodes() {
				sink.add(node)
			}
		}
		Content::Js(value) => normalize_js(host, value, sink),
		Content::Many(many) => {
			for content in many {
				normalize_into(host, content, sink)
			}
		}
		Content::Attributed(content, attributes) => {
			let resolved = host.create(*content);
			resolved.set_attrs(&attributes);
			for node in resolved.into_nodes() {
				sink.add(node)
			}
		}
	}
}

fn normalize_js(host: &Rc<Host>, value: JsValue, sink: &mut Sink) {
	if let Some(tag) = value.as_string() {
		return normalize_into(host, Content::Tag(tag), sink);
	}

	let value = match value.dyn_into::<Node>() {
		Ok(node) => return sink.add(node),
		Err(value) => value,
	};
	let value = match value.dyn_into::<NodeList>() {
		Ok(node_list) => return normalize_into(host, Content::NodeList(node_list), sink),
		Err(value) => value,
	};

	if Array::is_array(&value) {
		for item in Array::from(&value).iter() {
			normalize_js(host, item, sink)
		}
	} else if let Some(length) = list_like_length(&value) {
		for i in 0..length {
			match Reflect::get(&value, &JsValue::from(i)) {
				Ok(item) => normalize_js(host, item, sink),
				Err(error) => warn!("Could not read item {} of list-like value: {:?}", i, error),
			}
		}
	} else if STATIC_MAX_LEVEL >= Level::TRACE {
		trace!("Ignoring unsupported JS value: {}", redact(&format!("{:?}", value)));
	}
}

/// The numeric `length` of a JS object, if it is list-like.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn list_like_length(value: &JsValue) -> Option<u32> {
	if !value.is_object() {
		return None;
	}
	let length = Reflect::get(value, &JsValue::from_str("length")).ok()?.as_f64()?;
	if length >= 0.0 && length.fract() == 0.0 && length <= f64::from(u32::MAX) {
		Some(length as u32)
	} else {
		None
	}
}
