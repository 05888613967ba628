//! Capability detection and the per-document context every [`Collection`] carries.

use crate::{
	attributes::Attributes,
	classes::{AttributeClassList, ClassTokens, NativeClassList},
	collection::Collection,
	content::Content,
	namespace,
	tags::{Constructor, TagRegistry},
	VERSION,
};
use core::{
	cell::RefCell,
	fmt::{self, Debug, Formatter},
};
use js_sys::Reflect;
use std::rc::Rc;
use tracing::{error, info, instrument, trace, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, DocumentFragment, Element, Node, NodeList};

/// How class tokens are read and written, picked once per [`Host`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassStrategy {
	/// The host's per-element `classList`.
	Native,
	/// Parsing and rewriting the `class` attribute as a whitespace-delimited string.
	Attribute,
}

/// The result of capability detection.
#[derive(Debug, Clone)]
pub enum Support {
	Supported(Rc<Host>),
	Unsupported(Unsupported),
}

/// What remains available on a host that can't run the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unsupported {
	pub version: &'static str,
}

impl Support {
	#[must_use]
	pub fn is_supported(&self) -> bool {
		matches!(self, Self::Supported(_))
	}

	#[must_use]
	pub fn version(&self) -> &'static str {
		VERSION
	}

	#[must_use]
	pub fn host(self) -> Option<Rc<Host>> {
		match self {
			Self::Supported(host) => Some(host),
			Self::Unsupported(_) => None,
		}
	}
}

/// Detects support in the current window's document.
#[must_use]
pub fn detect() -> Support {
	match web_sys::window().and_then(|window| window.document()) {
		Some(document) => detect_in(document),
		None => {
			warn!("No document available.");
			Support::Unsupported(Unsupported { version: VERSION })
		}
	}
}

/// Detects support in `document`, choosing the class strategy from the host's capabilities.
#[instrument]
#[must_use]
pub fn detect_in(document: Document) -> Support {
	let sample = match document.create_element_ns(Some(namespace::SVG), "svg") {
		Ok(sample) => sample,
		Err(error) => {
			warn!("Could not create an SVG element: {:?}", error);
			return Support::Unsupported(Unsupported { version: VERSION });
		}
	};

	let sample: &JsValue = sample.as_ref();
	let body: Option<JsValue> = document.body().map(Into::into);
	let supported = has(sample, "createSVGRect")
		&& has(document.as_ref(), "querySelectorAll")
		&& body.map_or(false, |body| has(&body, "children") && has(&body, "previousElementSibling"));
	if !supported {
		warn!("Host is missing required DOM capabilities.");
		return Support::Unsupported(Unsupported { version: VERSION });
	}

	let strategy = if has(sample, "classList") { ClassStrategy::Native } else { ClassStrategy::Attribute };
	info!("Host supported. Class strategy: {:?}", strategy);
	Support::Supported(Host::new(document, strategy))
}

fn has(target: &JsValue, property: &str) -> bool {
	Reflect::has(target, &JsValue::from_str(property)).unwrap_or(false)
}

/// The document collections live in, plus the strategies and registries chosen for it.
pub struct Host {
	document: Document,
	classes: Box<dyn ClassTokens>,
	tags: RefCell<TagRegistry>,
}

impl Debug for Host {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Host").field("document", &self.document).field("classes", &self.classes.name()).finish()
	}
}

impl Host {
	/// Creates a host without capability detection, with an explicit class strategy.
	#[must_use]
	pub fn new(document: Document, strategy: ClassStrategy) -> Rc<Self> {
		let classes: Box<dyn ClassTokens> = match strategy {
			ClassStrategy::Native => Box::new(NativeClassList),
			ClassStrategy::Attribute => Box::new(AttributeClassList),
		};
		Rc::new(Self {
			document,
			classes,
			tags: RefCell::new(TagRegistry::svg()),
		})
	}

	#[must_use]
	pub fn document(&self) -> &Document {
		&self.document
	}

	#[must_use]
	pub fn class_tokens(&self) -> &dyn ClassTokens {
		&*self.classes
	}

	/// Creates a detached element named `tag` in the SVG namespace.
	#[must_use]
	pub fn make(&self, tag: &str) -> Option<Element> {
		match self.document.create_element_ns(Some(namespace::SVG), tag) {
			Ok(element) => Some(element),
			Err(error) => {
				error!("Failed to create element <{}>: {:?}", tag, error);
				None
			}
		}
	}

	#[must_use]
	pub fn empty(self: &Rc<Self>) -> Collection {
		Collection::new(Rc::clone(self))
	}

	/// Normalizes `content` into a new collection. Strings are tag names here.
	#[must_use]
	pub fn create(self: &Rc<Self>, content: impl Into<Content>) -> Collection {
		Collection::from_content(Rc::clone(self), content)
	}

	/// Runs a selector query under `context`, or under the document.
	///
	/// # Errors
	///
	/// Malformed selectors are reported by the host; its error is returned as-is.
	pub fn select(self: &Rc<Self>, selector: &str, context: Option<&Node>) -> Result<Collection, JsValue> {
		if selector.is_empty() {
			return Ok(self.empty());
		}
		let document: &Node = self.document.as_ref();
		let found = query_nodes(context.unwrap_or(document), selector)?;
		Ok(Collection::from_unique(Rc::clone(self), found))
	}

	/// The main entry point: a bare string is a selector query, anything else is wrapped.
	///
	/// Content paired with attributes is always created, so `Content::from("g").with_attributes(…)` makes a new `<g>`.
	///
	/// # Errors
	///
	/// As for [`Host::select`].
	pub fn wrap(self: &Rc<Self>, content: impl Into<Content>) -> Result<Collection, JsValue> {
		match content.into() {
			Content::Tag(selector) => self.select(&selector, None),
			Content::Js(value) if value.is_string() => self.select(&value.as_string().unwrap_or_default(), None),
			content => Ok(self.create(content)),
		}
	}

	/// Creates an element through the tag registry, falling back to a plain SVG element for unregistered names.
	pub fn create_element(self: &Rc<Self>, tag: &str, attributes: &Attributes) -> Collection {
		let constructor = self.tags.borrow().get(tag);
		match constructor {
			Some(constructor) => constructor.call(self, attributes),
			None => {
				trace!("<{}> is not registered; creating it directly.", tag);
				let created = self.create(tag);
				created.set_attrs(attributes);
				created
			}
		}
	}

	/// Registers (or replaces) the constructor used by [`Host::create_element`] and [`Collection::template`] for `name`.
	pub fn register_template(&self, name: impl Into<String>, constructor: impl 'static + Fn(&Rc<Host>, &Attributes) -> Collection) {
		self.tags.borrow_mut().register(name, Constructor::new(constructor));
	}

	#[must_use]
	pub fn is_registered(&self, name: &str) -> bool {
		self.tags.borrow().get(name).is_some()
	}
}

/// `querySelectorAll` on any node kind that supports it. Other nodes have no descendants to find.
fn query_all(node: &Node, selector: &str) -> Result<Option<NodeList>, JsValue> {
	if let Some(element) = node.dyn_ref::<Element>() {
		element.query_selector_all(selector).map(Some)
	} else if let Some(document) = node.dyn_ref::<Document>() {
		document.query_selector_all(selector).map(Some)
	} else if let Some(fragment) = node.dyn_ref::<DocumentFragment>() {
		fragment.query_selector_all(selector).map(Some)
	} else {
		Ok(None)
	}
}

/// The matches of `selector` under `node`, in document order and free of duplicates.
pub(crate) fn query_nodes(node: &Node, selector: &str) -> Result<Vec<Node>, JsValue> {
	Ok(match query_all(node, selector)? {
		Some(found) => (0..found.length()).filter_map(|i| found.get(i)).collect(),
		None => Vec::new(),
	})
}
