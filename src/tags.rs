//! Tag name → element constructor registry, used by [`Host::create_element`] and [`Collection::template`].

use crate::{attributes::Attributes, collection::Collection, host::Host, SVG_VERSION};
use core::fmt::{self, Debug, Formatter};
use hashbrown::HashMap;
use std::rc::Rc;
use tracing::{instrument, trace};

/// Every SVG 1.1 element name.
pub const SVG_TAGS: &[&str] = &[
	"a", "altGlyph", "altGlyphDef", "altGlyphItem", "animate", "animateColor", "animateMotion", "animateTransform", "circle", "clipPath", "color-profile", "cursor", "defs", "desc", "ellipse",
	"feBlend", "feColorMatrix", "feComponentTransfer", "feComposite", "feConvolveMatrix", "feDiffuseLighting", "feDisplacementMap", "feDistantLight", "feFlood", "feFuncA", "feFuncB", "feFuncG",
	"feFuncR", "feGaussianBlur", "feImage", "feMerge", "feMergeNode", "feMorphology", "feOffset", "fePointLight", "feSpecularLighting", "feSpotLight", "feTile", "feTurbulence", "filter", "font",
	"font-face", "font-face-format", "font-face-name", "font-face-src", "font-face-uri", "foreignObject", "g", "glyph", "glyphRef", "hkern", "image", "line", "linearGradient", "marker", "mask",
	"metadata", "missing-glyph", "mpath", "path", "pattern", "polygon", "polyline", "radialGradient", "rect", "script", "set", "stop", "style", "svg", "switch", "symbol", "text", "textPath",
	"title", "tref", "tspan", "use", "view", "vkern",
];

/// Creates a collection (usually of one new element) from an attribute map.
#[derive(Clone)]
pub struct Constructor(Rc<dyn Fn(&Rc<Host>, &Attributes) -> Collection>);

impl Constructor {
	pub fn new(f: impl 'static + Fn(&Rc<Host>, &Attributes) -> Collection) -> Self {
		Self(Rc::new(f))
	}

	/// A constructor for a plain element named `tag`.
	#[must_use]
	pub fn element(tag: &'static str) -> Self {
		Self::new(move |host, attributes| {
			let created = host.create(tag);
			created.set_attrs(attributes);
			created
		})
	}

	pub fn call(&self, host: &Rc<Host>, attributes: &Attributes) -> Collection {
		(self.0)(host, attributes)
	}
}

impl Debug for Constructor {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("Constructor(..)")
	}
}

#[derive(Debug, Clone, Default)]
pub struct TagRegistry(HashMap<String, Constructor>);

impl TagRegistry {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// All [`SVG_TAGS`], each also under its camelCase alias (`font-face` → `fontFace`).
	///
	/// `svg` elements are created with a `version` attribute, which the given attributes may override.
	#[must_use]
	pub fn svg() -> Self {
		let mut registry = Self::new();
		for &tag in SVG_TAGS {
			let constructor = if tag == "svg" {
				Constructor::new(|host, attributes| {
					let created = host.create("svg");
					created.set_attr("version", SVG_VERSION).set_attrs(attributes);
					created
				})
			} else {
				Constructor::element(tag)
			};

			let alias = hyphens_to_camel_case(tag);
			if alias != tag {
				registry.register(alias, constructor.clone());
			}
			registry.register(tag, constructor);
		}
		registry
	}

	pub fn register(&mut self, name: impl Into<String>, constructor: Constructor) {
		let name = name.into();
		trace!("Registering constructor for {:?}.", name);
		self.0.insert(name, constructor);
	}

	#[must_use]
	pub fn get(&self, name: &str) -> Option<Constructor> {
		self.0.get(name).cloned()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// `font-face` → `fontFace`. Only a hyphen followed by a lowercase ASCII letter is folded.
#[must_use]
pub fn hyphens_to_camel_case(name: &str) -> String {
	let mut camel = String::with_capacity(name.len());
	let mut chars = name.chars().peekable();
	while let Some(c) = chars.next() {
		match (c, chars.peek()) {
			('-', Some(next)) if next.is_ascii_lowercase() => {
				camel.push(next.to_ascii_uppercase());
				chars.next();
			}
			_ => camel.push(c),
		}
	}
	camel
}

impl Collection {
	/// Creates `name` through the host's registry under every node and returns everything created.
	#[instrument(skip(attributes))]
	pub fn template(&self, name: &str, attributes: &Attributes) -> Collection {
		let mut created = self.empty_like();
		for node in self {
			let instance = self.host().create_element(name, attributes);
			self.single(node.clone()).append(&instance);
			created.push(instance);
		}
		created
	}
}
