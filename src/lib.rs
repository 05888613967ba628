#![doc(html_root_url = "https://docs.rs/arbor-dom/0.1.0")]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! A chainable, identity-deduplicated collection engine over live [***DOM***](https://developer.mozilla.org/en-US/docs/Web/API/Document_Object_Model) and SVG nodes.
//!
//! Obtain a [`Host`] through [`detect`], then build and query trees through [`Collection`]s:
//!
//! - [`Host::create`], [`Host::select`] and [`Host::wrap`] are the entry points,
//! - traversal ([`Collection::relations`] and its shortcuts) and selector matching ([`Collection::filter`]) produce new collections,
//! - the insertion family ([`Collection::append`] and friends) grafts nodes into the tree,
//! - [`Collection::set_attr`] and [`Collection::transform`] style and position them,
//! - [`Collection::on`] and [`Collection::one`] react to input.
//!
//! Nodes are never owned by this crate. A [`Collection`] only holds handles into the JS heap and never contains the same node twice.

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod attributes;
pub mod classes;
pub mod collection;
pub mod content;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod manipulation;
pub mod matching;
pub mod namespace;
pub mod style;
pub mod tags;
pub mod transform;
pub mod traversal;

pub use crate::{
	attributes::{AttrValue, Attributes},
	classes::{AttributeClassList, ClassTokens, NativeClassList},
	collection::Collection,
	content::{Content, Placement},
	events::Listener,
	geometry::BoundingBox,
	gesture::{Gesture, Offset, Session},
	host::{detect, detect_in, ClassStrategy, Host, Support, Unsupported},
	matching::Behavior,
	tags::{Constructor, TagRegistry},
	traversal::{Continuation, Relation},
};

/// This crate's version, also exposed by [`Unsupported`] when the host can't be used.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The value of the `version` attribute given to created `<svg>` elements.
pub const SVG_VERSION: &str = "1.1";

/// Hides page content from log fields unless the `dangerous-logging` feature is enabled.
pub(crate) fn redact(value: &str) -> &str {
	if cfg!(feature = "dangerous-logging") {
		value
	} else {
		"<redacted>"
	}
}
