//! Namespace-aware attribute access, with literal, per-node and per-index values.

use crate::{collection::Collection, namespace, redact};
use core::fmt::{self, Debug, Formatter};
use hashbrown::HashMap;
use std::rc::Rc;
use tracing::{error, instrument, trace, warn};
use web_sys::Element;

/// A value to write to every element of a [`Collection`].
#[derive(Clone)]
pub enum AttrValue {
	Literal(String),
	/// Evaluated once per element as `(element, index, collection)`.
	PerNode(Rc<dyn Fn(&Element, usize, &Collection) -> String>),
	/// The item at each element's index in the collection. Elements past the end are left alone.
	Indexed(Vec<String>),
}

impl AttrValue {
	pub fn per_node(f: impl 'static + Fn(&Element, usize, &Collection) -> String) -> Self {
		Self::PerNode(Rc::new(f))
	}

	/// Resolves the value for the element at `index` of `collection`.
	#[must_use]
	pub fn resolve(&self, element: &Element, index: usize, collection: &Collection) -> Option<String> {
		match self {
			Self::Literal(literal) => Some(literal.clone()),
			Self::PerNode(f) => Some(f(element, index, collection)),
			Self::Indexed(values) => values.get(index).cloned(),
		}
	}
}

impl Debug for AttrValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(literal) => f.debug_tuple("Literal").field(&redact(literal)).finish(),
			Self::PerNode(_) => f.write_str("PerNode(..)"),
			Self::Indexed(values) => f.debug_tuple("Indexed").field(&values.len()).finish(),
		}
	}
}

impl From<&str> for AttrValue {
	fn from(literal: &str) -> Self {
		Self::Literal(literal.to_owned())
	}
}

impl From<String> for AttrValue {
	fn from(literal: String) -> Self {
		Self::Literal(literal)
	}
}

impl From<&String> for AttrValue {
	fn from(literal: &String) -> Self {
		Self::Literal(literal.clone())
	}
}

macro_rules! display_value {
	($($type:ty),*$(,)?) => {$(
		impl From<$type> for AttrValue {
			fn from(value: $type) -> Self {
				Self::Literal(value.to_string())
			}
		}
	)*};
}
display_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char);

impl From<Vec<String>> for AttrValue {
	fn from(values: Vec<String>) -> Self {
		Self::Indexed(values)
	}
}

impl From<Vec<&str>> for AttrValue {
	fn from(values: Vec<&str>) -> Self {
		Self::Indexed(values.into_iter().map(str::to_owned).collect())
	}
}

/// An ordered attribute map. Setting a name twice keeps the first position and the last value.
#[derive(Debug, Clone, Default)]
pub struct Attributes(Vec<(String, AttrValue)>);

impl Attributes {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
		self.insert(name, value);
		self
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
		let name = name.into();
		let value = value.into();
		match self.0.iter_mut().find(|(existing, _)| *existing == name) {
			Some((_, existing)) => *existing = value,
			None => self.0.push((name, value)),
		}
	}

	#[must_use]
	pub fn get(&self, name: &str) -> Option<&AttrValue> {
		self.0.iter().find(|(existing, _)| existing == name).map(|(_, value)| value)
	}

	#[must_use]
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value))
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

impl<K: Into<String>, V: Into<AttrValue>> Extend<(K, V)> for Attributes {
	fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
		for (name, value) in iter {
			self.insert(name, value)
		}
	}
}

impl<K: Into<String>, V: Into<AttrValue>> core::iter::FromIterator<(K, V)> for Attributes {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		let mut attributes = Self::new();
		attributes.extend(iter);
		attributes
	}
}

impl<K: Into<String>, V: Into<AttrValue>, const N: usize> From<[(K, V); N]> for Attributes {
	fn from(entries: [(K, V); N]) -> Self {
		IntoIterator::into_iter(entries).collect()
	}
}

/// Reads every attribute of `element` by its qualified name.
pub(crate) fn read_all(element: &Element) -> HashMap<String, String> {
	let attributes = element.attributes();
	(0..attributes.length())
		.filter_map(|i| attributes.item(i))
		.map(|attribute| (attribute.name(), attribute.value()))
		.collect()
}

/// Reads `name` from `element`, resolving a `prefix:` through the namespace table.
pub(crate) fn read(element: &Element, name: &str) -> Option<String> {
	let name = namespace::resolve(name);
	element.get_attribute_ns(name.namespace, name.local)
}

pub(crate) fn write(element: &Element, name: &str, value: &str) {
	let resolved = namespace::resolve(name);
	if let Err(error) = element.set_attribute_ns(resolved.namespace, resolved.qualified, value) {
		error!("Could not set attribute {:?}={:?}: {:?}", name, redact(value), error)
	}
}

impl Collection {
	/// The full attribute map of the first element, or an empty map.
	#[must_use]
	pub fn attributes(&self) -> HashMap<String, String> {
		self.elements().next().map(|(_, element)| read_all(element)).unwrap_or_default()
	}

	/// Reads an attribute of the first element.
	///
	/// `prefix:local` names are read through the namespace registered for `prefix`.
	#[must_use]
	pub fn attr(&self, name: &str) -> Option<String> {
		self.elements().next().and_then(|(_, element)| read(element, name))
	}

	/// Sets an attribute on every element.
	#[instrument(skip(value))]
	pub fn set_attr(&self, name: &str, value: impl Into<AttrValue>) -> &Self {
		let value = value.into();
		for (i, element) in self.elements() {
			match value.resolve(element, i, self) {
				Some(resolved) => write(element, name, &resolved),
				None => trace!("No value for element {}.", i),
			}
		}
		self
	}

	/// Sets every attribute of the map on every element, in map order.
	pub fn set_attrs(&self, attributes: &Attributes) -> &Self {
		if attributes.is_empty() {
			return self;
		}
		for (i, element) in self.elements() {
			for (name, value) in attributes.iter() {
				if let Some(resolved) = value.resolve(element, i, self) {
					write(element, name, &resolved)
				}
			}
		}
		self
	}

	#[instrument]
	pub fn remove_attr(&self, name: &str) -> &Self {
		let resolved = namespace::resolve(name);
		for (_, element) in self.elements() {
			if let Err(error) = element.remove_attribute_ns(resolved.namespace, resolved.local) {
				warn!("Could not remove attribute {:?}: {:?}", name, error)
			}
		}
		self
	}

	/// Reads `name` from each element, in collection order.
	#[must_use]
	pub fn pluck(&self, name: &str) -> Vec<Option<String>> {
		self.elements().map(|(_, element)| read(element, name)).collect()
	}

	/// The text content of the first node, or an empty string.
	#[must_use]
	pub fn content(&self) -> String {
		self.get(0).and_then(web_sys::Node::text_content).unwrap_or_default()
	}

	/// Replaces the text content of every element.
	pub fn set_content(&self, text: impl Into<AttrValue>) -> &Self {
		let text = text.into();
		for (i, element) in self.elements() {
			if let Some(text) = text.resolve(element, i, self) {
				element.set_text_content(Some(&text))
			}
		}
		self
	}
}
