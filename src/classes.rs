//! Class token membership and toggling, through one of two interchangeable strategies.
//!
//! The strategy is chosen once per [`Host`](crate::Host), see [`ClassStrategy`](crate::ClassStrategy).

use crate::{attributes, collection::Collection};
use tracing::{error, instrument};
use web_sys::Element;

/// The four class operations, on a single element.
pub trait ClassTokens {
	fn name(&self) -> &'static str;

	fn has(&self, element: &Element, token: &str) -> bool;

	/// Adds `token` unless it is already present.
	fn add(&self, element: &Element, token: &str);

	fn remove(&self, element: &Element, token: &str);

	fn toggle(&self, element: &Element, token: &str) {
		if self.has(element, token) {
			self.remove(element, token)
		} else {
			self.add(element, token)
		}
	}
}

/// Delegates to the host's `classList`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeClassList;

impl ClassTokens for NativeClassList {
	fn name(&self) -> &'static str {
		"classList"
	}

	fn has(&self, element: &Element, token: &str) -> bool {
		element.class_list().contains(token)
	}

	fn add(&self, element: &Element, token: &str) {
		if let Err(error) = element.class_list().add_1(token) {
			error!("Failed to add class {:?}: {:?}", token, error)
		}
	}

	fn remove(&self, element: &Element, token: &str) {
		if let Err(error) = element.class_list().remove_1(token) {
			error!("Failed to remove class {:?}: {:?}", token, error)
		}
	}

	fn toggle(&self, element: &Element, token: &str) {
		if let Err(error) = element.class_list().toggle(token) {
			error!("Failed to toggle class {:?}: {:?}", token, error)
		}
	}
}

/// Reads and rewrites the `class` attribute as a whitespace-delimited token string.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeClassList;

impl ClassTokens for AttributeClassList {
	fn name(&self) -> &'static str {
		"class attribute"
	}

	fn has(&self, element: &Element, token: &str) -> bool {
		element.get_attribute("class").map_or(false, |classes| has_token(&classes, token))
	}

	fn add(&self, element: &Element, token: &str) {
		let classes = element.get_attribute("class").unwrap_or_default();
		if !has_token(&classes, token) {
			attributes::write(element, "class", &add_token(&classes, token))
		}
	}

	fn remove(&self, element: &Element, token: &str) {
		if let Some(classes) = element.get_attribute("class") {
			if has_token(&classes, token) {
				attributes::write(element, "class", &remove_token(&classes, token))
			}
		}
	}
}

/// Whether the whitespace-delimited `classes` contain `token`.
#[must_use]
pub fn has_token(classes: &str, token: &str) -> bool {
	classes.split_whitespace().any(|candidate| candidate == token)
}

/// `classes` with `token` appended, separated by a single space.
#[must_use]
pub fn add_token(classes: &str, token: &str) -> String {
	if classes.is_empty() {
		token.to_owned()
	} else {
		format!("{} {}", classes, token)
	}
}

/// `classes` without any whitespace-bounded occurrence of `token`.
///
/// Each occurrence is removed together with the whitespace before it (or after it, at the very start),
/// so the spacing between the remaining tokens is preserved.
#[must_use]
pub fn remove_token(classes: &str, token: &str) -> String {
	if token.is_empty() {
		return classes.to_owned();
	}

	let mut remaining = classes.to_owned();
	let mut from = 0;
	while let Some(found) = remaining[from..].find(token).map(|found| from + found) {
		let end = found + token.len();
		let bounded_before = remaining[..found].chars().next_back().map_or(true, char::is_whitespace);
		let bounded_after = remaining[end..].chars().next().map_or(true, char::is_whitespace);
		if !(bounded_before && bounded_after) {
			from = end;
			continue;
		}

		match remaining[..found].char_indices().next_back() {
			Some((space, _)) => remaining.replace_range(space..end, ""),
			None => {
				let trailing = remaining[end..].chars().next().map_or(0, char::len_utf8);
				remaining.replace_range(found..end + trailing, "")
			}
		}
		from = 0;
	}
	remaining
}

impl Collection {
	/// Whether ANY element has the class `token`.
	#[must_use]
	pub fn has_class(&self, token: &str) -> bool {
		let classes = self.host().class_tokens();
		self.elements().any(|(_, element)| classes.has(element, token))
	}

	#[instrument]
	pub fn add_class(&self, token: &str) -> &Self {
		let classes = self.host().class_tokens();
		for (_, element) in self.elements() {
			classes.add(element, token)
		}
		self
	}

	#[instrument]
	pub fn remove_class(&self, token: &str) -> &Self {
		let classes = self.host().class_tokens();
		for (_, element) in self.elements() {
			classes.remove(element, token)
		}
		self
	}

	#[instrument]
	pub fn toggle_class(&self, token: &str) -> &Self {
		let classes = self.host().class_tokens();
		for (_, element) in self.elements() {
			classes.toggle(element, token)
		}
		self
	}
}
