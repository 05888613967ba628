//! Inline `style` access and vendor prefix expansion.

use crate::{
	attributes::{AttrValue, Attributes},
	collection::Collection,
};
use tracing::{error, instrument};
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Element, HtmlElement, SvgElement};

/// Tried in this order, the unprefixed property first.
pub const VENDOR_PREFIXES: [&str; 6] = ["", "-moz-", "-webkit-", "-khtml-", "-o-", "-ms-"];

/// Every prefixed variant of each property in `styles`, all with the same value.
#[must_use]
pub fn css_prefix(styles: &Attributes) -> Attributes {
	styles
		.iter()
		.flat_map(|(property, value)| IntoIterator::into_iter(VENDOR_PREFIXES).map(move |prefix| (format!("{}{}", prefix, property), value.clone())))
		.collect()
}

/// `"transform,-moz-transform,…"`, for example for a `transition-property` list.
#[must_use]
pub fn prefixed_properties(property: &str) -> String {
	IntoIterator::into_iter(VENDOR_PREFIXES).map(|prefix| format!("{}{}", prefix, property)).collect::<Vec<_>>().join(",")
}

/// `"transform:rotate(45deg);-moz-transform:rotate(45deg);…"`, for inline `style` text.
#[must_use]
pub fn prefixed_rules(property: &str, value: &str) -> String {
	IntoIterator::into_iter(VENDOR_PREFIXES).map(|prefix| format!("{}{}:{};", prefix, property, value)).collect()
}

fn style_of(element: &Element) -> Option<CssStyleDeclaration> {
	if let Some(element) = element.dyn_ref::<SvgElement>() {
		Some(element.style())
	} else {
		element.dyn_ref::<HtmlElement>().map(HtmlElement::style)
	}
}

impl Collection {
	/// The inline value of `property` on the first element.
	#[must_use]
	pub fn css(&self, property: &str) -> Option<String> {
		let (_, element) = self.elements().next()?;
		style_of(element)?.get_property_value(property).ok()
	}

	pub fn set_css(&self, property: &str, value: impl Into<AttrValue>) -> &Self {
		self.set_css_map(&Attributes::new().with(property, value))
	}

	/// Sets every `(property, value)` pair as inline style on every element. Values may vary per element.
	#[instrument]
	pub fn set_css_map(&self, styles: &Attributes) -> &Self {
		for (i, element) in self.elements() {
			let style = match style_of(element) {
				Some(style) => style,
				None => continue,
			};
			for (property, value) in styles.iter() {
				if let Some(value) = value.resolve(element, i, self) {
					if let Err(error) = style.set_property(property, &value) {
						error!("Failed to set style {:?}: {:?}", property, error)
					}
				}
			}
		}
		self
	}

	/// Sets `property` under each of the [`VENDOR_PREFIXES`].
	pub fn set_css_prefixed(&self, property: &str, value: impl Into<AttrValue>) -> &Self {
		self.set_css_map(&css_prefix(&Attributes::new().with(property, value)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn properties() {
		assert_eq!(
			prefixed_properties("transform"),
			"transform,-moz-transform,-webkit-transform,-khtml-transform,-o-transform,-ms-transform"
		);
	}

	#[test]
	fn rules() {
		let rules = prefixed_rules("transform", "rotate(45deg)");
		assert!(rules.starts_with("transform:rotate(45deg);-moz-transform:rotate(45deg);"));
		assert!(rules.ends_with("-ms-transform:rotate(45deg);"));
		assert_eq!(rules.matches(';').count(), VENDOR_PREFIXES.len());
	}

	#[test]
	fn map_expansion() {
		let styles = Attributes::new().with("transform", "none").with("transition", "all 1s");
		let prefixed = css_prefix(&styles);
		assert_eq!(prefixed.len(), 2 * VENDOR_PREFIXES.len());
		assert!(prefixed.contains("transform"));
		assert!(prefixed.contains("-webkit-transition"));
		assert_eq!(prefixed.iter().next().map(|(property, _)| property), Some("transform"));
	}
}
