//! Incremental composition of the `transform` attribute.
//!
//! The attribute is treated as an ordered list of `name(args)` invocations separated by spaces.
//! Setting a function rewrites only its own arguments and leaves every other invocation, and the order, untouched.

use crate::{
	attributes::{self, AttrValue},
	collection::Collection,
};
use tracing::{instrument, trace};

/// Sets `function`'s arguments to `args` in the transform string `current`.
///
/// An existing `function(` is only recognised at the start of the string or after a space, so `scale(` doesn't match
/// inside `myscale(`. Its arguments end at the first `)`; nested parentheses are not supported.
#[must_use]
pub fn compose(current: &str, function: &str, args: &str) -> String {
	let invocation = format!("{}({})", function, args);
	if current.is_empty() {
		return invocation;
	}

	let padded = format!(" {}", current);
	let needle = format!(" {}(", function);
	match padded.find(&needle) {
		// The padding shifts positions by one and the match starts with that space, so `start` indexes `current` directly.
		Some(start) => {
			let rest = &current[start..];
			let end = rest.find(')').map_or(current.len(), |close| start + close + 1);
			format!("{}{}{}", &current[..start], invocation, &current[end..])
		}
		None => format!("{} {}", current, invocation),
	}
}

impl Collection {
	/// Sets `function`'s arguments in the `transform` attribute of every element.
	///
	/// `args` may vary per element like any [`AttrValue`].
	#[instrument(skip(args))]
	pub fn transform(&self, function: &str, args: impl Into<AttrValue>) -> &Self {
		let args = args.into();
		for (i, element) in self.elements() {
			let args = match args.resolve(element, i, self) {
				Some(args) => args,
				None => continue,
			};
			let current = attributes::read(element, "transform").unwrap_or_default();
			let composed = compose(&current, function, &args);
			trace!("transform: {:?} -> {:?}", current, composed);
			attributes::write(element, "transform", &composed);
		}
		self
	}
}
