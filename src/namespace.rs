//! The fixed prefix → namespace table consulted for `prefix:local` attribute names.

/// The SVG namespace, in which all elements created from tag names live.
pub const SVG: &str = "http://www.w3.org/2000/svg";

/// The XLink namespace, used by linked-resource references like `xlink:href`.
pub const XLINK: &str = "http://www.w3.org/1999/xlink";

const TABLE: [(&str, &str); 2] = [("svg", SVG), ("xlink", XLINK)];

/// Looks up the namespace registered for `prefix`.
#[must_use]
pub fn lookup(prefix: &str) -> Option<&'static str> {
	TABLE.iter().find(|(known, _)| *known == prefix).map(|(_, namespace)| *namespace)
}

/// An attribute name split against the namespace table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedName<'a> {
	/// [`None`] for plain names and for unknown prefixes.
	pub namespace: Option<&'static str>,
	/// The name to read and remove with.
	pub local: &'a str,
	/// The name to write with. Keeps the prefix only if the namespace is known.
	pub qualified: &'a str,
}

/// Splits `name` on its first `:` and resolves the prefix.
///
/// Unknown prefixes resolve to "no namespace" and are dropped, so that `foo:bar` round-trips as the plain attribute `bar`.
#[must_use]
pub fn resolve(name: &str) -> QualifiedName<'_> {
	match name.find(':') {
		None => QualifiedName {
			namespace: None,
			local: name,
			qualified: name,
		},
		Some(colon) => {
			let local = &name[colon + 1..];
			match lookup(&name[..colon]) {
				Some(namespace) => QualifiedName {
					namespace: Some(namespace),
					local,
					qualified: name,
				},
				None => QualifiedName {
					namespace: None,
					local,
					qualified: local,
				},
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn plain() {
		assert_eq!(
			resolve("fill"),
			QualifiedName {
				namespace: None,
				local: "fill",
				qualified: "fill"
			}
		);
	}

	#[test]
	fn linked_resource() {
		let name = resolve("xlink:href");
		assert_eq!(name.namespace, Some(XLINK));
		assert_eq!(name.local, "href");
		assert_eq!(name.qualified, "xlink:href");
	}

	#[test]
	fn unknown_prefix() {
		let name = resolve("data:thing");
		assert_eq!(name.namespace, None);
		assert_eq!(name.local, "thing");
		assert_eq!(name.qualified, "thing");
	}

	#[test]
	fn only_first_colon_splits() {
		let name = resolve("xlink:a:b");
		assert_eq!(name.namespace, Some(XLINK));
		assert_eq!(name.local, "a:b");
	}
}
