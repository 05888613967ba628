//! Measuring rendered geometry.
//!
//! Only graphics elements can be measured, and only while the host renders them.

use crate::collection::Collection;
use wasm_bindgen::JsCast;
use web_sys::{SvgGraphicsElement, SvgRect};

/// An axis-aligned box in user units, as reported by `getBBox()`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
	pub x: f32,
	pub y: f32,
	pub width: f32,
	pub height: f32,
}

impl From<SvgRect> for BoundingBox {
	fn from(rect: SvgRect) -> Self {
		Self {
			x: rect.x(),
			y: rect.y(),
			width: rect.width(),
			height: rect.height(),
		}
	}
}

impl BoundingBox {
	#[must_use]
	pub fn right(&self) -> f32 {
		self.x + self.width
	}

	#[must_use]
	pub fn bottom(&self) -> f32 {
		self.y + self.height
	}
}

impl Collection {
	/// The bounding box of the first graphics element.
	///
	/// `None` if there is none, or the host couldn't measure it (for example because it isn't rendered).
	#[must_use]
	pub fn bbox(&self) -> Option<BoundingBox> {
		let element = self.iter().find_map(|node| node.dyn_ref::<SvgGraphicsElement>())?;
		element.get_b_box().ok().map(Into::into)
	}
}
