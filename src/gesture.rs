//! Explicit pointer gesture state, held by the application and threaded through its event handlers.
//!
//! A [`Session`] tracks at most one [`Gesture`]. Beginning a new one replaces the old one outright; nothing is queued.

use crate::collection::Collection;
use core::ops::{Add, Sub};
use tracing::trace;

/// A 2D vector in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
	pub x: f64,
	pub y: f64,
}

impl Offset {
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

impl Add for Offset {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Offset {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self::new(self.x - rhs.x, self.y - rhs.y)
	}
}

/// One gesture in progress: what is being moved, and where the pointer grabbed it.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture<T = Collection> {
	pub target: T,
	/// The pointer's position relative to the target's own position when the gesture began.
	pub origin: Offset,
}

impl<T> Gesture<T> {
	/// Starts a gesture on `target`, currently at `position`, grabbed with the pointer at `pointer`.
	pub fn new(target: T, pointer: Offset, position: Offset) -> Self {
		Self {
			target,
			origin: pointer - position,
		}
	}

	/// Where the target should be with the pointer at `pointer`, keeping the grab point under it.
	#[must_use]
	pub fn displacement(&self, pointer: Offset) -> Offset {
		pointer - self.origin
	}
}

/// Holds the current [`Gesture`], if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Session<T = Collection> {
	current: Option<Gesture<T>>,
}

impl<T> Default for Session<T> {
	fn default() -> Self {
		Self { current: None }
	}
}

impl<T> Session<T> {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes `gesture` current, returning the one it replaces.
	pub fn begin(&mut self, gesture: Gesture<T>) -> Option<Gesture<T>> {
		let replaced = self.current.replace(gesture);
		if replaced.is_some() {
			trace!("Replaced an unfinished gesture.");
		}
		replaced
	}

	#[must_use]
	pub fn gesture(&self) -> Option<&Gesture<T>> {
		self.current.as_ref()
	}

	/// The current gesture's [`displacement`](Gesture::displacement) for `pointer`.
	#[must_use]
	pub fn displacement(&self, pointer: Offset) -> Option<Offset> {
		self.current.as_ref().map(|gesture| gesture.displacement(pointer))
	}

	/// Clears and returns the current gesture. Ending with no gesture in progress does nothing.
	pub fn end(&mut self) -> Option<Gesture<T>> {
		self.current.take()
	}

	#[must_use]
	pub fn is_active(&self) -> bool {
		self.current.is_some()
	}
}
