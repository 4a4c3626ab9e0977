#![forbid(unsafe_code)]

//! Fragment state.
//!
//! A [`Fragment`] owns its current transform explicitly. Reading the
//! translation back ([`Fragment::translation`]) is the coordinate tracker:
//! it reflects whatever was applied last, including intermediate drag
//! positions, and is `(0, 0)` before any transform was applied.
//!
//! # Invariants
//!
//! 1. `placed` implies the transform is exactly [`Transform::IDENTITY`].
//! 2. `placed` is only set by [`Fragment::snap_home`]; being near home is not
//!    enough.

use std::fmt;

use crate::geometry::{Offset, Transform};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable fragment identity (index of the physical piece).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FragmentId(pub u32);

impl FragmentId {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One visual piece of the shattered button.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    id: FragmentId,
    transform: Transform,
    placed: bool,
}

impl Fragment {
    /// New fragment at home, not placed.
    #[must_use]
    pub const fn new(id: FragmentId) -> Self {
        Self {
            id,
            transform: Transform::IDENTITY,
            placed: false,
        }
    }

    #[must_use]
    pub const fn id(&self) -> FragmentId {
        self.id
    }

    #[must_use]
    pub const fn transform(&self) -> Transform {
        self.transform
    }

    /// Current offset from home.
    #[must_use]
    pub const fn translation(&self) -> Offset {
        self.transform.offset
    }

    #[must_use]
    pub const fn is_placed(&self) -> bool {
        self.placed
    }

    /// Replace the whole transform (scatter). Clears `placed`.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.placed = false;
    }

    /// Move without touching rotation.
    pub fn set_translation(&mut self, offset: Offset) {
        self.transform = self.transform.with_offset(offset);
        self.placed = false;
    }

    /// Hard snap: identity transform and `placed = true`.
    pub fn snap_home(&mut self) {
        self.transform = Transform::IDENTITY;
        self.placed = true;
    }

    /// Clear `placed` without moving.
    pub fn unplace(&mut self) {
        self.placed = false;
    }
}
