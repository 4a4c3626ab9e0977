#![forbid(unsafe_code)]

//! Local 2D geometry for fragments and pointers.
//!
//! All fragment coordinates are offsets from the fragment's home position,
//! which is always `(0, 0)` in the fragment's own coordinate space. Pointer
//! coordinates are host client coordinates; only their differences matter.

use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Translation of a fragment away from its home position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    /// The home position.
    pub const HOME: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance from home.
    #[must_use]
    pub fn distance_from_home(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// True only for the exact home position.
    #[must_use]
    pub fn is_home(self) -> bool {
        self == Self::HOME
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

/// Full visual transform of a fragment: translation plus rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    pub offset: Offset,
    /// Rotation in degrees, clockwise.
    pub rotation_deg: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        offset: Offset::HOME,
        rotation_deg: 0.0,
    };

    #[must_use]
    pub const fn new(x: f32, y: f32, rotation_deg: f32) -> Self {
        Self {
            offset: Offset::new(x, y),
            rotation_deg,
        }
    }

    /// Same rotation, different translation.
    #[must_use]
    pub const fn with_offset(self, offset: Offset) -> Self {
        Self {
            offset,
            rotation_deg: self.rotation_deg,
        }
    }

    /// CSS `transform` value for DOM hosts.
    #[must_use]
    pub fn css_value(&self) -> String {
        format!(
            "translate({}px, {}px) rotate({}deg)",
            self.offset.x, self.offset.y, self.rotation_deg
        )
    }
}

/// Stable identity of a pointer (mouse, pen, or one touch contact).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointerId(pub u32);

impl PointerId {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Pointer location in host client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Displacement from `origin` to `self`.
    #[must_use]
    pub fn delta_from(self, origin: Self) -> Offset {
        Offset::new(self.x - origin.x, self.y - origin.y)
    }
}
