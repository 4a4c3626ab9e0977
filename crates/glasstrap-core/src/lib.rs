#![forbid(unsafe_code)]

//! Core: fragment geometry, scatter sampling, and drag/snap state machines.
//!
//! # Role in glasstrap
//! `glasstrap-core` is the leaf model layer. It knows nothing about the
//! button lifecycle or the host document; it only owns per-fragment state and
//! the rules for moving a fragment with a pointer and snapping it home.
//!
//! # Primary responsibilities
//! - **Geometry**: [`Offset`](geometry::Offset), [`Transform`](geometry::Transform)
//!   and pointer coordinates.
//! - **Fragment**: identity, owned transform, `placed` flag. The owned
//!   transform doubles as the coordinate tracker.
//! - **Scatter**: random shatter targets inside a distance/rotation band.
//! - **Drag**: one [`FragmentController`](drag::FragmentController) per
//!   fragment, enforcing single-pointer exclusivity and inclusive snapping.
//! - **Timer**: a host-driven one-shot timer queue for the arm and cooldown
//!   delays.
//!
//! # How it fits in the system
//! `glasstrap-widget` composes these pieces into the puzzle coordinator and
//! the interaction gate. `glasstrap-web` exposes the widget to a JS host.

pub mod drag;
pub mod fragment;
pub mod geometry;
pub mod scatter;
pub mod timer;
pub mod transition;

pub use drag::{
    CaptureCommand, DragConfig, DragDispatch, DragIgnoredReason, DragLogEntry, DragOutcome,
    DragPhase, FragmentController,
};
pub use fragment::{Fragment, FragmentId};
pub use geometry::{Offset, PointerId, PointerPosition, Transform};
pub use scatter::{ScatterConfig, ScatterGenerator};
pub use timer::TimerQueue;
pub use transition::{Easing, Transition, TransitionSpec};
