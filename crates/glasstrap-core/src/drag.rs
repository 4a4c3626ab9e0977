#![forbid(unsafe_code)]

//! Per-fragment drag controller.
//!
//! [`FragmentController`] owns one [`Fragment`] and its transient drag
//! session. It turns host pointer lifecycle signals into fragment moves and
//! returns explicit pointer-capture commands that a DOM host can wire to
//! `setPointerCapture()` / `releasePointerCapture()`.
//!
//! # State Machine
//!
//! ```text
//!   Idle --pointer_down (accepting, not placed)--> Dragging
//!   Dragging --pointer_move (same pointer)--> Dragging
//!   Dragging --pointer_up | pointer_cancel | lost_pointer_capture--> Idle
//! ```
//!
//! # Invariants
//!
//! 1. At most one pointer owns a fragment. Events from other pointers are
//!    ignored while a session is open; other fragments may be dragged by
//!    other pointers concurrently.
//! 2. Dragging changes translation only. The new offset is always
//!    `origin_offset + (pointer - press_pointer)`; there is no snapping
//!    mid-drag.
//! 3. A release snaps iff `distance_from_home <= snap_threshold` (inclusive).
//!    A snap forces the identity transform and sets `placed`.
//! 4. A release beyond the threshold leaves the fragment where it was dropped.
//! 5. Release coordinates never move the fragment: up and cancel both check
//!    the offset of the last accepted move.
//!
//! # Failure Modes
//!
//! - Release/move with no open session or a foreign pointer: ignored with a
//!   reason, never an error.
//! - A pointer lost without any up/cancel: the session stays open until the
//!   host reports `lost_pointer_capture` or the puzzle restarts.

use std::fmt;

use tracing::{debug, trace};

use crate::fragment::{Fragment, FragmentId};
use crate::geometry::{Offset, PointerId, PointerPosition, Transform};
use crate::transition::Transition;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default snap radius in fragment-local units.
pub const DEFAULT_SNAP_THRESHOLD: f32 = 24.0;

/// Drag/snap tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragConfig {
    /// Maximum release distance from home that still counts as placed.
    pub snap_threshold: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    pointer_id: PointerId,
    press_position: PointerPosition,
    origin: Offset,
}

/// Host command for browser pointer-capture control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum CaptureCommand {
    Acquire {
        fragment: FragmentId,
        pointer_id: PointerId,
    },
    Release {
        fragment: FragmentId,
        pointer_id: PointerId,
    },
}

/// Lifecycle phase recorded for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    LostPointerCapture,
}

impl DragPhase {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PointerDown => "pointer_down",
            Self::PointerMove => "pointer_move",
            Self::PointerUp => "pointer_up",
            Self::PointerCancel => "pointer_cancel",
            Self::LostPointerCapture => "lost_pointer_capture",
        }
    }
}

/// Why an incoming pointer signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragIgnoredReason {
    /// The puzzle is not accepting drags (not yet armed, or already solved).
    NotAccepting,
    /// The fragment is already snapped home.
    AlreadyPlaced,
    /// Another pointer already owns this fragment.
    SessionInProgress,
    NoActiveSession,
    PointerMismatch,
    /// The host targeted a fragment id that does not exist.
    UnknownFragment,
}

impl DragIgnoredReason {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotAccepting => "not_accepting",
            Self::AlreadyPlaced => "already_placed",
            Self::SessionInProgress => "session_in_progress",
            Self::NoActiveSession => "no_active_session",
            Self::PointerMismatch => "pointer_mismatch",
            Self::UnknownFragment => "unknown_fragment",
        }
    }
}

/// Result category of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Started,
    Moved,
    /// Released within the threshold and snapped home.
    Snapped,
    /// Released beyond the threshold; left in place.
    Dropped,
    Ignored(DragIgnoredReason),
}

impl DragOutcome {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Moved => "moved",
            Self::Snapped => "snapped",
            Self::Dropped => "dropped",
            Self::Ignored(_) => "ignored",
        }
    }
}

/// Structured log record for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragLogEntry {
    pub phase: DragPhase,
    pub fragment: FragmentId,
    pub pointer_id: Option<PointerId>,
    pub position: Option<PointerPosition>,
    /// Fragment offset after the dispatch.
    pub offset: Offset,
    pub outcome: DragOutcome,
}

impl fmt::Display for DragLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fragment_drag phase={} fragment={}",
            self.phase.label(),
            self.fragment
        )?;
        if let Some(pointer) = self.pointer_id {
            write!(f, " pointer={}", pointer.get())?;
        }
        if let Some(pos) = self.position {
            write!(f, " x={} y={}", pos.x, pos.y)?;
        }
        write!(
            f,
            " offset_x={} offset_y={} outcome={}",
            self.offset.x,
            self.offset.y,
            self.outcome.label()
        )?;
        if let DragOutcome::Ignored(reason) = self.outcome {
            write!(f, " reason={}", reason.label())?;
        }
        Ok(())
    }
}

/// Result of one pointer lifecycle dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragDispatch {
    pub outcome: DragOutcome,
    pub capture_command: Option<CaptureCommand>,
    /// Transition to install before (or instead of) a transform update.
    pub transition: Option<Transition>,
    /// Transform the presentation layer should now show.
    pub transform: Option<Transform>,
    pub log: DragLogEntry,
}

impl DragDispatch {
    /// Whether the signal changed controller state.
    #[must_use]
    pub const fn accepted(&self) -> bool {
        !matches!(self.outcome, DragOutcome::Ignored(_))
    }

    /// Whether this dispatch produced a placement event.
    #[must_use]
    pub const fn snapped(&self) -> bool {
        matches!(self.outcome, DragOutcome::Snapped)
    }

    /// Dispatch for a signal addressed to a fragment that does not exist.
    #[must_use]
    pub fn unknown_fragment(
        phase: DragPhase,
        fragment: FragmentId,
        pointer_id: PointerId,
        position: Option<PointerPosition>,
    ) -> Self {
        trace!(fragment = fragment.get(), pointer = pointer_id.get(), phase = phase.label(), "unknown fragment");
        Self {
            outcome: DragOutcome::Ignored(DragIgnoredReason::UnknownFragment),
            capture_command: None,
            transition: None,
            transform: None,
            log: DragLogEntry {
                phase,
                fragment,
                pointer_id: Some(pointer_id),
                position,
                offset: Offset::HOME,
                outcome: DragOutcome::Ignored(DragIgnoredReason::UnknownFragment),
            },
        }
    }
}

/// Drag controller for one fragment.
#[derive(Debug, Clone)]
pub struct FragmentController {
    fragment: Fragment,
    config: DragConfig,
    session: Option<DragSession>,
}

impl FragmentController {
    #[must_use]
    pub const fn new(id: FragmentId, config: DragConfig) -> Self {
        Self {
            fragment: Fragment::new(id),
            config,
            session: None,
        }
    }

    #[must_use]
    pub const fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    #[must_use]
    pub const fn id(&self) -> FragmentId {
        self.fragment.id()
    }

    #[must_use]
    pub const fn config(&self) -> DragConfig {
        self.config
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Pointer owning the open drag session, if any.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<PointerId> {
        self.session.map(|s| s.pointer_id)
    }

    /// Apply a scatter target. Clears `placed`.
    pub fn scatter_to(&mut self, transform: Transform) {
        self.fragment.set_transform(transform);
    }

    /// Drop any open session and clear `placed`, keeping the transform.
    ///
    /// Returns the capture release the host should perform, if a session was
    /// open.
    pub fn reset(&mut self) -> Option<CaptureCommand> {
        self.fragment.unplace();
        self.session.take().map(|session| CaptureCommand::Release {
            fragment: self.fragment.id(),
            pointer_id: session.pointer_id,
        })
    }

    /// Handle pointer-down on this fragment.
    ///
    /// `accepting` is the coordinator's "puzzle active" flag.
    pub fn pointer_down(
        &mut self,
        accepting: bool,
        pointer_id: PointerId,
        position: PointerPosition,
    ) -> DragDispatch {
        let phase = DragPhase::PointerDown;
        if !accepting {
            return self.ignored(phase, DragIgnoredReason::NotAccepting, pointer_id, Some(position));
        }
        if self.fragment.is_placed() {
            return self.ignored(phase, DragIgnoredReason::AlreadyPlaced, pointer_id, Some(position));
        }
        if self.session.is_some() {
            return self.ignored(
                phase,
                DragIgnoredReason::SessionInProgress,
                pointer_id,
                Some(position),
            );
        }

        self.session = Some(DragSession {
            pointer_id,
            press_position: position,
            origin: self.fragment.translation(),
        });
        debug!(
            fragment = self.fragment.id().get(),
            pointer = pointer_id.get(),
            "drag started"
        );
        DragDispatch {
            outcome: DragOutcome::Started,
            capture_command: Some(CaptureCommand::Acquire {
                fragment: self.fragment.id(),
                pointer_id,
            }),
            transition: Some(Transition::None),
            transform: None,
            log: self.log(phase, Some(pointer_id), Some(position), DragOutcome::Started),
        }
    }

    /// Handle pointer-move while dragging.
    pub fn pointer_move(&mut self, pointer_id: PointerId, position: PointerPosition) -> DragDispatch {
        let phase = DragPhase::PointerMove;
        let session = match self.owned_session(pointer_id) {
            Ok(session) => session,
            Err(reason) => return self.ignored(phase, reason, pointer_id, Some(position)),
        };

        self.track(session, position);
        DragDispatch {
            outcome: DragOutcome::Moved,
            capture_command: None,
            transition: None,
            transform: Some(self.fragment.transform()),
            log: self.log(phase, Some(pointer_id), Some(position), DragOutcome::Moved),
        }
    }

    /// Handle pointer-up. The snap check uses the offset the last move left;
    /// `position` is only recorded in the log.
    pub fn pointer_up(&mut self, pointer_id: PointerId, position: PointerPosition) -> DragDispatch {
        let phase = DragPhase::PointerUp;
        match self.owned_session(pointer_id) {
            Ok(session) => self.release(phase, session, Some(position)),
            Err(reason) => self.ignored(phase, reason, pointer_id, Some(position)),
        }
    }

    /// Handle pointer-cancel: same cleanup as pointer-up, position is whatever
    /// the last move left.
    pub fn pointer_cancel(&mut self, pointer_id: PointerId) -> DragDispatch {
        let phase = DragPhase::PointerCancel;
        match self.owned_session(pointer_id) {
            Ok(session) => self.release(phase, session, None),
            Err(reason) => self.ignored(phase, reason, pointer_id, None),
        }
    }

    /// Handle the host losing pointer capture without an up/cancel.
    pub fn lost_pointer_capture(&mut self, pointer_id: PointerId) -> DragDispatch {
        let phase = DragPhase::LostPointerCapture;
        match self.owned_session(pointer_id) {
            Ok(session) => self.release(phase, session, None),
            Err(reason) => self.ignored(phase, reason, pointer_id, None),
        }
    }

    fn owned_session(&self, pointer_id: PointerId) -> Result<DragSession, DragIgnoredReason> {
        let session = self.session.ok_or(DragIgnoredReason::NoActiveSession)?;
        if session.pointer_id != pointer_id {
            return Err(DragIgnoredReason::PointerMismatch);
        }
        Ok(session)
    }

    fn track(&mut self, session: DragSession, position: PointerPosition) {
        let delta = position.delta_from(session.press_position);
        self.fragment.set_translation(session.origin + delta);
    }

    fn release(
        &mut self,
        phase: DragPhase,
        session: DragSession,
        position: Option<PointerPosition>,
    ) -> DragDispatch {
        self.session = None;
        let distance = self.fragment.translation().distance_from_home();
        let outcome = if distance <= self.config.snap_threshold {
            self.fragment.snap_home();
            DragOutcome::Snapped
        } else {
            DragOutcome::Dropped
        };
        debug!(
            fragment = self.fragment.id().get(),
            pointer = session.pointer_id.get(),
            distance,
            outcome = outcome.label(),
            "drag released"
        );

        DragDispatch {
            outcome,
            capture_command: Some(CaptureCommand::Release {
                fragment: self.fragment.id(),
                pointer_id: session.pointer_id,
            }),
            transition: Some(Transition::Settle),
            transform: Some(self.fragment.transform()),
            log: self.log(phase, Some(session.pointer_id), position, outcome),
        }
    }

    fn ignored(
        &self,
        phase: DragPhase,
        reason: DragIgnoredReason,
        pointer_id: PointerId,
        position: Option<PointerPosition>,
    ) -> DragDispatch {
        trace!(
            fragment = self.fragment.id().get(),
            pointer = pointer_id.get(),
            phase = phase.label(),
            reason = reason.label(),
            "pointer signal ignored"
        );
        let outcome = DragOutcome::Ignored(reason);
        DragDispatch {
            outcome,
            capture_command: None,
            transition: None,
            transform: None,
            log: self.log(phase, Some(pointer_id), position, outcome),
        }
    }

    fn log(
        &self,
        phase: DragPhase,
        pointer_id: Option<PointerId>,
        position: Option<PointerPosition>,
        outcome: DragOutcome,
    ) -> DragLogEntry {
        DragLogEntry {
            phase,
            fragment: self.fragment.id(),
            pointer_id,
            position,
            offset: self.fragment.translation(),
            outcome,
        }
    }
}
