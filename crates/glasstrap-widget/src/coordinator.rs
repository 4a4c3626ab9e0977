#![forbid(unsafe_code)]

//! Puzzle coordinator: owns the fragments and detects the full solve.
//!
//! # Invariants
//!
//! 1. Drags are accepted only while `active`.
//! 2. The solve check runs synchronously on every placement, so the last
//!    snap of a puzzle is always the one that reports the solve.
//! 3. A solve is reported once: reporting it clears `active`, which also
//!    rejects further drags before the cooldown has elapsed.
//! 4. [`PuzzleCoordinator::check_solved`] with fewer than all fragments
//!    placed has no effect, however often it is called.

use std::time::Duration;

use glasstrap_core::{
    CaptureCommand, DragConfig, DragDispatch, DragPhase, FragmentController, FragmentId,
    PointerId, PointerPosition, ScatterGenerator, Transform,
};
use tracing::debug;

/// Emitted when the last fragment snaps home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveNotice {
    /// Delay before the button may come back.
    pub cooldown: Duration,
}

/// Per-fragment result of [`PuzzleCoordinator::start`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterUpdate {
    pub fragment: FragmentId,
    pub transform: Transform,
    /// Pointer capture to release if a stale session was still open.
    pub released: Option<CaptureCommand>,
}

/// Pointer dispatch plus the solve check it may have triggered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerResult {
    pub dispatch: DragDispatch,
    pub solved: Option<SolveNotice>,
}

/// Owns every fragment controller of one widget.
#[derive(Debug, Clone)]
pub struct PuzzleCoordinator {
    fragments: Vec<FragmentController>,
    active: bool,
    solve_cooldown: Duration,
}

impl PuzzleCoordinator {
    /// `count` fragments, all at home, inactive.
    #[must_use]
    pub fn new(count: u32, drag: DragConfig, solve_cooldown: Duration) -> Self {
        Self {
            fragments: (0..count)
                .map(|i| FragmentController::new(FragmentId(i), drag))
                .collect(),
            active: false,
            solve_cooldown,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    #[must_use]
    pub fn fragment(&self, id: FragmentId) -> Option<&FragmentController> {
        self.fragments.get(id.index())
    }

    pub fn fragments(&self) -> impl Iterator<Item = &FragmentController> {
        self.fragments.iter()
    }

    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.fragments
            .iter()
            .filter(|c| c.fragment().is_placed())
            .count()
    }

    #[must_use]
    pub fn all_placed(&self) -> bool {
        self.fragments.iter().all(|c| c.fragment().is_placed())
    }

    /// Reset placement and scatter every fragment. Does not arm.
    pub fn start(&mut self, scatter: &mut ScatterGenerator) -> Vec<ScatterUpdate> {
        self.fragments
            .iter_mut()
            .map(|controller| {
                let released = controller.reset();
                let transform = scatter.sample();
                controller.scatter_to(transform);
                ScatterUpdate {
                    fragment: controller.id(),
                    transform,
                    released,
                }
            })
            .collect()
    }

    /// Begin accepting drags.
    pub fn arm(&mut self) {
        self.active = true;
        debug!(fragments = self.fragments.len(), "puzzle armed");
    }

    /// Report the solve if every fragment is placed and it was not yet
    /// reported.
    pub fn check_solved(&mut self) -> Option<SolveNotice> {
        if !self.active || !self.all_placed() {
            return None;
        }
        self.active = false;
        debug!(cooldown = ?self.solve_cooldown, "puzzle solved");
        Some(SolveNotice {
            cooldown: self.solve_cooldown,
        })
    }

    pub fn pointer_down(
        &mut self,
        fragment: FragmentId,
        pointer_id: PointerId,
        position: PointerPosition,
    ) -> PointerResult {
        let accepting = self.active;
        self.route(DragPhase::PointerDown, fragment, pointer_id, Some(position), |c| {
            c.pointer_down(accepting, pointer_id, position)
        })
    }

    pub fn pointer_move(
        &mut self,
        fragment: FragmentId,
        pointer_id: PointerId,
        position: PointerPosition,
    ) -> PointerResult {
        self.route(DragPhase::PointerMove, fragment, pointer_id, Some(position), |c| {
            c.pointer_move(pointer_id, position)
        })
    }

    pub fn pointer_up(
        &mut self,
        fragment: FragmentId,
        pointer_id: PointerId,
        position: PointerPosition,
    ) -> PointerResult {
        self.route(DragPhase::PointerUp, fragment, pointer_id, Some(position), |c| {
            c.pointer_up(pointer_id, position)
        })
    }

    pub fn pointer_cancel(&mut self, fragment: FragmentId, pointer_id: PointerId) -> PointerResult {
        self.route(DragPhase::PointerCancel, fragment, pointer_id, None, |c| {
            c.pointer_cancel(pointer_id)
        })
    }

    pub fn lost_pointer_capture(
        &mut self,
        fragment: FragmentId,
        pointer_id: PointerId,
    ) -> PointerResult {
        self.route(DragPhase::LostPointerCapture, fragment, pointer_id, None, |c| {
            c.lost_pointer_capture(pointer_id)
        })
    }

    fn route(
        &mut self,
        phase: DragPhase,
        fragment: FragmentId,
        pointer_id: PointerId,
        position: Option<PointerPosition>,
        apply: impl FnOnce(&mut FragmentController) -> DragDispatch,
    ) -> PointerResult {
        let Some(controller) = self.fragments.get_mut(fragment.index()) else {
            return PointerResult {
                dispatch: DragDispatch::unknown_fragment(phase, fragment, pointer_id, position),
                solved: None,
            };
        };
        let dispatch = apply(controller);
        let solved = if dispatch.snapped() {
            self.check_solved()
        } else {
            None
        };
        PointerResult { dispatch, solved }
    }
}
