#![forbid(unsafe_code)]

//! Interaction gate: the top-level lifecycle of one widget mount.
//!
//! # State Machine
//!
//! ```text
//!            activate                 last snap              cooldown
//!   Armed ------------> PuzzleActive ----------> ResolvedPending -------> ReadyToEnd
//!                                                                            |
//!                                                                   activate |
//!                                                                            v
//!                                                                          Ended
//! ```
//!
//! | State | On activation |
//! |---|---|
//! | `Armed` | prevent default, shatter |
//! | `PuzzleActive` | prevent default, nothing else |
//! | `ResolvedPending` | prevent default (button is disabled anyway) |
//! | `ReadyToEnd` | run the final action, move to `Ended` |
//! | `Ended` | nothing |
//!
//! # Continuations
//!
//! The arm delay and the solve cooldown are one-shot timer continuations
//! driven by [`ShatterButton::advance`]. Neither can be cancelled; each
//! checks the lifecycle again when it fires and does nothing if the world
//! moved on.
//!
//! # Invariants
//!
//! 1. The final action runs at most once per mount.
//! 2. While `PuzzleActive`, activation neither shatters nor ends.
//! 3. `ReadyToEnd` is only reachable through a reported solve followed by
//!    the cooldown.

use std::fmt;
use std::time::Duration;

use glasstrap_core::{
    DragDispatch, DragOutcome, FragmentId, PointerId, PointerPosition, ScatterGenerator,
    TimerQueue, Transform, Transition,
};
use tracing::{debug, info, trace};

use crate::config::WidgetConfig;
use crate::coordinator::{PointerResult, PuzzleCoordinator, SolveNotice};
use crate::host::{
    FragmentMarker, HostCommand, HostDocument, LabelTarget, MountError, WidgetMarker,
};

/// Lifecycle of one widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Trap set: the next activation shatters.
    Armed,
    /// Fragments scattered, not yet solved.
    PuzzleActive,
    /// Solved; waiting for the cooldown.
    ResolvedPending,
    /// Button re-enabled; the next activation runs the final action.
    ReadyToEnd,
    /// Final action done; button permanently disabled.
    Ended,
}

impl Lifecycle {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Armed => "armed",
            Self::PuzzleActive => "puzzle_active",
            Self::ResolvedPending => "resolved_pending",
            Self::ReadyToEnd => "ready_to_end",
            Self::Ended => "ended",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What an activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    Shattered,
    /// Puzzle unsolved (or cooling down); the button is inert.
    Inert,
    FinalAction,
    /// Already ended.
    Ignored,
}

impl ActivationOutcome {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shattered => "shattered",
            Self::Inert => "inert",
            Self::FinalAction => "final_action",
            Self::Ignored => "ignored",
        }
    }
}

/// Result of a primary-button activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    /// Whether the host should suppress the activation's default action.
    pub prevent_default: bool,
    pub outcome: ActivationOutcome,
}

/// Timer continuations owned by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    ArmPuzzle,
    Reenable,
}

/// One mounted shatter button.
pub struct ShatterButton {
    config: WidgetConfig,
    label_target: LabelTarget,
    lifecycle: Lifecycle,
    coordinator: PuzzleCoordinator,
    scatter: ScatterGenerator,
    timers: TimerQueue<Continuation>,
    status: String,
    label: Option<String>,
    button_enabled: bool,
    final_action: Option<Box<dyn FnMut()>>,
    final_action_runs: u32,
    commands: Vec<HostCommand>,
    logs: Vec<String>,
}

impl fmt::Debug for ShatterButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShatterButton")
            .field("lifecycle", &self.lifecycle)
            .field("active", &self.coordinator.is_active())
            .field("placed", &self.coordinator.placed_count())
            .field("fragments", &self.coordinator.len())
            .field("pending_timers", &self.timers.pending())
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl ShatterButton {
    /// Validate the host document and config, then mount.
    ///
    /// On error nothing is mounted; hosts treat that as a silent no-op.
    pub fn mount(document: HostDocument, config: WidgetConfig) -> Result<Self, MountError> {
        document.validate()?;
        config.validate()?;

        let coordinator = PuzzleCoordinator::new(
            document.fragment_count,
            config.drag,
            config.timing.solve_cooldown(),
        );
        let commands = coordinator
            .fragments()
            .map(|c| HostCommand::transform(c.id(), Transform::IDENTITY))
            .collect();
        debug!(fragments = document.fragment_count, "widget mounted");

        Ok(Self {
            scatter: ScatterGenerator::from_os_rng(config.scatter),
            config,
            label_target: document.label_target(),
            lifecycle: Lifecycle::Armed,
            coordinator,
            timers: TimerQueue::new(),
            status: String::new(),
            label: None,
            button_enabled: true,
            final_action: None,
            final_action_runs: 0,
            commands,
            logs: Vec::new(),
        })
    }

    /// Replace the scatter source (seeded generators for replays and tests).
    #[must_use]
    pub fn with_scatter(mut self, scatter: ScatterGenerator) -> Self {
        self.scatter = scatter;
        self
    }

    /// Install the effect performed once the puzzle is solved and the button
    /// is activated again.
    #[must_use]
    pub fn on_final_action(mut self, action: impl FnMut() + 'static) -> Self {
        self.final_action = Some(Box::new(action));
        self
    }

    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[must_use]
    pub const fn coordinator(&self) -> &PuzzleCoordinator {
        &self.coordinator
    }

    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Current status text (empty until the first update).
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Label override, once one was applied.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub const fn button_enabled(&self) -> bool {
        self.button_enabled
    }

    /// How many times an installed final action ran (0 or 1).
    #[must_use]
    pub const fn final_action_runs(&self) -> u32 {
        self.final_action_runs
    }

    /// Current monotonic time of the widget clock.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Earliest pending continuation deadline, for hosts that schedule a
    /// wake-up instead of ticking every frame.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Drain pending presentation commands, in application order.
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Drain structured log lines.
    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }

    /// Primary-button activation.
    pub fn activate(&mut self) -> Activation {
        match self.lifecycle {
            Lifecycle::Armed => {
                self.shatter();
                Activation {
                    prevent_default: true,
                    outcome: ActivationOutcome::Shattered,
                }
            }
            Lifecycle::PuzzleActive | Lifecycle::ResolvedPending => {
                trace!(lifecycle = self.lifecycle.label(), "activation ignored while unsolved");
                Activation {
                    prevent_default: true,
                    outcome: ActivationOutcome::Inert,
                }
            }
            Lifecycle::ReadyToEnd => {
                self.end();
                Activation {
                    prevent_default: false,
                    outcome: ActivationOutcome::FinalAction,
                }
            }
            Lifecycle::Ended => Activation {
                prevent_default: false,
                outcome: ActivationOutcome::Ignored,
            },
        }
    }

    pub fn pointer_down(
        &mut self,
        fragment: FragmentId,
        pointer_id: PointerId,
        position: PointerPosition,
    ) -> DragDispatch {
        let result = self.coordinator.pointer_down(fragment, pointer_id, position);
        self.apply_pointer_result(result)
    }

    pub fn pointer_move(
        &mut self,
        fragment: FragmentId,
        pointer_id: PointerId,
        position: PointerPosition,
    ) -> DragDispatch {
        let result = self.coordinator.pointer_move(fragment, pointer_id, position);
        self.apply_pointer_result(result)
    }

    pub fn pointer_up(
        &mut self,
        fragment: FragmentId,
        pointer_id: PointerId,
        position: PointerPosition,
    ) -> DragDispatch {
        let result = self.coordinator.pointer_up(fragment, pointer_id, position);
        self.apply_pointer_result(result)
    }

    pub fn pointer_cancel(&mut self, fragment: FragmentId, pointer_id: PointerId) -> DragDispatch {
        let result = self.coordinator.pointer_cancel(fragment, pointer_id);
        self.apply_pointer_result(result)
    }

    pub fn lost_pointer_capture(
        &mut self,
        fragment: FragmentId,
        pointer_id: PointerId,
    ) -> DragDispatch {
        let result = self.coordinator.lost_pointer_capture(fragment, pointer_id);
        self.apply_pointer_result(result)
    }

    /// Advance the widget clock by `dt` and run due continuations.
    pub fn advance(&mut self, dt: Duration) {
        self.timers.advance(dt);
        self.run_due();
    }

    /// Move the widget clock to `now` (monotonic) and run due continuations.
    pub fn set_time(&mut self, now: Duration) {
        self.timers.set_now(now);
        self.run_due();
    }

    fn run_due(&mut self) {
        for continuation in self.timers.drain_due() {
            match continuation {
                Continuation::ArmPuzzle => self.arm_puzzle(),
                Continuation::Reenable => self.reenable(),
            }
        }
    }

    fn shatter(&mut self) {
        self.set_status(self.config.messages.shattered.clone());
        self.commands
            .push(HostCommand::widget_marker(WidgetMarker::Shattered, true));
        self.set_button_enabled(false);

        let updates = self.coordinator.start(&mut self.scatter);
        let scatter = self.transition_css(Transition::Scatter);
        for update in updates {
            if let Some(release) = update.released {
                self.commands.push(release.into());
                self.commands.push(HostCommand::fragment_marker(
                    update.fragment,
                    FragmentMarker::Dragging,
                    false,
                ));
            }
            self.commands.push(HostCommand::fragment_marker(
                update.fragment,
                FragmentMarker::Placed,
                false,
            ));
            self.commands.push(HostCommand::SetTransition {
                fragment: update.fragment,
                transition: Transition::Scatter,
                css: scatter.clone(),
            });
            self.commands
                .push(HostCommand::transform(update.fragment, update.transform));
        }

        self.transition_to(Lifecycle::PuzzleActive, "activate");
        self.timers
            .schedule(self.config.timing.arm_delay(), Continuation::ArmPuzzle);
    }

    fn arm_puzzle(&mut self) {
        let stale = self.lifecycle != Lifecycle::PuzzleActive
            || self.coordinator.is_active()
            || self.coordinator.all_placed();
        if stale {
            trace!(lifecycle = self.lifecycle.label(), "arm continuation skipped");
            self.logs.push(format!(
                "continuation name=arm_puzzle skipped lifecycle={}",
                self.lifecycle
            ));
            return;
        }
        self.coordinator.arm();
        self.commands
            .push(HostCommand::widget_marker(WidgetMarker::PuzzleMode, true));
        self.set_status(self.config.messages.puzzle_started.clone());
        self.logs
            .push("continuation name=arm_puzzle applied".to_string());
    }

    fn solved(&mut self, notice: SolveNotice) {
        if self.lifecycle != Lifecycle::PuzzleActive {
            return;
        }
        self.commands
            .push(HostCommand::widget_marker(WidgetMarker::PuzzleMode, false));
        self.transition_to(Lifecycle::ResolvedPending, "solved");
        self.timers.schedule(notice.cooldown, Continuation::Reenable);
    }

    fn reenable(&mut self) {
        if self.lifecycle != Lifecycle::ResolvedPending {
            trace!(lifecycle = self.lifecycle.label(), "reenable continuation skipped");
            self.logs.push(format!(
                "continuation name=reenable skipped lifecycle={}",
                self.lifecycle
            ));
            return;
        }
        self.commands
            .push(HostCommand::widget_marker(WidgetMarker::Shattered, false));
        self.set_button_enabled(true);
        self.transition_to(Lifecycle::ReadyToEnd, "cooldown");
        self.set_status(self.config.messages.solved.clone());
        self.commands.push(HostCommand::FocusButton);
    }

    fn end(&mut self) {
        self.transition_to(Lifecycle::Ended, "activate");
        self.commands
            .push(HostCommand::widget_marker(WidgetMarker::Ended, true));
        self.set_button_enabled(false);

        let text = self.config.messages.ended_label.clone();
        self.commands.push(HostCommand::SetLabel {
            target: self.label_target,
            text: text.clone(),
        });
        self.label = Some(text);
        self.set_status(self.config.messages.ended.clone());

        if let Some(mut action) = self.final_action.take() {
            action();
            self.final_action_runs += 1;
            info!("final action performed");
        } else {
            debug!("ended without a final action installed");
        }
    }

    fn apply_pointer_result(&mut self, result: PointerResult) -> DragDispatch {
        let PointerResult { dispatch, solved } = result;
        let fragment = dispatch.log.fragment;
        self.logs.push(dispatch.log.to_string());

        match dispatch.outcome {
            DragOutcome::Ignored(_) => return dispatch,
            DragOutcome::Started => {
                self.commands.push(HostCommand::fragment_marker(
                    fragment,
                    FragmentMarker::Dragging,
                    true,
                ));
            }
            DragOutcome::Moved => {}
            DragOutcome::Snapped | DragOutcome::Dropped => {
                self.commands.push(HostCommand::fragment_marker(
                    fragment,
                    FragmentMarker::Dragging,
                    false,
                ));
            }
        }
        if let Some(transition) = dispatch.transition {
            self.commands.push(HostCommand::SetTransition {
                fragment,
                transition,
                css: self.transition_css(transition),
            });
        }
        if let Some(capture) = dispatch.capture_command {
            self.commands.push(capture.into());
        }
        if dispatch.snapped() {
            self.commands.push(HostCommand::fragment_marker(
                fragment,
                FragmentMarker::Placed,
                true,
            ));
        }
        if let Some(transform) = dispatch.transform {
            self.commands.push(HostCommand::transform(fragment, transform));
        }
        if let Some(notice) = solved {
            self.solved(notice);
        }
        dispatch
    }

    fn transition_css(&self, transition: Transition) -> String {
        transition
            .spec(self.config.timing.settle(), self.config.timing.scatter())
            .css_value()
    }

    fn transition_to(&mut self, next: Lifecycle, event: &'static str) {
        let previous = self.lifecycle;
        self.lifecycle = next;
        debug!(from = previous.label(), to = next.label(), event, "lifecycle transition");
        self.logs.push(format!(
            "lifecycle from={previous} to={next} event={event}"
        ));
    }

    fn set_status(&mut self, text: String) {
        self.commands.push(HostCommand::SetStatus { text: text.clone() });
        self.status = text;
    }

    fn set_button_enabled(&mut self, enabled: bool) {
        self.button_enabled = enabled;
        self.commands.push(HostCommand::SetButtonEnabled { enabled });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glasstrap_core::ScatterConfig;
    use std::cell::Cell;
    use std::rc::Rc;
    use tracing_test::traced_test;

    const ARM: Duration = Duration::from_millis(400);
    const COOLDOWN: Duration = Duration::from_millis(250);

    fn button(count: u32) -> ShatterButton {
        ShatterButton::mount(HostDocument::complete(count), WidgetConfig::default())
            .expect("mount")
            .with_scatter(ScatterGenerator::seeded(ScatterConfig::default(), 17))
    }

    fn solve(button: &mut ShatterButton) {
        let ids: Vec<FragmentId> = button.coordinator().fragments().map(|c| c.id()).collect();
        for id in ids {
            let offset = button
                .coordinator()
                .fragment(id)
                .map(|c| c.fragment().translation())
                .expect("fragment");
            let home = PointerPosition::new(-offset.x, -offset.y);
            button.pointer_down(id, PointerId(1), PointerPosition::new(0.0, 0.0));
            button.pointer_move(id, PointerId(1), home);
            button.pointer_up(id, PointerId(1), home);
        }
    }

    #[test]
    fn mount_emits_identity_transforms() {
        let mut b = button(3);
        let commands = b.take_commands();
        assert_eq!(commands.len(), 3);
        assert!(commands.iter().all(|c| matches!(
            c,
            HostCommand::SetTransform { transform, .. } if *transform == Transform::IDENTITY
        )));
        assert_eq!(b.lifecycle(), Lifecycle::Armed);
    }

    #[test]
    fn malformed_document_declines_mount() {
        let mut doc = HostDocument::complete(3);
        doc.has_wrapper = false;
        assert!(ShatterButton::mount(doc, WidgetConfig::default()).is_err());
    }

    #[test]
    fn invalid_config_declines_mount() {
        let mut config = WidgetConfig::default();
        config.drag.snap_threshold = f32::NAN;
        assert!(matches!(
            ShatterButton::mount(HostDocument::complete(2), config),
            Err(MountError::Config(_))
        ));
    }

    #[test]
    fn first_activation_shatters_and_disables_button() {
        let mut b = button(3);
        b.take_commands();
        let a = b.activate();
        assert_eq!(a.outcome, ActivationOutcome::Shattered);
        assert!(a.prevent_default);
        assert_eq!(b.lifecycle(), Lifecycle::PuzzleActive);
        assert!(!b.button_enabled());
        assert_eq!(b.status(), b.config().messages.shattered);

        let commands = b.take_commands();
        assert!(commands.contains(&HostCommand::widget_marker(WidgetMarker::Shattered, true)));
        assert!(commands.contains(&HostCommand::SetButtonEnabled { enabled: false }));
        let transitions = commands
            .iter()
            .filter(|c| matches!(c, HostCommand::SetTransition { transition: Transition::Scatter, .. }))
            .count();
        assert_eq!(transitions, 3);
    }

    #[test]
    fn puzzle_arms_after_delay() {
        let mut b = button(2);
        b.activate();
        b.advance(ARM - Duration::from_millis(1));
        assert!(!b.coordinator().is_active());
        b.advance(Duration::from_millis(1));
        assert!(b.coordinator().is_active());
        assert_eq!(b.status(), b.config().messages.puzzle_started);
    }

    #[test]
    fn activation_while_puzzle_active_is_inert() {
        let mut b = button(2);
        b.activate();
        b.advance(ARM);
        for _ in 0..3 {
            let a = b.activate();
            assert_eq!(a.outcome, ActivationOutcome::Inert);
            assert!(a.prevent_default);
        }
        assert_eq!(b.lifecycle(), Lifecycle::PuzzleActive);
        assert_eq!(b.final_action_runs(), 0);
    }

    #[test]
    fn solve_then_cooldown_reaches_ready_to_end() {
        let mut b = button(3);
        b.activate();
        b.advance(ARM);
        solve(&mut b);
        assert_eq!(b.lifecycle(), Lifecycle::ResolvedPending);
        assert!(!b.coordinator().is_active());
        assert!(!b.button_enabled());

        b.take_commands();
        b.advance(COOLDOWN);
        assert_eq!(b.lifecycle(), Lifecycle::ReadyToEnd);
        assert!(b.button_enabled());
        assert_eq!(b.status(), b.config().messages.solved);
        let commands = b.take_commands();
        assert_eq!(commands.last(), Some(&HostCommand::FocusButton));
    }

    #[test]
    fn final_action_runs_exactly_once() {
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let mut b = button(1).on_final_action(move || counter.set(counter.get() + 1));
        b.activate();
        b.advance(ARM);
        solve(&mut b);
        b.advance(COOLDOWN);

        let a = b.activate();
        assert_eq!(a.outcome, ActivationOutcome::FinalAction);
        assert_eq!(b.lifecycle(), Lifecycle::Ended);
        assert_eq!(b.label(), Some("Call ended"));
        assert!(!b.button_enabled());

        for _ in 0..3 {
            assert_eq!(b.activate().outcome, ActivationOutcome::Ignored);
        }
        assert_eq!(runs.get(), 1);
        assert_eq!(b.final_action_runs(), 1);
    }

    #[test]
    fn label_goes_to_button_without_label_element() {
        let mut doc = HostDocument::complete(1);
        doc.has_label = false;
        let mut b = ShatterButton::mount(doc, WidgetConfig::default()).expect("mount");
        b.activate();
        b.advance(ARM);
        solve(&mut b);
        b.advance(COOLDOWN);
        b.take_commands();
        b.activate();
        assert!(b.take_commands().contains(&HostCommand::SetLabel {
            target: LabelTarget::Button,
            text: "Call ended".to_string(),
        }));
    }

    #[test]
    fn drag_commands_follow_press_move_release() {
        let mut b = button(1);
        b.activate();
        b.advance(ARM);
        b.take_commands();

        let id = FragmentId(0);
        b.pointer_down(id, PointerId(3), PointerPosition::new(0.0, 0.0));
        let commands = b.take_commands();
        assert_eq!(
            commands,
            vec![
                HostCommand::fragment_marker(id, FragmentMarker::Dragging, true),
                HostCommand::SetTransition {
                    fragment: id,
                    transition: Transition::None,
                    css: "none".to_string(),
                },
                HostCommand::CapturePointer {
                    fragment: id,
                    pointer_id: PointerId(3),
                },
            ]
        );

        b.pointer_move(id, PointerId(3), PointerPosition::new(4.0, 4.0));
        assert!(matches!(
            b.take_commands().as_slice(),
            [HostCommand::SetTransform { .. }]
        ));
    }

    #[test]
    fn stale_arm_continuation_is_skipped_after_double_schedule() {
        let mut b = button(1);
        b.activate();
        b.advance(ARM);
        assert!(b.coordinator().is_active());
        // A second arm arriving for the same puzzle must not re-announce it.
        b.timers.schedule(Duration::ZERO, Continuation::ArmPuzzle);
        b.take_logs();
        b.advance(Duration::ZERO);
        let logs = b.take_logs();
        assert!(
            logs.iter().any(|l| l.contains("name=arm_puzzle skipped")),
            "{logs:?}"
        );
    }

    #[test]
    fn stale_reenable_continuation_leaves_ready_button_alone() {
        let mut b = button(1);
        b.activate();
        b.advance(ARM);
        solve(&mut b);
        b.advance(COOLDOWN);
        assert_eq!(b.lifecycle(), Lifecycle::ReadyToEnd);
        let status = b.status().to_string();

        b.timers.schedule(Duration::ZERO, Continuation::Reenable);
        b.take_commands();
        b.take_logs();
        b.advance(Duration::ZERO);

        assert_eq!(b.lifecycle(), Lifecycle::ReadyToEnd);
        assert!(b.button_enabled());
        assert_eq!(b.status(), status);
        assert!(b.take_commands().is_empty());
        let logs = b.take_logs();
        assert!(
            logs.iter().any(|l| l.contains("name=reenable skipped")),
            "{logs:?}"
        );
    }

    #[test]
    fn stale_reenable_continuation_does_not_revive_ended_button() {
        let mut b = button(1);
        b.activate();
        b.advance(ARM);
        solve(&mut b);
        b.advance(COOLDOWN);
        b.activate();
        assert_eq!(b.lifecycle(), Lifecycle::Ended);

        b.timers.schedule(Duration::ZERO, Continuation::Reenable);
        b.take_logs();
        b.advance(Duration::ZERO);

        assert_eq!(b.lifecycle(), Lifecycle::Ended);
        assert!(!b.button_enabled());
        assert_eq!(b.status(), b.config().messages.ended);
        let logs = b.take_logs();
        assert!(
            logs.iter().any(|l| l.contains("name=reenable skipped")),
            "{logs:?}"
        );
    }

    #[test]
    fn ending_without_installed_action_counts_no_runs() {
        let mut b = button(1);
        b.activate();
        b.advance(ARM);
        solve(&mut b);
        b.advance(COOLDOWN);
        assert_eq!(b.activate().outcome, ActivationOutcome::FinalAction);
        assert_eq!(b.lifecycle(), Lifecycle::Ended);
        assert_eq!(b.final_action_runs(), 0);
    }

    #[test]
    fn next_deadline_tracks_pending_continuation() {
        let mut b = button(1);
        assert_eq!(b.next_deadline(), None);
        b.activate();
        assert_eq!(b.next_deadline(), Some(ARM));
        b.set_time(ARM);
        assert_eq!(b.next_deadline(), None);
    }

    #[test]
    #[traced_test]
    fn lifecycle_transitions_are_traced() {
        let mut b = button(1);
        b.activate();
        b.advance(ARM);
        solve(&mut b);
        assert!(logs_contain("lifecycle transition"));
        assert!(logs_contain("resolved_pending"));
        assert!(logs_contain("puzzle solved"));
    }
}
