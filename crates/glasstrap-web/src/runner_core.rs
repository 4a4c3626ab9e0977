#![forbid(unsafe_code)]

//! Platform-independent runner core wrapping [`ShatterButton`].
//!
//! This module contains the logic shared between the wasm-bindgen exports
//! and the native test harness. No JS/WASM types here.

use core::time::Duration;

use glasstrap_core::{DragDispatch, FragmentId, PointerId, PointerPosition, ScatterGenerator};
use glasstrap_widget::{Activation, HostCommand, HostDocument, Lifecycle, ShatterButton, WidgetConfig};
use serde::Deserialize;

/// Element presence bits reported by the host when it scans the page.
pub const ELEMENT_WRAPPER: u8 = 0b0001;
pub const ELEMENT_BUTTON: u8 = 0b0010;
pub const ELEMENT_STATUS: u8 = 0b0100;
pub const ELEMENT_LABEL: u8 = 0b1000;

/// Build a [`HostDocument`] from presence bits.
#[must_use]
pub const fn document_from_bits(elements: u8, fragment_count: u32) -> HostDocument {
    HostDocument {
        has_wrapper: elements & ELEMENT_WRAPPER != 0,
        has_button: elements & ELEMENT_BUTTON != 0,
        has_status: elements & ELEMENT_STATUS != 0,
        has_label: elements & ELEMENT_LABEL != 0,
        fragment_count,
    }
}

/// JSON-encoded host event accepted by [`RunnerCore::push_encoded_event`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EncodedEvent {
    Activate,
    PointerDown {
        fragment: u32,
        pointer_id: u32,
        x: f64,
        y: f64,
    },
    PointerMove {
        fragment: u32,
        pointer_id: u32,
        x: f64,
        y: f64,
    },
    PointerUp {
        fragment: u32,
        pointer_id: u32,
        x: f64,
        y: f64,
    },
    PointerCancel {
        fragment: u32,
        pointer_id: u32,
    },
    LostPointerCapture {
        fragment: u32,
        pointer_id: u32,
    },
    AdvanceTime {
        dt_ms: f64,
    },
}

/// Host-driven runner for one shatter button mount.
///
/// A document or config that fails validation leaves the runner unmounted;
/// every entry point is then a no-op and the reason is in [`Self::take_logs`].
pub struct RunnerCore {
    button: Option<ShatterButton>,
    /// Runner-level diagnostics (kept separate from the widget's own logs).
    logs: Vec<String>,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
impl RunnerCore {
    /// Parse the optional JSON config, falling back to defaults on error.
    fn config_with_fallback(config_json: Option<&str>) -> (WidgetConfig, Option<String>) {
        let Some(json) = config_json else {
            return (WidgetConfig::default(), None);
        };
        match WidgetConfig::from_json_str(json) {
            Ok(config) => (config, None),
            Err(err) => (
                WidgetConfig::default(),
                Some(format!("runner_config_error: {err}; using default config")),
            ),
        }
    }

    /// Mount a button for `document`.
    pub fn new(document: HostDocument, config_json: Option<&str>) -> Self {
        let (config, config_log) = Self::config_with_fallback(config_json);
        let mut logs = Vec::new();
        if let Some(log) = config_log {
            logs.push(log);
        }
        let button = match ShatterButton::mount(document, config) {
            Ok(button) => Some(button),
            Err(err) => {
                logs.push(format!("runner_mount_error: {err}"));
                None
            }
        };
        Self { button, logs }
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.button.is_some()
    }

    /// Replace the scatter source with a seeded one, for replays.
    pub fn seed_scatter(&mut self, seed: u64) {
        if let Some(button) = self.button.take() {
            let scatter = button.config().scatter;
            self.button = Some(button.with_scatter(ScatterGenerator::seeded(scatter, seed)));
        }
    }

    /// Install the final action.
    pub fn set_final_action(&mut self, action: impl FnMut() + 'static) {
        if let Some(button) = self.button.take() {
            self.button = Some(button.on_final_action(action));
        }
    }

    pub fn activate(&mut self) -> Option<Activation> {
        self.button.as_mut().map(ShatterButton::activate)
    }

    pub fn pointer_down(&mut self, fragment: u32, pointer_id: u32, x: f64, y: f64) -> Option<DragDispatch> {
        let position = self.position(x, y)?;
        self.button
            .as_mut()
            .map(|b| b.pointer_down(FragmentId(fragment), PointerId(pointer_id), position))
    }

    pub fn pointer_move(&mut self, fragment: u32, pointer_id: u32, x: f64, y: f64) -> Option<DragDispatch> {
        let position = self.position(x, y)?;
        self.button
            .as_mut()
            .map(|b| b.pointer_move(FragmentId(fragment), PointerId(pointer_id), position))
    }

    pub fn pointer_up(&mut self, fragment: u32, pointer_id: u32, x: f64, y: f64) -> Option<DragDispatch> {
        let position = self.position(x, y)?;
        self.button
            .as_mut()
            .map(|b| b.pointer_up(FragmentId(fragment), PointerId(pointer_id), position))
    }

    pub fn pointer_cancel(&mut self, fragment: u32, pointer_id: u32) -> Option<DragDispatch> {
        self.button
            .as_mut()
            .map(|b| b.pointer_cancel(FragmentId(fragment), PointerId(pointer_id)))
    }

    pub fn lost_pointer_capture(&mut self, fragment: u32, pointer_id: u32) -> Option<DragDispatch> {
        self.button
            .as_mut()
            .map(|b| b.lost_pointer_capture(FragmentId(fragment), PointerId(pointer_id)))
    }

    /// Advance the widget clock by `dt_ms` milliseconds.
    pub fn advance_time_ms(&mut self, dt_ms: f64) {
        // Host input can be noisy (NaN/inf/negative spikes): drop it.
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        let secs = (dt_ms / 1000.0).min(Duration::MAX.as_secs_f64());
        let duration = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
        if let Some(button) = self.button.as_mut() {
            button.advance(duration);
        }
    }

    /// Set the widget clock to an absolute host timestamp in milliseconds.
    pub fn set_time_ms(&mut self, ts_ms: f64) {
        let secs = if !ts_ms.is_finite() || ts_ms <= 0.0 {
            0.0
        } else {
            (ts_ms / 1000.0).min(Duration::MAX.as_secs_f64())
        };
        let now = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
        if let Some(button) = self.button.as_mut() {
            button.set_time(now);
        }
    }

    /// Parse a JSON-encoded event and dispatch it.
    ///
    /// Returns `true` if the event was decoded and a button is mounted.
    pub fn push_encoded_event(&mut self, json: &str) -> bool {
        let event = match serde_json::from_str::<EncodedEvent>(json) {
            Ok(event) => event,
            Err(err) => {
                self.logs.push(format!("runner_event_error: {err}"));
                return false;
            }
        };
        if !self.is_mounted() {
            return false;
        }
        match event {
            EncodedEvent::Activate => {
                self.activate();
            }
            EncodedEvent::PointerDown { fragment, pointer_id, x, y } => {
                self.pointer_down(fragment, pointer_id, x, y);
            }
            EncodedEvent::PointerMove { fragment, pointer_id, x, y } => {
                self.pointer_move(fragment, pointer_id, x, y);
            }
            EncodedEvent::PointerUp { fragment, pointer_id, x, y } => {
                self.pointer_up(fragment, pointer_id, x, y);
            }
            EncodedEvent::PointerCancel { fragment, pointer_id } => {
                self.pointer_cancel(fragment, pointer_id);
            }
            EncodedEvent::LostPointerCapture { fragment, pointer_id } => {
                self.lost_pointer_capture(fragment, pointer_id);
            }
            EncodedEvent::AdvanceTime { dt_ms } => self.advance_time_ms(dt_ms),
        }
        true
    }

    /// Drain pending presentation commands.
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        self.button
            .as_mut()
            .map(ShatterButton::take_commands)
            .unwrap_or_default()
    }

    /// Drain pending presentation commands as a JSON array.
    pub fn take_commands_json(&mut self) -> String {
        let commands = self.take_commands();
        match serde_json::to_string(&commands) {
            Ok(json) => json,
            Err(err) => {
                self.logs.push(format!("runner_encode_error: {err}"));
                "[]".to_string()
            }
        }
    }

    #[must_use]
    pub fn lifecycle(&self) -> Option<Lifecycle> {
        self.button.as_ref().map(ShatterButton::lifecycle)
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.button.as_ref().map(ShatterButton::status)
    }

    /// Earliest pending continuation deadline in milliseconds.
    #[must_use]
    pub fn next_deadline_ms(&self) -> Option<f64> {
        self.button
            .as_ref()
            .and_then(ShatterButton::next_deadline)
            .map(|d| d.as_micros() as f64 / 1000.0)
    }

    /// Current translation of one fragment, in pixels.
    #[must_use]
    pub fn fragment_offset(&self, fragment: u32) -> Option<(f32, f32)> {
        let button = self.button.as_ref()?;
        let offset = button
            .coordinator()
            .fragment(FragmentId(fragment))?
            .fragment()
            .translation();
        Some((offset.x, offset.y))
    }

    /// Drain runner diagnostics followed by widget logs.
    pub fn take_logs(&mut self) -> Vec<String> {
        let mut logs = std::mem::take(&mut self.logs);
        if let Some(button) = self.button.as_mut() {
            logs.append(&mut button.take_logs());
        }
        logs
    }

    fn position(&mut self, x: f64, y: f64) -> Option<PointerPosition> {
        // Out-of-range host coordinates saturate to infinity in f32.
        let (px, py) = (x as f32, y as f32);
        if px.is_finite() && py.is_finite() {
            Some(PointerPosition::new(px, py))
        } else {
            self.logs
                .push(format!("runner_input_error: non-finite pointer position x={x} y={y}"));
            None
        }
    }
}
