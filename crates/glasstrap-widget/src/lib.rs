#![forbid(unsafe_code)]

//! The shatter button widget.
//!
//! # Role in glasstrap
//! `glasstrap-widget` composes the per-fragment machinery of
//! `glasstrap-core` into a whole widget:
//!
//! - **[`PuzzleCoordinator`]**: owns every fragment controller, starts the
//!   scatter, and detects the full solve synchronously on each placement.
//! - **[`ShatterButton`]**: the interaction gate. Decides whether an
//!   activation shatters, is ignored, or runs the final action, and drives
//!   the arm delay and solve cooldown continuations.
//! - **Host boundary**: [`HostDocument`] validation at mount time and the
//!   ordered [`HostCommand`] stream the presentation layer applies.
//! - **[`WidgetConfig`]**: TOML/JSON configuration with design defaults.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use glasstrap_widget::{HostDocument, Lifecycle, ShatterButton, WidgetConfig};
//!
//! let mut button = ShatterButton::mount(HostDocument::complete(3), WidgetConfig::default())
//!     .expect("complete document mounts");
//! button.activate();
//! button.advance(Duration::from_millis(400));
//! assert_eq!(button.lifecycle(), Lifecycle::PuzzleActive);
//! assert!(button.coordinator().is_active());
//! ```

pub mod config;
pub mod coordinator;
pub mod gate;
pub mod host;

pub use config::{ConfigError, Messages, TimingConfig, WidgetConfig};
pub use coordinator::{PointerResult, PuzzleCoordinator, ScatterUpdate, SolveNotice};
pub use gate::{Activation, ActivationOutcome, Lifecycle, ShatterButton};
pub use host::{
    FragmentMarker, HostCommand, HostDocument, LabelTarget, MountError, WidgetMarker,
};
