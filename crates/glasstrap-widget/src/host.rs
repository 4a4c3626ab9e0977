#![forbid(unsafe_code)]

//! Host boundary: document validation and the presentation command stream.
//!
//! The widget does not touch any host UI. It validates a description of the
//! host document once at mount time and afterwards only emits
//! [`HostCommand`]s, which the host drains and applies (CSS transforms,
//! class toggles, `disabled`, text content, pointer capture, focus).

use glasstrap_core::{CaptureCommand, FragmentId, PointerId, Transform, Transition};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// Which host elements exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostDocument {
    pub has_wrapper: bool,
    pub has_button: bool,
    pub has_status: bool,
    /// Dedicated label element inside the button. Optional.
    pub has_label: bool,
    pub fragment_count: u32,
}

impl HostDocument {
    /// A complete document with `fragment_count` fragments.
    #[must_use]
    pub const fn complete(fragment_count: u32) -> Self {
        Self {
            has_wrapper: true,
            has_button: true,
            has_status: true,
            has_label: true,
            fragment_count,
        }
    }

    /// Check required elements. The widget must not mount partially.
    pub fn validate(&self) -> Result<(), MountError> {
        if !self.has_wrapper {
            return Err(MountError::MissingWrapper);
        }
        if !self.has_button {
            return Err(MountError::MissingButton);
        }
        if !self.has_status {
            return Err(MountError::MissingStatus);
        }
        if self.fragment_count == 0 {
            return Err(MountError::NoFragments);
        }
        Ok(())
    }

    /// Where label updates go.
    #[must_use]
    pub const fn label_target(&self) -> LabelTarget {
        if self.has_label {
            LabelTarget::Label
        } else {
            LabelTarget::Button
        }
    }
}

/// Why the widget declined to mount.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("host document has no widget wrapper")]
    MissingWrapper,
    #[error("host document has no button")]
    MissingButton,
    #[error("host document has no status element")]
    MissingStatus,
    #[error("host document has no fragments")]
    NoFragments,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Element that receives label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelTarget {
    Label,
    /// No label element; replace the button's own text.
    Button,
}

/// Widget-level visual marker (a class on the wrapper).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetMarker {
    Shattered,
    PuzzleMode,
    Ended,
}

impl WidgetMarker {
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Shattered => "shattered",
            Self::PuzzleMode => "puzzle-mode",
            Self::Ended => "call-ended",
        }
    }
}

/// Fragment-level visual marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentMarker {
    Placed,
    Dragging,
}

impl FragmentMarker {
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Dragging => "dragging",
        }
    }
}

/// One presentation update for the host to apply, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostCommand {
    SetTransform {
        fragment: FragmentId,
        transform: Transform,
        css: String,
    },
    SetTransition {
        fragment: FragmentId,
        transition: Transition,
        css: String,
    },
    SetFragmentMarker {
        fragment: FragmentId,
        marker: FragmentMarker,
        on: bool,
    },
    SetWidgetMarker {
        marker: WidgetMarker,
        on: bool,
    },
    SetButtonEnabled {
        enabled: bool,
    },
    SetLabel {
        target: LabelTarget,
        text: String,
    },
    SetStatus {
        text: String,
    },
    /// Focus the button without scrolling.
    FocusButton,
    CapturePointer {
        fragment: FragmentId,
        pointer_id: PointerId,
    },
    ReleasePointer {
        fragment: FragmentId,
        pointer_id: PointerId,
    },
}

impl HostCommand {
    #[must_use]
    pub fn transform(fragment: FragmentId, transform: Transform) -> Self {
        Self::SetTransform {
            fragment,
            css: transform.css_value(),
            transform,
        }
    }

    #[must_use]
    pub const fn fragment_marker(fragment: FragmentId, marker: FragmentMarker, on: bool) -> Self {
        Self::SetFragmentMarker {
            fragment,
            marker,
            on,
        }
    }

    #[must_use]
    pub const fn widget_marker(marker: WidgetMarker, on: bool) -> Self {
        Self::SetWidgetMarker { marker, on }
    }
}

impl From<CaptureCommand> for HostCommand {
    fn from(command: CaptureCommand) -> Self {
        match command {
            CaptureCommand::Acquire {
                fragment,
                pointer_id,
            } => Self::CapturePointer {
                fragment,
                pointer_id,
            },
            CaptureCommand::Release {
                fragment,
                pointer_id,
            } => Self::ReleasePointer {
                fragment,
                pointer_id,
            },
        }
    }
}
