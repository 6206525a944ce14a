//! Input model: editor tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Tool` and `Modifiers` capture the operator's intent at the time of a
//! pointer event. `InputState` is the gesture tracked between pointer-down
//! and pointer-up. Polygon vertices are not a gesture: they accumulate across
//! separate clicks and live on the editor instead.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Which editor mode is active. Modes are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Drag to move the camera (default).
    #[default]
    Pan,
    /// Pick, restyle, and drag existing shapes.
    Select,
    /// Click to place vertices, double-click to close.
    Polygon,
    /// Drag out an axis-aligned rectangle.
    Rectangle,
    /// Freehand drag.
    Polyline,
}

impl Tool {
    /// Whether this tool creates new shapes.
    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::Polygon | Self::Rectangle | Self::Polyline)
    }

    /// CSS cursor shown while the tool is idle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Pan => "grab",
            Self::Select => "default",
            Self::Polygon | Self::Rectangle | Self::Polyline => "crosshair",
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command key.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button; always pans.
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Case-insensitive comparison against a key name.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dx: f64,
    /// Vertical scroll amount (positive = down, which zooms out).
    pub dy: f64,
}

/// Persistent editor UI state visible to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub tool: Tool,
    /// Id of the currently selected shape, if any.
    pub selected_id: Option<String>,
}

/// Active gesture between pointer-down and pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Dragging the camera.
    Panning {
        /// Screen position of the previous pointer event.
        last_screen: Point,
    },
    /// Moving a selected shape.
    DraggingShape {
        id: String,
        /// Screen position of the press, for the click/drag threshold.
        start_screen: Point,
        /// World position already applied to the shape.
        last_world: Point,
        /// Whether any movement has been applied yet.
        moved: bool,
    },
    /// Sizing a rectangle from its first corner.
    DrawingRect { anchor: Point, current: Point },
    /// Collecting freehand samples.
    DrawingPolyline { points: Vec<Point> },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
