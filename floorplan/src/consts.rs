//! Shared numeric constants for the floorplan crate.

// ── Viewer zoom ─────────────────────────────────────────────────

/// Lower zoom bound; the whole floor is visible.
pub const MIN_ZOOM: f64 = 1.0;

/// Upper zoom bound.
pub const MAX_ZOOM: f64 = 5.0;

/// Zoom results below this snap back to exactly [`MIN_ZOOM`] with zero pan.
pub const ZOOM_SNAP_THRESHOLD: f64 = 1.05;

/// Multiplicative zoom per wheel tick.
pub const WHEEL_ZOOM_FACTOR: f64 = 1.1;

/// Multiplicative zoom per zoom-in / zoom-out button press.
pub const BUTTON_ZOOM_FACTOR: f64 = 1.3;

/// Zoom level applied when a search result is focused.
pub const SEARCH_FOCUS_ZOOM: f64 = 3.0;

// ── Region highlight ────────────────────────────────────────────

/// Overlay opacity of a region nobody is interacting with.
pub const IDLE_OPACITY: f64 = 0.0;

/// Overlay opacity while the pointer is over a region.
pub const HOVER_OPACITY: f64 = 0.6;

/// Overlay opacity of the selected region.
pub const SELECTED_OPACITY: f64 = 0.7;

/// Fill used when no usable color can be resolved for a shape.
pub const DEFAULT_FILL: &str = "#cccccc";

/// Minimum vertex count for a shape to count as a region.
pub const MIN_REGION_POINTS: usize = 3;

// ── Editor ──────────────────────────────────────────────────────

/// Editor camera zoom bounds.
pub const EDITOR_MIN_ZOOM: f64 = 0.1;
pub const EDITOR_MAX_ZOOM: f64 = 10.0;

/// Default fill opacity for freshly drawn shapes.
pub const DEFAULT_SHAPE_OPACITY: f64 = 0.5;

/// Default fill for freshly drawn shapes.
pub const DEFAULT_SHAPE_FILL: &str = "#4a90d9";

/// Freehand polyline samples closer than this (world units) are skipped.
pub const POLYLINE_MIN_SPACING: f64 = 2.0;

/// Rectangles thinner than this (world units) are discarded on release.
pub const MIN_RECT_SIZE: f64 = 1.0;

/// Offset of the floating style editor from the cursor, in screen pixels.
pub const STYLE_EDITOR_OFFSET_PX: f64 = 12.0;

/// Pointer travel (screen pixels) below which a select-mode press is a click, not a drag.
pub const DRAG_THRESHOLD_PX: f64 = 2.0;

/// Coordinates closer than this are treated as the same vertex.
pub const VERTEX_EPSILON: f64 = 1e-6;
