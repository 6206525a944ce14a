//! Viewer zoom and pan over a floor's `viewBox`, and screen/SVG mapping.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::consts::{BUTTON_ZOOM_FACTOR, MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_FACTOR, ZOOM_SNAP_THRESHOLD};
use crate::geometry::{Bounds, Point};
use crate::path::format_number;

/// An SVG `viewBox`: origin and size in user units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Parse a `viewBox` attribute value. Requires four numbers and a positive size.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match crate::svg::parse_number_list(raw).as_slice() {
            [x, y, w, h] if *w > 0.0 && *h > 0.0 => Some(Self::new(*x, *y, *w, *h)),
            _ => None,
        }
    }

    /// Render as a `viewBox` attribute value.
    #[must_use]
    pub fn to_attr(&self) -> String {
        format!(
            "{} {} {} {}",
            format_number(self.x),
            format_number(self.y),
            format_number(self.width),
            format_number(self.height)
        )
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Size of the element the SVG is rendered into, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

/// Zoom and pan of the floor viewer relative to the document's own view box.
///
/// `zoom` is a scale factor in `[1, 5]`; `pan` is the offset of the visible
/// window's center from the original center, in SVG units. At zoom 1 the pan
/// is always zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub pan: Point,
    pub original: ViewBox,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewBox::default())
    }
}

impl Viewport {
    #[must_use]
    pub fn new(original: ViewBox) -> Self {
        Self { zoom: MIN_ZOOM, pan: Point::default(), original }
    }

    /// Back to the whole floor.
    pub fn reset(&mut self) {
        self.zoom = MIN_ZOOM;
        self.pan = Point::default();
    }

    /// Multiply the zoom by `factor`, clamped to `[1, 5]`.
    ///
    /// Results below the snap threshold land on exactly 1 with zero pan.
    pub fn zoom_by(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let next = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if next < ZOOM_SNAP_THRESHOLD {
            self.reset();
        } else {
            self.zoom = next;
            self.clamp_pan();
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(BUTTON_ZOOM_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(1.0 / BUTTON_ZOOM_FACTOR);
    }

    /// One wheel tick. Negative `delta_y` (scrolling up) zooms in.
    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y < 0.0 {
            self.zoom_by(WHEEL_ZOOM_FACTOR);
        } else if delta_y > 0.0 {
            self.zoom_by(1.0 / WHEEL_ZOOM_FACTOR);
        }
    }

    /// Whether dragging should pan. Panning is disabled at zoom 1.
    #[must_use]
    pub fn can_pan(&self) -> bool {
        self.zoom > MIN_ZOOM
    }

    /// Move the visible window by `(dx, dy)` SVG units.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if !self.can_pan() {
            return;
        }
        self.pan.x += dx;
        self.pan.y += dy;
        self.clamp_pan();
    }

    /// Pan for a pointer drag of `delta` screen pixels; content follows the pointer.
    pub fn drag_by(&mut self, delta: Point, screen: ScreenSize) {
        let scale = self.scale(screen);
        if scale <= 0.0 {
            return;
        }
        self.pan_by(-delta.x / scale, -delta.y / scale);
    }

    /// Center on `bounds` at `zoom` (clamped).
    pub fn center_on(&mut self, bounds: &Bounds, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if self.zoom < ZOOM_SNAP_THRESHOLD {
            self.reset();
            return;
        }
        let target = bounds.center();
        let origin = self.original.center();
        self.pan = Point::new(target.x - origin.x, target.y - origin.y);
        self.clamp_pan();
    }

    /// The `viewBox` to render for the current zoom and pan.
    #[must_use]
    pub fn visible_view_box(&self) -> ViewBox {
        let width = self.original.width / self.zoom;
        let height = self.original.height / self.zoom;
        let center = self.original.center();
        ViewBox::new(
            center.x + self.pan.x - width * 0.5,
            center.y + self.pan.y - height * 0.5,
            width,
            height,
        )
    }

    /// Pixels per SVG unit under `xMidYMid meet`.
    #[must_use]
    pub fn scale(&self, screen: ScreenSize) -> f64 {
        let vb = self.visible_view_box();
        if vb.is_empty() {
            return 0.0;
        }
        (screen.width / vb.width).min(screen.height / vb.height)
    }

    /// Convert a point inside the rendering element (CSS pixels) to SVG units.
    #[must_use]
    pub fn screen_to_svg(&self, p: Point, screen: ScreenSize) -> Point {
        let vb = self.visible_view_box();
        let scale = self.scale(screen);
        if scale <= 0.0 {
            return Point::new(vb.x, vb.y);
        }
        let offset_x = (screen.width - vb.width * scale) * 0.5;
        let offset_y = (screen.height - vb.height * scale) * 0.5;
        Point::new(vb.x + (p.x - offset_x) / scale, vb.y + (p.y - offset_y) / scale)
    }

    /// Convert an SVG point to CSS pixels inside the rendering element.
    #[must_use]
    pub fn svg_to_screen(&self, p: Point, screen: ScreenSize) -> Point {
        let vb = self.visible_view_box();
        let scale = self.scale(screen);
        let offset_x = (screen.width - vb.width * scale) * 0.5;
        let offset_y = (screen.height - vb.height * scale) * 0.5;
        Point::new((p.x - vb.x) * scale + offset_x, (p.y - vb.y) * scale + offset_y)
    }

    /// Keep the visible window inside the original view box.
    fn clamp_pan(&mut self) {
        if self.zoom <= MIN_ZOOM {
            self.pan = Point::default();
            return;
        }
        let max_x = (self.original.width - self.original.width / self.zoom) * 0.5;
        let max_y = (self.original.height - self.original.height / self.zoom) * 0.5;
        self.pan.x = self.pan.x.clamp(-max_x, max_x);
        self.pan.y = self.pan.y.clamp(-max_y, max_y);
    }
}
