#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{EDITOR_MAX_ZOOM, EDITOR_MIN_ZOOM};
use crate::geometry::{Bounds, Point};

/// Editor camera over display coordinates.
///
/// Display space has y pointing up (the SVG's y axis flipped), screen space
/// has y pointing down. `pan_x` / `pan_y` are the screen position (CSS
/// pixels) of the display origin. `zoom` is pixels per display unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to display coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (self.pan_y - screen.y) / self.zoom,
        }
    }

    /// Convert a display-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: self.pan_y - world.y * self.zoom,
        }
    }

    /// Convert a screen-space distance (pixels) to display units.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Move the camera so content follows a pointer drag of `(dx, dy)` pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Zoom by `factor` keeping the display point under `screen` fixed.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor = self.screen_to_world(screen);
        self.zoom = (self.zoom * factor).clamp(EDITOR_MIN_ZOOM, EDITOR_MAX_ZOOM);
        self.pan_x = screen.x - anchor.x * self.zoom;
        self.pan_y = screen.y + anchor.y * self.zoom;
    }

    /// Frame `bounds` inside a `width` x `height` pixel viewport.
    pub fn fit(&mut self, bounds: &Bounds, width: f64, height: f64) {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 || width <= 0.0 || height <= 0.0 {
            return;
        }
        self.zoom = (width / bounds.width())
            .min(height / bounds.height())
            .clamp(EDITOR_MIN_ZOOM, EDITOR_MAX_ZOOM);
        let center = bounds.center();
        self.pan_x = width * 0.5 - center.x * self.zoom;
        self.pan_y = height * 0.5 + center.y * self.zoom;
    }
}
