//! Floor-plan editor: redraw room areas, restyle them, and write the result back as SVG.
//!
//! DESIGN
//! ======
//! `EditorCore` is the editor without a canvas. The host forwards pointer,
//! wheel and key events; handlers mutate the shape list and return
//! [`EditorAction`]s for the host to apply (redraw, cursor, style popover).
//!
//! Shapes live in display coordinates: the SVG's y axis flipped so y points
//! up. Loading flips SVG coordinates in, exporting flips them back with the
//! same height, so a load/export round trip is lossless up to the three
//! decimals written to path data.
//!
//! Every mutation of the shape list (add, delete, move, restyle) records a
//! full snapshot in [`History`] first. Undo swaps the live list for the
//! snapshot wholesale.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::consts::{
    DEFAULT_SHAPE_FILL, DEFAULT_SHAPE_OPACITY, DRAG_THRESHOLD_PX, MIN_RECT_SIZE, MIN_REGION_POINTS,
    POLYLINE_MIN_SPACING, STYLE_EDITOR_OFFSET_PX, VERTEX_EPSILON, WHEEL_ZOOM_FACTOR,
};
use crate::geometry::{Bounds, Point, axis_lock, flip_y, point_in_polygon, translate};
use crate::history::History;
use crate::input::{Button, InputState, Key, Modifiers, Tool, UiState, WheelDelta};
use crate::path::{format_number, to_path_data};
use crate::svg::{self, SvgError};
use crate::viewport::ViewBox;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Closed ring; exported with `Z`.
    Polygon,
    /// Open freehand stroke.
    Polyline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleOptions {
    pub fill: String,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self { fill: DEFAULT_SHAPE_FILL.to_owned(), opacity: DEFAULT_SHAPE_OPACITY }
    }
}

/// One editable area, vertices in display coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: String,
    pub kind: ShapeKind,
    pub vertices: Vec<Point>,
    pub style: StyleOptions,
}

impl Shape {
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        point_in_polygon(pt, &self.vertices)
    }

    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.vertices)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorStatus {
    Empty,
    Ready { floor: String },
    Error { floor: String, message: String },
}

/// Body of `POST /api/save-svg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSvgRequest {
    pub floor: String,
    pub svg_content: String,
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    SetCursor(String),
    ToolChanged(Tool),
    SelectionChanged(Option<String>),
    /// Show the fill/opacity popover for a shape, anchored near the cursor (CSS pixels).
    OpenStyleEditor { id: String, anchor: Point, style: StyleOptions },
    CloseStyleEditor,
    /// The shape list changed and should be re-read.
    ShapesChanged,
    RenderNeeded,
}

// =============================================================================
// CORE
// =============================================================================

/// Core editor state. All logic that doesn't depend on a canvas element.
pub struct EditorCore {
    shapes: Vec<Shape>,
    history: History<Vec<Shape>>,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    /// Polygon vertices placed so far.
    drawing: Vec<Point>,
    /// Pointer position while placing polygon vertices, for the rubber band.
    cursor_world: Option<Point>,
    /// Shape list as it was when the current drag started.
    drag_snapshot: Option<Vec<Shape>>,
    view_box: ViewBox,
    status: EditorStatus,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            history: History::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            drawing: Vec::new(),
            cursor_world: None,
            drag_snapshot: None,
            view_box: ViewBox::default(),
            status: EditorStatus::Empty,
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }
}

impl EditorCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Document ---

    /// Replace the editor contents with the regions discovered in `svg`.
    ///
    /// # Errors
    ///
    /// Returns the discovery error when the document cannot be parsed. The
    /// editor is left empty with an error status in that case.
    pub fn load_svg(&mut self, svg_text: &str, floor: &str) -> Result<usize, SvgError> {
        self.reset_session();
        let doc = match svg::parse_document(svg_text, floor) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!(floor, error = %err, "editor could not load floor plan");
                self.shapes.clear();
                self.view_box = ViewBox::default();
                self.status = EditorStatus::Error { floor: floor.to_owned(), message: err.to_string() };
                return Err(err);
            }
        };
        self.view_box = doc.view_box;
        let height = self.flip_height();
        self.shapes = doc
            .regions
            .into_iter()
            .map(|r| Shape {
                id: r.id,
                kind: if r.closed { ShapeKind::Polygon } else { ShapeKind::Polyline },
                vertices: flip_y(&r.points, height),
                style: StyleOptions { fill: r.fill_color, opacity: r.fill_opacity.unwrap_or(DEFAULT_SHAPE_OPACITY) },
            })
            .collect();
        self.fit_view();
        self.status = EditorStatus::Ready { floor: floor.to_owned() };
        tracing::debug!(floor, shapes = self.shapes.len(), "editor loaded floor plan");
        Ok(self.shapes.len())
    }

    fn reset_session(&mut self) {
        self.history.clear();
        self.drawing.clear();
        self.cursor_world = None;
        self.drag_snapshot = None;
        self.input = InputState::Idle;
        self.ui.selected_id = None;
    }

    /// Height used for the y flip. Maps the view box's vertical extent onto itself.
    fn flip_height(&self) -> f64 {
        self.view_box.y * 2.0 + self.view_box.height
    }

    /// Update viewport dimensions (CSS pixels).
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Frame the whole floor in the viewport.
    pub fn fit_view(&mut self) {
        let vb = self.view_box;
        let bounds = Bounds { min_x: vb.x, min_y: vb.y, max_x: vb.x + vb.width, max_y: vb.y + vb.height };
        self.camera.fit(&bounds, self.viewport_width, self.viewport_height);
    }

    // --- Tool ---

    /// Switch modes, running the outgoing mode's exit hook and the incoming one's enter hook.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<EditorAction> {
        if tool == self.ui.tool {
            return Vec::new();
        }
        let mut actions = self.exit_tool();
        self.ui.tool = tool;
        actions.push(EditorAction::ToolChanged(tool));
        actions.push(EditorAction::SetCursor(tool.cursor().to_owned()));
        actions
    }

    fn exit_tool(&mut self) -> Vec<EditorAction> {
        let mut actions = Vec::new();
        let had_work = !self.drawing.is_empty() || !self.input.is_idle();
        self.cancel_gesture();
        if self.ui.tool == Tool::Select {
            if self.ui.selected_id.take().is_some() {
                actions.push(EditorAction::SelectionChanged(None));
            }
            actions.push(EditorAction::CloseStyleEditor);
        }
        if had_work {
            actions.push(EditorAction::RenderNeeded);
        }
        actions
    }

    /// Drop in-progress drawing and gestures. An interrupted drag is rolled back.
    fn cancel_gesture(&mut self) {
        self.drawing.clear();
        self.cursor_world = None;
        self.input = InputState::Idle;
        if let Some(snapshot) = self.drag_snapshot.take() {
            self.shapes = snapshot;
        }
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<EditorAction> {
        if button == Button::Middle || (button == Button::Primary && self.ui.tool == Tool::Pan) {
            self.input = InputState::Panning { last_screen: screen_pt };
            return vec![EditorAction::SetCursor("grabbing".to_owned())];
        }
        if button != Button::Primary {
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen_pt);
        match self.ui.tool {
            Tool::Pan => Vec::new(),
            Tool::Select => self.press_select(screen_pt, world),
            Tool::Polygon => self.place_vertex(world, modifiers.shift),
            Tool::Rectangle => {
                self.input = InputState::DrawingRect { anchor: world, current: world };
                vec![EditorAction::RenderNeeded]
            }
            Tool::Polyline => {
                self.input = InputState::DrawingPolyline { points: vec![world] };
                vec![EditorAction::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<EditorAction> {
        let world = self.camera.screen_to_world(screen_pt);
        match &mut self.input {
            InputState::Idle => {
                if self.ui.tool != Tool::Polygon {
                    return Vec::new();
                }
                let Some(&last) = self.drawing.last() else {
                    return Vec::new();
                };
                self.cursor_world = Some(if modifiers.shift { axis_lock(last, world) } else { world });
                vec![EditorAction::RenderNeeded]
            }
            InputState::Panning { last_screen } => {
                self.camera.pan_by(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                *last_screen = screen_pt;
                vec![EditorAction::RenderNeeded]
            }
            InputState::DraggingShape { id, start_screen, last_world, moved } => {
                if !*moved && start_screen.distance(screen_pt) < DRAG_THRESHOLD_PX {
                    return Vec::new();
                }
                let (dx, dy) = (world.x - last_world.x, world.y - last_world.y);
                *last_world = world;
                *moved = true;
                if let Some(shape) = self.shapes.iter_mut().find(|s| s.id == *id) {
                    translate(&mut shape.vertices, dx, dy);
                }
                vec![EditorAction::RenderNeeded]
            }
            InputState::DrawingRect { current, .. } => {
                *current = world;
                vec![EditorAction::RenderNeeded]
            }
            InputState::DrawingPolyline { points } => {
                if points.last().is_some_and(|p| p.distance(world) < POLYLINE_MIN_SPACING) {
                    return Vec::new();
                }
                points.push(world);
                vec![EditorAction::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<EditorAction> {
        let world = self.camera.screen_to_world(screen_pt);
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Panning { .. } => vec![EditorAction::SetCursor(self.ui.tool.cursor().to_owned())],
            InputState::DraggingShape { id, moved, .. } => {
                let snapshot = self.drag_snapshot.take();
                if !moved {
                    return Vec::new();
                }
                if let Some(before) = snapshot {
                    self.history.record(before);
                }
                tracing::debug!(id = %id, "moved shape");
                vec![EditorAction::ShapesChanged, EditorAction::RenderNeeded]
            }
            InputState::DrawingRect { anchor, .. } => {
                let (min_x, max_x) = (anchor.x.min(world.x), anchor.x.max(world.x));
                let (min_y, max_y) = (anchor.y.min(world.y), anchor.y.max(world.y));
                if max_x - min_x < MIN_RECT_SIZE || max_y - min_y < MIN_RECT_SIZE {
                    return vec![EditorAction::RenderNeeded];
                }
                let corners = vec![
                    Point::new(min_x, min_y),
                    Point::new(max_x, min_y),
                    Point::new(max_x, max_y),
                    Point::new(min_x, max_y),
                ];
                self.commit_shape(ShapeKind::Polygon, corners)
            }
            InputState::DrawingPolyline { mut points } => {
                if points.last().is_none_or(|p| p.distance(world) >= POLYLINE_MIN_SPACING) {
                    points.push(world);
                }
                if points.len() < 2 {
                    return vec![EditorAction::RenderNeeded];
                }
                self.commit_shape(ShapeKind::Polyline, points)
            }
        }
    }

    /// Close the polygon being placed. Needs at least three distinct vertices.
    pub fn on_double_click(&mut self, _screen_pt: Point, _modifiers: Modifiers) -> Vec<EditorAction> {
        if self.ui.tool != Tool::Polygon {
            return Vec::new();
        }
        // A double-click arrives after two clicks on the same spot.
        self.drawing.dedup_by(|a, b| a.approx_eq(*b, VERTEX_EPSILON));
        if let (Some(first), Some(last)) = (self.drawing.first(), self.drawing.last()) {
            if self.drawing.len() > 1 && first.approx_eq(*last, VERTEX_EPSILON) {
                self.drawing.pop();
            }
        }
        if self.drawing.len() < MIN_REGION_POINTS {
            return Vec::new();
        }
        let vertices = std::mem::take(&mut self.drawing);
        self.commit_shape(ShapeKind::Polygon, vertices)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<EditorAction> {
        let factor = if delta.dy < 0.0 {
            WHEEL_ZOOM_FACTOR
        } else if delta.dy > 0.0 {
            1.0 / WHEEL_ZOOM_FACTOR
        } else {
            return Vec::new();
        };
        self.camera.zoom_at(screen_pt, factor);
        vec![EditorAction::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<EditorAction> {
        if key.is("Escape") {
            let mut actions = vec![EditorAction::RenderNeeded];
            if self.drag_snapshot.is_some() {
                actions.push(EditorAction::ShapesChanged);
            }
            self.cancel_gesture();
            actions.extend(self.set_tool(Tool::Pan));
            return actions;
        }
        if modifiers.command() && key.is("z") {
            return if modifiers.shift { self.redo() } else { self.undo() };
        }
        if modifiers.command() && key.is("y") {
            return self.redo();
        }
        if key.is("Delete") || key.is("Backspace") {
            return self.delete_selected();
        }
        Vec::new()
    }

    // --- Gestures ---

    fn press_select(&mut self, screen_pt: Point, world: Point) -> Vec<EditorAction> {
        let hit = self
            .shapes
            .iter()
            .rev()
            .find(|s| s.contains(world))
            .map(|s| (s.id.clone(), s.style.clone()));
        let Some((id, style)) = hit else {
            if self.ui.selected_id.take().is_some() {
                return vec![
                    EditorAction::SelectionChanged(None),
                    EditorAction::CloseStyleEditor,
                    EditorAction::RenderNeeded,
                ];
            }
            return Vec::new();
        };
        let mut actions = Vec::new();
        if self.ui.selected_id.as_deref() != Some(id.as_str()) {
            self.ui.selected_id = Some(id.clone());
            actions.push(EditorAction::SelectionChanged(Some(id.clone())));
        }
        let anchor = Point::new(screen_pt.x + STYLE_EDITOR_OFFSET_PX, screen_pt.y + STYLE_EDITOR_OFFSET_PX);
        actions.push(EditorAction::OpenStyleEditor { id: id.clone(), anchor, style });
        actions.push(EditorAction::RenderNeeded);
        self.drag_snapshot = Some(self.shapes.clone());
        self.input = InputState::DraggingShape { id, start_screen: screen_pt, last_world: world, moved: false };
        actions
    }

    fn place_vertex(&mut self, world: Point, lock_axis: bool) -> Vec<EditorAction> {
        let candidate = match self.drawing.last() {
            Some(&prev) if lock_axis => axis_lock(prev, world),
            _ => world,
        };
        if self.drawing.last().is_some_and(|p| p.approx_eq(candidate, VERTEX_EPSILON)) {
            return Vec::new();
        }
        self.drawing.push(candidate);
        vec![EditorAction::RenderNeeded]
    }

    /// Add a finished shape, then switch to Select with it selected.
    fn commit_shape(&mut self, kind: ShapeKind, vertices: Vec<Point>) -> Vec<EditorAction> {
        self.history.record(self.shapes.clone());
        let id = self.fresh_id();
        tracing::debug!(id = %id, ?kind, vertices = vertices.len(), "committed shape");
        self.shapes.push(Shape { id: id.clone(), kind, vertices, style: StyleOptions::default() });
        self.drawing.clear();
        self.cursor_world = None;

        let mut actions = vec![EditorAction::ShapesChanged];
        actions.extend(self.set_tool(Tool::Select));
        self.ui.selected_id = Some(id.clone());
        actions.push(EditorAction::SelectionChanged(Some(id)));
        actions.push(EditorAction::RenderNeeded);
        actions
    }

    /// Time-based id, suffixed when two shapes land in the same millisecond.
    fn fresh_id(&self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        let base = format!("area-{millis}");
        if !self.shapes.iter().any(|s| s.id == base) {
            return base;
        }
        let mut n = 2_u32;
        loop {
            let candidate = format!("{base}-{n}");
            if !self.shapes.iter().any(|s| s.id == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    // --- Mutations ---

    pub fn undo(&mut self) -> Vec<EditorAction> {
        if !self.history.can_undo() {
            return Vec::new();
        }
        self.cancel_gesture();
        let current = std::mem::take(&mut self.shapes);
        if let Some(previous) = self.history.undo(current) {
            self.shapes = previous;
        }
        self.after_history_jump()
    }

    pub fn redo(&mut self) -> Vec<EditorAction> {
        if !self.history.can_redo() {
            return Vec::new();
        }
        self.cancel_gesture();
        let current = std::mem::take(&mut self.shapes);
        if let Some(next) = self.history.redo(current) {
            self.shapes = next;
        }
        self.after_history_jump()
    }

    fn after_history_jump(&mut self) -> Vec<EditorAction> {
        let mut actions = vec![EditorAction::ShapesChanged, EditorAction::RenderNeeded];
        let dangling = self
            .ui
            .selected_id
            .as_ref()
            .is_some_and(|id| !self.shapes.iter().any(|s| s.id == *id));
        if dangling {
            self.ui.selected_id = None;
            actions.push(EditorAction::SelectionChanged(None));
            actions.push(EditorAction::CloseStyleEditor);
        }
        actions
    }

    /// Remove the selected shape.
    pub fn delete_selected(&mut self) -> Vec<EditorAction> {
        let Some(id) = self.ui.selected_id.clone() else {
            return Vec::new();
        };
        let Some(index) = self.shapes.iter().position(|s| s.id == id) else {
            return Vec::new();
        };
        self.cancel_gesture();
        self.history.record(self.shapes.clone());
        self.shapes.remove(index);
        self.ui.selected_id = None;
        tracing::debug!(id = %id, "deleted shape");
        vec![
            EditorAction::ShapesChanged,
            EditorAction::SelectionChanged(None),
            EditorAction::CloseStyleEditor,
            EditorAction::RenderNeeded,
        ]
    }

    /// Change a shape's fill and opacity. Opacity is clamped to `[0, 1]`.
    pub fn set_style(&mut self, id: &str, style: StyleOptions) -> Vec<EditorAction> {
        let style = StyleOptions { opacity: style.opacity.clamp(0.0, 1.0), ..style };
        let Some(index) = self.shapes.iter().position(|s| s.id == id) else {
            return Vec::new();
        };
        if self.shapes[index].style == style {
            return Vec::new();
        }
        self.history.record(self.shapes.clone());
        self.shapes[index].style = style;
        vec![EditorAction::ShapesChanged, EditorAction::RenderNeeded]
    }

    // --- Export ---

    /// Serialize every shape into a standalone SVG with an `Areas` layer.
    #[must_use]
    pub fn export_svg(&self) -> String {
        let view_box = self.export_view_box();
        let height = view_box.y * 2.0 + view_box.height;
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{}\" width=\"{}\" height=\"{}\">\n",
            view_box.to_attr(),
            format_number(view_box.width),
            format_number(view_box.height),
        );
        out.push_str("  <g id=\"Areas\">\n");
        for shape in &self.shapes {
            let d = to_path_data(&flip_y(&shape.vertices, height), shape.kind == ShapeKind::Polygon);
            out.push_str(&format!(
                "    <path id=\"{}\" d=\"{d}\" fill=\"{}\" fill-opacity=\"{}\"/>\n",
                escape_attr(&shape.id),
                escape_attr(&shape.style.fill),
                format_number(shape.style.opacity),
            ));
        }
        out.push_str("  </g>\n</svg>\n");
        out
    }

    /// The loaded document's view box, or the shapes' extent when nothing was loaded.
    fn export_view_box(&self) -> ViewBox {
        if !self.view_box.is_empty() {
            return self.view_box;
        }
        self.shapes
            .iter()
            .filter_map(Shape::bounds)
            .reduce(|acc, b| acc.union(&b))
            .map_or_else(ViewBox::default, |b| ViewBox::new(b.min_x, b.min_y, b.width(), b.height()))
    }

    /// Request body for persisting the current shapes as `floor`'s plan.
    #[must_use]
    pub fn save_request(&self, floor: &str) -> SaveSvgRequest {
        SaveSvgRequest { floor: floor.to_owned(), svg_content: self.export_svg() }
    }

    /// [`save_request`](Self::save_request) encoded as JSON.
    ///
    /// # Errors
    ///
    /// Propagates serialization failures from `serde_json`.
    pub fn save_body(&self, floor: &str) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.save_request(floor))
    }

    // --- Queries ---

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[must_use]
    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_id.as_deref()
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    /// Polygon vertices placed so far.
    #[must_use]
    pub fn drawing(&self) -> &[Point] {
        &self.drawing
    }

    /// Outline of the shape being drawn, including the pointer's rubber-band point.
    #[must_use]
    pub fn preview(&self) -> Option<Vec<Point>> {
        match &self.input {
            InputState::DrawingRect { anchor, current } => Some(vec![
                *anchor,
                Point::new(current.x, anchor.y),
                *current,
                Point::new(anchor.x, current.y),
            ]),
            InputState::DrawingPolyline { points } => Some(points.clone()),
            _ if !self.drawing.is_empty() => {
                let mut points = self.drawing.clone();
                points.extend(self.cursor_world);
                Some(points)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn status(&self) -> &EditorStatus {
        &self.status
    }

    #[must_use]
    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
