//! Floor viewer: hover/select state, tooltip, zoom/pan and load lifecycle.
//!
//! DESIGN
//! ======
//! `ViewerCore` holds all interaction state for one floor view and never
//! touches the DOM. The host forwards pointer events (with the region id the
//! pointer is over, when it knows it) and applies the returned
//! [`ViewerAction`]s: re-render overlays, move the tooltip, set the SVG
//! `viewBox`, or open a room dialog.
//!
//! Each region overlay is `Idle`, `Hovered` or `Selected`. Entering any
//! region hovers it, assigned or not. Leaving drops it back to idle unless
//! it is the selection. Clicking selects and asks the host to open either
//! the bound room's detail view or the create-room flow.
//!
//! Floor loads are asynchronous on the host side. Every `begin_load` hands
//! out a [`LoadTicket`]; only the most recent ticket may complete, so a slow
//! response for a floor the user already navigated away from is dropped.

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DRAG_THRESHOLD_PX, SEARCH_FOCUS_ZOOM};
use crate::floor::{fallback_url, sanitize_floor};
use crate::geometry::Point;
use crate::input::Button;
use crate::registry::{Highlight, RegionRegistry};
use crate::svg;
use crate::viewport::{ScreenSize, ViewBox, Viewport};

// =============================================================================
// TYPES
// =============================================================================

/// A room record as far as the viewer cares: enough to bind and label a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRef {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    /// Region id this room is drawn as, if any.
    pub path_id: Option<String>,
}

impl RoomRef {
    fn label(&self) -> String {
        if self.code.is_empty() {
            self.name.clone()
        } else if self.name.is_empty() {
            self.code.clone()
        } else {
            format!("{} - {}", self.code, self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerStatus {
    /// No floor requested yet.
    Empty,
    Loading { floor: String },
    Ready { floor: String },
    /// Load failed; `message` is shown inline in place of the plan.
    Error { floor: String, message: String },
}

/// Why the host could not deliver SVG text for a load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The store has no such floor. With `fallback` set the host should
    /// retry against the static location before giving up.
    #[error("floor plan not found")]
    NotFound { fallback: bool },
    #[error("failed to fetch floor plan: {0}")]
    Network(String),
}

/// Handle for one in-flight floor load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    floor: String,
}

impl LoadTicket {
    #[must_use]
    pub fn floor(&self) -> &str {
        &self.floor
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub region_id: String,
    pub label: String,
    /// Pointer position in CSS pixels relative to the viewer element.
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub region_id: String,
    pub room_id: Uuid,
    pub code: String,
    pub name: String,
}

/// Instructions returned from viewer event handlers for the host to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerAction {
    OpenRoomDetail { room_id: Uuid, region_id: String },
    OpenCreateRoom { region_id: String, fill_color: String },
    ShowTooltip(Tooltip),
    HideTooltip,
    ScrollIntoView { region_id: String },
    ViewBoxChanged(ViewBox),
    /// Fetch the floor again from its static location and finish the same ticket.
    FetchFallback { url: String },
    RenderNeeded,
}

#[derive(Debug, Clone, Copy)]
struct PanDrag {
    last_screen: Point,
    travelled: f64,
}

// =============================================================================
// CORE
// =============================================================================

pub struct ViewerCore {
    registry: RegionRegistry,
    viewport: Viewport,
    screen: ScreenSize,
    rooms: HashMap<String, RoomRef>,
    hovered: Option<String>,
    selected: Option<String>,
    tooltip: Option<Tooltip>,
    status: ViewerStatus,
    generation: u64,
    drag: Option<PanDrag>,
    suppress_click: bool,
}

impl Default for ViewerCore {
    fn default() -> Self {
        Self {
            registry: RegionRegistry::new(),
            viewport: Viewport::default(),
            screen: ScreenSize { width: 0.0, height: 0.0 },
            rooms: HashMap::new(),
            hovered: None,
            selected: None,
            tooltip: None,
            status: ViewerStatus::Empty,
            generation: 0,
            drag: None,
            suppress_click: false,
        }
    }
}

impl ViewerCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Load lifecycle ---

    /// Start loading `floor`. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self, floor: &str) -> LoadTicket {
        self.generation += 1;
        let floor = sanitize_floor(floor);
        self.status = ViewerStatus::Loading { floor: floor.clone() };
        self.hovered = None;
        self.selected = None;
        self.tooltip = None;
        self.drag = None;
        LoadTicket { generation: self.generation, floor }
    }

    #[must_use]
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Complete a load with the fetched SVG text or the reason it is missing.
    pub fn finish_load(&mut self, ticket: &LoadTicket, result: Result<String, LoadError>) -> Vec<ViewerAction> {
        if !self.is_current(ticket) {
            tracing::debug!(floor = %ticket.floor, "dropping stale floor load");
            return Vec::new();
        }
        let floor = ticket.floor.clone();
        let text = match result {
            Ok(text) => text,
            Err(LoadError::NotFound { fallback: true }) => {
                return vec![ViewerAction::FetchFallback { url: fallback_url(&floor) }];
            }
            Err(err) => {
                tracing::warn!(floor = %floor, error = %err, "floor load failed");
                let message = match err {
                    LoadError::NotFound { .. } => format!("Floor plan for {floor} not found"),
                    LoadError::Network(_) => err.to_string(),
                };
                return self.fail_load(floor, message);
            }
        };
        match svg::parse_document(&text, &floor) {
            Ok(doc) => {
                self.registry.rebuild(doc.regions);
                self.viewport = Viewport::new(doc.view_box);
                self.status = ViewerStatus::Ready { floor };
                vec![ViewerAction::ViewBoxChanged(self.viewport.visible_view_box()), ViewerAction::RenderNeeded]
            }
            Err(err) => {
                tracing::warn!(floor = %floor, error = %err, "floor plan could not be parsed");
                self.fail_load(floor, err.to_string())
            }
        }
    }

    fn fail_load(&mut self, floor: String, message: String) -> Vec<ViewerAction> {
        self.registry.clear();
        self.status = ViewerStatus::Error { floor, message };
        vec![ViewerAction::HideTooltip, ViewerAction::RenderNeeded]
    }

    // --- Room bindings ---

    /// Replace the room records bound to regions. The first room claiming a region wins.
    pub fn bind_rooms(&mut self, rooms: Vec<RoomRef>) -> Vec<ViewerAction> {
        self.rooms.clear();
        for room in rooms {
            let Some(path_id) = room.path_id.clone() else {
                continue;
            };
            if self.rooms.contains_key(&path_id) {
                tracing::warn!(region = %path_id, room = %room.id, "region already bound to another room");
                continue;
            }
            self.rooms.insert(path_id, room);
        }
        vec![ViewerAction::RenderNeeded]
    }

    #[must_use]
    pub fn room_for(&self, region_id: &str) -> Option<&RoomRef> {
        self.rooms.get(region_id)
    }

    #[must_use]
    pub fn is_assigned(&self, region_id: &str) -> bool {
        self.rooms.contains_key(region_id)
    }

    // --- Hover / select ---

    pub fn on_pointer_enter(&mut self, region_id: &str, screen_pt: Point) -> Vec<ViewerAction> {
        if !self.registry.contains(region_id) {
            return Vec::new();
        }
        if let Some(prev) = self.hovered.take() {
            if prev != region_id {
                self.settle(&prev);
            }
        }
        self.hovered = Some(region_id.to_owned());
        if self.selected.as_deref() != Some(region_id) {
            self.registry.set_highlight(region_id, Highlight::Hovered);
        }
        let tooltip = Tooltip { region_id: region_id.to_owned(), label: self.label_for(region_id), position: screen_pt };
        self.tooltip = Some(tooltip.clone());
        vec![ViewerAction::ShowTooltip(tooltip), ViewerAction::RenderNeeded]
    }

    pub fn on_pointer_leave(&mut self, region_id: &str) -> Vec<ViewerAction> {
        if self.hovered.as_deref() != Some(region_id) {
            return Vec::new();
        }
        self.hovered = None;
        self.settle(region_id);
        self.tooltip = None;
        vec![ViewerAction::HideTooltip, ViewerAction::RenderNeeded]
    }

    pub fn on_click(&mut self, region_id: &str) -> Vec<ViewerAction> {
        if std::mem::take(&mut self.suppress_click) {
            return Vec::new();
        }
        let Some(region) = self.registry.get(region_id) else {
            return Vec::new();
        };
        let open = match self.rooms.get(region_id) {
            Some(room) => ViewerAction::OpenRoomDetail { room_id: room.id, region_id: region_id.to_owned() },
            None => ViewerAction::OpenCreateRoom {
                region_id: region_id.to_owned(),
                fill_color: region.original_color.clone(),
            },
        };
        self.select(region_id);
        vec![open, ViewerAction::RenderNeeded]
    }

    /// Select a region picked from an outside list and bring it into view.
    pub fn select_from_list(&mut self, region_id: &str) -> Vec<ViewerAction> {
        if !self.select(region_id) {
            return Vec::new();
        }
        vec![ViewerAction::ScrollIntoView { region_id: region_id.to_owned() }, ViewerAction::RenderNeeded]
    }

    pub fn clear_selection(&mut self) -> Vec<ViewerAction> {
        let Some(prev) = self.selected.take() else {
            return Vec::new();
        };
        self.settle(&prev);
        vec![ViewerAction::RenderNeeded]
    }

    /// Make `region_id` the selection. Returns false for unknown regions.
    fn select(&mut self, region_id: &str) -> bool {
        if !self.registry.contains(region_id) {
            return false;
        }
        if let Some(prev) = self.selected.replace(region_id.to_owned()) {
            if prev != region_id {
                self.settle(&prev);
            }
        }
        self.registry.set_highlight(region_id, Highlight::Selected);
        true
    }

    /// Reapply the highlight a region should have when nothing new happens to it.
    fn settle(&mut self, region_id: &str) {
        let highlight = if self.selected.as_deref() == Some(region_id) {
            Highlight::Selected
        } else if self.hovered.as_deref() == Some(region_id) {
            Highlight::Hovered
        } else {
            Highlight::Idle
        };
        self.registry.set_highlight(region_id, highlight);
    }

    fn label_for(&self, region_id: &str) -> String {
        self.rooms
            .get(region_id)
            .map_or_else(|| format!("{region_id} (unassigned)"), RoomRef::label)
    }

    // --- Zoom / pan ---

    pub fn set_screen_size(&mut self, screen: ScreenSize) {
        self.screen = screen;
    }

    pub fn on_wheel(&mut self, delta_y: f64) -> Vec<ViewerAction> {
        self.viewport.wheel(delta_y);
        self.view_changed()
    }

    pub fn zoom_in(&mut self) -> Vec<ViewerAction> {
        self.viewport.zoom_in();
        self.view_changed()
    }

    pub fn zoom_out(&mut self) -> Vec<ViewerAction> {
        self.viewport.zoom_out();
        self.view_changed()
    }

    pub fn reset_view(&mut self) -> Vec<ViewerAction> {
        self.viewport.reset();
        self.view_changed()
    }

    /// Start a pan drag. Ignored at zoom 1 where panning is disabled.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<ViewerAction> {
        self.suppress_click = false;
        if button == Button::Primary && self.viewport.can_pan() {
            self.drag = Some(PanDrag { last_screen: screen_pt, travelled: 0.0 });
        }
        Vec::new()
    }

    /// Pan while dragging, otherwise keep the tooltip under the pointer.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<ViewerAction> {
        if let Some(drag) = self.drag.as_mut() {
            let delta = Point::new(screen_pt.x - drag.last_screen.x, screen_pt.y - drag.last_screen.y);
            drag.travelled += delta.x.hypot(delta.y);
            drag.last_screen = screen_pt;
            self.viewport.drag_by(delta, self.screen);
            return self.view_changed();
        }
        let Some(tooltip) = self.tooltip.as_mut() else {
            return Vec::new();
        };
        tooltip.position = screen_pt;
        vec![ViewerAction::ShowTooltip(tooltip.clone())]
    }

    /// End a pan drag. A drag that actually moved swallows the click that follows it.
    pub fn on_pointer_up(&mut self) -> Vec<ViewerAction> {
        if let Some(drag) = self.drag.take() {
            self.suppress_click = drag.travelled > DRAG_THRESHOLD_PX;
        }
        Vec::new()
    }

    fn view_changed(&self) -> Vec<ViewerAction> {
        vec![ViewerAction::ViewBoxChanged(self.viewport.visible_view_box())]
    }

    // --- Search ---

    /// Rooms on this floor whose name or code contains `query`, ignoring case.
    /// Results follow draw order; rooms without a region on the floor are skipped.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.registry
            .iter()
            .filter_map(|region| self.rooms.get(&region.id).map(|room| (region, room)))
            .filter(|(_, room)| room.name.to_lowercase().contains(&needle) || room.code.to_lowercase().contains(&needle))
            .map(|(region, room)| SearchHit {
                region_id: region.id.clone(),
                room_id: room.id,
                code: room.code.clone(),
                name: room.name.clone(),
            })
            .collect()
    }

    /// Focus a search result: center on it at the search zoom level and select it.
    pub fn select_search_hit(&mut self, region_id: &str) -> Vec<ViewerAction> {
        let Some(bounds) = self.registry.bounds(region_id) else {
            return Vec::new();
        };
        self.viewport.center_on(&bounds, SEARCH_FOCUS_ZOOM);
        self.select(region_id);
        vec![ViewerAction::ViewBoxChanged(self.viewport.visible_view_box()), ViewerAction::RenderNeeded]
    }

    // --- Queries ---

    /// Topmost region under a screen point, for hosts that do not track per-element events.
    #[must_use]
    pub fn region_at(&self, screen_pt: Point) -> Option<&str> {
        let svg_pt = self.viewport.screen_to_svg(screen_pt, self.screen);
        self.registry.topmost_at(svg_pt).map(|r| r.id.as_str())
    }

    #[must_use]
    pub fn status(&self) -> &ViewerStatus {
        &self.status
    }

    #[must_use]
    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}
