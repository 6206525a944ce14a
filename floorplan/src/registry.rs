//! Region registry: the live set of clickable areas on one floor.
//!
//! The registry is rebuilt from scratch whenever a floor's SVG content
//! changes; it is never patched incrementally. Regions keep document order,
//! which is also draw order, so the last region containing a point is the
//! topmost one.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;

use serde::Serialize;

use crate::consts::{HOVER_OPACITY, IDLE_OPACITY, SELECTED_OPACITY};
use crate::geometry::{Bounds, Point, point_in_polygon};
use crate::svg::DiscoveredRegion;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate region id: {0}")]
    DuplicateId(String),
}

/// Interaction state of a region overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// Invisible overlay.
    #[default]
    Idle,
    /// Pointer is over the region.
    Hovered,
    /// Region was clicked or picked from a list; survives pointer-leave.
    Selected,
}

impl Highlight {
    /// Overlay opacity for this state.
    #[must_use]
    pub fn opacity(self) -> f64 {
        match self {
            Self::Idle => IDLE_OPACITY,
            Self::Hovered => HOVER_OPACITY,
            Self::Selected => SELECTED_OPACITY,
        }
    }
}

/// A clickable area on the floor plan, in SVG user units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub id: String,
    /// Fill currently shown for the overlay.
    pub fill_color: String,
    /// Fill as resolved from the source document.
    pub original_color: String,
    pub opacity: f64,
    pub geometry: Vec<Point>,
    pub closed: bool,
    /// Position of the source element among the document's shapes.
    pub source_index: usize,
    pub highlight: Highlight,
}

impl Region {
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.geometry)
    }

    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        point_in_polygon(pt, &self.geometry)
    }
}

impl From<DiscoveredRegion> for Region {
    fn from(found: DiscoveredRegion) -> Self {
        Self {
            id: found.id,
            original_color: found.fill_color.clone(),
            fill_color: found.fill_color,
            opacity: Highlight::Idle.opacity(),
            geometry: found.points,
            closed: found.closed,
            source_index: found.source_index,
            highlight: Highlight::Idle,
        }
    }
}

/// Insertion-ordered, id-indexed set of regions.
#[derive(Debug, Default)]
pub struct RegionRegistry {
    regions: Vec<Region>,
    index: HashMap<String, usize>,
}

impl RegionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every region. Later duplicates of an id are dropped.
    pub fn rebuild(&mut self, found: Vec<DiscoveredRegion>) {
        self.clear();
        for region in found {
            if let Err(err) = self.insert(Region::from(region)) {
                tracing::warn!(error = %err, "skipping region during rebuild");
            }
        }
    }

    /// Append a region.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if a region with the same id is already present.
    pub fn insert(&mut self, region: Region) -> Result<(), RegistryError> {
        if self.index.contains_key(&region.id) {
            return Err(RegistryError::DuplicateId(region.id));
        }
        self.index.insert(region.id.clone(), self.regions.len());
        self.regions.push(region);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.regions.clear();
        self.index.clear();
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Region> {
        self.index.get(id).map(|&i| &self.regions[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Region> {
        self.index.get(id).map(|&i| &mut self.regions[i])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Regions in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Set a region's highlight state and matching opacity. Returns false for unknown ids.
    pub fn set_highlight(&mut self, id: &str, highlight: Highlight) -> bool {
        let Some(region) = self.get_mut(id) else {
            return false;
        };
        region.highlight = highlight;
        region.opacity = highlight.opacity();
        true
    }

    /// Override the displayed fill. Returns false for unknown ids.
    pub fn set_fill(&mut self, id: &str, color: &str) -> bool {
        let Some(region) = self.get_mut(id) else {
            return false;
        };
        color.clone_into(&mut region.fill_color);
        true
    }

    /// Restore the fill resolved from the source document.
    pub fn reset_fill(&mut self, id: &str) -> bool {
        let Some(region) = self.get_mut(id) else {
            return false;
        };
        region.fill_color.clone_from(&region.original_color);
        true
    }

    #[must_use]
    pub fn bounds(&self, id: &str) -> Option<Bounds> {
        self.get(id).and_then(Region::bounds)
    }

    /// Topmost region containing `pt`.
    #[must_use]
    pub fn topmost_at(&self, pt: Point) -> Option<&Region> {
        self.regions.iter().rev().find(|r| r.contains(pt))
    }
}
