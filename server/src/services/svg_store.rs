//! Floor-plan SVG file store.
//!
//! DESIGN
//! ======
//! One file per floor, `{FLOOR}.svg`, where `FLOOR` is the sanitized floor
//! name. Saved plans live under the store root; the plans shipped with the
//! app live in the static directory and are served as-is under `/denah`.
//! `read` only looks at the store so callers can tell "never saved" apart
//! and fall back to the static copy themselves.
//!
//! Writes go to a temporary sibling and are renamed into place, so a reader
//! never sees a half-written plan.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use floorplan::floor::{sanitize_floor, sort_floors, svg_file_name};
use floorplan::svg::{self, FloorDocument};
use tracing::info;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SvgStoreError {
    #[error("no saved floor plan for {0}")]
    NotFound(String),
    #[error("invalid floor name: {0:?}")]
    InvalidFloor(String),
    #[error("content is not an svg document: {0}")]
    NotSvg(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct SvgStore {
    root: PathBuf,
    static_dir: PathBuf,
}

// =============================================================================
// STORE
// =============================================================================

impl SvgStore {
    #[must_use]
    pub fn new(root: PathBuf, static_dir: PathBuf) -> Self {
        Self { root, static_dir }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    /// Read the saved plan for `raw_floor`.
    ///
    /// # Errors
    ///
    /// `InvalidFloor` if the name sanitizes to nothing, `NotFound` if no plan
    /// was saved, `Io` for anything else.
    pub async fn read(&self, raw_floor: &str) -> Result<String, SvgStoreError> {
        let (floor, file) = checked_floor(raw_floor)?;
        read_file(&self.root.join(file), &floor).await
    }

    /// Read the saved plan, falling back to the shipped static copy.
    ///
    /// # Errors
    ///
    /// Same as [`SvgStore::read`]; `NotFound` only when neither copy exists.
    pub async fn read_with_fallback(&self, raw_floor: &str) -> Result<String, SvgStoreError> {
        let (floor, file) = checked_floor(raw_floor)?;
        match read_file(&self.root.join(&file), &floor).await {
            Err(SvgStoreError::NotFound(_)) => read_file(&self.static_dir.join(&file), &floor).await,
            other => other,
        }
    }

    /// Validate and persist `content` as the plan for `raw_floor`. Returns
    /// the sanitized floor name.
    ///
    /// # Errors
    ///
    /// `InvalidFloor` for an empty sanitized name, `NotSvg` if the content is
    /// not an SVG document, `Io` if the write fails.
    pub async fn write(&self, raw_floor: &str, content: &str) -> Result<String, SvgStoreError> {
        let (floor, file) = checked_floor(raw_floor)?;
        svg::parse_document(content, &floor).map_err(|e| SvgStoreError::NotSvg(e.to_string()))?;

        tokio::fs::create_dir_all(&self.root).await?;
        let target = self.root.join(&file);
        let staging = self.root.join(format!(".{file}.tmp"));
        tokio::fs::write(&staging, content).await?;
        tokio::fs::rename(&staging, &target).await?;

        info!(%floor, bytes = content.len(), "saved floor plan");
        Ok(floor)
    }

    /// Floors with a plan in the store or the static directory, in building
    /// order. Missing directories count as empty.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a directory exists but cannot be listed.
    pub async fn list_floors(&self) -> Result<Vec<String>, SvgStoreError> {
        let mut floors = Vec::new();
        collect_floors(&self.root, &mut floors).await?;
        collect_floors(&self.static_dir, &mut floors).await?;
        sort_floors(&mut floors);
        floors.dedup();
        Ok(floors)
    }

    /// Parse the plan for `raw_floor` (saved or shipped) into regions.
    ///
    /// # Errors
    ///
    /// Read errors as for [`SvgStore::read_with_fallback`]; `NotSvg` if the
    /// stored file does not parse.
    pub async fn regions(&self, raw_floor: &str) -> Result<FloorDocument, SvgStoreError> {
        let content = self.read_with_fallback(raw_floor).await?;
        let floor = sanitize_floor(raw_floor);
        svg::parse_document(&content, &floor).map_err(|e| SvgStoreError::NotSvg(e.to_string()))
    }
}

/// Sanitized floor name and its file name in either directory.
fn checked_floor(raw: &str) -> Result<(String, String), SvgStoreError> {
    let file = svg_file_name(raw).ok_or_else(|| SvgStoreError::InvalidFloor(raw.to_owned()))?;
    Ok((sanitize_floor(raw), file))
}

async fn read_file(path: &Path, floor: &str) -> Result<String, SvgStoreError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(SvgStoreError::NotFound(floor.to_owned())),
        Err(e) => Err(e.into()),
    }
}

async fn collect_floors(dir: &Path, out: &mut Vec<String>) -> Result<(), SvgStoreError> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        // Only names the store itself would produce; skips staging files.
        if is_svg && !stem.is_empty() && sanitize_floor(stem) == stem {
            out.push(stem.to_owned());
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "svg_store_test.rs"]
mod tests;
