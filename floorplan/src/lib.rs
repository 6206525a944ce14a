//! Floor-plan core for the facility manager.
//!
//! This crate holds everything about a floor plan that does not need a
//! browser: reading SVG floor plans into clickable regions, the viewer's
//! hover/select/zoom state machine, and the editor that lets an operator
//! redraw room areas and write them back out as SVG. Hosts (the web front
//! end, the API server) feed events in and apply the returned actions.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Points, bounds, point-in-polygon, axis lock, y flip |
//! | [`path`] | SVG path data parser and writer |
//! | [`svg`] | Region discovery and fill resolution |
//! | [`registry`] | Live region set with highlight state |
//! | [`viewport`] | Viewer zoom/pan relative to the original view box |
//! | [`viewer`] | Viewer interaction core ([`viewer::ViewerCore`]) |
//! | [`camera`] | Editor pan/zoom camera |
//! | [`input`] | Editor tools, input events, gesture state |
//! | [`history`] | Snapshot undo/redo |
//! | [`editor`] | Editor interaction core ([`editor::EditorCore`]) |
//! | [`floor`] | Floor name sanitization and ordering |
//! | [`consts`] | Shared numeric constants (zoom limits, opacities, etc.) |

pub mod camera;
pub mod consts;
pub mod editor;
pub mod floor;
pub mod geometry;
pub mod history;
pub mod input;
pub mod path;
pub mod registry;
pub mod svg;
pub mod viewer;
pub mod viewport;
