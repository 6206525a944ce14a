//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and persistence so route handlers can stay
//! focused on protocol translation. Rooms and contracts live in Postgres;
//! floor-plan SVGs live on disk.

pub mod contract;
pub mod room;
pub mod svg_store;
