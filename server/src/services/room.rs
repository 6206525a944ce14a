//! Room service: CRUD over the `rooms` table.
//!
//! DESIGN
//! ======
//! A room is the business record behind a drawn region. `path_id` names the
//! region on its floor's plan; at most one room may claim a given region on
//! a floor (enforced by a partial unique index). Rooms without a `path_id`
//! exist but are not clickable on the map.
//!
//! Input validation lives here rather than in the routes so that every
//! writer goes through the same rules.

use floorplan::floor::sanitize_floor;
use floorplan::viewer::RoomRef;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    #[error("room not found: {0}")]
    NotFound(Uuid),
    #[error("invalid room: {0}")]
    Invalid(String),
    #[error("region {path_id} on floor {floor} already belongs to another room")]
    PathTaken { floor: String, path_id: String },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

impl RoomStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Reserved => "reserved",
            Self::Maintenance => "maintenance",
        }
    }
}

impl std::str::FromStr for RoomStatus {
    type Err = RoomError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "reserved" => Ok(Self::Reserved),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(RoomError::Invalid(format!("unknown status {raw:?}"))),
        }
    }
}

/// Row in the `rooms` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub floor: String,
    pub path_id: Option<String>,
    pub status: RoomStatus,
    pub area_sqm: Option<f64>,
    pub tenant_name: Option<String>,
    pub notes: Option<String>,
}

impl From<&Room> for RoomRef {
    fn from(room: &Room) -> Self {
        Self { id: room.id, code: room.code.clone(), name: room.name.clone(), path_id: room.path_id.clone() }
    }
}

/// Request body for create and update. On update, absent fields keep their
/// value and an empty string clears an optional text field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomInput {
    pub code: Option<String>,
    pub name: Option<String>,
    pub floor: Option<String>,
    pub path_id: Option<String>,
    pub status: Option<String>,
    pub area_sqm: Option<f64>,
    pub tenant_name: Option<String>,
    pub notes: Option<String>,
}

impl RoomInput {
    /// Validate a create request into a room with a fresh id.
    ///
    /// # Errors
    ///
    /// `Invalid` if `code`, `name` or `floor` is missing or blank, or any
    /// provided field fails validation.
    pub fn into_new(self) -> Result<Room, RoomError> {
        let mut room = Room {
            id: Uuid::new_v4(),
            code: required_text(self.code.as_deref(), "code")?,
            name: required_text(self.name.as_deref(), "name")?,
            floor: required_floor(self.floor.as_deref())?,
            path_id: None,
            status: RoomStatus::default(),
            area_sqm: None,
            tenant_name: None,
            notes: None,
        };
        RoomInput { code: None, name: None, floor: None, ..self }.apply_to(&mut room)?;
        Ok(room)
    }

    /// Apply the provided fields to `room`. Leaves `room` untouched on error.
    ///
    /// # Errors
    ///
    /// `Invalid` if any provided field fails validation.
    pub fn apply_to(self, room: &mut Room) -> Result<(), RoomError> {
        let mut next = room.clone();
        if let Some(code) = self.code.as_deref() {
            next.code = required_text(Some(code), "code")?;
        }
        if let Some(name) = self.name.as_deref() {
            next.name = required_text(Some(name), "name")?;
        }
        if let Some(floor) = self.floor.as_deref() {
            next.floor = required_floor(Some(floor))?;
        }
        if let Some(path_id) = self.path_id {
            next.path_id = optional_text(path_id);
        }
        if let Some(status) = self.status.as_deref() {
            next.status = status.parse()?;
        }
        if let Some(area) = self.area_sqm {
            if !area.is_finite() || area < 0.0 {
                return Err(RoomError::Invalid("area_sqm must be a non-negative number".into()));
            }
            next.area_sqm = Some(area);
        }
        if let Some(tenant) = self.tenant_name {
            next.tenant_name = optional_text(tenant);
        }
        if let Some(notes) = self.notes {
            next.notes = optional_text(notes);
        }
        *room = next;
        Ok(())
    }
}

fn required_text(raw: Option<&str>, field: &str) -> Result<String, RoomError> {
    match raw.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_owned()),
        _ => Err(RoomError::Invalid(format!("{field} is required"))),
    }
}

fn required_floor(raw: Option<&str>) -> Result<String, RoomError> {
    let floor = sanitize_floor(raw.unwrap_or_default());
    if floor.is_empty() {
        return Err(RoomError::Invalid("floor is required".into()));
    }
    Ok(floor)
}

fn optional_text(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

type RoomTuple = (Uuid, String, String, String, Option<String>, String, Option<f64>, Option<String>, Option<String>);

const ROOM_COLUMNS: &str = "id, code, name, floor, path_id, status, area_sqm, tenant_name, notes";

fn room_from_tuple(row: RoomTuple) -> Room {
    let (id, code, name, floor, path_id, status, area_sqm, tenant_name, notes) = row;
    let status = status.parse().unwrap_or_else(|_| {
        tracing::warn!(%id, %status, "unknown room status in database; treating as available");
        RoomStatus::Available
    });
    Room { id, code, name, floor, path_id, status, area_sqm, tenant_name, notes }
}

fn map_write_error(err: sqlx::Error, room: &Room) -> RoomError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => RoomError::PathTaken {
            floor: room.floor.clone(),
            path_id: room.path_id.clone().unwrap_or_default(),
        },
        _ => RoomError::Database(err),
    }
}

// =============================================================================
// CRUD
// =============================================================================

/// List rooms, optionally limited to one floor, ordered by floor then code.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_rooms(pool: &PgPool, floor: Option<&str>) -> Result<Vec<Room>, RoomError> {
    let floor = floor.map(sanitize_floor).filter(|f| !f.is_empty());
    let rows = sqlx::query_as::<_, RoomTuple>(&format!(
        "SELECT {ROOM_COLUMNS}
         FROM rooms
         WHERE $1::text IS NULL OR floor = $1
         ORDER BY floor, code"
    ))
    .bind(floor)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(room_from_tuple).collect())
}

/// Fetch one room.
///
/// # Errors
///
/// `NotFound` if no room has this id.
pub async fn get_room(pool: &PgPool, id: Uuid) -> Result<Room, RoomError> {
    let row = sqlx::query_as::<_, RoomTuple>(&format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(RoomError::NotFound(id))?;
    Ok(room_from_tuple(row))
}

/// Insert a validated room.
///
/// # Errors
///
/// `PathTaken` if another room on the floor already claims `path_id`.
pub async fn create_room(pool: &PgPool, room: Room) -> Result<Room, RoomError> {
    sqlx::query(
        "INSERT INTO rooms (id, code, name, floor, path_id, status, area_sqm, tenant_name, notes)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(room.id)
    .bind(&room.code)
    .bind(&room.name)
    .bind(&room.floor)
    .bind(&room.path_id)
    .bind(room.status.as_str())
    .bind(room.area_sqm)
    .bind(&room.tenant_name)
    .bind(&room.notes)
    .execute(pool)
    .await
    .map_err(|e| map_write_error(e, &room))?;

    info!(id = %room.id, code = %room.code, floor = %room.floor, "created room");
    Ok(room)
}

/// Apply `input` to an existing room and persist it.
///
/// # Errors
///
/// `NotFound`, `Invalid`, or `PathTaken`.
pub async fn update_room(pool: &PgPool, id: Uuid, input: RoomInput) -> Result<Room, RoomError> {
    let mut room = get_room(pool, id).await?;
    input.apply_to(&mut room)?;

    let result = sqlx::query(
        "UPDATE rooms
         SET code = $2, name = $3, floor = $4, path_id = $5, status = $6,
             area_sqm = $7, tenant_name = $8, notes = $9, updated_at = now()
         WHERE id = $1",
    )
    .bind(room.id)
    .bind(&room.code)
    .bind(&room.name)
    .bind(&room.floor)
    .bind(&room.path_id)
    .bind(room.status.as_str())
    .bind(room.area_sqm)
    .bind(&room.tenant_name)
    .bind(&room.notes)
    .execute(pool)
    .await
    .map_err(|e| map_write_error(e, &room))?;

    if result.rows_affected() == 0 {
        return Err(RoomError::NotFound(id));
    }
    info!(%id, "updated room");
    Ok(room)
}

/// Delete a room. Its contracts go with it.
///
/// # Errors
///
/// `NotFound` if no room has this id.
pub async fn delete_room(pool: &PgPool, id: Uuid) -> Result<(), RoomError> {
    let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RoomError::NotFound(id));
    }
    info!(%id, "deleted room");
    Ok(())
}

#[cfg(test)]
#[path = "room_test.rs"]
mod tests;
