//! Contract service: lease records attached to rooms.
//!
//! DESIGN
//! ======
//! A contract covers a closed date range `[contract_start, contract_end]`.
//! Its status is never stored: it is derived from the range and the date of
//! the request, so a contract turns `expired` without anyone touching it.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::{Date, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("contract not found: {0}")]
    NotFound(Uuid),
    #[error("invalid contract: {0}")]
    Invalid(String),
    #[error("room does not exist: {0}")]
    UnknownRoom(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Upcoming,
    Active,
    Expired,
}

/// Status of a contract running `start..=end` as seen on `today`.
#[must_use]
pub fn status_on(start: Date, end: Date, today: Date) -> ContractStatus {
    if today < start {
        ContractStatus::Upcoming
    } else if today > end {
        ContractStatus::Expired
    } else {
        ContractStatus::Active
    }
}

/// Today's date in UTC.
#[must_use]
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Row in the `contracts` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contract {
    pub id: Uuid,
    pub room_id: Uuid,
    pub tenant_name: String,
    pub contract_number: Option<String>,
    pub contract_start: Date,
    pub contract_end: Date,
    pub monthly_rate: Option<f64>,
    pub notes: Option<String>,
}

impl Contract {
    #[must_use]
    pub fn status_on(&self, today: Date) -> ContractStatus {
        status_on(self.contract_start, self.contract_end, today)
    }

    #[must_use]
    pub fn view(self, today: Date) -> ContractView {
        let status = self.status_on(today);
        ContractView { contract: self, status }
    }
}

/// A contract as returned to clients, with its derived status.
#[derive(Debug, Clone, Serialize)]
pub struct ContractView {
    #[serde(flatten)]
    pub contract: Contract,
    pub status: ContractStatus,
}

/// Request body for create and update. Dates are `YYYY-MM-DD`. On update,
/// absent fields keep their value and an empty string clears an optional
/// text field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractInput {
    pub room_id: Option<Uuid>,
    pub tenant_name: Option<String>,
    pub contract_number: Option<String>,
    pub contract_start: Option<Date>,
    pub contract_end: Option<Date>,
    pub monthly_rate: Option<f64>,
    pub notes: Option<String>,
}

impl ContractInput {
    /// Validate a create request into a contract with a fresh id.
    ///
    /// # Errors
    ///
    /// `Invalid` if a required field is missing, the range is inverted, or
    /// the rate is negative.
    pub fn into_new(self) -> Result<Contract, ContractError> {
        let room_id = self.room_id.ok_or_else(|| ContractError::Invalid("room_id is required".into()))?;
        let tenant_name = required_text(self.tenant_name.as_deref(), "tenant_name")?;
        let contract_start =
            self.contract_start.ok_or_else(|| ContractError::Invalid("contract_start is required".into()))?;
        let contract_end =
            self.contract_end.ok_or_else(|| ContractError::Invalid("contract_end is required".into()))?;

        let mut contract = Contract {
            id: Uuid::new_v4(),
            room_id,
            tenant_name,
            contract_number: None,
            contract_start,
            contract_end,
            monthly_rate: None,
            notes: None,
        };
        ContractInput { room_id: None, tenant_name: None, contract_start: None, contract_end: None, ..self }
            .apply_to(&mut contract)?;
        Ok(contract)
    }

    /// Apply the provided fields to `contract`. Leaves it untouched on error.
    ///
    /// # Errors
    ///
    /// `Invalid` if a provided field fails validation or the resulting range
    /// ends before it starts.
    pub fn apply_to(self, contract: &mut Contract) -> Result<(), ContractError> {
        let mut next = contract.clone();
        if let Some(room_id) = self.room_id {
            next.room_id = room_id;
        }
        if let Some(tenant) = self.tenant_name.as_deref() {
            next.tenant_name = required_text(Some(tenant), "tenant_name")?;
        }
        if let Some(number) = self.contract_number {
            next.contract_number = optional_text(number);
        }
        if let Some(start) = self.contract_start {
            next.contract_start = start;
        }
        if let Some(end) = self.contract_end {
            next.contract_end = end;
        }
        if let Some(rate) = self.monthly_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(ContractError::Invalid("monthly_rate must be a non-negative number".into()));
            }
            next.monthly_rate = Some(rate);
        }
        if let Some(notes) = self.notes {
            next.notes = optional_text(notes);
        }
        if next.contract_end < next.contract_start {
            return Err(ContractError::Invalid("contract_end is before contract_start".into()));
        }
        *contract = next;
        Ok(())
    }
}

fn required_text(raw: Option<&str>, field: &str) -> Result<String, ContractError> {
    match raw.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_owned()),
        _ => Err(ContractError::Invalid(format!("{field} is required"))),
    }
}

fn optional_text(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

type ContractTuple = (Uuid, Uuid, String, Option<String>, Date, Date, Option<f64>, Option<String>);

const CONTRACT_COLUMNS: &str =
    "id, room_id, tenant_name, contract_number, contract_start, contract_end, monthly_rate, notes";

fn contract_from_tuple(row: ContractTuple) -> Contract {
    let (id, room_id, tenant_name, contract_number, contract_start, contract_end, monthly_rate, notes) = row;
    Contract { id, room_id, tenant_name, contract_number, contract_start, contract_end, monthly_rate, notes }
}

fn map_write_error(err: sqlx::Error, contract: &Contract) -> ContractError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => ContractError::UnknownRoom(contract.room_id),
        _ => ContractError::Database(err),
    }
}

// =============================================================================
// CRUD
// =============================================================================

/// List contracts, optionally for a single room, newest start first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_contracts(pool: &PgPool, room_id: Option<Uuid>) -> Result<Vec<Contract>, ContractError> {
    let rows = sqlx::query_as::<_, ContractTuple>(&format!(
        "SELECT {CONTRACT_COLUMNS}
         FROM contracts
         WHERE $1::uuid IS NULL OR room_id = $1
         ORDER BY contract_start DESC, tenant_name"
    ))
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(contract_from_tuple).collect())
}

/// Fetch one contract.
///
/// # Errors
///
/// `NotFound` if no contract has this id.
pub async fn get_contract(pool: &PgPool, id: Uuid) -> Result<Contract, ContractError> {
    let row = sqlx::query_as::<_, ContractTuple>(&format!("SELECT {CONTRACT_COLUMNS} FROM contracts WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ContractError::NotFound(id))?;
    Ok(contract_from_tuple(row))
}

/// Insert a validated contract.
///
/// # Errors
///
/// `UnknownRoom` if `room_id` names no room.
pub async fn create_contract(pool: &PgPool, contract: Contract) -> Result<Contract, ContractError> {
    sqlx::query(
        "INSERT INTO contracts
             (id, room_id, tenant_name, contract_number, contract_start, contract_end, monthly_rate, notes)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(contract.id)
    .bind(contract.room_id)
    .bind(&contract.tenant_name)
    .bind(&contract.contract_number)
    .bind(contract.contract_start)
    .bind(contract.contract_end)
    .bind(contract.monthly_rate)
    .bind(&contract.notes)
    .execute(pool)
    .await
    .map_err(|e| map_write_error(e, &contract))?;

    info!(id = %contract.id, room_id = %contract.room_id, "created contract");
    Ok(contract)
}

/// Apply `input` to an existing contract and persist it.
///
/// # Errors
///
/// `NotFound`, `Invalid`, or `UnknownRoom`.
pub async fn update_contract(pool: &PgPool, id: Uuid, input: ContractInput) -> Result<Contract, ContractError> {
    let mut contract = get_contract(pool, id).await?;
    input.apply_to(&mut contract)?;

    let result = sqlx::query(
        "UPDATE contracts
         SET room_id = $2, tenant_name = $3, contract_number = $4, contract_start = $5,
             contract_end = $6, monthly_rate = $7, notes = $8, updated_at = now()
         WHERE id = $1",
    )
    .bind(contract.id)
    .bind(contract.room_id)
    .bind(&contract.tenant_name)
    .bind(&contract.contract_number)
    .bind(contract.contract_start)
    .bind(contract.contract_end)
    .bind(contract.monthly_rate)
    .bind(&contract.notes)
    .execute(pool)
    .await
    .map_err(|e| map_write_error(e, &contract))?;

    if result.rows_affected() == 0 {
        return Err(ContractError::NotFound(id));
    }
    info!(%id, "updated contract");
    Ok(contract)
}

/// Delete a contract.
///
/// # Errors
///
/// `NotFound` if no contract has this id.
pub async fn delete_contract(pool: &PgPool, id: Uuid) -> Result<(), ContractError> {
    let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ContractError::NotFound(id));
    }
    info!(%id, "deleted contract");
    Ok(())
}

#[cfg(test)]
#[path = "contract_test.rs"]
mod tests;
