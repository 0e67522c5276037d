//! On-disk representation of the schedule.
//!
//! The whole collection is serialized as one JSON array and fully rewritten
//! on every successful mutation. Wire records carry plain strings; they are
//! converted to and from the validated domain types on the way through, so
//! a file hand-edited into an invalid state is reported as corrupt rather
//! than loaded as-is.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::StoreError;
use crate::domain::{ScheduleTime, Vehicle, VehicleId};

/// One schedule entry as stored on disk.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct VehicleRecord {
    identifier: String,
    operator: String,
    route: String,
    departure_time: String,
    arrival_time: Option<String>,
    note: Option<String>,
}

impl From<&Vehicle> for VehicleRecord {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            identifier: vehicle.id().as_str().to_string(),
            operator: vehicle.operator.clone(),
            route: vehicle.route.clone(),
            departure_time: vehicle.departure.to_string(),
            arrival_time: vehicle.arrival.map(|t| t.to_string()),
            note: vehicle.note.clone(),
        }
    }
}

impl VehicleRecord {
    /// Convert back into a validated domain record.
    fn into_vehicle(self) -> Result<Vehicle, String> {
        let id = VehicleId::new(self.identifier).map_err(|e| e.to_string())?;
        let departure = ScheduleTime::parse(&self.departure_time)
            .map_err(|e| format!("departure time {:?}: {}", self.departure_time, e))?;
        let arrival = match self.arrival_time.as_deref() {
            Some(s) => Some(
                ScheduleTime::parse(s).map_err(|e| format!("arrival time {:?}: {}", s, e))?,
            ),
            None => None,
        };
        Ok(Vehicle::new(
            id,
            self.operator,
            self.route,
            departure,
            arrival,
            self.note,
        ))
    }
}

/// Load the full collection from `path`.
///
/// A missing file is an empty schedule, not an error. Anything else that
/// prevents reading the collection back is [`StoreError::CorruptStorage`].
pub(crate) fn load(path: &Path) -> Result<Vec<Vehicle>, StoreError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(StoreError::CorruptStorage {
                path: path.to_path_buf(),
                message: e.to_string(),
            });
        }
    };

    let records: Vec<VehicleRecord> =
        serde_json::from_str(&contents).map_err(|e| StoreError::CorruptStorage {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    records
        .into_iter()
        .map(|record| {
            record.into_vehicle().map_err(|message| StoreError::CorruptStorage {
                path: path.to_path_buf(),
                message,
            })
        })
        .collect()
}

/// Rewrite `path` with the full collection.
///
/// Creates parent directories if they don't exist.
pub(crate) fn save(path: &Path, vehicles: &[Vehicle]) -> Result<(), StoreError> {
    let records: Vec<VehicleRecord> = vehicles.iter().map(VehicleRecord::from).collect();

    let json = serde_json::to_string_pretty(&records).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        message: format!("failed to serialize schedule: {}", e),
    })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            message: format!("failed to create schedule directory: {}", e),
        })?;
    }

    std::fs::write(path, json).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(())
}
