//! The schedule store.
//!
//! [`ScheduleStore`] owns the ordered in-memory collection of vehicles and
//! keeps the backing file in sync by rewriting it after every successful
//! mutation. The collection is the single source of truth; the file is a
//! derived mirror of it.
//!
//! Every operation is all-or-nothing: if validation or the persistence
//! write fails, the collection is left exactly as it was before the call.

mod error;
mod persist;

pub use error::StoreError;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{NewVehicle, ScheduleTime, Vehicle, VehicleChange, VehicleId};

/// A collection of scheduled vehicles backed by a flat JSON file.
///
/// The store assumes a single owner for its entire lifetime: no other
/// process or thread writes to the backing file.
///
/// # Examples
///
/// ```
/// use schedule_store::domain::NewVehicle;
/// use schedule_store::store::ScheduleStore;
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut store = ScheduleStore::open(dir.path().join("schedule.json")).unwrap();
///
/// store.add(NewVehicle {
///     id: "B1".to_string(),
///     operator: "Aruzhan".to_string(),
///     route: "Depot - Airport".to_string(),
///     departure: "08:30".to_string(),
///     arrival: None,
///     note: None,
/// }).unwrap();
///
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.find_by_time("08:30").unwrap().len(), 1);
/// ```
#[derive(Debug)]
pub struct ScheduleStore {
    path: PathBuf,
    vehicles: Vec<Vehicle>,
}

impl ScheduleStore {
    /// Open a store backed by the given file, loading any existing records.
    ///
    /// A missing file starts an empty schedule. A file that exists but
    /// cannot be read back fails with [`StoreError::CorruptStorage`];
    /// whether to abort or discard and start empty is the caller's policy,
    /// not the store's (see [`ScheduleStore::empty`]).
    ///
    /// Identifier uniqueness is not re-checked on load: a hand-edited file
    /// with duplicate ids loads as-is, and the duplicate only surfaces when
    /// a later add collides with it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let vehicles = persist::load(&path)?;
        debug!(count = vehicles.len(), path = %path.display(), "loaded schedule");
        Ok(Self { path, vehicles })
    }

    /// Create a store over the given file with an empty collection,
    /// ignoring whatever the file currently holds.
    ///
    /// The file itself is left untouched until the first mutation rewrites
    /// it. This is the "discard and start empty" half of the corrupt
    /// storage policy.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            vehicles: Vec::new(),
        }
    }

    /// Add a new vehicle to the schedule.
    ///
    /// The draft's departure and arrival times are validated and the
    /// identifier checked for uniqueness before anything is appended; on
    /// any failure the collection is unchanged. On success the record is
    /// appended (insertion order is preserved) and the schedule persisted.
    pub fn add(&mut self, new: NewVehicle) -> Result<(), StoreError> {
        let departure = ScheduleTime::parse(&new.departure)?;
        let arrival = match new.arrival.as_deref() {
            Some(s) => Some(ScheduleTime::parse(s)?),
            None => None,
        };
        let id = VehicleId::new(new.id)?;

        if self.index_of(id.as_str()).is_some() {
            return Err(StoreError::DuplicateId(id.into_inner()));
        }

        self.vehicles.push(Vehicle::new(
            id,
            new.operator,
            new.route,
            departure,
            arrival,
            new.note,
        ));

        if let Err(e) = self.save() {
            self.vehicles.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Remove the vehicle with the given identifier.
    ///
    /// Returns whether a record was removed; removing an unknown id is a
    /// no-op, not an error, and triggers no write.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let Some(index) = self.index_of(id) else {
            return Ok(false);
        };

        let removed = self.vehicles.remove(index);
        if let Err(e) = self.save() {
            self.vehicles.insert(index, removed);
            return Err(e);
        }
        Ok(true)
    }

    /// Apply a set of field changes to the vehicle with the given
    /// identifier.
    ///
    /// Returns `Ok(false)` when no record has the identifier. The changes
    /// apply all-or-nothing: an invalid time in any of them aborts the
    /// whole call with the target record untouched. Later changes to the
    /// same field win over earlier ones.
    pub fn update(&mut self, id: &str, changes: Vec<VehicleChange>) -> Result<bool, StoreError> {
        let Some(index) = self.index_of(id) else {
            return Ok(false);
        };

        let mut patched = self.vehicles[index].clone();
        for change in changes {
            match change {
                VehicleChange::Operator(operator) => patched.operator = operator,
                VehicleChange::Route(route) => patched.route = route,
                VehicleChange::Departure(raw) => patched.departure = ScheduleTime::parse(&raw)?,
                VehicleChange::Arrival(raw) => {
                    patched.arrival = match raw.as_deref() {
                        Some(s) => Some(ScheduleTime::parse(s)?),
                        None => None,
                    }
                }
                VehicleChange::Note(note) => patched.note = note,
            }
        }

        let previous = std::mem::replace(&mut self.vehicles[index], patched);
        if let Err(e) = self.save() {
            self.vehicles[index] = previous;
            return Err(e);
        }
        Ok(true)
    }

    /// Returns the full collection in insertion order.
    pub fn list_all(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Returns every vehicle departing at the given time, in store order.
    ///
    /// The query string is validated like any other time input; zero
    /// matches is an empty result, not an error.
    pub fn find_by_time(&self, time: &str) -> Result<Vec<&Vehicle>, StoreError> {
        let wanted = ScheduleTime::parse(time)?;
        Ok(self
            .vehicles
            .iter()
            .filter(|v| v.departure == wanted)
            .collect())
    }

    /// Number of records in the schedule.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the schedule holds no records.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.vehicles.iter().position(|v| v.id().as_str() == id)
    }

    fn save(&self) -> Result<(), StoreError> {
        persist::save(&self.path, &self.vehicles)?;
        debug!(count = self.vehicles.len(), path = %self.path.display(), "saved schedule");
        Ok(())
    }
}
