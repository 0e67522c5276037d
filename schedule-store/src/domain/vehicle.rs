//! Vehicle record types.
//!
//! A `Vehicle` is one validated scheduled entry. `NewVehicle` holds the raw
//! input a caller collected before validation, and `VehicleChange` is the
//! closed set of fields an update may touch.

use std::fmt;

use super::ScheduleTime;

/// Error returned when parsing an invalid vehicle identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid vehicle id: {reason}")]
pub struct InvalidVehicleId {
    reason: &'static str,
}

/// Unique identifier of a scheduled vehicle.
///
/// Identifiers are opaque strings chosen by whoever enters the record.
/// The only validation is that they must be non-empty; the store enforces
/// uniqueness across its collection.
///
/// # Examples
///
/// ```
/// use schedule_store::domain::VehicleId;
///
/// let id = VehicleId::new("BUS-12".to_string()).unwrap();
/// assert_eq!(id.as_str(), "BUS-12");
///
/// // Empty strings are rejected
/// assert!(VehicleId::new("".to_string()).is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VehicleId(String);

impl VehicleId {
    /// Create a new vehicle identifier from a string.
    ///
    /// Returns an error if the string is empty.
    pub fn new(s: String) -> Result<Self, InvalidVehicleId> {
        if s.is_empty() {
            return Err(InvalidVehicleId {
                reason: "vehicle id cannot be empty",
            });
        }
        Ok(VehicleId(s))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the VehicleId and returns the inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VehicleId({})", self.0)
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One scheduled vehicle entry.
///
/// The identifier is fixed at creation and never updatable; every other
/// field may be changed through the store's update operation. Because the
/// time fields are [`ScheduleTime`], a `Vehicle` can never hold an
/// unvalidated or unnormalized time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    id: VehicleId,
    /// Operator (driver) name.
    pub operator: String,
    /// Free-text route description.
    pub route: String,
    /// Departure time.
    pub departure: ScheduleTime,
    /// Arrival time, absent when not yet known.
    pub arrival: Option<ScheduleTime>,
    /// Free-text note.
    pub note: Option<String>,
}

impl Vehicle {
    /// Create a new vehicle record from already-validated parts.
    pub fn new(
        id: VehicleId,
        operator: String,
        route: String,
        departure: ScheduleTime,
        arrival: Option<ScheduleTime>,
        note: Option<String>,
    ) -> Self {
        Self {
            id,
            operator,
            route,
            departure,
            arrival,
            note,
        }
    }

    /// Returns the immutable identifier.
    pub fn id(&self) -> &VehicleId {
        &self.id
    }
}

/// Raw input for a new schedule entry, as collected from the user.
///
/// Nothing here is validated yet; the store's add operation parses the
/// identifier and time fields and rejects the whole draft on any failure.
#[derive(Debug, Clone, Default)]
pub struct NewVehicle {
    pub id: String,
    pub operator: String,
    pub route: String,
    pub departure: String,
    pub arrival: Option<String>,
    pub note: Option<String>,
}

/// A single field change for the store's update operation.
///
/// The updatable fields are a closed set; the identifier is deliberately
/// not among them. Time-carrying variants hold the raw string and are
/// re-validated when applied; `None` clears the optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleChange {
    Operator(String),
    Route(String),
    Departure(String),
    Arrival(Option<String>),
    Note(Option<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_rejects_empty() {
        assert!(VehicleId::new(String::new()).is_err());
    }

    #[test]
    fn id_accepts_nonempty() {
        let id = VehicleId::new("T1".to_string()).unwrap();
        assert_eq!(id.as_str(), "T1");
        assert_eq!(id.into_inner(), "T1");
    }

    #[test]
    fn id_display_and_debug() {
        let id = VehicleId::new("BUS-7".to_string()).unwrap();
        assert_eq!(format!("{}", id), "BUS-7");
        assert_eq!(format!("{:?}", id), "VehicleId(BUS-7)");
    }

    #[test]
    fn id_equality_and_hash() {
        use std::collections::HashSet;
        let a = VehicleId::new("A".to_string()).unwrap();
        let b = VehicleId::new("A".to_string()).unwrap();
        let c = VehicleId::new("B".to_string()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn vehicle_keeps_its_id() {
        let id = VehicleId::new("T9".to_string()).unwrap();
        let departure = ScheduleTime::parse("08:00").unwrap();
        let v = Vehicle::new(
            id.clone(),
            "Aruzhan".to_string(),
            "Depot - Airport".to_string(),
            departure,
            None,
            None,
        );
        assert_eq!(v.id(), &id);
        assert_eq!(v.departure, departure);
        assert!(v.arrival.is_none());
        assert!(v.note.is_none());
    }
}
