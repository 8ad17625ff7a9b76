//! Vehicle domain model.
//!
//! This module defines the remote [`Vehicle`] entity mirrored by the dashboard,
//! its [`VehicleStatus`], the view-side [`StatusFilter`], and the local
//! creation [`Draft`]. Vehicles are never edited locally: every field here is
//! whatever the service last returned.

use chrono::{DateTime, TimeZone};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Display format for `lastUpdated`, matching an en-US locale string.
const LAST_UPDATED_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Lifecycle status of a vehicle, as spelled on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VehicleStatus {
    Active,
    #[default]
    Inactive,
    Maintenance,
}

impl VehicleStatus {
    /// All statuses in selector order.
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::Maintenance];

    /// Wire and display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Maintenance => "Maintenance",
        }
    }

    /// Next status in the draft form's selector order (Inactive, Active, Maintenance).
    #[must_use]
    pub const fn next_in_form(self) -> Self {
        match self {
            Self::Inactive => Self::Active,
            Self::Active => Self::Maintenance,
            Self::Maintenance => Self::Inactive,
        }
    }

    /// Previous status in the draft form's selector order.
    #[must_use]
    pub const fn prev_in_form(self) -> Self {
        match self {
            Self::Inactive => Self::Maintenance,
            Self::Active => Self::Inactive,
            Self::Maintenance => Self::Active,
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque identifier assigned by the service.
///
/// Services in the wild emit either a string (`"65f0c1..."`) or a number
/// (`1`); both are held as their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VehicleId(String);

impl VehicleId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for VehicleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

impl Serialize for VehicleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A vehicle as returned by the service.
///
/// Only JSON objects decode. The identifier is read from `_id` or `id`; when
/// both are present `_id` wins. Other keys such as `__v` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    pub status: VehicleStatus,
    #[serde(rename = "lastUpdated", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Wire form of [`Vehicle`] before the identifier is resolved.
#[derive(Deserialize)]
struct RawVehicle {
    #[serde(rename = "_id")]
    object_id: Option<VehicleId>,
    id: Option<VehicleId>,
    name: String,
    status: VehicleStatus,
    #[serde(rename = "lastUpdated", default)]
    last_updated: Option<String>,
}

impl<'de> Deserialize<'de> for Vehicle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = serde_json::Map::deserialize(deserializer)?;
        let raw: RawVehicle =
            serde_json::from_value(serde_json::Value::Object(fields)).map_err(D::Error::custom)?;
        let id = raw
            .object_id
            .or(raw.id)
            .ok_or_else(|| D::Error::missing_field("_id"))?;
        Ok(Self {
            id,
            name: raw.name,
            status: raw.status,
            last_updated: raw.last_updated,
        })
    }
}

impl Vehicle {
    /// Formats `lastUpdated` in the given time zone.
    ///
    /// Returns an empty string when the service sent no timestamp and the raw
    /// text when it is not RFC 3339.
    ///
    /// ```
    /// use vehicle_dashboard::domain::{Vehicle, VehicleId, VehicleStatus};
    ///
    /// let van = Vehicle {
    ///     id: VehicleId::new("1"),
    ///     name: "Van".to_string(),
    ///     status: VehicleStatus::Inactive,
    ///     last_updated: Some("2024-03-05T14:07:09Z".to_string()),
    /// };
    /// assert_eq!(van.last_updated_in(&chrono::Utc), "3/5/2024, 2:07:09 PM");
    /// ```
    #[must_use]
    pub fn last_updated_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let Some(raw) = self.last_updated.as_deref() else {
            return String::new();
        };
        DateTime::parse_from_rfc3339(raw).map_or_else(
            |_| raw.to_string(),
            |ts| ts.with_timezone(tz).format(LAST_UPDATED_FORMAT).to_string(),
        )
    }

    /// Formats `lastUpdated` in the local time zone.
    #[must_use]
    pub fn last_updated_display(&self) -> String {
        self.last_updated_in(&chrono::Local)
    }
}

/// View-side predicate over vehicle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(VehicleStatus),
}

impl StatusFilter {
    /// Selector order: All, Active, Inactive, Maintenance.
    pub const CYCLE: [Self; 4] = [
        Self::All,
        Self::Only(VehicleStatus::Active),
        Self::Only(VehicleStatus::Inactive),
        Self::Only(VehicleStatus::Maintenance),
    ];

    #[must_use]
    pub fn matches(self, vehicle: &Vehicle) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => vehicle.status == status,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(status) => status.as_str(),
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::CYCLE.iter().position(|f| *f == self).unwrap_or(0);
        Self::CYCLE[(idx + 1) % Self::CYCLE.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::CYCLE.iter().position(|f| *f == self).unwrap_or(0);
        Self::CYCLE[(idx + Self::CYCLE.len() - 1) % Self::CYCLE.len()]
    }
}

/// Unsaved "new vehicle" form state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub name: String,
    pub status: VehicleStatus,
}

/// Partial update merged into a [`Draft`]; `None` fields are left as they are.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftPatch {
    pub name: Option<String>,
    pub status: Option<VehicleStatus>,
}

impl DraftPatch {
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), status: None }
    }

    #[must_use]
    pub const fn status(status: VehicleStatus) -> Self {
        Self { name: None, status: Some(status) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_defaults_to_empty_inactive() {
        let draft = Draft::default();
        assert_eq!(draft.name, "");
        assert_eq!(draft.status, VehicleStatus::Inactive);
    }

    #[test]
    fn vehicle_accepts_mongo_style_and_numeric_ids() {
        let mongo: Vehicle = serde_json::from_str(
            r#"{"_id":"65f0c1aa","name":"Truck","status":"Maintenance","lastUpdated":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(mongo.id.as_str(), "65f0c1aa");
        assert_eq!(mongo.status, VehicleStatus::Maintenance);

        let numeric: Vehicle =
            serde_json::from_str(r#"{"id":1,"name":"Van","status":"Inactive"}"#).unwrap();
        assert_eq!(numeric.id.as_str(), "1");
        assert_eq!(numeric.last_updated, None);
    }

    #[test]
    fn vehicle_with_both_id_keys_prefers_mongo_id() {
        let both: Vehicle = serde_json::from_str(
            r#"{"_id":"65f0c1aa","id":"virtual-1","name":"Van","status":"Inactive","lastUpdated":"2024-01-01T00:00:00Z","__v":0}"#,
        )
        .unwrap();
        assert_eq!(both.id.as_str(), "65f0c1aa");
        assert_eq!(both.name, "Van");
        assert_eq!(both.last_updated.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn vehicle_without_any_id_is_rejected() {
        let parsed = serde_json::from_str::<Vehicle>(r#"{"name":"Van","status":"Inactive"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn positional_vehicle_is_rejected() {
        let parsed = serde_json::from_str::<Vehicle>(r#"["1","Van","Active"]"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let parsed = serde_json::from_str::<Vehicle>(r#"{"id":"x","name":"Bus","status":"Retired"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn unparseable_timestamp_is_shown_verbatim() {
        let vehicle = Vehicle {
            id: VehicleId::new("9"),
            name: "Cart".into(),
            status: VehicleStatus::Active,
            last_updated: Some("yesterday".into()),
        };
        assert_eq!(vehicle.last_updated_in(&chrono::Utc), "yesterday");
    }

    #[test]
    fn offset_timestamps_convert_to_target_zone() {
        let vehicle = Vehicle {
            id: VehicleId::new("9"),
            name: "Cart".into(),
            status: VehicleStatus::Active,
            last_updated: Some("2024-12-31T23:30:00-02:00".into()),
        };
        assert_eq!(vehicle.last_updated_in(&chrono::Utc), "1/1/2025, 1:30:00 AM");
    }

    #[test]
    fn filter_cycles_through_all_four_values() {
        let mut filter = StatusFilter::All;
        let mut seen = vec![];
        for _ in 0..4 {
            seen.push(filter.label());
            filter = filter.next();
        }
        assert_eq!(seen, ["All", "Active", "Inactive", "Maintenance"]);
        assert_eq!(filter, StatusFilter::All);
        assert_eq!(StatusFilter::All.prev(), StatusFilter::Only(VehicleStatus::Maintenance));
    }

    #[test]
    fn form_status_cycle_starts_from_inactive() {
        assert_eq!(VehicleStatus::Inactive.next_in_form(), VehicleStatus::Active);
        assert_eq!(VehicleStatus::Active.next_in_form(), VehicleStatus::Maintenance);
        assert_eq!(VehicleStatus::Maintenance.next_in_form(), VehicleStatus::Inactive);
        assert_eq!(VehicleStatus::Inactive.prev_in_form(), VehicleStatus::Maintenance);
    }
}
