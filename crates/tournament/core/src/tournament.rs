//! Tournament records stored as one ordered array under
//! [`keys::TOURNAMENTS`](crate::keys::TOURNAMENTS).
//!
//! Tournaments are created and updated by the tournament-creation flow; this
//! layer reads and filters them. All fields are optional because nothing
//! upstream validates them.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::hydrate::Fields;

/// Tournament identifier.
///
/// Stored ids are usually numbers (creation timestamps) but strings occur
/// too. Both shapes are preserved so that `registrations_<id>` keys line up.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TournamentId {
    Number(i64),
    Text(String),
}

impl TournamentId {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().map(Self::Number),
            Value::String(text) => Some(Self::Text(text.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentId::Number(number) => write!(f, "{}", number),
            TournamentId::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for TournamentId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for TournamentId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Lifecycle status. Expected to move upcoming → active → completed, which
/// is never verified here.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TournamentStatus {
    Upcoming,
    Active,
    Completed,
}

/// A hydrated tournament.
///
/// Values of unexpected type (and status strings other than the three known
/// ones) stay verbatim in `extra`, so rewriting a collection never loses data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    /// Serialized ahead of the typed fields, so a typed value wins when a
    /// mistyped original is still held here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TournamentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TournamentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_maps_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_name: Option<String>,
    /// Organizer identifier (the organizer's email). Absent on legacy
    /// records, which are matched by `organizer_name` instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_email: Option<String>,
}

impl Tournament {
    /// Numeric-id tournament, the shape the creation flow writes.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(TournamentId::Number(id)),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: TournamentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_players(mut self, players: u64) -> Self {
        self.players = Some(players);
        self
    }

    pub fn with_organizer(mut self, name: impl Into<String>, email: Option<String>) -> Self {
        self.organizer_name = Some(name.into());
        self.organizer_email = email;
        self
    }

    /// Hydrate one collection element. Returns `None` for non-objects.
    pub fn hydrate(value: Value) -> Option<Self> {
        let mut fields = Fields::from_value(value)?;

        let id = fields.take_with("id", TournamentId::from_json);
        let name = fields.take_string("name");
        let format = fields.take_string("format");
        let players = fields.take_with("players", Value::as_u64);
        let status = fields.take_with("status", |value| value.as_str()?.parse().ok());
        let start_date = fields.take_string("startDate");
        let location = fields.take_string("location");
        let google_maps_link = fields.take_string("googleMapsLink");
        let organizer_name = fields.take_string("organizerName");
        let organizer_email = fields.take_string("organizerEmail");

        Some(Self {
            extra: fields.into_remainder(),
            id,
            name,
            format,
            players,
            status,
            start_date,
            location,
            google_maps_link,
            organizer_name,
            organizer_email,
        })
    }

    /// Hydrate a stored collection. Anything but an array is empty;
    /// non-object elements are skipped.
    pub fn hydrate_all(value: Value) -> Vec<Self> {
        match value {
            Value::Array(items) => items.into_iter().filter_map(Self::hydrate).collect(),
            _ => Vec::new(),
        }
    }

    /// Player count, 0 when missing.
    pub fn player_count(&self) -> u64 {
        self.players.unwrap_or(0)
    }

    pub fn has_status(&self, status: TournamentStatus) -> bool {
        self.status == Some(status)
    }
}

impl<'de> Deserialize<'de> for Tournament {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::hydrate(value).ok_or_else(|| serde::de::Error::custom("tournament must be an object"))
    }
}

/// Tournaments with the given status, in stored order.
pub fn by_status(
    tournaments: &[Tournament],
    status: TournamentStatus,
) -> impl Iterator<Item = &Tournament> {
    tournaments.iter().filter(move |t| t.has_status(status))
}

/// Tournaments whose organizer name equals `name` exactly.
pub fn by_organizer_name<'a>(
    tournaments: &'a [Tournament],
    name: &'a str,
) -> impl Iterator<Item = &'a Tournament> {
    tournaments
        .iter()
        .filter(move |t| t.organizer_name.as_deref() == Some(name))
}

/// First tournament carrying `id`.
pub fn find<'a>(tournaments: &'a [Tournament], id: &TournamentId) -> Option<&'a Tournament> {
    tournaments.iter().find(|t| t.id.as_ref() == Some(id))
}

/// First id that appears more than once, if any.
pub fn duplicate_id(tournaments: &[Tournament]) -> Option<&TournamentId> {
    let mut seen = std::collections::HashSet::new();
    tournaments
        .iter()
        .filter_map(|t| t.id.as_ref())
        .find(|id| !seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hydrate_keeps_unknown_status_verbatim() {
        let tournament = Tournament::hydrate(json!({
            "id": 1,
            "name": "Club Open",
            "status": "Draft",
            "players": "ten",
            "tournamentName": "Club Open"
        }))
        .unwrap();

        assert_eq!(tournament.id, Some(TournamentId::Number(1)));
        assert_eq!(tournament.status, None);
        assert_eq!(tournament.player_count(), 0);
        assert_eq!(tournament.extra["status"], json!("Draft"));
        assert_eq!(tournament.extra["players"], json!("ten"));

        let stored = serde_json::to_value(&tournament).unwrap();
        assert_eq!(stored["status"], json!("Draft"));
        assert_eq!(stored["tournamentName"], json!("Club Open"));
        assert!(stored.get("format").is_none());
    }

    #[test]
    fn test_status_is_case_sensitive() {
        let tournament = Tournament::hydrate(json!({"status": "Active"})).unwrap();
        assert_eq!(tournament.status, None);

        let tournament = Tournament::hydrate(json!({"status": "active"})).unwrap();
        assert_eq!(tournament.status, Some(TournamentStatus::Active));
    }

    #[test]
    fn test_hydrate_all_skips_non_objects() {
        let tournaments = Tournament::hydrate_all(json!([{"id": 1}, 7, null, {"id": "x"}]));
        assert_eq!(tournaments.len(), 2);
        assert_eq!(tournaments[1].id, Some(TournamentId::Text("x".into())));

        assert!(Tournament::hydrate_all(json!({"id": 1})).is_empty());
    }

    #[test]
    fn test_missing_id_is_listed_without_id() {
        let tournaments = Tournament::hydrate_all(json!([{"name": "No id", "id": [1]}]));
        assert_eq!(tournaments.len(), 1);
        assert_eq!(tournaments[0].id, None);
    }

    #[test]
    fn test_queries() {
        let tournaments = vec![
            Tournament::new(1, "A")
                .with_status(TournamentStatus::Active)
                .with_organizer("Anna Admin", None),
            Tournament::new(2, "B").with_status(TournamentStatus::Upcoming),
            Tournament::new(3, "C")
                .with_status(TournamentStatus::Active)
                .with_organizer("anna admin", None),
        ];

        let active: Vec<_> = by_status(&tournaments, TournamentStatus::Active)
            .map(|t| t.name.as_deref().unwrap())
            .collect();
        assert_eq!(active, ["A", "C"]);

        let organized: Vec<_> = by_organizer_name(&tournaments, "Anna Admin").collect();
        assert_eq!(organized.len(), 1);
        assert_eq!(organized[0].id, Some(TournamentId::Number(1)));

        assert!(find(&tournaments, &TournamentId::Number(2)).is_some());
        assert!(find(&tournaments, &TournamentId::Text("2".into())).is_none());
    }

    #[test]
    fn test_duplicate_id() {
        let unique = vec![Tournament::new(1, "A"), Tournament::new(2, "B")];
        assert_eq!(duplicate_id(&unique), None);

        let repeated = vec![Tournament::new(1, "A"), Tournament::new(1, "B")];
        assert_eq!(duplicate_id(&repeated), Some(&TournamentId::Number(1)));
    }
}
