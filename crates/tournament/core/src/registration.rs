//! One player's signup for one tournament, stored in the array under
//! `registrations_<tournamentId>`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::hydrate::Fields;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Registration form fields this layer does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Registration {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            extra: Map::new(),
            email: Some(email.into()),
        }
    }

    pub fn hydrate(value: Value) -> Option<Self> {
        let mut fields = Fields::from_value(value)?;
        let email = fields.take_string("email");
        Some(Self {
            extra: fields.into_remainder(),
            email,
        })
    }

    /// Hydrate a stored list; anything but an array is empty.
    pub fn hydrate_all(value: Value) -> Vec<Self> {
        match value {
            Value::Array(items) => items.into_iter().filter_map(Self::hydrate).collect(),
            _ => Vec::new(),
        }
    }

    /// Case-sensitive exact email match.
    pub fn is_for(&self, email: &str) -> bool {
        self.email.as_deref() == Some(email)
    }
}

impl<'de> Deserialize<'de> for Registration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::hydrate(value)
            .ok_or_else(|| serde::de::Error::custom("registration must be an object"))
    }
}
