//! The singleton user profile stored under [`keys::USER_DATA`](crate::keys::USER_DATA).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::hydrate::Fields;

/// Account role.
///
/// Also persisted on its own under the legacy `role` key; writers keep the
/// two copies in sync.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum Role {
    /// Joins tournaments
    #[default]
    Player,
    /// Creates and manages tournaments
    Arbiter,
}

/// Fully hydrated user profile.
///
/// Every field always has a value; absent or mistyped stored fields fall back
/// to [`User::default`]. Fields this layer does not model are kept in
/// `extra` and written back untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub bio: String,
    pub fide_id: String,
    pub aicf_id: String,
    pub date_of_birth: String,
    pub chess_title: String,
    /// Image data reference (usually a data URI)
    pub avatar: Option<String>,
    pub role: Role,
}

impl Default for User {
    fn default() -> Self {
        Self {
            extra: Map::new(),
            first_name: "Demo".to_string(),
            last_name: "User".to_string(),
            email: "user@example.com".to_string(),
            phone: String::new(),
            city: String::new(),
            state: String::new(),
            country: "India".to_string(),
            bio: String::new(),
            fide_id: String::new(),
            aicf_id: String::new(),
            date_of_birth: String::new(),
            chess_title: String::new(),
            avatar: None,
            role: Role::default(),
        }
    }
}

impl User {
    /// Overlay the stored fields of `value` onto the defaulted shape.
    ///
    /// Non-object values hydrate to the defaults.
    pub fn hydrate(value: Value) -> Self {
        let mut fields = Fields::from_value(value).unwrap_or_else(Fields::empty);
        let defaults = Self::default();

        let first_name = text(&mut fields, "firstName", defaults.first_name);
        let last_name = text(&mut fields, "lastName", defaults.last_name);
        let email = text(&mut fields, "email", defaults.email);
        let phone = text(&mut fields, "phone", defaults.phone);
        let city = text(&mut fields, "city", defaults.city);
        let state = text(&mut fields, "state", defaults.state);
        let country = text(&mut fields, "country", defaults.country);
        let bio = text(&mut fields, "bio", defaults.bio);
        let fide_id = text(&mut fields, "fideId", defaults.fide_id);
        let aicf_id = text(&mut fields, "aicfId", defaults.aicf_id);
        let date_of_birth = text(&mut fields, "dateOfBirth", defaults.date_of_birth);
        let chess_title = text(&mut fields, "chessTitle", defaults.chess_title);

        let avatar = fields
            .take_with("avatar", |value| match value {
                Value::String(data) => Some(Some(data.clone())),
                Value::Null => Some(None),
                _ => None,
            })
            .unwrap_or(defaults.avatar);
        fields.discard("avatar");

        let role = fields
            .take_with("role", |value| value.as_str()?.parse().ok())
            .unwrap_or(defaults.role);
        fields.discard("role");

        Self {
            extra: fields.into_remainder(),
            first_name,
            last_name,
            email,
            phone,
            city,
            state,
            country,
            bio,
            fide_id,
            aicf_id,
            date_of_birth,
            chess_title,
            avatar,
            role,
        }
    }

    /// Shallow-merge `patch`: fields set in the patch override, all others
    /// stay as they are.
    pub fn apply(&mut self, patch: UserPatch) {
        let UserPatch {
            first_name,
            last_name,
            email,
            phone,
            city,
            state,
            country,
            bio,
            fide_id,
            aicf_id,
            date_of_birth,
            chess_title,
            avatar,
            role,
        } = patch;

        overwrite(&mut self.first_name, first_name);
        overwrite(&mut self.last_name, last_name);
        overwrite(&mut self.email, email);
        overwrite(&mut self.phone, phone);
        overwrite(&mut self.city, city);
        overwrite(&mut self.state, state);
        overwrite(&mut self.country, country);
        overwrite(&mut self.bio, bio);
        overwrite(&mut self.fide_id, fide_id);
        overwrite(&mut self.aicf_id, aicf_id);
        overwrite(&mut self.date_of_birth, date_of_birth);
        overwrite(&mut self.chess_title, chess_title);
        overwrite(&mut self.avatar, avatar);
        overwrite(&mut self.role, role);
    }

    /// `"first last"`, the string legacy tournaments record as organizer.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Avatar fallback letters; `"U"` when there is no first name.
    pub fn initials(&self) -> String {
        let Some(first) = self.first_name.chars().next() else {
            return "U".to_string();
        };

        let mut initials: String = first.to_uppercase().collect();
        if let Some(last) = self.last_name.chars().next() {
            initials.extend(last.to_uppercase());
        }
        initials
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::hydrate)
    }
}

/// Partial profile update from the profile editor.
///
/// `None` leaves the stored field untouched. `avatar: Some(None)` clears the
/// avatar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub bio: Option<String>,
    pub fide_id: Option<String>,
    pub aicf_id: Option<String>,
    pub date_of_birth: Option<String>,
    pub chess_title: Option<String>,
    pub avatar: Option<Option<String>>,
    pub role: Option<Role>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn text(fields: &mut Fields, key: &str, default: String) -> String {
    let value = fields.take_string(key);
    fields.discard(key);
    value.unwrap_or(default)
}

fn overwrite<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
