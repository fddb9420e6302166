//! Persisted key namespace.
//!
//! Names must match the front-end exactly: other pages read and write the
//! same slots.

use crate::tournament::TournamentId;

/// Primary profile record (JSON object).
pub const USER_DATA: &str = "userData";

/// Opaque session token stored as raw text. Presence alone gates
/// authenticated UI.
pub const AUTH_TOKEN: &str = "authToken";

/// Legacy duplicate of `userData.role`, stored as raw text.
pub const ROLE: &str = "role";

/// Ordered tournament collection (JSON array).
pub const TOURNAMENTS: &str = "tournaments";

/// Prefix of the per-tournament registration lists.
pub const REGISTRATIONS_PREFIX: &str = "registrations_";

/// Key holding the registrations of tournament `id`.
pub fn registrations_key(id: &TournamentId) -> String {
    format!("{REGISTRATIONS_PREFIX}{id}")
}

/// Tournament id suffix of a registrations key, as stored text.
pub fn registrations_suffix(key: &str) -> Option<&str> {
    key.strip_prefix(REGISTRATIONS_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registrations_key_matches_string_interpolation() {
        assert_eq!(registrations_key(&TournamentId::Number(7)), "registrations_7");
        assert_eq!(
            registrations_key(&TournamentId::Text("abc".into())),
            "registrations_abc"
        );
    }

    #[test]
    fn test_registrations_suffix() {
        assert_eq!(registrations_suffix("registrations_42"), Some("42"));
        assert_eq!(registrations_suffix("tournaments"), None);
    }
}
