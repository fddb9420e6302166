//! Featured tournaments: the first N in stored order.
//!
//! Insertion order stands in for ranking; there is no sort.

use serde::Serialize;

use crate::tournament::{Tournament, TournamentId, TournamentStatus};

pub const DEFAULT_FEATURED_LIMIT: usize = 3;

/// Display projection of a featured tournament.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedCard {
    pub id: Option<TournamentId>,
    pub title: Option<String>,
    pub description: String,
    pub players: u64,
    pub status: Option<TournamentStatus>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub google_maps_link: Option<String>,
}

impl From<&Tournament> for FeaturedCard {
    fn from(tournament: &Tournament) -> Self {
        let description = match &tournament.format {
            Some(format) => format!("{} tournament", format),
            None => "Tournament".to_string(),
        };

        Self {
            id: tournament.id.clone(),
            title: tournament.name.clone(),
            description,
            players: tournament.player_count(),
            status: tournament.status,
            date: tournament.start_date.clone(),
            location: tournament.location.clone(),
            google_maps_link: tournament.google_maps_link.clone(),
        }
    }
}

pub fn featured(tournaments: &[Tournament], limit: usize) -> Vec<FeaturedCard> {
    tournaments
        .iter()
        .take(limit)
        .map(FeaturedCard::from)
        .collect()
}
