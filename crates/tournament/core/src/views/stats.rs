//! Status counters, player totals and period-over-period deltas.

use std::fmt;

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::tournament::{Tournament, TournamentStatus};

/// Counted quantities shown on the home page.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum::Display, strum::EnumIter,
)]
pub enum Metric {
    #[strum(to_string = "Total Tournaments")]
    Total,
    #[strum(to_string = "Active Tournaments")]
    Active,
    #[strum(to_string = "Upcoming Tournaments")]
    Upcoming,
    #[strum(to_string = "Completed Tournaments")]
    Completed,
    #[strum(to_string = "Total Players")]
    Players,
}

/// Counts over one tournament snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounters {
    pub total: u64,
    pub active: u64,
    pub upcoming: u64,
    pub completed: u64,
    /// Sum of every tournament's player count, saturating at `u64::MAX`.
    /// A person entered in two tournaments is counted twice; there is no
    /// player identity to deduplicate on.
    pub total_players: u64,
}

impl StatusCounters {
    pub fn from_tournaments(tournaments: &[Tournament]) -> Self {
        tournaments
            .iter()
            .fold(Self::default(), |mut counters, tournament| {
                counters.total = counters.total.saturating_add(1);
                counters.total_players = counters
                    .total_players
                    .saturating_add(tournament.player_count());
                let slot = match tournament.status {
                    Some(TournamentStatus::Active) => &mut counters.active,
                    Some(TournamentStatus::Upcoming) => &mut counters.upcoming,
                    Some(TournamentStatus::Completed) => &mut counters.completed,
                    None => return counters,
                };
                *slot = slot.saturating_add(1);
                counters
            })
    }

    pub fn get(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Total => self.total,
            Metric::Active => self.active,
            Metric::Upcoming => self.upcoming,
            Metric::Completed => self.completed,
            Metric::Players => self.total_players,
        }
    }

    /// Deltas for every metric the baseline covers, in [`Metric`] order.
    pub fn deltas<B: BaselineSource + ?Sized>(&self, baseline: &B) -> Vec<PeriodDelta> {
        Metric::iter()
            .filter_map(|metric| {
                baseline.baseline(metric).map(|previous| PeriodDelta {
                    metric,
                    current: self.get(metric),
                    baseline: previous,
                })
            })
            .collect()
    }
}

/// Source of "last period" values.
///
/// There is no historical snapshot store; implementations decide what the
/// comparison point is. Returning `None` omits the metric's delta.
pub trait BaselineSource {
    fn baseline(&self, metric: Metric) -> Option<u64>;
}

/// Constant baselines.
///
/// The defaults are the values the home page has always compared against;
/// they are not real history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedBaseline {
    pub total: u64,
    pub active: u64,
    pub upcoming: u64,
}

impl Default for FixedBaseline {
    fn default() -> Self {
        Self {
            total: 10,
            active: 2,
            upcoming: 2,
        }
    }
}

impl BaselineSource for FixedBaseline {
    fn baseline(&self, metric: Metric) -> Option<u64> {
        match metric {
            Metric::Total => Some(self.total),
            Metric::Active => Some(self.active),
            Metric::Upcoming => Some(self.upcoming),
            Metric::Completed | Metric::Players => None,
        }
    }
}

/// Current value against its baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PeriodDelta {
    pub metric: Metric,
    pub current: u64,
    pub baseline: u64,
}

impl PeriodDelta {
    /// `current - baseline`, clamped to the `i64` range.
    pub fn change(&self) -> i64 {
        let change = i128::from(self.current) - i128::from(self.baseline);
        i64::try_from(change).unwrap_or(if change > 0 { i64::MAX } else { i64::MIN })
    }
}

/// Only the upcoming card words an unchanged value; the others print `0`.
impl fmt::Display for PeriodDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.change() {
            0 if self.metric == Metric::Upcoming => f.write_str("Same as last month"),
            change if change > 0 => write!(f, "+{} from last month", change),
            change => write!(f, "{} from last month", change),
        }
    }
}
