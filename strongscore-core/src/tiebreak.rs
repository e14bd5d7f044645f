/// Tie-break between two competitors level on total points.
///
/// Only used for final standings; per-event ties are settled by sharing points.
use std::cmp::Ordering;
use std::fmt;

use ordinal::ToOrdinal;

use crate::types::{EventRecord, Points, Rank};

/// Which criterion separated two competitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreakReason {
    /// One finished at `rank` more often; every better rank was level.
    MorePlacings { rank: u32 },
    /// Placings were identical; the most recent event decided.
    BetterLastEvent,
    /// Nothing separates them. A legitimate outcome, not an error.
    Unresolved,
}

impl fmt::Display for TieBreakReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreakReason::MorePlacings { rank } => {
                write!(f, "more {} places", rank.to_ordinal_string())
            }
            TieBreakReason::BetterLastEvent => f.write_str("better result in the last event"),
            TieBreakReason::Unresolved => f.write_str("unresolved tie"),
        }
    }
}

/// Result of comparing competitor A against competitor B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TieBreakOutcome {
    /// Negative when A ranks better, positive when B does, zero when unresolved.
    ///
    /// A placing-count difference (`count_b - count_a`), or a last-event points
    /// difference in hundredths (`points_b - points_a`). Only the sign is meant
    /// for ordering.
    pub outcome: i64,
    pub reason: TieBreakReason,
}

impl TieBreakOutcome {
    /// `Less` when A should be listed first.
    pub fn ordering(&self) -> Ordering {
        self.outcome.cmp(&0)
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome != 0
    }
}

/// Everything the tie-break looks at for one competitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TieBreakKey {
    /// Finishes at each place, indexed by place. Index 0 is unused.
    placings: Vec<u32>,
    /// Points in the most recent event, `None` without a result there.
    last_event: Option<Points>,
}

impl TieBreakKey {
    /// Unplaced results and places beyond the field are not counted.
    pub(crate) fn new(competitor: &str, history: &[EventRecord], total_competitors: usize) -> Self {
        let mut placings = vec![0u32; total_competitors + 1];
        for event in history {
            if let Some(Rank::Placed(place)) = event.result_for(competitor).map(|r| r.rank) {
                if let Some(slot) = placings.get_mut(place as usize) {
                    *slot += 1;
                }
            }
        }
        let last_event = history
            .last()
            .and_then(|e| e.result_for(competitor))
            .map(|r| r.points);

        TieBreakKey { placings, last_event }
    }

    /// First place at which the counts differ.
    fn first_differing_place(&self, other: &TieBreakKey) -> Option<usize> {
        (1..self.placings.len())
            .find(|&place| self.placings.get(place) != other.placings.get(place))
    }

    /// Total order for listing, better first.
    ///
    /// A competitor without a result in the last event is listed after one
    /// who has a result there, whatever its points.
    pub(crate) fn listing_cmp(&self, other: &TieBreakKey) -> Ordering {
        other
            .placings
            .cmp(&self.placings)
            .then_with(|| other.last_event.cmp(&self.last_event))
    }

    /// The criterion that `listing_cmp` decided on.
    pub(crate) fn separating_reason(&self, other: &TieBreakKey) -> TieBreakReason {
        if let Some(place) = self.first_differing_place(other) {
            TieBreakReason::MorePlacings { rank: place as u32 }
        } else if self.last_event != other.last_event {
            TieBreakReason::BetterLastEvent
        } else {
            TieBreakReason::Unresolved
        }
    }
}

/// Compare two competitors over the full event history.
///
/// In order: most 1st places, then most 2nd places, and so on down to
/// `total_competitors`; then more points in the most recent event, when both
/// have a result there; otherwise unresolved. Antisymmetric: swapping A and B
/// negates `outcome`.
pub fn break_tie(
    competitor_a: &str,
    competitor_b: &str,
    history: &[EventRecord],
    total_competitors: usize,
) -> TieBreakOutcome {
    let a = TieBreakKey::new(competitor_a, history, total_competitors);
    let b = TieBreakKey::new(competitor_b, history, total_competitors);

    if let Some(place) = a.first_differing_place(&b) {
        return TieBreakOutcome {
            outcome: b.placings[place] as i64 - a.placings[place] as i64,
            reason: TieBreakReason::MorePlacings { rank: place as u32 },
        };
    }

    if let (Some(points_a), Some(points_b)) = (a.last_event, b.last_event) {
        if points_a != points_b {
            return TieBreakOutcome {
                outcome: (points_b - points_a).hundredths(),
                reason: TieBreakReason::BetterLastEvent,
            };
        }
    }

    TieBreakOutcome { outcome: 0, reason: TieBreakReason::Unresolved }
}
