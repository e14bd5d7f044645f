/// Final standings: totals, then tie-break, then name.
use std::collections::BTreeMap;

use crate::tiebreak::{TieBreakKey, TieBreakReason};
use crate::types::{EventRecord, Points};

/// One line of the final standings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Standing {
    /// Shared only by competitors level on points whose tie-break is unresolved.
    pub place: u32,
    pub competitor: String,
    pub total: Points,
    /// How this competitor was ordered against the one directly above, when
    /// both finished on the same total. `None` if the totals differ.
    pub tie_break: Option<TieBreakReason>,
}

/// Order competitors for the final standings.
///
/// Higher total first. Equal totals are ordered by the tie-break criteria of
/// [`break_tie`](crate::break_tie) over the full history, with the field size
/// as the rank limit. A competitor without a result in the last event goes
/// below a level competitor who has one. Ties nothing can resolve share a
/// place and are listed alphabetically, so the order never depends on input
/// order.
pub fn final_standings(
    competitors: &[String],
    totals: &BTreeMap<String, Points>,
    history: &[EventRecord],
) -> Vec<Standing> {
    let field = competitors.len();

    let mut keyed: Vec<(&String, Points, TieBreakKey)> = competitors
        .iter()
        .map(|name| {
            let total = totals.get(name).copied().unwrap_or_default();
            (name, total, TieBreakKey::new(name, history, field))
        })
        .collect();
    keyed.sort_by(|(name_a, total_a, key_a), (name_b, total_b, key_b)| {
        total_b
            .cmp(total_a)
            .then_with(|| key_a.listing_cmp(key_b))
            .then_with(|| name_a.cmp(name_b))
    });

    let mut standings: Vec<Standing> = Vec::with_capacity(keyed.len());
    let mut above: Option<&TieBreakKey> = None;
    for (i, (name, total, key)) in keyed.iter().enumerate() {
        let mut place = i as u32 + 1;
        let mut tie_break = None;

        if let (Some(prev), Some(prev_key)) = (standings.last(), above) {
            if prev.total == *total {
                let reason = prev_key.separating_reason(key);
                if reason == TieBreakReason::Unresolved {
                    place = prev.place;
                }
                tie_break = Some(reason);
            }
        }

        standings.push(Standing {
            place,
            competitor: name.to_string(),
            total: *total,
            tie_break,
        });
        above = Some(key);
    }

    standings
}
