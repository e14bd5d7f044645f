/// Competition session as an immutable value.
///
/// Every operation borrows the current `Competition` and returns a new one.
/// On error nothing changes: the caller still holds the previous value, which
/// is also what an undo stack or replay log would store.
use std::collections::{BTreeMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::SessionError;
use crate::parse::normalize;
use crate::scoring::score_event;
use crate::standings::{final_standings, Standing};
use crate::types::{EventRecord, EventType, Points, RawEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Competition {
    competitors: Vec<String>,
    history: Vec<EventRecord>,
    totals: BTreeMap<String, Points>,
    version: u64,
}

impl Competition {
    /// Start a competition. Every competitor begins on 0.00.
    pub fn new<I, S>(competitors: I) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let competitors: Vec<String> = competitors
            .into_iter()
            .map(|name| name.into().trim().to_string())
            .collect();

        let mut seen = HashSet::with_capacity(competitors.len());
        for name in &competitors {
            if name.is_empty() {
                return Err(SessionError::EmptyName);
            }
            if !seen.insert(name.as_str()) {
                return Err(SessionError::DuplicateCompetitor(name.clone()));
            }
        }

        let totals = competitors.iter().map(|n| (n.clone(), Points::ZERO)).collect();

        Ok(Competition {
            competitors,
            history: Vec::new(),
            totals,
            version: 0,
        })
    }

    /// Competitors in the current start order.
    pub fn competitors(&self) -> &[String] {
        &self.competitors
    }

    pub fn history(&self) -> &[EventRecord] {
        &self.history
    }

    pub fn total(&self, competitor: &str) -> Option<Points> {
        self.totals.get(competitor).copied()
    }

    pub fn totals(&self) -> &BTreeMap<String, Points> {
        &self.totals
    }

    /// Bumped by every successful change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Sequence number the next recorded event will get.
    pub fn next_sequence(&self) -> u32 {
        self.history.last().map_or(1, |e| e.sequence + 1)
    }

    /// Score an event for the whole field and append it to the history.
    ///
    /// Competitors without an entry did not attempt the event. At least one
    /// entry must carry a result (an explicit `0` counts).
    pub fn record_event(
        &self,
        title: impl Into<String>,
        event_type: EventType,
        entries: &[RawEntry],
    ) -> Result<Competition, SessionError> {
        let raw_by_name = self.index_entries(entries)?;
        if raw_by_name.values().all(|raw| normalize(raw).is_empty()) {
            return Err(SessionError::NoResults);
        }

        let full_field = self.full_field(&raw_by_name);
        let results = score_event(&full_field, self.competitors.len(), event_type)?;

        let record = EventRecord {
            sequence: self.next_sequence(),
            title: title.into(),
            event_type,
            results,
        };
        debug!(sequence = record.sequence, title = %record.title, %event_type, "event scored");

        let mut next = self.clone();
        for result in &record.results {
            if let Some(total) = next.totals.get_mut(&result.competitor) {
                *total += result.points;
            }
        }
        next.history.push(record);
        next.version += 1;
        Ok(next)
    }

    /// Replace raw results of a past event and rescore the whole history.
    ///
    /// Competitors not mentioned in `entries` keep their previous raw result.
    /// Totals are recomputed from scratch.
    pub fn edit_event(
        &self,
        sequence: u32,
        entries: &[RawEntry],
    ) -> Result<Competition, SessionError> {
        let index = self
            .history
            .iter()
            .position(|e| e.sequence == sequence)
            .ok_or(SessionError::UnknownEvent(sequence))?;
        let replacements = self.index_entries(entries)?;

        let mut next = self.clone();
        for result in &mut next.history[index].results {
            if let Some(raw) = replacements.get(result.competitor.as_str()) {
                result.raw_result = raw.to_string();
            }
        }

        next.recalculate()?;
        next.version += 1;
        debug!(sequence, version = next.version, "event edited, history recalculated");
        Ok(next)
    }

    /// Final standings for the current history.
    pub fn standings(&self) -> Vec<Standing> {
        final_standings(&self.competitors, &self.totals, &self.history)
    }

    /// Start order for the next event: fewest points in the last event first.
    ///
    /// Stable on the current order; with no history the current order is kept.
    pub fn next_event_order(&self) -> Vec<String> {
        let mut order = self.competitors.clone();
        if let Some(last) = self.history.last() {
            let points_in_last =
                |name: &str| last.result_for(name).map(|r| r.points).unwrap_or_default();
            order.sort_by_key(|name| points_in_last(name));
        }
        order
    }

    /// Start order for the final event: the standings reversed, leader last.
    pub fn final_event_order(&self) -> Vec<String> {
        self.standings()
            .into_iter()
            .rev()
            .map(|s| s.competitor)
            .collect()
    }

    /// Copy with the competitor order randomly drawn.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Competition {
        let mut next = self.clone();
        next.competitors.shuffle(rng);
        next.version += 1;
        next
    }

    /// Copy with the start order replaced by a permutation of the same field.
    ///
    /// Names are trimmed the same way as in [`Competition::new`].
    pub fn with_order(&self, order: &[String]) -> Result<Competition, SessionError> {
        let known: HashSet<&str> = self.competitors.iter().map(String::as_str).collect();
        let mut seen = HashSet::with_capacity(order.len());
        for name in order {
            if !known.contains(name.trim()) {
                return Err(SessionError::UnknownCompetitor(name.clone()));
            }
            if !seen.insert(name.trim()) {
                return Err(SessionError::DuplicateCompetitor(name.clone()));
            }
        }
        if let Some(missing) = self.competitors.iter().find(|n| !seen.contains(n.as_str())) {
            return Err(SessionError::UnknownCompetitor(missing.clone()));
        }

        let mut next = self.clone();
        next.competitors = order.iter().map(|name| name.trim().to_string()).collect();
        next.version += 1;
        Ok(next)
    }

    /// Rescore every event from its raw results and rebuild the totals.
    fn recalculate(&mut self) -> Result<(), SessionError> {
        let field = self.competitors.len();
        for event in &mut self.history {
            let sequence = event.sequence;
            let entries = event.raw_entries();
            event.results = score_event(&entries, field, event.event_type)
                .map_err(|source| SessionError::Rescore { sequence, source })?;
        }

        for total in self.totals.values_mut() {
            *total = Points::ZERO;
        }
        for result in self.history.iter().flat_map(|e| &e.results) {
            if let Some(total) = self.totals.get_mut(&result.competitor) {
                *total += result.points;
            }
        }
        Ok(())
    }

    /// Map entries by trimmed competitor name, rejecting unknown names and
    /// duplicates.
    fn index_entries<'a>(
        &self,
        entries: &'a [RawEntry],
    ) -> Result<BTreeMap<&'a str, &'a str>, SessionError> {
        let mut by_name = BTreeMap::new();
        for entry in entries {
            let name = entry.competitor.trim();
            if !self.totals.contains_key(name) {
                return Err(SessionError::UnknownCompetitor(entry.competitor.clone()));
            }
            if by_name.insert(name, entry.raw_result.as_str()).is_some() {
                return Err(SessionError::DuplicateCompetitor(entry.competitor.clone()));
            }
        }
        Ok(by_name)
    }

    /// One entry per competitor in start order; missing entries are empty.
    fn full_field(&self, raw_by_name: &BTreeMap<&str, &str>) -> Vec<RawEntry> {
        self.competitors
            .iter()
            .map(|name| {
                let raw = raw_by_name.get(name.as_str()).copied().unwrap_or_default();
                RawEntry::new(name.clone(), raw)
            })
            .collect()
    }
}
