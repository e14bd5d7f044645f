use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use crate::constants::POINTS_SCALE;
use crate::error::ScoringError;

/// Which direction of raw result counts as the better performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventType {
    /// Scores, repetitions, weights, distances covered.
    HighIsBetter,
    /// Times, or distance short of a target.
    LowIsBetter,
}

impl FromStr for EventType {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "higher" | "high-is-better" | "highisbetter" => Ok(EventType::HighIsBetter),
            "low" | "lower" | "low-is-better" | "lowisbetter" => Ok(EventType::LowIsBetter),
            _ => Err(ScoringError::InvalidEventType(s.to_string())),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::HighIsBetter => f.write_str("high"),
            EventType::LowIsBetter => f.write_str("low"),
        }
    }
}

/// Event points as a fixed-point value in hundredths.
///
/// Points are only ever shown with two decimals, so storing hundredths keeps
/// totals exact: two competitors with the same displayed total compare equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Points(i64);

impl Points {
    pub const ZERO: Points = Points(0);

    pub fn from_hundredths(hundredths: i64) -> Self {
        Points(hundredths)
    }

    /// A whole number of points, e.g. `Points::whole(3)` is 3.00.
    pub fn whole(points: i64) -> Self {
        Points(points * POINTS_SCALE)
    }

    /// `sum / count` rounded half away from zero to two decimals.
    ///
    /// A zero `count` yields zero points.
    pub fn average(sum: i64, count: usize) -> Self {
        if count == 0 {
            return Points::ZERO;
        }
        let numerator = sum * POINTS_SCALE * 2;
        let denominator = count as i64 * 2;
        let half = count as i64;
        if numerator >= 0 {
            Points((numerator + half) / denominator)
        } else {
            Points(-((-numerator + half) / denominator))
        }
    }

    pub fn hundredths(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / POINTS_SCALE as f64
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = POINTS_SCALE as u64;
        let text = format!("{sign}{}.{:02}", abs / scale, abs % scale);
        f.pad(&text)
    }
}

impl Add for Points {
    type Output = Points;

    fn add(self, rhs: Points) -> Points {
        Points(self.0 + rhs.0)
    }
}

impl AddAssign for Points {
    fn add_assign(&mut self, rhs: Points) {
        self.0 += rhs.0;
    }
}

impl Sub for Points {
    type Output = Points;

    fn sub(self, rhs: Points) -> Points {
        Points(self.0 - rhs.0)
    }
}

impl Sum for Points {
    fn sum<I: Iterator<Item = Points>>(iter: I) -> Points {
        iter.fold(Points::ZERO, Add::add)
    }
}

/// Standing within a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    /// 1-based place, shared by tied competitors.
    Placed(u32),
    /// No valid result (absent or zero). Rendered as `-`.
    Unplaced,
}

impl Rank {
    pub fn place(self) -> Option<u32> {
        match self {
            Rank::Placed(place) => Some(place),
            Rank::Unplaced => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Placed(place) => f.pad(&place.to_string()),
            Rank::Unplaced => f.pad("-"),
        }
    }
}

/// One competitor's raw, unparsed input for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawEntry {
    pub competitor: String,
    /// May be empty: the competitor did not attempt the event.
    pub raw_result: String,
}

impl RawEntry {
    pub fn new(competitor: impl Into<String>, raw_result: impl Into<String>) -> Self {
        RawEntry {
            competitor: competitor.into(),
            raw_result: raw_result.into(),
        }
    }
}

/// A raw entry after normalisation into the comparable numeric domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResult {
    pub competitor: String,
    pub raw_result: String,
    /// Sort key. Direction is carried by the event's `EventType`, not by the value.
    pub value: f64,
    /// Absent, zero or unparseable. Sorts last and always earns zero points.
    pub is_invalid: bool,
}

/// Place and points awarded to one competitor in one event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventResult {
    pub competitor: String,
    pub rank: Rank,
    pub points: Points,
    pub raw_result: String,
}

/// A scored event in the competition history.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRecord {
    pub sequence: u32,
    pub title: String,
    pub event_type: EventType,
    pub results: Vec<EventResult>,
}

impl EventRecord {
    pub fn result_for(&self, competitor: &str) -> Option<&EventResult> {
        self.results.iter().find(|r| r.competitor == competitor)
    }

    /// Raw inputs of this event, in result order. Used to rescore after an edit.
    pub fn raw_entries(&self) -> Vec<RawEntry> {
        self.results
            .iter()
            .map(|r| RawEntry::new(r.competitor.clone(), r.raw_result.clone()))
            .collect()
    }
}
