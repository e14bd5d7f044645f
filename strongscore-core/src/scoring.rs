/// Event scoring: raw entries → places and points.
///
/// One function, no state. The whole event is scored or nothing is: a single
/// malformed entry rejects the event so the judge can correct it.
use std::collections::HashSet;

use crate::error::ScoringError;
use crate::parse::{is_absent, parse_result};
use crate::types::{EventResult, EventType, ParsedResult, Points, RawEntry, Rank};

/// Score one event.
///
/// `total_competitors` is the size of the field, N. Placing alone at zero-based
/// position `k` is worth `N - k` points; tied competitors share the average of
/// the positions they occupy. Absent and zero entries are unplaced and earn
/// nothing. Results come back best first.
pub fn score_event(
    entries: &[RawEntry],
    total_competitors: usize,
    event_type: EventType,
) -> Result<Vec<EventResult>, ScoringError> {
    if entries.len() > total_competitors {
        return Err(ScoringError::TooManyEntries {
            entries: entries.len(),
            competitors: total_competitors,
        });
    }

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.competitor.as_str()) {
            return Err(ScoringError::DuplicateEntry(entry.competitor.clone()));
        }
    }

    let mut parsed = Vec::with_capacity(entries.len());
    for entry in entries {
        let value = parse_result(&entry.raw_result, event_type);
        if value.is_invalid && !is_absent(&entry.raw_result) {
            return Err(ScoringError::MalformedResult {
                competitor: entry.competitor.clone(),
                raw: entry.raw_result.clone(),
            });
        }
        parsed.push(ParsedResult {
            competitor: entry.competitor.clone(),
            raw_result: entry.raw_result.clone(),
            value: value.value,
            is_invalid: value.is_invalid,
        });
    }

    // Stable sort: equal values keep entry order.
    match event_type {
        EventType::HighIsBetter => parsed.sort_by(|a, b| b.value.total_cmp(&a.value)),
        EventType::LowIsBetter => parsed.sort_by(|a, b| a.value.total_cmp(&b.value)),
    }

    let field = total_competitors as i64;
    let mut results = Vec::with_capacity(parsed.len());
    let mut i = 0;
    while i < parsed.len() {
        let mut j = i;
        while j < parsed.len() && parsed[j].value == parsed[i].value {
            j += 1;
        }

        let group = &parsed[i..j];
        let sum: i64 = group
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_invalid)
            .map(|(offset, _)| field - (i + offset) as i64)
            .sum();
        let shared = Points::average(sum, group.len());

        for p in group {
            let (rank, points) = if p.is_invalid {
                (Rank::Unplaced, Points::ZERO)
            } else {
                (Rank::Placed(i as u32 + 1), shared)
            };
            results.push(EventResult {
                competitor: p.competitor.clone(),
                rank,
                points,
                raw_result: p.raw_result.clone(),
            });
        }

        i = j;
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> Vec<RawEntry> {
        pairs.iter().map(|(name, raw)| RawEntry::new(*name, *raw)).collect()
    }

    fn find<'a>(results: &'a [EventResult], name: &str) -> &'a EventResult {
        results
            .iter()
            .find(|r| r.competitor == name)
            .unwrap_or_else(|| panic!("no result for {name}"))
    }

    #[test]
    fn test_tied_competitors_share_averaged_points() {
        let input = entries(&[("A", "10"), ("B", "10"), ("C", "8")]);
        let results = score_event(&input, 3, EventType::HighIsBetter).unwrap();

        assert_eq!(find(&results, "A").rank, Rank::Placed(1));
        assert_eq!(find(&results, "B").rank, Rank::Placed(1));
        assert_eq!(find(&results, "A").points.to_string(), "2.50");
        assert_eq!(find(&results, "B").points.to_string(), "2.50");
        assert_eq!(find(&results, "C").rank, Rank::Placed(3));
        assert_eq!(find(&results, "C").points.to_string(), "1.00");
    }

    #[test]
    fn test_low_is_better_with_absent_entry() {
        let input = entries(&[("Alice", "12.5"), ("Bob", "0"), ("Carol", "11.0")]);
        let results = score_event(&input, 3, EventType::LowIsBetter).unwrap();

        let order: Vec<&str> = results.iter().map(|r| r.competitor.as_str()).collect();
        assert_eq!(order, ["Carol", "Alice", "Bob"]);

        assert_eq!(find(&results, "Carol").rank, Rank::Placed(1));
        assert_eq!(find(&results, "Carol").points, Points::whole(3));
        assert_eq!(find(&results, "Alice").rank, Rank::Placed(2));
        assert_eq!(find(&results, "Alice").points, Points::whole(2));
        assert_eq!(find(&results, "Bob").rank, Rank::Unplaced);
        assert_eq!(find(&results, "Bob").points.to_string(), "0.00");
        assert_eq!(find(&results, "Bob").raw_result, "0");
    }

    #[test]
    fn test_malformed_entry_rejects_whole_event() {
        let input = entries(&[("A", "10"), ("B", "abc"), ("C", "8")]);
        let err = score_event(&input, 3, EventType::HighIsBetter).unwrap_err();
        assert_eq!(
            err,
            ScoringError::MalformedResult { competitor: "B".to_string(), raw: "abc".to_string() }
        );
    }

    #[test]
    fn test_several_absent_entries_all_unplaced() {
        let input = entries(&[("A", ""), ("B", "5"), ("C", "0"), ("D", " ")]);
        let results = score_event(&input, 4, EventType::HighIsBetter).unwrap();

        assert_eq!(find(&results, "B").rank, Rank::Placed(1));
        assert_eq!(find(&results, "B").points, Points::whole(4));
        for name in ["A", "C", "D"] {
            assert_eq!(find(&results, name).rank, Rank::Unplaced);
            assert_eq!(find(&results, name).points, Points::ZERO);
        }
    }

    #[test]
    fn test_field_larger_than_entries() {
        // Two of five competitors report results; points still count down from N.
        let input = entries(&[("A", "1:10"), ("B", "1:05")]);
        let results = score_event(&input, 5, EventType::LowIsBetter).unwrap();

        assert_eq!(find(&results, "B").points, Points::whole(5));
        assert_eq!(find(&results, "A").points, Points::whole(4));
    }

    #[test]
    fn test_three_way_tie_in_middle() {
        let input = entries(&[("A", "100"), ("B", "90"), ("C", "90"), ("D", "90"), ("E", "80")]);
        let results = score_event(&input, 5, EventType::HighIsBetter).unwrap();

        // Positions 1..4 are worth 4 + 3 + 2 = 9, shared by three.
        for name in ["B", "C", "D"] {
            assert_eq!(find(&results, name).rank, Rank::Placed(2));
            assert_eq!(find(&results, name).points, Points::whole(3));
        }
        assert_eq!(find(&results, "E").rank, Rank::Placed(5));
        assert_eq!(find(&results, "E").points, Points::whole(1));
    }

    #[test]
    fn test_fractional_average_rounds_to_hundredths() {
        // Three tied behind the leader in a field of 4: (3 + 2 + 1) / 3
        let input = entries(&[("A", "9"), ("B", "7"), ("C", "7"), ("D", "7")]);
        let results = score_event(&input, 4, EventType::HighIsBetter).unwrap();
        assert_eq!(find(&results, "B").points.to_string(), "2.00");

        let input = entries(&[("A", "9"), ("B", "9"), ("C", "9")]);
        let results = score_event(&input, 4, EventType::HighIsBetter).unwrap();
        assert_eq!(find(&results, "A").points.to_string(), "3.00");

        let input = entries(&[("A", "2"), ("B", "1"), ("C", "1")]);
        let results = score_event(&input, 3, EventType::HighIsBetter).unwrap();
        assert_eq!(find(&results, "B").points.to_string(), "1.50");
    }

    #[test]
    fn test_distance_encoding_sorts_after_times() {
        let input = entries(&[("A", "050"), ("B", "59.9")]);
        let results = score_event(&input, 2, EventType::LowIsBetter).unwrap();
        assert_eq!(find(&results, "B").rank, Rank::Placed(1));
        assert_eq!(find(&results, "A").rank, Rank::Placed(2));
    }

    #[test]
    fn test_untied_points_sum_to_triangular_number() {
        let input = entries(&[("A", "5"), ("B", "4"), ("C", "3"), ("D", "2"), ("E", "1")]);
        let results = score_event(&input, 5, EventType::HighIsBetter).unwrap();
        let total: Points = results.iter().map(|r| r.points).sum();
        assert_eq!(total, Points::whole(15));
    }

    #[test]
    fn test_rejects_duplicate_and_oversized_input() {
        let input = entries(&[("A", "5"), ("A", "4")]);
        assert_eq!(
            score_event(&input, 2, EventType::HighIsBetter).unwrap_err(),
            ScoringError::DuplicateEntry("A".to_string())
        );

        let input = entries(&[("A", "5"), ("B", "4"), ("C", "3")]);
        assert_eq!(
            score_event(&input, 2, EventType::HighIsBetter).unwrap_err(),
            ScoringError::TooManyEntries { entries: 3, competitors: 2 }
        );
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let input = entries(&[("A", "1:30"), ("B", "1:30"), ("C", ""), ("D", "95")]);
        let first = score_event(&input, 4, EventType::LowIsBetter).unwrap();
        let second = score_event(&input, 4, EventType::LowIsBetter).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_event() {
        let results = score_event(&[], 3, EventType::HighIsBetter).unwrap();
        assert!(results.is_empty());
    }
}
