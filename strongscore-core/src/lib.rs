/// strongscore-core: Pure-computation scoring engine for multi-event strength competitions.
///
/// Raw results → places and points per event → final standings with tie-breaks.
/// No IO, no HTTP, no filesystem. Persistence, rendering and undo live with the caller.
///
/// Competitors are identified by name. Every call is deterministic: the same
/// inputs always produce the same output.
///
/// # Quick start
///
/// ```rust
/// use strongscore_core::{score_event, Competition, EventType, Rank, RawEntry};
///
/// let entries = vec![
///     RawEntry::new("Alice", "12.5"),
///     RawEntry::new("Bob", "0"),      // did not attempt
///     RawEntry::new("Carol", "11,0"), // comma decimal separator
/// ];
///
/// let results = score_event(&entries, 3, EventType::LowIsBetter).expect("all entries parse");
/// for r in &results {
///     println!("{:>2} {:<6} {}", r.rank, r.competitor, r.points);
/// }
/// assert_eq!(results[0].competitor, "Carol");
/// assert_eq!(results[0].points.to_string(), "3.00");
/// assert_eq!(results[2].rank, Rank::Unplaced);
///
/// // Or keep a whole competition as an immutable value.
/// let comp = Competition::new(["Alice", "Bob", "Carol"]).unwrap();
/// let comp = comp.record_event("Farmer's walk", EventType::LowIsBetter, &entries).unwrap();
/// assert_eq!(comp.standings()[0].competitor, "Carol");
/// ```

pub mod constants;
pub mod error;
pub mod parse;
pub mod scoring;
pub mod session;
pub mod standings;
pub mod tiebreak;
pub mod types;

// Re-export primary public API at crate root.
pub use error::{ScoringError, SessionError};
pub use parse::{parse_result, ParsedValue};
pub use scoring::score_event;
pub use session::Competition;
pub use standings::{final_standings, Standing};
pub use tiebreak::{break_tie, TieBreakOutcome, TieBreakReason};
pub use types::{EventRecord, EventResult, EventType, ParsedResult, Points, RawEntry, Rank};
