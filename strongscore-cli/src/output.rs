/// Output formatting: terminal tables and JSON.
use serde::Serialize;
use strongscore_core::{Competition, EventRecord, EventResult, Standing};

#[derive(Serialize)]
struct JsonEventResult {
    /// `null` when unplaced.
    place: Option<u32>,
    name: String,
    points: f64,
    result: String,
}

#[derive(Serialize)]
struct JsonEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<u32>,
    title: String,
    #[serde(rename = "type")]
    event_type: String,
    results: Vec<JsonEventResult>,
}

#[derive(Serialize)]
struct JsonStanding {
    place: u32,
    name: String,
    total: f64,
    tie_break: Option<String>,
}

#[derive(Serialize)]
struct JsonStandingsOutput {
    competition: String,
    events: Vec<JsonEvent>,
    standings: Vec<JsonStanding>,
}

fn json_results(results: &[EventResult]) -> Vec<JsonEventResult> {
    results
        .iter()
        .map(|r| JsonEventResult {
            place: r.rank.place(),
            name: r.competitor.clone(),
            points: r.points.as_f64(),
            result: r.raw_result.clone(),
        })
        .collect()
}

fn json_event(event: &EventRecord) -> JsonEvent {
    JsonEvent {
        number: Some(event.sequence),
        title: event.title.clone(),
        event_type: event.event_type.to_string(),
        results: json_results(&event.results),
    }
}

fn print_pretty<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => crate::bail(format!("Failed to serialize output: {e}")),
    }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values.map(|v| v.chars().count()).max().unwrap_or(0).max(header.len())
}

/// Print one event's results as a table, best first.
pub fn print_event_table(title: &str, results: &[EventResult]) {
    let name_width = column_width(results.iter().map(|r| r.competitor.as_str()), "Competitor");
    let result_width = column_width(results.iter().map(|r| r.raw_result.as_str()), "Result");

    println!("{title}");
    println!("  # | {:<name_width$} | {:<result_width$} | Points", "Competitor", "Result");
    println!("----|-{}-|-{}-|-------", "-".repeat(name_width), "-".repeat(result_width));
    for r in results {
        println!(
            "{:>3} | {:<name_width$} | {:<result_width$} | {:>6}",
            r.rank, r.competitor, r.raw_result, r.points,
        );
    }
}

/// Print one event's results as JSON.
pub fn print_event_json(title: &str, event_type: &str, results: &[EventResult]) {
    let event = JsonEvent {
        number: None,
        title: title.to_string(),
        event_type: event_type.to_string(),
        results: json_results(results),
    };
    print_pretty(&event);
}

/// Print every event, then the final standings with per-event points.
pub fn print_standings_table(competition_name: &str, competition: &Competition) {
    let history = competition.history();
    for event in history {
        print_event_table(&format!("Event {}: {} ({})", event.sequence, event.title, event.event_type), &event.results);
        println!();
    }

    let standings = competition.standings();
    let name_width = column_width(standings.iter().map(|s| s.competitor.as_str()), "Competitor");

    println!("{competition_name} - standings after {} event(s)", history.len());
    let event_headers: String = history.iter().map(|e| format!(" | {:>6}", format!("E{}", e.sequence))).collect();
    println!("  # | {:<name_width$}{event_headers} |  Total | Tie-break", "Competitor");
    println!("----|-{}{}-|--------|----------", "-".repeat(name_width), "-|-------".repeat(history.len()));

    for s in &standings {
        let per_event: String = history
            .iter()
            .map(|e| {
                let points = e.result_for(&s.competitor).map(|r| r.points).unwrap_or_default();
                format!(" | {points:>6}")
            })
            .collect();
        println!(
            "{:>3} | {:<name_width$}{per_event} | {:>6} | {}",
            s.place,
            s.competitor,
            s.total,
            tie_break_note(s),
        );
    }
}

fn tie_break_note(standing: &Standing) -> String {
    standing.tie_break.map(|reason| reason.to_string()).unwrap_or_default()
}

/// Print events and standings as JSON.
pub fn print_standings_json(competition_name: &str, competition: &Competition) {
    let output = JsonStandingsOutput {
        competition: competition_name.to_string(),
        events: competition.history().iter().map(json_event).collect(),
        standings: competition
            .standings()
            .into_iter()
            .map(|s| JsonStanding {
                place: s.place,
                tie_break: s.tie_break.map(|r| r.to_string()),
                name: s.competitor,
                total: s.total.as_f64(),
            })
            .collect(),
    };
    print_pretty(&output);
}

/// Print a start order, first to lift on top.
pub fn print_order(heading: &str, order: &[String]) {
    println!("{heading}");
    for (i, name) in order.iter().enumerate() {
        println!("{:>3}. {name}", i + 1);
    }
}
