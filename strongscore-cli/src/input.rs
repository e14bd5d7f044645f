/// Competition files and inline entries.
///
/// A competition file lists the field and the events in the order they were
/// held. Replaying it through `Competition::record_event` rebuilds the whole
/// session, so the file only ever stores raw results, never points.
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use strongscore_core::{Competition, EventType, RawEntry};

#[derive(Debug, Deserialize)]
pub struct CompetitionFile {
    pub name: Option<String>,
    pub location: Option<String>,
    pub competitors: Vec<String>,
    #[serde(default)]
    pub events: Vec<EventEntry>,
}

#[derive(Debug, Deserialize)]
pub struct EventEntry {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub results: BTreeMap<String, RawValue>,
}

/// A raw result as written in the file. Numbers are accepted unquoted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl RawValue {
    fn to_raw(&self) -> String {
        match self {
            RawValue::Text(s) => s.clone(),
            RawValue::Int(n) => n.to_string(),
            RawValue::Float(x) => x.to_string(),
        }
    }
}

impl CompetitionFile {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Strongman Competition")
    }
}

/// Parse file contents; TOML when the path ends in `.toml`, JSON otherwise.
pub fn parse_competition_file(content: &str, path: &Path) -> Result<CompetitionFile, String> {
    let is_toml = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        toml::from_str(content).map_err(|e| format!("invalid TOML: {e}"))
    } else {
        serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))
    }
}

pub fn load_competition_file(path: &Path) -> Result<CompetitionFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read competition file {}: {e}", path.display()))?;
    parse_competition_file(&content, path)
        .map_err(|e| format!("Failed to parse competition file {}: {e}", path.display()))
}

/// Rebuild the session by recording every event in file order.
pub fn replay(file: &CompetitionFile) -> Result<Competition, String> {
    let mut competition = Competition::new(file.competitors.clone()).map_err(|e| e.to_string())?;

    for (i, event) in file.events.iter().enumerate() {
        let title = event.title.clone().unwrap_or_else(|| format!("Event {}", i + 1));
        let event_type: EventType = event
            .event_type
            .parse()
            .map_err(|e| format!("{title}: {e}"))?;
        let entries: Vec<RawEntry> = event
            .results
            .iter()
            .map(|(name, value)| RawEntry::new(name.as_str(), value.to_raw()))
            .collect();

        competition = competition
            .record_event(title.clone(), event_type, &entries)
            .map_err(|e| format!("{title}: {e}"))?;
        tracing::debug!(event = %title, version = competition.version(), "replayed event");
    }

    Ok(competition)
}

/// Parse a `NAME=RESULT` command-line entry. The result may be empty.
pub fn parse_entry_arg(arg: &str) -> Result<RawEntry, String> {
    let (name, raw) = arg
        .split_once('=')
        .ok_or_else(|| format!("Entry \"{arg}\" must look like NAME=RESULT"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Entry \"{arg}\" has no competitor name"));
    }
    Ok(RawEntry::new(name, raw.trim()))
}
