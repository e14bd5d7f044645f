/// Prompt building for speaker announcements.
use std::path::Path;

use strongscore_core::Standing;

use crate::bail;

/// How many leaders the announcement talks about.
pub const ANNOUNCED_PLACES: usize = 3;

/// Built-in announcement template.
pub const DEFAULT_TEMPLATE: &str = "\
Write a professional announcement for the speaker at the strongman competition \"$competition\".

Current standings:
$standings

The announcement should be energetic and motivating, and describe the current situation in the competition.
";

/// Load a custom template, checking it has every placeholder.
pub fn load_template(path: &Path) -> String {
    let template = std::fs::read_to_string(path)
        .unwrap_or_else(|e| bail(format!("Failed to read prompt template {}: {e}", path.display())));
    if let Err(missing) = validate_template(&template) {
        bail(format!("Prompt template {} is missing {missing}", path.display()));
    }
    template
}

fn validate_template(template: &str) -> Result<(), &'static str> {
    for var in ["$competition", "$standings"] {
        if !template.contains(var) {
            return Err(var);
        }
    }
    Ok(())
}

/// One line per announced competitor: `1. Name - 12.50 pts`.
pub fn format_leaders(standings: &[Standing]) -> String {
    standings
        .iter()
        .take(ANNOUNCED_PLACES)
        .map(|s| format!("{}. {} - {} pts", s.place, s.competitor, s.total))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fill the template with the competition name and the current leaders.
pub fn build_prompt(template: &str, competition: &str, standings: &[Standing]) -> String {
    template
        .replace("$competition", competition)
        .replace("$standings", &format_leaders(standings))
}
