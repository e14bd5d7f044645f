mod config;
mod input;
mod llm;
mod output;
mod prompt;

use clap::Parser;
use reqwest::Client;
use std::path::{Path, PathBuf};
use strongscore_core::{score_event, Competition, EventType, RawEntry};
use tracing_subscriber::EnvFilter;

use crate::input::{load_competition_file, parse_entry_arg, replay, CompetitionFile};
use crate::llm::{generate_announcement, LlmConfig};

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "strongscore", version, about = "Score multi-event strength competitions")]
struct Cli {
    /// Show debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Score a single event from inline results
    Event(EventArgs),
    /// Replay a competition file and print results and standings
    Standings(StandingsArgs),
    /// Print the start order for the next event
    Order(OrderArgs),
    /// Generate a speaker announcement for the current leaders
    Announce(AnnounceArgs),
    /// Create a default config file at ~/.config/strongscore/config.toml
    Init,
}

#[derive(Parser)]
struct EventArgs {
    /// Event direction: "high" (more is better) or "low" (less is better)
    #[arg(long = "type")]
    event_type: String,

    /// Competitor result as NAME=RESULT (repeatable). An empty result means did not attempt.
    #[arg(long = "entry", required = true)]
    entries: Vec<String>,

    /// Size of the field. Defaults to the number of entries.
    #[arg(long)]
    competitors: Option<usize>,

    /// Event title shown above the table
    #[arg(long)]
    title: Option<String>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct StandingsArgs {
    /// Competition file (JSON, or TOML with a .toml extension)
    #[arg(long)]
    file: PathBuf,

    /// Output JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct OrderArgs {
    /// Competition file (JSON, or TOML with a .toml extension)
    #[arg(long)]
    file: PathBuf,

    /// Order for the final event: reverse standings, leader last
    #[arg(long = "final", conflicts_with = "shuffle")]
    final_event: bool,

    /// Draw a random order instead
    #[arg(long)]
    shuffle: bool,
}

#[derive(Parser)]
struct AnnounceArgs {
    /// Competition file (JSON, or TOML with a .toml extension)
    #[arg(long)]
    file: PathBuf,

    /// OpenAI-compatible base URL (e.g. http://localhost:8000)
    #[arg(long)]
    endpoint: Option<String>,

    /// Bearer token for the API (also reads OPENAI_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// Model ID for the API
    #[arg(long)]
    model: Option<String>,

    /// LLM sampling temperature. Default: 0.8.
    #[arg(long)]
    temperature: Option<f64>,

    /// Max retries on HTTP errors. Default: 2. Set to 0 to disable.
    #[arg(long)]
    retries: Option<usize>,

    /// Path to a custom prompt template file.
    /// The template must contain: $competition, $standings
    #[arg(long)]
    prompt_template: Option<PathBuf>,

    /// Path to config file (default: ~/.config/strongscore/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Event(args) => run_event(args),
        Commands::Standings(args) => run_standings(args),
        Commands::Order(args) => run_order(args),
        Commands::Announce(args) => run_announce(args).await,
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your default endpoint, model, etc.");
        }
    }
}

fn run_event(args: EventArgs) {
    let event_type: EventType = args.event_type.parse().unwrap_or_else(|e| bail(e));

    let entries: Vec<RawEntry> = args
        .entries
        .iter()
        .map(|arg| parse_entry_arg(arg).unwrap_or_else(|e| bail(e)))
        .collect();

    let field = args.competitors.unwrap_or(entries.len());
    tracing::debug!(entries = entries.len(), field, %event_type, "scoring event");

    let results = score_event(&entries, field, event_type)
        .unwrap_or_else(|e| bail(format!("Invalid results, please check the entries: {e}")));

    let title = args.title.unwrap_or_else(|| "Event".to_string());
    if args.json {
        output::print_event_json(&title, &event_type.to_string(), &results);
    } else {
        output::print_event_table(&title, &results);
    }
}

/// Load a competition file and rebuild the session from it.
fn load_competition(path: &Path) -> (CompetitionFile, Competition) {
    let file = load_competition_file(path).unwrap_or_else(|e| bail(e));
    let competition = replay(&file).unwrap_or_else(|e| bail(e));
    tracing::info!(
        competition = file.display_name(),
        events = file.events.len(),
        competitors = competition.competitors().len(),
        "competition loaded"
    );
    (file, competition)
}

fn heading(file: &CompetitionFile) -> String {
    match file.location.as_deref() {
        Some(location) if !location.trim().is_empty() => format!("{} ({location})", file.display_name()),
        _ => file.display_name().to_string(),
    }
}

fn run_standings(args: StandingsArgs) {
    let (file, competition) = load_competition(&args.file);

    if args.json {
        output::print_standings_json(file.display_name(), &competition);
    } else {
        output::print_standings_table(&heading(&file), &competition);
    }
}

fn run_order(args: OrderArgs) {
    let (_, competition) = load_competition(&args.file);

    let (label, order) = if args.shuffle {
        let drawn = competition.shuffled(&mut rand::rng());
        ("Random draw", drawn.competitors().to_vec())
    } else if args.final_event {
        ("Final event order (leader last)", competition.final_event_order())
    } else {
        ("Next event order (fewest points in the last event first)", competition.next_event_order())
    };

    output::print_order(&format!("Event {} - {label}", competition.next_sequence()), &order);
}

async fn run_announce(args: AnnounceArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let endpoint = args.endpoint.clone()
        .or(cfg.endpoint)
        .unwrap_or_else(|| {
            bail(format!("No endpoint specified. Pass --endpoint or set it in {}", config_path.display()));
        });
    let model = args.model.clone()
        .or(cfg.model)
        .unwrap_or_else(|| {
            bail(format!("No model specified. Pass --model or set it in {}", config_path.display()));
        });
    let temperature = args.temperature.or(cfg.temperature).unwrap_or(0.8);
    let retries = args.retries.or(cfg.retries).unwrap_or(2);

    // Load prompt template: CLI arg > config file > built-in default
    let template = {
        let template_path = args.prompt_template.clone()
            .or_else(|| cfg.prompt_template.map(PathBuf::from));
        match template_path {
            Some(path) => prompt::load_template(&path),
            None => prompt::DEFAULT_TEMPLATE.to_string(),
        }
    };

    let (file, competition) = load_competition(&args.file);
    if competition.history().is_empty() {
        tracing::warn!("no events scored yet, the announcement will only list competitors");
    }

    let prompt = prompt::build_prompt(&template, file.display_name(), &competition.standings());

    let api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok());

    let llm_config = LlmConfig {
        endpoint,
        model,
        api_key,
        temperature,
    };

    tracing::info!(endpoint = %llm_config.endpoint, model = %llm_config.model, "requesting announcement");

    let client = Client::new();
    match generate_announcement(&client, &llm_config, &prompt, retries).await {
        Ok(text) => println!("{text}"),
        Err(e) => bail(format!("Could not generate the announcement: {e}")),
    }
}
