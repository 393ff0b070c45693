use clap::ArgMatches;
use colored::Colorize;
use edumap_client::{AssistantClient, CHAT_FALLBACK, TranscriptPolicy};
use edumap_core::{Dataset, GroupBy, LocationRecord, MapConfig, SearchFilter};
use edumap_tui::MapViewOptions;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::warn;

/// Institutions bundled with the binary, used when no dataset path is given.
pub const SAMPLE_DATASET: &str = include_str!("../data/sample_inst.json");

// Helper functions shared by the handlers

/// Resolve the dataset for a command: an explicit path (tilde-expanded) or
/// the bundled sample. A failed load degrades to an empty dataset, the same
/// way the map view shows an empty map.
pub fn resolve_dataset(path: Option<&String>) -> Dataset {
    match path {
        Some(p) => load_dataset_from_path(p),
        None => Dataset::from_json_str(SAMPLE_DATASET).unwrap_or_default(),
    }
}

/// Load a dataset from a user-supplied path, expanding a leading tilde.
pub fn load_dataset_from_path(path: &str) -> Dataset {
    let expanded = shellexpand::tilde(path);
    Dataset::load_or_empty(expanded.as_ref())
}

/// Render the search command's output.
pub fn format_search_results(term: &str, hits: &[&LocationRecord]) -> String {
    let mut out = String::new();

    if hits.is_empty() {
        out.push_str(&format!("No institutions match '{}'\n", term));
        return out;
    }

    out.push_str(&format!("{} institution(s) match '{}':\n\n", hits.len(), term));
    for record in hits {
        out.push_str(&format!(
            "  • {}  ({}, {}, {})\n",
            record.name, record.category, record.area, record.ownership
        ));
    }
    out
}

/// Render the info command's output: totals plus per-group counts.
pub fn format_dataset_info(dataset: &Dataset) -> String {
    let mut out = String::new();
    out.push_str(&format!("Institutions: {}\n", dataset.len()));

    for (title, group_by) in [("By category:", GroupBy::Category), ("By area:", GroupBy::Area)] {
        out.push('\n');
        out.push_str(title);
        out.push('\n');
        for (key, count) in dataset.group_counts(group_by) {
            let label = if key.is_empty() { "(unspecified)" } else { key.as_str() };
            out.push_str(&format!("  {:<28} {}\n", label, count));
        }
    }
    out
}

fn network_spinner(msg: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(msg);
    spinner
}

fn yes_no(value: bool) -> String {
    if value {
        "Yes".green().to_string()
    } else {
        "No".red().to_string()
    }
}

fn print_record(record: &LocationRecord) {
    println!("{}", record.name.bright_white().bold());
    println!("  {} {}", "Category:".blue(), record.category);
    println!("  {} {}", "Area:".blue(), record.area);
    println!("  {} {}", "Ownership:".blue(), record.ownership);
    if let Some(yoe) = record.year_established {
        println!("  {} {}", "Established:".blue(), yoe);
    }
    println!(
        "  {} {:.5}, {:.5}",
        "Location:".blue(),
        record.latitude,
        record.longitude
    );
    if let Some(ref url) = record.image_url {
        println!("  {} {}", "Image:".blue(), url);
    }
}

// Handlers

pub fn handle_view(args: &ArgMatches) {
    let data = args.get_one::<String>("data");
    let api_url = args.get_one::<String>("api-url").unwrap();
    let group_by = args
        .get_one::<String>("group-by")
        .and_then(|s| GroupBy::from_str(s))
        .unwrap_or(GroupBy::Category);
    let keep_transcripts = args.get_flag("keep-transcripts");

    let dataset = resolve_dataset(data);
    if dataset.is_empty() {
        eprintln!("⚠ Dataset is empty; the map will open without markers");
    }

    let options = MapViewOptions {
        dataset,
        config: MapConfig::from_env().with_group_by(group_by),
        api_url: api_url.clone(),
        transcript_policy: if keep_transcripts {
            TranscriptPolicy::KeepPerRecord
        } else {
            TranscriptPolicy::ResetOnOpen
        },
    };

    if let Err(e) = edumap_tui::run(options) {
        eprintln!("Error running map view: {}", e);
        std::process::exit(1);
    }
}

pub fn handle_search(args: &ArgMatches) {
    tracing_subscriber::fmt::init();

    let term = args.get_one::<String>("TERM").unwrap();
    let dataset = resolve_dataset(args.get_one::<String>("data"));

    let filter = SearchFilter::default();
    let hits = filter.filter(dataset.records(), term);
    print!("{}", format_search_results(term, &hits));
}

pub async fn handle_details(args: &ArgMatches) {
    tracing_subscriber::fmt::init();

    let name = args.get_one::<String>("NAME").unwrap();
    let api_url = args.get_one::<String>("api-url").unwrap();
    let offline = args.get_flag("offline");
    let dataset = resolve_dataset(args.get_one::<String>("data"));

    let Some(record) = dataset.find_by_name(name) else {
        eprintln!("✗ No institution named '{}' in the dataset", name);
        std::process::exit(1);
    };

    // Base attributes print immediately, never gated on the network
    print_record(record);

    if offline {
        return;
    }

    let client = match AssistantClient::new(api_url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    let spinner = network_spinner("Fetching live details...");
    match client.live_details(&record.name).await {
        Ok(live) => {
            spinner.finish_and_clear();
            println!();
            println!("{}", "LIVE DETAILS".bright_blue().bold());
            println!("  {} {}", "In Session:".blue(), yes_no(live.in_session));
            println!(
                "  {} {}",
                "Admission Ongoing:".blue(),
                yes_no(live.admission_ongoing)
            );
            if let Some(vc) = live.vice_chancellor {
                println!("  {} {}", "Vice Chancellor:".blue(), vc);
            }
        }
        Err(e) => {
            // Same contract as the panel: log it, print nothing extra
            spinner.finish_and_clear();
            warn!("Live details unavailable: {}", e);
        }
    }
}

pub async fn handle_ask(args: &ArgMatches) {
    tracing_subscriber::fmt::init();

    let name = args.get_one::<String>("NAME").unwrap();
    let query = args
        .get_many::<String>("QUERY")
        .unwrap()
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    let api_url = args.get_one::<String>("api-url").unwrap();

    if query.trim().is_empty() {
        return;
    }

    let client = match AssistantClient::new(api_url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    // The user line prints before the request goes out
    println!("{} {}", "You:".yellow().bold(), query.trim());

    let spinner = network_spinner("Waiting for the assistant...");
    let reply = match client.ask(query.trim(), name).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Chatbot request for {} failed: {}", name, e);
            CHAT_FALLBACK.to_string()
        }
    };
    spinner.finish_and_clear();

    println!("{}  {}", "AI:".green().bold(), reply);
}

pub fn handle_info(args: &ArgMatches) {
    tracing_subscriber::fmt::init();

    let dataset = resolve_dataset(args.get_one::<String>("data"));
    print!("{}", format_dataset_info(&dataset));
}
