use std::sync::Arc;

use chrono::Local;
use quickevent::components::parser::{parse_event, EventDraft, HeuristicParser};
use quickevent::components::query::insert_invitee;
use quickevent::components::recents::{JsonFileStore, RecentInvitees};
use quickevent::components::{CalendarAutomation, OsaScriptAutomation};
use quickevent::config::Config;
use quickevent::error::Error;
use quickevent::startup;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    // Load configuration
    let config = startup::load_config()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    run(config, args).await
}

async fn run(config: Config, args: Vec<String>) -> miette::Result<()> {
    let store = Arc::new(JsonFileStore::new(config.storage_path.clone()));

    match args.first().map(String::as_str) {
        None | Some("--help") => {
            print_usage();
            Ok(())
        }
        Some("--invitees") => {
            let recents = RecentInvitees::load(store).await;
            let entries = match args.get(1) {
                Some(term) => recents.matching(term),
                None => recents.entries().iter().map(String::as_str).collect(),
            };
            for entry in entries {
                println!("{}", entry);
            }
            Ok(())
        }
        Some("--remove-invitee") => {
            let target = required_arg(&args, 1, "--remove-invitee <email>")?;
            let mut recents = RecentInvitees::load(store).await;
            recents.remove(target).await;
            info!("Removed invitee {}", target);
            Ok(())
        }
        Some("--rename-invitee") => {
            let old = required_arg(&args, 1, "--rename-invitee <old> <new>")?;
            let new = required_arg(&args, 2, "--rename-invitee <old> <new>")?;
            let mut recents = RecentInvitees::load(store).await;
            recents.rename(old, new).await;
            info!("Renamed invitee {} to {}", old, new);
            Ok(())
        }
        Some("--create") => {
            let query = required_arg(&args, 1, "--create <query> [calendar]")?;
            let calendar = args
                .get(2)
                .map(String::as_str)
                .unwrap_or_else(|| config.default_calendar());
            create_event(&config, store, query, calendar).await
        }
        Some("--with") => {
            let invitee = required_arg(&args, 1, "--with <invitee> <query>")?;
            let query = args[2..].join(" ");
            let query = insert_invitee(&query, invitee);
            println!("{}", query);
            parse_and_print(&config, &query);
            Ok(())
        }
        Some(_) => {
            parse_and_print(&config, &args.join(" "));
            Ok(())
        }
    }
}

/// Parse the query and create the draft through the calendar automation.
/// Invitees are persisted only once creation succeeded.
async fn create_event(
    config: &Config,
    store: Arc<JsonFileStore>,
    query: &str,
    calendar: &str,
) -> miette::Result<()> {
    let draft = match parse_event(
        query,
        &HeuristicParser,
        Local::now(),
        config.default_duration_minutes,
    ) {
        Some(draft) => draft,
        None => {
            println!("Nothing to create: the query does not describe an event yet.");
            return Ok(());
        }
    };

    let automation = OsaScriptAutomation;
    if let Err(e) = automation.create_event(&draft, calendar).await {
        error!("Could not create event: {}", e);
        return Err(e.into());
    }

    let mut recents = RecentInvitees::load(store).await;
    recents.add_many(&draft.invitees).await;

    if let Err(e) = automation.focus_calendar_view(draft.start).await {
        warn!("Could not focus the calendar view: {}", e);
    }

    println!("Created '{}' in '{}'", draft.title, calendar);
    print_draft(&draft);
    Ok(())
}

fn parse_and_print(config: &Config, query: &str) {
    match parse_event(
        query,
        &HeuristicParser,
        Local::now(),
        config.default_duration_minutes,
    ) {
        Some(draft) => print_draft(&draft),
        None => println!("No event parsed from the query yet."),
    }
}

fn print_draft(draft: &EventDraft) {
    println!("{}", draft.title);
    println!("  {}", draft.date_display());
    if let Some(description) = &draft.recurrence_description {
        println!("  Repeats: {}", description);
    }
    if !draft.invitees.is_empty() {
        println!("  Invitees: {}", draft.invitees.join(", "));
    }
}

fn required_arg<'a>(args: &'a [String], index: usize, usage: &str) -> Result<&'a String, Error> {
    args.get(index)
        .ok_or_else(|| Error::Other(format!("Usage: quickevent {}", usage)))
}

fn print_usage() {
    println!("Usage:");
    println!("  quickevent \"<query>\"                    parse a query and show the draft");
    println!("  quickevent --with <invitee> <query...>  splice an invitee into the query");
    println!("  quickevent --create <query> [calendar]  create the event in Calendar.app");
    println!("  quickevent --invitees [term]            list recent invitees");
    println!("  quickevent --remove-invitee <email>");
    println!("  quickevent --rename-invitee <old> <new>");
}
