pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod http;
pub mod interests;
pub mod output;
pub mod services;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use log::{info, warn};

use crate::cli::{AddArgs, Command, FilterArgs};
use crate::config::settings::AppConfig;
use crate::config::{is_known_city, is_known_game};
use crate::domain::{dates, CalendarEntry, CalendarView, Catalog, TournamentFilter};
use crate::errors::CalendarError;
use crate::interests::InterestSet;
use crate::services::calendar::{day_listing, window_or_year, CalendarQuery};
use crate::services::catalog::CatalogService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_list(start: Option<&str>, end: Option<&str>, filter: FilterArgs) -> Result<()> {
    let window = window_or_year(start, end, today())?;
    info!("Listing tournaments {} .. {}", window.start, window.end);
    let query = CalendarQuery::new(window, filter.into());
    show_entries(|catalog| query.run(catalog))
}

pub fn handle_day(date: &str, filter: FilterArgs) -> Result<()> {
    dates::parse_key(date)?;
    let filter = TournamentFilter::from(filter);
    show_entries(|catalog| day_listing(catalog, date, &filter))
}

pub fn handle_calendar(
    view: Option<CalendarView>,
    anchor: Option<&str>,
    offset: i32,
    filter: FilterArgs,
) -> Result<()> {
    let config = AppConfig::from_env();
    let view = view.unwrap_or(config.calendar.default_view);
    let anchor = match anchor {
        Some(anchor) => dates::parse_key(anchor)?,
        None => today(),
    };
    let query = CalendarQuery::for_view(view, anchor, offset, TournamentFilter::from(filter))?;
    info!("Calendar page {} .. {}", query.window.start, query.window.end);

    let service = open_catalog_service(&config)?;
    let catalog = load_catalog(&service)?;
    let days = query.run_grouped(&catalog).context("Failed to expand tournament catalog")?;
    let interests = InterestSet::load(service.cache())?;

    output::print_calendar(&days, &interests);
    Ok(())
}

pub fn handle_add(args: AddArgs) -> Result<()> {
    if !is_known_city(&args.city) {
        warn!("City {:?} is not one of the listed cities", args.city);
    }
    if !is_known_game(&args.game) {
        warn!("Game {:?} is not one of the listed games", args.game);
    }

    let config = AppConfig::from_env();
    let service = open_catalog_service(&config)?;
    let stored = service.submit(args.into_submission(today()))?;

    println!("Stored tournament {}", stored.id());
    Ok(())
}

pub fn handle_remove(id: &str) -> Result<()> {
    let config = AppConfig::from_env();
    let service = open_catalog_service(&config)?;

    if !service.remove(id)? {
        anyhow::bail!("No local tournament with id {}", id);
    }
    println!("Removed tournament {}", id);
    Ok(())
}

pub fn handle_interest(id: &str) -> Result<()> {
    let config = AppConfig::from_env();
    let cache = cache::Cache::new(&config.storage.cache_dir)?;

    let mut interests = InterestSet::load(&cache)?;
    let marked = interests.toggle(id);
    interests.save(&cache)?;

    if marked {
        println!("Marked {} as interesting", id);
    } else {
        println!("Unmarked {}", id);
    }
    Ok(())
}

pub fn handle_interests() -> Result<()> {
    let config = AppConfig::from_env();
    let cache = cache::Cache::new(&config.storage.cache_dir)?;
    let interests = InterestSet::load(&cache)?;

    if interests.is_empty() {
        println!("No tournaments marked");
    }
    for id in interests.iter() {
        println!("{}", id);
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn show_entries<F>(list: F) -> Result<()>
where
    F: FnOnce(&Catalog) -> std::result::Result<Vec<CalendarEntry>, CalendarError>,
{
    let config = AppConfig::from_env();
    let service = open_catalog_service(&config)?;
    let catalog = load_catalog(&service)?;
    let entries = list(&catalog).context("Failed to expand tournament catalog")?;
    let interests = InterestSet::load(service.cache())?;

    output::print_entries(&entries, &interests);
    Ok(())
}

fn open_catalog_service(config: &AppConfig) -> Result<CatalogService> {
    let pool = database::create_pool(&config.storage.database_path)?;
    CatalogService::new(config, pool)
}

fn load_catalog(service: &CatalogService) -> Result<Catalog> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(service.load())
}

/// Local calendar date; only the outer layer consults the clock
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
