use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;

use weather_buddy::alerts::AlertBook;
use weather_buddy::assistant::{self, AssistantContext};
use weather_buddy::config::WeatherBuddyConfig;
use weather_buddy::insights::{ProfessionalReport, WardrobeCategory};
use weather_buddy::models::WeatherReport;
use weather_buddy::recommendations::plan_day;
use weather_buddy::service::{LocationQuery, WeatherService};
use weather_buddy::web::{self, AppState};
use weather_buddy::{WeatherBuddyError, cache, logging};

#[derive(Debug, Parser)]
#[command(
    name = "weather-buddy",
    version,
    about = "Professional weather intelligence: forecasts, workday scoring heuristics and a scripted assistant"
)]
struct Cli {
    /// Path to a config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the weather report and day-planning recommendations
    Report {
        /// Place name or "lat,lon" (defaults to the configured home location)
        #[arg(short, long)]
        location: Option<String>,
    },
    /// Show the professional briefing (commute, workability, travel, clothing)
    Brief {
        /// Place name or "lat,lon"
        #[arg(short, long)]
        location: Option<String>,
    },
    /// Ask the assistant a one-shot question
    Ask {
        /// The question
        message: String,
        /// Place to answer in the context of
        #[arg(short, long)]
        location: Option<String>,
    },
    /// Serve the HTTP API
    Serve {
        /// Port to listen on (overrides the configured default)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        match e.downcast_ref::<WeatherBuddyError>() {
            Some(buddy) => eprintln!("Error: {}", buddy.user_message()),
            None => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = WeatherBuddyConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;

    // A broken cache degrades to uncached fetches; it never blocks the CLI
    if let Err(e) = cache::init(config.cache_dir()) {
        warn!("Failed to open cache database: {e:#}");
    }

    let service = WeatherService::new(config.clone())?;

    match cli.command {
        Command::Report { location } => {
            let query = parse_location(location)?;
            let report = service.report(&query).await;
            print_report(&report);
        }
        Command::Brief { location } => {
            let query = parse_location(location)?;
            let report = service.report(&query).await;
            let professional = ProfessionalReport::generate(&report);
            print_brief(&report, &professional);
        }
        Command::Ask { message, location } => {
            match location {
                Some(location) => {
                    let query = LocationQuery::parse(&location)?;
                    let report = service.report(&query).await;
                    let professional = ProfessionalReport::generate(&report);
                    let reply = assistant::reply(
                        &message,
                        &AssistantContext {
                            weather: Some(&report),
                            professional: Some(&professional),
                        },
                    );
                    println!("{}: {reply}", assistant::ASSISTANT_NAME);
                }
                None => {
                    let reply = assistant::reply(&message, &AssistantContext::default());
                    println!("{}: {reply}", assistant::ASSISTANT_NAME);
                }
            }
        }
        Command::Serve { port } => {
            let port = port.unwrap_or(config.defaults.port);
            let state = Arc::new(AppState {
                service,
                alerts: AlertBook::new(),
            });
            web::run(state, port).await?;
        }
    }

    Ok(())
}

fn parse_location(location: Option<String>) -> Result<LocationQuery> {
    match location {
        Some(location) => LocationQuery::parse(&location),
        None => Ok(LocationQuery::Home),
    }
}

fn print_report(report: &WeatherReport) {
    println!("Weather Report for {}", report.location);
    if report.is_demo() {
        println!("(demo data - configure an API key for live weather)");
    }
    println!();

    let current = &report.current;
    println!(
        "Now: {} {} ({})",
        current.format_temperature(),
        current.condition,
        current.description
    );
    println!(
        "Feels like {:.0}°C  Humidity {}%  Wind {}  Pressure {} hPa  Visibility {:.0} km",
        current.feels_like,
        current.humidity,
        current.format_wind(),
        current.pressure,
        current.visibility
    );

    if !report.hourly.is_empty() {
        println!();
        println!("Next hours:");
        for entry in &report.hourly {
            println!(
                "  {}  {:>3.0}°C  {:<14} rain {:>3}%  wind {:>3.0} km/h",
                entry.format_time(),
                entry.temperature,
                entry.condition.label(),
                entry.precipitation_chance,
                entry.wind_speed
            );
        }
    }

    if !report.daily.is_empty() {
        println!();
        println!("Outlook:");
        for entry in &report.daily {
            println!(
                "  {:<9} {:>3.0}°C / {:>3.0}°C  {:<14} rain {:>3}%  - {}",
                entry.day_name,
                entry.high,
                entry.low,
                entry.condition.label(),
                entry.precipitation_chance,
                entry.description
            );
        }
    }

    let recommendations = plan_day(report);
    if !recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for rec in &recommendations {
            println!("  - {}: {}", rec.title, rec.description);
        }
    }
}

fn print_brief(report: &WeatherReport, professional: &ProfessionalReport) {
    println!("Professional Briefing for {}", report.location);
    if report.is_demo() {
        println!("(demo data - configure an API key for live weather)");
    }
    println!();

    let commute = &professional.commute_impact;
    println!("Commute: {}", commute.description);
    if commute.delay_minutes > 0 {
        println!("  Expected delay: {} minutes", commute.delay_minutes);
    }
    for rec in &commute.recommendations {
        println!("  - {rec}");
    }
    if !commute.affected_routes.is_empty() {
        println!("  Affected: {}", commute.affected_routes.join(", "));
    }

    let workability = &professional.workability_score;
    println!();
    println!(
        "Outdoor workability: {}/100 ({})",
        workability.score, workability.category
    );
    for rec in &workability.recommendations {
        println!("  - {rec}");
    }

    let travel = &professional.travel_impact;
    println!();
    println!(
        "Travel: flights {} / roads {} / transit {}",
        travel.flight_delay_risk, travel.road_conditions, travel.public_transport_impact
    );
    for rec in &travel.recommendations {
        println!("  - {rec}");
    }

    println!();
    for advice in &professional.clothing_recommendations {
        let profile = match advice.category {
            WardrobeCategory::Formal => "Business formal",
            WardrobeCategory::OutdoorWork => "Outdoor work",
            WardrobeCategory::BusinessCasual => "Business casual",
            WardrobeCategory::Travel => "Travel",
        };
        if advice.items.is_empty() && advice.accessories.is_empty() {
            continue;
        }
        println!("Wardrobe ({profile}):");
        if !advice.items.is_empty() {
            println!("  Wear: {}", advice.items.join(", "));
        }
        if !advice.accessories.is_empty() {
            println!("  Bring: {}", advice.accessories.join(", "));
        }
        if !advice.footwear.is_empty() {
            println!("  Footwear: {}", advice.footwear.join(", "));
        }
        for note in &advice.notes {
            println!("  Note: {note}");
        }
    }

    let air = &professional.air_quality;
    println!();
    println!("Air quality index: {} ({})", air.aqi, air.category);
    for rec in &air.health_recommendations {
        println!("  - {rec}");
    }

    let pollen = &professional.pollen;
    println!(
        "Pollen: {}/10 (tree {}, grass {}, weed {})",
        pollen.overall, pollen.tree, pollen.grass, pollen.weed
    );

    let uv = &professional.uv_exposure;
    println!(
        "UV index {:.0} ({}) - safe exposure around {} minutes",
        uv.index, uv.category, uv.safe_exposure_minutes
    );

    let indoor = &professional.working_conditions.indoor;
    println!();
    println!(
        "Indoor: aim for {:.0}°C at {}% humidity",
        indoor.temperature, indoor.humidity
    );
    for rec in &indoor.recommendations {
        println!("  - {rec}");
    }
}
