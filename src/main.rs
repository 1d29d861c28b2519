use std::{env, fs};

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;

use wird_calendar::{salawat_target, AthanPlus, Feed, PrayerSlot};

mod cli;

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "wird_calendar=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup_logging();

    let args = cli::parse(env::args().skip(1).collect());
    let config = args.config();

    let source = AthanPlus::new(&config).context("Failed to build HTTP client")?;
    let today = Utc::now().with_timezone(&config.timezone).date_naive();

    info!(
        "Fetching prayer times for {} days from {today}",
        config.days_ahead
    );
    let feed = Feed::collect(&config, &source, today)
        .await
        .context("No prayer times collected, check network or masjid id")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&feed.events)?);
        return Ok(());
    }

    let ics = feed.to_ics(&config, Utc::now());

    if let Some(parent) = args.output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&args.output, ics)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!("Written {}", args.output.display());
    info!("Total events: {}", feed.events.len());

    if let (Some(first), Some(event)) = (feed.first_day(), feed.events.first()) {
        info!(
            "Sanity check {} ({}): Fajr {}, {} starts {}, salawat target {}",
            first.date,
            first.date.format("%A"),
            first.time(PrayerSlot::Fajr),
            event.title,
            event.start.format("%H:%M"),
            salawat_target(first.date)
        );
    }

    Ok(())
}
