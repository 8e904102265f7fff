use std::fmt;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inquire::Select;
use metaweather_core::{Client, Config, Location, WeatherReport, WeatherSample};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "metaweather", version, about = "MetaWeather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pick a default location and remember it in the config file.
    Configure {
        /// Place name to search for, e.g. "london".
        query: String,
    },

    /// List every location matching a query.
    Search {
        /// Place name, or a "lat,long" pair for a coordinate search.
        query: String,
    },

    /// Show weather for a location.
    Show {
        /// Place name; if absent, uses the configured default location.
        query: Option<String>,

        /// Calendar date (YYYY-MM-DD); if absent, shows the current report.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        let client = Client::new(config.client_config());

        match self.command {
            Command::Configure { query } => configure(&client, config, &query).await,
            Command::Search { query } => search(&client, &query).await,
            Command::Show { query, date } => show(&client, &config, query.as_deref(), date).await,
        }
    }
}

struct LocationChoice(Location);

impl fmt::Display for LocationChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, woeid {})",
            self.0.title, self.0.location_type, self.0.woeid
        )
    }
}

async fn configure(client: &Client, mut config: Config, query: &str) -> anyhow::Result<()> {
    let mut locations = client.search_location(query).await?;
    if locations.is_empty() {
        bail!("No locations match {query:?}. Try a broader search term.");
    }

    let chosen = if locations.len() == 1 {
        locations.remove(0)
    } else {
        let options: Vec<LocationChoice> = locations.into_iter().map(LocationChoice).collect();
        Select::new("Which location?", options).prompt()?.0
    };

    println!(
        "Default location set to {} (woeid {}).",
        chosen.title, chosen.woeid
    );
    config.set_default_location(chosen.title, chosen.woeid);
    config.save()?;

    Ok(())
}

async fn search(client: &Client, query: &str) -> anyhow::Result<()> {
    // A comma means a "lat,long" pair; anything else is a name search.
    if let Some((latt, long)) = query.split_once(',') {
        let locations = client
            .search_location_by_latt_long(latt.trim(), long.trim())
            .await?;
        if locations.is_empty() {
            println!("No locations found near {query}.");
            return Ok(());
        }
        for location in &locations {
            println!(
                "{} ({}, woeid {}) at {}, {}m away",
                location.title,
                location.location_type,
                location.woeid,
                location.latt_long,
                location.distance,
            );
        }
    } else {
        let locations = client.search_location(query).await?;
        if locations.is_empty() {
            println!("No locations match {query:?}.");
            return Ok(());
        }
        for location in &locations {
            println!(
                "{} ({}, woeid {}) at {}",
                location.title, location.location_type, location.woeid, location.latt_long,
            );
        }
    }

    Ok(())
}

async fn show(
    client: &Client,
    config: &Config,
    query: Option<&str>,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let (title, woeid) = match query {
        Some(q) => {
            let locations = client.search_location(q).await?;
            let first = locations
                .into_iter()
                .next()
                .with_context(|| format!("No locations match {q:?}"))?;
            (first.title, first.woeid)
        }
        None => {
            let saved = config.default_location.as_ref().ok_or_else(|| {
                anyhow::anyhow!(
                    "No location given and no default configured.\n\
                     Hint: run `metaweather configure <place>` first."
                )
            })?;
            (saved.title.clone(), saved.woeid)
        }
    };

    match date {
        Some(date) => {
            let samples = client.weather_for_date(&woeid.to_string(), date).await?;
            if samples.is_empty() {
                println!("No weather data for {title} on {date}.");
                return Ok(());
            }
            println!("Weather for {title} on {date}:");
            for sample in &samples {
                print_sample(sample);
            }
        }
        None => {
            let report = client.current_weather(&woeid.to_string()).await?;
            if report.title.is_empty() {
                // The service signals an unknown woeid with an empty report.
                println!("No weather data available for {title} (woeid {woeid}).");
                return Ok(());
            }
            print_report(&report);
        }
    }

    Ok(())
}

fn print_report(report: &WeatherReport) {
    println!("{} ({})", report.title, report.timezone);
    for sample in &report.consolidated_weather {
        print_sample(sample);
    }
    if let (Some(rise), Some(set)) = (&report.sun_rise, &report.sun_set) {
        println!(
            "  sunrise {}, sunset {}",
            rise.format("%H:%M"),
            set.format("%H:%M")
        );
    }
}

fn print_sample(sample: &WeatherSample) {
    println!(
        "  {}: {}, {:.1}°C (min {:.1} / max {:.1}), wind {:.1} mph {}, humidity {}%",
        sample.applicable_date,
        sample.weather_state_name,
        sample.the_temp,
        sample.min_temp,
        sample.max_temp,
        sample.wind_speed,
        sample.wind_direction_compass,
        sample.humidity,
    );
}
