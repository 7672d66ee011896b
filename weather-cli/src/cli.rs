use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Select, Text};
use weather_now_core::{Config, Resolver, Session};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for any city")]
pub struct Cli {
    /// Log requests and pipeline steps to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure API endpoints and request timeout.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// Print the snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the quick-select example cities.
    Examples,

    /// Pick an example city or type one, repeatedly.
    Interactive,
}

const SEARCH_OTHER: &str = "Search another city…";
const QUIT: &str = "Quit";

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Show { city, json } => show(&config, &city.join(" "), json).await,
            Command::Examples => {
                for city in &config.example_cities {
                    println!("{city}");
                }
                Ok(())
            }
            Command::Interactive => interactive(&config).await,
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let geocoding_url =
        Text::new("Geocoding base URL:").with_default(&config.geocoding_url).prompt()?;
    let forecast_url =
        Text::new("Forecast base URL:").with_default(&config.forecast_url).prompt()?;

    let timeout = CustomType::<u64>::new("Request timeout in seconds (0 = none):")
        .with_default(config.timeout_secs.unwrap_or(0))
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;

    config.geocoding_url = geocoding_url;
    config.forecast_url = forecast_url;
    config.timeout_secs = (timeout > 0).then_some(timeout);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(config: &Config, city: &str, json: bool) -> anyhow::Result<()> {
    let resolver = Resolver::from_config(config)?;

    let Some(snapshot) = resolver.resolve(city).await? else {
        return Ok(());
    };

    if json {
        let out = serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?;
        println!("{out}");
    } else {
        println!("{}", render::snapshot(&snapshot));
        println!("\n{}", render::FOOTER);
    }

    Ok(())
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let resolver = Resolver::from_config(config)?;
    let mut session = Session::new();

    println!("Weather Now ☀️");
    println!("{}\n", render::session(&session));

    loop {
        let mut options: Vec<&str> = config.example_cities.iter().map(String::as_str).collect();
        options.extend([SEARCH_OTHER, QUIT]);

        let choice = match Select::new("City:", options).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let city = match choice {
            QUIT => break,
            SEARCH_OTHER => match Text::new("Enter city name:").prompt() {
                Ok(text) => text,
                Err(InquireError::OperationCanceled) => continue,
                Err(InquireError::OperationInterrupted) => break,
                Err(e) => return Err(e.into()),
            },
            example => example.to_string(),
        };

        if session.search(&resolver, &city).await {
            println!("\n{}\n", render::session(&session));
        }
    }

    println!("{}", render::FOOTER);
    Ok(())
}
