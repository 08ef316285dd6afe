use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Select, Text};
use weather_now_core::{Config, Event, Lookup, Session, State, Status, transition};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-now", version, about = "Current weather for any city, via Open-Meteo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Paris".
        city: String,
    },

    /// Search repeatedly from an interactive prompt.
    Interactive,

    /// Change service endpoints or timeout. Prompts when no flag is given.
    Configure {
        #[arg(long)]
        geocoding_url: Option<String>,

        #[arg(long)]
        forecast_url: Option<String>,

        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

const CHECK_WEATHER: &str = "Check weather";
const INCREMENT: &str = "Increment";
const QUIT: &str = "Quit";

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { city } => {
                let mut session = open_session()?;
                let state = session.submit(&city).await;

                if state.status() == Status::Error {
                    bail!("{}", state.message().unwrap_or_default());
                }
                println!("{}", render::state(state));
            }
            Command::Interactive => {
                let mut session = open_session()?;
                interactive(&mut session).await?;
            }
            Command::Configure {
                geocoding_url,
                forecast_url,
                timeout_secs,
            } => {
                let mut config = Config::load()?;
                let overrides = Overrides {
                    geocoding_url,
                    forecast_url,
                    timeout_secs,
                };

                if overrides.is_empty() {
                    prompt_config(&mut config)?;
                } else {
                    overrides.apply(&mut config);
                }

                let path = config.save()?;
                println!("Saved configuration to {}", path.display());
            }
        }

        Ok(())
    }
}

fn open_session() -> anyhow::Result<Session> {
    let config = Config::load()?;
    tracing::debug!(?config, "configuration loaded");

    let lookup =
        Lookup::open_meteo(&config).context("Failed to set up weather services")?;
    Ok(Session::new(lookup))
}

async fn interactive(session: &mut Session) -> anyhow::Result<()> {
    println!("Weather Now\n");
    println!("{}", render::state(session.state()));

    loop {
        println!("\n{}", render::counter(session.state().clicks()));

        let menu = Select::new("What next?", vec![CHECK_WEATHER, INCREMENT, QUIT]);
        let choice = match menu.prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match choice {
            CHECK_WEATHER => {
                let prompt = Text::new("City name:").with_placeholder("Search for a city");
                let query = match prompt.prompt() {
                    Ok(query) => query,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(InquireError::OperationInterrupted) => break,
                    Err(err) => return Err(err.into()),
                };

                let pending = waiting(session, &query);
                if pending.status() == Status::Loading {
                    println!("{}", render::state(&pending));
                }
                let state = session.submit(&query).await;
                println!("{}", render::state(state));
            }
            INCREMENT => {
                session.increment();
            }
            _ => break,
        }
    }

    Ok(())
}

/// What the page shows while `query` is being looked up.
fn waiting(session: &Session, query: &str) -> State {
    transition(session.state().clone(), Event::Submit(query.to_owned()))
}

fn prompt_config(config: &mut Config) -> anyhow::Result<()> {
    let geocoding_url = Text::new("Geocoding API URL:")
        .with_default(&config.geocoding_url)
        .prompt()?;
    let forecast_url = Text::new("Forecast API URL:")
        .with_default(&config.forecast_url)
        .prompt()?;
    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;

    Overrides {
        geocoding_url: Some(geocoding_url),
        forecast_url: Some(forecast_url),
        timeout_secs: Some(timeout_secs),
    }
    .apply(config);
    Ok(())
}

#[derive(Debug, Default)]
struct Overrides {
    geocoding_url: Option<String>,
    forecast_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl Overrides {
    fn is_empty(&self) -> bool {
        self.geocoding_url.is_none() && self.forecast_url.is_none() && self.timeout_secs.is_none()
    }

    fn apply(self, config: &mut Config) {
        if let Some(url) = self.geocoding_url {
            config.geocoding_url = url;
        }
        if let Some(url) = self.forecast_url {
            config.forecast_url = url;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
    }
}
