use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use weather_dash_core::{
    Config, Dashboard, DisplayState, LocationConfig, MapHandle, OsmMap, RenderSurface, Screen,
};

const HERE: &str = ":here";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dash", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    /// Config file to read instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Run without the map widget.
    #[arg(long, global = true)]
    pub no_map: bool,

    /// More log output on stderr (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the dashboard for a city.
    Show {
        /// City name; defaults to `default_city` from the config.
        city: Option<String>,
    },

    /// Show the dashboard for this device's position.
    Here {
        /// Latitude; overrides `[location]` from the config.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude; overrides `[location]` from the config.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// Search repeatedly; `:here` uses your location, an empty line or Esc quits.
    Interactive,
}

/// What one line typed at the interactive prompt asks for.
#[derive(Debug, PartialEq, Eq)]
enum Action<'a> {
    Quit,
    Locate,
    Search(&'a str),
}

impl<'a> Action<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => Action::Quit,
            HERE => Action::Locate,
            city => Action::Search(city),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Config::load_from(path)?
            }
            None => Config::load()?,
        };
        if self.no_map {
            config.map.enabled = false;
        }

        let command = self.command.unwrap_or(Command::Show { city: None });
        if let Command::Here { lat: Some(latitude), lon: Some(longitude) } = command {
            config.location = Some(LocationConfig { latitude, longitude });
        }

        tracing::debug!(?command, map = config.map.enabled, "starting dashboard");

        let map = MapHandle::init(Some(Box::new(OsmMap::new())), &config.map);
        let dashboard = Dashboard::from_config(&config, Screen::new(map));

        match command {
            Command::Show { city } => {
                let city = city.unwrap_or_else(|| config.default_city.clone());
                dashboard.search(&city).await;
            }
            Command::Here { .. } => dashboard.use_my_location().await,
            Command::Interactive => {
                interactive(&dashboard, &config.default_city).await?;
                return Ok(ExitCode::SUCCESS);
            }
        }

        draw(&dashboard);
        Ok(match dashboard.state() {
            DisplayState::Error(_) => ExitCode::FAILURE,
            _ => ExitCode::SUCCESS,
        })
    }
}

fn draw(dashboard: &Dashboard<Screen>) {
    println!("{}", *dashboard.surface());
}

async fn interactive(dashboard: &Dashboard<Screen>, default_city: &str) -> anyhow::Result<()> {
    dashboard.search(default_city).await;

    loop {
        draw(dashboard);

        let initial = dashboard.surface().search_text().to_string();
        let input = tokio::task::spawn_blocking(move || prompt(&initial))
            .await
            .context("Prompt task failed")??;

        let Some(line) = input else {
            return Ok(());
        };

        match Action::parse(&line) {
            Action::Quit => return Ok(()),
            Action::Locate => dashboard.use_my_location().await,
            Action::Search(city) => {
                dashboard.surface().set_search_text(city);
                dashboard.search(city).await;
            }
        }
    }
}

/// `None` when the user cancels with Esc or Ctrl-C.
fn prompt(initial: &str) -> anyhow::Result<Option<String>> {
    let answer = Text::new("City:")
        .with_initial_value(initial)
        .with_help_message("Enter to search, :here for your location, empty line or Esc to quit")
        .prompt();

    match answer {
        Ok(line) => Ok(Some(line)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("Failed to read search input"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_has_no_subcommand() {
        let cli = Cli::try_parse_from(["weather-dash"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.no_map);
    }

    #[test]
    fn here_accepts_negative_coordinates() {
        let cli =
            Cli::try_parse_from(["weather-dash", "here", "--lat", "51.5", "--lon", "-0.12"]).unwrap();
        match cli.command {
            Some(Command::Here { lat, lon }) => {
                assert_eq!(lat, Some(51.5));
                assert_eq!(lon, Some(-0.12));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn here_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["weather-dash", "here", "--lat", "51.5"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["weather-dash", "show", "Paris", "--no-map", "-vv"]).unwrap();
        assert!(cli.no_map);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Command::Show { city: Some(ref c) }) if c == "Paris"));
    }

    #[test]
    fn empty_prompt_line_quits() {
        assert_eq!(Action::parse(""), Action::Quit);
        assert_eq!(Action::parse("   \t"), Action::Quit);
    }

    #[test]
    fn here_keyword_locates() {
        assert_eq!(Action::parse(":here"), Action::Locate);
        assert_eq!(Action::parse("  :here "), Action::Locate);
    }

    #[test]
    fn other_lines_search_trimmed_city() {
        assert_eq!(Action::parse("Paris"), Action::Search("Paris"));
        assert_eq!(Action::parse("  New York "), Action::Search("New York"));
        assert_eq!(Action::parse(":there"), Action::Search(":there"));
    }
}
