use clap::{Parser, Subcommand};
use inquire::Text;

use weather_core::WeatherSnapshot;

use crate::client::ApiClient;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather lookup client")]
pub struct Cli {
    /// Base URL of the weather service.
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    pub server: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city and exit.
    Show {
        /// City name.
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let client = ApiClient::new(self.server);

        match self.command {
            Some(Command::Show { city }) => match client.get_weather(&city).await {
                Ok(snapshot) => println!("{}", render_snapshot(&snapshot)),
                Err(message) => {
                    eprintln!("{message}");
                    std::process::exit(1);
                }
            },
            None => interactive_loop(&client).await?,
        }

        Ok(())
    }
}

/// Prompt-submit-render loop. An empty submission ends the session; each
/// non-blank one fires a request and renders either the snapshot or a single
/// error line before prompting again.
async fn interactive_loop(client: &ApiClient) -> anyhow::Result<()> {
    loop {
        let input = Text::new("City:")
            .with_help_message("Enter a city name, or leave empty to quit")
            .prompt()?;

        let city = input.trim();
        if city.is_empty() {
            return Ok(());
        }

        println!("Fetching weather for {city}...");
        match client.get_weather(city).await {
            Ok(snapshot) => println!("{}", render_snapshot(&snapshot)),
            Err(message) => println!("{message}"),
        }
    }
}

fn render_snapshot(snapshot: &WeatherSnapshot) -> String {
    let mut out = format!(
        "{} ({})\n  {}",
        snapshot.location_name, snapshot.provider, snapshot.condition_summary
    );

    if snapshot.condition_description != snapshot.condition_summary {
        out.push_str(&format!(" - {}", snapshot.condition_description));
    }

    out.push_str(&format!(
        "\n  Temperature: {:.0}\u{b0}C (feels like {:.0}\u{b0}C, min {:.0}\u{b0}C, max {:.0}\u{b0}C)\n  Humidity:    {}%\n  Wind:        {:.1} m/s",
        snapshot.temperature_c,
        snapshot.feels_like_c,
        snapshot.temperature_min_c,
        snapshot.temperature_max_c,
        snapshot.humidity_percent,
        snapshot.wind_speed_mps,
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            provider: "openweather".to_string(),
            location_name: "London".to_string(),
            temperature_c: 21.0,
            feels_like_c: 20.0,
            temperature_min_c: 18.0,
            temperature_max_c: 24.0,
            humidity_percent: 44,
            wind_speed_mps: 3.6,
            condition_summary: "Clouds".to_string(),
            condition_description: "scattered clouds".to_string(),
            icon_ref: String::new(),
        }
    }

    #[test]
    fn rendering_shows_all_reading_fields() {
        let text = render_snapshot(&snapshot());

        assert!(text.contains("London (openweather)"));
        assert!(text.contains("Clouds - scattered clouds"));
        assert!(text.contains("21\u{b0}C"));
        assert!(text.contains("min 18\u{b0}C, max 24\u{b0}C"));
        assert!(text.contains("44%"));
        assert!(text.contains("3.6 m/s"));
    }

    #[test]
    fn duplicate_description_is_not_repeated() {
        let mut snap = snapshot();
        snap.condition_summary = "Partly cloudy".to_string();
        snap.condition_description = "Partly cloudy".to_string();

        let text = render_snapshot(&snap);
        assert_eq!(text.matches("Partly cloudy").count(), 1);
    }

    #[test]
    fn cli_parses_show_subcommand() {
        let cli = Cli::try_parse_from(["weather", "show", "London"]).expect("parse");
        match cli.command {
            Some(Command::Show { city }) => assert_eq!(city, "London"),
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.server, DEFAULT_SERVER_URL);
    }

    #[test]
    fn cli_accepts_a_custom_server_url() {
        let cli = Cli::try_parse_from(["weather", "--server", "http://localhost:9999"])
            .expect("parse");
        assert_eq!(cli.server, "http://localhost:9999");
        assert!(cli.command.is_none());
    }
}
