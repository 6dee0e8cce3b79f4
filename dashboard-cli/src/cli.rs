use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use dashboard_core::{
    Config, CurrentConditions, Dashboard, HistoricalView, SearchOutcome, WeatherSource,
    config::API_BASE_ENV, insights::PredictorInputs, provider::source_from_config,
};
use inquire::{CustomType, InquireError, Select, Text};
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dash", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Predictor slider positions. Values outside a slider's range are clamped.
#[derive(Debug, Clone, Copy, Args)]
pub struct Sliders {
    /// Hypothetical humidity, 20-100 %.
    #[arg(long, default_value_t = 60.0)]
    pub humidity: f64,

    /// Hypothetical wind, 0-50 km/h.
    #[arg(long, default_value_t = 8.0)]
    pub wind: f64,

    /// Hypothetical cloud cover, 0-100 %.
    #[arg(long, default_value_t = 25.0)]
    pub cloud: f64,
}

impl Sliders {
    fn inputs(&self) -> PredictorInputs {
        PredictorInputs::new(self.humidity, self.wind, self.cloud)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch weather for a city and show the dashboard.
    Show {
        /// City name; defaults to the configured default city.
        city: Option<String>,

        #[command(flatten)]
        sliders: Sliders,

        /// Historical series to chart: monthly or seasonal.
        #[arg(long, default_value = "monthly", value_parser = parse_view)]
        view: HistoricalView,

        /// Print the active snapshot as JSON instead of the dashboard.
        #[arg(long)]
        json: bool,
    },

    /// Show the bundled preview data without contacting the backend.
    Preview {
        #[command(flatten)]
        sliders: Sliders,

        #[arg(long, default_value = "monthly", value_parser = parse_view)]
        view: HistoricalView,
    },

    /// Compute the comfort temperature for a base temperature and sliders.
    Predict {
        /// Base temperature in °C; 28 when omitted.
        #[arg(long, allow_hyphen_values = true)]
        temp: Option<f64>,

        #[command(flatten)]
        sliders: Sliders,
    },

    /// Search cities and adjust the predictor interactively.
    Explore,

    /// Set the backend URL, default city and timeout.
    Configure,

    /// Check whether the backend is reachable and healthy.
    Health,
}

fn parse_view(value: &str) -> Result<HistoricalView, String> {
    HistoricalView::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { city, sliders, view, json } => {
                let (config, source) = load_source()?;

                let mut dash = Dashboard::new();
                dash.set_predictor(sliders.inputs());
                dash.set_view(view);

                let city = city.unwrap_or_else(|| config.default_city().to_string());
                search(&mut dash, source.as_ref(), &city).await;

                if json {
                    let body = serde_json::to_string_pretty(dash.active())
                        .context("Failed to serialize snapshot")?;
                    println!("{body}");
                } else {
                    print!("{}", render::dashboard(&dash));
                }
            }
            Command::Preview { sliders, view } => {
                let mut dash = Dashboard::new();
                dash.set_predictor(sliders.inputs());
                dash.set_view(view);
                print!("{}", render::dashboard(&dash));
            }
            Command::Predict { temp, sliders } => {
                let current = CurrentConditions { temperature: temp, ..Default::default() };
                let predicted = sliders.inputs().predict_for(&current);
                println!("Comfort temperature: {predicted}°C");
            }
            Command::Explore => explore().await?,
            Command::Configure => configure()?,
            Command::Health => {
                let (config, source) = load_source()?;
                if source.is_healthy().await {
                    println!("Backend at {} is healthy", config.api_base());
                } else {
                    return Err(anyhow!("Backend at {} is not healthy", config.api_base()));
                }
            }
        }

        Ok(())
    }
}

fn load_source() -> anyhow::Result<(Config, Box<dyn WeatherSource>)> {
    let config = Config::load()?;
    debug!(api_base = config.api_base(), timeout = ?config.timeout(), "configuration loaded");
    let source = source_from_config(&config)?;
    Ok((config, source))
}

async fn search(dash: &mut Dashboard, source: &dyn WeatherSource, city: &str) -> SearchOutcome {
    eprintln!("Fetching atmospheric intelligence...");
    let outcome = dash.search(source, city).await;
    if outcome == SearchOutcome::Ignored {
        eprintln!("Enter a city name to search.");
    }
    outcome
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    Sliders,
    ToggleView,
    Quit,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Action::Search => "Search a city",
            Action::Sliders => "Adjust predictor sliders",
            Action::ToggleView => "Toggle monthly / seasonal history",
            Action::Quit => "Quit",
        })
    }
}

async fn explore() -> anyhow::Result<()> {
    let (config, source) = load_source()?;

    let mut dash = Dashboard::new();
    search(&mut dash, source.as_ref(), config.default_city()).await;
    print!("{}", render::dashboard(&dash));

    loop {
        let actions = vec![Action::Search, Action::Sliders, Action::ToggleView, Action::Quit];
        let action = match Select::new("What next?", actions).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        match action {
            Action::Search => {
                let Some(query) = cancellable(Text::new("City:").prompt())? else {
                    continue;
                };
                search(&mut dash, source.as_ref(), &query).await;
            }
            Action::Sliders => {
                let Some(inputs) = prompt_sliders(dash.predictor())? else {
                    continue;
                };
                dash.set_predictor(inputs);
            }
            Action::ToggleView => dash.set_view(dash.view().toggled()),
            Action::Quit => break,
        }

        print!("{}", render::dashboard(&dash));
    }

    Ok(())
}

fn prompt_sliders(current: PredictorInputs) -> anyhow::Result<Option<PredictorInputs>> {
    let Some(humidity) = cancellable(
        CustomType::<f64>::new("Humidity (%, 20-100):")
            .with_default(current.humidity())
            .prompt(),
    )?
    else {
        return Ok(None);
    };
    let Some(wind) = cancellable(
        CustomType::<f64>::new("Wind (km/h, 0-50):").with_default(current.wind()).prompt(),
    )?
    else {
        return Ok(None);
    };
    let Some(cloud) = cancellable(
        CustomType::<f64>::new("Cloud cover (%, 0-100):").with_default(current.cloud()).prompt(),
    )?
    else {
        return Ok(None);
    };

    Ok(Some(PredictorInputs::new(humidity, wind, cloud)))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if config.api_base() != config.stored_api_base() {
        eprintln!(
            "Note: {API_BASE_ENV} is set to {}; it overrides the saved backend URL.",
            config.api_base()
        );
    }

    let Some(api_base) =
        cancellable(Text::new("Backend URL:").with_default(config.stored_api_base()).prompt())?
    else {
        return Ok(());
    };
    let Some(city) =
        cancellable(Text::new("Default city:").with_default(config.default_city()).prompt())?
    else {
        return Ok(());
    };
    let timeout_default = config.timeout_secs.map(|t| t.to_string()).unwrap_or_default();
    let Some(timeout) = cancellable(
        Text::new("Request timeout in seconds (blank for none):")
            .with_initial_value(&timeout_default)
            .prompt(),
    )?
    else {
        return Ok(());
    };

    config.update(&api_base, &city, &timeout)?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

/// Treat Esc / Ctrl-C at a prompt as "go back" rather than an error.
fn cancellable<T>(result: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_parses_sliders_and_view() {
        let cli = Cli::try_parse_from([
            "weather-dash", "show", "Lisbon", "--humidity", "90", "--view", "seasonal",
        ])
        .unwrap();

        match cli.command {
            Command::Show { city, sliders, view, json } => {
                assert_eq!(city.as_deref(), Some("Lisbon"));
                assert_eq!(sliders.humidity, 90.0);
                assert_eq!(sliders.wind, 8.0);
                assert_eq!(view, HistoricalView::Seasonal);
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn show_city_is_optional() {
        let cli = Cli::try_parse_from(["weather-dash", "show"]).unwrap();
        assert!(matches!(cli.command, Command::Show { city: None, .. }));
    }

    #[test]
    fn unknown_view_is_rejected() {
        let err = Cli::try_parse_from(["weather-dash", "preview", "--view", "yearly"]).unwrap_err();
        assert!(err.to_string().contains("Unknown historical view"));
    }

    #[test]
    fn predict_accepts_negative_temperature() {
        let cli = Cli::try_parse_from(["weather-dash", "predict", "--temp", "-4"]).unwrap();
        match cli.command {
            Command::Predict { temp, sliders } => {
                assert_eq!(temp, Some(-4.0));
                assert_eq!(sliders.inputs(), PredictorInputs::default());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn sliders_clamp_out_of_range_values() {
        let sliders = Sliders { humidity: 5.0, wind: 70.0, cloud: 50.0 };
        let inputs = sliders.inputs();
        assert_eq!(inputs.humidity(), 20.0);
        assert_eq!(inputs.wind(), 50.0);
    }
}
