use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    app::events::{AppEvent, start_refresh_task},
    cli::{Cli, IconMode},
    data::{OpenWeatherClient, fetch_bundle},
    domain::{
        forecast::DaySummary,
        weather::{FetchTarget, Units, WeatherBundle},
    },
};

mod input;

use input::{command_char, is_query_char};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Loading,
    Ready,
    /// Nothing to show: the last fetch found no data, or the user cleared it.
    Empty,
    Quit,
}

/// Which midnight splits the five-day panel into days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayZone {
    Viewer,
    Location,
}

impl DayZone {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Viewer => Self::Location,
            Self::Location => Self::Viewer,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Viewer => "local time",
            Self::Location => "location time",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub open: bool,
    pub query: String,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub target: Option<FetchTarget>,
    pub weather: Option<WeatherBundle>,
    /// Five-day panel rows, rebuilt whenever the bundle or day zone changes.
    pub days: Vec<DaySummary>,
    pub units: Units,
    pub icon_mode: IconMode,
    pub day_zone: DayZone,
    pub fetch_generation: u64,
    pub fetch_in_flight: bool,
    pub search: SearchState,
    pub status: Option<String>,
    pub last_success: Option<DateTime<Utc>>,
    fetch_task: Option<JoinHandle<()>>,
    client: Option<OpenWeatherClient>,
}

impl AppState {
    pub fn new(cli: &Cli) -> Self {
        Self {
            mode: AppMode::Loading,
            target: None,
            weather: None,
            days: Vec::new(),
            units: cli.units.into(),
            icon_mode: cli.icon_mode(),
            day_zone: if cli.location_time {
                DayZone::Location
            } else {
                DayZone::Viewer
            },
            fetch_generation: 0,
            fetch_in_flight: false,
            search: SearchState::default(),
            status: None,
            last_success: None,
            fetch_task: None,
            client: None,
        }
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => {
                cli.validate()?;
                self.client = Some(OpenWeatherClient::new(cli.api_config()?)?);
                start_refresh_task(tx.clone(), cli.refresh_interval);
                self.switch_target(cli.initial_target(), tx);
            }
            AppEvent::TickRefresh => {
                if !self.fetch_in_flight
                    && let Some(target) = self.target.clone()
                {
                    self.start_fetch(target, tx);
                }
            }
            AppEvent::Input(event) => self.handle_input(event, tx).await?,
            AppEvent::FetchCompleted { generation, bundle } => {
                if generation == self.fetch_generation {
                    self.apply_bundle(*bundle);
                } else {
                    debug!(
                        generation,
                        latest = self.fetch_generation,
                        "discarding stale fetch result"
                    );
                }
            }
            AppEvent::Quit => {
                self.mode = AppMode::Quit;
            }
        }

        Ok(())
    }

    /// Installs a finished fetch. A bundle with no datasets puts the app in
    /// `Empty` mode and drops whatever was shown before.
    pub fn apply_bundle(&mut self, bundle: WeatherBundle) {
        self.fetch_in_flight = false;
        self.fetch_task = None;
        if bundle.is_empty() {
            info!(place = %bundle.target, "fetch returned no data");
            self.status = Some(format!("No weather data for {}", bundle.target));
            self.weather = None;
            self.days.clear();
            self.mode = AppMode::Empty;
            return;
        }

        info!(place = %bundle.title(), "weather updated");
        self.last_success = Some(bundle.fetched_at);
        self.status = None;
        self.weather = Some(bundle);
        self.rebuild_days();
        self.mode = AppMode::Ready;
    }

    pub fn rebuild_days(&mut self) {
        self.days = match (&self.weather, self.day_zone) {
            (None, _) => Vec::new(),
            (Some(bundle), DayZone::Viewer) => bundle.five_day(&Local),
            (Some(bundle), DayZone::Location) => bundle.five_day(&location_zone(bundle)),
        };
    }

    /// Today according to the zone the panel is bucketed in.
    #[must_use]
    pub fn is_today(&self, day: &DaySummary) -> bool {
        let now = Utc::now();
        match (&self.weather, self.day_zone) {
            (Some(bundle), DayZone::Location) => {
                day.is_today(&now.with_timezone(&location_zone(bundle)))
            }
            _ => day.is_today(&now.with_timezone(&Local)),
        }
    }

    /// `"Tue 10"` for the day's start in the bucketing zone.
    #[must_use]
    pub fn day_label(&self, day: &DaySummary) -> String {
        const FORMAT: &str = "%a %d";
        match (&self.weather, self.day_zone) {
            (Some(bundle), DayZone::Location) => day
                .date
                .with_timezone(&location_zone(bundle))
                .format(FORMAT)
                .to_string(),
            _ => day.date.with_timezone(&Local).format(FORMAT).to_string(),
        }
    }

    fn switch_target(&mut self, target: FetchTarget, tx: &mpsc::Sender<AppEvent>) {
        info!(place = %target, "switching location");
        self.target = Some(target.clone());
        self.weather = None;
        self.days.clear();
        self.status = None;
        self.mode = AppMode::Loading;
        self.start_fetch(target, tx);
    }

    /// Cancels any fetch still running and starts a new generation.
    fn start_fetch(&mut self, target: FetchTarget, tx: &mpsc::Sender<AppEvent>) {
        let Some(client) = self.client.clone() else {
            warn!("fetch requested before the client was configured");
            return;
        };
        self.cancel_fetch();
        self.fetch_generation += 1;
        self.fetch_in_flight = true;
        if self.weather.is_none() {
            self.mode = AppMode::Loading;
        }

        let generation = self.fetch_generation;
        let tx = tx.clone();
        debug!(generation, place = %target, "fetch started");
        self.fetch_task = Some(tokio::spawn(async move {
            let bundle = fetch_bundle(&client, target).await;
            let _ = tx
                .send(AppEvent::FetchCompleted {
                    generation,
                    bundle: Box::new(bundle),
                })
                .await;
        }));
    }

    fn cancel_fetch(&mut self) {
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
        self.fetch_in_flight = false;
    }

    fn clear(&mut self) {
        self.cancel_fetch();
        // Results of anything already sent are now stale.
        self.fetch_generation += 1;
        self.target = None;
        self.weather = None;
        self.days.clear();
        self.status = Some("Cleared".to_string());
        self.mode = AppMode::Empty;
    }

    async fn handle_input(&mut self, event: Event, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if self.search.open {
            self.handle_search_key(key, tx);
            return Ok(());
        }

        if key.code == KeyCode::Esc {
            tx.send(AppEvent::Quit).await?;
            return Ok(());
        }
        match command_char(key) {
            Some('q') => tx.send(AppEvent::Quit).await?,
            Some('r') => {
                if let Some(target) = self.target.clone() {
                    self.start_fetch(target, tx);
                }
            }
            Some('f') => self.units = Units::Fahrenheit,
            Some('c') => self.units = Units::Celsius,
            Some('t') => {
                self.day_zone = self.day_zone.toggled();
                self.rebuild_days();
            }
            Some('/') => {
                self.search.open = true;
                self.search.query.clear();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) {
        match key.code {
            KeyCode::Esc => {
                self.search.open = false;
                self.search.query.clear();
            }
            KeyCode::Backspace => {
                self.search.query.pop();
            }
            KeyCode::Enter => {
                self.search.open = false;
                let query = std::mem::take(&mut self.search.query);
                match FetchTarget::from_query(&query) {
                    Some(target) => self.switch_target(target, tx),
                    None => self.clear(),
                }
            }
            KeyCode::Char(ch) if is_query_char(ch) => self.search.query.push(ch),
            _ => {}
        }
    }
}

/// The forecast city's fixed offset, falling back to the current-weather
/// payload and then UTC.
#[must_use]
pub fn location_zone(bundle: &WeatherBundle) -> FixedOffset {
    let offset_secs = bundle
        .forecast
        .as_ref()
        .map(|series| series.utc_offset_secs)
        .or_else(|| bundle.current.as_ref().map(|c| c.utc_offset_secs))
        .unwrap_or(0);
    FixedOffset::east_opt(offset_secs).unwrap_or_else(|| Utc.fix())
}
