//! In-memory dashboard session: which snapshot is shown, whether a search
//! is running, the last error, and the predictor sliders.
//!
//! Derived values are never stored. Each accessor recomputes from the
//! active snapshot and the current inputs.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use tracing::{debug, info, warn};

use crate::{
    chart::{self, AreaChart, ChartError, LineChart},
    codes::{self, Tone},
    fallback::fallback_snapshot,
    insights::{self, PanelMetrics, PredictorInputs, Recommendation},
    model::{ClimatePoint, HistoricalView, WeatherSnapshot},
    provider::{FetchError, WeatherSource},
};

/// One outstanding request's share of the loading state, released on drop.
#[derive(Debug)]
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn acquire(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Handle for one issued search. Results are only applied if their ticket
/// is the most recent one issued.
///
/// Dropping a ticket, completed or not, ends its part of the loading state.
#[derive(Debug)]
#[must_use = "an unfinished ticket keeps the dashboard loading until dropped"]
pub struct Ticket {
    seq: u64,
    city: String,
    _in_flight: InFlight,
}

impl Ticket {
    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query was blank; nothing was fetched.
    Ignored,
    /// A fresh snapshot is now shown.
    Applied,
    /// The fetch failed; the previous snapshot stays and the error is recorded.
    Failed,
    /// A newer search was issued meanwhile, so the result was dropped.
    Stale,
}

#[derive(Debug)]
pub struct Dashboard {
    live: Option<WeatherSnapshot>,
    fallback: WeatherSnapshot,
    is_live: bool,
    error: Option<String>,
    predictor: PredictorInputs,
    view: HistoricalView,
    last_issued: u64,
    in_flight: Arc<AtomicUsize>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            live: None,
            fallback: fallback_snapshot(),
            is_live: false,
            error: None,
            predictor: PredictorInputs::default(),
            view: HistoricalView::default(),
            last_issued: 0,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The snapshot to render: the last good live one, else the fallback.
    pub fn active(&self) -> &WeatherSnapshot {
        self.live.as_ref().unwrap_or(&self.fallback)
    }

    /// True only while the shown data came from the latest successful search.
    pub fn is_live(&self) -> bool {
        self.is_live
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn predictor(&self) -> PredictorInputs {
        self.predictor
    }

    pub fn set_predictor(&mut self, inputs: PredictorInputs) {
        self.predictor = inputs;
    }

    pub fn view(&self) -> HistoricalView {
        self.view
    }

    pub fn set_view(&mut self, view: HistoricalView) {
        self.view = view;
    }

    /// Start a search. Returns `None` for a blank query, which must not
    /// reach the network.
    pub fn begin(&mut self, query: &str) -> Option<Ticket> {
        let city = query.trim();
        if city.is_empty() {
            return None;
        }

        self.last_issued += 1;
        self.error = None;

        debug!(seq = self.last_issued, city, "search issued");
        Some(Ticket {
            seq: self.last_issued,
            city: city.to_string(),
            _in_flight: InFlight::acquire(&self.in_flight),
        })
    }

    /// Finish a search. Consumes the ticket, so its share of the loading
    /// state is released even when the result itself is discarded.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<WeatherSnapshot, FetchError>,
    ) -> SearchOutcome {
        if ticket.seq != self.last_issued {
            debug!(
                seq = ticket.seq,
                latest = self.last_issued,
                city = %ticket.city,
                "discarding stale weather response"
            );
            return SearchOutcome::Stale;
        }

        match result {
            Ok(snapshot) => {
                info!(city = %snapshot.location.city, country = %snapshot.location.country, "live weather loaded");
                self.live = Some(snapshot);
                self.is_live = true;
                self.error = None;
                SearchOutcome::Applied
            }
            Err(err) => {
                warn!(kind = err.kind(), city = %ticket.city, error = %err, "weather fetch failed");
                self.is_live = false;
                self.error = Some(err.to_string());
                SearchOutcome::Failed
            }
        }
    }

    /// Issue a search against `source` and apply its result.
    pub async fn search(&mut self, source: &dyn WeatherSource, query: &str) -> SearchOutcome {
        let Some(ticket) = self.begin(query) else {
            return SearchOutcome::Ignored;
        };
        let result = source.fetch_weather(ticket.city()).await;
        self.complete(ticket, result)
    }

    pub fn tone(&self) -> Tone {
        codes::tone_or_default(self.active().current.weathercode)
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        insights::recommend(&self.active().current)
    }

    pub fn predicted_temperature(&self) -> i64 {
        self.predictor.predict_for(&self.active().current)
    }

    pub fn metrics(&self) -> PanelMetrics {
        let active = self.active();
        PanelMetrics::from_snapshot(&active.current, &active.forecast)
    }

    pub fn forecast_chart(&self) -> Result<LineChart, ChartError> {
        chart::line_chart(&chart::forecast_highs(&self.active().forecast))
    }

    pub fn historical_series(&self) -> &[ClimatePoint] {
        self.active().historical.series(self.view)
    }

    pub fn historical_chart(&self) -> Result<AreaChart, ChartError> {
        chart::area_chart_with_gaps(&chart::climate_temps(self.historical_series()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentConditions, Location};
    use async_trait::async_trait;
    use std::{sync::Mutex, time::Duration};

    fn snapshot(city: &str, temperature: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            location: Location {
                city: city.to_string(),
                country: "Testland".to_string(),
                timezone: "UTC".to_string(),
            },
            current: CurrentConditions {
                temperature: Some(temperature),
                humidity: Some(85.0),
                weathercode: Some(95),
                ..Default::default()
            },
            forecast: Vec::new(),
            hourly_trend: Vec::new(),
            historical: Default::default(),
            model_forecast: Vec::new(),
            dataset_size: None,
        }
    }

    /// Answers with queued results and records every city it was asked for.
    #[derive(Debug, Default)]
    struct ScriptedSource {
        replies: Mutex<Vec<Result<WeatherSnapshot, FetchError>>>,
        asked: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn replying(replies: Vec<Result<WeatherSnapshot, FetchError>>) -> Self {
            Self { replies: Mutex::new(replies), asked: Mutex::default() }
        }
    }

    #[async_trait]
    impl WeatherSource for ScriptedSource {
        async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
            self.asked.lock().unwrap().push(city.to_string());
            self.replies.lock().unwrap().remove(0)
        }

        async fn is_healthy(&self) -> bool {
            true
        }
    }

    #[test]
    fn starts_on_fallback() {
        let dash = Dashboard::new();
        assert_eq!(dash.active().location.city, "New Delhi");
        assert!(!dash.is_live());
        assert!(!dash.is_loading());
        assert_eq!(dash.error(), None);
    }

    #[test]
    fn blank_query_is_ignored() {
        let mut dash = Dashboard::new();
        assert!(dash.begin("   ").is_none());
        assert!(!dash.is_loading());
    }

    #[test]
    fn loading_spans_the_request() {
        let mut dash = Dashboard::new();
        let ticket = dash.begin("  Paris ").unwrap();
        assert_eq!(ticket.city(), "Paris");
        assert!(dash.is_loading());

        dash.complete(ticket, Err(FetchError::Network("offline".into())));
        assert!(!dash.is_loading());
    }

    #[test]
    fn dropping_an_unfinished_ticket_ends_loading() {
        let mut dash = Dashboard::new();
        let first = dash.begin("Paris").unwrap();
        let second = dash.begin("Tokyo").unwrap();

        drop(first);
        assert!(dash.is_loading());

        drop(second);
        assert!(!dash.is_loading());
    }

    #[test]
    fn success_replaces_snapshot_and_clears_error() {
        let mut dash = Dashboard::new();

        let t = dash.begin("Paris").unwrap();
        dash.complete(t, Err(FetchError::from_response(500, "")));
        assert_eq!(dash.error(), Some(crate::provider::GENERIC_FAILURE));

        let t = dash.begin("Paris").unwrap();
        assert_eq!(dash.complete(t, Ok(snapshot("Paris", 12.0))), SearchOutcome::Applied);

        assert!(dash.is_live());
        assert_eq!(dash.error(), None);
        assert_eq!(dash.active().location.city, "Paris");
        assert_eq!(dash.tone(), Tone::Stormy);
    }

    #[test]
    fn failure_keeps_last_good_snapshot() {
        let mut dash = Dashboard::new();

        let t = dash.begin("Paris").unwrap();
        dash.complete(t, Ok(snapshot("Paris", 12.0)));

        let t = dash.begin("Atlantis").unwrap();
        let outcome = dash.complete(t, Err(FetchError::from_response(404, "City not found")));

        assert_eq!(outcome, SearchOutcome::Failed);
        assert!(!dash.is_live());
        assert_eq!(dash.error(), Some("City not found"));
        assert_eq!(dash.active().location.city, "Paris");
    }

    #[test]
    fn older_response_cannot_overwrite_newer_search() {
        let mut dash = Dashboard::new();

        let first = dash.begin("Paris").unwrap();
        let second = dash.begin("Tokyo").unwrap();
        assert!(second.seq() > first.seq());

        assert_eq!(dash.complete(second, Ok(snapshot("Tokyo", 18.0))), SearchOutcome::Applied);
        assert!(dash.is_loading(), "first request is still outstanding");

        assert_eq!(dash.complete(first, Ok(snapshot("Paris", 12.0))), SearchOutcome::Stale);
        assert!(!dash.is_loading());
        assert_eq!(dash.active().location.city, "Tokyo");
    }

    #[test]
    fn stale_failure_does_not_record_error() {
        let mut dash = Dashboard::new();

        let first = dash.begin("Paris").unwrap();
        let second = dash.begin("Tokyo").unwrap();

        dash.complete(second, Ok(snapshot("Tokyo", 18.0)));
        dash.complete(first, Err(FetchError::Network("reset".into())));

        assert!(dash.is_live());
        assert_eq!(dash.error(), None);
    }

    #[test]
    fn derived_values_follow_inputs() {
        let mut dash = Dashboard::new();
        assert_eq!(dash.predicted_temperature(), 31);

        dash.set_predictor(PredictorInputs::default().with_wind(0.0));
        assert_eq!(dash.predicted_temperature(), 32);

        let t = dash.begin("Paris").unwrap();
        dash.complete(t, Ok(snapshot("Paris", 12.0)));
        assert_eq!(dash.predicted_temperature(), 12);
        assert_eq!(dash.recommendations()[0].label, "Hydrate often");
    }

    #[test]
    fn charts_degrade_on_empty_series() {
        let mut dash = Dashboard::new();
        assert!(dash.forecast_chart().is_ok());
        assert!(dash.historical_chart().is_ok());

        let t = dash.begin("Paris").unwrap();
        dash.complete(t, Ok(snapshot("Paris", 12.0)));

        assert_eq!(dash.forecast_chart(), Err(ChartError::NoData));
        assert_eq!(dash.historical_chart(), Err(ChartError::NoData));
    }

    #[test]
    fn view_switches_historical_series() {
        let mut dash = Dashboard::new();
        assert_eq!(dash.historical_series().len(), 12);

        dash.set_view(HistoricalView::Seasonal);
        assert_eq!(dash.historical_series().len(), 4);
        assert_eq!(dash.historical_series()[0].label, "Cool");
    }

    #[test]
    fn historical_chart_columns_follow_series_rows() {
        let month = |label: &str, temp| ClimatePoint { label: label.into(), temp, rain: None };
        let mut snap = snapshot("Reykjavik", 2.0);
        snap.historical.monthly = vec![
            month("Jan", Some(-1.0)),
            month("Feb", None),
            month("Mar", Some(1.0)),
            month("Apr", Some(3.0)),
            month("May", None),
        ];

        let mut dash = Dashboard::new();
        let t = dash.begin("Reykjavik").unwrap();
        dash.complete(t, Ok(snap));

        let chart = dash.historical_chart().unwrap();
        let columns: Vec<f64> = chart.outline.iter().map(|p| p.x).collect();
        assert_eq!(columns, vec![0.0, 50.0, 75.0]);
        assert_eq!(dash.historical_series().len(), 5);
        assert_eq!((chart.min, chart.max), (-1.0, 3.0));
    }

    #[tokio::test]
    async fn search_fetches_trimmed_city() {
        let source = ScriptedSource::replying(vec![Ok(snapshot("Oslo", 3.0))]);
        let mut dash = Dashboard::new();

        assert_eq!(dash.search(&source, "  Oslo  ").await, SearchOutcome::Applied);
        assert_eq!(*source.asked.lock().unwrap(), vec!["Oslo".to_string()]);
        assert!(!dash.is_loading());
    }

    #[tokio::test]
    async fn blank_search_never_calls_source() {
        let source = ScriptedSource::default();
        let mut dash = Dashboard::new();

        assert_eq!(dash.search(&source, "\t ").await, SearchOutcome::Ignored);
        assert!(source.asked.lock().unwrap().is_empty());
    }

    /// Never answers.
    #[derive(Debug)]
    struct SilentSource;

    #[async_trait]
    impl WeatherSource for SilentSource {
        async fn fetch_weather(&self, _city: &str) -> Result<WeatherSnapshot, FetchError> {
            std::future::pending().await
        }

        async fn is_healthy(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn abandoned_search_does_not_leave_loading_set() {
        let mut dash = Dashboard::new();

        let waited =
            tokio::time::timeout(Duration::from_millis(20), dash.search(&SilentSource, "Oslo")).await;

        assert!(waited.is_err(), "search against a silent backend should time out");
        assert!(!dash.is_loading());
        assert!(!dash.is_live());
        assert_eq!(dash.active().location.city, "New Delhi");
    }

    #[tokio::test]
    async fn failed_search_shows_fallback() {
        let source =
            ScriptedSource::replying(vec![Err(FetchError::Parse("expected value".into()))]);
        let mut dash = Dashboard::new();

        assert_eq!(dash.search(&source, "Oslo").await, SearchOutcome::Failed);
        assert_eq!(dash.active().location.city, "New Delhi");
        assert!(dash.error().unwrap().contains("expected value"));
    }
}
