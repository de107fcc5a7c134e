//! Fixed-interval poll drivers and the dashboard ticks they run.
//!
//! A driver fires once immediately and then every period, forever. Each tick
//! is spawned as its own task, so a slow tick never delays the next one and
//! several can be in flight at once. [`DashboardSession`] sorts out which
//! result is newest.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_stream::StreamExt as _;
use tokio_stream::wrappers::IntervalStream;
use tracing::{debug, info, warn};

use crate::api::DashboardClient;
use crate::chart::{ChartSink, render_window};
use crate::error::Result;
use crate::session::DashboardSession;
use crate::telemetry::RefreshSummary;
use crate::weather::WeatherSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling,
}

#[derive(Debug)]
pub struct PollDriver {
    name: &'static str,
    period: Duration,
    state: PollState,
}

impl PollDriver {
    pub fn new(name: &'static str, period: Duration) -> Self {
        Self {
            name,
            period,
            state: PollState::Idle,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawns `tick()` now and then once per period. Never returns.
    pub async fn run<F, Fut>(mut self, tick: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.state = PollState::Polling;
        info!(driver = self.name, period = ?self.period, "polling started");

        let mut timer = interval(self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks = IntervalStream::new(timer);

        while ticks.next().await.is_some() {
            debug!(driver = self.name, "tick");
            tokio::spawn(tick());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Applied(RefreshSummary),
    /// A newer tick already landed.
    Stale,
    Failed,
}

/// The live dashboard: API client, session state and chart output.
#[derive(Debug)]
pub struct Dashboard<S> {
    client: DashboardClient,
    session: Mutex<DashboardSession>,
    sink: Mutex<S>,
    window: usize,
    city: String,
}

impl<S> Dashboard<S>
where
    S: ChartSink + Send + 'static,
{
    pub fn new(
        client: DashboardClient,
        session: DashboardSession,
        sink: S,
        window: usize,
        city: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            client,
            session: Mutex::new(session),
            sink: Mutex::new(sink),
            window,
            city: city.into(),
        })
    }

    pub fn session(&self) -> MutexGuard<'_, DashboardSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn sink(&self) -> MutexGuard<'_, S> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch `/data`, redraw the chart window, then re-check the alert.
    pub async fn telemetry_tick(&self) -> TickOutcome {
        let generation = self.session().begin_tick();

        let raw = match self.client.fetch_telemetry().await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(generation, "telemetry poll failed, keeping previous data: {err}");
                return TickOutcome::Failed;
            }
        };

        let (summary, has_data) = {
            let mut session = self.session();
            let Some(summary) = session.apply_telemetry(generation, &raw) else {
                return TickOutcome::Stale;
            };

            render_window(&mut *self.sink(), session.cache(), self.window);

            if let Some([temperature, humidity, time]) = session.latest_panel() {
                info!(
                    accepted = summary.accepted,
                    skipped = summary.skipped,
                    "{temperature} | {humidity} | {time}"
                );
            }

            (summary, !session.cache().is_empty())
        };

        if has_data {
            let evaluation = self.client.evaluate_alert().await;
            self.session().apply_alert(generation, evaluation);
        }

        TickOutcome::Applied(summary)
    }

    /// Fetch weather then UV; either failing leaves the previous panel.
    pub async fn weather_tick(&self) -> bool {
        let timezone = self.session().timezone();

        match self.fetch_weather(timezone).await {
            Ok(summary) => {
                info!(
                    temperature = %summary.temperature,
                    uv = summary.uv_index,
                    icon = summary.icon.css_class(),
                    "weather updated"
                );
                self.session().apply_weather(summary);
                true
            }
            Err(err) => {
                warn!(city = %self.city, "weather or UV update failed: {err}");
                false
            }
        }
    }

    async fn fetch_weather(&self, timezone: chrono_tz::Tz) -> Result<WeatherSummary> {
        let report = self.client.weather(&self.city).await?;
        let uv = self.client.uv(&self.city).await?;
        WeatherSummary::new(&report, uv, Utc::now().timestamp(), timezone)
    }

    pub fn spawn_telemetry(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let dashboard = Arc::clone(self);
        tokio::spawn(PollDriver::new("telemetry", period).run(move || {
            let dashboard = Arc::clone(&dashboard);
            async move {
                dashboard.telemetry_tick().await;
            }
        }))
    }

    pub fn spawn_weather(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let dashboard = Arc::clone(self);
        tokio::spawn(PollDriver::new("weather", period).run(move || {
            let dashboard = Arc::clone(&dashboard);
            async move {
                dashboard.weather_tick().await;
            }
        }))
    }
}
