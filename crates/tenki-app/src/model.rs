//! Owner of the application state.
//!
//! The presentation layer reads [`ForecastModel::state`] and triggers the two
//! operations. Results arrive on an mpsc channel and are applied in arrival
//! order by [`ForecastModel::poll_messages`] or [`ForecastModel::next_update`].

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use tenki_weather::{
    AppState, SharedForecastService, SharedLocation, StateEvent, Timezone, UnknownTimezone,
};

use crate::services::{self, ServiceMessage};

pub struct ForecastModel {
    state: AppState,
    location: Option<SharedLocation>,
    service: SharedForecastService,
    runtime: Handle,
    tx: UnboundedSender<ServiceMessage>,
    rx: UnboundedReceiver<ServiceMessage>,
}

impl ForecastModel {
    /// Create a model with empty state.
    ///
    /// `location` is `None` when the host has no location capability.
    pub fn new(
        runtime: Handle,
        location: Option<SharedLocation>,
        service: SharedForecastService,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(),
            location,
            service,
            runtime,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn set_timezone(&mut self, timezone: Option<Timezone>) {
        self.state.apply(StateEvent::TimezoneSelected(timezone));
    }

    /// Select a timezone by identifier; an empty string clears the selection.
    pub fn select_timezone(&mut self, id: &str) -> Result<(), UnknownTimezone> {
        let timezone = match id.trim() {
            "" => None,
            id => Some(id.parse::<Timezone>()?),
        };
        self.set_timezone(timezone);
        Ok(())
    }

    /// Request the current position.
    ///
    /// Without an available capability the error is set immediately and no
    /// request is made.
    pub fn acquire_location(&mut self) {
        let capability = match &self.location {
            Some(cap) if cap.is_available() => cap.clone(),
            _ => {
                self.state.apply(StateEvent::LocationUnavailable);
                return;
            }
        };

        self.state.apply(StateEvent::LocationStarted);
        services::request_location(&self.tx, &self.runtime, capability);
    }

    /// Request the forecast for the current position and timezone.
    ///
    /// If either input is missing the error is set and no request is made.
    pub fn fetch_forecast(&mut self) {
        let Some(query) = self.state.ready_query() else {
            self.state.apply(StateEvent::ForecastRejected);
            return;
        };

        self.state.apply(StateEvent::ForecastStarted);
        services::request_forecast(&self.tx, &self.runtime, self.service.clone(), query);
    }

    /// Apply every completed result without blocking.
    /// Returns the number of results applied.
    pub fn poll_messages(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
            applied += 1;
        }
        applied
    }

    /// Wait for the next completed result and apply it.
    ///
    /// Returns `false` immediately if nothing is in flight.
    pub async fn next_update(&mut self) -> bool {
        if !self.state.is_locating() && !self.state.is_fetching() {
            return false;
        }

        match self.rx.recv().await {
            Some(msg) => {
                self.handle_message(msg);
                true
            }
            None => false,
        }
    }

    fn handle_message(&mut self, msg: ServiceMessage) {
        let event = match msg {
            ServiceMessage::LocationDone(result) => StateEvent::LocationCompleted(result),
            ServiceMessage::ForecastDone(result) => StateEvent::ForecastCompleted(result),
        };
        self.state.apply(event);
    }
}
