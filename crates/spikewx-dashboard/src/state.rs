//! View model reconciliation
//!
//! Every transition builds a new `ViewState` and replaces the previous one;
//! nothing is patched field by field.

use std::sync::Arc;

use spikewx_core::{fallback_snapshot, FetchError, FetchResult, WeatherSnapshot};

/// What the dashboard renders once a fetch has completed
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub snapshot: Arc<WeatherSnapshot>,
    pub degraded: bool,
    /// A refresh is in flight; `snapshot` is the last completed result
    pub loading: bool,
    pub error: Option<String>,
}

impl DisplayState {
    pub fn live(snapshot: WeatherSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
            degraded: false,
            loading: false,
            error: None,
        }
    }

    /// Degraded state: always the fixed fallback, never earlier live data
    pub fn degraded(error: &FetchError) -> Self {
        Self {
            snapshot: Arc::new(fallback_snapshot()),
            degraded: true,
            loading: false,
            error: Some(error.user_message().to_string()),
        }
    }
}

/// Resolve a fetch outcome into the next display state
pub fn reconcile(outcome: FetchResult<WeatherSnapshot>) -> DisplayState {
    match outcome {
        Ok(snapshot) => DisplayState::live(snapshot),
        Err(err) => DisplayState::degraded(&err),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Live,
    Degraded,
}

/// Dashboard state: `Loading` until the first fetch completes
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Ready(DisplayState),
}

impl ViewState {
    pub fn phase(&self) -> Phase {
        match self {
            ViewState::Loading => Phase::Loading,
            ViewState::Ready(d) if d.degraded => Phase::Degraded,
            ViewState::Ready(_) => Phase::Live,
        }
    }

    pub fn display(&self) -> Option<&DisplayState> {
        match self {
            ViewState::Loading => None,
            ViewState::Ready(d) => Some(d),
        }
    }

    /// True before the first result and while any refresh is in flight
    pub fn is_loading(&self) -> bool {
        match self {
            ViewState::Loading => true,
            ViewState::Ready(d) => d.loading,
        }
    }

    /// State shown while a refresh runs: previous snapshot, loading flag set
    pub fn begin_refresh(&self) -> ViewState {
        match self {
            ViewState::Loading => ViewState::Loading,
            ViewState::Ready(d) => ViewState::Ready(DisplayState {
                loading: true,
                ..d.clone()
            }),
        }
    }

    /// State after a fetch completes; independent of the previous state
    pub fn resolve(outcome: FetchResult<WeatherSnapshot>) -> ViewState {
        ViewState::Ready(reconcile(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spikewx_core::{Measurement, Trend};

    fn live_snapshot() -> WeatherSnapshot {
        let mut snapshot = fallback_snapshot();
        snapshot.temperature = Measurement::new(12.0, "°C", Trend::Decreasing);
        snapshot.location = "Ankara, Türkiye".into();
        snapshot
    }

    #[test]
    fn test_success_clears_error_and_degraded() {
        let state = reconcile(Ok(live_snapshot()));
        assert!(!state.degraded);
        assert!(state.error.is_none());
        assert_eq!(*state.snapshot, live_snapshot());
    }

    #[test]
    fn test_every_failure_shows_exact_fallback() {
        let errors = [
            FetchError::Network("connection refused".into()),
            FetchError::Protocol { status: 500 },
            FetchError::MalformedPayload("missing field `pressure`".into()),
        ];
        for err in errors {
            let state = reconcile(Err(err));
            assert!(state.degraded);
            assert_eq!(state.error.as_deref(), Some("weather data unavailable"));
            assert_eq!(*state.snapshot, fallback_snapshot());
        }
    }

    #[test]
    fn test_fallback_ignores_previous_live_data() {
        let live = ViewState::resolve(Ok(live_snapshot()));
        let refreshing = live.begin_refresh();
        let failed = ViewState::resolve(Err(FetchError::Protocol { status: 502 }));

        assert_eq!(refreshing.phase(), Phase::Live);
        assert_eq!(failed.phase(), Phase::Degraded);
        assert_eq!(*failed.display().unwrap().snapshot, fallback_snapshot());
    }

    #[test]
    fn test_begin_refresh_keeps_snapshot() {
        assert_eq!(ViewState::Loading.begin_refresh(), ViewState::Loading);

        let live = ViewState::resolve(Ok(live_snapshot()));
        assert!(!live.is_loading());
        let refreshing = live.begin_refresh();
        assert!(refreshing.is_loading());
        assert_eq!(
            refreshing.display().unwrap().snapshot,
            live.display().unwrap().snapshot
        );
    }

    #[test]
    fn test_phase_transitions() {
        assert_eq!(ViewState::default().phase(), Phase::Loading);
        let degraded = ViewState::resolve(Err(FetchError::Network("down".into())));
        assert_eq!(degraded.phase(), Phase::Degraded);
        let live = ViewState::resolve(Ok(live_snapshot()));
        assert_eq!(live.phase(), Phase::Live);
    }
}
