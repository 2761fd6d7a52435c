//! Load-lifecycle state machine for the viewer screen.
//!
//! The viewer owns exactly one piece of state: which of the four screens is
//! showing, plus the destination it refers to. Every transition into
//! `Loading` bumps a monotonically increasing attempt id; renderer signals
//! carry the attempt that produced them and are dropped when they no longer
//! match, so a late callback from a superseded load can never corrupt the
//! screen for a newer selection.

use crate::types::{Destination, LifecycleSignal, LoadEvent, LoadRequest};

/// Which of the mutually exclusive screens is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    /// No destination selected; the home list is showing.
    Idle,
    Loading,
    Loaded,
    Failed,
}

pub struct Viewer {
    state: ViewerState,
    selected: Option<Destination>,
    attempt: u64,
}

impl Viewer {
    /// Multi-site variant: starts on the home list.
    pub fn new() -> Self {
        Self {
            state: ViewerState::Idle,
            selected: None,
            attempt: 0,
        }
    }

    /// Single-site (kiosk) variant: starts loading the fixed destination
    /// immediately. The returned request must be handed to the renderer.
    pub fn kiosk(destination: Destination) -> (Self, LoadRequest) {
        let mut viewer = Self::new();
        let request = viewer.select(destination);
        (viewer, request)
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn selected(&self) -> Option<&Destination> {
        self.selected.as_ref()
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// User picked a destination. Enters `Loading`, clears any prior
    /// failure, and returns the load request for the renderer.
    pub fn select(&mut self, destination: Destination) -> LoadRequest {
        self.selected = Some(destination);
        self.begin_attempt()
    }

    /// User asked to (re)load the current destination. Returns `None` in
    /// `Idle`, where there is nothing to load.
    pub fn retry(&mut self) -> Option<LoadRequest> {
        self.selected.as_ref()?;
        Some(self.begin_attempt())
    }

    /// User navigated back to the home list. The in-flight attempt, if any,
    /// is superseded; its signals will no longer match.
    pub fn back(&mut self) {
        self.state = ViewerState::Idle;
        self.selected = None;
        self.attempt += 1;
    }

    /// Apply a renderer signal. Returns `true` if the signal was current
    /// and changed (or confirmed) the state, `false` if it was stale.
    pub fn apply(&mut self, event: &LoadEvent) -> bool {
        if event.attempt != self.attempt || self.state == ViewerState::Idle {
            return false;
        }
        match event.signal {
            LifecycleSignal::Started => self.state == ViewerState::Loading,
            LifecycleSignal::Finished(_) => {
                if self.state == ViewerState::Loading {
                    self.state = ViewerState::Loaded;
                    true
                } else {
                    false
                }
            }
            LifecycleSignal::Failed => {
                if matches!(self.state, ViewerState::Loading | ViewerState::Loaded) {
                    self.state = ViewerState::Failed;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn begin_attempt(&mut self) -> LoadRequest {
        self.attempt += 1;
        self.state = ViewerState::Loading;
        LoadRequest {
            attempt: self.attempt,
            url: self
                .selected
                .as_ref()
                .map(|d| d.url.clone())
                .unwrap_or_default(),
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PageDocument;

    fn wikipedia() -> Destination {
        Destination::new("Wikipedia", "https://www.wikipedia.org")
    }

    fn rust_lang() -> Destination {
        Destination::new("Rust", "https://www.rust-lang.org")
    }

    fn finished(attempt: u64) -> LoadEvent {
        LoadEvent {
            attempt,
            signal: LifecycleSignal::Finished(PageDocument::default()),
        }
    }

    fn failed(attempt: u64) -> LoadEvent {
        LoadEvent {
            attempt,
            signal: LifecycleSignal::Failed,
        }
    }

    #[test]
    fn starts_idle_with_no_selection() {
        let viewer = Viewer::new();
        assert_eq!(viewer.state(), ViewerState::Idle);
        assert!(viewer.selected().is_none());
    }

    #[test]
    fn select_enters_loading_and_records_destination() {
        let mut viewer = Viewer::new();
        let request = viewer.select(wikipedia());
        assert_eq!(viewer.state(), ViewerState::Loading);
        assert_eq!(viewer.selected(), Some(&wikipedia()));
        assert_eq!(request.url, "https://www.wikipedia.org");
        assert_eq!(request.attempt, viewer.attempt());
    }

    #[test]
    fn finished_signal_moves_loading_to_loaded() {
        let mut viewer = Viewer::new();
        viewer.select(wikipedia());
        assert!(viewer.apply(&finished(viewer.attempt())));
        assert_eq!(viewer.state(), ViewerState::Loaded);
        assert_eq!(viewer.selected(), Some(&wikipedia()));
    }

    #[test]
    fn failed_signal_moves_loading_to_failed() {
        let mut viewer = Viewer::new();
        viewer.select(wikipedia());
        assert!(viewer.apply(&failed(viewer.attempt())));
        assert_eq!(viewer.state(), ViewerState::Failed);
    }

    #[test]
    fn failed_signal_moves_loaded_to_failed() {
        let mut viewer = Viewer::new();
        viewer.select(wikipedia());
        viewer.apply(&finished(viewer.attempt()));
        assert!(viewer.apply(&failed(viewer.attempt())));
        assert_eq!(viewer.state(), ViewerState::Failed);
    }

    #[test]
    fn retry_after_failure_keeps_destination_and_bumps_attempt() {
        let mut viewer = Viewer::new();
        viewer.select(wikipedia());
        let first_attempt = viewer.attempt();
        viewer.apply(&failed(first_attempt));

        let request = viewer.retry().unwrap();
        assert_eq!(viewer.state(), ViewerState::Loading);
        assert_eq!(viewer.selected(), Some(&wikipedia()));
        assert_eq!(request.url, "https://www.wikipedia.org");
        assert!(request.attempt > first_attempt);
    }

    #[test]
    fn retry_in_idle_does_nothing() {
        let mut viewer = Viewer::new();
        assert!(viewer.retry().is_none());
        assert_eq!(viewer.state(), ViewerState::Idle);
    }

    #[test]
    fn retry_while_loading_is_equivalent_to_fresh_selection() {
        let mut viewer = Viewer::new();
        viewer.select(wikipedia());
        let stale_attempt = viewer.attempt();

        let request = viewer.retry().unwrap();
        assert_eq!(viewer.state(), ViewerState::Loading);
        assert_eq!(request.url, "https://www.wikipedia.org");

        // The superseded attempt can no longer complete the new one.
        assert!(!viewer.apply(&finished(stale_attempt)));
        assert_eq!(viewer.state(), ViewerState::Loading);
        assert!(viewer.apply(&finished(viewer.attempt())));
        assert_eq!(viewer.state(), ViewerState::Loaded);
    }

    #[test]
    fn back_returns_to_idle_from_any_state() {
        for prime in [
            None,
            Some(finished(0)), // placeholder, attempt fixed below
            Some(failed(0)),
        ] {
            let mut viewer = Viewer::new();
            viewer.select(wikipedia());
            if let Some(mut event) = prime {
                event.attempt = viewer.attempt();
                viewer.apply(&event);
            }
            viewer.back();
            assert_eq!(viewer.state(), ViewerState::Idle);
            assert!(viewer.selected().is_none());
        }
    }

    #[test]
    fn signals_from_before_back_are_ignored() {
        let mut viewer = Viewer::new();
        viewer.select(wikipedia());
        let stale_attempt = viewer.attempt();
        viewer.back();

        assert!(!viewer.apply(&finished(stale_attempt)));
        assert!(!viewer.apply(&failed(stale_attempt)));
        assert_eq!(viewer.state(), ViewerState::Idle);
    }

    #[test]
    fn stale_signal_does_not_corrupt_newer_selection() {
        let mut viewer = Viewer::new();
        viewer.select(wikipedia());
        let stale_attempt = viewer.attempt();
        viewer.back();
        viewer.select(rust_lang());

        // The old load failing must not mark the new one failed.
        assert!(!viewer.apply(&failed(stale_attempt)));
        assert_eq!(viewer.state(), ViewerState::Loading);
        assert_eq!(viewer.selected(), Some(&rust_lang()));
    }

    #[test]
    fn kiosk_starts_loading_the_fixed_destination() {
        let (viewer, request) = Viewer::kiosk(wikipedia());
        assert_eq!(viewer.state(), ViewerState::Loading);
        assert_eq!(viewer.selected(), Some(&wikipedia()));
        assert_eq!(request.url, "https://www.wikipedia.org");
        assert_eq!(request.attempt, viewer.attempt());
    }

    #[test]
    fn kiosk_failure_then_retry_then_finish() {
        let (mut viewer, _request) = Viewer::kiosk(wikipedia());
        viewer.apply(&failed(viewer.attempt()));
        assert_eq!(viewer.state(), ViewerState::Failed);

        let request = viewer.retry().unwrap();
        assert_eq!(viewer.state(), ViewerState::Loading);
        assert_eq!(request.url, "https://www.wikipedia.org");

        assert!(viewer.apply(&finished(viewer.attempt())));
        assert_eq!(viewer.state(), ViewerState::Loaded);
    }

    #[test]
    fn started_signal_is_only_acknowledged_while_loading() {
        let mut viewer = Viewer::new();
        viewer.select(wikipedia());
        let event = LoadEvent {
            attempt: viewer.attempt(),
            signal: LifecycleSignal::Started,
        };
        assert!(viewer.apply(&event));
        assert_eq!(viewer.state(), ViewerState::Loading);

        viewer.apply(&finished(viewer.attempt()));
        assert!(!viewer.apply(&event));
        assert_eq!(viewer.state(), ViewerState::Loaded);
    }

    #[test]
    fn finished_after_loaded_is_ignored() {
        let mut viewer = Viewer::new();
        viewer.select(wikipedia());
        let attempt = viewer.attempt();
        assert!(viewer.apply(&finished(attempt)));
        assert!(!viewer.apply(&finished(attempt)));
        assert_eq!(viewer.state(), ViewerState::Loaded);
    }

    #[test]
    fn every_builtin_destination_selects_cleanly() {
        for (name, url) in crate::constants::DESTINATIONS {
            let mut viewer = Viewer::new();
            let request = viewer.select(Destination::new(*name, *url));
            assert_eq!(viewer.state(), ViewerState::Loading);
            assert_eq!(request.url, *url);
        }
    }
}
