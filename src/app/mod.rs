//! App module - contains the main application state and logic

mod home;
mod viewer_screen;

use crate::constants::DESTINATIONS;
use crate::renderer::{ContentRenderer, HttpRenderer};
use crate::settings::Settings;
use crate::theme;
use crate::types::{Destination, LifecycleSignal, LoadEvent, PageDocument};
use crate::ui::components::display_host;
use crate::viewer::Viewer;
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use tracing::{debug, error, info};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) viewer: Viewer,
    /// Document for the current `Loaded` state; cleared on every new attempt.
    pub(crate) document: Option<PageDocument>,
    pub(crate) destinations: Vec<Destination>,
    pub(crate) renderer: Box<dyn ContentRenderer>,
    pub(crate) events: Receiver<LoadEvent>,
    /// Single-site variant: no home screen, no back navigation.
    pub(crate) kiosk: bool,
    // Window bookkeeping
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
    pub(crate) settings: Settings,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        let (sender, events) = std::sync::mpsc::channel();
        let renderer = match HttpRenderer::new(sender, cc.egui_ctx.clone()) {
            Ok(renderer) => renderer,
            Err(e) => {
                error!(error = %e, "Failed to start renderer runtime");
                panic!("Failed to start renderer runtime: {}", e);
            }
        };
        let renderer: Box<dyn ContentRenderer> = Box::new(renderer);

        let destinations = DESTINATIONS
            .iter()
            .map(|(name, url)| Destination::new(*name, *url))
            .collect();

        let (viewer, kiosk) = match &settings.kiosk_url {
            Some(url) => {
                info!(url = %url, "Starting in kiosk mode");
                let destination = Destination::new(display_host(url).to_string(), url.clone());
                let (viewer, request) = Viewer::kiosk(destination);
                renderer.load(request);
                (viewer, true)
            }
            None => (Viewer::new(), false),
        };

        Self {
            viewer,
            document: None,
            destinations,
            renderer,
            events,
            kiosk,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
            settings,
        }
    }

    /// Drain renderer events queued since the last frame. Signals whose
    /// attempt id no longer matches the viewer's current attempt are stale
    /// remnants of a superseded load and are dropped.
    pub fn poll_load_events(&mut self) {
        loop {
            let event = match self.events.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            };
            if !self.viewer.apply(&event) {
                debug!(
                    attempt = event.attempt,
                    current = self.viewer.attempt(),
                    "Dropping stale lifecycle signal"
                );
                continue;
            }
            if let LifecycleSignal::Finished(document) = event.signal {
                self.document = Some(document);
            }
        }
    }

    /// User picked a destination from the home list.
    pub fn open_destination(&mut self, destination: Destination) {
        info!(name = %destination.name, url = %destination.url, "Opening destination");
        self.document = None;
        let request = self.viewer.select(destination);
        self.renderer.load(request);
    }

    /// User asked to reload, either from the error screen or the top bar.
    pub fn reload(&mut self) {
        if let Some(request) = self.viewer.retry() {
            info!(url = %request.url, attempt = request.attempt, "Reloading destination");
            self.document = None;
            self.renderer.load(request);
        }
    }

    /// User navigated back to the home list. The in-flight load, if any, is
    /// cancelled; a straggling signal would be dropped as stale regardless.
    pub fn go_back(&mut self) {
        if self.kiosk {
            return;
        }
        self.renderer.cancel();
        self.viewer.back();
        self.document = None;
    }

    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.save(&self.data_dir);
    }
}
