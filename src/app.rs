// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application controller.
//!
//! `App` owns the workout collection and keeps its three views in step:
//! map markers, list entries and the storage slot. Every mutation renders
//! first and persists last, within the same event.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::Config;
use crate::db::{KeyValueStore, WorkoutRepository};
use crate::error::{AppError, Result};
use crate::models::{Coordinate, Workout, WorkoutId, WorkoutType};
use crate::services::form::{FormController, FormInput, FormView};
use crate::services::geolocation::{GeolocationError, PositionProvider};
use crate::services::list::{popup_content, ListView};
use crate::services::map::{ClickHandler, MapAdapter, MapWidget};
use crate::services::timers::Timers;
use crate::time_utils::{format_utc_rfc3339, Clock};

/// Browser shell operations.
pub trait Host {
    /// Blocking user-facing message.
    fn alert(&self, message: &str);
    /// Reload the whole page.
    fn reload(&self);
}

/// External collaborators handed to `App::new`.
pub struct AppParts {
    pub store: Box<dyn KeyValueStore>,
    pub map: Box<dyn MapWidget>,
    pub form: Box<dyn FormView>,
    pub list: Box<dyn ListView>,
    pub host: Box<dyn Host>,
    pub timers: Rc<dyn Timers>,
    pub clock: Box<dyn Clock>,
}

/// Application context: one per page.
pub struct App {
    config: Config,
    repo: WorkoutRepository,
    map: MapAdapter,
    form: FormController,
    list: Box<dyn ListView>,
    host: Box<dyn Host>,
    clock: Box<dyn Clock>,
    workouts: Vec<Workout>,
    last_click: Option<Coordinate>,
}

impl App {
    /// Load stored workouts and render them into the list.
    ///
    /// Markers wait for the map, which needs a position first.
    pub fn new(config: Config, parts: AppParts) -> Self {
        let repo = WorkoutRepository::with_key(parts.store, config.storage_key.clone());
        let workouts = repo.load();

        let mut app = Self {
            map: MapAdapter::new(parts.map),
            form: FormController::new(parts.form, parts.timers, config.form_restore_delay),
            list: parts.list,
            host: parts.host,
            clock: parts.clock,
            repo,
            workouts,
            last_click: None,
            config,
        };
        for workout in &app.workouts {
            app.list.render(workout);
        }
        tracing::info!(key = app.repo.key(), count = app.workouts.len(), "App started");
        app
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn find(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| &w.id == id)
    }

    pub fn map(&self) -> &MapAdapter {
        &self.map
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// Coordinate of the most recent map click.
    pub fn last_click(&self) -> Option<Coordinate> {
        self.last_click
    }

    /// Geolocation succeeded: build the map, listen for clicks, draw markers.
    pub fn on_position_resolved(
        &mut self,
        position: Coordinate,
        on_click: ClickHandler,
    ) -> Result<()> {
        self.map.initialize(position, self.config.map_zoom)?;
        self.map.on_click(on_click)?;

        for workout in &self.workouts {
            render_marker(&mut self.map, workout);
        }
        tracing::info!(markers = self.map.marker_count(), "Stored workouts placed on map");
        Ok(())
    }

    /// Geolocation failed: tell the user and leave the map uninitialized.
    pub fn on_position_failed(&mut self, err: GeolocationError) {
        tracing::warn!(error = %err, "Geolocation failed");
        let err = AppError::Geolocation(err.to_string());
        if let Some(message) = err.user_message() {
            self.host.alert(message);
        }
    }

    pub fn handle_map_click(&mut self, at: Coordinate) {
        tracing::debug!(at = %at, "Map clicked");
        self.last_click = Some(at);
        self.form.show();
    }

    pub fn handle_type_change(&mut self, workout_type: WorkoutType) {
        self.form.toggle_metric_row(workout_type);
    }

    /// Validate the form and add the resulting workout.
    ///
    /// On invalid input the user is alerted and nothing changes.
    pub fn submit_form(&mut self, input: &FormInput) -> Result<WorkoutId> {
        let Some(coords) = self.last_click else {
            tracing::debug!("Form submitted without a map click, ignoring");
            return Err(AppError::NoLocation);
        };

        let workout = match self
            .form
            .validate(input)
            .and_then(|draft| Ok(draft.into_workout(coords, self.clock.now())?))
        {
            Ok(workout) => workout,
            Err(e) => {
                tracing::info!(error = %e, "Rejected workout input");
                if let Some(message) = e.user_message() {
                    self.host.alert(message);
                }
                return Err(e);
            }
        };

        tracing::info!(
            id = %workout.id,
            kind = %workout.workout_type(),
            date = %format_utc_rfc3339(workout.date),
            "Workout created"
        );

        let id = workout.id.clone();
        self.workouts.push(workout);
        if let Some(workout) = self.workouts.last() {
            render_marker(&mut self.map, workout);
            self.list.render(workout);
        }
        self.form.hide();
        self.persist();
        Ok(id)
    }

    /// Pan to the workout behind a list entry.
    ///
    /// Returns `false` without doing anything when the map is not ready or
    /// the id is unknown.
    pub fn handle_list_click(&mut self, id: &WorkoutId) -> bool {
        if !self.map.is_ready() {
            tracing::debug!(id = %id, "List clicked before map was ready");
            return false;
        }
        let Some(workout) = self.workouts.iter_mut().find(|w| &w.id == id) else {
            tracing::debug!(id = %id, "List click did not match a workout");
            return false;
        };

        match self.map.pan_to(workout.coords, self.config.map_zoom) {
            Ok(()) => {
                workout.click();
                true
            }
            Err(e) => {
                if !e.is_guard_miss() {
                    tracing::warn!(id = %id, error = %e, "Failed to pan to workout");
                }
                false
            }
        }
    }

    /// Drop every stored workout and reload the page.
    pub fn reset(&mut self) {
        tracing::warn!(count = self.workouts.len(), "Resetting all workouts");
        self.form.cancel_pending();
        if let Err(e) = self.repo.clear() {
            tracing::error!(error = %e, "Failed to clear stored workouts");
        }
        self.host.reload();
    }

    fn persist(&self) {
        if let Err(e) = self.repo.save(&self.workouts) {
            tracing::error!(error = %e, "Failed to save workouts");
        }
    }
}

// Marker failures never block the list or storage update.
fn render_marker(map: &mut MapAdapter, workout: &Workout) {
    let popup = popup_content(workout);
    let class = workout.workout_type().popup_class();
    match map.place_marker(workout.coords, &popup, &class) {
        Ok(()) => {}
        Err(e) if e.is_guard_miss() => {
            tracing::debug!(id = %workout.id, "Map not ready, marker deferred");
        }
        Err(e) => tracing::warn!(id = %workout.id, error = %e, "Failed to place marker"),
    }
}

/// Request the position and hand the result to `app`.
///
/// No borrow of `app` is held while the provider runs, so providers may
/// answer synchronously. Callbacks hold weak references; a dropped app
/// ignores late events.
pub fn bootstrap(app: &Rc<RefCell<App>>, provider: &dyn PositionProvider) {
    let target = Rc::downgrade(app);
    provider.request(Box::new(move |result| {
        let Some(app) = target.upgrade() else {
            return;
        };
        let Ok(mut app_ref) = app.try_borrow_mut() else {
            tracing::error!("App busy when position arrived");
            return;
        };
        match result {
            Ok(position) => {
                let handler = click_handler(Rc::downgrade(&app));
                if let Err(e) = app_ref.on_position_resolved(position, handler) {
                    tracing::error!(error = %e, "Failed to initialize map");
                }
            }
            Err(err) => app_ref.on_position_failed(err),
        }
    }));
}

fn click_handler(target: Weak<RefCell<App>>) -> ClickHandler {
    Box::new(move |at| {
        let Some(app) = target.upgrade() else {
            return;
        };
        match app.try_borrow_mut() {
            Ok(mut app) => app.handle_map_click(at),
            Err(_) => tracing::warn!("App busy, dropping map click"),
        };
    })
}
