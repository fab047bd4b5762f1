// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, TimeZone, Utc};
use mapty::db::{KeyValueStore, MemoryStore, StoreError};
use mapty::models::{Coordinate, Workout, WorkoutType};
use mapty::services::form::{FormInput, FormView};
use mapty::services::list::ListView;
use mapty::services::map::{ClickHandler, MapWidget, PanOptions, Popup};
use mapty::services::timers::{ManualTimers, Task};
use mapty::time_utils::MockClock;
use mapty::{App, AppParts, Config, Host};
use std::cell::RefCell;
use std::rc::Rc;

/// Fixed start time for deterministic ids.
#[allow(dead_code)]
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 14, 30, 0).unwrap()
}

#[derive(Default)]
pub struct MapLog {
    pub created: Vec<(Coordinate, u8)>,
    pub markers: Vec<(Coordinate, Popup)>,
    pub views: Vec<(Coordinate, u8, PanOptions)>,
    pub click_handlers: Vec<ClickHandler>,
    /// Make `set_view` fail, as Leaflet does when it throws.
    pub fail_views: bool,
}

pub struct RecordingMap(pub Rc<RefCell<MapLog>>);

impl MapWidget for RecordingMap {
    fn create(&mut self, center: Coordinate, zoom: u8) -> mapty::Result<()> {
        self.0.borrow_mut().created.push((center, zoom));
        Ok(())
    }
    fn add_marker(&mut self, at: Coordinate, popup: &Popup) -> mapty::Result<()> {
        self.0.borrow_mut().markers.push((at, popup.clone()));
        Ok(())
    }
    fn set_view(&mut self, center: Coordinate, zoom: u8, options: PanOptions) -> mapty::Result<()> {
        let mut log = self.0.borrow_mut();
        if log.fail_views {
            return Err(mapty::AppError::Map("setView threw".to_string()));
        }
        log.views.push((center, zoom, options));
        Ok(())
    }
    fn on_click(&mut self, handler: ClickHandler) -> mapty::Result<()> {
        self.0.borrow_mut().click_handlers.push(handler);
        Ok(())
    }
}

#[derive(Debug)]
pub struct FormLog {
    pub hidden: bool,
    /// Form is part of layout (not `display: none`)
    pub in_layout: bool,
    pub focus_count: usize,
    pub clear_count: usize,
    pub metric_row: WorkoutType,
}

impl Default for FormLog {
    fn default() -> Self {
        Self {
            hidden: true,
            in_layout: true,
            focus_count: 0,
            clear_count: 0,
            metric_row: WorkoutType::Running,
        }
    }
}

pub struct RecordingForm(pub Rc<RefCell<FormLog>>);

impl FormView for RecordingForm {
    fn set_hidden(&mut self, hidden: bool) {
        self.0.borrow_mut().hidden = hidden;
    }
    fn focus_distance(&mut self) {
        self.0.borrow_mut().focus_count += 1;
    }
    fn clear_inputs(&mut self) {
        self.0.borrow_mut().clear_count += 1;
    }
    fn collapse(&mut self) {
        self.0.borrow_mut().in_layout = false;
    }
    fn layout_restorer(&self) -> Task {
        let log = self.0.clone();
        Box::new(move || log.borrow_mut().in_layout = true)
    }
    fn show_metric_row(&mut self, workout_type: WorkoutType) {
        self.0.borrow_mut().metric_row = workout_type;
    }
}

pub struct RecordingList(pub Rc<RefCell<Vec<String>>>);

impl ListView for RecordingList {
    fn render(&mut self, workout: &Workout) {
        self.0.borrow_mut().push(workout.id.to_string());
    }
}

#[derive(Default)]
pub struct HostLog {
    pub alerts: Vec<String>,
    pub reloads: usize,
}

pub struct RecordingHost(pub Rc<RefCell<HostLog>>);

impl Host for RecordingHost {
    fn alert(&self, message: &str) {
        self.0.borrow_mut().alerts.push(message.to_string());
    }
    fn reload(&self) {
        self.0.borrow_mut().reloads += 1;
    }
}

/// Store whose every call fails, like a disabled or full localStorage.
#[allow(dead_code)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("SecurityError".to_string()))
    }
    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Write("QuotaExceededError".to_string()))
    }
    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Write("SecurityError".to_string()))
    }
}

/// An app wired to recording fakes, plus handles to inspect them.
#[allow(dead_code)]
pub struct Harness {
    pub app: Rc<RefCell<App>>,
    pub store: MemoryStore,
    pub timers: ManualTimers,
    pub clock: Rc<MockClock>,
    pub map: Rc<RefCell<MapLog>>,
    pub form: Rc<RefCell<FormLog>>,
    pub list: Rc<RefCell<Vec<String>>>,
    pub host: Rc<RefCell<HostLog>>,
}

struct SharedClock(Rc<MockClock>);

impl mapty::time_utils::Clock for SharedClock {
    fn now(&self) -> DateTime<Utc> {
        mapty::time_utils::Clock::now(self.0.as_ref())
    }
}

/// Build a harness around an existing store.
#[allow(dead_code)]
pub fn harness_with_store(store: MemoryStore) -> Harness {
    let backing: Box<dyn KeyValueStore> = Box::new(store.clone());
    build_harness(store, backing)
}

/// Build a harness whose app persists through a failing store.
///
/// `Harness::store` is a detached, untouched `MemoryStore`.
#[allow(dead_code)]
pub fn harness_with_failing_store() -> Harness {
    build_harness(MemoryStore::new(), Box::new(FailingStore))
}

#[allow(dead_code)]
fn build_harness(store: MemoryStore, backing: Box<dyn KeyValueStore>) -> Harness {
    let timers = ManualTimers::new();
    let clock = Rc::new(MockClock::with_time(t0()));
    let map = Rc::new(RefCell::new(MapLog::default()));
    let form = Rc::new(RefCell::new(FormLog::default()));
    let list = Rc::new(RefCell::new(Vec::new()));
    let host = Rc::new(RefCell::new(HostLog::default()));

    let parts = AppParts {
        store: backing,
        map: Box::new(RecordingMap(map.clone())),
        form: Box::new(RecordingForm(form.clone())),
        list: Box::new(RecordingList(list.clone())),
        host: Box::new(RecordingHost(host.clone())),
        timers: Rc::new(timers.clone()),
        clock: Box::new(SharedClock(clock.clone())),
    };
    let app = Rc::new(RefCell::new(App::new(Config::default(), parts)));

    Harness {
        app,
        store,
        timers,
        clock,
        map,
        form,
        list,
        host,
    }
}

#[allow(dead_code)]
pub fn harness() -> Harness {
    harness_with_store(MemoryStore::new())
}

#[allow(dead_code)]
pub fn running_input(distance: &str, duration: &str, cadence: &str) -> FormInput {
    FormInput {
        workout_type: "running".to_string(),
        distance: distance.to_string(),
        duration: duration.to_string(),
        cadence: cadence.to_string(),
        elevation: String::new(),
    }
}

#[allow(dead_code)]
pub fn cycling_input(distance: &str, duration: &str, elevation: &str) -> FormInput {
    FormInput {
        workout_type: "cycling".to_string(),
        distance: distance.to_string(),
        duration: duration.to_string(),
        cadence: String::new(),
        elevation: elevation.to_string(),
    }
}

/// Resolve geolocation with a no-op click handler.
#[allow(dead_code)]
pub fn make_map_ready(h: &Harness, at: Coordinate) {
    h.app
        .borrow_mut()
        .on_position_resolved(at, Box::new(|_| {}))
        .expect("map should initialize");
}
