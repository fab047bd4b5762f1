// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end controller flows against recording fakes.
//!
//! Each test drives the App the way the browser events would and then checks
//! that the map, the list and the storage slot agree.

use chrono::Local;
use mapty::db::keys;
use mapty::models::{Coordinate, WorkoutId, WorkoutType};
use mapty::services::geolocation::{FixedPosition, GeolocationError};
use mapty::services::FormState;
use mapty::{bootstrap, AppError};
use std::time::Duration;

mod common;

use common::{cycling_input, harness, make_map_ready, running_input};

fn nyc() -> Coordinate {
    Coordinate::new(40.7, -74.0)
}

#[test]
fn test_running_submission_updates_all_views() {
    let h = harness();
    make_map_ready(&h, nyc());

    h.app.borrow_mut().handle_map_click(nyc());
    let id = h
        .app
        .borrow_mut()
        .submit_form(&running_input("5", "30", "170"))
        .expect("valid running input");

    let app = h.app.borrow();
    assert_eq!(app.workouts().len(), 1);
    let workout = &app.workouts()[0];
    assert_eq!(workout.id, id);
    assert_eq!(workout.pace(), Some(6.0));
    assert_eq!(workout.coords, nyc());

    let local = workout.date.with_timezone(&Local);
    assert_eq!(
        workout.description,
        format!("Running on {}", local.format("%B %-d"))
    );

    // Map, list and storage each saw the new workout.
    let map = h.map.borrow();
    assert_eq!(map.markers.len(), 1);
    assert_eq!(map.markers[0].0, nyc());
    assert_eq!(map.markers[0].1.class_name, "running-popup");
    assert!(map.markers[0].1.content.ends_with(&workout.description));
    assert_eq!(*h.list.borrow(), vec![id.to_string()]);

    let stored: serde_json::Value =
        serde_json::from_str(&h.store_raw()).expect("stored JSON");
    assert_eq!(stored.as_array().map(Vec::len), Some(1));
    assert_eq!(stored[0]["type"], "running");
    assert_eq!(stored[0]["pace"], 6.0);

    assert_eq!(app.form().state(), FormState::Hidden);
}

#[test]
fn test_cycling_submission_computes_speed() {
    let h = harness();
    make_map_ready(&h, nyc());

    h.app.borrow_mut().handle_map_click(Coordinate::new(40.75, -73.98));
    h.app
        .borrow_mut()
        .submit_form(&cycling_input("20", "60", "150"))
        .expect("valid cycling input");

    let app = h.app.borrow();
    let workout = &app.workouts()[0];
    assert_eq!(workout.workout_type(), WorkoutType::Cycling);
    assert_eq!(workout.speed(), Some(20.0));
    assert_eq!(h.map.borrow().markers[0].1.class_name, "cycling-popup");
}

#[test]
fn test_invalid_input_changes_nothing() {
    let h = harness();
    make_map_ready(&h, nyc());
    h.app.borrow_mut().handle_map_click(nyc());

    let err = h
        .app
        .borrow_mut()
        .submit_form(&running_input("-1", "30", "170"))
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(
        h.host.borrow().alerts,
        vec![AppError::INVALID_INPUT_MESSAGE.to_string()]
    );
    assert!(h.app.borrow().workouts().is_empty());
    assert!(h.map.borrow().markers.is_empty());
    assert!(h.list.borrow().is_empty());
    assert_eq!(h.store.writes(), 0);
    assert!(!h.store.contains(keys::WORKOUTS));
    // Form stays open so the user can correct it.
    assert_eq!(h.app.borrow().form().state(), FormState::Visible);
}

#[test]
fn test_list_click_before_map_ready_is_ignored() {
    let h = harness();
    h.app.borrow_mut().handle_map_click(nyc());
    h.app
        .borrow_mut()
        .submit_form(&running_input("5", "30", "170"))
        .expect("submission works without a map");

    let id = h.app.borrow().workouts()[0].id.clone();
    let panned = h.app.borrow_mut().handle_list_click(&id);

    assert!(!panned);
    assert!(h.map.borrow().views.is_empty());
    assert_eq!(h.app.borrow().workouts()[0].clicks, 0);
}

#[test]
fn test_submission_before_map_ready_still_lists_and_saves() {
    let h = harness();
    h.app.borrow_mut().handle_map_click(nyc());
    h.app
        .borrow_mut()
        .submit_form(&cycling_input("10", "30", "0"))
        .unwrap();

    assert!(h.map.borrow().markers.is_empty());
    assert_eq!(h.list.borrow().len(), 1);
    assert_eq!(h.store.writes(), 1);
}

#[test]
fn test_list_click_pans_to_workout() {
    let h = harness();
    make_map_ready(&h, Coordinate::new(0.0, 0.0));

    h.app.borrow_mut().handle_map_click(nyc());
    let id = h
        .app
        .borrow_mut()
        .submit_form(&running_input("5", "30", "170"))
        .unwrap();

    assert!(h.app.borrow_mut().handle_list_click(&id));

    let (center, zoom, options) = h.map.borrow().views[0];
    assert_eq!(center, nyc());
    assert_eq!(zoom, 13);
    assert!(options.animate);
    assert_eq!(h.app.borrow().find(&id).map(|w| w.clicks), Some(1));
}

#[test]
fn test_failed_pan_does_not_count_click() {
    let h = harness();
    make_map_ready(&h, Coordinate::new(0.0, 0.0));
    h.app.borrow_mut().handle_map_click(nyc());
    let id = h
        .app
        .borrow_mut()
        .submit_form(&running_input("5", "30", "170"))
        .unwrap();

    h.map.borrow_mut().fail_views = true;
    assert!(!h.app.borrow_mut().handle_list_click(&id));
    assert_eq!(h.app.borrow().find(&id).map(|w| w.clicks), Some(0));

    h.map.borrow_mut().fail_views = false;
    assert!(h.app.borrow_mut().handle_list_click(&id));
    assert_eq!(h.app.borrow().find(&id).map(|w| w.clicks), Some(1));
}

#[test]
fn test_list_click_on_unknown_id_is_ignored() {
    let h = harness();
    make_map_ready(&h, nyc());

    assert!(!h
        .app
        .borrow_mut()
        .handle_list_click(&WorkoutId::from("0000000000")));
    assert!(h.map.borrow().views.is_empty());
}

#[test]
fn test_submit_without_map_click_is_ignored() {
    let h = harness();
    let result = h
        .app
        .borrow_mut()
        .submit_form(&running_input("5", "30", "170"));

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::NoLocation));
    assert!(err.is_guard_miss());
    assert!(h.host.borrow().alerts.is_empty());
    assert!(h.app.borrow().workouts().is_empty());
    assert_eq!(h.store.writes(), 0);
}

#[test]
fn test_latest_map_click_wins() {
    let h = harness();
    make_map_ready(&h, nyc());

    h.app.borrow_mut().handle_map_click(Coordinate::new(1.0, 1.0));
    h.app.borrow_mut().handle_map_click(Coordinate::new(2.0, 2.0));
    h.app
        .borrow_mut()
        .submit_form(&running_input("5", "30", "170"))
        .unwrap();

    assert_eq!(h.app.borrow().workouts()[0].coords, Coordinate::new(2.0, 2.0));
}

#[test]
fn test_map_click_shows_form() {
    let h = harness();
    h.app.borrow_mut().handle_map_click(nyc());

    assert_eq!(h.app.borrow().last_click(), Some(nyc()));
    assert_eq!(h.app.borrow().form().state(), FormState::Visible);
    assert!(!h.form.borrow().hidden);
    assert_eq!(h.form.borrow().focus_count, 1);
}

#[test]
fn test_type_change_toggles_metric_row() {
    let h = harness();
    h.app.borrow_mut().handle_type_change(WorkoutType::Cycling);
    assert_eq!(h.form.borrow().metric_row, WorkoutType::Cycling);
    h.app.borrow_mut().handle_type_change(WorkoutType::Running);
    assert_eq!(h.form.borrow().metric_row, WorkoutType::Running);
}

#[test]
fn test_workouts_keep_insertion_order() {
    let h = harness();
    make_map_ready(&h, nyc());

    for distance in ["1", "2", "3"] {
        h.app.borrow_mut().handle_map_click(nyc());
        h.app
            .borrow_mut()
            .submit_form(&running_input(distance, "10", "160"))
            .unwrap();
        h.clock.advance(chrono::Duration::seconds(1));
    }

    let app = h.app.borrow();
    let distances: Vec<f64> = app.workouts().iter().map(|w| w.distance).collect();
    assert_eq!(distances, vec![1.0, 2.0, 3.0]);
    let ids: Vec<String> = app.workouts().iter().map(|w| w.id.to_string()).collect();
    assert_eq!(*h.list.borrow(), ids);
    assert_eq!(h.store.writes(), 3);
}

#[test]
fn test_bootstrap_success_initializes_map_and_clicks_reach_app() {
    let h = harness();

    bootstrap(&h.app, &FixedPosition(Ok(nyc())));

    assert!(h.app.borrow().map().is_ready());
    assert_eq!(h.map.borrow().created, vec![(nyc(), 13)]);

    // Simulate Leaflet delivering a click.
    let mut handler = h.map.borrow_mut().click_handlers.pop().expect("handler");
    handler(Coordinate::new(1.5, 2.5));

    assert_eq!(h.app.borrow().last_click(), Some(Coordinate::new(1.5, 2.5)));
    assert!(h.app.borrow().form().is_visible());
}

#[test]
fn test_bootstrap_failure_alerts_and_leaves_map_off() {
    let h = harness();

    bootstrap(&h.app, &FixedPosition(Err(GeolocationError::PermissionDenied)));

    assert!(!h.app.borrow().map().is_ready());
    assert_eq!(
        h.host.borrow().alerts,
        vec![AppError::NO_POSITION_MESSAGE.to_string()]
    );
    assert!(h.map.borrow().created.is_empty());
}

#[test]
fn test_reset_clears_storage_cancels_restore_and_reloads() {
    let h = harness();
    make_map_ready(&h, nyc());
    h.app.borrow_mut().handle_map_click(nyc());
    h.app
        .borrow_mut()
        .submit_form(&running_input("5", "30", "170"))
        .unwrap();
    assert!(h.app.borrow().form().has_pending_restore());

    h.app.borrow_mut().reset();

    assert!(!h.store.contains(keys::WORKOUTS));
    assert_eq!(h.host.borrow().reloads, 1);
    assert!(!h.app.borrow().form().has_pending_restore());

    h.timers.advance(Duration::from_secs(5));
    assert!(!h.form.borrow().in_layout);
}

impl common::Harness {
    fn store_raw(&self) -> String {
        use mapty::db::KeyValueStore;
        self.store
            .get(keys::WORKOUTS)
            .expect("store readable")
            .expect("slot written")
    }
}
