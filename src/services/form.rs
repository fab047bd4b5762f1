// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout form controller.
//!
//! Two states, Hidden (initial) and Visible. Hiding clears the inputs and
//! collapses the form's layout space, then restores it after a short delay so
//! the slide-out transition does not snap. The restore is a cancelable task.

use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use validator::{Validate, ValidationError};

use crate::error::{AppError, Result};
use crate::models::{Coordinate, Workout, WorkoutError, WorkoutType};
use crate::services::timers::{Task, TimerHandle, Timers};

/// DOM operations on the form element.
pub trait FormView {
    fn set_hidden(&mut self, hidden: bool);
    fn focus_distance(&mut self);
    fn clear_inputs(&mut self);
    /// Remove the form from layout immediately.
    fn collapse(&mut self);
    /// Task that puts the form back into layout when run later.
    fn layout_restorer(&self) -> Task;
    /// Show the cadence row for running, the elevation row for cycling.
    fn show_metric_row(&mut self, workout_type: WorkoutType);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Hidden,
    Visible,
}

/// Raw field values as read from the inputs.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub workout_type: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// Parsed and validated form fields.
#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = "validate_metric"))]
pub struct WorkoutDraft {
    pub workout_type: WorkoutType,
    #[validate(custom(function = "finite_positive"))]
    pub distance: f64,
    #[validate(custom(function = "finite_positive"))]
    pub duration: f64,
    pub cadence: f64,
    pub elevation: f64,
}

impl WorkoutDraft {
    /// Construct the matching workout variant.
    pub fn into_workout(
        self,
        coords: Coordinate,
        date: DateTime<Utc>,
    ) -> std::result::Result<Workout, WorkoutError> {
        match self.workout_type {
            WorkoutType::Running => {
                Workout::running(coords, self.distance, self.duration, self.cadence, date)
            }
            WorkoutType::Cycling => {
                Workout::cycling(coords, self.distance, self.duration, self.elevation, date)
            }
        }
    }
}

fn finite_positive(value: f64) -> std::result::Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("finite_positive"))
    }
}

// Running needs a positive cadence; cycling elevation only has to be finite.
fn validate_metric(draft: &WorkoutDraft) -> std::result::Result<(), ValidationError> {
    let ok = match draft.workout_type {
        WorkoutType::Running => draft.cadence.is_finite() && draft.cadence > 0.0,
        WorkoutType::Cycling => draft.elevation.is_finite(),
    };
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("metric"))
    }
}

/// Numeric coercion matching the browser's: blank is zero, junk is NaN.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Validate raw input into a draft.
pub fn validate(input: &FormInput) -> Result<WorkoutDraft> {
    let workout_type: WorkoutType = input.workout_type.parse()?;
    let draft = WorkoutDraft {
        workout_type,
        distance: parse_number(&input.distance),
        duration: parse_number(&input.duration),
        cadence: parse_number(&input.cadence),
        elevation: parse_number(&input.elevation),
    };
    draft
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(draft)
}

pub struct FormController {
    view: Box<dyn FormView>,
    timers: Rc<dyn Timers>,
    restore_delay: Duration,
    state: FormState,
    pending_restore: Option<TimerHandle>,
}

impl FormController {
    pub fn new(view: Box<dyn FormView>, timers: Rc<dyn Timers>, restore_delay: Duration) -> Self {
        Self {
            view,
            timers,
            restore_delay,
            state: FormState::Hidden,
            pending_restore: None,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == FormState::Visible
    }

    /// Whether a layout restore is still scheduled.
    pub fn has_pending_restore(&self) -> bool {
        self.pending_restore.is_some()
    }

    pub fn show(&mut self) {
        self.view.set_hidden(false);
        self.view.focus_distance();
        self.state = FormState::Visible;
    }

    /// Clear inputs and hide. Safe to call on an already hidden form.
    pub fn hide(&mut self) {
        self.view.clear_inputs();
        self.view.collapse();
        self.view.set_hidden(true);
        self.state = FormState::Hidden;

        self.cancel_pending();
        match self
            .timers
            .set_timeout(self.restore_delay, self.view.layout_restorer())
        {
            Ok(handle) => self.pending_restore = Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to schedule form layout restore");
            }
        }
    }

    pub fn toggle_metric_row(&mut self, workout_type: WorkoutType) {
        self.view.show_metric_row(workout_type);
    }

    pub fn validate(&self, input: &FormInput) -> Result<WorkoutDraft> {
        validate(input)
    }

    /// Cancel the deferred layout restore, if any.
    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_restore.take() {
            self.timers.clear_timeout(handle);
        }
    }
}

impl Drop for FormController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
