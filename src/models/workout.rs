// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout model: a tagged union of running and cycling records.
//!
//! Field names on the wire are camelCase (`elevationGain`) with a `type`
//! tag, so documents written by the JavaScript version keep loading.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::time_utils::month_day_local;

/// Geographic position as `(lat, lng)`, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lng)
    }
}

/// Workout identity: the last 10 digits of the creation time in milliseconds.
///
/// Two workouts created within the same millisecond share an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn from_timestamp(date: DateTime<Utc>) -> Self {
        let millis = date.timestamp_millis().to_string();
        let start = millis.len().saturating_sub(10);
        Self(millis[start..].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discriminant selected in the form's type dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    /// Lowercase tag, as used in CSS classes and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃‍♂️",
            WorkoutType::Cycling => "🚴‍♀️",
        }
    }

    /// Leaflet popup class name.
    pub fn popup_class(&self) -> String {
        format!("{}-popup", self.as_str())
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = WorkoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "running" => Ok(WorkoutType::Running),
            "cycling" => Ok(WorkoutType::Cycling),
            other => Err(WorkoutError::UnknownType(other.to_string())),
        }
    }
}

/// Variant payload. The derived metric is stored alongside its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutKind {
    Running {
        /// Steps per minute
        cadence: f64,
        /// Minutes per kilometer
        #[serde(default)]
        pace: f64,
    },
    Cycling {
        /// Meters climbed
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        /// Kilometers per hour
        #[serde(default)]
        speed: f64,
    },
}

/// A single logged workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub id: WorkoutId,
    pub date: DateTime<Utc>,
    pub coords: Coordinate,
    /// Kilometers
    pub distance: f64,
    /// Minutes
    pub duration: f64,
    #[serde(default)]
    pub description: String,
    /// Incremented on list navigation; never displayed.
    #[serde(default)]
    pub clicks: u32,
    #[serde(flatten)]
    pub kind: WorkoutKind,
}

impl PartialEq for Workout {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Minutes per kilometer.
pub fn pace(distance: f64, duration: f64) -> f64 {
    duration / distance
}

/// Kilometers per hour.
pub fn speed(distance: f64, duration: f64) -> f64 {
    distance / (duration / 60.0)
}

/// `"<Type> on <Month> <day>"`, using the local calendar date.
pub fn describe(workout_type: WorkoutType, date: DateTime<Utc>) -> String {
    format!(
        "{} on {}",
        workout_type.label(),
        month_day_local(date.with_timezone(&Local))
    )
}

impl Workout {
    /// Build a running workout. Cadence must be a positive number.
    pub fn running(
        coords: Coordinate,
        distance: f64,
        duration: f64,
        cadence: f64,
        date: DateTime<Utc>,
    ) -> Result<Self, WorkoutError> {
        check_positive("cadence", cadence)?;
        Self::build(
            coords,
            distance,
            duration,
            WorkoutKind::Running {
                cadence,
                pace: pace(distance, duration),
            },
            date,
        )
    }

    /// Build a cycling workout. Elevation gain only needs to be finite.
    pub fn cycling(
        coords: Coordinate,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
        date: DateTime<Utc>,
    ) -> Result<Self, WorkoutError> {
        check_finite("elevationGain", elevation_gain)?;
        Self::build(
            coords,
            distance,
            duration,
            WorkoutKind::Cycling {
                elevation_gain,
                speed: speed(distance, duration),
            },
            date,
        )
    }

    fn build(
        coords: Coordinate,
        distance: f64,
        duration: f64,
        kind: WorkoutKind,
        date: DateTime<Utc>,
    ) -> Result<Self, WorkoutError> {
        check_positive("distance", distance)?;
        check_positive("duration", duration)?;
        if !coords.is_finite() {
            return Err(WorkoutError::InvalidCoordinate);
        }

        let mut workout = Self {
            id: WorkoutId::from_timestamp(date),
            date,
            coords,
            distance,
            duration,
            description: String::new(),
            clicks: 0,
            kind,
        };
        workout.description = describe(workout.workout_type(), date);
        Ok(workout)
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self.kind {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }

    /// Pace for running workouts.
    pub fn pace(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Running { pace, .. } => Some(pace),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    /// Speed for cycling workouts.
    pub fn speed(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { speed, .. } => Some(speed),
            WorkoutKind::Running { .. } => None,
        }
    }

    pub fn click(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
    }

    /// Re-check invariants and recompute derived fields on a deserialized record.
    ///
    /// Stored pace/speed values are ignored; an empty description is rebuilt.
    pub fn reconcile(mut self) -> Result<Self, WorkoutError> {
        check_positive("distance", self.distance)?;
        check_positive("duration", self.duration)?;
        if !self.coords.is_finite() {
            return Err(WorkoutError::InvalidCoordinate);
        }

        match &mut self.kind {
            WorkoutKind::Running { cadence, pace: p } => {
                check_positive("cadence", *cadence)?;
                *p = pace(self.distance, self.duration);
            }
            WorkoutKind::Cycling {
                elevation_gain,
                speed: s,
            } => {
                check_finite("elevationGain", *elevation_gain)?;
                *s = speed(self.distance, self.duration);
            }
        }

        if self.description.trim().is_empty() {
            self.description = describe(self.workout_type(), self.date);
        }
        Ok(self)
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), WorkoutError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(WorkoutError::NotFinite(field))
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), WorkoutError> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(WorkoutError::NotPositive(field))
    }
}

/// Errors from constructing or restoring a workout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkoutError {
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("coordinate must be finite")]
    InvalidCoordinate,

    #[error("unknown workout type: {0}")]
    UnknownType(String),
}
