// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout collection persistence.
//!
//! The whole collection lives in one slot as a JSON array and is replaced
//! wholesale on every save. Loading never fails: an absent or corrupt slot
//! reads as an empty collection.

use serde_json::Value;

use crate::db::{keys, KeyValueStore, StoreError};
use crate::models::Workout;

/// Reads and writes the workout collection slot.
pub struct WorkoutRepository {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl WorkoutRepository {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_key(store, keys::WORKOUTS)
    }

    pub fn with_key(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrite the slot with the full collection.
    pub fn save(&self, workouts: &[Workout]) -> Result<(), StoreError> {
        let json = serde_json::to_string(workouts)?;
        self.store.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, count = workouts.len(), "Saved workouts");
        Ok(())
    }

    /// Previously saved collection, or empty.
    ///
    /// Entries that fail to parse or violate model invariants are dropped
    /// individually; the rest of the collection still loads.
    pub fn load(&self) -> Vec<Workout> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "No stored workouts");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read stored workouts");
                return Vec::new();
            }
        };

        let entries = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(other) => {
                tracing::warn!(
                    key = %self.key,
                    kind = json_kind(&other),
                    "Stored workouts are not an array, ignoring"
                );
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Stored workouts are not valid JSON");
                return Vec::new();
            }
        };

        let total = entries.len();
        let workouts: Vec<Workout> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let parsed = serde_json::from_value::<Workout>(entry)
                    .map_err(|e| e.to_string())
                    .and_then(|w| w.reconcile().map_err(|e| e.to_string()));
                match parsed {
                    Ok(workout) => Some(workout),
                    Err(error) => {
                        tracing::warn!(index, error = %error, "Skipping malformed stored workout");
                        None
                    }
                }
            })
            .collect();

        tracing::info!(
            key = %self.key,
            count = workouts.len(),
            skipped = total - workouts.len(),
            "Loaded workouts"
        );
        workouts
    }

    /// Remove the slot entirely.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(&self.key)?;
        tracing::info!(key = %self.key, "Cleared stored workouts");
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
