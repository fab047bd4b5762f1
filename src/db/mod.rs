// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence layer (browser key-value storage).

pub mod store;
pub mod workouts;

pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use workouts::WorkoutRepository;

/// Storage slot names as constants.
pub mod keys {
    /// Whole workout collection, as a JSON array
    pub const WORKOUTS: &str = "workouts";
}
