// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Only validation and geolocation failures reach the user (as an alert).
//! Everything else is logged and the feature quietly stays unavailable.

use crate::db::StoreError;
use crate::models::WorkoutError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Geolocation unavailable: {0}")]
    Geolocation(String),

    #[error("Map is not initialized")]
    MapNotReady,

    #[error("No map position selected")]
    NoLocation,

    #[error("Map widget error: {0}")]
    Map(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Alert text shown for rejected form input.
    pub const INVALID_INPUT_MESSAGE: &'static str = "Inputs have to be positive numbers!";
    /// Alert text shown when the position lookup fails.
    pub const NO_POSITION_MESSAGE: &'static str = "Could not get your position";

    /// Message to show the user, or `None` for errors that are only logged.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            AppError::Validation(_) => Some(Self::INVALID_INPUT_MESSAGE),
            AppError::Geolocation(_) => Some(Self::NO_POSITION_MESSAGE),
            AppError::MapNotReady
            | AppError::NoLocation
            | AppError::Map(_)
            | AppError::Storage(_)
            | AppError::Internal(_) => None,
        }
    }

    /// Expected transient states that callers should ignore.
    pub fn is_guard_miss(&self) -> bool {
        matches!(self, AppError::MapNotReady | AppError::NoLocation)
    }
}

impl From<WorkoutError> for AppError {
    fn from(err: WorkoutError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// Result type alias for application operations
pub type Result<T> = std::result::Result<T, AppError>;
