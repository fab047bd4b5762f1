// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-shot position lookup.

use crate::models::Coordinate;

/// Receives the single lookup result.
pub type PositionCallback = Box<dyn FnOnce(Result<Coordinate, GeolocationError>)>;

/// Source of the user's current position.
///
/// Implementations call `callback` exactly once, possibly before `request`
/// returns.
pub trait PositionProvider {
    fn request(&self, callback: PositionCallback);
}

/// Why a position could not be determined.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported")]
    Unsupported,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Position unavailable: {0}")]
    Unavailable(String),

    #[error("Timed out")]
    Timeout,
}

impl GeolocationError {
    /// Map a browser `GeolocationPositionError.code`.
    pub fn from_code(code: u16, message: String) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Unavailable(message),
        }
    }
}

/// Provider answering with a preset result.
#[derive(Debug, Clone)]
pub struct FixedPosition(pub Result<Coordinate, GeolocationError>);

impl PositionProvider for FixedPosition {
    fn request(&self, callback: PositionCallback) {
        callback(self.0.clone());
    }
}
