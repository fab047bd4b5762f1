// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the adapters the application controller drives.

pub mod form;
pub mod geolocation;
pub mod list;
pub mod map;
pub mod timers;

pub use form::{FormController, FormInput, FormState, FormView, WorkoutDraft};
pub use geolocation::{FixedPosition, GeolocationError, PositionProvider};
pub use list::ListView;
pub use map::{ClickHandler, MapAdapter, MapWidget, PanOptions, Popup};
pub use timers::{ManualTimers, TimerHandle, Timers};
