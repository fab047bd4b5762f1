// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapty: log workouts by clicking where they happened on a map.
//!
//! The crate holds the browser app's core (workout model, storage slot,
//! map and form controllers, application controller) behind small traits.
//! The `web` module binds those traits to the DOM, `localStorage` and
//! Leaflet on wasm32; the native binary serves the compiled bundle.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

#[cfg(not(target_arch = "wasm32"))]
pub mod middleware;
#[cfg(not(target_arch = "wasm32"))]
pub mod routes;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::{bootstrap, App, AppParts, Host};
pub use config::Config;
pub use error::{AppError, Result};
