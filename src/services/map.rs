// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map adapter over an external tile-map widget (Leaflet in the browser).
//!
//! The widget is unusable until `initialize` runs, which only happens once
//! geolocation resolves. Every other call made before that returns
//! `AppError::MapNotReady`.

use crate::error::{AppError, Result};
use crate::models::Coordinate;

/// Receives the geographic coordinate of a map click.
pub type ClickHandler = Box<dyn FnMut(Coordinate)>;

/// Popup attached to a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub content: String,
    pub class_name: String,
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl Popup {
    /// Sticky popup: stays open when other popups open or the map is clicked.
    pub fn sticky(content: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            class_name: class_name.into(),
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
        }
    }
}

/// View transition options for `set_view`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanOptions {
    pub animate: bool,
    pub duration_secs: f64,
}

impl Default for PanOptions {
    fn default() -> Self {
        Self {
            animate: true,
            duration_secs: 1.0,
        }
    }
}

/// Primitives the external map library must provide.
pub trait MapWidget {
    /// Create the map view and its tile layer.
    fn create(&mut self, center: Coordinate, zoom: u8) -> Result<()>;
    /// Add a marker with its popup already open.
    fn add_marker(&mut self, at: Coordinate, popup: &Popup) -> Result<()>;
    fn set_view(&mut self, center: Coordinate, zoom: u8, options: PanOptions) -> Result<()>;
    fn on_click(&mut self, handler: ClickHandler) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MapState {
    Uninitialized,
    Ready,
}

/// Narrow contract the application uses to drive the map.
pub struct MapAdapter {
    widget: Box<dyn MapWidget>,
    state: MapState,
    markers: usize,
}

impl MapAdapter {
    pub fn new(widget: Box<dyn MapWidget>) -> Self {
        Self {
            widget,
            state: MapState::Uninitialized,
            markers: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state == MapState::Ready
    }

    /// Markers placed so far. They are never removed.
    pub fn marker_count(&self) -> usize {
        self.markers
    }

    /// Create the map view. A second call is ignored.
    pub fn initialize(&mut self, center: Coordinate, zoom: u8) -> Result<()> {
        if self.is_ready() {
            tracing::warn!("Map already initialized, ignoring");
            return Ok(());
        }
        self.widget.create(center, zoom)?;
        self.state = MapState::Ready;
        tracing::info!(center = %center, zoom, "Map initialized");
        Ok(())
    }

    pub fn place_marker(&mut self, at: Coordinate, content: &str, style_class: &str) -> Result<()> {
        self.ensure_ready()?;
        self.widget
            .add_marker(at, &Popup::sticky(content, style_class))?;
        self.markers += 1;
        Ok(())
    }

    /// Animate the view to center on `at`.
    pub fn pan_to(&mut self, at: Coordinate, zoom: u8) -> Result<()> {
        self.ensure_ready()?;
        self.widget.set_view(at, zoom, PanOptions::default())
    }

    pub fn on_click(&mut self, handler: ClickHandler) -> Result<()> {
        self.ensure_ready()?;
        self.widget.on_click(handler)
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(AppError::MapNotReady)
        }
    }
}
