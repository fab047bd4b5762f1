// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! DOM-backed form, list and shell.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

use crate::app::Host;
use crate::error::{AppError, Result};
use crate::models::{Workout, WorkoutType};
use crate::services::form::{FormInput, FormView};
use crate::services::list::{entry_html, ListView};
use crate::services::timers::Task;

const HIDDEN_ROW: &str = "form__row--hidden";

fn select<T: JsCast>(document: &Document, selector: &str) -> Result<T> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("missing element {selector}")))?
        .dyn_into::<T>()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("unexpected element type for {selector}")))
}

/// The workout form. Clones refer to the same elements.
#[derive(Clone)]
pub struct DomForm {
    form: HtmlElement,
    workout_type: HtmlSelectElement,
    distance: HtmlInputElement,
    duration: HtmlInputElement,
    cadence: HtmlInputElement,
    elevation: HtmlInputElement,
}

impl DomForm {
    pub fn find(document: &Document) -> Result<Self> {
        Ok(Self {
            form: select(document, ".form")?,
            workout_type: select(document, ".form__input--type")?,
            distance: select(document, ".form__input--distance")?,
            duration: select(document, ".form__input--duration")?,
            cadence: select(document, ".form__input--cadence")?,
            elevation: select(document, ".form__input--elevation")?,
        })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.form
    }

    pub fn type_select(&self) -> &HtmlSelectElement {
        &self.workout_type
    }

    pub fn read(&self) -> FormInput {
        FormInput {
            workout_type: self.workout_type.value(),
            distance: self.distance.value(),
            duration: self.duration.value(),
            cadence: self.cadence.value(),
            elevation: self.elevation.value(),
        }
    }

    fn set_row_hidden(input: &HtmlInputElement, hidden: bool) {
        if let Ok(Some(row)) = input.closest(".form__row") {
            row.class_list().toggle_with_force(HIDDEN_ROW, hidden).ok();
        }
    }
}

impl FormView for DomForm {
    fn set_hidden(&mut self, hidden: bool) {
        self.form
            .class_list()
            .toggle_with_force("hidden", hidden)
            .ok();
    }

    fn focus_distance(&mut self) {
        self.distance.focus().ok();
    }

    fn clear_inputs(&mut self) {
        for input in [&self.distance, &self.duration, &self.cadence, &self.elevation] {
            input.set_value("");
        }
    }

    fn collapse(&mut self) {
        self.form.style().set_property("display", "none").ok();
    }

    fn layout_restorer(&self) -> Task {
        let form = self.form.clone();
        Box::new(move || {
            form.style().set_property("display", "grid").ok();
        })
    }

    fn show_metric_row(&mut self, workout_type: WorkoutType) {
        let running = workout_type == WorkoutType::Running;
        Self::set_row_hidden(&self.cadence, !running);
        Self::set_row_hidden(&self.elevation, running);
    }
}

/// The sidebar list. New entries go directly below the form.
pub struct DomList {
    anchor: Element,
}

impl DomList {
    pub fn new(anchor: Element) -> Self {
        Self { anchor }
    }
}

impl ListView for DomList {
    fn render(&mut self, workout: &Workout) {
        if let Err(e) = self
            .anchor
            .insert_adjacent_html("afterend", &entry_html(workout))
        {
            tracing::warn!(id = %workout.id, error = %crate::web::js_error(&e), "Failed to render workout");
        }
    }
}

pub struct BrowserHost;

impl Host for BrowserHost {
    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            window.alert_with_message(message).ok();
        }
    }

    fn reload(&self) {
        if let Some(window) = web_sys::window() {
            window.location().reload().ok();
        }
    }
}
