// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sidebar workout list and popup text.

use std::fmt::Write;

use crate::models::{Workout, WorkoutKind};

/// Sink for rendered list entries.
pub trait ListView {
    fn render(&mut self, workout: &Workout);
}

/// Marker popup text, e.g. "🏃‍♂️ Running on April 14".
pub fn popup_content(workout: &Workout) -> String {
    format!("{} {}", workout.workout_type().icon(), workout.description)
}

/// `<li>` markup for one workout. The `data-id` attribute resolves clicks.
pub fn entry_html(workout: &Workout) -> String {
    let kind = workout.workout_type();
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<li class="workout workout--{kind}" data-id="{id}">
  <h2 class="workout__title">{title}</h2>
"#,
        kind = kind.as_str(),
        id = escape(workout.id.as_str()),
        title = escape(&workout.description),
    );
    push_detail(&mut html, kind.icon(), &workout.distance.to_string(), "km");
    push_detail(&mut html, "⏱", &workout.duration.to_string(), "min");

    match &workout.kind {
        WorkoutKind::Running { cadence, pace } => {
            push_detail(&mut html, "⚡️", &format!("{pace:.1}"), "min/km");
            push_detail(&mut html, "🦶🏼", &cadence.to_string(), "spm");
        }
        WorkoutKind::Cycling {
            elevation_gain,
            speed,
        } => {
            push_detail(&mut html, "⚡️", &format!("{speed:.1}"), "km/h");
            push_detail(&mut html, "⛰", &elevation_gain.to_string(), "m");
        }
    }

    html.push_str("</li>\n");
    html
}

fn push_detail(html: &mut String, icon: &str, value: &str, unit: &str) {
    let _ = write!(
        html,
        r#"  <div class="workout__details">
    <span class="workout__icon">{icon}</span>
    <span class="workout__value">{value}</span>
    <span class="workout__unit">{unit}</span>
  </div>
"#
    );
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
