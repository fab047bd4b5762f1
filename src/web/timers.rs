// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! `setTimeout` / `clearTimeout`.

use std::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::error::{AppError, Result};
use crate::services::timers::{Task, TimerHandle, Timers};
use crate::web::js_error;

pub struct BrowserTimers;

impl Timers for BrowserTimers {
    fn set_timeout(&self, delay: Duration, task: Task) -> Result<TimerHandle> {
        let window = web_sys::window()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("no window")))?;
        let callback = Closure::once_into_js(move || task());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis,
            )
            .map_err(|e| AppError::Internal(anyhow::anyhow!(js_error(&e))))?;
        Ok(TimerHandle(id))
    }

    fn clear_timeout(&self, handle: TimerHandle) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(handle.0);
        }
    }
}
