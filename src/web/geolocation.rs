// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! `navigator.geolocation.getCurrentPosition`.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::models::Coordinate;
use crate::services::geolocation::{GeolocationError, PositionCallback, PositionProvider};
use crate::web::js_error;

pub struct BrowserGeolocation;

impl PositionProvider for BrowserGeolocation {
    fn request(&self, callback: PositionCallback) {
        let geolocation = web_sys::window().and_then(|w| w.navigator().geolocation().ok());
        let Some(geolocation) = geolocation else {
            callback(Err(GeolocationError::Unsupported));
            return;
        };

        // Exactly one of the two browser callbacks fires.
        let slot = Rc::new(RefCell::new(Some(callback)));
        let on_error_slot = slot.clone();

        let on_success = Closure::once_into_js(move |position: JsValue| {
            if let Some(callback) = slot.borrow_mut().take() {
                callback(read_position(&position));
            }
        });
        let on_error = Closure::once_into_js(move |error: JsValue| {
            if let Some(callback) = on_error_slot.borrow_mut().take() {
                callback(Err(read_error(&error)));
            }
        });

        if let Err(e) = geolocation.get_current_position_with_error_callback(
            on_success.unchecked_ref(),
            Some(on_error.unchecked_ref()),
        ) {
            tracing::warn!(error = %js_error(&e), "getCurrentPosition threw");
        }
    }
}

fn number(target: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(target, &JsValue::from_str(key)).ok()?.as_f64()
}

fn read_position(position: &JsValue) -> Result<Coordinate, GeolocationError> {
    let coords = Reflect::get(position, &JsValue::from_str("coords"))
        .map_err(|e| GeolocationError::Unavailable(js_error(&e)))?;
    match (number(&coords, "latitude"), number(&coords, "longitude")) {
        (Some(lat), Some(lng)) => Ok(Coordinate::new(lat, lng)),
        _ => Err(GeolocationError::Unavailable(
            "position without coordinates".to_string(),
        )),
    }
}

fn read_error(error: &JsValue) -> GeolocationError {
    let code = number(error, "code").unwrap_or(2.0) as u16;
    let message = Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_default();
    GeolocationError::from_code(code, message)
}
