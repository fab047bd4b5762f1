// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaflet map widget, driven through the global `L` namespace.

use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::error::{AppError, Result};
use crate::models::Coordinate;
use crate::services::map::{ClickHandler, MapWidget, PanOptions, Popup};
use crate::web::js_error;

#[derive(Serialize)]
struct TileOptions<'a> {
    attribution: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PopupOptions<'a> {
    max_width: u32,
    min_width: u32,
    auto_close: bool,
    close_on_click: bool,
    class_name: &'a str,
}

#[derive(Serialize)]
struct ViewOptions {
    animate: bool,
    pan: PanDuration,
}

#[derive(Serialize)]
struct PanDuration {
    duration: f64,
}

pub struct LeafletMap {
    container_id: String,
    tile_url: String,
    attribution: String,
    map: Option<JsValue>,
    click_listener: Option<Closure<dyn FnMut(JsValue)>>,
}

impl LeafletMap {
    pub fn new(container_id: &str, tile_url: &str, attribution: &str) -> Self {
        Self {
            container_id: container_id.to_string(),
            tile_url: tile_url.to_string(),
            attribution: attribution.to_string(),
            map: None,
            click_listener: None,
        }
    }

    fn map(&self) -> Result<&JsValue> {
        self.map.as_ref().ok_or(AppError::MapNotReady)
    }
}

impl MapWidget for LeafletMap {
    fn create(&mut self, center: Coordinate, zoom: u8) -> Result<()> {
        let l = leaflet()?;
        let map = call(&l, "map", &[JsValue::from_str(&self.container_id)])?;
        call(
            &map,
            "setView",
            &[lat_lng(center), JsValue::from_f64(f64::from(zoom))],
        )?;

        let tile_options = to_js(&TileOptions {
            attribution: &self.attribution,
        })?;
        let tiles = call(
            &l,
            "tileLayer",
            &[JsValue::from_str(&self.tile_url), tile_options],
        )?;
        call(&tiles, "addTo", &[map.clone()])?;

        self.map = Some(map);
        Ok(())
    }

    fn add_marker(&mut self, at: Coordinate, popup: &Popup) -> Result<()> {
        let l = leaflet()?;
        let map = self.map()?;

        let options = to_js(&PopupOptions {
            max_width: popup.max_width,
            min_width: popup.min_width,
            auto_close: popup.auto_close,
            close_on_click: popup.close_on_click,
            class_name: &popup.class_name,
        })?;
        let leaflet_popup = call(&l, "popup", &[options])?;

        let marker = call(&l, "marker", &[lat_lng(at)])?;
        call(&marker, "addTo", &[map.clone()])?;
        call(&marker, "bindPopup", &[leaflet_popup])?;
        call(
            &marker,
            "setPopupContent",
            &[JsValue::from_str(&popup.content)],
        )?;
        call(&marker, "openPopup", &[])?;
        Ok(())
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8, options: PanOptions) -> Result<()> {
        let map = self.map()?;
        let options = to_js(&ViewOptions {
            animate: options.animate,
            pan: PanDuration {
                duration: options.duration_secs,
            },
        })?;
        call(
            map,
            "setView",
            &[lat_lng(center), JsValue::from_f64(f64::from(zoom)), options],
        )?;
        Ok(())
    }

    fn on_click(&mut self, mut handler: ClickHandler) -> Result<()> {
        let map = self.map()?.clone();
        let listener = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            match event_lat_lng(&event) {
                Some(at) => handler(at),
                None => tracing::warn!("Map click without coordinates"),
            }
        });
        call(
            &map,
            "on",
            &[JsValue::from_str("click"), listener.as_ref().clone()],
        )?;
        self.click_listener = Some(listener);
        Ok(())
    }
}

fn leaflet() -> Result<JsValue> {
    let l = Reflect::get(&js_sys::global(), &JsValue::from_str("L"))
        .map_err(|e| AppError::Map(js_error(&e)))?;
    if l.is_undefined() {
        return Err(AppError::Map("Leaflet is not loaded".to_string()));
    }
    Ok(l)
}

/// Invoke `target[method](...args)`.
fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue> {
    let func = Reflect::get(target, &JsValue::from_str(method))
        .map_err(|e| AppError::Map(js_error(&e)))?
        .dyn_into::<Function>()
        .map_err(|_| AppError::Map(format!("{method} is not a function")))?;
    let array = Array::new();
    for arg in args {
        array.push(arg);
    }
    func.apply(target, &array)
        .map_err(|e| AppError::Map(format!("{method}: {}", js_error(&e))))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| AppError::Map(e.to_string()))
}

fn lat_lng(at: Coordinate) -> JsValue {
    let array = Array::new();
    array.push(&JsValue::from_f64(at.lat));
    array.push(&JsValue::from_f64(at.lng));
    array.into()
}

fn event_lat_lng(event: &JsValue) -> Option<Coordinate> {
    let latlng = Reflect::get(event, &JsValue::from_str("latlng")).ok()?;
    let lat = Reflect::get(&latlng, &JsValue::from_str("lat")).ok()?.as_f64()?;
    let lng = Reflect::get(&latlng, &JsValue::from_str("lng")).ok()?.as_f64()?;
    Some(Coordinate::new(lat, lng))
}
