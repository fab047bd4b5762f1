// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Browser entry point: binds the application to the page.
//!
//! Expects the markup from `web/index.html`: a `#map` container, a `.form`
//! with the typed inputs, a `.workouts` list, and Leaflet loaded as `L`.

pub mod console;
pub mod dom;
pub mod geolocation;
pub mod leaflet;
pub mod storage;
pub mod timers;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::app::{bootstrap, App, AppParts};
use crate::config::Config;
use crate::db::{KeyValueStore, MemoryStore};
use crate::models::{WorkoutId, WorkoutType};
use crate::time_utils::SystemClock;
use dom::{BrowserHost, DomForm, DomList};
use geolocation::BrowserGeolocation;
use leaflet::LeafletMap;
use storage::LocalStorage;

thread_local! {
    // Page-lifetime owner of the application; event listeners hold weak refs.
    static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
}

pub(crate) fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console::init_logging();

    let config = Config::default();
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let form = DomForm::find(&document).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let list_container = document
        .query_selector(".workouts")?
        .ok_or_else(|| JsValue::from_str("missing .workouts"))?;

    let store: Box<dyn KeyValueStore> = match LocalStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::warn!(error = %e, "localStorage unavailable, workouts will not persist");
            Box::new(MemoryStore::new())
        }
    };

    let parts = AppParts {
        store,
        map: Box::new(LeafletMap::new(
            "map",
            &config.tile_url,
            &config.tile_attribution,
        )),
        form: Box::new(form.clone()),
        list: Box::new(DomList::new(form.element().clone().into())),
        host: Box::new(BrowserHost),
        timers: Rc::new(timers::BrowserTimers),
        clock: Box::new(SystemClock),
    };
    let app = Rc::new(RefCell::new(App::new(config, parts)));

    wire_events(&app, &form, &list_container)?;
    bootstrap(&app, &BrowserGeolocation);

    APP.with(|slot| slot.replace(Some(app)));
    Ok(())
}

/// Clear every stored workout and reload the page.
#[wasm_bindgen]
pub fn reset() {
    APP.with(|slot| {
        if let Some(app) = slot.borrow().as_ref() {
            app.borrow_mut().reset();
        }
    });
}

fn wire_events(
    app: &Rc<RefCell<App>>,
    form: &DomForm,
    list_container: &web_sys::Element,
) -> Result<(), JsValue> {
    let on_submit = {
        let target = Rc::downgrade(app);
        let form = form.clone();
        Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            if let Some(app) = target.upgrade() {
                // Errors were already alerted or logged.
                let _ = app.borrow_mut().submit_form(&form.read());
            }
        })
    };
    form.element()
        .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    let on_type_change = {
        let target = Rc::downgrade(app);
        let select = form.type_select().clone();
        Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            let Ok(workout_type) = select.value().parse::<WorkoutType>() else {
                return;
            };
            if let Some(app) = target.upgrade() {
                app.borrow_mut().handle_type_change(workout_type);
            }
        })
    };
    form.type_select()
        .add_event_listener_with_callback("change", on_type_change.as_ref().unchecked_ref())?;
    on_type_change.forget();

    let on_list_click = {
        let target = Rc::downgrade(app);
        Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let id = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                .and_then(|el| el.closest(".workout").ok().flatten())
                .and_then(|el| el.get_attribute("data-id"));
            let (Some(id), Some(app)) = (id, target.upgrade()) else {
                return;
            };
            app.borrow_mut().handle_list_click(&WorkoutId::from(id.as_str()));
        })
    };
    list_container
        .add_event_listener_with_callback("click", on_list_click.as_ref().unchecked_ref())?;
    on_list_click.forget();

    Ok(())
}
