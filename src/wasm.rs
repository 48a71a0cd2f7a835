use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Event;

use crate::config::{GalleryConfig, LogLevel};
use crate::model::Filter;
use crate::wasm_gallery::WebGallery;

thread_local! {
    /// The gallery attached to this page, kept alive for the page lifetime
    static GALLERY: RefCell<Option<WebGallery>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Logger first, so problems reading the stored config are reported
    init_logging(LogLevel::default());
    let config = GalleryConfig::load_from_local_storage().unwrap_or_default();
    init_logging(config.log_level);

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        log::error!("Gallery needs a browser document");
        return;
    };

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(move |_event: Event| attach(config));
        if let Err(e) = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            log::error!("Could not wait for DOMContentLoaded: {:?}", e);
        }
    } else {
        attach(config);
    }
}

/// Replace the running gallery with one built from a JSON configuration.
#[wasm_bindgen(js_name = startGalleryWithConfig)]
pub fn start_gallery_with_config(json: &str) -> Result<(), JsValue> {
    let config = GalleryConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    init_logging(config.log_level);

    // Detach the running gallery first so its in-flight work cannot touch the page
    drop(GALLERY.with(|slot| slot.borrow_mut().take()));

    let gallery = WebGallery::attach(config)?;
    GALLERY.with(|slot| {
        *slot.borrow_mut() = Some(gallery);
    });
    Ok(())
}

/// Persist a JSON configuration for the next page load.
#[wasm_bindgen(js_name = saveGalleryConfig)]
pub fn save_gallery_config(json: &str) -> Result<(), JsValue> {
    GalleryConfig::from_json(json)
        .and_then(|config| config.save_to_local_storage())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Select a filter by name (`all`, `portrait`, `landscape`).
#[wasm_bindgen(js_name = selectGalleryFilter)]
pub fn select_gallery_filter(name: &str) -> Result<(), JsValue> {
    let filter: Filter = name.parse().map_err(|e: crate::model::ParseFilterError| {
        JsValue::from_str(&e.to_string())
    })?;

    GALLERY.with(|slot| match slot.borrow().as_ref() {
        Some(gallery) => {
            gallery.select_filter(filter);
            Ok(())
        }
        None => Err(JsValue::from_str("Gallery is not attached")),
    })
}

fn attach(config: GalleryConfig) {
    match WebGallery::attach(config) {
        Ok(gallery) => GALLERY.with(|slot| {
            *slot.borrow_mut() = Some(gallery);
        }),
        Err(e) => log::error!("Gallery failed to start: {}", e),
    }
}

fn init_logging(level: LogLevel) {
    // The logger can only be installed once; later calls just adjust the level
    if console_log::init_with_level(level.to_level()).is_err() {
        log::set_max_level(level.to_level_filter());
    }
}
