//! Browser controller: wires [`Gallery`] to fetch, image decodes and clicks.
//!
//! All state lives behind one `Rc`. Borrows of the gallery state never span
//! an `.await`, so callbacks interleaving on the event loop always see a
//! consistent state.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Event, EventTarget, HtmlElement, HtmlImageElement, Node};

use crate::config::{AppearanceConfig, GalleryConfig};
use crate::constants::dom::FILTER_ATTRIBUTE;
use crate::gallery::{FilterTransition, Gallery, Generation, TileId};
use crate::model::{Dimensions, Filter, ImageDescriptor};
use crate::source::resolve_image_urls;
use crate::wasm_dom::{DomBindings, DomError};
use crate::wasm_fetch::BrowserTransport;

/// A registered DOM listener, removed again when the gallery is dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

struct Inner {
    config: GalleryConfig,
    dom: DomBindings,
    transport: BrowserTransport,
    state: RefCell<Gallery>,
    tiles: RefCell<HashMap<TileId, HtmlImageElement>>,
    listeners: RefCell<Vec<Listener>>,
}

/// A gallery attached to the current page.
pub struct WebGallery {
    inner: Rc<Inner>,
}

impl WebGallery {
    /// Bind to the page, install listeners and start the first load.
    pub fn attach(config: GalleryConfig) -> Result<Self, DomError> {
        let dom = DomBindings::find(&config.dom)?;
        let container_id = &config.dom.container_id;
        dom.inject_stylesheet(
            &AppearanceConfig::stylesheet_id(container_id),
            &config.appearance.stylesheet(container_id),
        )?;

        let inner = Rc::new(Inner {
            transport: BrowserTransport::new()?,
            dom,
            config,
            state: RefCell::new(Gallery::new()),
            tiles: RefCell::new(HashMap::new()),
            listeners: RefCell::new(Vec::new()),
        });

        // Owned from here on, so a failure below detaches whatever was installed
        let gallery = Self { inner };
        let inner = &gallery.inner;

        inner.install_listeners()?;
        inner
            .dom
            .sync_filter_controls(inner.state.borrow().filter())?;
        inner.dom.hide_overlay()?;

        log::info!(
            "Gallery attached to #{} ({} filter controls)",
            inner.config.dom.container_id,
            inner.dom.filter_controls.len()
        );

        Inner::load(inner);
        Ok(gallery)
    }

    /// Select a filter as if its control had been clicked.
    pub fn select_filter(&self, filter: Filter) {
        Inner::select_filter(&self.inner, filter);
    }
}

impl Drop for WebGallery {
    fn drop(&mut self) {
        self.inner.detach();
    }
}

impl Inner {
    fn install_listeners(self: &Rc<Self>) -> Result<(), DomError> {
        for control in &self.dom.filter_controls {
            let weak = Rc::downgrade(self);
            self.listen(control.element.clone().into(), "click", move |event| {
                event.prevent_default();
                if let Some(inner) = weak.upgrade() {
                    inner.on_filter_click(&event);
                }
            })?;
        }

        // One delegated listener for every tile, present or future
        let weak = Rc::downgrade(self);
        self.listen(self.dom.container.clone().into(), "click", move |event| {
            if let Some(inner) = weak.upgrade() {
                inner.on_container_click(&event);
            }
        })?;

        let weak = Rc::downgrade(self);
        self.listen(self.dom.overlay.clone().into(), "click", move |_event| {
            if let Some(inner) = weak.upgrade() {
                inner.on_overlay_click();
            }
        })?;

        Ok(())
    }

    /// Remove the listeners and invalidate in-flight work. Pending futures
    /// still hold the state, but their generation is no longer current.
    fn detach(&self) {
        for listener in self.listeners.borrow_mut().drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.closure.as_ref().unchecked_ref(),
            );
        }

        let mut state = self.state.borrow_mut();
        let filter = state.filter();
        state.select_filter(filter);
        self.tiles.borrow_mut().clear();
        self.dom.clear_container();
        log::info!("Gallery detached from #{}", self.config.dom.container_id);
    }

    fn listen(
        &self,
        target: EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), DomError> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.listeners.borrow_mut().push(Listener {
            target,
            event,
            closure,
        });
        Ok(())
    }

    /// Resolve the listing and probe every image under the current generation.
    fn load(self: &Rc<Self>) {
        let inner = Rc::clone(self);
        let generation = self.state.borrow().generation();

        spawn_local(async move {
            let result = resolve_image_urls(&inner.config.source, &inner.transport).await;

            if !inner.state.borrow().is_current(generation) {
                log::debug!("Discarding listing of superseded generation {}", generation);
                return;
            }

            match result {
                Ok(urls) if urls.is_empty() => {
                    log::warn!("Listing contains no images");
                    inner.show_empty();
                }
                Ok(urls) => {
                    log::info!("Probing {} images for generation {}", urls.len(), generation);
                    for url in urls {
                        Inner::probe(&inner, url, generation);
                    }
                }
                Err(e) => {
                    log::error!("Could not list images: {}", e);
                    inner.show_empty();
                }
            }
        });
    }

    /// Decode `url` off-screen, then insert it if still wanted.
    fn probe(self: &Rc<Self>, url: String, generation: Generation) {
        let inner = Rc::clone(self);

        spawn_local(async move {
            match decode_dimensions(&url).await {
                Ok(dimensions) => {
                    let descriptor = ImageDescriptor::from_decode(url, dimensions);
                    Inner::insert(&inner, generation, descriptor);
                }
                Err(e) => log::debug!("Dropping {}: probe decode failed: {:?}", url, e),
            }
        });
    }

    fn insert(self: &Rc<Self>, generation: Generation, descriptor: ImageDescriptor) {
        let Some(id) = self.state.borrow_mut().insert(generation, &descriptor) else {
            return;
        };

        let tile = match self.dom.append_tile(&descriptor.url) {
            Ok(tile) => tile,
            Err(e) => {
                log::error!("Could not add {}: {}", descriptor.url, e);
                self.state.borrow_mut().discard(id);
                return;
            }
        };
        self.tiles.borrow_mut().insert(id, tile.clone());

        let decoded: js_sys::Promise = tile.decode();
        let inner = Rc::clone(self);
        spawn_local(async move {
            match JsFuture::from(decoded).await {
                Ok(_) => inner.on_tile_loaded(id, &tile),
                Err(e) => {
                    log::debug!("Dropping {}: tile decode failed: {:?}", descriptor.url, e);
                    inner.state.borrow_mut().discard(id);
                    if inner.tiles.borrow_mut().remove(&id).is_some() {
                        inner.dom.remove(&tile);
                    }
                }
            }
        });
    }

    fn on_tile_loaded(&self, id: TileId, tile: &HtmlImageElement) {
        let Some(order) = self.state.borrow_mut().mark_loaded(id, tile.natural_height()) else {
            return;
        };

        if let Err(e) = self.dom.mark_loaded(tile) {
            log::warn!("Could not mark {} loaded: {}", id, e);
        }
        self.apply_order(&order);
    }

    /// Re-append tiles in `order`. Attached elements are moved, not reloaded.
    fn apply_order(&self, order: &[TileId]) {
        let tiles = self.tiles.borrow();
        for id in order {
            if let Some(tile) = tiles.get(id) {
                if let Err(e) = self.dom.move_to_end(tile) {
                    log::warn!("Could not reorder {}: {}", id, e);
                }
            }
        }
    }

    fn on_filter_click(self: &Rc<Self>, event: &Event) {
        let Some(control) = event
            .current_target()
            .and_then(|target| target.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };

        let value = control.get_attribute(FILTER_ATTRIBUTE).unwrap_or_default();
        match value.parse::<Filter>() {
            Ok(filter) => Inner::select_filter(self, filter),
            Err(e) => log::warn!("{}", e),
        }
    }

    /// Clear and reload under a new generation. The controls are synced last;
    /// failing to restyle them must not leave the container empty.
    fn select_filter(self: &Rc<Self>, filter: Filter) {
        let transition: FilterTransition = self.state.borrow_mut().select_filter(filter);
        log::info!(
            "Filter {} -> {} (generation {})",
            transition.previous,
            transition.current,
            transition.generation
        );

        self.tiles.borrow_mut().clear();
        self.dom.clear_container();
        Inner::load(self);

        if let Err(e) = self.dom.sync_filter_controls(transition.current) {
            log::warn!("Could not mark {} control active: {}", transition.current, e);
        }
    }

    fn on_container_click(&self, event: &Event) {
        let Some(target) = event
            .target()
            .and_then(|target| target.dyn_into::<Node>().ok())
        else {
            return;
        };

        let clicked = self
            .tiles
            .borrow()
            .iter()
            .find(|(_, tile)| tile.is_same_node(Some(&target)))
            .map(|(id, _)| *id);
        let Some(id) = clicked else {
            return;
        };

        let url = self.state.borrow_mut().open_overlay(id).map(str::to_string);
        if let Some(url) = url {
            if let Err(e) = self.dom.show_overlay(&url) {
                log::warn!("Could not open lightbox: {}", e);
            }
        }
    }

    fn on_overlay_click(&self) {
        self.state.borrow_mut().close_overlay();
        if let Err(e) = self.dom.hide_overlay() {
            log::warn!("Could not close lightbox: {}", e);
        }
    }

    fn show_empty(&self) {
        if let Err(e) = self.dom.show_empty(&self.config.appearance.empty_message) {
            log::warn!("Could not show empty state: {}", e);
        }
    }
}

/// Decode `url` in an element that is never attached and read its size.
async fn decode_dimensions(url: &str) -> Result<Dimensions, JsValue> {
    let probe = HtmlImageElement::new()?;
    probe.set_src(url);
    let decoded: js_sys::Promise = probe.decode();
    JsFuture::from(decoded).await?;
    Ok(Dimensions::new(probe.natural_width(), probe.natural_height()))
}
