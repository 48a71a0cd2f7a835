//! Bindings to the host page's elements.
//!
//! The page provides the container, the lightbox and its image by id, plus
//! filter controls carrying a `data-filter` attribute. Everything the widget
//! writes to the DOM goes through [`DomBindings`].

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use crate::config::DomConfig;
use crate::constants::dom::{ACTIVE_CLASS, EMPTY_CLASS, FILTER_ATTRIBUTE, LOADED_CLASS};
use crate::gallery::active_flags;
use crate::model::Filter;

/// Errors from looking up or touching page elements.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// No window or document (not running in a page)
    #[error("No window or document available")]
    NoDocument,

    /// A required element id is not on the page
    #[error("Missing element #{0}")]
    MissingElement(String),

    /// The element exists but has the wrong type
    #[error("Element #{id} is not an {expected}")]
    WrongElementType { id: String, expected: &'static str },

    /// A DOM call threw
    #[error("DOM call failed: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(e: JsValue) -> Self {
        DomError::Js(format!("{:?}", e))
    }
}

impl From<DomError> for JsValue {
    fn from(e: DomError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// A filter control and the filter it selects.
pub struct FilterControl {
    pub element: HtmlElement,
    pub filter: Option<Filter>,
}

/// Page elements used by one gallery.
pub struct DomBindings {
    document: Document,
    pub container: HtmlElement,
    pub overlay: HtmlElement,
    overlay_image: HtmlImageElement,
    pub filter_controls: Vec<FilterControl>,
}

impl DomBindings {
    /// Look up every element named in the config.
    pub fn find(config: &DomConfig) -> Result<Self, DomError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(DomError::NoDocument)?;

        let container =
            element_by_id::<HtmlElement>(&document, &config.container_id, "HTMLElement")?;
        let overlay = element_by_id::<HtmlElement>(&document, &config.overlay_id, "HTMLElement")?;
        let overlay_image = element_by_id::<HtmlImageElement>(
            &document,
            &config.overlay_image_id,
            "HTMLImageElement",
        )?;

        let nodes = document.query_selector_all(&config.filter_selector)?;
        let filter_controls = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(|element| {
                let filter = element
                    .get_attribute(FILTER_ATTRIBUTE)
                    .and_then(|value| match value.parse::<Filter>() {
                        Ok(filter) => Some(filter),
                        Err(e) => {
                            log::warn!("Ignoring filter control: {}", e);
                            None
                        }
                    });
                FilterControl { element, filter }
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Bound #{}, #{}, #{} and {} filter controls",
            config.container_id,
            config.overlay_id,
            config.overlay_image_id,
            filter_controls.len()
        );

        Ok(Self {
            document,
            container,
            overlay,
            overlay_image,
            filter_controls,
        })
    }

    /// Write `css` into the `<style id="{id}">` element, creating it in the
    /// document head on first use. Restarting a gallery rewrites it in place.
    pub fn inject_stylesheet(&self, id: &str, css: &str) -> Result<(), DomError> {
        let style = match self.document.get_element_by_id(id) {
            Some(existing) => existing,
            None => {
                let style = self.document.create_element("style")?;
                style.set_id(id);
                let head = self.document.head().ok_or(DomError::NoDocument)?;
                head.append_child(&style)?;
                style
            }
        };
        style.set_text_content(Some(css));
        Ok(())
    }

    /// Create a hidden tile for `url` and append it to the container.
    pub fn append_tile(&self, url: &str) -> Result<HtmlImageElement, DomError> {
        let image = HtmlImageElement::new()?;
        image.set_src(url);
        self.container.append_child(&image)?;
        Ok(image)
    }

    /// Flip a tile to loaded, which starts its fade-in.
    pub fn mark_loaded(&self, tile: &HtmlImageElement) -> Result<(), DomError> {
        tile.class_list().add_1(LOADED_CLASS)?;
        Ok(())
    }

    /// Move an already attached element to the end of the container. It is
    /// not reloaded.
    pub fn move_to_end(&self, element: &Element) -> Result<(), DomError> {
        self.container.append_child(element)?;
        Ok(())
    }

    pub fn remove(&self, element: &Element) {
        element.remove();
    }

    /// Remove every child of the container.
    pub fn clear_container(&self) {
        self.container.set_inner_html("");
    }

    /// Replace the container content with an empty-state message.
    pub fn show_empty(&self, message: &str) -> Result<(), DomError> {
        self.clear_container();
        let paragraph = self.document.create_element("p")?;
        paragraph.set_class_name(EMPTY_CLASS);
        paragraph.set_text_content(Some(message));
        self.container.append_child(&paragraph)?;
        Ok(())
    }

    /// Mark exactly the controls selecting `current` as active.
    pub fn sync_filter_controls(&self, current: Filter) -> Result<(), DomError> {
        let filters: Vec<Option<Filter>> = self
            .filter_controls
            .iter()
            .map(|control| control.filter)
            .collect();
        let flags = active_flags(&filters, current);
        for (control, active) in self.filter_controls.iter().zip(flags) {
            control
                .element
                .class_list()
                .toggle_with_force(ACTIVE_CLASS, active)?;
        }
        Ok(())
    }

    pub fn show_overlay(&self, url: &str) -> Result<(), DomError> {
        self.overlay_image.set_src(url);
        self.overlay.style().set_property("display", "flex")?;
        Ok(())
    }

    pub fn hide_overlay(&self) -> Result<(), DomError> {
        self.overlay.style().set_property("display", "none")?;
        Ok(())
    }
}

fn element_by_id<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<T, DomError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| DomError::WrongElementType {
            id: id.to_string(),
            expected,
        })
}
