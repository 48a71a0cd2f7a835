//! Photo Gallery - browser image gallery widget
//!
//! Lists images from a remote contents API (or a local directory index),
//! fades each one in as it loads, keeps the tiles sorted by descending height,
//! filters by orientation and shows a full-size lightbox on click.
//!
//! The listing, filter, ordering and lightbox logic is platform independent;
//! the browser bindings are only compiled for `wasm32`.

pub mod config;
pub mod constants;
pub mod gallery;
pub mod model;
pub mod source;

pub use config::GalleryConfig;
pub use gallery::Gallery;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
mod wasm_dom;
#[cfg(target_arch = "wasm32")]
mod wasm_fetch;
#[cfg(target_arch = "wasm32")]
mod wasm_gallery;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
