//! Data models for the gallery widget.

mod descriptor;
mod filter;

pub use descriptor::{Dimensions, ImageDescriptor, Orientation};
pub use filter::{Filter, ParseFilterError};
