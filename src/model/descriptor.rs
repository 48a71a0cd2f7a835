//! Decoded image descriptors and their orientation.

use serde::{Deserialize, Serialize};

/// Orientation of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide
    Portrait,
    /// Wider than tall, or square
    Landscape,
}

impl Orientation {
    /// Get the name used in `data-filter` attributes and config.
    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Natural pixel size reported by a finished decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square images count as landscape.
    pub fn orientation(&self) -> Orientation {
        if self.height > self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// An image whose probe decode completed.
///
/// Created once per successful probe and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// Source URL, shared by the probe and the visible tile
    pub url: String,
    /// Derived from the probe's natural size
    pub orientation: Orientation,
}

impl ImageDescriptor {
    /// Build a descriptor from a probe result.
    pub fn from_decode(url: impl Into<String>, dimensions: Dimensions) -> Self {
        Self {
            url: url.into(),
            orientation: dimensions.orientation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_dimensions() {
        assert_eq!(Dimensions::new(600, 800).orientation(), Orientation::Portrait);
        assert_eq!(Dimensions::new(800, 600).orientation(), Orientation::Landscape);
        assert_eq!(Dimensions::new(500, 500).orientation(), Orientation::Landscape);
    }

    #[test]
    fn test_descriptor_from_decode() {
        let descriptor = ImageDescriptor::from_decode("./images/a.jpg", Dimensions::new(10, 20));
        assert_eq!(descriptor.url, "./images/a.jpg");
        assert_eq!(descriptor.orientation, Orientation::Portrait);
    }
}
