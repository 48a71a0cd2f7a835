//! Orientation filter selected by the filter controls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Orientation;

/// Which orientations are shown in the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Show every image
    #[default]
    All,
    /// Show portrait images only
    Portrait,
    /// Show landscape images only
    Landscape,
}

impl Filter {
    /// Get the value used in `data-filter` attributes.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Portrait => "portrait",
            Filter::Landscape => "landscape",
        }
    }

    /// Get all filters in control order.
    pub fn all() -> &'static [Filter] {
        &[Filter::All, Filter::Portrait, Filter::Landscape]
    }

    /// Check whether an image with this orientation passes the filter.
    pub fn accepts(&self, orientation: Orientation) -> bool {
        match self {
            Filter::All => true,
            Filter::Portrait => orientation == Orientation::Portrait,
            Filter::Landscape => orientation == Orientation::Landscape,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A `data-filter` value that names no known filter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown filter value: {0:?}")]
pub struct ParseFilterError(pub String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::all()
            .iter()
            .copied()
            .find(|filter| filter.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFilterError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts() {
        assert!(Filter::All.accepts(Orientation::Portrait));
        assert!(Filter::All.accepts(Orientation::Landscape));
        assert!(Filter::Portrait.accepts(Orientation::Portrait));
        assert!(!Filter::Portrait.accepts(Orientation::Landscape));
        assert!(Filter::Landscape.accepts(Orientation::Landscape));
        assert!(!Filter::Landscape.accepts(Orientation::Portrait));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<Filter>(), Ok(Filter::All));
        assert_eq!(" Portrait ".parse::<Filter>(), Ok(Filter::Portrait));
        assert_eq!("landscape".parse::<Filter>(), Ok(Filter::Landscape));
        assert_eq!(
            "square".parse::<Filter>(),
            Err(ParseFilterError("square".to_string()))
        );
    }

    #[test]
    fn test_filter_default_is_all() {
        assert_eq!(Filter::default(), Filter::All);
        assert_eq!(Filter::default().to_string(), "all");
    }
}
