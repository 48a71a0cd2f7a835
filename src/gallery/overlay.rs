//! Full-size single image viewer.

/// Lightbox state. Only clicks move between the two states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    Hidden,
    Showing(String),
}

impl Overlay {
    pub fn show(&mut self, url: impl Into<String>) {
        *self = Overlay::Showing(url.into());
    }

    pub fn hide(&mut self) {
        *self = Overlay::Hidden;
    }

    /// URL on display, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Overlay::Hidden => None,
            Overlay::Showing(url) => Some(url),
        }
    }

    pub fn is_showing(&self) -> bool {
        matches!(self, Overlay::Showing(_))
    }
}
