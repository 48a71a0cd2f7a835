//! Global constants for the gallery widget

/// Base URL of the remote contents-listing API
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository owner whose folder is listed
pub const DEFAULT_OWNER: &str = "bjornelvar";

/// Repository holding the images
pub const DEFAULT_REPO: &str = "pics";

/// Folder inside the repository (and next to the hosting page for the fallback index)
pub const DEFAULT_FOLDER: &str = "images";

/// Extensions accepted as images, compared case-insensitively
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Fade-in duration for newly loaded tiles, in milliseconds
pub const DEFAULT_FADE_MS: u32 = 500;

/// Text shown in the container when no image could be listed
pub const DEFAULT_EMPTY_MESSAGE: &str = "No images to show.";

/// DOM ids and selectors the host page must provide
pub mod dom {
    pub const CONTAINER_ID: &str = "gallery";
    pub const OVERLAY_ID: &str = "lightbox";
    pub const OVERLAY_IMAGE_ID: &str = "lightbox-img";
    pub const FILTER_SELECTOR: &str = ".filters a";

    /// Data attribute on filter controls naming their filter value
    pub const FILTER_ATTRIBUTE: &str = "data-filter";

    /// Class marking the active filter control
    pub const ACTIVE_CLASS: &str = "active";

    /// Class added to a tile once its visible decode completes
    pub const LOADED_CLASS: &str = "loaded";

    /// Class of the empty-state message element
    pub const EMPTY_CLASS: &str = "gallery-empty";
}
