//! Configuration support for the gallery widget.
//!
//! The host page can hand a JSON configuration to the entry point, or one can
//! be persisted in localStorage. Missing fields fall back to the defaults in
//! [`crate::constants`].

use serde::{Deserialize, Serialize};

use crate::constants;

/// Log level setting for the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        self.to_level().to_level_filter()
    }

    /// Convert to log crate's Level.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Current configuration format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Version of the configuration format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Where image URLs are listed from
    #[serde(default)]
    pub source: SourceConfig,

    /// Element ids and selectors of the host page
    #[serde(default)]
    pub dom: DomConfig,

    /// Fade timing and empty-state text
    #[serde(default)]
    pub appearance: AppearanceConfig,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// Listing source section of the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the contents-listing API
    pub api_base: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Folder in the repository, and next to the page for the fallback index
    pub folder: String,
    /// Accepted image extensions, without the dot
    pub extensions: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base: constants::DEFAULT_API_BASE.to_string(),
            owner: constants::DEFAULT_OWNER.to_string(),
            repo: constants::DEFAULT_REPO.to_string(),
            folder: constants::DEFAULT_FOLDER.to_string(),
            extensions: constants::DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl SourceConfig {
    /// URL of the remote contents listing.
    pub fn api_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.folder.trim_matches('/')
        )
    }

    /// URL of the local directory index, relative to the hosting page.
    pub fn fallback_url(&self) -> String {
        format!("./{}/", self.folder.trim_matches('/'))
    }

    /// Check if a name or path ends in one of the accepted extensions.
    pub fn is_image_name(&self, name: &str) -> bool {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return false;
        };
        self.extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(ext))
    }
}

/// DOM contract section of the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomConfig {
    pub container_id: String,
    pub overlay_id: String,
    pub overlay_image_id: String,
    /// Selector matching every filter control
    pub filter_selector: String,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            container_id: constants::dom::CONTAINER_ID.to_string(),
            overlay_id: constants::dom::OVERLAY_ID.to_string(),
            overlay_image_id: constants::dom::OVERLAY_IMAGE_ID.to_string(),
            filter_selector: constants::dom::FILTER_SELECTOR.to_string(),
        }
    }
}

/// Appearance section of the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Fade-in duration in milliseconds
    pub fade_ms: u32,
    /// Message shown when nothing could be listed
    pub empty_message: String,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            fade_ms: constants::DEFAULT_FADE_MS,
            empty_message: constants::DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }
}

impl AppearanceConfig {
    /// Stylesheet injected into the page head: tiles start hidden and fade in
    /// once marked loaded.
    pub fn stylesheet(&self, container_id: &str) -> String {
        format!(
            "#{id} img {{ opacity: 0; transition: opacity {ms}ms ease; }}\n\
             #{id} img.{loaded} {{ opacity: 1; }}\n",
            id = container_id,
            ms = self.fade_ms,
            loaded = constants::dom::LOADED_CLASS,
        )
    }

    /// Id of the `<style>` element holding [`Self::stylesheet`]. One per
    /// container, so a restarted gallery replaces its rules.
    pub fn stylesheet_id(container_id: &str) -> String {
        format!("{}-style", container_id)
    }
}

impl GalleryConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            source: SourceConfig::default(),
            dom: DomConfig::default(),
            appearance: AppearanceConfig::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// LocalStorage key for WASM config persistence.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "gallery-config";

    /// Try to load configuration from localStorage (WASM only).
    /// Returns None if not found or can't be parsed.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded gallery configuration from localStorage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse gallery config from localStorage: {}", e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("No gallery config found in localStorage");
                None
            }
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                None
            }
        }
    }

    /// Save configuration to localStorage (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn save_to_local_storage(&self) -> Result<(), ConfigError> {
        let window = web_sys::window()
            .ok_or_else(|| ConfigError::StorageError("No window object available".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| ConfigError::StorageError(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| ConfigError::StorageError("localStorage not available".to_string()))?;

        let json = self.to_json()?;

        storage
            .set_item(Self::LOCALSTORAGE_KEY, &json)
            .map_err(|e| {
                ConfigError::StorageError(format!("Failed to save to localStorage: {:?}", e))
            })?;

        log::info!("Saved gallery configuration to localStorage");
        Ok(())
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// Storage error (localStorage in WASM)
    #[error("Storage error: {0}")]
    StorageError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let source = SourceConfig::default();
        assert_eq!(
            source.api_url(),
            "https://api.github.com/repos/bjornelvar/pics/contents/images"
        );
        assert_eq!(source.fallback_url(), "./images/");
    }

    #[test]
    fn test_urls_tolerate_slashes() {
        let source = SourceConfig {
            api_base: "https://example.test/".to_string(),
            folder: "/photos/".to_string(),
            ..SourceConfig::default()
        };
        assert_eq!(
            source.api_url(),
            "https://example.test/repos/bjornelvar/pics/contents/photos"
        );
        assert_eq!(source.fallback_url(), "./photos/");
    }

    #[test]
    fn test_is_image_name() {
        let source = SourceConfig::default();
        assert!(source.is_image_name("a.jpg"));
        assert!(source.is_image_name("B.JPEG"));
        assert!(source.is_image_name("c.Png"));
        assert!(source.is_image_name("d.gif"));
        assert!(!source.is_image_name("e.webp"));
        assert!(!source.is_image_name("notes.txt"));
        assert!(!source.is_image_name("jpg"));
        assert!(source.is_image_name(".png"));
        assert!(source.is_image_name("sub/dir/f.jpg"));
        assert!(!source.is_image_name("b.jpg?v=2"));
        assert!(!source.is_image_name("archive.jpg.zip"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GalleryConfig::from_json(r#"{ "source": { "owner": "someone" } }"#)
            .expect("valid config");
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.source.owner, "someone");
        assert_eq!(config.source.repo, constants::DEFAULT_REPO);
        assert_eq!(config.dom, DomConfig::default());
        assert_eq!(config.appearance.fade_ms, constants::DEFAULT_FADE_MS);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = GalleryConfig::new();
        config.log_level = LogLevel::Debug;
        config.appearance.fade_ms = 250;

        let json = config.to_json().expect("serializable");
        assert!(json.contains("\"log_level\": \"debug\""));
        assert_eq!(GalleryConfig::from_json(&json).expect("parses"), config);
    }

    #[test]
    fn test_version_too_new() {
        let result = GalleryConfig::from_json(r#"{ "version": 99 }"#);
        assert!(matches!(
            result,
            Err(ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            })
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            GalleryConfig::from_json("not json"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_stylesheet_uses_fade_duration() {
        let appearance = AppearanceConfig {
            fade_ms: 300,
            ..AppearanceConfig::default()
        };
        let css = appearance.stylesheet("gallery");
        assert!(css.contains("#gallery img { opacity: 0; transition: opacity 300ms ease; }"));
        assert!(css.contains("#gallery img.loaded { opacity: 1; }"));
    }

    #[test]
    fn test_stylesheet_id_is_per_container() {
        assert_eq!(AppearanceConfig::stylesheet_id("gallery"), "gallery-style");
        assert_ne!(
            AppearanceConfig::stylesheet_id("gallery"),
            AppearanceConfig::stylesheet_id("other")
        );
        assert_eq!(
            AppearanceConfig::stylesheet_id("gallery"),
            AppearanceConfig::stylesheet_id("gallery")
        );
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Warn.to_level(), log::Level::Warn);
        assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
    }
}
