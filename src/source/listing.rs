//! Turning raw listings into image URLs.

use std::collections::HashSet;

use serde::Deserialize;

use crate::config::SourceConfig;

/// One entry of the remote contents listing. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    /// `file`, `dir`, `symlink` or `submodule`
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    /// Null for directories
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ContentEntry {
    fn is_file(&self) -> bool {
        self.kind == "file"
    }
}

/// Parse the remote listing body.
pub fn parse_contents(body: &str) -> Result<Vec<ContentEntry>, serde_json::Error> {
    serde_json::from_str(body)
}

/// Direct-download URLs of the image files in a remote listing.
pub fn remote_image_urls(source: &SourceConfig, entries: &[ContentEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| entry.is_file() && source.is_image_name(&entry.name))
        .filter_map(|entry| entry.download_url.clone())
        .collect()
}

/// Local URLs of the images linked from a directory index.
///
/// Relative hrefs are joined onto the configured folder as they are, so
/// nested links keep their subpath. Absolute links, parent links, query-only
/// sort links and duplicates (icon plus name anchors) are skipped. The
/// extension check applies to the whole href, so a query suffix rejects it.
pub fn fallback_image_urls<S: AsRef<str>>(source: &SourceConfig, hrefs: &[S]) -> Vec<String> {
    let folder = source.folder.trim_matches('/');
    let mut seen = HashSet::new();

    hrefs
        .iter()
        .filter_map(|href| relative_path_of(href.as_ref()))
        .filter(|path| source.is_image_name(path))
        .filter(|path| seen.insert(path.to_string()))
        .map(|path| format!("./{}/{}", folder, path))
        .collect()
}

fn relative_path_of(href: &str) -> Option<&str> {
    let path = href.strip_prefix("./").unwrap_or(href);
    let absolute = path.starts_with('/') || path.contains("://");
    let navigational = path.starts_with('?') || path.starts_with('#');
    let parent = path.starts_with("../") || path == "..";

    (!path.is_empty() && !absolute && !navigational && !parent).then_some(path)
}
