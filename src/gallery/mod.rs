//! Gallery state: the active filter, its generation, the visible tiles and
//! the lightbox.
//!
//! Everything here is synchronous and platform independent. The browser layer
//! feeds in asynchronous completions (probe decoded, tile loaded, clicks) and
//! mirrors the resulting order and overlay state into the DOM.
//!
//! Completions may arrive in any order and may belong to an older filter
//! selection. Every probe is tagged with the [`Generation`] that was current
//! when it started, and [`Gallery::insert`] drops results from superseded
//! generations.

mod container;
mod overlay;

use std::fmt;

use crate::model::{Filter, ImageDescriptor};

pub use container::{Container, Tile, TileId, TileStatus};
pub use overlay::Overlay;

/// One filter-selection cycle. Bumped on every filter click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of a filter selection, used to update the controls and restart
/// loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterTransition {
    pub previous: Filter,
    pub current: Filter,
    /// Generation new probes must be tagged with
    pub generation: Generation,
}

/// Which filter controls should carry the active mark for `current`.
///
/// `controls` holds the filter each control selects, `None` for controls
/// whose value is unknown. Those are never active.
pub fn active_flags(controls: &[Option<Filter>], current: Filter) -> Vec<bool> {
    controls
        .iter()
        .map(|control| *control == Some(current))
        .collect()
}

/// State of one gallery instance.
#[derive(Debug, Default)]
pub struct Gallery {
    filter: Filter,
    generation: Generation,
    container: Container,
    overlay: Overlay,
}

impl Gallery {
    /// Gallery showing all orientations, nothing loaded yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Check whether work started under `generation` is still wanted.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation == generation
    }

    /// Switch filters. The container is emptied before this returns and every
    /// in-flight result of the previous generation becomes stale. Selecting
    /// the active filter again restarts loading as well.
    pub fn select_filter(&mut self, filter: Filter) -> FilterTransition {
        let previous = self.filter;
        self.filter = filter;
        self.generation = self.generation.next();
        self.container.clear();

        log::debug!(
            "Filter {} -> {}, generation {}",
            previous,
            filter,
            self.generation
        );

        FilterTransition {
            previous,
            current: filter,
            generation: self.generation,
        }
    }

    /// Insert a probed image as a pending tile.
    ///
    /// Returns `None` when the probe belongs to an old generation or its
    /// orientation does not pass the active filter.
    pub fn insert(
        &mut self,
        generation: Generation,
        descriptor: &ImageDescriptor,
    ) -> Option<TileId> {
        if !self.is_current(generation) {
            log::debug!(
                "Dropping stale probe of {} from generation {} (now {})",
                descriptor.url,
                generation,
                self.generation
            );
            return None;
        }
        if !self.filter.accepts(descriptor.orientation) {
            log::trace!(
                "Skipping {} ({} does not pass {})",
                descriptor.url,
                descriptor.orientation.name(),
                self.filter
            );
            return None;
        }

        let id = self.container.push(descriptor.url.clone());
        log::trace!("Inserted {} as {}", descriptor.url, id);
        Some(id)
    }

    /// Record a finished visible decode and re-sort.
    ///
    /// Returns the new tile order, or `None` if the tile was cleared in the
    /// meantime.
    pub fn mark_loaded(&mut self, id: TileId, natural_height: u32) -> Option<Vec<TileId>> {
        if !self.container.mark_loaded(id, natural_height) {
            log::debug!("Ignoring load of cleared {}", id);
            return None;
        }
        Some(self.sort())
    }

    /// Drop a tile whose visible decode failed. Nothing is retried.
    pub fn discard(&mut self, id: TileId) -> bool {
        let removed = self.container.remove(id).is_some();
        if removed {
            log::debug!("Discarded {}", id);
        }
        removed
    }

    /// Reorder whatever tiles exist now by descending height.
    pub fn sort(&mut self) -> Vec<TileId> {
        self.container.sort()
    }

    /// Show a tile full-size. Returns the URL on display.
    pub fn open_overlay(&mut self, id: TileId) -> Option<&str> {
        let url = self.container.get(id)?.url.clone();
        self.overlay.show(url);
        self.overlay.url()
    }

    pub fn close_overlay(&mut self) {
        self.overlay.hide();
    }
}
