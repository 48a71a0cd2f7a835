//! Visible tiles and their height ordering.

use std::fmt;

/// Identifier of a visible tile. Never reused, so a late event from a
/// cleared tile cannot hit a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile-{}", self.0)
    }
}

/// Load status of a visible tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileStatus {
    /// Inserted, visible decode still running
    Pending,
    /// Visible decode finished with this natural height
    Loaded { height: u32 },
}

/// A visible image in the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub url: String,
    pub status: TileStatus,
}

impl Tile {
    /// Height used for ordering; pending tiles have no decoded height yet.
    pub fn height(&self) -> u32 {
        match self.status {
            TileStatus::Pending => 0,
            TileStatus::Loaded { height } => height,
        }
    }
}

/// Ordered tiles of the gallery container.
#[derive(Debug, Default)]
pub struct Container {
    tiles: Vec<Tile>,
    next_id: u64,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pending tile at the end.
    pub fn push(&mut self, url: impl Into<String>) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        self.tiles.push(Tile {
            id,
            url: url.into(),
            status: TileStatus::Pending,
        });
        id
    }

    /// Drop every tile. Ids keep counting up.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    /// Record the natural height of a finished visible decode.
    /// Returns false when the tile is gone.
    pub fn mark_loaded(&mut self, id: TileId, height: u32) -> bool {
        match self.tiles.iter_mut().find(|tile| tile.id == id) {
            Some(tile) => {
                tile.status = TileStatus::Loaded { height };
                true
            }
            None => false,
        }
    }

    /// Remove one tile, e.g. after its visible decode failed.
    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        let index = self.tiles.iter().position(|tile| tile.id == id)?;
        Some(self.tiles.remove(index))
    }

    /// Stable sort by descending height, returning the new order.
    pub fn sort(&mut self) -> Vec<TileId> {
        self.tiles.sort_by(|a, b| b.height().cmp(&a.height()));
        self.order()
    }

    /// Current order of tile ids.
    pub fn order(&self) -> Vec<TileId> {
        self.tiles.iter().map(|tile| tile.id).collect()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Check that heights never increase along the current order.
    pub fn is_sorted(&self) -> bool {
        self.tiles
            .windows(2)
            .all(|pair| pair[0].height() >= pair[1].height())
    }
}
