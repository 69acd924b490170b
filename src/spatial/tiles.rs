//! Tile identifiers and the layered stacks that occupy map cells
//!
//! A [`Tile`] names one image inside a spritesheet; a [`Stack`] is the
//! bottom-to-top sequence of tiles drawn at a single cell. Both are plain
//! values with a canonical text form used for domain bookkeeping and the
//! persisted map format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a single tile image within a named spritesheet
///
/// Two tiles are equal exactly when both the sheet name and the index
/// match. The canonical text form is `sheet:index`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    /// Name of the spritesheet the tile belongs to
    #[serde(rename = "Spritesheet")]
    pub sheet: String,
    /// Position of the tile within the sheet
    #[serde(rename = "Index")]
    pub index: u32,
}

impl Tile {
    /// Create a tile reference from a sheet name and a tile index
    pub fn new(sheet: impl Into<String>, index: u32) -> Self {
        Self {
            sheet: sheet.into(),
            index,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.sheet, self.index)
    }
}

/// Ordered tiles layered at one map cell, bottom to top
///
/// Stacks are values with no identity of their own. The canonical text
/// form joins the layer forms with commas; the empty stack renders as the
/// empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stack {
    layers: Vec<Tile>,
}

impl Stack {
    /// The stack with no layers
    pub const EMPTY: Self = Self { layers: Vec::new() };

    /// Create a stack from bottom-to-top layers
    pub const fn new(layers: Vec<Tile>) -> Self {
        Self { layers }
    }

    /// Create a stack holding a single tile
    pub fn single(tile: Tile) -> Self {
        Self { layers: vec![tile] }
    }

    /// Number of layers in the stack
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Test whether the stack has no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Bottom-to-top view of the layers
    pub fn layers(&self) -> &[Tile] {
        &self.layers
    }

    /// Tile at a given layer, if present
    pub fn layer(&self, z: usize) -> Option<&Tile> {
        self.layers.get(z)
    }

    /// Push a tile on top of the stack
    pub fn push(&mut self, tile: Tile) {
        self.layers.push(tile);
    }

    /// Remove and return the topmost tile
    pub fn pop(&mut self) -> Option<Tile> {
        self.layers.pop()
    }

    /// Insert a tile at layer `z`, shifting upper layers towards the top
    ///
    /// A layer index at or beyond the top appends instead.
    pub fn insert_layer(&mut self, z: usize, tile: Tile) {
        let z = z.min(self.layers.len());
        self.layers.insert(z, tile);
    }

    /// Replace the tile at layer `z`
    ///
    /// A layer index at or beyond the top appends instead.
    pub fn replace_layer(&mut self, z: usize, tile: Tile) {
        match self.layers.get_mut(z) {
            Some(slot) => *slot = tile,
            None => self.layers.push(tile),
        }
    }

    /// Copy of the stack without rejected tiles or consecutive duplicates
    ///
    /// Tiles failing the `keep` predicate are dropped, as is any tile equal
    /// to the one kept directly beneath it.
    pub fn normalized<F>(&self, keep: F) -> Self
    where
        F: Fn(&Tile) -> bool,
    {
        let mut layers: Vec<Tile> = Vec::new();
        for tile in &self.layers {
            if !keep(tile) {
                continue;
            }
            if layers.last() == Some(tile) {
                continue;
            }
            layers.push(tile.clone());
        }
        Self { layers }
    }
}

impl From<Vec<Tile>> for Stack {
    fn from(layers: Vec<Tile>) -> Self {
        Self { layers }
    }
}

impl FromIterator<Tile> for Stack {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tile in &self.layers {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{tile}")?;
            first = false;
        }
        Ok(())
    }
}
