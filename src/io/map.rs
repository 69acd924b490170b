//! Persisted map document and conversions to the in-memory grid
//!
//! The document mirrors what the editor writes to disk: tile geometry, a
//! spritesheet registry, and the sparse grid of tile stacks. Grid keys are
//! serialised as the decimal form of their signed coordinates, column
//! first, then row.

use crate::io::error::{MapError, Result};
use crate::spatial::grid::Tilemap;
use crate::spatial::tiles::Stack;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;

/// Geometry of one spritesheet referenced by the map
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SpritesheetMeta {
    /// Source image name
    pub name: String,
    /// Edge length of a square tile in pixels
    pub size: u32,
    /// Pixel gap between adjacent tiles in the sheet
    pub spacing: u32,
    /// Tiles per sheet row
    pub width: u32,
    /// Tile rows in the sheet
    pub height: u32,
}

/// On-disk map document
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MapFile {
    /// Rendered tile width in pixels
    pub tile_width: u32,
    /// Rendered tile height in pixels
    pub tile_height: u32,
    /// Spritesheets that tile references resolve against
    pub spritesheets: BTreeMap<String, SpritesheetMeta>,
    /// Tile stacks keyed by column, then row
    pub tilemap: BTreeMap<i32, BTreeMap<i32, Stack>>,
}

impl MapFile {
    /// Read a map document from disk
    ///
    /// A missing file is not an error: it reads as the empty map, matching
    /// how the editor bootstraps a fresh document.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::FileSystem`] when the file exists but cannot be
    /// opened, and [`MapError::Serialization`] when its contents do not
    /// parse as a map document.
    pub fn load(path: &Path) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(MapError::FileSystem {
                    path: path.to_path_buf(),
                    operation: "open",
                    source,
                });
            }
        };
        serde_json::from_reader(BufReader::new(file)).map_err(|source| MapError::Serialization {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the map document to disk
    ///
    /// # Errors
    ///
    /// Returns [`MapError::FileSystem`] when the file cannot be created and
    /// [`MapError::Serialization`] when encoding fails mid-write.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| MapError::FileSystem {
            path: path.to_path_buf(),
            operation: "create",
            source,
        })?;
        serde_json::to_writer(BufWriter::new(file), self).map_err(|source| {
            MapError::Serialization {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Build the in-memory grid from the document
    pub fn to_tilemap(&self) -> Tilemap {
        let mut map = Tilemap::new();
        for (&x, column) in &self.tilemap {
            for (&y, stack) in column {
                map.insert(x, y, stack.clone());
            }
        }
        map
    }

    /// Replace the document grid with the contents of `map`
    pub fn set_tilemap(&mut self, map: &Tilemap) {
        self.tilemap.clear();
        for ((x, y), stack) in map.cells() {
            self.tilemap.entry(x).or_default().insert(y, stack.clone());
        }
    }

    /// Drop tiles that no registered spritesheet can render
    ///
    /// Within each stack, tiles referencing unknown sheets are removed
    /// along with consecutive duplicates; stacks and columns left empty
    /// disappear from the document.
    pub fn normalize(&mut self) {
        let sheets = &self.spritesheets;
        for column in self.tilemap.values_mut() {
            for stack in column.values_mut() {
                *stack = stack.normalized(|tile| sheets.contains_key(&tile.sheet));
            }
            column.retain(|_, stack| !stack.is_empty());
        }
        self.tilemap.retain(|_, column| !column.is_empty());
    }
}
