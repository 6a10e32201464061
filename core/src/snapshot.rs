//! Persisted puzzle shape. Geometry is never stored: a piece is its grid
//! index plus four outer flags, and boundary paths are re-derived from the
//! grid spec and flags on load.

use rkyv::{Archive, Deserialize, Serialize};

pub const PUZZLE_SNAPSHOT_VERSION: u32 = 1;

/// Reference to the source image, resolved by the hosting layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
pub enum ImageRef {
    BuiltIn { slug: String },
    Upload { hash: String },
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct PieceSnapshot {
    /// Row-major grid index.
    pub index: u32,
    /// Outer flag per side, in side order.
    pub outers: [bool; 4],
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub id: u32,
    pub rotation: u8,
    pub position: (f32, f32),
    /// Members in membership order.
    pub pieces: Vec<PieceSnapshot>,
}

/// One board arrangement; groups appear in draw order.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    pub name: String,
    pub groups: Vec<GroupSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct PuzzleSnapshot {
    pub version: u32,
    pub id: String,
    pub image: ImageRef,
    pub image_width: u32,
    pub image_height: u32,
    pub grid_width: u32,
    pub grid_height: u32,
    pub piece_size_px: u32,
    pub shape_seed: u32,
    pub workspaces: Vec<WorkspaceSnapshot>,
}
