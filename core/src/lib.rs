pub mod assembly;
pub mod codec;
pub mod error;
pub mod grid;
pub mod group;
pub mod outline;
pub mod session;
pub mod snapshot;
pub mod task;
pub mod topology;

pub use assembly::{try_merge, MergeOutcome, SNAP_TOLERANCE};
pub use codec::{decode, encode};
pub use error::CoreError;
pub use grid::{best_grid, Dimensions, GridSpec, GRID_SEARCH_TOLERANCE};
pub use group::{BoundingBox, GroupId, PieceGroup, PieceId, Rotation, Workspace};
pub use outline::{PathSeg, Side, PIECE_UNIT};
pub use session::{DragState, DragTarget, GroupView, PieceView, Puzzle, PuzzleSession};
pub use snapshot::{
    GroupSnapshot, ImageRef, PieceSnapshot, PuzzleSnapshot, WorkspaceSnapshot,
    PUZZLE_SNAPSHOT_VERSION,
};
pub use task::{spawn_grid_search, GridSearchTask};
pub use topology::{PieceGrid, SampleRect, SideInfo};
