use crate::group::{GroupId, PieceId};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid image dimensions {width}x{height}")]
    InvalidImageDimensions { width: u32, height: u32 },
    #[error("unknown group {0}")]
    UnknownGroup(GroupId),
    #[error("unknown piece {0}")]
    UnknownPiece(PieceId),
    #[error("unknown workspace {0}")]
    UnknownWorkspace(usize),
    #[error("snapshot codec: {0}")]
    Codec(String),
    #[error("grid search cancelled")]
    SearchCancelled,
}
