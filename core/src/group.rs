//! Mutable assembly state for one board: the partition of pieces into rigid
//! groups, each with a position, a quarter-turn rotation, and a draw order.

use crate::error::CoreError;
use crate::grid::Dimensions;
use crate::outline::PIECE_UNIT;

pub type PieceId = usize;
pub type GroupId = usize;

/// Spacing of the initial one-piece-per-group layout. Wider than a piece so
/// freshly cut pieces do not overlap.
pub const INITIAL_SPACING: f32 = PIECE_UNIT * 1.25;

/// A quarter-turn rotation, counted in steps of -90 degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rotation(u8);

impl Rotation {
    pub const ZERO: Rotation = Rotation(0);

    pub fn from_steps(steps: u8) -> Self {
        Rotation(steps % 4)
    }

    pub fn steps(self) -> u8 {
        self.0
    }

    /// One more -90 degree step, the single rotate gesture.
    pub fn stepped(self) -> Self {
        Rotation((self.0 + 3) % 4)
    }

    /// Rotates a vector by this rotation. One step maps (x, y) to (y, -x).
    pub fn apply(self, x: f32, y: f32) -> (f32, f32) {
        match self.0 {
            0 => (x, y),
            1 => (y, -x),
            2 => (-x, -y),
            _ => (-y, x),
        }
    }
}

/// Cell-space bounding box of a group's members. Depends only on
/// membership, not on where the group sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_row: u32,
    pub min_col: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieceGroup {
    pub id: GroupId,
    /// Ordered membership; merge appends the absorbed pieces.
    pub members: Vec<PieceId>,
    /// Top-left anchor of the (unrotated) bounding box in scene units.
    pub position: (f32, f32),
    pub rotation: Rotation,
    pub bounds: BoundingBox,
}

impl PieceGroup {
    fn solo(id: GroupId, piece: PieceId, position: (f32, f32), grid_width: u32) -> Self {
        let members = vec![piece];
        let bounds = compute_bounds(&members, grid_width);
        Self {
            id,
            members,
            position,
            rotation: Rotation::ZERO,
            bounds,
        }
    }

    /// Offset of a piece's cell corner from the bounding-box anchor, in the
    /// group's unrotated local frame.
    pub fn piece_offset(&self, piece: PieceId, grid_width: u32) -> (f32, f32) {
        let row = piece as u32 / grid_width;
        let col = piece as u32 % grid_width;
        (
            (col - self.bounds.min_col) as f32 * PIECE_UNIT,
            (row - self.bounds.min_row) as f32 * PIECE_UNIT,
        )
    }

    /// Center of the bounding box in the group's local frame; groups rotate
    /// about this point.
    pub fn local_center(&self) -> (f32, f32) {
        (
            self.bounds.width as f32 * PIECE_UNIT / 2.0,
            self.bounds.height as f32 * PIECE_UNIT / 2.0,
        )
    }

    /// Absolute scene position of a piece's local origin.
    pub fn piece_position(&self, piece: PieceId, grid_width: u32) -> (f32, f32) {
        let (ox, oy) = self.piece_offset(piece, grid_width);
        let (cx, cy) = self.local_center();
        let (rx, ry) = self.rotation.apply(ox - cx, oy - cy);
        (self.position.0 + cx + rx, self.position.1 + cy + ry)
    }
}

pub(crate) fn compute_bounds(members: &[PieceId], grid_width: u32) -> BoundingBox {
    let mut min_row = u32::MAX;
    let mut min_col = u32::MAX;
    let mut max_row = 0;
    let mut max_col = 0;
    for &piece in members {
        let row = piece as u32 / grid_width;
        let col = piece as u32 % grid_width;
        min_row = min_row.min(row);
        min_col = min_col.min(col);
        max_row = max_row.max(row);
        max_col = max_col.max(col);
    }
    BoundingBox {
        min_row,
        min_col,
        width: max_col - min_col + 1,
        height: max_row - min_row + 1,
    }
}

/// One saved arrangement of all groups for a puzzle. Group ids are the
/// piece ids of the initial one-piece groups; a merge keeps the surviving
/// group's id and retires the absorbed one.
#[derive(Clone, Debug, PartialEq)]
pub struct Workspace {
    pub name: String,
    pub(crate) groups: Vec<Option<PieceGroup>>,
    /// Draw order, back to front.
    pub(crate) order: Vec<GroupId>,
    /// Piece id to owning group id.
    pub(crate) piece_group: Vec<GroupId>,
}

impl Workspace {
    /// One group per piece, unrotated, laid out on the spacing grid in the
    /// piece's natural position.
    pub fn initialize(name: impl Into<String>, dims: Dimensions) -> Self {
        let total = dims.piece_count() as usize;
        let mut groups = Vec::with_capacity(total);
        for piece in 0..total {
            let row = piece as u32 / dims.width;
            let col = piece as u32 % dims.width;
            let position = (col as f32 * INITIAL_SPACING, row as f32 * INITIAL_SPACING);
            groups.push(Some(PieceGroup::solo(piece, piece, position, dims.width)));
        }
        Self {
            name: name.into(),
            groups,
            order: (0..total).collect(),
            piece_group: (0..total).collect(),
        }
    }

    pub(crate) fn from_parts(
        name: String,
        groups: Vec<Option<PieceGroup>>,
        order: Vec<GroupId>,
        piece_group: Vec<GroupId>,
    ) -> Self {
        Self {
            name,
            groups,
            order,
            piece_group,
        }
    }

    pub fn group(&self, id: GroupId) -> Option<&PieceGroup> {
        self.groups.get(id).and_then(|slot| slot.as_ref())
    }

    fn group_mut(&mut self, id: GroupId) -> Result<&mut PieceGroup, CoreError> {
        self.groups
            .get_mut(id)
            .and_then(|slot| slot.as_mut())
            .ok_or(CoreError::UnknownGroup(id))
    }

    pub fn group_of(&self, piece: PieceId) -> Result<GroupId, CoreError> {
        self.piece_group
            .get(piece)
            .copied()
            .ok_or(CoreError::UnknownPiece(piece))
    }

    /// Draw order, back to front.
    pub fn order(&self) -> &[GroupId] {
        &self.order
    }

    pub fn group_count(&self) -> usize {
        self.order.len()
    }

    pub fn groups_in_order(&self) -> impl Iterator<Item = &PieceGroup> {
        self.order.iter().filter_map(|id| self.group(*id))
    }

    pub fn move_group(&mut self, id: GroupId, dx: f32, dy: f32) -> Result<(), CoreError> {
        let group = self.group_mut(id)?;
        group.position.0 += dx;
        group.position.1 += dy;
        Ok(())
    }

    /// Rotates the whole group one -90 degree step about its bounding-box
    /// center. Membership is unchanged, so the bounding box is not
    /// recomputed.
    pub fn rotate_group(&mut self, id: GroupId) -> Result<(), CoreError> {
        let group = self.group_mut(id)?;
        group.rotation = group.rotation.stepped();
        Ok(())
    }

    /// Moves a group to the end of the draw order so it renders above the
    /// rest while dragged.
    pub fn bring_to_front(&mut self, id: GroupId) -> Result<(), CoreError> {
        if self.group(id).is_none() {
            return Err(CoreError::UnknownGroup(id));
        }
        self.order.retain(|entry| *entry != id);
        self.order.push(id);
        Ok(())
    }
}
