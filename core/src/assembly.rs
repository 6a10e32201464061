//! Merge-on-release: when a dragged group is let go next to a compatible
//! neighbor, the released group is folded into the neighbor's group.

use crate::error::CoreError;
use crate::group::{compute_bounds, GroupId, Workspace};
use crate::outline::{Side, PIECE_UNIT};
use crate::topology::PieceGrid;

/// Maximum Manhattan distance, in scene units, between the actual and the
/// perfectly seated offset of two neighboring pieces for a release to
/// commit their seam.
pub const SNAP_TOLERANCE: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The neighbor group that absorbed the released pieces.
    pub survivor: GroupId,
    /// The released group's id, retired from the workspace.
    pub absorbed: GroupId,
}

/// Runs the merge test for a just-released group. Scans the group's members
/// in membership order and each member's sides in [`Side::ALL`] order; the
/// first neighbor in a different group with the same rotation and a seat
/// offset within [`SNAP_TOLERANCE`] wins, and the scan stops there. A
/// release commits at most one seam; chained merges wait for the next
/// action. No qualifying neighbor is the normal "not yet connected" outcome
/// and leaves the workspace untouched.
pub fn try_merge(
    workspace: &mut Workspace,
    grid: &PieceGrid,
    released: GroupId,
) -> Result<Option<MergeOutcome>, CoreError> {
    let group = workspace
        .group(released)
        .ok_or(CoreError::UnknownGroup(released))?;
    let grid_width = grid.dimensions().width;
    let rotation = group.rotation;

    let mut target = None;
    'scan: for &piece in &group.members {
        for side in Side::ALL {
            if grid.side(piece, side).is_edge {
                continue;
            }
            let Some(neighbor) = grid.neighbor(piece, side) else {
                continue;
            };
            let other_id = workspace.group_of(neighbor)?;
            if other_id == released {
                continue;
            }
            let Some(other) = workspace.group(other_id) else {
                continue;
            };
            if other.rotation != rotation {
                continue;
            }
            let (dir_x, dir_y) = side.direction();
            let (ex, ey) = rotation.apply(dir_x * PIECE_UNIT, dir_y * PIECE_UNIT);
            let (px, py) = group.piece_position(piece, grid_width);
            let (nx, ny) = other.piece_position(neighbor, grid_width);
            let distance = (nx - px - ex).abs() + (ny - py - ey).abs();
            if distance <= SNAP_TOLERANCE {
                target = Some(other_id);
                break 'scan;
            }
        }
    }

    let Some(survivor) = target else {
        return Ok(None);
    };
    commit_merge(workspace, grid_width, released, survivor)?;
    Ok(Some(MergeOutcome {
        survivor,
        absorbed: released,
    }))
}

/// Folds `released` into `survivor`: reassigns membership, retires the
/// released id from the draw order, recomputes the survivor's bounding box
/// and re-anchors its position so the survivor's pieces stay put and the
/// absorbed pieces land perfectly seated.
fn commit_merge(
    workspace: &mut Workspace,
    grid_width: u32,
    released: GroupId,
    survivor: GroupId,
) -> Result<(), CoreError> {
    let absorbed_members = workspace
        .groups
        .get_mut(released)
        .and_then(|slot| slot.take())
        .ok_or(CoreError::UnknownGroup(released))?
        .members;

    let group = workspace
        .groups
        .get_mut(survivor)
        .and_then(|slot| slot.as_mut())
        .ok_or(CoreError::UnknownGroup(survivor))?;

    // Seat reference: the survivor's first member must not move when the
    // bounding box, and with it the rotation center, changes.
    let anchor = group.members[0];
    let anchor_abs = group.piece_position(anchor, grid_width);

    group.members.extend_from_slice(&absorbed_members);
    group.bounds = compute_bounds(&group.members, grid_width);
    let (ox, oy) = group.piece_offset(anchor, grid_width);
    let (cx, cy) = group.local_center();
    let (rx, ry) = group.rotation.apply(ox - cx, oy - cy);
    group.position = (anchor_abs.0 - cx - rx, anchor_abs.1 - cy - ry);

    for piece in absorbed_members {
        workspace.piece_group[piece] = survivor;
    }
    workspace.order.retain(|id| *id != released);
    Ok(())
}
