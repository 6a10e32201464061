//! One active puzzle: the immutable topology, the workspaces, and the
//! operations the input layer drives. The session never reads raw pointer
//! events; it is handed scene-space points and deltas.

use crate::assembly::{try_merge, MergeOutcome};
use crate::error::CoreError;
use crate::grid::GridSpec;
use crate::group::{
    compute_bounds, GroupId, PieceGroup, PieceId, Rotation, Workspace,
};
use crate::outline::{PathSeg, PIECE_UNIT};
use crate::snapshot::{
    GroupSnapshot, ImageRef, PieceSnapshot, PuzzleSnapshot, WorkspaceSnapshot,
    PUZZLE_SNAPSHOT_VERSION,
};
use crate::topology::{PieceGrid, SampleRect};

pub const DEFAULT_WORKSPACE_NAME: &str = "main";

/// Top-level aggregate. Plain data; persistence goes through
/// [`PuzzleSnapshot`] and an external store.
#[derive(Clone, Debug)]
pub struct Puzzle {
    pub id: String,
    pub image: ImageRef,
    pub image_width: u32,
    pub image_height: u32,
    pub spec: GridSpec,
    pub shape_seed: u32,
    pub workspaces: Vec<Workspace>,
}

/// What a drag gesture landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTarget {
    Field,
    Group(GroupId),
}

/// Explicit drag bookkeeping, handed back and forth with the input layer
/// instead of hiding it in captured state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    Idle,
    DraggingField { origin: (f32, f32) },
    DraggingGroup { group: GroupId, origin: (f32, f32) },
}

/// Per-piece render data for one frame.
#[derive(Clone, Copy, Debug)]
pub struct PieceView<'a> {
    pub piece: PieceId,
    pub position: (f32, f32),
    pub rotation: Rotation,
    pub outline: &'a [PathSeg],
    pub sample_rect: SampleRect,
}

#[derive(Clone, Debug)]
pub struct GroupView<'a> {
    pub group: GroupId,
    pub pieces: Vec<PieceView<'a>>,
}

pub struct PuzzleSession {
    puzzle: Puzzle,
    grid: PieceGrid,
    active: usize,
    drag: DragState,
    field_offset: (f32, f32),
}

impl PuzzleSession {
    /// Builds a fresh puzzle: topology generated from the grid spec and
    /// seed, one workspace with one group per piece.
    pub fn create(
        id: impl Into<String>,
        image: ImageRef,
        image_width: u32,
        image_height: u32,
        spec: GridSpec,
        shape_seed: u32,
    ) -> Self {
        let grid = PieceGrid::generate(spec, shape_seed);
        let workspace = Workspace::initialize(DEFAULT_WORKSPACE_NAME, spec.dimensions);
        let puzzle = Puzzle {
            id: id.into(),
            image,
            image_width,
            image_height,
            spec,
            shape_seed,
            workspaces: vec![workspace],
        };
        Self::open(puzzle, grid)
    }

    fn open(puzzle: Puzzle, grid: PieceGrid) -> Self {
        Self {
            puzzle,
            grid,
            active: 0,
            drag: DragState::Idle,
            field_offset: (0.0, 0.0),
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn grid(&self) -> &PieceGrid {
        &self.grid
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn field_offset(&self) -> (f32, f32) {
        self.field_offset
    }

    pub fn workspace(&self) -> &Workspace {
        &self.puzzle.workspaces[self.active]
    }

    fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.puzzle.workspaces[self.active]
    }

    pub fn add_workspace(&mut self, name: impl Into<String>) -> usize {
        let workspace = Workspace::initialize(name, self.puzzle.spec.dimensions);
        self.puzzle.workspaces.push(workspace);
        self.puzzle.workspaces.len() - 1
    }

    pub fn set_active_workspace(&mut self, index: usize) -> Result<(), CoreError> {
        if index >= self.puzzle.workspaces.len() {
            return Err(CoreError::UnknownWorkspace(index));
        }
        self.active = index;
        self.drag = DragState::Idle;
        Ok(())
    }

    /// Starts a drag at a scene point. A hit on a group brings it to the
    /// front and begins a group drag; empty space begins a field pan.
    pub fn begin_drag(&mut self, x: f32, y: f32) -> Result<DragTarget, CoreError> {
        let target = match self.hit_test(x, y) {
            Some(group) => {
                self.workspace_mut().bring_to_front(group)?;
                self.drag = DragState::DraggingGroup {
                    group,
                    origin: (x, y),
                };
                DragTarget::Group(group)
            }
            None => {
                self.drag = DragState::DraggingField { origin: (x, y) };
                DragTarget::Field
            }
        };
        Ok(target)
    }

    /// Applies a drag delta. Group drags move the group; field drags pan
    /// the view the opposite way, like grabbing the background.
    pub fn continue_drag(&mut self, dx: f32, dy: f32) -> Result<(), CoreError> {
        match self.drag {
            DragState::Idle => Ok(()),
            DragState::DraggingField { .. } => {
                self.field_offset.0 -= dx;
                self.field_offset.1 -= dy;
                Ok(())
            }
            DragState::DraggingGroup { group, .. } => {
                self.workspace_mut().move_group(group, dx, dy)
            }
        }
    }

    /// Ends the drag. For a group drag this is the single point where the
    /// assembly engine runs; a committed merge is reported back so the
    /// caller can observe retired group ids.
    pub fn end_drag(&mut self) -> Result<Option<MergeOutcome>, CoreError> {
        let drag = std::mem::replace(&mut self.drag, DragState::Idle);
        match drag {
            DragState::DraggingGroup { group, .. } => {
                let active = self.active;
                try_merge(&mut self.puzzle.workspaces[active], &self.grid, group)
            }
            _ => Ok(None),
        }
    }

    pub fn rotate(&mut self, target: DragTarget) -> Result<(), CoreError> {
        match target {
            DragTarget::Group(group) => self.workspace_mut().rotate_group(group),
            DragTarget::Field => Ok(()),
        }
    }

    /// Topmost group whose rendered piece squares contain the point.
    /// Quarter-turn rotations keep every piece axis-aligned, so the test is
    /// exact for the nominal cell. Juts are ignored: a tab protruding past
    /// the cell is not grabbable and a blank notch still hits, which keeps
    /// the hit region stable while a piece is dragged over curvy neighbors.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<GroupId> {
        let grid_width = self.grid.dimensions().width;
        let workspace = self.workspace();
        for &id in workspace.order().iter().rev() {
            let Some(group) = workspace.group(id) else {
                continue;
            };
            for &piece in &group.members {
                let (px, py) = group.piece_position(piece, grid_width);
                let (ex, ey) = group.rotation.apply(PIECE_UNIT, PIECE_UNIT);
                let (min_x, max_x) = if ex < 0.0 { (px + ex, px) } else { (px, px + ex) };
                let (min_y, max_y) = if ey < 0.0 { (py + ey, py) } else { (py, py + ey) };
                if x >= min_x && x <= max_x && y >= min_y && y <= max_y {
                    return Some(id);
                }
            }
        }
        None
    }

    /// Current frame: groups in draw order with each member's absolute
    /// transform, boundary path, and image sampling rectangle.
    pub fn render_view(&self) -> Vec<GroupView<'_>> {
        let grid_width = self.grid.dimensions().width;
        self.workspace()
            .groups_in_order()
            .map(|group| GroupView {
                group: group.id,
                pieces: group
                    .members
                    .iter()
                    .map(|&piece| PieceView {
                        piece,
                        position: group.piece_position(piece, grid_width),
                        rotation: group.rotation,
                        outline: self.grid.outline(piece),
                        sample_rect: self.grid.sample_rect(piece),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Serializable state of the whole puzzle. Geometry is reduced to grid
    /// indices plus outer flags; paths are re-derived on restore.
    pub fn snapshot(&self) -> PuzzleSnapshot {
        PuzzleSnapshot {
            version: PUZZLE_SNAPSHOT_VERSION,
            id: self.puzzle.id.clone(),
            image: self.puzzle.image.clone(),
            image_width: self.puzzle.image_width,
            image_height: self.puzzle.image_height,
            grid_width: self.puzzle.spec.dimensions.width,
            grid_height: self.puzzle.spec.dimensions.height,
            piece_size_px: self.puzzle.spec.piece_size_px,
            shape_seed: self.puzzle.shape_seed,
            workspaces: self
                .puzzle
                .workspaces
                .iter()
                .map(|workspace| self.snapshot_workspace(workspace))
                .collect(),
        }
    }

    fn snapshot_workspace(&self, workspace: &Workspace) -> WorkspaceSnapshot {
        WorkspaceSnapshot {
            name: workspace.name.clone(),
            groups: workspace
                .groups_in_order()
                .map(|group| GroupSnapshot {
                    id: group.id as u32,
                    rotation: group.rotation.steps(),
                    position: group.position,
                    pieces: group
                        .members
                        .iter()
                        .map(|&piece| PieceSnapshot {
                            index: piece as u32,
                            outers: self.grid.outer_flags(piece),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Rebuilds a session from a snapshot. The topology is re-derived from
    /// the grid spec and stored outer flags and is bit-identical to the
    /// originally generated one.
    pub fn restore(snapshot: PuzzleSnapshot) -> Result<Self, CoreError> {
        let spec = GridSpec {
            dimensions: crate::grid::Dimensions {
                width: snapshot.grid_width,
                height: snapshot.grid_height,
            },
            piece_size_px: snapshot.piece_size_px,
        };
        let total = spec.dimensions.piece_count() as usize;

        let first = snapshot
            .workspaces
            .first()
            .ok_or_else(|| CoreError::Codec("snapshot has no workspaces".into()))?;
        let mut outers = vec![[false; 4]; total];
        let mut seen = 0usize;
        for group in &first.groups {
            for piece in &group.pieces {
                let index = piece.index as usize;
                if index >= total {
                    return Err(CoreError::UnknownPiece(index));
                }
                outers[index] = piece.outers;
                seen += 1;
            }
        }
        if seen != total {
            return Err(CoreError::Codec(format!(
                "snapshot covers {seen} of {total} pieces"
            )));
        }
        let grid = PieceGrid::from_flags(spec, &outers);

        let workspaces = snapshot
            .workspaces
            .iter()
            .map(|workspace| restore_workspace(workspace, spec.dimensions.width, total))
            .collect::<Result<Vec<_>, _>>()?;

        let puzzle = Puzzle {
            id: snapshot.id,
            image: snapshot.image,
            image_width: snapshot.image_width,
            image_height: snapshot.image_height,
            spec,
            shape_seed: snapshot.shape_seed,
            workspaces,
        };
        Ok(Self::open(puzzle, grid))
    }
}

fn restore_workspace(
    snapshot: &WorkspaceSnapshot,
    grid_width: u32,
    total: usize,
) -> Result<Workspace, CoreError> {
    let mut groups: Vec<Option<PieceGroup>> = vec![None; total];
    let mut order = Vec::with_capacity(snapshot.groups.len());
    let mut piece_group = vec![usize::MAX; total];
    for group in &snapshot.groups {
        let id = group.id as usize;
        if id >= total {
            return Err(CoreError::UnknownGroup(id));
        }
        if groups[id].is_some() {
            return Err(CoreError::Codec(format!("duplicate group {id}")));
        }
        if group.pieces.is_empty() {
            return Err(CoreError::Codec(format!("group {id} has no pieces")));
        }
        let members: Vec<PieceId> = group.pieces.iter().map(|p| p.index as usize).collect();
        for &piece in &members {
            if piece >= total {
                return Err(CoreError::UnknownPiece(piece));
            }
            piece_group[piece] = id;
        }
        let bounds = compute_bounds(&members, grid_width);
        groups[id] = Some(PieceGroup {
            id,
            members,
            position: group.position,
            rotation: Rotation::from_steps(group.rotation),
            bounds,
        });
        order.push(id);
    }
    if piece_group.iter().any(|&id| id == usize::MAX) {
        return Err(CoreError::Codec("workspace does not cover every piece".into()));
    }
    Ok(Workspace::from_parts(
        snapshot.name.clone(),
        groups,
        order,
        piece_group,
    ))
}
