//! Immutable per-puzzle piece topology: which sides face outside the grid,
//! which interior sides carry the tab and which the blank, and the boundary
//! path of every piece. Built once per puzzle and never mutated.

use crate::grid::{Dimensions, GridSpec};
use crate::group::PieceId;
use crate::outline::{piece_outline, PathSeg, Side, JUT_OVERHANG, PIECE_UNIT};

pub fn splitmix32(mut value: u32) -> u32 {
    value = value.wrapping_add(0x9E37_79B9);
    let mut z = value;
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}

pub fn rand_unit(seed: u32, salt: u32) -> f32 {
    let mixed = splitmix32(seed ^ salt);
    let top = mixed >> 8;
    top as f32 / ((1u32 << 24) as f32)
}

fn side_salt(row: u32, col: u32, side: Side) -> u32 {
    (side.index() as u32).wrapping_mul(0x9E37_79B9)
        ^ row.wrapping_mul(0x85EB_CA6B)
        ^ col.wrapping_mul(0xC2B2_AE35)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SideInfo {
    /// The side faces outside the grid and is drawn straight.
    pub is_edge: bool,
    /// The side carries the convex tab; its neighbor carries the blank.
    /// Meaningless when `is_edge`.
    pub is_outer: bool,
}

/// Sub-rectangle of the source image a piece should be filled with, in
/// source pixels. Outer juts overhang the nominal cell, so their sides
/// sample slightly into the neighboring cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug)]
pub struct PieceGrid {
    dimensions: Dimensions,
    piece_size_px: u32,
    sides: Vec<[SideInfo; 4]>,
    outlines: Vec<Vec<PathSeg>>,
}

impl PieceGrid {
    /// Generates the topology for a fresh puzzle. Interior shared edges get
    /// their tab/blank orientation from the seeded stream on first visit
    /// (scanning row-major, a piece first visits its right and bottom
    /// sides) and the neighbor inherits the negation, so a tab always faces
    /// a blank.
    pub fn generate(spec: GridSpec, shape_seed: u32) -> Self {
        let dims = spec.dimensions;
        let total = dims.piece_count() as usize;
        let mut sides = vec![
            [SideInfo {
                is_edge: false,
                is_outer: false,
            }; 4];
            total
        ];
        for row in 0..dims.height {
            for col in 0..dims.width {
                let id = (row * dims.width + col) as usize;
                for side in Side::ALL {
                    let is_edge = match side {
                        Side::Top => row == 0,
                        Side::Right => col == dims.width - 1,
                        Side::Bottom => row == dims.height - 1,
                        Side::Left => col == 0,
                    };
                    let is_outer = if is_edge {
                        false
                    } else {
                        match side {
                            Side::Top => {
                                let above = id - dims.width as usize;
                                !sides[above][Side::Bottom.index()].is_outer
                            }
                            Side::Left => !sides[id - 1][Side::Right.index()].is_outer,
                            Side::Right | Side::Bottom => {
                                rand_unit(shape_seed, side_salt(row, col, side)) < 0.5
                            }
                        }
                    };
                    sides[id][side.index()] = SideInfo { is_edge, is_outer };
                }
            }
        }
        Self::assemble(dims, spec.piece_size_px, sides)
    }

    /// Rebuilds the topology from persisted outer flags (one `[bool; 4]`
    /// per piece, row-major). Edge flags are a function of grid position
    /// alone and outlines are a pure function of both, so the result is
    /// identical to the originally generated grid.
    pub fn from_flags(spec: GridSpec, outers: &[[bool; 4]]) -> Self {
        let dims = spec.dimensions;
        let mut sides = Vec::with_capacity(outers.len());
        for (id, outer) in outers.iter().enumerate() {
            let row = id as u32 / dims.width;
            let col = id as u32 % dims.width;
            let mut info = [SideInfo {
                is_edge: false,
                is_outer: false,
            }; 4];
            for side in Side::ALL {
                let is_edge = match side {
                    Side::Top => row == 0,
                    Side::Right => col == dims.width - 1,
                    Side::Bottom => row == dims.height - 1,
                    Side::Left => col == 0,
                };
                info[side.index()] = SideInfo {
                    is_edge,
                    is_outer: outer[side.index()] && !is_edge,
                };
            }
            sides.push(info);
        }
        Self::assemble(dims, spec.piece_size_px, sides)
    }

    fn assemble(dimensions: Dimensions, piece_size_px: u32, sides: Vec<[SideInfo; 4]>) -> Self {
        let outlines = sides
            .iter()
            .map(|info| {
                let mut flags = [(false, false); 4];
                for side in Side::ALL {
                    let info = info[side.index()];
                    flags[side.index()] = (info.is_edge, info.is_outer);
                }
                piece_outline(flags)
            })
            .collect();
        Self {
            dimensions,
            piece_size_px,
            sides,
            outlines,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn piece_size_px(&self) -> u32 {
        self.piece_size_px
    }

    pub fn piece_count(&self) -> usize {
        self.sides.len()
    }

    pub fn row_of(&self, piece: PieceId) -> u32 {
        piece as u32 / self.dimensions.width
    }

    pub fn col_of(&self, piece: PieceId) -> u32 {
        piece as u32 % self.dimensions.width
    }

    pub fn side(&self, piece: PieceId, side: Side) -> SideInfo {
        self.sides[piece][side.index()]
    }

    pub fn outer_flags(&self, piece: PieceId) -> [bool; 4] {
        let mut flags = [false; 4];
        for side in Side::ALL {
            flags[side.index()] = self.sides[piece][side.index()].is_outer;
        }
        flags
    }

    pub fn outline(&self, piece: PieceId) -> &[PathSeg] {
        &self.outlines[piece]
    }

    /// Neighbor across the given side, or `None` past the grid boundary.
    pub fn neighbor(&self, piece: PieceId, side: Side) -> Option<PieceId> {
        let width = self.dimensions.width as usize;
        let row = piece / width;
        let col = piece % width;
        match side {
            Side::Top if row > 0 => Some(piece - width),
            Side::Right if col + 1 < width => Some(piece + 1),
            Side::Bottom if row + 1 < self.dimensions.height as usize => Some(piece + width),
            Side::Left if col > 0 => Some(piece - 1),
            _ => None,
        }
    }

    /// Source-image rectangle for one piece, grown past the nominal cell on
    /// every side whose jut is outer.
    pub fn sample_rect(&self, piece: PieceId) -> SampleRect {
        let scale = self.piece_size_px as f32;
        let overhang = JUT_OVERHANG / PIECE_UNIT;
        let outer = |side: Side| {
            if self.sides[piece][side.index()].is_outer {
                overhang
            } else {
                0.0
            }
        };
        let row = self.row_of(piece) as f32;
        let col = self.col_of(piece) as f32;
        SampleRect {
            x: (col - outer(Side::Left)) * scale,
            y: (row - outer(Side::Top)) * scale,
            width: (1.0 + outer(Side::Left) + outer(Side::Right)) * scale,
            height: (1.0 + outer(Side::Top) + outer(Side::Bottom)) * scale,
        }
    }
}
