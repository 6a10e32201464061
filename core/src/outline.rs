//! Piece boundary construction.
//!
//! Every piece outline is built from four side paths in a unit frame of
//! [`PIECE_UNIT`] scene units per cell. A side facing outside the grid is a
//! straight segment; an interior side carries the jut: a straight lead-in, a
//! cubic into a circular arc describing the bump, a mirrored cubic out, and a
//! straight lead-out. The same unit curve is reflected and rotated per side,
//! and its concavity is flipped by the side's outer flag, so the four sides
//! always compose into one closed loop starting and ending at the origin.

/// Scene units covered by one piece cell.
pub const PIECE_UNIT: f32 = 100.0;

/// Radius of the circular bump at the tip of a jut.
pub const JUT_RADIUS: f32 = 12.0;
/// Central angle subtended by the chord where the bump arc meets its neck.
/// The arc itself takes the long way around (large-arc), which is what makes
/// the bump bulbous.
pub const JUT_ANGLE: f32 = 1.745_329_3;
/// Depth of the neck points below the nominal side line.
pub const JUT_NECK_DEPTH: f32 = 6.0;
/// Width of the opening cut into the side line for the jut.
pub const JUT_CUT_WIDTH: f32 = 30.0;
/// Tangent ratios shaping the two cubics that blend the side line into the
/// bump arc and back.
pub const CUBIC_TANGENT_RATIO_1: f32 = 0.8;
pub const CUBIC_TANGENT_RATIO_2: f32 = 0.4;
/// How far an outer jut protrudes past the nominal cell edge. Used to grow a
/// piece's image sampling rectangle so tabs are filled with pixels from the
/// neighboring cell.
pub const JUT_OVERHANG: f32 = 26.0;

/// The four cardinal sides of a cell, in rotation order: one quarter turn
/// maps a side to the next index mod 4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// Unit direction from a cell towards its neighbor across this side.
    pub fn direction(self) -> (f32, f32) {
        match self {
            Side::Top => (0.0, -1.0),
            Side::Right => (1.0, 0.0),
            Side::Bottom => (0.0, 1.0),
            Side::Left => (-1.0, 0.0),
        }
    }
}

/// One relative path primitive. Coordinates are deltas from the current
/// point, so a renderer can replay a sequence with nothing but a cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSeg {
    Move {
        x: f32,
        y: f32,
    },
    Line {
        x: f32,
        y: f32,
    },
    Cubic {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        x: f32,
        y: f32,
    },
    Arc {
        radius: f32,
        large_arc: bool,
        sweep: bool,
        x: f32,
        y: f32,
    },
}

impl PathSeg {
    /// Endpoint delta contributed by this primitive.
    pub fn end_delta(self) -> (f32, f32) {
        match self {
            PathSeg::Move { x, y }
            | PathSeg::Line { x, y }
            | PathSeg::Cubic { x, y, .. }
            | PathSeg::Arc { x, y, .. } => (x, y),
        }
    }
}

/// Maps a point from the canonical top-side frame (x along the side, y into
/// the cell) onto the given side. Outer juts keep the canonical y sign,
/// blanks mirror it. All four side mappings are proper rotations, so arc
/// sweep direction only depends on the outer flag.
fn oriented(side: Side, is_outer: bool, x: f32, y: f32) -> (f32, f32) {
    let y = if is_outer { y } else { -y };
    match side {
        Side::Top => (x, y),
        Side::Right => (-y, x),
        Side::Bottom => (-x, -y),
        Side::Left => (y, -x),
    }
}

/// Boundary path for one side of a piece, starting at the side's first
/// corner (in side-traversal order) with an empty path cursor.
pub fn side_path(side: Side, is_edge: bool, is_outer: bool) -> Vec<PathSeg> {
    if is_edge {
        let (x, y) = oriented(side, false, PIECE_UNIT, 0.0);
        return vec![PathSeg::Line { x, y }];
    }

    let half_angle = JUT_ANGLE / 2.0;
    let e = JUT_RADIUS * half_angle.sin();
    let v = JUT_CUT_WIDTH / 2.0 - e;
    let c = JUT_NECK_DEPTH / half_angle.tan();
    let k = (v + c) * (1.0 - CUBIC_TANGENT_RATIO_1);
    let d = JUT_NECK_DEPTH * CUBIC_TANGENT_RATIO_2;
    let f = c * CUBIC_TANGENT_RATIO_2;
    let s = v + c - f;
    let lead = (PIECE_UNIT - JUT_CUT_WIDTH) / 2.0;

    let or = |x: f32, y: f32| oriented(side, is_outer, x, y);
    let (lead_x, lead_y) = or(lead, 0.0);
    let (c1x, c1y) = or(k, 0.0);
    let (c2x, c2y) = or(s, -d);
    let (neck_x, neck_y) = or(v, -JUT_NECK_DEPTH);
    let (arc_x, arc_y) = or(2.0 * e, 0.0);
    let (m1x, m1y) = or(v - s, JUT_NECK_DEPTH - d);
    let (m2x, m2y) = or(v - k, JUT_NECK_DEPTH);
    let (exit_x, exit_y) = or(v, JUT_NECK_DEPTH);
    let (out_x, out_y) = or(PIECE_UNIT - lead - JUT_CUT_WIDTH, 0.0);

    vec![
        PathSeg::Line {
            x: lead_x,
            y: lead_y,
        },
        PathSeg::Cubic {
            x1: c1x,
            y1: c1y,
            x2: c2x,
            y2: c2y,
            x: neck_x,
            y: neck_y,
        },
        PathSeg::Arc {
            radius: JUT_RADIUS,
            large_arc: true,
            sweep: is_outer,
            x: arc_x,
            y: arc_y,
        },
        PathSeg::Cubic {
            x1: m1x,
            y1: m1y,
            x2: m2x,
            y2: m2y,
            x: exit_x,
            y: exit_y,
        },
        PathSeg::Line { x: out_x, y: out_y },
    ]
}

/// Closed outline for one piece in its local frame: a move to the origin,
/// then the four side paths in [`Side::ALL`] order. `flags` pairs each side
/// with `(is_edge, is_outer)`.
pub fn piece_outline(flags: [(bool, bool); 4]) -> Vec<PathSeg> {
    let mut path = vec![PathSeg::Move { x: 0.0, y: 0.0 }];
    for side in Side::ALL {
        let (is_edge, is_outer) = flags[side.index()];
        path.extend(side_path(side, is_edge, is_outer));
    }
    path
}
