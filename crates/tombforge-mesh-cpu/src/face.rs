//! Edge descriptors and the vertical strip emitter shared by every wall face.

use tombforge_geom::{CLICK_UNITS, SECTOR_UNITS, Vec3};
use tombforge_sector::{
    BlockFace, CORNER_OFFSETS, Direction, NE, NW, SE, SW, TextureArea, WallPart, WallSide,
};

use crate::mesh_build::SectorGeometry;

/// One cardinal edge of a sector. `a`/`b` are the sector's own corners on the
/// edge, ordered so the face normal points at the neighbour; `oa`/`ob` are the
/// neighbour's corners at the same positions.
#[derive(Clone, Copy, Debug)]
pub struct EdgeDesc {
    pub dir: Direction,
    pub edge: usize,
    pub a: usize,
    pub b: usize,
    pub oa: usize,
    pub ob: usize,
}

pub const EDGES: [EdgeDesc; 4] = [
    EdgeDesc {
        dir: Direction::North,
        edge: 0,
        a: NE,
        b: NW,
        oa: SE,
        ob: SW,
    },
    EdgeDesc {
        dir: Direction::East,
        edge: 1,
        a: SE,
        b: NE,
        oa: SW,
        ob: NW,
    },
    EdgeDesc {
        dir: Direction::South,
        edge: 2,
        a: SW,
        b: SE,
        oa: NW,
        ob: NE,
    },
    EdgeDesc {
        dir: Direction::West,
        edge: 3,
        a: NW,
        b: SW,
        oa: NE,
        ob: SE,
    },
];

impl EdgeDesc {
    #[inline]
    pub fn for_direction(dir: Direction) -> &'static EdgeDesc {
        match dir {
            Direction::North => &EDGES[0],
            Direction::East => &EDGES[1],
            Direction::South => &EDGES[2],
            Direction::West => &EDGES[3],
        }
    }

    /// Edge index of the neighbour's side facing back at us.
    #[inline]
    pub fn facing_edge(&self) -> usize {
        (self.edge + 2) & 3
    }
}

/// Grid position (in sectors) of `corner` of sector `(x, z)`.
#[inline]
pub fn corner_grid(x: i32, z: i32, corner: usize) -> (i32, i32) {
    let (ox, oz) = CORNER_OFFSETS[corner & 3];
    (x + ox, z + oz)
}

/// Room-local position of a grid point at height `h` clicks.
#[inline]
pub fn grid_point((gx, gz): (i32, i32), h: i32) -> Vec3 {
    Vec3::new(
        (gx * SECTOR_UNITS) as f32,
        (h * CLICK_UNITS) as f32,
        (gz * SECTOR_UNITS) as f32,
    )
}

/// Orders the diagonal through `c` and its opposite corner so the face
/// normal points at the `toward` corner.
pub fn diagonal_ends(c: usize, toward: usize) -> (usize, usize) {
    let o = (c + 2) & 3;
    let (ax, az) = CORNER_OFFSETS[c & 3];
    let (bx, bz) = CORNER_OFFSETS[o];
    let (tx, tz) = CORNER_OFFSETS[toward & 3];
    // Horizontal normal of a -> b is (dz, -dx).
    let (nx, nz) = (bz - az, -(bx - ax));
    if nx * (tx - ax) + nz * (tz - az) >= 0 {
        (c & 3, o)
    } else {
        (o, c & 3)
    }
}

/// Emits the strip between `bottom` and `top` over the columns at `a` and `b`:
/// a quad when both sides are open, a triangle when one side is degenerate or
/// inverted, nothing otherwise.
pub fn emit_span(
    out: &mut SectorGeometry,
    face: BlockFace,
    a: (i32, i32),
    b: (i32, i32),
    bottom: [i32; 2],
    top: [i32; 2],
    tex: &TextureArea,
) {
    let a_top = grid_point(a, top[0]);
    let a_bot = grid_point(a, bottom[0]);
    let b_top = grid_point(b, top[1]);
    let b_bot = grid_point(b, bottom[1]);
    match (top[0] > bottom[0], top[1] > bottom[1]) {
        (true, true) => out.push_quad(face, [a_top, b_top, b_bot, a_bot], [0, 1, 2, 3], tex),
        (true, false) => out.push_tri(face, [a_top, b_bot, a_bot], [0, 2, 3], tex),
        (false, true) => out.push_tri(face, [a_bot, b_top, b_bot], [3, 1, 2], tex),
        (false, false) => {}
    }
}

/// `mid` lies within the span at both corners and strictly inside at one.
#[inline]
pub fn splits(bottom: [i32; 2], top: [i32; 2], mid: [i32; 2]) -> bool {
    (0..2).all(|i| mid[i] >= bottom[i] && mid[i] <= top[i])
        && (0..2).any(|i| mid[i] > bottom[i] && mid[i] < top[i])
}

/// Strip from one corner column pair, with the textures of the owning block.
pub struct Strip<'a> {
    pub side: WallSide,
    pub a: (i32, i32),
    pub b: (i32, i32),
    pub textures: &'a [TextureArea; BlockFace::COUNT],
}

impl Strip<'_> {
    #[inline]
    fn emit(&self, out: &mut SectorGeometry, part: WallPart, bottom: [i32; 2], top: [i32; 2]) {
        let face = BlockFace::wall(self.side, part);
        emit_span(out, face, self.a, self.b, bottom, top, &self.textures[face.index()]);
    }

    pub fn middle(&self, out: &mut SectorGeometry, bottom: [i32; 2], top: [i32; 2]) {
        self.emit(out, WallPart::Middle, bottom, top);
    }

    /// Floor step, split into ED below and QA above at `step`.
    pub fn floor_step(&self, out: &mut SectorGeometry, bottom: [i32; 2], top: [i32; 2], step: [i32; 2]) {
        if splits(bottom, top, step) {
            self.emit(out, WallPart::ED, bottom, step);
            self.emit(out, WallPart::QA, step, top);
        } else {
            self.emit(out, WallPart::QA, bottom, top);
        }
    }

    /// Ceiling step, split into WS below and RF above at `step`.
    pub fn ceiling_step(&self, out: &mut SectorGeometry, bottom: [i32; 2], top: [i32; 2], step: [i32; 2]) {
        if splits(bottom, top, step) {
            self.emit(out, WallPart::WS, bottom, step);
            self.emit(out, WallPart::RF, step, top);
        } else {
            self.emit(out, WallPart::WS, bottom, top);
        }
    }
}
