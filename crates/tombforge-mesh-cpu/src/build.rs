#[cfg(feature = "parallel")]
use rayon::prelude::*;

use tombforge_level::{Level, Room};
use tombforge_sector::{
    Block, BlockFace, Direction, NE, NW, SE, SW, SectorRect, TextureArea, WallSide,
};

use crate::assemble::{RoomGeometry, VertexAssembler};
use crate::face::{EDGES, EdgeDesc, Strip, corner_grid, diagonal_ends, grid_point};
use crate::mesh_build::SectorGeometry;
use crate::overlay::{Border, ResolvedHeights, ResolvedSector};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Build sectors on the rayon pool. Output is identical to the serial path.
    pub parallel: bool,
}

/// Derives per-sector faces of one room from its resolved heights.
pub struct FaceBuilder<'a> {
    room: &'a Room,
    heights: ResolvedHeights,
    options: BuildOptions,
}

impl<'a> FaceBuilder<'a> {
    pub fn new(level: &Level, room: &'a Room, options: BuildOptions) -> Self {
        Self {
            room,
            heights: ResolvedHeights::resolve(level, room),
            options,
        }
    }

    #[inline]
    pub fn heights(&self) -> &ResolvedHeights {
        &self.heights
    }

    pub fn build_geometry(&self) -> RoomGeometry {
        let mut geometry = RoomGeometry::new(self.room.num_x(), self.room.num_z());
        let cells: Vec<(i32, i32)> = self.room.grid.bounds().iter().collect();
        geometry.sectors = self.build_cells(&cells);
        VertexAssembler::assemble(&mut geometry);
        log::debug!(
            target: "mesh",
            "built `{}`: {} faces, {} vertices",
            self.room.name,
            geometry.face_count(),
            geometry.vertex_count()
        );
        geometry
    }

    /// Regenerates the sectors inside `area` and re-assembles. A geometry of
    /// the wrong size is rebuilt completely.
    pub fn rebuild_area(&self, area: SectorRect, geometry: &mut RoomGeometry) {
        if geometry.num_x != self.room.num_x() || geometry.num_z != self.room.num_z() {
            *geometry = self.build_geometry();
            return;
        }
        let Some(area) = area.intersect(&self.room.grid.bounds()) else {
            return;
        };
        let cells: Vec<(i32, i32)> = area.iter().collect();
        let built = self.build_cells(&cells);
        for ((x, z), sector) in cells.into_iter().zip(built) {
            if let Some(i) = geometry.index(x, z) {
                geometry.sectors[i] = sector;
            }
        }
        VertexAssembler::assemble(geometry);
        log::debug!(target: "mesh", "rebuilt {area:?} of `{}`", self.room.name);
    }

    fn build_cells(&self, cells: &[(i32, i32)]) -> Vec<SectorGeometry> {
        #[cfg(feature = "parallel")]
        {
            if self.options.parallel {
                return cells
                    .par_iter()
                    .map(|&(x, z)| self.build_sector(x, z))
                    .collect();
            }
        }
        cells.iter().map(|&(x, z)| self.build_sector(x, z)).collect()
    }

    pub fn build_sector(&self, x: i32, z: i32) -> SectorGeometry {
        let mut out = SectorGeometry::default();
        let (Some(me), Some(block)) = (self.heights.get(x, z), self.room.block(x, z)) else {
            return out;
        };
        match me.border {
            Border::Corner => {}
            Border::Interior => {
                for d in &EDGES {
                    self.build_wall(&mut out, x, z, me, block, d);
                }
                self.build_diagonal_floor(&mut out, x, z, me, block);
                self.build_diagonal_ceiling(&mut out, x, z, me, block);
                self.build_floor(&mut out, x, z, me, block);
                self.build_ceiling(&mut out, x, z, me, block);
            }
            Border::Opaque | Border::Portal { .. } => {
                if let Some(d) = self.inward_edge(x, z) {
                    self.build_wall(&mut out, x, z, me, block, d);
                }
            }
        }
        out
    }

    /// The only edge a non-corner border cell faces.
    fn inward_edge(&self, x: i32, z: i32) -> Option<&'static EdgeDesc> {
        let (nx, nz) = (self.room.num_x(), self.room.num_z());
        let dir = if x == 0 {
            Direction::East
        } else if x == nx - 1 {
            Direction::West
        } else if z == 0 {
            Direction::North
        } else if z == nz - 1 {
            Direction::South
        } else {
            return None;
        };
        Some(EdgeDesc::for_direction(dir))
    }

    fn build_wall(
        &self,
        out: &mut SectorGeometry,
        x: i32,
        z: i32,
        me: &ResolvedSector,
        block: &Block,
        d: &EdgeDesc,
    ) {
        let (dx, dz) = d.dir.offset();
        let Some(other) = self.heights.get(x + dx, z + dz) else {
            return;
        };
        // Faces shared with a border cell belong to the border cell.
        if !me.is_border() && other.is_border() {
            return;
        }
        let facing = d.facing_edge();
        if other.solid_on_edge(facing) {
            return;
        }
        let f = [other.floor_at(facing, d.oa), other.floor_at(facing, d.ob)];
        let c = [other.ceiling_at(facing, d.oa), other.ceiling_at(facing, d.ob)];
        let q = [me.floor_at(d.edge, d.a), me.floor_at(d.edge, d.b)];
        let w = [me.ceiling_at(d.edge, d.a), me.ceiling_at(d.edge, d.b)];
        let strip = Strip {
            side: WallSide::from(d.dir),
            a: corner_grid(x, z, d.a),
            b: corner_grid(x, z, d.b),
            textures: &block.textures,
        };
        let closed = q[0] >= w[0] && q[1] >= w[1];
        if me.solid_on_edge(d.edge) || closed {
            strip.middle(out, f, c);
            return;
        }
        let e = [me.floor_step_at(d.edge, d.a), me.floor_step_at(d.edge, d.b)];
        let r = [me.ceiling_step_at(d.edge, d.a), me.ceiling_step_at(d.edge, d.b)];
        strip.floor_step(out, f, [q[0].min(c[0]), q[1].min(c[1])], e);
        strip.ceiling_step(out, [w[0].max(f[0]), w[1].max(f[1])], c, r);
    }

    fn build_diagonal_floor(
        &self,
        out: &mut SectorGeometry,
        x: i32,
        z: i32,
        me: &ResolvedSector,
        block: &Block,
    ) {
        let Some(c) = me.floor_split.corner() else {
            return;
        };
        let (l, o, r) = ((c + 1) & 3, (c + 2) & 3, (c + 3) & 3);
        if me.is_wall() {
            let (a, b) = diagonal_ends(c, l);
            let strip = diagonal_strip(x, z, a, b, block);
            strip.middle(out, [me.qa[a], me.qa[b]], [me.ws[a], me.ws[b]]);
            return;
        }
        let flat = me.qa[r];
        let open_higher = me.qa[c] + me.qa[o] >= 2 * flat;
        let toward = if open_higher { r } else { l };
        let (a, b) = diagonal_ends(c, toward);
        let strip = diagonal_strip(x, z, a, b, block);
        if open_higher {
            strip.floor_step(out, [flat, flat], [me.qa[a], me.qa[b]], [me.ed[a], me.ed[b]]);
        } else {
            strip.floor_step(out, [me.qa[a], me.qa[b]], [flat, flat], [me.ed[r], me.ed[r]]);
        }
    }

    fn build_diagonal_ceiling(
        &self,
        out: &mut SectorGeometry,
        x: i32,
        z: i32,
        me: &ResolvedSector,
        block: &Block,
    ) {
        if me.is_wall() {
            return;
        }
        let Some(c) = me.ceiling_split.corner() else {
            return;
        };
        let (l, o, r) = ((c + 1) & 3, (c + 2) & 3, (c + 3) & 3);
        let flat = me.ws[r];
        let open_lower = me.ws[c] + me.ws[o] <= 2 * flat;
        let toward = if open_lower { r } else { l };
        let (a, b) = diagonal_ends(c, toward);
        let strip = diagonal_strip(x, z, a, b, block);
        if open_lower {
            strip.ceiling_step(out, [me.ws[a], me.ws[b]], [flat, flat], [me.rf[r], me.rf[r]]);
        } else {
            strip.ceiling_step(out, [flat, flat], [me.ws[a], me.ws[b]], [me.rf[a], me.rf[b]]);
        }
    }

    fn build_floor(
        &self,
        out: &mut SectorGeometry,
        x: i32,
        z: i32,
        me: &ResolvedSector,
        block: &Block,
    ) {
        if !me.draw_floor || (me.is_wall() && me.floor_split.is_none()) {
            return;
        }
        let h = &me.qa;
        let tex = &block.textures;
        match me.floor_split.corner() {
            Some(c) => {
                let (l, o, r) = ((c + 1) & 3, (c + 2) & 3, (c + 3) & 3);
                corner_tri(out, BlockFace::Floor, x, z, [c, l, o], [h[c], h[l], h[o]], tex);
                if !me.is_wall() {
                    let f = h[r];
                    corner_tri(out, BlockFace::FloorTriangle2, x, z, [c, o, r], [f, f, f], tex);
                }
            }
            None if is_planar(h) => {
                corner_quad(out, BlockFace::Floor, x, z, [NW, NE, SE, SW], h, tex);
            }
            None if !me.floor_split_toggled => {
                corner_tri(out, BlockFace::Floor, x, z, [NW, NE, SE], [h[NW], h[NE], h[SE]], tex);
                corner_tri(out, BlockFace::FloorTriangle2, x, z, [NW, SE, SW], [h[NW], h[SE], h[SW]], tex);
            }
            None => {
                corner_tri(out, BlockFace::Floor, x, z, [NE, SE, SW], [h[NE], h[SE], h[SW]], tex);
                corner_tri(out, BlockFace::FloorTriangle2, x, z, [NE, SW, NW], [h[NE], h[SW], h[NW]], tex);
            }
        }
    }

    fn build_ceiling(
        &self,
        out: &mut SectorGeometry,
        x: i32,
        z: i32,
        me: &ResolvedSector,
        block: &Block,
    ) {
        if !me.draw_ceiling || (me.is_wall() && me.floor_split.is_none()) {
            return;
        }
        let h = &me.ws;
        let tex = &block.textures;
        // A split wall keeps the open half of its floor split for the ceiling too.
        let split = if me.is_wall() { me.floor_split } else { me.ceiling_split };
        match split.corner() {
            Some(c) => {
                let (l, o, r) = ((c + 1) & 3, (c + 2) & 3, (c + 3) & 3);
                corner_tri(out, BlockFace::Ceiling, x, z, [c, o, l], [h[c], h[o], h[l]], tex);
                if !me.is_wall() {
                    let f = h[r];
                    corner_tri(out, BlockFace::CeilingTriangle2, x, z, [c, r, o], [f, f, f], tex);
                }
            }
            None if is_planar(h) => {
                corner_quad(out, BlockFace::Ceiling, x, z, [NW, SW, SE, NE], h, tex);
            }
            None if !me.ceiling_split_toggled => {
                corner_tri(out, BlockFace::Ceiling, x, z, [NW, SE, NE], [h[NW], h[SE], h[NE]], tex);
                corner_tri(out, BlockFace::CeilingTriangle2, x, z, [NW, SW, SE], [h[NW], h[SW], h[SE]], tex);
            }
            None => {
                corner_tri(out, BlockFace::Ceiling, x, z, [NE, SW, SE], [h[NE], h[SW], h[SE]], tex);
                corner_tri(out, BlockFace::CeilingTriangle2, x, z, [NE, NW, SW], [h[NE], h[NW], h[SW]], tex);
            }
        }
    }
}

/// Opposite edges rise by the same amount.
#[inline]
pub fn is_planar(h: &[i32; 4]) -> bool {
    h[NW] - h[NE] == h[SW] - h[SE]
}

fn diagonal_strip(x: i32, z: i32, a: usize, b: usize, block: &Block) -> Strip<'_> {
    Strip {
        side: WallSide::Diagonal,
        a: corner_grid(x, z, a),
        b: corner_grid(x, z, b),
        textures: &block.textures,
    }
}

fn corner_tri(
    out: &mut SectorGeometry,
    face: BlockFace,
    x: i32,
    z: i32,
    corners: [usize; 3],
    heights: [i32; 3],
    tex: &[TextureArea; BlockFace::COUNT],
) {
    let p = [0, 1, 2].map(|i| grid_point(corner_grid(x, z, corners[i]), heights[i]));
    out.push_tri(face, p, corners, &tex[face.index()]);
}

fn corner_quad(
    out: &mut SectorGeometry,
    face: BlockFace,
    x: i32,
    z: i32,
    corners: [usize; 4],
    h: &[i32; 4],
    tex: &[TextureArea; BlockFace::COUNT],
) {
    let p = corners.map(|k| grid_point(corner_grid(x, z, k), h[k]));
    out.push_quad(face, p, corners, &tex[face.index()]);
}

/// Full build of one room.
pub fn build_geometry(level: &Level, room: &Room, options: BuildOptions) -> RoomGeometry {
    FaceBuilder::new(level, room, options).build_geometry()
}

/// Partial rebuild of `area` in an existing geometry.
pub fn rebuild_area(
    level: &Level,
    room: &Room,
    area: SectorRect,
    geometry: &mut RoomGeometry,
    options: BuildOptions,
) {
    FaceBuilder::new(level, room, options).rebuild_area(area, geometry);
}
