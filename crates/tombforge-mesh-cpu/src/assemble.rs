use std::ops::Range;

use tombforge_geom::Aabb;
use tombforge_sector::BlockFace;

use crate::mesh_build::{EditorVertex, SectorGeometry};

/// `count == 0` means the face is not rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VertexRange {
    pub start: u32,
    pub count: u32,
}

impl VertexRange {
    pub const EMPTY: VertexRange = VertexRange { start: 0, count: 0 };

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn indices(&self) -> Range<usize> {
        self.start as usize..(self.start + self.count) as usize
    }

    #[inline]
    fn shifted(self, offset: u32) -> Self {
        if self.is_empty() {
            self
        } else {
            VertexRange {
                start: self.start + offset,
                count: self.count,
            }
        }
    }
}

/// Geometry of one room: per-sector lists and, once assembled, the flat
/// room-wide vertex array they map into.
#[derive(Clone, Debug, Default)]
pub struct RoomGeometry {
    pub num_x: i32,
    pub num_z: i32,
    pub(crate) sectors: Vec<SectorGeometry>,
    offsets: Vec<u32>,
    pub vertices: Vec<EditorVertex>,
}

impl RoomGeometry {
    pub fn new(num_x: i32, num_z: i32) -> Self {
        let n = (num_x.max(0) * num_z.max(0)) as usize;
        Self {
            num_x,
            num_z,
            sectors: vec![SectorGeometry::default(); n],
            offsets: vec![0; n],
            vertices: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn index(&self, x: i32, z: i32) -> Option<usize> {
        if x >= 0 && z >= 0 && x < self.num_x && z < self.num_z {
            Some((z * self.num_x + x) as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn sector(&self, x: i32, z: i32) -> Option<&SectorGeometry> {
        self.index(x, z).map(|i| &self.sectors[i])
    }

    /// Global range of `face` for sector `(x, z)`; empty when nothing was emitted
    /// or the sector is out of range.
    pub fn range(&self, x: i32, z: i32, face: BlockFace) -> VertexRange {
        match self.index(x, z) {
            Some(i) => self.sectors[i].range(face).shifted(self.offsets[i]),
            None => VertexRange::EMPTY,
        }
    }

    /// Every rendered face as `(x, z, face, global range)`, sectors row by row.
    pub fn faces(&self) -> impl Iterator<Item = (i32, i32, BlockFace, VertexRange)> + '_ {
        let nx = self.num_x.max(1);
        self.sectors.iter().enumerate().flat_map(move |(i, s)| {
            let offset = self.offsets[i];
            let (x, z) = (i as i32 % nx, i as i32 / nx);
            s.faces().map(move |(f, r)| (x, z, f, r.shifted(offset)))
        })
    }

    pub fn face_count(&self) -> usize {
        self.sectors.iter().map(|s| s.faces().count()).sum()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Room-local box around every emitted vertex; `Aabb::EMPTY` when nothing was emitted.
    pub fn bounds(&self) -> Aabb {
        let mut b = Aabb::EMPTY;
        for v in &self.vertices {
            b.expand(v.position);
        }
        b
    }

    /// Vertices of one face in the assembled array.
    pub fn face_vertices(&self, range: VertexRange) -> &[EditorVertex] {
        self.vertices.get(range.indices()).unwrap_or(&[])
    }
}

/// Flattens per-sector vertex lists into the room array.
pub struct VertexAssembler;

impl VertexAssembler {
    pub fn assemble(geometry: &mut RoomGeometry) {
        let total: usize = geometry.sectors.iter().map(|s| s.vertices.len()).sum();
        let mut vertices = Vec::with_capacity(total);
        for (i, s) in geometry.sectors.iter().enumerate() {
            geometry.offsets[i] = vertices.len() as u32;
            vertices.extend_from_slice(&s.vertices);
        }
        geometry.vertices = vertices;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tombforge_geom::Vec3;
    use tombforge_sector::TextureArea;

    fn tri_sector(face: BlockFace) -> SectorGeometry {
        let mut s = SectorGeometry::default();
        s.push_tri(
            face,
            [Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0)],
            [0, 1, 2],
            &TextureArea::default(),
        );
        s
    }

    #[test]
    fn offsets_follow_sector_order() {
        let mut g = RoomGeometry::new(2, 2);
        g.sectors[1] = tri_sector(BlockFace::Floor);
        g.sectors[3] = tri_sector(BlockFace::Ceiling);
        VertexAssembler::assemble(&mut g);
        assert_eq!(g.vertex_count(), 6);
        assert_eq!(g.range(1, 0, BlockFace::Floor), VertexRange { start: 0, count: 3 });
        assert_eq!(g.range(1, 1, BlockFace::Ceiling), VertexRange { start: 3, count: 3 });
        assert!(g.range(0, 0, BlockFace::Floor).is_empty());
        assert!(g.range(7, 7, BlockFace::Floor).is_empty());
        let faces: Vec<_> = g.faces().map(|(x, z, f, _)| (x, z, f)).collect();
        assert_eq!(faces, vec![(1, 0, BlockFace::Floor), (1, 1, BlockFace::Ceiling)]);
        let b = g.bounds();
        assert_eq!(b.min, Vec3::ZERO);
        assert_eq!(b.max, Vec3::new(1.0, 0.0, 1.0));
        assert!(RoomGeometry::new(2, 2).bounds().is_empty());
    }
}
