use tombforge_geom::{Vec2, Vec3};
use tombforge_sector::{BlockFace, CANONICAL_UV, TextureArea};

use crate::assemble::VertexRange;

/// One emitted vertex. `color` is filled in by the lighting pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorVertex {
    pub position: Vec3,
    pub uv: Vec2,
    pub editor_uv: Vec2,
    pub color: [f32; 4],
}

/// Vertex list of a single sector plus the local range of each face kind.
#[derive(Clone, Debug, PartialEq)]
pub struct SectorGeometry {
    pub vertices: Vec<EditorVertex>,
    pub ranges: [VertexRange; BlockFace::COUNT],
}

impl Default for SectorGeometry {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            ranges: [VertexRange::EMPTY; BlockFace::COUNT],
        }
    }
}

impl SectorGeometry {
    #[inline]
    pub fn range(&self, face: BlockFace) -> VertexRange {
        self.ranges[face.index()]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Faces with a non-empty range, in `BlockFace` order.
    pub fn faces(&self) -> impl Iterator<Item = (BlockFace, VertexRange)> + '_ {
        BlockFace::ALL
            .iter()
            .map(|&f| (f, self.ranges[f.index()]))
            .filter(|(_, r)| !r.is_empty())
    }

    /// Appends a quad as triangles `(p0, p1, p2)` and `(p0, p2, p3)`. `uv_ix`
    /// picks the texture-area corner for each point.
    pub(crate) fn push_quad(
        &mut self,
        face: BlockFace,
        p: [Vec3; 4],
        uv_ix: [usize; 4],
        tex: &TextureArea,
    ) {
        let start = self.begin(face);
        for i in [0, 1, 2, 0, 2, 3] {
            self.push_vertex(p[i], uv_ix[i], tex);
        }
        self.finish(face, start);
    }

    pub(crate) fn push_tri(
        &mut self,
        face: BlockFace,
        p: [Vec3; 3],
        uv_ix: [usize; 3],
        tex: &TextureArea,
    ) {
        let start = self.begin(face);
        for i in 0..3 {
            self.push_vertex(p[i], uv_ix[i], tex);
        }
        self.finish(face, start);
    }

    #[inline]
    fn begin(&mut self, face: BlockFace) -> u32 {
        debug_assert!(
            self.ranges[face.index()].is_empty(),
            "{face:?} emitted twice for one sector"
        );
        self.vertices.len() as u32
    }

    #[inline]
    fn finish(&mut self, face: BlockFace, start: u32) {
        self.ranges[face.index()] = VertexRange {
            start,
            count: self.vertices.len() as u32 - start,
        };
    }

    #[inline]
    fn push_vertex(&mut self, position: Vec3, corner: usize, tex: &TextureArea) {
        self.vertices.push(EditorVertex {
            position,
            uv: tex.tex_coords[corner & 3],
            editor_uv: CANONICAL_UV[corner & 3],
            color: [1.0, 1.0, 1.0, 1.0],
        });
    }
}
