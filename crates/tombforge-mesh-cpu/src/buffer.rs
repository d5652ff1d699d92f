use tombforge_geom::Vec3;

use crate::assemble::RoomGeometry;

/// Flat per-room vertex buffer handed to the renderer. Positions stay
/// room-local; `origin` places the room in the world.
#[derive(Default, Clone, Debug)]
pub struct RoomBuffer {
    pub origin: [f32; 3],
    pub pos: Vec<f32>,
    pub uv: Vec<f32>,
    pub editor_uv: Vec<f32>,
    pub col: Vec<f32>,
}

impl RoomBuffer {
    pub fn from_geometry(geometry: &RoomGeometry, origin: Vec3) -> Self {
        let mut buf = RoomBuffer::default();
        buf.refresh(geometry, origin);
        buf
    }

    /// Clears all arrays but retains capacity, then refills from `geometry`.
    pub fn refresh(&mut self, geometry: &RoomGeometry, origin: Vec3) {
        let n = geometry.vertices.len();
        self.origin = [origin.x, origin.y, origin.z];
        self.pos.clear();
        self.uv.clear();
        self.editor_uv.clear();
        self.col.clear();
        self.pos.reserve(n * 3);
        self.uv.reserve(n * 2);
        self.editor_uv.reserve(n * 2);
        self.col.reserve(n * 4);
        for v in &geometry.vertices {
            self.pos
                .extend_from_slice(&[v.position.x, v.position.y, v.position.z]);
            self.uv.extend_from_slice(&[v.uv.x, v.uv.y]);
            self.editor_uv.extend_from_slice(&[v.editor_uv.x, v.editor_uv.y]);
            self.col.extend_from_slice(&v.color);
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    /// Returns a slice of interleaved vertex positions (x,y,z per vertex).
    pub fn positions(&self) -> &[f32] {
        &self.pos
    }

    /// Returns a slice of RGBA colors (4 floats per vertex).
    pub fn colors(&self) -> &[f32] {
        &self.col
    }
}
