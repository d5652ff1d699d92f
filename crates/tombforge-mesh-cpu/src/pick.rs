use tombforge_geom::{Ray, ray_triangle, triangle_normal};
use tombforge_sector::BlockFace;

use crate::assemble::RoomGeometry;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub face: BlockFace,
    pub x: i32,
    pub z: i32,
    pub distance: f32,
}

/// Nearest front-facing triangle hit by `ray` (room-local space). At equal
/// distance the first face found wins.
pub fn ray_intersects_geometry(geometry: &RoomGeometry, ray: &Ray) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;
    for (x, z, face, range) in geometry.faces() {
        for tri in geometry.face_vertices(range).chunks_exact(3) {
            let (a, b, c) = (tri[0].position, tri[1].position, tri[2].position);
            if triangle_normal(a, b, c).dot(ray.direction) > 0.0 {
                continue;
            }
            let Some(t) = ray_triangle(ray, a, b, c) else {
                continue;
            };
            if best.is_none_or(|h| t < h.distance) {
                best = Some(RayHit {
                    face,
                    x,
                    z,
                    distance: t,
                });
            }
        }
    }
    best
}
