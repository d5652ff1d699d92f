//! Per-vertex static lighting of room geometry.
//!
//! Channels accumulate in fixed point: 128 is neutral, a light of intensity 1
//! contributes up to 8192 scaled by its color over 64. Colors end up as the
//! clamped channel over 128 with full alpha.
#![forbid(unsafe_code)]

pub mod raytrace;

use hashbrown::HashMap;
use rayon::prelude::*;
use tombforge_geom::{SECTOR_UNITS, Vec3, triangle_normal};
use tombforge_level::{Light, LightKind, Room};
use tombforge_mesh_cpu::{EditorVertex, RoomGeometry};

pub use raytrace::{GridPoint, check_floor_ceiling, light_reaches, ray_trace_x, ray_trace_z};

/// Distance the lit point is moved off its face before shadow tests.
pub const LIT_POINT_NUDGE: f32 = 16.0;
/// Distance a sun's virtual position is placed from the lit point.
const SUN_DISTANCE: f32 = 64.0 * SECTOR_UNITS as f32;

/// Orientation of the face a vertex was emitted for.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Surface {
    normal: Vec3,
    /// Horizontal unit vector from the vertex toward its face's centroid.
    inward: Vec3,
}

impl Surface {
    const FLAT: Surface = Surface {
        normal: Vec3::UP,
        inward: Vec3::ZERO,
    };

    /// Point the shadow tests start from. Pulling it toward the centroid keeps
    /// it inside the sector that owns the face, even when the vertex sits on a
    /// boundary shared with a taller neighbour.
    fn lit_point(&self, position: Vec3) -> Vec3 {
        position + (self.normal + self.inward) * LIT_POINT_NUDGE
    }
}

pub struct LightingEngine<'a> {
    room: &'a Room,
    lights: Vec<&'a Light>,
    parallel: bool,
}

impl<'a> LightingEngine<'a> {
    pub fn new(room: &'a Room) -> Self {
        let lights = room.lights.iter().filter(|l| l.is_active()).collect();
        Self {
            room,
            lights,
            parallel: true,
        }
    }

    /// Spreads vertices over the rayon pool when set (the default).
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Recomputes `color` on every vertex of `geometry`.
    pub fn light(&self, geometry: &mut RoomGeometry) {
        let n = geometry.vertices.len();
        let mut surfaces = vec![Surface::FLAT; n];
        for (_, _, _, range) in geometry.faces() {
            let vs = geometry.face_vertices(range);
            if vs.len() < 3 {
                continue;
            }
            let normal = triangle_normal(vs[0].position, vs[1].position, vs[2].position).normalized();
            let centroid = vs.iter().fold(Vec3::ZERO, |acc, v| acc + v.position) / vs.len() as f32;
            for (surface, v) in surfaces[range.indices()].iter_mut().zip(vs) {
                let d = centroid - v.position;
                let flat = Vec3::new(d.x, 0.0, d.z);
                let inward = if flat.length_squared() > 0.0 {
                    flat.normalized()
                } else {
                    Vec3::ZERO
                };
                *surface = Surface { normal, inward };
            }
        }

        let ambient = self.room.ambient;
        let seed = [
            (ambient.x * 128.0) as i32,
            (ambient.y * 128.0) as i32,
            (ambient.z * 128.0) as i32,
        ];
        let shade = |(v, surface): (&EditorVertex, &Surface)| {
            let mut channels = seed;
            for light in &self.lights {
                self.accumulate(light, v.position, surface, &mut channels);
            }
            channels.map(|c| c.max(0) as f32 / 128.0)
        };
        let colors: Vec<[f32; 3]> = if self.parallel {
            geometry.vertices.par_iter().zip(surfaces.par_iter()).map(shade).collect()
        } else {
            geometry.vertices.iter().zip(&surfaces).map(shade).collect()
        };

        let averaged = average_shared(geometry.vertices.iter().map(|v| v.position), &colors);
        for (vertex, color) in geometry.vertices.iter_mut().zip(averaged) {
            vertex.color = [color[0], color[1], color[2], 1.0];
        }
        log::debug!(
            target: "lighting",
            "lit `{}`: {} vertices, {} lights",
            self.room.name,
            n,
            self.lights.len()
        );
    }

    fn accumulate(&self, light: &Light, position: Vec3, surface: &Surface, channels: &mut [i32; 3]) {
        let base = (light.intensity * 8192.0) as i32;
        let factor = match light.kind {
            LightKind::Point | LightKind::Shadow => self.point_factor(light, position, surface),
            LightKind::Effect => effect_factor(light, position),
            LightKind::Sun => self.sun_factor(light, position, surface),
            LightKind::Spot => self.spot_factor(light, position, surface),
        };
        if factor <= 0.0 {
            return;
        }
        let amount = factor * base as f32;
        let sign = if light.kind == LightKind::Shadow { -1 } else { 1 };
        let color = [light.color.x, light.color.y, light.color.z];
        for (c, k) in channels.iter_mut().zip(color) {
            *c += sign * (amount * k / 64.0) as i32;
        }
    }

    fn visible(&self, light: &Light, position: Vec3, surface: &Surface, target: Vec3) -> bool {
        if !light.casts_shadows {
            return true;
        }
        let lit = surface.lit_point(position);
        light_reaches(&self.room.grid, to_grid(lit), to_grid(target))
    }

    fn point_factor(&self, light: &Light, position: Vec3, surface: &Surface) -> f32 {
        let normal = surface.normal;
        let to_light = light.position - position;
        let distance = to_light.length();
        let outer = light.outer * SECTOR_UNITS as f32;
        let inner = light.inner * SECTOR_UNITS as f32;
        if distance + 64.0 > outer {
            return 0.0;
        }
        let attenuation = if distance <= inner || outer <= inner {
            1.0
        } else {
            (outer - distance) / (outer - inner)
        };
        let lambert = if distance > 0.0 {
            normal.dot(to_light / distance).max(0.0)
        } else {
            1.0
        };
        if lambert <= 0.0 || !self.visible(light, position, surface, light.position) {
            return 0.0;
        }
        attenuation * lambert
    }

    fn sun_factor(&self, light: &Light, position: Vec3, surface: &Surface) -> f32 {
        let dir = light.direction();
        let diffuse = (-dir.dot(surface.normal)).clamp(0.0, 1.0);
        if diffuse <= 0.0 {
            return 0.0;
        }
        let source = position - dir * SUN_DISTANCE;
        if !self.visible(light, position, surface, source) {
            return 0.0;
        }
        diffuse
    }

    fn spot_factor(&self, light: &Light, position: Vec3, surface: &Surface) -> f32 {
        let to_light = light.position - position;
        let distance = to_light.length();
        let cutoff = light.cutoff * SECTOR_UNITS as f32;
        let length = light.length * SECTOR_UNITS as f32;
        if distance <= 0.0 || distance > cutoff {
            return 0.0;
        }
        let toward = to_light / distance;
        let cos_angle = (-toward).dot(light.direction());
        let cos_inner = light.inner.to_radians().cos();
        let cos_outer = light.outer.to_radians().cos();
        if cos_angle < cos_outer {
            return 0.0;
        }
        let cone = if cos_angle >= cos_inner || cos_inner <= cos_outer {
            1.0
        } else {
            (cos_angle - cos_outer) / (cos_inner - cos_outer)
        };
        let falloff = if distance <= length || cutoff <= length {
            1.0
        } else {
            (cutoff - distance) / (cutoff - length)
        };
        let lambert = surface.normal.dot(toward).max(0.0);
        if lambert <= 0.0 || !self.visible(light, position, surface, light.position) {
            return 0.0;
        }
        cone * falloff * lambert
    }
}

/// Effect lights touch only the four grid corners of their own sector, below them.
fn effect_factor(light: &Light, position: Vec3) -> f32 {
    let sx = (light.position.x / SECTOR_UNITS as f32).floor();
    let sz = (light.position.z / SECTOR_UNITS as f32).floor();
    let gx = position.x / SECTOR_UNITS as f32;
    let gz = position.z / SECTOR_UNITS as f32;
    let on_x = gx == sx || gx == sx + 1.0;
    let on_z = gz == sz || gz == sz + 1.0;
    if on_x && on_z && position.y <= light.position.y {
        0.25
    } else {
        0.0
    }
}

#[inline]
fn to_grid(p: Vec3) -> GridPoint {
    GridPoint::new(p.x as i32, p.y as i32, p.z as i32)
}

/// Every vertex at the same exact position receives the mean of their colors.
fn average_shared(positions: impl Iterator<Item = Vec3>, colors: &[[f32; 3]]) -> Vec<[f32; 3]> {
    let keys: Vec<[u32; 3]> = positions.map(Vec3::bits).collect();
    let mut sums: HashMap<[u32; 3], ([f32; 3], u32)> = HashMap::with_capacity(keys.len());
    for (key, color) in keys.iter().zip(colors) {
        let entry = sums.entry(*key).or_insert(([0.0; 3], 0));
        for (s, c) in entry.0.iter_mut().zip(color) {
            *s += c;
        }
        entry.1 += 1;
    }
    keys.iter()
        .map(|key| match sums.get(key) {
            Some((sum, count)) => sum.map(|s| s / *count as f32),
            None => [0.0; 3],
        })
        .collect()
}

/// Lights every vertex of `geometry` from the lights of `room`.
pub fn light_room(room: &Room, geometry: &mut RoomGeometry) {
    LightingEngine::new(room).light(geometry);
}

/// [`light_room`] on the calling thread only.
pub fn light_room_serial(room: &Room, geometry: &mut RoomGeometry) {
    LightingEngine::new(room).parallel(false).light(geometry);
}

#[cfg(test)]
mod tests;
