//! Rebuild orchestration: full and partial room rebuilds, relighting, buffer
//! refresh and one-hop propagation across portals.
#![forbid(unsafe_code)]

mod config;

use std::time::Instant;

use hashbrown::HashMap;
use rayon::prelude::*;
use tombforge_level::{Level, Room, RoomId};
use tombforge_lighting::LightingEngine;
use tombforge_mesh_cpu::{BuildOptions, RoomBuffer, RoomGeometry, build_geometry, rebuild_area};
use tombforge_sector::SectorRect;

pub use config::BakeConfig;

/// Cached output of one room.
pub struct RoomMesh {
    pub geometry: RoomGeometry,
    pub buffer: RoomBuffer,
    /// Bumped on every rebuild of this room.
    pub rev: u64,
}

/// What one update call touched.
#[derive(Clone, Debug, Default)]
pub struct RebuildReport {
    pub rooms: Vec<RoomId>,
    pub vertices: usize,
    pub t_total_ms: u32,
    pub t_mesh_ms: u32,
    pub t_light_ms: u32,
    pub t_buffer_ms: u32,
}

impl RebuildReport {
    fn absorb(&mut self, other: RebuildReport) {
        self.rooms.extend(other.rooms);
        self.vertices += other.vertices;
        self.t_mesh_ms = self.t_mesh_ms.saturating_add(other.t_mesh_ms);
        self.t_light_ms = self.t_light_ms.saturating_add(other.t_light_ms);
        self.t_buffer_ms = self.t_buffer_ms.saturating_add(other.t_buffer_ms);
    }
}

#[inline]
fn elapsed_ms(t0: Instant) -> u32 {
    t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32
}

fn union(a: SectorRect, b: SectorRect) -> SectorRect {
    SectorRect::new(a.x0.min(b.x0), a.z0.min(b.z0), a.x1.max(b.x1), a.z1.max(b.z1))
}

pub struct RoomUpdater {
    config: BakeConfig,
    meshes: HashMap<RoomId, RoomMesh>,
}

impl Default for RoomUpdater {
    fn default() -> Self {
        Self::new(BakeConfig::default())
    }
}

impl RoomUpdater {
    pub fn new(config: BakeConfig) -> Self {
        Self {
            config,
            meshes: HashMap::new(),
        }
    }

    pub fn config(&self) -> &BakeConfig {
        &self.config
    }

    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            parallel: self.config.parallel,
        }
    }

    pub fn mesh(&self, room: RoomId) -> Option<&RoomMesh> {
        self.meshes.get(&room)
    }

    pub fn geometry(&self, room: RoomId) -> Option<&RoomGeometry> {
        self.meshes.get(&room).map(|m| &m.geometry)
    }

    /// Render buffer of `room`, if it has been built.
    pub fn buffer(&self, room: RoomId) -> Option<&RoomBuffer> {
        self.meshes.get(&room).map(|m| &m.buffer)
    }

    /// Drops cached output of a removed room.
    pub fn forget(&mut self, room: RoomId) -> bool {
        self.meshes.remove(&room).is_some()
    }

    fn store(&mut self, id: RoomId, geometry: RoomGeometry, buffer: RoomBuffer) {
        let rev = self.meshes.get(&id).map_or(0, |m| m.rev + 1);
        self.meshes.insert(
            id,
            RoomMesh {
                geometry,
                buffer,
                rev,
            },
        );
    }

    /// Whole-room rebuild: faces, lighting, buffer.
    pub fn update_completely(&mut self, level: &Level, id: RoomId) -> RebuildReport {
        let Some(room) = level.room(id) else {
            log::warn!(target: "runtime", "update of unknown {id}");
            return RebuildReport::default();
        };
        let t0 = Instant::now();
        let (geometry, buffer, mut report) = bake_room(level, room, self.build_options(), self.config.lighting);
        report.rooms.push(id);
        report.t_total_ms = elapsed_ms(t0);
        self.store(id, geometry, buffer);
        report
    }

    /// Full rebuild of every room. Rooms only read each other, so they bake in
    /// parallel unless the config turns that off.
    pub fn update_all(&mut self, level: &Level) -> RebuildReport {
        let t0 = Instant::now();
        let options = self.build_options();
        let lighting = self.config.lighting;
        let rooms: Vec<(RoomId, &Room)> = level.rooms().collect();
        let bake = |&(id, room): &(RoomId, &Room)| (id, bake_room(level, room, options, lighting));
        let baked: Vec<_> = if options.parallel {
            rooms.par_iter().map(bake).collect()
        } else {
            rooms.iter().map(bake).collect()
        };
        let mut report = RebuildReport::default();
        for (id, (geometry, buffer, mut part)) in baked {
            part.rooms.push(id);
            report.absorb(part);
            self.store(id, geometry, buffer);
        }
        report.t_total_ms = elapsed_ms(t0);
        log::info!(
            target: "runtime",
            "baked {} rooms, {} vertices in {} ms",
            report.rooms.len(),
            report.vertices,
            report.t_total_ms
        );
        report
    }

    /// Partial rebuild after an edit of `area`. The area grows by the
    /// configured margin, the whole room is relit, and rooms adjoining a
    /// touched portal get the mapped area rebuilt. Propagation stops there:
    /// rooms two portals away keep their previous geometry.
    pub fn smart_build_geometry(&mut self, level: &Level, id: RoomId, area: SectorRect) -> RebuildReport {
        let Some(room) = level.room(id) else {
            log::warn!(target: "runtime", "partial update of unknown {id}");
            return RebuildReport::default();
        };
        let t0 = Instant::now();
        let Some(dirty) = area.inflate(self.config.margin).intersect(&room.grid.bounds()) else {
            return RebuildReport::default();
        };
        let mut report = self.rebuild_local(level, id, dirty);

        if self.config.propagate {
            for (other, mapped) in propagation_targets(level, room, dirty, self.config.margin) {
                log::debug!(target: "runtime", "{id} -> {other}: propagating {mapped:?}");
                report.absorb(self.rebuild_local(level, other, mapped));
            }
        }
        report.t_total_ms = elapsed_ms(t0);
        report
    }

    fn rebuild_local(&mut self, level: &Level, id: RoomId, area: SectorRect) -> RebuildReport {
        let Some(room) = level.room(id) else {
            return RebuildReport::default();
        };
        let options = self.build_options();
        let lighting = self.config.lighting;
        let Some(mesh) = self.meshes.get_mut(&id) else {
            return self.update_completely(level, id);
        };
        let mut report = RebuildReport::default();

        let t_mesh = Instant::now();
        rebuild_area(level, room, area, &mut mesh.geometry, options);
        report.t_mesh_ms = elapsed_ms(t_mesh);

        if lighting {
            let t_light = Instant::now();
            LightingEngine::new(room)
                .parallel(options.parallel)
                .light(&mut mesh.geometry);
            report.t_light_ms = elapsed_ms(t_light);
        }

        let t_buffer = Instant::now();
        mesh.buffer.refresh(&mesh.geometry, room.world_offset());
        report.t_buffer_ms = elapsed_ms(t_buffer);

        mesh.rev += 1;
        report.vertices = mesh.geometry.vertex_count();
        report.rooms.push(id);
        report
    }
}

fn bake_room(
    level: &Level,
    room: &Room,
    options: BuildOptions,
    lighting: bool,
) -> (RoomGeometry, RoomBuffer, RebuildReport) {
    let mut report = RebuildReport::default();
    let t_mesh = Instant::now();
    let mut geometry = build_geometry(level, room, options);
    report.t_mesh_ms = elapsed_ms(t_mesh);
    if lighting {
        let t_light = Instant::now();
        LightingEngine::new(room)
            .parallel(options.parallel)
            .light(&mut geometry);
        report.t_light_ms = elapsed_ms(t_light);
    }
    let t_buffer = Instant::now();
    let buffer = RoomBuffer::from_geometry(&geometry, room.world_offset());
    report.t_buffer_ms = elapsed_ms(t_buffer);
    report.vertices = geometry.vertex_count();
    (geometry, buffer, report)
}

/// Rooms behind portals that overlap `dirty`, with the overlap mapped into
/// their grid. Alternates of those rooms share the mapped area.
fn propagation_targets(level: &Level, room: &Room, dirty: SectorRect, margin: i32) -> Vec<(RoomId, SectorRect)> {
    let mut targets: HashMap<RoomId, SectorRect> = HashMap::new();
    for portal in &room.portals {
        let Some(touched) = portal.area.inflate(1).intersect(&dirty) else {
            continue;
        };
        let Some(other) = level.room(portal.adjoining_room) else {
            continue;
        };
        let mapped = touched
            .offset(room.position.x - other.position.x, room.position.z - other.position.z)
            .inflate(margin);
        let mut push = |id: RoomId| {
            targets
                .entry(id)
                .and_modify(|r| *r = union(*r, mapped))
                .or_insert(mapped);
        };
        push(portal.adjoining_room);
        if let Some(alt) = other.alternate {
            push(alt);
        }
    }
    let mut out: Vec<_> = targets.into_iter().collect();
    out.sort_by_key(|(id, _)| *id);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_covers_both() {
        let u = union(SectorRect::new(1, 1, 2, 2), SectorRect::new(4, 0, 5, 1));
        assert_eq!(u, SectorRect::new(1, 0, 5, 2));
    }

    #[test]
    fn report_absorb_sums() {
        let mut a = RebuildReport {
            rooms: vec![RoomId(0)],
            vertices: 10,
            t_mesh_ms: 1,
            ..Default::default()
        };
        a.absorb(RebuildReport {
            rooms: vec![RoomId(1)],
            vertices: 5,
            t_mesh_ms: 2,
            ..Default::default()
        });
        assert_eq!(a.rooms, vec![RoomId(0), RoomId(1)]);
        assert_eq!(a.vertices, 15);
        assert_eq!(a.t_mesh_ms, 3);
    }
}
