use tombforge_geom::Vec3;
use tombforge_level::{Level, Light, PortalDirection, PortalOpacity, Room, RoomId, RoomOrigin};
use tombforge_runtime::{BakeConfig, RoomUpdater};
use tombforge_sector::{BlockFace, BlockType, SectorRect};

fn lit_room(name: &str, origin: RoomOrigin) -> Room {
    let mut room = Room::new(name, origin, 5, 5);
    room.lights
        .push(Light::point(Vec3::new(2560.0, 1500.0, 2560.0), 0.7, 1.0, 6.0));
    room
}

/// a -> b -> c, each joined through the north wall.
fn chain() -> (Level, [RoomId; 3]) {
    let mut level = Level::new();
    let a = level.add_room(lit_room("a", RoomOrigin::new(0, 0, 0))).unwrap();
    let b = level.add_room(lit_room("b", RoomOrigin::new(0, 0, 3))).unwrap();
    let c = level.add_room(lit_room("c", RoomOrigin::new(0, 0, 6))).unwrap();
    let north = SectorRect::new(1, 4, 3, 4);
    level
        .connect_rooms(a, PortalDirection::North, north, b, PortalOpacity::None)
        .unwrap();
    level
        .connect_rooms(b, PortalDirection::North, north, c, PortalOpacity::None)
        .unwrap();
    (level, [a, b, c])
}

fn assert_matches_fresh(updater: &RoomUpdater, level: &Level, id: RoomId) {
    let mut fresh = RoomUpdater::default();
    fresh.update_completely(level, id);
    let got = updater.geometry(id).unwrap();
    let want = fresh.geometry(id).unwrap();
    assert_eq!(got.vertices, want.vertices, "{id}");
    assert_eq!(got.faces().collect::<Vec<_>>(), want.faces().collect::<Vec<_>>());
    assert_eq!(updater.buffer(id).unwrap().col, fresh.buffer(id).unwrap().col);
}

#[test]
fn full_update_fills_buffer_and_bumps_rev() {
    let (level, [a, ..]) = chain();
    let mut updater = RoomUpdater::default();
    let report = updater.update_completely(&level, a);
    assert_eq!(report.rooms, vec![a]);
    let mesh = updater.mesh(a).unwrap();
    assert_eq!(mesh.rev, 0);
    assert_eq!(mesh.buffer.vertex_count(), mesh.geometry.vertex_count());
    assert_eq!(report.vertices, mesh.geometry.vertex_count());
    updater.update_completely(&level, a);
    assert_eq!(updater.mesh(a).unwrap().rev, 1);
}

#[test]
fn update_all_bakes_every_room_at_its_origin() {
    let (level, ids) = chain();
    let mut updater = RoomUpdater::default();
    let report = updater.update_all(&level);
    assert_eq!(report.rooms.len(), 3);
    for id in ids {
        assert!(updater.buffer(id).is_some());
    }
    assert_eq!(updater.buffer(ids[2]).unwrap().origin, [0.0, 0.0, 6.0 * 1024.0]);
}

#[test]
fn partial_rebuild_matches_full_rebuild() {
    let (mut level, [a, ..]) = chain();
    let mut updater = RoomUpdater::default();
    updater.update_all(&level);
    let room = level.room_mut(a).unwrap();
    room.grid.edit_area(SectorRect::new(1, 1, 2, 1), |_, _, b| b.set_floor(2));
    room.grid.set_type(3, 2, BlockType::Wall);
    updater.smart_build_geometry(&level, a, SectorRect::new(1, 1, 3, 2));
    assert_matches_fresh(&updater, &level, a);
}

#[test]
fn edits_next_to_a_portal_reach_one_room_only() {
    let (mut level, [a, b, c]) = chain();
    let mut updater = RoomUpdater::default();
    updater.update_all(&level);
    let c_rev = updater.mesh(c).unwrap().rev;

    level
        .room_mut(a)
        .unwrap()
        .grid
        .edit_area(SectorRect::single(2, 3), |_, _, blk| blk.set_floor(3));
    let report = updater.smart_build_geometry(&level, a, SectorRect::single(2, 3));

    assert_eq!(report.rooms, vec![a, b]);
    assert_matches_fresh(&updater, &level, a);
    assert_matches_fresh(&updater, &level, b);
    assert_eq!(updater.mesh(c).unwrap().rev, c_rev);
}

#[test]
fn interior_edits_do_not_propagate() {
    let (mut level, [a, ..]) = chain();
    let mut updater = RoomUpdater::default();
    updater.update_all(&level);
    level
        .room_mut(a)
        .unwrap()
        .grid
        .edit_area(SectorRect::single(1, 1), |_, _, blk| blk.set_floor(1));
    let report = updater.smart_build_geometry(&level, a, SectorRect::single(1, 1));
    assert_eq!(report.rooms, vec![a]);
}

#[test]
fn propagation_can_be_switched_off() {
    let (level, [a, ..]) = chain();
    let cfg = BakeConfig {
        propagate: false,
        ..BakeConfig::default()
    };
    let mut updater = RoomUpdater::new(cfg);
    updater.update_all(&level);
    let report = updater.smart_build_geometry(&level, a, SectorRect::single(2, 3));
    assert_eq!(report.rooms, vec![a]);
}

#[test]
fn partial_update_of_unbuilt_room_builds_it() {
    let (level, [a, ..]) = chain();
    let mut updater = RoomUpdater::default();
    let report = updater.smart_build_geometry(&level, a, SectorRect::single(1, 1));
    assert!(report.rooms.contains(&a));
    assert!(updater.buffer(a).is_some());
}

#[test]
fn unknown_rooms_are_ignored() {
    let (level, _) = chain();
    let mut updater = RoomUpdater::default();
    assert!(updater.update_completely(&level, RoomId(99)).rooms.is_empty());
    assert!(
        updater
            .smart_build_geometry(&level, RoomId(99), SectorRect::single(1, 1))
            .rooms
            .is_empty()
    );
    assert!(updater.buffer(RoomId(99)).is_none());
}

#[test]
fn edits_next_to_a_portal_reach_the_neighbours_alternate() {
    let (mut level, [a, b, c]) = chain();
    let flip = level.add_room(lit_room("b-flip", RoomOrigin::new(30, 0, 30))).unwrap();
    level.set_alternate(b, flip).unwrap();
    let mut updater = RoomUpdater::default();
    updater.update_all(&level);
    let c_rev = updater.mesh(c).unwrap().rev;
    assert!(updater.geometry(flip).unwrap().range(2, 0, BlockFace::NorthQA).is_empty());

    level
        .room_mut(a)
        .unwrap()
        .grid
        .edit_area(SectorRect::single(2, 3), |_, _, blk| blk.set_floor(3));
    let report = updater.smart_build_geometry(&level, a, SectorRect::single(2, 3));

    assert_eq!(report.rooms, vec![a, b, flip]);
    assert!(!updater.geometry(flip).unwrap().range(2, 0, BlockFace::NorthQA).is_empty());
    assert_matches_fresh(&updater, &level, b);
    assert_matches_fresh(&updater, &level, flip);
    assert_eq!(updater.mesh(c).unwrap().rev, c_rev);
}

#[test]
fn serial_bake_matches_parallel_bake() {
    let (level, ids) = chain();
    let mut parallel = RoomUpdater::default();
    parallel.update_all(&level);
    let mut serial = RoomUpdater::new(BakeConfig {
        parallel: false,
        ..BakeConfig::default()
    });
    serial.update_all(&level);
    for id in ids {
        assert_eq!(serial.geometry(id).unwrap().vertices, parallel.geometry(id).unwrap().vertices);
        assert_eq!(serial.buffer(id).unwrap().col, parallel.buffer(id).unwrap().col);
    }
}
