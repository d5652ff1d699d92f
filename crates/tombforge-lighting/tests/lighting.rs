use tombforge_geom::Vec3;
use tombforge_level::{Level, Light, Room, RoomId, RoomOrigin};
use tombforge_lighting::{light_room, light_room_serial};
use tombforge_mesh_cpu::{BuildOptions, RoomGeometry, build_geometry};
use tombforge_sector::{BlockType, SectorRect};

fn room_with(nx: i32, nz: i32, lights: Vec<Light>) -> (Level, RoomId) {
    let mut room = Room::new("lit", RoomOrigin::default(), nx, nz);
    room.lights = lights;
    let mut level = Level::new();
    let id = level.add_room(room).unwrap();
    (level, id)
}

fn lit(level: &Level, id: RoomId) -> RoomGeometry {
    let room = level.room(id).unwrap();
    let mut g = build_geometry(level, room, BuildOptions::default());
    light_room(room, &mut g);
    g
}

fn color_at(g: &RoomGeometry, p: Vec3) -> [f32; 4] {
    g.vertices
        .iter()
        .find(|v| v.position == p)
        .map(|v| v.color)
        .expect("vertex at position")
}

#[test]
fn ambient_only_room_is_uniform() {
    let (level, id) = room_with(4, 4, Vec::new());
    let g = lit(&level, id);
    assert!(!g.vertices.is_empty());
    for v in &g.vertices {
        assert_eq!(v.color, [0.25, 0.25, 0.25, 1.0]);
    }
}

#[test]
fn unshadowed_sun_matches_closed_form() {
    let sun = Light::sun(60.0, 0.0, 1.0).with_shadows(false);
    let dir = sun.direction();
    let (level, id) = room_with(5, 5, vec![sun]);
    let g = lit(&level, id);

    let diffuse = (-dir.y).clamp(0.0, 1.0);
    let channel = 32 + (diffuse * 8192.0 / 64.0) as i32;
    let expected = channel as f32 / 128.0;
    let c = color_at(&g, Vec3::new(2048.0, 0.0, 2048.0));
    for k in 0..3 {
        assert!((c[k] - expected).abs() < 1e-5, "{c:?} vs {expected}");
    }
    assert_eq!(c[3], 1.0);

    // Ceilings face away from a downward sun.
    let top = color_at(&g, Vec3::new(2048.0, 3072.0, 2048.0));
    assert_eq!(top, [0.25, 0.25, 0.25, 1.0]);
}

#[test]
fn vertices_sharing_a_position_share_a_color() {
    let light = Light::point(Vec3::new(1800.0, 900.0, 2300.0), 1.0, 1.0, 4.0);
    let (level, id) = room_with(6, 6, vec![light]);
    let g = lit(&level, id);
    for a in &g.vertices {
        for b in &g.vertices {
            if a.position == b.position {
                assert_eq!(a.color, b.color);
            }
        }
    }
}

#[test]
fn wall_between_light_and_vertex_casts_a_shadow() {
    let light = Light::point(Vec3::new(5632.0, 1024.0, 2560.0), 1.0, 1.0, 10.0);
    let vertex = Vec3::new(1024.0, 0.0, 2048.0);

    let (open, open_id) = room_with(7, 5, vec![light.clone()]);
    let bright = color_at(&lit(&open, open_id), vertex);
    assert!(bright[0] > 0.25);

    let (mut walled, walled_id) = room_with(7, 5, vec![light.clone()]);
    let room = walled.room_mut(walled_id).unwrap();
    for z in 1..=3 {
        room.grid.set_type(3, z, BlockType::Wall);
    }
    let dark = color_at(&lit(&walled, walled_id), vertex);
    assert_eq!(dark, [0.25, 0.25, 0.25, 1.0]);

    let walled_room = walled.room_mut(walled_id).unwrap();
    walled_room.lights[0].casts_shadows = false;
    let unshadowed = color_at(&lit(&walled, walled_id), vertex);
    assert!(unshadowed[0] > 0.25);
}

#[test]
fn shadow_light_cancels_matching_point_light() {
    let at = Vec3::new(2560.0, 1024.0, 2560.0);
    let (level, id) = room_with(
        5,
        5,
        vec![
            Light::point(at, 0.8, 1.0, 4.0).with_shadows(false),
            Light::shadow(at, 0.8, 1.0, 4.0).with_shadows(false),
        ],
    );
    let g = lit(&level, id);
    for v in &g.vertices {
        assert_eq!(v.color, [0.25, 0.25, 0.25, 1.0]);
    }
}

#[test]
fn inactive_and_out_of_range_lights_add_nothing() {
    let mut disabled = Light::point(Vec3::new(2560.0, 1024.0, 2560.0), 1.0, 1.0, 4.0);
    disabled.enabled = false;
    let far = Light::point(Vec3::new(2560.0, 1024.0, 2560.0), 1.0, 0.01, 0.05);
    let (level, id) = room_with(5, 5, vec![disabled, far]);
    let g = lit(&level, id);
    for v in &g.vertices {
        assert_eq!(v.color, [0.25, 0.25, 0.25, 1.0]);
    }
}

#[test]
fn spot_lights_only_inside_their_cone() {
    // Pointing straight down from above the centre of sector (2, 2).
    let mut spot = Light::spot(Vec3::new(2560.0, 2800.0, 2560.0), 90.0, 0.0, 1.0, 10.0, 30.0)
        .with_shadows(false);
    spot.length = 3.0;
    spot.cutoff = 6.0;
    let (level, id) = room_with(9, 9, vec![spot]);
    let g = lit(&level, id);
    let under = color_at(&g, Vec3::new(2048.0, 0.0, 2048.0));
    assert!(under[0] > 0.25);
    let outside = color_at(&g, Vec3::new(6144.0, 0.0, 6144.0));
    assert_eq!(outside, [0.25, 0.25, 0.25, 1.0]);
}

#[test]
fn raised_neighbours_light_the_same_from_either_side() {
    // Mirror images about x = 3584: a step east of the light and one west of it.
    let light = Light::point(Vec3::new(3584.0, 2500.0, 1536.0), 1.0, 1.0, 10.0);
    let (mut east, east_id) = room_with(7, 5, vec![light.clone()]);
    east.room_mut(east_id).unwrap().grid.edit_area(SectorRect::single(4, 2), |_, _, b| b.set_floor(4));
    let (mut west, west_id) = room_with(7, 5, vec![light]);
    west.room_mut(west_id).unwrap().grid.edit_area(SectorRect::single(2, 2), |_, _, b| b.set_floor(4));

    let a = color_at(&lit(&east, east_id), Vec3::new(4096.0, 0.0, 2048.0));
    let b = color_at(&lit(&west, west_id), Vec3::new(3072.0, 0.0, 2048.0));
    assert!(a[0] > 0.25, "{a:?}");
    for k in 0..4 {
        assert!((a[k] - b[k]).abs() < 1e-5, "{a:?} vs {b:?}");
    }
}

#[test]
fn shadowed_sun_is_stopped_by_the_room_shell() {
    let sun = Light::sun(60.0, 0.0, 1.0);
    assert!(sun.casts_shadows);
    let (mut level, id) = room_with(5, 5, vec![sun]);
    let vertex = Vec3::new(2048.0, 0.0, 2048.0);
    assert_eq!(color_at(&lit(&level, id), vertex), [0.25, 0.25, 0.25, 1.0]);

    level.room_mut(id).unwrap().lights[0].casts_shadows = false;
    assert!(color_at(&lit(&level, id), vertex)[0] > 0.25);
}

#[test]
fn wall_blocks_a_spot_inside_its_cone() {
    let mut spot = Light::spot(Vec3::new(4608.0, 2800.0, 4608.0), 90.0, 0.0, 1.0, 10.0, 70.0);
    spot.length = 6.0;
    spot.cutoff = 10.0;
    let floor_vertex = Vec3::new(2048.0, 0.0, 4096.0);

    let (open, open_id) = room_with(9, 9, vec![spot.clone()]);
    assert!(color_at(&lit(&open, open_id), floor_vertex)[0] > 0.25);

    let (mut walled, walled_id) = room_with(9, 9, vec![spot]);
    let room = walled.room_mut(walled_id).unwrap();
    for z in 1..=7 {
        room.grid.set_type(3, z, BlockType::Wall);
    }
    assert_eq!(color_at(&lit(&walled, walled_id), floor_vertex), [0.25, 0.25, 0.25, 1.0]);
}

#[test]
fn serial_and_parallel_lighting_agree() {
    let light = Light::point(Vec3::new(1800.0, 900.0, 2300.0), 1.0, 1.0, 4.0);
    let (level, id) = room_with(6, 6, vec![light]);
    let room = level.room(id).unwrap();
    let mut serial = build_geometry(&level, room, BuildOptions::default());
    light_room_serial(room, &mut serial);
    assert_eq!(serial.vertices, lit(&level, id).vertices);
}
