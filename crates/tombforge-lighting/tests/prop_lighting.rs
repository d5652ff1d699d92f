use proptest::prelude::*;
use tombforge_geom::Vec3;
use tombforge_level::{Level, Light, Room, RoomOrigin};
use tombforge_lighting::light_room;
use tombforge_mesh_cpu::{BuildOptions, build_geometry};
use tombforge_sector::SectorRect;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn colors_are_non_negative_and_opaque(
        lx in 1100.0f32..4000.0,
        ly in 64.0f32..3000.0,
        lz in 1100.0f32..4000.0,
        intensity in -1.0f32..2.0,
        raised in 0i16..4,
    ) {
        let mut room = Room::new("p", RoomOrigin::default(), 5, 5);
        room.grid.edit_area(SectorRect::single(2, 2), |_, _, b| b.set_floor(raised));
        room.lights.push(Light::point(Vec3::new(lx, ly, lz), intensity, 0.5, 6.0));
        let mut level = Level::new();
        let id = level.add_room(room).unwrap();
        let room = level.room(id).unwrap();
        let mut g = build_geometry(&level, room, BuildOptions::default());
        light_room(room, &mut g);
        for v in &g.vertices {
            prop_assert_eq!(v.color[3], 1.0);
            prop_assert!(v.color[..3].iter().all(|c| *c >= 0.0));
        }
    }
}
