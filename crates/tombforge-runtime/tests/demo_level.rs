use tombforge_level::{HeightCombine, LevelDesc};
use tombforge_runtime::{BakeConfig, RoomUpdater};

const DEMO: &str = include_str!("../../../levels/demo.toml");
const BAKE: &str = include_str!("../../../bake.toml");

#[test]
fn demo_level_bakes() {
    let level = LevelDesc::from_toml_str(DEMO).unwrap().build().unwrap();
    let config = BakeConfig::from_toml_str(BAKE).unwrap();
    let mut updater = RoomUpdater::new(config);
    let report = updater.update_all(&level);
    assert_eq!(report.rooms.len(), 2);
    for (id, _) in level.rooms() {
        let buffer = updater.buffer(id).unwrap();
        assert!(buffer.vertex_count() > 0);
        assert!(buffer.colors().chunks_exact(4).all(|c| c[3] == 1.0));
    }
}

#[test]
fn demo_hall_heights() {
    let level = LevelDesc::from_toml_str(DEMO).unwrap().build().unwrap();
    let hall = level.find_room("hall").unwrap();
    let room = level.room(hall).unwrap();
    let span = room.height_at_point_with(3, 1, HeightCombine::MaxSpace).unwrap();
    assert_eq!(span.floor, 0);
    assert_eq!(span.ceiling, 14);
    let raised = room.height_at_point_with(3, 1, HeightCombine::MinSpace).unwrap();
    assert_eq!(raised.floor, 2);
}
