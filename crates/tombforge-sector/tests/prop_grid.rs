use proptest::prelude::*;
use tombforge_sector::{BlockType, SectorGrid, SectorRect};

proptest! {
    // Whatever gets edited, the outer ring stays BorderWall.
    #[test]
    fn border_ring_survives_area_edits(
        nx in 3i32..12,
        nz in 3i32..12,
        xa in -2i32..14, za in -2i32..14,
        xb in -2i32..14, zb in -2i32..14,
    ) {
        let mut g = SectorGrid::new(nx, nz, 0, 12);
        g.edit_area(SectorRect::new(xa, za, xb, zb), |_, _, b| b.kind = BlockType::Wall);
        for (x, z, b) in g.iter() {
            if g.is_border(x, z) {
                prop_assert_eq!(b.kind, BlockType::BorderWall);
            }
        }
    }

    // Rect intersection is commutative and contained in both inputs.
    #[test]
    fn rect_intersection_is_contained(
        a in (0i32..10, 0i32..10, 0i32..10, 0i32..10),
        b in (0i32..10, 0i32..10, 0i32..10, 0i32..10),
    ) {
        let ra = SectorRect::new(a.0, a.1, a.2, a.3);
        let rb = SectorRect::new(b.0, b.1, b.2, b.3);
        prop_assert_eq!(ra.intersect(&rb), rb.intersect(&ra));
        if let Some(i) = ra.intersect(&rb) {
            for (x, z) in i.iter() {
                prop_assert!(ra.contains(x, z) && rb.contains(x, z));
            }
        }
    }
}
