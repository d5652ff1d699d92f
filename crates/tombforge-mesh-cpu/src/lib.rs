//! CPU room meshing: resolved heights, per-sector face building, assembly
//! into a room vertex array, and picking against the result.
#![forbid(unsafe_code)]

pub mod assemble;
pub mod buffer;
pub mod build;
pub mod face;
pub mod mesh_build;
pub mod overlay;
pub mod pick;

pub use assemble::{RoomGeometry, VertexAssembler, VertexRange};
pub use buffer::RoomBuffer;
pub use build::{BuildOptions, FaceBuilder, build_geometry, is_planar, rebuild_area};
pub use mesh_build::{EditorVertex, SectorGeometry};
pub use overlay::{Border, ResolvedHeights, ResolvedSector};
pub use pick::{RayHit, ray_intersects_geometry};
