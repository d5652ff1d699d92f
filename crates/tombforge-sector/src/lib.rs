//! Sector blocks, face kinds and the per-room block grid.
#![forbid(unsafe_code)]

pub mod block;
pub mod face;
pub mod grid;
pub mod rect;
pub mod texture;

pub use block::{Block, BlockType, CORNER_OFFSETS, DiagonalSplit, NE, NW, PortalId, SE, SW};
pub use face::{BlockFace, Direction, WallPart, WallSide};
pub use grid::SectorGrid;
pub use rect::SectorRect;
pub use texture::{CANONICAL_UV, TextureArea};
