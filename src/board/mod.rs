//! Board primitives shared by the games.
//!
//! - `grid`: rectangular (row, col) boards with orthogonal neighbour lookup
//! - `graph`: point-and-line boards with validated adjacency and jump tables

pub mod grid;
pub mod graph;

pub use grid::{Cell, Grid};
pub use graph::{BoardGraph, JumpTriple, NodeId};
