//! **mazer-core** — core types for grid mazes.
//!
//! This crate provides the value types shared by the generator and the
//! search engine: geometry primitives, maze cells and the [`Grid`] itself.
//! A `Grid` is a plain owned value; nothing in this crate knows about
//! rendering.

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::Cell;
pub use geom::{Position, Range, RangeIter};
pub use grid::{Grid, GridError};
