//! Geometric primitives for block-structured, cell-centered grids: faces of an `N` dimensional
//! box, and inclusive integer index boxes with their cell iterators.

#![allow(clippy::needless_range_loop)]

mod face;
mod index;

pub use face::{faces, Face, FaceArray, FaceIter};
pub use index::{CellIter, IndexBox};
