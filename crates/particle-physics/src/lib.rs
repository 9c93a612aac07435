//! # Particle Life Physics
//!
//! Leaf building blocks for the particle life engine: default constants, the
//! type x type interaction matrix, pairwise force terms and the uniform grid
//! used to cut neighbor search down from O(n²).

pub mod constants;
pub mod forces;
pub mod matrix;
pub mod particle;
pub mod spatial;

pub use constants::*;
pub use forces::*;
pub use matrix::*;
pub use particle::*;
pub use spatial::*;
