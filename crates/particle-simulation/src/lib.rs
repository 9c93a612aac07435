//! # Particle Life Simulation Engine
//!
//! CPU particle life world: typed particles pushed around by a type x type
//! attraction matrix, stepped with either an all-pairs or a grid-accelerated
//! force pass.

pub mod error;
pub mod params;
pub mod settings;
pub mod simulation;

pub use error::*;
pub use params::*;
pub use settings::*;
pub use simulation::*;
