//! Default physics constants for the particle life simulation
//!
//! Distances are in world units (pixels for the default 800x600 world).
//! Force and velocity values are tuned for a 60 fps step.

/// Lowest allowed interaction matrix entry (strongest repulsion)
pub const MATRIX_MIN: f32 = -5.0;

/// Highest allowed interaction matrix entry (strongest attraction)
pub const MATRIX_MAX: f32 = 5.0;

/// Range over which particle types feel each other in spatial-hash mode.
/// Also the cell side of the spatial grid.
pub const INTERACTION_RADIUS: f32 = 80.0;

/// Visual and boundary radius of a particle
pub const PARTICLE_RADIUS: f32 = 3.0;

/// Below this distance the matrix-independent repulsion kicks in
pub const REPULSION_RADIUS: f32 = 10.0;

/// Strength of the close-range repulsion at full overlap
pub const REPULSION_STRENGTH: f32 = 5.0;

/// Velocity damping applied once per step
pub const FRICTION: f32 = 0.98;

/// Speed limit in world units per 60 fps frame
pub const MAX_VELOCITY: f32 = 5.0;

/// Global multiplier on matrix-driven forces
pub const FORCE_SCALE: f32 = 0.1;

/// Exponent of the power-law falloff used in brute-force mode
pub const FORCE_FALLOFF: f32 = 1.0;

/// Fraction of speed kept when bouncing off a wall
pub const WALL_DAMPING: f32 = 0.8;

/// Longest step accepted by `update`, in seconds
pub const MAX_DT: f32 = 1.0 / 30.0;

/// Frame rate the force scale is tuned for
pub const REFERENCE_FPS: f32 = 60.0;

/// Pairs closer than this (squared) are skipped to avoid a zero-length direction
pub const MIN_DISTANCE_SQ: f32 = 1e-4;

/// Minimum center-to-center spacing at placement, in particle radii
pub const PLACEMENT_SPACING: f32 = 2.5;

/// Upper bound on grid cells along either axis; finer requests get wider cells
pub const MAX_GRID_CELLS_PER_AXIS: usize = 1024;

/// Rejection sampling attempts allowed per requested particle
pub const PLACEMENT_ATTEMPTS_PER_PARTICLE: usize = 100;

// Settings bounds
pub const MIN_PARTICLE_COUNT: usize = 10;
pub const MAX_PARTICLE_COUNT: usize = 2000;
pub const MIN_TYPE_COUNT: usize = 2;
pub const MAX_TYPE_COUNT: usize = 8;
pub const MIN_INTERACTION_RADIUS: f32 = 20.0;
pub const MAX_INTERACTION_RADIUS: f32 = 1000.0;
pub const MIN_PARTICLE_RADIUS: f32 = 1.0;
pub const MAX_PARTICLE_RADIUS: f32 = 50.0;
pub const MIN_FORCE_FALLOFF: f32 = 0.0;
pub const MAX_FORCE_FALLOFF: f32 = 4.0;

pub const DEFAULT_PARTICLE_COUNT: usize = 500;
pub const DEFAULT_TYPE_COUNT: usize = 4;
