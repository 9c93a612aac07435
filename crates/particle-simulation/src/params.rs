//! Physics parameters for runtime tuning

use particle_physics::constants;

/// Engine-owned parameter bag. Any field may change between steps without
/// touching particle state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsParams {
    /// Cutoff for spatial-hash mode and cell side of the grid
    pub interaction_radius: f32,
    /// Particles are kept at least this far from each wall
    pub particle_radius: f32,

    // Close-range repulsion
    pub repulsion_radius: f32,
    pub repulsion_strength: f32,

    // Integration
    pub friction: f32,
    pub max_velocity: f32,
    pub force_scale: f32,
    /// Power-law exponent used in brute-force mode
    pub force_falloff: f32,
    pub wall_damping: f32,

    /// O(n²) all-pairs when set, grid-accelerated otherwise
    pub use_brute_force: bool,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            interaction_radius: constants::INTERACTION_RADIUS,
            particle_radius: constants::PARTICLE_RADIUS,
            repulsion_radius: constants::REPULSION_RADIUS,
            repulsion_strength: constants::REPULSION_STRENGTH,
            friction: constants::FRICTION,
            max_velocity: constants::MAX_VELOCITY,
            force_scale: constants::FORCE_SCALE,
            force_falloff: constants::FORCE_FALLOFF,
            wall_damping: constants::WALL_DAMPING,
            use_brute_force: true,
        }
    }
}

impl PhysicsParams {
    /// Minimum center-to-center distance enforced at placement
    pub fn placement_spacing(&self) -> f32 {
        self.particle_radius * constants::PLACEMENT_SPACING
    }
}
