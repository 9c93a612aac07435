//! CPU particle life simulation
//!
//! Particle state is kept as parallel arrays (positions, velocities, types,
//! force accumulators) that always share one length. A step is:
//! clear forces, accumulate pair forces (all pairs or grid neighbors),
//! integrate with semi-implicit Euler, then bounce off the walls.

use crate::{PhysicsParams, Settings, SettingsError};
use glam::Vec2;
use particle_physics::constants::{
    MAX_DT, MIN_DISTANCE_SQ, PLACEMENT_ATTEMPTS_PER_PARTICLE, REFERENCE_FPS,
};
use particle_physics::{
    average_attraction, linear_force, power_law_force, InteractionMatrix, ParticleInstance,
    SpatialGrid,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Read-only snapshot for the renderer, valid until the next `update`
#[derive(Clone, Copy, Debug)]
pub struct RenderView<'a> {
    pub positions: &'a [Vec2],
    pub types: &'a [u8],
    pub count: usize,
    pub particle_radius: f32,
}

impl<'a> RenderView<'a> {
    /// Positions as raw `[f32; 2]` bytes for a vertex/storage buffer upload
    pub fn position_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.positions)
    }

    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.positions
            .iter()
            .zip(self.types)
            .map(|(&p, &t)| ParticleInstance::new(p, t, self.particle_radius))
            .collect()
    }
}

/// 2D particle life world
pub struct ParticleSimulation {
    width: f32,
    height: f32,

    params: PhysicsParams,
    matrix: InteractionMatrix,

    // Structure of arrays, all `particle_count` long
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    types: Vec<u8>,
    forces: Vec<Vec2>,

    /// Cell side tracks `params.interaction_radius`
    grid: SpatialGrid,
    /// Scratch buffer for grid queries
    neighbors: Vec<usize>,

    rng: StdRng,
}

impl ParticleSimulation {
    /// Empty world. Call [`initialize`](Self::initialize) to spawn particles.
    pub fn new(width: f32, height: f32, params: PhysicsParams, matrix: InteractionMatrix) -> Self {
        Self::with_rng(width, height, params, matrix, StdRng::from_os_rng())
    }

    /// Like [`new`](Self::new) with a reproducible random stream
    pub fn with_seed(
        width: f32,
        height: f32,
        params: PhysicsParams,
        matrix: InteractionMatrix,
        seed: u64,
    ) -> Self {
        Self::with_rng(width, height, params, matrix, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        width: f32,
        height: f32,
        params: PhysicsParams,
        matrix: InteractionMatrix,
        rng: StdRng,
    ) -> Self {
        Self {
            width,
            height,
            grid: SpatialGrid::new(params.interaction_radius, width, height),
            params,
            matrix,
            positions: Vec::new(),
            velocities: Vec::new(),
            types: Vec::new(),
            forces: Vec::new(),
            neighbors: Vec::new(),
            rng,
        }
    }

    /// Validate `settings` and spawn the configured particles
    pub fn from_settings(
        settings: &Settings,
        width: f32,
        height: f32,
        seed: Option<u64>,
    ) -> Result<Self, SettingsError> {
        let matrix = settings.interaction_matrix()?;
        let params = settings.physics_params();
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut sim = Self::with_rng(width, height, params, InteractionMatrix::zeros(0), rng);
        sim.initialize(settings.particle_count, matrix);
        Ok(sim)
    }

    /// Replace all particles with `count` new ones at rest, spread so that no
    /// two centers are closer than [`PhysicsParams::placement_spacing`].
    /// Types are assigned round-robin.
    pub fn initialize(&mut self, count: usize, matrix: InteractionMatrix) {
        self.matrix = matrix;
        let type_count = self.matrix.type_count().max(1);

        self.positions = self.place_particles(count);
        self.velocities = vec![Vec2::ZERO; count];
        self.forces = vec![Vec2::ZERO; count];
        self.types = (0..count).map(|i| (i % type_count) as u8).collect();
        self.grid
            .set_cell_size(self.params.interaction_radius, self.width, self.height);

        log::info!(
            "Initialized {} particles of {} types in {}x{}",
            count,
            type_count,
            self.width,
            self.height
        );
    }

    /// Rejection sampling against a placement-only grid. Whatever is left
    /// after the attempt budget is dropped in unchecked.
    fn place_particles(&mut self, count: usize) -> Vec<Vec2> {
        let spacing = self.params.placement_spacing();
        let spacing_sq = spacing * spacing;
        let max_attempts = count * PLACEMENT_ATTEMPTS_PER_PARTICLE;

        let mut placement = SpatialGrid::new(spacing, self.width, self.height);
        let mut nearby = Vec::new();
        let mut positions: Vec<Vec2> = Vec::with_capacity(count);
        let mut attempts = 0;

        while positions.len() < count && attempts < max_attempts {
            attempts += 1;
            let candidate = self.random_point();
            placement.nearby_into(candidate.x, candidate.y, &mut nearby);
            let clear = nearby
                .iter()
                .all(|&j| positions[j].distance_squared(candidate) >= spacing_sq);
            if clear {
                placement.insert(positions.len(), candidate.x, candidate.y);
                positions.push(candidate);
            }
        }

        if positions.len() < count {
            log::warn!(
                "Placed {} of {} particles without overlap after {} attempts, scattering the rest",
                positions.len(),
                count,
                attempts
            );
            while positions.len() < count {
                let p = self.random_point();
                positions.push(p);
            }
        }
        positions
    }

    /// Uniform point inside the wall margins
    fn random_point(&mut self) -> Vec2 {
        let r = self.params.particle_radius;
        Vec2::new(
            sample_axis(&mut self.rng, r, self.width - r),
            sample_axis(&mut self.rng, r, self.height - r),
        )
    }

    /// Advance the world by `dt` seconds, capped at [`MAX_DT`]
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0).min(MAX_DT);
        self.compute_forces();
        self.integrate(dt);
        self.resolve_boundaries();
    }

    fn compute_forces(&mut self) {
        self.forces.fill(Vec2::ZERO);
        if self.params.use_brute_force {
            self.accumulate_all_pairs();
        } else {
            self.accumulate_grid_neighbors();
        }
    }

    /// O(n²): every unordered pair once, power-law falloff, no cutoff
    fn accumulate_all_pairs(&mut self) {
        let Self {
            params,
            matrix,
            positions,
            types,
            forces,
            ..
        } = self;

        let n = positions.len();
        for i in 0..n {
            let pi = positions[i];
            let ti = types[i] as usize;
            for j in (i + 1)..n {
                let delta = positions[j] - pi;
                let dist_sq = delta.length_squared();
                if dist_sq < MIN_DISTANCE_SQ {
                    continue;
                }
                let dist = dist_sq.sqrt();
                let magnitude = power_law_force(
                    average_attraction(matrix, ti, types[j] as usize),
                    dist,
                    params.force_scale,
                    params.force_falloff,
                    params.repulsion_radius,
                    params.repulsion_strength,
                );
                let force = delta / dist * magnitude;
                forces[i] += force;
                forces[j] -= force;
            }
        }
    }

    /// O(n) expected: grid neighbors within the interaction radius, linear falloff
    fn accumulate_grid_neighbors(&mut self) {
        let Self {
            params,
            matrix,
            positions,
            types,
            forces,
            grid,
            neighbors,
            ..
        } = self;

        grid.clear();
        for (i, p) in positions.iter().enumerate() {
            grid.insert(i, p.x, p.y);
        }

        let radius_sq = params.interaction_radius * params.interaction_radius;
        for i in 0..positions.len() {
            let pi = positions[i];
            let ti = types[i] as usize;
            grid.nearby_into(pi.x, pi.y, neighbors);

            // Only j > i, so each pair is handled from one side
            for &j in neighbors.iter() {
                if j <= i {
                    continue;
                }
                let delta = positions[j] - pi;
                let dist_sq = delta.length_squared();
                if dist_sq < MIN_DISTANCE_SQ || dist_sq > radius_sq {
                    continue;
                }
                let dist = dist_sq.sqrt();
                let magnitude = linear_force(
                    average_attraction(matrix, ti, types[j] as usize),
                    dist,
                    params.force_scale,
                    params.interaction_radius,
                    params.repulsion_radius,
                    params.repulsion_strength,
                );
                let force = delta / dist * magnitude;
                forces[i] += force;
                forces[j] -= force;
            }
        }
    }

    /// Semi-implicit Euler, normalized to a 60 fps step
    fn integrate(&mut self, dt: f32) {
        let step = dt * REFERENCE_FPS;
        let friction = self.params.friction;
        let max_velocity = self.params.max_velocity;
        let max_velocity_sq = max_velocity * max_velocity;

        for ((position, velocity), force) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(&self.forces)
        {
            *velocity += *force * step;
            *velocity *= friction;

            let speed_sq = velocity.length_squared();
            if speed_sq > max_velocity_sq {
                *velocity *= max_velocity / speed_sq.sqrt();
            }

            *position += *velocity * step;
        }
    }

    /// Reflective walls, `particle_radius` in from each edge
    fn resolve_boundaries(&mut self) {
        let r = self.params.particle_radius;
        let damping = self.params.wall_damping;
        let (max_x, max_y) = (self.width - r, self.height - r);

        for (position, velocity) in self.positions.iter_mut().zip(self.velocities.iter_mut()) {
            reflect(&mut position.x, &mut velocity.x, r, max_x, damping);
            reflect(&mut position.y, &mut velocity.y, r, max_y, damping);
        }
    }

    /// Swap in a new matrix of the same size
    pub fn set_interaction_matrix(&mut self, matrix: InteractionMatrix) {
        debug_assert_eq!(matrix.type_count(), self.matrix.type_count());
        self.matrix = matrix;
    }

    pub fn set_interaction_radius(&mut self, radius: f32) {
        log::debug!("Interaction radius {} -> {}", self.params.interaction_radius, radius);
        self.params.interaction_radius = radius;
        self.grid.set_cell_size(radius, self.width, self.height);
    }

    pub fn set_particle_radius(&mut self, radius: f32) {
        log::debug!("Particle radius {} -> {}", self.params.particle_radius, radius);
        self.params.particle_radius = radius;
    }

    pub fn set_force_falloff(&mut self, exponent: f32) {
        log::debug!("Force falloff {} -> {}", self.params.force_falloff, exponent);
        self.params.force_falloff = exponent;
    }

    /// Switch force algorithm; particle state is untouched
    pub fn set_brute_force(&mut self, enabled: bool) {
        log::debug!("Brute force: {}", enabled);
        self.params.use_brute_force = enabled;
    }

    pub fn set_friction(&mut self, friction: f32) {
        self.params.friction = friction;
    }

    pub fn set_max_velocity(&mut self, max_velocity: f32) {
        self.params.max_velocity = max_velocity;
    }

    pub fn set_force_scale(&mut self, force_scale: f32) {
        self.params.force_scale = force_scale;
    }

    pub fn set_repulsion(&mut self, radius: f32, strength: f32) {
        self.params.repulsion_radius = radius;
        self.params.repulsion_strength = strength;
    }

    /// Replace every parameter at once
    pub fn set_params(&mut self, params: PhysicsParams) {
        if params.interaction_radius != self.params.interaction_radius {
            self.grid
                .set_cell_size(params.interaction_radius, self.width, self.height);
        }
        self.params = params;
    }

    /// Grow to `matrix.type_count()` types. Existing assignments stay valid
    /// since old types are a prefix of the new ones.
    pub fn add_particle_type(&mut self, matrix: InteractionMatrix) {
        debug_assert!(matrix.type_count() > self.matrix.type_count());
        log::info!(
            "Particle types {} -> {}",
            self.matrix.type_count(),
            matrix.type_count()
        );
        self.matrix = matrix;
    }

    /// Drop type `removed`. Its particles get a random surviving type; types
    /// above it shift down by one.
    pub fn remove_particle_type(&mut self, removed: usize, matrix: InteractionMatrix) {
        let type_count = matrix.type_count();
        debug_assert!(type_count > 0);
        debug_assert!(removed <= type_count);
        log::info!(
            "Removing particle type {} ({} -> {} types)",
            removed,
            self.matrix.type_count(),
            type_count
        );

        let removed = removed as u8;
        let upper = type_count.max(1) as u8;
        for t in self.types.iter_mut() {
            if *t == removed {
                *t = self.rng.random_range(0..upper);
            } else if *t > removed {
                *t -= 1;
            }
        }
        self.matrix = matrix;
    }

    /// Rescale positions into new world bounds. Velocities are kept.
    pub fn resize(&mut self, width: f32, height: f32) {
        log::info!("Resizing world {}x{} -> {}x{}", self.width, self.height, width, height);
        let scale = Vec2::new(
            if self.width > 0.0 { width / self.width } else { 1.0 },
            if self.height > 0.0 { height / self.height } else { 1.0 },
        );
        let r = self.params.particle_radius;

        for position in self.positions.iter_mut() {
            let p = *position * scale;
            position.x = p.x.max(r).min(width - r);
            position.y = p.y.max(r).min(height - r);
        }

        self.width = width;
        self.height = height;
        self.grid.resize(width, height);
    }

    pub fn render_view(&self) -> RenderView<'_> {
        RenderView {
            positions: &self.positions,
            types: &self.types,
            count: self.positions.len(),
            particle_radius: self.params.particle_radius,
        }
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    pub fn types(&self) -> &[u8] {
        &self.types
    }

    /// Force accumulators from the last step
    pub fn forces(&self) -> &[Vec2] {
        &self.forces
    }

    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }

    pub fn type_count(&self) -> usize {
        self.matrix.type_count()
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    pub fn matrix(&self) -> &InteractionMatrix {
        &self.matrix
    }

    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Sum of ½|v|² with unit mass
    pub fn kinetic_energy(&self) -> f32 {
        self.velocities
            .iter()
            .map(|v| 0.5 * v.length_squared())
            .sum()
    }

    /// Particle count per type
    pub fn type_histogram(&self) -> Vec<usize> {
        let mut histogram = vec![0; self.matrix.type_count()];
        for &t in &self.types {
            if let Some(slot) = histogram.get_mut(t as usize) {
                *slot += 1;
            }
        }
        histogram
    }
}

fn sample_axis(rng: &mut StdRng, min: f32, max: f32) -> f32 {
    if min < max {
        rng.random_range(min..max)
    } else {
        (min + max) * 0.5
    }
}

fn reflect(position: &mut f32, velocity: &mut f32, min: f32, max: f32, damping: f32) {
    if *position < min {
        *position = min;
        *velocity = velocity.abs() * damping;
    } else if *position > max {
        *position = max;
        *velocity = -velocity.abs() * damping;
    }
}
