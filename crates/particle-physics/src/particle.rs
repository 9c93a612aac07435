//! Per-particle record handed to the instanced renderer

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// GPU-compatible particle instance
/// Aligned for WGSL struct compatibility (16 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Position in world units
    pub position: [f32; 2],
    /// Particle type, indexes the renderer's color palette
    pub particle_type: u32,
    /// Radius for rendering
    pub radius: f32,
}

impl ParticleInstance {
    pub fn new(position: Vec2, particle_type: u8, radius: f32) -> Self {
        Self {
            position: position.to_array(),
            particle_type: particle_type as u32,
            radius,
        }
    }
}
