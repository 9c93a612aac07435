//! Pairwise force terms
//!
//! All functions return a signed magnitude along the unit direction from the
//! first particle to the second: positive pulls the pair together, negative
//! pushes it apart. The caller applies `+magnitude * dir` to the first
//! particle and the exact negation to the second.

use crate::matrix::InteractionMatrix;

/// Symmetrized attraction between two types.
///
/// F = (m[a][b] + m[b][a]) / 2
#[inline]
pub fn average_attraction(matrix: &InteractionMatrix, a: usize, b: usize) -> f32 {
    (matrix.get(a, b) + matrix.get(b, a)) * 0.5
}

/// Matrix-independent repulsion below `repulsion_radius`.
///
/// F = -strength * (1 - r/R)²
#[inline]
pub fn close_repulsion(dist: f32, repulsion_radius: f32, strength: f32) -> f32 {
    if dist >= repulsion_radius {
        return 0.0;
    }
    let overlap = 1.0 - dist / repulsion_radius;
    -strength * overlap * overlap
}

/// Brute-force mode: power-law falloff with no distance cutoff.
///
/// F = attraction * scale * (R_rep / r)^falloff + repulsion
#[inline]
pub fn power_law_force(
    attraction: f32,
    dist: f32,
    force_scale: f32,
    falloff: f32,
    repulsion_radius: f32,
    repulsion_strength: f32,
) -> f32 {
    attraction * force_scale * (repulsion_radius / dist).powf(falloff)
        + close_repulsion(dist, repulsion_radius, repulsion_strength)
}

/// Spatial-hash mode: linear falloff from full strength at `repulsion_radius`
/// down to zero at `interaction_radius`.
///
/// F = attraction * scale * max(0, 1 - (r - R_rep) / (R_int - R_rep)) + repulsion
#[inline]
pub fn linear_force(
    attraction: f32,
    dist: f32,
    force_scale: f32,
    interaction_radius: f32,
    repulsion_radius: f32,
    repulsion_strength: f32,
) -> f32 {
    let span = (interaction_radius - repulsion_radius).max(f32::EPSILON);
    let falloff = (1.0 - (dist - repulsion_radius) / span).max(0.0);
    attraction * force_scale * falloff + close_repulsion(dist, repulsion_radius, repulsion_strength)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_attraction_is_symmetric() {
        let m = InteractionMatrix::from_rows(&[vec![0.0, 4.0], vec![-2.0, 0.0]]).unwrap();
        assert_eq!(average_attraction(&m, 0, 1), 1.0);
        assert_eq!(average_attraction(&m, 1, 0), 1.0);
    }

    #[test]
    fn test_close_repulsion_range() {
        assert_eq!(close_repulsion(10.0, 10.0, 5.0), 0.0);
        assert_eq!(close_repulsion(25.0, 10.0, 5.0), 0.0);
        assert_eq!(close_repulsion(5.0, 10.0, 4.0), -1.0);
        assert!(close_repulsion(0.1, 10.0, 4.0) < close_repulsion(5.0, 10.0, 4.0));
    }

    #[test]
    fn test_linear_falloff_endpoints() {
        // Full strength at the repulsion radius, zero at the interaction radius
        assert_eq!(linear_force(2.0, 10.0, 1.0, 50.0, 10.0, 5.0), 2.0);
        assert_eq!(linear_force(2.0, 50.0, 1.0, 50.0, 10.0, 5.0), 0.0);
        assert_eq!(linear_force(2.0, 30.0, 1.0, 50.0, 10.0, 5.0), 1.0);
        assert_eq!(linear_force(2.0, 80.0, 1.0, 50.0, 10.0, 5.0), 0.0);
    }

    #[test]
    fn test_power_law_never_cuts_off() {
        let near = power_law_force(1.0, 20.0, 1.0, 1.0, 10.0, 5.0);
        let far = power_law_force(1.0, 2000.0, 1.0, 1.0, 10.0, 5.0);
        assert_eq!(near, 0.5);
        assert!(far > 0.0 && far < near);
    }

    #[test]
    fn test_repulsion_overrides_attraction_up_close() {
        assert!(power_law_force(5.0, 1.0, 0.1, 1.0, 10.0, 50.0) < 0.0);
        assert!(linear_force(5.0, 1.0, 0.1, 80.0, 10.0, 50.0) < 0.0);
    }
}
