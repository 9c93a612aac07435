//! Error types for settings validation and persistence.

use std::fmt;

/// Errors raised at the settings boundary, before anything reaches the engine.
#[derive(Debug)]
pub enum SettingsError {
    /// Failed to read or write a settings file.
    Io(std::io::Error),
    /// Settings file is not valid JSON for [`Settings`](crate::Settings).
    Parse(serde_json::Error),
    /// Particle count outside the allowed range.
    ParticleCount(usize),
    /// Type count outside the allowed range.
    TypeCount(usize),
    /// Matrix is not `type_count x type_count`.
    MatrixShape { type_count: usize, rows: usize },
    /// Matrix entry is not finite or outside `[MATRIX_MIN, MATRIX_MAX]`.
    MatrixValue { row: usize, col: usize, value: f32 },
    /// Interaction radius outside the allowed range.
    InteractionRadius(f32),
    /// Particle radius outside the allowed range.
    ParticleRadius(f32),
    /// Force falloff exponent outside the allowed range.
    ForceFalloff(f32),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use particle_physics::constants::*;

        match self {
            SettingsError::Io(e) => write!(f, "Failed to access settings file: {}", e),
            SettingsError::Parse(e) => write!(f, "Failed to parse settings: {}", e),
            SettingsError::ParticleCount(n) => write!(
                f,
                "Particle count {} outside [{}, {}]",
                n, MIN_PARTICLE_COUNT, MAX_PARTICLE_COUNT
            ),
            SettingsError::TypeCount(n) => write!(
                f,
                "Type count {} outside [{}, {}]",
                n, MIN_TYPE_COUNT, MAX_TYPE_COUNT
            ),
            SettingsError::MatrixShape { type_count, rows } => write!(
                f,
                "Interaction matrix must be {0}x{0}, found {1} rows or a ragged row",
                type_count, rows
            ),
            SettingsError::MatrixValue { row, col, value } => write!(
                f,
                "Interaction matrix entry [{}][{}] = {} outside [{}, {}]",
                row, col, value, MATRIX_MIN, MATRIX_MAX
            ),
            SettingsError::InteractionRadius(r) => write!(
                f,
                "Interaction radius {} outside [{}, {}]",
                r, MIN_INTERACTION_RADIUS, MAX_INTERACTION_RADIUS
            ),
            SettingsError::ParticleRadius(r) => write!(
                f,
                "Particle radius {} outside [{}, {}]",
                r, MIN_PARTICLE_RADIUS, MAX_PARTICLE_RADIUS
            ),
            SettingsError::ForceFalloff(x) => write!(
                f,
                "Force falloff {} outside [{}, {}]",
                x, MIN_FORCE_FALLOFF, MAX_FORCE_FALLOFF
            ),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}
