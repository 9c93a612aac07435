//! Persisted user settings and their validation
//!
//! This is the configuration boundary: everything handed to the engine has
//! passed [`Settings::validate`]. The engine trusts it and does not re-check.

use crate::{PhysicsParams, SettingsError};
use particle_physics::constants::*;
use particle_physics::InteractionMatrix;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub particle_count: usize,
    pub type_count: usize,
    /// Row `a`, column `b`: how type `a` responds to type `b`
    pub interaction_matrix: Vec<Vec<f32>>,
    pub interaction_radius: f32,
    pub particle_radius: f32,
    pub force_falloff: f32,
    pub use_brute_force: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            type_count: DEFAULT_TYPE_COUNT,
            interaction_matrix: InteractionMatrix::random(DEFAULT_TYPE_COUNT, &mut rand::rng())
                .to_rows(),
            interaction_radius: INTERACTION_RADIUS,
            particle_radius: PARTICLE_RADIUS,
            force_falloff: FORCE_FALLOFF,
            use_brute_force: true,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_PARTICLE_COUNT..=MAX_PARTICLE_COUNT).contains(&self.particle_count) {
            return Err(SettingsError::ParticleCount(self.particle_count));
        }
        if !(MIN_TYPE_COUNT..=MAX_TYPE_COUNT).contains(&self.type_count) {
            return Err(SettingsError::TypeCount(self.type_count));
        }

        let rows = self.interaction_matrix.len();
        if rows != self.type_count
            || self
                .interaction_matrix
                .iter()
                .any(|row| row.len() != self.type_count)
        {
            return Err(SettingsError::MatrixShape {
                type_count: self.type_count,
                rows,
            });
        }
        for (row, values) in self.interaction_matrix.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if !value.is_finite() || !(MATRIX_MIN..=MATRIX_MAX).contains(&value) {
                    return Err(SettingsError::MatrixValue { row, col, value });
                }
            }
        }

        if !(MIN_INTERACTION_RADIUS..=MAX_INTERACTION_RADIUS).contains(&self.interaction_radius) {
            return Err(SettingsError::InteractionRadius(self.interaction_radius));
        }
        if !(MIN_PARTICLE_RADIUS..=MAX_PARTICLE_RADIUS).contains(&self.particle_radius) {
            return Err(SettingsError::ParticleRadius(self.particle_radius));
        }
        if !(MIN_FORCE_FALLOFF..=MAX_FORCE_FALLOFF).contains(&self.force_falloff) {
            return Err(SettingsError::ForceFalloff(self.force_falloff));
        }
        Ok(())
    }

    /// Validated matrix, ready for the engine
    pub fn interaction_matrix(&self) -> Result<InteractionMatrix, SettingsError> {
        self.validate()?;
        InteractionMatrix::from_rows(&self.interaction_matrix).ok_or(SettingsError::MatrixShape {
            type_count: self.type_count,
            rows: self.interaction_matrix.len(),
        })
    }

    /// Settings fields laid over the default parameters
    pub fn physics_params(&self) -> PhysicsParams {
        PhysicsParams {
            interaction_radius: self.interaction_radius,
            particle_radius: self.particle_radius,
            force_falloff: self.force_falloff,
            use_brute_force: self.use_brute_force,
            ..PhysicsParams::default()
        }
    }

    pub fn randomize_matrix<R: Rng>(&mut self, rng: &mut R) {
        self.interaction_matrix = InteractionMatrix::random(self.type_count, rng).to_rows();
    }

    /// Append a type with a random row and column. Returns `false` at the
    /// type limit.
    pub fn add_type<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.type_count >= MAX_TYPE_COUNT {
            return false;
        }
        let Ok(matrix) = self.interaction_matrix() else {
            return false;
        };
        self.interaction_matrix = matrix.with_added_type(rng).to_rows();
        self.type_count += 1;
        true
    }

    /// Drop type `index`, shifting higher types down. Returns `false` at the
    /// type minimum or for an unknown index.
    pub fn remove_type(&mut self, index: usize) -> bool {
        if self.type_count <= MIN_TYPE_COUNT || index >= self.type_count {
            return false;
        }
        let Ok(matrix) = self.interaction_matrix() else {
            return false;
        };
        self.interaction_matrix = matrix.without_type(index).to_rows();
        self.type_count -= 1;
        true
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Stored settings if present and valid, defaults otherwise
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_is_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.interaction_matrix().unwrap().type_count(), DEFAULT_TYPE_COUNT);
    }

    #[test]
    fn test_rejects_out_of_range_counts() {
        let mut s = Settings::default();
        s.particle_count = 5;
        assert!(matches!(s.validate(), Err(SettingsError::ParticleCount(5))));
        s.particle_count = 2001;
        assert!(matches!(s.validate(), Err(SettingsError::ParticleCount(2001))));

        let mut s = Settings::default();
        s.type_count = 9;
        assert!(matches!(s.validate(), Err(SettingsError::TypeCount(9))));
    }

    #[test]
    fn test_rejects_mismatched_matrix() {
        let mut s = Settings::default();
        s.type_count = 3;
        assert!(matches!(s.validate(), Err(SettingsError::MatrixShape { type_count: 3, rows: 4 })));

        let mut s = Settings::default();
        s.interaction_matrix[2].pop();
        assert!(matches!(s.validate(), Err(SettingsError::MatrixShape { .. })));

        let mut s = Settings::default();
        s.interaction_matrix[1][3] = -5.5;
        assert!(matches!(
            s.validate(),
            Err(SettingsError::MatrixValue { row: 1, col: 3, .. })
        ));
    }

    #[test]
    fn test_rejects_bad_radii_and_falloff() {
        let mut s = Settings::default();
        s.interaction_radius = 10.0;
        assert!(matches!(s.validate(), Err(SettingsError::InteractionRadius(_))));

        let mut s = Settings::default();
        s.particle_radius = 0.0;
        assert!(matches!(s.validate(), Err(SettingsError::ParticleRadius(_))));
        s.particle_radius = f32::NAN;
        assert!(matches!(s.validate(), Err(SettingsError::ParticleRadius(_))));
        s.particle_radius = 0.001;
        assert!(matches!(s.validate(), Err(SettingsError::ParticleRadius(_))));
        s.particle_radius = MIN_PARTICLE_RADIUS;
        s.validate().unwrap();

        let mut s = Settings::default();
        s.force_falloff = 4.5;
        assert!(matches!(s.validate(), Err(SettingsError::ForceFalloff(_))));
    }

    #[test]
    fn test_add_and_remove_type() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = Settings::default();
        let before = s.interaction_matrix.clone();

        assert!(s.add_type(&mut rng));
        assert_eq!(s.type_count, 5);
        s.validate().unwrap();
        assert_eq!(s.interaction_matrix[0][..4], before[0][..]);

        assert!(s.remove_type(4));
        assert_eq!(s.interaction_matrix, before);

        s.type_count = 2;
        s.interaction_matrix = vec![vec![0.0; 2]; 2];
        assert!(!s.remove_type(0));
        assert!(!s.remove_type(7));
    }

    fn fixed() -> Settings {
        Settings {
            interaction_matrix: vec![
                vec![1.0, -0.5, 0.25, 0.0],
                vec![-2.0, 3.5, 0.0, 4.0],
                vec![0.75, 0.0, -1.0, 2.5],
                vec![5.0, -5.0, 1.5, -3.25],
            ],
            ..Settings::default()
        }
    }

    #[test]
    fn test_json_keeps_values_and_fills_missing_fields() {
        let mut s = fixed();
        s.use_brute_force = false;
        s.particle_count = 123;
        let parsed = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(parsed, s);

        let partial = r#"{ "particle_count": 42, "type_count": 2,
                           "interaction_matrix": [[1.0, -1.0], [0.5, 0.0]] }"#;
        let parsed = Settings::from_json(partial).unwrap();
        assert_eq!(parsed.particle_count, 42);
        assert_eq!(parsed.interaction_radius, INTERACTION_RADIUS);
    }

    #[test]
    fn test_from_json_rejects_garbage_and_invalid() {
        assert!(matches!(Settings::from_json("not json"), Err(SettingsError::Parse(_))));
        let invalid = r#"{ "particle_count": 1 }"#;
        assert!(matches!(Settings::from_json(invalid), Err(SettingsError::ParticleCount(1))));
    }

    #[test]
    fn test_save_load_and_fallback() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("particle-life-settings-{}.json", std::process::id()));

        let mut s = fixed();
        s.particle_count = 77;
        s.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), s);

        std::fs::write(&path, "{ \"type_count\": 1 }").unwrap();
        assert!(Settings::load(&path).is_err());
        let fallback = Settings::load_or_default(&path);
        fallback.validate().unwrap();
        assert_eq!(fallback.particle_count, DEFAULT_PARTICLE_COUNT);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(Settings::load(&path), Err(SettingsError::Io(_))));
    }
}
