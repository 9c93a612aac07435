//! Type x type interaction matrix
//!
//! Entry `[a][b]` is how strongly type `a` responds to type `b`: positive
//! attracts, negative repels. The matrix is asymmetric, but the force between
//! a pair always uses the average of both directions (see [`crate::forces`]).

use crate::constants::{MATRIX_MAX, MATRIX_MIN};
use rand::Rng;

/// Square interaction table. Its side is the particle type count.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionMatrix {
    /// Row-major: `[a * size + b]`
    values: Vec<f32>,
    size: usize,
}

impl InteractionMatrix {
    /// All-zero matrix: no type feels any other
    pub fn zeros(type_count: usize) -> Self {
        Self {
            values: vec![0.0; type_count * type_count],
            size: type_count,
        }
    }

    /// Uniformly random entries in `[MATRIX_MIN, MATRIX_MAX]`
    pub fn random<R: Rng>(type_count: usize, rng: &mut R) -> Self {
        let values = (0..type_count * type_count)
            .map(|_| rng.random_range(MATRIX_MIN..=MATRIX_MAX))
            .collect();
        Self {
            values,
            size: type_count,
        }
    }

    /// Build from nested rows. Returns `None` if the rows are not square or an
    /// entry is outside `[MATRIX_MIN, MATRIX_MAX]`.
    pub fn from_rows(rows: &[Vec<f32>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        let values: Vec<f32> = rows.iter().flatten().copied().collect();
        if values.iter().any(|v| !in_range(*v)) {
            return None;
        }
        Some(Self { values, size })
    }

    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.values
            .chunks(self.size.max(1))
            .take(self.size)
            .map(<[f32]>::to_vec)
            .collect()
    }

    /// Number of particle types this matrix covers
    #[inline]
    pub fn type_count(&self) -> usize {
        self.size
    }

    /// How strongly type `a` responds to type `b`
    #[inline]
    pub fn get(&self, a: usize, b: usize) -> f32 {
        self.values[a * self.size + b]
    }

    /// Set an entry, clamped into `[MATRIX_MIN, MATRIX_MAX]`
    pub fn set(&mut self, a: usize, b: usize, value: f32) {
        self.values[a * self.size + b] = value.clamp(MATRIX_MIN, MATRIX_MAX);
    }

    /// Copy of this matrix with one extra type appended. The old entries stay
    /// in place; the new row and column are random.
    pub fn with_added_type<R: Rng>(&self, rng: &mut R) -> Self {
        let size = self.size + 1;
        let mut values = Vec::with_capacity(size * size);
        for a in 0..size {
            for b in 0..size {
                if a < self.size && b < self.size {
                    values.push(self.get(a, b));
                } else {
                    values.push(rng.random_range(MATRIX_MIN..=MATRIX_MAX));
                }
            }
        }
        Self { values, size }
    }

    /// Copy of this matrix with row and column `removed` dropped. Types above
    /// `removed` shift down by one.
    pub fn without_type(&self, removed: usize) -> Self {
        debug_assert!(removed < self.size, "type {removed} out of range");
        let size = self.size.saturating_sub(1);
        let values = (0..self.size)
            .filter(|&a| a != removed)
            .flat_map(|a| {
                (0..self.size)
                    .filter(move |&b| b != removed)
                    .map(move |b| self.get(a, b))
            })
            .collect();
        Self { values, size }
    }
}

fn in_range(value: f32) -> bool {
    value.is_finite() && (MATRIX_MIN..=MATRIX_MAX).contains(&value)
}
