//! Observation, action and reward spaces.
use serde::{Deserialize, Serialize};

/// The set of valid values of an observation, action or reward.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Space {
    /// A box in `R^n` with element-wise bounds. The dimension is the length
    /// of the bound vectors.
    Box {
        /// Lower bound of each component.
        low: Vec<f32>,
        /// Upper bound of each component.
        high: Vec<f32>,
    },
    /// The finite set `{0, .., n - 1}`.
    Discrete {
        /// Number of elements.
        n: usize,
    },
}

impl Space {
    /// Creates a box space. `low` and `high` must have the same length.
    pub fn boxed(low: Vec<f32>, high: Vec<f32>) -> Self {
        debug_assert_eq!(low.len(), high.len());
        Space::Box { low, high }
    }

    /// Number of components of a value in this space.
    pub fn dim(&self) -> usize {
        match self {
            Space::Box { low, .. } => low.len(),
            Space::Discrete { .. } => 1,
        }
    }

    /// Whether `value` lies inside the space.
    pub fn contains(&self, value: &[f32]) -> bool {
        match self {
            Space::Box { low, high } => {
                value.len() == low.len()
                    && value
                        .iter()
                        .zip(low.iter().zip(high.iter()))
                        .all(|(v, (l, h))| *v >= *l && *v <= *h)
            }
            Space::Discrete { n } => {
                value.len() == 1 && value[0] >= 0.0 && value[0] < *n as f32
            }
        }
    }

    /// Draws a uniform sample from the space.
    pub fn sample(&self, rng: &mut fastrand::Rng) -> Vec<f32> {
        match self {
            Space::Box { low, high } => low
                .iter()
                .zip(high.iter())
                .map(|(l, h)| l + (h - l) * rng.f32())
                .collect(),
            Space::Discrete { n } => vec![rng.usize(..*n) as f32],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_samples_stay_inside_bounds() {
        let space = Space::boxed(vec![-1.0, 0.0, -3.0], vec![1.0, 2.0, 3.0]);
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..100 {
            let value = space.sample(&mut rng);
            assert_eq!(value.len(), 3);
            assert!(space.contains(&value), "sample {:?} out of bounds", value);
        }
    }

    #[test]
    fn discrete_samples_are_valid_indices() {
        let space = Space::Discrete { n: 4 };
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..50 {
            let value = space.sample(&mut rng);
            assert!(space.contains(&value));
        }
    }

    #[test]
    fn contains_rejects_wrong_dimension_and_range() {
        let space = Space::boxed(vec![0.0, 0.0], vec![1.0, 1.0]);
        assert!(!space.contains(&[0.5]));
        assert!(!space.contains(&[0.5, 1.5]));
        assert!(space.contains(&[0.0, 1.0]));
    }

    #[test]
    fn dim_matches_bound_length() {
        assert_eq!(Space::boxed(vec![0.0; 6], vec![1.0; 6]).dim(), 6);
        assert_eq!(Space::Discrete { n: 3 }.dim(), 1);
    }
}
