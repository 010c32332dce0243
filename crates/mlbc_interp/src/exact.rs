//! Interpolation weights in exact rational arithmetic, for building reference
//! stencils and validating the floating point path.

use num::{rational::Rational64 as Ratio, One};
use std::ops::Index;

/// An ordered set of rational interpolation nodes.
#[derive(Debug, Clone)]
pub struct Stencil {
    grid: Vec<Ratio>,
}

impl Stencil {
    pub fn new(grid: Vec<Ratio>) -> Self {
        Self { grid }
    }

    /// The node set used when extrapolating into a ghost cell: the boundary location,
    /// followed by `interior` cell centers at `1/2, 3/2, ...`.
    pub fn one_sided(boundary: Ratio, interior: u64) -> Self {
        let mut grid = Vec::with_capacity(interior as usize + 1);
        grid.push(boundary);
        grid.extend((0..interior as i64).map(|i| Ratio::new(2 * i + 1, 2)));
        Self { grid }
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Lagrange weights evaluating the interpolant through this stencil at `point`.
    pub fn value_weights(&self, point: Ratio) -> Vec<Ratio> {
        let mut weights = vec![Ratio::one(); self.grid.len()];

        for i in 0..self.grid.len() {
            for j in 0..self.grid.len() {
                if i != j {
                    weights[i] *= (point - self[j]) / (self[i] - self[j])
                }
            }
        }

        weights
    }
}

impl Index<usize> for Stencil {
    type Output = Ratio;

    fn index(&self, index: usize) -> &Self::Output {
        &self.grid[index]
    }
}

/// Convenience wrapper around [`Stencil::value_weights`].
pub fn value_weights(nodes: &[Ratio], point: Ratio) -> Vec<Ratio> {
    Stencil::new(nodes.to_vec()).value_weights(point)
}
