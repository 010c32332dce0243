//! Lagrange interpolation weights on small, irregular node sets.
//!
//! Boundary stencils extrapolate through at most [`MAX_NODES`] points (the physical
//! boundary plus up to three interior cell centers), so weights are returned in a
//! fixed-capacity, stack allocated [`InterpCoeffs`] rather than a `Vec`.

use num::Float;
use std::ops::Index;

pub mod exact;

/// Largest node set supported by [`poly_interp_coeff`].
pub const MAX_NODES: usize = 4;

/// Weights of a Lagrange interpolant, one per node. Slots past `len()` hold zero, so
/// indexing a node that did not participate yields a vanishing weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterpCoeffs<T> {
    weights: [T; MAX_NODES],
    len: usize,
}

impl<T: Float> InterpCoeffs<T> {
    /// Number of participating nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[T] {
        &self.weights[..self.len]
    }

    /// Evaluates the interpolant given one value per node.
    pub fn evaluate(&self, values: &[T]) -> T {
        debug_assert_eq!(values.len(), self.len);

        self.as_slice()
            .iter()
            .zip(values)
            .fold(T::zero(), |acc, (&w, &v)| acc + w * v)
    }
}

impl<T> Index<usize> for InterpCoeffs<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.weights[index]
    }
}

/// Computes weights `c` such that the unique polynomial of degree `nodes.len() - 1`
/// through `(nodes[m], v[m])` evaluates to `sum(c[m] * v[m])` at `target`.
///
/// Nodes must be distinct and at most [`MAX_NODES`] of them may be given.
pub fn poly_interp_coeff<T: Float>(target: T, nodes: &[T]) -> InterpCoeffs<T> {
    assert!(
        nodes.len() <= MAX_NODES,
        "at most {MAX_NODES} interpolation nodes are supported, got {}",
        nodes.len()
    );

    let mut weights = [T::zero(); MAX_NODES];

    for j in 0..nodes.len() {
        let mut num = T::one();
        let mut den = T::one();

        for i in 0..nodes.len() {
            if i != j {
                num = num * (target - nodes[i]);
                den = den * (nodes[j] - nodes[i]);
            }
        }

        weights[j] = num / den;
    }

    InterpCoeffs {
        weights,
        len: nodes.len(),
    }
}
