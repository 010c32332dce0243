//! Kernels translating a physical boundary condition on one face of a box into either ghost
//! cell values or the stencil weight the boundary contributes to the adjacent interior cell.
//!
//! Every kernel treats a single face, a single component, and either a single cell or the
//! one-cell-thick ghost layer of a box. Kernels hold no state between calls and write each
//! target cell at most once, so callers may invoke them concurrently over disjoint cells.

use mlbc_geometry::Face;
use mlbc_interp::{poly_interp_coeff, InterpCoeffs, MAX_NODES};
use num::Float;
use std::array;

mod eb;
mod ghost;
mod inhomog;
mod weight;

pub use eb::{
    cut_cell_boundary_distance, cut_cell_order, interp_weight_eb_box, interp_weight_eb_cell,
};
pub use ghost::{apply_bc_box, apply_bc_cell, fill_ghost_all};
pub use inhomog::{apply_inhomog_neumann, apply_inhomog_neumann_box, FaceCoef};
pub use weight::{interp_weight_box, interp_weight_cell};

/// Indicates what kind of physical boundary condition is imposed along a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum BoundaryKind {
    /// The value of the field is prescribed on the boundary. Ghost values are extrapolated
    /// through the boundary value and up to three interior cells.
    Dirichlet,
    /// The normal derivative is prescribed. Ghost cells mirror the interior (zero gradient),
    /// any nonzero flux is folded into the right hand side.
    Neumann,
    /// The field is odd across the boundary, so ghost cells mirror the interior with the
    /// opposite sign.
    ReflectOdd,
    /// Periodic, coarse/fine, or otherwise unrecognized boundaries. Kernels leave every
    /// target untouched.
    #[default]
    Other,
}

impl BoundaryKind {
    /// Integer code for Dirichlet conditions used by linear operator bc producers.
    pub const DIRICHLET_CODE: i32 = 101;
    /// Integer code for Neumann conditions.
    pub const NEUMANN_CODE: i32 = 102;
    /// Integer code for odd reflection.
    pub const REFLECT_ODD_CODE: i32 = 103;

    /// Does this condition require any treatment by the kernels?
    pub fn is_treated(self) -> bool {
        !matches!(self, BoundaryKind::Other)
    }
}

impl From<i32> for BoundaryKind {
    fn from(code: i32) -> Self {
        match code {
            Self::DIRICHLET_CODE => BoundaryKind::Dirichlet,
            Self::NEUMANN_CODE => BoundaryKind::Neumann,
            Self::REFLECT_ODD_CODE => BoundaryKind::ReflectOdd,
            _ => BoundaryKind::Other,
        }
    }
}

/// Classification of a ghost cell by the boundary mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellMask {
    /// The cell is covered by another box or lies outside the physical boundary treatment.
    Untreated,
    /// The cell lies on a physical boundary and receives boundary treatment.
    Boundary,
    /// A boundary cell that additionally carries an inhomogeneous Neumann flux to be folded
    /// into the right hand side.
    InhomogNeumann,
}

impl CellMask {
    /// Raw mask value marking inhomogeneous Neumann cells.
    pub const INHOMOG_NEUMANN: i32 = 2;

    /// Classifies a raw mask value: zero (or negative) is untreated, any positive value is a
    /// boundary cell.
    pub fn from_raw(value: i32) -> Self {
        match value {
            Self::INHOMOG_NEUMANN => CellMask::InhomogNeumann,
            v if v > 0 => CellMask::Boundary,
            _ => CellMask::Untreated,
        }
    }

    /// True for every cell receiving boundary treatment, including inhomogeneous Neumann cells.
    pub fn is_boundary(self) -> bool {
        !matches!(self, CellMask::Untreated)
    }
}

/// Describes the boundary condition on one face of a box for a single kernel invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceBc<T, const N: usize> {
    /// Face being treated.
    pub face: Face<N>,
    /// Condition imposed along the face.
    pub kind: BoundaryKind,
    /// Distance from the box face to the physical boundary, in physical units.
    pub bcl: T,
    /// Number of interior cells available along `face.axis`.
    pub blen: usize,
    /// Upper bound on the number of nodes used in Dirichlet extrapolation.
    pub max_order: usize,
    /// Inverse grid spacing along `face.axis`.
    pub dxinv: T,
}

impl<T: Float, const N: usize> FaceBc<T, N> {
    pub fn new(
        face: Face<N>,
        kind: BoundaryKind,
        bcl: T,
        blen: usize,
        max_order: usize,
        dxinv: T,
    ) -> Self {
        Self {
            face,
            kind,
            bcl,
            blen,
            max_order,
            dxinv,
        }
    }

    /// Number of nodes used for Dirichlet extrapolation: the boundary plus as many interior
    /// cells as both the box and `max_order` allow.
    pub fn order(&self) -> usize {
        (self.blen + 1).min(self.max_order).min(MAX_NODES)
    }

    /// Extrapolation nodes in cell widths, measured from the box face. The ghost cell center
    /// lies at `-1/2` and interior cell `m` at `m - 1/2`.
    pub fn nodes(&self) -> [T; MAX_NODES] {
        let half = lit::<T>(0.5);
        array::from_fn(|m| {
            if m == 0 {
                -self.bcl * self.dxinv
            } else {
                lit::<T>(m as f64) - half
            }
        })
    }

    /// Weights extrapolating the boundary value and interior cells to the ghost cell center.
    pub fn coeffs(&self) -> InterpCoeffs<T> {
        let nodes = self.nodes();
        poly_interp_coeff(ghost_center(), &nodes[..self.order()])
    }

    /// Extrapolation weights for every order from 2 up to `max_order`.
    pub fn coef_table(&self) -> CoefTable<T> {
        let nodes = self.nodes();
        let max_order = self.max_order.clamp(2, MAX_NODES);

        CoefTable {
            table: array::from_fn(|r| {
                poly_interp_coeff(ghost_center(), &nodes[..(r + 2).min(max_order)])
            }),
            max_order,
        }
    }
}

/// Dirichlet extrapolation weights indexed by order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoefTable<T> {
    table: [InterpCoeffs<T>; MAX_NODES - 1],
    max_order: usize,
}

impl<T: Float> CoefTable<T> {
    /// Weights for extrapolating with `order` nodes, `2 <= order <= max_order`.
    pub fn get(&self, order: usize) -> &InterpCoeffs<T> {
        debug_assert!(
            (2..=self.max_order).contains(&order),
            "order {order} outside of table range 2..={}",
            self.max_order
        );
        &self.table[order - 2]
    }

    /// The weight of the first interior cell when extrapolating with `order` nodes.
    pub fn interior_weight(&self, order: usize) -> T {
        self.get(order)[1]
    }
}

/// Location of the ghost cell center in the extrapolation frame.
fn ghost_center<T: Float>() -> T {
    -lit::<T>(0.5)
}

/// Converts a literal into the working precision.
fn lit<T: Float>(value: f64) -> T {
    <T as num::NumCast>::from(value).unwrap_or_else(T::nan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_from_codes() {
        assert_eq!(BoundaryKind::from(101), BoundaryKind::Dirichlet);
        assert_eq!(BoundaryKind::from(102), BoundaryKind::Neumann);
        assert_eq!(BoundaryKind::from(103), BoundaryKind::ReflectOdd);
        assert_eq!(BoundaryKind::from(200), BoundaryKind::Other);
        assert_eq!(BoundaryKind::from(-1), BoundaryKind::Other);
        assert!(!BoundaryKind::default().is_treated());
    }

    #[test]
    fn mask_classification() {
        assert_eq!(CellMask::from_raw(0), CellMask::Untreated);
        assert_eq!(CellMask::from_raw(-3), CellMask::Untreated);
        assert_eq!(CellMask::from_raw(1), CellMask::Boundary);
        assert_eq!(CellMask::from_raw(2), CellMask::InhomogNeumann);
        assert_eq!(CellMask::from_raw(7), CellMask::Boundary);
        assert!(CellMask::InhomogNeumann.is_boundary());
    }

    #[test]
    fn effective_order() {
        let face = Face::<3>::negative(2);
        let mut bc = FaceBc::new(face, BoundaryKind::Dirichlet, 0.0, 16, 3, 4.0);
        assert_eq!(bc.order(), 3);

        bc.blen = 1;
        assert_eq!(bc.order(), 2);

        bc.blen = 16;
        bc.max_order = 6;
        assert_eq!(bc.order(), MAX_NODES);
    }

    #[test]
    fn nodes_and_table() {
        let face = Face::positive(0);
        let bc = FaceBc::<f64, 1>::new(face, BoundaryKind::Dirichlet, 0.125, 8, 4, 2.0);
        assert_eq!(bc.nodes(), [-0.25, 0.5, 1.5, 2.5]);

        let table = bc.coef_table();
        for order in 2..=4 {
            let direct = FaceBc { max_order: order, ..bc }.coeffs();
            assert_eq!(table.get(order), &direct);
        }

        // Face boundary, linear extrapolation: ghost = 2 * boundary - interior.
        let bc = FaceBc { bcl: 0.0, max_order: 2, ..bc };
        assert_eq!(bc.coef_table().interior_weight(2), -1.0);
    }
}
