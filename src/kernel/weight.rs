//! Stencil weights contributed by a boundary to the adjacent interior cell, for operators
//! that never materialize ghost cells.

use mlbc_geometry::IndexBox;
use num::Float;

use super::{BoundaryKind, CellMask, FaceBc};
use crate::fab::{FabMut, FabRef};

/// Weight written for a ghost cell given whether it is masked as a boundary cell. Returns
/// `None` when the interior cell should be left untouched.
fn boundary_weight<T: Float>(kind: BoundaryKind, interior_weight: T, masked: bool) -> Option<T> {
    match kind {
        BoundaryKind::Neumann => Some(T::one()),
        BoundaryKind::ReflectOdd => Some(if masked { T::one() } else { T::zero() }),
        BoundaryKind::Dirichlet => Some(if masked { interior_weight } else { T::zero() }),
        BoundaryKind::Other => None,
    }
}

/// Writes the boundary weight for every ghost cell of `bx` (the layer just outside
/// `bc.face`) into the neighboring interior cell of `f`.
///
/// Neumann faces always receive `1`. Odd reflection receives `1` on masked cells, Dirichlet
/// receives the interior weight of the extrapolation stencil. Unmasked cells receive `0`.
pub fn interp_weight_box<T: Float, const N: usize>(
    bc: &FaceBc<T, N>,
    bx: &IndexBox<N>,
    mut f: FabMut<'_, T, N>,
    mask: FabRef<'_, i32, N>,
    icomp: usize,
) {
    if !bc.kind.is_treated() {
        return;
    }

    let interior_weight = match bc.kind {
        BoundaryKind::Dirichlet => bc.coeffs()[1],
        _ => T::zero(),
    };

    log::trace!(
        "Building {:?} boundary weights on face {:?} of box {:?}",
        bc.kind,
        bc.face,
        bx
    );

    for cell in bx.iter() {
        let masked = CellMask::from_raw(mask[(cell, 0)]).is_boundary();
        if let Some(weight) = boundary_weight(bc.kind, interior_weight, masked) {
            f[(bc.face.step_inward(cell, 1), icomp)] = weight;
        }
    }
}

/// Writes the boundary weight for a single ghost cell. See [`interp_weight_box`].
pub fn interp_weight_cell<T: Float, const N: usize>(
    bc: &FaceBc<T, N>,
    cell: [isize; N],
    mut f: FabMut<'_, T, N>,
    mask: FabRef<'_, i32, N>,
    icomp: usize,
) {
    let interior_weight = match bc.kind {
        BoundaryKind::Dirichlet => bc.coeffs()[1],
        _ => T::zero(),
    };

    let masked = CellMask::from_raw(mask[(cell, 0)]).is_boundary();
    if let Some(weight) = boundary_weight(bc.kind, interior_weight, masked) {
        f[(bc.face.step_inward(cell, 1), icomp)] = weight;
    }
}
