//! Fills ghost cells from a boundary condition.

use mlbc_geometry::{Face, IndexBox};
use mlbc_interp::InterpCoeffs;
use num::Float;

use super::{BoundaryKind, CellMask, FaceBc};
use crate::fab::{Fab, FabMut, FabRef};

/// How a ghost value is derived from the interior, resolved once per call.
#[derive(Clone, Copy, Debug)]
enum GhostRule<T> {
    /// `ghost = sign * phi(first interior cell)`.
    Mirror(T),
    /// `ghost = sum_m coef[m] * phi(interior cell m) (+ coef[0] * bcval)`.
    Extrapolate(InterpCoeffs<T>),
}

impl<T: Float> GhostRule<T> {
    fn new<const N: usize>(bc: &FaceBc<T, N>) -> Option<Self> {
        match bc.kind {
            BoundaryKind::Neumann => Some(GhostRule::Mirror(T::one())),
            BoundaryKind::ReflectOdd => Some(GhostRule::Mirror(-T::one())),
            BoundaryKind::Dirichlet => Some(GhostRule::Extrapolate(bc.coeffs())),
            BoundaryKind::Other => None,
        }
    }

    fn fill<const N: usize>(
        &self,
        face: Face<N>,
        cell: [isize; N],
        phi: &mut FabMut<'_, T, N>,
        mask: &FabRef<'_, i32, N>,
        bcval: Option<&FabRef<'_, T, N>>,
        icomp: usize,
    ) {
        if !CellMask::from_raw(mask[(cell, 0)]).is_boundary() {
            return;
        }

        match self {
            GhostRule::Mirror(sign) => {
                phi[(cell, icomp)] = *sign * phi[(face.step_inward(cell, 1), icomp)];
            }
            GhostRule::Extrapolate(coef) => {
                let mut tmp = T::zero();
                for m in 1..coef.len() {
                    tmp = tmp + phi[(face.step_inward(cell, m as isize), icomp)] * coef[m];
                }

                if let Some(bcval) = bcval {
                    tmp = tmp + bcval[(cell, icomp)] * coef[0];
                }

                phi[(cell, icomp)] = tmp;
            }
        }
    }
}

/// Applies the boundary condition to every masked ghost cell in `bx`, the one-cell-thick
/// layer just outside `bc.face`.
///
/// `bcval` supplies the prescribed boundary values for inhomogeneous treatment; pass `None`
/// for homogeneous treatment, in which case Dirichlet ghosts depend only on interior data.
/// Only ghost cells are written.
pub fn apply_bc_box<T: Float, const N: usize>(
    bc: &FaceBc<T, N>,
    bx: &IndexBox<N>,
    mut phi: FabMut<'_, T, N>,
    mask: FabRef<'_, i32, N>,
    bcval: Option<FabRef<'_, T, N>>,
    icomp: usize,
) {
    debug_assert_eq!(
        bx.len(bc.face.axis),
        1,
        "ghost layer must be one cell thick"
    );

    let Some(rule) = GhostRule::new(bc) else {
        return;
    };

    log::trace!(
        "Filling {:?} ghost cells on face {:?} of box {:?}",
        bc.kind,
        bc.face,
        bx
    );

    for cell in bx.iter() {
        rule.fill(bc.face, cell, &mut phi, &mask, bcval.as_ref(), icomp);
    }
}

/// Applies the boundary condition to a single ghost cell. See [`apply_bc_box`].
pub fn apply_bc_cell<T: Float, const N: usize>(
    bc: &FaceBc<T, N>,
    cell: [isize; N],
    mut phi: FabMut<'_, T, N>,
    mask: FabRef<'_, i32, N>,
    bcval: Option<FabRef<'_, T, N>>,
    icomp: usize,
) {
    if let Some(rule) = GhostRule::new(bc) {
        rule.fill(bc.face, cell, &mut phi, &mask, bcval.as_ref(), icomp);
    }
}

/// Fills the ghost layer `bx` for every component of `phi`. With the `parallel` feature
/// components are processed concurrently.
pub fn fill_ghost_all<T: Float + Send + Sync, const N: usize>(
    bc: &FaceBc<T, N>,
    bx: &IndexBox<N>,
    phi: &mut Fab<T, N>,
    mask: FabRef<'_, i32, N>,
    bcval: Option<&Fab<T, N>>,
) {
    if let Some(bcval) = bcval {
        debug_assert_eq!(bcval.num_comps(), phi.num_comps());
    }

    let fill = |(comp, dest): (usize, FabMut<'_, T, N>)| {
        let bcval = bcval.map(|values| values.component(comp));
        apply_bc_box(bc, bx, dest, mask, bcval, 0);
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        phi.par_components_mut().enumerate().for_each(fill);
    }

    #[cfg(not(feature = "parallel"))]
    phi.components_mut().enumerate().for_each(fill);
}
