//! Folds an inhomogeneous Neumann flux into the right hand side of the first interior cell.

use mlbc_geometry::IndexBox;
use num::Float;

use super::{lit, BoundaryKind, CellMask, FaceBc};
use crate::fab::{FabMut, FabRef};
use reborrow::ReborrowMut;

/// Operator coefficient `b` on the boundary face.
#[derive(Clone, Copy, Debug)]
pub enum FaceCoef<'a, T, const N: usize> {
    /// Constant coefficient operators.
    Unit,
    /// Face-centered coefficients normal to the boundary axis, face `i` being the low face
    /// of cell `i`.
    Array(FabRef<'a, T, N>),
    /// The cell-centered coordinate `lo + (i + 1/2) * dx` along `axis`, as used by
    /// operators on mapped (e.g. axisymmetric) grids.
    Linear { axis: usize, lo: T, dx: T },
}

impl<T: Float, const N: usize> FaceCoef<'_, T, N> {
    fn eval(&self, face: [isize; N], cell: [isize; N], icomp: usize) -> T {
        match self {
            FaceCoef::Unit => T::one(),
            FaceCoef::Array(bcoef) => bcoef[(face, icomp)],
            FaceCoef::Linear { axis, lo, dx } => {
                let i = lit::<T>(cell[*axis] as f64);
                *lo + (i + lit::<T>(0.5)) * *dx
            }
        }
    }
}

/// Adds the contribution of the Neumann flux `bcval(cell)` to the right hand side of the
/// interior neighbor of the ghost `cell`, scaled by `fac` and the face coefficient.
///
/// The flux is subtracted on low faces and added on high faces. Only Neumann faces and
/// cells marked [`CellMask::InhomogNeumann`] are affected.
pub fn apply_inhomog_neumann<T: Float, const N: usize>(
    bc: &FaceBc<T, N>,
    cell: [isize; N],
    mut rhs: FabMut<'_, T, N>,
    mask: FabRef<'_, i32, N>,
    coef: &FaceCoef<'_, T, N>,
    bcval: FabRef<'_, T, N>,
    fac: T,
    icomp: usize,
) {
    if bc.kind != BoundaryKind::Neumann {
        return;
    }

    if CellMask::from_raw(mask[(cell, 0)]) != CellMask::InhomogNeumann {
        return;
    }

    let face = bc.face;
    let b = coef.eval(face.boundary_face_of(cell), cell, icomp);
    let flux = fac * b * bcval[(cell, icomp)];

    let target = &mut rhs[(face.step_inward(cell, 1), icomp)];
    if face.side {
        *target = *target + flux;
    } else {
        *target = *target - flux;
    }
}

/// Applies [`apply_inhomog_neumann`] to every cell of the ghost layer `bx`.
pub fn apply_inhomog_neumann_box<T: Float, const N: usize>(
    bc: &FaceBc<T, N>,
    bx: &IndexBox<N>,
    mut rhs: FabMut<'_, T, N>,
    mask: FabRef<'_, i32, N>,
    coef: &FaceCoef<'_, T, N>,
    bcval: FabRef<'_, T, N>,
    fac: T,
    icomp: usize,
) {
    if bc.kind != BoundaryKind::Neumann {
        return;
    }

    log::trace!(
        "Folding Neumann flux on face {:?} of box {:?} into rhs",
        bc.face,
        bx
    );

    for cell in bx.iter() {
        apply_inhomog_neumann(bc, cell, rhs.rb_mut(), mask, coef, bcval, fac, icomp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fab::Fab;
    use mlbc_geometry::{faces, Face};

    const SIZE: [usize; 2] = [4, 3];

    fn interior() -> IndexBox<2> {
        IndexBox::from_size(SIZE)
    }

    fn neumann(face: Face<2>) -> FaceBc<f64, 2> {
        FaceBc::new(face, BoundaryKind::Neumann, 0.0, SIZE[face.axis], 2, 1.0)
    }

    fn mask(value: i32) -> Fab<i32, 2> {
        Fab::from_fn(interior().grow(1), 1, |_, _| value)
    }

    #[test]
    fn unit_flux_sign() {
        let bcval = Fab::from_fn(interior().grow(1), 1, |_, _| 5.0);
        let mask = mask(CellMask::INHOMOG_NEUMANN);

        for face in faces::<2>() {
            let mut rhs = Fab::<f64, 2>::new(interior().grow(1), 1);
            let ghost = interior().ghost_layer(face);
            apply_inhomog_neumann_box(
                &neumann(face),
                &ghost,
                rhs.view_mut(),
                mask.view(),
                &FaceCoef::Unit,
                bcval.view(),
                1.0,
                0,
            );

            let expected = if face.side { 5.0 } else { -5.0 };
            for cell in ghost.iter() {
                assert_eq!(rhs[(face.step_inward(cell, 1), 0)], expected);
                assert_eq!(rhs[(face.step_inward(cell, 2), 0)], 0.0);
                assert_eq!(rhs[(cell, 0)], 0.0);
            }
        }
    }

    #[test]
    fn skipped_cells() {
        let bcval = Fab::from_fn(interior().grow(1), 1, |_, _| 5.0);
        let face = Face::negative(1);
        let ghost = interior().ghost_layer(face);
        let mut rhs = Fab::<f64, 2>::new(interior().grow(1), 1);

        // Plain boundary cells carry no flux.
        apply_inhomog_neumann_box(
            &neumann(face),
            &ghost,
            rhs.view_mut(),
            mask(1).view(),
            &FaceCoef::Unit,
            bcval.view(),
            1.0,
            0,
        );

        // Only Neumann faces are corrected.
        let kinds = [
            BoundaryKind::Dirichlet,
            BoundaryKind::ReflectOdd,
            BoundaryKind::Other,
        ];

        for kind in kinds {
            let bc = FaceBc { kind, ..neumann(face) };
            apply_inhomog_neumann_box(
                &bc,
                &ghost,
                rhs.view_mut(),
                mask(2).view(),
                &FaceCoef::Unit,
                bcval.view(),
                1.0,
                0,
            );
        }

        assert!(rhs.storage().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn face_coefficients() {
        let grown = interior().grow(1);
        let bcval = Fab::from_fn(grown, 2, |_, comp| 1.0 + comp as f64);
        let mask = mask(2);

        // Coefficient equal to the face index along the axis.
        let bcoef = Fab::from_fn(grown.surrounding_faces(0), 2, |[i, _], _| i as f64);
        let coef = FaceCoef::Array(bcoef.view());

        let low = Face::negative(0);
        let mut rhs = Fab::<f64, 2>::new(grown, 2);
        apply_inhomog_neumann(
            &neumann(low),
            [-1, 1],
            rhs.view_mut(),
            mask.view(),
            &coef,
            bcval.view(),
            0.5,
            1,
        );
        // Boundary face 0 carries coefficient 0.
        assert_eq!(rhs[([0, 1], 1)], 0.0);

        let high = Face::positive(0);
        apply_inhomog_neumann(
            &neumann(high),
            [4, 1],
            rhs.view_mut(),
            mask.view(),
            &coef,
            bcval.view(),
            0.5,
            1,
        );
        assert_eq!(rhs[([3, 1], 1)], 0.5 * 4.0 * 2.0);
        assert_eq!(rhs[([3, 1], 0)], 0.0);
    }

    #[test]
    fn linear_coefficient() {
        let grown = interior().grow(1);
        let bcval = Fab::from_fn(grown, 1, |_, _| 2.0);
        let mask = mask(2);

        // Faces normal to y, with the coefficient given by the radial (x) coordinate.
        let coef = FaceCoef::Linear { axis: 0, lo: 1.0, dx: 0.5 };

        let face = Face::negative(1);
        let mut rhs = Fab::<f64, 2>::new(grown, 1);
        apply_inhomog_neumann_box(
            &neumann(face),
            &interior().ghost_layer(face),
            rhs.view_mut(),
            mask.view(),
            &coef,
            bcval.view(),
            1.0,
            0,
        );

        for i in 0..SIZE[0] as isize {
            let r = 1.0 + (i as f64 + 0.5) * 0.5;
            assert_eq!(rhs[([i, 0], 0)], -2.0 * r);
        }
    }
}
