//! Boundary weights for embedded-boundary (cut-cell) grids, where the extrapolation order
//! is chosen per cell from the area fractions of the faces behind the boundary.

use mlbc_geometry::IndexBox;
use num::Float;

use super::{lit, BoundaryKind, CellMask, CoefTable, FaceBc};
use crate::fab::{FabMut, FabRef};

/// Chooses the extrapolation order for one boundary cell.
///
/// `areas` yields the area fractions of the faces crossed when walking inward from the
/// boundary face, and `order` is the largest order permitted. Starting from one, the order
/// grows by one for each open face (area `> 0`) until the first covered face or until
/// `order - 1` faces have been counted. If any counted face is partially covered the
/// result is clamped to two.
pub fn cut_cell_order<T: Float, I: IntoIterator<Item = T>>(areas: I, order: usize) -> usize {
    let (open, cut) = areas
        .into_iter()
        .take(order.saturating_sub(1))
        .take_while(|&area| area > T::zero())
        .fold((0, false), |(open, cut), area| {
            (open + 1, cut || area < T::one())
        });

    let result = 1 + open;
    if cut {
        result.min(2)
    } else {
        result
    }
}

/// Distance from the center of a cut cell with volume fraction `kappa` to the embedded
/// boundary, in cell widths, floored at `0.3`.
pub fn cut_cell_boundary_distance<T: Float>(kappa: T) -> T {
    let two = lit::<T>(2.0);
    let quarter = lit::<T>(0.25);
    lit::<T>(0.3).max((kappa * kappa - quarter) / (two * kappa))
}

/// Weight of a single ghost cell on a cut-cell grid, given the precomputed table.
fn eb_weight<T: Float, const N: usize>(
    bc: &FaceBc<T, N>,
    table: &CoefTable<T>,
    cell: [isize; N],
    mask: &FabRef<'_, i32, N>,
    area: &FabRef<'_, T, N>,
) -> Option<T> {
    let masked = CellMask::from_raw(mask[(cell, 0)]).is_boundary();

    match bc.kind {
        BoundaryKind::Neumann => Some(T::one()),
        BoundaryKind::ReflectOdd => Some(if masked { T::one() } else { T::zero() }),
        BoundaryKind::Dirichlet => {
            let order = if masked {
                let face = bc.face;
                let boundary = face.boundary_face_of(cell);
                let areas = (0..).map(|r| area[(face.step_inward(boundary, r), 0)]);
                cut_cell_order(areas, bc.order())
            } else {
                1
            };

            Some(if order == 1 {
                T::zero()
            } else {
                table.interior_weight(order)
            })
        }
        BoundaryKind::Other => None,
    }
}

/// Cut-cell version of [`interp_weight_box`](super::interp_weight_box). `area` holds the
/// area fractions of faces normal to `bc.face.axis`, indexed so that face `i` is the low
/// face of cell `i`.
pub fn interp_weight_eb_box<T: Float, const N: usize>(
    bc: &FaceBc<T, N>,
    bx: &IndexBox<N>,
    mut f: FabMut<'_, T, N>,
    mask: FabRef<'_, i32, N>,
    area: FabRef<'_, T, N>,
    icomp: usize,
) {
    if !bc.kind.is_treated() {
        return;
    }

    let table = bc.coef_table();

    log::trace!(
        "Building cut-cell {:?} boundary weights on face {:?} of box {:?}",
        bc.kind,
        bc.face,
        bx
    );

    for cell in bx.iter() {
        if let Some(weight) = eb_weight(bc, &table, cell, &mask, &area) {
            f[(bc.face.step_inward(cell, 1), icomp)] = weight;
        }
    }
}

/// Cut-cell version of [`interp_weight_cell`](super::interp_weight_cell).
pub fn interp_weight_eb_cell<T: Float, const N: usize>(
    bc: &FaceBc<T, N>,
    cell: [isize; N],
    mut f: FabMut<'_, T, N>,
    mask: FabRef<'_, i32, N>,
    area: FabRef<'_, T, N>,
    icomp: usize,
) {
    let table = bc.coef_table();
    if let Some(weight) = eb_weight(bc, &table, cell, &mask, &area) {
        f[(bc.face.step_inward(cell, 1), icomp)] = weight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fab::Fab;
    use crate::kernel::interp_weight_box;
    use mlbc_geometry::{faces, Face};

    #[test]
    fn order_selection() {
        assert_eq!(cut_cell_order([1.0, 1.0, 0.0], 4), 3);
        assert_eq!(cut_cell_order([1.0, 0.6], 4), 2);
        assert_eq!(cut_cell_order([1.0, 0.6, 1.0], 4), 2);
        assert_eq!(cut_cell_order([0.0, 1.0], 4), 1);
        assert_eq!(cut_cell_order([0.4], 4), 2);
        assert_eq!(cut_cell_order([1.0; 8], 4), 4);
        assert_eq!(cut_cell_order([1.0; 8], 2), 2);
        assert_eq!(cut_cell_order(std::iter::empty::<f64>(), 3), 1);
    }

    #[test]
    fn boundary_distance() {
        assert_eq!(cut_cell_boundary_distance(0.5f64), 0.3);
        assert!((cut_cell_boundary_distance(1.0f64) - 0.375).abs() <= 1e-15);
        assert!(cut_cell_boundary_distance(0.1f32) >= 0.3);
    }

    fn setup(size: [usize; 2]) -> (IndexBox<2>, Fab<i32, 2>) {
        let interior = IndexBox::from_size(size);
        let mask = Fab::from_fn(interior.grow(1), 1, |_, _| 1);
        (interior, mask)
    }

    /// With every face fully open the cut-cell weights match the regular builder.
    #[test]
    fn open_faces_match_regular() {
        let size = [7, 5];
        let (interior, mask) = setup(size);

        for face in faces::<2>() {
            let area = Fab::from_fn(interior.grow(1).surrounding_faces(face.axis), 1, |_, _| 1.0);
            let ghost = interior.ghost_layer(face);

            let kinds = [
                BoundaryKind::Dirichlet,
                BoundaryKind::Neumann,
                BoundaryKind::ReflectOdd,
            ];

            for kind in kinds {
                let bc = FaceBc::new(face, kind, 0.2, size[face.axis], 4, 1.0);

                let mut regular = Fab::<f64, 2>::new(interior.grow(1), 1);
                interp_weight_box(&bc, &ghost, regular.view_mut(), mask.view(), 0);

                let mut eb = Fab::<f64, 2>::new(interior.grow(1), 1);
                interp_weight_eb_box(&bc, &ghost, eb.view_mut(), mask.view(), area.view(), 0);

                assert_eq!(regular, eb, "face {face:?}, kind {kind:?}");
            }
        }
    }

    #[test]
    fn order_degrades_near_cut_faces() {
        let size = [6, 3];
        let (interior, mask) = setup(size);
        let faces_box = interior.grow(1).surrounding_faces(0);

        // Row 0: fully open. Row 1: second face covered. Row 2: boundary face partial.
        let area = Fab::from_fn(faces_box, 1, |[i, j], _| match (i, j) {
            (1, 1) => 0.0,
            (0, 2) => 0.5,
            _ => 1.0,
        });

        let face = Face::negative(0);
        let bc = FaceBc::new(face, BoundaryKind::Dirichlet, 0.0, size[0], 4, 1.0);
        let table = bc.coef_table();

        let mut f = Fab::<f64, 2>::new(interior.grow(1), 1);
        let ghost = interior.ghost_layer(face);
        interp_weight_eb_box(&bc, &ghost, f.view_mut(), mask.view(), area.view(), 0);

        assert_eq!(f[([0, 0], 0)], table.interior_weight(4));
        assert_eq!(f[([0, 1], 0)], table.interior_weight(2));
        assert_eq!(f[([0, 2], 0)], table.interior_weight(2));

        // A covered boundary face leaves no usable interior neighbor.
        let area = Fab::from_fn(faces_box, 1, |[i, _], _| if i == 0 { 0.0 } else { 1.0 });
        interp_weight_eb_cell(&bc, [-1, 1], f.view_mut(), mask.view(), area.view(), 0);
        assert_eq!(f[([0, 1], 0)], 0.0);
    }

    #[test]
    fn high_side_walks_inward() {
        let size = [5, 2];
        let (interior, mask) = setup(size);
        let faces_box = interior.grow(1).surrounding_faces(0);

        // Faces 5 (boundary), 4, 3 behind the high boundary; face 3 is covered.
        let area = Fab::from_fn(faces_box, 1, |[i, _], _| if i == 3 { 0.0 } else { 1.0 });

        let face = Face::positive(0);
        let bc = FaceBc::new(face, BoundaryKind::Dirichlet, 0.0, size[0], 4, 1.0);

        let mut f = Fab::<f64, 2>::new(interior.grow(1), 1);
        interp_weight_eb_cell(&bc, [5, 0], f.view_mut(), mask.view(), area.view(), 0);
        assert_eq!(f[([4, 0], 0)], bc.coef_table().interior_weight(3));
    }
}
