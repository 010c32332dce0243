#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

//! Boundary condition kernels for cell-centered multigrid linear operators.
//!
//! Each kernel treats one face of one box for one component, either filling the ghost
//! layer of a grid function or writing the stencil weight the boundary contributes to the
//! first interior cell. See [`kernel`] for details.

pub mod config;
pub mod fab;
pub mod kernel;

pub use mlbc_geometry as geometry;
pub use mlbc_interp as interp;

/// Provides common types used by most callers.
pub mod prelude {
    pub use crate::config::{BcConfig, ConfigError, FaceConfig};
    pub use crate::fab::{Fab, FabMut, FabRef};
    pub use crate::kernel::{
        apply_bc_box, apply_bc_cell, apply_inhomog_neumann, apply_inhomog_neumann_box,
        cut_cell_boundary_distance, cut_cell_order, fill_ghost_all, interp_weight_box,
        interp_weight_cell, interp_weight_eb_box, interp_weight_eb_cell, BoundaryKind, CellMask,
        CoefTable, FaceBc, FaceCoef,
    };
    pub use mlbc_geometry::{faces, Face, FaceArray, IndexBox};
    pub use mlbc_interp::{poly_interp_coeff, InterpCoeffs};
}
