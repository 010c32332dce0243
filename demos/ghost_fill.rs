//! Fills the ghost layer of a two dimensional grid function from a TOML boundary
//! configuration and reports the error of each face against the analytic solution.

use mlbc::prelude::*;
use std::f64::consts::PI;

const SIZE: usize = 32;

const CONFIG: &str = r#"
max_order = 3

[[lo]]
kind = "Dirichlet"

[[lo]]
kind = "Neumann"

[[hi]]
kind = "Dirichlet"

[[hi]]
kind = "Neumann"
"#;

/// Satisfies zero normal derivative along y at both y faces.
fn solution([x, y]: [f64; 2]) -> f64 {
    (PI * x).sin() * (PI * y).cos() + 1.0
}

fn center(cell: [isize; 2], h: f64) -> [f64; 2] {
    [(cell[0] as f64 + 0.5) * h, (cell[1] as f64 + 0.5) * h]
}

pub fn main() -> eyre::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let config = BcConfig::from_toml_str(CONFIG)?;
    config.validate::<2>()?;

    let h = 1.0 / SIZE as f64;
    let interior = IndexBox::from_size([SIZE; 2]);
    let grown = interior.grow(1);

    let mut phi = Fab::from_fn(grown, 1, |cell, _| {
        if interior.contains(cell) {
            solution(center(cell, h))
        } else {
            0.0
        }
    });
    let mask = Fab::from_fn(grown, 1, |_, _| 1);

    for face in faces::<2>() {
        let bc = config.face_bc::<f64, 2>(face, SIZE, 1.0 / h)?;
        let ghost = interior.ghost_layer(face);

        // Boundary values sampled at the face, along the ghost layer.
        let bcval = Fab::from_fn(grown, 1, |cell, _| {
            let mut position = center(cell, h);
            position[face.axis] = if face.side { 1.0 + bc.bcl } else { -bc.bcl };
            solution(position)
        });

        fill_ghost_all(&bc, &ghost, &mut phi, mask.view(), Some(&bcval));

        let error = ghost
            .iter()
            .map(|cell| (phi[(cell, 0)] - solution(center(cell, h))).abs())
            .fold(0.0, f64::max);

        log::info!(
            "Face {:?} ({:?}): max ghost error {:.3e}",
            face,
            bc.kind,
            error
        );
    }

    Ok(())
}
