//! Boundary condition configuration, loaded from and stored to TOML.
//!
//! ```toml
//! max_order = 3
//!
//! [[lo]]
//! kind = "Dirichlet"
//! bcl = 0.0
//!
//! [[lo]]
//! kind = "Neumann"
//!
//! [[hi]]
//! kind = "Dirichlet"
//! bcl = 0.01
//!
//! [[hi]]
//! kind = "ReflectOdd"
//! ```
//!
//! Entry `axis` of `lo` (resp. `hi`) describes the low (resp. high) face along that axis.

use mlbc_geometry::{Face, FaceArray};
use mlbc_interp::MAX_NODES;
use num::Float;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::kernel::{BoundaryKind, FaceBc};

/// Error produced while loading, storing, or validating a [`BcConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to access configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("max order {0} outside of supported range 2..=4")]
    MaxOrderOutOfRange(usize),
    #[error("expected {expected} faces on each side, found {found}")]
    FaceCount { expected: usize, found: usize },
    #[error("boundary distance {bcl} on face {face:?} must be finite and non-negative")]
    NegativeDistance { face: (usize, bool), bcl: f64 },
    #[error("boundary distance {0} is not representable in the working precision")]
    Precision(f64),
}

/// Boundary condition on a single face.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceConfig {
    pub kind: BoundaryKind,
    /// Distance from the box face to the physical boundary, in physical units.
    #[serde(default)]
    pub bcl: f64,
}

/// Boundary conditions for every face of a domain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BcConfig {
    /// Maximum number of nodes used for Dirichlet extrapolation.
    #[serde(default = "default_max_order")]
    pub max_order: usize,
    #[serde(default)]
    pub lo: Vec<FaceConfig>,
    #[serde(default)]
    pub hi: Vec<FaceConfig>,
}

fn default_max_order() -> usize {
    2
}

impl Default for BcConfig {
    fn default() -> Self {
        Self {
            max_order: default_max_order(),
            lo: Vec::new(),
            hi: Vec::new(),
        }
    }
}

impl BcConfig {
    /// A configuration applying `kind` with zero boundary distance on every face.
    pub fn uniform<const N: usize>(kind: BoundaryKind, max_order: usize) -> Self {
        let face = FaceConfig { kind, bcl: 0.0 };
        Self {
            max_order,
            lo: vec![face; N],
            hi: vec![face; N],
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Deserialize configuration from toml file.
    pub fn import_toml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let string = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&string)?;
        log::info!("Loaded boundary conditions from {}", path.display());
        Ok(config)
    }

    /// Serialize configuration to toml file.
    pub fn export_toml(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?)?;
        log::info!("Wrote boundary conditions to {}", path.display());
        Ok(())
    }

    /// Checks the configuration describes every face of an `N` dimensional box with a
    /// supported extrapolation order.
    pub fn validate<const N: usize>(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_NODES).contains(&self.max_order) {
            return Err(ConfigError::MaxOrderOutOfRange(self.max_order));
        }

        for faces in [&self.lo, &self.hi] {
            if faces.len() != N {
                return Err(ConfigError::FaceCount {
                    expected: N,
                    found: faces.len(),
                });
            }
        }

        for face in mlbc_geometry::faces::<N>() {
            let bcl = self.face(face).map(|config| config.bcl).unwrap_or_default();
            if !(bcl.is_finite() && bcl >= 0.0) {
                return Err(ConfigError::NegativeDistance {
                    face: (face.axis, face.side),
                    bcl,
                });
            }
        }

        Ok(())
    }

    /// Configuration of the given face, if present.
    pub fn face<const N: usize>(&self, face: Face<N>) -> Option<&FaceConfig> {
        let faces = if face.side { &self.hi } else { &self.lo };
        faces.get(face.axis)
    }

    /// Boundary kind of every face. Missing faces are [`BoundaryKind::Other`].
    pub fn kinds<const N: usize>(&self) -> FaceArray<N, BoundaryKind> {
        FaceArray::from_fn(|face| {
            self.face(face)
                .map(|config| config.kind)
                .unwrap_or_default()
        })
    }

    /// Builds the kernel description of `face` for a box with `blen` interior cells along
    /// the face normal and inverse spacing `dxinv`.
    pub fn face_bc<T: Float, const N: usize>(
        &self,
        face: Face<N>,
        blen: usize,
        dxinv: T,
    ) -> Result<FaceBc<T, N>, ConfigError> {
        self.validate::<N>()?;

        let config = self.face(face).copied().unwrap_or_default();
        let bcl = <T as num::NumCast>::from(config.bcl)
            .ok_or(ConfigError::Precision(config.bcl))?;

        let bc = FaceBc::new(face, config.kind, bcl, blen, self.max_order, dxinv);

        if config.kind == BoundaryKind::Dirichlet && bc.order() < self.max_order {
            log::warn!(
                "Dirichlet extrapolation on face {:?} limited to order {} by box length {}",
                face,
                bc.order(),
                blen
            );
        }

        log::debug!(
            "Face {:?}: {:?} with order {}",
            face,
            config.kind,
            bc.order()
        );

        Ok(bc)
    }
}
