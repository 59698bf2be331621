/// Coordinate layer: the coordinate objects a dataset can carry and the
/// resolver that picks out its spectral axis.
///
/// ```text
///   Coordinates ──┬── Wcs                  (linear transform, reversed axis order)
///                 ├── SpectralCoordinates  (lookup table, 1-D)
///                 └── Pixel                (no world mapping → TypeMismatch)
///        │
///        ▼
///   resolve_axes  → ResolvedAxes { spectral_axis, collapse_axes }
/// ```

pub mod spectral;
pub mod wcs;

use log::debug;

use crate::error::{Result, TranslateError};
use crate::spectrum::SpectralAxis;

pub use spectral::SpectralCoordinates;
pub use wcs::{Wcs, WcsAxis};

// ---------------------------------------------------------------------------
// Coordinates – the coordinate object attached to a dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Coordinates {
    Wcs(Wcs),
    Spectral(SpectralCoordinates),
    /// Plain array indices with no world mapping.
    Pixel { ndim: usize },
}

impl Coordinates {
    /// Dimensionality implied by the coordinate object.
    pub fn ndim(&self) -> usize {
        match self {
            Coordinates::Wcs(wcs) => wcs.naxis(),
            Coordinates::Spectral(_) => 1,
            Coordinates::Pixel { ndim } => *ndim,
        }
    }

    /// The spectral capability of this coordinate object, if it has one.
    pub fn spectral_source(&self) -> Result<&dyn SpectralCoordinateSource> {
        match self {
            Coordinates::Wcs(wcs) => Ok(wcs as &dyn SpectralCoordinateSource),
            Coordinates::Spectral(coords) => Ok(coords as &dyn SpectralCoordinateSource),
            Coordinates::Pixel { .. } => Err(TranslateError::TypeMismatch),
        }
    }
}

impl From<Wcs> for Coordinates {
    fn from(wcs: Wcs) -> Self {
        Coordinates::Wcs(wcs)
    }
}

impl From<SpectralCoordinates> for Coordinates {
    fn from(coords: SpectralCoordinates) -> Self {
        Coordinates::Spectral(coords)
    }
}

// ---------------------------------------------------------------------------
// Axis resolution
// ---------------------------------------------------------------------------

/// Which array axis is spectral, and which must be collapsed to reach 1-D.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAxes {
    pub spectral_axis: usize,
    pub collapse_axes: Vec<usize>,
}

/// A coordinate object able to locate the spectral axis of the data it
/// describes and to hand a spectral axis on to a 1-D spectrum.
pub trait SpectralCoordinateSource {
    fn resolve_spectral_axis(&self, ndim: usize) -> Result<ResolvedAxes>;

    fn build_output_axis(&self) -> Result<SpectralAxis>;
}

impl SpectralCoordinateSource for Wcs {
    fn resolve_spectral_axis(&self, ndim: usize) -> Result<ResolvedAxes> {
        let spec = self.spec().ok_or(TranslateError::TypeMismatch)?;
        // Transform numbering runs opposite to array numbering.
        let spectral_axis = self.naxis() - 1 - spec;
        if spectral_axis >= ndim {
            return Err(TranslateError::ShapeMismatch {
                expected: vec![self.naxis()],
                actual: vec![ndim],
            });
        }
        let collapse_axes = (0..ndim).filter(|&i| i != spectral_axis).collect();
        Ok(ResolvedAxes {
            spectral_axis,
            collapse_axes,
        })
    }

    fn build_output_axis(&self) -> Result<SpectralAxis> {
        Ok(SpectralAxis::Wcs(self.sub_spectral()?))
    }
}

impl SpectralCoordinateSource for SpectralCoordinates {
    fn resolve_spectral_axis(&self, _ndim: usize) -> Result<ResolvedAxes> {
        Ok(ResolvedAxes {
            spectral_axis: 0,
            collapse_axes: Vec::new(),
        })
    }

    fn build_output_axis(&self) -> Result<SpectralAxis> {
        Ok(SpectralAxis::Values(self.spectral_axis()))
    }
}

/// Resolve the spectral and collapse axes for data of `ndim` dimensions.
pub fn resolve_axes(coords: &Coordinates, ndim: usize) -> Result<ResolvedAxes> {
    let resolved = coords.spectral_source()?.resolve_spectral_axis(ndim)?;
    debug!(
        "spectral axis {} of {ndim}, collapsing {:?}",
        resolved.spectral_axis, resolved.collapse_axes
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_wcs() -> Wcs {
        let mut wcs = Wcs::new(3);
        wcs.set_ctype(&["RA---TAN", "DEC--TAN", "VELO-LSR"]).unwrap();
        wcs
    }

    #[test]
    fn wcs_axis_order_is_reversed() {
        let resolved = resolve_axes(&cube_wcs().into(), 3).unwrap();
        assert_eq!(resolved.spectral_axis, 0);
        assert_eq!(resolved.collapse_axes, vec![1, 2]);
    }

    #[test]
    fn wcs_spectral_first_in_transform_is_last_in_array() {
        let mut wcs = Wcs::new(3);
        wcs.set_ctype(&["FREQ", "RA---TAN", "DEC--TAN"]).unwrap();
        let resolved = resolve_axes(&wcs.into(), 3).unwrap();
        assert_eq!(resolved.spectral_axis, 2);
        assert_eq!(resolved.collapse_axes, vec![0, 1]);
    }

    #[test]
    fn spectral_coordinates_need_no_collapse() {
        let coords = SpectralCoordinates::new(vec![1.0, 2.0], "nm").unwrap();
        let resolved = resolve_axes(&coords.into(), 1).unwrap();
        assert_eq!(resolved.spectral_axis, 0);
        assert!(resolved.collapse_axes.is_empty());
    }

    #[test]
    fn pixel_coordinates_are_rejected() {
        let err = resolve_axes(&Coordinates::Pixel { ndim: 2 }, 2).unwrap_err();
        assert_eq!(err, TranslateError::TypeMismatch);
    }

    #[test]
    fn wcs_without_spectral_axis_is_rejected() {
        let mut wcs = Wcs::new(2);
        wcs.set_ctype(&["RA---TAN", "DEC--TAN"]).unwrap();
        assert_eq!(
            resolve_axes(&wcs.into(), 2).unwrap_err(),
            TranslateError::TypeMismatch
        );
    }

    #[test]
    fn output_axis_restricts_wcs() {
        match cube_wcs().build_output_axis().unwrap() {
            SpectralAxis::Wcs(sub) => assert_eq!(sub.naxis(), 1),
            other => panic!("unexpected axis {other:?}"),
        }
    }
}
