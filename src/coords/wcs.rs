use crate::error::{Result, TranslateError};
use crate::units::{Quantity, Unit};

/// CTYPE prefixes recognised as spectral, with the SI unit a linear
/// transform reports when no CUNIT is set.
const SPECTRAL_CTYPES: &[(&str, &str)] = &[
    ("FREQ", "Hz"),
    ("ENER", "J"),
    ("WAVN", "1 / m"),
    ("VRAD", "m / s"),
    ("VOPT", "m / s"),
    ("VELO", "m / s"),
    ("WAVE", "m"),
    ("AWAV", "m"),
    ("ZOPT", ""),
    ("BETA", ""),
];

// ---------------------------------------------------------------------------
// WcsAxis – one axis of a linear world-coordinate transform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct WcsAxis {
    pub ctype: String,
    /// Reference pixel, 1-based as in FITS headers.
    pub crpix: f64,
    pub crval: f64,
    pub cdelt: f64,
    pub cunit: Unit,
}

impl Default for WcsAxis {
    fn default() -> Self {
        WcsAxis {
            ctype: String::new(),
            crpix: 0.0,
            crval: 0.0,
            cdelt: 1.0,
            cunit: Unit::dimensionless(),
        }
    }
}

impl WcsAxis {
    fn is_spectral(&self) -> bool {
        spectral_kind(&self.ctype).is_some()
    }

    /// World value for a 0-based pixel position.
    pub fn world_at(&self, pixel: f64) -> f64 {
        self.crval + self.cdelt * (pixel + 1.0 - self.crpix)
    }
}

fn spectral_kind(ctype: &str) -> Option<&'static str> {
    let prefix = ctype.split('-').next().unwrap_or("").trim();
    SPECTRAL_CTYPES
        .iter()
        .find(|(code, _)| *code == prefix)
        .map(|(_, unit)| *unit)
}

// ---------------------------------------------------------------------------
// Wcs – a minimal linear world-coordinate transform
// ---------------------------------------------------------------------------

/// Linear world-coordinate transform, one independent axis per dimension.
///
/// Axes are numbered in transform order, which is the reverse of the array
/// order of the data it describes: transform axis `k` of an `n`-axis
/// transform corresponds to array axis `n - 1 - k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Wcs {
    axes: Vec<WcsAxis>,
}

impl Wcs {
    pub fn new(naxis: usize) -> Self {
        Wcs {
            axes: vec![WcsAxis::default(); naxis],
        }
    }

    pub fn from_axes(axes: Vec<WcsAxis>) -> Self {
        Wcs { axes }
    }

    pub fn naxis(&self) -> usize {
        self.axes.len()
    }

    pub fn axes(&self) -> &[WcsAxis] {
        &self.axes
    }

    pub fn axis(&self, index: usize) -> Option<&WcsAxis> {
        self.axes.get(index)
    }

    pub fn axis_mut(&mut self, index: usize) -> Option<&mut WcsAxis> {
        self.axes.get_mut(index)
    }

    /// Assign CTYPEs in transform order. Spectral axes without a CUNIT get
    /// their default SI unit.
    pub fn set_ctype<S: AsRef<str>>(&mut self, ctypes: &[S]) -> Result<()> {
        if ctypes.len() != self.axes.len() {
            return Err(TranslateError::InvalidArgument(format!(
                "expected {} CTYPE values, got {}",
                self.axes.len(),
                ctypes.len()
            )));
        }
        for (axis, ctype) in self.axes.iter_mut().zip(ctypes) {
            axis.ctype = ctype.as_ref().to_string();
            if let Some(default_unit) = spectral_kind(&axis.ctype) {
                if axis.cunit.is_dimensionless() {
                    axis.cunit = Unit::new(default_unit);
                }
            }
        }
        Ok(())
    }

    /// Index of the spectral axis in transform numbering.
    pub fn spec(&self) -> Option<usize> {
        self.axes.iter().position(WcsAxis::is_spectral)
    }

    /// Restrict to the spectral sub-axis.
    pub fn sub_spectral(&self) -> Result<Wcs> {
        let spec = self.spec().ok_or(TranslateError::TypeMismatch)?;
        Ok(Wcs {
            axes: vec![self.axes[spec].clone()],
        })
    }

    pub fn pixel_to_world(&self, axis: usize, pixels: &[f64]) -> Result<Vec<f64>> {
        let ax = self.axes.get(axis).ok_or_else(|| {
            TranslateError::InvalidArgument(format!(
                "axis {axis} out of range for {}-axis transform",
                self.axes.len()
            ))
        })?;
        Ok(pixels.iter().map(|&p| ax.world_at(p)).collect())
    }

    /// World values of the spectral axis at pixels `0..len`.
    pub fn spectral_values(&self, len: usize) -> Result<Quantity> {
        let spec = self.spec().ok_or(TranslateError::TypeMismatch)?;
        let pixels: Vec<f64> = (0..len).map(|i| i as f64).collect();
        let values = self.pixel_to_world(spec, &pixels)?;
        Ok(Quantity::new(values, self.axes[spec].cunit.clone()))
    }
}
