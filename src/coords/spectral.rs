use ndarray::Array1;

use crate::error::{Result, TranslateError};
use crate::units::{Quantity, Unit};

// ---------------------------------------------------------------------------
// SpectralCoordinates – lookup-table spectral axis
// ---------------------------------------------------------------------------

/// Coordinates for a 1-D dataset whose pixels map onto a tabulated, monotonic
/// (but not necessarily uniform) spectral axis.
///
/// Pixel → world is linear interpolation over `(index, value)` pairs and
/// extrapolates past either end using the outermost segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralCoordinates {
    values: Array1<f64>,
    unit: Unit,
}

impl SpectralCoordinates {
    /// Build from spectral positions. Values must be strictly increasing or
    /// strictly decreasing.
    pub fn new(values: impl Into<Array1<f64>>, unit: impl Into<Unit>) -> Result<Self> {
        let values = values.into();
        if values.is_empty() {
            return Err(TranslateError::InvalidArgument(
                "spectral coordinates need at least one value".into(),
            ));
        }
        check_monotonic(&values)?;
        Ok(SpectralCoordinates {
            values,
            unit: unit.into(),
        })
    }

    pub fn from_quantity(axis: &Quantity) -> Result<Self> {
        Self::new(axis.value.clone(), axis.unit.clone())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// The original unit-tagged spectral positions.
    pub fn spectral_axis(&self) -> Quantity {
        Quantity::new(self.values.clone(), self.unit.clone())
    }

    pub fn pixel_to_world(&self, pixels: &[f64]) -> Vec<f64> {
        pixels.iter().map(|&p| self.world_at(p)).collect()
    }

    pub fn world_to_pixel(&self, world: &[f64]) -> Vec<f64> {
        world.iter().map(|&w| self.pixel_at(w)).collect()
    }

    fn world_at(&self, pixel: f64) -> f64 {
        let n = self.values.len();
        if n == 1 {
            return self.values[0];
        }
        let lower = (pixel.floor() as isize).clamp(0, n as isize - 2) as usize;
        let (v0, v1) = (self.values[lower], self.values[lower + 1]);
        v0 + (pixel - lower as f64) * (v1 - v0)
    }

    fn pixel_at(&self, world: f64) -> f64 {
        let n = self.values.len();
        if n == 1 {
            return if world == self.values[0] { 0.0 } else { f64::NAN };
        }
        let increasing = self.values[1] > self.values[0];
        let above = self
            .values
            .iter()
            .take_while(|&&v| if increasing { v <= world } else { v >= world })
            .count();
        let lower = above.saturating_sub(1).min(n - 2);
        let (v0, v1) = (self.values[lower], self.values[lower + 1]);
        lower as f64 + (world - v0) / (v1 - v0)
    }
}

fn check_monotonic(values: &Array1<f64>) -> Result<()> {
    if values.len() < 2 {
        if values.iter().any(|v| v.is_nan()) {
            return Err(TranslateError::NotMonotonic(0));
        }
        return Ok(());
    }
    let increasing = values[1] > values[0];
    for (i, pair) in values.windows(2).into_iter().enumerate() {
        let ok = if increasing {
            pair[1] > pair[0]
        } else {
            pair[1] < pair[0]
        };
        if !ok {
            return Err(TranslateError::NotMonotonic(i + 1));
        }
    }
    Ok(())
}
