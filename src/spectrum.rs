use ndarray::Array1;

use crate::coords::Wcs;
use crate::data::model::Meta;
use crate::error::{Result, TranslateError};
use crate::units::Quantity;

// ---------------------------------------------------------------------------
// SpectralAxis – where a spectrum's spectral positions come from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SpectralAxis {
    /// Tabulated, unit-tagged positions.
    Values(Quantity),
    /// A one-axis spectral transform, evaluated at pixels `0..len`.
    Wcs(Wcs),
}

// ---------------------------------------------------------------------------
// Uncertainty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UncertaintyKind {
    #[default]
    StdDev,
    Variance,
    InverseVariance,
}

/// Per-pixel uncertainty. Carries no unit of its own; it is interpreted in
/// the flux unit of the owning spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct Uncertainty {
    pub kind: UncertaintyKind,
    pub array: Array1<f64>,
}

impl Uncertainty {
    pub fn std_dev(array: impl Into<Array1<f64>>) -> Self {
        Uncertainty {
            kind: UncertaintyKind::StdDev,
            array: array.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// SpectralObject – a 1-D spectrum
// ---------------------------------------------------------------------------

/// A one-dimensional spectrum: flux against a spectral axis, with optional
/// uncertainty and mask (`true` = excluded).
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralObject {
    flux: Quantity,
    axis: SpectralAxis,
    uncertainty: Option<Uncertainty>,
    mask: Option<Array1<bool>>,
    pub meta: Meta,
}

impl SpectralObject {
    pub fn new(flux: Quantity, axis: SpectralAxis) -> Result<Self> {
        if let SpectralAxis::Values(values) = &axis {
            if values.len() != flux.len() {
                return Err(TranslateError::ShapeMismatch {
                    expected: vec![flux.len()],
                    actual: vec![values.len()],
                });
            }
        }
        Ok(SpectralObject {
            flux,
            axis,
            uncertainty: None,
            mask: None,
            meta: Meta::new(),
        })
    }

    pub fn with_uncertainty(mut self, uncertainty: Uncertainty) -> Result<Self> {
        self.check_len(uncertainty.array.len())?;
        self.uncertainty = Some(uncertainty);
        Ok(self)
    }

    pub fn with_mask(mut self, mask: Array1<bool>) -> Result<Self> {
        self.check_len(mask.len())?;
        self.mask = Some(mask);
        Ok(self)
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len != self.flux.len() {
            return Err(TranslateError::ShapeMismatch {
                expected: vec![self.flux.len()],
                actual: vec![len],
            });
        }
        Ok(())
    }

    pub fn flux(&self) -> &Quantity {
        &self.flux
    }

    pub fn uncertainty(&self) -> Option<&Uncertainty> {
        self.uncertainty.as_ref()
    }

    pub fn mask(&self) -> Option<&Array1<bool>> {
        self.mask.as_ref()
    }

    /// The source the spectral axis is derived from.
    pub fn axis_source(&self) -> &SpectralAxis {
        &self.axis
    }

    pub fn len(&self) -> usize {
        self.flux.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flux.is_empty()
    }

    /// Spectral positions of every flux sample.
    pub fn spectral_axis(&self) -> Result<Quantity> {
        match &self.axis {
            SpectralAxis::Values(values) => Ok(values.clone()),
            SpectralAxis::Wcs(wcs) => wcs.spectral_values(self.flux.len()),
        }
    }
}
