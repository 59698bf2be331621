/// Translation between labeled datasets and 1-D spectra.
///
/// ```text
///   SpectralObject ── forward::to_dataset ──▶ LabeledDataset
///                                              (SpectralCoordinates,
///                                               flux / uncertainty / mask)
///
///   LabeledDataset ─┐
///   (or a Subset)   ├─ reverse::to_spectrum ─▶ SpectralObject
///   attribute,      │   resolve coords → pick attribute →
///   statistic ──────┘   collapse or mask → attach unit + axis
/// ```

pub mod forward;
pub mod reverse;

use crate::config::TranslatorConfig;
use crate::data::model::LabeledDataset;
use crate::data::selection::DataOrSubset;
use crate::data::statistic::Statistic;
use crate::error::Result;
use crate::spectrum::SpectralObject;

/// The two-way contract a host dataset framework registers per object type.
pub trait DataTranslator {
    type Object;

    fn to_data(&self, obj: &Self::Object) -> Result<LabeledDataset>;

    fn to_object(
        &self,
        input: DataOrSubset<'_>,
        attribute: Option<&str>,
        statistic: Statistic,
    ) -> Result<Self::Object>;
}

/// Translator for [`SpectralObject`].
#[derive(Debug, Clone, Default)]
pub struct Spectrum1DTranslator {
    pub config: TranslatorConfig,
}

impl Spectrum1DTranslator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    /// Reverse translation using the configured default statistic.
    pub fn to_spectrum<'a>(
        &self,
        input: impl Into<DataOrSubset<'a>>,
        attribute: Option<&str>,
    ) -> Result<SpectralObject> {
        self.to_object(input.into(), attribute, self.config.default_statistic)
    }
}

impl DataTranslator for Spectrum1DTranslator {
    type Object = SpectralObject;

    fn to_data(&self, obj: &SpectralObject) -> Result<LabeledDataset> {
        forward::to_dataset(&self.config, obj)
    }

    fn to_object(
        &self,
        input: DataOrSubset<'_>,
        attribute: Option<&str>,
        statistic: Statistic,
    ) -> Result<SpectralObject> {
        reverse::to_spectrum(&self.config, input, attribute, statistic)
    }
}
