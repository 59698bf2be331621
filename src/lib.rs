//! Two-way translation between labeled N-dimensional datasets and 1-D
//! spectra.
//!
//! [`Spectrum1DTranslator`] is the entry point: `to_data` turns a
//! [`SpectralObject`] into a [`LabeledDataset`], and `to_object` reduces a
//! dataset (or a [`Subset`] of one) back to a spectrum.

pub mod config;
pub mod coords;
pub mod data;
pub mod error;
pub mod spectrum;
pub mod translator;
pub mod units;

pub use config::TranslatorConfig;
pub use coords::{Coordinates, SpectralCoordinates, Wcs, WcsAxis};
pub use data::model::{
    meta_from_json, Component, ComponentData, LabeledDataset, Meta, MetadataValue,
};
pub use data::selection::{
    AllOf, DataOrSubset, Inverted, MaskSelection, RangeSelection, SelectionPredicate, Subset,
};
pub use data::statistic::Statistic;
pub use error::{Result, TranslateError};
pub use spectrum::{SpectralAxis, SpectralObject, Uncertainty, UncertaintyKind};
pub use translator::{DataTranslator, Spectrum1DTranslator};
pub use units::{Quantity, Unit};
