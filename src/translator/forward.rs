use log::debug;
use ndarray::Array1;

use crate::config::TranslatorConfig;
use crate::coords::SpectralCoordinates;
use crate::data::model::{Component, LabeledDataset};
use crate::error::Result;
use crate::spectrum::SpectralObject;

pub const FLUX: &str = "flux";
pub const UNCERTAINTY: &str = "uncertainty";
pub const MASK: &str = "mask";

/// Build a dataset from a spectrum.
///
/// The dataset always gets `flux`, `uncertainty` and `mask` components.
/// A spectrum without uncertainty gets `config.missing_uncertainty` at every
/// pixel, one without a mask gets `config.missing_mask`. Uncertainty is
/// tagged with the flux unit.
pub fn to_dataset(config: &TranslatorConfig, obj: &SpectralObject) -> Result<LabeledDataset> {
    let coords = SpectralCoordinates::from_quantity(&obj.spectral_axis()?)?;
    let mut data = LabeledDataset::new("spectrum", coords);
    let n = obj.len();
    let flux_unit = obj.flux().unit.to_string();

    data.add_component(
        FLUX,
        Component::numeric(obj.flux().value.clone().into_dyn(), flux_unit.clone()),
    )?;

    let uncertainty = match obj.uncertainty() {
        Some(u) => u.array.clone(),
        None => Array1::from_elem(n, config.missing_uncertainty),
    };
    data.add_component(UNCERTAINTY, Component::numeric(uncertainty.into_dyn(), flux_unit))?;

    let mask = match obj.mask() {
        Some(m) => m.clone(),
        None => Array1::from_elem(n, config.missing_mask),
    };
    data.add_component(MASK, Component::boolean(mask.into_dyn()))?;

    data.meta.extend(obj.meta.clone());
    debug!("spectrum of {n} samples → dataset '{}'", data.label);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MASK, DEFAULT_UNCERTAINTY};
    use crate::coords::{Coordinates, Wcs};
    use crate::data::model::{ComponentData, MetadataValue};
    use crate::spectrum::{SpectralAxis, Uncertainty};
    use crate::units::Quantity;
    use ndarray::arr1;

    fn spectrum() -> SpectralObject {
        SpectralObject::new(
            Quantity::new(vec![3.0, 4.0, 5.0], "Jy"),
            SpectralAxis::Values(Quantity::new(vec![1.0, 4.0, 10.0], "micron")),
        )
        .unwrap()
    }

    fn numeric(data: &LabeledDataset, name: &str) -> Vec<f64> {
        match &data.component(name).unwrap().data {
            ComponentData::Numeric(a) => a.iter().copied().collect(),
            other => panic!("expected numeric, got {other:?}"),
        }
    }

    #[test]
    fn attaches_spectral_coordinates() {
        let data = to_dataset(&TranslatorConfig::default(), &spectrum()).unwrap();
        match data.coords() {
            Coordinates::Spectral(sc) => {
                assert_eq!(sc.unit().as_str(), "micron");
                assert_eq!(sc.values().to_vec(), vec![1.0, 4.0, 10.0]);
            }
            other => panic!("unexpected coords {other:?}"),
        }
        assert_eq!(data.component_names(), vec![FLUX, UNCERTAINTY, MASK]);
    }

    #[test]
    fn flux_and_uncertainty_share_flux_unit() {
        let data = to_dataset(&TranslatorConfig::default(), &spectrum()).unwrap();
        assert_eq!(data.component(FLUX).unwrap().units, "Jy");
        assert_eq!(data.component(UNCERTAINTY).unwrap().units, "Jy");
        assert_eq!(numeric(&data, FLUX), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn missing_uncertainty_and_mask_use_defaults() {
        let data = to_dataset(&TranslatorConfig::default(), &spectrum()).unwrap();
        assert_eq!(numeric(&data, UNCERTAINTY), vec![DEFAULT_UNCERTAINTY; 3]);
        match &data.component(MASK).unwrap().data {
            ComponentData::Boolean(m) => assert!(m.iter().all(|&v| v == DEFAULT_MASK)),
            other => panic!("expected boolean mask, got {other:?}"),
        }
    }

    #[test]
    fn configured_fill_values() {
        let config = TranslatorConfig {
            missing_uncertainty: 0.5,
            missing_mask: true,
            ..TranslatorConfig::default()
        };
        let data = to_dataset(&config, &spectrum()).unwrap();
        assert_eq!(numeric(&data, UNCERTAINTY), vec![0.5; 3]);
        assert_eq!(data.component(MASK).unwrap().data.as_f64().sum(), 3.0);
    }

    #[test]
    fn keeps_given_uncertainty_and_mask() {
        let obj = spectrum()
            .with_uncertainty(Uncertainty::std_dev(vec![0.1, 0.2, 0.3]))
            .unwrap()
            .with_mask(arr1(&[false, true, false]))
            .unwrap();
        let data = to_dataset(&TranslatorConfig::default(), &obj).unwrap();
        assert_eq!(numeric(&data, UNCERTAINTY), vec![0.1, 0.2, 0.3]);
        assert_eq!(
            data.component(MASK).unwrap().data,
            ComponentData::Boolean(arr1(&[false, true, false]).into_dyn())
        );
    }

    #[test]
    fn copies_meta_without_touching_input() {
        let mut obj = spectrum();
        obj.meta.insert("object".into(), MetadataValue::from("NGC 1068"));
        let data = to_dataset(&TranslatorConfig::default(), &obj).unwrap();
        assert_eq!(data.meta["object"], MetadataValue::from("NGC 1068"));
        assert_eq!(obj.meta.len(), 1);
        assert!(obj.uncertainty().is_none());
    }

    #[test]
    fn wcs_backed_spectrum_is_tabulated() {
        let mut wcs = Wcs::new(1);
        wcs.set_ctype(&["WAVE"]).unwrap();
        let obj =
            SpectralObject::new(Quantity::new(vec![1.0, 2.0], "Jy"), SpectralAxis::Wcs(wcs)).unwrap();
        let data = to_dataset(&TranslatorConfig::default(), &obj).unwrap();
        match data.coords() {
            Coordinates::Spectral(sc) => {
                assert_eq!(sc.values().to_vec(), vec![1.0, 2.0]);
                assert_eq!(sc.unit().as_str(), "m");
            }
            other => panic!("unexpected coords {other:?}"),
        }
    }
}
