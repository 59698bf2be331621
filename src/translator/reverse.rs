use log::debug;
use ndarray::Array1;

use super::forward::FLUX;
use crate::config::TranslatorConfig;
use crate::coords::resolve_axes;
use crate::data::model::LabeledDataset;
use crate::data::selection::DataOrSubset;
use crate::data::statistic::{collapse, Statistic};
use crate::error::{Result, TranslateError};
use crate::spectrum::SpectralObject;
use crate::units::{Quantity, Unit};

/// Build a 1-D spectrum from a dataset or a subset of one.
///
/// Data with more than one dimension is collapsed over every non-spectral
/// axis with `statistic`, restricted to the subset if one is given. 1-D data
/// is taken as is; with a subset, unselected samples become NaN and are
/// flagged in the returned mask (`true` = excluded).
pub fn to_spectrum(
    config: &TranslatorConfig,
    input: DataOrSubset<'_>,
    attribute: Option<&str>,
    statistic: Statistic,
) -> Result<SpectralObject> {
    statistic.validate()?;
    let (data, selection) = input.split();
    let source = data.coords().spectral_source()?;
    let axes = resolve_axes(data.coords(), data.ndim())?;

    let name = resolve_attribute(data, attribute)?;
    let component = data
        .component(name)
        .ok_or_else(|| TranslateError::UnknownAttribute(name.to_string()))?;
    let values = component.data.as_f64();

    let (flux, mask) = if data.ndim() > 1 {
        let selected = selection.map(|s| s.selected_mask(data)).transpose()?;
        let flux = collapse(&values, axes.spectral_axis, selected.as_ref(), statistic)?;
        (flux, None)
    } else {
        let mut flux: Array1<f64> = values.iter().copied().collect();
        match selection {
            None => (flux, None),
            Some(selection) => {
                let excluded: Array1<bool> =
                    selection.selected_mask(data)?.iter().map(|&s| !s).collect();
                if excluded.len() != flux.len() {
                    return Err(TranslateError::ShapeMismatch {
                        expected: vec![flux.len()],
                        actual: vec![excluded.len()],
                    });
                }
                flux.zip_mut_with(&excluded, |v, &ex| {
                    if ex {
                        *v = f64::NAN;
                    }
                });
                (flux, Some(excluded))
            }
        }
    };

    let flux = Quantity::new(flux, Unit::new(component.units.as_str()));
    let mut spectrum = SpectralObject::new(flux, source.build_output_axis()?)?;
    if let Some(mask) = mask {
        spectrum = spectrum.with_mask(mask)?;
    }
    if config.copy_meta {
        spectrum.meta = data.meta.clone();
    }
    debug!(
        "dataset '{}' attribute '{name}' → spectrum of {} samples",
        data.label,
        spectrum.len()
    );
    Ok(spectrum)
}

/// Pick the component to use as flux.
///
/// An explicit name wins. Otherwise a lone component is used, then one
/// called `flux`.
pub fn resolve_attribute<'a>(
    data: &'a LabeledDataset,
    attribute: Option<&'a str>,
) -> Result<&'a str> {
    if let Some(name) = attribute {
        if !data.has_component(name) {
            return Err(TranslateError::UnknownAttribute(name.to_string()));
        }
        return Ok(name);
    }
    let names = data.component_names();
    match names.as_slice() {
        [] => Err(TranslateError::EmptyDataset),
        [only] => {
            debug!("inferred attribute '{only}' as flux");
            Ok(*only)
        }
        _ if data.has_component(FLUX) => Ok(FLUX),
        _ => Err(TranslateError::AmbiguousAttribute),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Coordinates, SpectralCoordinates, Wcs};
    use crate::data::model::{Component, MetadataValue};
    use crate::data::selection::{MaskSelection, RangeSelection, Subset};
    use ndarray::{arr1, Array3};

    fn spectral_data(names: &[&str]) -> LabeledDataset {
        let coords = SpectralCoordinates::new(vec![1.0, 4.0, 10.0], "micron").unwrap();
        let mut data = LabeledDataset::new("spectrum1d", coords);
        for (i, name) in names.iter().enumerate() {
            let values = arr1(&[3.0, 4.0, 5.0]) + i as f64;
            data.add_component(*name, Component::numeric(values.into_dyn(), "Jy"))
                .unwrap();
        }
        data
    }

    fn reverse(
        input: DataOrSubset<'_>,
        attribute: Option<&str>,
        stat: Statistic,
    ) -> Result<SpectralObject> {
        to_spectrum(&TranslatorConfig::default(), input, attribute, stat)
    }

    #[test]
    fn infers_single_attribute() {
        let data = spectral_data(&["x"]);
        assert_eq!(resolve_attribute(&data, None).unwrap(), "x");
        let spec = reverse((&data).into(), None, Statistic::Mean).unwrap();
        assert_eq!(spec.flux().value.to_vec(), vec![3.0, 4.0, 5.0]);
        assert_eq!(spec.flux().unit.as_str(), "Jy");
        assert!(spec.mask().is_none());
    }

    #[test]
    fn prefers_flux_among_many() {
        let data = spectral_data(&["a", "flux", "b"]);
        assert_eq!(resolve_attribute(&data, None).unwrap(), "flux");
        let spec = reverse((&data).into(), None, Statistic::Mean).unwrap();
        assert_eq!(spec.flux().value.to_vec(), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn ambiguous_without_flux() {
        let data = spectral_data(&["a", "b"]);
        assert_eq!(
            reverse((&data).into(), None, Statistic::Mean).unwrap_err(),
            TranslateError::AmbiguousAttribute
        );
    }

    #[test]
    fn explicit_attribute() {
        let data = spectral_data(&["a", "b"]);
        let spec = reverse((&data).into(), Some("b"), Statistic::Mean).unwrap();
        assert_eq!(spec.flux().value.to_vec(), vec![4.0, 5.0, 6.0]);
        assert_eq!(
            reverse((&data).into(), Some("c"), Statistic::Mean).unwrap_err(),
            TranslateError::UnknownAttribute("c".into())
        );
    }

    #[test]
    fn empty_dataset() {
        let data = spectral_data(&[]);
        assert_eq!(
            reverse((&data).into(), None, Statistic::Mean).unwrap_err(),
            TranslateError::EmptyDataset
        );
    }

    #[test]
    fn unrecognised_coordinates() {
        let mut data = LabeledDataset::new("plain", Coordinates::Pixel { ndim: 1 });
        data.add_component("x", Component::numeric(arr1(&[1.0]).into_dyn(), ""))
            .unwrap();
        assert_eq!(
            reverse((&data).into(), None, Statistic::Mean).unwrap_err(),
            TranslateError::TypeMismatch
        );
    }

    #[test]
    fn spectral_coordinates_pass_through() {
        let data = spectral_data(&["x"]);
        let spec = reverse((&data).into(), None, Statistic::Mean).unwrap();
        let axis = spec.spectral_axis().unwrap();
        assert_eq!(axis.value.to_vec(), vec![1.0, 4.0, 10.0]);
        assert_eq!(axis.unit.as_str(), "micron");
    }

    #[test]
    fn one_dimensional_data_rejects_bad_percentile() {
        let data = spectral_data(&["x"]);
        let err = reverse((&data).into(), None, Statistic::Percentile(150.0)).unwrap_err();
        assert!(matches!(err, TranslateError::InvalidArgument(_)));
    }

    #[test]
    fn subset_masks_one_dimensional_data() {
        let data = spectral_data(&["x"]);
        let selection = RangeSelection::new("x", 3.5, 10.0);
        let spec = reverse(Subset::new(&data, &selection).into(), None, Statistic::Mean).unwrap();
        let flux = &spec.flux().value;
        assert!(flux[0].is_nan());
        assert_eq!(flux[1], 4.0);
        assert_eq!(flux[2], 5.0);
        assert_eq!(spec.mask().unwrap().to_vec(), vec![true, false, false]);
        // the dataset itself is untouched
        assert_eq!(
            data.component("x").unwrap().data.as_f64().iter().copied().collect::<Vec<_>>(),
            vec![3.0, 4.0, 5.0]
        );
    }

    #[test]
    fn subset_restricts_collapse() {
        let mut wcs = Wcs::new(3);
        wcs.set_ctype(&["RA---TAN", "DEC--TAN", "VELO-LSR"]).unwrap();
        let mut data = LabeledDataset::new("cube", wcs);
        let cube = Array3::from_shape_fn((2, 2, 2), |(_, j, k)| (j * 2 + k) as f64);
        data.add_component("x", Component::numeric(cube.into_dyn(), "K"))
            .unwrap();
        let selection = RangeSelection::new("x", 1.0, 2.0);
        let spec = reverse(Subset::new(&data, &selection).into(), None, Statistic::Sum).unwrap();
        assert_eq!(spec.flux().value.to_vec(), vec![3.0, 3.0]);
        assert_eq!(spec.flux().unit.as_str(), "K");
        assert!(spec.mask().is_none());
    }

    #[test]
    fn subset_mask_shape_is_checked() {
        let data = spectral_data(&["x"]);
        let selection = MaskSelection::new(arr1(&[true, false]).into_dyn());
        assert!(matches!(
            reverse(Subset::new(&data, &selection).into(), None, Statistic::Mean),
            Err(TranslateError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn meta_follows_config() {
        let mut data = spectral_data(&["x"]);
        data.meta.insert("telescope".into(), MetadataValue::from("JWST"));
        let spec = reverse((&data).into(), None, Statistic::Mean).unwrap();
        assert_eq!(spec.meta["telescope"], MetadataValue::from("JWST"));

        let config = TranslatorConfig {
            copy_meta: false,
            ..TranslatorConfig::default()
        };
        let spec = to_spectrum(&config, (&data).into(), None, Statistic::Mean).unwrap();
        assert!(spec.meta.is_empty());
    }
}
