use anyhow::{Context, Result};
use log::info;
use ndarray::Array3;
use serde_json::json;

use specbridge::{
    meta_from_json, Component, DataTranslator, LabeledDataset, RangeSelection,
    Spectrum1DTranslator, Statistic, Subset, Unit, Wcs, WcsAxis,
};

/// Emission line profile in channel space.
fn line_profile(chan: f64, centre: f64, width: f64, peak: f64) -> f64 {
    peak * (-0.5 * ((chan - centre) / width).powi(2)).exp()
}

/// Reproducible baseline ripple in `[-amplitude, amplitude]`, derived from
/// the voxel index so every run prints the same table.
fn baseline_ripple(chan: usize, y: usize, x: usize, amplitude: f64) -> f64 {
    let phase = (chan * 7919 + y * 104_729 + x * 1_299_709) as f64;
    amplitude * (phase.sin() * 43_758.545_3).fract()
}

const N_CHAN: usize = 40;
const N_PIX: usize = 16;

/// Velocity cube with a Gaussian emission line that is brightest at the
/// centre of the field.
fn synthetic_cube() -> Array3<f64> {
    let centre = (N_PIX as f64 - 1.0) / 2.0;
    Array3::from_shape_fn((N_CHAN, N_PIX, N_PIX), |(chan, y, x)| {
        let r2 = (y as f64 - centre).powi(2) + (x as f64 - centre).powi(2);
        let spatial = (-r2 / (2.0 * 3.0_f64.powi(2))).exp();
        let line = line_profile(chan as f64, 20.0, 3.0, 2.5);
        spatial * line + baseline_ripple(chan, y, x, 0.05)
    })
}

fn velocity_wcs() -> Result<Wcs> {
    let spectral = WcsAxis {
        crpix: 21.0,
        crval: 0.0,
        cdelt: 5.0,
        cunit: Unit::new("km / s"),
        ..WcsAxis::default()
    };
    let mut wcs = Wcs::from_axes(vec![WcsAxis::default(), WcsAxis::default(), spectral]);
    wcs.set_ctype(&["RA---TAN", "DEC--TAN", "VRAD"])?;
    Ok(wcs)
}

fn main() -> Result<()> {
    env_logger::init();

    let statistic: Statistic = match std::env::args().nth(1) {
        Some(arg) => arg.parse().context("parsing statistic argument")?,
        None => Statistic::Sum,
    };

    let mut data = LabeledDataset::new("synthetic-cube", velocity_wcs()?);
    data.add_component("intensity", Component::numeric(synthetic_cube().into_dyn(), "K"))
        .context("adding cube component")?;
    data.meta = meta_from_json(json!({
        "OBJECT": "synthetic",
        "BUNIT": "K",
        "NCHAN": N_CHAN,
        "RESTFRQ": 1.420_405_751_8e9,
    }));
    info!("built {:?} cube, collapsing with {statistic}", data.shape());

    let translator = Spectrum1DTranslator::default();
    let spectrum = translator
        .to_object((&data).into(), None, statistic)
        .context("collapsing cube")?;

    // Same collapse restricted to bright voxels only.
    let bright = RangeSelection::new("intensity", 0.5, f64::INFINITY);
    let bright_spectrum = translator
        .to_object(Subset::new(&data, &bright).into(), None, statistic)
        .context("collapsing bright subset")?;

    let axis = spectrum.spectral_axis()?;
    println!("{:>12} {:>14} {:>14}", format!("v [{}]", axis.unit), "all", "bright");
    for ((v, all), bright) in axis
        .value
        .iter()
        .zip(spectrum.flux().value.iter())
        .zip(bright_spectrum.flux().value.iter())
    {
        println!("{v:>12.1} {all:>14.4} {bright:>14.4}");
    }
    println!("flux unit: {}", spectrum.flux().unit);
    for (key, value) in &spectrum.meta {
        println!("{key} = {value}");
    }

    Ok(())
}
