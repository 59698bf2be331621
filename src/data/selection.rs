use std::fmt;

use ndarray::{ArrayD, Zip};

use super::model::LabeledDataset;
use crate::error::{Result, TranslateError};

// ---------------------------------------------------------------------------
// Selection predicates: which dataset elements are "of interest"
// ---------------------------------------------------------------------------

/// Describes a subset of a dataset's elements.
///
/// The mask has the dataset's shape; `true` marks a selected element.
pub trait SelectionPredicate: fmt::Debug {
    fn selected_mask(&self, data: &LabeledDataset) -> Result<ArrayD<bool>>;
}

/// An explicit element-wise mask.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskSelection {
    pub mask: ArrayD<bool>,
}

impl MaskSelection {
    pub fn new(mask: ArrayD<bool>) -> Self {
        MaskSelection { mask }
    }
}

impl SelectionPredicate for MaskSelection {
    fn selected_mask(&self, data: &LabeledDataset) -> Result<ArrayD<bool>> {
        let shape = data.shape().unwrap_or(&[]);
        if self.mask.shape() != shape {
            return Err(TranslateError::ShapeMismatch {
                expected: shape.to_vec(),
                actual: self.mask.shape().to_vec(),
            });
        }
        Ok(self.mask.clone())
    }
}

/// Elements whose `attribute` value lies in `[lo, hi]`. NaN is never
/// selected.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSelection {
    pub attribute: String,
    pub lo: f64,
    pub hi: f64,
}

impl RangeSelection {
    pub fn new(attribute: impl Into<String>, lo: f64, hi: f64) -> Self {
        RangeSelection {
            attribute: attribute.into(),
            lo,
            hi,
        }
    }
}

impl SelectionPredicate for RangeSelection {
    fn selected_mask(&self, data: &LabeledDataset) -> Result<ArrayD<bool>> {
        let component = data
            .component(&self.attribute)
            .ok_or_else(|| TranslateError::UnknownAttribute(self.attribute.clone()))?;
        let values = component.data.as_f64();
        Ok(values.mapv(|v| v >= self.lo && v <= self.hi))
    }
}

/// Intersection of predicates. With no predicates, everything is selected.
#[derive(Debug, Default)]
pub struct AllOf(pub Vec<Box<dyn SelectionPredicate>>);

impl SelectionPredicate for AllOf {
    fn selected_mask(&self, data: &LabeledDataset) -> Result<ArrayD<bool>> {
        let mut mask = data.empty_mask(true);
        for predicate in &self.0 {
            let other = predicate.selected_mask(data)?;
            if other.shape() != mask.shape() {
                return Err(TranslateError::ShapeMismatch {
                    expected: mask.shape().to_vec(),
                    actual: other.shape().to_vec(),
                });
            }
            Zip::from(&mut mask).and(&other).for_each(|m, &o| *m &= o);
        }
        Ok(mask)
    }
}

/// Complement of another predicate.
#[derive(Debug)]
pub struct Inverted(pub Box<dyn SelectionPredicate>);

impl SelectionPredicate for Inverted {
    fn selected_mask(&self, data: &LabeledDataset) -> Result<ArrayD<bool>> {
        Ok(self.0.selected_mask(data)?.mapv(|m| !m))
    }
}

// ---------------------------------------------------------------------------
// Subset – a dataset viewed through a predicate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Subset<'a> {
    pub data: &'a LabeledDataset,
    pub selection: &'a dyn SelectionPredicate,
}

impl<'a> Subset<'a> {
    pub fn new(data: &'a LabeledDataset, selection: &'a dyn SelectionPredicate) -> Self {
        Subset { data, selection }
    }

    pub fn mask(&self) -> Result<ArrayD<bool>> {
        self.selection.selected_mask(self.data)
    }
}

/// Input of the reverse translation: a whole dataset or a subset of one.
#[derive(Debug, Clone, Copy)]
pub enum DataOrSubset<'a> {
    Data(&'a LabeledDataset),
    Subset(Subset<'a>),
}

impl<'a> DataOrSubset<'a> {
    pub fn split(self) -> (&'a LabeledDataset, Option<&'a dyn SelectionPredicate>) {
        match self {
            DataOrSubset::Data(data) => (data, None),
            DataOrSubset::Subset(subset) => (subset.data, Some(subset.selection)),
        }
    }
}

impl<'a> From<&'a LabeledDataset> for DataOrSubset<'a> {
    fn from(data: &'a LabeledDataset) -> Self {
        DataOrSubset::Data(data)
    }
}

impl<'a> From<Subset<'a>> for DataOrSubset<'a> {
    fn from(subset: Subset<'a>) -> Self {
        DataOrSubset::Subset(subset)
    }
}
