use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use ndarray::{ArrayD, IxDyn};
use serde_json::Value as JsonValue;

use crate::coords::Coordinates;
use crate::error::{Result, TranslateError};

// ---------------------------------------------------------------------------
// MetadataValue – a single free-form metadata entry
// ---------------------------------------------------------------------------

/// A dynamically-typed metadata value, as found in dataset and spectrum
/// headers.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

/// Free-form metadata mapping; later inserts overwrite earlier keys.
pub type Meta = BTreeMap<String, MetadataValue>;

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{s}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(v) => write!(f, "{v}"),
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<JsonValue> for MetadataValue {
    fn from(val: JsonValue) -> Self {
        match val {
            JsonValue::String(s) => MetadataValue::String(s),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    MetadataValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    MetadataValue::Float(f)
                } else {
                    MetadataValue::String(n.to_string())
                }
            }
            JsonValue::Bool(b) => MetadataValue::Bool(b),
            JsonValue::Null => MetadataValue::Null,
            other => MetadataValue::String(other.to_string()),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::String(s.to_string())
    }
}

impl From<f64> for MetadataValue {
    fn from(v: f64) -> Self {
        MetadataValue::Float(v)
    }
}

impl From<i64> for MetadataValue {
    fn from(v: i64) -> Self {
        MetadataValue::Integer(v)
    }
}

/// Build a [`Meta`] mapping from a JSON object; other JSON values give an
/// empty mapping.
pub fn meta_from_json(val: JsonValue) -> Meta {
    match val {
        JsonValue::Object(obj) => obj
            .into_iter()
            .map(|(key, v)| (key, MetadataValue::from(v)))
            .collect(),
        _ => Meta::new(),
    }
}

// ---------------------------------------------------------------------------
// Component – one named attribute of a dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ComponentData {
    Numeric(ArrayD<f64>),
    Boolean(ArrayD<bool>),
}

impl ComponentData {
    pub fn shape(&self) -> &[usize] {
        match self {
            ComponentData::Numeric(a) => a.shape(),
            ComponentData::Boolean(a) => a.shape(),
        }
    }

    /// Numeric view of the data; booleans read as 1.0 / 0.0.
    pub fn as_f64(&self) -> Cow<'_, ArrayD<f64>> {
        match self {
            ComponentData::Numeric(a) => Cow::Borrowed(a),
            ComponentData::Boolean(a) => Cow::Owned(a.mapv(|b| if b { 1.0 } else { 0.0 })),
        }
    }
}

/// A named attribute: an array plus the unit string it is measured in.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub data: ComponentData,
    pub units: String,
}

impl Component {
    pub fn numeric(data: ArrayD<f64>, units: impl Into<String>) -> Self {
        Component {
            data: ComponentData::Numeric(data),
            units: units.into(),
        }
    }

    pub fn boolean(data: ArrayD<bool>) -> Self {
        Component {
            data: ComponentData::Boolean(data),
            units: String::new(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }
}

// ---------------------------------------------------------------------------
// LabeledDataset – coordinates + named components + metadata
// ---------------------------------------------------------------------------

/// A labeled N-dimensional dataset. Every component shares one shape, whose
/// dimensionality agrees with the attached coordinate object.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDataset {
    pub label: String,
    coords: Coordinates,
    /// Insertion-ordered so "the first component" is well defined.
    components: Vec<(String, Component)>,
    pub meta: Meta,
}

impl LabeledDataset {
    pub fn new(label: impl Into<String>, coords: impl Into<Coordinates>) -> Self {
        LabeledDataset {
            label: label.into(),
            coords: coords.into(),
            components: Vec::new(),
            meta: Meta::new(),
        }
    }

    pub fn coords(&self) -> &Coordinates {
        &self.coords
    }

    pub fn ndim(&self) -> usize {
        self.coords.ndim()
    }

    /// Shared shape of the components, once any have been added.
    pub fn shape(&self) -> Option<&[usize]> {
        self.components.first().map(|(_, c)| c.shape())
    }

    /// Add or replace a component, enforcing the shared-shape invariant.
    pub fn add_component(&mut self, name: impl Into<String>, component: Component) -> Result<()> {
        let name = name.into();
        self.check_shape(&name, component.shape())?;
        match self.components.iter().position(|(n, _)| *n == name) {
            Some(i) => self.components[i].1 = component,
            None => self.components.push((name, component)),
        }
        Ok(())
    }

    fn check_shape(&self, name: &str, shape: &[usize]) -> Result<()> {
        let mismatch = |expected: Vec<usize>| TranslateError::ShapeMismatch {
            expected,
            actual: shape.to_vec(),
        };
        if shape.len() != self.ndim() {
            let mut expected = vec![0; self.ndim()];
            if let Coordinates::Spectral(sc) = &self.coords {
                expected = vec![sc.len()];
            }
            return Err(mismatch(expected));
        }
        if let Coordinates::Spectral(sc) = &self.coords {
            if shape[0] != sc.len() {
                return Err(mismatch(vec![sc.len()]));
            }
        }
        let other = self
            .components
            .iter()
            .find(|(n, _)| n != name)
            .map(|(_, c)| c.shape());
        match other {
            Some(expected) if expected != shape => Err(mismatch(expected.to_vec())),
            _ => Ok(()),
        }
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.component(name).is_some()
    }

    /// Component names in insertion order.
    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    /// Element count of the shared shape.
    pub fn size(&self) -> usize {
        self.shape().map(|s| s.iter().product()).unwrap_or(0)
    }

    pub(crate) fn empty_mask(&self, value: bool) -> ArrayD<bool> {
        let shape = self.shape().map(|s| s.to_vec()).unwrap_or_default();
        ArrayD::from_elem(IxDyn(&shape), value)
    }
}
