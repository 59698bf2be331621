use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use ndarray::Array1;

// ---------------------------------------------------------------------------
// Unit – a physical unit tag
// ---------------------------------------------------------------------------

/// A physical unit, kept as its canonical string form (`"Jy"`, `"m/s"`,
/// `"micron"`). Parsing and printing round-trip exactly; a blank string is
/// the dimensionless unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Unit(String);

impl Unit {
    pub fn new(symbol: impl Into<String>) -> Self {
        Unit(symbol.into().trim().to_string())
    }

    pub fn dimensionless() -> Self {
        Unit(String::new())
    }

    pub fn is_dimensionless(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Unit {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Unit::new(s))
    }
}

impl From<&str> for Unit {
    fn from(s: &str) -> Self {
        Unit::new(s)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Quantity – unit-tagged 1-D array
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: Array1<f64>,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: impl Into<Array1<f64>>, unit: impl Into<Unit>) -> Self {
        Quantity {
            value: value.into(),
            unit: unit.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if !self.unit.is_dimensionless() {
            write!(f, " {}", self.unit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_string_round_trip() {
        let u: Unit = "km / s".parse().unwrap();
        assert_eq!(u.to_string(), "km / s");
        assert_eq!(u.to_string().parse::<Unit>().unwrap(), u);
    }

    #[test]
    fn blank_unit_is_dimensionless() {
        let u: Unit = "  ".parse().unwrap();
        assert!(u.is_dimensionless());
        assert_eq!(u, Unit::dimensionless());
    }

    #[test]
    fn quantity_from_vec() {
        let q = Quantity::new(vec![1.0, 2.0], "Jy");
        assert_eq!(q.len(), 2);
        assert_eq!(q.unit.as_str(), "Jy");
    }
}
