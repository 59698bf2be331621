use serde::{Deserialize, Serialize};

use crate::data::statistic::Statistic;
use crate::error::{Result, TranslateError};

/// Uncertainty written for every pixel when a spectrum carries none.
pub const DEFAULT_UNCERTAINTY: f64 = 1.0;

/// Mask value written for every pixel when a spectrum carries no mask
/// (`false` = nothing excluded).
pub const DEFAULT_MASK: bool = false;

// ---------------------------------------------------------------------------
// TranslatorConfig
// ---------------------------------------------------------------------------

/// Settings for the spectrum translator. Every field has a default, so an
/// empty JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslatorConfig {
    /// Statistic used when the caller does not name one.
    pub default_statistic: Statistic,
    /// Fill value for the `uncertainty` component of a spectrum without one.
    pub missing_uncertainty: f64,
    /// Fill value for the `mask` component of a spectrum without one.
    pub missing_mask: bool,
    /// Carry dataset metadata over to the spectrum in the reverse direction.
    pub copy_meta: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            default_statistic: Statistic::Mean,
            missing_uncertainty: DEFAULT_UNCERTAINTY,
            missing_mask: DEFAULT_MASK,
            copy_meta: true,
        }
    }
}

impl TranslatorConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| TranslateError::InvalidArgument(format!("translator config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = TranslatorConfig::from_json("{}").unwrap();
        assert_eq!(config, TranslatorConfig::default());
        assert_eq!(config.missing_uncertainty, 1.0);
        assert!(!config.missing_mask);
        assert_eq!(config.default_statistic, Statistic::Mean);
    }

    #[test]
    fn overrides() {
        let config = TranslatorConfig::from_json(
            r#"{ "default_statistic": "median", "missing_uncertainty": 0.0, "copy_meta": false }"#,
        )
        .unwrap();
        assert_eq!(config.default_statistic, Statistic::Median);
        assert_eq!(config.missing_uncertainty, 0.0);
        assert!(!config.copy_meta);
    }

    #[test]
    fn rejects_unknown_fields_and_statistics() {
        assert!(TranslatorConfig::from_json(r#"{ "colour": "red" }"#).is_err());
        assert!(TranslatorConfig::from_json(r#"{ "default_statistic": "percentile" }"#).is_err());
    }
}
