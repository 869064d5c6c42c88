//! Shared configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all) is a
//! valid configuration. The extractor bounds and unit pattern are hand-tuned
//! and live here rather than in code.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::CoreError;
use crate::locale::NumberLocale;

pub const DEFAULT_BASE_URL: &str =
    "https://dadosabertos.compras.gov.br/modulo-contratacoes/2_consultarItensContratacoes_PNCP_14133";

/// Unit markers recognised after a numeral. Case is ignored.
pub const DEFAULT_UNIT_PATTERN: &str = r"m²|m2|metros\s*quadrados";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extractor: ExtractorConfig,
    pub source: SourceConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Exclusive lower bound for a plausible area.
    pub min_area: f64,
    /// Exclusive upper bound for a plausible area.
    pub max_area: f64,
    /// Regex alternation of unit markers, without the numeral part.
    pub unit_pattern: String,
    pub locale: NumberLocale,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_area: 10.0,
            max_area: 1_000_000.0,
            unit_pattern: DEFAULT_UNIT_PATTERN.to_string(),
            locale: NumberLocale::PT_BR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub page_size: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            page_size: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub delimiter: char,
    pub locale: NumberLocale,
    pub decimals: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            locale: NumberLocale::PT_BR,
            decimals: 2,
        }
    }
}

impl Config {
    /// Load a JSON config file. Missing sections fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, CoreError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_hand_tuned_constants() {
        let config = Config::default();
        assert_eq!(config.extractor.min_area, 10.0);
        assert_eq!(config.extractor.max_area, 1_000_000.0);
        assert_eq!(config.source.page_size, 100);
        assert_eq!(config.source.timeout_secs, 30);
        assert_eq!(config.export.delimiter, ';');
        assert_eq!(config.export.locale.decimal_separator, ',');
    }

    #[test]
    fn empty_object_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let json = r#"{ "extractor": { "max_area": 50000.0 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.extractor.max_area, 50_000.0);
        assert_eq!(config.extractor.min_area, 10.0);
        assert_eq!(config.extractor.unit_pattern, DEFAULT_UNIT_PATTERN);
        assert_eq!(config.source, SourceConfig::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "source": {{ "base_url": "http://localhost:9000", "page_size": 20 }} }}"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.source.base_url, "http://localhost:9000");
        assert_eq!(config.source.page_size, 20);
        assert_eq!(config.source.timeout_secs, 30);
    }

    #[test]
    fn load_missing_file_errors() {
        let err = Config::load(Path::new("/nonexistent/obrabench.json")).unwrap_err();
        assert!(matches!(err, CoreError::ConfigNotFound(_)));
    }

    #[test]
    fn load_or_default_without_path() {
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }
}
