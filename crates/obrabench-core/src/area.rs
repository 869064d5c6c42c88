//! Heuristic covered-area extraction from free-text contract descriptions.
//!
//! Descriptions such as "Construção de escola com 1.250,00 m² de área
//! construída" carry the area inline. The extractor scans for every numeral
//! followed by a square-metre marker, normalises each numeral with the
//! configured [`NumberLocale`], keeps those inside the plausibility bounds and
//! returns the largest. `0.0` means "not found" since zero is never a valid
//! area.
//!
//! # Known failure mode
//!
//! The largest plausible candidate wins, so a description that mentions an
//! unrelated large quantity with a square-metre suffix ("pintura de 3.000 m²
//! em edifício de 800 m²") reports the larger one. Sub-areas and counts are
//! more common than unrelated totals, which is what the rule is tuned for.
//!
//! Only ASCII digits are recognised. Full-width or other Unicode digits
//! ("１５０ m²") are not matched and yield [`NOT_FOUND`].

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::CoreError;
use crate::config::ExtractorConfig;
use crate::locale::NumberLocale;

/// Sentinel returned when no plausible area is found.
pub const NOT_FOUND: f64 = 0.0;

static DEFAULT_EXTRACTOR: LazyLock<AreaExtractor> = LazyLock::new(AreaExtractor::default);

/// Extract the best-guess area using the default configuration.
pub fn extract_area(text: &str) -> f64 {
    DEFAULT_EXTRACTOR.extract(text)
}

/// Compiled extractor. Cheap to share; holds no mutable state.
#[derive(Debug, Clone)]
pub struct AreaExtractor {
    pattern: Regex,
    min_area: f64,
    max_area: f64,
    locale: NumberLocale,
}

impl AreaExtractor {
    /// Compile the unit pattern and validate the bounds.
    pub fn new(config: &ExtractorConfig) -> Result<Self, CoreError> {
        if config.min_area.partial_cmp(&config.max_area) != Some(Ordering::Less) {
            return Err(CoreError::Bounds {
                min: config.min_area,
                max: config.max_area,
            });
        }
        let pattern = Regex::new(&format!(r"(?i)([0-9.,]+)\s*(?:{})", config.unit_pattern))?;
        Ok(Self {
            pattern,
            min_area: config.min_area,
            max_area: config.max_area,
            locale: config.locale,
        })
    }

    /// Best-guess area in m², or [`NOT_FOUND`].
    pub fn extract(&self, text: &str) -> f64 {
        self.candidates(text)
            .into_iter()
            .fold(NOT_FOUND, f64::max)
    }

    /// As [`extract`](Self::extract); a missing description is "not found".
    pub fn extract_opt(&self, text: Option<&str>) -> f64 {
        text.map_or(NOT_FOUND, |t| self.extract(t))
    }

    /// As [`extract`](Self::extract) for an untyped JSON field. Anything
    /// other than a string (null, number, object, array) is "not found".
    pub fn extract_value(&self, value: &serde_json::Value) -> f64 {
        self.extract_opt(value.as_str())
    }

    /// Every plausible area in order of appearance.
    pub fn candidates(&self, text: &str) -> Vec<f64> {
        self.pattern
            .captures_iter(text)
            .filter_map(|cap| {
                let literal = cap.get(1)?.as_str();
                let value = self.locale.parse(literal);
                if value.is_none() {
                    trace!(literal, "dropping unparseable numeral");
                }
                value
            })
            .filter(|&v| self.is_plausible(v))
            .collect()
    }

    /// Strictly inside `(min_area, max_area)`.
    pub fn is_plausible(&self, value: f64) -> bool {
        value > self.min_area && value < self.max_area
    }
}

impl Default for AreaExtractor {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default()).expect("default extractor config is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn simple_superscript_unit() {
        assert_eq!(extract_area("150m²"), 150.0);
    }

    #[test]
    fn grouped_literal_with_m2() {
        assert_eq!(extract_area("1.500,50 m2"), 1500.5);
    }

    #[test]
    fn spelled_out_unit_with_inner_whitespace() {
        assert_eq!(extract_area("reforma de 320 metros quadrados"), 320.0);
        assert_eq!(extract_area("reforma de 320 metrosquadrados"), 320.0);
        assert_eq!(extract_area("reforma de 320   METROS   QUADRADOS"), 320.0);
    }

    #[test]
    fn unit_is_case_insensitive() {
        assert_eq!(extract_area("área de 75 M2"), 75.0);
        assert_eq!(extract_area("área de 75 M²"), 75.0);
    }

    #[test]
    fn year_like_area_with_unit_is_accepted() {
        assert_eq!(extract_area("Construção de 2024 m² de calçada"), 2024.0);
    }

    #[test]
    fn number_without_unit_is_not_an_area() {
        assert_eq!(extract_area("ano 2024"), NOT_FOUND);
    }

    #[test]
    fn largest_candidate_wins() {
        assert_eq!(extract_area("sala de 30m² e área total de 500 m²"), 500.0);
        assert_eq!(
            extract_area("500 m² de piso e 30 metros quadrados de forro"),
            500.0
        );
    }

    #[test]
    fn lower_bound_is_exclusive() {
        assert_eq!(extract_area("5m²"), NOT_FOUND);
        assert_eq!(extract_area("10m²"), NOT_FOUND);
        assert_eq!(extract_area("11m²"), 11.0);
        assert_eq!(extract_area("10,01 m²"), 10.01);
    }

    #[test]
    fn upper_bound_is_exclusive() {
        assert_eq!(extract_area("1.000.000 m²"), NOT_FOUND);
        assert_eq!(extract_area("999.999,99 m²"), 999_999.99);
    }

    #[test]
    fn malformed_groupings_use_fixed_rule() {
        // 1234567 parses but exceeds the upper bound.
        assert_eq!(extract_area("1.234.567 m²"), NOT_FOUND);
        // "1.234.56" is not a float, so the candidate is dropped.
        assert_eq!(extract_area("1,234,56 m²"), NOT_FOUND);
        // A bad literal does not stop the scan.
        assert_eq!(extract_area("1,234,56 m² e 80 m²"), 80.0);
    }

    #[test]
    fn lone_separator_is_dropped() {
        assert_eq!(extract_area("..., m2"), NOT_FOUND);
    }

    #[test]
    fn empty_and_unicode_text() {
        assert_eq!(extract_area(""), NOT_FOUND);
        assert_eq!(extract_area("🏗️ obra sem metragem — ñ"), NOT_FOUND);
        assert_eq!(extract_area("área útil: 42 m² ✓"), 42.0);
        assert_eq!(extract_area("sala de 150 m²"), 150.0);
        assert_eq!(extract_area("sala de １５０ m²"), NOT_FOUND);
    }

    #[test]
    fn non_text_values_are_not_found() {
        let ex = AreaExtractor::default();
        assert_eq!(ex.extract_value(&json!(null)), NOT_FOUND);
        assert_eq!(ex.extract_value(&json!(150)), NOT_FOUND);
        assert_eq!(ex.extract_value(&json!({ "area": "150 m²" })), NOT_FOUND);
        assert_eq!(ex.extract_value(&json!(["150 m²"])), NOT_FOUND);
        assert_eq!(ex.extract_value(&json!("150 m²")), 150.0);
        assert_eq!(ex.extract_opt(None), NOT_FOUND);
    }

    #[test]
    fn candidates_keep_order_of_appearance() {
        let ex = AreaExtractor::default();
        assert_eq!(
            ex.candidates("bloco A 120 m², bloco B 5 m², bloco C 80,5 m2"),
            vec![120.0, 80.5]
        );
    }

    #[test]
    fn custom_bounds_and_pattern() {
        let config = ExtractorConfig {
            min_area: 0.0,
            max_area: 100.0,
            unit_pattern: r"m²|m2|sqm".into(),
            ..Default::default()
        };
        let ex = AreaExtractor::new(&config).unwrap();
        assert_eq!(ex.extract("5 sqm"), 5.0);
        assert_eq!(ex.extract("150 m²"), NOT_FOUND);
    }

    #[test]
    fn inverted_bounds_rejected() {
        let config = ExtractorConfig {
            min_area: 100.0,
            max_area: 10.0,
            ..Default::default()
        };
        assert!(matches!(
            AreaExtractor::new(&config),
            Err(CoreError::Bounds { .. })
        ));
    }

    #[test]
    fn equal_or_nan_bounds_rejected() {
        for (min_area, max_area) in [(50.0, 50.0), (f64::NAN, 100.0), (10.0, f64::NAN)] {
            let config = ExtractorConfig {
                min_area,
                max_area,
                ..Default::default()
            };
            assert!(
                matches!(AreaExtractor::new(&config), Err(CoreError::Bounds { .. })),
                "{min_area}..{max_area}"
            );
        }
    }

    #[test]
    fn invalid_pattern_rejected() {
        let config = ExtractorConfig {
            unit_pattern: "m2(".into(),
            ..Default::default()
        };
        assert!(matches!(
            AreaExtractor::new(&config),
            Err(CoreError::Pattern(_))
        ));
    }

    #[test]
    fn result_is_never_negative() {
        for text in ["-150 m²", "- 20 m2", "m² 150", "150", "m2m2m2"] {
            assert!(extract_area(text) >= 0.0, "{text}");
        }
    }
}
