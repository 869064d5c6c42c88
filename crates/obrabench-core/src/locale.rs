//! Regional numeral convention used by procurement descriptions and exports.
//!
//! Brazilian numerals group thousands with `.` and mark decimals with `,`
//! ("1.500,50" is one thousand five hundred and a half). Every place that reads
//! or writes such a literal goes through [`NumberLocale`] so the convention can
//! be swapped in one spot.

use serde::{Deserialize, Serialize};

/// Separator pair for one numeric convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberLocale {
    pub thousands_separator: char,
    pub decimal_separator: char,
}

impl NumberLocale {
    /// pt-BR: `1.234,56`.
    pub const PT_BR: NumberLocale = NumberLocale {
        thousands_separator: '.',
        decimal_separator: ',',
    };

    /// Normalise a locale literal into a float.
    ///
    /// Every thousands separator is removed, then every decimal separator
    /// becomes `.`, then the result is parsed. The rule is applied blindly:
    /// "1.234.567" parses as 1234567 and "1,234,56" fails to parse. Returns
    /// `None` when the normalised text is not a float.
    pub fn parse(&self, literal: &str) -> Option<f64> {
        let cleaned: String = literal
            .trim()
            .chars()
            .filter(|&c| c != self.thousands_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect();
        cleaned.parse::<f64>().ok()
    }

    /// Like [`parse`](Self::parse) but maps blanks and garbage to `0.0`.
    pub fn parse_or_zero(&self, literal: &str) -> f64 {
        self.parse(literal).filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    /// Format with a fixed number of decimals and no grouping: `1500,50`.
    pub fn format(&self, value: f64, decimals: usize) -> String {
        let plain = format!("{value:.decimals$}");
        plain.replace('.', &self.decimal_separator.to_string())
    }

    /// Like [`format`](Self::format), but with as many extra decimals as the
    /// value needs to read back unchanged: `1500,50`, `1250,125`.
    pub fn format_exact(&self, value: f64, min_decimals: usize) -> String {
        let shortest = value.to_string();
        let needed = shortest.split_once('.').map_or(0, |(_, frac)| frac.len());
        self.format(value, needed.max(min_decimals))
    }

    /// Format with thousands grouping: `1.500,50`.
    pub fn format_grouped(&self, value: f64, decimals: usize) -> String {
        let plain = format!("{:.decimals$}", value.abs());
        let (int_part, frac_part) = match plain.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (plain.as_str(), None),
        };

        let digits: Vec<char> = int_part.chars().collect();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, d) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(*d);
        }

        let mut out = String::new();
        if value.is_sign_negative() && value != 0.0 {
            out.push('-');
        }
        out.push_str(&grouped);
        if let Some(frac) = frac_part {
            out.push(self.decimal_separator);
            out.push_str(frac);
        }
        out
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::PT_BR
    }
}
