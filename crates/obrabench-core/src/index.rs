//! Price-per-area index aggregation over a curated set of contracts.
//!
//! Only entries the user included, with a positive area and a positive
//! resulting index, contribute. The outcome keeps "nothing selected" apart
//! from "selected but nothing usable" so callers can tell the user whether to
//! pick rows or to fill in areas.

use serde::{Deserialize, Serialize};

/// A record the user has reviewed, with a possibly corrected area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedEntry {
    pub control_id: String,
    pub organization: String,
    pub description: String,
    pub result_date: String,
    pub price: f64,
    pub area: f64,
    pub include: bool,
}

impl CuratedEntry {
    /// Entry with only the numeric fields set.
    pub fn new(price: f64, area: f64, include: bool) -> Self {
        Self {
            control_id: String::new(),
            organization: String::new(),
            description: String::new(),
            result_date: String::new(),
            price,
            area,
            include,
        }
    }

    pub fn index(&self) -> f64 {
        index_of(self.price, self.area)
    }
}

/// A contributing entry and its index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSample {
    pub entry: CuratedEntry,
    pub index: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub mean: f64,
    pub median: f64,
    pub count: usize,
}

/// Statistics plus the samples they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSummary {
    /// Entries with the inclusion flag set, contributing or not.
    pub selected: usize,
    pub samples: Vec<IndexSample>,
    pub result: AggregateResult,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    /// No entry had the inclusion flag set.
    NothingSelected,
    /// Entries were selected but none had a positive index.
    NoValidSamples { selected: usize },
    Index(IndexSummary),
}

impl Aggregation {
    pub fn selected(&self) -> usize {
        match self {
            Self::NothingSelected => 0,
            Self::NoValidSamples { selected } => *selected,
            Self::Index(summary) => summary.selected,
        }
    }

    pub fn summary(&self) -> Option<&IndexSummary> {
        match self {
            Self::Index(summary) => Some(summary),
            _ => None,
        }
    }
}

/// `price / area`, or `0.0` when the area is not positive.
pub fn index_of(price: f64, area: f64) -> f64 {
    if area > 0.0 { price / area } else { 0.0 }
}

/// Reduce the curated set to an index.
pub fn aggregate(entries: &[CuratedEntry]) -> Aggregation {
    let selected: Vec<&CuratedEntry> = entries.iter().filter(|e| e.include).collect();
    if selected.is_empty() {
        return Aggregation::NothingSelected;
    }

    let samples: Vec<IndexSample> = selected
        .iter()
        .map(|e| IndexSample {
            entry: (*e).clone(),
            index: e.index(),
        })
        .filter(|s| s.index > 0.0)
        .collect();

    let mut values: Vec<f64> = samples.iter().map(|s| s.index).collect();
    let (Some(avg), Some(mid)) = (mean(&values), median(&mut values)) else {
        return Aggregation::NoValidSamples {
            selected: selected.len(),
        };
    };

    Aggregation::Index(IndexSummary {
        selected: selected.len(),
        result: AggregateResult {
            mean: avg,
            median: mid,
            count: samples.len(),
        },
        samples,
    })
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Order-statistic median; even counts average the two central values.
/// Sorts `values` in place. `None` for an empty slice.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
