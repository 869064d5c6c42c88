//! The working set: fetched records under review in one session.
//!
//! State is explicit and owned by the caller. The fetch step builds it, the
//! curation step mutates it, and the aggregation step reads
//! [`WorkingSet::curated_entries`] from it.

use tracing::debug;

use crate::area::AreaExtractor;
use crate::index::CuratedEntry;
use crate::record::ContractItemRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct WorkingRow {
    pub record: ContractItemRecord,
    /// What the extractor found in the description.
    pub suggested_area: f64,
    /// Area used for the index. Starts as the suggestion; the user may edit it.
    pub area: f64,
    pub include: bool,
}

impl WorkingRow {
    pub fn curated_entry(&self) -> CuratedEntry {
        CuratedEntry {
            control_id: self.record.control_id.clone(),
            organization: self.record.organization_name().to_string(),
            description: self.record.description().to_string(),
            result_date: self.record.display_date(),
            price: self.record.unit_price,
            area: self.area,
            include: self.include,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingSet {
    rows: Vec<WorkingRow>,
}

impl WorkingSet {
    /// Build from freshly fetched records. Records without a positive price
    /// are dropped; each remaining description gets a suggested area.
    pub fn from_records(records: Vec<ContractItemRecord>, extractor: &AreaExtractor) -> Self {
        let fetched = records.len();
        let rows: Vec<WorkingRow> = records
            .into_iter()
            .filter(|r| r.unit_price > 0.0)
            .map(|record| {
                let suggested = extractor.extract_opt(record.description.as_deref());
                WorkingRow {
                    record,
                    suggested_area: suggested,
                    area: suggested,
                    include: false,
                }
            })
            .collect();

        let with_area = rows.iter().filter(|r| r.suggested_area > 0.0).count();
        debug!(fetched, kept = rows.len(), with_area, "built working set");
        Self { rows }
    }

    /// Rebuild from rows read back from a saved table.
    pub fn from_rows(rows: Vec<WorkingRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[WorkingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn any_selected(&self) -> bool {
        self.rows.iter().any(|r| r.include)
    }

    /// Set the inclusion flag on the row with this control id.
    /// Returns `false` when no row matches.
    pub fn select(&mut self, control_id: &str, include: bool) -> bool {
        match self.row_mut(control_id) {
            Some(row) => {
                row.include = include;
                true
            }
            None => false,
        }
    }

    pub fn select_all(&mut self, include: bool) {
        for row in &mut self.rows {
            row.include = include;
        }
    }

    /// Override the area on the row with this control id.
    /// Returns `false` when no row matches.
    pub fn set_area(&mut self, control_id: &str, area: f64) -> bool {
        match self.row_mut(control_id) {
            Some(row) => {
                row.area = area;
                true
            }
            None => false,
        }
    }

    pub fn curated_entries(&self) -> Vec<CuratedEntry> {
        self.rows.iter().map(WorkingRow::curated_entry).collect()
    }

    fn row_mut(&mut self, control_id: &str) -> Option<&mut WorkingRow> {
        self.rows
            .iter_mut()
            .find(|r| r.record.control_id == control_id)
    }
}
