//! The working table: one row per fetched contract, editable by the user.
//!
//! A search writes it; the user flips `Usar` and corrects `Área (m²)` in a
//! spreadsheet; the index step reads it back. Reading is lenient because the
//! file has been through human hands.
//!
//! Prices and areas are written with at least the configured decimals and
//! more when a value needs them, so a write/read cycle does not round the
//! numbers that feed the index.

use std::path::Path;
use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::record_batch::RecordBatch;
use obrabench_core::{
    ContractItemRecord, ExportConfig, Organization, WorkingRow, WorkingSet, tables,
};
use tracing::{info, warn};

use crate::StoreError;
use crate::delimited::{cell, parse_delimited, render_delimited, string_column, utf8};

/// Values of `Usar` that mean "include this row".
const TRUTHY: &[&str] = &["true", "sim", "s", "x", "1", "yes", "y", "verdadeiro"];

/// Build the working table batch. Numbers use the export locale without
/// losing precision.
pub fn working_set_to_batch(
    set: &WorkingSet,
    format: &ExportConfig,
) -> Result<RecordBatch, StoreError> {
    let rows = set.rows();
    let num = |v: f64| format.locale.format_exact(v, format.decimals);

    let columns: Vec<ArrayRef> = vec![
        utf8(rows.iter().map(|r| r.include.to_string())),
        utf8(rows.iter().map(|r| r.record.control_id.clone())),
        utf8(rows.iter().map(|r| r.record.display_date())),
        utf8(rows.iter().map(|r| r.record.organization_name().to_string())),
        utf8(rows.iter().map(|r| r.record.description().to_string())),
        utf8(rows.iter().map(|r| num(r.record.unit_price))),
        utf8(rows.iter().map(|r| num(r.suggested_area))),
        utf8(rows.iter().map(|r| num(r.area))),
        utf8(rows.iter().map(|r| r.record.pncp_link())),
        utf8(rows.iter().map(|r| r.record.google_link())),
    ];

    Ok(RecordBatch::try_new(
        Arc::new(tables::working_schema()),
        columns,
    )?)
}

/// Rebuild a working set from parsed table batches.
///
/// `Usar` accepts common yes-words; numeric cells that are blank or
/// unparseable read as zero. Link columns are ignored and recomputed.
pub fn working_set_from_batches(
    batches: &[RecordBatch],
    format: &ExportConfig,
) -> Result<WorkingSet, StoreError> {
    let mut rows = Vec::new();

    for batch in batches {
        let use_col = string_column(batch, tables::USE)?;
        let id_col = string_column(batch, tables::CONTROL_ID)?;
        let date_col = string_column(batch, tables::DATE)?;
        let org_col = string_column(batch, tables::ORGANIZATION)?;
        let desc_col = string_column(batch, tables::DESCRIPTION)?;
        let price_col = string_column(batch, tables::PRICE)?;
        let suggested_col = string_column(batch, tables::SUGGESTED_AREA)?;
        let area_col = string_column(batch, tables::AREA)?;

        for row in 0..batch.num_rows() {
            let control_id = cell(id_col, row).trim().to_string();
            let area_text = cell(area_col, row);
            let area = format.locale.parse_or_zero(area_text);
            if !area_text.trim().is_empty() && format.locale.parse(area_text).is_none() {
                warn!(control_id = %control_id, value = area_text, "unreadable area; using 0");
            }

            let description = cell(desc_col, row);
            let org_name = cell(org_col, row);
            let date = cell(date_col, row);
            let record = ContractItemRecord {
                control_id,
                description: (!description.is_empty()).then(|| description.to_string()),
                unit_price: format.locale.parse_or_zero(cell(price_col, row)),
                organization: (!org_name.is_empty()).then(|| Organization {
                    name: Some(org_name.to_string()),
                    cnpj: None,
                }),
                result_date: (!date.is_empty()).then(|| date.to_string()),
            };

            rows.push(WorkingRow {
                record,
                suggested_area: format.locale.parse_or_zero(cell(suggested_col, row)),
                area,
                include: is_truthy(cell(use_col, row)),
            });
        }
    }

    Ok(WorkingSet::from_rows(rows))
}

/// Write the working table to `path`.
pub fn write_working_set(
    path: &Path,
    set: &WorkingSet,
    format: &ExportConfig,
) -> Result<(), StoreError> {
    let batch = working_set_to_batch(set, format)?;
    let bytes = render_delimited(&batch, format.delimiter)?;
    std::fs::write(path, bytes)?;
    info!(path = %path.display(), rows = set.len(), "wrote working table");
    Ok(())
}

/// Read a working table previously written by [`write_working_set`] and
/// possibly edited since.
pub fn read_working_set(path: &Path, format: &ExportConfig) -> Result<WorkingSet, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    let batches = parse_delimited(&bytes, format.delimiter)?;
    let set = working_set_from_batches(&batches, format)?;
    info!(
        path = %path.display(),
        rows = set.len(),
        selected = set.rows().iter().filter(|r| r.include).count(),
        "read working table"
    );
    Ok(set)
}

fn is_truthy(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    TRUTHY.contains(&v.as_str())
}
